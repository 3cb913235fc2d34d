/// 游戏里的几何体与碰撞判定

/// 受加速度输入驱动的玩家小球
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBody {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
}

/// 得分目标区，命中后重新随机落位
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetZone {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// 轴对齐矩形障碍，开局生成后不再变动
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Obstacle {
    /// 圆的包围盒与矩形的重叠判定，四个条件全部取严格不等号：
    /// 恰好贴边（px+r == ox）不算碰撞
    pub fn hits_circle(&self, cx: f64, cy: f64, radius: f64) -> bool {
        cx + radius > self.x
            && cx - radius < self.x + self.w
            && cy + radius > self.y
            && cy - radius < self.y + self.h
    }
}

pub fn distance(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
}
