use log::info;
use rand::Rng;

use crate::config::GameConfig;
use crate::types::DataPoint;

use super::bodies::{distance, Obstacle, PlayerBody, TargetZone};

/// 游戏阶段状态机：Start → Playing →（撞障碍）GameOver →（重开）Playing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Start,
    Playing,
    GameOver,
}

/// 单帧推进的结果事件
#[derive(Debug, Default, Clone, Copy)]
pub struct StepOutcome {
    pub scored: bool,
    pub crashed: bool,
}

/// 物理与碰撞引擎
///
/// 以最近一次收到的原始加速度向量为速度控制输入，
/// 每个显示帧积分一次二维位置，处理边界反弹、障碍碰撞和得分。
/// 坐标系就是画布像素坐标；画布缩放只更新边界，不重置仿真状态，
/// 越界的体在下一次 clamp 时自然回到界内。
///
/// 输入流静默中断时引擎继续用最后的向量积分（冻结最后值），
/// 与断流前行为一致，不做特殊处理。
#[derive(Debug)]
pub struct GameEngine {
    pub phase: GamePhase,
    pub player: PlayerBody,
    pub target: TargetZone,
    pub obstacles: Vec<Obstacle>,
    pub score: u32,
    /// 最近一次加速度输入，x 轴已按屏幕方向取反
    pub input: (f64, f64),
    /// 玩家到目标的接近度 0..1，只用于渲染光晕，不影响判定
    pub proximity: f64,
    width: f64,
    height: f64,
    config: GameConfig,
}

impl GameEngine {
    pub fn new(config: &GameConfig, width: f64, height: f64) -> Self {
        Self {
            phase: GamePhase::Start,
            player: PlayerBody {
                x: width / 2.0,
                y: height / 2.0,
                vx: 0.0,
                vy: 0.0,
                radius: config.player_radius,
            },
            target: TargetZone { x: 0.0, y: 0.0, radius: config.target_radius },
            obstacles: Vec::new(),
            score: 0,
            input: (0.0, 0.0),
            proximity: 0.0,
            width,
            height,
            config: config.clone(),
        }
    }

    /// 进入 Playing：居中重生玩家、随机落位目标和障碍、清零得分。
    /// Start 和 GameOver 之后的重开走同一条初始化路径。
    pub fn start(&mut self, rng: &mut impl Rng) {
        self.score = 0;
        self.player = PlayerBody {
            x: self.width / 2.0,
            y: self.height / 2.0,
            vx: 0.0,
            vy: 0.0,
            radius: self.config.player_radius,
        };
        self.spawn_target(rng);
        self.spawn_obstacles(rng);
        self.proximity = 0.0;
        self.phase = GamePhase::Playing;
        info!("Game started: {}x{}, {} obstacles", self.width, self.height, self.obstacles.len());
    }

    /// 画布尺寸变化：只更新边界，不动仿真状态
    pub fn set_bounds(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// 传感器事件回调。GameOver 后停止监听，输入不再更新。
    /// x 轴取反以修正设备与屏幕方向的差异。
    pub fn apply_input(&mut self, raw: &DataPoint) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.input = (-raw.x, raw.y);
    }

    /// 每个显示帧推进一步。非 Playing 阶段是空操作。
    pub fn step(&mut self, rng: &mut impl Rng) -> StepOutcome {
        if self.phase != GamePhase::Playing {
            return StepOutcome::default();
        }

        let mut outcome = StepOutcome::default();
        let p = &mut self.player;

        // 积分速度，两轴相互独立
        p.vx += self.input.0 * self.config.accel_gain;
        p.vy += self.input.1 * self.config.accel_gain;

        // 唯一的能量损失来源，否则持续输入下速度无界增长
        p.vx *= self.config.damping;
        p.vy *= self.config.damping;

        p.x += p.vx;
        p.y += p.vy;

        // 边界 clamp + 非弹性反弹
        let bounce = -self.config.bounce_damping;
        if p.x < p.radius {
            p.x = p.radius;
            p.vx *= bounce;
        }
        if p.x > self.width - p.radius {
            p.x = self.width - p.radius;
            p.vx *= bounce;
        }
        if p.y < p.radius {
            p.y = p.radius;
            p.vy *= bounce;
        }
        if p.y > self.height - p.radius {
            p.y = self.height - p.radius;
            p.vy *= bounce;
        }

        for obstacle in &self.obstacles {
            if obstacle.hits_circle(p.x, p.y, p.radius) {
                self.phase = GamePhase::GameOver;
                outcome.crashed = true;
                info!("Game over at score {}", self.score);
                return outcome;
            }
        }

        let dist = distance(p.x, p.y, self.target.x, self.target.y);
        if dist < p.radius + self.target.radius {
            self.score += 1;
            outcome.scored = true;
            self.spawn_target(rng);
        }

        // 接近度按命中前的距离计算，纯装饰信号
        self.proximity = (1.0 - dist / self.config.proximity_range).max(0.0);

        outcome
    }

    /// 在边距约束的范围内均匀落位目标，避免贴边生成
    pub fn spawn_target(&mut self, rng: &mut impl Rng) {
        let margin = self.config.spawn_margin;
        self.target = TargetZone {
            x: random_within(rng, margin, self.width - margin, self.width / 2.0),
            y: random_within(rng, margin, self.height - margin, self.height / 2.0),
            radius: self.config.target_radius,
        };
    }

    fn spawn_obstacles(&mut self, rng: &mut impl Rng) {
        let reserve = self.config.obstacle_max_size;
        self.obstacles = (0..self.config.obstacle_count)
            .map(|_| Obstacle {
                x: random_within(rng, 0.0, self.width - reserve, 0.0),
                y: random_within(rng, 0.0, self.height - reserve, 0.0),
                w: rng.random_range(self.config.obstacle_min_size..self.config.obstacle_max_size),
                h: rng.random_range(self.config.obstacle_min_size..self.config.obstacle_max_size),
            })
            .collect();
    }
}

/// 画布小于生成范围时退回到 fallback，避免空区间
fn random_within(rng: &mut impl Rng, low: f64, high: f64, fallback: f64) -> f64 {
    if high > low {
        rng.random_range(low..high)
    } else {
        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    /// 400x400 画布上一个干净的 Playing 态引擎：无障碍、目标在角落
    fn playing_engine() -> GameEngine {
        let mut engine = GameEngine::new(&GameConfig::default(), 400.0, 400.0);
        engine.start(&mut rng());
        engine.obstacles.clear();
        engine.target = TargetZone { x: 30.0, y: 30.0, radius: 12.0 };
        engine.input = (0.0, 0.0);
        engine
    }

    #[test]
    fn start_initializes_bodies_and_enters_playing() {
        let mut engine = GameEngine::new(&GameConfig::default(), 400.0, 400.0);
        assert_eq!(engine.phase, GamePhase::Start);

        engine.start(&mut rng());
        assert_eq!(engine.phase, GamePhase::Playing);
        assert_eq!(engine.score, 0);
        assert_eq!(engine.player.x, 200.0);
        assert_eq!(engine.player.y, 200.0);
        assert_eq!(engine.obstacles.len(), 5);
        assert!(engine.target.x >= 30.0 && engine.target.x <= 370.0);
        assert!(engine.target.y >= 30.0 && engine.target.y <= 370.0);
    }

    #[test]
    fn velocity_decays_geometrically_without_input() {
        let mut engine = playing_engine();
        engine.player.vx = 4.0;

        let mut r = rng();
        let mut previous = 4.0;
        for _ in 0..50 {
            engine.step(&mut r);
            let vx = engine.player.vx;
            // 每帧恰好乘以阻尼系数，且不会自发变号
            assert!((vx - previous * 0.95).abs() < 1e-12);
            assert!(vx > 0.0);
            previous = vx;
        }
        assert!(previous < 4.0 * 0.95f64.powi(49) + 1e-9);
    }

    #[test]
    fn boundary_clamp_flips_and_halves_velocity() {
        let mut engine = playing_engine();
        engine.player.x = 5.0;
        engine.player.vx = -2.0;

        engine.step(&mut rng());

        // 阻尼后 vx = -1.9，越界被 clamp 到半径处，速度反向并减半
        assert_eq!(engine.player.x, 8.0);
        assert!((engine.player.vx - 0.95).abs() < 1e-12);
    }

    #[test]
    fn obstacle_hit_ends_game_and_stops_input() {
        let mut engine = playing_engine();
        engine.obstacles.push(Obstacle { x: 150.0, y: 150.0, w: 100.0, h: 100.0 });

        let outcome = engine.step(&mut rng());
        assert!(outcome.crashed);
        assert_eq!(engine.phase, GamePhase::GameOver);

        // GameOver 后监听停止：输入和仿真状态都不再变化
        let frozen = engine.player;
        engine.apply_input(&DataPoint::new(9.0, 9.0, 0.0, 0));
        assert_eq!(engine.input, (0.0, 0.0));
        let outcome = engine.step(&mut rng());
        assert!(!outcome.crashed && !outcome.scored);
        assert_eq!(engine.player, frozen);
    }

    #[test]
    fn reaching_target_scores_once_and_respawns_inside_margin() {
        let mut engine = playing_engine();
        engine.player.x = 100.0;
        engine.player.y = 100.0;
        engine.target = TargetZone { x: 105.0, y: 100.0, radius: 12.0 };

        let outcome = engine.step(&mut rng());

        // 距离 5 < 8+12，恰好加一分
        assert!(outcome.scored);
        assert_eq!(engine.score, 1);
        assert!(engine.target.x >= 30.0 && engine.target.x <= 370.0);
        assert!(engine.target.y >= 30.0 && engine.target.y <= 370.0);
        // 接近度按命中前的距离算：1 - 5/250
        assert!((engine.proximity - 0.98).abs() < 1e-12);
    }

    #[test]
    fn acceleration_input_moves_player_without_cross_axis_coupling() {
        let mut engine = playing_engine();
        let mut r = rng();

        // 设备 x 轴输入取反：raw x = -1 对应屏幕上 ax = +1
        engine.apply_input(&DataPoint::new(-1.0, 0.0, 9.8, 0));
        assert_eq!(engine.input, (1.0, 0.0));

        let mut last_x = engine.player.x;
        for _ in 0..10 {
            engine.step(&mut r);
            assert!(engine.player.x > last_x, "player.x must strictly increase");
            assert_eq!(engine.player.vy, 0.0);
            assert_eq!(engine.player.y, 200.0);
            last_x = engine.player.x;
        }
    }

    #[test]
    fn input_freezes_at_last_vector_when_stream_stops() {
        let mut engine = playing_engine();
        let mut r = rng();
        engine.apply_input(&DataPoint::new(-1.0, 0.0, 9.8, 0));

        engine.step(&mut r);
        let v1 = engine.player.vx;
        // 没有新事件到达，引擎继续用最后的向量积分
        engine.step(&mut r);
        assert!(engine.player.vx > v1);
    }

    #[test]
    fn resize_keeps_simulation_state() {
        let mut engine = playing_engine();
        engine.player.x = 390.0;
        engine.set_bounds(200.0, 200.0);

        // 缩放不重置状态，越界坐标保留到下一次 clamp
        assert_eq!(engine.player.x, 390.0);
        assert_eq!(engine.phase, GamePhase::Playing);

        engine.step(&mut rng());
        assert_eq!(engine.player.x, 200.0 - engine.player.radius);
    }

    #[test]
    fn restart_resets_score_and_respawns() {
        let mut engine = playing_engine();
        let mut r = rng();
        engine.score = 3;
        engine.obstacles.push(Obstacle { x: 150.0, y: 150.0, w: 100.0, h: 100.0 });
        engine.step(&mut r);
        assert_eq!(engine.phase, GamePhase::GameOver);

        engine.start(&mut r);
        assert_eq!(engine.phase, GamePhase::Playing);
        assert_eq!(engine.score, 0);
        assert_eq!(engine.player.x, 200.0);
        assert_eq!(engine.obstacles.len(), 5);
    }

    #[test]
    fn target_respawns_stay_inside_margin_bounds() {
        let mut engine = playing_engine();
        let mut r = rng();
        for _ in 0..200 {
            engine.spawn_target(&mut r);
            assert!(engine.target.x >= 30.0 && engine.target.x <= 370.0);
            assert!(engine.target.y >= 30.0 && engine.target.y <= 370.0);
        }
    }

    #[test]
    fn degenerate_canvas_falls_back_to_center() {
        let mut engine = GameEngine::new(&GameConfig::default(), 40.0, 40.0);
        engine.start(&mut rng());
        assert_eq!(engine.target.x, 20.0);
        assert_eq!(engine.target.y, 20.0);
    }
}
