use crate::types::DataPoint;

/// 单极低通滤波器（指数平滑）：y = y*(1-α) + x*α
///
/// 滤波状态从零值起步，第一帧输出是 raw*α 而不是 raw，
/// 曲线因此是缓升进入而不是跳变。内部状态不做舍入，
/// 只在产出样本时舍入到两位小数，保证显示和比较稳定。
#[derive(Debug)]
pub struct LowPassFilter {
    alpha: f64,
    state: [f64; 3],
}

impl LowPassFilter {
    pub fn new(alpha: f64) -> Self {
        Self {
            alpha,
            state: [0.0; 3],
        }
    }

    /// 输入一条原始采样，返回平滑后的采样（时间戳原样保留）
    pub fn apply(&mut self, raw: &DataPoint) -> DataPoint {
        let a = self.alpha;
        self.state[0] = self.state[0] * (1.0 - a) + raw.x * a;
        self.state[1] = self.state[1] * (1.0 - a) + raw.y * a;
        self.state[2] = self.state[2] * (1.0 - a) + raw.z * a;

        DataPoint {
            x: round2(self.state[0]),
            y: round2(self.state[1]),
            z: round2(self.state[2]),
            timestamp: raw.timestamp,
        }
    }

    pub fn reset(&mut self) {
        self.state = [0.0; 3];
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_ramps_in_from_zero() {
        let mut filter = LowPassFilter::new(0.2);
        let smoothed = filter.apply(&DataPoint::new(10.0, -5.0, 9.8, 1));

        // 种子是零态，第一帧输出 raw*α，不允许跳变到 raw
        assert_eq!(smoothed.x, 2.0);
        assert_eq!(smoothed.y, -1.0);
        assert_eq!(smoothed.z, 1.96);
        assert_eq!(smoothed.timestamp, 1);
    }

    #[test]
    fn constant_input_converges_monotonically_to_exact_value() {
        let mut filter = LowPassFilter::new(0.2);
        let raw = DataPoint::new(5.0, 5.0, 5.0, 0);

        let mut previous = 0.0;
        let mut last = DataPoint::new(0.0, 0.0, 0.0, 0);
        for i in 0..100 {
            last = filter.apply(&DataPoint { timestamp: i, ..raw });
            assert!(last.x >= previous, "convergence must be monotonic");
            assert!(last.x <= 5.0);
            previous = last.x;
        }

        // 误差按 (1-α)^n 几何衰减，百步之内必达舍入后的精确值
        assert_eq!(last.x, 5.0);
        assert_eq!(last.y, 5.0);
        assert_eq!(last.z, 5.0);
    }

    #[test]
    fn output_is_rounded_to_two_decimals() {
        let mut filter = LowPassFilter::new(0.2);
        let smoothed = filter.apply(&DataPoint::new(0.333, 0.666, 1.0 / 3.0, 0));
        assert_eq!(smoothed.x, 0.07);
        assert_eq!(smoothed.y, 0.13);
        assert_eq!(smoothed.z, 0.07);
    }

    #[test]
    fn reset_returns_to_zero_seed() {
        let mut filter = LowPassFilter::new(0.2);
        filter.apply(&DataPoint::new(100.0, 100.0, 100.0, 0));
        filter.reset();
        let smoothed = filter.apply(&DataPoint::new(10.0, 10.0, 10.0, 1));
        assert_eq!(smoothed.x, 2.0);
    }
}
