use std::f64::consts::PI;

use crate::config::SpectrumConfig;

/// 麦克风频谱分析器
///
/// 对最近 fft_size 个 PCM 样本做离散傅里叶变换，产出 fft_size/2 个
/// 频点幅值，帧间按 smoothing 做指数平滑，输出缩放到 0..255，
/// 对齐设备端可视化的习惯（fftSize=128、smoothingTimeConstant=0.8）。
#[derive(Debug)]
pub struct SpectrumAnalyzer {
    config: SpectrumConfig,
    window: Vec<f64>,
    bins: Vec<f64>,
}

impl SpectrumAnalyzer {
    pub fn new(config: &SpectrumConfig) -> Self {
        Self {
            config: config.clone(),
            window: Vec::with_capacity(config.fft_size),
            bins: vec![0.0; config.fft_size / 2],
        }
    }

    /// 收到一块 PCM 数据：归一化进窗口，窗口满则重新计算频谱
    pub fn process(&mut self, samples: &[i16]) {
        for &sample in samples {
            self.window.push(sample as f64 / 32768.0);
            if self.window.len() > self.config.fft_size {
                self.window.remove(0);
            }
        }
        if self.window.len() == self.config.fft_size {
            self.recompute();
        }
    }

    /// 当前频点幅值（0..255）
    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    /// 停止采集时清空状态（幂等）
    pub fn reset(&mut self) {
        self.window.clear();
        for bin in &mut self.bins {
            *bin = 0.0;
        }
    }

    fn recompute(&mut self) {
        let n = self.config.fft_size;
        let smoothing = self.config.smoothing;

        for k in 0..n / 2 {
            let mut re = 0.0;
            let mut im = 0.0;
            for (i, &x) in self.window.iter().enumerate() {
                let angle = -2.0 * PI * (k as f64) * (i as f64) / (n as f64);
                re += x * angle.cos();
                im += x * angle.sin();
            }
            // 归一化到 0..1（满幅正弦在其频点上幅值为 1）
            let magnitude = (re * re + im * im).sqrt() / (n as f64 / 2.0);
            let scaled = (magnitude * 255.0).min(255.0);

            self.bins[k] = self.bins[k] * smoothing + scaled * (1.0 - smoothing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzer() -> SpectrumAnalyzer {
        SpectrumAnalyzer::new(&SpectrumConfig::default())
    }

    fn tone(cycles_per_window: usize, len: usize) -> Vec<i16> {
        (0..len)
            .map(|i| {
                let phase = 2.0 * PI * cycles_per_window as f64 * i as f64 / 128.0;
                (phase.sin() * 32000.0) as i16
            })
            .collect()
    }

    #[test]
    fn silence_produces_empty_spectrum() {
        let mut analyzer = analyzer();
        analyzer.process(&vec![0i16; 256]);
        assert!(analyzer.bins().iter().all(|&b| b == 0.0));
    }

    #[test]
    fn pure_tone_concentrates_in_one_bin() {
        let mut analyzer = analyzer();
        // 多喂几块让帧间平滑收敛
        for _ in 0..40 {
            analyzer.process(&tone(8, 128));
        }

        let bins = analyzer.bins();
        let peak = bins
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, _)| k);
        assert_eq!(peak, Some(8));
        assert!(bins[8] > 150.0);
        assert!(bins[20] < 20.0);
    }

    #[test]
    fn short_chunks_accumulate_until_window_fills() {
        let mut analyzer = analyzer();
        analyzer.process(&tone(8, 64));
        // 窗口未满，不产出频谱
        assert!(analyzer.bins().iter().all(|&b| b == 0.0));
        analyzer.process(&tone(8, 64));
        assert!(analyzer.bins().iter().any(|&b| b > 0.0));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut analyzer = analyzer();
        analyzer.process(&tone(4, 256));
        analyzer.reset();
        analyzer.reset();
        assert!(analyzer.bins().iter().all(|&b| b == 0.0));
    }
}
