use std::collections::VecDeque;

use crate::config::FilterConfig;
use crate::types::DataPoint;

use super::filter::LowPassFilter;

/// 信号调理器：把抖动的原始加速度流变成
/// (a) 限流后的图表序列和 (b) 供分析用的有界平滑历史。
///
/// 传感器回调频率由平台决定，图表刷新率不跟随它：
/// 只有到达时刻落在周期窗口内的样本才进入图表序列。
#[derive(Debug)]
pub struct SignalConditioner {
    filter: LowPassFilter,
    buffer: VecDeque<DataPoint>,
    chart: VecDeque<DataPoint>,
    config: FilterConfig,
    active: bool,
}

impl SignalConditioner {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            filter: LowPassFilter::new(config.alpha),
            buffer: VecDeque::with_capacity(config.buffer_capacity),
            chart: VecDeque::with_capacity(config.chart_capacity),
            config: config.clone(),
            active: false,
        }
    }

    /// 开始消费传感器事件（幂等）
    pub fn start(&mut self) {
        self.active = true;
    }

    /// 注销传感器回调（幂等，允许从多个退出路径调用）
    pub fn stop(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// 传感器事件回调：平滑、入缓冲、按到达时刻决定是否转发到图表
    pub fn on_sample(&mut self, raw: &DataPoint) {
        if !self.active {
            return;
        }

        let smoothed = self.filter.apply(raw);

        self.buffer.push_back(smoothed);
        if self.buffer.len() > self.config.buffer_capacity {
            self.buffer.pop_front();
        }

        if chart_gate(raw.timestamp, self.config.gate_period_ms, self.config.gate_window_ms) {
            self.chart.push_back(smoothed);
            if self.chart.len() > self.config.chart_capacity {
                self.chart.pop_front();
            }
        }
    }

    /// 图表序列（最多 chart_capacity 个最近接受的点）
    pub fn chart(&self) -> &VecDeque<DataPoint> {
        &self.chart
    }

    /// 最近一个图表点，用于数字读数
    pub fn latest(&self) -> Option<&DataPoint> {
        self.chart.back()
    }

    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// 最近 snapshot_len 条平滑历史的只读快照，交给分析协作方
    pub fn snapshot(&self) -> Vec<DataPoint> {
        let skip = self.buffer.len().saturating_sub(self.config.snapshot_len);
        self.buffer.iter().skip(skip).copied().collect()
    }

    /// 清空历史并复位滤波器（重新订阅时使用）
    pub fn reset(&mut self) {
        self.filter.reset();
        self.buffer.clear();
        self.chart.clear();
    }
}

/// 到达时刻落在周期的前窗口内才放行，约 16Hz 的 UI 刷新上限
fn chart_gate(timestamp_ms: i64, period_ms: i64, window_ms: i64) -> bool {
    timestamp_ms.rem_euclid(period_ms) < window_ms
}
