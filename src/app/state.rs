use crossbeam_channel::{Receiver, Sender};

use crate::analysis::{AnalysisOutcome, AnalysisTask};
use crate::config::AppConfig;
use crate::game::GameEngine;
use crate::i18n::Language;
use crate::motion::SignalConditioner;
use crate::spectrum::SpectrumAnalyzer;
use crate::types::{AnalysisResult, AudioData, DataPoint, GeoFix};

/// 应用状态管理模块
/// 仿真和信号状态是进程内部的普通结构体，由回调推进，
/// 与 UI 刷新周期无关；UI 只按自己的节奏读取。

/// 可切换的传感器面板
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorKind {
    Motion,
    Audio,
    Location,
    Game,
}

/// 数据通道状态
pub struct DataChannels {
    pub motion_receiver: Receiver<DataPoint>,
    pub audio_receiver: Receiver<AudioData>,
    pub geo_receiver: Receiver<GeoFix>,
}

/// 分析任务通道
pub struct AnalysisChannels {
    pub task_sender: Sender<AnalysisTask>,
    pub outcome_receiver: Receiver<AnalysisOutcome>,
}

/// 统一的应用状态管理
pub struct AppState {
    pub active_panel: SensorKind,
    pub language: Language,

    pub conditioner: SignalConditioner,
    pub engine: GameEngine,
    pub spectrum: SpectrumAnalyzer,
    pub audio_active: bool,

    pub motion_analysis: AnalysisResult,
    pub location_analysis: AnalysisResult,

    pub geo_fix: Option<GeoFix>,
    pub geo_waiting: bool,
    pub geo_error: String,

    pub channels: DataChannels,
    pub analysis: AnalysisChannels,
}

impl AppState {
    pub fn new(config: &AppConfig, channels: DataChannels, analysis: AnalysisChannels) -> Self {
        Self {
            active_panel: SensorKind::Motion,
            language: Language::En,
            conditioner: SignalConditioner::new(&config.filter),
            // 真实边界在首帧渲染时由面板尺寸刷新
            engine: GameEngine::new(&config.game, 600.0, 400.0),
            spectrum: SpectrumAnalyzer::new(&config.spectrum),
            audio_active: false,
            motion_analysis: AnalysisResult::idle(),
            location_analysis: AnalysisResult::idle(),
            geo_fix: None,
            geo_waiting: false,
            geo_error: String::new(),
            channels,
            analysis,
        }
    }

    /// 切换面板：先注销旧面板的回调，再激活新面板。
    /// 所有注销路径都幂等，重复切换不出错。
    pub fn switch_panel(&mut self, panel: SensorKind) {
        if panel == self.active_panel {
            return;
        }

        match self.active_panel {
            SensorKind::Motion => self.conditioner.stop(),
            SensorKind::Audio => {
                self.audio_active = false;
                self.spectrum.reset();
            }
            SensorKind::Location => self.geo_waiting = false,
            // 游戏引擎保留状态，离开面板后只是不再推帧
            SensorKind::Game => {}
        }

        self.active_panel = panel;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::bounded;

    fn state() -> AppState {
        let (_motion_tx, motion_rx) = bounded(4);
        let (_audio_tx, audio_rx) = bounded(4);
        let (_geo_tx, geo_rx) = bounded(4);
        let (task_tx, _task_rx) = bounded(4);
        let (_outcome_tx, outcome_rx) = bounded(4);

        AppState::new(
            &AppConfig::default(),
            DataChannels { motion_receiver: motion_rx, audio_receiver: audio_rx, geo_receiver: geo_rx },
            AnalysisChannels { task_sender: task_tx, outcome_receiver: outcome_rx },
        )
    }

    #[test]
    fn switching_away_tears_down_motion_subscription() {
        let mut s = state();
        s.conditioner.start();
        s.conditioner.on_sample(&DataPoint::new(1.0, 1.0, 1.0, 0));
        assert_eq!(s.conditioner.buffer_len(), 1);

        s.switch_panel(SensorKind::Game);
        s.switch_panel(SensorKind::Game); // 幂等

        // 注销后模拟的传感器事件不再改动状态
        s.conditioner.on_sample(&DataPoint::new(1.0, 1.0, 1.0, 1));
        assert_eq!(s.conditioner.buffer_len(), 1);
        assert!(!s.conditioner.is_active());
    }

    #[test]
    fn switching_away_from_audio_clears_spectrum() {
        let mut s = state();
        s.switch_panel(SensorKind::Audio);
        s.audio_active = true;
        s.spectrum.process(&vec![8000i16; 256]);

        s.switch_panel(SensorKind::Motion);
        assert!(!s.audio_active);
        assert!(s.spectrum.bins().iter().all(|&b| b == 0.0));
    }

    #[test]
    fn switching_away_cancels_pending_geo_request() {
        let mut s = state();
        s.switch_panel(SensorKind::Location);
        s.geo_waiting = true;

        s.switch_panel(SensorKind::Motion);
        assert!(!s.geo_waiting);
    }
}
