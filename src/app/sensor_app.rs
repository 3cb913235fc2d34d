use std::time::Duration;

use eframe::{egui, Frame};
use log::info;

use crate::config::ConfigManager;
use crate::game::GamePhase;

use super::state::{AnalysisChannels, AppState, DataChannels, SensorKind};

pub struct SensorFusionApp {
    // 统一的状态管理
    pub state: AppState,

    // 配置管理
    pub config: ConfigManager,
}

impl SensorFusionApp {
    pub fn new(
        config: ConfigManager,
        channels: DataChannels,
        analysis: AnalysisChannels,
    ) -> Self {
        let state = AppState::new(config.get_config(), channels, analysis);

        let app = SensorFusionApp { state, config };

        info!("应用启动，等待传感器数据...");

        app
    }
}

impl eframe::App for SensorFusionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        // 先排空传感器事件，再渲染本帧
        self.handle_sensor_events();
        self.handle_analysis_outcomes();

        crate::app::ui::render_top_bar(self, ctx);
        crate::app::ui::render_active_panel(self, ctx);

        // 游戏进行中按显示刷新率推帧，其余面板低速轮询即可
        if self.state.active_panel == SensorKind::Game
            && self.state.engine.phase == GamePhase::Playing
        {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(Duration::from_millis(150));
        }
    }
}
