pub mod audio_panel;
pub mod game_panel;
pub mod geo_panel;
pub mod motion_panel;
pub mod top_bar;

use eframe::egui;

use super::sensor_app::SensorFusionApp;
use super::state::SensorKind;

pub use top_bar::render_top_bar;

/// 中央区域渲染当前激活的面板
pub fn render_active_panel(app: &mut SensorFusionApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        match app.state.active_panel {
            SensorKind::Motion => motion_panel::render_motion_panel(app, ui),
            SensorKind::Audio => audio_panel::render_audio_panel(app, ui),
            SensorKind::Location => geo_panel::render_geo_panel(app, ui),
            SensorKind::Game => game_panel::render_game_panel(app, ui),
        }
    });
}
