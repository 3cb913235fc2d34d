use eframe::egui;
use egui::Color32;

use crate::analysis::{resolve_display_text, AnalysisKind};
use crate::app::sensor_app::SensorFusionApp;
use crate::i18n::translations;

pub fn render_geo_panel(app: &mut SensorFusionApp, ui: &mut egui::Ui) {
    let t = translations(app.state.language);

    ui.horizontal(|ui| {
        let button = egui::Button::new(t.location_get_btn);
        if ui.add_enabled(!app.state.geo_waiting, button).clicked() {
            app.request_location_fix();
        }
        if app.state.geo_waiting {
            ui.spinner();
            ui.weak(t.location_waiting);
        }
    });

    if !app.state.geo_error.is_empty() {
        ui.colored_label(Color32::from_rgb(239, 68, 68), t.location_error);
    }

    if let Some(fix) = app.state.geo_fix {
        ui.add_space(8.0);
        ui.colored_label(Color32::from_rgb(34, 197, 94), t.location_acquired);
        ui.monospace(format!("{}: {:.5}", t.location_lat, fix.latitude));
        ui.monospace(format!("{}: {:.5}", t.location_lon, fix.longitude));
        ui.monospace(format!("{}: ±{:.1} m", t.location_accuracy, fix.accuracy));

        ui.separator();
        let result = &app.state.location_analysis;
        if result.is_loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.weak(t.motion_analyzing);
            });
        } else if result.timestamp.is_some() {
            let text = resolve_display_text(AnalysisKind::Location, result, app.state.language);
            ui.label(text);
        }
    }
}
