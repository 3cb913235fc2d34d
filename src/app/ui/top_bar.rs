use eframe::egui;

use crate::app::sensor_app::SensorFusionApp;
use crate::app::state::SensorKind;
use crate::i18n::{translations, Language};

pub fn render_top_bar(app: &mut SensorFusionApp, ctx: &egui::Context) {
    let t = translations(app.state.language);

    egui::TopBottomPanel::top("top_bar")
        .min_height(40.0)
        .show(ctx, |ui| {
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.heading(t.app_title);

                ui.separator();

                let panels = [
                    (SensorKind::Motion, t.nav_motion),
                    (SensorKind::Audio, t.nav_audio),
                    (SensorKind::Location, t.nav_location),
                    (SensorKind::Game, t.nav_game),
                ];
                for (kind, label) in panels {
                    if ui.selectable_label(app.state.active_panel == kind, label).clicked() {
                        app.state.switch_panel(kind);
                    }
                }

                // 语言切换放最右边
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let lang_label = match app.state.language {
                        Language::En => "EN",
                        Language::Zh => "中",
                    };
                    if ui.button(lang_label).clicked() {
                        app.state.language = app.state.language.toggled();
                    }
                });
            });
            ui.add_space(5.0);
        });
}
