use eframe::egui;
use egui::{Color32, CornerRadius, Pos2, Rect, Sense, Vec2};

use crate::app::sensor_app::SensorFusionApp;
use crate::i18n::translations;

pub fn render_audio_panel(app: &mut SensorFusionApp, ui: &mut egui::Ui) {
    let t = translations(app.state.language);

    ui.horizontal(|ui| {
        if app.state.audio_active {
            ui.colored_label(Color32::from_rgb(239, 68, 68), "●");
            if ui.button(t.audio_stop_btn).clicked() {
                app.state.audio_active = false;
                app.state.spectrum.reset();
            }
        } else if ui.button(t.audio_start_btn).clicked() {
            app.state.audio_active = true;
        }
    });
    ui.weak(t.audio_description);
    ui.add_space(8.0);

    render_spectrum(app, ui);
}

/// 频谱柱状图：低频在左，颜色从蓝经青到紫渐变
fn render_spectrum(app: &SensorFusionApp, ui: &mut egui::Ui) {
    let available = ui.available_size();
    let canvas_size = Vec2::new(available.x, (available.y - 8.0).max(120.0));
    let (rect, _response) = ui.allocate_exact_size(canvas_size, Sense::hover());
    let painter = ui.painter_at(rect);

    painter.rect_filled(rect, CornerRadius::same(8), Color32::from_rgb(15, 23, 42));

    let bins = app.state.spectrum.bins();
    if bins.is_empty() {
        return;
    }

    let gap = 1.0;
    let bar_width = (rect.width() - gap * bins.len() as f32) / bins.len() as f32;
    for (i, &magnitude) in bins.iter().enumerate() {
        let fraction = i as f32 / bins.len() as f32;
        let height = (magnitude / 255.0) as f32 * (rect.height() - 8.0);
        if height < 1.0 {
            continue;
        }

        let x = rect.left() + i as f32 * (bar_width + gap);
        let bar = Rect::from_min_max(
            Pos2::new(x, rect.bottom() - 4.0 - height),
            Pos2::new(x + bar_width, rect.bottom() - 4.0),
        );
        painter.rect_filled(bar, CornerRadius::same(1), bin_color(fraction));
    }
}

fn bin_color(fraction: f32) -> Color32 {
    let blue = Color32::from_rgb(59, 130, 246);
    let cyan = Color32::from_rgb(6, 182, 212);
    let purple = Color32::from_rgb(168, 85, 247);
    if fraction < 0.5 {
        lerp_color(blue, cyan, fraction * 2.0)
    } else {
        lerp_color(cyan, purple, (fraction - 0.5) * 2.0)
    }
}

fn lerp_color(a: Color32, b: Color32, s: f32) -> Color32 {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * s).round() as u8;
    Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}
