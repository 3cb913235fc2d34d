use eframe::egui;
use egui::Color32;
use egui_plot::{Line, Plot, PlotPoints};

use crate::analysis::{resolve_display_text, AnalysisKind};
use crate::app::sensor_app::SensorFusionApp;
use crate::i18n::translations;
use crate::types::DataPoint;

pub fn render_motion_panel(app: &mut SensorFusionApp, ui: &mut egui::Ui) {
    let t = translations(app.state.language);

    if !app.state.conditioner.is_active() {
        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            ui.label(t.motion_waiting);
            ui.add_space(12.0);
            if ui.button(t.motion_start_btn).clicked() {
                // 重新订阅从零态开始，曲线缓升进入
                app.state.conditioner.reset();
                app.state.conditioner.start();
            }
        });
        return;
    }

    ui.horizontal(|ui| {
        ui.colored_label(Color32::from_rgb(239, 68, 68), "●");
        ui.label(t.motion_live_feed);
        if ui.button(t.motion_stop_btn).clicked() {
            app.state.conditioner.stop();
        }
    });

    render_chart(app, ui);
    render_readouts(app, ui);
    render_analysis_section(app, ui);
}

fn render_chart(app: &SensorFusionApp, ui: &mut egui::Ui) {
    let chart_capacity = app.config.get_config().filter.chart_capacity as f64;
    let chart = app.state.conditioner.chart();

    let series: [(&str, fn(&DataPoint) -> f64, Color32); 3] = [
        ("x", |p| p.x, Color32::from_rgb(239, 68, 68)),
        ("y", |p| p.y, Color32::from_rgb(34, 197, 94)),
        ("z", |p| p.z, Color32::from_rgb(59, 130, 246)),
    ];

    Plot::new("motion_chart")
        .height(220.0)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(egui_plot::PlotBounds::from_min_max(
                [0.0, -12.0],
                [chart_capacity, 12.0],
            ));

            for (name, axis, color) in series {
                let points: Vec<[f64; 2]> = chart
                    .iter()
                    .enumerate()
                    .map(|(i, p)| [i as f64, axis(p)])
                    .collect();
                plot_ui.line(Line::new(name, PlotPoints::from(points)).color(color).width(2.0));
            }
        });
}

fn render_readouts(app: &SensorFusionApp, ui: &mut egui::Ui) {
    let latest = app.state.conditioner.latest().copied();
    ui.horizontal(|ui| {
        let (x, y, z) = match latest {
            Some(p) => (p.x, p.y, p.z),
            None => (0.0, 0.0, 0.0),
        };
        ui.colored_label(Color32::from_rgb(239, 68, 68), format!("ACCEL X {:.1}", x));
        ui.separator();
        ui.colored_label(Color32::from_rgb(34, 197, 94), format!("ACCEL Y {:.1}", y));
        ui.separator();
        ui.colored_label(Color32::from_rgb(59, 130, 246), format!("ACCEL Z {:.1}", z));
        ui.separator();
        ui.weak(format!("{} samples buffered", app.state.conditioner.buffer_len()));
    });
}

fn render_analysis_section(app: &mut SensorFusionApp, ui: &mut egui::Ui) {
    let t = translations(app.state.language);

    ui.separator();
    ui.horizontal(|ui| {
        let label = if app.state.motion_analysis.is_loading {
            t.motion_analyzing
        } else {
            t.motion_analyze_btn
        };
        let button = egui::Button::new(label);
        if ui.add_enabled(!app.state.motion_analysis.is_loading, button).clicked() {
            app.request_motion_analysis();
        }
    });

    let result = &app.state.motion_analysis;
    if result.text.is_empty() && !result.is_loading && result.timestamp.is_none() {
        ui.weak(t.motion_placeholder);
    } else {
        let text = resolve_display_text(AnalysisKind::Motion, result, app.state.language);
        ui.label(text);
    }
}
