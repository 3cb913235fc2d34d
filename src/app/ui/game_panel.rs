use eframe::egui;
use egui::{Align2, Color32, CornerRadius, FontId, Pos2, Rect, Sense, Stroke, Vec2};
use log::info;

use crate::app::sensor_app::SensorFusionApp;
use crate::game::GamePhase;
use crate::i18n::translations;
use crate::utils::now_millis;

pub fn render_game_panel(app: &mut SensorFusionApp, ui: &mut egui::Ui) {
    let t = translations(app.state.language);

    // 画布占满剩余区域，底部留一行读数
    let footer_height = 28.0;
    let available = ui.available_size();
    let canvas_size = Vec2::new(available.x, (available.y - footer_height).max(100.0));
    let (rect, _response) = ui.allocate_exact_size(canvas_size, Sense::hover());

    // 画布缩放只更新边界，仿真状态保留
    app.state.engine.set_bounds(rect.width() as f64, rect.height() as f64);

    if app.state.engine.phase == GamePhase::Playing {
        let outcome = app.state.engine.step(&mut rand::rng());
        if outcome.scored {
            info!("Target reached, score: {}", app.state.engine.score);
        }
    }

    paint_canvas(app, ui, rect);

    match app.state.engine.phase {
        GamePhase::Start => {
            render_overlay_button(app, ui, rect, t.game_start_btn);
        }
        GamePhase::GameOver => {
            render_game_over(app, ui, rect);
        }
        GamePhase::Playing => {}
    }

    ui.horizontal(|ui| {
        let (ax, ay) = app.state.engine.input;
        ui.monospace(format!("AX {:+.2}", ax));
        ui.separator();
        ui.monospace(format!("AY {:+.2}", ay));
        ui.separator();
        ui.weak(t.game_instructions);
    });
}

fn paint_canvas(app: &SensorFusionApp, ui: &egui::Ui, rect: Rect) {
    let painter = ui.painter_at(rect);
    let engine = &app.state.engine;
    let origin = rect.min;
    let t = translations(app.state.language);

    painter.rect_filled(rect, CornerRadius::same(8), Color32::from_rgb(15, 23, 42));

    // 背景网格
    let grid = Stroke::new(0.5, Color32::from_rgb(51, 65, 85));
    let mut gx = 0.0;
    while gx < rect.width() {
        painter.line_segment(
            [Pos2::new(origin.x + gx, rect.top()), Pos2::new(origin.x + gx, rect.bottom())],
            grid,
        );
        gx += 30.0;
    }
    let mut gy = 0.0;
    while gy < rect.height() {
        painter.line_segment(
            [Pos2::new(rect.left(), origin.y + gy), Pos2::new(rect.right(), origin.y + gy)],
            grid,
        );
        gy += 30.0;
    }

    if engine.phase != GamePhase::Start {
        // 目标区：接近时光晕增强，纯视觉效果
        let pulse = (now_millis() as f64 / 200.0).sin();
        let glow = 15.0 + 5.0 * pulse + engine.proximity * 20.0;
        let target_center = Pos2::new(
            origin.x + engine.target.x as f32,
            origin.y + engine.target.y as f32,
        );
        painter.circle_filled(
            target_center,
            (engine.target.radius + glow) as f32,
            Color32::from_rgba_unmultiplied(34, 197, 94, 40),
        );
        painter.circle_filled(
            target_center,
            engine.target.radius as f32,
            Color32::from_rgb(34, 197, 94),
        );

        for obstacle in &engine.obstacles {
            let obstacle_rect = Rect::from_min_size(
                Pos2::new(origin.x + obstacle.x as f32, origin.y + obstacle.y as f32),
                Vec2::new(obstacle.w as f32, obstacle.h as f32),
            );
            painter.rect_filled(obstacle_rect, CornerRadius::same(2), Color32::from_rgb(239, 68, 68));
        }

        // 玩家小球带一条反向速度的尾迹
        let player_center = Pos2::new(
            origin.x + engine.player.x as f32,
            origin.y + engine.player.y as f32,
        );
        let trail_end = Pos2::new(
            origin.x + (engine.player.x - engine.player.vx * 3.0) as f32,
            origin.y + (engine.player.y - engine.player.vy * 3.0) as f32,
        );
        painter.line_segment(
            [player_center, trail_end],
            Stroke::new(2.0, Color32::from_rgba_unmultiplied(6, 182, 212, 120)),
        );
        painter.circle_filled(player_center, engine.player.radius as f32, Color32::from_rgb(6, 182, 212));

        painter.text(
            Pos2::new(rect.left() + 12.0, rect.top() + 12.0),
            Align2::LEFT_TOP,
            format!("{}: {}", t.game_score, engine.score),
            FontId::monospace(16.0),
            Color32::from_rgb(226, 232, 240),
        );
    }
}

fn render_overlay_button(app: &mut SensorFusionApp, ui: &mut egui::Ui, rect: Rect, label: &str) {
    let button_rect = Rect::from_center_size(rect.center(), Vec2::new(140.0, 36.0));
    if ui.put(button_rect, egui::Button::new(label)).clicked() {
        app.state.engine.start(&mut rand::rng());
    }
}

fn render_game_over(app: &mut SensorFusionApp, ui: &mut egui::Ui, rect: Rect) {
    let t = translations(app.state.language);
    let painter = ui.painter_at(rect);

    painter.rect_filled(rect, CornerRadius::same(8), Color32::from_rgba_unmultiplied(15, 23, 42, 200));
    painter.text(
        rect.center() - Vec2::new(0.0, 50.0),
        Align2::CENTER_CENTER,
        t.game_over_title,
        FontId::monospace(28.0),
        Color32::from_rgb(239, 68, 68),
    );
    painter.text(
        rect.center() - Vec2::new(0.0, 16.0),
        Align2::CENTER_CENTER,
        format!("{}: {}", t.game_score, app.state.engine.score),
        FontId::monospace(18.0),
        Color32::from_rgb(226, 232, 240),
    );

    let button_rect = Rect::from_center_size(rect.center() + Vec2::new(0.0, 30.0), Vec2::new(140.0, 36.0));
    if ui.put(button_rect, egui::Button::new(t.game_retry_btn)).clicked() {
        app.state.engine.start(&mut rand::rng());
    }
}
