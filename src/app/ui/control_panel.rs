use eframe::egui;
use crate::app::app_core::SpectrogramApp;

/// 两个开关组成的控制面板，固定在图表左上角
pub fn render_control_panel(app: &mut SpectrogramApp, ctx: &egui::Context, chart_rect: egui::Rect) {
    let controls = &app.config.get_config().controls;
    let offset = egui::vec2(controls.position[0] + controls.margin, controls.position[1] + controls.margin);
    let padding = controls.padding;

    egui::Area::new(egui::Id::new("control_panel"))
        .order(egui::Order::Foreground)
        .fixed_pos(chart_rect.left_top() + offset)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .inner_margin(padding)
                .show(ui, |ui| {
                    ui.vertical(|ui| {
                        if let Some(state) = app.state.streaming_toggle.ui(ui) {
                            app.state.handle_streaming_toggled(state);
                        }
                        if let Some(state) = app.state.camera_toggle.ui(ui) {
                            app.state.handle_camera_animation_toggled(state);
                        }
                    });
                });
        });
}
