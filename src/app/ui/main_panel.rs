use eframe::egui;
use crate::app::app_core::SpectrogramApp;
use crate::chart::paint_chart;

pub fn render_main_panel(app: &mut SpectrogramApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let response = paint_chart(ui, &app.state.chart, &app.state.surface, &app.state.lut);
            app.handle_chart_response(&response);

            // 控制面板叠加在图表左上角
            crate::app::ui::render_control_panel(app, ctx, response.rect);
        });
}
