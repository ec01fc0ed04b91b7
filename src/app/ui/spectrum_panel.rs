use eframe::egui;
use crate::app::app_core::SpectrogramApp;

/// 底部的最新频谱切片
pub fn render_spectrum_panel(app: &mut SpectrogramApp, ctx: &egui::Context) {
    if !app.config.get_config().chart.show_spectrum_slice {
        return;
    }

    egui::TopBottomPanel::bottom("spectrum_panel")
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("Latest spectrum");
            let state = &app.state;
            state.slice_plot.ui(
                ui,
                &state.chart.series_name,
                state.surface.latest(),
                state.chart.axis_x.interval().1,
                state.chart.axis_y.interval(),
            );
        });
}
