use eframe::egui;
use crate::app::app_core::SpectrogramApp;
use crate::app::handlers::ReplayState;

pub fn render_status_bar(app: &mut SpectrogramApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("status_bar")
        .min_height(32.0)
        .show(ctx, |ui| {
            ui.add_space(5.0);
            ui.horizontal(|ui| {
                ui.label("Status:");

                let summary = app.state.get_status_summary();
                let status_color = if app.state.streaming_toggle.is_on() {
                    egui::Color32::from_rgb(0, 150, 0) // 绿色
                } else {
                    egui::Color32::from_rgb(255, 165, 0) // 橙色
                };
                ui.colored_label(status_color, summary);

                ui.separator();
                ui.label(format!(
                    "Accepted: {}  Dropped: {}",
                    app.state.feed.history_count(),
                    app.state.feed.dropped()
                ));

                ui.separator();
                ui.label(format!(
                    "Rows: {} / {} (total {})",
                    app.state.surface.row_count(),
                    app.state.surface.row_capacity(),
                    app.state.surface.total_rows_added()
                ));

                ui.separator();
                render_camera_status(app, ui);
            });
            ui.add_space(5.0);
        });
}

fn render_camera_status(app: &SpectrogramApp, ui: &mut egui::Ui) {
    let replay = &app.state.camera_replay;
    match replay.state() {
        ReplayState::Loading => {
            ui.label("Camera: loading animation...");
        }
        ReplayState::NoData => {
            ui.colored_label(egui::Color32::from_rgb(150, 0, 0), "Camera: no animation data");
        }
        ReplayState::Animating if app.state.camera_toggle.is_on() => match replay.last_frame_index() {
            Some(index) => {
                ui.label(format!("Camera: animating (frame {} / {})", index, replay.frame_count()));
            }
            None => {
                ui.label("Camera: animating");
            }
        },
        ReplayState::Animating => {
            ui.label("Camera: animation disabled");
        }
        ReplayState::Paused => {
            ui.colored_label(egui::Color32::from_rgb(255, 165, 0), "Camera: paused by drag");
        }
    }
}
