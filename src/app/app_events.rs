use log::{debug, info};

use super::app_core::SpectrogramApp;
use super::state::AppState;

impl AppState {
    /// 无限流开关被切换（界面或代码）
    pub fn handle_streaming_toggled(&mut self, state: bool) {
        if self.streaming_toggle.handle_toggled(state) {
            info!("Infinite streaming data {}", if state { "enabled" } else { "disabled" });
        }
    }

    /// 相机动画开关被切换（界面或代码），同时解除拖动暂停
    pub fn handle_camera_animation_toggled(&mut self, state: bool) {
        if self.camera_toggle.handle_toggled(state) {
            info!("Camera animation {}", if state { "enabled" } else { "disabled" });
        }
        self.camera_replay.on_toggle_switched();
    }

    /// 图表背景拖动：手动旋转相机并暂停动画，开关显示不变
    pub fn handle_background_drag(&mut self, delta: egui::Vec2) {
        self.camera_replay.on_background_drag();
        self.chart.camera.orbit(delta);
        debug!("Camera orbit to {:?}", self.chart.camera.location());
    }
}

impl SpectrogramApp {
    pub fn handle_chart_response(&mut self, response: &egui::Response) {
        if response.dragged() {
            self.state.handle_background_drag(response.drag_delta());
        }
    }
}
