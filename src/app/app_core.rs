use std::time::Duration;
use eframe::{egui, Frame};
use log::info;

use crate::config::ConfigManager;
use crate::types::SampleBatch;
use super::handlers::{CameraReplayHandler, DataFeedHandler};
use super::handlers::camera_replay::spawn_camera_loader;
use super::state::AppState;

pub struct SpectrogramApp {
    // 统一的状态管理
    pub state: AppState,

    // 配置管理
    pub config: ConfigManager,
}

impl SpectrogramApp {
    pub fn new(sample_receiver: crossbeam_channel::Receiver<SampleBatch>, config: ConfigManager) -> Self {
        // 相机动画数据在后台加载，加载完成前回放循环不做任何事
        let animation_path = config.get_config().get_animation_path();
        info!("Loading camera animation data from {}", animation_path.display());
        let camera_loader = spawn_camera_loader(animation_path);

        let state = AppState::new(sample_receiver, Some(camera_loader), config.get_config());

        info!(
            "Application started: infinite streaming {}, camera animation {}",
            state.streaming_toggle.is_on(),
            state.camera_toggle.is_on()
        );

        SpectrogramApp { state, config }
    }
}

impl eframe::App for SpectrogramApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 设置明亮模式主题
        ctx.set_visuals(egui::Visuals::light());

        // 处理数据流和相机动画加载结果
        DataFeedHandler::handle_stream(self);
        CameraReplayHandler::handle_loading(self);

        // 每次刷新推进一帧相机动画
        CameraReplayHandler::handle_refresh(self);

        // 渲染UI组件
        crate::app::ui::render_status_bar(self, ctx);
        crate::app::ui::render_spectrum_panel(self, ctx);
        crate::app::ui::render_main_panel(self, ctx);

        let refresh = self.config.get_config().window.refresh_interval_ms;
        ctx.request_repaint_after(Duration::from_millis(refresh));
    }
}
