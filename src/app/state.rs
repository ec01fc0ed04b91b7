use crossbeam_channel::Receiver;
use egui::Color32;

use crate::chart::Chart3D;
use crate::config::AppConfig;
use crate::palette::Lut;
use crate::plotter::SpectrumSlicePlot;
use crate::surface::SurfaceGrid;
use crate::types::{CameraAnimationData, SampleBatch};
use super::handlers::camera_replay::CameraDataError;
use super::handlers::{CameraReplay, DataFeed};
use super::toggle::ToggleControl;

/// 应用状态管理模块
/// 所有状态只在界面线程中修改

pub const STREAMING_TEXT_ON: &str = "Disable infinite streaming data";
pub const STREAMING_TEXT_OFF: &str = "Enable infinite streaming data";
pub const CAMERA_TEXT_ON: &str = "Disable camera animation";
pub const CAMERA_TEXT_OFF: &str = "Enable camera animation";

/// 数据通道状态
#[derive(Debug)]
pub struct DataChannels {
    pub sample_receiver: Receiver<SampleBatch>,
}

/// 统一的应用状态管理
#[derive(Debug)]
pub struct AppState {
    pub chart: Chart3D,
    pub lut: Lut,
    pub surface: SurfaceGrid,
    pub feed: DataFeed,
    pub streaming_toggle: ToggleControl,
    pub camera_toggle: ToggleControl,
    pub camera_replay: CameraReplay,
    pub camera_loader: Option<Receiver<Result<CameraAnimationData, CameraDataError>>>,
    pub channels: DataChannels,
    pub slice_plot: SpectrumSlicePlot,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(
        sample_receiver: Receiver<SampleBatch>,
        camera_loader: Option<Receiver<Result<CameraAnimationData, CameraDataError>>>,
        config: &AppConfig,
    ) -> Self {
        let stream = &config.stream;
        let lut = Lut::from_config(&config.palette);
        // 切片曲线使用查找表最低档的颜色
        let slice_color = lut.steps().first().map_or(Color32::DARK_BLUE, |s| s.color);

        Self {
            chart: Chart3D::from_config(&config.chart, stream),
            lut,
            surface: SurfaceGrid::new(stream.history_length, stream.sample_size),
            feed: DataFeed::new(stream.history_length, stream.scale),
            streaming_toggle: ToggleControl::new(
                config.controls.infinite_streaming,
                STREAMING_TEXT_ON,
                STREAMING_TEXT_OFF,
            ),
            camera_toggle: ToggleControl::new(config.controls.camera_animation, CAMERA_TEXT_ON, CAMERA_TEXT_OFF),
            camera_replay: CameraReplay::new(config.camera.frame_step),
            camera_loader,
            channels: DataChannels { sample_receiver },
            slice_plot: SpectrumSlicePlot::new(config.chart.slice_height, slice_color),
        }
    }

    /// 当前状态摘要
    pub fn get_status_summary(&self) -> String {
        if self.streaming_toggle.is_on() {
            "Streaming".to_string()
        } else if self.feed.history_count() < self.surface.row_capacity() as u64 {
            "Filling history".to_string()
        } else {
            "Static".to_string()
        }
    }
}
