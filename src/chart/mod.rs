pub mod axis;
pub mod camera;
pub mod render;

pub use axis::{Axis, ScrollStrategy, TickStrategy};
pub use camera::Camera;
pub use render::paint_chart;

use glam::Vec3;

use crate::config::{ChartConfig, StreamConfig};
use crate::types::CameraLocation;

/// 三维图表：坐标轴、包围盒、相机和图例的配置，启动时一次性建立
#[derive(Debug, Clone)]
pub struct Chart3D {
    pub title: String,
    /// 场景中包围盒的尺寸（x, y, z），中心在原点
    pub bounding_box: Vec3,
    pub axis_x: Axis,
    pub axis_y: Axis,
    pub axis_z: Axis,
    pub camera: Camera,
    pub series_name: String,
    pub show_legend: bool,
    pub pixelate: bool,
}

impl Chart3D {
    pub fn from_config(chart: &ChartConfig, stream: &StreamConfig) -> Self {
        let axis_x = Axis::new(&chart.axis_x_title, (0.0, stream.sample_size as f64));

        let axis_y = Axis::new(&chart.axis_y_title, (chart.axis_y_interval[0], chart.axis_y_interval[1]))
            .with_scroll_strategy(ScrollStrategy::Expansion);

        let axis_z = Axis::new(&chart.axis_z_title, (0.0, stream.history_length as f64))
            .with_tick_strategy(TickStrategy::Empty);

        Self {
            title: chart.title.clone(),
            bounding_box: Vec3::from_array(chart.bounding_box),
            axis_x,
            axis_y,
            axis_z,
            camera: Camera::new(CameraLocation::from(chart.initial_camera_location)),
            series_name: chart.series_name.clone(),
            show_legend: chart.show_legend,
            pixelate: chart.pixelate,
        }
    }

    /// 数据坐标转换为场景坐标
    pub fn to_scene(&self, x: f64, y: f64, z: f64) -> Vec3 {
        let unit = Vec3::new(
            self.axis_x.normalize(x) as f32,
            self.axis_y.normalize(y) as f32,
            self.axis_z.normalize(z) as f32,
        );
        (unit - Vec3::splat(0.5)) * self.bounding_box
    }

    pub fn set_camera_location(&mut self, location: CameraLocation) {
        self.camera.set_location(location);
    }
}
