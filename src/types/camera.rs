use glam::Vec3;
use serde::{Deserialize, Serialize};

/// 相机位置（归一化场景坐标，始终看向原点）
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct CameraLocation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl CameraLocation {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(&self) -> f32 {
        Vec3::from(*self).length()
    }
}

impl From<CameraLocation> for Vec3 {
    fn from(loc: CameraLocation) -> Self {
        Vec3::new(loc.x, loc.y, loc.z)
    }
}

impl From<Vec3> for CameraLocation {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<[f32; 3]> for CameraLocation {
    fn from(v: [f32; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CameraFrame {
    pub camera_location: CameraLocation,
}

/// 预先录制的相机动画文件内容
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct CameraAnimationData {
    pub frames: Vec<CameraFrame>,
}
