use egui::{Pos2, Rect, Vec2};
use glam::{Mat4, Vec3, Vec4};

use crate::types::CameraLocation;

const NEAR_PLANE: f32 = 0.05;
const FAR_PLANE: f32 = 100.0;
const MIN_RADIUS: f32 = 0.5;
const MAX_PITCH: f32 = 1.45;
/// 拖动一个像素对应的旋转角度（弧度）
const ORBIT_SENSITIVITY: f32 = 0.008;

/// 透视相机，始终看向场景原点
#[derive(Debug, Clone)]
pub struct Camera {
    location: CameraLocation,
    /// 垂直视场角（弧度）
    fov: f32,
}

/// 投影后的屏幕坐标和到相机的深度
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub pos: Pos2,
    pub depth: f32,
}

impl Camera {
    pub fn new(location: CameraLocation) -> Self {
        Self {
            location,
            fov: 45f32.to_radians(),
        }
    }

    pub fn location(&self) -> CameraLocation {
        self.location
    }

    pub fn set_location(&mut self, location: CameraLocation) {
        if location.length() < f32::EPSILON {
            log::warn!("Ignoring camera location at scene origin");
            return;
        }
        self.location = location;
    }

    fn view(&self) -> Mat4 {
        let eye = Vec3::from(self.location);
        // 正上方或正下方俯视时 Y 不能作为上方向
        let up = if eye.normalize_or_zero().cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::NEG_Z
        } else {
            Vec3::Y
        };
        Mat4::look_at_rh(eye, Vec3::ZERO, up)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov, aspect, NEAR_PLANE, FAR_PLANE) * self.view()
    }

    /// 场景坐标投影到 `rect` 内的屏幕坐标，位于相机后方时返回 None
    pub fn project(&self, point: Vec3, rect: Rect) -> Option<Projected> {
        let aspect = rect.width() / rect.height().max(1.0);
        let clip = self.view_projection(aspect) * Vec4::new(point.x, point.y, point.z, 1.0);
        // 透视矩阵下 clip.w 就是沿视线方向的深度
        if clip.w <= NEAR_PLANE {
            return None;
        }
        let ndc = glam::Vec2::new(clip.x / clip.w, clip.y / clip.w);
        Some(Projected {
            pos: Pos2::new(
                rect.left() + (ndc.x * 0.5 + 0.5) * rect.width(),
                rect.top() + (-ndc.y * 0.5 + 0.5) * rect.height(),
            ),
            depth: clip.w,
        })
    }

    /// 按屏幕拖动量绕原点旋转，保持距离不变
    pub fn orbit(&mut self, drag: Vec2) {
        let eye = Vec3::from(self.location);
        let radius = eye.length().max(MIN_RADIUS);
        let mut yaw = eye.z.atan2(eye.x);
        let mut pitch = (eye.y / radius).clamp(-1.0, 1.0).asin();

        yaw += drag.x * ORBIT_SENSITIVITY;
        pitch = (pitch + drag.y * ORBIT_SENSITIVITY).clamp(-MAX_PITCH, MAX_PITCH);

        let direction = Vec3::new(yaw.cos() * pitch.cos(), pitch.sin(), yaw.sin() * pitch.cos());
        self.location = CameraLocation::from(direction * radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn origin_projects_to_center() {
        let camera = Camera::new(CameraLocation::new(1.2, 0.9, 1.6));
        let p = camera.project(Vec3::ZERO, rect()).unwrap();
        assert!((p.pos.x - 400.0).abs() < 1e-2);
        assert!((p.pos.y - 300.0).abs() < 1e-2);
        assert!((p.depth - 2.1932).abs() < 1e-3);
    }

    #[test]
    fn points_behind_camera_are_culled() {
        let camera = Camera::new(CameraLocation::new(0.0, 0.0, 3.0));
        assert!(camera.project(Vec3::new(0.0, 0.0, 4.0), rect()).is_none());
    }

    #[test]
    fn higher_points_appear_higher_on_screen() {
        let camera = Camera::new(CameraLocation::new(0.0, 0.0, 3.0));
        let top = camera.project(Vec3::new(0.0, 0.5, 0.0), rect()).unwrap();
        let bottom = camera.project(Vec3::new(0.0, -0.5, 0.0), rect()).unwrap();
        assert!(top.pos.y < bottom.pos.y);
    }

    #[test]
    fn looking_straight_down_still_projects() {
        let camera = Camera::new(CameraLocation::new(0.0, 3.0, 0.0));
        let p = camera.project(Vec3::new(0.2, 0.0, 0.2), rect()).unwrap();
        assert!(p.pos.x.is_finite() && p.pos.y.is_finite());
        assert!((p.depth - 3.0).abs() < 1e-3);
    }

    #[test]
    fn orbit_keeps_distance_and_clamps_pitch() {
        let mut camera = Camera::new(CameraLocation::new(2.0, 0.0, 0.0));
        camera.orbit(Vec2::new(100.0, 0.0));
        assert!((camera.location().length() - 2.0).abs() < 1e-4);
        assert!(camera.location().z.abs() > 0.1);

        camera.orbit(Vec2::new(0.0, 10_000.0));
        let pitch = (camera.location().y / 2.0).asin();
        assert!(pitch <= MAX_PITCH + 1e-4);
    }

    #[test]
    fn origin_location_is_ignored() {
        let mut camera = Camera::new(CameraLocation::new(1.0, 1.0, 1.0));
        camera.set_location(CameraLocation::new(0.0, 0.0, 0.0));
        assert_eq!(camera.location(), CameraLocation::new(1.0, 1.0, 1.0));
    }
}
