//! Projection math shared by both renderers.
//!
//! The WebGL path uses real perspective matrices; the 2D fallback fakes depth
//! with a single-axis rotation and an orthographic mapping.

use crate::config::CameraSpec;
use glam::{EulerRot, Mat4, Vec3};

/// Rotates `p` in the x/z plane (around the vertical axis).
pub fn rotate_xz(p: [f32; 3], angle: f32) -> [f32; 3] {
    let (s, c) = angle.sin_cos();
    let [x, y, z] = p;
    [x * c - z * s, y, x * s + z * c]
}

/// Screen-space disc for one point of the 2D fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// Radius grows with post-rotation depth so nearer points look larger.
pub fn depth_radius(z: f32) -> f64 {
    (3.0 + f64::from(z) * 0.5).max(0.5)
}

/// Orthographic projection around `center` with y pointing up.
pub fn project_fallback(p: [f32; 3], angle: f32, center: (f64, f64), scale: f64) -> ScreenPoint {
    let [x, y, z] = rotate_xz(p, angle);
    ScreenPoint {
        x: center.0 + f64::from(x) * scale,
        y: center.1 - f64::from(y) * scale,
        radius: depth_radius(z),
    }
}

/// CSS color for a normalized RGB triple.
pub fn css_rgb(color: [f32; 3]) -> String {
    let [r, g, b] = color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
    format!("rgb({r}, {g}, {b})")
}

/// Width/height ratio, `None` for degenerate surfaces.
pub fn aspect(width: u32, height: u32) -> Option<f32> {
    (width > 0 && height > 0).then(|| width as f32 / height as f32)
}

pub fn perspective(camera: &CameraSpec, aspect: f32) -> Mat4 {
    Mat4::perspective_rh_gl(
        camera.fov_y_degrees.to_radians(),
        aspect,
        camera.near,
        camera.far,
    )
}

pub fn view(camera: &CameraSpec) -> Mat4 {
    Mat4::look_at_rh(Vec3::new(0.0, 0.0, camera.distance), Vec3::ZERO, Vec3::Y)
}

/// Model transform for the point cloud's two-axis rotation.
pub fn model(rotation_x: f32, rotation_y: f32) -> Mat4 {
    Mat4::from_euler(EulerRot::XYZ, rotation_x, rotation_y, 0.0)
}
