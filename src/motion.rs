//! Rotation and drag state owned by a single visualization.

use crate::config::AutoRotation;
use glam::Mat4;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
}

impl Rotation {
    /// One frame of passive spin. Frame-count based, so speed follows the
    /// display refresh rate.
    pub fn spin(&mut self, step: AutoRotation) {
        self.x += step.x;
        self.y += step.y;
    }

    /// Horizontal pointer movement turns around y, vertical around x.
    pub fn nudge(&mut self, dx: f64, dy: f64, sensitivity: f32) {
        self.y += dx as f32 * sensitivity;
        self.x += dy as f32 * sensitivity;
    }

    pub fn matrix(&self) -> Mat4 {
        crate::projection::model(self.x, self.y)
    }
}

/// Pointer-held state; `None` while released.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    last: Option<(f64, f64)>,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }

    pub fn begin(&mut self, x: f64, y: f64) {
        self.last = Some((x, y));
    }

    /// Returns the delta since the previous pointer position, if dragging.
    pub fn update(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        let (px, py) = self.last?;
        self.last = Some((x, y));
        Some((x - px, y - py))
    }

    pub fn end(&mut self) {
        self.last = None;
    }
}

/// Everything the WebGL frame loop and pointer handlers share.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Motion {
    pub rotation: Rotation,
    pub drag: DragState,
}

impl Motion {
    /// Advances one frame; auto-rotation is suspended while dragging.
    pub fn tick(&mut self, step: AutoRotation) {
        if !self.drag.is_dragging() {
            self.rotation.spin(step);
        }
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64, sensitivity: f32) {
        if let Some((dx, dy)) = self.drag.update(x, y) {
            self.rotation.nudge(dx, dy, sensitivity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AUTO_ROTATION;

    #[test]
    fn spin_accumulates_per_frame() {
        let mut motion = Motion::default();
        for _ in 0..10 {
            motion.tick(AUTO_ROTATION);
        }
        assert!((motion.rotation.x - 0.02).abs() < 1e-6);
        assert!((motion.rotation.y - 0.03).abs() < 1e-6);
    }

    #[test]
    fn drag_overrides_auto_rotation() {
        let mut motion = Motion::default();
        motion.drag.begin(10.0, 10.0);
        motion.tick(AUTO_ROTATION);
        motion.pointer_moved(30.0, 5.0, 0.01);

        assert!((motion.rotation.y - 0.2).abs() < 1e-6);
        assert!((motion.rotation.x + 0.05).abs() < 1e-6);

        motion.drag.end();
        motion.pointer_moved(100.0, 100.0, 0.01);
        assert!((motion.rotation.y - 0.2).abs() < 1e-6);
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut drag = DragState::default();
        assert_eq!(drag.update(1.0, 1.0), None);
        assert!(!drag.is_dragging());
    }
}
