//! Markup contract and animation constants.
//!
//! Everything the controller needs to find in the host page, and every magic
//! number the visualizations animate with, lives here so a host page with a
//! different class naming scheme only has to build a custom [`CarouselConfig`].

use std::ops::RangeInclusive;

pub const SLIDE_SELECTOR: &str = ".carousel-slide";
pub const ACTIVE_CLASS: &str = "active";
pub const PREV_SELECTOR: &str = ".carousel-prev";
pub const NEXT_SELECTOR: &str = ".carousel-next";
pub const CONTAINER_ID_PREFIX: &str = "scatter-container-";

/// Slide ordinals (1-indexed) that get a visualization.
pub const VISUALIZED_ORDINALS: RangeInclusive<u32> = 1..=3;

/// Radians added per frame while nobody is dragging.
pub const AUTO_ROTATION: AutoRotation = AutoRotation { x: 0.002, y: 0.003 };
/// Radians per pixel of pointer movement during a drag.
pub const DRAG_SENSITIVITY: f32 = 0.01;

/// Angle added per frame by the 2D fallback.
pub const FALLBACK_ANGLE_STEP: f32 = 0.01;
/// Pixels per world unit in the 2D fallback projection.
pub const FALLBACK_SCALE: f64 = 50.0;

pub const AXES_LENGTH: f32 = 3.0;
/// WebGL point diameter in pixels at clip-space w = 1.
pub const POINT_SIZE: f32 = 40.0;

/// Per-frame rotation increments, frame-count based.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoRotation {
    pub x: f32,
    pub y: f32,
}

/// Perspective camera placed on the +Z axis looking at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSpec {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub distance: f32,
}

impl Default for CameraSpec {
    fn default() -> Self {
        Self {
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 5.0,
        }
    }
}

/// Ambient plus a single directional light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: f32,
    pub directional: f32,
    pub direction: [f32; 3],
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            ambient: 0.6,
            directional: 0.5,
            direction: [1.0, 1.0, 1.0],
        }
    }
}

/// Host markup selectors and animation tuning for one carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselConfig {
    pub slide_selector: String,
    pub active_class: String,
    pub prev_selector: String,
    pub next_selector: String,
    pub container_prefix: String,
    pub ordinals: RangeInclusive<u32>,
    pub auto_rotation: AutoRotation,
    pub drag_sensitivity: f32,
    pub fallback_angle_step: f32,
    pub fallback_scale: f64,
    pub camera: CameraSpec,
    pub lighting: Lighting,
    pub axes_length: f32,
    pub point_size: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            slide_selector: SLIDE_SELECTOR.to_string(),
            active_class: ACTIVE_CLASS.to_string(),
            prev_selector: PREV_SELECTOR.to_string(),
            next_selector: NEXT_SELECTOR.to_string(),
            container_prefix: CONTAINER_ID_PREFIX.to_string(),
            ordinals: VISUALIZED_ORDINALS,
            auto_rotation: AUTO_ROTATION,
            drag_sensitivity: DRAG_SENSITIVITY,
            fallback_angle_step: FALLBACK_ANGLE_STEP,
            fallback_scale: FALLBACK_SCALE,
            camera: CameraSpec::default(),
            lighting: Lighting::default(),
            axes_length: AXES_LENGTH,
            point_size: POINT_SIZE,
        }
    }
}

impl CarouselConfig {
    /// Element id of the visualization container for a 1-indexed slide.
    pub fn container_id(&self, ordinal: u32) -> String {
        format!("{}{}", self.container_prefix, ordinal)
    }

    pub fn with_slide_selector(mut self, selector: impl Into<String>) -> Self {
        self.slide_selector = selector.into();
        self
    }

    pub fn with_controls(mut self, prev: impl Into<String>, next: impl Into<String>) -> Self {
        self.prev_selector = prev.into();
        self.next_selector = next.into();
        self
    }

    pub fn with_container_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.container_prefix = prefix.into();
        self
    }

    pub fn with_ordinals(mut self, ordinals: RangeInclusive<u32>) -> Self {
        self.ordinals = ordinals;
        self
    }

    pub fn with_auto_rotation(mut self, x: f32, y: f32) -> Self {
        self.auto_rotation = AutoRotation { x, y };
        self
    }
}
