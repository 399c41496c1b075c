//! World-space follow camera.

use crate::geometry::{Aabb, Vec2};

/// Top-left corner of the visible window plus its size, both in world pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Camera {
    pub x: f32,
    pub y: f32,
    pub viewport_w: f32,
    pub viewport_h: f32,
}

impl Camera {
    pub fn new(viewport_w: f32, viewport_h: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            viewport_w,
            viewport_h,
        }
    }

    pub fn set_viewport(&mut self, viewport_w: f32, viewport_h: f32) {
        self.viewport_w = viewport_w;
        self.viewport_h = viewport_h;
    }

    /// Centers on `target`, clamped so the window never leaves the world.
    ///
    /// A non-positive viewport pins the camera to the origin. A world smaller
    /// than the viewport also pins to zero on that axis.
    pub fn follow(&mut self, target: Vec2, world_w: f32, world_h: f32) {
        if self.viewport_w <= 0.0 || self.viewport_h <= 0.0 {
            self.x = 0.0;
            self.y = 0.0;
            return;
        }
        self.x = clamp_axis(target.x - self.viewport_w * 0.5, world_w - self.viewport_w);
        self.y = clamp_axis(target.y - self.viewport_h * 0.5, world_h - self.viewport_h);
    }

    pub fn view(&self) -> Aabb {
        Aabb::from_xywh(self.x, self.y, self.viewport_w, self.viewport_h)
    }
}

fn clamp_axis(value: f32, max: f32) -> f32 {
    value.clamp(0.0, max.max(0.0))
}
