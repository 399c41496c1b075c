//! World-space geometry shared by collision, combat, and the renderer snapshot.
//!
//! Coordinates are pixels with `y` growing downward, matching the level grid
//! (row 0 is the top of the world).

use core::ops::{Add, Mul, Sub};

/// Two-dimensional vector in world pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Heading in radians, measured from +x toward +y (screen-down).
    pub fn angle(self) -> f32 {
        self.y.atan2(self.x)
    }

    /// Unit vector for `angle` scaled to `speed`.
    pub fn from_angle(angle: f32, speed: f32) -> Self {
        Self::new(angle.cos() * speed, angle.sin() * speed)
    }

    pub fn distance(self, other: Self) -> f32 {
        (other - self).length()
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Axis-aligned rectangle stored as edges.
///
/// Overlap tests are strict: rectangles that only share an edge do not
/// overlap, so a body resting exactly on a floor is not "inside" it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Aabb {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Builds a rectangle from its top-left corner and size.
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    /// Builds a rectangle centered on `center` with the given half extents.
    pub fn from_center(center: Vec2, half_w: f32, half_h: f32) -> Self {
        Self::new(
            center.x - half_w,
            center.y - half_h,
            center.x + half_w,
            center.y + half_h,
        )
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.left && point.x < self.right && point.y >= self.top && point.y < self.bottom
    }

    /// Shrinks every edge toward the center by `amount`.
    pub fn inset(&self, amount: f32) -> Aabb {
        Aabb::new(
            self.left + amount,
            self.top + amount,
            self.right - amount,
            self.bottom - amount,
        )
    }

    pub fn translate(&self, dx: f32, dy: f32) -> Aabb {
        Aabb::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }
}

/// Rectangle rotated about its center, used by arrows, beams, and shards.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrientedRect {
    pub center: Vec2,
    pub half_w: f32,
    pub half_h: f32,
    /// Rotation in radians.
    pub angle: f32,
}

impl OrientedRect {
    pub fn new(center: Vec2, half_w: f32, half_h: f32, angle: f32) -> Self {
        Self {
            center,
            half_w,
            half_h,
            angle,
        }
    }

    /// Local x and y axes as unit vectors.
    pub fn axes(&self) -> (Vec2, Vec2) {
        let (sin, cos) = self.angle.sin_cos();
        (Vec2::new(cos, sin), Vec2::new(-sin, cos))
    }

    pub fn corners(&self) -> [Vec2; 4] {
        let (ux, uy) = self.axes();
        let ex = ux * self.half_w;
        let ey = uy * self.half_h;
        [
            self.center - ex - ey,
            self.center + ex - ey,
            self.center + ex + ey,
            self.center - ex + ey,
        ]
    }

    /// Axis-aligned box enclosing the rotated corners.
    pub fn bounds(&self) -> Aabb {
        let corners = self.corners();
        let mut out = Aabb::new(
            corners[0].x,
            corners[0].y,
            corners[0].x,
            corners[0].y,
        );
        for c in &corners[1..] {
            out.left = out.left.min(c.x);
            out.top = out.top.min(c.y);
            out.right = out.right.max(c.x);
            out.bottom = out.bottom.max(c.y);
        }
        out
    }

    /// Separating-axis test against an axis-aligned box.
    ///
    /// Candidate axes are the rectangle's own two axes plus the world axes.
    /// Touching projections count as separated, matching [`Aabb::overlaps`].
    pub fn intersects_aabb(&self, target: &Aabb) -> bool {
        let ours = self.corners();
        let theirs = [
            Vec2::new(target.left, target.top),
            Vec2::new(target.right, target.top),
            Vec2::new(target.right, target.bottom),
            Vec2::new(target.left, target.bottom),
        ];
        let (ux, uy) = self.axes();
        let candidates = [ux, uy, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)];

        candidates.iter().all(|axis| {
            let (a_min, a_max) = project(&ours, *axis);
            let (b_min, b_max) = project(&theirs, *axis);
            a_max > b_min && b_max > a_min
        })
    }
}

fn project(points: &[Vec2; 4], axis: Vec2) -> (f32, f32) {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for p in points {
        let d = p.dot(axis);
        min = min.min(d);
        max = max.max(d);
    }
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f32::consts::FRAC_PI_4;

    #[test]
    fn edge_contact_is_not_overlap() {
        let a = Aabb::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::from_xywh(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&b.translate(-0.5, 0.0)));
    }

    #[test]
    fn unrotated_rect_matches_aabb_overlap() {
        let obb = OrientedRect::new(Vec2::new(5.0, 5.0), 5.0, 5.0, 0.0);
        let hit = Aabb::from_xywh(8.0, 8.0, 4.0, 4.0);
        let miss = Aabb::from_xywh(11.0, 0.0, 4.0, 4.0);
        assert!(obb.intersects_aabb(&hit));
        assert!(!obb.intersects_aabb(&miss));
    }

    #[test]
    fn rotated_rect_misses_box_inside_its_bounds_corner() {
        // A thin diagonal beam: its enclosing box covers the target, the beam does not.
        let beam = OrientedRect::new(Vec2::new(50.0, 50.0), 50.0, 2.0, FRAC_PI_4);
        let corner = Aabb::from_xywh(80.0, 10.0, 8.0, 8.0);
        assert!(beam.bounds().overlaps(&corner));
        assert!(!beam.intersects_aabb(&corner));

        let on_line = Aabb::from_xywh(68.0, 68.0, 4.0, 4.0);
        assert!(beam.intersects_aabb(&on_line));
    }
}
