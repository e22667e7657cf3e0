//! Half-space tests and segment clipping.
//!
//! Six planes are used per frame: near/far in view space, then
//! left/top/right/bottom in screen space (pixel coordinates, the projected
//! depth in z is ignored by those four because their normals have no z).

use crate::math::Vec3;
use crate::projection::Viewport;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Any point on the plane.
    pub position: Vec3,
    /// Points towards the inside half-space. Need not be unit length, but its
    /// magnitude must be consistent because the intersection uses it.
    pub normal: Vec3,
}

impl Plane {
    pub const fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }

    /// `dot(normal, point - position) >= 0`
    #[inline]
    pub fn contains(&self, point: Vec3) -> bool {
        self.normal.dot(point - self.position) >= 0.0
    }

    /// Clip segment `a -> b` to the inside half-space.
    ///
    /// Returns `None` when both endpoints are outside. When exactly one is
    /// outside it is replaced by the line/plane intersection. A segment
    /// parallel to the plane cannot be mixed, but if rounding makes it so the
    /// zero denominator produces a non-finite endpoint, which the screen-space
    /// stage later culls.
    pub fn clip_segment(&self, a: Vec3, b: Vec3) -> Option<(Vec3, Vec3)> {
        let a_in = self.contains(a);
        let b_in = self.contains(b);
        match (a_in, b_in) {
            (true, true) => Some((a, b)),
            (false, false) => None,
            _ => {
                let plane_d = -self.normal.dot(self.position);
                let a_dot = self.normal.dot(a);
                let b_dot = self.normal.dot(b);
                let t = (-plane_d - a_dot) / (b_dot - a_dot);
                let hit = a + (b - a) * t;
                if a_in {
                    Some((a, hit))
                } else {
                    Some((hit, b))
                }
            }
        }
    }
}

/// The six planes of the render pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipPlanes {
    pub near: Plane,
    pub far: Plane,
    pub left: Plane,
    pub top: Plane,
    pub right: Plane,
    pub bottom: Plane,
}

impl ClipPlanes {
    /// `near_z`/`far_z` are view-space depths; the screen planes follow the
    /// viewport edges.
    pub fn new(near_z: f64, far_z: f64, viewport: Viewport) -> Self {
        Self {
            near: Plane::new(Vec3::new(0.0, 0.0, near_z), Vec3::UNIT_Z),
            far: Plane::new(Vec3::new(0.0, 0.0, far_z), -Vec3::UNIT_Z),
            left: Plane::new(Vec3::ZERO, Vec3::UNIT_X),
            top: Plane::new(Vec3::ZERO, Vec3::UNIT_Y),
            right: Plane::new(Vec3::new(viewport.width, 0.0, 0.0), -Vec3::UNIT_X),
            bottom: Plane::new(Vec3::new(0.0, viewport.height, 0.0), -Vec3::UNIT_Y),
        }
    }

    /// Move the right and bottom planes to new viewport edges.
    pub fn resize(&mut self, viewport: Viewport) {
        self.right.position.x = viewport.width;
        self.bottom.position.y = viewport.height;
    }

    #[inline]
    pub fn view_planes(&self) -> [&Plane; 2] {
        [&self.near, &self.far]
    }

    #[inline]
    pub fn screen_planes(&self) -> [&Plane; 4] {
        [&self.left, &self.top, &self.right, &self.bottom]
    }
}
