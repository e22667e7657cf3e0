//! Clip space to pixel space.
//!
//! Both entry points apply the projection matrix, divide x/y/z by the
//! resulting `w`, map x/y from `[-1, 1]` to `[0, width]`/`[0, height]`, map z
//! to `[0, 1]` and flip y so screen y grows downward. They differ on x:
//!
//! - [`project_vec3_to_screen`] (view-space points, implied `w = 1`) keeps x
//!   as is; the whole render path uses this one.
//! - [`project_vec4_to_screen`] (raw homogeneous points) additionally
//!   mirrors x (`width - x`).
//!
//! Do not unify the two without migrating callers.

use crate::math::{Mat4, Vec3, Vec4};

/// Pixel dimensions of the render target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width as f64,
            height: height as f64,
        }
    }

    /// Height over width; the aspect term expected by [`Mat4::projection`].
    #[inline]
    pub fn aspect(&self) -> f64 {
        self.height / self.width
    }

    /// True when `(x, y)` lies in `[0, width] x [0, height]`.
    ///
    /// NaN and infinite coordinates are never inside.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

#[inline]
fn to_screen(projected: Vec4, viewport: Viewport) -> Vec3 {
    let ndc_x = projected.x / projected.w;
    let ndc_y = projected.y / projected.w;
    let ndc_z = projected.z / projected.w;
    let x = (ndc_x + 1.0) / 2.0 * viewport.width;
    let y = (ndc_y + 1.0) / 2.0 * viewport.height;
    let z = (ndc_z + 1.0) / 2.0;
    Vec3::new(x, viewport.height - y, z)
}

/// Project an already view-transformed point (`w = 1`). X is not mirrored.
pub fn project_vec3_to_screen(projection: &Mat4, point: Vec3, viewport: Viewport) -> Vec3 {
    to_screen(projection.multiply_vec4(point.extend(1.0)), viewport)
}

/// Project a homogeneous point with explicit `w`. X is mirrored.
pub fn project_vec4_to_screen(projection: &Mat4, point: Vec4, viewport: Viewport) -> Vec3 {
    let mut out = to_screen(projection.multiply_vec4(point), viewport);
    out.x = viewport.width - out.x;
    out
}
