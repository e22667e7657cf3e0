//! Turns 3D segments and points into screen-space primitives.
//!
//! Per primitive: transform into view space, clip against the near and far
//! planes, project, then clip against the four viewport edges. Edge clipping
//! only runs when an endpoint falls outside the viewport.

use smallvec::SmallVec;

use crate::clip::ClipPlanes;
use crate::math::{Mat4, Vec3};
use crate::projection::{project_vec3_to_screen, Viewport};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

/// Line between two pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenLine {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Axis-aligned square around a projected point; `(x, y)` is the top-left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Line(ScreenLine),
    Rect(ScreenRect),
}

/// A primitive plus the colour the rasterizer should blend it with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub primitive: Primitive,
    pub color: Rgba,
}

impl DrawCommand {
    #[inline]
    pub fn line(line: ScreenLine, color: Rgba) -> Self {
        Self {
            primitive: Primitive::Line(line),
            color,
        }
    }

    #[inline]
    pub fn rect(rect: ScreenRect, color: Rgba) -> Self {
        Self {
            primitive: Primitive::Rect(rect),
            color,
        }
    }
}

/// Everything needed to take a model-space point to the screen.
#[derive(Clone, Copy, Debug)]
pub struct RenderView {
    /// Model (or world) to view space; applied as an affine transform.
    pub transform: Mat4,
    pub projection: Mat4,
    pub planes: ClipPlanes,
    pub viewport: Viewport,
}

impl RenderView {
    pub fn with_transform(&self, transform: Mat4) -> Self {
        Self { transform, ..*self }
    }

    /// Zero or one screen-space line for the segment `p1 -> p2`.
    pub fn draw_line(&self, p1: Vec3, p2: Vec3) -> Option<ScreenLine> {
        let a = self.transform.multiply_vec3(p1);
        let b = self.transform.multiply_vec3(p2);

        let (a, b) = self.planes.near.clip_segment(a, b)?;
        let (a, b) = self.planes.far.clip_segment(a, b)?;

        let mut a = project_vec3_to_screen(&self.projection, a, self.viewport);
        let mut b = project_vec3_to_screen(&self.projection, b, self.viewport);

        if !(self.viewport.contains(a.x, a.y) && self.viewport.contains(b.x, b.y)) {
            for plane in self.planes.screen_planes() {
                (a, b) = plane.clip_segment(a, b)?;
            }
        }

        Some(ScreenLine {
            x1: a.x,
            y1: a.y,
            x2: b.x,
            y2: b.y,
        })
    }

    /// Zero or one square of half-size `radius` centred on the projected point.
    pub fn draw_point(&self, point: Vec3, radius: f64) -> Option<ScreenRect> {
        let p = self.transform.multiply_vec3(point);
        let view_planes = self.planes.view_planes();
        if !view_planes.iter().all(|plane| plane.contains(p)) {
            return None;
        }

        let p = project_vec3_to_screen(&self.projection, p, self.viewport);
        let screen_planes = self.planes.screen_planes();
        if !self.viewport.contains(p.x, p.y)
            && !screen_planes.iter().all(|plane| plane.contains(p))
        {
            return None;
        }

        Some(ScreenRect {
            x: p.x - radius,
            y: p.y - radius,
            width: radius * 2.0,
            height: radius * 2.0,
        })
    }
}

const GRID_COLOR: Rgba = Rgba::new(150, 150, 150, 35);
const X_AXIS_COLOR: Rgba = Rgba::new(255, 0, 0, 35);
const Y_AXIS_COLOR: Rgba = Rgba::new(0, 255, 0, 35);
const Z_AXIS_COLOR: Rgba = Rgba::new(0, 0, 255, 35);
const ORIGIN_COLOR: Rgba = Rgba::new(255, 255, 255, 50);

/// Upper bound on commands from [`draw_origin_axis`]: 14 grid lines, 3 axes,
/// 1 origin marker.
pub const ORIGIN_AXIS_MAX_COMMANDS: usize = 18;

/// Ground grid on the XZ plane, the three unit axes and the origin marker.
///
/// `view.transform` should be the world-to-view matrix.
pub fn draw_origin_axis(
    view: &RenderView,
    unit: f64,
) -> SmallVec<[DrawCommand; ORIGIN_AXIS_MAX_COMMANDS]> {
    let mut out = SmallVec::new();
    let extent = 3.0 * unit;

    for i in -3..=3 {
        let offset = i as f64 * unit;
        if let Some(line) = view.draw_line(
            Vec3::new(offset, 0.0, extent),
            Vec3::new(offset, 0.0, -extent),
        ) {
            out.push(DrawCommand::line(line, GRID_COLOR));
        }
    }
    for i in -3..=3 {
        let offset = i as f64 * unit;
        if let Some(line) = view.draw_line(
            Vec3::new(extent, 0.0, offset),
            Vec3::new(-extent, 0.0, offset),
        ) {
            out.push(DrawCommand::line(line, GRID_COLOR));
        }
    }

    let axes = [
        (Vec3::UNIT_X, X_AXIS_COLOR),
        (Vec3::UNIT_Y, Y_AXIS_COLOR),
        (Vec3::UNIT_Z, Z_AXIS_COLOR),
    ];
    for (axis, color) in axes {
        if let Some(line) = view.draw_line(Vec3::ZERO, axis * unit) {
            out.push(DrawCommand::line(line, color));
        }
    }

    if let Some(rect) = view.draw_point(Vec3::ZERO, 1.0) {
        out.push(DrawCommand::rect(rect, ORIGIN_COLOR));
    }
    out
}
