//! CPU framebuffer for the draw commands produced by `lorenz_core`.
//!
//! All geometric clipping has already happened in the core; this only
//! rejects individual pixels outside the buffer. Blending is additive and
//! weighted by source alpha, so dense trails build up brightness.

use lorenz_core::{DrawCommand, Primitive, Rgba, ScreenLine, ScreenRect};

pub const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<[u8; 4]>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            width,
            height,
            pixels: vec![BACKGROUND; (width * height) as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocate for a new size; zero dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 || (width == self.width && height == self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![BACKGROUND; (width * height) as usize];
    }

    pub fn clear(&mut self) {
        self.pixels.fill(BACKGROUND);
    }

    /// Tightly packed RGBA8 rows, top row first.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (x < self.width && y < self.height).then(|| self.pixels[(y * self.width + x) as usize])
    }

    pub fn draw_all(&mut self, commands: &[DrawCommand]) {
        for cmd in commands {
            self.draw(cmd);
        }
    }

    pub fn draw(&mut self, cmd: &DrawCommand) {
        match cmd.primitive {
            Primitive::Line(line) => self.line(&line, cmd.color),
            Primitive::Rect(rect) => self.fill_rect(&rect, cmd.color),
        }
    }

    /// DDA along the major axis, one pixel per step.
    pub fn line(&mut self, line: &ScreenLine, color: Rgba) {
        let ScreenLine { x1, y1, x2, y2 } = *line;
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) || color.a == 0 {
            return;
        }
        let (dx, dy) = (x2 - x1, y2 - y1);
        let max_steps = 2.0 * (self.width + self.height) as f64;
        let steps = dx.abs().max(dy.abs()).ceil().min(max_steps) as usize;
        if steps == 0 {
            self.blend(x1.floor() as i64, y1.floor() as i64, color);
            return;
        }
        let (sx, sy) = (dx / steps as f64, dy / steps as f64);
        for i in 0..=steps {
            let t = i as f64;
            let px = (x1 + sx * t).floor() as i64;
            let py = (y1 + sy * t).floor() as i64;
            self.blend(px, py, color);
        }
    }

    pub fn fill_rect(&mut self, rect: &ScreenRect, color: Rgba) {
        let (x, y) = (rect.x, rect.y);
        let (right, bottom) = (x + rect.width, y + rect.height);
        if ![x, y, right, bottom].iter().all(|v| v.is_finite()) || color.a == 0 {
            return;
        }
        let x0 = x.floor().max(0.0) as i64;
        let y0 = y.floor().max(0.0) as i64;
        let x1 = right.floor().min(self.width as f64) as i64;
        let y1 = bottom.floor().min(self.height as f64) as i64;
        for py in y0..y1 {
            for px in x0..x1 {
                self.blend(px, py, color);
            }
        }
    }

    #[inline]
    fn blend(&mut self, x: i64, y: i64, color: Rgba) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = (y as usize) * self.width as usize + x as usize;
        let dst = &mut self.pixels[idx];
        let a = color.a as u16;
        for (d, s) in dst.iter_mut().zip([color.r, color.g, color.b]) {
            *d = (*d as u16 + s as u16 * a / 255).min(255) as u8;
        }
    }
}
