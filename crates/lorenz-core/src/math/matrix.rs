//! Row-major 4x4 matrices using the row-vector convention.
//!
//! A point is transformed as `v' = v · M`: each output component is the dot
//! product of the (homogeneous) input with one *column* of `M`, and the
//! translation lives in the fourth row. Composition order therefore reads
//! right-to-left through [`Mat4::multiply`]: `multiply(a, b)` applies `b`
//! first and `a` second. The whole render pipeline (scale, translate,
//! world-to-view) is chained with that order in mind.

use super::{Vec3, Vec4};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    /// `m[row][column]`
    pub m: [[f64; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Self = Self::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    #[inline]
    pub const fn from_rows(m: [[f64; 4]; 4]) -> Self {
        Self { m }
    }

    #[inline]
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Perspective projection.
    ///
    /// With `f = 1 / tan(fov / 2)` and `q = far / (far - near)` the matrix is
    ///
    /// ```text
    /// aspect*f  0  0          0
    /// 0         f  0          0
    /// 0         0  q          1
    /// 0         0  -near*q    0
    /// ```
    ///
    /// so the projected `w` equals the view-space `z`. `aspect` is
    /// height / width.
    pub fn projection(fov_radians: f64, near: f64, far: f64, aspect: f64) -> Self {
        let f = 1.0 / (fov_radians / 2.0).tan();
        let q = far / (far - near);
        Self::from_rows([
            [aspect * f, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, q, 1.0],
            [0.0, 0.0, -near * q, 0.0],
        ])
    }

    /// Camera-to-world basis looking from `position` towards `target`.
    ///
    /// `up` is re-orthogonalised against the forward axis (Gram-Schmidt); the
    /// rows are `right`, `up`, `forward` and the translation row is
    /// `position`. Invert with [`Mat4::quick_inverse`] to get a view matrix.
    pub fn point_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - position).normalize();
        let up = (up - forward * up.dot(forward)).normalize();
        let right = up.cross(forward);
        Self::from_rows([
            [right.x, right.y, right.z, 0.0],
            [up.x, up.y, up.z, 0.0],
            [forward.x, forward.y, forward.z, 0.0],
            [position.x, position.y, position.z, 1.0],
        ])
    }

    /// Inverse of a rigid (rotation + translation) matrix.
    ///
    /// Transposes the 3x3 rotation block and rebuilds the translation row
    /// from `-dot(t, row_i)`. The result is only correct when `self` has no
    /// scale or shear; any other matrix silently produces a wrong inverse.
    pub fn quick_inverse(&self) -> Self {
        let m = &self.m;
        let a = Vec3::new(m[0][0], m[0][1], m[0][2]);
        let b = Vec3::new(m[1][0], m[1][1], m[1][2]);
        let c = Vec3::new(m[2][0], m[2][1], m[2][2]);
        let t = Vec3::new(m[3][0], m[3][1], m[3][2]);
        Self::from_rows([
            [a.x, b.x, c.x, 0.0],
            [a.y, b.y, c.y, 0.0],
            [a.z, b.z, c.z, 0.0],
            [-t.dot(a), -t.dot(b), -t.dot(c), 1.0],
        ])
    }

    pub fn translation(t: Vec3) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [t.x, t.y, t.z, 1.0],
        ])
    }

    pub fn scaling(s: Vec3) -> Self {
        Self::from_rows([
            [s.x, 0.0, 0.0, 0.0],
            [0.0, s.y, 0.0, 0.0],
            [0.0, 0.0, s.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_x(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::from_rows([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_z(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::from_rows([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Composite transform that applies `b` first, then `a`.
    ///
    /// Rows of `b` are dotted against columns of `a`.
    pub fn multiply(a: &Mat4, b: &Mat4) -> Mat4 {
        let mut out = [[0.0; 4]; 4];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = b.m[r][0] * a.m[0][c]
                    + b.m[r][1] * a.m[1][c]
                    + b.m[r][2] * a.m[2][c]
                    + b.m[r][3] * a.m[3][c];
            }
        }
        Mat4::from_rows(out)
    }

    /// Full homogeneous transform, including the `w` column.
    pub fn multiply_vec4(&self, v: Vec4) -> Vec4 {
        let m = &self.m;
        Vec4::new(
            v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0] + v.w * m[3][0],
            v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1] + v.w * m[3][1],
            v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2] + v.w * m[3][2],
            v.x * m[0][3] + v.y * m[1][3] + v.z * m[2][3] + v.w * m[3][3],
        )
    }

    /// Affine transform of a point with an implied `w = 1`; the resulting `w`
    /// is discarded (no perspective divide).
    pub fn multiply_vec3(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0] + m[3][0],
            v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1] + m[3][1],
            v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2] + m[3][2],
        )
    }

    pub fn transpose(&self) -> Mat4 {
        let mut out = [[0.0; 4]; 4];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = self.m[c][r];
            }
        }
        Mat4::from_rows(out)
    }

    /// Largest absolute element-wise difference, handy for tolerance checks.
    pub fn max_abs_diff(&self, other: &Mat4) -> f64 {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max)
    }
}
