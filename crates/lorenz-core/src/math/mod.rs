pub mod matrix;
pub mod vector;

pub use matrix::Mat4;
pub use vector::{Vec3, Vec4};
