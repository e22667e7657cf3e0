pub mod camera;
pub mod clip;
pub mod config;
pub mod constants;
pub mod lorenz;
pub mod math;
pub mod particles;
pub mod projection;
pub mod render;
pub mod state;
pub mod timing;
pub mod trail;

pub use camera::*;
pub use clip::*;
pub use config::*;
pub use lorenz::*;
pub use math::{Mat4, Vec3, Vec4};
pub use particles::*;
pub use projection::*;
pub use render::*;
pub use state::*;
pub use timing::*;
pub use trail::*;
