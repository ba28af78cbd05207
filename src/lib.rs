//! Point, vector and quaternion algebra, and a small hierarchical scene
//! viewer built on it: a house, a waving arm and a Sierpinski carpet,
//! drawn through an immediate-mode transform stack.
pub mod error;
pub mod random;
pub mod geometry;
pub mod quaternion;
pub mod matrix;
pub mod transform;
pub mod model;
pub mod canvas;
pub mod shapes;
pub mod arm;
pub mod carpet;
pub mod projection;
pub mod config;
pub mod app;
pub mod delta;
pub mod gpu;
pub mod renderer;

pub use crate::error::{TableauError, TableauResult};
pub use crate::geometry::{Point3, Vec3, EPSILON, ORIGIN};
pub use crate::quaternion::Quat;
pub use crate::matrix::Mat4;
pub use crate::canvas::Canvas;
pub use crate::app::{App, SceneKind};
pub use crate::config::Config;
