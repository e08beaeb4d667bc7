#![forbid(unsafe_code)]

pub mod bbox;
pub mod cloud;
pub mod field;

pub use bbox::Aabb;
pub use cloud::{Colors, Normals, PointCloud};
pub use field::{Field, FieldError, FieldLimits};
