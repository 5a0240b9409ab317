mod tolerance;
pub mod transform;

pub use tolerance::Tolerance;
pub use transform::{rotation_matrix, transform_direction, transform_point};

/// Raw 3D point storage.
pub type Point3 = nalgebra::Point3<f64>;

/// Raw 3D vector storage.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Smallest axis length accepted by the rotation builder.
pub const TOLERANCE: f64 = 1e-10;
