pub mod intersect_2d;
pub mod polyline_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type (Z carries the bank elevation where one is known).
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance for merging chainage values along a branch.
pub const CHAINAGE_TOLERANCE: f64 = 1e-8;
