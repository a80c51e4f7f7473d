//! Linear algebra type aliases.

/// The scalar type used throughout this crate.
pub type Real = f64;

/// The point type.
pub type Point = na::Point2<Real>;

/// The vector type.
pub type Vector = na::Vector2<Real>;
