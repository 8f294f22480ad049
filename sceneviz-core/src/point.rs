//! Point and vector type aliases
//!
//! Both supported sensor formats store 32-bit floats, so the whole crate
//! works in f32.

use nalgebra::{Point2, Point3, Vector2, Vector3};

/// A 3D point with floating point coordinates
pub type Point3f = Point3<f32>;

/// A 2D point with floating point coordinates (image-plane geometry)
pub type Point2f = Point2<f32>;

/// A 3D vector with floating point components
pub type Vector3f = Vector3<f32>;

/// A 2D vector with floating point components
pub type Vector2f = Vector2<f32>;
