//! Core data structures and geometry for sceneviz
//!
//! This crate provides the fundamental types for rendering sensor-dataset
//! annotations: points and point clouds, oriented 3D bounding boxes with
//! their corner reconstruction, frames, and the sequence-wide extent used
//! to give every rendered frame identical axis limits.

pub mod point;
pub mod point_cloud;
pub mod bbox;
pub mod frame;
pub mod extent;
pub mod error;

pub use point::*;
pub use point_cloud::*;
pub use bbox::*;
pub use frame::*;
pub use extent::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point2, Point3, Vector2, Vector3};

/// Common result type for sceneviz operations
pub type Result<T> = std::result::Result<T, Error>;
