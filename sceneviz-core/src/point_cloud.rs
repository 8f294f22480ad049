//! Point cloud container
//!
//! A cloud is an ordered sequence of bare 3D points. It is owned by the
//! frame that loaded it and discarded once that frame has rendered, so the
//! container stays deliberately small: storage, iteration, and indexing.

use crate::point::Point3f;
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// An ordered sequence of 3D points
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointCloud {
    pub points: Vec<Point3f>,
}

impl PointCloud {
    /// Create a new empty point cloud
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Create a new point cloud with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Create a point cloud from a vector of points
    pub fn from_points(points: Vec<Point3f>) -> Self {
        Self { points }
    }

    /// Number of points in the cloud
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the cloud is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a point to the cloud
    pub fn push(&mut self, point: Point3f) {
        self.points.push(point);
    }

    /// Iterate over the points
    pub fn iter(&self) -> std::slice::Iter<'_, Point3f> {
        self.points.iter()
    }
}

impl Index<usize> for PointCloud {
    type Output = Point3f;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl IntoIterator for PointCloud {
    type Item = Point3f;
    type IntoIter = std::vec::IntoIter<Point3f>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl<'a> IntoIterator for &'a PointCloud {
    type Item = &'a Point3f;
    type IntoIter = std::slice::Iter<'a, Point3f>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl FromIterator<Point3f> for PointCloud {
    fn from_iter<I: IntoIterator<Item = Point3f>>(iter: I) -> Self {
        Self {
            points: Vec::from_iter(iter),
        }
    }
}

impl Extend<Point3f> for PointCloud {
    fn extend<I: IntoIterator<Item = Point3f>>(&mut self, iter: I) {
        self.points.extend(iter);
    }
}
