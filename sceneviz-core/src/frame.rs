//! Frames: one time sample of sensor data plus its annotations

use crate::bbox::{Box2d, Box3d};
use crate::point_cloud::PointCloud;
use serde::{Deserialize, Serialize};

/// One normalized annotation, either a 3D oriented box or a 2D image box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Annotation {
    Box3d(Box3d),
    Box2d(Box2d),
}

impl Annotation {
    /// The 3D box, if this annotation is one
    pub fn as_box3d(&self) -> Option<&Box3d> {
        match self {
            Annotation::Box3d(b) => Some(b),
            Annotation::Box2d(_) => None,
        }
    }
}

/// One unit of sensor data and its annotations
///
/// A frame is fully independent of every other frame; the only cross-frame
/// state is the sequence-wide [`crate::Extent`] computed before rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frame {
    pub id: String,
    pub point_cloud: Option<PointCloud>,
    pub annotations: Vec<Annotation>,
}

impl Frame {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            point_cloud: None,
            annotations: Vec::new(),
        }
    }

    /// Iterate over the 3D boxes of this frame
    pub fn boxes_3d(&self) -> impl Iterator<Item = &Box3d> {
        self.annotations.iter().filter_map(Annotation::as_box3d)
    }

    /// True when the frame carries neither points nor annotations
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
            && self.point_cloud.as_ref().map_or(true, |pc| pc.is_empty())
    }
}
