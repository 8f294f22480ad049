//! Sequence-wide axis-aligned extent
//!
//! The extent is the axis-aligned region that must stay visible across all
//! frames of a sequence. It is accumulated once over every cloud point and
//! every 3D box corner before any frame renders, then frozen; every
//! per-frame render reads the same extent, which is what keeps a rendered
//! sequence stable enough to concatenate into a video.

use crate::bbox::Box3d;
use crate::error::{Error, Result};
use crate::frame::Frame;
use crate::point::{Point3f, Vector3f};
use serde::{Deserialize, Serialize};

/// The minimal axis-aligned region containing a set of geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min: Point3f,
    pub max: Point3f,
}

impl Extent {
    /// The extent of a single point
    pub fn from_point(p: Point3f) -> Self {
        Self { min: p, max: p }
    }

    /// Grow the extent to include a point
    pub fn include_point(&mut self, p: Point3f) {
        self.min = Point3f::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = Point3f::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }

    /// Grow the extent to include all eight corners of a box
    pub fn include_box(&mut self, b: &Box3d) {
        for corner in b.corners() {
            self.include_point(corner);
        }
    }

    /// Fold the geometry of every frame into one extent
    ///
    /// Commutative, associative min/max reduction: the result does not
    /// depend on frame order. Frames contribute every cloud point and
    /// every 3D box corner; 2D boxes live in image coordinates and do not
    /// participate. Returns [`Error::EmptySequence`] when nothing
    /// contributes any geometry, so callers can abort instead of rendering
    /// against a degenerate extent.
    pub fn accumulate<'a, I>(frames: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Frame>,
    {
        let mut extent: Option<Extent> = None;
        for frame in frames {
            let fold = |extent: &mut Option<Extent>, p: Point3f| match extent {
                Some(e) => e.include_point(p),
                None => *extent = Some(Extent::from_point(p)),
            };
            if let Some(cloud) = &frame.point_cloud {
                for p in cloud {
                    fold(&mut extent, *p);
                }
            }
            for b in frame.boxes_3d() {
                for corner in b.corners() {
                    fold(&mut extent, corner);
                }
            }
        }
        extent.ok_or(Error::EmptySequence)
    }

    pub fn center(&self) -> Point3f {
        nalgebra::center(&self.min, &self.max)
    }

    /// Half the side length along each axis
    pub fn half_ranges(&self) -> Vector3f {
        (self.max - self.min) / 2.0
    }

    /// Equalize the axes: expand the shorter axes so all three share the
    /// largest half-range around the unchanged center
    ///
    /// This is what prevents axis distortion in a 3D scatter-style render;
    /// the original extent is always contained in the result.
    pub fn cubic(&self) -> Self {
        let center = self.center();
        let half = self.half_ranges();
        let h = half.x.max(half.y).max(half.z);
        let r = Vector3f::new(h, h, h);
        Self {
            min: center - r,
            max: center + r,
        }
    }

    /// Scale every half-range by `zoom`, keeping the center
    ///
    /// `zoom` must lie in (0, 1]; anything else is rejected rather than
    /// silently clamped.
    pub fn zoomed(&self, zoom: f32) -> Result<Self> {
        if !(zoom > 0.0 && zoom <= 1.0) {
            return Err(Error::InvalidConfig(format!(
                "zoom factor must be in (0, 1], got {zoom}"
            )));
        }
        let center = self.center();
        let r = self.half_ranges() * zoom;
        Ok(Self {
            min: center - r,
            max: center + r,
        })
    }

    /// Componentwise containment check
    pub fn contains(&self, p: &Point3f) -> bool {
        self.min.x <= p.x
            && self.min.y <= p.y
            && self.min.z <= p.z
            && p.x <= self.max.x
            && p.y <= self.max.y
            && p.z <= self.max.z
    }
}
