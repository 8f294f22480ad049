//! Bounding box types and the oriented-box geometry kernel
//!
//! `Box3d` reconstructs its eight corners from center, extents, and a yaw
//! angle about the vertical axis. The corner ordering and the 12-edge
//! wireframe connectivity in [`Box3d::EDGES`] are a contract: every caller
//! drawing a wireframe must use exactly this index pairing.

use crate::point::{Point2f, Point3f, Vector3f};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An oriented 3D bounding box with a single rotation about the z axis
///
/// `extents` holds the full side lengths (length, width, height); they are
/// expected non-negative. Corners are derived on demand, never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Box3d {
    pub center: Point3f,
    /// Full side lengths: (length, width, height)
    pub extents: Vector3f,
    /// Rotation about the z axis, radians
    pub yaw: f32,
    pub class_label: String,
    pub track_id: Option<String>,
}

impl Box3d {
    /// Wireframe connectivity over the corners returned by [`Self::corners`]:
    /// bottom ring, top ring, then the four vertical edges.
    pub const EDGES: [(usize, usize); 12] = [
        (0, 1), (1, 2), (2, 3), (3, 0), // bottom face
        (4, 5), (5, 6), (6, 7), (7, 4), // top face
        (0, 4), (1, 5), (2, 6), (3, 7), // vertical edges
    ];

    pub fn new(
        center: Point3f,
        extents: Vector3f,
        yaw: f32,
        class_label: impl Into<String>,
        track_id: Option<String>,
    ) -> Self {
        Self {
            center,
            extents,
            yaw,
            class_label: class_label.into(),
            track_id,
        }
    }

    /// The eight corners of the box, in a fixed order
    ///
    /// The first four corners form the bottom face (z = −height/2 in the
    /// box's local frame), counter-clockwise in local XY; the last four are
    /// the top face in the same XY order, so corner `i + 4` sits directly
    /// above corner `i`. The local box is rotated by `yaw` about z and
    /// translated by `center`. Pure arithmetic; zero extents degenerate to
    /// a flat box and are valid.
    pub fn corners(&self) -> [Point3f; 8] {
        let (hl, hw, hh) = (
            self.extents.x / 2.0,
            self.extents.y / 2.0,
            self.extents.z / 2.0,
        );

        // Bottom ring counter-clockwise, then the top ring in the same order.
        let local: [(f32, f32, f32); 8] = [
            (-hl, -hw, -hh),
            (hl, -hw, -hh),
            (hl, hw, -hh),
            (-hl, hw, -hh),
            (-hl, -hw, hh),
            (hl, -hw, hh),
            (hl, hw, hh),
            (-hl, hw, hh),
        ];

        let (sin, cos) = self.yaw.sin_cos();
        local.map(|(x, y, z)| {
            Point3f::new(
                self.center.x + x * cos - y * sin,
                self.center.y + x * sin + y * cos,
                self.center.z + z,
            )
        })
    }

    /// Recover a yaw-only oriented box from eight corners in the fixed
    /// ordering of [`Self::corners`]
    ///
    /// Used for datasets that ship `bbox_vertices` instead of
    /// center/extents/yaw. Returns `None` when the points do not form a
    /// yaw-only box within tolerance (e.g. a rolled or sheared hull), so a
    /// malformed record is dropped rather than mis-rendered.
    pub fn from_corners(
        corners: &[Point3f; 8],
        class_label: impl Into<String>,
        track_id: Option<String>,
    ) -> Option<Self> {
        let mut center = Vector3f::zeros();
        for c in corners {
            center += c.coords;
        }
        let center = Point3f::from(center / 8.0);

        let length_edge = corners[1] - corners[0];
        let width_edge = corners[2] - corners[1];
        let extents = Vector3f::new(
            length_edge.norm(),
            width_edge.norm(),
            corners[4].z - corners[0].z,
        );
        if extents.z < 0.0 {
            return None;
        }
        let yaw = length_edge.y.atan2(length_edge.x);

        let candidate = Self::new(center, extents, yaw, class_label, track_id);

        // Reject inputs the yaw-only model cannot reproduce.
        let tolerance = 1e-3 * extents.norm().max(1.0);
        let rebuilt = candidate.corners();
        for (a, b) in rebuilt.iter().zip(corners.iter()) {
            if (a - b).norm() > tolerance {
                return None;
            }
        }
        Some(candidate)
    }
}

/// An axis-aligned 2D bounding box over an image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Box2d {
    pub min: Point2f,
    pub max: Point2f,
    pub class_label: String,
    pub attributes: HashMap<String, String>,
}

impl Box2d {
    /// Build a 2D box, normalizing the corners so `min <= max`
    /// componentwise
    pub fn new(a: Point2f, b: Point2f, class_label: impl Into<String>) -> Self {
        Self {
            min: Point2f::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2f::new(a.x.max(b.x), a.y.max(b.y)),
            class_label: class_label.into(),
            attributes: HashMap::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn unit_box(yaw: f32) -> Box3d {
        Box3d::new(
            Point3f::new(0.0, 0.0, 0.0),
            Vector3f::new(2.0, 2.0, 2.0),
            yaw,
            "car",
            None,
        )
    }

    #[test]
    fn corners_without_rotation_match_axis_aligned_box() {
        let b = Box3d::new(
            Point3f::new(1.0, 2.0, 3.0),
            Vector3f::new(4.0, 2.0, 1.0),
            0.0,
            "car",
            None,
        );
        let c = b.corners();
        assert_relative_eq!(c[0], Point3f::new(-1.0, 1.0, 2.5));
        assert_relative_eq!(c[1], Point3f::new(3.0, 1.0, 2.5));
        assert_relative_eq!(c[2], Point3f::new(3.0, 3.0, 2.5));
        assert_relative_eq!(c[3], Point3f::new(-1.0, 3.0, 2.5));
        assert_relative_eq!(c[6], Point3f::new(3.0, 3.0, 3.5));
    }

    #[test]
    fn centroid_equals_center_for_any_yaw() {
        for yaw in [-2.0 * PI, -0.7, 0.0, 1.3, PI, 5.0] {
            let b = Box3d::new(
                Point3f::new(-3.0, 7.5, 0.25),
                Vector3f::new(3.0, 1.5, 2.0),
                yaw,
                "truck",
                None,
            );
            let mut sum = Vector3f::zeros();
            for c in b.corners() {
                sum += c.coords;
            }
            assert_relative_eq!(Point3f::from(sum / 8.0), b.center, epsilon = 1e-5);
        }
    }

    #[test]
    fn vertical_pairs_differ_only_in_z_by_height() {
        let b = Box3d::new(
            Point3f::new(2.0, -1.0, 0.5),
            Vector3f::new(4.2, 1.8, 1.6),
            0.9,
            "car",
            None,
        );
        let c = b.corners();
        for i in 0..4 {
            assert_relative_eq!(c[i].x, c[i + 4].x, epsilon = 1e-6);
            assert_relative_eq!(c[i].y, c[i + 4].y, epsilon = 1e-6);
            assert_relative_eq!(c[i + 4].z - c[i].z, 1.6, epsilon = 1e-6);
        }
    }

    #[test]
    fn edge_lengths_are_preserved_under_rotation() {
        let b = Box3d::new(
            Point3f::new(0.0, 0.0, 0.0),
            Vector3f::new(4.0, 2.0, 1.5),
            1.234,
            "car",
            None,
        );
        let c = b.corners();
        // Local x, y edges of the bottom ring plus one vertical edge.
        assert_relative_eq!((c[1] - c[0]).norm(), 4.0, epsilon = 1e-5);
        assert_relative_eq!((c[2] - c[1]).norm(), 2.0, epsilon = 1e-5);
        assert_relative_eq!((c[4] - c[0]).norm(), 1.5, epsilon = 1e-5);
    }

    #[test]
    fn quarter_turn_preserves_corner_distances() {
        let straight = unit_box(0.0);
        let turned = unit_box(FRAC_PI_2);
        let expected = 3.0_f32.sqrt();
        for c in turned.corners() {
            assert_relative_eq!((c - turned.center).norm(), expected, epsilon = 1e-5);
        }
        // Same distances as the un-rotated box.
        for c in straight.corners() {
            assert_relative_eq!((c - straight.center).norm(), expected, epsilon = 1e-5);
        }
    }

    #[test]
    fn zero_extent_degenerates_to_flat_box() {
        let b = Box3d::new(
            Point3f::new(1.0, 1.0, 1.0),
            Vector3f::new(2.0, 2.0, 0.0),
            0.3,
            "sign",
            None,
        );
        let c = b.corners();
        for i in 0..4 {
            assert_relative_eq!(c[i].z, c[i + 4].z);
        }
    }

    #[test]
    fn from_corners_round_trips() {
        let original = Box3d::new(
            Point3f::new(5.0, -2.0, 1.0),
            Vector3f::new(4.5, 1.9, 1.7),
            -0.8,
            "bus",
            Some("17".to_string()),
        );
        let recovered =
            Box3d::from_corners(&original.corners(), "bus", Some("17".to_string())).unwrap();
        assert_relative_eq!(recovered.center, original.center, epsilon = 1e-4);
        assert_relative_eq!(recovered.extents, original.extents, epsilon = 1e-4);
        assert_relative_eq!(recovered.yaw, original.yaw, epsilon = 1e-4);
    }

    #[test]
    fn from_corners_rejects_non_box_hull() {
        let mut corners = unit_box(0.4).corners();
        corners[6].z += 0.5; // shear the top face
        assert!(Box3d::from_corners(&corners, "car", None).is_none());
    }

    #[test]
    fn box2d_normalizes_swapped_corners() {
        let b = Box2d::new(Point2f::new(10.0, 2.0), Point2f::new(4.0, 8.0), "car");
        assert_eq!(b.min, Point2f::new(4.0, 2.0));
        assert_eq!(b.max, Point2f::new(10.0, 8.0));
        assert_eq!(b.width(), 6.0);
        assert_eq!(b.height(), 6.0);
    }
}
