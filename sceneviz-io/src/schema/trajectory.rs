//! Trajectory-dataset schema: oriented boxes shipped as eight vertices
//!
//! Shape: `annotation_metadata.object_list[]`, each object carrying
//! `bbox_vertices` (8×3), `bbox_center`, `class_name`, and `track_id`.
//! Vertices are normalized back into center/extents/yaw through
//! `Box3d::from_corners`, so the rest of the system stays on the single
//! oriented-box representation.

use super::{stringish, triple, SchemaAdapter};
use sceneviz_core::{Annotation, Box3d, Point3f};
use serde_json::Value;

pub struct TrajectoryAdapter;

impl TrajectoryAdapter {
    fn object_list(doc: &Value) -> Option<&Vec<Value>> {
        doc.get("annotation_metadata")?.get("object_list")?.as_array()
    }

    /// Normalize one object record; `None` drops the record
    fn adapt_object(object: &Value) -> Option<Annotation> {
        let vertices = object.get("bbox_vertices")?.as_array()?;
        if vertices.len() != 8 {
            return None;
        }
        let mut corners = [Point3f::origin(); 8];
        for (corner, vertex) in corners.iter_mut().zip(vertices) {
            let [x, y, z] = triple(vertex)?;
            *corner = Point3f::new(x, y, z);
        }

        let class_label = object
            .get("class_name")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();
        let track_id = object.get("track_id").and_then(stringish);

        Box3d::from_corners(&corners, class_label, track_id).map(Annotation::Box3d)
    }
}

impl SchemaAdapter for TrajectoryAdapter {
    fn name(&self) -> &'static str {
        "trajectory"
    }

    fn matches(&self, doc: &Value) -> bool {
        Self::object_list(doc).is_some()
    }

    fn annotations(&self, doc: &Value) -> Vec<Annotation> {
        let Some(objects) = Self::object_list(doc) else {
            return Vec::new();
        };
        objects
            .iter()
            .filter_map(|object| {
                let annotation = Self::adapt_object(object);
                if annotation.is_none() {
                    log::warn!("dropping trajectory record without a valid vertex box");
                }
                annotation
            })
            .collect()
    }
}
