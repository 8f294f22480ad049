//! Rotation-y schema: flat dotted-key records
//!
//! Shape: a top-level `annotations[]` array whose records use flat dotted
//! keys: `3dbbox.location` [x,y,z], `3dbbox.dimension`
//! [length,height,width] (note the axis order differs from the simulation
//! schema), `3dbbox.rotation_y`, and `3dbbox.category`.

use super::{number, triple, SchemaAdapter, YawUnit};
use sceneviz_core::{Annotation, Box3d, Point3f, Vector3f};
use serde_json::Value;

pub struct RotationYAdapter {
    pub yaw_unit: YawUnit,
}

impl RotationYAdapter {
    fn records(doc: &Value) -> Option<&Vec<Value>> {
        doc.get("annotations")?.as_array()
    }

    fn adapt_record(&self, record: &Value) -> Option<Annotation> {
        let [x, y, z] = triple(record.get("3dbbox.location")?)?;
        // Dataset order is [length, height, width].
        let [length, height, width] = triple(record.get("3dbbox.dimension")?)?;
        let yaw = number(record.get("3dbbox.rotation_y")?)?;
        let class_label = record
            .get("3dbbox.category")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();

        Some(Annotation::Box3d(Box3d::new(
            Point3f::new(x, y, z),
            Vector3f::new(length, width, height),
            self.yaw_unit.to_radians(yaw),
            class_label,
            None,
        )))
    }
}

impl SchemaAdapter for RotationYAdapter {
    fn name(&self) -> &'static str {
        "rotation-y"
    }

    fn matches(&self, doc: &Value) -> bool {
        Self::records(doc)
            .map(|records| records.iter().any(|r| r.get("3dbbox.location").is_some()))
            .unwrap_or(false)
    }

    fn annotations(&self, doc: &Value) -> Vec<Annotation> {
        let Some(records) = Self::records(doc) else {
            return Vec::new();
        };
        records
            .iter()
            .filter_map(|record| {
                let annotation = self.adapt_record(record);
                if annotation.is_none() {
                    log::warn!("dropping rotation-y record with missing geometric fields");
                }
                annotation
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn reorders_dimension_axes() {
        let doc = json!({
            "annotations": [{
                "3dbbox.category": "truck",
                "3dbbox.location": [5.0, -3.0, 1.0],
                "3dbbox.dimension": [6.0, 2.5, 2.0],
                "3dbbox.rotation_y": -1.1
            }]
        });
        let adapter = RotationYAdapter {
            yaw_unit: YawUnit::Radians,
        };
        let annotations = adapter.annotations(&doc);
        assert_eq!(annotations.len(), 1);
        let b = annotations[0].as_box3d().unwrap();
        // length=6.0, width=2.0, height=2.5 after reordering
        assert_relative_eq!(b.extents, Vector3f::new(6.0, 2.0, 2.5));
        assert_relative_eq!(b.yaw, -1.1);
        assert_eq!(b.class_label, "truck");
        assert!(b.track_id.is_none());
    }

    #[test]
    fn non_numeric_rotation_drops_record() {
        let doc = json!({
            "annotations": [{
                "3dbbox.location": [0, 0, 0],
                "3dbbox.dimension": [1, 1, 1],
                "3dbbox.rotation_y": "unknown"
            }]
        });
        let adapter = RotationYAdapter {
            yaw_unit: YawUnit::Radians,
        };
        assert!(adapter.annotations(&doc).is_empty());
    }
}
