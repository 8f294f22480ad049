//! Simulation-dataset schema: center/dimension/orientation records
//!
//! Shape: a top-level `annotations[]` array. Lidar labels carry
//! `location` [x,y,z], `dimension` [length,width,height], and
//! `orientation` [roll,pitch,yaw]; only the yaw component is used (boxes
//! are yaw-only by contract). Camera labels from the same dataset carry a
//! 2D `bbox` [xmin,ymin,xmax,ymax] instead. One record yields at most one
//! annotation.

use super::{number, stringish, triple, SchemaAdapter, YawUnit};
use sceneviz_core::{Annotation, Box2d, Box3d, Point2f, Point3f, Vector3f};
use serde_json::Value;

pub struct SimulationAdapter {
    pub yaw_unit: YawUnit,
}

impl SimulationAdapter {
    fn records(doc: &Value) -> Option<&Vec<Value>> {
        doc.get("annotations")?.as_array()
    }

    fn record_matches(record: &Value) -> bool {
        (record.get("location").is_some() && record.get("dimension").is_some())
            || record.get("bbox").is_some()
    }

    fn adapt_record(&self, record: &Value) -> Option<Annotation> {
        let class_label = record
            .get("class")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
            .to_string();

        if let (Some(location), Some(dimension)) = (record.get("location"), record.get("dimension"))
        {
            let [x, y, z] = triple(location)?;
            let [length, width, height] = triple(dimension)?;
            let [_roll, _pitch, yaw] = triple(record.get("orientation")?)?;
            let track_id = record.get("id").and_then(stringish);
            return Some(Annotation::Box3d(Box3d::new(
                Point3f::new(x, y, z),
                Vector3f::new(length, width, height),
                self.yaw_unit.to_radians(yaw),
                class_label,
                track_id,
            )));
        }

        let bbox = record.get("bbox")?.as_array()?;
        if bbox.len() != 4 {
            return None;
        }
        let v: Vec<f32> = bbox.iter().filter_map(number).collect();
        if v.len() != 4 {
            return None;
        }
        let mut b = Box2d::new(Point2f::new(v[0], v[1]), Point2f::new(v[2], v[3]), class_label);
        if let Some(attributes) = record.get("attributes").and_then(Value::as_object) {
            for (key, value) in attributes {
                if let Some(value) = stringish(value) {
                    b.attributes.insert(key.clone(), value);
                }
            }
        }
        Some(Annotation::Box2d(b))
    }
}

impl SchemaAdapter for SimulationAdapter {
    fn name(&self) -> &'static str {
        "simulation"
    }

    fn matches(&self, doc: &Value) -> bool {
        Self::records(doc)
            .map(|records| records.iter().any(Self::record_matches))
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
                    log::warn!("dropping simulation record with missing geometric fields");
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

    fn adapter() -> SimulationAdapter {
        SimulationAdapter {
            yaw_unit: YawUnit::Radians,
        }
    }

    #[test]
    fn adapts_lidar_record() {
        let doc = json!({
            "annotations": [{
                "class": "vehicle",
                "id": 4,
                "location": [1.0, 2.0, 0.5],
                "dimension": [4.2, 1.8, 1.5],
                "orientation": [0.0, 0.0, 0.9]
            }]
        });
        let annotations = adapter().annotations(&doc);
        assert_eq!(annotations.len(), 1);
        let b = annotations[0].as_box3d().unwrap();
        assert_relative_eq!(b.center, Point3f::new(1.0, 2.0, 0.5));
        assert_relative_eq!(b.extents, Vector3f::new(4.2, 1.8, 1.5));
        assert_relative_eq!(b.yaw, 0.9);
        assert_eq!(b.track_id.as_deref(), Some("4"));
    }

    #[test]
    fn yaw_in_degrees_is_converted() {
        let doc = json!({
            "annotations": [{
                "class": "vehicle",
                "location": [0, 0, 0],
                "dimension": [1, 1, 1],
                "orientation": [0, 0, 180.0]
            }]
        });
        let adapter = SimulationAdapter {
            yaw_unit: YawUnit::Degrees,
        };
        let annotations = adapter.annotations(&doc);
        let b = annotations[0].as_box3d().unwrap();
        assert_relative_eq!(b.yaw, std::f32::consts::PI);
    }

    #[test]
    fn adapts_camera_record_and_normalizes_bbox() {
        let doc = json!({
            "annotations": [{
                "class": "policeCar",
                "bbox": [320.0, 140.0, 180.0, 260.0],
                "attributes": { "occluded": "false", "lane": 2 }
            }]
        });
        let annotations = adapter().annotations(&doc);
        assert_eq!(annotations.len(), 1);
        match &annotations[0] {
            Annotation::Box2d(b) => {
                assert_eq!(b.min, Point2f::new(180.0, 140.0));
                assert_eq!(b.max, Point2f::new(320.0, 260.0));
                assert_eq!(b.attributes.get("lane").map(String::as_str), Some("2"));
            }
            other => panic!("expected a 2D box, got {other:?}"),
        }
    }

    #[test]
    fn missing_orientation_drops_record() {
        let doc = json!({
            "annotations": [{
                "class": "vehicle",
                "location": [0, 0, 0],
                "dimension": [1, 1, 1]
            }]
        });
        assert!(adapter().annotations(&doc).is_empty());
    }
}
