//! Annotation schema adapters
//!
//! The source datasets ship annotations in several incompatible JSON
//! shapes. Each shape gets its own adapter that normalizes raw records
//! into the core's `Annotation` type; a record missing or mangling its
//! geometric fields yields no annotation (logged), never an error, so a
//! batch keeps going past incomplete data.

pub mod rotation_y;
pub mod simulation;
pub mod trajectory;

pub use rotation_y::RotationYAdapter;
pub use simulation::SimulationAdapter;
pub use trajectory::TrajectoryAdapter;

use sceneviz_core::Annotation;
use serde_json::Value;

/// Unit of a raw yaw field
///
/// The datasets are inconsistent about degrees vs. radians, so the
/// conversion happens explicitly at this boundary; the core only ever
/// sees radians.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YawUnit {
    Radians,
    Degrees,
}

impl YawUnit {
    pub fn to_radians(self, yaw: f32) -> f32 {
        match self {
            YawUnit::Radians => yaw,
            YawUnit::Degrees => yaw.to_radians(),
        }
    }
}

/// Normalizes one raw annotation document into core annotations
pub trait SchemaAdapter: Send + Sync {
    /// Name of the raw shape this adapter understands
    fn name(&self) -> &'static str;

    /// Shape probe: does this document look like our schema?
    fn matches(&self, doc: &Value) -> bool;

    /// Normalize every well-formed record in the document
    fn annotations(&self, doc: &Value) -> Vec<Annotation>;
}

/// Registry of known schemas, probed in declaration order
///
/// `rotation_y` must precede `simulation`: both shapes keep their records
/// under a top-level `annotations` array and are told apart by record
/// fields.
static ADAPTERS: [&dyn SchemaAdapter; 3] = [
    &TrajectoryAdapter,
    &RotationYAdapter {
        yaw_unit: YawUnit::Radians,
    },
    &SimulationAdapter {
        yaw_unit: YawUnit::Radians,
    },
];

/// Find the adapter for a raw annotation document, if any shape matches
pub fn detect_schema(doc: &Value) -> Option<&'static dyn SchemaAdapter> {
    ADAPTERS.iter().copied().find(|a| a.matches(doc))
}

/// Read a JSON value as f32, accepting both integer and float encodings
pub(crate) fn number(value: &Value) -> Option<f32> {
    value.as_f64().map(|v| v as f32)
}

/// Read a JSON array of exactly three numbers
pub(crate) fn triple(value: &Value) -> Option<[f32; 3]> {
    let arr = value.as_array()?;
    if arr.len() != 3 {
        return None;
    }
    Some([number(&arr[0])?, number(&arr[1])?, number(&arr[2])?])
}

/// Read a field that may be encoded as a string or a bare number
pub(crate) fn stringish(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
