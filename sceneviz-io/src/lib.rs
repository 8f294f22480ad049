//! I/O for sceneviz: point cloud readers and annotation schema adapters
//!
//! Point clouds arrive either as PCD containers or as flat binary float32
//! records; annotations arrive as JSON in several incompatible shapes.
//! Everything is normalized here into the core's `PointCloud` and
//! `Annotation` types so the geometry/extent/render core never touches a
//! raw file format.

pub mod bin;
pub mod pcd;
pub mod schema;

pub use bin::BinReader;
pub use pcd::PcdReader;
pub use schema::{detect_schema, SchemaAdapter, YawUnit};

use sceneviz_core::{Error, PointCloud, Result};
use std::path::Path;

/// Trait for reading point clouds from files
pub trait PointCloudReader: Send + Sync {
    /// Read a point cloud from the given path
    fn read_point_cloud(&self, path: &Path) -> Result<PointCloud>;

    /// Check if this reader handles the given file, by extension
    fn can_read(&self, path: &Path) -> bool;

    /// Name of the format this reader handles
    fn format_name(&self) -> &'static str;
}

/// Auto-detect format and read a point cloud
pub fn read_point_cloud<P: AsRef<Path>>(path: P) -> Result<PointCloud> {
    let path = path.as_ref();
    let readers: [&dyn PointCloudReader; 2] = [&PcdReader, &BinReader];
    for reader in readers {
        if reader.can_read(path) {
            return reader.read_point_cloud(path);
        }
    }
    Err(Error::UnsupportedFormat(format!(
        "unsupported point cloud format: {:?}",
        path.extension()
    )))
}
