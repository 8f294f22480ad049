//! Flat binary point cloud support
//!
//! KITTI-style `.bin` clouds: a headerless array of little-endian 32-bit
//! floats in groups of four (x, y, z, intensity). Intensity is discarded.

use crate::PointCloudReader;
use sceneviz_core::{Error, Point3f, PointCloud, Result};
use std::fs;
use std::path::Path;

const RECORD_SIZE: usize = 4 * std::mem::size_of::<f32>();

/// Reader for flat `.bin` point cloud files
pub struct BinReader;

impl PointCloudReader for BinReader {
    fn read_point_cloud(&self, path: &Path) -> Result<PointCloud> {
        let bytes = fs::read(path)?;
        if bytes.len() % RECORD_SIZE != 0 {
            return Err(Error::InvalidData(format!(
                "flat binary cloud size {} is not a multiple of {} bytes",
                bytes.len(),
                RECORD_SIZE
            )));
        }

        let mut cloud = PointCloud::with_capacity(bytes.len() / RECORD_SIZE);
        for record in bytes.chunks_exact(RECORD_SIZE) {
            let coord = |i: usize| f32::from_le_bytes(record[i * 4..i * 4 + 4].try_into().unwrap());
            let point = Point3f::new(coord(0), coord(1), coord(2));
            // A stray NaN point would poison the extent fold.
            if point.coords.iter().all(|v| v.is_finite()) {
                cloud.push(point);
            }
        }
        Ok(cloud)
    }

    fn can_read(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("bin"))
            .unwrap_or(false)
    }

    fn format_name(&self) -> &'static str {
        "bin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;

    #[test]
    fn reads_xyz_and_discards_intensity() {
        let path = std::env::temp_dir().join("sceneviz-bin-test.bin");
        let mut bytes = Vec::new();
        for v in [1.0f32, 2.0, 3.0, 0.7, -1.0, 0.5, 2.5, 0.1] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        fs::write(&path, &bytes).unwrap();

        let cloud = BinReader.read_point_cloud(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(cloud.len(), 2);
        assert_relative_eq!(cloud[0], Point3f::new(1.0, 2.0, 3.0));
        assert_relative_eq!(cloud[1], Point3f::new(-1.0, 0.5, 2.5));
    }

    #[test]
    fn truncated_record_is_invalid() {
        let path = std::env::temp_dir().join("sceneviz-bin-truncated.bin");
        fs::write(&path, [0u8; 10]).unwrap();
        let result = BinReader.read_point_cloud(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(Error::InvalidData(_))));
    }
}
