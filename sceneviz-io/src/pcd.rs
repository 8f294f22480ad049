//! PCD (Point Cloud Data) format support
//!
//! Reads the self-describing PCD container in ASCII and binary form. Only
//! the x, y, z fields are projected out; any other declared fields
//! (intensity, ring, timestamps, ...) are skipped by offset.

use crate::PointCloudReader;
use sceneviz_core::{Error, Point3f, PointCloud, Result};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// PCD data section encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PcdData {
    Ascii,
    Binary,
}

/// One declared field of the point record
#[derive(Debug, Clone)]
struct PcdField {
    name: String,
    size: usize,
    kind: char, // 'I', 'U', or 'F'
    count: usize,
}

/// Parsed PCD header: field layout plus point count
#[derive(Debug, Clone)]
struct PcdHeader {
    fields: Vec<PcdField>,
    points: usize,
    data: PcdData,
}

impl PcdHeader {
    /// Byte offset of a field within one binary point record
    fn byte_offset(&self, name: &str) -> Option<usize> {
        let mut offset = 0;
        for field in &self.fields {
            if field.name == name {
                return Some(offset);
            }
            offset += field.size * field.count;
        }
        None
    }

    /// Column index of a field within one ASCII point line
    fn column(&self, name: &str) -> Option<usize> {
        let mut column = 0;
        for field in &self.fields {
            if field.name == name {
                return Some(column);
            }
            column += field.count;
        }
        None
    }

    /// Total byte size of one binary point record
    fn stride(&self) -> usize {
        self.fields.iter().map(|f| f.size * f.count).sum()
    }

    fn field(&self, name: &str) -> Option<&PcdField> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Reader for `.pcd` point cloud files
pub struct PcdReader;

impl PcdReader {
    fn read_header<R: BufRead>(reader: &mut R) -> Result<PcdHeader> {
        let mut names: Vec<String> = Vec::new();
        let mut sizes: Vec<usize> = Vec::new();
        let mut kinds: Vec<char> = Vec::new();
        let mut counts: Vec<usize> = Vec::new();
        let mut width = None;
        let mut height = None;
        let mut points = None;
        let data: PcdData;

        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Err(Error::InvalidData(
                    "unexpected end of file in PCD header".to_string(),
                ));
            }
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            let keyword = parts.next().unwrap_or_default();
            let rest: Vec<&str> = parts.collect();
            match keyword {
                "FIELDS" => names = rest.iter().map(|s| s.to_string()).collect(),
                "SIZE" => {
                    sizes = rest
                        .iter()
                        .map(|s| {
                            s.parse().map_err(|_| {
                                Error::InvalidData(format!("invalid SIZE value: {s}"))
                            })
                        })
                        .collect::<Result<_>>()?
                }
                "TYPE" => {
                    kinds = rest
                        .iter()
                        .map(|s| s.chars().next().unwrap_or('F'))
                        .collect()
                }
                "COUNT" => {
                    counts = rest
                        .iter()
                        .map(|s| {
                            s.parse().map_err(|_| {
                                Error::InvalidData(format!("invalid COUNT value: {s}"))
                            })
                        })
                        .collect::<Result<_>>()?
                }
                "WIDTH" => width = rest.first().and_then(|s| s.parse::<usize>().ok()),
                "HEIGHT" => height = rest.first().and_then(|s| s.parse::<usize>().ok()),
                "POINTS" => points = rest.first().and_then(|s| s.parse::<usize>().ok()),
                "DATA" => {
                    data = match rest.first().copied() {
                        Some("ascii") => PcdData::Ascii,
                        Some("binary") => PcdData::Binary,
                        Some(other) => {
                            return Err(Error::UnsupportedFormat(format!(
                                "PCD data encoding not supported: {other}"
                            )))
                        }
                        None => {
                            return Err(Error::InvalidData(
                                "missing DATA encoding in PCD header".to_string(),
                            ))
                        }
                    };
                    break;
                }
                // VERSION, VIEWPOINT, and unknown keywords are irrelevant here
                _ => {}
            }
        }

        if names.is_empty() || names.len() != sizes.len() || names.len() != kinds.len() {
            return Err(Error::InvalidData(
                "mismatched FIELDS/SIZE/TYPE declarations in PCD header".to_string(),
            ));
        }
        if counts.is_empty() {
            counts = vec![1; names.len()];
        }
        if counts.len() != names.len() {
            return Err(Error::InvalidData(
                "mismatched FIELDS/COUNT declarations in PCD header".to_string(),
            ));
        }

        let points = match (points, width, height) {
            (Some(p), _, _) => p,
            (None, Some(w), Some(h)) => w * h,
            _ => {
                return Err(Error::InvalidData(
                    "missing POINTS and WIDTH/HEIGHT in PCD header".to_string(),
                ))
            }
        };

        let fields = names
            .into_iter()
            .zip(sizes)
            .zip(kinds)
            .zip(counts)
            .map(|(((name, size), kind), count)| PcdField {
                name,
                size,
                kind,
                count,
            })
            .collect();

        Ok(PcdHeader {
            fields,
            points,
            data,
        })
    }

    fn read_ascii<R: BufRead>(reader: &mut R, header: &PcdHeader) -> Result<PointCloud> {
        let columns = ["x", "y", "z"]
            .map(|name| header.column(name))
            .map(|c| c.ok_or_else(|| Error::InvalidData("PCD has no x/y/z fields".to_string())));
        let [x, y, z] = columns;
        let (x, y, z) = (x?, y?, z?);

        let mut cloud = PointCloud::with_capacity(header.points);
        let mut line = String::new();
        let mut remaining = header.points;
        while remaining > 0 {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                return Err(Error::InvalidData(
                    "PCD data section shorter than declared point count".to_string(),
                ));
            }
            let values: Vec<&str> = line.split_whitespace().collect();
            // A blank line is not a data row and does not count against
            // the declared point total.
            if values.is_empty() {
                continue;
            }
            let parse = |idx: usize| -> Result<f32> {
                values
                    .get(idx)
                    .and_then(|s| s.parse::<f32>().ok())
                    .ok_or_else(|| {
                        Error::InvalidData(format!("invalid coordinate in PCD line: {line:?}"))
                    })
            };
            let point = Point3f::new(parse(x)?, parse(y)?, parse(z)?);
            // A stray NaN point would poison the extent fold.
            if point.coords.iter().all(|v| v.is_finite()) {
                cloud.push(point);
            }
            remaining -= 1;
        }
        Ok(cloud)
    }

    fn read_binary<R: Read>(reader: &mut R, header: &PcdHeader) -> Result<PointCloud> {
        let offsets = ["x", "y", "z"].map(|name| {
            header
                .byte_offset(name)
                .zip(header.field(name))
                .ok_or_else(|| Error::InvalidData("PCD has no x/y/z fields".to_string()))
        });
        let [x, y, z] = offsets;
        let (x, y, z) = (x?, y?, z?);

        let stride = header.stride();
        let mut record = vec![0u8; stride];
        let mut cloud = PointCloud::with_capacity(header.points);
        for _ in 0..header.points {
            reader.read_exact(&mut record)?;
            let point = Point3f::new(
                read_component(&record[x.0..], x.1)?,
                read_component(&record[y.0..], y.1)?,
                read_component(&record[z.0..], z.1)?,
            );
            if point.coords.iter().all(|v| v.is_finite()) {
                cloud.push(point);
            }
        }
        Ok(cloud)
    }
}

/// Decode one scalar of the given field type, little endian, as f32
fn read_component(bytes: &[u8], field: &PcdField) -> Result<f32> {
    let take = |n: usize| -> Result<&[u8]> {
        bytes.get(..n).ok_or_else(|| {
            Error::InvalidData("PCD record shorter than field layout".to_string())
        })
    };
    let value = match (field.kind, field.size) {
        ('F', 4) => f32::from_le_bytes(take(4)?.try_into().unwrap()),
        ('F', 8) => f64::from_le_bytes(take(8)?.try_into().unwrap()) as f32,
        ('I', 1) => take(1)?[0] as i8 as f32,
        ('I', 2) => i16::from_le_bytes(take(2)?.try_into().unwrap()) as f32,
        ('I', 4) => i32::from_le_bytes(take(4)?.try_into().unwrap()) as f32,
        ('U', 1) => take(1)?[0] as f32,
        ('U', 2) => u16::from_le_bytes(take(2)?.try_into().unwrap()) as f32,
        ('U', 4) => u32::from_le_bytes(take(4)?.try_into().unwrap()) as f32,
        (kind, size) => {
            return Err(Error::InvalidData(format!(
                "unknown PCD field type/size: {kind}/{size}"
            )))
        }
    };
    Ok(value)
}

impl PointCloudReader for PcdReader {
    fn read_point_cloud(&self, path: &Path) -> Result<PointCloud> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let header = Self::read_header(&mut reader)?;
        match header.data {
            PcdData::Ascii => Self::read_ascii(&mut reader, &header),
            PcdData::Binary => Self::read_binary(&mut reader, &header),
        }
    }

    fn can_read(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pcd"))
            .unwrap_or(false)
    }

    fn format_name(&self) -> &'static str {
        "pcd"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::fs;
    use std::io::Write;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("sceneviz-pcd-tests");
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn reads_ascii_pcd_with_extra_fields() {
        let path = scratch_path("ascii.pcd");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "# .PCD v0.7 - Point Cloud Data file format").unwrap();
        writeln!(file, "VERSION 0.7").unwrap();
        writeln!(file, "FIELDS x y z intensity").unwrap();
        writeln!(file, "SIZE 4 4 4 4").unwrap();
        writeln!(file, "TYPE F F F F").unwrap();
        writeln!(file, "COUNT 1 1 1 1").unwrap();
        writeln!(file, "WIDTH 2").unwrap();
        writeln!(file, "HEIGHT 1").unwrap();
        writeln!(file, "VIEWPOINT 0 0 0 1 0 0 0").unwrap();
        writeln!(file, "POINTS 2").unwrap();
        writeln!(file, "DATA ascii").unwrap();
        writeln!(file, "1.0 2.0 3.0 0.5").unwrap();
        writeln!(file, "-4.5 0.0 1.25 0.9").unwrap();
        drop(file);

        let cloud = PcdReader.read_point_cloud(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(cloud.len(), 2);
        assert_relative_eq!(cloud[0], Point3f::new(1.0, 2.0, 3.0));
        assert_relative_eq!(cloud[1], Point3f::new(-4.5, 0.0, 1.25));
    }

    #[test]
    fn reads_binary_pcd() {
        let path = scratch_path("binary.pcd");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            "VERSION 0.7\nFIELDS x y z\nSIZE 4 4 4\nTYPE F F F\nCOUNT 1 1 1\n\
             WIDTH 2\nHEIGHT 1\nPOINTS 2\nDATA binary\n"
        )
        .unwrap();
        for v in [1.0f32, 2.0, 3.0, -1.0, -2.0, -3.0] {
            file.write_all(&v.to_le_bytes()).unwrap();
        }
        drop(file);

        let cloud = PcdReader.read_point_cloud(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(cloud.len(), 2);
        assert_relative_eq!(cloud[0], Point3f::new(1.0, 2.0, 3.0));
        assert_relative_eq!(cloud[1], Point3f::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn blank_lines_do_not_consume_points() {
        let path = scratch_path("blank-lines.pcd");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            "FIELDS x y z\nSIZE 4 4 4\nTYPE F F F\nWIDTH 2\nHEIGHT 1\nDATA ascii\n\
             1.0 2.0 3.0\n\n\n4.0 5.0 6.0\n"
        )
        .unwrap();
        drop(file);

        let cloud = PcdReader.read_point_cloud(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(cloud.len(), 2);
        assert_relative_eq!(cloud[1], Point3f::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn nan_points_are_dropped() {
        let path = scratch_path("nan.pcd");
        let mut file = fs::File::create(&path).unwrap();
        write!(
            file,
            "FIELDS x y z\nSIZE 4 4 4\nTYPE F F F\nWIDTH 2\nHEIGHT 1\nDATA ascii\n\
             1.0 1.0 1.0\nnan nan nan\n"
        )
        .unwrap();
        drop(file);

        let cloud = PcdReader.read_point_cloud(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(cloud.len(), 1);
    }

    #[test]
    fn compressed_pcd_is_unsupported() {
        let path = scratch_path("compressed.pcd");
        fs::write(
            &path,
            "FIELDS x y z\nSIZE 4 4 4\nTYPE F F F\nWIDTH 1\nHEIGHT 1\nDATA binary_compressed\n",
        )
        .unwrap();
        let result = PcdReader.read_point_cloud(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    }
}
