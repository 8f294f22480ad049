//! Batch rendering pipeline
//!
//! Two-phase batch over a directory of annotation files: first accumulate
//! the sequence-wide extent over every frame, then render every frame
//! against that frozen extent. The ordering is a contract, not an
//! implementation detail; interleaving accumulation and rendering would
//! break the stable-framing guarantee. Within each phase, per-frame work
//! is independent, so the render phase fans out over a rayon pool.
//!
//! The error policy is skip-and-continue: a missing companion file or a
//! malformed record drops that unit with a diagnostic and the batch keeps
//! going. Only an entirely empty sequence aborts the run.

use crate::config::PipelineConfig;
use rayon::prelude::*;
use sceneviz_core::{Extent, Frame, Result};
use sceneviz_io::schema::detect_schema;
use sceneviz_render::FrameRenderer;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Suffix appended to the input stem for each output raster
const OUTPUT_SUFFIX: &str = "_3d.png";

/// Outcome of one batch run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames rendered to disk
    pub processed: usize,
    /// Annotation files skipped (missing sensor, unreadable, or empty)
    pub skipped: usize,
}

pub struct BatchPipeline {
    config: PipelineConfig,
}

impl BatchPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run the batch: pair files, build frames, freeze the extent, render
    ///
    /// Output files are overwritten in place, so re-running after an
    /// interrupted batch is safe and resumes idempotently.
    pub fn run(&self) -> Result<RunSummary> {
        let annotations = Self::annotation_files(&self.config.annotation_dir)?;
        let sensors = Self::index_by_stem(&self.config.sensor_dir)?;
        log::info!(
            "found {} annotation files, {} sensor files",
            annotations.len(),
            sensors.len()
        );

        let mut skipped = 0usize;
        let mut frames = Vec::with_capacity(annotations.len());
        for path in &annotations {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                skipped += 1;
                continue;
            };
            let Some(sensor) = sensors.get(stem) else {
                log::warn!("no sensor file matches {stem:?}, skipping");
                skipped += 1;
                continue;
            };
            match Self::build_frame(stem, path, sensor) {
                Some(frame) => frames.push(frame),
                None => skipped += 1,
            }
        }

        // Phase boundary: the extent must be complete before any render.
        let extent = Extent::accumulate(&frames)?
            .cubic()
            .zoomed(self.config.zoom)?;
        log::info!(
            "frozen extent: x [{:.2}, {:.2}] y [{:.2}, {:.2}] z [{:.2}, {:.2}]",
            extent.min.x,
            extent.max.x,
            extent.min.y,
            extent.max.y,
            extent.min.z,
            extent.max.z,
        );

        fs::create_dir_all(&self.config.output_dir)?;
        let renderer = FrameRenderer::new(self.config.render_options());
        let rendered: usize = frames
            .par_iter()
            .map(|frame| {
                let out = self
                    .config
                    .output_dir
                    .join(format!("{}{}", frame.id, OUTPUT_SUFFIX));
                match renderer.render_to_file(frame, &extent, &out) {
                    Ok(()) => {
                        log::debug!("wrote {}", out.display());
                        1
                    }
                    Err(e) => {
                        log::warn!("failed to render {}: {e}", frame.id);
                        0
                    }
                }
            })
            .sum();
        skipped += frames.len() - rendered;

        let summary = RunSummary {
            processed: rendered,
            skipped,
        };
        log::info!(
            "batch done: {} processed, {} skipped",
            summary.processed,
            summary.skipped
        );
        Ok(summary)
    }

    /// Annotation files in deterministic (sorted) order
    fn annotation_files(dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| {
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("json"))
                    .unwrap_or(false)
            })
            .collect();
        files.sort();
        Ok(files)
    }

    /// Index a directory by file stem (case-sensitive, extension-agnostic)
    fn index_by_stem(dir: &Path) -> Result<HashMap<String, PathBuf>> {
        let mut index = HashMap::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                index.insert(stem.to_string(), path);
            }
        }
        Ok(index)
    }

    /// Build one frame from an annotation file and its sensor file
    ///
    /// Returns `None` when the frame would carry no geometry at all.
    fn build_frame(stem: &str, annotation: &Path, sensor: &Path) -> Option<Frame> {
        let mut frame = Frame::new(stem);

        match fs::read_to_string(annotation)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str(&text).map_err(|e| e.to_string()))
        {
            Ok(doc) => match detect_schema(&doc) {
                Some(adapter) => {
                    frame.annotations = adapter.annotations(&doc);
                    log::debug!(
                        "{stem}: {} annotations via {} schema",
                        frame.annotations.len(),
                        adapter.name()
                    );
                }
                None => log::warn!("{stem}: unrecognized annotation schema"),
            },
            Err(e) => log::warn!("{stem}: unreadable annotation file: {e}"),
        }

        match sceneviz_io::read_point_cloud(sensor) {
            Ok(cloud) => frame.point_cloud = Some(cloud),
            Err(e) => log::warn!("{stem}: unreadable sensor file: {e}"),
        }

        if frame.is_empty() {
            log::warn!("{stem}: no geometry, skipping");
            return None;
        }
        Some(frame)
    }
}
