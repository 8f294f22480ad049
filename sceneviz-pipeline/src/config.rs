//! Pipeline configuration
//!
//! Everything a batch run needs is carried explicitly in one record passed
//! to the pipeline at construction; there is no process-wide state.

use sceneviz_render::{Camera, RenderOptions};
use std::path::PathBuf;

/// Configuration for one batch run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory of annotation JSON files
    pub annotation_dir: PathBuf,
    /// Directory of sensor files, paired with annotations by base filename
    pub sensor_dir: PathBuf,
    /// Directory receiving one raster per rendered frame
    pub output_dir: PathBuf,
    /// Camera elevation, degrees
    pub elevation_deg: f32,
    /// Camera azimuth, degrees
    pub azimuth_deg: f32,
    /// Fraction of the global extent to show, in (0, 1]
    pub zoom: f32,
    /// Scatter point opacity in [0, 1]
    pub point_alpha: f32,
    /// Output raster width in pixels
    pub width: u32,
    /// Output raster height in pixels
    pub height: u32,
}

impl PipelineConfig {
    pub fn new(
        annotation_dir: impl Into<PathBuf>,
        sensor_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            annotation_dir: annotation_dir.into(),
            sensor_dir: sensor_dir.into(),
            output_dir: output_dir.into(),
            // Bird's-eye view with the framing the datasets were QA'd with.
            elevation_deg: 90.0,
            azimuth_deg: -60.0,
            zoom: 0.5,
            point_alpha: 0.6,
            width: 1000,
            height: 800,
        }
    }

    pub(crate) fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width: self.width,
            height: self.height,
            camera: Camera::new(self.elevation_deg, self.azimuth_deg),
            point_alpha: self.point_alpha,
            ..RenderOptions::default()
        }
    }
}
