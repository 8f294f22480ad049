//! sceneviz command line interface
//!
//! Renders a directory of annotated lidar frames into per-frame rasters
//! with sequence-stable framing. Exit status is nonzero only when not a
//! single frame could be produced; individual skips are diagnostics, not
//! failures.

use anyhow::bail;
use clap::Parser;
use sceneviz_pipeline::{BatchPipeline, PipelineConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sceneviz", version, about = "Batch-render sensor annotations for visual QA")]
struct Args {
    /// Directory of annotation JSON files
    #[arg(long)]
    annotations: PathBuf,

    /// Directory of sensor files (matched to annotations by base filename)
    #[arg(long)]
    sensors: PathBuf,

    /// Output directory for rendered frames
    #[arg(long, short)]
    output: PathBuf,

    /// Camera elevation in degrees
    #[arg(long, default_value_t = 90.0)]
    elevation: f32,

    /// Camera azimuth in degrees
    #[arg(long, default_value_t = -60.0)]
    azimuth: f32,

    /// Fraction of the global extent to show, in (0, 1]
    #[arg(long, default_value_t = 0.5)]
    zoom: f32,

    /// Scatter point opacity in [0, 1]
    #[arg(long, default_value_t = 0.6)]
    point_alpha: f32,

    /// Output raster width in pixels
    #[arg(long, default_value_t = 1000)]
    width: u32,

    /// Output raster height in pixels
    #[arg(long, default_value_t = 800)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = PipelineConfig::new(args.annotations, args.sensors, args.output);
    config.elevation_deg = args.elevation;
    config.azimuth_deg = args.azimuth;
    config.zoom = args.zoom;
    config.point_alpha = args.point_alpha;
    config.width = args.width;
    config.height = args.height;

    let summary = BatchPipeline::new(config).run()?;
    println!(
        "{} frames processed, {} skipped",
        summary.processed, summary.skipped
    );
    if summary.processed == 0 {
        bail!("no frames were produced");
    }
    Ok(())
}
