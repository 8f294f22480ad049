//! Headless rendering of frames for sceneviz
//!
//! Renders one frame (point cloud scatter, oriented-box wireframes, and a
//! label per box) into a raster image, with axis limits set exactly to a
//! caller-supplied extent so every frame of a sequence shares identical
//! framing:
//! - Orthographic elevation/azimuth camera
//! - Deterministic per-track categorical colors
//! - PNG output, one raster per render call

pub mod camera;
pub mod canvas;
pub mod font;
pub mod palette;
pub mod renderer;

pub use camera::{Camera, Projector};
pub use renderer::{FrameRenderer, RenderOptions};
