//! Frame renderer
//!
//! Draws one frame against a caller-supplied extent: the point cloud as a
//! height-colored scatter, every 3D box as a 12-edge wireframe in its
//! track color, and a label above each box center. The extent is used as
//! the axis limits and is never recomputed from the frame, which is the
//! mechanism that gives a rendered sequence stable, comparable framing.

use crate::camera::{Camera, Projector};
use crate::canvas::Canvas;
use crate::font;
use crate::palette;
use image::{Rgb, RgbImage};
use sceneviz_core::{Box3d, Error, Extent, Frame, Result, Vector3f};
use std::path::Path;

/// Rendering parameters for one sequence
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub camera: Camera,
    /// Scatter point opacity in [0, 1]
    pub point_alpha: f32,
    /// Scatter dot radius in pixels; 0 draws single pixels
    pub point_size: i64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 800,
            camera: Camera::new(30.0, -60.0),
            point_alpha: 0.6,
            point_size: 0,
        }
    }
}

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const LABEL_COLOR: Rgb<u8> = Rgb([0, 0, 0]);

/// Renders frames against a frozen sequence-wide extent
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    options: RenderOptions,
}

impl FrameRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render one frame; neither input is mutated
    pub fn render(&self, frame: &Frame, extent: &Extent) -> RgbImage {
        let opts = &self.options;
        let mut image = RgbImage::from_pixel(opts.width, opts.height, BACKGROUND);
        let projector = Projector::new(&opts.camera, extent, opts.width, opts.height);
        let mut canvas = Canvas::new(&mut image);

        if let Some(cloud) = &frame.point_cloud {
            let z_range = (extent.max.z - extent.min.z).max(f32::EPSILON);
            for p in cloud {
                let (x, y) = projector.to_pixel(p);
                let t = (p.z - extent.min.z) / z_range;
                canvas.draw_dot(x, y, opts.point_size, palette::viridis(t), opts.point_alpha);
            }
        }

        for b in frame.boxes_3d() {
            self.draw_box(&mut canvas, &projector, extent, b);
        }

        image
    }

    /// Render one frame and write it as a PNG
    pub fn render_to_file(&self, frame: &Frame, extent: &Extent, path: &Path) -> Result<()> {
        let image = self.render(frame, extent);
        image
            .save(path)
            .map_err(|e| Error::Render(format!("failed to write {}: {e}", path.display())))
    }

    fn draw_box(&self, canvas: &mut Canvas<'_>, projector: &Projector, extent: &Extent, b: &Box3d) {
        let color = palette::color_for(b.track_id.as_deref(), &b.class_label);
        let pixels = b.corners().map(|c| projector.to_pixel(&c));
        for (i, j) in Box3d::EDGES {
            canvas.draw_line(pixels[i], pixels[j], color);
        }

        // Label above the center so it does not overlap the wireframe.
        let anchor = b.center + Vector3f::new(0.0, 0.0, 0.02 * (extent.max.z - extent.min.z));
        let (x, y) = projector.to_pixel(&anchor);
        let label = Self::label(b);
        canvas.draw_text(
            x - font::text_width(&label) as f32 / 2.0,
            y - font::GLYPH_HEIGHT as f32,
            &label,
            LABEL_COLOR,
        );
    }

    /// Short label: last segment of a dotted class name, plus the track id
    fn label(b: &Box3d) -> String {
        let class = b.class_label.rsplit('.').next().unwrap_or(&b.class_label);
        match &b.track_id {
            Some(id) => format!("{class}#{id}"),
            None => class.to_string(),
        }
    }
}
