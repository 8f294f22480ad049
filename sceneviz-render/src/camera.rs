//! Orthographic elevation/azimuth camera
//!
//! The view is described by an elevation and azimuth angle in degrees
//! around the scene (elevation 90
//! with azimuth −90 is the bird's-eye view with x right and y up). The
//! projection is orthographic: world points are dropped onto the screen
//! plane spanned by the camera's right and up vectors.

use sceneviz_core::{Extent, Point3f, Vector3f};

/// Viewing direction given as elevation/azimuth angles in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub elevation_deg: f32,
    pub azimuth_deg: f32,
}

impl Camera {
    pub fn new(elevation_deg: f32, azimuth_deg: f32) -> Self {
        Self {
            elevation_deg,
            azimuth_deg,
        }
    }

    /// Screen basis: (right, up) unit vectors in world coordinates
    pub fn basis(&self) -> (Vector3f, Vector3f) {
        let elevation = self.elevation_deg.to_radians();
        let azimuth = self.azimuth_deg.to_radians();
        let (sin_a, cos_a) = azimuth.sin_cos();
        let (sin_e, cos_e) = elevation.sin_cos();
        let right = Vector3f::new(-sin_a, cos_a, 0.0);
        let up = Vector3f::new(-sin_e * cos_a, -sin_e * sin_a, cos_e);
        (right, up)
    }
}

/// Maps world points into pixel coordinates for one render
///
/// The scale is chosen from the extent's largest half-range so the whole
/// extent cube stays inside the viewport under any camera rotation (a cube
/// corner projects at most √3 half-ranges from the center). Because the
/// scale comes from the frozen sequence-wide extent and not from the
/// frame, every frame of a sequence gets identical framing.
#[derive(Debug, Clone, Copy)]
pub struct Projector {
    right: Vector3f,
    up: Vector3f,
    center: Point3f,
    scale: f32,
    half_width: f32,
    half_height: f32,
}

const VIEW_MARGIN_PX: f32 = 4.0;

impl Projector {
    pub fn new(camera: &Camera, extent: &Extent, width: u32, height: u32) -> Self {
        let (right, up) = camera.basis();
        let half = extent.half_ranges();
        let radius = half.x.max(half.y).max(half.z) * 3.0_f32.sqrt();
        let half_width = width as f32 / 2.0;
        let half_height = height as f32 / 2.0;
        let viewport = half_width.min(half_height) - VIEW_MARGIN_PX;
        // A degenerate (single point) extent still renders, centered.
        let scale = if radius > 0.0 { viewport / radius } else { 1.0 };
        Self {
            right,
            up,
            center: extent.center(),
            scale,
            half_width,
            half_height,
        }
    }

    /// Project a world point to (possibly out-of-bounds) pixel coordinates
    pub fn to_pixel(&self, p: &Point3f) -> (f32, f32) {
        let d = p - self.center;
        let x = self.half_width + d.dot(&self.right) * self.scale;
        let y = self.half_height - d.dot(&self.up) * self.scale;
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bird_eye_view_axes() {
        // elev 90 / azim -90: world x goes right, world y goes up.
        let (right, up) = Camera::new(90.0, -90.0).basis();
        assert_relative_eq!(right, Vector3f::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(up, Vector3f::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn horizontal_view_has_z_up() {
        let (right, up) = Camera::new(0.0, -90.0).basis();
        assert_relative_eq!(right, Vector3f::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(up, Vector3f::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn extent_center_maps_to_image_center() {
        let extent = Extent {
            min: Point3f::new(-10.0, -10.0, -2.0),
            max: Point3f::new(10.0, 10.0, 6.0),
        };
        let projector = Projector::new(&Camera::new(35.0, -60.0), &extent, 640, 480);
        let (x, y) = projector.to_pixel(&extent.center());
        assert_relative_eq!(x, 320.0);
        assert_relative_eq!(y, 240.0);
    }

    #[test]
    fn extent_corners_stay_inside_viewport() {
        let extent = Extent {
            min: Point3f::new(-5.0, -3.0, 0.0),
            max: Point3f::new(7.0, 9.0, 4.0),
        };
        let projector = Projector::new(&Camera::new(42.0, 13.0), &extent, 800, 600);
        for &x in &[extent.min.x, extent.max.x] {
            for &y in &[extent.min.y, extent.max.y] {
                for &z in &[extent.min.z, extent.max.z] {
                    let (px, py) = projector.to_pixel(&Point3f::new(x, y, z));
                    assert!((0.0..800.0).contains(&px), "px out of range: {px}");
                    assert!((0.0..600.0).contains(&py), "py out of range: {py}");
                }
            }
        }
    }
}
