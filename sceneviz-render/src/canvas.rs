//! Raster drawing primitives
//!
//! Minimal painter over an `image::RgbImage`: alpha-blended pixels and
//! dots for the scatter, Bresenham lines for the wireframes, and glyph
//! blitting for labels. All operations clip at the image bounds.

use crate::font;
use image::{Rgb, RgbImage};

pub struct Canvas<'a> {
    image: &'a mut RgbImage,
}

impl<'a> Canvas<'a> {
    pub fn new(image: &'a mut RgbImage) -> Self {
        Self { image }
    }

    /// Blend a color over one pixel; `alpha` 0.0 leaves it untouched,
    /// 1.0 replaces it
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgb<u8>, alpha: f32) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let alpha = alpha.clamp(0.0, 1.0);
        let pixel = self.image.get_pixel_mut(x as u32, y as u32);
        for (dst, src) in pixel.0.iter_mut().zip(color.0) {
            *dst = (*dst as f32 * (1.0 - alpha) + src as f32 * alpha).round() as u8;
        }
    }

    /// Filled dot of the given radius (radius 0 is a single pixel)
    pub fn draw_dot(&mut self, cx: f32, cy: f32, radius: i64, color: Rgb<u8>, alpha: f32) {
        let (cx, cy) = (cx.round() as i64, cy.round() as i64);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.blend_pixel(cx + dx, cy + dy, color, alpha);
                }
            }
        }
    }

    /// Bresenham line between two (sub)pixel endpoints
    pub fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb<u8>) {
        let (mut x0, mut y0) = (from.0.round() as i64, from.1.round() as i64);
        let (x1, y1) = (to.0.round() as i64, to.1.round() as i64);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.blend_pixel(x0, y0, color, 1.0);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Blit text with its top-left corner at (x, y); letters are rendered
    /// uppercase
    pub fn draw_text(&mut self, x: f32, y: f32, text: &str, color: Rgb<u8>) {
        let (x, y) = (x.round() as i64, y.round() as i64);
        for (i, c) in text.chars().enumerate() {
            let rows = font::glyph(c.to_ascii_uppercase());
            let origin_x = x + (i * font::GLYPH_ADVANCE) as i64;
            for (row_idx, row) in rows.iter().enumerate() {
                for col in 0..font::GLYPH_WIDTH {
                    if row & (1 << (font::GLYPH_WIDTH - 1 - col)) != 0 {
                        self.blend_pixel(origin_x + col as i64, y + row_idx as i64, color, 1.0);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white_image(w: u32, h: u32) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb([255, 255, 255]))
    }

    #[test]
    fn line_touches_both_endpoints() {
        let mut image = white_image(20, 20);
        Canvas::new(&mut image).draw_line((2.0, 3.0), (15.0, 11.0), Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(2, 3), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(15, 11), &Rgb([0, 0, 0]));
    }

    #[test]
    fn out_of_bounds_drawing_is_clipped() {
        let mut image = white_image(8, 8);
        let mut canvas = Canvas::new(&mut image);
        canvas.draw_line((-5.0, -5.0), (20.0, 20.0), Rgb([0, 0, 0]));
        canvas.draw_dot(-3.0, 4.0, 2, Rgb([0, 0, 0]), 1.0);
        // Reaching here without a panic is the point; spot-check the diagonal.
        assert_eq!(image.get_pixel(4, 4), &Rgb([0, 0, 0]));
    }

    #[test]
    fn half_alpha_blends_toward_color() {
        let mut image = white_image(2, 2);
        Canvas::new(&mut image).blend_pixel(0, 0, Rgb([0, 0, 0]), 0.5);
        assert_eq!(image.get_pixel(0, 0), &Rgb([128, 128, 128]));
    }

    #[test]
    fn text_marks_pixels() {
        let mut image = white_image(40, 10);
        Canvas::new(&mut image).draw_text(1.0, 1.0, "car#1", Rgb([0, 0, 0]));
        let dark = image.pixels().filter(|p| p.0 == [0, 0, 0]).count();
        assert!(dark > 10, "expected glyph pixels, found {dark}");
    }
}
