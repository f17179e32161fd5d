// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The renderer.  Every pixel is independent of every other, so the
//! image is cut into horizontal bands of whole rows, one band per
//! worker, and each worker writes straight into its own slice of a
//! buffer allocated up front.  No locks; the scope is the only join.

use image::Rgba;
use std::panic;
use std::time::Instant;

use crate::color::ColorModel;
use crate::fractal::Fractal;
use crate::planes::{Pixel, PlaneMapper, Rect};

/// Everything needed to render one image.  Once set, this object
/// should not be mutable.
#[derive(Copy, Clone, Debug)]
pub struct RenderRequest {
    /// The escape-time rule.
    pub fractal: Fractal,
    /// How escape times become pixels.
    pub model: ColorModel,
    /// Maps the image grid onto the viewport.
    pub plane: PlaneMapper,
    /// The maximum number of iterations per pixel.
    pub budget: usize,
}

impl RenderRequest {
    /// Requires the fractal, the color model, the viewport, the
    /// iteration budget and the width of the output image in pixels.
    /// The image height follows from the viewport's aspect ratio.
    pub fn new(
        fractal: Fractal,
        model: ColorModel,
        rect: Rect,
        budget: usize,
        image_width: usize,
    ) -> RenderRequest {
        RenderRequest {
            fractal,
            model,
            plane: PlaneMapper::new(rect, image_width),
            budget,
        }
    }

    /// Plane units per pixel.
    pub fn pixel_size(&self) -> f64 {
        self.plane.pixel_size
    }

    /// The color of a single pixel.
    pub fn pixel(&self, pixel: &Pixel) -> Rgba<u8> {
        let c = self.plane.pixel_to_point(pixel);
        self.model.map(self.fractal.evaluate(c, self.budget), self.budget)
    }
}

/// A finished image: rows of RGBA pixels, top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgba<u8>>,
}

impl PixelBuffer {
    /// Pixel columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Pixel rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// No pixels at all.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// The pixel at a column and row, if it is on the grid.
    pub fn get(&self, pixel: &Pixel) -> Option<Rgba<u8>> {
        if pixel.0 >= self.width || pixel.1 >= self.height {
            return None;
        }
        Some(self.pixels[pixel.1 * self.width + pixel.0])
    }

    /// All the pixels, row-major.
    pub fn pixels(&self) -> &[Rgba<u8>] {
        &self.pixels
    }

    /// The raw RGBA bytes, row-major, ready for an encoder.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|p| p.0.iter().cloned()).collect()
    }
}

/// Renders the whole request, using up to `threads` workers.  Zero
/// workers means one.
pub fn render(request: &RenderRequest, threads: usize) -> PixelBuffer {
    let (width, height) = (request.plane.width(), request.plane.height());
    let started = Instant::now();
    let pixels = render_bands(width, height, threads, |pixel| request.pixel(pixel));
    debug!(
        "rendered {}x{} at {} iterations in {:?}",
        width,
        height,
        request.budget,
        started.elapsed()
    );
    PixelBuffer {
        width,
        height,
        pixels,
    }
}

/// Rows in each band when `height` rows are split between `threads`
/// workers.  The last band takes whatever is left over.
fn band_height(height: usize, threads: usize) -> usize {
    let workers = threads.max(1).min(height.max(1));
    (height + workers - 1) / workers
}

/// Computes every pixel of a `width` x `height` grid exactly once with
/// `paint`, splitting the rows into contiguous bands.
fn render_bands<F>(width: usize, height: usize, threads: usize, paint: F) -> Vec<Rgba<u8>>
where
    F: Fn(&Pixel) -> Rgba<u8> + Sync,
{
    let mut pixels = vec![Rgba([0, 0, 0, 0]); width * height];
    if pixels.is_empty() {
        return pixels;
    }

    let rows = band_height(height, threads);
    debug!(
        "splitting {} rows into bands of {} for {} requested workers",
        height, rows, threads
    );

    let paint = &paint;
    let finished = crossbeam::scope(|spawner| {
        for (band, region) in pixels.chunks_mut(rows * width).enumerate() {
            spawner.spawn(move |_| {
                let top = band * rows;
                for (offset, slot) in region.iter_mut().enumerate() {
                    *slot = paint(&Pixel(offset % width, top + offset / width));
                }
            });
        }
    });

    // A worker that panicked leaves holes in the image; pass the panic on.
    if let Err(cause) = finished {
        panic::resume_unwind(cause);
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{ColorScheme, INSIDE};
    use crate::fractal::EscapeTime;
    use crate::planes::Point;
    use num::Complex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const MANDEL_4: Fractal = Fractal::Mandelbrot { threshold: 4.0 };

    fn mandelbrot_request(model: ColorModel) -> RenderRequest {
        let rect = Rect::new(Point::new(-2.0, -1.5), Point::new(1.0, 1.5)).unwrap();
        RenderRequest::new(MANDEL_4, model, rect, 50, 300)
    }

    #[test]
    fn band_heights_cover_the_image() {
        assert_eq!(band_height(10, 3), 4);
        assert_eq!(band_height(10, 1), 10);
        assert_eq!(band_height(10, 0), 10);
        assert_eq!(band_height(3, 8), 1);
        assert_eq!(band_height(0, 4), 0);
    }

    #[test]
    fn every_pixel_is_painted_once() {
        let (width, height) = (17, 13);
        for &threads in &[0, 1, 2, 4, 5, 13, 64] {
            let counts: Vec<AtomicUsize> = (0..width * height).map(|_| AtomicUsize::new(0)).collect();
            let pixels = render_bands(width, height, threads, |p| {
                counts[p.1 * width + p.0].fetch_add(1, Ordering::SeqCst);
                Rgba([p.0 as u8, p.1 as u8, 0, 255])
            });
            assert!(counts.iter().all(|c| c.load(Ordering::SeqCst) == 1));
            for (i, px) in pixels.iter().enumerate() {
                assert_eq!(*px, Rgba([(i % width) as u8, (i / width) as u8, 0, 255]));
            }
        }
    }

    #[test]
    fn empty_grids_render_nothing() {
        let pixels = render_bands(0, 10, 4, |_| Rgba([255, 255, 255, 255]));
        assert!(pixels.is_empty());
        let pixels = render_bands(10, 0, 4, |_| Rgba([255, 255, 255, 255]));
        assert!(pixels.is_empty());
    }

    #[test]
    fn zero_width_request_gives_an_empty_buffer() {
        let rect = Rect::from_extent(-2.0, -1.0, 3.0, 2.0).unwrap();
        let request = RenderRequest::new(MANDEL_4, ColorModel::Greyscale, rect, 50, 0);
        let buffer = render(&request, 4);
        assert!(buffer.is_empty());
        assert_eq!((buffer.width(), buffer.height()), (0, 0));
        assert!(buffer.to_bytes().is_empty());
    }

    #[test]
    fn render_fills_the_buffer() {
        let request = mandelbrot_request(ColorModel::Greyscale);
        let buffer = render(&request, 4);
        assert_eq!(buffer.pixels().len(), buffer.width() * buffer.height());
        assert!(buffer.pixels().iter().all(|p| p.0[3] == 255));
        assert_eq!(buffer.to_bytes().len(), buffer.width() * buffer.height() * 4);
    }

    #[test]
    fn worker_count_does_not_change_the_image() {
        let request = mandelbrot_request(ColorScheme::BlueToYellow.model(true));
        let single = render(&request, 1);
        for &threads in &[0, 3, 8] {
            assert_eq!(render(&request, threads), single);
        }
    }

    #[test]
    fn mandelbrot_overview_in_greyscale() {
        let request = mandelbrot_request(ColorModel::Greyscale);
        let buffer = render(&request, 4);
        assert_eq!(buffer.width(), 300);
        assert_eq!(buffer.height(), 300);

        // Inside the main cardioid.
        let origin = request.plane.point_to_pixel(&Complex::new(0.0, 0.0)).unwrap();
        assert_eq!(buffer.get(&origin), Some(INSIDE));

        // Top-left corner, -2 + 1.5i, escapes on its second check.
        let corner = buffer.get(&Pixel(0, 0)).unwrap();
        let c = request.plane.pixel_to_point(&Pixel(0, 0));
        assert_eq!(request.fractal.evaluate(c, 50), EscapeTime::Escaped(1));
        assert_eq!(corner, ColorModel::Greyscale.map(EscapeTime::Escaped(1), 50));
        assert!(corner.0[0] > 0);
        assert_eq!(corner.0[0], corner.0[1]);
        assert_eq!(corner.0[1], corner.0[2]);
    }

    #[test]
    fn julia_renders_symmetrically() {
        // With a real parameter, the Julia set is symmetric about the
        // real axis, and so is a viewport centred on it.
        let rect = Rect::from_extent(-2.0, -1.0, 4.0, 2.0).unwrap();
        let fractal = Fractal::Julia {
            threshold: 2.0,
            param: Complex::new(-0.75, 0.0),
        };
        let request = RenderRequest::new(fractal, ColorModel::Greyscale, rect, 100, 64);
        let buffer = render(&request, 3);
        assert_eq!(buffer.height(), 32);
        // Row r sits at 1 - r/16 and row 32 - r at -(1 - r/16), both exact.
        for col in 0..buffer.width() {
            for row in 1..16 {
                assert_eq!(buffer.get(&Pixel(col, row)), buffer.get(&Pixel(col, 32 - row)));
            }
        }
    }

    #[test]
    fn get_outside_the_grid_is_none() {
        let request = mandelbrot_request(ColorModel::Greyscale);
        let buffer = render(&request, 2);
        assert_eq!(buffer.get(&Pixel(300, 0)), None);
        assert_eq!(buffer.get(&Pixel(0, 300)), None);
    }
}
