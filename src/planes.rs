// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the PlaneMapper struct, which describes a relationship
//! between a grid of pixels with an origin at the top-left corner,
//! and a rectangle on the complex plane defined by its leftlower and
//! rightupper corners.
use num::Complex;

use crate::errors::FractalError;

/// An x, y location in fractal space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Point {
    /// The real component.
    pub x: f64,
    /// The imaginary component.
    pub y: f64,
}

impl Point {
    /// Constructor.
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

impl From<Point> for Complex<f64> {
    fn from(p: Point) -> Self {
        Complex::new(p.x, p.y)
    }
}

/// The viewport in fractal space.  The right-upper corner is always
/// strictly to the right of, and above, the left-lower corner.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    bottom_left: Point,
    top_right: Point,
}

impl Rect {
    /// Checks the shape of the rectangle before handing it out.
    pub fn new(bottom_left: Point, top_right: Point) -> Result<Rect, FractalError> {
        if !(top_right.x > bottom_left.x) {
            return Err(FractalError::InvalidBounds(
                "The left lower corner is not to the left of the right upper corner".to_string(),
            ));
        }

        if !(top_right.y > bottom_left.y) {
            return Err(FractalError::InvalidBounds(
                "The left lower corner is not lower than the right upper corner".to_string(),
            ));
        }

        Ok(Rect {
            bottom_left,
            top_right,
        })
    }

    /// Builds the rectangle the command line describes: a corner plus
    /// an extent in each direction.
    pub fn from_extent(left: f64, bottom: f64, width: f64, height: f64) -> Result<Rect, FractalError> {
        Rect::new(
            Point::new(left, bottom),
            Point::new(left + width, bottom + height),
        )
    }

    /// Left-lower corner.
    pub fn bottom_left(&self) -> Point {
        self.bottom_left
    }

    /// Right-upper corner.
    pub fn top_right(&self) -> Point {
        self.top_right
    }

    /// Extent along the real axis.
    pub fn width(&self) -> f64 {
        self.top_right.x - self.bottom_left.x
    }

    /// Extent along the imaginary axis.
    pub fn height(&self) -> f64 {
        self.top_right.y - self.bottom_left.y
    }
}

/// Column and row of a pixel, counted from the top-left of the image.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The largest grid we will allocate: one RGBA pixel per slot must
/// still be addressable in bytes.
const MAX_PIXELS: usize = isize::MAX as usize / 4;

/// Maps the pixel grid of the output image onto the fractal-space
/// viewport.  Pixels are square: one pixel size serves both axes, and
/// the image height falls out of the rectangle's aspect ratio.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    /// The viewport.
    pub rect: Rect,
    /// Plane units per pixel.
    pub pixel_size: f64,
    width: usize,
    height: usize,
}

impl PlaneMapper {
    /// Derives the pixel size from the viewport width and the number
    /// of pixel columns requested.  A zero width gives an empty grid, as
    /// does a viewport whose pixel count would not fit in memory.
    pub fn new(rect: Rect, image_width: usize) -> PlaneMapper {
        let pixel_size = rect.width() / (image_width as f64);
        let rows = (rect.height() / pixel_size).round();
        // `as` saturates, so a NaN or negative quotient becomes zero rows.
        let height = if rows.is_finite() { rows as usize } else { 0 };
        let (width, height) = match image_width.checked_mul(height) {
            Some(len) if len > 0 && len <= MAX_PIXELS => (image_width, height),
            _ => (0, 0),
        };
        PlaneMapper {
            rect,
            pixel_size,
            width,
            height,
        }
    }

    /// Pixel columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Pixel rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Given a pixel on the image grid, return the point on the complex
    /// plane under its top-left corner.  Row zero is the top edge of the
    /// viewport, so the imaginary part falls as the row grows.
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.rect.bottom_left.x + (pixel.0 as f64) * self.pixel_size,
            self.rect.top_right.y - (pixel.1 as f64) * self.pixel_size,
        )
    }

    /// The nearest pixel to a point on the complex plane, if that point
    /// lands inside the grid.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Option<Pixel> {
        let left = ((point.re - self.rect.bottom_left.x) / self.pixel_size).round();
        let top = ((self.rect.top_right.y - point.im) / self.pixel_size).round();
        if left < 0.0 || top < 0.0 || left >= self.width as f64 || top >= self.height as f64 {
            return None;
        }
        Some(Pixel(left as usize, top as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn rect_fails_on_bad_shape() {
        let r = Rect::new(Point::new(-1.0, 1.0), Point::new(1.0, -1.0));
        assert!(r.is_err());
        let r = Rect::new(Point::new(1.0, -1.0), Point::new(-1.0, 1.0));
        assert!(r.is_err());
        let r = Rect::from_extent(0.0, 0.0, 0.0, 1.0);
        assert!(r.is_err());
    }

    #[test]
    fn rect_passes_on_good_shape() {
        let r = Rect::new(Point::new(-1.0, -1.0), Point::new(1.0, 1.0));
        assert!(r.is_ok());
    }

    #[test]
    fn image_height_follows_aspect_ratio() {
        let r = Rect::from_extent(-2.0, -1.0, 3.0, 2.0).unwrap();
        let pm = PlaneMapper::new(r, 300);
        assert_eq!(pm.width(), 300);
        assert_eq!(pm.height(), 200);
        assert_eq!(pm.len(), 60_000);
        assert!(close(pm.pixel_size, 0.01, 1e-12));
    }

    #[test]
    fn image_height_rounds_to_whole_pixels() {
        let r = Rect::from_extent(0.0, 0.0, 1.0, 0.3333).unwrap();
        let pm = PlaneMapper::new(r, 10);
        assert_eq!(pm.height(), 3);
    }

    #[test]
    fn zero_width_gives_empty_grid() {
        let r = Rect::from_extent(0.0, 0.0, 1.0, 1.0).unwrap();
        let pm = PlaneMapper::new(r, 0);
        assert!(pm.is_empty());
        assert_eq!(pm.len(), 0);
    }

    #[test]
    fn unaddressable_grids_are_empty() {
        for &height in &[1e300, std::f64::INFINITY] {
            let r = Rect::from_extent(0.0, 0.0, 1.0, height).unwrap();
            let pm = PlaneMapper::new(r, 1000);
            assert!(pm.is_empty());
            assert_eq!((pm.width(), pm.height()), (0, 0));
        }
        let r = Rect::from_extent(0.0, 0.0, std::f64::INFINITY, 1.0).unwrap();
        assert!(PlaneMapper::new(r, 1000).is_empty());
    }

    #[test]
    fn corners_are_read_only() {
        let r = Rect::from_extent(-2.0, -1.0, 3.0, 2.0).unwrap();
        assert_eq!(r.bottom_left(), Point::new(-2.0, -1.0));
        assert_eq!(r.top_right(), Point::new(1.0, 1.0));
        assert_eq!(r.width(), 3.0);
        assert_eq!(r.height(), 2.0);
    }

    #[test]
    fn pixel_to_point_on_positive_planes() {
        let r = Rect::new(Point::new(0.0, 0.0), Point::new(5.0, 5.0)).unwrap();
        let pm = PlaneMapper::new(r, 5);
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(0.0, 5.0));
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(2.0, 3.0));
        assert_eq!(pm.pixel_to_point(&Pixel(4, 4)), Complex::new(4.0, 1.0));
    }

    #[test]
    fn pixel_to_points_on_mixed_planes() {
        let r = Rect::new(Point::new(-2.0, -2.0), Point::new(2.0, 2.0)).unwrap();
        let pm = PlaneMapper::new(r, 4);
        assert_eq!(pm.pixel_to_point(&Pixel(2, 2)), Complex::new(0.0, 0.0));
        assert_eq!(pm.pixel_to_point(&Pixel(0, 0)), Complex::new(-2.0, 2.0));
        assert_eq!(pm.pixel_to_point(&Pixel(3, 1)), Complex::new(1.0, 1.0));
    }

    #[test]
    fn corners_land_within_one_pixel() {
        let r = Rect::from_extent(-2.0, -1.5, 3.0, 3.0).unwrap();
        let pm = PlaneMapper::new(r, 300);
        let tolerance = pm.pixel_size + 1e-9;

        let first = pm.pixel_to_point(&Pixel(0, 0));
        assert!(close(first.re, -2.0, tolerance));
        assert!(close(first.im, 1.5, tolerance));

        let last = pm.pixel_to_point(&Pixel(pm.width() - 1, pm.height() - 1));
        assert!(close(last.re, 1.0, tolerance));
        assert!(close(last.im, -1.5, tolerance));
    }

    #[test]
    fn point_to_pixel_on_mixed_planes() {
        let r = Rect::new(Point::new(-2.0, -2.0), Point::new(2.0, 2.0)).unwrap();
        let pm = PlaneMapper::new(r, 640);
        assert_eq!(pm.point_to_pixel(&Complex::new(0.0, 0.0)), Some(Pixel(320, 320)));
        assert_eq!(pm.point_to_pixel(&Complex::new(-2.0, 2.0)), Some(Pixel(0, 0)));
        assert_eq!(pm.point_to_pixel(&Complex::new(1.0, 1.0)), Some(Pixel(480, 160)));
        assert_eq!(pm.point_to_pixel(&Complex::new(2.0, -2.0)), None);
        assert_eq!(pm.point_to_pixel(&Complex::new(-3.0, 0.0)), None);
    }

    #[test]
    fn point_to_pixel_inverts_pixel_to_point() {
        let r = Rect::from_extent(-0.75, 0.1, 0.5, 0.25).unwrap();
        let pm = PlaneMapper::new(r, 64);
        for &(col, row) in &[(0, 0), (13, 7), (63, 31)] {
            let p = Pixel(col, row);
            assert_eq!(pm.point_to_pixel(&pm.pixel_to_point(&p)), Some(p));
        }
    }
}
