// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The user-facing knobs, with their defaults, gathered in one place.
//! A `Config` is built once at the command line and turned into a
//! `RenderRequest`; nothing else in the crate reads defaults.

use num::Complex;
use std::str::FromStr;

use crate::color::ColorScheme;
use crate::errors::FractalError;
use crate::fractal::{Fractal, FractalKind};
use crate::planes::Rect;
use crate::render::RenderRequest;

/// Every user-selectable value for a render.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// `mandelbrot` or `julia`.
    pub fractal: String,
    /// Left edge of the viewport.
    pub left: f64,
    /// Bottom edge of the viewport.
    pub bottom: f64,
    /// Viewport extent along the real axis.
    pub width: f64,
    /// Viewport extent along the imaginary axis.
    pub height: f64,
    /// Escape radius.
    pub threshold: f64,
    /// The Julia constant, as `<real><sign><imag>i`.  Ignored for the
    /// Mandelbrot set.
    pub param: String,
    /// Iteration budget.
    pub iterations: usize,
    /// Output image width in pixels.
    pub image_width: usize,
    /// Color scheme name.
    pub colors: String,
    /// Bold mode for the hue gradients.
    pub bold: bool,
    /// Worker count hint.
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            fractal: "mandelbrot".to_string(),
            left: 0.0,
            bottom: 0.0,
            width: 1.0,
            height: 1.0,
            threshold: 1000.0,
            param: "0+0i".to_string(),
            iterations: 100,
            image_width: 1000,
            colors: "blue-to-yellow".to_string(),
            bold: false,
            threads: num_cpus::get(),
        }
    }
}

impl Config {
    /// Checks every name and number, and assembles the request.
    /// Nothing is rendered here.
    pub fn request(&self) -> Result<RenderRequest, FractalError> {
        let fractal = match self.fractal.parse::<FractalKind>()? {
            FractalKind::Mandelbrot => Fractal::Mandelbrot {
                threshold: self.threshold,
            },
            FractalKind::Julia => Fractal::Julia {
                threshold: self.threshold,
                param: parse_complex(&self.param)?,
            },
        };
        let model = self.colors.parse::<ColorScheme>()?.model(self.bold);
        let rect = Rect::from_extent(self.left, self.bottom, self.width, self.height)?;
        Ok(RenderRequest::new(
            fractal,
            model,
            rect,
            self.iterations,
            self.image_width,
        ))
    }
}

/// Parses `<real><sign><imag>i`, e.g. `-0.8+0.156i` or `1e-3-2i`.
pub fn parse_complex(s: &str) -> Result<Complex<f64>, FractalError> {
    let malformed = || FractalError::MalformedParam(s.to_string());
    let trimmed = s.trim();
    if !trimmed.ends_with('i') {
        return Err(malformed());
    }
    let body = &trimmed[..trimmed.len() - 1];

    // The separating sign is the last one that neither leads the
    // string nor belongs to an exponent.
    let bytes = body.as_bytes();
    let split = (1..bytes.len())
        .rev()
        .find(|&i| {
            (bytes[i] == b'+' || bytes[i] == b'-') && bytes[i - 1] != b'e' && bytes[i - 1] != b'E'
        })
        .ok_or_else(malformed)?;

    let re = f64::from_str(&body[..split]).map_err(|_| malformed())?;
    let im = f64::from_str(&body[split..]).map_err(|_| malformed())?;
    Ok(Complex::new(re, im))
}
