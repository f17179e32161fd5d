// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns escape times into pixels.  Every model here is a pure
//! function of the escape time, the iteration budget, and its own
//! fixed parameters, so the same inputs always give the same pixel.

use image::Rgba;
use num::clamp;
use std::str::FromStr;

use crate::errors::FractalError;
use crate::fractal::EscapeTime;

/// Points that never escape.
pub const INSIDE: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// A stretch of the color wheel, in degrees.  `end` may be below
/// `start`; the gradient then runs backwards around the wheel.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct HueRange {
    /// Hue of the fastest escapes.
    pub start: f64,
    /// Hue of the slowest escapes.
    pub end: f64,
}

/// Blue through cyan and green to yellow.
pub const BLUE_TO_YELLOW: HueRange = HueRange {
    start: 240.0,
    end: 60.0,
};

/// Red through orange and yellow to green.
pub const RED_TO_GREEN: HueRange = HueRange {
    start: 0.0,
    end: 120.0,
};

/// Saturation and value outside bold mode.
const SOFT_SATURATION: f64 = 0.75;
const SOFT_VALUE: f64 = 0.9;

/// The color models.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ColorModel {
    /// Black inside, then a linear ramp from dark to white.
    Greyscale,
    /// Black inside, then a walk along a stretch of the color wheel.
    Hue {
        /// Which stretch of the wheel.
        range: HueRange,
        /// Full saturation and value, with the gradient pulled towards
        /// the fast escapes.
        bold: bool,
    },
}

impl ColorModel {
    /// Colors one escape time.
    pub fn map(&self, result: EscapeTime, budget: usize) -> Rgba<u8> {
        let k = match result {
            EscapeTime::Bounded => return INSIDE,
            EscapeTime::Escaped(k) => k,
        };
        let t = escape_fraction(k, budget);
        match *self {
            ColorModel::Greyscale => {
                let level = channel(t);
                Rgba([level, level, level, 255])
            }
            ColorModel::Hue { range, bold } => {
                let (t, saturation, value) = if bold {
                    (t.sqrt(), 1.0, 1.0)
                } else {
                    (t, SOFT_SATURATION, SOFT_VALUE)
                };
                let hue = range.start + (range.end - range.start) * t;
                hsv_to_rgb(hue, saturation, value)
            }
        }
    }
}

/// Where an escape at `k` falls in (0, 1].  Counting from one keeps
/// an escape at zero distinct from the black inside.
fn escape_fraction(k: usize, budget: usize) -> f64 {
    if budget == 0 {
        return 1.0;
    }
    clamp((k + 1) as f64 / budget as f64, 0.0, 1.0)
}

fn channel(v: f64) -> u8 {
    clamp((v * 255.0).round(), 0.0, 255.0) as u8
}

/// Hue in degrees (any value, wrapped onto the wheel), saturation and
/// value in [0, 1].
pub fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> Rgba<u8> {
    let h = hue.rem_euclid(360.0);
    let c = value * saturation;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = value - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgba([channel(r + m), channel(g + m), channel(b + m), 255])
}

/// The color schemes that can be named on the command line.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ColorScheme {
    /// `greyscale`
    Greyscale,
    /// `blue-to-yellow`
    BlueToYellow,
    /// `red-to-green`
    RedToGreen,
}

impl ColorScheme {
    /// The model for this scheme.  Bold mode has no effect on greyscale.
    pub fn model(self, bold: bool) -> ColorModel {
        match self {
            ColorScheme::Greyscale => ColorModel::Greyscale,
            ColorScheme::BlueToYellow => ColorModel::Hue {
                range: BLUE_TO_YELLOW,
                bold,
            },
            ColorScheme::RedToGreen => ColorModel::Hue {
                range: RED_TO_GREEN,
                bold,
            },
        }
    }
}

impl FromStr for ColorScheme {
    type Err = FractalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greyscale" => Ok(ColorScheme::Greyscale),
            "blue-to-yellow" => Ok(ColorScheme::BlueToYellow),
            "red-to-green" => Ok(ColorScheme::RedToGreen),
            _ => Err(FractalError::UnknownColorScheme(s.to_string())),
        }
    }
}
