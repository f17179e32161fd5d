// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time rules.  Both the Mandelbrot and the Julia sets
//! iterate z -> z² + k and measure how long z takes to get away from
//! the origin; they differ only in where z starts and what k is.

use num::Complex;
use std::str::FromStr;

use crate::errors::FractalError;

/// The outcome of iterating a single point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EscapeTime {
    /// The orbit crossed the threshold on this iteration.
    Escaped(usize),
    /// The orbit stayed inside the threshold for the whole budget.
    Bounded,
}

/// The fractal rules we know how to evaluate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Fractal {
    /// z starts at the pixel and k is the pixel.
    Mandelbrot {
        /// Escape radius.
        threshold: f64,
    },
    /// z starts at the pixel and k is a fixed parameter.
    Julia {
        /// Escape radius.
        threshold: f64,
        /// The constant added on every iteration.
        param: Complex<f64>,
    },
}

impl Fractal {
    /// Iterates the point `c` at most `budget` times.
    pub fn evaluate(&self, c: Complex<f64>, budget: usize) -> EscapeTime {
        match *self {
            Fractal::Mandelbrot { threshold } => escape_time(c, c, budget, threshold),
            Fractal::Julia { threshold, param } => escape_time(c, param, budget, threshold),
        }
    }

    /// The escape radius of either variant.
    pub fn threshold(&self) -> f64 {
        match *self {
            Fractal::Mandelbrot { threshold } | Fractal::Julia { threshold, .. } => threshold,
        }
    }
}

/// Our classic iterator function.  The orbit is checked before each
/// step, so a starting value already past the threshold escapes at
/// zero.  Comparisons are made on the squared magnitude.
pub fn escape_time(start: Complex<f64>, k: Complex<f64>, budget: usize, threshold: f64) -> EscapeTime {
    let limit = threshold * threshold;
    let mut z = start;
    for i in 0..budget {
        if z.norm_sqr() > limit {
            return EscapeTime::Escaped(i);
        }
        z = z * z + k;
    }
    EscapeTime::Bounded
}

/// The names a fractal can be asked for by.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FractalKind {
    /// `mandelbrot`
    Mandelbrot,
    /// `julia`
    Julia,
}

impl FromStr for FractalKind {
    type Err = FractalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mandelbrot" => Ok(FractalKind::Mandelbrot),
            "julia" => Ok(FractalKind::Julia),
            _ => Err(FractalError::UnknownFractal(s.to_string())),
        }
    }
}
