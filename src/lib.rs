#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Escape-time fractal renderer
//!
//! The Mandelbrot and Julia sets are both built by taking a point on
//! the complex plane and repeatedly squaring it and adding a constant,
//! measuring how quickly the result runs off to infinity.  For the
//! Mandelbrot set the constant is the point itself; for a Julia set
//! it is a fixed parameter.  The number of iterations a point survives
//! (its "escape time") is what gets colored.
//!
//! Points that never escape within the iteration budget are taken to
//! be inside the set and are painted black.
//!
//! A render is a single batch: a `Config` becomes a `RenderRequest`,
//! the renderer fills a `PixelBuffer` using every worker it is given,
//! and the buffer is written out as a PNG.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
#[macro_use]
extern crate log;
extern crate num;
extern crate num_cpus;

pub mod color;
pub mod config;
pub mod encode;
pub mod errors;
pub mod fractal;
pub mod planes;
pub mod render;

pub use color::{ColorModel, ColorScheme};
pub use config::Config;
pub use encode::write_png;
pub use errors::FractalError;
pub use fractal::{EscapeTime, Fractal, FractalKind};
pub use planes::{Pixel, PlaneMapper, Point, Rect};
pub use render::{render, PixelBuffer, RenderRequest};
