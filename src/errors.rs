// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Everything that can go wrong between the command line and the
//! encoded image.  The first four are caught before any rendering
//! starts; the last three only once the image is being written out.

use std::io;

/// The error type for the whole crate.
#[derive(Debug, Fail)]
pub enum FractalError {
    /// The fractal named on the command line is not one we know.
    #[fail(display = "Unknown fractal type: {}; options are mandelbrot, julia", _0)]
    UnknownFractal(String),

    /// The color scheme named on the command line is not one we know.
    #[fail(
        display = "Unknown colors: {}; options are greyscale, blue-to-yellow, red-to-green",
        _0
    )]
    UnknownColorScheme(String),

    /// The Julia parameter is not of the form `<real><sign><imag>i`.
    #[fail(display = "Invalid complex format: {}", _0)]
    MalformedParam(String),

    /// The viewport is empty or inside out.
    #[fail(display = "Invalid bounds: {}", _0)]
    InvalidBounds(String),

    /// The image is wider or taller than the encoder can describe.
    #[fail(display = "Image of {}x{} pixels is too large to encode", _0, _1)]
    ImageTooLarge(usize, usize),

    /// The encoder refused the pixel buffer.
    #[fail(display = "{}", _0)]
    Encode(#[cause] image::ImageError),

    /// Writing the encoded image failed.
    #[fail(display = "{}", _0)]
    Io(#[cause] io::Error),
}

impl FractalError {
    /// True for the errors that come from bad user input, as opposed
    /// to failures writing the output.
    pub fn is_config(&self) -> bool {
        match self {
            FractalError::UnknownFractal(_)
            | FractalError::UnknownColorScheme(_)
            | FractalError::MalformedParam(_)
            | FractalError::InvalidBounds(_) => true,
            FractalError::ImageTooLarge(..) | FractalError::Encode(_) | FractalError::Io(_) => {
                false
            }
        }
    }
}

impl From<image::ImageError> for FractalError {
    fn from(err: image::ImageError) -> Self {
        FractalError::Encode(err)
    }
}

impl From<io::Error> for FractalError {
    fn from(err: io::Error) -> Self {
        FractalError::Io(err)
    }
}
