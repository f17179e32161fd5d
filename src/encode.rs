// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Writes a finished pixel buffer out as a PNG.

use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder};
use std::convert::TryFrom;
use std::io::Write;

use crate::errors::FractalError;
use crate::render::PixelBuffer;

/// PNG dimensions are 32-bit.
fn image_dimensions(width: usize, height: usize) -> Result<(u32, u32), FractalError> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(FractalError::ImageTooLarge(width, height)),
    }
}

/// Encodes the buffer as an 8-bit RGBA PNG onto `output`.
pub fn write_png<W: Write>(buffer: &PixelBuffer, output: W) -> Result<(), FractalError> {
    let (width, height) = image_dimensions(buffer.width(), buffer.height())?;
    let encoder = PngEncoder::new(output);
    encoder.write_image(&buffer.to_bytes(), width, height, ColorType::Rgba8)?;
    Ok(())
}
