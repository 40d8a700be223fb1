/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::string::ToString;
use alloc::vec::Vec;

use crate::constants::RGBA_COMPONENTS;
use crate::error::PngDecodeErrors;

/// An 8 bit RGBA image
///
/// Pixels are stored row major, top row first, four bytes
/// per pixel in R, G, B, A order.
///
/// The length of the pixel buffer always matches `width * height * 4`
/// and both dimensions are non-zero, hence every image can be encoded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaImage {
    width:  usize,
    height: usize,
    pixels: Vec<u8>
}

impl RgbaImage {
    /// Create a new image from its dimensions and pixels
    ///
    /// # Errors
    /// - `UnsupportedFormat` if either dimension is zero
    /// - `DimensionsTooLarge` if the dimensions don't fit a png header
    /// - `DimensionMismatch` if `pixels.len() != width * height * 4`
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Result<RgbaImage, PngDecodeErrors> {
        if width == 0 || height == 0 {
            return Err(PngDecodeErrors::UnsupportedFormat(
                "Width or height cannot be zero".to_string()
            ));
        }
        if u32::try_from(width).is_err() || u32::try_from(height).is_err() {
            return Err(PngDecodeErrors::DimensionsTooLarge(width, height));
        }
        let expected = width
            .checked_mul(height)
            .and_then(|x| x.checked_mul(RGBA_COMPONENTS))
            .ok_or(PngDecodeErrors::DimensionsTooLarge(width, height))?;

        if pixels.len() != expected {
            return Err(PngDecodeErrors::DimensionMismatch(expected, pixels.len()));
        }
        Ok(RgbaImage {
            width,
            height,
            pixels
        })
    }

    pub const fn width(&self) -> usize {
        self.width
    }

    pub const fn height(&self) -> usize {
        self.height
    }

    /// Return the raw RGBA bytes
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Return pixels grouped as `[r, g, b, a]`
    pub fn as_rgba(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(&self.pixels)
    }
}
