/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A png decoder and encoder for 8 bit RGBA images
//!
//! This features a small PNG reader and writer restricted to colour type 6
//! (RGBA) at a bit depth of 8, with no interlacing. Other valid pngs are
//! rejected with [`PngDecodeErrors::UnsupportedFormat`].
//!
//! # Features
//! - Inflate and CRC32 written from scratch, no external compression library
//! - All five scanline filters
//! - Configurable checks via [`DecoderOptions`](stipple_core::options::DecoderOptions)
//!
//! # Usage
//! Add the library to `Cargo.toml`
//!
//! ```toml
//! stipple_png="0.1"
//! ```
//!
//! #### Decode and encode
//!
//! The simplest API is a pair of functions
//!
//! ```
//! use stipple_png::RgbaImage;
//!
//! let image = RgbaImage::new(2, 1, vec![255, 0, 0, 255, 0, 255, 0, 255]).unwrap();
//!
//! let png = stipple_png::encode(&image);
//! let decoded = stipple_png::decode(&png).unwrap();
//!
//! assert_eq!(image, decoded);
//! ```
//!
//! #### Configuring the decoder
//!
//!```no_run
//! use stipple_png::PngDecoder;
//! use stipple_png::stipple_core::options::DecoderOptions;
//!
//! let options = DecoderOptions::default()
//!     .set_max_width(1024)
//!     .png_set_confirm_crc(false);
//!
//! let mut decoder = PngDecoder::new_with_options(&[], options);
//!
//! let pixels = decoder.decode_raw();
//! ```
//!
//! # Extracting metadata
//!
//! Once headers have been decoded, image metadata can be accessed via [`get_info()`](PngDecoder::get_info) method
//!
//! # Alternatives
//! - [png](https://crates.io/crates/png) crate
//!
#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::op_ref, clippy::identity_op)]
extern crate alloc;

use alloc::vec::Vec;

pub use crc::crc32;
pub use decoder::{PngDecoder, PngInfo};
pub use encoder::PngEncoder;
pub use enums::{FilterMethod, InterlaceMethod, PngColor};
pub use error::PngDecodeErrors;
pub use image::RgbaImage;
pub use options::{default_chunk_handler, UnknownChunkHandler};
pub use stipple_core;

mod constants;
mod crc;
mod decoder;
mod encoder;
mod enums;
pub mod error;
mod filters;
mod headers;
mod image;
mod options;

/// Decode a png file into an RGBA image using default options
pub fn decode(png_bytes: &[u8]) -> Result<RgbaImage, PngDecodeErrors> {
    PngDecoder::new(png_bytes).decode()
}

/// Encode an RGBA image into a png file using default options
pub fn encode(image: &RgbaImage) -> Vec<u8> {
    PngEncoder::new(image).encode()
}
