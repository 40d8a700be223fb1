/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A small deflate decoder and stored-block encoder.
//!
//! The decoder implements all three deflate block types (stored, fixed
//! and dynamic huffman) with a canonical huffman decoder that reads one
//! bit at a time. It favours being small and easy to follow over speed.
//!
//! The encoder never compresses, it wraps its input in stored blocks,
//! which is enough to produce streams any inflater can read.
//!
//! # Usage
//!
//! Decoding deflate data
//!
//! ```no_run
//! use stipple_inflate::DeflateDecoder;
//! let totally_valid_data = [0; 23];
//! let mut decoder = DeflateDecoder::new(&totally_valid_data);
//!
//! let decompressed = decoder.decode_deflate();
//! ```
//!
//! Decoding zlib data, confirming the adler32 checksum
//! ```no_run
//! use stipple_inflate::{DeflateDecoder, DeflateOptions};
//! let totally_valid_data = [0; 23];
//! let options = DeflateOptions::default().set_confirm_checksum(true);
//! let mut decoder = DeflateDecoder::new_with_options(&totally_valid_data, options);
//!
//! let decompressed = decoder.decode_zlib();
//! ```
//!
//! Encoding
//! ```
//! use stipple_inflate::{DeflateDecoder, DeflateEncoder};
//! let data = b"hello hello hello";
//! let encoded = DeflateEncoder::new(data).encode_zlib();
//!
//! let decoded = DeflateDecoder::new(&encoded).decode_zlib().unwrap();
//! assert_eq!(&decoded, data);
//! ```
//!
//! # Features
//! - `zlib`: Enables zlib wrapping and unwrapping, pulls in `simd-adler32`
//! - `std`: Implements `std::error::Error` for the error types
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub use crate::decoder::{DeflateDecoder, DeflateOptions};
pub use crate::encoder::{DeflateEncoder, DeflateEncodingOptions, DeflateEncodingStrategy};

pub mod bitstream;
mod constants;
mod decoder;
mod encoder;
pub mod errors;
pub mod huffman;
mod utils;
