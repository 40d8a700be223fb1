/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during png decoding

use alloc::string::String;
use core::fmt::{Debug, Display, Formatter};

use stipple_core::bytestream::ByteIoError;
use stipple_inflate::errors::DecodeErrorStatus;

/// Errors possible during decoding
///
/// Every error ends the decode, no partial image is returned
#[derive(Clone, PartialEq, Eq)]
pub enum PngDecodeErrors {
    /// The first eight bytes are not the png signature
    BadSignature,
    /// A valid png we do not decode, e.g palette images or 16 bit depths
    UnsupportedFormat(String),
    UnsupportedZlibHeader,
    InvalidBlockType,
    InvalidHuffmanCode,
    InvalidLengthCode,
    InvalidDistanceCode,
    LenNlenMismatch,
    /// A scanline filter byte outside 0..=4
    InvalidFilterType(u8),
    /// Chunk name, stored crc and calculated crc
    ChunkCrcMismatch([u8; 4], u32, u32),
    /// The data ended before the image did
    OutOfData,
    /// A chunk in the wrong place or with an impossible length
    CorruptChunk(&'static str),
    /// A critical chunk we do not know how to handle
    UnknownCriticalChunk([u8; 4]),
    /// Width and height of the image
    DimensionsTooLarge(usize, usize),
    /// Expected and found pixel buffer length
    DimensionMismatch(usize, usize),
    /// Expected and found adler32
    MismatchedAdler(u32, u32),
    /// Configured limit and the size the output would have grown to
    OutputLimitExceeded(usize, usize)
}

impl Debug for PngDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BadSignature => writeln!(f, "Bad PNG signature, not a png"),
            Self::UnsupportedFormat(reason) => writeln!(f, "Unsupported png: {reason}"),
            Self::UnsupportedZlibHeader => writeln!(f, "Unsupported zlib header"),
            Self::InvalidBlockType => writeln!(f, "Invalid deflate block type"),
            Self::InvalidHuffmanCode => writeln!(f, "Invalid huffman code"),
            Self::InvalidLengthCode => writeln!(f, "Invalid literal/length code"),
            Self::InvalidDistanceCode => writeln!(f, "Invalid distance code"),
            Self::LenNlenMismatch => writeln!(f, "Stored block LEN and NLEN do not match"),
            Self::InvalidFilterType(filter) => writeln!(f, "Unknown filter type {filter}"),
            Self::ChunkCrcMismatch(name, expected, found) => writeln!(
                f,
                "CRC does not match for chunk {}, expected {expected:#010X} but found {found:#010X}",
                String::from_utf8_lossy(name)
            ),
            Self::OutOfData => writeln!(f, "Not enough data, the png ended early"),
            Self::CorruptChunk(reason) => writeln!(f, "Corrupt png: {reason}"),
            Self::UnknownCriticalChunk(name) => writeln!(
                f,
                "Marker {} unknown but deemed necessary",
                String::from_utf8_lossy(name)
            ),
            Self::DimensionsTooLarge(width, height) => {
                writeln!(f, "Image dimensions {width}x{height} are too large")
            }
            Self::DimensionMismatch(expected, found) => writeln!(
                f,
                "Pixel buffer length mismatch, expected {expected} bytes but found {found}"
            ),
            Self::MismatchedAdler(expected, found) => {
                writeln!(f, "Mismatched Adler, expected {expected} but found {found}")
            }
            Self::OutputLimitExceeded(limit, current) => writeln!(
                f,
                "Output limit exceeded, set limit was {limit} and output size is {current}"
            )
        }
    }
}

impl Display for PngDecodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PngDecodeErrors {}

impl From<DecodeErrorStatus> for PngDecodeErrors {
    fn from(err: DecodeErrorStatus) -> Self {
        match err {
            DecodeErrorStatus::OutOfData => Self::OutOfData,
            DecodeErrorStatus::InvalidBlockType => Self::InvalidBlockType,
            DecodeErrorStatus::InvalidHuffmanCode => Self::InvalidHuffmanCode,
            DecodeErrorStatus::InvalidLengthCode => Self::InvalidLengthCode,
            DecodeErrorStatus::InvalidDistanceCode => Self::InvalidDistanceCode,
            DecodeErrorStatus::LenNlenMismatch => Self::LenNlenMismatch,
            DecodeErrorStatus::UnsupportedZlibHeader => Self::UnsupportedZlibHeader,
            DecodeErrorStatus::MismatchedAdler(expected, found) => {
                Self::MismatchedAdler(expected, found)
            }
            DecodeErrorStatus::OutputLimitExceeded(limit, current) => {
                Self::OutputLimitExceeded(limit, current)
            }
        }
    }
}

impl From<ByteIoError> for PngDecodeErrors {
    fn from(_: ByteIoError) -> Self {
        Self::OutOfData
    }
}
