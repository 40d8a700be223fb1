/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible when decoding deflate/zlib streams
use core::fmt::{Debug, Display, Formatter};

use stipple_core::bytestream::ByteIoError;

/// Reasons a deflate or zlib stream could not be decoded
///
/// Every error is terminal, the decoder does not return
/// the bytes decoded before the failure.
#[derive(Copy, Clone, PartialEq, Eq)]
pub enum DecodeErrorStatus {
    /// The stream ended before the final block did
    OutOfData,
    /// A block header carried the reserved block type `11`
    InvalidBlockType,
    /// A set of code lengths did not describe a usable code, or
    /// the bits read did not match any code in the table
    InvalidHuffmanCode,
    /// A literal/length symbol outside the defined range
    InvalidLengthCode,
    /// A distance symbol outside the defined range, or a distance
    /// reaching before the start of the output
    InvalidDistanceCode,
    /// A stored block whose `LEN` is not the complement of `NLEN`
    LenNlenMismatch,
    /// The two byte zlib header is not one we can decode
    UnsupportedZlibHeader,
    /// Expected and found adler32 checksums
    MismatchedAdler(u32, u32),
    /// Configured limit and the size the output would have grown to
    OutputLimitExceeded(usize, usize)
}

impl Debug for DecodeErrorStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfData => writeln!(f, "Insufficient data, stream ended before the last block"),
            Self::InvalidBlockType => writeln!(f, "Invalid deflate block type 3"),
            Self::InvalidHuffmanCode => writeln!(f, "Invalid huffman code"),
            Self::InvalidLengthCode => writeln!(f, "Invalid literal/length code"),
            Self::InvalidDistanceCode => writeln!(f, "Invalid distance code"),
            Self::LenNlenMismatch => {
                writeln!(f, "Stored block LEN is not the one's complement of NLEN")
            }
            Self::UnsupportedZlibHeader => writeln!(f, "Unsupported zlib header"),
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

impl Display for DecodeErrorStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeErrorStatus {}

impl From<ByteIoError> for DecodeErrorStatus {
    fn from(_: ByteIoError) -> Self {
        DecodeErrorStatus::OutOfData
    }
}
