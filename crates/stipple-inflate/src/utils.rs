/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use crate::errors::DecodeErrorStatus;

/// Calculate the adler32 hash of `data`
#[cfg(feature = "zlib")]
pub(crate) fn calc_adler_hash(data: &[u8]) -> u32 {
    let mut hasher = simd_adler32::Adler32::new();
    hasher.write(data);
    hasher.finish()
}

/// Copy `length` bytes starting `distance` bytes behind the end of
/// `out` to the end of `out`.
///
/// When `distance < length` the source and destination overlap and
/// bytes written by this copy are read again, e.g a distance of 1
/// repeats the last byte `length` times.
#[inline]
pub(crate) fn copy_rep_matches(
    out: &mut Vec<u8>, distance: usize, length: usize
) -> Result<(), DecodeErrorStatus> {
    if distance == 0 || distance > out.len() {
        return Err(DecodeErrorStatus::InvalidDistanceCode);
    }
    let start = out.len() - distance;

    if distance >= length {
        // no overlap, copy in one go
        out.extend_from_within(start..start + length);
    } else {
        for i in 0..length {
            let byte = out[start + i];
            out.push(byte);
        }
    }
    Ok(())
}
