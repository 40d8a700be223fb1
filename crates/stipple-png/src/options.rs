/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::{trace, warn};
use stipple_core::bytestream::ByteReader;

use crate::error::PngDecodeErrors;

/// Called for every chunk the decoder doesn't act on itself
///
/// The reader points to the start of the chunk data, a handler must
/// consume the data and the 4 byte crc that follows it.
///
/// `strict` is true when the decoder is configured to reject unknown
/// critical chunks.
pub type UnknownChunkHandler = fn(
    length: usize,
    chunk_type: [u8; 4],
    reader: &mut ByteReader,
    strict: bool
) -> Result<(), PngDecodeErrors>;

/// Skip ancillary chunks, and critical ones unless `strict` is set
///
/// A `PLTE` chunk is always skipped, RGBA images may carry one
/// as a suggested palette.
pub fn default_chunk_handler(
    length: usize, chunk_type: [u8; 4], reader: &mut ByteReader, strict: bool
) -> Result<(), PngDecodeErrors> {
    let chunk_name = core::str::from_utf8(&chunk_type).unwrap_or("XXXX");

    // bit 5 of the first byte clear means the chunk is critical
    let is_critical = chunk_type[0] & (1 << 5) == 0;

    if is_critical && &chunk_type != b"PLTE" {
        if strict {
            return Err(PngDecodeErrors::UnknownCriticalChunk(chunk_type));
        }
        warn!("Skipping unknown critical chunk {chunk_name}");
    }

    trace!("Encountered unknown chunk {:?}", chunk_name);
    trace!("Length of chunk {}", length);
    trace!("Skipping {} bytes", length + 4);

    reader.skip(length.saturating_add(4))?;

    Ok(())
}
