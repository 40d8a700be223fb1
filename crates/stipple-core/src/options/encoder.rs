/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Options shared by encoders
///
/// - `idat_chunk_size`: maximum payload of a single png data chunk,
///   default 8192, respected by `png`
/// - `store_checksum`: whether zlib streams carry the adler32 trailer,
///   default true, respected by `png` and `inflate`
#[derive(Debug, Copy, Clone)]
pub struct EncoderOptions {
    idat_chunk_size: usize,
    store_checksum:  bool
}

impl Default for EncoderOptions {
    fn default() -> Self {
        EncoderOptions {
            idat_chunk_size: 8192,
            store_checksum:  true
        }
    }
}

impl EncoderOptions {
    /// Get the maximum number of bytes written into a single data chunk
    pub const fn get_idat_chunk_size(&self) -> usize {
        self.idat_chunk_size
    }

    /// Set the maximum number of bytes written into a single data chunk
    ///
    /// A value of zero is treated as one
    #[must_use]
    pub fn set_idat_chunk_size(mut self, size: usize) -> Self {
        self.idat_chunk_size = size.max(1);
        self
    }

    /// Whether encoders emit the adler32 trailer of zlib streams
    pub const fn get_store_checksum(&self) -> bool {
        self.store_checksum
    }

    /// Set whether encoders emit the adler32 trailer of zlib streams
    #[must_use]
    pub fn set_store_checksum(mut self, yes: bool) -> Self {
        self.store_checksum = yes;
        self
    }
}
