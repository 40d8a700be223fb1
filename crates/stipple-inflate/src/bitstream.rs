/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! `BitStreamReader` API
//!
//! This module provides an interface to read bits (and whole bytes)
//! from a deflate stream.
//!
//! Deflate packs data elements starting at the least significant bit
//! of each byte, so bits are handed out LSB first.

use crate::errors::DecodeErrorStatus;

pub struct BitStreamReader<'src> {
    // buffer from which we are pulling in bits from
    // used in decompression.
    src:       &'src [u8],
    // position of the next byte to be moved into the bit buffer
    position:  usize,
    // bits not yet handed out, the next bit is the lowest one.
    buffer:    u64,
    // number of valid bits in `buffer`, always below 8 between calls
    bits_left: u8
}

impl<'src> BitStreamReader<'src> {
    /// Create a new `BitStreamReader` instance
    pub const fn new(in_buffer: &'src [u8]) -> BitStreamReader<'src> {
        BitStreamReader {
            src:       in_buffer,
            position:  0,
            buffer:    0,
            bits_left: 0
        }
    }

    /// Pull in bytes until the bit buffer holds at least `num_bits`
    #[inline(always)]
    fn refill(&mut self, num_bits: u8) -> Result<(), DecodeErrorStatus> {
        while self.bits_left < num_bits {
            let byte = *self
                .src
                .get(self.position)
                .ok_or(DecodeErrorStatus::OutOfData)?;

            self.buffer |= u64::from(byte) << self.bits_left;
            self.bits_left += 8;
            self.position += 1;
        }
        Ok(())
    }

    /// Return the next `num_bits` bits assembled LSB first,
    /// i.e the first bit read ends up as bit 0 of the result.
    ///
    /// # Errors
    /// `OutOfData` if fewer than `num_bits` bits remain
    #[inline(always)]
    pub fn consume_bits(&mut self, num_bits: u8) -> Result<u32, DecodeErrorStatus> {
        debug_assert!(num_bits <= 32);

        self.refill(num_bits)?;

        let mask = (1_u64 << num_bits) - 1;
        let value = self.buffer & mask;

        self.buffer >>= num_bits;
        self.bits_left -= num_bits;

        Ok(value as u32)
    }

    /// Discard the remaining bits of the current byte so the
    /// next read starts at a byte boundary.
    pub fn flush_byte_boundary(&mut self) {
        // refills only ever pull in what a read needs, so the bits left
        // are always the tail of the last byte pulled in.
        self.buffer = 0;
        self.bits_left = 0;
    }

    /// Return the next `num_bytes` whole bytes, discarding
    /// any partially read byte first.
    ///
    /// # Errors
    /// `OutOfData` if fewer than `num_bytes` bytes remain
    pub fn get_aligned_bytes(&mut self, num_bytes: usize) -> Result<&'src [u8], DecodeErrorStatus> {
        self.flush_byte_boundary();

        let end = self
            .position
            .checked_add(num_bytes)
            .ok_or(DecodeErrorStatus::OutOfData)?;

        let bytes = self
            .src
            .get(self.position..end)
            .ok_or(DecodeErrorStatus::OutOfData)?;

        self.position = end;

        Ok(bytes)
    }

    /// Number of bits that can still be read from this stream
    pub const fn bits_left(&self) -> usize {
        (self.src.len() - self.position) * 8 + self.bits_left as usize
    }

    /// Get the position of the next whole byte this stream will
    /// read from the underlying buffer.
    ///
    /// After a `flush_byte_boundary` this is the number of bytes
    /// consumed by the stream.
    pub const fn get_position(&self) -> usize {
        self.position
    }
}
