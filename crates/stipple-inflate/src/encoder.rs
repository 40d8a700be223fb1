/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use log::trace;
use stipple_core::bytestream::ByteWriter;

use crate::constants::{DEFLATE_BLOCKTYPE_UNCOMPRESSED, DEFLATE_MAX_STORED_BLOCK_LENGTH};
#[cfg(feature = "zlib")]
use crate::utils::calc_adler_hash;

#[derive(Debug, Copy, Clone)]
pub enum DeflateEncodingStrategy {
    /// Emit the input verbatim in stored blocks
    NoCompression
}

impl DeflateEncodingStrategy {
    #[cfg(feature = "zlib")]
    fn to_level(self) -> u8 {
        match self {
            Self::NoCompression => 0
        }
    }
}

/// Options that influence compression
/// in DeflateEncoder
#[derive(Debug, Copy, Clone)]
pub struct DeflateEncodingOptions {
    strategy:       DeflateEncodingStrategy,
    store_checksum: bool
}

impl Default for DeflateEncodingOptions {
    fn default() -> Self {
        DeflateEncodingOptions {
            strategy:       DeflateEncodingStrategy::NoCompression,
            store_checksum: true
        }
    }
}

impl DeflateEncodingOptions {
    /// Whether zlib streams end with the adler32 of the input
    pub const fn get_store_checksum(&self) -> bool {
        self.store_checksum
    }
    /// Set whether zlib streams end with the adler32 of the input
    ///
    /// Streams written without it are still decodable by
    /// `DeflateDecoder` as long as it isn't asked to confirm the checksum
    #[must_use]
    pub fn set_store_checksum(mut self, yes: bool) -> Self {
        self.store_checksum = yes;
        self
    }
}

/// A deflate encoder
///
/// The encoder performs no match search, input is
/// split into stored blocks of at most 65535 bytes
pub struct DeflateEncoder<'a> {
    data:    &'a [u8],
    options: DeflateEncodingOptions,
    output:  ByteWriter
}

impl<'a> DeflateEncoder<'a> {
    /// Create a new deflate encoder with default options
    pub fn new(data: &'a [u8]) -> DeflateEncoder<'a> {
        DeflateEncoder::new_with_options(data, DeflateEncodingOptions::default())
    }

    pub fn new_with_options(data: &'a [u8], options: DeflateEncodingOptions) -> DeflateEncoder<'a> {
        DeflateEncoder {
            data,
            options,
            output: ByteWriter::new()
        }
    }

    /// Size of the output for `length` input bytes
    /// in stored blocks, zlib header and trailer included
    fn expected_size(length: usize) -> usize {
        // 5 bytes of header per block, at least one block
        let blocks = length.div_ceil(DEFLATE_MAX_STORED_BLOCK_LENGTH).max(1);
        length + blocks * 5 + 2 + 4
    }

    #[cfg(feature = "zlib")]
    fn write_zlib_header(&mut self) {
        const ZLIB_CM_DEFLATE: u16 = 8;
        const ZLIB_CINFO_32K_WINDOW: u16 = 7;

        let level_hint = self.options.strategy.to_level();

        let mut hdr = (ZLIB_CM_DEFLATE << 8) | (ZLIB_CINFO_32K_WINDOW << 12);

        hdr |= u16::from(level_hint) << 6;
        hdr |= 31 - (hdr % 31);

        self.output.write_u16_be(hdr);
    }

    /// Encode a deflate data block with no compression
    fn encode_no_compression(&mut self) {
        /*
         * If the input is zero-length, we still must output a block in order
         * for the output to be a valid DEFLATE stream.
         */
        if self.data.is_empty() {
            /* BFINAL and BTYPE */
            self.output
                .write_u8((1 | (DEFLATE_BLOCKTYPE_UNCOMPRESSED << 1)) as u8);
            /* LEN and NLEN */
            self.output.write_u16_le(0);
            self.output.write_u16_le(0xFFFF);
            return;
        }
        let mut blocks = self.data.chunks(DEFLATE_MAX_STORED_BLOCK_LENGTH).peekable();

        while let Some(block) = blocks.next() {
            let bfinal = u32::from(blocks.peek().is_none());
            /*
             * Output BFINAL and BTYPE.  The stream is already byte-aligned
             * here, so this step always requires outputting exactly 1 byte.
             */
            self.output
                .write_u8((bfinal | (DEFLATE_BLOCKTYPE_UNCOMPRESSED << 1)) as u8);
            // output len and nlen, block length fits as we chunk by u16::MAX
            let len_u16 = block.len() as u16;

            self.output.write_u16_le(len_u16);
            self.output.write_u16_le(!len_u16);
            self.output.write_all(block);
        }
    }

    /// Encode the data as a raw deflate stream
    pub fn encode_deflate(&mut self) -> Vec<u8> {
        self.output = ByteWriter::with_capacity(Self::expected_size(self.data.len()));

        match self.options.strategy {
            DeflateEncodingStrategy::NoCompression => {
                self.encode_no_compression();
            }
        }
        trace!("Deflate stream of {} bytes", self.output.bytes_written());

        core::mem::take(&mut self.output).into_inner()
    }

    /// Encode the data as a zlib stream, i.e a two byte
    /// header, the deflate stream and (when enabled) the big endian
    /// adler32 of the input.
    #[cfg(feature = "zlib")]
    pub fn encode_zlib(&mut self) -> Vec<u8> {
        self.output = ByteWriter::with_capacity(Self::expected_size(self.data.len()));
        self.write_zlib_header();

        match self.options.strategy {
            DeflateEncodingStrategy::NoCompression => {
                self.encode_no_compression();
            }
        }
        if self.options.store_checksum {
            // add adler hash
            let hash = calc_adler_hash(self.data);
            self.output.write_u32_be(hash);
        }
        trace!("Zlib stream of {} bytes", self.output.bytes_written());

        core::mem::take(&mut self.output).into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::{DeflateEncoder, DeflateEncodingOptions};
    use crate::DeflateDecoder;

    #[test]
    fn empty_input_is_a_single_final_block() {
        let encoded = DeflateEncoder::new(&[]).encode_deflate();
        assert_eq!(encoded, [0x01, 0x00, 0x00, 0xFF, 0xFF]);
    }

    #[test]
    fn zlib_header_and_trailer() {
        let encoded = DeflateEncoder::new(b"abc").encode_zlib();

        assert_eq!(&encoded[..2], &[0x78, 0x01]);
        // adler32 of "abc"
        assert_eq!(&encoded[encoded.len() - 4..], &[0x02, 0x4d, 0x01, 0x27]);
        // header, 5 bytes of block header, data, trailer
        assert_eq!(encoded.len(), 2 + 5 + 3 + 4);
    }

    #[test]
    fn checksum_can_be_left_out() {
        let options = DeflateEncodingOptions::default().set_store_checksum(false);
        let encoded = DeflateEncoder::new_with_options(b"abc", options).encode_zlib();

        assert_eq!(encoded.len(), 2 + 5 + 3);
    }

    #[test]
    fn large_inputs_span_several_blocks() {
        let data: Vec<u8> = (0..150_000_u32).map(|x| (x % 251) as u8).collect();
        let encoded = DeflateEncoder::new(&data).encode_deflate();

        // three blocks, only the last one final
        assert_eq!(encoded.len(), data.len() + 3 * 5);
        assert_eq!(encoded[0], 0);
        assert_eq!(encoded[5 + 65535], 0);
        assert_eq!(encoded[2 * (5 + 65535)], 1);

        let decoded = DeflateDecoder::new(&encoded).decode_deflate().unwrap();
        assert_eq!(decoded, data);
    }
}
