/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use log::trace;
#[cfg(feature = "zlib")]
use stipple_core::bytestream::ByteReader;

use crate::bitstream::BitStreamReader;
use crate::constants::{
    DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN, DEFLATE_BLOCKTYPE_STATIC, DEFLATE_BLOCKTYPE_UNCOMPRESSED,
    DEFLATE_END_OF_BLOCK, DEFLATE_MAX_CODEWORD_LENGTH, DEFLATE_MAX_LITLEN_SYMS_USED,
    DEFLATE_MAX_OFFSET_SYMS_USED, DEFLATE_MAX_PRE_CODEWORD_LEN, DEFLATE_NUM_LITLEN_SYMS,
    DEFLATE_NUM_OFFSET_SYMS, DEFLATE_NUM_PRECODE_SYMS, DEFLATE_PRECODE_LENS_PERMUTATION,
    DISTANCE_BASE, DISTANCE_EXTRA_BITS, LENGTH_BASE, LENGTH_EXTRA_BITS
};
use crate::errors::DecodeErrorStatus;
use crate::huffman::HuffmanTable;
#[cfg(feature = "zlib")]
use crate::utils::calc_adler_hash;
use crate::utils::copy_rep_matches;

/// Options that influence decompression
/// in DeflateDecoder
#[derive(Copy, Clone, Debug)]
pub struct DeflateOptions {
    limit:            usize,
    confirm_checksum: bool,
    size_hint:        usize
}

impl Default for DeflateOptions {
    fn default() -> Self {
        DeflateOptions {
            limit:            1 << 30,
            confirm_checksum: false,
            size_hint:        37000
        }
    }
}

impl DeflateOptions {
    /// Get deflate/zlib limit option
    ///
    /// The decoder won't extend the inbuilt limit and will
    /// return an error if the limit is exceeded
    ///
    /// # Returns
    /// The currently set limit of the instance
    /// # Note
    /// This is provided as a best effort, correctly quiting
    /// is detrimental to speed and hence this should not be relied too much.
    pub const fn get_limit(&self) -> usize {
        self.limit
    }
    /// Set a limit to the internal vector
    /// used to store decoded zlib/deflate output.
    ///
    /// # Arguments
    /// limit: The new decompressor limit
    /// # Returns
    /// A modified version of DeflateDecoder
    ///
    /// # Note
    /// This is provided as a best effort, correctly quiting
    /// is detrimental to speed and hence this should not be relied too much
    #[must_use]
    pub fn set_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Get whether the decoder will confirm a checksum
    /// after decoding
    pub const fn get_confirm_checksum(&self) -> bool {
        self.confirm_checksum
    }
    /// Set whether the decoder should confirm a checksum
    /// after decoding
    ///
    /// Note, you should definitely confirm your checksum, use this
    /// with caution, otherwise data returned may be corrupt
    ///
    /// # Arguments
    /// - confirm: Whether the decoder should confirm a checksum
    #[must_use]
    pub fn set_confirm_checksum(mut self, confirm: bool) -> Self {
        self.confirm_checksum = confirm;
        self
    }

    /// Get the default set size hint for the decompressor
    ///
    /// The decompressor initializes the internal storage for decompressed bytes
    /// with this size and will reallocate the vec if the decompressed size becomes bigger
    /// than this, but when the user currently knows how big the output will be, can be used
    /// to prevent unnecessary re-allocations
    pub const fn get_size_hint(&self) -> usize {
        self.size_hint
    }
    /// Set the size hint for the decompressor
    ///
    /// This can be used to prevent multiple re-allocations
    #[must_use]
    pub const fn set_size_hint(mut self, hint: usize) -> Self {
        self.size_hint = hint;
        self
    }
}

/// A deflate decoder instance.
///
/// The decoder manages output buffer as opposed to requiring the caller to provide a pre-allocated buffer
/// it tracks number of bytes written and on successfully reaching the
/// end of the block, will return a vector with exactly
/// the number of decompressed bytes.
///
/// Decoding is all or nothing, an error leaves nothing behind.
pub struct DeflateDecoder<'a> {
    data:     &'a [u8],
    position: usize,
    options:  DeflateOptions
}

impl<'a> DeflateDecoder<'a> {
    /// Create a new decompressor that will read compressed
    /// data from `data` and return a new vector containing new data
    ///
    /// # Arguments
    /// - `data`: The compressed data. Data can be of any type
    /// gzip,zlib or raw deflate.
    ///
    /// # Returns
    /// A decoder instance which will pull compressed data from `data` to inflate the output output
    ///
    /// # Note
    ///
    /// The default output size limit is **1 GiB.**
    /// this is to protect the end user against ddos attacks as deflate
    /// does not specify it's output size upfront
    ///
    /// The checksum is not confirmed by default.
    pub fn new(data: &'a [u8]) -> DeflateDecoder<'a> {
        let options = DeflateOptions::default();

        Self::new_with_options(data, options)
    }
    /// Create new decoder with specified options
    ///
    /// This can be used to fine tune the decoder to the user's
    /// needs.
    ///
    ///
    /// # Arguments
    /// - `data`: The compressed data. Data can be of any format i.e
    /// gzip, zlib or raw deflate.
    /// - options : A set of user defined options which tune how the decompressor
    ///
    /// # Returns
    /// A decoder instance which will pull compressed data from `data` to inflate output
    ///
    /// # Example
    /// ```no_run
    /// use stipple_inflate::{DeflateDecoder, DeflateOptions};
    /// let data  = [37];
    /// let options = DeflateOptions::default()
    ///     .set_confirm_checksum(true) // confirm the checksum for zlib
    ///     .set_limit(1000); // how big I think the input will be    
    /// let mut decoder = DeflateDecoder::new_with_options(&data,options);
    /// // do some stuff and then call decode
    /// let data = decoder.decode_zlib();
    ///
    /// ```
    pub fn new_with_options(data: &'a [u8], options: DeflateOptions) -> DeflateDecoder<'a> {
        DeflateDecoder {
            data,
            position: 0,
            options
        }
    }

    /// Decode zlib-encoded data returning the uncompressed in a `Vec<u8>`
    /// or an error if something went wrong.
    ///
    /// Bytes consumed will be from the data passed when the
    /// `new` method was called.
    ///
    /// # Arguments
    /// - None
    /// # Returns
    /// Result type containing the decoded data.
    ///
    /// - `Ok(Vec<u8>)`: Decoded vector containing the uncompressed bytes
    /// - `Err(DecodeErrorStatus)`: Error that occurred when decoding
    ///
    /// # Example
    /// ```no_run
    /// let totally_valid_data = [0; 23];
    /// let mut decoder = stipple_inflate::DeflateDecoder::new(&totally_valid_data);
    ///
    /// let decompressed_data = decoder.decode_zlib().unwrap();
    /// ```
    #[cfg(feature = "zlib")]
    pub fn decode_zlib(&mut self) -> Result<Vec<u8>, DecodeErrorStatus> {
        let mut reader = ByteReader::new(self.data);

        // Zlib flags
        // See https://www.ietf.org/rfc/rfc1950.txt for
        // the RFC
        let cmf = reader.get_u8_err()?;
        let flg = reader.get_u8_err()?;

        let cm = cmf & 0xF;
        let cinfo = cmf >> 4;
        let fdict = (flg >> 5) & 1;

        // confirm we have the right deflate methods
        if cm != 8 {
            trace!("Unknown zlib compression method {cm}");
            return Err(DecodeErrorStatus::UnsupportedZlibHeader);
        }
        if cinfo > 7 {
            trace!("Unknown cinfo `{cinfo}` greater than 7, not allowed");
            return Err(DecodeErrorStatus::UnsupportedZlibHeader);
        }
        if fdict != 0 {
            trace!("Preset dictionaries are not supported");
            return Err(DecodeErrorStatus::UnsupportedZlibHeader);
        }
        let flag_checks = (u16::from(cmf) * 256) + u16::from(flg);

        if flag_checks % 31 != 0 {
            trace!("FCHECK integrity not preserved");
            return Err(DecodeErrorStatus::UnsupportedZlibHeader);
        }

        self.position = reader.get_position();

        let out = self.decode_deflate()?;

        if self.options.confirm_checksum {
            // the adler sits on a byte boundary after the final block
            let mut reader = ByteReader::new(&self.data[self.position..]);
            let adler_bits = reader.get_u32_be_err()?;
            self.position += reader.get_position();

            let adler32_expected = calc_adler_hash(&out);

            if adler32_expected != adler_bits {
                return Err(DecodeErrorStatus::MismatchedAdler(adler32_expected, adler_bits));
            }
        }

        Ok(out)
    }

    /// Decode a deflate stream returning the data as `Vec<u8>` or an error
    /// indicating what went wrong.
    /// # Arguments
    ///  - None
    /// # Returns
    /// - `Ok(Vec<u8>)` The decoded data
    /// - `Err(DecodeErrorStatus)`: Error that occurred when decoding
    ///
    /// # Example
    /// ```no_run
    /// let deflate_data = [0; 23];
    /// let mut decoder = stipple_inflate::DeflateDecoder::new(&deflate_data);
    ///
    /// let decompressed_data = decoder.decode_deflate().unwrap();
    /// ```
    pub fn decode_deflate(&mut self) -> Result<Vec<u8>, DecodeErrorStatus> {
        let data = self.data;
        let mut stream = BitStreamReader::new(data.get(self.position..).unwrap_or(&[]));

        let mut out = Vec::with_capacity(self.options.size_hint.min(self.options.limit));

        loop {
            let is_last_block = stream.consume_bits(1)? == 1;
            let block_type = stream.consume_bits(2)?;

            trace!("Block type {block_type}, last block: {is_last_block}");

            match block_type {
                DEFLATE_BLOCKTYPE_UNCOMPRESSED => {
                    self.decode_stored_block(&mut stream, &mut out)?;
                }
                DEFLATE_BLOCKTYPE_STATIC => {
                    let (litlen, offset) = build_static_tables()?;
                    self.decode_huffman_block(&mut stream, &litlen, &offset, &mut out)?;
                }
                DEFLATE_BLOCKTYPE_DYNAMIC_HUFFMAN => {
                    let (litlen, offset) = read_dynamic_tables(&mut stream)?;
                    self.decode_huffman_block(&mut stream, &litlen, &offset, &mut out)?;
                }
                _ => return Err(DecodeErrorStatus::InvalidBlockType)
            }

            if is_last_block {
                break;
            }
        }
        stream.flush_byte_boundary();
        self.position += stream.get_position();

        Ok(out)
    }

    /// Return the number of bytes of the input consumed so far
    ///
    /// After a successful decode this points past the compressed stream
    /// (and past the adler32 trailer if it was confirmed).
    pub const fn get_position(&self) -> usize {
        self.position
    }

    fn decode_stored_block(
        &self, stream: &mut BitStreamReader, out: &mut Vec<u8>
    ) -> Result<(), DecodeErrorStatus> {
        let header = stream.get_aligned_bytes(4)?;

        let len = u16::from_le_bytes([header[0], header[1]]);
        let nlen = u16::from_le_bytes([header[2], header[3]]);

        if len != !nlen {
            return Err(DecodeErrorStatus::LenNlenMismatch);
        }
        let len = usize::from(len);

        self.ensure_space(out, len)?;
        out.extend_from_slice(stream.get_aligned_bytes(len)?);

        Ok(())
    }

    fn decode_huffman_block(
        &self, stream: &mut BitStreamReader, litlen: &HuffmanTable, offset: &HuffmanTable,
        out: &mut Vec<u8>
    ) -> Result<(), DecodeErrorStatus> {
        loop {
            let symbol = litlen.decode(stream)?;

            if symbol < DEFLATE_END_OF_BLOCK {
                self.ensure_space(out, 1)?;
                out.push(symbol as u8);
                continue;
            }
            if symbol == DEFLATE_END_OF_BLOCK {
                return Ok(());
            }
            // length/distance pair
            let length_symbol = usize::from(symbol - 257);

            if length_symbol >= LENGTH_BASE.len() {
                return Err(DecodeErrorStatus::InvalidLengthCode);
            }
            let length = usize::from(LENGTH_BASE[length_symbol])
                + stream.consume_bits(LENGTH_EXTRA_BITS[length_symbol])? as usize;

            let distance_symbol = usize::from(offset.decode(stream)?);

            if distance_symbol >= DISTANCE_BASE.len() {
                return Err(DecodeErrorStatus::InvalidDistanceCode);
            }
            let distance = usize::from(DISTANCE_BASE[distance_symbol])
                + stream.consume_bits(DISTANCE_EXTRA_BITS[distance_symbol])? as usize;

            self.ensure_space(out, length)?;
            copy_rep_matches(out, distance, length)?;
        }
    }

    /// Return an error if writing `extra` more bytes to
    /// `out` would go above the configured limit
    #[inline(always)]
    fn ensure_space(&self, out: &[u8], extra: usize) -> Result<(), DecodeErrorStatus> {
        let new_size = out.len().saturating_add(extra);

        if new_size > self.options.limit {
            return Err(DecodeErrorStatus::OutputLimitExceeded(
                self.options.limit,
                new_size
            ));
        }
        Ok(())
    }
}

/// Build the literal/length and offset tables of
/// a fixed huffman block
fn build_static_tables() -> Result<(HuffmanTable, HuffmanTable), DecodeErrorStatus> {
    let mut litlen_lens = [0_u8; DEFLATE_NUM_LITLEN_SYMS];

    litlen_lens[0..144].fill(8);
    litlen_lens[144..256].fill(9);
    litlen_lens[256..280].fill(7);
    litlen_lens[280..288].fill(8);

    let offset_lens = [5_u8; DEFLATE_NUM_OFFSET_SYMS];

    let litlen = HuffmanTable::new(&litlen_lens, DEFLATE_MAX_CODEWORD_LENGTH)?;
    let offset = HuffmanTable::new(&offset_lens, DEFLATE_MAX_CODEWORD_LENGTH)?;

    Ok((litlen, offset))
}

/// Read the code lengths of a dynamic huffman block and
/// build the literal/length and offset tables from them
fn read_dynamic_tables(
    stream: &mut BitStreamReader
) -> Result<(HuffmanTable, HuffmanTable), DecodeErrorStatus> {
    // Read codeword lengths
    let num_litlen_syms = 257 + stream.consume_bits(5)? as usize;
    let num_offset_syms = 1 + stream.consume_bits(5)? as usize;
    let num_explicit_precode_lens = 4 + stream.consume_bits(4)? as usize;

    if num_litlen_syms > DEFLATE_MAX_LITLEN_SYMS_USED
        || num_offset_syms > DEFLATE_MAX_OFFSET_SYMS_USED
    {
        return Err(DecodeErrorStatus::InvalidHuffmanCode);
    }

    let mut precode_lens = [0_u8; DEFLATE_NUM_PRECODE_SYMS];

    for i in DEFLATE_PRECODE_LENS_PERMUTATION
        .iter()
        .take(num_explicit_precode_lens)
    {
        precode_lens[usize::from(*i)] = stream.consume_bits(3)? as u8;
    }
    let precode = HuffmanTable::new(&precode_lens, DEFLATE_MAX_PRE_CODEWORD_LEN)?;

    /* Decode the litlen and offset codeword lengths. */
    let total = num_litlen_syms + num_offset_syms;

    let mut lens = [0_u8; DEFLATE_MAX_LITLEN_SYMS_USED + DEFLATE_MAX_OFFSET_SYMS_USED];
    let mut i = 0;

    while i < total {
        let symbol = precode.decode(stream)?;

        if symbol < 16 {
            // explicit codeword length
            lens[i] = symbol as u8;
            i += 1;
            continue;
        }
        let (rep_val, rep_count) = match symbol {
            16 => {
                // repeat the previous length 3-6 times
                if i == 0 {
                    return Err(DecodeErrorStatus::InvalidHuffmanCode);
                }
                (lens[i - 1], 3 + stream.consume_bits(2)? as usize)
            }
            // repeat zero 3-10 times
            17 => (0, 3 + stream.consume_bits(3)? as usize),
            // repeat zero 11-138 times
            18 => (0, 11 + stream.consume_bits(7)? as usize),
            _ => return Err(DecodeErrorStatus::InvalidHuffmanCode)
        };

        if i + rep_count > total {
            return Err(DecodeErrorStatus::InvalidHuffmanCode);
        }
        lens[i..i + rep_count].fill(rep_val);
        i += rep_count;
    }
    // a block without an end of block code can never terminate
    if lens[usize::from(DEFLATE_END_OF_BLOCK)] == 0 {
        return Err(DecodeErrorStatus::InvalidHuffmanCode);
    }

    let litlen = HuffmanTable::new(&lens[..num_litlen_syms], DEFLATE_MAX_CODEWORD_LENGTH)?;
    let offset = HuffmanTable::new(&lens[num_litlen_syms..total], DEFLATE_MAX_CODEWORD_LENGTH)?;

    Ok((litlen, offset))
}
