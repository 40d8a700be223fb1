/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Canonical huffman tables
//!
//! A table is stored as the number of codes of each length plus the
//! symbols sorted by (code length, symbol value). That is enough to
//! decode canonical codes one bit at a time without materialising
//! the codes themselves.
use alloc::vec::Vec;

use crate::bitstream::BitStreamReader;
use crate::constants::DEFLATE_MAX_CODEWORD_LENGTH;
use crate::errors::DecodeErrorStatus;

pub struct HuffmanTable {
    /// Number of codes of each length, `counts[0]` is unused
    counts:     [u16; DEFLATE_MAX_CODEWORD_LENGTH + 1],
    /// Symbols ordered by code, i.e by length then by symbol value
    symbols:    Vec<u16>,
    max_length: usize
}

impl HuffmanTable {
    /// Build a table from the code length of every symbol.
    ///
    /// `lengths[symbol]` is that symbol's code length, zero meaning the
    /// symbol is unused.
    ///
    /// # Errors
    /// `InvalidHuffmanCode` if a length is above `max_length` or the
    /// lengths describe more codes than fit (an over-subscribed code).
    /// Incomplete codes are accepted.
    pub fn new(lengths: &[u8], max_length: usize) -> Result<HuffmanTable, DecodeErrorStatus> {
        debug_assert!(max_length <= DEFLATE_MAX_CODEWORD_LENGTH);

        let mut counts = [0_u16; DEFLATE_MAX_CODEWORD_LENGTH + 1];

        for length in lengths.iter().map(|x| usize::from(*x)) {
            if length > max_length {
                return Err(DecodeErrorStatus::InvalidHuffmanCode);
            }
            counts[length] += 1;
        }
        // make sure the lengths don't use more codes than available
        let mut left: i32 = 1;

        for count in &counts[1..=max_length] {
            left <<= 1;
            left -= i32::from(*count);

            if left < 0 {
                return Err(DecodeErrorStatus::InvalidHuffmanCode);
            }
        }
        // offsets of the first symbol of each length in `symbols`
        let mut offsets = [0_u16; DEFLATE_MAX_CODEWORD_LENGTH + 2];

        for length in 1..=max_length {
            offsets[length + 1] = offsets[length] + counts[length];
        }
        let mut symbols = alloc::vec![0; usize::from(offsets[max_length + 1])];

        for (symbol, length) in lengths.iter().map(|x| usize::from(*x)).enumerate() {
            if length != 0 {
                symbols[usize::from(offsets[length])] = symbol as u16;
                offsets[length] += 1;
            }
        }

        Ok(HuffmanTable {
            counts,
            symbols,
            max_length
        })
    }

    /// Decode a single symbol from the stream.
    ///
    /// Bits are read one at a time, building the code most significant
    /// bit first. Canonical codes of one length are consecutive, so once
    /// `code` falls into the range of codes for the current length the
    /// symbol is found by its offset into that range.
    ///
    /// # Errors
    /// - `InvalidHuffmanCode` if no code matches within `max_length` bits
    /// - `OutOfData` if the stream runs out while reading the code
    #[inline]
    pub fn decode(&self, stream: &mut BitStreamReader) -> Result<u16, DecodeErrorStatus> {
        // bits read so far
        let mut code: i32 = 0;
        // first code of the current length
        let mut first: i32 = 0;
        // index of the first symbol of the current length
        let mut index: i32 = 0;

        for count in &self.counts[1..=self.max_length] {
            let count = i32::from(*count);

            code |= stream.consume_bits(1)? as i32;

            if code - count < first {
                return Ok(self.symbols[(index + (code - first)) as usize]);
            }
            index += count;
            first += count;
            first <<= 1;
            code <<= 1;
        }
        Err(DecodeErrorStatus::InvalidHuffmanCode)
    }
}

#[cfg(test)]
mod tests {
    use super::HuffmanTable;
    use crate::bitstream::BitStreamReader;
    use crate::errors::DecodeErrorStatus;

    #[test]
    fn canonical_codes_are_assigned_in_symbol_order() {
        // symbol 1 -> 0, symbol 0 -> 10, symbol 2 -> 110, symbol 3 -> 111
        let table = HuffmanTable::new(&[2, 1, 3, 3], 15).unwrap();
        // bits in stream order: 0 10 110 111
        let data = [0xDA, 0x01];
        let mut stream = BitStreamReader::new(&data);

        let symbols: Vec<u16> = (0..4).map(|_| table.decode(&mut stream).unwrap()).collect();
        assert_eq!(symbols, [1, 0, 2, 3]);
    }

    #[test]
    fn zero_lengths_are_skipped() {
        let table = HuffmanTable::new(&[0, 1, 0, 1], 15).unwrap();
        // bits 1, 0
        let data = [0b01];
        let mut stream = BitStreamReader::new(&data);

        assert_eq!(table.decode(&mut stream), Ok(3));
        assert_eq!(table.decode(&mut stream), Ok(1));
    }

    #[test]
    fn over_subscribed_lengths_are_rejected() {
        assert!(matches!(
            HuffmanTable::new(&[1, 1, 1], 15),
            Err(DecodeErrorStatus::InvalidHuffmanCode)
        ));
    }

    #[test]
    fn lengths_above_max_are_rejected() {
        assert!(matches!(
            HuffmanTable::new(&[8, 1], 7),
            Err(DecodeErrorStatus::InvalidHuffmanCode)
        ));
    }

    #[test]
    fn unassigned_code_in_incomplete_table_fails() {
        // only code `0` exists
        let table = HuffmanTable::new(&[1], 15).unwrap();
        let data = [0xFF, 0xFF];
        let mut stream = BitStreamReader::new(&data);

        assert_eq!(table.decode(&mut stream), Err(DecodeErrorStatus::InvalidHuffmanCode));
    }
}
