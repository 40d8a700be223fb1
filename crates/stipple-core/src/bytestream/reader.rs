/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

/// Errors that can occur when reading from a [`ByteReader`]
#[derive(Copy, Clone, PartialEq, Eq)]
pub enum ByteIoError {
    // requested, remaining
    NotEnoughBytes(usize, usize),
    Generic(&'static str)
}

impl Debug for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ByteIoError::NotEnoughBytes(expected, found) => {
                writeln!(f, "Not enough bytes, expected {expected} but found {found}")
            }
            ByteIoError::Generic(err) => {
                writeln!(f, "Generic I/O error: {err}")
            }
        }
    }
}

impl Display for ByteIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ByteIoError {}

impl From<&'static str> for ByteIoError {
    fn from(value: &'static str) -> Self {
        ByteIoError::Generic(value)
    }
}

/// An encapsulation of a byte stream reader
///
/// This provides an interface similar to [std::io::Cursor] but
/// every read is checked against the end of the buffer and the
/// `_err` variants report a [`ByteIoError`] instead of reading
/// out of bounds.
///
/// The cursor never moves past the end of the underlying buffer.
pub struct ByteReader<'a> {
    /// Data stream
    stream:   &'a [u8],
    position: usize
}

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

impl<'a> ByteReader<'a> {
    /// Create a new instance of the byte stream
    pub const fn new(buf: &'a [u8]) -> ByteReader<'a> {
        ByteReader {
            stream:   buf,
            position: 0
        }
    }

    /// Skip `num` bytes ahead of the stream.
    ///
    /// Returns an error if fewer than `num` bytes remain, in which
    /// case the position is left unchanged.
    pub fn skip(&mut self, num: usize) -> Result<(), ByteIoError> {
        if !self.has(num) {
            return Err(ByteIoError::NotEnoughBytes(num, self.remaining()));
        }
        self.position += num;
        Ok(())
    }

    /// Return whether the underlying buffer
    /// has `num` bytes available for reading
    ///
    /// ```
    /// use stipple_core::bytestream::ByteReader;
    /// let data = [0_u8; 120];
    /// let stream = ByteReader::new(&data);
    /// assert!(stream.has(80));
    /// assert!(!stream.has(121));
    /// ```
    #[inline]
    pub const fn has(&self, num: usize) -> bool {
        match self.position.checked_add(num) {
            Some(end) => end <= self.stream.len(),
            None => false
        }
    }

    /// Get length of the underlying buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.stream.len()
    }

    /// Return true if the underlying buffer is empty
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.stream.is_empty()
    }

    /// Get current position of the cursor
    #[inline]
    pub const fn get_position(&self) -> usize {
        self.position
    }

    /// Return true whether or not we read to the end of the
    /// buffer and have no more bytes left.
    #[inline]
    pub const fn eof(&self) -> bool {
        self.position >= self.len()
    }

    /// Get the number of bytes remaining after the cursor
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.stream.len().saturating_sub(self.position)
    }

    /// Get a part of the bytestream as a reference,
    /// moving the position `num` bytes ahead.
    ///
    /// Returns an error if the stream does not have
    /// `num` bytes left.
    pub fn get_as_ref(&mut self, num: usize) -> Result<&'a [u8], ByteIoError> {
        if !self.has(num) {
            return Err(ByteIoError::NotEnoughBytes(num, self.remaining()));
        }
        let data = &self.stream[self.position..self.position + num];
        self.position += num;
        Ok(data)
    }

    /// Look ahead `position` bytes from the cursor and return a reference
    /// to `num_bytes` from that position, or an error if the
    /// peek would be out of bounds.
    ///
    /// This doesn't increment the position.
    pub fn peek_at(&self, position: usize, num_bytes: usize) -> Result<&'a [u8], ByteIoError> {
        let start = self
            .position
            .checked_add(position)
            .ok_or(ByteIoError::Generic("Peek position overflows"))?;
        let end = start
            .checked_add(num_bytes)
            .ok_or(ByteIoError::Generic("Peek length overflows"))?;

        self.stream
            .get(start..end)
            .ok_or(ByteIoError::NotEnoughBytes(end - self.position, self.remaining()))
    }

    /// Read a fixed number of known bytes to an array or return an error
    /// if there aren't enough bytes.
    #[inline]
    pub fn get_fixed_bytes_or_err<const N: usize>(&mut self) -> Result<[u8; N], ByteIoError> {
        let mut byte_store: [u8; N] = [0; N];
        byte_store.copy_from_slice(self.get_as_ref(N)?);
        Ok(byte_store)
    }

    /// Retrieve a byte from the underlying stream,
    /// returning an error if there are no more bytes available
    #[inline]
    pub fn get_u8_err(&mut self) -> Result<u8, ByteIoError> {
        match self.stream.get(self.position) {
            Some(byte) => {
                self.position += 1;
                Ok(*byte)
            }
            None => Err(ByteIoError::NotEnoughBytes(1, 0))
        }
    }
}

macro_rules! get_single_type {
    ($name:tt,$name2:tt,$name3:tt,$int_type:tt) => {
        impl<'a> ByteReader<'a>
        {
            #[inline(always)]
            fn $name(&mut self, mode: Mode) -> Result<$int_type, ByteIoError>
            {
                const SIZE_OF_VAL: usize = core::mem::size_of::<$int_type>();

                let space = self.get_fixed_bytes_or_err::<SIZE_OF_VAL>()?;

                match mode {
                    Mode::BE => Ok($int_type::from_be_bytes(space)),
                    Mode::LE => Ok($int_type::from_le_bytes(space))
                }
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a big endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name2(&mut self) -> Result<$int_type, ByteIoError>
            {
                self.$name(Mode::BE)
            }

            #[doc=concat!("Read ",stringify!($int_type)," as a little endian integer")]
            #[doc=concat!("Returning an error if the underlying buffer cannot support a ",stringify!($int_type)," read.")]
            #[inline]
            pub fn $name3(&mut self) -> Result<$int_type, ByteIoError>
            {
                self.$name(Mode::LE)
            }
        }
    };
}

get_single_type!(get_u16_inner_or_die, get_u16_be_err, get_u16_le_err, u16);
get_single_type!(get_u32_inner_or_die, get_u32_be_err, get_u32_le_err, u32);
get_single_type!(get_u64_inner_or_die, get_u64_be_err, get_u64_le_err, u64);

#[cfg(test)]
mod tests {
    use super::{ByteIoError, ByteReader};

    #[test]
    fn reads_are_endian_aware() {
        let data = [0x00, 0x00, 0x01, 0x02, 0x34, 0x12];
        let mut reader = ByteReader::new(&data);

        assert_eq!(reader.get_u32_be_err(), Ok(0x0102));
        assert_eq!(reader.get_u16_le_err(), Ok(0x1234));
        assert!(reader.eof());
    }

    #[test]
    fn short_reads_do_not_advance() {
        let data = [1, 2, 3];
        let mut reader = ByteReader::new(&data);

        assert_eq!(reader.get_u32_be_err(), Err(ByteIoError::NotEnoughBytes(4, 3)));
        assert_eq!(reader.get_position(), 0);
        assert!(reader.skip(4).is_err());
        assert_eq!(reader.get_u8_err(), Ok(1));
        assert_eq!(reader.remaining(), 2);
    }

    #[test]
    fn peek_does_not_move_the_cursor() {
        let data = *b"abcdefgh";
        let mut reader = ByteReader::new(&data);
        reader.skip(2).unwrap();

        assert_eq!(reader.peek_at(2, 3).unwrap(), b"efg");
        assert_eq!(reader.get_position(), 2);
        assert!(reader.peek_at(4, 3).is_err());
        assert!(reader.peek_at(usize::MAX, 1).is_err());
    }
}
