/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

enum Mode {
    // Big endian
    BE,
    // Little Endian
    LE
}

/// Encapsulates a simple Byte writer with
/// support for Endian aware writes
///
/// The writer owns a growable buffer, hence writes
/// never fail.
#[derive(Default)]
pub struct ByteWriter {
    buffer: Vec<u8>
}

impl ByteWriter {
    /// Create a new writer with an empty buffer
    pub fn new() -> ByteWriter {
        ByteWriter { buffer: Vec::new() }
    }

    /// Create a new writer with space for `capacity` bytes
    /// preallocated
    pub fn with_capacity(capacity: usize) -> ByteWriter {
        ByteWriter {
            buffer: Vec::with_capacity(capacity)
        }
    }

    /// Return the number of bytes the writer has written
    ///
    /// ```
    /// use stipple_core::bytestream::ByteWriter;
    /// let mut stream = ByteWriter::new();
    /// assert_eq!(stream.bytes_written(), 0);
    /// stream.write_u32_be(1);
    /// assert_eq!(stream.bytes_written(), 4);
    /// ```
    pub fn bytes_written(&self) -> usize {
        self.buffer.len()
    }

    /// Write a single byte into the bytestream
    #[inline]
    pub fn write_u8(&mut self, byte: u8) {
        self.buffer.push(byte);
    }

    /// Write all bytes from `buf` into the bytestream
    #[inline]
    pub fn write_all(&mut self, buf: &[u8]) {
        self.buffer.extend_from_slice(buf);
    }

    /// Return a view of everything written so far
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Overwrite already written bytes starting at `position`
    ///
    /// Used to patch in values, e.g lengths that are only
    /// known after the payload has been written.
    ///
    /// # Panics
    /// If `position + buf.len()` is beyond the bytes written
    pub fn patch(&mut self, position: usize, buf: &[u8]) {
        self.buffer[position..position + buf.len()].copy_from_slice(buf);
    }

    /// Destroy this writer returning the bytes written
    pub fn into_inner(self) -> Vec<u8> {
        self.buffer
    }
}

macro_rules! write_single_type {
    ($name:tt,$name2:tt,$name3:tt,$int_type:tt) => {
        impl ByteWriter
        {
            #[inline(always)]
            fn $name(&mut self, byte: $int_type, mode: Mode)
            {
                let bytes = match mode
                {
                    Mode::BE => byte.to_be_bytes(),
                    Mode::LE => byte.to_le_bytes()
                };
                self.buffer.extend_from_slice(&bytes);
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a big endian integer")]
            #[inline]
            pub fn $name2(&mut self, byte: $int_type)
            {
                self.$name(byte, Mode::BE)
            }

            #[doc=concat!("Write ",stringify!($int_type)," as a little endian integer")]
            #[inline]
            pub fn $name3(&mut self, byte: $int_type)
            {
                self.$name(byte, Mode::LE)
            }
        }
    };
}

write_single_type!(write_u16_inner, write_u16_be, write_u16_le, u16);
write_single_type!(write_u32_inner, write_u32_be, write_u32_le, u32);
write_single_type!(write_u64_inner, write_u64_be, write_u64_le, u64);

#[cfg(test)]
mod tests {
    use super::ByteWriter;

    #[test]
    fn writes_are_endian_aware() {
        let mut writer = ByteWriter::new();
        writer.write_u16_le(0x1234);
        writer.write_u32_be(0x0102_0304);
        writer.write_u8(9);

        assert_eq!(writer.into_inner(), [0x34, 0x12, 1, 2, 3, 4, 9]);
    }

    #[test]
    fn patch_overwrites_in_place() {
        let mut writer = ByteWriter::new();
        writer.write_u32_be(0);
        writer.write_all(b"IEND");
        writer.patch(0, &7_u32.to_be_bytes());

        assert_eq!(writer.as_slice(), &[0, 0, 0, 7, b'I', b'E', b'N', b'D']);
    }
}
