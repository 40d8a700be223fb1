/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use log::trace;
use stipple_core::bytestream::ByteReader;
use stipple_core::options::DecoderOptions;
use stipple_inflate::errors::DecodeErrorStatus;
use stipple_inflate::{DeflateDecoder, DeflateOptions};

use crate::constants::{PNG_SIGNATURE, RGBA_COMPONENTS};
use crate::crc::calc_crc_with_bytes;
use crate::enums::{FilterMethod, InterlaceMethod, PngChunkType, PngColor};
use crate::error::PngDecodeErrors;
use crate::filters::{
    handle_avg, handle_avg_first, handle_paeth, handle_paeth_first, handle_sub, handle_up
};
use crate::image::RgbaImage;
use crate::options::{default_chunk_handler, UnknownChunkHandler};

#[derive(Copy, Clone)]
pub(crate) struct PngChunk {
    pub length:     usize,
    pub chunk_type: PngChunkType,
    pub chunk:      [u8; 4]
}

/// Image information as stored in the IHDR chunk
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq)]
pub struct PngInfo {
    pub width:              usize,
    pub height:             usize,
    pub depth:              u8,
    pub color:              PngColor,
    pub compression_method: u8,
    pub filter_method:      u8,
    pub interlace_method:   InterlaceMethod
}

/// A png decoder for 8 bit RGBA images
///
/// # Example
/// ```
/// use stipple_png::{PngDecoder, PngEncoder, RgbaImage};
///
/// let image = RgbaImage::new(1, 1, vec![1, 2, 3, 4]).unwrap();
/// let png = PngEncoder::new(&image).encode();
///
/// let mut decoder = PngDecoder::new(&png);
/// decoder.decode_headers().unwrap();
/// assert_eq!(decoder.get_dimensions(), Some((1, 1)));
///
/// let decoded = decoder.decode().unwrap();
/// assert_eq!(decoded, image);
/// ```
pub struct PngDecoder<'a> {
    pub(crate) seen_hdr:      bool,
    pub(crate) stream:        ByteReader<'a>,
    pub(crate) options:       DecoderOptions,
    pub(crate) chunk_handler: UnknownChunkHandler,
    pub(crate) png_info:      PngInfo,
    pub(crate) idat_chunks:   Vec<u8>
}

impl<'a> PngDecoder<'a> {
    pub fn new(data: &'a [u8]) -> PngDecoder<'a> {
        let default_opt = DecoderOptions::default();

        PngDecoder::new_with_options(data, default_opt)
    }

    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> PngDecoder<'a> {
        PngDecoder {
            seen_hdr: false,
            stream: ByteReader::new(data),
            options,
            chunk_handler: default_chunk_handler,
            png_info: PngInfo::default(),
            idat_chunks: Vec::new()
        }
    }

    /// Replace the function called for chunks the decoder doesn't
    /// handle itself
    #[must_use]
    pub fn set_chunk_handler(mut self, handler: UnknownChunkHandler) -> Self {
        self.chunk_handler = handler;
        self
    }

    /// Image information, available after headers were decoded
    pub const fn get_info(&self) -> Option<&PngInfo> {
        if !self.seen_hdr {
            return None;
        }
        Some(&self.png_info)
    }

    /// Image width and height, available after headers were decoded
    pub const fn get_dimensions(&self) -> Option<(usize, usize)> {
        if !self.seen_hdr {
            return None;
        }

        Some((self.png_info.width, self.png_info.height))
    }

    /// Read the png signature and the IHDR chunk
    ///
    /// After this returns, [`get_info`](Self::get_info) and
    /// [`get_dimensions`](Self::get_dimensions) return the image
    /// information. Calling it again does nothing.
    pub fn decode_headers(&mut self) -> Result<(), PngDecodeErrors> {
        if self.seen_hdr {
            return Ok(());
        }
        let signature = PNG_SIGNATURE.to_be_bytes();
        // a wrong prefix is a bad signature even when the input is short
        let present = self.stream.remaining().min(signature.len());

        if self.stream.peek_at(0, present)? != &signature[..present] {
            return Err(PngDecodeErrors::BadSignature);
        }
        self.stream.skip(signature.len())?;

        // check if first chunk is ihdr here
        if self.stream.peek_at(4, 4)? != b"IHDR" {
            return Err(PngDecodeErrors::CorruptChunk(
                "First chunk not IHDR, Corrupt PNG"
            ));
        }
        let header = self.read_chunk_header()?;

        self.parse_ihdr(header)
    }

    fn read_chunk_header(&mut self) -> Result<PngChunk, PngDecodeErrors> {
        // Format is length - chunk type - [data] -  crc chunk
        let chunk_length = self.stream.get_u32_be_err()? as usize;
        let chunk_name = self.stream.get_fixed_bytes_or_err::<4>()?;

        let chunk_type = PngChunkType::from_chunk_name(&chunk_name);

        if !self.stream.has(chunk_length.saturating_add(4) /*crc stream*/) {
            trace!(
                "Not enough bytes for chunk {:?}, bytes requested are {}, but bytes present are {}",
                chunk_type,
                chunk_length.saturating_add(4),
                self.stream.remaining()
            );
            return Err(PngDecodeErrors::OutOfData);
        }

        let mut crc_bytes = [0; 4];
        crc_bytes.copy_from_slice(self.stream.peek_at(chunk_length, 4)?);

        let crc = u32::from_be_bytes(crc_bytes);

        // Unknown chunks are skipped without looking at their contents
        let is_known = chunk_type != PngChunkType::unkn;

        if is_known && self.options.png_get_confirm_crc() {
            let data = self.stream.peek_at(0, chunk_length)?;

            let calc_crc = !calc_crc_with_bytes(data, calc_crc_with_bytes(&chunk_name, u32::MAX));

            if crc != calc_crc {
                return Err(PngDecodeErrors::ChunkCrcMismatch(chunk_name, crc, calc_crc));
            }
        }

        trace!("Chunk {:?}, length {}, crc {:#010X}", chunk_type, chunk_length, crc);

        Ok(PngChunk {
            length: chunk_length,
            chunk: chunk_name,
            chunk_type
        })
    }

    /// Decode the image returning the raw RGBA pixels
    ///
    /// The result is `width * height * 4` bytes, row major
    /// with the top row first.
    pub fn decode_raw(&mut self) -> Result<Vec<u8>, PngDecodeErrors> {
        self.decode_headers()?;

        loop {
            let header = self.read_chunk_header()?;

            match header.chunk_type {
                PngChunkType::IHDR => {
                    self.parse_ihdr(header)?;
                }
                PngChunkType::IDAT => {
                    self.parse_idat(header)?;
                }
                PngChunkType::IEND => {
                    break;
                }
                _ => (self.chunk_handler)(
                    header.length,
                    header.chunk,
                    &mut self.stream,
                    self.options.png_get_strict_chunks()
                )?
            }
        }
        if self.idat_chunks.is_empty() {
            trace!("No IDAT chunks found before IEND");
            return Err(PngDecodeErrors::OutOfData);
        }
        // go parse IDAT chunks returning the inflate
        let deflate_data = self.inflate()?;
        // remove idat chunks from memory
        // we are already done with them.
        self.idat_chunks = Vec::new();

        self.create_png_image_raw(&deflate_data)
    }

    /// Decode the image into an [`RgbaImage`]
    pub fn decode(&mut self) -> Result<RgbaImage, PngDecodeErrors> {
        let pixels = self.decode_raw()?;

        RgbaImage::new(self.png_info.width, self.png_info.height, pixels)
    }

    /// Size of the inflated stream, one filter byte per row plus the pixels
    pub(crate) fn raw_stream_size(&self) -> Option<usize> {
        self.png_info
            .width
            .checked_mul(RGBA_COMPONENTS)
            .and_then(|x| x.checked_add(1))
            .and_then(|x| x.checked_mul(self.png_info.height))
    }

    fn inflate(&mut self) -> Result<Vec<u8>, PngDecodeErrors> {
        let expected = self.raw_stream_size().ok_or(PngDecodeErrors::DimensionsTooLarge(
            self.png_info.width,
            self.png_info.height
        ))?;
        // the stream never needs to grow beyond the image size
        let limit = expected.min(self.options.inflate_get_limit());

        let option = DeflateOptions::default()
            .set_size_hint(limit)
            .set_limit(limit)
            .set_confirm_checksum(self.options.inflate_get_confirm_adler());

        let mut decoder = DeflateDecoder::new_with_options(&self.idat_chunks, option);

        let data = match decoder.decode_zlib() {
            Ok(data) => data,
            // hit the image size rather than the configured limit
            Err(DecodeErrorStatus::OutputLimitExceeded(..)) if limit == expected => {
                trace!("Inflated stream is larger than the {expected} bytes the image needs");
                return Err(PngDecodeErrors::CorruptChunk(
                    "IDAT data is larger than the image"
                ));
            }
            Err(err) => return Err(err.into())
        };

        trace!("Inflated {} bytes from {} IDAT bytes", data.len(), self.idat_chunks.len());

        Ok(data)
    }

    /// Undo scanline filtering of the inflated stream
    fn create_png_image_raw(&self, deflate_data: &[u8]) -> Result<Vec<u8>, PngDecodeErrors> {
        let info = &self.png_info;
        let components = RGBA_COMPONENTS;

        // bytes per scanline, without the filter byte
        let width_stride = info.width * components;
        // filter byte plus the pixels
        let chunk_size = width_stride + 1;

        if deflate_data.len() < chunk_size * info.height {
            trace!(
                "Not enough pixels, expected {} but found {}",
                chunk_size * info.height,
                deflate_data.len()
            );
            return Err(PngDecodeErrors::OutOfData);
        }
        let mut out = vec![0_u8; width_stride * info.height];

        let mut prev_row_start = 0;
        let mut first_row = true;
        let mut out_position = 0;

        for in_stride in deflate_data.chunks_exact(chunk_size).take(info.height) {
            // Split output into current and previous
            // current points to the start of the row where we are writing de-filtered output to
            // prev is all rows we already wrote output to.
            let (prev, current) = out.split_at_mut(out_position);

            let current = &mut current[..width_stride];

            // take filter
            let filter_byte = in_stride[0];
            // raw image bytes
            let raw = &in_stride[1..];

            let filter = FilterMethod::from_int(filter_byte)
                .ok_or(PngDecodeErrors::InvalidFilterType(filter_byte))?;

            if first_row {
                // the row above the first row is treated as zeroes,
                // so up becomes a copy and average/paeth only look left
                match filter {
                    FilterMethod::None | FilterMethod::Up => current.copy_from_slice(raw),
                    FilterMethod::Sub => handle_sub(raw, current, components),
                    FilterMethod::Average => handle_avg_first(raw, current, components),
                    FilterMethod::Paeth => handle_paeth_first(raw, current, components)
                }
                first_row = false;
            } else {
                let prev_row = &prev[prev_row_start..prev_row_start + width_stride];
                prev_row_start += width_stride;

                match filter {
                    FilterMethod::None => current.copy_from_slice(raw),
                    FilterMethod::Sub => handle_sub(raw, current, components),
                    FilterMethod::Up => handle_up(prev_row, raw, current),
                    FilterMethod::Average => handle_avg(prev_row, raw, current, components),
                    FilterMethod::Paeth => handle_paeth(prev_row, raw, current, components)
                }
            }
            out_position += width_stride;
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use stipple_core::bytestream::ByteWriter;
    use stipple_core::options::DecoderOptions;

    use super::PngDecoder;
    use crate::crc::crc32;
    use crate::error::PngDecodeErrors;

    /// Build a png from (name, data) chunks, computing every crc
    fn build_png(chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
        let mut writer = ByteWriter::new();
        writer.write_all(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);

        for (name, data) in chunks {
            writer.write_u32_be(data.len() as u32);
            writer.write_all(*name);
            writer.write_all(data);

            let mut crc_input = name.to_vec();
            crc_input.extend_from_slice(data);
            writer.write_u32_be(crc32(&crc_input));
        }
        writer.into_inner()
    }

    fn ihdr(width: u32, height: u32, depth: u8, color: u8) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[depth, color, 0, 0, 0]);
        data
    }

    /// A zlib stream with a single stored block carrying `raw`
    fn stored_zlib(raw: &[u8]) -> Vec<u8> {
        let mut out = vec![0x78, 0x01, 0x01];
        out.extend_from_slice(&(raw.len() as u16).to_le_bytes());
        out.extend_from_slice(&(!(raw.len() as u16)).to_le_bytes());
        out.extend_from_slice(raw);
        out
    }

    #[test]
    fn first_row_filters_treat_above_as_zero() {
        // one row, two pixels, paeth on the first row only looks left
        let raw = [4, 1, 2, 3, 4, 1, 1, 1, 1];
        let idat = stored_zlib(&raw);
        let header = ihdr(2, 1, 8, 6);
        let png = build_png(&[(b"IHDR", &header[..]), (b"IDAT", &idat[..]), (b"IEND", &[])]);

        let pixels = PngDecoder::new(&png).decode_raw().unwrap();
        assert_eq!(pixels, [1, 2, 3, 4, 2, 3, 4, 5]);
    }

    #[test]
    fn bad_filter_byte() {
        let raw = [5, 1, 2, 3, 4];
        let idat = stored_zlib(&raw);
        let header = ihdr(1, 1, 8, 6);
        let png = build_png(&[(b"IHDR", &header[..]), (b"IDAT", &idat[..]), (b"IEND", &[])]);

        let err = PngDecoder::new(&png).decode_raw().unwrap_err();
        assert_eq!(err, PngDecodeErrors::InvalidFilterType(5));
    }

    #[test]
    fn short_inflated_stream() {
        let raw = [0, 1, 2, 3, 4];
        let idat = stored_zlib(&raw);
        let header = ihdr(1, 2, 8, 6);
        let png = build_png(&[(b"IHDR", &header[..]), (b"IDAT", &idat[..]), (b"IEND", &[])]);

        let err = PngDecoder::new(&png).decode_raw().unwrap_err();
        assert_eq!(err, PngDecodeErrors::OutOfData);
    }

    #[test]
    fn surplus_image_data() {
        // one pixel image carrying two rows
        let raw = [0, 1, 2, 3, 4, 0, 5, 6, 7, 8];
        let idat = stored_zlib(&raw);
        let header = ihdr(1, 1, 8, 6);
        let png = build_png(&[(b"IHDR", &header[..]), (b"IDAT", &idat[..]), (b"IEND", &[])]);

        let err = PngDecoder::new(&png).decode_raw().unwrap_err();
        assert!(matches!(err, PngDecodeErrors::CorruptChunk(_)), "{err:?}");

        // a smaller configured limit is still reported as such
        let options = DecoderOptions::default().inflate_set_limit(2);
        let err = PngDecoder::new_with_options(&png, options).decode_raw().unwrap_err();
        assert!(matches!(err, PngDecodeErrors::OutputLimitExceeded(2, _)), "{err:?}");
    }

    #[test]
    fn missing_idat() {
        let header = ihdr(1, 1, 8, 6);
        let png = build_png(&[(b"IHDR", &header[..]), (b"IEND", &[])]);

        let err = PngDecoder::new(&png).decode_raw().unwrap_err();
        assert_eq!(err, PngDecodeErrors::OutOfData);
    }

    #[test]
    fn missing_iend() {
        let raw = [0, 1, 2, 3, 4];
        let idat = stored_zlib(&raw);
        let header = ihdr(1, 1, 8, 6);
        let png = build_png(&[(b"IHDR", &header[..]), (b"IDAT", &idat[..])]);

        let err = PngDecoder::new(&png).decode_raw().unwrap_err();
        assert_eq!(err, PngDecodeErrors::OutOfData);
    }

    #[test]
    fn second_ihdr_is_corrupt() {
        let header = ihdr(1, 1, 8, 6);
        let png = build_png(&[(b"IHDR", &header[..]), (b"IHDR", &header[..]), (b"IEND", &[])]);

        let err = PngDecoder::new(&png).decode_raw().unwrap_err();
        assert!(matches!(err, PngDecodeErrors::CorruptChunk(_)));
    }

    #[test]
    fn first_chunk_must_be_ihdr() {
        let png = build_png(&[(b"IEND", &[])]);

        let err = PngDecoder::new(&png).decode_headers().unwrap_err();
        assert!(matches!(err, PngDecodeErrors::CorruptChunk(_)));
    }

    #[test]
    fn ihdr_with_bad_length() {
        let mut header = ihdr(1, 1, 8, 6);
        header.push(0);
        let png = build_png(&[(b"IHDR", &header[..]), (b"IEND", &[])]);

        let err = PngDecoder::new(&png).decode_headers().unwrap_err();
        assert!(matches!(err, PngDecodeErrors::CorruptChunk(_)));
    }

    #[test]
    fn unsupported_headers() {
        for (depth, color) in [(16, 6), (8, 3), (8, 2), (8, 0), (1, 0)] {
            let header = ihdr(4, 4, depth, color);
            let png = build_png(&[(b"IHDR", &header[..]), (b"IEND", &[])]);

            let err = PngDecoder::new(&png).decode_headers().unwrap_err();
            assert!(
                matches!(err, PngDecodeErrors::UnsupportedFormat(_)),
                "depth {depth} color {color} gave {err:?}"
            );
        }
        let header = ihdr(0, 4, 8, 6);
        let png = build_png(&[(b"IHDR", &header[..]), (b"IEND", &[])]);
        let err = PngDecoder::new(&png).decode_headers().unwrap_err();
        assert!(matches!(err, PngDecodeErrors::UnsupportedFormat(_)));

        let mut header = ihdr(4, 4, 8, 6);
        // interlaced
        header[12] = 1;
        let png = build_png(&[(b"IHDR", &header[..]), (b"IEND", &[])]);
        let err = PngDecoder::new(&png).decode_headers().unwrap_err();
        assert!(matches!(err, PngDecodeErrors::UnsupportedFormat(_)));
    }

    #[test]
    fn headers_without_pixels() {
        let header = ihdr(640, 480, 8, 6);
        // no IDAT or IEND, headers only need the IHDR
        let png = build_png(&[(b"IHDR", &header[..])]);

        let mut decoder = PngDecoder::new(&png);
        assert!(decoder.get_info().is_none());

        decoder.decode_headers().unwrap();
        assert_eq!(decoder.get_dimensions(), Some((640, 480)));

        let info = decoder.get_info().unwrap();
        assert_eq!(info.depth, 8);
        assert_eq!(info.color.to_int(), 6);
    }
}
