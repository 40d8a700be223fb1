/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::format;

use log::info;

use crate::constants::RGBA_COMPONENTS;
use crate::decoder::PngChunk;
use crate::enums::{InterlaceMethod, PngColor};
use crate::error::PngDecodeErrors;
use crate::PngDecoder;

pub(crate) mod writers;

impl<'a> PngDecoder<'a> {
    pub(crate) fn parse_ihdr(&mut self, chunk: PngChunk) -> Result<(), PngDecodeErrors> {
        if self.seen_hdr {
            return Err(PngDecodeErrors::CorruptChunk("Multiple IHDR, corrupt PNG"));
        }

        if chunk.length != 13 {
            return Err(PngDecodeErrors::CorruptChunk("BAD IHDR length"));
        }

        let info = &mut self.png_info;

        info.width = self.stream.get_u32_be_err()? as usize;
        info.height = self.stream.get_u32_be_err()? as usize;
        info.depth = self.stream.get_u8_err()?;
        info.color = PngColor::from_int(self.stream.get_u8_err()?);
        info.compression_method = self.stream.get_u8_err()?;
        info.filter_method = self.stream.get_u8_err()?;

        let interlace_method = self.stream.get_u8_err()?;
        info.interlace_method = InterlaceMethod::from_int(interlace_method);

        // skip crc
        self.stream.skip(4)?;

        info!("Width: {}", info.width);
        info!("Height: {}", info.height);
        info!("Color type: {:?}", info.color);
        info!("Depth: {:?}", info.depth);
        info!("Interlace :{:?}", info.interlace_method);

        if info.width == 0 || info.height == 0 {
            return Err(PngDecodeErrors::UnsupportedFormat(format!(
                "Width or height cannot be zero, found {}x{}",
                info.width, info.height
            )));
        }
        if info.depth != 8 {
            return Err(PngDecodeErrors::UnsupportedFormat(format!(
                "Bit depth {} is not supported, only 8 bit images are",
                info.depth
            )));
        }
        if info.color != PngColor::RGBA {
            return Err(PngDecodeErrors::UnsupportedFormat(format!(
                "Colour {:?} is not supported, only RGBA images are",
                info.color
            )));
        }
        if info.compression_method != 0 {
            return Err(PngDecodeErrors::UnsupportedFormat(format!(
                "Unknown compression method {}",
                info.compression_method
            )));
        }
        if info.filter_method != 0 {
            return Err(PngDecodeErrors::UnsupportedFormat(format!(
                "Unknown filter method {}",
                info.filter_method
            )));
        }
        if info.interlace_method != InterlaceMethod::Standard {
            return Err(PngDecodeErrors::UnsupportedFormat(format!(
                "Interlace method {interlace_method} is not supported"
            )));
        }

        if info.width > self.options.get_max_width() || info.height > self.options.get_max_height()
        {
            info!(
                "Image dimensions {}x{} larger than configured maximum {}x{}",
                info.width,
                info.height,
                self.options.get_max_width(),
                self.options.get_max_height()
            );
            return Err(PngDecodeErrors::DimensionsTooLarge(info.width, info.height));
        }
        // the decoded image plus one filter byte per row must be addressable
        let fits = info
            .width
            .checked_mul(RGBA_COMPONENTS)
            .and_then(|x| x.checked_add(1))
            .and_then(|x| x.checked_mul(info.height))
            .is_some();

        if !fits {
            return Err(PngDecodeErrors::DimensionsTooLarge(info.width, info.height));
        }

        self.seen_hdr = true;

        Ok(())
    }

    pub(crate) fn parse_idat(&mut self, png_chunk: PngChunk) -> Result<(), PngDecodeErrors> {
        // get a reference to the IDAT chunk stream and push it,
        // we will later pass these to the deflate decoder as a whole, to get the whole
        // uncompressed stream.

        let idat_stream = self.stream.get_as_ref(png_chunk.length)?;

        self.idat_chunks.extend_from_slice(idat_stream);

        // skip crc
        self.stream.skip(4)?;

        Ok(())
    }
}
