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
use stipple_core::bytestream::ByteWriter;
use stipple_core::options::EncoderOptions;
use stipple_inflate::{DeflateEncoder, DeflateEncodingOptions};

use crate::constants::{PNG_SIGNATURE, RGBA_COMPONENTS};
use crate::enums::FilterMethod;
use crate::filters::filter_scanline;
use crate::headers::writers::{write_chunk, write_header_fn, write_iend, write_ihdr};
use crate::image::RgbaImage;

/// A png encoder for 8 bit RGBA images
///
/// The pixel data is stored uncompressed inside a zlib stream,
/// rows are unfiltered unless a filter is selected with
/// [`set_row_filter`](Self::set_row_filter).
pub struct PngEncoder<'a> {
    pub(crate) options:    EncoderOptions,
    pub(crate) image:      &'a RgbaImage,
    pub(crate) row_filter: FilterMethod
}

impl<'a> PngEncoder<'a> {
    /// Create a new encoder that can encode an image into a PNG file
    pub fn new(image: &'a RgbaImage) -> PngEncoder<'a> {
        PngEncoder::new_with_options(image, EncoderOptions::default())
    }

    pub fn new_with_options(image: &'a RgbaImage, options: EncoderOptions) -> PngEncoder<'a> {
        PngEncoder {
            options,
            image,
            row_filter: FilterMethod::None
        }
    }

    /// Set the filter applied to every row
    #[must_use]
    pub fn set_row_filter(mut self, filter: FilterMethod) -> Self {
        self.row_filter = filter;
        self
    }

    /// Encode the image returning the png file
    pub fn encode(&self) -> Vec<u8> {
        let filtered = self.add_filters();

        let deflate_options =
            DeflateEncodingOptions::default().set_store_checksum(self.options.get_store_checksum());

        let encoded = DeflateEncoder::new_with_options(&filtered, deflate_options).encode_zlib();

        // signature, IHDR, IDAT headers and IEND
        let overhead = 8 + 25 + 12 + 12 * (encoded.len() / self.idat_chunk_size() + 1);
        let mut writer = ByteWriter::with_capacity(encoded.len() + overhead);

        // write signature
        writer.write_u64_be(PNG_SIGNATURE);
        // write ihdr
        write_header_fn(self, &mut writer, b"IHDR", write_ihdr);

        self.write_idat_chunks(&encoded, &mut writer);

        write_header_fn(self, &mut writer, b"IEND", write_iend);

        trace!("Encoded png of {} bytes", writer.bytes_written());

        writer.into_inner()
    }

    fn idat_chunk_size(&self) -> usize {
        // zero would never make progress
        self.options.get_idat_chunk_size().max(1)
    }

    /// Prefix every row with its filter byte and filter it
    fn add_filters(&self) -> Vec<u8> {
        let scanline_size = self.image.width() * RGBA_COMPONENTS;
        let data = self.image.pixels();

        let mut filtered = vec![0_u8; (scanline_size + 1) * self.image.height()];

        // one row above the current processing row
        let mut previous_scanline: &[u8] = &[];

        for (filter_s, current_scanline) in filtered
            .chunks_exact_mut(scanline_size + 1)
            .zip(data.chunks_exact(scanline_size))
        {
            filter_scanline(
                current_scanline,
                previous_scanline,
                filter_s,
                self.row_filter,
                RGBA_COMPONENTS
            );
            previous_scanline = current_scanline;
        }
        filtered
    }

    fn write_idat_chunks(&self, encoded: &[u8], writer: &mut ByteWriter) {
        debug_assert!(!encoded.is_empty());

        for chunk in encoded.chunks(self.idat_chunk_size()) {
            write_chunk(b"IDAT", chunk, writer);
        }
    }
}
