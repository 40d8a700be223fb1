/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use stipple_core::bytestream::ByteWriter;

use crate::crc::calc_crc_with_bytes;
use crate::encoder::PngEncoder;
use crate::enums::PngColor;

pub(crate) fn write_ihdr(ctx: &PngEncoder, output: &mut ByteWriter) {
    // write width and height, RgbaImage guarantees they fit
    output.write_u32_be(ctx.image.width() as u32);
    output.write_u32_be(ctx.image.height() as u32);
    // write depth
    output.write_u8(8);
    // write color
    output.write_u8(PngColor::RGBA.to_int());
    //compression method
    output.write_u8(0);
    // filter method, 0 is the only one defined,
    // the per row filter is stored in each scanline
    output.write_u8(0);
    // interlace method, always Standard
    output.write_u8(0);
}

// iend is a no-op
pub(crate) fn write_iend(_: &PngEncoder, _: &mut ByteWriter) {}

/// Write header writes the boilerplate for each png chunk
///
/// It writes the length, chunk type, calls a function to write the
/// data and then calculates the CRC chunk for that png and writes it.
///
/// This should be called with the appropriate inner function to write data
pub(crate) fn write_header_fn<F: Fn(&PngEncoder, &mut ByteWriter)>(
    v: &PngEncoder, writer: &mut ByteWriter, name: &[u8; 4], func: F
) {
    // format
    // length - chunk type - [data] -  crc chunk
    //
    // the length is only known after the data is written, so
    // leave space for it and patch it in later
    let start = writer.bytes_written();
    writer.write_u32_be(0);
    // write the type
    writer.write_all(name);
    // call underlying function
    (func)(v, writer);

    let end = writer.bytes_written();
    // length less the chunk name
    let length = (end - start - 8) as u32;
    writer.patch(start, &length.to_be_bytes());

    // write crc, ignore the length
    let crc = !calc_crc_with_bytes(&writer.as_slice()[start + 4..end], u32::MAX);
    writer.write_u32_be(crc);
}

/// Write a chunk whose data is already available
pub(crate) fn write_chunk(name: &[u8; 4], data: &[u8], writer: &mut ByteWriter) {
    // write length
    writer.write_u32_be(data.len() as u32);
    // write chunk name
    writer.write_all(name);
    // write chunk data
    writer.write_all(data);
    // crc is a continuous function, so first crc the chunk name
    // and then crc that with the chunk bytes passing in the previous crc

    // equal to crc((chunk.chunk + data) ,u32::MAX))
    let crc = calc_crc_with_bytes(name, u32::MAX);
    let crc = !calc_crc_with_bytes(data, crc);
    writer.write_u32_be(crc);
}
