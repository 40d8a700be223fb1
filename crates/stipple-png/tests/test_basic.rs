/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use nanorand::Rng;
use stipple_png::stipple_core::options::{DecoderOptions, EncoderOptions};
use stipple_png::{FilterMethod, PngDecoder, PngEncoder, RgbaImage};

fn random_image(width: usize, height: usize, seed: u64) -> RgbaImage {
    let mut rand = nanorand::WyRand::new_seed(seed);
    let mut pixels = vec![0_u8; width * height * 4];
    rand.fill(&mut pixels);

    RgbaImage::new(width, height, pixels).unwrap()
}

/// A smooth image so that the reference encoder finds matches
fn smooth_image(width: usize, height: usize) -> RgbaImage {
    let mut pixels = Vec::with_capacity(width * height * 4);

    for y in 0..height {
        for x in 0..width {
            pixels.push((x * 255 / width) as u8);
            pixels.push((y * 255 / height) as u8);
            pixels.push(((x + y) % 256) as u8);
            pixels.push(if (x / 8 + y / 8) % 2 == 0 { 255 } else { 128 });
        }
    }
    RgbaImage::new(width, height, pixels).unwrap()
}

fn encode_ref(image: &RgbaImage, compression: png::Compression, filter: png::FilterType) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, image.width() as u32, image.height() as u32);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(compression);
        encoder.set_filter(filter);
        encoder.set_adaptive_filter(png::AdaptiveFilterType::Adaptive);

        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(image.pixels()).unwrap();
    }
    out
}

fn decode_ref(data: &[u8]) -> (u32, u32, Vec<u8>) {
    let decoder = png::Decoder::new(data);
    let mut reader = decoder.read_info().unwrap();

    // Allocate the output buffer.
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();

    assert_eq!(info.color_type, png::ColorType::Rgba);
    assert_eq!(info.bit_depth, png::BitDepth::Eight);

    buf.truncate(info.buffer_size());
    (info.width, info.height, buf)
}

#[test]
fn test_two_by_two() {
    let pixels = vec![
        255, 0, 0, 255, 0, 255, 0, 255, //
        0, 0, 255, 255, 255, 255, 255, 255,
    ];
    let image = RgbaImage::new(2, 2, pixels.clone()).unwrap();

    let decoded = stipple_png::decode(&stipple_png::encode(&image)).unwrap();

    assert_eq!(decoded.width(), 2);
    assert_eq!(decoded.height(), 2);
    assert_eq!(decoded.pixels(), &pixels[..]);
    assert_eq!(decoded.as_rgba()[3], [255, 255, 255, 255]);
}

#[test]
fn test_random_round_trips() {
    for (i, (width, height)) in [(1, 1), (7, 3), (64, 64), (333, 2), (2, 300)].iter().enumerate() {
        let image = random_image(*width, *height, i as u64);

        for filter in [
            FilterMethod::None,
            FilterMethod::Sub,
            FilterMethod::Up,
            FilterMethod::Average,
            FilterMethod::Paeth
        ] {
            let png = PngEncoder::new(&image).set_row_filter(filter).encode();
            let decoded = stipple_png::decode(&png).unwrap();

            assert_eq!(decoded, image, "{width}x{height} with {filter:?}");
        }
    }
}

#[test]
fn test_large_image_spans_stored_blocks() {
    // more than 65535 raw bytes, so the stream needs several stored blocks
    let image = random_image(300, 120, 42);

    let png = stipple_png::encode(&image);
    assert_eq!(stipple_png::decode(&png).unwrap(), image);
}

#[test]
fn test_multiple_idat_chunks() {
    let image = random_image(50, 50, 7);

    for size in [1, 13, 100, 1 << 20] {
        let options = EncoderOptions::default().set_idat_chunk_size(size);
        let png = PngEncoder::new_with_options(&image, options).encode();

        assert_eq!(stipple_png::decode(&png).unwrap(), image, "chunk size {size}");
    }
}

#[test]
fn test_without_adler_trailer() {
    let image = random_image(10, 10, 3);
    let options = EncoderOptions::default().set_store_checksum(false);
    let png = PngEncoder::new_with_options(&image, options).encode();

    assert_eq!(stipple_png::decode(&png).unwrap(), image);

    // but asking for it to be confirmed fails, the trailer is missing
    let options = DecoderOptions::default().inflate_set_confirm_adler(true);
    assert!(PngDecoder::new_with_options(&png, options).decode().is_err());
}

#[test]
fn test_adler_is_confirmed_when_asked() {
    let image = random_image(10, 10, 4);
    let png = stipple_png::encode(&image);

    let options = DecoderOptions::default().inflate_set_confirm_adler(true);
    let decoded = PngDecoder::new_with_options(&png, options).decode().unwrap();

    assert_eq!(decoded, image);
}

#[test]
fn test_decoding_reference_encoder_output() {
    let image = smooth_image(97, 61);

    for compression in [png::Compression::Fast, png::Compression::Default, png::Compression::Best] {
        for filter in [
            png::FilterType::NoFilter,
            png::FilterType::Sub,
            png::FilterType::Up,
            png::FilterType::Avg,
            png::FilterType::Paeth
        ] {
            let png = encode_ref(&image, compression, filter);

            let options = DecoderOptions::default().inflate_set_confirm_adler(true);
            let decoded = PngDecoder::new_with_options(&png, options).decode().unwrap();

            assert_eq!(decoded, image, "{compression:?} {filter:?}");
        }
    }
}

#[test]
fn test_reference_decoder_reads_our_output() {
    let image = random_image(123, 45, 9);

    for filter in [FilterMethod::None, FilterMethod::Paeth] {
        let png = PngEncoder::new(&image).set_row_filter(filter).encode();
        let (width, height, pixels) = decode_ref(&png);

        assert_eq!((width as usize, height as usize), (123, 45));
        assert_eq!(pixels, image.pixels());
    }
}

#[test]
fn test_headers_only() {
    let image = random_image(31, 17, 11);
    let png = stipple_png::encode(&image);

    let mut decoder = PngDecoder::new(&png);
    assert_eq!(decoder.get_dimensions(), None);

    decoder.decode_headers().unwrap();
    assert_eq!(decoder.get_dimensions(), Some((31, 17)));

    let info = *decoder.get_info().unwrap();
    assert_eq!(info.depth, 8);
    assert_eq!(info.width, 31);

    // decoding after the headers continues where they stopped
    assert_eq!(decoder.decode().unwrap(), image);
}

#[test]
fn test_ancillary_chunks_are_skipped() {
    let image = smooth_image(20, 20);
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, 20, 20);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_source_gamma(png::ScaledFloat::new(1.0 / 2.2));

        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(image.pixels()).unwrap();
    }
    let options = DecoderOptions::default().set_strict_mode(true);
    let decoded = PngDecoder::new_with_options(&out, options).decode().unwrap();

    assert_eq!(decoded, image);
}
