/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Invalid and unsupported inputs must fail with the right error,
//! and never panic.

use std::sync::atomic::{AtomicUsize, Ordering};

use nanorand::Rng;
use stipple_png::stipple_core::bytestream::ByteReader;
use stipple_png::stipple_core::options::DecoderOptions;
use stipple_png::{crc32, PngDecodeErrors, PngDecoder, RgbaImage};

fn sample_png() -> Vec<u8> {
    let pixels = (0..16 * 16 * 4).map(|x| (x % 256) as u8).collect();
    let image = RgbaImage::new(16, 16, pixels).unwrap();
    stipple_png::encode(&image)
}

fn chunk(name: &[u8; 4], data: &[u8]) -> Vec<u8> {
    let mut out = (data.len() as u32).to_be_bytes().to_vec();
    out.extend_from_slice(name);
    out.extend_from_slice(data);

    let mut crc_data = name.to_vec();
    crc_data.extend_from_slice(data);
    out.extend_from_slice(&crc32(&crc_data).to_be_bytes());
    out
}

/// Insert `extra` right after the IHDR chunk
fn insert_after_ihdr(png: &[u8], extra: &[u8]) -> Vec<u8> {
    // signature + IHDR
    let split = 8 + 25;
    let mut out = png[..split].to_vec();
    out.extend_from_slice(extra);
    out.extend_from_slice(&png[split..]);
    out
}

#[test]
fn test_bad_signature() {
    let mut png = sample_png();
    png[0] = 0x88;

    assert_eq!(stipple_png::decode(&png), Err(PngDecodeErrors::BadSignature));
}

#[test]
fn test_empty_and_tiny_inputs() {
    assert_eq!(stipple_png::decode(&[]), Err(PngDecodeErrors::OutOfData));
    assert_eq!(stipple_png::decode(&[0x89, b'P']), Err(PngDecodeErrors::OutOfData));
    assert_eq!(
        stipple_png::decode(&[0x00, b'P', b'N', b'G']),
        Err(PngDecodeErrors::BadSignature)
    );
    assert_eq!(stipple_png::decode(&[0x89, b'P', b'N', b'X']), Err(PngDecodeErrors::BadSignature));
}

#[test]
fn test_palette_image_is_unsupported() {
    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&4_u32.to_be_bytes());
    ihdr.extend_from_slice(&4_u32.to_be_bytes());
    // depth 8, colour type 3
    ihdr.extend_from_slice(&[8, 3, 0, 0, 0]);

    let mut png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    png.extend(chunk(b"IHDR", &ihdr));
    png.extend(chunk(b"PLTE", &[0, 0, 0]));
    png.extend(chunk(b"IEND", &[]));

    let err = stipple_png::decode(&png).unwrap_err();
    assert!(matches!(err, PngDecodeErrors::UnsupportedFormat(_)), "{err:?}");
}

#[test]
fn test_crc_mismatch() {
    let mut png = sample_png();
    // last byte of the IHDR crc
    png[32] ^= 0xFF;

    let err = stipple_png::decode(&png).unwrap_err();
    assert!(matches!(err, PngDecodeErrors::ChunkCrcMismatch(name, _, _) if &name == b"IHDR"));

    // and ignored when crc checking is off
    let options = DecoderOptions::default().png_set_confirm_crc(false);
    assert!(PngDecoder::new_with_options(&png, options).decode().is_ok());
}

#[test]
fn test_corrupt_idat_crc() {
    let mut png = sample_png();
    // last byte of the first IDAT crc, the file only has one
    let idat_len = u32::from_be_bytes(png[33..37].try_into().unwrap()) as usize;
    png[33 + 8 + idat_len + 3] ^= 0x01;

    let err = stipple_png::decode(&png).unwrap_err();
    assert!(matches!(err, PngDecodeErrors::ChunkCrcMismatch(name, _, _) if &name == b"IDAT"));
}

#[test]
fn test_corrupt_palette_crc() {
    let png = sample_png();
    let mut palette = chunk(b"PLTE", &[1, 2, 3]);
    let last = palette.len() - 1;
    palette[last] ^= 0xFF;
    let with_palette = insert_after_ihdr(&png, &palette);

    let err = stipple_png::decode(&with_palette).unwrap_err();
    assert!(matches!(err, PngDecodeErrors::ChunkCrcMismatch(name, _, _) if &name == b"PLTE"));

    let options = DecoderOptions::default().png_set_confirm_crc(false);
    assert!(PngDecoder::new_with_options(&with_palette, options).decode().is_ok());
}

#[test]
fn test_unknown_chunks() {
    let png = sample_png();

    // ancillary chunks are skipped without looking at their crc
    let mut ancillary = chunk(b"tEXt", b"Comment\0hello");
    let last = ancillary.len() - 1;
    ancillary[last] ^= 0xFF;
    let with_ancillary = insert_after_ihdr(&png, &ancillary);

    assert!(stipple_png::decode(&with_ancillary).is_ok());

    // unknown critical chunks are skipped unless strict mode is on
    let with_critical = insert_after_ihdr(&png, &chunk(b"ABCD", &[1, 2, 3]));
    assert!(stipple_png::decode(&with_critical).is_ok());

    let options = DecoderOptions::default().png_set_strict_chunks(true);
    let err = PngDecoder::new_with_options(&with_critical, options).decode().unwrap_err();
    assert_eq!(err, PngDecodeErrors::UnknownCriticalChunk(*b"ABCD"));

    // a palette is a suggestion for RGBA images, even in strict mode
    let with_palette = insert_after_ihdr(&png, &chunk(b"PLTE", &[1, 2, 3]));
    let options = DecoderOptions::default().set_strict_mode(true);
    assert!(PngDecoder::new_with_options(&with_palette, options).decode().is_ok());
}

static TEXT_CHUNKS_SEEN: AtomicUsize = AtomicUsize::new(0);

/// Count tEXt chunks and refuse every other chunk
fn counting_handler(
    length: usize, chunk_type: [u8; 4], reader: &mut ByteReader, _strict: bool
) -> Result<(), PngDecodeErrors> {
    if &chunk_type != b"tEXt" {
        return Err(PngDecodeErrors::UnknownCriticalChunk(chunk_type));
    }
    TEXT_CHUNKS_SEEN.fetch_add(1, Ordering::SeqCst);
    reader.skip(length + 4)?;
    Ok(())
}

#[test]
fn test_custom_chunk_handler() {
    let png = sample_png();
    let text = chunk(b"tEXt", b"Comment\0hello");
    let mut with_text = insert_after_ihdr(&png, &text);
    with_text = insert_after_ihdr(&with_text, &text);

    let image = PngDecoder::new(&with_text)
        .set_chunk_handler(counting_handler)
        .decode()
        .unwrap();
    assert_eq!(image.width(), 16);
    assert_eq!(TEXT_CHUNKS_SEEN.load(Ordering::SeqCst), 2);

    // errors from the handler end the decode, even outside strict mode
    let with_ancillary = insert_after_ihdr(&png, &chunk(b"gAMA", &[0, 0, 0xB1, 0x8F]));
    let err = PngDecoder::new(&with_ancillary)
        .set_chunk_handler(counting_handler)
        .decode()
        .unwrap_err();
    assert_eq!(err, PngDecodeErrors::UnknownCriticalChunk(*b"gAMA"));
}

#[test]
fn test_chunk_longer_than_input() {
    let png = sample_png();
    let mut truncated = insert_after_ihdr(&png, &chunk(b"tEXt", &[0; 10]));
    // claim a length beyond the end of the file
    truncated[33..37].copy_from_slice(&u32::MAX.to_be_bytes());

    assert_eq!(stipple_png::decode(&truncated), Err(PngDecodeErrors::OutOfData));
}

#[test]
fn test_dimension_limits() {
    let png = sample_png();

    let options = DecoderOptions::default().set_max_width(15);
    let err = PngDecoder::new_with_options(&png, options).decode().unwrap_err();
    assert_eq!(err, PngDecodeErrors::DimensionsTooLarge(16, 16));

    let options = DecoderOptions::default().set_max_height(16);
    assert!(PngDecoder::new_with_options(&png, options).decode().is_ok());
}

#[test]
fn test_huge_dimensions_are_rejected_before_allocating() {
    let mut ihdr = Vec::new();
    ihdr.extend_from_slice(&u32::MAX.to_be_bytes());
    ihdr.extend_from_slice(&u32::MAX.to_be_bytes());
    ihdr.extend_from_slice(&[8, 6, 0, 0, 0]);

    let mut png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    png.extend(chunk(b"IHDR", &ihdr));
    png.extend(chunk(b"IEND", &[]));

    let err = stipple_png::decode(&png).unwrap_err();
    assert!(matches!(err, PngDecodeErrors::DimensionsTooLarge(_, _)));
}

#[test]
fn test_truncated_files_fail() {
    let png = sample_png();

    for end in 0..png.len() {
        let result = stipple_png::decode(&png[..end]);
        assert!(result.is_err(), "decoding {end} bytes succeeded");
    }
}

#[test]
fn test_corrupt_data_does_not_panic() {
    let png = sample_png();
    let mut rand = nanorand::WyRand::new_seed(0x504E47);

    // flip bytes in the image data, crc checks off so they reach inflate
    let options = DecoderOptions::default().png_set_confirm_crc(false);

    for _ in 0..2000 {
        let mut corrupt = png.clone();
        for _ in 0..rand.generate_range(1_usize..8) {
            let position = rand.generate_range(8_usize..corrupt.len());
            corrupt[position] = rand.generate();
        }
        let _ = PngDecoder::new_with_options(&corrupt, options).decode();
    }
}

#[test]
fn test_random_input_does_not_panic() {
    let mut rand = nanorand::WyRand::new_seed(0xBAD);
    let signature = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    for _ in 0..500 {
        let mut data = signature.to_vec();
        data.extend(chunk(b"IHDR", &[0, 0, 0, 8, 0, 0, 0, 8, 8, 6, 0, 0, 0]));

        let mut noise = vec![0_u8; rand.generate_range(0_usize..512)];
        rand.fill(&mut noise);
        data.extend(chunk(b"IDAT", &noise));
        data.extend(chunk(b"IEND", &[]));

        let _ = stipple_png::decode(&data);
    }
}
