/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! CRC-32 as used by png chunks (ISO 3309, reflected polynomial `0xEDB88320`)

const CRC_TABLE: [u32; 256] = {
    let mut table = [0_u32; 256];
    let mut n = 0;

    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;

        while k < 8 {
            if c & 1 == 1 {
                c = 0xEDB8_8320 ^ (c >> 1);
            } else {
                c >>= 1;
            }
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
};

/// Fold `bytes` into a running crc register
///
/// Start with `u32::MAX` and invert the final value,
/// calling this in pieces gives the same result as calling it once
/// on the concatenation.
#[inline]
pub fn calc_crc_with_bytes(bytes: &[u8], crc: u32) -> u32 {
    bytes.iter().fold(crc, |c, byte| {
        CRC_TABLE[((c ^ u32::from(*byte)) & 0xFF) as usize] ^ (c >> 8)
    })
}

/// Calculate the CRC-32 of `bytes`
///
/// ```
/// assert_eq!(stipple_png::crc32(b"123456789"), 0xCBF4_3926);
/// ```
pub fn crc32(bytes: &[u8]) -> u32 {
    !calc_crc_with_bytes(bytes, u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{calc_crc_with_bytes, crc32};

    #[test]
    fn known_values() {
        assert_eq!(crc32(b""), 0);
        assert_eq!(crc32(b"123456789"), 0xCBF4_3926);
        // crc of an IEND chunk
        assert_eq!(crc32(b"IEND"), 0xAE42_6082);
    }

    #[test]
    fn streaming_matches_one_shot() {
        let crc = calc_crc_with_bytes(b"IHDR", u32::MAX);
        let crc = !calc_crc_with_bytes(b"some chunk data", crc);

        assert_eq!(crc, crc32(b"IHDRsome chunk data"));
    }
}
