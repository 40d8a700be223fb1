/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Png scanline filters
//!
//! `de_filter` undoes the five filters when decoding, `filter_scanline`
//! applies them when encoding. All arithmetic wraps modulo 256 and
//! bytes outside the image (left of the first pixel, above the first row)
//! are treated as zero.
pub use de_filter::*;

use crate::enums::FilterMethod;

mod de_filter;

/// Filter a single scanline
///
/// - `input`: the unfiltered row
/// - `previous_row`: the unfiltered row above, empty for the first row
/// - `output`: receives the filter byte followed by the filtered row,
///   must be `input.len() + 1` bytes
/// - `components`: bytes per pixel
pub fn filter_scanline(
    input: &[u8], previous_row: &[u8], output: &mut [u8], filter: FilterMethod, components: usize
) {
    debug_assert_eq!(output.len(), input.len() + 1);

    let (filter_byte, out) = output.split_at_mut(1);
    filter_byte[0] = filter.to_int();

    let up = |i: usize| previous_row.get(i).copied().unwrap_or(0);
    let left = |i: usize| {
        if i >= components {
            input[i - components]
        } else {
            0
        }
    };
    let up_left = |i: usize| {
        if i >= components {
            up(i - components)
        } else {
            0
        }
    };

    match filter {
        FilterMethod::None => out.copy_from_slice(input),
        FilterMethod::Sub => {
            for (i, (filt, raw)) in out.iter_mut().zip(input).enumerate() {
                *filt = raw.wrapping_sub(left(i));
            }
        }
        FilterMethod::Up => {
            for (i, (filt, raw)) in out.iter_mut().zip(input).enumerate() {
                *filt = raw.wrapping_sub(up(i));
            }
        }
        FilterMethod::Average => {
            for (i, (filt, raw)) in out.iter_mut().zip(input).enumerate() {
                let avg = (u16::from(left(i)) + u16::from(up(i))) >> 1;
                *filt = raw.wrapping_sub(avg as u8);
            }
        }
        FilterMethod::Paeth => {
            for (i, (filt, raw)) in out.iter_mut().zip(input).enumerate() {
                *filt = raw.wrapping_sub(paeth(left(i), up(i), up_left(i)));
            }
        }
    }
}
