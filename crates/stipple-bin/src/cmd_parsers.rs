/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use stipple_core::options::EncoderOptions;
use stipple_png::FilterMethod;

use crate::cmd_args::RowFilter;

pub mod global_options;

/// Read the encoder options and row filter of `encode`/`restore`
pub fn get_encoder_options(options: &ArgMatches) -> (EncoderOptions, FilterMethod) {
    let filter = options
        .get_one::<RowFilter>("filter")
        .copied()
        .unwrap_or(RowFilter::None)
        .to_filter_method();

    let mut encoder_options = EncoderOptions::default();

    if let Some(size) = options.get_one::<usize>("idat-size") {
        encoder_options = encoder_options.set_idat_chunk_size(*size);
    }
    (encoder_options, filter)
}
