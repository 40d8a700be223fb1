/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::ArgMatches;
use log::warn;
use stipple_core::options::DecoderOptions;
use stipple_png::PngDecoder;

use crate::errors::CmdErrors;
use crate::serde::Metadata;

/// Probe input files, extract metadata, and print to standard output.
pub fn probe_input_files(args: &ArgMatches) -> Result<(), CmdErrors> {
    let files = args
        .get_many::<PathBuf>("in")
        .ok_or("No files to probe")?;

    for in_file in files {
        if !in_file.exists() {
            warn!("File {:?} does not exist, skipping", in_file);
            continue;
        }
        let contents = std::fs::read(in_file)?;
        // set to high to remove restrictions.
        // We'll just be reading headers so it doesn't matter
        let options = DecoderOptions::new_cmd()
            .set_max_height(usize::MAX)
            .set_max_width(usize::MAX);

        let mut decoder = PngDecoder::new_with_options(&contents, options);

        match decoder.decode_headers() {
            Ok(()) => {
                if let Some(info) = decoder.get_info() {
                    let metadata =
                        Metadata::new(in_file.as_os_str().to_os_string(), contents.len() as u64, info);

                    println!("{}", serde_json::to_string_pretty(&metadata)?);
                }
            }
            Err(err) => warn!("Could not read headers of {:?}: {:?}", in_file, err)
        }
    }
    Ok(())
}
