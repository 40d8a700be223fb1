/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use clap::ArgMatches;
use log::{info, Level};
use stipple_core::options::DecoderOptions;

#[derive(Debug, Copy, Clone)]
pub struct CmdOptions {
    pub max_width:     usize,
    pub max_height:    usize,
    pub strict_mode:   bool,
    pub confirm_crc:   bool,
    pub confirm_adler: bool
}

impl CmdOptions {
    pub fn new() -> CmdOptions {
        let defaults = DecoderOptions::default();

        CmdOptions {
            max_width:     defaults.get_max_width(),
            max_height:    defaults.get_max_height(),
            strict_mode:   false,
            confirm_crc:   true,
            confirm_adler: false
        }
    }

    /// Decoder options matching the command line
    pub fn to_decoder_options(self) -> DecoderOptions {
        // strict mode turns every check on, so apply the
        // individual flags after it
        let mut options = DecoderOptions::default()
            .set_max_width(self.max_width)
            .set_max_height(self.max_height)
            .set_strict_mode(self.strict_mode)
            .png_set_confirm_crc(self.confirm_crc);

        if self.confirm_adler {
            options = options.inflate_set_confirm_adler(true);
        }
        options
    }
}

pub fn parse_options(options: &ArgMatches) -> CmdOptions {
    let mut cmd_options = CmdOptions::new();

    if let Some(width) = options.get_one::<usize>("max-width") {
        cmd_options.max_width = *width;
    }
    if let Some(height) = options.get_one::<usize>("max-height") {
        cmd_options.max_height = *height;
    }
    if options.get_flag("strict") {
        info!("Strict mode on, unknown critical chunks are errors");
        cmd_options.strict_mode = true;
    }
    if options.get_flag("no-crc") {
        info!("Ignoring chunk checksums");
        cmd_options.confirm_crc = false;
    }
    if options.get_flag("confirm-adler") {
        info!("Confirming adler32 checksums");
        cmd_options.confirm_adler = true;
    }
    cmd_options
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level;

    if options.get_flag("debug") {
        log_level = Level::Debug;
    } else if options.get_flag("trace") {
        log_level = Level::Trace;
    } else if options.get_flag("warn") {
        log_level = Level::Warn
    } else if options.get_flag("info") {
        log_level = Level::Info;
    } else {
        log_level = Level::Warn;
    }

    if let Err(err) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {err}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
