/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::process::exit;

use log::error;

use crate::workflow::run_subcommand;

mod cmd_args;
mod cmd_parsers;
mod errors;
mod probe_files;
mod serde;
mod workflow;

pub fn main() {
    let cmd = cmd_args::create_cmd_args();
    let options = cmd.get_matches();

    let Some((name, sub_options)) = options.subcommand() else {
        eprintln!("No command given, run with --help to see the available commands");
        exit(-1);
    };

    // global flags are propagated into the subcommand matches
    cmd_parsers::global_options::setup_logger(sub_options);

    let parsed_opts = cmd_parsers::global_options::parse_options(sub_options);

    if let Err(reason) = run_subcommand(name, sub_options, &parsed_opts) {
        println!();
        error!(" Could not complete {name}, reason {:?}", reason);
        println!();
        exit(-1);
    }
}
