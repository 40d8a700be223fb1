/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::{debug, info};
use stipple_png::{PngDecoder, PngEncoder, RgbaImage};

use crate::cmd_parsers::get_encoder_options;
use crate::cmd_parsers::global_options::CmdOptions;
use crate::errors::CmdErrors;
use crate::probe_files::probe_input_files;

pub(crate) fn run_subcommand(
    name: &str, args: &ArgMatches, cmd_opts: &CmdOptions
) -> Result<(), CmdErrors> {
    info!("Running {name}");

    match name {
        "probe" => probe_input_files(args),
        "decode" => decode_file(args, cmd_opts),
        "encode" => encode_file(args),
        "restore" => restore_file(args, cmd_opts),
        _ => Err(CmdErrors::GenericString(format!("Unknown command {name}")))
    }
}

fn get_path<'a>(args: &'a ArgMatches, id: &str) -> Result<&'a PathBuf, CmdErrors> {
    args.get_one::<PathBuf>(id)
        .ok_or_else(|| CmdErrors::GenericString(format!("Missing argument {id}")))
}

fn write_output(out_file: &Path, data: &[u8]) -> Result<(), CmdErrors> {
    let file = OpenOptions::new()
        .write(true)
        .truncate(true)
        .create(true)
        .open(out_file)?;

    let mut writer = BufWriter::new(file);
    writer.write_all(data)?;
    writer.flush()?;

    info!("Wrote {} bytes to {:?}", data.len(), out_file);
    Ok(())
}

fn read_png(in_file: &Path, cmd_opts: &CmdOptions) -> Result<RgbaImage, CmdErrors> {
    let data = std::fs::read(in_file)?;
    debug!("Read {} bytes from {:?}", data.len(), in_file);

    let mut decoder = PngDecoder::new_with_options(&data, cmd_opts.to_decoder_options());
    let image = decoder.decode()?;

    info!("Decoded {}x{} image", image.width(), image.height());
    Ok(image)
}

fn write_png(image: &RgbaImage, args: &ArgMatches, out_file: &Path) -> Result<(), CmdErrors> {
    let (options, filter) = get_encoder_options(args);
    debug!("Encoding with filter {:?} and {:?}", filter, options);

    let png = PngEncoder::new_with_options(image, options)
        .set_row_filter(filter)
        .encode();

    write_output(out_file, &png)
}

fn decode_file(args: &ArgMatches, cmd_opts: &CmdOptions) -> Result<(), CmdErrors> {
    let image = read_png(get_path(args, "in")?, cmd_opts)?;

    write_output(get_path(args, "out")?, image.pixels())
}

fn encode_file(args: &ArgMatches) -> Result<(), CmdErrors> {
    let width = *args.get_one::<usize>("width").ok_or("Missing width")?;
    let height = *args.get_one::<usize>("height").ok_or("Missing height")?;

    let pixels = std::fs::read(get_path(args, "in")?)?;
    let image = RgbaImage::new(width, height, pixels)?;

    write_png(&image, args, get_path(args, "out")?)
}

fn restore_file(args: &ArgMatches, cmd_opts: &CmdOptions) -> Result<(), CmdErrors> {
    let image = read_png(get_path(args, "in")?, cmd_opts)?;

    write_png(&image, args, get_path(args, "out")?)
}
