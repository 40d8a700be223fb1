/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::builder::PossibleValue;
use clap::{value_parser, Arg, ArgAction, Command, ValueEnum};
use stipple_png::FilterMethod;

/// Row filter selectable from the command line
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum RowFilter {
    None,
    Sub,
    Up,
    Average,
    Paeth
}

impl RowFilter {
    pub fn to_filter_method(self) -> FilterMethod {
        match self {
            Self::None => FilterMethod::None,
            Self::Sub => FilterMethod::Sub,
            Self::Up => FilterMethod::Up,
            Self::Average => FilterMethod::Average,
            Self::Paeth => FilterMethod::Paeth
        }
    }
}

impl ValueEnum for RowFilter {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::None, Self::Sub, Self::Up, Self::Average, Self::Paeth]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::None => PossibleValue::new("none"),
            Self::Sub => PossibleValue::new("sub"),
            Self::Up => PossibleValue::new("up"),
            Self::Average => PossibleValue::new("average"),
            Self::Paeth => PossibleValue::new("paeth")
        })
    }
}

#[rustfmt::skip]
fn input_arg() -> Arg {
    Arg::new("in")
        .short('i')
        .long("input")
        .help("Input file to read data from")
        .value_parser(value_parser!(PathBuf))
        .required(true)
}

#[rustfmt::skip]
fn output_arg() -> Arg {
    Arg::new("out")
        .short('o')
        .long("output")
        .help("Output to write the data to")
        .value_parser(value_parser!(PathBuf))
        .required(true)
}

#[rustfmt::skip]
fn filter_arg() -> Arg {
    Arg::new("filter")
        .long("filter")
        .help_heading("ENCODING")
        .help("Filter applied to every row of the written png")
        .value_parser(value_parser!(RowFilter))
        .default_value("none")
}

#[rustfmt::skip]
fn idat_size_arg() -> Arg {
    Arg::new("idat-size")
        .long("idat-size")
        .help_heading("ENCODING")
        .help("Maximum size of a single IDAT chunk")
        .value_parser(value_parser!(usize))
        .default_value("8192")
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("stipple")
        .about("Decode, encode and inspect 8 bit RGBA png files")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new("probe")
            .about("Print the png header of each file as json")
            .arg(Arg::new("in")
                .help("Files to probe")
                .value_parser(value_parser!(PathBuf))
                .action(ArgAction::Append)
                .required(true)))
        .subcommand(Command::new("decode")
            .about("Decode a png into raw RGBA bytes")
            .arg(input_arg())
            .arg(output_arg()))
        .subcommand(Command::new("encode")
            .about("Encode raw RGBA bytes into a png")
            .arg(input_arg())
            .arg(output_arg())
            .arg(Arg::new("width")
                .long("width")
                .help("Width of the raw image")
                .value_parser(value_parser!(usize))
                .required(true))
            .arg(Arg::new("height")
                .long("height")
                .help("Height of the raw image")
                .value_parser(value_parser!(usize))
                .required(true))
            .arg(filter_arg())
            .arg(idat_size_arg()))
        .subcommand(Command::new("restore")
            .about("Decode a png and write it back out")
            .arg(input_arg())
            .arg(output_arg())
            .arg(filter_arg())
            .arg(idat_size_arg()))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("LOGGING")
            .help("Display information about the decoding options"))
        .arg(Arg::new("no-crc")
            .long("no-crc")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("DECODING")
            .help("Do not confirm chunk checksums"))
        .arg(Arg::new("confirm-adler")
            .long("confirm-adler")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("DECODING")
            .help("Confirm the adler32 checksum of the image data"))
        .arg(Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .global(true)
            .help_heading("DECODING")
            .help("Treat unknown critical chunks as errors")
            .long_help("Treat unknown critical chunks as errors.\nAlso turns on every checksum, --no-crc still overrides chunk checksums"))
        .arg(Arg::new("max-width")
            .long("max-width")
            .global(true)
            .help_heading("DECODING")
            .help("Maximum width of images to decode")
            .value_parser(value_parser!(usize))
            .default_value("131072"))
        .arg(Arg::new("max-height")
            .long("max-height")
            .global(true)
            .help_heading("DECODING")
            .help("Maximum height of images to decode")
            .value_parser(value_parser!(usize))
            .default_value("131072"))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{create_cmd_args, RowFilter};

    #[test]
    fn command_is_well_formed() {
        create_cmd_args().debug_assert();
    }

    #[test]
    fn encode_arguments() {
        let matches = create_cmd_args()
            .try_get_matches_from([
                "stipple", "encode", "-i", "in.rgba", "-o", "out.png", "--width", "3", "--height",
                "2", "--filter", "paeth", "--trace"
            ])
            .unwrap();

        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "encode");
        assert_eq!(sub.get_one::<PathBuf>("in"), Some(&PathBuf::from("in.rgba")));
        assert_eq!(sub.get_one::<usize>("width"), Some(&3));
        assert_eq!(sub.get_one::<RowFilter>("filter"), Some(&RowFilter::Paeth));
        assert_eq!(sub.get_one::<usize>("idat-size"), Some(&8192));
        assert!(sub.get_flag("trace"));
        assert!(!sub.get_flag("no-crc"));
    }

    #[test]
    fn global_flags_before_the_command() {
        let matches = create_cmd_args()
            .try_get_matches_from(["stipple", "--no-crc", "--max-width", "10", "probe", "a.png"])
            .unwrap();

        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "probe");
        assert!(sub.get_flag("no-crc"));
        assert_eq!(sub.get_one::<usize>("max-width"), Some(&10));
    }

    #[test]
    fn missing_arguments_fail() {
        assert!(create_cmd_args()
            .try_get_matches_from(["stipple", "encode", "-i", "a", "-o", "b"])
            .is_err());
        assert!(create_cmd_args().try_get_matches_from(["stipple"]).is_err());
    }
}
