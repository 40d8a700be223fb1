/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

#![allow(clippy::upper_case_acronyms, non_camel_case_types)]

/// Chunk types the decoder acts on, see table 5.3 of
/// https://www.w3.org/TR/2003/REC-PNG-20031110/
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PngChunkType {
    IHDR,
    PLTE,
    IDAT,
    IEND,
    unkn
}

impl PngChunkType {
    pub fn from_chunk_name(name: &[u8; 4]) -> PngChunkType {
        match name {
            b"IHDR" => PngChunkType::IHDR,
            b"PLTE" => PngChunkType::PLTE,
            b"IDAT" => PngChunkType::IDAT,
            b"IEND" => PngChunkType::IEND,
            _ => PngChunkType::unkn
        }
    }
}

/// Scanline filter types
///
/// Every row of the image is prefixed by one of these,
/// describing how the row was transformed before compression
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum FilterMethod {
    #[default]
    None,
    Sub,
    Up,
    Average,
    Paeth
}

impl FilterMethod {
    pub fn from_int(int: u8) -> Option<FilterMethod> {
        match int {
            0 => Some(FilterMethod::None),
            1 => Some(FilterMethod::Sub),
            2 => Some(FilterMethod::Up),
            3 => Some(FilterMethod::Average),
            4 => Some(FilterMethod::Paeth),
            _ => None
        }
    }

    pub const fn to_int(self) -> u8 {
        match self {
            FilterMethod::None => 0,
            FilterMethod::Sub => 1,
            FilterMethod::Up => 2,
            FilterMethod::Average => 3,
            FilterMethod::Paeth => 4
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum InterlaceMethod {
    #[default]
    Standard,
    Adam7,
    Unknown
}

impl InterlaceMethod {
    pub fn from_int(int: u8) -> InterlaceMethod {
        match int {
            0 => Self::Standard,
            1 => Self::Adam7,
            _ => Self::Unknown
        }
    }
}

/// Colour types from the IHDR chunk
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum PngColor {
    Luma,
    Palette,
    LumaA,
    RGB,
    #[default]
    RGBA,
    Unknown
}

impl PngColor {
    pub fn from_int(int: u8) -> PngColor {
        match int {
            0 => Self::Luma,
            2 => Self::RGB,
            3 => Self::Palette,
            4 => Self::LumaA,
            6 => Self::RGBA,
            _ => Self::Unknown
        }
    }

    pub const fn to_int(self) -> u8 {
        match self {
            PngColor::Luma => 0,
            PngColor::RGB => 2,
            PngColor::Palette => 3,
            PngColor::LumaA => 4,
            PngColor::RGBA => 6,
            PngColor::Unknown => 255
        }
    }
}
