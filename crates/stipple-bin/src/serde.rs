/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::ffi::OsString;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use stipple_png::PngInfo;

pub struct Metadata<'a> {
    file:     OsString,
    size:     u64,
    metadata: &'a PngInfo
}

impl<'a> Metadata<'a> {
    pub fn new(file: OsString, size: u64, metadata: &PngInfo) -> Metadata {
        Metadata {
            file,
            size,
            metadata
        }
    }
}

impl<'a> Serialize for Metadata<'a> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer
    {
        let info = self.metadata;
        let mut state = serializer.serialize_struct("PngInfo", 9)?;

        state.serialize_field("file", &self.file.to_string_lossy())?;
        state.serialize_field("size", &self.size)?;
        state.serialize_field("width", &info.width)?;
        state.serialize_field("height", &info.height)?;
        state.serialize_field("depth", &info.depth)?;
        state.serialize_field("colour_type", &info.color.to_int())?;
        state.serialize_field("compression_method", &info.compression_method)?;
        state.serialize_field("filter_method", &info.filter_method)?;
        state.serialize_field("interlace_method", &format!("{:?}", info.interlace_method))?;

        state.end()
    }
}
