/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Display, Formatter};

use stipple_png::PngDecodeErrors;

/// Errors that end a command
pub enum CmdErrors {
    IoErrors(std::io::Error),
    PngErrors(PngDecodeErrors),
    SerdeErrors(serde_json::Error),
    GenericString(String),
    Generic(&'static str)
}

impl Debug for CmdErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IoErrors(err) => writeln!(f, "I/O error: {err}"),
            Self::PngErrors(err) => writeln!(f, "{err:?}"),
            Self::SerdeErrors(err) => writeln!(f, "Could not serialize metadata: {err}"),
            Self::GenericString(err) => writeln!(f, "{err}"),
            Self::Generic(err) => writeln!(f, "{err}")
        }
    }
}

impl Display for CmdErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for CmdErrors {}

impl From<std::io::Error> for CmdErrors {
    fn from(err: std::io::Error) -> Self {
        Self::IoErrors(err)
    }
}

impl From<PngDecodeErrors> for CmdErrors {
    fn from(err: PngDecodeErrors) -> Self {
        Self::PngErrors(err)
    }
}

impl From<serde_json::Error> for CmdErrors {
    fn from(err: serde_json::Error) -> Self {
        Self::SerdeErrors(err)
    }
}

impl From<&'static str> for CmdErrors {
    fn from(err: &'static str) -> Self {
        Self::Generic(err)
    }
}

impl From<String> for CmdErrors {
    fn from(err: String) -> Self {
        Self::GenericString(err)
    }
}
