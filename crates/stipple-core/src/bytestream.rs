/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! A simple implementation of a bytestream reader
//! and writer.
//!
//! The reader borrows an in-memory buffer and every read is bounds
//! checked, returning [`ByteIoError`] instead of reading past the end.
//! The writer owns a growable buffer so writes never fail.
pub use reader::{ByteIoError, ByteReader};
pub use writer::ByteWriter;

mod reader;
mod writer;
