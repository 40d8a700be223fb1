/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by all stipple libraries
//!
//! This crate provides a set of core routines shared
//! by the decoder and encoder under the `stipple` umbrella
//!
//! It currently contains
//!
//! - A bytestream reader and writer with endian aware reads and writes
//! - Decoder and encoder options
//!
//! This library is `#[no_std]` with `alloc` needed for defining `Vec`
//! which the writer stores bytes in.
//!
//! # Features
//!  - `std`: Implements `std::error::Error` for the error types
#![cfg_attr(not(feature = "std"), no_std)]
extern crate alloc;

pub mod bytestream;
pub mod options;
