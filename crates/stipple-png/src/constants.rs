/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// `89 50 4E 47 0D 0A 1A 0A` read as a big endian u64
pub(crate) const PNG_SIGNATURE: u64 = 0x89504E470D0A1A0A;

/// Bytes per pixel of RGBA8 images, the only kind we handle
pub(crate) const RGBA_COMPONENTS: usize = 4;
