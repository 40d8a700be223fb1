/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Global Decoder options

fn decoder_strict_mode() -> DecoderFlags {
    DecoderFlags {
        inflate_confirm_adler: true,
        png_confirm_crc:       true,
        png_strict_chunks:     true
    }
}

/// Command line options, error resilient
///
/// - Ignore CRC and Adler in png
/// - Skip unknown critical chunks
fn cmd_options() -> DecoderFlags {
    DecoderFlags {
        inflate_confirm_adler: false,
        png_confirm_crc:       false,
        png_strict_chunks:     false
    }
}

/// Decoder flags
///
/// All bools are stored here
#[derive(Copy, Debug, Clone)]
struct DecoderFlags {
    /// Whether the inflate decoder should confirm
    /// the adler32 trailer of zlib streams
    inflate_confirm_adler: bool,
    /// Whether the png decoder should confirm
    /// CRC of chunks
    png_confirm_crc:       bool,
    /// Whether the png decoder should reject unknown
    /// critical chunks instead of skipping them
    png_strict_chunks:     bool
}

impl Default for DecoderFlags {
    fn default() -> Self {
        DecoderFlags {
            inflate_confirm_adler: false,
            png_confirm_crc:       true,
            png_strict_chunks:     false
        }
    }
}

/// Decoder options
///
/// Not all options are respected by decoders,
/// each option specifies decoders that respect it
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 131072
    /// - Respected by: `png`
    max_width:     usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 131072
    /// - Respected by: `png`
    max_height:    usize,
    /// Maximum size for deflate.
    /// Respected by all decoders that use inflate
    ///
    /// - Default value: 1 GiB
    deflate_limit: usize,
    /// Boolean flags that influence decoding
    flags:         DecoderFlags
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            max_width:     1 << 17,
            max_height:    1 << 17,
            deflate_limit: 1 << 30,
            flags:         DecoderFlags::default()
        }
    }
}

/// Initializers
impl DecoderOptions {
    /// Create the decoder with options setting most configurable
    /// options to their safe counterparts
    ///
    /// This is the same as `default`
    pub fn new_safe() -> DecoderOptions {
        DecoderOptions::default()
    }

    /// Create the decoder options with the following characteristics
    ///
    /// - Ignore error checksuming, we do not confirm adler and crc in this mode
    /// - Unknown critical chunks are skipped
    pub fn new_cmd() -> DecoderOptions {
        let flag = cmd_options();
        DecoderOptions::default().set_decoder_flags(flag)
    }
}

/// Global options respected by all decoders
impl DecoderOptions {
    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    /// Return true when every check strict mode enables is on
    pub const fn get_strict_mode(&self) -> bool {
        self.flags.png_strict_chunks & self.flags.png_confirm_crc & self.flags.inflate_confirm_adler
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    ///
    /// # Arguments
    ///
    /// * `width`:  The maximum width allowed
    ///
    /// returns: DecoderOptions
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    /// # Arguments
    ///
    /// * `height`: The maximum height allowed
    ///
    /// returns: DecoderOptions
    ///
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    fn set_decoder_flags(mut self, flags: DecoderFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Set whether the decoder should be in standards conforming/
    /// strict mode
    ///
    /// This reduces the error tolerance level for the decoders, checksums
    /// are confirmed and unknown critical chunks are rejected.
    ///
    /// Setting it to `false` restores the default flags
    pub fn set_strict_mode(mut self, yes: bool) -> Self {
        if yes {
            self.flags = decoder_strict_mode();
        } else {
            self.flags = DecoderFlags::default();
        }
        self
    }
}

/// PNG and inflate specific options
impl DecoderOptions {
    /// Whether the inflate decoder should confirm
    /// adler checksums
    pub const fn inflate_get_confirm_adler(&self) -> bool {
        self.flags.inflate_confirm_adler
    }
    /// Set whether the inflate decoder should confirm
    /// adler checksums
    pub fn inflate_set_confirm_adler(mut self, yes: bool) -> Self {
        self.flags.inflate_confirm_adler = yes;
        self
    }
    /// Get default inflate limit for which the decoder
    /// will not try to decompress further
    pub const fn inflate_get_limit(&self) -> usize {
        self.deflate_limit
    }
    /// Set the default inflate limit for which decompressors
    /// relying on inflate won't surpass this limit
    #[must_use]
    pub fn inflate_set_limit(mut self, limit: usize) -> Self {
        self.deflate_limit = limit;
        self
    }
    /// Whether the png decoder should confirm
    /// CRC32 checksums
    pub const fn png_get_confirm_crc(&self) -> bool {
        self.flags.png_confirm_crc
    }
    /// Set whether the png decoder should confirm
    /// CRC 32 checksums
    #[must_use]
    pub fn png_set_confirm_crc(mut self, yes: bool) -> Self {
        self.flags.png_confirm_crc = yes;
        self
    }
    /// Whether the png decoder should reject unknown critical chunks
    pub const fn png_get_strict_chunks(&self) -> bool {
        self.flags.png_strict_chunks
    }
    /// Set whether the png decoder should reject unknown critical
    /// chunks rather than skipping them
    #[must_use]
    pub fn png_set_strict_chunks(mut self, yes: bool) -> Self {
        self.flags.png_strict_chunks = yes;
        self
    }
}
