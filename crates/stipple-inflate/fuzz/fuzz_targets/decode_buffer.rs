#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let options = stipple_inflate::DeflateOptions::default().set_limit(1 << 24);

    let _ = stipple_inflate::DeflateDecoder::new_with_options(data, options).decode_deflate();
    let _ = stipple_inflate::DeflateDecoder::new_with_options(data, options).decode_zlib();
});
