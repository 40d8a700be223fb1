#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let opts = stipple_core::options::DecoderOptions::new_safe()
        .set_max_width(1 << 12)
        .set_max_height(1 << 12);

    let mut decoder = stipple_png::PngDecoder::new_with_options(data, opts);
    let _ = decoder.decode();
});
