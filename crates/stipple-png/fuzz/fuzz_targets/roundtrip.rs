#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // first two bytes pick the width and the row filter, the rest are pixels
    if data.len() < 6 {
        return;
    }
    let width = usize::from(data[0]).max(1);
    let filter = match data[1] % 5 {
        0 => stipple_png::FilterMethod::None,
        1 => stipple_png::FilterMethod::Sub,
        2 => stipple_png::FilterMethod::Up,
        3 => stipple_png::FilterMethod::Average,
        _ => stipple_png::FilterMethod::Paeth
    };
    let pixels = &data[2..];
    let height = pixels.len() / (width * 4);

    if height == 0 {
        return;
    }
    let pixels = pixels[..width * height * 4].to_vec();
    let image = stipple_png::RgbaImage::new(width, height, pixels).unwrap();

    let png = stipple_png::PngEncoder::new(&image)
        .set_row_filter(filter)
        .encode();

    let decoded = stipple_png::decode(&png).expect("Failed to decode our own png");
    assert_eq!(decoded, image);

    // the reference decoder must agree
    let mut reader = png::Decoder::new(png.as_slice()).read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).unwrap();
    assert_eq!(&buf[..info.buffer_size()], image.pixels());
});
