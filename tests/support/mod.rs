#![allow(dead_code)]

use std::io::Cursor;

pub fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

pub fn jpeg_bytes(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Jpeg)
        .unwrap();
    buf
}

#[derive(Debug)]
pub struct DecodedFrame {
    pub width: u16,
    pub height: u16,
    pub delay: u16,
    /// Color of the top-left pixel.
    pub rgb: [u8; 3],
}

#[derive(Debug)]
pub struct DecodedGif {
    pub repeat: gif::Repeat,
    pub frames: Vec<DecodedFrame>,
}

pub fn decode_gif(bytes: &[u8]) -> DecodedGif {
    let mut opts = gif::DecodeOptions::new();
    opts.set_color_output(gif::ColorOutput::Indexed);
    let mut dec = opts.read_info(Cursor::new(bytes)).unwrap();
    let global = dec.global_palette().map(|p| p.to_vec());

    let mut frames = Vec::new();
    while let Some(frame) = dec.read_next_frame().unwrap() {
        let palette = frame.palette.clone().or_else(|| global.clone()).unwrap();
        let idx = usize::from(frame.buffer[0]) * 3;
        frames.push(DecodedFrame {
            width: frame.width,
            height: frame.height,
            delay: frame.delay,
            rgb: [palette[idx], palette[idx + 1], palette[idx + 2]],
        });
    }
    DecodedGif {
        repeat: dec.repeat(),
        frames,
    }
}

pub fn close(a: [u8; 3], b: [u8; 3], tolerance: u8) -> bool {
    a.iter().zip(b.iter()).all(|(x, y)| x.abs_diff(*y) <= tolerance)
}
