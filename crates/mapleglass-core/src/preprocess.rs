//! Normalizes a captured region into a recognizer-friendly image:
//! small in-game glyphs are upscaled to document size, padded away from the
//! image edge, sharpened, and flattened to black ink on a white page no
//! matter what color theme the game UI uses.

use image::{Rgba, RgbaImage, imageops};

/// White border added around the upscaled image on every side.
pub const PAD_PX: u32 = 20;

/// Ink-intensity values at or below this map to pure background.
const BLACK_POINT: u16 = 20;
/// Ink-intensity values at or above this map to pure ink.
const WHITE_POINT: u16 = 160;

const SHARPEN_KERNEL: [[i32; 3]; 3] = [[0, -1, 0], [-1, 5, -1], [0, -1, 0]];

/// Full preprocessing pass. Pure; output dimensions are exactly
/// `(w * scale + 2 * PAD_PX, h * scale + 2 * PAD_PX)`.
pub fn preprocess(raw: &RgbaImage, scale: u32) -> RgbaImage {
    let scaled_w = raw.width() * scale;
    let scaled_h = raw.height() * scale;

    let resized = imageops::resize(raw, scaled_w, scaled_h, imageops::FilterType::CatmullRom);

    let mut padded = RgbaImage::from_pixel(
        scaled_w + PAD_PX * 2,
        scaled_h + PAD_PX * 2,
        Rgba([255, 255, 255, 255]),
    );
    imageops::overlay(&mut padded, &resized, PAD_PX as i64, PAD_PX as i64);

    let mut out = sharpen(&padded);
    binarize(&mut out);
    out
}

/// 3x3 sharpening convolution per RGB channel. Border pixels, where the
/// kernel window would leave the image, are copied from the source.
fn sharpen(src: &RgbaImage) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut out = src.clone();

    for y in 1..h.saturating_sub(1) {
        for x in 1..w.saturating_sub(1) {
            let mut acc = [0i32; 3];
            for (ky, row) in SHARPEN_KERNEL.iter().enumerate() {
                for (kx, weight) in row.iter().enumerate() {
                    let px = src.get_pixel(x + kx as u32 - 1, y + ky as u32 - 1);
                    for c in 0..3 {
                        acc[c] += i32::from(px[c]) * weight;
                    }
                }
            }
            out.put_pixel(
                x,
                y,
                Rgba([
                    acc[0].clamp(0, 255) as u8,
                    acc[1].clamp(0, 255) as u8,
                    acc[2].clamp(0, 255) as u8,
                    255,
                ]),
            );
        }
    }
    out
}

/// Collapses each pixel to a gray level of its stretched ink intensity and
/// forces the image fully opaque.
fn binarize(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        let [r, g, b, _] = px.0;
        let v = stretch_ink(255 - r.max(g).max(b));
        *px = Rgba([v, v, v, 255]);
    }
}

/// Two-point linear stretch of the inverted brightness signal.
fn stretch_ink(inverted: u8) -> u8 {
    let inverted = u16::from(inverted);
    if inverted <= BLACK_POINT {
        0
    } else if inverted >= WHITE_POINT {
        255
    } else {
        ((inverted - BLACK_POINT) * 255 / (WHITE_POINT - BLACK_POINT)) as u8
    }
}
