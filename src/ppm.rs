//! Binary PPM (P6) image output. Mirrors `write_ppm`/`rgb2color`/`mkcolor`
//! in the original demo: each channel is quantized by `floor(x * 255)` and
//! clamped to `[0, 255]` before the flat header + body are written.

use std::io::{self, Write};
use std::path::Path;

use crate::vecmath::{clamp, Vec3};

/// `floor(clamp(x,0,1) * 255)` as a `u8`.
#[inline]
pub fn quantize_channel(x: f32) -> u8 {
    (clamp(x, 0.0, 1.0) * 255.0).floor() as u8
}

/// Quantizes a linear RGB triple into 8-bit channel bytes.
#[inline]
pub fn rgb2color(c: Vec3) -> [u8; 3] {
    [quantize_channel(c.x), quantize_channel(c.y), quantize_channel(c.z)]
}

/// Writes `buf` (row-major, `width * height` pixels, no stride padding) as a
/// binary PPM (P6) file at `path`.
pub fn write(path: impl AsRef<Path>, buf: &[Vec3], width: u32, height: u32) -> io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    write_to(&mut file, buf, width, height)
}

/// As [`write`], but against any `Write` sink — used by tests to avoid
/// touching the filesystem.
pub fn write_to<W: Write>(w: &mut W, buf: &[Vec3], width: u32, height: u32) -> io::Result<()> {
    assert_eq!(buf.len(), (width as usize) * (height as usize), "buffer does not match width*height");
    write!(w, "P6\n{} {}\n255\n", width, height)?;
    let mut body = Vec::with_capacity(buf.len() * 3);
    for pixel in buf {
        body.extend_from_slice(&rgb2color(*pixel));
    }
    w.write_all(&body)
}
