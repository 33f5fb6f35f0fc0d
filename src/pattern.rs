//! RGB888 test patterns written into caller owned buffers.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// The buffer cannot hold the requested pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternError {
    BufferTooSmall { needed: usize, len: usize },
    /// Checkerboard square size of zero.
    ZeroSquare,
}

const BYTES_PER_PIXEL: usize = 3;

/// Bytes needed for a `width` x `height` RGB888 image.
pub const fn frame_len(width: u16, height: u16) -> usize {
    width as usize * height as usize * BYTES_PER_PIXEL
}

fn frame(buffer: &mut [u8], width: u16, height: u16) -> Result<&mut [u8], PatternError> {
    let needed = frame_len(width, height);
    let len = buffer.len();
    buffer
        .get_mut(..needed)
        .ok_or(PatternError::BufferTooSmall { needed, len })
}

fn put(pixel: &mut [u8], color: Rgb888) {
    pixel.copy_from_slice(&[color.r(), color.g(), color.b()]);
}

/// Fills a `width` x `height` image with one color.
pub fn fill_color(
    buffer: &mut [u8],
    width: u16,
    height: u16,
    color: Rgb888,
) -> Result<(), PatternError> {
    for pixel in frame(buffer, width, height)?.chunks_exact_mut(BYTES_PER_PIXEL) {
        put(pixel, color);
    }
    Ok(())
}

/// Red ramps left to right, green top to bottom, blue stays at 128.
pub fn fill_gradient(buffer: &mut [u8], width: u16, height: u16) -> Result<(), PatternError> {
    let row_len = usize::from(width) * BYTES_PER_PIXEL;
    let frame = frame(buffer, width, height)?;
    if row_len == 0 {
        return Ok(());
    }
    for (y, row) in frame.chunks_exact_mut(row_len).enumerate() {
        let g = ramp(y, height);
        for (x, pixel) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
            put(pixel, Rgb888::new(ramp(x, width), g, 128));
        }
    }
    Ok(())
}

/// `pos * 255 / extent`, with `pos < extent`.
fn ramp(pos: usize, extent: u16) -> u8 {
    u8::try_from(pos * 255 / usize::from(extent)).unwrap_or(u8::MAX)
}

/// White and black squares of `square` pixels, white in the top left corner.
pub fn fill_checkerboard(
    buffer: &mut [u8],
    width: u16,
    height: u16,
    square: u16,
) -> Result<(), PatternError> {
    if square == 0 {
        return Err(PatternError::ZeroSquare);
    }
    let row_len = usize::from(width) * BYTES_PER_PIXEL;
    let frame = frame(buffer, width, height)?;
    if row_len == 0 {
        return Ok(());
    }
    let square = usize::from(square);
    for (y, row) in frame.chunks_exact_mut(row_len).enumerate() {
        for (x, pixel) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
            let white = (x / square + y / square) % 2 == 0;
            put(pixel, if white { Rgb888::WHITE } else { Rgb888::BLACK });
        }
    }
    Ok(())
}
