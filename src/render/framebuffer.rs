use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use raylib::core::texture::RaylibTexture2D; // ← trait for .update_texture()
use raylib::prelude::*;

use crate::error::DumpError;
use crate::render::color::PixelColor;

/// Largest accepted width or height. Keeps `y * width + x` within `u32`.
pub const MAX_DIMENSION: u32 = 16384;

/// CPU-side pixel buffer, row-major, one [`PixelColor`] per pixel.
pub struct Framebuffer {
    pub color_buffer: Vec<PixelColor>,
    pub width: u32,
    pub height: u32,
    pub background_color: PixelColor,
    pub current_color: PixelColor,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width <= MAX_DIMENSION && height <= MAX_DIMENSION, "framebuffer {width}x{height} too large");
        let size = width as usize * height as usize;
        let bg = PixelColor::WHITE;
        Self {
            color_buffer: vec![bg; size],
            width,
            height,
            background_color: bg,
            current_color: PixelColor::BLACK,
        }
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    #[inline]
    pub fn set_pixel_color(&mut self, x: u32, y: u32, color: PixelColor) {
        if x < self.width && y < self.height {
            self.color_buffer[(y * self.width + x) as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> PixelColor {
        if x < self.width && y < self.height {
            return self.color_buffer[(y * self.width + x) as usize];
        }
        self.background_color
    }

    #[inline] pub fn set_current_color(&mut self, c: PixelColor) { self.current_color = c; }
    #[inline] pub fn set_background_color(&mut self, c: PixelColor) { self.background_color = c; }

    /// Filled rectangle in the current color, clipped to the buffer.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32) {
        let x1 = x.saturating_add(w).min(self.width);
        let y1 = y.saturating_add(h).min(self.height);
        for py in y.min(y1)..y1 {
            let row = (py * self.width) as usize;
            self.color_buffer[row + x.min(x1) as usize..row + x1 as usize].fill(self.current_color);
        }
    }

    /// The pixel data as RGBA8 bytes, borrowed without copying.
    pub fn as_bytes(&self) -> &[u8] {
        let byte_len = self.color_buffer.len() * std::mem::size_of::<PixelColor>();
        // SAFETY: PixelColor is repr(transparent) over u32, any u32 is four valid
        // bytes, and u8 has no alignment requirement.
        unsafe { std::slice::from_raw_parts(self.color_buffer.as_ptr() as *const u8, byte_len) }
    }

    /// Uploads the pixels into a *persistent* texture of the same size.
    pub fn upload_to_texture(&self, tex: &mut Texture2D) {
        if let Err(err) = tex.update_texture(self.as_bytes()) {
            tracing::warn!(%err, "framebuffer upload failed");
        }
    }

    /// Writes the buffer as a binary PPM (`P6`), dropping alpha.
    pub fn write_ppm<W: Write>(&self, out: &mut W) -> Result<(), DumpError> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let mut row = Vec::with_capacity(self.width as usize * 3);
        for line in self.color_buffer.chunks_exact(self.width.max(1) as usize) {
            row.clear();
            for px in line {
                row.extend_from_slice(&[px.r(), px.g(), px.b()]);
            }
            out.write_all(&row)?;
        }
        Ok(())
    }

    pub fn dump_ppm(&self, path: &Path) -> Result<(), DumpError> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_ppm(&mut out)?;
        out.flush()?;
        tracing::info!(path = %path.display(), "framebuffer dumped");
        Ok(())
    }
}
