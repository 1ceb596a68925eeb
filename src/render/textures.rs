//! Wall texture atlas: a horizontal strip of square tiles.
use std::path::Path;

use raylib::ffi::PixelFormat;
use raylib::prelude::*;

use crate::error::LoadError;
use crate::render::color::PixelColor;

/// `tile_count` square textures of `tile_size` pixels laid out side by side.
///
/// Read-only after loading; every column renderer samples the same instance.
#[derive(Clone, Debug)]
pub struct TextureAtlas {
    px: Vec<PixelColor>,
    tile_size: usize,
    tile_count: usize,
}

/// Number of color channels stored per pixel for a raylib pixel format.
fn channel_count(format: i32) -> usize {
    match format {
        f if f == PixelFormat::PIXELFORMAT_UNCOMPRESSED_GRAYSCALE as i32 => 1,
        f if f == PixelFormat::PIXELFORMAT_UNCOMPRESSED_GRAY_ALPHA as i32 => 2,
        f if f == PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8 as i32 => 3,
        f if f == PixelFormat::PIXELFORMAT_UNCOMPRESSED_R8G8B8A8 as i32 => 4,
        _ => 0,
    }
}

impl TextureAtlas {
    /// Decodes an image file. Only 8-bit RGBA images are accepted.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let unreadable = |reason: String| LoadError::Unreadable { path: path.to_path_buf(), reason };
        let name = path.to_str().ok_or_else(|| unreadable("path is not valid UTF-8".into()))?;
        if !path.is_file() {
            return Err(unreadable("no such file".into()));
        }
        let img = Image::load_image(name).map_err(|e| unreadable(e.to_string()))?;

        let channels = channel_count(img.format);
        if channels != 4 {
            return Err(LoadError::ChannelCount { channels });
        }
        let w = img.width.max(0) as usize;
        let h = img.height.max(0) as usize;
        let bytes: Vec<u8> = img
            .get_image_data()
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, c.a])
            .collect();

        let atlas = Self::from_rgba(w, h, channels, &bytes)?;
        tracing::info!(
            path = %path.display(),
            tile_size = atlas.tile_size,
            tile_count = atlas.tile_count,
            "texture atlas loaded"
        );
        Ok(atlas)
    }

    /// Builds an atlas from raw interleaved channel bytes, row-major.
    pub fn from_rgba(width: usize, height: usize, channels: usize, bytes: &[u8]) -> Result<Self, LoadError> {
        if channels != 4 {
            return Err(LoadError::ChannelCount { channels });
        }
        let tile_count = if height == 0 { 0 } else { width / height };
        if tile_count == 0 || width != height * tile_count {
            return Err(LoadError::NotSquareTiles { width, height });
        }
        let expected = width * height * 4;
        if bytes.len() != expected {
            return Err(LoadError::PixelDataLength { expected, actual: bytes.len() });
        }
        let px = bytes
            .chunks_exact(4)
            .map(|c| PixelColor::rgba(c[0], c[1], c[2], c[3]))
            .collect();
        Ok(Self { px, tile_size: width / tile_count, tile_count })
    }

    #[inline] pub fn tile_size(&self) -> usize { self.tile_size }
    #[inline] pub fn tile_count(&self) -> usize { self.tile_count }
    #[inline] pub fn width(&self) -> usize { self.tile_size * self.tile_count }

    /// Pixel `(x, y)` of tile `tile`.
    #[inline]
    pub fn tile_pixel(&self, tile: usize, x: usize, y: usize) -> PixelColor {
        assert!(tile < self.tile_count && x < self.tile_size && y < self.tile_size);
        self.px[tile * self.tile_size + x + y * self.width()]
    }

    /// Top-left pixel of a tile, used as its flat swatch color.
    #[inline]
    pub fn swatch(&self, tile: usize) -> PixelColor {
        self.tile_pixel(tile, 0, 0)
    }

    /// Column `col` of tile `tile`, stretched to `column_height` rows (nearest neighbour).
    pub fn column_of(&self, tile: usize, col: usize, column_height: usize) -> Vec<PixelColor> {
        let mut out = vec![PixelColor::default(); column_height];
        self.sample_column_into(tile, col, column_height, 0, &mut out);
        out
    }

    /// Fills `out` with rows `first_row..first_row + out.len()` of the column
    /// that [`column_of`](Self::column_of) would return for `column_height`.
    ///
    /// Lets the caller sample only the visible part of a very tall column.
    pub fn sample_column_into(
        &self,
        tile: usize,
        col: usize,
        column_height: usize,
        first_row: usize,
        out: &mut [PixelColor],
    ) {
        assert!(tile < self.tile_count, "tile {tile} out of range ({} tiles)", self.tile_count);
        assert!(col < self.tile_size, "column {col} out of range (tile size {})", self.tile_size);
        debug_assert!(first_row + out.len() <= column_height);

        let pix_x = tile * self.tile_size + col;
        let img_w = self.width();
        for (k, dst) in out.iter_mut().enumerate() {
            let pix_y = ((first_row + k) * self.tile_size) / column_height;
            *dst = self.px[pix_x + pix_y * img_w];
        }
    }
}
