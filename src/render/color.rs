//! Packed 32-bit pixel colors.
use raylib::prelude::Color;

/// A color packed as `0xAABBGGRR`: red in the lowest byte, alpha in the highest.
///
/// On little-endian targets the in-memory byte order is R, G, B, A, which is
/// what raylib's `PIXELFORMAT_UNCOMPRESSED_R8G8B8A8` textures expect.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[repr(transparent)]
pub struct PixelColor(pub u32);

impl PixelColor {
    pub const WHITE: PixelColor = PixelColor::rgb(255, 255, 255);
    pub const BLACK: PixelColor = PixelColor::rgb(0, 0, 0);
    /// Ray trace dots on the minimap.
    pub const TRACE_GRAY: PixelColor = PixelColor::rgb(160, 160, 160);

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((b as u32) << 16) | ((g as u32) << 8) | r as u32)
    }

    /// Opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline] pub const fn r(self) -> u8 { self.0 as u8 }
    #[inline] pub const fn g(self) -> u8 { (self.0 >> 8) as u8 }
    #[inline] pub const fn b(self) -> u8 { (self.0 >> 16) as u8 }
    #[inline] pub const fn a(self) -> u8 { (self.0 >> 24) as u8 }

    #[inline]
    pub const fn unpack(self) -> (u8, u8, u8, u8) {
        (self.r(), self.g(), self.b(), self.a())
    }

    #[inline]
    pub const fn is_opaque(self) -> bool {
        self.a() == 255
    }
}

impl From<Color> for PixelColor {
    fn from(c: Color) -> Self {
        PixelColor::rgba(c.r, c.g, c.b, c.a)
    }
}

impl From<PixelColor> for Color {
    fn from(p: PixelColor) -> Self {
        let (r, g, b, a) = p.unpack();
        Color::new(r, g, b, a)
    }
}
