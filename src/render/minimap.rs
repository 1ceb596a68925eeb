//! Top-down map overlay in the left half of the framebuffer.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::maze::TileMap;
use crate::render::color::PixelColor;
use crate::render::framebuffer::Framebuffer;
use crate::render::textures::TextureAtlas;

/// Size of one map cell on the minimap, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MinimapLayout {
    pub rect_w: u32,
    pub rect_h: u32,
}

impl MinimapLayout {
    pub fn new(fb_width: u32, fb_height: u32, map: &TileMap) -> Self {
        Self {
            rect_w: fb_width / (map.width() as u32 * 2),
            rect_h: fb_height / map.height() as u32,
        }
    }

    /// Minimap pixel for a point in map units.
    #[inline]
    pub fn to_screen(&self, x: f32, y: f32) -> (u32, u32) {
        ((x * self.rect_w as f32) as u32, (y * self.rect_h as f32) as u32)
    }
}

/// How occupied cells are colored.
#[derive(Clone, Debug, PartialEq)]
pub enum MinimapFill {
    /// Top-left pixel of the cell's atlas tile.
    AtlasSwatch,
    /// One flat color per tile index.
    Palette(Vec<PixelColor>),
}

impl MinimapFill {
    /// `tile_count` random opaque colors from a seeded generator.
    pub fn random_palette(tile_count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let colors = (0..tile_count)
            .map(|_| PixelColor::rgb(rng.gen_range(0..255), rng.gen_range(0..255), rng.gen_range(0..255)))
            .collect();
        MinimapFill::Palette(colors)
    }
}

pub struct MinimapRenderer {
    pub layout: MinimapLayout,
    pub fill: MinimapFill,
}

impl MinimapRenderer {
    pub fn new(layout: MinimapLayout, fill: MinimapFill) -> Self {
        Self { layout, fill }
    }

    fn color_of(&self, atlas: &TextureAtlas, tile: usize) -> PixelColor {
        match &self.fill {
            MinimapFill::AtlasSwatch => atlas.swatch(tile),
            MinimapFill::Palette(colors) => colors[tile],
        }
    }

    pub fn render(&self, fb: &mut Framebuffer, map: &TileMap, atlas: &TextureAtlas) {
        let MinimapLayout { rect_w, rect_h } = self.layout;
        for (i, j, tile) in map.iter_walls() {
            fb.set_current_color(self.color_of(atlas, tile));
            fb.fill_rect(i as u32 * rect_w, j as u32 * rect_h, rect_w, rect_h);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::maze::CellCodes;
    use crate::render::textures::tests::coordinate_atlas;

    #[test]
    fn layout_splits_left_half_into_cells() {
        let layout = MinimapLayout::new(1024, 512, &TileMap::reference());
        assert_eq!(layout, MinimapLayout { rect_w: 32, rect_h: 32 });
        assert_eq!(layout.to_screen(3.5, 2.25), (112, 72));
    }

    #[test]
    fn walls_become_rectangles_and_blanks_stay_background() {
        let map = TileMap::from_literal("1  2", 2, 2, &CellCodes::default()).unwrap();
        let atlas = coordinate_atlas(2, 3);
        let mut fb = Framebuffer::new(8, 4);
        let renderer = MinimapRenderer::new(MinimapLayout::new(8, 4, &map), MinimapFill::AtlasSwatch);
        renderer.render(&mut fb, &map, &atlas);

        assert_eq!(fb.get_pixel(0, 0), atlas.swatch(1));
        assert_eq!(fb.get_pixel(1, 1), atlas.swatch(1));
        assert_eq!(fb.get_pixel(2, 0), PixelColor::WHITE);
        assert_eq!(fb.get_pixel(0, 2), PixelColor::WHITE);
        assert_eq!(fb.get_pixel(3, 3), atlas.swatch(2));
        // Right half is untouched.
        assert!((4..8).all(|x| (0..4).all(|y| fb.get_pixel(x, y) == PixelColor::WHITE)));
    }

    #[test]
    fn palette_fill_uses_tile_colors() {
        let map = TileMap::from_literal("0 ", 2, 1, &CellCodes::default()).unwrap();
        let atlas = coordinate_atlas(2, 1);
        let fill = MinimapFill::Palette(vec![PixelColor::rgb(9, 8, 7)]);
        let mut fb = Framebuffer::new(4, 1);
        MinimapRenderer::new(MinimapLayout::new(4, 1, &map), fill).render(&mut fb, &map, &atlas);
        assert_eq!(fb.get_pixel(0, 0), PixelColor::rgb(9, 8, 7));
    }

    #[test]
    fn random_palette_is_seeded_and_opaque() {
        let a = MinimapFill::random_palette(10, 7);
        assert_eq!(a, MinimapFill::random_palette(10, 7));
        let MinimapFill::Palette(colors) = a else { panic!("expected palette") };
        assert_eq!(colors.len(), 10);
        assert!(colors.iter().all(|c| c.is_opaque()));
    }
}
