//! 3D view: one textured wall column per ray, in the right half of the framebuffer.
use crate::core::maze::TileMap;
use crate::core::player::Player;
use crate::render::casters::{RayCaster, RayHit, perpendicular_distance, ray_angle};
use crate::render::color::PixelColor;
use crate::render::framebuffer::Framebuffer;
use crate::render::minimap::MinimapLayout;
use crate::render::textures::TextureAtlas;

pub struct ColumnRenderer {
    /// First framebuffer x of the 3D view.
    view_x: u32,
    columns: u32,
    view_height: u32,
    /// Visible texture rows of the current column; never reallocated.
    scratch: Vec<PixelColor>,
    /// When set, every march step is plotted on the minimap.
    pub trace: Option<MinimapLayout>,
}

impl ColumnRenderer {
    /// 3D view over the right half of a `fb_width` x `fb_height` framebuffer.
    pub fn new(fb_width: u32, fb_height: u32) -> Self {
        Self {
            view_x: fb_width / 2,
            columns: fb_width / 2,
            view_height: fb_height,
            scratch: vec![PixelColor::default(); fb_height as usize],
            trace: None,
        }
    }

    /// On-screen height of a wall at perpendicular distance `perp`.
    /// `None` for a non-positive distance (the eye sits inside the wall).
    #[inline]
    pub fn column_height(&self, perp: f32) -> Option<usize> {
        (perp > 0.0).then(|| (self.view_height as f32 / perp) as usize)
    }

    /// Blits the textured column for `hit` at framebuffer column `x`,
    /// centered vertically and clipped to the view.
    pub fn draw_column(&mut self, fb: &mut Framebuffer, atlas: &TextureAtlas, x: u32, hit: &RayHit, perp: f32) {
        let Some(column_height) = self.column_height(perp) else { return };
        let vh = self.view_height as i64;
        let y0 = vh / 2 - column_height as i64 / 2;

        // Visible rows of the column, in column coordinates.
        let first = (-y0).max(0) as usize;
        let last = (vh - y0).clamp(0, column_height as i64) as usize;
        if first >= last {
            return;
        }
        let rows = &mut self.scratch[..last - first];
        atlas.sample_column_into(hit.tile, hit.tex_x, column_height, first, rows);
        for (k, &color) in rows.iter().enumerate() {
            fb.set_pixel_color(x, (y0 + (first + k) as i64) as u32, color);
        }
    }

    /// Casts one ray per view column and draws the walls.
    pub fn render(
        &mut self,
        fb: &mut Framebuffer,
        map: &TileMap,
        atlas: &TextureAtlas,
        caster: &RayCaster,
        player: &Player,
    ) {
        let pose = player.pose;
        let trace = self.trace;
        for i in 0..self.columns {
            let angle = ray_angle(pose.angle, player.fov, i as usize, self.columns as usize);

            let hit = caster.cast(map, &pose, angle, atlas.tile_size(), |cx, cy| {
                if let Some(layout) = trace {
                    let (px, py) = layout.to_screen(cx, cy);
                    fb.set_pixel_color(px, py, PixelColor::TRACE_GRAY);
                }
            });

            let Some(hit) = hit else { continue };
            let perp = perpendicular_distance(hit.distance, angle, pose.angle);
            self.draw_column(fb, atlas, self.view_x + i, &hit, perp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::maze::CellCodes;
    use crate::core::player::Pose;
    use crate::render::casters::Face;
    use crate::render::textures::tests::coordinate_atlas;

    fn hit(tile: usize, tex_x: usize) -> RayHit {
        RayHit { distance: 1.0, cx: 0.0, cy: 0.0, cell: (0, 0), tile, face: Face::Vertical, tex_x }
    }

    #[test]
    fn column_height_is_inverse_distance() {
        let r = ColumnRenderer::new(1024, 512);
        assert_eq!(r.column_height(1.0), Some(512));
        assert_eq!(r.column_height(2.0), Some(256));
        assert_eq!(r.column_height(0.0), None);
        assert!(r.column_height(0.5).unwrap() > r.column_height(1.0).unwrap());
    }

    #[test]
    fn short_column_is_centered() {
        let atlas = coordinate_atlas(4, 2);
        let mut fb = Framebuffer::new(8, 8);
        let mut r = ColumnRenderer::new(8, 8);
        // Height 8 / 2 = 4 rows, starting at y = 2.
        r.draw_column(&mut fb, &atlas, 5, &hit(1, 2), 2.0);
        for y in 0..8 {
            let c = fb.get_pixel(5, y);
            if (2..6).contains(&y) {
                assert_eq!(c, atlas.tile_pixel(1, 2, (y - 2) as usize));
            } else {
                assert_eq!(c, PixelColor::WHITE);
            }
        }
    }

    #[test]
    fn tall_column_is_clipped_to_view() {
        let atlas = coordinate_atlas(4, 1);
        let mut fb = Framebuffer::new(8, 8);
        let mut r = ColumnRenderer::new(8, 8);
        // Height 32: only the middle 8 rows are visible, i.e. source rows 1 and 2.
        r.draw_column(&mut fb, &atlas, 4, &hit(0, 0), 0.25);
        let rows: Vec<u8> = (0..8).map(|y| fb.get_pixel(4, y).b()).collect();
        assert_eq!(rows, [1, 1, 1, 1, 2, 2, 2, 2]);
    }

    #[test]
    fn columns_fill_only_the_right_half() {
        let map = TileMap::from_literal(concat!("1111", "1  1", "1  1", "1111"), 4, 4, &CellCodes::default()).unwrap();
        let atlas = coordinate_atlas(4, 2);
        let mut fb = Framebuffer::new(32, 16);
        let mut r = ColumnRenderer::new(32, 16);
        let player = Player::new(Pose::new(2.0, 2.0, 0.3));
        r.render(&mut fb, &map, &atlas, &RayCaster::default(), &player);

        assert!((0..16).all(|x| (0..16).all(|y| fb.get_pixel(x, y) == PixelColor::WHITE)));
        // Every ray hits a wall in a closed room; the middle row is always wall.
        assert!((16..32).all(|x| fb.get_pixel(x, 8) != PixelColor::WHITE));
    }

    #[test]
    fn misses_leave_columns_untouched() {
        let map = TileMap::from_literal(concat!("    ", "    ", "   1", "    "), 4, 4, &CellCodes::default()).unwrap();
        let atlas = coordinate_atlas(4, 2);
        let mut fb = Framebuffer::new(32, 16);
        let mut r = ColumnRenderer::new(32, 16);
        // Facing -x: the only wall is behind the player.
        let player = Player::new(Pose::new(2.5, 2.5, std::f32::consts::PI));
        r.render(&mut fb, &map, &atlas, &RayCaster::default(), &player);
        assert!(fb.color_buffer.iter().all(|&c| c == PixelColor::WHITE));
    }

    #[test]
    fn trace_marks_minimap_path() {
        let map = TileMap::from_literal(concat!("1111", "1  1", "1  1", "1111"), 4, 4, &CellCodes::default()).unwrap();
        let atlas = coordinate_atlas(4, 2);
        let mut fb = Framebuffer::new(32, 16);
        let mut r = ColumnRenderer::new(32, 16);
        r.trace = Some(MinimapLayout::new(32, 16, &map));
        r.render(&mut fb, &map, &atlas, &RayCaster::default(), &Player::new(Pose::new(2.0, 2.0, 0.0)));
        assert_eq!(fb.get_pixel(8, 8), PixelColor::TRACE_GRAY);
    }
}
