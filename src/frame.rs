//! Per-frame render pipeline state.
use crate::core::maze::TileMap;
use crate::core::player::Player;
use crate::render::casters::RayCaster;
use crate::render::color::PixelColor;
use crate::render::framebuffer::Framebuffer;
use crate::render::minimap::{MinimapFill, MinimapLayout, MinimapRenderer};
use crate::render::render3d::ColumnRenderer;
use crate::render::textures::TextureAtlas;

/// Everything the frame loop owns besides the world: the framebuffer and
/// the renderers that draw into it.
pub struct RenderContext {
    pub framebuffer: Framebuffer,
    pub caster: RayCaster,
    pub columns: ColumnRenderer,
    pub minimap: MinimapRenderer,
}

impl RenderContext {
    pub fn new(width: u32, height: u32, map: &TileMap, caster: RayCaster, fill: MinimapFill, trace_rays: bool) -> Self {
        let mut framebuffer = Framebuffer::new(width, height);
        framebuffer.set_background_color(PixelColor::WHITE);
        framebuffer.clear();

        let layout = MinimapLayout::new(width, height, map);
        let mut columns = ColumnRenderer::new(width, height);
        columns.trace = trace_rays.then_some(layout);

        Self {
            framebuffer,
            caster,
            columns,
            minimap: MinimapRenderer::new(layout, fill),
        }
    }

    /// Clears the buffer and draws the 3D view and the minimap.
    pub fn render_frame(&mut self, map: &TileMap, atlas: &TextureAtlas, player: &Player) -> &Framebuffer {
        self.framebuffer.clear();
        self.columns.render(&mut self.framebuffer, map, atlas, &self.caster, player);
        self.minimap.render(&mut self.framebuffer, map, atlas);
        &self.framebuffer
    }
}
