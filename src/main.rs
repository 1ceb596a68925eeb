// main.rs
#![allow(dead_code)]

mod config;
mod core;
mod error;
mod frame;
mod render;

use anyhow::{Context, Result, anyhow};
use raylib::prelude::*;

use crate::config::{MinimapMode, RaycasterConfig};
use crate::core::maze::{CellCodes, TileMap};
use crate::core::player::{Player, Pose};
use crate::core::process_events::{check_spawn, process_events};
use crate::frame::RenderContext;
use crate::render::casters::RayCaster;
use crate::render::minimap::MinimapFill;
use crate::render::textures::TextureAtlas;

/// Pose the player starts in.
const START: Pose = Pose::new(3.456, 2.345, 1.523);

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RaycasterConfig::from_env();
    run(&config).inspect_err(|err| tracing::error!("{err:#}"))
}

fn run(config: &RaycasterConfig) -> Result<()> {
    // Everything that can fail is loaded before the window opens.
    let codes = CellCodes::default();
    let map = match &config.map_path {
        Some(path) => TileMap::load(path, &codes)?,
        None => TileMap::reference(),
    };
    let atlas = TextureAtlas::load(&config.atlas_path).context("failed to load wall textures")?;
    map.validate_tiles(atlas.tile_count())?;
    check_spawn(&map, &START)?;

    let fill = match config.minimap {
        MinimapMode::Atlas => MinimapFill::AtlasSwatch,
        MinimapMode::Palette => MinimapFill::random_palette(atlas.tile_count(), config.palette_seed),
    };
    let caster = RayCaster::new(config.step, config.max_range);
    let mut ctx = RenderContext::new(config.width, config.height, &map, caster, fill, config.trace_rays);

    let mut player = Player::new(START);
    player.fov = config.fov;
    player.speed_walk = config.walk_speed;
    player.speed_turn = config.turn_speed;

    let (mut window, raylib_thread) = raylib::init()
        .size(config.width as i32, config.height as i32)
        .title("Tiny Raycaster")
        .build();
    window.set_target_fps(config.target_fps);

    // Persistent texture the framebuffer is streamed into every frame.
    let blank = Image::gen_image_color(config.width as i32, config.height as i32, Color::WHITE);
    let mut screen = window
        .load_texture_from_image(&raylib_thread, &blank)
        .map_err(|e| anyhow!("failed to create screen texture: {e}"))?;

    tracing::info!(
        width = config.width,
        height = config.height,
        map_w = map.width(),
        map_h = map.height(),
        "render loop started"
    );

    while !window.window_should_close() {
        process_events(&window, &mut player, &map);

        let fb = ctx.render_frame(&map, &atlas, &player);
        fb.upload_to_texture(&mut screen);

        if window.is_key_pressed(KeyboardKey::KEY_P) {
            if let Err(err) = fb.dump_ppm(std::path::Path::new("./out.ppm")) {
                tracing::warn!(%err, "screenshot failed");
            }
        }

        let mut d = window.begin_drawing(&raylib_thread);
        d.clear_background(Color::WHITE);
        d.draw_texture(&screen, 0, 0, Color::WHITE);
    }

    if let Some(path) = &config.dump_ppm {
        ctx.framebuffer.dump_ppm(path).context("failed to dump final frame")?;
    }
    Ok(())
}
