//! Runtime configuration read from the process environment.
use std::env;
use std::f32::consts::PI;
use std::path::PathBuf;
use std::str::FromStr;

use crate::render::casters::min_step;
use crate::render::framebuffer::MAX_DIMENSION;

/// Minimap fill selection.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MinimapMode {
    Atlas,
    Palette,
}

impl FromStr for MinimapMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atlas" => Ok(MinimapMode::Atlas),
            "palette" => Ok(MinimapMode::Palette),
            other => Err(format!("unknown minimap mode {other:?}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RaycasterConfig {
    pub width: u32,
    pub height: u32,
    pub atlas_path: PathBuf,
    pub map_path: Option<PathBuf>,
    pub fov: f32,
    pub step: f32,
    pub max_range: f32,
    pub walk_speed: f32,
    pub turn_speed: f32,
    pub minimap: MinimapMode,
    pub palette_seed: u64,
    pub trace_rays: bool,
    pub dump_ppm: Option<PathBuf>,
    pub target_fps: u32,
}

impl Default for RaycasterConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 512,
            atlas_path: PathBuf::from("./walltext.png"),
            map_path: None,
            fov: PI / 3.0,
            step: 0.01,
            max_range: 20.0,
            walk_speed: 2.0,
            turn_speed: 1.0,
            minimap: MinimapMode::Atlas,
            palette_seed: 0,
            trace_rays: true,
            dump_ppm: None,
            target_fps: 60,
        }
    }
}

impl RaycasterConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `RAYCASTER_WIDTH` / `RAYCASTER_HEIGHT` - Window size in pixels (default: 1024x512)
    /// - `RAYCASTER_ATLAS` - Wall texture strip (default: `./walltext.png`)
    /// - `RAYCASTER_MAP` - Map file, one row per line (default: built-in 16x16 map)
    /// - `RAYCASTER_FOV` - Field of view in radians (default: pi/3)
    /// - `RAYCASTER_STEP` - Ray march step in map units (default: 0.01)
    /// - `RAYCASTER_MAX_RANGE` - Render distance in map units (default: 20)
    /// - `RAYCASTER_WALK_SPEED` - Map units per second (default: 2)
    /// - `RAYCASTER_TURN_SPEED` - Radians per second (default: 1)
    /// - `RAYCASTER_MINIMAP` - `atlas` or `palette` (default: atlas)
    /// - `RAYCASTER_PALETTE_SEED` - Seed for the palette colors (default: 0)
    /// - `RAYCASTER_TRACE_RAYS` - Plot ray paths on the minimap (default: true)
    /// - `RAYCASTER_DUMP_PPM` - Write the last frame here on exit (default: unset)
    /// - `RAYCASTER_TARGET_FPS` - Frame cap (default: 60)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(w) = read_var::<u32>(&lookup, "RAYCASTER_WIDTH") {
            config.width = w.clamp(2, MAX_DIMENSION);
        }
        if let Some(h) = read_var::<u32>(&lookup, "RAYCASTER_HEIGHT") {
            config.height = h.clamp(1, MAX_DIMENSION);
        }
        if let Some(path) = lookup("RAYCASTER_ATLAS") {
            config.atlas_path = PathBuf::from(path);
        }
        config.map_path = lookup("RAYCASTER_MAP").map(PathBuf::from);

        if let Some(fov) = read_var::<f32>(&lookup, "RAYCASTER_FOV").filter(|f| *f > 0.0 && *f < PI) {
            config.fov = fov;
        }
        if let Some(step) = read_var::<f32>(&lookup, "RAYCASTER_STEP").filter(|s| *s > 0.0) {
            config.step = step;
        }
        if let Some(range) = read_var::<f32>(&lookup, "RAYCASTER_MAX_RANGE").filter(|r| *r > 0.0) {
            config.max_range = range;
        }
        if config.step < min_step(config.max_range) {
            tracing::warn!(step = config.step, max_range = config.max_range, "ray step too fine, raised");
            config.step = min_step(config.max_range);
        }
        if let Some(speed) = read_var::<f32>(&lookup, "RAYCASTER_WALK_SPEED") {
            config.walk_speed = speed;
        }
        if let Some(speed) = read_var::<f32>(&lookup, "RAYCASTER_TURN_SPEED") {
            config.turn_speed = speed;
        }
        if let Some(mode) = read_var::<MinimapMode>(&lookup, "RAYCASTER_MINIMAP") {
            config.minimap = mode;
        }
        if let Some(seed) = read_var::<u64>(&lookup, "RAYCASTER_PALETTE_SEED") {
            config.palette_seed = seed;
        }
        if let Some(trace) = read_var::<bool>(&lookup, "RAYCASTER_TRACE_RAYS") {
            config.trace_rays = trace;
        }
        config.dump_ppm = lookup("RAYCASTER_DUMP_PPM").map(PathBuf::from);
        if let Some(fps) = read_var::<u32>(&lookup, "RAYCASTER_TARGET_FPS") {
            config.target_fps = fps;
        }

        config
    }
}

fn read_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable config value");
            None
        }
    }
}
