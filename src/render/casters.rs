use crate::core::maze::TileMap;
use crate::core::player::Pose;

/// Which kind of wall face a ray struck.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Face {
    /// Face on a line `x = const`; texture offset comes from the hit's y.
    Vertical,
    /// Face on a line `y = const`; texture offset comes from the hit's x.
    Horizontal,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// Marched (raw) distance from the ray origin.
    pub distance: f32,
    pub cx: f32,
    pub cy: f32,
    pub cell: (usize, usize),
    pub tile: usize,
    pub face: Face,
    /// Texture column in `[0, tile_size)`.
    pub tex_x: usize,
}

/// Upper bound on samples per ray. Beyond this `k as f32 * step` stops
/// advancing reliably in single precision.
pub const MAX_STEPS: u64 = 1 << 24;

/// Smallest step that covers `max_range` within [`MAX_STEPS`] samples.
#[inline]
pub fn min_step(max_range: f32) -> f32 {
    max_range / MAX_STEPS as f32
}

/// Fixed-step ray marcher over a [`TileMap`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayCaster {
    pub step: f32,
    pub max_range: f32,
}

impl Default for RayCaster {
    fn default() -> Self {
        Self { step: 0.01, max_range: 20.0 }
    }
}

/// Angle of ray `column` out of `columns`, fanned linearly across `fov`.
#[inline]
pub fn ray_angle(heading: f32, fov: f32, column: usize, columns: usize) -> f32 {
    heading - fov / 2.0 + fov * column as f32 / columns as f32
}

/// Removes fisheye by projecting the raw distance onto the view axis.
#[inline]
pub fn perpendicular_distance(raw: f32, ray_angle: f32, heading: f32) -> f32 {
    raw * (ray_angle - heading).cos()
}

/// Picks the struck face from the hit point's offset to the nearest grid
/// line and turns that offset into a texture column.
pub fn face_and_offset(cx: f32, cy: f32, tile_size: usize) -> (Face, usize) {
    let hitx = cx - (cx + 0.5).floor();
    let hity = cy - (cy + 0.5).floor();
    let (face, frac) = if hity.abs() > hitx.abs() { (Face::Vertical, hity) } else { (Face::Horizontal, hitx) };

    let ts = tile_size as i64;
    let mut tex_x = (frac * tile_size as f32) as i64;
    if tex_x < 0 {
        tex_x += ts;
    }
    debug_assert!((0..ts).contains(&tex_x), "texture column {tex_x} outside tile");
    (face, tex_x.clamp(0, ts - 1) as usize)
}

impl RayCaster {
    /// Steps finer than [`min_step`] are raised to it.
    pub fn new(step: f32, max_range: f32) -> Self {
        assert!(step > 0.0, "ray step must be positive");
        let floor = min_step(max_range);
        if step < floor {
            tracing::warn!(step, max_range, used = floor, "ray step too fine, raised");
        }
        Self { step: step.max(floor), max_range }
    }

    /// Number of samples a ray takes before giving up.
    #[inline]
    pub fn steps(&self) -> u64 {
        ((self.max_range / self.step).ceil() as u64).min(MAX_STEPS)
    }

    /// Marches from `pose` along `angle`. `on_step` sees every sample point
    /// that lies in a passable cell before the hit.
    ///
    /// Returns `None` when nothing is hit within `max_range` or the ray leaves
    /// the map first.
    pub fn cast(
        &self,
        map: &TileMap,
        pose: &Pose,
        angle: f32,
        tile_size: usize,
        mut on_step: impl FnMut(f32, f32),
    ) -> Option<RayHit> {
        let (sin, cos) = angle.sin_cos();
        for k in 0..self.steps() {
            let t = k as f32 * self.step;
            if t >= self.max_range {
                return None;
            }
            let cx = pose.x + t * cos;
            let cy = pose.y + t * sin;

            let cell = map.cell_at_point(cx, cy)?;
            if let Some(tile) = cell.tile() {
                let (face, tex_x) = face_and_offset(cx, cy, tile_size);
                return Some(RayHit {
                    distance: t,
                    cx,
                    cy,
                    cell: (cx as usize, cy as usize),
                    tile,
                    face,
                    tex_x,
                });
            }
            on_step(cx, cy);
        }
        None
    }
}
