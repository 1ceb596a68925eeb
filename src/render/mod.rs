//! Rendering: framebuffer, texture atlas, ray casting and the two views.
//!
//! Modules:
//! - `color`: packed RGBA pixel values
//! - `framebuffer`: CPU framebuffer, texture upload and PPM dump
//! - `textures`: wall texture atlas and column sampling
//! - `casters`: fixed-step ray marcher and face detection
//! - `render3d`: column renderer for the first-person view
//! - `minimap`: top-down overlay

pub mod color;
pub mod framebuffer;
pub mod textures;
pub mod casters;
pub mod render3d;
pub mod minimap;
