//! Kindle engine crate.
//!
//! A dual-rate game loop (fixed-tick simulation on a background thread, rendering
//! and event polling on the calling thread), name-keyed GPU resource caches, and
//! the winit + wgpu runtime the demo renders through.

pub mod device;
pub mod game_loop;
pub mod logging;
pub mod render;
pub mod resource;
pub mod time;
pub mod window;
