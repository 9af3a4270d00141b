//! Renderer-facing handles.
//!
//! Render callbacks receive a `RenderCtx` (device, queue, surface metadata) and a
//! `RenderTarget` (encoder + color view of the current frame). GPU objects created
//! from the context are typically kept in a `resource::ShaderStore` or
//! `resource::ResourceCache` so they are compiled once and shared by name.

mod ctx;

pub use ctx::{RenderCtx, RenderTarget};
