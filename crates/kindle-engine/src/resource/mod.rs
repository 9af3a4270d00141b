//! GPU resource caches keyed by name.
//!
//! Rendering code refers to compiled objects (shader modules, pipelines, buffers) by
//! logical name; the caches own a shared reference to each one. Deleting an entry
//! only releases the cache's share, so handles already fetched stay valid until
//! their last owner drops them.
//!
//! Handles are `Rc`, which keeps the caches on the thread that created them.

mod cache;
mod store;

pub use cache::ResourceCache;
pub use store::{ShaderStage, ShaderStore};
