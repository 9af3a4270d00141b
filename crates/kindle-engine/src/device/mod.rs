//! GPU device + surface management.
//!
//! This module is responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue for one window
//! - configuring the Surface (swapchain) and keeping it in sync with resizes
//! - acquiring frames and handing back the texture to present

mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
