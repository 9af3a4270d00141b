//! Logger setup for engine hosts.
//!
//! The engine itself only emits through the `log` facade; binaries call
//! `init_logging` once to route it to `env_logger`.

mod init;

pub use init::{LoggingConfig, init_logging};
