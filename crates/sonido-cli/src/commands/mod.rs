//! CLI command implementations.

pub mod common;
pub mod devices;
pub mod effects;
pub mod info;
pub mod play;
pub mod presets;
pub mod process;
pub mod realtime;
