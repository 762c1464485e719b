//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard, touch buttons)
//! - Drawing (Canvas 2D on web)
//! - Storage (LocalStorage on web)

pub mod input;

#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use input::{Control, InputState};
