//! Portfolio feature slice: albums, album detail and their dialogs.
//!
//! # Design
//! - Views dispatch commands; commands own every backend call.
//! - Cards are de-duplicated by title at render time only.

pub mod commands;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
