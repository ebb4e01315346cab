//! Login and sign-up screens.

pub mod commands;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
