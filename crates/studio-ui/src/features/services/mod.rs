//! Service catalog slice: services, their sub-services and dialogs.

pub mod commands;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
