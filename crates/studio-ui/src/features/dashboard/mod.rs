//! Dashboard shell: sidebar sections and their lists.

pub mod commands;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;

#[cfg(target_arch = "wasm32")]
pub(crate) use view::DashboardPage;
