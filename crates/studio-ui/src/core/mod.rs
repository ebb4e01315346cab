//! Core, DOM-free primitives and helpers for the Web UI.
pub mod config;
pub mod forms;
pub mod logic;
pub mod session;
pub mod store;
