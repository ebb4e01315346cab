//! Feature slices. Each owns its state, commands and views.

pub mod auth;
pub mod dashboard;
pub mod portfolio;
pub mod services;
