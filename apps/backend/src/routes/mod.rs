//! HTTP route handlers

pub mod content;
pub mod progress;
pub mod users;
