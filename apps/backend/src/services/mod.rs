//! Business services backing the HTTP routes

pub mod progress;
