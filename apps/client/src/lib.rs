//! Client side of PolyglotPal exercises.
//!
//! [`ApiClient`] talks to the backend over HTTP; [`ExerciseRunner`] drives a
//! session against any [`ExerciseBackend`] and reports progress once per run.

pub mod api;
pub mod error;
pub mod runner;

pub use api::{ApiClient, SyncedUser, API_URL_ENV, DEFAULT_API_URL};
pub use error::{ClientError, Result};
pub use runner::{ExerciseBackend, ExerciseRunner, DEFAULT_LEVEL_COUNT};
