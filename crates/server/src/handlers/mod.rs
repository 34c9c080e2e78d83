//! # API Route Handlers
//!
//! This module organizes the Axum route handlers for the `recipe-lens-server`.

pub mod general;
pub mod parse;

pub use general::*;
pub use parse::*;

// Shared items used by the handler modules.
use super::{errors::AppError, state::AppState};
