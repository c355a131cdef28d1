//! Centralized error handling module
//!
//! Every fallible operation in the crate returns [`AppResult`], so callers
//! match on one typed enum instead of boxed errors.

pub mod types;

pub use types::{AppError, AppResult};
