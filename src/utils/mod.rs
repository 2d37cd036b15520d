//! Browser utilities.
//!
//! Provides:
//! - [`dom`] - Window, localStorage and page reload helpers
//! - [`format`] - Dates and amounts for the account views
//! - [`race_with_timeout`] - Promise racing for wallet requests

pub mod dom;
pub mod format;
mod promise;

pub use promise::{RaceResult, race_with_timeout};
