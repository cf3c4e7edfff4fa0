//! Shared utility helpers.

pub mod error;
pub(crate) mod math;
pub(crate) mod rows;

pub use error::{HarrisError, HarrisResult};
