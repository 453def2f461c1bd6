//! Foundation types shared across the IR.
//!
//! This module has no dependencies on any other module in the crate.

mod position;

pub use position::{Position, Span};
