pub mod interner;

pub use interner::{IStr, Interner};
