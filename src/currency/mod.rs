//! Currency display for settlement amounts

pub mod format;

pub use format::*;
