//! Command implementations for the negpos CLI.

mod analyze;
mod convert;

pub use analyze::cmd_analyze;
pub use convert::{cmd_convert, ConvertArgs};
