pub mod config;
pub mod errors;
pub mod format;
pub mod safety;

pub use config::{Options, Paths};
pub use errors::{CleanError, Result};
