pub mod catalog;
pub mod engine;
pub mod remover;
pub mod runner;

pub use catalog::{catalog, Action, CommandSpec, FailurePolicy, Section};
pub use engine::{Cleaner, RunReport};
pub use remover::{remove_path, Removal};
pub use runner::{run_command, Invocation};
