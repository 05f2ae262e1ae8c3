pub mod tools;
pub mod walker;

pub use tools::{CommandExecutor, DiskUsage, FileSystem, LocalFileSystem, SystemExecutor};
pub use walker::{dir_size, total_size};
