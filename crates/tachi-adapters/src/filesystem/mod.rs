//! `Filesystem` port implementations: the real disk for the CLI, and an
//! in-memory tree for tests and previews.

mod local;
mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;
