//! Storage layer: atomic files and the `KeyValueStore` backends built on them.

mod atomic_file;
mod json_file_store;
mod memory_store;

pub use atomic_file::AtomicFile;
pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;
