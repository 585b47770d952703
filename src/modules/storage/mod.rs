pub mod keys;
pub mod store;

// Re-export the main types and functions
pub use store::{get_json, set_json, FileStore, KeyValueStore, MemoryStore, StorageError};
