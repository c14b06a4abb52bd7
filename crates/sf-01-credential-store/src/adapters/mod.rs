//! Adapters Layer (Driven Adapters)
//!
//! - `FileTokenStorage` - token persisted in a single file
//! - `MemoryTokenStorage` - token held in process memory

pub mod file;
pub mod memory;

pub use file::FileTokenStorage;
pub use memory::MemoryTokenStorage;
