//! Session store adapters.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileSessionStore;
pub use memory::InMemorySessionStore;
