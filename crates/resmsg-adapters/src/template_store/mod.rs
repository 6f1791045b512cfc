//! Catalog stores.
//!
//! Five implementations of the `TemplateStore` port. None of them cache:
//! every `load` is a fresh, side-effect-free read, and the registry owns
//! the merged snapshot.

pub mod composite;
pub mod embedded;
pub mod file;
pub mod memory;
pub mod sqlite;

pub use composite::CompositeStore;
pub use embedded::EmbeddedStore;
pub use file::FileStore;
pub use memory::InMemoryStore;
pub use sqlite::{DEFAULT_TABLE, SqliteStore, SqliteStoreConfig};
