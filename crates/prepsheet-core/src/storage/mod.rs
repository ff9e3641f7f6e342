//! Storage layer
//!
//! One durable record: the full sheet snapshot as JSON, rewritten atomically
//! after every successful mutation. The in-memory tree is the read path;
//! there is no separate query store.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::SnapshotPersistence;
