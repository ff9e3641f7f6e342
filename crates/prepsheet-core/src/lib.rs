//! PrepSheet Core Library
//!
//! This crate provides the core functionality for PrepSheet, a local-first
//! study-sheet tracker: a hierarchical Topic -> SubTopic -> Question store
//! with ordered sequences, cascade deletes, splice-style reordering, and a
//! full-snapshot JSON persistence step after every mutation.
//!
//! # Architecture
//!
//! - [`sheet::Sheet`]: the in-memory tree and every CRUD/reorder operation,
//!   free of I/O
//! - [`store::Store`]: persistence wrapper that snapshots the sheet to disk
//!   after each successful mutation
//! - [`storage`]: atomic snapshot file handling
//! - [`config`]: application configuration, including the UI theme
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open()?;
//!
//! let topic_id = store.add_topic("Arrays");
//! let sub_id = store.add_sub_topic(topic_id, "Easy").unwrap();
//! store.add_question(topic_id, sub_id, "Two Sum");
//!
//! let topics = store.sheet().topics();
//! ```

pub mod config;
pub mod models;
pub mod sheet;
pub mod storage;
pub mod store;

pub use config::{Config, Theme};
pub use models::{
    Question, QuestionDetails, QuestionId, QuestionStatus, Snapshot, SubTopic, SubTopicId, Topic,
    TopicId,
};
pub use sheet::{Progress, QuestionPatch, Sheet, TopicProgress};
pub use storage::{SnapshotPersistence, StorageError, StorageResult};
pub use store::Store;
