//! Persistent store facade
//!
//! The `Store` wraps the in-memory [`Sheet`] with the snapshot persistence
//! step: hydrate on open, write the full snapshot after every successful
//! mutation. The sheet itself stays free of I/O so its logic is test-pure.
//!
//! ## Degraded mode
//!
//! Persistence failures never fail a mutation. The in-memory change stands,
//! a warning is logged, and [`Store::is_degraded`] reports the condition so
//! the front end can surface a non-blocking warning.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open()?;
//!
//! let topic_id = store.add_topic("Arrays");
//! let sub_id = store.add_sub_topic(topic_id, "Easy").unwrap();
//! store.add_question(topic_id, sub_id, "Two Sum");
//!
//! // Reads come straight from the in-memory tree
//! let topics = store.sheet().topics();
//! ```

use anyhow::{Context, Result};
use tracing::warn;

use crate::config::Config;
use crate::models::{QuestionId, SubTopicId, Topic, TopicId};
use crate::sheet::{QuestionPatch, Sheet};
use crate::storage::SnapshotPersistence;

/// Persistent study-sheet store
pub struct Store {
    /// The in-memory tree
    sheet: Sheet,
    /// Snapshot persistence handler
    persistence: SnapshotPersistence,
    /// Configuration
    config: Config,
    /// Set when the last snapshot write failed
    degraded: bool,
}

impl Store {
    /// Open the store, hydrating from the persisted snapshot
    ///
    /// Starts with an empty sheet when no snapshot exists or the snapshot
    /// cannot be deserialized.
    pub fn open() -> Result<Self> {
        let config = Config::load().context("Failed to load configuration")?;
        Self::open_with_config(config)
    }

    /// Open the store with a specific configuration
    pub fn open_with_config(config: Config) -> Result<Self> {
        let persistence = SnapshotPersistence::new(config.clone());
        let snapshot = persistence
            .load_or_default()
            .context("Failed to load sheet snapshot")?;

        Ok(Self {
            sheet: Sheet::from_snapshot(snapshot),
            persistence,
            config,
            degraded: false,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read access to the current tree
    pub fn sheet(&self) -> &Sheet {
        &self.sheet
    }

    /// True when the last snapshot write failed and the store is running
    /// in memory only
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// The persistence handler (for status reporting)
    pub fn persistence(&self) -> &SnapshotPersistence {
        &self.persistence
    }

    // ==================== Topic operations ====================

    /// Append a new topic and return its ID
    pub fn add_topic(&mut self, title: impl Into<String>) -> TopicId {
        let id = self.sheet.add_topic(title);
        self.persist();
        id
    }

    /// Replace the title of a topic; no-op if not found
    pub fn edit_topic(&mut self, id: TopicId, title: impl Into<String>) -> bool {
        let changed = self.sheet.edit_topic(id, title);
        if changed {
            self.persist();
        }
        changed
    }

    /// Delete a topic with its whole subtree; no-op if not found
    pub fn delete_topic(&mut self, id: TopicId) -> bool {
        let changed = self.sheet.delete_topic(id);
        if changed {
            self.persist();
        }
        changed
    }

    // ==================== Sub-topic operations ====================

    /// Append a new sub-topic; `None` if the topic is missing
    pub fn add_sub_topic(
        &mut self,
        topic_id: TopicId,
        title: impl Into<String>,
    ) -> Option<SubTopicId> {
        let id = self.sheet.add_sub_topic(topic_id, title);
        if id.is_some() {
            self.persist();
        }
        id
    }

    /// Replace the title of a sub-topic; no-op if the path does not resolve
    pub fn edit_sub_topic(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        title: impl Into<String>,
    ) -> bool {
        let changed = self.sheet.edit_sub_topic(topic_id, sub_topic_id, title);
        if changed {
            self.persist();
        }
        changed
    }

    /// Delete a sub-topic with its questions; no-op if the path does not resolve
    pub fn delete_sub_topic(&mut self, topic_id: TopicId, sub_topic_id: SubTopicId) -> bool {
        let changed = self.sheet.delete_sub_topic(topic_id, sub_topic_id);
        if changed {
            self.persist();
        }
        changed
    }

    // ==================== Question operations ====================

    /// Append a new question; `None` if the parent path does not resolve
    pub fn add_question(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        text: impl Into<String>,
    ) -> Option<QuestionId> {
        let id = self.sheet.add_question(topic_id, sub_topic_id, text);
        if id.is_some() {
            self.persist();
        }
        id
    }

    /// Shallow-merge a patch onto a question; no-op if the path does not resolve
    pub fn edit_question(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
        patch: QuestionPatch,
    ) -> bool {
        let changed = self
            .sheet
            .edit_question(topic_id, sub_topic_id, question_id, patch);
        if changed {
            self.persist();
        }
        changed
    }

    /// Delete a question; no-op if the path does not resolve
    pub fn delete_question(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
    ) -> bool {
        let changed = self.sheet.delete_question(topic_id, sub_topic_id, question_id);
        if changed {
            self.persist();
        }
        changed
    }

    // ==================== Reorder operations ====================

    /// Move the topic at `from` to position `to` and renumber
    pub fn reorder_topics(&mut self, from: usize, to: usize) -> bool {
        let changed = self.sheet.reorder_topics(from, to);
        if changed {
            self.persist();
        }
        changed
    }

    /// Move a sub-topic within its topic and renumber
    pub fn reorder_sub_topics(&mut self, topic_id: TopicId, from: usize, to: usize) -> bool {
        let changed = self.sheet.reorder_sub_topics(topic_id, from, to);
        if changed {
            self.persist();
        }
        changed
    }

    /// Move a question within its sub-topic and renumber
    pub fn reorder_questions(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        from: usize,
        to: usize,
    ) -> bool {
        let changed = self
            .sheet
            .reorder_questions(topic_id, sub_topic_id, from, to);
        if changed {
            self.persist();
        }
        changed
    }

    // ==================== Bulk replace ====================

    /// Replace the entire topic sequence (full-tree import)
    pub fn set_topics(&mut self, topics: Vec<Topic>) {
        self.sheet.set_topics(topics);
        self.persist();
    }

    /// Clear the sheet and remove the snapshot file
    pub fn reset(&mut self) -> Result<()> {
        self.sheet = Sheet::new();
        self.persistence
            .delete()
            .context("Failed to delete sheet snapshot")?;
        self.degraded = false;
        Ok(())
    }

    /// Write the current tree to the snapshot file
    ///
    /// Log-and-continue on failure: the in-memory state is kept and the
    /// store is flagged as degraded until a write succeeds again.
    fn persist(&mut self) {
        match self.persistence.save(&self.sheet.to_snapshot()) {
            Ok(()) => {
                self.degraded = false;
            }
            Err(err) => {
                let path = self.config.snapshot_path();
                match err.user_hint() {
                    Some(hint) => warn!(
                        path = %path.display(),
                        error = %err,
                        hint,
                        "failed to persist sheet snapshot, continuing in memory"
                    ),
                    None => warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to persist sheet snapshot, continuing in memory"
                    ),
                }
                self.degraded = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::QuestionStatus;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    #[test]
    fn test_open_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::open_with_config(test_config(&temp_dir)).unwrap();

        assert!(store.sheet().is_empty());
        assert!(!store.is_degraded());
    }

    #[test]
    fn test_mutation_writes_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let mut store = Store::open_with_config(config.clone()).unwrap();

        assert!(!config.snapshot_path().exists());
        store.add_topic("Arrays");
        assert!(config.snapshot_path().exists());
    }

    #[test]
    fn test_data_persists_across_reopens() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let (topic_id, sub_id, question_id);
        {
            let mut store = Store::open_with_config(config.clone()).unwrap();
            topic_id = store.add_topic("Arrays");
            sub_id = store.add_sub_topic(topic_id, "Easy").unwrap();
            question_id = store.add_question(topic_id, sub_id, "Two Sum").unwrap();
            store.edit_question(
                topic_id,
                sub_id,
                question_id,
                QuestionPatch::status(QuestionStatus::Done),
            );
        }

        let store = Store::open_with_config(config).unwrap();
        let topics = store.sheet().topics();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].id, topic_id);
        assert_eq!(topics[0].title, "Arrays");
        let question = store.sheet().question(topic_id, sub_id, question_id).unwrap();
        assert_eq!(question.status, QuestionStatus::Done);
    }

    #[test]
    fn test_noop_mutations_do_not_create_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let mut store = Store::open_with_config(config.clone()).unwrap();

        assert!(!store.edit_topic(uuid::Uuid::new_v4(), "missing"));
        assert!(!store.delete_topic(uuid::Uuid::new_v4()));
        assert!(store
            .add_sub_topic(uuid::Uuid::new_v4(), "orphan")
            .is_none());
        assert!(!store.reorder_topics(0, 1));

        assert!(!config.snapshot_path().exists());
    }

    #[test]
    fn test_reorder_persists() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let ids: Vec<_>;
        {
            let mut store = Store::open_with_config(config.clone()).unwrap();
            ids = vec![
                store.add_topic("a"),
                store.add_topic("b"),
                store.add_topic("c"),
            ];
            assert!(store.reorder_topics(0, 2));
        }

        let store = Store::open_with_config(config).unwrap();
        let got: Vec<_> = store.sheet().topics().iter().map(|t| t.id).collect();
        assert_eq!(got, vec![ids[1], ids[2], ids[0]]);
    }

    #[test]
    fn test_set_topics_persists() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        {
            let mut donor = Sheet::new();
            let t = donor.add_topic("imported");
            donor.add_sub_topic(t, "sub").unwrap();

            let mut store = Store::open_with_config(config.clone()).unwrap();
            store.set_topics(donor.topics());
        }

        let store = Store::open_with_config(config).unwrap();
        let topics = store.sheet().topics();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].title, "imported");
    }

    #[test]
    fn test_failed_save_degrades_and_recovers() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let mut store = Store::open_with_config(config.clone()).unwrap();

        // A directory squatting on the snapshot path makes every save fail
        std::fs::create_dir(config.snapshot_path()).unwrap();

        let topic_id = store.add_topic("Arrays");
        assert!(store.is_degraded());
        // The in-memory mutation stands
        assert_eq!(store.sheet().topic(topic_id).unwrap().title, "Arrays");

        std::fs::remove_dir(config.snapshot_path()).unwrap();

        store.add_topic("Strings");
        assert!(!store.is_degraded());
        assert!(config.snapshot_path().is_file());

        let reopened = Store::open_with_config(config).unwrap();
        assert_eq!(reopened.sheet().topic_count(), 2);
    }

    #[test]
    fn test_reset_clears_sheet_and_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        let mut store = Store::open_with_config(config.clone()).unwrap();
        store.add_topic("Arrays");
        assert!(config.snapshot_path().exists());

        store.reset().unwrap();
        assert!(store.sheet().is_empty());
        assert!(!config.snapshot_path().exists());

        let reopened = Store::open_with_config(config).unwrap();
        assert!(reopened.sheet().is_empty());
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        std::fs::write(config.snapshot_path(), b"not a snapshot").unwrap();

        let store = Store::open_with_config(config).unwrap();
        assert!(store.sheet().is_empty());
    }
}
