//! The hierarchical sheet store
//!
//! `Sheet` holds the Topic -> SubTopic -> Question tree in memory and
//! implements every CRUD and reorder operation. It performs no I/O; the
//! [`crate::store::Store`] wrapper snapshots it to disk after mutations.
//!
//! ## Representation
//!
//! One table per level, keyed by ID, with an explicit parent key on each
//! child record and an ordered child-ID vector on each parent. Lookups are
//! O(1) by ID and mutations touch only the sequence being changed. The
//! nested [`Topic`] structs are a materialized read view; `order` fields in
//! that view are derived from sequence position, never stored.
//!
//! ## Contract
//!
//! All operations are synchronous and total. An operation that targets a
//! missing ID leaves the tree unchanged: adds under a missing parent return
//! `None`, every other mutation returns whether the tree changed. Deleting
//! a topic or sub-topic cascades to its whole subtree, and surviving
//! siblings are renumbered contiguously (a deliberate change from the
//! original sheet, which left order gaps after deletes).

use std::collections::HashMap;

use crate::models::{
    Question, QuestionId, QuestionStatus, Snapshot, SubTopic, SubTopicId, Topic, TopicId,
};
use uuid::Uuid;

/// Partial update applied to a question by [`Sheet::edit_question`]
///
/// Unset fields are preserved (shallow merge).
#[derive(Debug, Clone, Default)]
pub struct QuestionPatch {
    /// Replacement question text
    pub text: Option<String>,
    /// Replacement completion status
    pub status: Option<QuestionStatus>,
    /// Replacement notes
    pub notes: Option<String>,
}

impl QuestionPatch {
    /// Patch that only changes the status
    pub fn status(status: QuestionStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// True when the patch carries no fields
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.status.is_none() && self.notes.is_none()
    }
}

#[derive(Debug, Clone)]
struct TopicRecord {
    title: String,
    sub_topics: Vec<SubTopicId>,
}

#[derive(Debug, Clone)]
struct SubTopicRecord {
    topic: TopicId,
    title: String,
    questions: Vec<QuestionId>,
}

#[derive(Debug, Clone)]
struct QuestionRecord {
    sub_topic: SubTopicId,
    text: String,
    status: QuestionStatus,
    notes: String,
}

/// In-memory hierarchical study sheet
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    topic_order: Vec<TopicId>,
    topics: HashMap<TopicId, TopicRecord>,
    sub_topics: HashMap<SubTopicId, SubTopicRecord>,
    questions: HashMap<QuestionId, QuestionRecord>,
}

impl Sheet {
    /// Create an empty sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sheet from a persisted snapshot
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut sheet = Self::new();
        sheet.set_topics(snapshot.topics);
        sheet
    }

    /// Serialize the full tree into its snapshot form
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            topics: self.topics(),
        }
    }

    // ==================== Topic operations ====================

    /// Append a new topic and return its ID
    pub fn add_topic(&mut self, title: impl Into<String>) -> TopicId {
        let id = Uuid::new_v4();
        self.topics.insert(
            id,
            TopicRecord {
                title: title.into(),
                sub_topics: Vec::new(),
            },
        );
        self.topic_order.push(id);
        id
    }

    /// Replace the title of a topic; no-op if not found
    pub fn edit_topic(&mut self, id: TopicId, title: impl Into<String>) -> bool {
        match self.topics.get_mut(&id) {
            Some(record) => {
                record.title = title.into();
                true
            }
            None => false,
        }
    }

    /// Delete a topic and its whole subtree; no-op if not found
    pub fn delete_topic(&mut self, id: TopicId) -> bool {
        let Some(record) = self.topics.remove(&id) else {
            return false;
        };
        for sub_id in record.sub_topics {
            if let Some(sub) = self.sub_topics.remove(&sub_id) {
                for question_id in sub.questions {
                    self.questions.remove(&question_id);
                }
            }
        }
        self.topic_order.retain(|t| *t != id);
        true
    }

    // ==================== Sub-topic operations ====================

    /// Append a new sub-topic under a topic; `None` if the topic is missing
    pub fn add_sub_topic(
        &mut self,
        topic_id: TopicId,
        title: impl Into<String>,
    ) -> Option<SubTopicId> {
        let topic = self.topics.get_mut(&topic_id)?;
        let id = Uuid::new_v4();
        topic.sub_topics.push(id);
        self.sub_topics.insert(
            id,
            SubTopicRecord {
                topic: topic_id,
                title: title.into(),
                questions: Vec::new(),
            },
        );
        Some(id)
    }

    /// Replace the title of a sub-topic; no-op if the path does not resolve
    pub fn edit_sub_topic(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        title: impl Into<String>,
    ) -> bool {
        match self.sub_topics.get_mut(&sub_topic_id) {
            Some(record) if record.topic == topic_id => {
                record.title = title.into();
                true
            }
            _ => false,
        }
    }

    /// Delete a sub-topic and its questions; no-op if the path does not resolve
    pub fn delete_sub_topic(&mut self, topic_id: TopicId, sub_topic_id: SubTopicId) -> bool {
        match self.sub_topics.get(&sub_topic_id) {
            Some(record) if record.topic == topic_id => {}
            _ => return false,
        }
        if let Some(record) = self.sub_topics.remove(&sub_topic_id) {
            for question_id in record.questions {
                self.questions.remove(&question_id);
            }
        }
        if let Some(topic) = self.topics.get_mut(&topic_id) {
            topic.sub_topics.retain(|s| *s != sub_topic_id);
        }
        true
    }

    // ==================== Question operations ====================

    /// Append a new question; `None` if the parent path does not resolve
    ///
    /// The question starts as `todo` with empty notes. `text` is stored
    /// verbatim; the store never interprets it.
    pub fn add_question(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        text: impl Into<String>,
    ) -> Option<QuestionId> {
        let sub = self.sub_topics.get_mut(&sub_topic_id)?;
        if sub.topic != topic_id {
            return None;
        }
        let id = Uuid::new_v4();
        sub.questions.push(id);
        self.questions.insert(
            id,
            QuestionRecord {
                sub_topic: sub_topic_id,
                text: text.into(),
                status: QuestionStatus::Todo,
                notes: String::new(),
            },
        );
        Some(id)
    }

    /// Shallow-merge a patch onto a question; no-op if the path does not resolve
    pub fn edit_question(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
        patch: QuestionPatch,
    ) -> bool {
        if !self.question_path_resolves(topic_id, sub_topic_id, question_id) {
            return false;
        }
        let Some(record) = self.questions.get_mut(&question_id) else {
            return false;
        };
        if let Some(text) = patch.text {
            record.text = text;
        }
        if let Some(status) = patch.status {
            record.status = status;
        }
        if let Some(notes) = patch.notes {
            record.notes = notes;
        }
        true
    }

    /// Delete a question; no-op if the path does not resolve
    pub fn delete_question(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
    ) -> bool {
        if !self.question_path_resolves(topic_id, sub_topic_id, question_id) {
            return false;
        }
        self.questions.remove(&question_id);
        if let Some(sub) = self.sub_topics.get_mut(&sub_topic_id) {
            sub.questions.retain(|q| *q != question_id);
        }
        true
    }

    // ==================== Reorder operations ====================

    /// Move the topic at `from` to position `to`
    ///
    /// Splice semantics: the item is removed, then reinserted. `from` out of
    /// bounds is a no-op; `to` is clamped to the shortened sequence length.
    pub fn reorder_topics(&mut self, from: usize, to: usize) -> bool {
        splice(&mut self.topic_order, from, to)
    }

    /// Move a sub-topic within its topic; no-op if the topic is missing
    pub fn reorder_sub_topics(&mut self, topic_id: TopicId, from: usize, to: usize) -> bool {
        match self.topics.get_mut(&topic_id) {
            Some(topic) => splice(&mut topic.sub_topics, from, to),
            None => false,
        }
    }

    /// Move a question within its sub-topic; no-op if the path does not resolve
    pub fn reorder_questions(
        &mut self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        from: usize,
        to: usize,
    ) -> bool {
        match self.sub_topics.get_mut(&sub_topic_id) {
            Some(sub) if sub.topic == topic_id => splice(&mut sub.questions, from, to),
            _ => false,
        }
    }

    // ==================== Bulk replace ====================

    /// Replace the entire topic sequence (full-tree import)
    ///
    /// The supplied tree is trusted: sequences are taken as-is and ID
    /// uniqueness is the caller's responsibility. Stored `order` values are
    /// ignored; order is re-derived from position, as everywhere else.
    pub fn set_topics(&mut self, topics: Vec<Topic>) {
        self.topic_order.clear();
        self.topics.clear();
        self.sub_topics.clear();
        self.questions.clear();

        for topic in topics {
            self.topic_order.push(topic.id);
            let mut sub_ids = Vec::with_capacity(topic.sub_topics.len());
            for sub in topic.sub_topics {
                sub_ids.push(sub.id);
                let mut question_ids = Vec::with_capacity(sub.questions.len());
                for question in sub.questions {
                    question_ids.push(question.id);
                    self.questions.insert(
                        question.id,
                        QuestionRecord {
                            sub_topic: sub.id,
                            text: question.text,
                            status: question.status,
                            notes: question.notes,
                        },
                    );
                }
                self.sub_topics.insert(
                    sub.id,
                    SubTopicRecord {
                        topic: topic.id,
                        title: sub.title,
                        questions: question_ids,
                    },
                );
            }
            self.topics.insert(
                topic.id,
                TopicRecord {
                    title: topic.title,
                    sub_topics: sub_ids,
                },
            );
        }
    }

    // ==================== Reads ====================

    /// Materialize the full tree in display order
    ///
    /// `order` fields are the positional indices at the time of the call.
    pub fn topics(&self) -> Vec<Topic> {
        self.topic_order
            .iter()
            .enumerate()
            .filter_map(|(index, id)| self.materialize_topic(*id, index))
            .collect()
    }

    /// Materialize one topic; `None` if not found
    pub fn topic(&self, id: TopicId) -> Option<Topic> {
        let index = self.topic_order.iter().position(|t| *t == id)?;
        self.materialize_topic(id, index)
    }

    /// Materialize one sub-topic; `None` if the path does not resolve
    pub fn sub_topic(&self, topic_id: TopicId, sub_topic_id: SubTopicId) -> Option<SubTopic> {
        let topic = self.topics.get(&topic_id)?;
        let index = topic.sub_topics.iter().position(|s| *s == sub_topic_id)?;
        self.materialize_sub_topic(sub_topic_id, index)
    }

    /// Materialize one question; `None` if the path does not resolve
    pub fn question(
        &self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
    ) -> Option<Question> {
        if !self.question_path_resolves(topic_id, sub_topic_id, question_id) {
            return None;
        }
        let sub = self.sub_topics.get(&sub_topic_id)?;
        let index = sub.questions.iter().position(|q| *q == question_id)?;
        self.materialize_question(question_id, index)
    }

    /// Number of topics
    pub fn topic_count(&self) -> usize {
        self.topic_order.len()
    }

    /// Number of questions across the whole tree
    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// True when the sheet has no topics
    pub fn is_empty(&self) -> bool {
        self.topic_order.is_empty()
    }

    /// Completion counters for the progress panel
    pub fn progress(&self) -> Progress {
        let mut overall_done = 0;
        let mut topics = Vec::with_capacity(self.topic_order.len());
        for id in &self.topic_order {
            let Some(record) = self.topics.get(id) else {
                continue;
            };
            let mut done = 0;
            let mut total = 0;
            for sub_id in &record.sub_topics {
                if let Some(sub) = self.sub_topics.get(sub_id) {
                    for question_id in &sub.questions {
                        if let Some(question) = self.questions.get(question_id) {
                            total += 1;
                            if question.status == QuestionStatus::Done {
                                done += 1;
                            }
                        }
                    }
                }
            }
            overall_done += done;
            topics.push(TopicProgress {
                id: *id,
                title: record.title.clone(),
                done,
                total,
            });
        }
        Progress {
            done: overall_done,
            total: self.questions.len(),
            topics,
        }
    }

    // ==================== Internals ====================

    fn question_path_resolves(
        &self,
        topic_id: TopicId,
        sub_topic_id: SubTopicId,
        question_id: QuestionId,
    ) -> bool {
        let Some(sub) = self.sub_topics.get(&sub_topic_id) else {
            return false;
        };
        if sub.topic != topic_id {
            return false;
        }
        matches!(self.questions.get(&question_id), Some(q) if q.sub_topic == sub_topic_id)
    }

    fn materialize_topic(&self, id: TopicId, order: usize) -> Option<Topic> {
        let record = self.topics.get(&id)?;
        let sub_topics = record
            .sub_topics
            .iter()
            .enumerate()
            .filter_map(|(index, sub_id)| self.materialize_sub_topic(*sub_id, index))
            .collect();
        Some(Topic {
            id,
            title: record.title.clone(),
            order,
            sub_topics,
        })
    }

    fn materialize_sub_topic(&self, id: SubTopicId, order: usize) -> Option<SubTopic> {
        let record = self.sub_topics.get(&id)?;
        let questions = record
            .questions
            .iter()
            .enumerate()
            .filter_map(|(index, question_id)| self.materialize_question(*question_id, index))
            .collect();
        Some(SubTopic {
            id,
            title: record.title.clone(),
            order,
            questions,
        })
    }

    fn materialize_question(&self, id: QuestionId, order: usize) -> Option<Question> {
        let record = self.questions.get(&id)?;
        Some(Question {
            id,
            text: record.text.clone(),
            order,
            status: record.status,
            notes: record.notes.clone(),
        })
    }
}

/// Overall and per-topic completion counters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    /// Questions marked done across the sheet
    pub done: usize,
    /// Total questions across the sheet
    pub total: usize,
    /// Per-topic breakdown, in display order
    pub topics: Vec<TopicProgress>,
}

/// Completion counters for one topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicProgress {
    pub id: TopicId,
    pub title: String,
    pub done: usize,
    pub total: usize,
}

/// Remove the element at `from` and reinsert it at `to`
///
/// `from` out of bounds leaves the sequence untouched; `to` is clamped to
/// the shortened length, so an overlong target lands the item at the end.
fn splice(ids: &mut Vec<Uuid>, from: usize, to: usize) -> bool {
    if from >= ids.len() {
        return false;
    }
    let moved = ids.remove(from);
    let to = to.min(ids.len());
    ids.insert(to, moved);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet_with_topics(titles: &[&str]) -> (Sheet, Vec<TopicId>) {
        let mut sheet = Sheet::new();
        let ids = titles.iter().map(|t| sheet.add_topic(*t)).collect();
        (sheet, ids)
    }

    #[test]
    fn test_add_scenario() {
        let mut sheet = Sheet::new();
        let topic_id = sheet.add_topic("Arrays");
        let sub_id = sheet.add_sub_topic(topic_id, "Easy").unwrap();
        sheet
            .add_question(
                topic_id,
                sub_id,
                r#"{"number":1,"title":"Two Sum","url":"https://example.com/two-sum/"}"#,
            )
            .unwrap();

        let topics = sheet.topics();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].title, "Arrays");
        assert_eq!(topics[0].sub_topics.len(), 1);
        assert_eq!(topics[0].sub_topics[0].title, "Easy");

        let questions = &topics[0].sub_topics[0].questions;
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].status, QuestionStatus::Todo);
        assert!(questions[0].notes.is_empty());
    }

    #[test]
    fn test_orders_are_positional() {
        let (sheet, _) = sheet_with_topics(&["a", "b", "c"]);
        let orders: Vec<usize> = sheet.topics().iter().map(|t| t.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_edit_topic() {
        let (mut sheet, ids) = sheet_with_topics(&["a"]);
        assert!(sheet.edit_topic(ids[0], "renamed"));
        assert_eq!(sheet.topics()[0].title, "renamed");

        // Missing ID is a silent no-op
        assert!(!sheet.edit_topic(Uuid::new_v4(), "nope"));
        assert_eq!(sheet.topics()[0].title, "renamed");
    }

    #[test]
    fn test_delete_preserves_relative_order_and_renumbers() {
        let (mut sheet, ids) = sheet_with_topics(&["a", "b", "c", "d"]);
        assert!(sheet.delete_topic(ids[1]));

        let topics = sheet.topics();
        let titles: Vec<&str> = topics.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c", "d"]);
        let orders: Vec<usize> = topics.iter().map(|t| t.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_delete_topic_cascades() {
        let mut sheet = Sheet::new();
        let topic_id = sheet.add_topic("Arrays");
        let sub_id = sheet.add_sub_topic(topic_id, "Easy").unwrap();
        sheet.add_question(topic_id, sub_id, "q1").unwrap();
        sheet.add_question(topic_id, sub_id, "q2").unwrap();

        let keeper = sheet.add_topic("Strings");
        let keeper_sub = sheet.add_sub_topic(keeper, "Hard").unwrap();
        let keeper_question = sheet.add_question(keeper, keeper_sub, "q3").unwrap();

        assert!(sheet.delete_topic(topic_id));

        // No orphans reachable from the root, unrelated subtree untouched
        assert_eq!(sheet.topic_count(), 1);
        assert_eq!(sheet.question_count(), 1);
        assert!(sheet.topic(topic_id).is_none());
        assert!(sheet.sub_topic(topic_id, sub_id).is_none());
        assert!(sheet
            .question(keeper, keeper_sub, keeper_question)
            .is_some());
    }

    #[test]
    fn test_delete_sub_topic_cascades() {
        let mut sheet = Sheet::new();
        let topic_id = sheet.add_topic("Arrays");
        let sub_id = sheet.add_sub_topic(topic_id, "Easy").unwrap();
        sheet.add_question(topic_id, sub_id, "q1").unwrap();

        assert!(sheet.delete_sub_topic(topic_id, sub_id));
        assert_eq!(sheet.question_count(), 0);
        assert!(sheet.topic(topic_id).unwrap().sub_topics.is_empty());
    }

    #[test]
    fn test_scoped_operations_require_matching_parent() {
        let mut sheet = Sheet::new();
        let topic_a = sheet.add_topic("a");
        let topic_b = sheet.add_topic("b");
        let sub_a = sheet.add_sub_topic(topic_a, "sub").unwrap();

        // Wrong parent: no-op
        assert!(!sheet.edit_sub_topic(topic_b, sub_a, "renamed"));
        assert!(!sheet.delete_sub_topic(topic_b, sub_a));
        assert!(sheet.add_question(topic_b, sub_a, "q").is_none());
        assert_eq!(sheet.sub_topic(topic_a, sub_a).unwrap().title, "sub");
    }

    #[test]
    fn test_reorder_topics_permutation() {
        let (mut sheet, ids) = sheet_with_topics(&["a", "b", "c"]);
        assert!(sheet.reorder_topics(0, 2));

        let topics = sheet.topics();
        let got: Vec<TopicId> = topics.iter().map(|t| t.id).collect();
        assert_eq!(got, vec![ids[1], ids[2], ids[0]]);
        let orders: Vec<usize> = topics.iter().map(|t| t.order).collect();
        assert_eq!(orders, vec![0, 1, 2]);
    }

    #[test]
    fn test_reorder_out_of_bounds() {
        let (mut sheet, ids) = sheet_with_topics(&["a", "b", "c"]);

        // from beyond the end: no-op
        assert!(!sheet.reorder_topics(3, 0));
        assert_eq!(
            sheet.topics().iter().map(|t| t.id).collect::<Vec<_>>(),
            ids
        );

        // to beyond the end: clamps, item lands last
        assert!(sheet.reorder_topics(0, 99));
        assert_eq!(
            sheet.topics().iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![ids[1], ids[2], ids[0]]
        );
    }

    #[test]
    fn test_reorder_sub_topics_and_questions() {
        let mut sheet = Sheet::new();
        let topic_id = sheet.add_topic("Arrays");
        let s0 = sheet.add_sub_topic(topic_id, "Easy").unwrap();
        let s1 = sheet.add_sub_topic(topic_id, "Medium").unwrap();
        assert!(sheet.reorder_sub_topics(topic_id, 1, 0));
        let subs = sheet.topic(topic_id).unwrap().sub_topics;
        assert_eq!(subs.iter().map(|s| s.id).collect::<Vec<_>>(), vec![s1, s0]);
        assert_eq!(subs.iter().map(|s| s.order).collect::<Vec<_>>(), vec![0, 1]);

        let q0 = sheet.add_question(topic_id, s0, "q0").unwrap();
        let q1 = sheet.add_question(topic_id, s0, "q1").unwrap();
        let q2 = sheet.add_question(topic_id, s0, "q2").unwrap();
        assert!(sheet.reorder_questions(topic_id, s0, 2, 0));
        let questions = sheet.sub_topic(topic_id, s0).unwrap().questions;
        assert_eq!(
            questions.iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![q2, q0, q1]
        );

        // Missing parent: no-op
        assert!(!sheet.reorder_sub_topics(Uuid::new_v4(), 0, 1));
        assert!(!sheet.reorder_questions(topic_id, Uuid::new_v4(), 0, 1));
    }

    #[test]
    fn test_edit_question_partial_merge() {
        let mut sheet = Sheet::new();
        let topic_id = sheet.add_topic("Arrays");
        let sub_id = sheet.add_sub_topic(topic_id, "Easy").unwrap();
        let question_id = sheet.add_question(topic_id, sub_id, "original").unwrap();

        assert!(sheet.edit_question(
            topic_id,
            sub_id,
            question_id,
            QuestionPatch::status(QuestionStatus::Done),
        ));

        let question = sheet.question(topic_id, sub_id, question_id).unwrap();
        assert_eq!(question.status, QuestionStatus::Done);
        assert_eq!(question.text, "original");
        assert_eq!(question.order, 0);
        assert!(question.notes.is_empty());

        assert!(sheet.edit_question(
            topic_id,
            sub_id,
            question_id,
            QuestionPatch {
                notes: Some("two pointers".to_string()),
                ..QuestionPatch::default()
            },
        ));
        let question = sheet.question(topic_id, sub_id, question_id).unwrap();
        assert_eq!(question.notes, "two pointers");
        assert_eq!(question.status, QuestionStatus::Done);
    }

    #[test]
    fn test_delete_question_renumbers() {
        let mut sheet = Sheet::new();
        let topic_id = sheet.add_topic("Arrays");
        let sub_id = sheet.add_sub_topic(topic_id, "Easy").unwrap();
        let q0 = sheet.add_question(topic_id, sub_id, "q0").unwrap();
        let q1 = sheet.add_question(topic_id, sub_id, "q1").unwrap();
        let q2 = sheet.add_question(topic_id, sub_id, "q2").unwrap();

        assert!(sheet.delete_question(topic_id, sub_id, q1));
        let questions = sheet.sub_topic(topic_id, sub_id).unwrap().questions;
        assert_eq!(
            questions.iter().map(|q| q.id).collect::<Vec<_>>(),
            vec![q0, q2]
        );
        assert_eq!(
            questions.iter().map(|q| q.order).collect::<Vec<_>>(),
            vec![0, 1]
        );
    }

    #[test]
    fn test_read_is_idempotent() {
        let mut sheet = Sheet::new();
        let topic_id = sheet.add_topic("Arrays");
        let sub_id = sheet.add_sub_topic(topic_id, "Easy").unwrap();
        sheet.add_question(topic_id, sub_id, "q").unwrap();

        assert_eq!(sheet.topics(), sheet.topics());
    }

    #[test]
    fn test_snapshot_round_trip_reproduces_tree() {
        let mut sheet = Sheet::new();
        let topic_id = sheet.add_topic("Arrays");
        let sub_id = sheet.add_sub_topic(topic_id, "Easy").unwrap();
        let question_id = sheet.add_question(topic_id, sub_id, "q").unwrap();
        sheet.edit_question(
            topic_id,
            sub_id,
            question_id,
            QuestionPatch::status(QuestionStatus::Done),
        );
        sheet.add_topic("Strings");
        sheet.reorder_topics(1, 0);

        let restored = Sheet::from_snapshot(sheet.to_snapshot());
        assert_eq!(restored.topics(), sheet.topics());
    }

    #[test]
    fn test_set_topics_bulk_replace() {
        let (mut sheet, _) = sheet_with_topics(&["old"]);

        let mut other = Sheet::new();
        let t = other.add_topic("imported");
        other.add_sub_topic(t, "sub").unwrap();

        sheet.set_topics(other.topics());
        let topics = sheet.topics();
        assert_eq!(topics.len(), 1);
        assert_eq!(topics[0].title, "imported");
        assert_eq!(topics[0].id, t);
        assert_eq!(topics[0].sub_topics.len(), 1);
    }

    #[test]
    fn test_progress_counters() {
        let mut sheet = Sheet::new();
        let arrays = sheet.add_topic("Arrays");
        let easy = sheet.add_sub_topic(arrays, "Easy").unwrap();
        let q0 = sheet.add_question(arrays, easy, "q0").unwrap();
        sheet.add_question(arrays, easy, "q1").unwrap();
        sheet.edit_question(arrays, easy, q0, QuestionPatch::status(QuestionStatus::Done));

        let strings = sheet.add_topic("Strings");
        let hard = sheet.add_sub_topic(strings, "Hard").unwrap();
        sheet.add_question(strings, hard, "q2").unwrap();

        let progress = sheet.progress();
        assert_eq!(progress.done, 1);
        assert_eq!(progress.total, 3);
        assert_eq!(progress.topics.len(), 2);
        assert_eq!(progress.topics[0].title, "Arrays");
        assert_eq!(progress.topics[0].done, 1);
        assert_eq!(progress.topics[0].total, 2);
        assert_eq!(progress.topics[1].done, 0);
        assert_eq!(progress.topics[1].total, 1);
    }

    #[test]
    fn test_patch_helpers() {
        assert!(QuestionPatch::default().is_empty());
        assert!(!QuestionPatch::status(QuestionStatus::Done).is_empty());
    }
}
