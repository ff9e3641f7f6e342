//! Data models for PrepSheet
//!
//! Defines the nested read models (Topic, SubTopic, Question) and the
//! snapshot aggregate that is written to disk. Field names and casing match
//! the original sheet document (`subTopics`, lowercase statuses), so
//! existing snapshots stay readable.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable topic identifier.
pub type TopicId = Uuid;
/// Stable sub-topic identifier.
pub type SubTopicId = Uuid;
/// Stable question identifier.
pub type QuestionId = Uuid;

/// Completion state of a single question
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    /// Not done yet
    #[default]
    Todo,
    /// Completed
    Done,
}

impl std::fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuestionStatus::Todo => write!(f, "todo"),
            QuestionStatus::Done => write!(f, "done"),
        }
    }
}

/// A single practice item, child of a SubTopic
///
/// `text` is opaque to the store. By convention callers embed a
/// [`QuestionDetails`] JSON payload in it, but nothing here depends on that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Question {
    /// Unique identifier
    pub id: QuestionId,
    /// Opaque question payload
    pub text: String,
    /// Index within the parent sub-topic's question sequence
    pub order: usize,
    /// Completion state
    pub status: QuestionStatus,
    /// Free-form notes
    pub notes: String,
}

/// Second-level grouping node, child of a Topic
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubTopic {
    /// Unique identifier
    pub id: SubTopicId,
    /// Display title
    pub title: String,
    /// Index within the parent topic's sub-topic sequence
    pub order: usize,
    /// Owned questions, in display order
    pub questions: Vec<Question>,
}

/// Top-level grouping node in the study sheet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Topic {
    /// Unique identifier
    pub id: TopicId,
    /// Display title
    pub title: String,
    /// Index within the sheet's topic sequence
    pub order: usize,
    /// Owned sub-topics, in display order
    #[serde(rename = "subTopics")]
    pub sub_topics: Vec<SubTopic>,
}

/// The full serialized tree written to durable storage after each mutation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Snapshot {
    /// All topics, in display order
    pub topics: Vec<Topic>,
}

/// Structured payload conventionally embedded in [`Question::text`]
///
/// The store never interprets question text; this type is the shared
/// convention used by the input layer, which validates `number > 0` and a
/// non-empty title before encoding.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionDetails {
    /// Question number on the source sheet (positive)
    pub number: u32,
    /// Question title
    pub title: String,
    /// Link to the question
    pub url: String,
}

impl QuestionDetails {
    /// Encode the payload as the question-text string
    pub fn encode(&self) -> String {
        // A struct of plain fields cannot fail to serialize
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Try to decode a question-text string back into a payload
    ///
    /// Returns `None` for free-form text that does not carry the payload.
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }
}
