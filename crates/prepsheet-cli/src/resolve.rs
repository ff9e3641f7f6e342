//! ID resolution for CLI arguments
//!
//! Commands accept a full UUID, an unambiguous UUID prefix, or an exact
//! title. Resolution happens here, in the UI layer; the store itself only
//! ever sees real IDs. The `move` commands additionally turn a resolved ID
//! into its positional index, since the reorder operations are positional.

use anyhow::{bail, Result};
use uuid::Uuid;

use prepsheet_core::{Question, Sheet, SubTopic, Topic};

use crate::output::question_label;

/// Resolve a topic reference against the current sheet
pub fn resolve_topic(sheet: &Sheet, key: &str) -> Result<Topic> {
    let topics = sheet.topics();
    let candidates: Vec<(Uuid, String)> =
        topics.iter().map(|t| (t.id, t.title.clone())).collect();
    let id = resolve_key("topic", key, &candidates)?;
    topics
        .into_iter()
        .find(|t| t.id == id)
        .ok_or_else(|| anyhow::anyhow!("Topic not found: {}", key))
}

/// Resolve a sub-topic reference within a topic
pub fn resolve_sub_topic(topic: &Topic, key: &str) -> Result<SubTopic> {
    let candidates: Vec<(Uuid, String)> = topic
        .sub_topics
        .iter()
        .map(|s| (s.id, s.title.clone()))
        .collect();
    let id = resolve_key("sub-topic", key, &candidates)?;
    topic
        .sub_topics
        .iter()
        .find(|s| s.id == id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Sub-topic not found: {}", key))
}

/// Resolve a question reference within a sub-topic
///
/// Questions have no title of their own, so only UUIDs and UUID prefixes
/// match here; the decoded payload title is used for error listings only.
pub fn resolve_question(sub: &SubTopic, key: &str) -> Result<Question> {
    let candidates: Vec<(Uuid, String)> = sub
        .questions
        .iter()
        .map(|q| (q.id, question_label(q)))
        .collect();
    let id = resolve_uuid_key("question", key, &candidates)?;
    sub.questions
        .iter()
        .find(|q| q.id == id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Question not found: {}", key))
}

/// Resolve by full UUID, exact label, or unambiguous UUID prefix
fn resolve_key(kind: &str, key: &str, candidates: &[(Uuid, String)]) -> Result<Uuid> {
    if let Ok(uuid) = Uuid::parse_str(key) {
        if candidates.iter().any(|(id, _)| *id == uuid) {
            return Ok(uuid);
        }
        bail!("No {} found matching: {}", kind, key);
    }

    let by_label: Vec<_> = candidates
        .iter()
        .filter(|(_, label)| label == key)
        .collect();
    match by_label.len() {
        1 => return Ok(by_label[0].0),
        n if n > 1 => {
            list_matches(kind, key, &by_label);
            bail!("Ambiguous {} title. Use the ID instead.", kind);
        }
        _ => {}
    }

    resolve_uuid_key(kind, key, candidates)
}

/// Resolve by full UUID or unambiguous UUID prefix only
fn resolve_uuid_key(kind: &str, key: &str, candidates: &[(Uuid, String)]) -> Result<Uuid> {
    if let Ok(uuid) = Uuid::parse_str(key) {
        if candidates.iter().any(|(id, _)| *id == uuid) {
            return Ok(uuid);
        }
        bail!("No {} found matching: {}", kind, key);
    }

    let matches: Vec<_> = candidates
        .iter()
        .filter(|(id, _)| id.to_string().starts_with(key))
        .collect();

    match matches.len() {
        0 => bail!("No {} found matching: {}", kind, key),
        1 => Ok(matches[0].0),
        _ => {
            list_matches(kind, key, &matches);
            bail!("Ambiguous ID. Please provide more characters.");
        }
    }
}

fn list_matches(kind: &str, key: &str, matches: &[&(Uuid, String)]) {
    eprintln!("Multiple {}s match '{}':", kind, key);
    for (id, label) in matches {
        eprintln!("  {} - {}", id, label);
    }
}

/// Trim and validate a user-supplied title
pub fn require_title(value: &str, what: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        bail!("{} title must not be empty", what);
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_sheet() -> Sheet {
        let mut sheet = Sheet::new();
        let arrays = sheet.add_topic("Arrays");
        let easy = sheet.add_sub_topic(arrays, "Easy").unwrap();
        sheet.add_question(arrays, easy, "two sum").unwrap();
        sheet.add_topic("Strings");
        sheet
    }

    #[test]
    fn test_resolve_topic_by_title() {
        let sheet = sample_sheet();
        let topic = resolve_topic(&sheet, "Arrays").unwrap();
        assert_eq!(topic.title, "Arrays");
    }

    #[test]
    fn test_resolve_topic_by_full_uuid_and_prefix() {
        let sheet = sample_sheet();
        let arrays = resolve_topic(&sheet, "Arrays").unwrap();

        let by_uuid = resolve_topic(&sheet, &arrays.id.to_string()).unwrap();
        assert_eq!(by_uuid.id, arrays.id);

        let prefix = &arrays.id.to_string()[..8];
        let by_prefix = resolve_topic(&sheet, prefix).unwrap();
        assert_eq!(by_prefix.id, arrays.id);
    }

    #[test]
    fn test_resolve_topic_missing() {
        let sheet = sample_sheet();
        assert!(resolve_topic(&sheet, "Graphs").is_err());
        assert!(resolve_topic(&sheet, &Uuid::new_v4().to_string()).is_err());
    }

    #[test]
    fn test_resolve_ambiguous_title() {
        let mut sheet = Sheet::new();
        sheet.add_topic("dup");
        sheet.add_topic("dup");
        assert!(resolve_topic(&sheet, "dup").is_err());
    }

    #[test]
    fn test_resolve_sub_topic_and_question() {
        let sheet = sample_sheet();
        let arrays = resolve_topic(&sheet, "Arrays").unwrap();
        let easy = resolve_sub_topic(&arrays, "Easy").unwrap();
        assert_eq!(easy.title, "Easy");

        let question_id = easy.questions[0].id;
        let question = resolve_question(&easy, &question_id.to_string()[..8]).unwrap();
        assert_eq!(question.id, question_id);

        assert!(resolve_question(&easy, "ffffffff").is_err());
    }

    #[test]
    fn test_require_title() {
        assert_eq!(require_title("  Arrays  ", "Topic").unwrap(), "Arrays");
        assert!(require_title("   ", "Topic").is_err());
    }
}
