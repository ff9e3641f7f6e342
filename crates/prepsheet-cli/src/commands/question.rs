//! Question command handlers

use anyhow::{bail, Result};

use prepsheet_core::{QuestionDetails, QuestionPatch, QuestionStatus, Store};

use crate::output::{question_label, Output};
use crate::prompt::confirm;
use crate::resolve::{require_title, resolve_question, resolve_sub_topic, resolve_topic};

/// Create a new question (appended at the end of its sub-topic)
///
/// Either a structured payload (`--number`, `--title`, `--url`) or raw
/// text (`--text`). The structured form matches the sheet's question
/// entry dialog.
#[allow(clippy::too_many_arguments)]
pub fn create(
    store: &mut Store,
    topic_key: String,
    sub_key: String,
    number: Option<u32>,
    title: Option<String>,
    url: Option<String>,
    text: Option<String>,
    output: &Output,
) -> Result<()> {
    let text = match (number, title, url, text) {
        (None, None, None, Some(text)) => {
            if text.trim().is_empty() {
                bail!("Question text must not be empty");
            }
            text
        }
        (number, Some(title), url, None) => {
            let number = number.unwrap_or(0);
            if number == 0 {
                bail!("Question number must be a positive integer");
            }
            let title = require_title(&title, "Question")?;
            QuestionDetails {
                number,
                title,
                url: url.unwrap_or_default(),
            }
            .encode()
        }
        (None, None, None, None) => {
            bail!("Provide either --text or --number/--title/--url");
        }
        _ => {
            bail!("Question title is required (--title)");
        }
    };

    let topic = resolve_topic(store.sheet(), &topic_key)?;
    let sub = resolve_sub_topic(&topic, &sub_key)?;

    let Some(id) = store.add_question(topic.id, sub.id, &text) else {
        bail!("Sub-topic not found: {}", sub_key);
    };

    output.success(&format!("Created question: {}", id));
    if output.is_quiet() {
        println!("{}", id);
    }
    Ok(())
}

/// List the questions of a sub-topic in order
pub fn list(store: &Store, topic_key: String, sub_key: String, output: &Output) -> Result<()> {
    let topic = resolve_topic(store.sheet(), &topic_key)?;
    let sub = resolve_sub_topic(&topic, &sub_key)?;
    output.print_questions(&sub);
    Ok(())
}

/// Show one question in full
pub fn show(
    store: &Store,
    topic_key: String,
    sub_key: String,
    question_key: String,
    output: &Output,
) -> Result<()> {
    let topic = resolve_topic(store.sheet(), &topic_key)?;
    let sub = resolve_sub_topic(&topic, &sub_key)?;
    let question = resolve_question(&sub, &question_key)?;
    output.print_question(&question);
    Ok(())
}

/// Apply a partial update to a question
///
/// Only the supplied fields change; the rest are preserved.
pub fn edit(
    store: &mut Store,
    topic_key: String,
    sub_key: String,
    question_key: String,
    text: Option<String>,
    notes: Option<String>,
    output: &Output,
) -> Result<()> {
    let patch = QuestionPatch {
        text,
        status: None,
        notes,
    };
    if patch.is_empty() {
        bail!("Nothing to change. Provide --text or --notes.");
    }

    let topic = resolve_topic(store.sheet(), &topic_key)?;
    let sub = resolve_sub_topic(&topic, &sub_key)?;
    let question = resolve_question(&sub, &question_key)?;

    if !store.edit_question(topic.id, sub.id, question.id, patch) {
        bail!("Question not found: {}", question_key);
    }

    output.success("Question updated");
    Ok(())
}

/// Mark a question done or not done
pub fn set_status(
    store: &mut Store,
    topic_key: String,
    sub_key: String,
    question_key: String,
    status: QuestionStatus,
    output: &Output,
) -> Result<()> {
    let topic = resolve_topic(store.sheet(), &topic_key)?;
    let sub = resolve_sub_topic(&topic, &sub_key)?;
    let question = resolve_question(&sub, &question_key)?;

    if !store.edit_question(topic.id, sub.id, question.id, QuestionPatch::status(status)) {
        bail!("Question not found: {}", question_key);
    }

    output.success(&format!(
        "Marked {}: {}",
        status,
        question_label(&question)
    ));
    Ok(())
}

/// Delete a question
pub fn delete(
    store: &mut Store,
    topic_key: String,
    sub_key: String,
    question_key: String,
    output: &Output,
) -> Result<()> {
    let topic = resolve_topic(store.sheet(), &topic_key)?;
    let sub = resolve_sub_topic(&topic, &sub_key)?;
    let question = resolve_question(&sub, &question_key)?;

    if output.should_prompt() {
        println!(
            "Delete question: {} - {}",
            &question.id.to_string()[..8],
            question_label(&question)
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if !store.delete_question(topic.id, sub.id, question.id) {
        bail!("Question not found: {}", question_key);
    }

    output.success("Deleted question");
    Ok(())
}

/// Move a question to a new position within its sub-topic
pub fn r#move(
    store: &mut Store,
    topic_key: String,
    sub_key: String,
    question_key: String,
    position: usize,
    output: &Output,
) -> Result<()> {
    let topic = resolve_topic(store.sheet(), &topic_key)?;
    let sub = resolve_sub_topic(&topic, &sub_key)?;
    let question = resolve_question(&sub, &question_key)?;

    if !store.reorder_questions(topic.id, sub.id, question.order, position) {
        bail!("Could not move question: {}", question_key);
    }

    output.success(&format!("Moved question: {}", question_label(&question)));
    if let Some(sub) = store.sheet().sub_topic(topic.id, sub.id) {
        output.print_questions(&sub);
    }
    Ok(())
}
