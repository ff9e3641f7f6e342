//! Sub-topic command handlers

use anyhow::{bail, Result};

use prepsheet_core::Store;

use crate::output::Output;
use crate::prompt::confirm;
use crate::resolve::{require_title, resolve_sub_topic, resolve_topic};

/// Create a new sub-topic under a topic (appended at the end)
pub fn create(store: &mut Store, topic_key: String, title: String, output: &Output) -> Result<()> {
    let title = require_title(&title, "Sub-topic")?;
    let topic = resolve_topic(store.sheet(), &topic_key)?;

    let Some(id) = store.add_sub_topic(topic.id, &title) else {
        bail!("Topic not found: {}", topic_key);
    };

    output.success(&format!("Created sub-topic: {}", id));
    if output.is_quiet() {
        println!("{}", id);
    }
    Ok(())
}

/// List the sub-topics of a topic in order
pub fn list(store: &Store, topic_key: String, output: &Output) -> Result<()> {
    let topic = resolve_topic(store.sheet(), &topic_key)?;
    output.print_sub_topics(&topic);
    Ok(())
}

/// Rename a sub-topic
pub fn edit(
    store: &mut Store,
    topic_key: String,
    sub_key: String,
    title: String,
    output: &Output,
) -> Result<()> {
    let title = require_title(&title, "Sub-topic")?;
    let topic = resolve_topic(store.sheet(), &topic_key)?;
    let sub = resolve_sub_topic(&topic, &sub_key)?;

    if !store.edit_sub_topic(topic.id, sub.id, &title) {
        bail!("Sub-topic not found: {}", sub_key);
    }

    output.success(&format!("Renamed sub-topic to: {}", title));
    Ok(())
}

/// Delete a sub-topic with its questions
pub fn delete(
    store: &mut Store,
    topic_key: String,
    sub_key: String,
    output: &Output,
) -> Result<()> {
    let topic = resolve_topic(store.sheet(), &topic_key)?;
    let sub = resolve_sub_topic(&topic, &sub_key)?;

    if output.should_prompt() {
        println!(
            "Delete sub-topic: {} - {} ({} question(s))",
            &sub.id.to_string()[..8],
            sub.title,
            sub.questions.len()
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if !store.delete_sub_topic(topic.id, sub.id) {
        bail!("Sub-topic not found: {}", sub_key);
    }

    output.success(&format!("Deleted sub-topic: {}", sub.title));
    Ok(())
}

/// Move a sub-topic to a new position within its topic
pub fn r#move(
    store: &mut Store,
    topic_key: String,
    sub_key: String,
    position: usize,
    output: &Output,
) -> Result<()> {
    let topic = resolve_topic(store.sheet(), &topic_key)?;
    let sub = resolve_sub_topic(&topic, &sub_key)?;

    if !store.reorder_sub_topics(topic.id, sub.order, position) {
        bail!("Could not move sub-topic: {}", sub_key);
    }

    output.success(&format!("Moved sub-topic: {}", sub.title));
    if let Some(topic) = store.sheet().topic(topic.id) {
        output.print_sub_topics(&topic);
    }
    Ok(())
}
