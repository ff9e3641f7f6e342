//! Topic command handlers

use anyhow::{bail, Result};

use prepsheet_core::Store;

use crate::output::Output;
use crate::prompt::confirm;
use crate::resolve::{require_title, resolve_topic};

/// Create a new topic (appended at the end)
pub fn create(store: &mut Store, title: String, output: &Output) -> Result<()> {
    let title = require_title(&title, "Topic")?;
    let id = store.add_topic(&title);

    output.success(&format!("Created topic: {}", id));
    if output.is_quiet() {
        println!("{}", id);
    }
    Ok(())
}

/// List all topics in order
pub fn list(store: &Store, output: &Output) -> Result<()> {
    output.print_topics(&store.sheet().topics());
    Ok(())
}

/// Rename a topic
pub fn edit(store: &mut Store, key: String, title: String, output: &Output) -> Result<()> {
    let title = require_title(&title, "Topic")?;
    let topic = resolve_topic(store.sheet(), &key)?;

    if !store.edit_topic(topic.id, &title) {
        bail!("Topic not found: {}", key);
    }

    output.success(&format!("Renamed topic to: {}", title));
    Ok(())
}

/// Delete a topic with its whole subtree
pub fn delete(store: &mut Store, key: String, output: &Output) -> Result<()> {
    let topic = resolve_topic(store.sheet(), &key)?;
    let questions: usize = topic.sub_topics.iter().map(|s| s.questions.len()).sum();

    if output.should_prompt() {
        println!(
            "Delete topic: {} - {} ({} sub-topic(s), {} question(s))",
            &topic.id.to_string()[..8],
            topic.title,
            topic.sub_topics.len(),
            questions
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    if !store.delete_topic(topic.id) {
        bail!("Topic not found: {}", key);
    }

    output.success(&format!("Deleted topic: {}", topic.title));
    Ok(())
}

/// Move a topic to a new position
pub fn r#move(store: &mut Store, key: String, position: usize, output: &Output) -> Result<()> {
    let topic = resolve_topic(store.sheet(), &key)?;

    if !store.reorder_topics(topic.order, position) {
        bail!("Could not move topic: {}", key);
    }

    output.success(&format!("Moved topic: {}", topic.title));
    output.print_topics(&store.sheet().topics());
    Ok(())
}
