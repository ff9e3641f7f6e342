//! Status command handler

use anyhow::Result;

use prepsheet_core::Store;

use crate::output::{Output, OutputFormat};

/// Show store status: snapshot location, size, and sheet counters
pub fn show(store: &Store, output: &Output) -> Result<()> {
    let sheet = store.sheet();
    let persistence = store.persistence();
    let snapshot_path = store.config().snapshot_path();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "snapshot_path": snapshot_path,
                    "snapshot_exists": persistence.exists(),
                    "snapshot_size": persistence.snapshot_size(),
                    "topics": sheet.topic_count(),
                    "questions": sheet.question_count(),
                    "theme": store.config().theme.to_string(),
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", snapshot_path.display());
        }
        OutputFormat::Human => {
            println!("Status:");
            println!("  snapshot:  {}", snapshot_path.display());
            match persistence.snapshot_size() {
                Some(size) => println!("  size:      {} bytes", size),
                None => println!("  size:      (no snapshot yet)"),
            }
            println!("  topics:    {}", sheet.topic_count());
            println!("  questions: {}", sheet.question_count());
            println!("  theme:     {}", store.config().theme);
        }
    }

    Ok(())
}
