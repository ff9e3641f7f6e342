//! Import and export command handlers
//!
//! Export writes the current tree as snapshot-format JSON; import replaces
//! the whole tree from such a file. The file format is identical to the
//! persisted snapshot, so exports from one machine import on another.

use std::path::PathBuf;

use anyhow::{Context, Result};

use prepsheet_core::{Snapshot, Store};

use crate::output::Output;
use crate::prompt::confirm;

/// Export the sheet as JSON, to a file or stdout
pub fn export(store: &Store, file: Option<PathBuf>, output: &Output) -> Result<()> {
    let snapshot = Snapshot {
        topics: store.sheet().topics(),
    };
    let json =
        serde_json::to_string_pretty(&snapshot).context("Failed to serialize sheet")?;

    match file {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write export file: {:?}", path))?;
            output.success(&format!("Exported sheet to: {}", path.display()));
        }
        None => {
            println!("{}", json);
        }
    }

    Ok(())
}

/// Replace the whole sheet from an exported JSON file
pub fn import(store: &mut Store, file: PathBuf, output: &Output) -> Result<()> {
    let content = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read import file: {:?}", file))?;
    let snapshot: Snapshot = serde_json::from_str(&content)
        .with_context(|| format!("Import file is not a valid sheet export: {:?}", file))?;

    if !store.sheet().is_empty() && output.should_prompt() {
        println!(
            "This replaces the current sheet ({} topic(s), {} question(s)).",
            store.sheet().topic_count(),
            store.sheet().question_count()
        );
        if !confirm("Continue?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let topics = snapshot.topics.len();
    store.set_topics(snapshot.topics);

    output.success(&format!("Imported {} topic(s)", topics));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use prepsheet_core::Config;
    use tempfile::TempDir;

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    fn store_in(temp_dir: &TempDir) -> Store {
        let config = Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        };
        Store::open_with_config(config).unwrap()
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let source_dir = TempDir::new().unwrap();
        let mut source = store_in(&source_dir);
        let topic = source.add_topic("Arrays");
        let sub = source.add_sub_topic(topic, "Easy").unwrap();
        source.add_question(topic, sub, "two sum").unwrap();

        let file = source_dir.path().join("sheet-export.json");
        export(&source, Some(file.clone()), &quiet()).unwrap();

        let dest_dir = TempDir::new().unwrap();
        let mut dest = store_in(&dest_dir);
        import(&mut dest, file, &quiet()).unwrap();

        assert_eq!(dest.sheet().topics(), source.sheet().topics());
    }

    #[test]
    fn test_import_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("bad.json");
        std::fs::write(&file, "not a sheet").unwrap();

        let mut store = store_in(&temp_dir);
        assert!(import(&mut store, file, &quiet()).is_err());
        assert!(store.sheet().is_empty());
    }
}
