//! Reset command handler

use anyhow::Result;

use prepsheet_core::Store;

use crate::output::Output;
use crate::prompt::confirm;

/// Clear the whole sheet and delete its snapshot file
pub fn reset(store: &mut Store, output: &Output) -> Result<()> {
    if !store.sheet().is_empty() && output.should_prompt() {
        println!(
            "This deletes the whole sheet ({} topic(s), {} question(s)).",
            store.sheet().topic_count(),
            store.sheet().question_count()
        );
        if !confirm("Continue?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.reset()?;

    output.success("Sheet reset");
    Ok(())
}
