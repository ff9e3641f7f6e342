//! Progress command handler

use anyhow::Result;

use prepsheet_core::Store;

use crate::output::Output;

/// Show completion counters: overall and per topic
pub fn show(store: &Store, output: &Output) -> Result<()> {
    output.print_progress(&store.sheet().progress());
    Ok(())
}
