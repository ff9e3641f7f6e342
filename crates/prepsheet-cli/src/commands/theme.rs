//! Theme command handlers
//!
//! The theme is a display preference stored in the config file, not in the
//! sheet snapshot. `toggle` flips light/dark and saves.

use anyhow::{Context, Result};

use prepsheet_core::Config;

use crate::output::Output;

/// Show the current theme
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    if output.is_json() {
        println!("{}", serde_json::json!({"theme": config.theme.to_string()}));
    } else {
        println!("{}", config.theme);
    }
    Ok(())
}

/// Switch between light and dark
pub fn toggle(output: &Output) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;
    config.theme = config.theme.toggled();
    config.save().context("Failed to save configuration")?;

    output.success(&format!("Theme set to: {}", config.theme));
    if output.is_quiet() {
        println!("{}", config.theme);
    }
    Ok(())
}
