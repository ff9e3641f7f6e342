//! Opportunity board command handler

use anyhow::Result;

use prepsheet_core::Config;

use crate::board::load_board;
use crate::output::{Output, OutputFormat};

/// Show the opportunity board
pub fn show(config: &Config, output: &Output) -> Result<()> {
    let feed = load_board(config.board_url.as_deref());

    if feed.from_fallback && config.board_url.is_some() {
        output.warning("Board feed unreachable, showing built-in entries");
    }

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&feed.opportunities)
                    .unwrap_or_else(|_| "[]".to_string())
            );
        }
        OutputFormat::Quiet => {
            for opportunity in &feed.opportunities {
                println!("{}", opportunity.url);
            }
        }
        OutputFormat::Human => {
            println!("Opportunity Board");
            println!();
            for opportunity in &feed.opportunities {
                println!("{} - {}", opportunity.title, opportunity.company);
                println!("  {}", opportunity.url);
                if !opportunity.tags.is_empty() {
                    println!("  [{}]", opportunity.tags.join(", "));
                }
                println!();
            }
            println!("{} opportunity(ies)", feed.opportunities.len());
        }
    }

    Ok(())
}
