//! Opportunity board feed
//!
//! Best-effort fetch of a JSON list of opportunities (jobs, contests,
//! hiring drives) from a configured URL. Completely independent of the
//! sheet store; on any failure the built-in fallback entries are shown
//! instead so the board always renders something.

use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Fetch timeout in seconds
const FETCH_TIMEOUT: u64 = 10;

/// One entry on the opportunity board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Opportunity {
    /// Role or event name
    pub title: String,
    /// Organization offering it
    pub company: String,
    /// Link to apply or read more
    pub url: String,
    /// Free-form labels (remote, internship, ...)
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Result of loading the board
#[derive(Debug, Clone)]
pub struct BoardFeed {
    pub opportunities: Vec<Opportunity>,
    /// True when the fallback data is shown instead of the remote feed
    pub from_fallback: bool,
}

/// Load the board from the configured URL, falling back to built-in data
///
/// Returns the fallback set when no URL is configured, the request fails,
/// or the response is not a JSON list of opportunities.
pub fn load_board(url: Option<&str>) -> BoardFeed {
    match url {
        Some(url) => match fetch_remote(url) {
            Ok(opportunities) => BoardFeed {
                opportunities,
                from_fallback: false,
            },
            Err(err) => {
                debug!(url, error = %err, "board feed fetch failed, using fallback");
                BoardFeed {
                    opportunities: fallback_opportunities(),
                    from_fallback: true,
                }
            }
        },
        None => BoardFeed {
            opportunities: fallback_opportunities(),
            from_fallback: true,
        },
    }
}

/// Inner fetch that can fail
fn fetch_remote(url: &str) -> Result<Vec<Opportunity>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(FETCH_TIMEOUT))
        .user_agent("Mozilla/5.0 (compatible; PrepSheet/1.0)")
        .build()?;

    let response = client.get(url).send()?.error_for_status()?;
    let opportunities = response.json()?;
    Ok(opportunities)
}

/// Built-in board entries shown when the feed is unreachable
pub fn fallback_opportunities() -> Vec<Opportunity> {
    vec![
        Opportunity {
            title: "Software Engineer Intern".to_string(),
            company: "Acme Systems".to_string(),
            url: "https://careers.example.com/acme/swe-intern".to_string(),
            tags: vec!["internship".to_string(), "remote".to_string()],
        },
        Opportunity {
            title: "Backend Developer (Junior)".to_string(),
            company: "Northwind Labs".to_string(),
            url: "https://careers.example.com/northwind/backend-junior".to_string(),
            tags: vec!["full-time".to_string()],
        },
        Opportunity {
            title: "Monthly Coding Contest".to_string(),
            company: "CodeArena".to_string(),
            url: "https://contests.example.com/codearena/monthly".to_string(),
            tags: vec!["contest".to_string()],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_url_uses_fallback() {
        let feed = load_board(None);
        assert!(feed.from_fallback);
        assert!(!feed.opportunities.is_empty());
    }

    #[test]
    fn test_bad_url_uses_fallback() {
        let feed = load_board(Some("not a url"));
        assert!(feed.from_fallback);
        assert_eq!(feed.opportunities, fallback_opportunities());
    }

    #[test]
    fn test_opportunity_deserializes_without_tags() {
        let json = r#"[{"title":"Role","company":"Org","url":"https://example.com"}]"#;
        let parsed: Vec<Opportunity> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 1);
        assert!(parsed[0].tags.is_empty());
    }
}
