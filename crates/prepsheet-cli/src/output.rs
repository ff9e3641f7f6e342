//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use prepsheet_core::{Progress, Question, QuestionDetails, QuestionStatus, SubTopic, Topic};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is in JSON mode
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print the topic list (one line per topic)
    pub fn print_topics(&self, topics: &[Topic]) {
        match self.format {
            OutputFormat::Human => {
                if topics.is_empty() {
                    println!("No topics yet. Add one with: prepsheet topic add <title>");
                    return;
                }
                for topic in topics {
                    let questions: usize =
                        topic.sub_topics.iter().map(|s| s.questions.len()).sum();
                    println!(
                        "{} | {:>2}. {} | {} sub-topic(s), {} question(s)",
                        short_id(&topic.id),
                        topic.order,
                        truncate(&topic.title, 35),
                        topic.sub_topics.len(),
                        questions
                    );
                }
                println!("\n{} topic(s)", topics.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(topics).unwrap());
            }
            OutputFormat::Quiet => {
                for topic in topics {
                    println!("{}", topic.id);
                }
            }
        }
    }

    /// Print the sub-topics of one topic
    pub fn print_sub_topics(&self, topic: &Topic) {
        match self.format {
            OutputFormat::Human => {
                println!("Sub-topics of: {} - {}", short_id(&topic.id), topic.title);
                println!();
                if topic.sub_topics.is_empty() {
                    println!("No sub-topics.");
                    return;
                }
                for sub in &topic.sub_topics {
                    let done = sub
                        .questions
                        .iter()
                        .filter(|q| q.status == QuestionStatus::Done)
                        .count();
                    println!(
                        "{} | {:>2}. {} | {}/{} done",
                        short_id(&sub.id),
                        sub.order,
                        truncate(&sub.title, 35),
                        done,
                        sub.questions.len()
                    );
                }
                println!("\n{} sub-topic(s)", topic.sub_topics.len());
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&topic.sub_topics).unwrap()
                );
            }
            OutputFormat::Quiet => {
                for sub in &topic.sub_topics {
                    println!("{}", sub.id);
                }
            }
        }
    }

    /// Print the questions of one sub-topic
    pub fn print_questions(&self, sub: &SubTopic) {
        match self.format {
            OutputFormat::Human => {
                println!("Questions in: {} - {}", short_id(&sub.id), sub.title);
                println!();
                if sub.questions.is_empty() {
                    println!("No questions.");
                    return;
                }
                for question in &sub.questions {
                    println!(
                        "{} | {:>2}. [{}] {}",
                        short_id(&question.id),
                        question.order,
                        status_mark(question.status),
                        question_label(question)
                    );
                    if !question.notes.is_empty() {
                        println!("           notes: {}", truncate_line(&question.notes, 60));
                    }
                }
                println!("\n{} question(s)", sub.questions.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&sub.questions).unwrap());
            }
            OutputFormat::Quiet => {
                for question in &sub.questions {
                    println!("{}", question.id);
                }
            }
        }
    }

    /// Print one question in full
    pub fn print_question(&self, question: &Question) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:     {}", question.id);
                println!("Status: {}", question.status);
                match QuestionDetails::parse(&question.text) {
                    Some(details) => {
                        println!("Number: {}", details.number);
                        println!("Title:  {}", details.title);
                        println!("URL:    {}", details.url);
                    }
                    None => println!("Text:   {}", question.text),
                }
                if !question.notes.is_empty() {
                    println!("Notes:  {}", question.notes);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(question).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", question.id);
            }
        }
    }

    /// Print the whole tree
    pub fn print_tree(&self, topics: &[Topic]) {
        match self.format {
            OutputFormat::Human => {
                if topics.is_empty() {
                    println!("The sheet is empty.");
                    return;
                }
                for topic in topics {
                    println!("{} {}", short_id(&topic.id), topic.title);
                    for sub in &topic.sub_topics {
                        println!("  {} {}", short_id(&sub.id), sub.title);
                        for question in &sub.questions {
                            println!(
                                "    {} [{}] {}",
                                short_id(&question.id),
                                status_mark(question.status),
                                question_label(question)
                            );
                        }
                    }
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(topics).unwrap());
            }
            OutputFormat::Quiet => {
                for topic in topics {
                    println!("{}", topic.id);
                }
            }
        }
    }

    /// Print the progress panel
    pub fn print_progress(&self, progress: &Progress) {
        match self.format {
            OutputFormat::Json => {
                let topics: Vec<_> = progress
                    .topics
                    .iter()
                    .map(|t| {
                        serde_json::json!({
                            "id": t.id,
                            "title": t.title,
                            "done": t.done,
                            "total": t.total
                        })
                    })
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "done": progress.done,
                        "total": progress.total,
                        "topics": topics
                    }))
                    .unwrap()
                );
            }
            OutputFormat::Quiet => {
                println!("{}/{}", progress.done, progress.total);
            }
            OutputFormat::Human => {
                println!("Your Progress");
                println!();
                println!(
                    "Completed  {} / {}   {}",
                    progress.done,
                    progress.total,
                    progress_bar(progress.done, progress.total)
                );
                println!();
                for topic in &progress.topics {
                    println!(
                        "  {:<30} {:>3} / {}",
                        truncate(&topic.title, 30),
                        topic.done,
                        topic.total
                    );
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a non-blocking warning to stderr
    pub fn warning(&self, message: &str) {
        if !self.is_quiet() {
            eprintln!("⚠ {}", message);
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }
}

/// Human label for one question: the decoded payload when present,
/// the raw text otherwise
pub fn question_label(question: &Question) -> String {
    match QuestionDetails::parse(&question.text) {
        Some(details) => format!("#{} {}", details.number, details.title),
        None => truncate_line(&question.text, 50),
    }
}

fn status_mark(status: QuestionStatus) -> char {
    match status {
        QuestionStatus::Done => 'x',
        QuestionStatus::Todo => ' ',
    }
}

fn short_id(id: &uuid::Uuid) -> String {
    id.to_string()[..8].to_string()
}

/// Fixed-width text progress bar
fn progress_bar(done: usize, total: usize) -> String {
    const WIDTH: usize = 20;
    let filled = if total == 0 {
        0
    } else {
        (done * WIDTH) / total
    };
    format!("[{}{}]", "#".repeat(filled), "-".repeat(WIDTH - filled))
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Truncate to first line and max length
fn truncate_line(s: &str, max_len: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    truncate(first_line, max_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
    }

    #[test]
    fn test_truncate_line() {
        assert_eq!(truncate_line("single line", 20), "single line");
        assert_eq!(truncate_line("line one\nline two", 20), "line one");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 0), "[--------------------]");
        assert_eq!(progress_bar(2, 4), "[##########----------]");
        assert_eq!(progress_bar(4, 4), "[####################]");
    }

    #[test]
    fn test_question_label_prefers_payload() {
        let mut question = Question {
            id: uuid::Uuid::new_v4(),
            text: r#"{"number":1,"title":"Two Sum","url":"https://example.com/two-sum/"}"#
                .to_string(),
            order: 0,
            status: QuestionStatus::Todo,
            notes: String::new(),
        };
        assert_eq!(question_label(&question), "#1 Two Sum");

        question.text = "free-form".to_string();
        assert_eq!(question_label(&question), "free-form");
    }
}
