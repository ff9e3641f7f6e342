//! PrepSheet CLI
//!
//! Command-line interface for PrepSheet - personal study-sheet tracking.

use anyhow::Result;
use clap::{Parser, Subcommand};

use prepsheet_core::{QuestionStatus, Store};

mod board;
mod commands;
mod output;
mod prompt;
mod resolve;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "prepsheet")]
#[command(about = "PrepSheet - Personal study-sheet tracking")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage topics
    Topic {
        #[command(subcommand)]
        command: TopicCommands,
    },
    /// Manage sub-topics
    Sub {
        #[command(subcommand)]
        command: SubCommands,
    },
    /// Manage questions
    Question {
        #[command(subcommand)]
        command: QuestionCommands,
    },
    /// Show the whole sheet as a tree
    Show,
    /// Show completion progress
    Progress,
    /// Show the opportunity board
    Board,
    /// Replace the sheet from an exported JSON file
    Import {
        /// Path to the export file
        file: std::path::PathBuf,
    },
    /// Export the sheet as JSON
    Export {
        /// Destination file (stdout if omitted)
        file: Option<std::path::PathBuf>,
    },
    /// Delete the whole sheet and its snapshot file
    Reset,
    /// Show or toggle the color theme
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show status (snapshot location, counters)
    Status,
}

#[derive(Subcommand)]
enum TopicCommands {
    /// Create a new topic
    #[command(alias = "add")]
    Create {
        /// Topic title
        title: String,
    },
    /// List all topics
    #[command(alias = "ls")]
    List,
    /// Rename a topic
    Edit {
        /// Topic (title, full UUID, or prefix)
        topic: String,
        /// New title
        title: String,
    },
    /// Delete a topic and everything under it
    #[command(alias = "rm")]
    Delete {
        /// Topic (title, full UUID, or prefix)
        topic: String,
    },
    /// Move a topic to a new position (0-based)
    #[command(alias = "mv")]
    Move {
        /// Topic (title, full UUID, or prefix)
        topic: String,
        /// Target position
        position: usize,
    },
}

#[derive(Subcommand)]
enum SubCommands {
    /// Create a new sub-topic under a topic
    #[command(alias = "add")]
    Create {
        /// Parent topic (title, full UUID, or prefix)
        topic: String,
        /// Sub-topic title
        title: String,
    },
    /// List the sub-topics of a topic
    #[command(alias = "ls")]
    List {
        /// Parent topic (title, full UUID, or prefix)
        topic: String,
    },
    /// Rename a sub-topic
    Edit {
        /// Parent topic (title, full UUID, or prefix)
        topic: String,
        /// Sub-topic (title, full UUID, or prefix)
        sub: String,
        /// New title
        title: String,
    },
    /// Delete a sub-topic and its questions
    #[command(alias = "rm")]
    Delete {
        /// Parent topic (title, full UUID, or prefix)
        topic: String,
        /// Sub-topic (title, full UUID, or prefix)
        sub: String,
    },
    /// Move a sub-topic to a new position within its topic (0-based)
    #[command(alias = "mv")]
    Move {
        /// Parent topic (title, full UUID, or prefix)
        topic: String,
        /// Sub-topic (title, full UUID, or prefix)
        sub: String,
        /// Target position
        position: usize,
    },
}

#[derive(Subcommand)]
enum QuestionCommands {
    /// Add a question to a sub-topic
    #[command(alias = "add")]
    Create {
        /// Parent topic (title, full UUID, or prefix)
        topic: String,
        /// Parent sub-topic (title, full UUID, or prefix)
        sub: String,
        /// Question number
        #[arg(short, long)]
        number: Option<u32>,
        /// Question title
        #[arg(short = 'T', long)]
        title: Option<String>,
        /// Question URL
        #[arg(short, long)]
        url: Option<String>,
        /// Raw question text (instead of number/title/url)
        #[arg(long, conflicts_with_all = ["number", "title", "url"])]
        text: Option<String>,
    },
    /// List the questions of a sub-topic
    #[command(alias = "ls")]
    List {
        /// Parent topic (title, full UUID, or prefix)
        topic: String,
        /// Parent sub-topic (title, full UUID, or prefix)
        sub: String,
    },
    /// Show question details
    Show {
        /// Parent topic (title, full UUID, or prefix)
        topic: String,
        /// Parent sub-topic (title, full UUID, or prefix)
        sub: String,
        /// Question ID (full UUID or prefix)
        question: String,
    },
    /// Edit question text or notes
    Edit {
        /// Parent topic (title, full UUID, or prefix)
        topic: String,
        /// Parent sub-topic (title, full UUID, or prefix)
        sub: String,
        /// Question ID (full UUID or prefix)
        question: String,
        /// New question text
        #[arg(long)]
        text: Option<String>,
        /// New notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// Mark a question done
    Done {
        /// Parent topic (title, full UUID, or prefix)
        topic: String,
        /// Parent sub-topic (title, full UUID, or prefix)
        sub: String,
        /// Question ID (full UUID or prefix)
        question: String,
    },
    /// Mark a question not done
    Todo {
        /// Parent topic (title, full UUID, or prefix)
        topic: String,
        /// Parent sub-topic (title, full UUID, or prefix)
        sub: String,
        /// Question ID (full UUID or prefix)
        question: String,
    },
    /// Delete a question
    #[command(alias = "rm")]
    Delete {
        /// Parent topic (title, full UUID, or prefix)
        topic: String,
        /// Parent sub-topic (title, full UUID, or prefix)
        sub: String,
        /// Question ID (full UUID or prefix)
        question: String,
    },
    /// Move a question to a new position within its sub-topic (0-based)
    #[command(alias = "mv")]
    Move {
        /// Parent topic (title, full UUID, or prefix)
        topic: String,
        /// Parent sub-topic (title, full UUID, or prefix)
        sub: String,
        /// Question ID (full UUID or prefix)
        question: String,
        /// Target position
        position: usize,
    },
}

#[derive(Subcommand, Clone)]
enum ThemeCommands {
    /// Show the current theme
    Show,
    /// Switch between light and dark
    Toggle,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, theme, board_url)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Commands that don't need the store
    match &cli.command {
        Commands::Config { command } => {
            return handle_config_command(command.clone(), &output);
        }
        Commands::Theme { command } => {
            return handle_theme_command(command.clone(), &output);
        }
        _ => {}
    }

    let mut store = Store::open()?;

    let result = match cli.command {
        Commands::Topic { command } => handle_topic_command(command, &mut store, &output),
        Commands::Sub { command } => handle_sub_command(command, &mut store, &output),
        Commands::Question { command } => handle_question_command(command, &mut store, &output),
        Commands::Show => {
            output.print_tree(&store.sheet().topics());
            Ok(())
        }
        Commands::Progress => commands::progress::show(&store, &output),
        Commands::Board => commands::board::show(store.config(), &output),
        Commands::Import { file } => commands::transfer::import(&mut store, file, &output),
        Commands::Export { file } => commands::transfer::export(&store, file, &output),
        Commands::Reset => commands::reset::reset(&mut store, &output),
        Commands::Theme { .. } => unreachable!(),  // Handled above
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Status => commands::status::show(&store, &output),
    };

    // Mutations never fail on a bad disk; surface the condition instead
    if store.is_degraded() {
        output.warning("Changes could not be saved to disk and are held in memory only");
    }

    result
}

fn handle_topic_command(command: TopicCommands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        TopicCommands::Create { title } => commands::topic::create(store, title, output),
        TopicCommands::List => commands::topic::list(store, output),
        TopicCommands::Edit { topic, title } => commands::topic::edit(store, topic, title, output),
        TopicCommands::Delete { topic } => commands::topic::delete(store, topic, output),
        TopicCommands::Move { topic, position } => {
            commands::topic::r#move(store, topic, position, output)
        }
    }
}

fn handle_sub_command(command: SubCommands, store: &mut Store, output: &Output) -> Result<()> {
    match command {
        SubCommands::Create { topic, title } => {
            commands::subtopic::create(store, topic, title, output)
        }
        SubCommands::List { topic } => commands::subtopic::list(store, topic, output),
        SubCommands::Edit { topic, sub, title } => {
            commands::subtopic::edit(store, topic, sub, title, output)
        }
        SubCommands::Delete { topic, sub } => commands::subtopic::delete(store, topic, sub, output),
        SubCommands::Move {
            topic,
            sub,
            position,
        } => commands::subtopic::r#move(store, topic, sub, position, output),
    }
}

fn handle_question_command(
    command: QuestionCommands,
    store: &mut Store,
    output: &Output,
) -> Result<()> {
    match command {
        QuestionCommands::Create {
            topic,
            sub,
            number,
            title,
            url,
            text,
        } => commands::question::create(store, topic, sub, number, title, url, text, output),
        QuestionCommands::List { topic, sub } => {
            commands::question::list(store, topic, sub, output)
        }
        QuestionCommands::Show {
            topic,
            sub,
            question,
        } => commands::question::show(store, topic, sub, question, output),
        QuestionCommands::Edit {
            topic,
            sub,
            question,
            text,
            notes,
        } => commands::question::edit(store, topic, sub, question, text, notes, output),
        QuestionCommands::Done {
            topic,
            sub,
            question,
        } => commands::question::set_status(
            store,
            topic,
            sub,
            question,
            QuestionStatus::Done,
            output,
        ),
        QuestionCommands::Todo {
            topic,
            sub,
            question,
        } => commands::question::set_status(
            store,
            topic,
            sub,
            question,
            QuestionStatus::Todo,
            output,
        ),
        QuestionCommands::Delete {
            topic,
            sub,
            question,
        } => commands::question::delete(store, topic, sub, question, output),
        QuestionCommands::Move {
            topic,
            sub,
            question,
            position,
        } => commands::question::r#move(store, topic, sub, question, position, output),
    }
}

fn handle_theme_command(command: Option<ThemeCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ThemeCommands::Show) | None => commands::theme::show(output),
        Some(ThemeCommands::Toggle) => commands::theme::toggle(output),
    }
}

fn handle_config_command(command: Option<ConfigCommands>, output: &Output) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(output),
        Some(ConfigCommands::Set { key, value }) => commands::config::set(key, value, output),
    }
}
