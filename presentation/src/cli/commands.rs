//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Output format for study results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable, colored output
    #[default]
    Text,
    /// JSON output
    Json,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Ask the tutor a question
    Chat {
        /// Message to send (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Summarize a topic for revision
    Summarize {
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,
    },
    /// Generate a 10-question multiple-choice quiz
    Quiz {
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,
    },
    /// Generate a deck of 5 flashcards
    Flashcards {
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,
    },
    /// Generate a concept map and render it to an SVG file
    Map {
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,

        /// Output file (defaults to `output.map_file` from the configuration)
        #[arg(short = 'f', long, value_name = "PATH")]
        out: Option<PathBuf>,
    },
    /// List the ranked Gemini models the primary tier would try
    Models,
}

impl Command {
    /// The free-text argument of the command, words joined by spaces
    pub fn text(&self) -> Option<String> {
        match self {
            Command::Chat { message } => Some(message.join(" ")),
            Command::Summarize { topic }
            | Command::Quiz { topic }
            | Command::Flashcards { topic }
            | Command::Map { topic, .. } => Some(topic.join(" ")),
            Command::Models => None,
        }
    }
}

/// CLI arguments for study-buddy
#[derive(Parser, Debug)]
#[command(name = "study-buddy")]
#[command(author, version, about = "AI study assistant - chat, summaries, quizzes, flashcards and concept maps")]
#[command(long_about = r#"
study-buddy asks a cascade of AI providers for study material.

Providers are tried in order:
1. Gemini         (needs GEMINI_API_KEY; models ranked by preference)
2. Hugging Face   (needs HUGGINGFACE_API_KEY)
3. Pollinations   (no credential)

When every provider fails, a canned fallback is returned so that
the output is always usable.

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. ./studybuddy.toml        Project-level config
3. ~/.config/study-buddy/config.toml   Global config

Example:
  study-buddy chat "Why is the sky blue?"
  study-buddy quiz Photosynthesis
  study-buddy map "Human Brain" --out brain.svg
  study-buddy --output json flashcards "Cell Biology"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("study-buddy").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_multi_word_topic_is_joined() {
        let cli = parse(&["quiz", "Human", "Brain"]);
        assert_eq!(cli.command.unwrap().text().as_deref(), Some("Human Brain"));
    }

    #[test]
    fn test_map_out_and_global_flags() {
        let cli = parse(&["map", "Cells", "--out", "cells.svg", "-vv", "--output", "json"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.output, OutputFormat::Json);
        match cli.command {
            Some(Command::Map { topic, out }) => {
                assert_eq!(topic, vec!["Cells"]);
                assert_eq!(out, Some(PathBuf::from("cells.svg")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&["models"]);
        assert_eq!(cli.command, Some(Command::Models));
        assert_eq!(cli.output, OutputFormat::Text);
        assert!(!cli.quiet);
        assert!(Command::Models.text().is_none());
    }

    #[test]
    fn test_show_config_needs_no_command() {
        let cli = parse(&["--show-config"]);
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_topic_is_required() {
        assert!(Cli::try_parse_from(["study-buddy", "summarize"]).is_err());
    }
}
