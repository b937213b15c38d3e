//! CLI parser and input helpers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use muq_core::{CuratorError, TagSet};

#[derive(Parser)]
#[command(name = "muq")]
#[command(about = "Book curator: turn, recommend, chat, feed, embed-lexicon", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one conversational turn and print the turn response JSON.
    Turn {
        #[arg(short, long)]
        input: String,
        /// Accumulated tags as JSON: {"emotions": [...], "concepts": [...]}
        #[arg(short, long)]
        tags: Option<String>,
    },
    /// Recommend books for an accumulated tag set and print the response JSON.
    Recommend {
        #[arg(short, long)]
        tags: String,
    },
    /// Interactive conversation on stdin (/recommend, /reset, /quit).
    Chat,
    /// Print one page of past recommendations.
    Feed {
        #[arg(short, long)]
        page: Option<usize>,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Embed every lexicon entry and write the embeddings files.
    EmbedLexicon {
        #[arg(long, default_value = "3")]
        attempts: usize,
        #[arg(long, default_value = "1000")]
        delay_ms: u64,
    },
}

/// Parses a `{"emotions": [...], "concepts": [...]}` argument. Missing lists default to empty.
pub fn parse_tags(json: &str) -> Result<TagSet> {
    serde_json::from_str(json)
        .map_err(|e| CuratorError::InvalidInput(format!("tags must be JSON {{emotions, concepts}}: {}", e)))
        .context("parse --tags")
}

/// One line typed into `muq chat`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatLine {
    Utterance(String),
    Recommend,
    Reset,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_chat_line(line: &str) -> ChatLine {
    let line = line.trim();
    match line {
        "" => ChatLine::Empty,
        "/recommend" => ChatLine::Recommend,
        "/reset" => ChatLine::Reset,
        "/quit" | "/exit" => ChatLine::Quit,
        cmd if cmd.starts_with('/') => ChatLine::Unknown(cmd.to_string()),
        text => ChatLine::Utterance(text.to_string()),
    }
}

/// 2 for caller mistakes, 1 for everything else.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<CuratorError>() {
        Some(e) if e.is_client_error() => 2,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_lines_are_classified() {
        assert_eq!(parse_chat_line("  /recommend "), ChatLine::Recommend);
        assert_eq!(parse_chat_line("/reset"), ChatLine::Reset);
        assert_eq!(parse_chat_line("/quit"), ChatLine::Quit);
        assert_eq!(parse_chat_line("   "), ChatLine::Empty);
        assert_eq!(parse_chat_line("/help"), ChatLine::Unknown("/help".to_string()));
        assert_eq!(
            parse_chat_line("요즘 너무 외로워요"),
            ChatLine::Utterance("요즘 너무 외로워요".to_string())
        );
    }

    #[test]
    fn tags_argument_parses_with_defaults() {
        let tags = parse_tags(r#"{"emotions": ["외로움"]}"#).unwrap();
        assert_eq!(tags.emotions, vec!["외로움".to_string()]);
        assert!(tags.concepts.is_empty());
    }

    #[test]
    fn bad_tags_argument_is_a_client_error() {
        let err = parse_tags("외로움").unwrap_err();
        assert_eq!(exit_code(&err), 2);
        assert_eq!(exit_code(&anyhow::anyhow!("boom")), 1);
        assert_eq!(
            exit_code(&anyhow::Error::new(CuratorError::InsufficientTags {
                emotions: 0,
                concepts: 1
            })),
            2
        );
    }
}
