//! # muq-cli
//!
//! The `muq` front door: argument parsing, env config loading, chat command parsing.

pub mod cli;

pub use cli::{exit_code, parse_chat_line, parse_tags, ChatLine, Cli, Commands};
