//! muq CLI: one turn, a recommendation, an interactive chat, the feed, or the offline lexicon
//! embedding job. Config from env (.env loaded first).

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use curator::{CancellationToken, Curator, CuratorConfig};
use embedding::{EmbeddingService, EnvEmbeddingConfig};
use lexicon::{precompute_category, write_embeddings, LexiconPaths, LexiconStore, RetryPolicy};
use llm_client::{EnvLlmConfig, LlmClient, OpenAILlmClient};
use muq_core::{init_tracing, Category, TagSet, TurnRequest};
use muq_cli::{exit_code, parse_chat_line, parse_tags, ChatLine, Cli, Commands};
use openai_client::mask_token;
use openai_embedding::OpenAIEmbedding;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {:#}", e);
            ExitCode::from(exit_code(&e))
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = CuratorConfig::from_env()?;
    config.validate().context("invalid curator config")?;
    init_tracing(&config.log_file)?;

    let cancel = CancellationToken::new();
    spawn_ctrl_c(cancel.clone());

    match cli.command {
        Commands::Turn { input, tags } => {
            let tags = tags.as_deref().map(parse_tags).transpose()?;
            let curator = build_curator(&config).await?;
            let response = curator.turn(TurnRequest::new(input, tags), &cancel).await?;
            print_json(&response)
        }
        Commands::Recommend { tags } => {
            let tags = parse_tags(&tags)?;
            let curator = build_curator(&config).await?;
            let response = curator.recommend(tags, &cancel).await?;
            print_json(&response)
        }
        Commands::Chat => {
            let curator = build_curator(&config).await?;
            handle_chat(&curator, &cancel).await
        }
        Commands::Feed { page, limit } => {
            let curator = build_curator(&config).await?;
            let feed = curator.feed(page, limit).await;
            print_json(&feed)
        }
        Commands::EmbedLexicon { attempts, delay_ms } => {
            let policy = RetryPolicy {
                attempts,
                delay: Duration::from_millis(delay_ms),
            };
            handle_embed_lexicon(&config, policy).await
        }
    }
}

/// First Ctrl-C cancels the in-flight request.
fn spawn_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl-C received, cancelling");
            cancel.cancel();
        }
    });
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn embedding_service() -> Result<Arc<dyn EmbeddingService>> {
    let config = EnvEmbeddingConfig::from_env()?;
    config
        .validate()
        .context("Load embedding config from .env (OPENAI_API_KEY, EMBEDDING_MODEL)")?;
    info!(
        model = %config.embedding_model,
        api_key = %mask_token(&config.openai_api_key),
        "embedding service configured"
    );
    Ok(Arc::new(OpenAIEmbedding::from_config(&config)))
}

fn llm_client() -> Result<Arc<dyn LlmClient>> {
    let config = EnvLlmConfig::from_env()?;
    config
        .validate()
        .context("Load chat config from .env (OPENAI_API_KEY, CHAT_MODEL)")?;
    info!(
        model = %config.chat_model,
        api_key = %mask_token(&config.openai_api_key),
        "chat model configured"
    );
    Ok(Arc::new(OpenAILlmClient::from_config(&config)))
}

async fn build_curator(config: &CuratorConfig) -> Result<Curator> {
    let curator = curator::build(config, embedding_service()?, llm_client()?).await?;
    Ok(curator)
}

/// Interactive loop. Tags live here, between turns, exactly as a UI would keep them.
async fn handle_chat(curator: &Curator, cancel: &CancellationToken) -> Result<()> {
    let mut tags = TagSet::default();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("말 없는 책방 묵입니다. 오늘은 어떤 하루였나요? (/recommend, /reset, /quit)");
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = lines.next_line() => line?,
        };
        let Some(line) = line else { break };

        match parse_chat_line(&line) {
            ChatLine::Empty => continue,
            ChatLine::Quit => break,
            ChatLine::Reset => {
                tags = TagSet::default();
                println!("(태그를 비웠습니다)");
            }
            ChatLine::Unknown(cmd) => println!("(알 수 없는 명령: {})", cmd),
            ChatLine::Recommend => match curator.recommend(tags.clone(), cancel).await {
                Ok(response) => {
                    for (i, book) in response.books.iter().enumerate() {
                        println!("{}. {} / {}", i + 1, book.title, book.author);
                        if !book.summary.is_empty() {
                            println!("   {}", book.summary);
                        }
                        if !book.reason.is_empty() {
                            println!("   → {}", book.reason);
                        }
                    }
                    if response.from_cache {
                        println!("(저장된 추천)");
                    }
                }
                Err(e) if e.is_client_error() => println!("(아직 추천할 수 없어요: {})", e),
                Err(e) => println!("(추천 실패: {})", e),
            },
            ChatLine::Utterance(text) => {
                let response = curator
                    .turn(TurnRequest::new(text, Some(tags.clone())), cancel)
                    .await?;
                tags = response.accumulated_tags;
                println!("{}", response.message);
                println!(
                    "  [감정: {}] [개념: {}]{}",
                    tags.emotions.join(", "),
                    tags.concepts.join(", "),
                    if response.can_recommend {
                        " · /recommend 로 책을 받아보세요"
                    } else {
                        ""
                    }
                );
            }
        }
    }
    Ok(())
}

/// Offline batch job: embed each category's entries with retry and write its embeddings file.
/// A category that fails is reported and skipped; the other is still written.
async fn handle_embed_lexicon(config: &CuratorConfig, policy: RetryPolicy) -> Result<()> {
    let service = embedding_service()?;
    let paths = LexiconPaths {
        emotion_embeddings: None,
        concept_embeddings: None,
        ..config.lexicon_paths()
    };
    let store = LexiconStore::load(&paths)?;

    let mut failed = Vec::new();
    for category in Category::ALL {
        let out_path = match category {
            Category::Emotion => &config.emotion_embeddings_path,
            Category::Concept => &config.concept_embeddings_path,
        };
        match precompute_category(&store, category, service.as_ref(), policy).await {
            Ok(rows) => {
                write_embeddings(out_path, &rows)?;
                println!("{}: {} embeddings -> {}", category, rows.len(), out_path.display());
            }
            Err(e) => {
                error!(category = %category, error = %e, "precompute failed");
                eprintln!("{}: failed: {}", category, e);
                failed.push(category.as_str());
            }
        }
    }

    if !failed.is_empty() {
        anyhow::bail!("embedding precompute failed for: {}", failed.join(", "));
    }
    Ok(())
}
