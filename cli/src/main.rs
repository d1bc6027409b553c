//! CLI entrypoint for study-buddy
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use studybuddy_application::{
    ChatReplyUseCase, GenerateFlashcardsUseCase, GenerateQuizUseCase, GenerationOrchestrator,
    GenerationProgress, NoProgress, RenderMapUseCase, SummarizeUseCase,
};
use studybuddy_infrastructure::{
    ConfigLoader, Credentials, FileConfig, SvgMapRenderer, build_orchestrator,
};
use studybuddy_presentation::{
    Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter, SimpleProgress, StudyOutput,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    // stdout carries the result, logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let Some(command) = cli.command.clone() else {
        bail!("A command is required. Run `study-buddy --help` for the list.");
    };

    let config: FileConfig = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("failed to load configuration")?
    };
    for warning in config.validate() {
        warn!("config: {}", warning);
    }
    if !config.output.color {
        colored::control::set_override(false);
    }

    info!("Starting study-buddy");

    // === Dependency Injection ===
    let provider_config = config.provider_config();
    let credentials = Credentials::from_env(&provider_config);
    let orchestrator = Arc::new(
        build_orchestrator(&provider_config, &credentials)
            .context("failed to build HTTP clients")?,
    );

    let output = {
        let progress = progress_for(&cli);
        run(&command, &config, orchestrator, progress.as_ref()).await?
    };

    let rendered = match cli.output {
        OutputFormat::Text => ConsoleFormatter::format(&output),
        OutputFormat::Json => ConsoleFormatter::format_json(&output),
    };
    println!("{}", rendered.trim_end());

    Ok(())
}

/// Spinner on a terminal, plain lines otherwise, nothing with `--quiet`
fn progress_for(cli: &Cli) -> Box<dyn GenerationProgress> {
    if cli.quiet || matches!(cli.command, Some(Command::Models)) {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    }
}

async fn run(
    command: &Command,
    config: &FileConfig,
    orchestrator: Arc<GenerationOrchestrator>,
    progress: &dyn GenerationProgress,
) -> Result<StudyOutput> {
    let text = command.text().unwrap_or_default();

    let output = match command {
        Command::Chat { .. } => {
            let reply = ChatReplyUseCase::new(orchestrator)
                .execute_with_progress(&text, progress)
                .await;
            StudyOutput::Reply {
                message: text,
                reply,
            }
        }
        Command::Summarize { .. } => {
            let summary = SummarizeUseCase::new(orchestrator)
                .execute_with_progress(&text, progress)
                .await;
            StudyOutput::Summary {
                topic: text,
                summary,
            }
        }
        Command::Quiz { .. } => {
            let quiz = GenerateQuizUseCase::new(orchestrator)
                .execute_with_progress(&text, progress)
                .await;
            StudyOutput::Quiz { topic: text, quiz }
        }
        Command::Flashcards { .. } => {
            let deck = GenerateFlashcardsUseCase::new(orchestrator)
                .execute_with_progress(&text, progress)
                .await;
            StudyOutput::Flashcards { topic: text, deck }
        }
        Command::Map { out, .. } => {
            let path = out
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.output.map_file));
            let map = RenderMapUseCase::new(orchestrator, Arc::new(SvgMapRenderer::new()))
                .execute_with_progress(&text, progress)
                .await;
            std::fs::write(&path, &map.image.bytes)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Wrote concept map to {}", path.display());
            StudyOutput::Map {
                topic: text,
                path,
                map,
            }
        }
        Command::Models => {
            let Some(selector) = orchestrator.selector() else {
                bail!(
                    "Gemini is disabled: set {} (or providers.gemini.api_key) to list models",
                    config.providers.gemini.api_key_env
                );
            };
            match selector.try_ranked_models().await {
                Ok(models) if !models.is_empty() => StudyOutput::Models { models, note: None },
                Ok(_) => StudyOutput::Models {
                    models: selector.policy().fallback(),
                    note: Some("no catalog model matched the preferences".to_string()),
                },
                Err(e) => StudyOutput::Models {
                    models: selector.policy().fallback(),
                    note: Some(format!("catalog unavailable ({})", e)),
                },
            }
        }
    };

    Ok(output)
}
