//! Codepad CLI
//!
//! A command-line front end for running code on a remote execution service.

use std::io::{IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use codepad::{
    BusyIndicator, Config, DirectoryDownloader, EXAMPLE_CONFIG, ExecutionController,
    ExecutionResult, ExecutionStatus, HttpExecutionService, Language,
};
use tokio::io::AsyncReadExt;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

mod session;

#[derive(Parser)]
#[command(name = "codepad")]
#[command(about = "Run code on a remote execution service")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Execution service URL (overrides configuration)
    #[arg(long, global = true)]
    url: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new configuration file
    Init {
        /// Output path (default: codepad.toml)
        #[arg(short, long, default_value = "codepad.toml")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Submit a source file and print its output
    Run {
        /// Source file to run ("-" reads stdin)
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Language (java, python, c_cpp, javascript)
        #[arg(short, long)]
        language: Option<Language>,
    },

    /// Save source under the configured name with the language's extension
    Save {
        /// Source file to save ("-" reads stdin)
        #[arg(value_name = "FILE")]
        source: PathBuf,

        /// Language (java, python, c_cpp, javascript)
        #[arg(short, long)]
        language: Option<Language>,

        /// Target directory (default: from configuration)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start a line-based editing session
    Edit {
        /// Initial language (java, python, c_cpp, javascript)
        #[arg(short, long)]
        language: Option<Language>,
    },

    /// List available languages
    Languages,

    /// Show effective configuration
    ShowConfig,
}

/// Busy indicator drawn as a status line on stderr
#[derive(Debug, Default)]
pub(crate) struct TerminalIndicator;

impl BusyIndicator for TerminalIndicator {
    fn show(&self, message: &str) {
        let mut stderr = std::io::stderr();
        if stderr.is_terminal() {
            let _ = write!(stderr, "{message}");
            let _ = stderr.flush();
        }
    }

    fn dismiss(&self) {
        let mut stderr = std::io::stderr();
        if stderr.is_terminal() {
            let _ = write!(stderr, "\r\x1b[2K");
            let _ = stderr.flush();
        }
    }
}

pub(crate) type Controller =
    ExecutionController<HttpExecutionService, TerminalIndicator, DirectoryDownloader>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::from_default_env().add_directive(Level::DEBUG.into())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Some(ref path) = cli.config {
        info!(?path, "loading configuration");
    } else {
        debug!("using default configuration");
    }
    let mut config = Config::load(cli.config.as_deref()).context("failed to load configuration")?;

    if let Some(url) = cli.url {
        config.service.url = url;
    }

    match cli.command {
        Commands::Init { output, force } => init_config(&output, force).await,
        Commands::Run { source, language } => run_source(&config, &source, language).await,
        Commands::Save {
            source,
            language,
            output,
        } => save_source(&config, &source, language, output).await,
        Commands::Edit { language } => {
            let mut controller = build_controller(&config, None)?;
            if let Some(language) = language {
                controller.set_language(language);
            }
            session::run(&mut controller).await
        }
        Commands::Languages => {
            list_languages(&config);
            Ok(())
        }
        Commands::ShowConfig => {
            show_config(&config);
            Ok(())
        }
    }
}

pub(crate) fn build_controller(config: &Config, save_dir: Option<PathBuf>) -> Result<Controller> {
    let service = HttpExecutionService::from_config(&config.service)
        .context("failed to create execution service client")?;
    let downloader = DirectoryDownloader::new(save_dir.unwrap_or_else(|| config.save_directory()));

    Ok(ExecutionController::new(
        config,
        service,
        TerminalIndicator,
        downloader,
    ))
}

async fn read_source(source: &Path) -> Result<String> {
    if source == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("failed to read source from stdin")?;
        Ok(text)
    } else {
        tokio::fs::read_to_string(source)
            .await
            .with_context(|| format!("failed to read source file '{}'", source.display()))
    }
}

async fn run_source(config: &Config, source: &Path, language: Option<Language>) -> Result<()> {
    let text = read_source(source).await?;

    let mut controller = build_controller(config, None)?;
    if let Some(language) = language {
        controller.set_language(language);
    }
    controller.set_source_text(text);

    info!(
        language = controller.language().display_name(),
        url = controller.service().url(),
        "running program"
    );
    controller.run().await;

    match controller.status() {
        ExecutionStatus::Unreachable(reason) => {
            error!("{reason}");
            std::process::exit(2);
        }
        _ => match controller.current_result() {
            Some(ExecutionResult::Output(output)) => {
                print!("{output}");
                Ok(())
            }
            Some(ExecutionResult::Failure(message)) => {
                eprintln!("{message}");
                std::process::exit(1);
            }
            None => Ok(()),
        },
    }
}

async fn save_source(
    config: &Config,
    source: &Path,
    language: Option<Language>,
    output: Option<PathBuf>,
) -> Result<()> {
    let text = read_source(source).await?;

    let mut controller = build_controller(config, output)?;
    if let Some(language) = language {
        controller.set_language(language);
    }
    controller.set_source_text(text);

    let artifact = controller.artifact();
    controller.save();

    println!(
        "Saved {} ({})",
        controller
            .downloader()
            .target_path(&artifact.file_name)
            .display(),
        artifact.mime_type
    );
    Ok(())
}

fn list_languages(config: &Config) {
    println!("Available languages:\n");

    for (language, mapping) in config.registry().iter() {
        println!(
            "  {:<12} {:<12} token={:<8} .{}",
            language.key(),
            language.display_name(),
            mapping.token,
            mapping.extension
        );
    }
}

fn show_config(config: &Config) {
    println!("Execution service:");
    println!("  URL: {}", config.service.url);
    println!("  Timeout: {}s", config.service.timeout_secs);
    println!();
    println!("Editor:");
    println!("  Theme: {}", config.editor.theme);
    println!("  Font size: {}", config.editor.font_size);
    println!("  Default language: {}", config.editor.default_language);
    println!();
    println!("Save:");
    println!("  Base name: {}", config.save.base_name);
    println!("  Directory: {}", config.save_directory().display());
    println!();
    println!("Language overrides: {}", config.languages.len());
}

async fn init_config(output: &PathBuf, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists at '{}'. Use --force to overwrite.",
            output.display()
        );
    }

    tokio::fs::write(output, EXAMPLE_CONFIG)
        .await
        .context("failed to write configuration file")?;

    println!("Created configuration file at '{}'", output.display());
    Ok(())
}
