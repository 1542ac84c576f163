//! CLI parser and command dispatch.

mod ask;
mod config_cmd;
mod serve;
mod summarize;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use crate::config::Settings;
use crate::context::AppContext;
use crate::extract::InputSource;

#[derive(Parser)]
#[command(name = "textlens")]
#[command(about = "Summarize or ask questions about web pages and PDF documents")]
#[command(version)]
pub struct Cli {
    /// Config file path (overrides auto-discovery)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Check if verbose mode is enabled (for early logging setup).
pub fn is_verbose() -> bool {
    std::env::args().any(|arg| arg == "-v" || arg == "--verbose")
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize a web page or PDF
    Summarize {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Ask questions about a web page or PDF
    Ask {
        #[command(flatten)]
        source: SourceArgs,
        /// Question to answer (repeatable; prompts interactively if omitted)
        #[arg(short = 'q', long = "question")]
        questions: Vec<String>,
    },

    /// Start the web interface
    Serve {
        /// Address to bind (port, host, or host:port)
        bind: Option<String>,
    },

    /// Show the effective configuration
    Config,
}

/// Document to read: exactly one of a URL or a PDF file.
#[derive(Args)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Web page URL
    #[arg(long)]
    url: Option<String>,
    /// Path to a PDF file
    #[arg(long)]
    pdf: Option<PathBuf>,
}

impl SourceArgs {
    async fn into_source(self) -> anyhow::Result<InputSource> {
        match (self.url, self.pdf) {
            (Some(url), _) => Ok(InputSource::Url(url)),
            (None, Some(path)) => {
                let bytes = tokio::fs::read(&path)
                    .await
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                Ok(InputSource::Pdf(bytes))
            }
            (None, None) => anyhow::bail!("Either --url or --pdf is required"),
        }
    }
}

/// Run the CLI.
pub async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Config => config_cmd::cmd_config(&settings),
        Commands::Summarize { source } => {
            let ctx = AppContext::from_settings(&settings)?;
            summarize::cmd_summarize(&ctx, source.into_source().await?).await
        }
        Commands::Ask { source, questions } => {
            let ctx = AppContext::from_settings(&settings)?;
            ask::cmd_ask(&ctx, source.into_source().await?, questions).await
        }
        Commands::Serve { bind } => {
            let ctx = AppContext::from_settings(&settings)?;
            serve::cmd_serve(&settings, ctx, bind.as_deref()).await
        }
    }
}
