//! unhinged-formd — the Unhinged Cards form daemon.
//!
//! Loads configuration once, opens the submission store, and serves the
//! form endpoint until Ctrl-C.
//!
//! # Usage
//!
//! ```text
//! unhinged-formd serve --config form.toml
//! unhinged-formd serve --memory --debug --port 8787
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use unhinged_core::{FormConfig, LogFormat, StoreBackend};
use unhinged_form::{FormState, build_router};
use unhinged_store::{MemorySubmissionStore, PgSubmissionStore, SubmissionStore};

#[derive(Parser)]
#[command(name = "unhinged-formd", about = "Unhinged Cards form daemon")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the submission endpoint.
    Serve {
        /// TOML configuration file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides `server.port`).
        #[arg(long)]
        port: Option<u16>,

        /// Postgres connection string (overrides `store.url` and `DATABASE_URL`).
        #[arg(long)]
        database_url: Option<String>,

        /// Keep submissions in memory instead of Postgres.
        #[arg(long)]
        memory: bool,

        /// Include failure details in 500 responses.
        #[arg(long)]
        debug: bool,

        /// Log output format (overrides `logging.format`).
        #[arg(long, value_enum)]
        log_format: Option<LogFormatArg>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve {
            config,
            port,
            database_url,
            memory,
            debug,
            log_format,
        } => {
            let mut config = match config {
                Some(path) => FormConfig::from_file(&path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => FormConfig::default(),
            };
            if let Some(port) = port {
                config.server.port = port;
            }
            if memory {
                config.store.backend = StoreBackend::Memory;
            }
            if debug {
                config.errors.debug = true;
            }
            if let Some(format) = log_format {
                config.logging.format = format.into();
            }
            config.store.url = database_url
                .or(config.store.url)
                .or_else(|| std::env::var("DATABASE_URL").ok());
            config.validate()?;

            init_tracing(config.logging.format);
            serve(config).await
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,unhinged=debug"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn serve(config: FormConfig) -> anyhow::Result<()> {
    info!(
        backend = ?config.store.backend,
        debug = config.errors.debug,
        absent_fields = ?config.store.absent_fields,
        "form daemon starting"
    );

    match config.store.backend {
        StoreBackend::Postgres => {
            let url = config.store.url.as_deref().unwrap_or_default();
            let store = PgSubmissionStore::connect(url, config.store.max_connections).await?;
            run(store, &config).await
        }
        StoreBackend::Memory => {
            info!("using in-memory store; submissions are lost on exit");
            run(MemorySubmissionStore::new(), &config).await
        }
    }
}

async fn run<S: SubmissionStore>(store: S, config: &FormConfig) -> anyhow::Result<()> {
    let router = build_router(FormState {
        store,
        debug: config.errors.debug,
        absent_fields: config.store.absent_fields,
    });
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
            }
        })
        .await?;

    info!("form daemon stopped");
    Ok(())
}
