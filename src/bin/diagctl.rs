use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use host_diag::backend::LocalBackend;
use host_diag::config::{load_config, ConfigWatcher, DiagnosticsConfig};
use host_diag::logging::Level;
use host_diag::observability::logging::init_tracing;
use host_diag::Diagnostics;

#[derive(Parser)]
#[command(name = "diagctl")]
#[command(about = "Inspect and exercise host diagnostics", long_about = None)]
struct Cli {
    /// Path to a TOML config file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Process data directory (overrides process.data_dir).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Report the backend as ready.
    #[arg(long)]
    ready: bool,

    /// Debug preference stored in the backend.
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the debug flag and owner id, then print a JSON snapshot
    Status,
    /// Write a single log record through the logger
    Log {
        level: Level,
        tag: String,
        message: String,
    },
    /// Apply config file changes until interrupted
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DiagnosticsConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.process.data_dir = Some(dir.clone());
    }

    let tracing_handle = init_tracing(&config.logging)?;

    let backend = Arc::new(LocalBackend::new());
    backend.set_debug_enabled(cli.debug);
    if cli.ready {
        backend.mark_ready();
    }

    let diagnostics = Arc::new(
        Diagnostics::builder()
            .backend(backend)
            .tracing(tracing_handle)
            .config(config)
            .build(),
    );

    match cli.command {
        Commands::Status => {
            diagnostics.is_debug_enabled();
            if let Err(e) = diagnostics.is_owner() {
                tracing::warn!(error = %e, "Owner id could not be resolved");
            }
            println!("{}", serde_json::to_string_pretty(&diagnostics.snapshot())?);
        }
        Commands::Log {
            level,
            tag,
            message,
        } => {
            diagnostics.logger().log(level, &tag, message);
        }
        Commands::Watch => {
            let Some(path) = cli.config else {
                return Err("watch requires --config".into());
            };
            let current = (*diagnostics.config()).clone();
            let (watcher, mut updates) = ConfigWatcher::new(&path, current);
            let _watcher = watcher.run()?;

            loop {
                tokio::select! {
                    Some(config) = updates.recv() => {
                        diagnostics.apply_config(config);
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Interrupted, exiting");
                        break;
                    }
                }
            }
        }
    }

    Ok(())
}
