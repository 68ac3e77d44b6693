use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use invisi::cli::batch::NewBatchArgs;
use invisi::config::{load_or_default, resolve_config_path, LoggingConfig};

#[derive(Parser)]
#[command(name = "invisi")]
#[command(about = "Batch tracking dashboard for cocoa processing", long_about = None)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the terminal dashboard (default)
    Dashboard {
        /// Start on the pod view
        #[arg(long)]
        pod: bool,
    },
    /// Print batch cards, optionally for a single stage
    List {
        /// fermenting, drying, sorting, ready or all
        #[arg(long)]
        stage: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print one batch
    Show {
        id: String,
        #[arg(long)]
        json: bool,
    },
    /// Start a new batch from form values
    New {
        /// Total weight in kilograms
        #[arg(long)]
        weight: Option<String>,
        #[arg(long)]
        variety: Option<String>,
        /// Start date, YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        json: bool,
    },
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the starter config
    Init {
        #[arg(long)]
        stdout: bool,
    },
    /// Load and validate the resolved config
    Validate,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = resolve_config_path(cli.config.as_deref());

    // Config commands work on the file itself; everything else needs it loaded.
    if let Some(Commands::Config { action }) = &cli.command {
        init_tracing(&LoggingConfig::default(), false)?;
        return match action {
            ConfigAction::Init { stdout } => invisi::cli::config::init(*stdout),
            ConfigAction::Validate => invisi::cli::config::validate(config_path.as_deref()),
        };
    }

    let config = match load_or_default(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Some(path) = &config_path {
                eprintln!("Config file: {}", path.display());
            }
            eprintln!("\nRun 'invisi config validate' for details, or 'invisi config init --stdout' for a starter config.");
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Dashboard { pod }) => {
            init_tracing(&config.logging, true)?;
            invisi::cli::run::run(config, pod)?;
        }
        None => {
            init_tracing(&config.logging, true)?;
            invisi::cli::run::run(config, false)?;
        }
        Some(Commands::List { stage, json }) => {
            init_tracing(&config.logging, false)?;
            invisi::cli::batch::list(&config, stage.as_deref(), json)?;
        }
        Some(Commands::Show { id, json }) => {
            init_tracing(&config.logging, false)?;
            invisi::cli::batch::show(&config, &id, json)?;
        }
        Some(Commands::New {
            weight,
            variety,
            date,
            notes,
            json,
        }) => {
            init_tracing(&config.logging, false)?;
            let args = NewBatchArgs {
                weight,
                variety,
                date,
                notes,
                json,
            };
            invisi::cli::batch::new(&config, args)?;
        }
        Some(Commands::Config { .. }) => {}
    }

    Ok(())
}

/// Line-oriented commands log to stderr. The dashboard owns the terminal, so
/// it only logs when a log file is configured.
fn init_tracing(logging: &LoggingConfig, fullscreen: bool) -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.filter));

    let stderr_layer = (!fullscreen).then(|| fmt::layer().with_writer(std::io::stderr));

    let file_layer = match &logging.file {
        Some(path) if fullscreen => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        _ => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();
    Ok(())
}
