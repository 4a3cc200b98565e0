use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use demand_dashboard::render::{failure_message, render_choices, render_header};
use demand_dashboard::{render_view, resolve_config, run_session, DashboardConfig, Panel};
use demand_forecast::sample::{SampleArtifacts, SampleConfig};
use demand_forecast::AppContext;
use std::io;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "demand-dashboard",
    version,
    about = "Store-item demand history and next-day sales forecast"
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./dashboard.toml` when present, built-in settings otherwise.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Model artifact (JSON); overrides `artifacts.model`
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    /// Feature list artifact (JSON); overrides `artifacts.features`
    #[arg(long, global = true)]
    features: Option<PathBuf>,

    /// Historical dataset (CSV); overrides `artifacts.dataset`
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Logging level: trace, debug, info, warn or error
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard for one store and item
    Show {
        #[arg(long)]
        store: u32,

        #[arg(long)]
        item: u32,

        /// Panel to render
        #[arg(long, value_enum, default_value_t = Panel::All)]
        panel: Panel,
    },

    /// List the stores and items available for selection
    List,

    /// Read `<store> <item>` selections from stdin and render each
    Interactive,

    /// Re-export the loaded dataset to CSV
    Export {
        /// Output path; defaults to `artifacts.export`, then `export.csv`
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write a synthetic dataset, feature list and model
    Sample {
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        #[arg(long, default_value_t = 2)]
        stores: u32,

        #[arg(long, default_value_t = 3)]
        items: u32,

        #[arg(long, default_value_t = 120)]
        days: u32,

        /// First date of the series (YYYY-MM-DD)
        #[arg(long, default_value = "2017-01-01")]
        start: NaiveDate,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn init_logging(level: &str) {
    let level = match level {
        "trace" => tracing::Level::TRACE,
        "debug" => tracing::Level::DEBUG,
        "info" => tracing::Level::INFO,
        "warn" => tracing::Level::WARN,
        "error" => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn load_context(cli: &Cli, config: &DashboardConfig) -> Result<AppContext> {
    let mut paths = config.artifacts.paths();
    if let Some(model) = &cli.model {
        paths.model = model.clone();
    }
    if let Some(features) = &cli.features {
        paths.features = features.clone();
    }
    if let Some(dataset) = &cli.dataset {
        paths.dataset = dataset.clone();
    }

    match AppContext::load(&paths) {
        Ok(context) => Ok(context),
        Err(e) => {
            error!("Failed to load artifacts: {}", e);
            anyhow::bail!("{}", failure_message(&e))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?;
    init_logging(cli.log_level.as_deref().unwrap_or(&config.logging.level));

    match &cli.command {
        Commands::Show { store, item, panel } => {
            let context = load_context(&cli, &config)?;
            let view = context.view(*store, *item);
            print!("{}", render_header());
            println!();
            print!("{}", render_view(&view, &config, *panel));
        }
        Commands::List => {
            let context = load_context(&cli, &config)?;
            print!("{}", render_choices(&context.stores(), &context.items()));
        }
        Commands::Interactive => {
            let context = load_context(&cli, &config)?;
            print!("{}", render_header());
            let stdin = io::stdin();
            run_session(&context, &config, stdin.lock(), io::stdout().lock())?;
        }
        Commands::Export { out } => {
            let context = load_context(&cli, &config)?;
            let out = out
                .clone()
                .or_else(|| config.artifacts.export.clone())
                .unwrap_or_else(|| PathBuf::from("export.csv"));
            context
                .export_dataset(&out)
                .with_context(|| format!("Failed to export dataset to {}", out.display()))?;
            println!("Exported {} records to {}", context.dataset().len(), out.display());
        }
        Commands::Sample {
            out_dir,
            stores,
            items,
            days,
            start,
            seed,
        } => {
            let sample_config = SampleConfig {
                stores: *stores,
                items: *items,
                days: *days,
                start: *start,
                seed: *seed,
            };
            let written = SampleArtifacts::generate(&sample_config)?
                .write(out_dir)
                .with_context(|| format!("Failed to write sample to {}", out_dir.display()))?;
            info!(dir = %out_dir.display(), "Sample artifacts ready");
            println!("Dataset:  {}", written.dataset.display());
            println!("Features: {}", written.features.display());
            println!("Model:    {}", written.model.display());
        }
    }

    Ok(())
}
