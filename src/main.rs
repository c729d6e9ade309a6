#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use palette_vault::{Catalog, ColorFilter, Rgb, Settings, Store, StoreError};

#[derive(Parser)]
#[command(name = "palette-vault", about = "Encrypted palette storage maintenance tool")]
struct Cli {
    /// Data directory (defaults to the platform data dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Key file (defaults to the platform config dir)
    #[arg(long)]
    key_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Regenerate the preset palette catalog
    Generate {
        /// Total number of palettes to emit
        #[arg(long, default_value_t = palette_vault::constants::catalog::DEFAULT_TARGET_COUNT)]
        count: usize,
    },
    /// Query the catalog by tag and/or color
    Query {
        /// Tag to match exactly
        #[arg(long)]
        tag: Option<String>,
        /// Hex color to match by similarity, e.g. '#3498DB'
        #[arg(long)]
        color: Option<String>,
        /// Similarity threshold (0-100)
        #[arg(long, default_value_t = palette_vault::constants::search::DEFAULT_SIMILARITY_THRESHOLD)]
        threshold: f32,
    },
    /// List the catalog's tag vocabulary
    Tags,
    /// Print a record's payload as JSON
    Show {
        /// Record name, e.g. 'config' or 'recent_files'
        name: String,
    },
    /// Print the current settings (defaults if none are saved)
    Settings,
}

fn open_store(cli: &Cli) -> Result<Store> {
    match (&cli.data_dir, &cli.key_file) {
        (Some(data_dir), Some(key_file)) => {
            Store::open(data_dir.clone(), key_file).context("failed to open store")
        }
        (None, None) => Store::default_local().context("failed to open store"),
        _ => bail!("--data-dir and --key-file must be given together"),
    }
}

fn load_or_generate_catalog(store: &Store) -> Result<Catalog> {
    match Catalog::load(store) {
        Ok(catalog) => Ok(catalog),
        Err(StoreError::CatalogUnavailable) => {
            info!("Catalog unavailable, regenerating");
            let catalog =
                Catalog::generate(store, palette_vault::constants::catalog::DEFAULT_TARGET_COUNT)?;
            Ok(catalog)
        }
        Err(other) => Err(other.into()),
    }
}

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let store = open_store(&cli)?;

    match cli.command {
        Command::Generate { count } => {
            let catalog = Catalog::generate(&store, count)?;
            println!("generated {} palettes", catalog.len());
        }
        Command::Query {
            tag,
            color,
            threshold,
        } => {
            let color_filter = match color {
                Some(text) => {
                    let target = Rgb::parse(&text)
                        .with_context(|| format!("invalid hex color: {text}"))?;
                    Some(ColorFilter::with_threshold(target, threshold))
                }
                None => None,
            };
            let catalog = load_or_generate_catalog(&store)?;
            let results =
                palette_vault::query(&catalog, tag.as_deref(), color_filter.as_ref());
            for entry in &results {
                let colors: Vec<String> =
                    entry.colors.iter().map(|c| c.to_hex_string()).collect();
                println!("{:>4}  {:<24} {}", entry.id, entry.name, colors.join(" "));
            }
            println!("{} / {} palettes", results.len(), catalog.len());
        }
        Command::Tags => {
            let catalog = load_or_generate_catalog(&store)?;
            for tag in palette_vault::all_tags(&catalog) {
                println!("{tag}");
            }
        }
        Command::Show { name } => {
            let payload = store
                .load(&name)
                .with_context(|| format!("failed to load record '{name}'"))?;
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Command::Settings => {
            let settings = Settings::load(&store)?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
    }

    Ok(())
}
