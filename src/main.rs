use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use merchant_resolver::render::{render_json, render_map_text, render_text};
use merchant_resolver::report::DEFAULT_TOP_COMPANIES;
use merchant_resolver::{load_csv, resolve_transactions, Report, Resolver, ResolverConfig};

/// Resolve noisy merchant descriptions into companies and spending categories
#[derive(Parser)]
#[command(name = "merchant-resolver")]
#[command(about = "Group transaction descriptions by company and category", long_about = None)]
#[command(version)]
struct Cli {
    /// JSON config overriding aliases, categories, transfer keywords, threshold
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a CSV ledger (Date, Description, Amount)
    Analyze {
        /// CSV file containing transaction data
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of companies to list
        #[arg(long, default_value_t = DEFAULT_TOP_COMPANIES)]
        top: usize,
    },

    /// Print the cleaned-name → canonical-name map for a ledger
    Groups {
        file: PathBuf,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the default configuration as JSON
    Config,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Analyze {
            file,
            format,
            output,
            top,
        } => {
            let resolver = load_resolver(cli.config.as_deref())?;
            run_analyze(&resolver, &file, format, output.as_deref(), top)
        }
        Commands::Groups { file, format } => {
            let resolver = load_resolver(cli.config.as_deref())?;
            run_groups(&resolver, &file, format)
        }
        Commands::Config => {
            println!("{}", ResolverConfig::default().to_json_pretty()?);
            Ok(())
        }
    }
}

fn load_resolver(config_path: Option<&Path>) -> Result<Resolver> {
    let config = match config_path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            ResolverConfig::from_file(path)?
        }
        None => ResolverConfig::default(),
    };
    Resolver::new(&config)
}

fn run_analyze(
    resolver: &Resolver,
    file: &Path,
    format: OutputFormat,
    output: Option<&Path>,
    top: usize,
) -> Result<()> {
    let transactions = load_csv(file)?;
    let resolved = resolve_transactions(resolver, &transactions);
    let report = Report::build(&resolved, resolver.categories(), top);

    let rendered = match format {
        OutputFormat::Text => render_text(&report),
        OutputFormat::Json => render_json(&report)?,
    };

    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn run_groups(resolver: &Resolver, file: &Path, format: OutputFormat) -> Result<()> {
    let transactions = load_csv(file)?;
    let descriptions: Vec<&str> = transactions.iter().map(|t| t.description.as_str()).collect();
    let map = resolver.build_groups(&descriptions);

    match format {
        OutputFormat::Text => print!("{}", render_map_text(&map)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&map).context("Failed to serialize map")?
        ),
    }

    Ok(())
}
