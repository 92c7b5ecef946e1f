//! Intrinsic CLI binary.
//!
//! Values a snapshot of stocks from the command line.

mod cmd;
mod data;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use intrinsic_portfolio::SortKey;
use intrinsic_traits::{ValuationControls, ValuationMode};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "intrinsic")]
#[command(about = "Intrinsic value estimation with a conservative two-stage DCF", long_about = None)]
#[command(version)]
struct Cli {
    /// Log engine decisions (floors, penalties, risk premia)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// TOML file overriding model parameters
    #[arg(long, global = true)]
    params: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Valuation controls shared by the subcommands.
#[derive(Args, Debug, Clone, Copy)]
struct ControlArgs {
    /// Base discount rate (%)
    #[arg(short = 'r', long, default_value_t = 10.0)]
    discount_rate: f64,

    /// Growth discount factor (%), 100 keeps raw growth
    #[arg(short, long, default_value_t = 80.0)]
    growth_discount: f64,

    /// Base value: eps, avgEps or fcfps
    #[arg(short, long, default_value = "avgEps")]
    mode: ValuationMode,
}

impl From<ControlArgs> for ValuationControls {
    fn from(args: ControlArgs) -> Self {
        Self::new(args.discount_rate, args.growth_discount, args.mode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Value every stock in a snapshot
    Value {
        /// Snapshot JSON file
        snapshot: PathBuf,

        #[command(flatten)]
        controls: ControlArgs,

        /// Only show this sector
        #[arg(short, long)]
        sector: Option<String>,

        /// Only show tickers or names containing this text
        #[arg(long)]
        search: Option<String>,

        /// Sort column
        #[arg(long, default_value = "ticker")]
        sort: SortKey,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the full valuation of one stock
    Detail {
        /// Snapshot JSON file
        snapshot: PathBuf,

        /// Ticker symbol
        ticker: String,

        #[command(flatten)]
        controls: ControlArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// List sector exit multiples
    Sectors,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let params = data::load_params(cli.params.as_deref())?;

    match cli.command {
        Commands::Value {
            snapshot,
            controls,
            sector,
            search,
            sort,
            desc,
            format,
        } => {
            let view = cmd::value::View {
                sector,
                search,
                sort,
                desc,
                json: format == OutputFormat::Json,
            };
            cmd::value::run(&snapshot, controls.into(), &params, &view)?;
        }
        Commands::Detail {
            snapshot,
            ticker,
            controls,
            format,
        } => {
            cmd::detail::run(
                &snapshot,
                &ticker,
                controls.into(),
                &params,
                format == OutputFormat::Json,
            )?;
        }
        Commands::Sectors => {
            cmd::sectors::run(&params);
        }
    }

    Ok(())
}

/// Install the log subscriber. `RUST_LOG` wins unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
