use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use masspool::compound::Delimiter;
use masspool::plate::PlateFormat;

mod config;
mod demo;
mod pool;

/// masspool - Compound Pooling and Mass Collision Detection
#[derive(Parser)]
#[command(name = "masspool")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Plate format argument (well count).
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum PlateFormatArg {
    /// 96-well plate (8 rows x 12 columns)
    #[value(name = "96")]
    W96,
    /// 384-well plate (16 rows x 24 columns)
    #[default]
    #[value(name = "384")]
    W384,
    /// 1536-well plate (32 rows x 48 columns)
    #[value(name = "1536")]
    W1536,
}

impl From<PlateFormatArg> for PlateFormat {
    fn from(arg: PlateFormatArg) -> Self {
        match arg {
            PlateFormatArg::W96 => PlateFormat::W96,
            PlateFormatArg::W384 => PlateFormat::W384,
            PlateFormatArg::W1536 => PlateFormat::W1536,
        }
    }
}

/// Input delimiter argument.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum DelimiterArg {
    /// Tab-separated input
    #[default]
    Tab,
    /// Comma-separated input
    Comma,
    /// Space-separated input
    Space,
}

impl From<DelimiterArg> for Delimiter {
    fn from(arg: DelimiterArg) -> Self {
        match arg {
            DelimiterArg::Tab => Delimiter::Tab,
            DelimiterArg::Comma => Delimiter::Comma,
            DelimiterArg::Space => Delimiter::Space,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Assign compounds to pool wells and detect mass collisions
    Pool {
        /// Input compound table path
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Plate format (default: 384)
        #[arg(short = 'f', long, value_enum)]
        plate_format: Option<PlateFormatArg>,

        /// Number of compounds per well (exclusive with --total-wells)
        #[arg(short = 'c', long)]
        compounds_per_well: Option<usize>,

        /// Total number of wells (exclusive with --compounds-per-well)
        #[arg(short = 'w', long)]
        total_wells: Option<usize>,

        /// Threshold for mass collision detection (default: 0.1)
        #[arg(short = 't', long)]
        threshold: Option<f64>,

        /// Prefix for the output report files (default: output)
        #[arg(short = 'o', long)]
        output_prefix: Option<String>,

        /// Delimiter of the input file (default: tab)
        #[arg(short = 'd', long, value_enum)]
        delimiter: Option<DelimiterArg>,

        /// Name of the sample identifier column (default: sample)
        #[arg(long)]
        sample_column: Option<String>,

        /// Name of the exact mass column (default: ExactMass)
        #[arg(long)]
        mass_column: Option<String>,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Generate a demo compound table for trying the tool
    Demo {
        /// Output table path
        #[arg(value_name = "OUTPUT", default_value = "demo_compounds.tsv")]
        output: PathBuf,

        /// Number of compounds to generate
        #[arg(short = 'n', long, default_value = "384")]
        compounds: usize,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Pool {
            input,
            plate_format,
            compounds_per_well,
            total_wells,
            threshold,
            output_prefix,
            delimiter,
            sample_column,
            mass_column,
            config,
        } => pool::run(
            input,
            plate_format.map(PlateFormat::from),
            compounds_per_well,
            total_wells,
            threshold,
            output_prefix,
            delimiter.map(Delimiter::from),
            sample_column,
            mass_column,
            config,
        ),
        Commands::Demo { output, compounds } => demo::run(output, compounds),
    }
}
