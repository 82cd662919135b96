//! CLI argument definitions for the price predictor.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

/// Default location of the reference dataset (historical listings).
pub const DEFAULT_DATA_PATH: &str = "data/used_car_cleaned.csv";
/// Default location of the trained model artifact.
pub const DEFAULT_MODEL_PATH: &str = "model/price_model.json";

#[derive(Parser)]
#[command(
    name = "carprice",
    version,
    about = "Used-car price prediction from a pre-trained regression model",
    long_about = "Estimate used-car sale prices with a pre-trained regression model.\n\n\
                  Predicts a single car from its attributes, or a whole CSV of\n\
                  listings in one pass with a Predicted_Price column appended."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Reference dataset CSV used to derive the choice lists.
    #[arg(
        long = "data",
        value_name = "PATH",
        default_value = DEFAULT_DATA_PATH,
        global = true
    )]
    pub data: PathBuf,

    /// Trained model artifact.
    #[arg(
        long = "model",
        value_name = "PATH",
        default_value = DEFAULT_MODEL_PATH,
        global = true
    )]
    pub model: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Predict the price of a single car from its attributes.
    Predict(PredictArgs),

    /// Predict prices for every row of a CSV file.
    Batch(BatchArgs),

    /// Show the feature schema, numeric bounds, and derived choice lists.
    Schema(SchemaArgs),
}

#[derive(Parser)]
pub struct PredictArgs {
    /// Manufacturer (must appear in the reference dataset).
    #[arg(long)]
    pub make: String,

    /// Model/type; valid choices depend on the chosen make.
    #[arg(long = "type", value_name = "TYPE")]
    pub car_type: String,

    /// Country/region of origin.
    #[arg(long)]
    pub origin: String,

    /// Selling/buying region.
    #[arg(long)]
    pub region: String,

    /// Gear type (e.g. Automatic, Manual).
    #[arg(long = "gear-type")]
    pub gear_type: String,

    /// Options level (e.g. Full Option, Standard).
    #[arg(long)]
    pub options: String,

    /// Year of production.
    #[arg(long)]
    pub year: i64,

    /// Engine size in liters.
    #[arg(long = "engine-size")]
    pub engine_size: f64,

    /// Mileage in kilometers.
    #[arg(long)]
    pub mileage: i64,

    /// Emit the result as JSON instead of a display string.
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser)]
pub struct BatchArgs {
    /// Input CSV; must contain every feature schema column (exact names).
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output CSV path (default: <INPUT stem>_predicted.csv).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct SchemaArgs {
    /// Narrow the Type choices to those observed for one make.
    #[arg(long = "make", value_name = "MAKE")]
    pub make: Option<String>,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
