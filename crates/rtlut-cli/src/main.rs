//! rtlut - radiative-transfer LUT inspection and lookup
//!
//! Decodes legacy binary LUT streams through a layout preset or YAML file
//! and answers interpolated queries from the command line.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt};

mod commands;

#[derive(Parser)]
#[command(name = "rtlut")]
#[command(author, version, about = "Radiative-transfer LUT inspection and lookup")]
#[command(long_about = "
Reads N-dimensional lookup tables stored as raw f32 streams and interpolates
them multilinearly. The stream structure comes from a layout: a built-in
preset (meris-aot, meris-aot-kx) or a YAML file.

Examples:
  rtlut info aot.bin -l meris-aot                  # Axes and value range
  rtlut grid aot.bin -l meris-aot --axis azimuth   # One axis' nodes
  rtlut query aot.bin -l meris-aot --at 412,0.1,0,90,30,10,1
  rtlut query kx.bin -l layout.yaml --at wavelength=560,aot=0.2,elevation=0,azimuth=45,sza=30,vza=10,kx=1
  rtlut curve hue2lambda.csv --x 12.5 --x 130 --min-input 0
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Show axes and value statistics of a LUT
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Interpolate a LUT at one or more points
    #[command(visible_alias = "q")]
    Query(QueryArgs),

    /// Print the nodes of one axis
    #[command(visible_alias = "g")]
    Grid(GridArgs),

    /// Look up values on a two-column text curve
    Curve(CurveArgs),
}

#[derive(Args)]
struct InfoArgs {
    /// LUT file(s)
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Layout preset name or YAML file
    #[arg(short, long)]
    layout: String,

    /// Also print the resolved layout as YAML
    #[arg(long)]
    yaml: bool,
}

#[derive(Args)]
struct QueryArgs {
    /// LUT file
    input: PathBuf,

    /// Layout preset name or YAML file
    #[arg(short, long)]
    layout: String,

    /// Query point: comma-separated values in axis order, or name=value pairs
    #[arg(short, long = "at", required = true, allow_hyphen_values = true)]
    at: Vec<String>,
}

#[derive(Args)]
struct GridArgs {
    /// LUT file
    input: PathBuf,

    /// Layout preset name or YAML file
    #[arg(short, long)]
    layout: String,

    /// Axis index or name
    #[arg(short, long)]
    axis: String,
}

#[derive(Args)]
struct CurveArgs {
    /// Curve file (x and y columns)
    input: PathBuf,

    /// Input value(s)
    #[arg(short, long = "x", required = true, allow_negative_numbers = true)]
    x: Vec<f64>,

    /// Inputs below this bound yield NaN
    #[arg(long, allow_negative_numbers = true)]
    min_input: Option<f64>,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt().with_writer(std::io::stderr).with_env_filter(filter).with_target(false).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    let verbose = cli.verbose > 0;
    match cli.command {
        Commands::Info(args) => commands::info::run(args, verbose),
        Commands::Query(args) => commands::query::run(args, verbose),
        Commands::Grid(args) => commands::grid::run(args, verbose),
        Commands::Curve(args) => commands::curve::run(args, verbose),
    }
}
