use clap::Parser;
use portsim_rs::error::PortSimError;
use portsim_rs::failure::FailureOverlap;
use portsim_rs::output::ALL_TABLES;
use portsim_rs::port::run_all;
use portsim_rs::sim::PortConfig;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(
    name = "port-sim",
    about = "Generate a synthetic year of port-terminal operational logs"
)]
struct Args {
    /// Path to a JSON config; omitted fields use the baseline terminal
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the CSV tables are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Override the horizon length in days
    #[arg(long)]
    days: Option<u64>,

    /// Override the start timestamp (YYYY-MM-DD[ HH:MM:SS])
    #[arg(long)]
    start: Option<String>,

    /// Override the crane failure overlap policy: allow or clamp_gap
    #[arg(long)]
    failure_overlap: Option<String>,

    /// Re-read every written table and check its header columns
    #[arg(long)]
    verify: bool,

    /// Print the effective config as JSON and exit
    #[arg(long)]
    print_config: bool,
}

fn load_config(args: &Args) -> Result<PortConfig, PortSimError> {
    let mut cfg = match &args.config {
        Some(path) => PortConfig::from_json(&fs::read_to_string(path)?)?,
        None => PortConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }
    if let Some(days) = args.days {
        cfg.horizon_days = days;
    }
    if let Some(start) = &args.start {
        cfg.start = start.clone();
    }
    if let Some(policy) = &args.failure_overlap {
        cfg.cranes.overlap = policy
            .parse::<FailureOverlap>()
            .map_err(PortSimError::InvalidConfig)?;
    }
    Ok(cfg)
}

fn run(args: &Args) -> Result<(), PortSimError> {
    let cfg = load_config(args)?;
    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&cfg)?);
        return Ok(());
    }

    let logs = run_all(&cfg)?;
    let paths = logs.write_all(&args.out_dir)?;

    if args.verify {
        logs.verify_all(&args.out_dir)?;
        info!(tables = ALL_TABLES.len(), "table headers verified");
    }

    for (name, rows) in logs.row_counts() {
        println!("table {name} rows={rows}");
    }
    println!(
        "gate arrived={} processed={} backlog={}",
        logs.gate.arrived,
        logs.gate.completed.len(),
        logs.gate.backlog()
    );
    for path in paths {
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "port simulation failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
