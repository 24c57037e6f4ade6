use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use sustainability_index::storage::OutputFormat;
use sustainability_index::{PipelineConfig, Sources, pipeline, stats};

#[derive(Parser, Debug)]
#[command(
    name = "susidx",
    version,
    about = "Merge country indicator datasets into a composite sustainability score"
)]
struct Cli {
    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the index from the source files and save it.
    Build(BuildArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Directory holding co2.csv, air_pollution.csv, wdi_renewables.csv, ...
    #[arg(long, default_value = "data", conflicts_with = "sources")]
    data_dir: PathBuf,
    /// JSON file mapping each indicator to its source path.
    #[arg(long)]
    sources: Option<PathBuf>,
    /// Where to write the index.
    #[arg(long)]
    out: PathBuf,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Also export the normalized (0-1) indicator columns.
    #[arg(long, default_value_t = false)]
    with_normalized: bool,
    /// Print per-column statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Build(args) => cmd_build(args),
    }
}

fn cmd_build(args: BuildArgs) -> Result<()> {
    let sources = match &args.sources {
        Some(path) => Sources::from_json_file(path)
            .with_context(|| format!("loading sources from {}", path.display()))?,
        None => Sources::in_dir(&args.data_dir),
    };
    let format = match args.format {
        Some(OutFormat::Csv) => OutputFormat::Csv,
        Some(OutFormat::Json) => OutputFormat::Json,
        None => OutputFormat::from_path(&args.out),
    };
    let config = PipelineConfig {
        sources,
        output: args.out,
        format,
        include_normalized: args.with_normalized,
    };

    let records = pipeline::run(&config).context("building sustainability index")?;
    eprintln!("Saved {} rows to {}", records.len(), config.output.display());

    if args.stats {
        for s in stats::column_summary(&records) {
            println!(
                "{:<20} count={} missing={}  min={} max={} mean={} median={}",
                s.column,
                s.count,
                s.missing,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median)
            );
        }
    }

    Ok(())
}
