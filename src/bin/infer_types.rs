//! `infer-types`: infer and report column types for a delimited text file.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use rust_type_inference::inference::{InferenceOptions, InferredDataSet};
use rust_type_inference::ingestion::{
    CompositeObserver, FileObserver, LoadObserver, LoadOptions, TracingObserver,
};
use rust_type_inference::report::{render_preview, render_verdicts};
use rust_type_inference::InferenceResult;

#[derive(Parser)]
#[command(
    name = "infer-types",
    version,
    about = "Infer column types of a delimited text file and convert the columns to match"
)]
struct Cli {
    /// Delimited text file (.csv, .tsv/.tab, .psv, .txt).
    #[arg(value_name = "FILE")]
    path: PathBuf,

    /// Field delimiter (a single ASCII character, or `tab`). Overrides the extension.
    #[arg(short, long, value_parser = parse_delimiter)]
    delimiter: Option<u8>,

    /// JSON file with inference options; flags below override its values.
    #[arg(long, value_name = "PATH")]
    options: Option<PathBuf>,

    /// Numeric noise threshold multiplier (> 1).
    #[arg(long)]
    multiplier: Option<f64>,

    /// Low-cardinality divisor for the categorical classifier (> 0).
    #[arg(long)]
    categorical_divisor: Option<f64>,

    /// Convert boolean columns to booleans, ahead of every other representation.
    #[arg(long)]
    prefer_boolean: bool,

    /// Classify columns on one thread.
    #[arg(long)]
    sequential: bool,

    /// Keep surrounding whitespace in cells.
    #[arg(long)]
    no_trim: bool,

    /// Print verdicts as JSON instead of a table.
    #[arg(long)]
    json: bool,

    /// Print the first N converted rows.
    #[arg(long, value_name = "N")]
    preview: Option<usize>,

    /// Append load events to this file.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn parse_delimiter(s: &str) -> Result<u8, String> {
    match s {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!("expected a single ASCII character or `tab`, got '{s}'")),
    }
}

fn init_logging(cli: &Cli) {
    let level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };
    let filter = if cli.quiet || cli.verbose > 0 {
        EnvFilter::new(level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn inference_options(cli: &Cli) -> InferenceResult<InferenceOptions> {
    let mut opts = match &cli.options {
        Some(path) => InferenceOptions::from_json_path(path)?,
        None => InferenceOptions::default(),
    };
    if let Some(m) = cli.multiplier {
        opts.threshold_multiplier = m;
    }
    if let Some(d) = cli.categorical_divisor {
        opts.categorical_divisor = d;
    }
    opts.prefer_boolean |= cli.prefer_boolean;
    if cli.sequential {
        opts.parallel = false;
    }
    opts.validate()?;
    Ok(opts)
}

fn load_options(cli: &Cli) -> LoadOptions {
    let mut observers: Vec<Arc<dyn LoadObserver>> = vec![Arc::new(TracingObserver)];
    if let Some(path) = &cli.log_file {
        observers.push(Arc::new(FileObserver::new(path)));
    }
    LoadOptions {
        delimiter: cli.delimiter,
        trim: !cli.no_trim,
        observer: Some(Arc::new(CompositeObserver::new(observers))),
        ..Default::default()
    }
}

fn run(cli: &Cli) -> InferenceResult<()> {
    let options = inference_options(cli)?;
    let out = InferredDataSet::from_path(&cli.path, &load_options(cli), &options)?;

    if cli.json {
        println!("{}", out.inferences().to_json()?);
    } else {
        println!("{}", render_verdicts(out.inferences()));
        println!();
        for stats in out.conversion_stats() {
            println!(
                "{}: {} -> {} ({} cells nulled)",
                stats.column, stats.from, stats.to, stats.nulled
            );
        }
    }

    if let Some(limit) = cli.preview {
        println!();
        println!("{}", render_preview(out.dataset(), limit));
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
