use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Parser};
use log::{error, info};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use umaf_config::Config;
use umaf_engine::batch::{self, BatchOptions, scan_inputs};
use umaf_engine::cache::IncrementalCache;
use umaf_engine::io::read_source;
use umaf_engine::snapshot::outline;
use umaf_engine::{Engine, OutputFormat};

mod watch;

/// Name given to stdin input; its extension routes it to the markdown parser.
const STDIN_NAME: &str = "stdin.md";
const STDIN_ARG: &str = "-";

#[derive(Parser, Debug)]
#[command(name = "umaf", version)]
#[command(about = "Turn documents into structured umaf envelopes")]
#[command(group(ArgGroup::new("source").args(["input", "input_dir"])))]
struct Args {
    /// Single document to transform; `-` (the default without --input-dir)
    /// reads markdown from stdin
    #[arg(long, value_name = "FILE|-")]
    input: Option<String>,

    /// Directory of documents to transform in one batch
    #[arg(long, value_name = "DIR")]
    input_dir: Option<PathBuf>,

    /// Where batch outputs are written
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Skip unchanged files using the cache index in the output directory
    #[arg(long)]
    incremental: bool,

    /// Emit the JSON envelope (default)
    #[arg(long, conflicts_with_all = ["normalized", "dump_structure"])]
    json: bool,

    /// Emit canonical markdown instead of an envelope
    #[arg(long, conflicts_with = "dump_structure")]
    normalized: bool,

    /// Print an outline of the span/block tree
    #[arg(long, conflicts_with = "input_dir")]
    dump_structure: bool,

    /// Re-run the batch whenever inputs change
    #[arg(long, requires = "input_dir")]
    watch: bool,

    /// Config file to use instead of ~/.config/umaf/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log per-file decisions
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Emit {
    Json,
    Normalized,
    Structure,
}

impl Args {
    /// The single document to transform, or `None` in batch mode.
    fn single_input(&self) -> Option<&str> {
        match (&self.input, &self.input_dir) {
            (Some(input), _) => Some(input.as_str()),
            (None, None) => Some(STDIN_ARG),
            (None, Some(_)) => None,
        }
    }

    fn emit(&self) -> Emit {
        if self.normalized {
            Emit::Normalized
        } else if self.dump_structure {
            Emit::Structure
        } else {
            Emit::Json
        }
    }

    fn output_format(&self) -> OutputFormat {
        match self.emit() {
            Emit::Normalized => OutputFormat::Normalized,
            Emit::Json | Emit::Structure => OutputFormat::Envelope,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

/// Returns `Ok(false)` when some document failed but the run itself completed.
fn run(args: &Args) -> Result<bool> {
    let config = Config::load_or_default(args.config.as_deref()).context("Failed to load config")?;

    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure worker threads")?;
    }

    let engine = Engine::new();
    if let Some(input) = args.single_input() {
        let mut stdout = std::io::stdout().lock();
        return transform_single(&engine, input, args.emit(), &mut stdout);
    }

    let Some(input_dir) = &args.input_dir else {
        bail!("--input-dir is required in batch mode");
    };
    let Some(output_dir) = args.output_dir.clone().or_else(|| config.output_dir.clone()) else {
        bail!("--output-dir is required with --input-dir (or set output_dir in the config file)");
    };
    let incremental = args.incremental || config.incremental;
    let run_batch = || {
        transform_dir(
            &engine,
            input_dir,
            &output_dir,
            args.output_format(),
            &config,
            incremental,
        )
    };

    let success = run_batch()?;
    if args.watch {
        watch::watch(input_dir, &output_dir, &config, run_batch)?;
    }
    Ok(success)
}

fn transform_single(engine: &Engine, input: &str, emit: Emit, out: &mut impl Write) -> Result<bool> {
    let (path, bytes) = if input == STDIN_ARG {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read stdin")?;
        (PathBuf::from(STDIN_NAME), bytes)
    } else {
        let path = PathBuf::from(input);
        let bytes = read_source(&path).with_context(|| format!("Failed to read {input}"))?;
        (path, bytes)
    };

    write_single(engine, &path, &bytes, emit, out)?;
    Ok(true)
}

fn write_single(
    engine: &Engine,
    path: &Path,
    bytes: &[u8],
    emit: Emit,
    out: &mut impl Write,
) -> Result<()> {
    let text = match emit {
        Emit::Json => engine.envelope(path, bytes)?.to_json_pretty()?,
        Emit::Normalized => engine.normalized(path, bytes)?,
        Emit::Structure => outline(&engine.envelope(path, bytes)?).join("\n"),
    };
    writeln!(out, "{text}")?;
    Ok(())
}

fn transform_dir(
    engine: &Engine,
    input_dir: &Path,
    output_dir: &Path,
    format: OutputFormat,
    config: &Config,
    incremental: bool,
) -> Result<bool> {
    let mut inputs = scan_inputs(input_dir, &config.extensions)
        .with_context(|| format!("Failed to scan {}", input_dir.display()))?;
    // Outputs written inside the input tree must not be picked up as inputs.
    inputs.retain(|path| !path.starts_with(output_dir));
    info!("found {} documents in {}", inputs.len(), input_dir.display());

    let cache = incremental.then(|| IncrementalCache::in_output_dir(output_dir));
    let options = BatchOptions {
        input_dir: input_dir.to_path_buf(),
        output_dir: output_dir.to_path_buf(),
        format,
    };
    let report = batch::run(engine, &inputs, &options, cache.as_ref());

    for (path, message) in &report.failures {
        error!("{}: {message}", path.display());
    }
    Ok(report.is_success())
}
