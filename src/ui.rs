use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;

use crate::cache::config::InclusionPolicy;
use crate::error::SimResult;
use crate::sim::config::{parse_legacy, parse_toml, SimConfig, SimSetup};
use crate::sim::perf_log::{write_summary, RunSummary};
use crate::sim::top::TraceRunner;

#[derive(Parser, Debug)]
#[command(version, about = "Two-level (L1/L2) cache hierarchy simulator")]
pub struct CacheSimArgs {
    #[arg(help = "Path to cache config (.toml, or the plain L1/L2 text format)")]
    pub config_path: PathBuf,
    #[arg(help = "Path to memory access trace (`R|W <hex address>` per line)")]
    pub trace_path: PathBuf,
    #[arg(long, short, help = "Override output path for per-access results")]
    pub output: Option<PathBuf>,
    #[arg(long, help = "Override inclusion policy (exclusive, non-inclusive)")]
    pub policy: Option<InclusionPolicy>,
    #[arg(long, help = "Write a JSON run summary to this path")]
    pub stats: Option<PathBuf>,
    #[arg(long, help = "Log level (0:warn, 1:info, 2:debug, 3:trace)")]
    pub log: Option<u64>,
}

/// Builds the setup from config text. TOML is used when `is_toml`;
/// otherwise the plain format with `[sim]` defaults.
/// If `cli_args` is given, its options override the file.
pub fn make_setup(
    text: &str,
    is_toml: bool,
    cli_args: Option<&CacheSimArgs>,
) -> SimResult<SimSetup> {
    let mut setup = if is_toml {
        parse_toml(text)?
    } else {
        SimSetup {
            sim: SimConfig::default(),
            hierarchy: parse_legacy(text)?,
        }
    };

    // override config file with CLI args
    if let Some(args) = cli_args {
        setup.sim.policy = args.policy.unwrap_or(setup.sim.policy);
        setup.sim.log_level = args.log.unwrap_or(setup.sim.log_level);
        if let Some(output) = &args.output {
            setup.sim.output = output.clone();
        }
        if let Some(stats) = &args.stats {
            setup.sim.stats = Some(stats.clone());
        }
    }
    Ok(setup)
}

fn is_toml_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}

pub fn load_setup(args: &CacheSimArgs) -> anyhow::Result<SimSetup> {
    let text = fs::read_to_string(&args.config_path)
        .with_context(|| format!("failed to read config file {}", args.config_path.display()))?;
    let setup = make_setup(&text, is_toml_path(&args.config_path), Some(args))
        .with_context(|| format!("bad config file {}", args.config_path.display()))?;
    Ok(setup)
}

/// Runs a whole trace file according to `args` and returns the summary.
///
/// A malformed trace line still leaves every earlier result in the output
/// file before the error is returned.
pub fn run(args: &CacheSimArgs) -> anyhow::Result<RunSummary> {
    let setup = load_setup(args)?;
    crate::sim::log::init(setup.sim.log_level);

    let mut runner = TraceRunner::new(&setup.hierarchy, setup.sim.policy)?;

    let trace = File::open(&args.trace_path)
        .with_context(|| format!("failed to open trace {}", args.trace_path.display()))?;
    let output = File::create(&setup.sim.output)
        .with_context(|| format!("failed to create output {}", setup.sim.output.display()))?;

    let outcome = runner.run_to_writer(BufReader::new(trace), BufWriter::new(output));

    let summary = RunSummary::new(
        Some(args.trace_path.clone()),
        setup.sim.policy,
        &setup.hierarchy,
        runner.processed(),
        &runner.stats(),
    );
    summary.log();
    if let Some(path) = &setup.sim.stats {
        write_summary(path, &summary)
            .with_context(|| format!("failed to write run summary {}", path.display()))?;
    }

    outcome.with_context(|| {
        format!(
            "trace {} stopped after {} accesses",
            args.trace_path.display(),
            runner.processed()
        )
    })?;
    Ok(summary)
}
