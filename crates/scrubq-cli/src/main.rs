#![forbid(unsafe_code)]

use anyhow::{Context, Result, bail};
use scrubq_status::{FlagsStrategy, FlagsText, ScrubUnit, UnitConfig};
use scrubq_types::ScrubTime;
use std::env;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "SCRUBQ_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Show,
    Pick,
    Flags,
}

impl Command {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "show" => Some(Self::Show),
            "pick" => Some(Self::Pick),
            "flags" => Some(Self::Flags),
            _ => None,
        }
    }
}

/// Options shared by every command that reads a unit file.
#[derive(Debug, Clone, Copy)]
struct ShowOptions {
    now: ScrubTime,
    strategy: FlagsStrategy,
}

fn main() {
    init_tracing();
    if let Err(error) = run() {
        eprintln!("error: {error:#}");
        std::process::exit(1);
    }
}

/// Log to stderr so the status line on stdout stays exact.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let mut args = env::args().skip(1);
    let Some(command) = args.next() else {
        print_usage();
        return Ok(());
    };
    if matches!(command.as_str(), "-h" | "--help" | "help") {
        print_usage();
        return Ok(());
    }

    let Some(cmd) = Command::parse(&command) else {
        bail!("unknown command: {command}");
    };
    let Some(path) = args.next() else {
        bail!("{command} requires a unit file argument");
    };
    let remaining: Vec<String> = args.collect();
    let opts = parse_options(&remaining)?;
    let unit = load_unit(Path::new(&path), opts.now)?;

    match cmd {
        Command::Show => {
            println!("{}", unit.show(opts.now, opts.strategy));
            Ok(())
        }
        Command::Pick => {
            println!("{}", unit.job().best_at(opts.now));
            println!("{}", unit.job().best_overall());
            Ok(())
        }
        Command::Flags => {
            println!("{}", opts.strategy.flags_text(&unit));
            Ok(())
        }
    }
}

fn parse_options(args: &[String]) -> Result<ShowOptions> {
    let mut opts = ShowOptions {
        now: ScrubTime::now(),
        strategy: FlagsStrategy::Recompute,
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--now" => {
                let Some(value) = iter.next() else {
                    bail!("--now requires a value in seconds");
                };
                let secs: u64 = value
                    .parse()
                    .with_context(|| format!("invalid --now value: {value}"))?;
                opts.now = ScrubTime::from_secs(secs);
            }
            "--cached" => opts.strategy = FlagsStrategy::Cached,
            "--strategy" => {
                let Some(value) = iter.next() else {
                    bail!("--strategy requires recompute|cached");
                };
                opts.strategy = value.parse().map_err(anyhow::Error::msg)?;
            }
            other => bail!("unexpected argument: {other}"),
        }
    }
    Ok(opts)
}

fn load_unit(path: &Path, now: ScrubTime) -> Result<ScrubUnit> {
    let config = UnitConfig::load(path)
        .with_context(|| format!("failed to read unit file {}", path.display()))?;
    let unit = config
        .build(now)
        .with_context(|| format!("invalid unit file {}", path.display()))?;
    info!(unit = %unit.id(), job = unit.job().name(), %now, "unit loaded");
    Ok(unit)
}

fn print_usage() {
    println!("scrubq: scrub target selection and status");
    println!();
    println!("USAGE:");
    println!("  scrubq show <unit.json> [--now <secs>] [--cached | --strategy <recompute|cached>]");
    println!("  scrubq pick <unit.json> [--now <secs>]");
    println!("  scrubq flags <unit.json> [--cached]");
    println!();
    println!("Set {LOG_ENV} (or RUST_LOG) to control diagnostics on stderr.");
}
