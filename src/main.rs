use anyhow::Context;
use log::{debug, info};
use std::{
    collections::BTreeMap,
    io::Read,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};
use time_interval::{logger, ConverterRegistry, TimeInterval};

#[derive(clap::Parser)]
struct CliArgs {
    /// Log parsing details (overridden by TIME_INTERVAL_LOG)
    #[clap(long, short)]
    verbose: bool,
    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Parse each token into a duration
    Parse {
        #[clap(required = true)]
        tokens: Vec<String>,
    },
    /// Read a JSON object of interval strings, `-` for stdin
    Read { path: PathBuf },
    /// Bind KEY=VALUE settings through the converter registry
    Bind {
        #[clap(required = true)]
        settings: Vec<Setting>,
    },
}

#[derive(Debug, Clone)]
struct Setting {
    key: String,
    value: String,
}

impl FromStr for Setting {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (key, value) = s
            .split_once('=')
            .with_context(|| format!("Expected KEY=VALUE, got {s:?}"))?;
        Ok(Self {
            key: key.trim().to_owned(),
            value: value.to_owned(),
        })
    }
}

fn print_interval(name: &str, duration: Duration) {
    println!("{name} => {duration:?} ({} ms)", duration.as_millis());
}

fn read_intervals(path: &Path) -> anyhow::Result<BTreeMap<String, TimeInterval>> {
    let mut json = String::new();
    if path.to_str() == Some("-") {
        std::io::stdin()
            .lock()
            .read_to_string(&mut json)
            .context("Failed to read stdin")?;
    } else {
        json = std::fs::read_to_string(path).context("Failed to open intervals file")?;
    }
    serde_json::from_str(&json).context("Failed to parse intervals")
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    match args.command {
        Command::Parse { tokens } => {
            for token in &tokens {
                let duration = TimeInterval::parse(token)
                    .with_context(|| format!("Failed to parse {token:?}"))?;
                print_interval(token, duration);
            }
        }
        Command::Read { path } => {
            debug!("Reading intervals from {path:?}");
            let intervals = read_intervals(&path)?;
            info!("Read {} intervals", intervals.len());
            for (name, interval) in intervals {
                print_interval(&name, interval.into());
            }
        }
        Command::Bind { settings } => {
            let registry = ConverterRegistry::with_defaults();
            let mut bound = BTreeMap::new();
            for Setting { key, value } in settings {
                let interval: TimeInterval = registry
                    .convert(&value)
                    .with_context(|| format!("Failed to bind {key}={value:?}"))?;
                bound.insert(key, interval.to_duration());
            }
            for (key, duration) in bound {
                print_interval(&key, duration);
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args: CliArgs = clap::Parser::parse();
    logger::init(args.verbose);
    run(args)
}
