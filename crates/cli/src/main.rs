mod config;

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid25::{Uuid25, Uuid25Result};

use crate::config::{CliConfig, DecodeFormat, DECODE_FORMAT_ENV};

#[derive(Parser)]
#[command(name = "u25")]
#[command(about = "Convert UUIDs to and from the 25-character base-36 UUID25 form")]
struct Cli {
    /// Output layout for decoded UUIDs (overrides UUID25_DECODE_FORMAT)
    #[arg(long, value_enum, global = true)]
    format: Option<DecodeFormat>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert hyphenated UUIDs to UUID25
    Encode {
        /// Hyphenated UUIDs (read from stdin, one per line, when omitted)
        values: Vec<String>,
    },
    /// Convert UUID25 strings to UUIDs
    Decode {
        /// UUID25 strings (read from stdin, one per line, when omitted)
        values: Vec<String>,
    },
    /// Accept any layout and print UUID25, hex and hyphenated forms, tab-separated
    Convert {
        /// UUIDs in any layout (read from stdin, one per line, when omitted)
        values: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operation {
    Encode,
    Decode,
    Convert,
}

impl Operation {
    fn apply(self, input: &str, config: &CliConfig) -> Uuid25Result<String> {
        match self {
            Operation::Encode => uuid25::encode(input),
            Operation::Decode => match config.decode_format() {
                DecodeFormat::Hyphenated => uuid25::decode(input),
                DecodeFormat::Hex => Uuid25::parse_uuid25(input).map(|id| id.to_hex()),
            },
            Operation::Convert => {
                let id = Uuid25::parse(input)?;
                Ok(format!("{}\t{}\t{}", id, id.to_hex(), id.to_hyphenated()))
            }
        }
    }
}

/// Outcome of processing a batch of values.
#[derive(Debug, Default, PartialEq, Eq)]
struct Summary {
    processed: usize,
    failed: usize,
}

/// Applies `op` to every non-blank value, writing results to `out` and failures to `err`.
fn process<I, S>(
    op: Operation,
    values: I,
    config: &CliConfig,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<Summary>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut summary = Summary::default();
    for value in values {
        let input = value.as_ref().trim();
        if input.is_empty() {
            continue;
        }
        summary.processed += 1;
        match op.apply(input, config) {
            Ok(output) => writeln!(out, "{}", output)?,
            Err(e) => {
                summary.failed += 1;
                writeln!(err, "{}: {}", input, e)?;
            }
        }
    }
    Ok(summary)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("u25=info".parse()?)
                .add_directive("uuid25=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = CliConfig::resolve(cli.format, std::env::var(DECODE_FORMAT_ENV).ok())?;
    tracing::debug!(decode_format = %config.decode_format(), "resolved configuration");

    let (op, values) = match cli.command {
        Some(Commands::Encode { values }) => (Operation::Encode, values),
        Some(Commands::Decode { values }) => (Operation::Decode, values),
        Some(Commands::Convert { values }) => (Operation::Convert, values),
        None => {
            println!("Use 'u25 --help' for commands");
            return Ok(());
        }
    };

    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    let summary = if values.is_empty() {
        let lines = io::stdin().lock().lines().collect::<io::Result<Vec<_>>>()?;
        process(op, lines, &config, &mut out, &mut err)?
    } else {
        process(op, values, &config, &mut out, &mut err)?
    };
    out.flush()?;

    tracing::debug!(
        processed = summary.processed,
        failed = summary.failed,
        "finished"
    );
    if summary.failed > 0 {
        anyhow::bail!(
            "{} of {} values could not be converted",
            summary.failed,
            summary.processed
        );
    }

    Ok(())
}
