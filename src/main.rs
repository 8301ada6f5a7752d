use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use sra_subsample::prelude::*;

#[derive(Parser)]
#[command(name = "sra-subsample")]
#[command(
    about = "Deterministically subsample paired-end reads from a FASTA/FASTQ archive into FASTA",
    long_about = "Keeps a size-targeted subset of read pairs. Both mates of a pair are always \
                  kept or dropped together, and the same archive and fraction always select \
                  the same reads."
)]
#[command(version)]
struct Cli {
    /// Input FASTA or FASTQ archive
    #[arg(value_name = "ARCHIVE")]
    input: PathBuf,

    /// Output FASTA file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Fraction of read pairs to keep, within (0, 1]
    #[arg(short, long, value_name = "FLOAT")]
    fraction: f64,

    /// Mate number given to headers without a /1 or /2 suffix
    #[arg(short = 'm', long, value_name = "1|2")]
    assume_mate: Option<Mate>,

    /// Abort on identifiers without digits instead of dropping them
    #[arg(long)]
    strict: bool,

    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    let policy = if cli.strict {
        IdentifierPolicy::Fail
    } else {
        IdentifierPolicy::Drop
    };
    let mut builder = SubsampleConfigBuilder::new()
        .fraction(cli.fraction)
        .policy(policy);
    if let Some(mate) = cli.assume_mate {
        builder = builder.assumed_mate(mate);
    }
    let config = builder.build()?;

    let stats = subsample_file(&cli.input, &cli.output, &config)?;
    if stats.malformed_headers > 0 {
        log::warn!(
            "{} records had no mate number and were skipped",
            stats.malformed_headers
        );
    }
    if stats.degenerate_identifiers > 0 {
        log::warn!(
            "{} records had no digits in their identifier and were skipped",
            stats.degenerate_identifiers
        );
    }
    Ok(())
}
