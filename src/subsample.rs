//! Scanner → selector → writer pipeline
//!
//! A record is written only if its header yields a mate number and its pair
//! identifier yields selection key `0`. Records without a mate suffix are
//! dropped silently. Identifiers without digits are handled by the
//! configured [`IdentifierPolicy`].

use std::io::BufRead;
use std::path::Path;

use log::{debug, info};

use crate::error::{ConfigError, Result};
use crate::header::Mate;
use crate::policy::IdentifierPolicy;
use crate::scanner::Scanner;
use crate::selector::{validate_fraction, SelectionParams};
use crate::writer::{FastaWriter, RecordSink};

#[derive(Debug, Clone, Copy, Default)]
pub struct SubsampleConfigBuilder {
    fraction: Option<f64>,
    policy: Option<IdentifierPolicy>,
    assumed_mate: Option<Mate>,
}
impl SubsampleConfigBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn fraction(mut self, fraction: f64) -> Self {
        self.fraction = Some(fraction);
        self
    }
    #[must_use]
    pub fn policy(mut self, policy: IdentifierPolicy) -> Self {
        self.policy = Some(policy);
        self
    }
    #[must_use]
    pub fn assumed_mate(mut self, mate: Mate) -> Self {
        self.assumed_mate = Some(mate);
        self
    }
    pub fn build(self) -> Result<SubsampleConfig> {
        let Some(fraction) = self.fraction else {
            return Err(ConfigError::MissingFraction.into());
        };
        validate_fraction(fraction)?;
        Ok(SubsampleConfig {
            fraction,
            policy: self.policy.unwrap_or_default(),
            assumed_mate: self.assumed_mate,
        })
    }
}

/// Validated run configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubsampleConfig {
    /// Fraction of pairs to keep, within `(0, 1]`
    fraction: f64,

    /// Handling of identifiers without digits
    policy: IdentifierPolicy,

    /// Mate given to headers without a mate suffix
    assumed_mate: Option<Mate>,
}
impl SubsampleConfig {
    #[must_use]
    pub fn fraction(&self) -> f64 {
        self.fraction
    }
    #[must_use]
    pub fn policy(&self) -> IdentifierPolicy {
        self.policy
    }
    #[must_use]
    pub fn assumed_mate(&self) -> Option<Mate> {
        self.assumed_mate
    }
}

/// Record counts of a subsampling run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubsampleStats {
    /// Records finalized by the scanner
    pub records_scanned: usize,
    /// Records written to the output
    pub records_kept: usize,
    /// Records whose selection key was non-zero
    pub records_dropped: usize,
    /// Records whose header carried no mate number
    pub malformed_headers: usize,
    /// Records whose identifier had no digits
    pub degenerate_identifiers: usize,
}

/// Applies the keep/drop decision to every scanned record
#[derive(Debug, Clone, Copy)]
pub struct Subsampler {
    params: SelectionParams,
    policy: IdentifierPolicy,
}
impl Subsampler {
    #[must_use]
    pub fn new(params: SelectionParams, policy: IdentifierPolicy) -> Self {
        Self { params, policy }
    }

    /// Streams every record of the scanner into the sink
    ///
    /// The sink is flushed once the scanner is exhausted.
    pub fn run<R, S>(&self, scanner: &mut Scanner<R>, mut sink: S) -> Result<SubsampleStats>
    where
        R: BufRead,
        S: RecordSink,
    {
        let mut stats = SubsampleStats::default();
        while let Some(record) = scanner.next_record() {
            let record = record?;
            stats.records_scanned += 1;

            let Some(name) = record.name() else {
                debug!(
                    "Skipping header without mate number: {}",
                    String::from_utf8_lossy(record.header())
                );
                stats.malformed_headers += 1;
                continue;
            };

            match self.params.select(name.identifier) {
                Ok(0) => {
                    sink.write_record(name.identifier, name.mate, record.sequence())?;
                    stats.records_kept += 1;
                }
                Ok(_) => stats.records_dropped += 1,
                Err(err) => {
                    stats.degenerate_identifiers += 1;
                    self.policy.handle(err)?;
                }
            }
        }
        sink.flush()?;
        Ok(stats)
    }
}

/// Subsamples an archive file into a FASTA file
///
/// The selection constants are derived from the byte size of `input`. The
/// configuration and both paths are validated before any file is touched.
///
/// # Arguments
///
/// * `input` - FASTA or FASTQ archive
/// * `output` - FASTA file to create (truncated if it exists)
/// * `config` - Validated run configuration
pub fn subsample_file<P, Q>(
    input: P,
    output: Q,
    config: &SubsampleConfig,
) -> Result<SubsampleStats>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());
    if input.as_os_str().is_empty() {
        return Err(ConfigError::MissingInput.into());
    }
    if output.as_os_str().is_empty() {
        return Err(ConfigError::MissingOutput.into());
    }

    let mut scanner = Scanner::from_path(input)?.with_assumed_mate(config.assumed_mate());
    let params = SelectionParams::from_archive(scanner.archive_size(), config.fraction())?;
    info!(
        "Archive {} is {} bytes (multiplier {}, bucket count {})",
        input.display(),
        scanner.archive_size(),
        params.multiplier(),
        params.bucket_count()
    );

    let mut writer = FastaWriter::create(output)?;
    let stats = Subsampler::new(params, config.policy()).run(&mut scanner, &mut writer)?;
    info!(
        "Kept {} of {} records ({} bytes scanned) into {}",
        stats.records_kept,
        stats.records_scanned,
        scanner.bytes_consumed(),
        output.display()
    );
    Ok(stats)
}
