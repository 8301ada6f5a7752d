//! # sra-subsample
//!
//! Deterministic, size-targeted subsampling of paired-end read archives.
//!
//! A FASTA or FASTQ archive is streamed once and every record whose pair
//! identifier hashes to bucket `0` is written to a FASTA file. Both mates of a
//! pair share the identifier and therefore the decision, so pairs are kept or
//! dropped as a whole. The hash only depends on the identifier, the archive
//! byte size and the requested fraction: the same input always yields the
//! same output.
//!
//! ## Usage
//!
//! ```rust
//! use sra_subsample::{FastaWriter, IdentifierPolicy, Scanner, SelectionParams, Subsampler};
//!
//! let archive = b">read42/1\nACGT\n>read17/1\nGGCC\n>read42/2\nTTAA\n>read17/2\nCCGG\n";
//! let params = SelectionParams::from_archive(archive.len() as u64, 1.0 / 3.0).unwrap();
//!
//! let mut scanner = Scanner::new(&archive[..]);
//! let mut writer = FastaWriter::new(Vec::new());
//! let stats = Subsampler::new(params, IdentifierPolicy::Drop)
//!     .run(&mut scanner, &mut writer)
//!     .unwrap();
//!
//! assert_eq!(stats.records_kept, 2);
//! assert_eq!(writer.into_inner(), b">read42/1\nACGT\n>read42/2\nTTAA\n");
//! ```

mod error;
mod header;
mod policy;
pub mod prelude;
pub mod scanner;
pub mod selector;
mod subsample;
mod writer;

pub use error::{ConfigError, Error, ReadError, Result, SelectError};
pub use header::{parse_header, parse_header_with_default, Mate, ReadName};
pub use policy::IdentifierPolicy;
pub use scanner::{Archive, RefRecord, Scanner};
pub use selector::{select, SelectionParams};
pub use subsample::{
    subsample_file, SubsampleConfig, SubsampleConfigBuilder, SubsampleStats, Subsampler,
};
pub use writer::{FastaWriter, RecordSink};
