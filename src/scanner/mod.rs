//! # scanner
//!
//! Single-pass streaming scanner for FASTA and FASTQ archives.
//!
//! The archive format is never declared. Lines are classified by their first
//! byte ([`LineClass`]) and a FASTQ record is recognised by its `+` separator,
//! after which the quality string is consumed without classification until
//! its length covers the sequence. This keeps quality lines that happen to
//! start with `@` or `>` from being read as headers.
//!
//! Only one record is open at a time. Its header and sequence buffers are
//! reused, so memory is bounded by the longest record rather than the
//! archive.
//!
//! ## Usage
//!
//! ```rust
//! use sra_subsample::Scanner;
//!
//! let data = b"@read7/1\nACGT\n+\n@@II\n@read7/2\nTTGA\n+\nIIII\n";
//! let mut scanner = Scanner::new(&data[..]);
//!
//! while let Some(record) = scanner.next_record() {
//!     let record = record.unwrap();
//!     let name = record.name().unwrap();
//!     assert_eq!(name.identifier, b"read7");
//!     assert_eq!(record.sequence().len(), 4);
//! }
//! assert_eq!(scanner.records_scanned(), 2);
//! ```

mod archive;
mod line;
mod record;

pub use archive::Archive;
pub use line::{chomp, LineClass, QUALITY_MARKER};
pub use record::RefRecord;

use std::io::{BufRead, Cursor};
use std::path::Path;

use crate::error::Result;
use crate::header::Mate;

/// Position of the scanner relative to the record boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// No record is open (start of the archive, or after the final record)
    AwaitingHeader,
    /// A record is open and sequence lines are appended to it
    AccumulatingSequence,
    /// Quality bytes still to consume before lines are classified again
    SkippingQuality { remaining: usize },
}

/// Streaming record scanner over any buffered reader
#[derive(Debug)]
pub struct Scanner<R: BufRead> {
    /// Inner reader
    inner: R,

    /// Reusable buffer for the raw line being classified
    line: Vec<u8>,

    /// Header of the open record
    header: Vec<u8>,

    /// Header that closed the previously returned record
    ///
    /// Swapped into `header` at the start of the next call.
    pending: Vec<u8>,

    /// Whether `pending` holds a header to open
    has_pending: bool,

    /// Sequence of the open record
    sequence: Vec<u8>,

    /// Current state
    state: State,

    /// Mate assigned to headers without a mate suffix
    assumed_mate: Option<Mate>,

    /// Number of records finalized
    records_scanned: usize,

    /// Number of bytes read from the inner reader
    bytes_consumed: u64,
}
impl Scanner<Cursor<Archive>> {
    /// Opens a memory-mapped scanner over an archive file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let archive = Archive::open(path)?;
        Ok(Self::new(Cursor::new(archive)))
    }

    /// Byte size of the underlying archive
    #[must_use]
    pub fn archive_size(&self) -> u64 {
        self.inner.get_ref().size()
    }
}
impl<R: BufRead> Scanner<R> {
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: Vec::new(),
            header: Vec::new(),
            pending: Vec::new(),
            has_pending: false,
            sequence: Vec::new(),
            state: State::AwaitingHeader,
            assumed_mate: None,
            records_scanned: 0,
            bytes_consumed: 0,
        }
    }

    /// Assigns a mate number to headers that carry no mate suffix
    #[must_use]
    pub fn with_assumed_mate(mut self, mate: Option<Mate>) -> Self {
        self.assumed_mate = mate;
        self
    }

    /// Number of records finalized so far
    #[must_use]
    pub fn records_scanned(&self) -> usize {
        self.records_scanned
    }

    /// Number of bytes read so far
    #[must_use]
    pub fn bytes_consumed(&self) -> u64 {
        self.bytes_consumed
    }

    /// Opens the record whose header closed the previous one
    fn open_pending(&mut self) {
        if self.has_pending {
            std::mem::swap(&mut self.header, &mut self.pending);
            self.sequence.clear();
            self.state = State::AccumulatingSequence;
            self.has_pending = false;
        }
    }

    /// Reads the next raw line into the line buffer
    ///
    /// Returns `false` at the end of input.
    fn read_line(&mut self) -> Result<bool> {
        self.line.clear();
        let n = self.inner.read_until(b'\n', &mut self.line)?;
        self.bytes_consumed += n as u64;
        Ok(n > 0)
    }

    fn finalize(&mut self) -> RefRecord<'_> {
        self.records_scanned += 1;
        RefRecord::new(&self.header, &self.sequence, self.assumed_mate)
    }

    /// Returns the next finalized record
    ///
    /// A record is finalized when the next header is found or the input ends.
    /// Returns `None` once the input is exhausted.
    pub fn next_record(&mut self) -> Option<Result<RefRecord<'_>>> {
        self.open_pending();

        loop {
            match self.read_line() {
                Ok(true) => {}
                Ok(false) => {
                    if self.state == State::AwaitingHeader {
                        return None;
                    }
                    self.state = State::AwaitingHeader;
                    return Some(Ok(self.finalize()));
                }
                Err(e) => return Some(Err(e)),
            }

            let line = chomp(&self.line);

            if let State::SkippingQuality { remaining } = self.state {
                let remaining = remaining.saturating_sub(line.len());
                self.state = if remaining == 0 {
                    State::AccumulatingSequence
                } else {
                    State::SkippingQuality { remaining }
                };
                continue;
            }

            match (LineClass::classify(line), self.state) {
                (LineClass::Header, State::AwaitingHeader) => {
                    self.header.clear();
                    self.header.extend_from_slice(line);
                    self.sequence.clear();
                    self.state = State::AccumulatingSequence;
                }
                (LineClass::Header, _) => {
                    self.pending.clear();
                    self.pending.extend_from_slice(line);
                    self.has_pending = true;
                    return Some(Ok(self.finalize()));
                }
                (LineClass::QualitySeparator, State::AccumulatingSequence) => {
                    if !self.sequence.is_empty() {
                        self.state = State::SkippingQuality {
                            remaining: self.sequence.len(),
                        };
                    }
                }
                (LineClass::Sequence, State::AccumulatingSequence) => {
                    self.sequence.extend_from_slice(line);
                }
                // Lines before the first header carry no record
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::Mate;

    type Collected = Vec<(Vec<u8>, Vec<u8>)>;

    fn collect(data: &[u8]) -> Result<Collected> {
        let mut scanner = Scanner::new(data);
        let mut records = Vec::new();
        while let Some(record) = scanner.next_record() {
            let record = record?;
            records.push((record.header().to_vec(), record.sequence().to_vec()));
        }
        Ok(records)
    }

    fn owned(pairs: &[(&str, &str)]) -> Collected {
        pairs
            .iter()
            .map(|(h, s)| (h.as_bytes().to_vec(), s.as_bytes().to_vec()))
            .collect()
    }

    #[test]
    fn test_fasta_multiline() -> Result<()> {
        let records = collect(b">r1/1\nAC\nGT\n>r1/2\nTT\nGG\nCC\n")?;
        assert_eq!(records, owned(&[(">r1/1", "ACGT"), (">r1/2", "TTGGCC")]));
        Ok(())
    }

    #[test]
    fn test_last_record_without_newline() -> Result<()> {
        let records = collect(b">a/1\nAC\n>a/2\nGT")?;
        assert_eq!(records, owned(&[(">a/1", "AC"), (">a/2", "GT")]));
        Ok(())
    }

    #[test]
    fn test_fastq_quality_resembling_header() -> Result<()> {
        let data = b"@r1/1\nACGT\n+\n@@II\n@r1/2\nTTTT\n+r1/2\n>III\n";
        let records = collect(data)?;
        assert_eq!(records, owned(&[("@r1/1", "ACGT"), ("@r1/2", "TTTT")]));
        Ok(())
    }

    #[test]
    fn test_fastq_multiline_quality() -> Result<()> {
        // quality segments 3 + 3 cover the 6 bases exactly
        let data = b"@r/1\nACG\nTAC\n+\n@II\n>II\n@r/2\nAA\n+\nII\n";
        let records = collect(data)?;
        assert_eq!(records, owned(&[("@r/1", "ACGTAC"), ("@r/2", "AA")]));
        Ok(())
    }

    #[test]
    fn test_fastq_quality_plus_line() -> Result<()> {
        let data = b"@r/1\nAC\n+\n+I\n@r/2\nGG\n+\nII\n";
        let records = collect(data)?;
        assert_eq!(records, owned(&[("@r/1", "AC"), ("@r/2", "GG")]));
        Ok(())
    }

    #[test]
    fn test_crlf_lines() -> Result<()> {
        let records = collect(b">a/1\r\nACGT\r\n@b/2\r\nGG\r\n+\r\nII\r\n")?;
        assert_eq!(records, owned(&[(">a/1", "ACGT"), ("@b/2", "GG")]));
        Ok(())
    }

    #[test]
    fn test_leading_lines_ignored() -> Result<()> {
        let records = collect(b"ACGT\n+\n>a/1\nGG\n")?;
        assert_eq!(records, owned(&[(">a/1", "GG")]));
        Ok(())
    }

    #[test]
    fn test_empty_input() -> Result<()> {
        assert!(collect(b"")?.is_empty());
        assert!(collect(b"\n\n")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_header_without_sequence() -> Result<()> {
        let records = collect(b">a/1\n>b/1\nAC\n")?;
        assert_eq!(records, owned(&[(">a/1", ""), (">b/1", "AC")]));
        Ok(())
    }

    #[test]
    fn test_empty_fastq_record() -> Result<()> {
        let records = collect(b"@a/1\n\n+\n\n@b/1\nAC\n+\nII\n")?;
        assert_eq!(records, owned(&[("@a/1", ""), ("@b/1", "AC")]));
        Ok(())
    }

    #[test]
    fn test_eof_inside_quality() -> Result<()> {
        let records = collect(b"@a/1\nACGT\n+\nII")?;
        assert_eq!(records, owned(&[("@a/1", "ACGT")]));
        Ok(())
    }

    #[test]
    fn test_counters() -> Result<()> {
        let data = b">a/1\nAC\n>a/2\nGT\n";
        let mut scanner = Scanner::new(&data[..]);
        while let Some(record) = scanner.next_record() {
            record?;
        }
        assert_eq!(scanner.records_scanned(), 2);
        assert_eq!(scanner.bytes_consumed(), data.len() as u64);
        assert!(scanner.next_record().is_none());
        Ok(())
    }

    #[test]
    fn test_assumed_mate() -> Result<()> {
        let data = b">plain42\nAC\n>tagged42/1\nGT\n";
        let mut scanner = Scanner::new(&data[..]).with_assumed_mate(Some(Mate::Two));
        let mut names = Vec::new();
        while let Some(record) = scanner.next_record() {
            let record = record?;
            let name = record.name().unwrap();
            names.push((name.identifier.to_vec(), name.mate));
        }
        assert_eq!(
            names,
            vec![
                (b"plain42".to_vec(), Mate::Two),
                (b"tagged42".to_vec(), Mate::One)
            ]
        );
        Ok(())
    }

    #[test]
    fn test_from_path() -> anyhow::Result<()> {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b"@x1/1\nACGT\n+\nIIII\n")?;
        file.flush()?;

        let mut scanner = Scanner::from_path(file.path())?;
        assert_eq!(scanner.archive_size(), 18);
        let record = scanner.next_record().unwrap()?;
        assert_eq!(record.sequence(), b"ACGT");
        assert!(scanner.next_record().is_none());
        Ok(())
    }
}
