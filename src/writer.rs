//! FASTA output for kept records
//!
//! Each kept record is written as two lines, `>identifier/mate` followed by
//! the whole sequence on one line. Sequences are never rewrapped or altered.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use auto_impl::auto_impl;

use crate::error::Result;
use crate::header::{Mate, FASTA_MARKER};

/// Destination for kept records
#[auto_impl(&mut, Box)]
pub trait RecordSink {
    /// Writes a single kept record
    fn write_record(&mut self, identifier: &[u8], mate: Mate, sequence: &[u8]) -> Result<()>;

    /// Flushes any buffered output
    fn flush(&mut self) -> Result<()>;
}

/// Two-line FASTA writer
pub struct FastaWriter<W: Write> {
    /// Inner writer
    inner: W,

    /// Number of records written
    records_written: usize,
}
impl FastaWriter<BufWriter<File>> {
    /// Creates (or truncates) the output file
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let inner = File::create(path).map(BufWriter::new)?;
        Ok(Self::new(inner))
    }
}
impl<W: Write> FastaWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            records_written: 0,
        }
    }

    #[must_use]
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}
impl<W: Write> RecordSink for FastaWriter<W> {
    fn write_record(&mut self, identifier: &[u8], mate: Mate, sequence: &[u8]) -> Result<()> {
        self.inner.write_all(&[FASTA_MARKER])?;
        self.inner.write_all(identifier)?;
        self.inner.write_all(&[b'/', mate.as_byte(), b'\n'])?;
        self.inner.write_all(sequence)?;
        self.inner.write_all(b"\n")?;
        self.records_written += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
