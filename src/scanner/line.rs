use crate::header::{FASTA_MARKER, FASTQ_MARKER};

/// Marker byte of the FASTQ quality separator
pub const QUALITY_MARKER: u8 = b'+';

/// Classification of a single archive line by its leading byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// `>` or `@`: opens a new record
    Header,
    /// `+`: precedes the FASTQ quality string
    QualitySeparator,
    /// Anything else
    Sequence,
}
impl LineClass {
    #[must_use]
    pub fn classify(line: &[u8]) -> Self {
        match line.first() {
            Some(&(FASTA_MARKER | FASTQ_MARKER)) => Self::Header,
            Some(&QUALITY_MARKER) => Self::QualitySeparator,
            _ => Self::Sequence,
        }
    }
}

/// Strips a trailing `\n` or `\r\n`
#[must_use]
pub fn chomp(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(LineClass::classify(b">read/1"), LineClass::Header);
        assert_eq!(LineClass::classify(b"@read/1"), LineClass::Header);
        assert_eq!(LineClass::classify(b"+"), LineClass::QualitySeparator);
        assert_eq!(LineClass::classify(b"+read/1"), LineClass::QualitySeparator);
        assert_eq!(LineClass::classify(b"ACGTN"), LineClass::Sequence);
        assert_eq!(LineClass::classify(b""), LineClass::Sequence);
    }

    #[test]
    fn test_chomp() {
        assert_eq!(chomp(b"ACGT\n"), b"ACGT");
        assert_eq!(chomp(b"ACGT\r\n"), b"ACGT");
        assert_eq!(chomp(b"ACGT"), b"ACGT");
        assert_eq!(chomp(b"\n"), b"");
    }
}
