use std::fs::File;
use std::path::Path;

use memmap2::Mmap;

use crate::error::{ReadError, Result};

/// Read-only view of an archive file
///
/// Non-empty files are memory-mapped so the scanner streams over the page
/// cache instead of copying the archive. Empty files are not mapped.
#[derive(Debug)]
pub enum Archive {
    /// Memory-mapped file contents
    Mapped(Mmap),
    /// Zero-byte file
    Empty,
}
impl Archive {
    /// Opens and maps an archive file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// * The file cannot be opened
    /// * The file is not a regular file
    /// * The file cannot be mapped
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Verify input file is a file before attempting to map
        let file = File::open(path)?;
        let metadata = file.metadata()?;
        if !metadata.is_file() {
            return Err(ReadError::IncompatibleFile(path.display().to_string()).into());
        }
        if metadata.len() == 0 {
            return Ok(Self::Empty);
        }

        // Safety: the file is open and won't be modified while mapped
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self::Mapped(mmap))
    }

    /// Byte size of the archive
    #[must_use]
    pub fn size(&self) -> u64 {
        self.as_ref().len() as u64
    }
}
impl AsRef<[u8]> for Archive {
    fn as_ref(&self) -> &[u8] {
        match self {
            Self::Mapped(mmap) => &mmap[..],
            Self::Empty => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::io::Write;

    #[test]
    fn test_open_mapped() -> anyhow::Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        file.write_all(b">read1/1\nACGT\n")?;
        file.flush()?;

        let archive = Archive::open(file.path())?;
        assert!(matches!(archive, Archive::Mapped(_)));
        assert_eq!(archive.size(), 14);
        assert_eq!(archive.as_ref(), b">read1/1\nACGT\n");
        Ok(())
    }

    #[test]
    fn test_open_empty() -> anyhow::Result<()> {
        let file = tempfile::NamedTempFile::new()?;
        let archive = Archive::open(file.path())?;
        assert!(matches!(archive, Archive::Empty));
        assert_eq!(archive.size(), 0);
        Ok(())
    }

    #[test]
    fn test_open_directory() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let err = Archive::open(dir.path()).unwrap_err();
        assert!(matches!(err, Error::ReadError(ReadError::IncompatibleFile(_))));
        Ok(())
    }

    #[test]
    fn test_open_missing() {
        let err = Archive::open("definitely/not/here.fastq").unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}
