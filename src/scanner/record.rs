use crate::header::{parse_header_with_default, Mate, ReadName};

/// A finalized record borrowed from the scanner buffers
///
/// Valid until the next call to [`Scanner::next_record`](super::Scanner::next_record).
#[derive(Debug, Clone, Copy)]
pub struct RefRecord<'a> {
    header: &'a [u8],
    sequence: &'a [u8],
    assumed_mate: Option<Mate>,
}
impl<'a> RefRecord<'a> {
    #[must_use]
    pub fn new(header: &'a [u8], sequence: &'a [u8], assumed_mate: Option<Mate>) -> Self {
        Self {
            header,
            sequence,
            assumed_mate,
        }
    }

    /// Raw header line, marker included, line terminator removed
    #[must_use]
    pub fn header(&self) -> &'a [u8] {
        self.header
    }

    /// Concatenation of all sequence lines of the record
    #[must_use]
    pub fn sequence(&self) -> &'a [u8] {
        self.sequence
    }

    /// Pair identifier and mate number, if the header carries them
    #[must_use]
    pub fn name(&self) -> Option<ReadName<'a>> {
        parse_header_with_default(self.header, self.assumed_mate)
    }
}
