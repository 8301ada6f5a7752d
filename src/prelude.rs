pub use super::{
    subsample_file, FastaWriter, IdentifierPolicy, Mate, RecordSink, Scanner, SelectionParams,
    SubsampleConfigBuilder, Subsampler,
};
