use thiserror::Error;

/// Content problems that make a single SAM line unusable.
///
/// A record error always aborts the run; [`LineError`] attaches the
/// position of the offending line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("CIGAR operator '{op}' at offset {offset} has no length prefix")]
    EmptyOpLength { op: char, offset: usize },
    #[error("CIGAR operator '{op}' at offset {offset} has zero length")]
    ZeroOpLength { op: char, offset: usize },
    #[error("unknown CIGAR operator '{op}' at offset {offset}")]
    UnknownOp { op: char, offset: usize },
    #[error("CIGAR string ends with a length but no operator: {0:?}")]
    DanglingLength(String),
    #[error("CIGAR string is empty")]
    EmptyCigar,
    #[error("CIGAR length {0:?} does not fit in 32 bits")]
    OpLengthOverflow(String),
    #[error("expected at least {expected} tab-separated fields, found {found}")]
    TooFewFields { expected: usize, found: usize },
    #[error("invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("@SQ header line has no {0} tag")]
    MissingHeaderTag(&'static str),
    #[error("mapped record has alignment start 0")]
    ZeroPosition,
}

/// A [`RecordError`] located in the input stream.
#[derive(Debug, Error)]
#[error("line {line_no}: {source}\n  {line}")]
pub struct LineError {
    pub line_no: u64,
    pub line: String,
    #[source]
    pub source: RecordError,
}
