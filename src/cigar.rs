//! Text CIGAR decoding.
//!
//! A CIGAR string is a run of `(digits)(operator)` groups with no
//! separators, e.g. `5S10M2I3M`. Operators are mapped onto noodles' SAM
//! [`Kind`] so the rest of the crate shares one operator vocabulary.

use crate::error::RecordError;
use noodles::sam::alignment::record::cigar::op::Kind as CigarKind;
use std::fmt;

/// One run-length CIGAR operation. `len` is always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CigarOp {
    pub len: u32,
    pub kind: CigarKind,
}

impl CigarOp {
    pub fn new(kind: CigarKind, len: u32) -> Self {
        Self { len, kind }
    }
}

impl fmt::Display for CigarOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.len, kind_to_char(self.kind))
    }
}

/// Parse a decimal unsigned integer, rejecting empty input and any
/// non-digit byte (including a leading sign).
pub fn parse_unsigned(field: &'static str, value: &str) -> Result<u64, RecordError> {
    let invalid = || RecordError::InvalidNumber { field, value: value.to_string() };
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse::<u64>().map_err(|_| invalid())
}

/// Decode a text CIGAR into its operations, in the order they appear.
pub fn parse_cigar(cigar: &str) -> Result<Vec<CigarOp>, RecordError> {
    if cigar.is_empty() {
        return Err(RecordError::EmptyCigar);
    }

    let mut ops = Vec::new();
    let mut digits_start = 0usize;

    for (offset, c) in cigar.char_indices() {
        if c.is_ascii_digit() {
            continue;
        }
        let digits = &cigar[digits_start..offset];
        if digits.is_empty() {
            return Err(RecordError::EmptyOpLength { op: c, offset });
        }
        let kind = char_to_kind(c).ok_or(RecordError::UnknownOp { op: c, offset })?;
        let len = parse_unsigned("CIGAR operation length", digits)?;
        let len = u32::try_from(len)
            .map_err(|_| RecordError::OpLengthOverflow(digits.to_string()))?;
        if len == 0 {
            return Err(RecordError::ZeroOpLength { op: c, offset });
        }
        ops.push(CigarOp::new(kind, len));
        digits_start = offset + c.len_utf8();
    }

    if digits_start < cigar.len() {
        return Err(RecordError::DanglingLength(cigar.to_string()));
    }

    Ok(ops)
}

/// Render operations back into a text CIGAR.
pub fn format_cigar(ops: &[CigarOp]) -> String {
    ops.iter().map(|op| op.to_string()).collect()
}

pub fn char_to_kind(c: char) -> Option<CigarKind> {
    let kind = match c {
        'M' => CigarKind::Match,
        'I' => CigarKind::Insertion,
        'D' => CigarKind::Deletion,
        'N' => CigarKind::Skip,
        'S' => CigarKind::SoftClip,
        'H' => CigarKind::HardClip,
        'P' => CigarKind::Pad,
        '=' => CigarKind::SequenceMatch,
        'X' => CigarKind::SequenceMismatch,
        _ => return None,
    };
    Some(kind)
}

pub fn kind_to_char(kind: CigarKind) -> char {
    match kind {
        CigarKind::Match => 'M',
        CigarKind::Insertion => 'I',
        CigarKind::Deletion => 'D',
        CigarKind::Skip => 'N',
        CigarKind::SoftClip => 'S',
        CigarKind::HardClip => 'H',
        CigarKind::Pad => 'P',
        CigarKind::SequenceMatch => '=',
        CigarKind::SequenceMismatch => 'X',
    }
}
