//! Summarise one SAM alignment as a PSL-style record.
//!
//! The CIGAR is walked once. Every operator adds to a per-kind total, and
//! `M` operators additionally open a block whose query and target offsets
//! come from two running cursors. `I` advances only the query cursor,
//! `D`/`N` only the target cursor.

use crate::alignment::SamLine;
use crate::cigar::{parse_cigar, CigarOp};
use crate::error::RecordError;
use crate::header::ReferenceLengths;
use crate::types::RefLength;
use noodles::sam::alignment::record::cigar::op::Kind as CigarKind;
use noodles::sam::alignment::record::data::field::Tag;
use std::fmt;

/// How match and mismatch counts are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MismatchMode {
    /// From the CIGAR alone: `=`/`X` when present, otherwise every `M` is a match.
    #[default]
    Cigar,
    /// From minimap2's `NM`, `nn` and `ts` tags.
    Minimap2,
}

/// Treatment of a negative `NM - indels - ambiguous` in [`MismatchMode::Minimap2`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MismatchClamp {
    #[default]
    Floor,
    Raw,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ConversionConfig {
    pub mode: MismatchMode,
    pub clamp: MismatchClamp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn flipped(self) -> Self {
        match self {
            Strand::Forward => Strand::Reverse,
            Strand::Reverse => Strand::Forward,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One output record. Field order of [`fmt::Display`] is the PSL column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentSummary {
    pub matches: i64,
    pub mismatches: i64,
    /// Bases in `N` operators.
    pub n_count: u64,
    pub q_num_insert: u64,
    pub q_base_insert: u64,
    pub t_num_insert: u64,
    pub t_base_insert: u64,
    pub strand: Strand,
    pub q_name: String,
    pub q_size: u64,
    pub q_start: u64,
    pub q_end: u64,
    pub t_name: String,
    /// `None` when the header never declared this reference.
    pub t_size: Option<RefLength>,
    pub t_start: u64,
    pub t_end: u64,
    pub block_sizes: Vec<u64>,
    pub q_starts: Vec<u64>,
    pub t_starts: Vec<u64>,
}

impl AlignmentSummary {
    pub fn block_count(&self) -> usize {
        self.block_sizes.len()
    }
}

impl fmt::Display for AlignmentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // repMatches is always 0
        write!(
            f,
            "{}\t{}\t0\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t",
            self.matches,
            self.mismatches,
            self.n_count,
            self.q_num_insert,
            self.q_base_insert,
            self.t_num_insert,
            self.t_base_insert,
            self.strand,
            self.q_name,
            self.q_size,
            self.q_start,
            self.q_end,
            self.t_name,
        )?;
        if let Some(size) = self.t_size {
            write!(f, "{size}")?;
        }
        write!(
            f,
            "\t{}\t{}\t{}\t{}\t{}\t{}",
            self.t_start,
            self.t_end,
            self.block_count(),
            comma_list(&self.block_sizes),
            comma_list(&self.q_starts),
            comma_list(&self.t_starts),
        )
    }
}

/// Comma-joined with a trailing comma; an empty list renders as `,`.
fn comma_list(values: &[u64]) -> String {
    let mut out = values.iter().map(u64::to_string).collect::<Vec<_>>().join(",");
    out.push(',');
    out
}

/// Base totals per operator kind.
#[derive(Debug, Default)]
struct OpTotals {
    m: u64,
    i: u64,
    d: u64,
    n: u64,
    s: u64,
    h: u64,
    eq: u64,
    x: u64,
    ins_blocks: u64,
    del_blocks: u64,
}

impl OpTotals {
    fn indels(&self) -> u64 {
        self.i + self.d
    }

    fn query_length(&self) -> u64 {
        self.m + self.i + self.s + self.h + self.eq + self.x
    }

    fn reference_span(&self) -> u64 {
        self.m + self.d + self.n + self.eq + self.x
    }
}

/// Block sizes and per-block starts for a single record.
///
/// Both start lists carry one open entry past the last block; the cursor
/// ops extend that entry, and [`BlockBuilder::finish`] drops it.
#[derive(Debug)]
struct BlockBuilder {
    sizes: Vec<u64>,
    q_starts: Vec<u64>,
    t_starts: Vec<u64>,
}

impl BlockBuilder {
    fn new(q_start: u64, t_start: u64) -> Self {
        Self { sizes: Vec::new(), q_starts: vec![q_start], t_starts: vec![t_start] }
    }

    fn push_block(&mut self, len: u64) {
        self.sizes.push(len);
        let q_next = self.q_starts.last().map_or(len, |&q| q + len);
        let t_next = self.t_starts.last().map_or(len, |&t| t + len);
        self.q_starts.push(q_next);
        self.t_starts.push(t_next);
    }

    fn skip_query(&mut self, len: u64) {
        if let Some(q) = self.q_starts.last_mut() {
            *q += len;
        }
    }

    fn skip_target(&mut self, len: u64) {
        if let Some(t) = self.t_starts.last_mut() {
            *t += len;
        }
    }

    fn finish(mut self) -> (Vec<u64>, Vec<u64>, Vec<u64>) {
        self.q_starts.pop();
        self.t_starts.pop();
        (self.sizes, self.q_starts, self.t_starts)
    }
}

/// Convert a mapped SAM line into its summary.
///
/// Callers skip unmapped lines (see [`SamLine::is_unmapped`]) beforehand.
pub fn summarize(
    line: &SamLine<'_>,
    references: &ReferenceLengths,
    config: &ConversionConfig,
) -> Result<AlignmentSummary, RecordError> {
    let ops = parse_cigar(line.cigar)?;
    if line.position == 0 {
        return Err(RecordError::ZeroPosition);
    }
    let t_start = line.position - 1;

    let q_start = match ops.first() {
        Some(op) if matches!(op.kind, CigarKind::SoftClip | CigarKind::HardClip) => {
            u64::from(op.len)
        }
        _ => 0,
    };
    // Only a trailing soft clip shortens the aligned query end.
    let q_end_clip = match ops.last() {
        Some(op) if op.kind == CigarKind::SoftClip => u64::from(op.len),
        _ => 0,
    };

    let (totals, blocks) = walk_cigar(&ops, q_start, t_start);
    let (block_sizes, q_starts, t_starts) = blocks.finish();

    let q_size = totals.query_length();
    let mut strand = if line.is_reverse() { Strand::Reverse } else { Strand::Forward };

    let (matches, mismatches) = match config.mode {
        MismatchMode::Minimap2 => {
            let edit_distance = line.int_tag(Tag::EDIT_DISTANCE, "NM tag")?.unwrap_or(0);
            let ambiguous = line.int_tag(Tag::new(b'n', b'n'), "nn tag")?.unwrap_or(0);
            // ts:A:- means the transcript lies on the opposite strand of the read.
            if line.char_tag(Tag::new(b't', b's')) == Some(b'-') {
                strand = strand.flipped();
            }
            let mut mismatches =
                to_signed(edit_distance) - to_signed(totals.indels()) - to_signed(ambiguous);
            if config.clamp == MismatchClamp::Floor {
                mismatches = mismatches.max(0);
            }
            (to_signed(totals.m) - mismatches, mismatches)
        }
        MismatchMode::Cigar if totals.eq != 0 => (to_signed(totals.eq), to_signed(totals.x)),
        MismatchMode::Cigar => (to_signed(totals.m), 0),
    };

    Ok(AlignmentSummary {
        matches,
        mismatches,
        n_count: totals.n,
        q_num_insert: totals.ins_blocks,
        q_base_insert: totals.i,
        t_num_insert: totals.del_blocks,
        t_base_insert: totals.d,
        strand,
        q_name: line.query_name.to_string(),
        q_size,
        q_start,
        q_end: q_size.saturating_sub(q_end_clip),
        t_name: line.reference_name.to_string(),
        t_size: references.get(line.reference_name),
        t_start,
        t_end: t_start + totals.reference_span(),
        block_sizes,
        q_starts,
        t_starts,
    })
}

fn walk_cigar(ops: &[CigarOp], q_start: u64, t_start: u64) -> (OpTotals, BlockBuilder) {
    let mut totals = OpTotals::default();
    let mut blocks = BlockBuilder::new(q_start, t_start);

    for op in ops {
        let len = u64::from(op.len);
        match op.kind {
            CigarKind::Match => {
                totals.m += len;
                blocks.push_block(len);
            }
            CigarKind::Insertion => {
                totals.i += len;
                totals.ins_blocks += 1;
                blocks.skip_query(len);
            }
            CigarKind::Deletion => {
                totals.d += len;
                totals.del_blocks += 1;
                blocks.skip_target(len);
            }
            CigarKind::Skip => {
                totals.n += len;
                blocks.skip_target(len);
            }
            CigarKind::SoftClip => totals.s += len,
            CigarKind::HardClip => totals.h += len,
            CigarKind::SequenceMatch => totals.eq += len,
            CigarKind::SequenceMismatch => totals.x += len,
            CigarKind::Pad => {}
        }
    }

    (totals, blocks)
}

fn to_signed(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
