use crate::alignment::SamLine;
use crate::error::{LineError, RecordError};
use crate::header::ReferenceLengths;
use crate::psl::{summarize, AlignmentSummary, ConversionConfig};
use crate::types::{HashSet, HashSetExt};
use anyhow::Result;
use std::io::{BufRead, Write};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Stats {
    pub total_lines: u64,
    pub header_lines: u64,
    pub reference_sequences: u64,
    pub records_written: u64,
    pub unmapped_records: u64,
    pub unknown_reference_records: u64,
}

/// Per-run state shared by every line.
struct Converter<'a> {
    config: &'a ConversionConfig,
    references: ReferenceLengths,
    undeclared: HashSet<String>,
    stats: Stats,
}

/// Convert a whole SAM stream, one output line per mapped alignment.
///
/// Header lines may appear anywhere before the alignments that use them.
/// The first malformed line aborts the run; nothing is written for it.
pub fn run<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    config: &ConversionConfig,
) -> Result<Stats> {
    let mut converter = Converter {
        config,
        references: ReferenceLengths::new(),
        undeclared: HashSet::new(),
        stats: Stats::default(),
    };

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        converter.stats.total_lines += 1;

        let summary = converter.process_line(&line).map_err(|source| LineError {
            line_no: idx as u64 + 1,
            line: line.clone(),
            source,
        })?;
        if let Some(summary) = summary {
            writeln!(writer, "{summary}")?;
            converter.stats.records_written += 1;
        }
    }

    writer.flush()?;
    let mut stats = converter.stats;
    stats.reference_sequences = converter.references.len() as u64;
    Ok(stats)
}

impl Converter<'_> {
    fn process_line(&mut self, line: &str) -> Result<Option<AlignmentSummary>, RecordError> {
        if line.is_empty() {
            return Ok(None);
        }
        if line.starts_with('@') {
            self.stats.header_lines += 1;
            self.references.add_header_line(line)?;
            return Ok(None);
        }

        let record = SamLine::parse(line)?;
        if record.is_unmapped() {
            tracing::debug!(query = record.query_name, "skipping unmapped record");
            self.stats.unmapped_records += 1;
            return Ok(None);
        }

        let summary = summarize(&record, &self.references, self.config)?;
        if summary.t_size.is_none() {
            self.stats.unknown_reference_records += 1;
            if self.undeclared.insert(record.reference_name.to_string()) {
                tracing::warn!(
                    reference = record.reference_name,
                    "reference not declared in header; its length is left empty"
                );
            }
        }
        Ok(Some(summary))
    }
}
