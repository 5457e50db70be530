use crate::cigar::parse_unsigned;
use crate::error::RecordError;
use crate::types::{HashMap, HashMapExt, RefLength};

const SEQUENCE_DICTIONARY: &str = "@SQ";
const NAME_TAG: &str = "SN:";
const LENGTH_TAG: &str = "LN:";

/// Reference sequence name → length, harvested from `@SQ` header lines.
#[derive(Debug, Default)]
pub struct ReferenceLengths {
    lengths: HashMap<String, RefLength>,
}

impl ReferenceLengths {
    pub fn new() -> Self {
        Self { lengths: HashMap::new() }
    }

    /// Record the reference declared by a header line.
    ///
    /// Returns `Ok(false)` for header types other than `@SQ`, which carry
    /// nothing we need. A repeated name keeps the last declared length.
    pub fn add_header_line(&mut self, line: &str) -> Result<bool, RecordError> {
        let mut fields = line.split('\t');
        if fields.next() != Some(SEQUENCE_DICTIONARY) {
            return Ok(false);
        }

        let mut name = None;
        let mut length = None;
        for field in fields {
            if let Some(value) = field.strip_prefix(NAME_TAG) {
                name.get_or_insert(value);
            } else if let Some(value) = field.strip_prefix(LENGTH_TAG) {
                length.get_or_insert(value);
            }
        }

        let name = name.ok_or(RecordError::MissingHeaderTag("SN"))?;
        let length = length.ok_or(RecordError::MissingHeaderTag("LN"))?;
        let length = parse_unsigned("reference length", length)?;
        self.lengths.insert(name.to_string(), length);
        Ok(true)
    }

    pub fn get(&self, name: &str) -> Option<RefLength> {
        self.lengths.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lengths.is_empty()
    }
}
