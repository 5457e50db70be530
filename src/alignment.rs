use crate::cigar::parse_unsigned;
use crate::error::RecordError;
use noodles::sam::alignment::record::data::field::Tag;
use noodles::sam::alignment::record::Flags;

/// Fields up to and including CIGAR must be present.
const MIN_FIELDS: usize = 6;
/// Optional `TAG:TYPE:VALUE` fields start after QUAL.
const FIRST_OPTIONAL_FIELD: usize = 11;

const UNMAPPED: &str = "*";

/// POS and `i` tags are signed 32-bit in SAM.
const MAX_SAM_INT: u64 = i32::MAX as u64;

/// Borrowed view of one SAM alignment line.
#[derive(Debug)]
pub struct SamLine<'a> {
    pub query_name: &'a str,
    pub flags: Flags,
    pub reference_name: &'a str,
    /// 1-based leftmost position as written in the record.
    pub position: u64,
    pub cigar: &'a str,
    optional: Vec<&'a str>,
}

impl<'a> SamLine<'a> {
    pub fn parse(line: &'a str) -> Result<Self, RecordError> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < MIN_FIELDS {
            return Err(RecordError::TooFewFields { expected: MIN_FIELDS, found: fields.len() });
        }

        let flag = parse_unsigned("flag", fields[1])?;
        let flag = u16::try_from(flag).map_err(|_| RecordError::InvalidNumber {
            field: "flag",
            value: fields[1].to_string(),
        })?;

        let reference_name = fields[2];
        let position = if reference_name == UNMAPPED {
            0
        } else {
            parse_sam_int("position", fields[3])?
        };

        Ok(Self {
            query_name: fields[0],
            flags: Flags::from(flag),
            reference_name,
            position,
            cigar: fields[5],
            optional: fields.get(FIRST_OPTIONAL_FIELD..).map(<[_]>::to_vec).unwrap_or_default(),
        })
    }

    /// No placement on a reference, or no alignment to summarise.
    pub fn is_unmapped(&self) -> bool {
        self.reference_name == UNMAPPED || self.cigar == UNMAPPED
    }

    pub fn is_reverse(&self) -> bool {
        self.flags.is_reverse_complemented()
    }

    /// Value of the last optional field matching `tag` with type `ty`.
    pub fn tag_value(&self, tag: Tag, ty: u8) -> Option<&'a str> {
        self.optional
            .iter()
            .copied()
            .filter_map(split_optional_field)
            .rev()
            .find(|(t, field_ty, _)| *t == tag && *field_ty == ty)
            .map(|(_, _, value)| value)
    }

    /// Integer tag (`TAG:i:VALUE`). Negative values and values past the
    /// SAM 32-bit range are rejected.
    pub fn int_tag(&self, tag: Tag, field: &'static str) -> Result<Option<u64>, RecordError> {
        self.tag_value(tag, b'i')
            .map(|value| parse_sam_int(field, value))
            .transpose()
    }

    /// Single-character tag (`TAG:A:C`).
    pub fn char_tag(&self, tag: Tag) -> Option<u8> {
        self.tag_value(tag, b'A').and_then(|value| value.bytes().next())
    }
}

fn parse_sam_int(field: &'static str, value: &str) -> Result<u64, RecordError> {
    let parsed = parse_unsigned(field, value)?;
    if parsed > MAX_SAM_INT {
        return Err(RecordError::InvalidNumber { field, value: value.to_string() });
    }
    Ok(parsed)
}

fn split_optional_field(field: &str) -> Option<(Tag, u8, &str)> {
    let mut parts = field.splitn(3, ':');
    let tag = parts.next()?.as_bytes();
    let ty = parts.next()?.as_bytes();
    let value = parts.next()?;
    match (tag, ty) {
        ([a, b], [ty]) => Some((Tag::new(*a, *b), *ty, value)),
        _ => None,
    }
}
