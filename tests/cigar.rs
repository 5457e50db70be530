use noodles::sam::alignment::record::cigar::op::Kind as CigarKind;
use sam2psl::cigar::parse_unsigned;
use sam2psl::{CigarOp, RecordError, format_cigar, parse_cigar};

#[test]
fn parses_every_operator_kind() {
    let ops = parse_cigar("3H2S10M1I4D100N5=1X2P7S").expect("valid CIGAR");
    assert_eq!(
        ops,
        vec![
            CigarOp::new(CigarKind::HardClip, 3),
            CigarOp::new(CigarKind::SoftClip, 2),
            CigarOp::new(CigarKind::Match, 10),
            CigarOp::new(CigarKind::Insertion, 1),
            CigarOp::new(CigarKind::Deletion, 4),
            CigarOp::new(CigarKind::Skip, 100),
            CigarOp::new(CigarKind::SequenceMatch, 5),
            CigarOp::new(CigarKind::SequenceMismatch, 1),
            CigarOp::new(CigarKind::Pad, 2),
            CigarOp::new(CigarKind::SoftClip, 7),
        ]
    );
}

#[test]
fn re_encoding_reproduces_input() {
    for cigar in [
        "10M",
        "5S10M3S",
        "5M2I3M1D4M",
        "12H150M",
        "1M1I1M1D1M",
        "35M1200N65M",
        "20=1X20=",
        "4294967295N",
    ] {
        let ops = parse_cigar(cigar).expect("valid CIGAR");
        assert_eq!(format_cigar(&ops), cigar);
    }
}

#[test]
fn operator_without_length_is_rejected() {
    assert_eq!(
        parse_cigar("M10"),
        Err(RecordError::EmptyOpLength { op: 'M', offset: 0 })
    );
    assert_eq!(
        parse_cigar("10MI"),
        Err(RecordError::EmptyOpLength { op: 'I', offset: 3 })
    );
}

#[test]
fn zero_length_operator_is_rejected() {
    assert_eq!(
        parse_cigar("5M0D5M"),
        Err(RecordError::ZeroOpLength { op: 'D', offset: 3 })
    );
}

#[test]
fn unknown_operator_is_rejected() {
    assert_eq!(
        parse_cigar("10Q"),
        Err(RecordError::UnknownOp { op: 'Q', offset: 2 })
    );
    assert_eq!(parse_cigar("*"), Err(RecordError::EmptyOpLength { op: '*', offset: 0 }));
}

#[test]
fn trailing_digits_and_empty_input_are_rejected() {
    assert_eq!(parse_cigar("10M5"), Err(RecordError::DanglingLength("10M5".to_string())));
    assert_eq!(parse_cigar(""), Err(RecordError::EmptyCigar));
}

#[test]
fn oversized_length_is_rejected() {
    assert_eq!(
        parse_cigar("4294967296M"),
        Err(RecordError::OpLengthOverflow("4294967296".to_string()))
    );
}

#[test]
fn parse_unsigned_accepts_only_digits() {
    assert_eq!(parse_unsigned("n", "0"), Ok(0));
    assert_eq!(parse_unsigned("n", "248956422"), Ok(248_956_422));
    for bad in ["", "-1", "+1", "12a", " 3"] {
        assert_eq!(
            parse_unsigned("n", bad),
            Err(RecordError::InvalidNumber { field: "n", value: bad.to_string() }),
            "{bad:?}"
        );
    }
}
