extern crate genevar;

use genevar::bio::variant::{apply_variant, is_standard_amino_acid, Substitution, VariantError};

const TP53_START: &str = "MEEPQSDPSVEPPLSQETFSDLWKLLPENNVLSPLPSQAMDDLMLSPDDIEQWFTEDPGPDEAPRMPEAAPPVAPAPAAPTPAAPAPAPSWPLSSSVPSQKTYQGSYGFRLGFLHSGTAKSVTCTYSPALNKM";

fn positions_that_differ(a: &str, b: &str) -> Vec<usize> {
    a.chars().zip(b.chars())
        .enumerate()
        .filter(|(_, (x, y))| x != y)
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn test_parse() {
    let subst = Substitution::parse("A123G").unwrap();
    assert_eq!(subst, Substitution { from_aa: 'A', position: 123, to_aa: 'G' });
    assert_eq!(subst.to_string(), "A123G");

    let subst = Substitution::parse("m1e").unwrap();
    assert_eq!(subst, Substitution { from_aa: 'M', position: 1, to_aa: 'E' });

    let subst = Substitution::parse("R0175H").unwrap();
    assert_eq!(subst.position, 175);
}

#[test]
fn test_parse_is_case_insensitive() {
    for notation in ["r175h", "R175h", "r175H", "R175H"] {
        assert_eq!(Substitution::parse(notation), Substitution::parse(&notation.to_uppercase()));
        assert_eq!(Substitution::parse(notation).unwrap().to_string(), "R175H");
    }
}

#[test]
fn test_parse_invalid() {
    let bad_notations = ["", "xyz", "A", "123", "A123", "123G", "AG", "AB123G", "A123GH",
                         " A123G", "A123G ", "A12 3G", "A-5G", "A+5G", "A1.5G", "p.A123G",
                         "A123G\n", "Ala123Gly", "A\u{0661}G", "Ä1G"];

    for notation in bad_notations {
        match Substitution::parse(notation) {
            Err(VariantError::InvalidFormat(input)) => assert_eq!(input, notation),
            other => panic!("{:?} should be InvalidFormat, got {:?}", notation, other),
        }
    }
}

#[test]
fn test_invalid_format_message_echoes_input() {
    let err = Substitution::parse("xyz").unwrap_err();
    assert_eq!(err.to_string(), "Invalid variant format: 'xyz'. Use format like 'A123G'.");
}

#[test]
fn test_apply() {
    assert_eq!(apply_variant("ABCDEF", "A1G").unwrap(), "GBCDEF");
    assert_eq!(apply_variant("ABCDEF", "F6G").unwrap(), "ABCDEG");
    assert_eq!(apply_variant("ABCDEF", "c3w").unwrap(), "ABWDEF");
}

#[test]
fn test_apply_tp53() {
    let variant_seq = apply_variant(TP53_START, "M1E").unwrap();

    assert!(variant_seq.starts_with('E'));
    assert_eq!(&variant_seq[1..], &TP53_START[1..]);
    assert_eq!(variant_seq.len(), TP53_START.len());
}

#[test]
fn test_apply_changes_one_position() {
    for (index, from_aa) in TP53_START.chars().enumerate() {
        let position = index + 1;
        let notation = format!("{}{}W", from_aa, position);

        let variant_seq = apply_variant(TP53_START, &notation).unwrap();

        assert_eq!(variant_seq.len(), TP53_START.len());
        assert_eq!(variant_seq.chars().nth(index), Some('W'));

        let diffs = positions_that_differ(TP53_START, &variant_seq);
        if from_aa == 'W' {
            assert!(diffs.is_empty());
        } else {
            assert_eq!(diffs, vec![index]);
        }
    }
}

#[test]
fn test_wild_type_unchanged() {
    let wild_type = String::from("ABCDEF");
    let subst = Substitution::parse("B2Y").unwrap();

    let first = subst.apply(&wild_type).unwrap();
    let second = subst.apply(&wild_type).unwrap();

    assert_eq!(wild_type, "ABCDEF");
    assert_eq!(first, "AYCDEF");
    assert_eq!(first, second);
}

#[test]
fn test_reference_mismatch() {
    assert_eq!(apply_variant("ABCDEF", "C1G"),
               Err(VariantError::ReferenceMismatch { position: 1, expected: 'C', actual: 'A' }));

    let err = apply_variant(TP53_START, "R2H").unwrap_err();
    assert_eq!(err, VariantError::ReferenceMismatch { position: 2, expected: 'R', actual: 'E' });

    let message = err.to_string();
    assert!(message.contains("expected R"));
    assert!(message.contains("has E"));
    assert!(message.contains("position 2"));
}

#[test]
fn test_position_out_of_range() {
    assert_eq!(apply_variant("ABCDEF", "F7G"),
               Err(VariantError::PositionOutOfRange { position: 7, length: 6 }));
    assert_eq!(apply_variant("ABCDEF", "A0G"),
               Err(VariantError::PositionOutOfRange { position: 0, length: 6 }));
    assert_eq!(apply_variant("", "A1G"),
               Err(VariantError::PositionOutOfRange { position: 1, length: 0 }));

    let huge = apply_variant("ABCDEF", "A999999999999999999999999999G").unwrap_err();
    assert!(matches!(huge, VariantError::PositionOutOfRange { length: 6, .. }));
}

#[test]
fn test_range_checked_before_reference() {
    // 'Z' isn't in the sequence at all but the position is the problem
    assert_eq!(apply_variant("ABC", "Z4A"),
               Err(VariantError::PositionOutOfRange { position: 4, length: 3 }));
}

#[test]
fn test_non_standard_letters_accepted() {
    assert_eq!(apply_variant("ABCDEF", "B2X").unwrap(), "AXCDEF");

    let subst = Substitution::parse("B2X").unwrap();
    assert!(!subst.uses_standard_amino_acids());
    assert!(Substitution::parse("A2G").unwrap().uses_standard_amino_acids());

    assert!(is_standard_amino_acid('W'));
    assert!(!is_standard_amino_acid('B'));
    assert!(!is_standard_amino_acid('a'));
}

#[test]
fn test_synonymous() {
    assert!(Substitution::parse("A1A").unwrap().is_synonymous());
    assert!(!Substitution::parse("A1G").unwrap().is_synonymous());
    assert_eq!(apply_variant("ABCDEF", "A1A").unwrap(), "ABCDEF");
}
