//! Tests for the positional context parser.

use ttaaii_core::{ContextError, TtaaiiContext, TtaaiiField, field_at_position, parse_context, parse_input};

#[test]
fn empty_input_has_no_fields() {
    let ctx = parse_context("");
    assert_eq!(ctx, TtaaiiContext::default());
    for f in TtaaiiField::ALL {
        assert!(!ctx.has(f), "{f} should be absent");
    }
}

#[test]
fn each_length_populates_its_prefix() {
    let full = "SAFR35";
    for len in 0..=full.len() {
        let ctx = parse_context(&full[..len]);
        let present: Vec<_> = TtaaiiField::ALL.iter().filter(|f| ctx.has(**f)).collect();
        let expected = match len {
            0..=4 => len,
            5 => 4,
            _ => 5,
        };
        assert_eq!(present.len(), expected, "length {len}");
    }
}

#[test]
fn field_at_position_is_positional() {
    assert_eq!(field_at_position(0), TtaaiiField::T1);
    assert_eq!(field_at_position(1), TtaaiiField::T2);
    assert_eq!(field_at_position(2), TtaaiiField::A1);
    assert_eq!(field_at_position(3), TtaaiiField::A2);
    assert_eq!(field_at_position(4), TtaaiiField::Ii);
    assert_eq!(field_at_position(5), TtaaiiField::Ii);
    assert_eq!(field_at_position(9), TtaaiiField::Ii);
}

#[test]
fn fifth_character_never_enters_context() {
    let parsed = parse_input("FACN3");
    assert_eq!(parsed.context.ii(), None);
    assert_eq!(parsed.context.a2(), Some('N'));
    assert_eq!(parsed.pending_ii, Some('3'));
}

#[test]
fn parser_does_not_normalize_case() {
    let ctx = parse_context("sa");
    assert_eq!(ctx.t1(), Some('s'));
    assert_eq!(ctx.t2(), Some('a'));
}

#[test]
fn non_ascii_is_sliced_by_character() {
    let ctx = parse_context("ÄBCDEF");
    assert_eq!(ctx.t1(), Some('Ä'));
    assert_eq!(ctx.ii(), Some("EF"));
}

#[test]
fn builder_enforces_prefix_invariant() {
    assert!(TtaaiiContext::from_fields(Some('F'), Some('A'), None, None, None).is_ok());
    assert!(matches!(
        TtaaiiContext::from_fields(None, Some('A'), None, None, None),
        Err(ContextError::Gap {
            field: TtaaiiField::T2,
            missing: TtaaiiField::T1
        })
    ));
    assert!(matches!(
        TtaaiiContext::from_fields(Some('F'), Some('A'), None, Some('B'), None),
        Err(ContextError::Gap {
            field: TtaaiiField::A2,
            missing: TtaaiiField::A1
        })
    ));
}
