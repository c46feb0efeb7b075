//! End-to-end scenarios against the public `Sheet` API.

use sheetengine::{CellValue, Position, Sheet, SheetError};

fn pos(a1: &str) -> Position {
    a1.parse().unwrap()
}

#[test]
fn plain_text_and_numeric_literal_round_trip() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "hello").unwrap();
    sheet.set_cell(pos("A2"), "42").unwrap();

    assert_eq!(sheet.get_cell(pos("A1")).unwrap().unwrap().text(), "hello");
    assert_eq!(
        sheet.get_cell(pos("A1")).unwrap().unwrap().value(),
        CellValue::Text("hello".into())
    );
    assert_eq!(
        sheet.get_cell(pos("A2")).unwrap().unwrap().value(),
        CellValue::Text("42".into())
    );
}

#[test]
fn escaped_text_strips_the_leading_quote_from_value_only() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "'=1+1").unwrap();

    let cell = sheet.get_cell(pos("A1")).unwrap().unwrap();
    assert_eq!(cell.text(), "'=1+1");
    assert_eq!(cell.value(), CellValue::Text("=1+1".into()));
}

#[test]
fn formula_evaluates_against_referenced_cells() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "2").unwrap();
    sheet.set_cell(pos("A2"), "3").unwrap();
    sheet.set_cell(pos("A3"), "=A1*A2+1").unwrap();

    assert_eq!(
        sheet.get_cell(pos("A3")).unwrap().unwrap().value(),
        CellValue::Number(7.0)
    );
}

#[test]
fn edits_propagate_through_the_dependency_chain() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "1").unwrap();
    sheet.set_cell(pos("A2"), "=A1+1").unwrap();
    sheet.set_cell(pos("A3"), "=A2+1").unwrap();
    assert_eq!(
        sheet.get_cell(pos("A3")).unwrap().unwrap().value(),
        CellValue::Number(3.0)
    );

    sheet.set_cell(pos("A1"), "10").unwrap();
    assert_eq!(
        sheet.get_cell(pos("A2")).unwrap().unwrap().value(),
        CellValue::Number(11.0)
    );
    assert_eq!(
        sheet.get_cell(pos("A3")).unwrap().unwrap().value(),
        CellValue::Number(12.0)
    );
}

#[test]
fn direct_self_reference_is_rejected_and_leaves_prior_content_intact() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "5").unwrap();
    let err = sheet.set_cell(pos("A1"), "=A1+1").unwrap_err();
    assert_eq!(err, SheetError::CircularDependency(pos("A1")));
    assert_eq!(
        sheet.get_cell(pos("A1")).unwrap().unwrap().value(),
        CellValue::Text("5".into())
    );
}

#[test]
fn indirect_cycle_is_rejected() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "=A2").unwrap();
    sheet.set_cell(pos("A2"), "=A3").unwrap();
    let err = sheet.set_cell(pos("A3"), "=A1").unwrap_err();
    assert_eq!(err, SheetError::CircularDependency(pos("A3")));
}

#[test]
fn reference_to_an_empty_cell_coerces_to_zero() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("B1"), "=A1+1").unwrap();
    assert_eq!(
        sheet.get_cell(pos("B1")).unwrap().unwrap().value(),
        CellValue::Number(1.0)
    );
}

#[test]
fn reference_to_non_numeric_text_raises_value_error() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "not a number").unwrap();
    sheet.set_cell(pos("A2"), "=A1+1").unwrap();
    match sheet.get_cell(pos("A2")).unwrap().unwrap().value() {
        CellValue::Error(e) => assert_eq!(e.symbol(), "#VALUE!"),
        other => panic!("expected #VALUE!, got {other:?}"),
    }
}

#[test]
fn out_of_bounds_reference_raises_ref_error_but_still_renders() {
    let mut sheet = Sheet::new();
    let huge_ref = format!("{}1", "Z".repeat(10));
    sheet.set_cell(pos("A1"), &format!("={huge_ref}+1")).unwrap();

    match sheet.get_cell(pos("A1")).unwrap().unwrap().value() {
        CellValue::Error(e) => assert_eq!(e.symbol(), "#REF!"),
        other => panic!("expected #REF!, got {other:?}"),
    }
    assert_eq!(
        sheet.get_cell(pos("A1")).unwrap().unwrap().text(),
        format!("={huge_ref}+1")
    );
}

#[test]
fn clear_cell_drops_entries_with_no_remaining_descendants() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "1").unwrap();
    sheet.clear_cell(pos("A1")).unwrap();
    assert!(sheet.get_cell(pos("A1")).unwrap().is_none());

    sheet.set_cell(pos("A1"), "1").unwrap();
    sheet.set_cell(pos("A2"), "=A1").unwrap();
    sheet.clear_cell(pos("A1")).unwrap();
    // Still referenced by A2, so it stays materialized (as Empty).
    let a1 = sheet.get_cell(pos("A1")).unwrap().unwrap();
    assert_eq!(a1.text(), "");
    assert_eq!(
        sheet.get_cell(pos("A2")).unwrap().unwrap().value(),
        CellValue::Number(0.0)
    );
}

#[test]
fn clear_cell_on_an_unset_position_is_a_no_op() {
    let mut sheet = Sheet::new();
    assert!(sheet.clear_cell(pos("Z99")).is_ok());
    assert!(sheet.get_cell(pos("Z99")).unwrap().is_none());
}

#[test]
fn invalid_position_is_rejected_on_every_entry_point() {
    let mut sheet = Sheet::new();
    let out_of_bounds = Position::new(usize::MAX, 0);
    assert!(matches!(
        sheet.set_cell(out_of_bounds, "1"),
        Err(SheetError::InvalidPosition(_))
    ));
    assert!(matches!(
        sheet.get_cell(out_of_bounds),
        Err(SheetError::InvalidPosition(_))
    ));
    assert!(matches!(
        sheet.clear_cell(out_of_bounds),
        Err(SheetError::InvalidPosition(_))
    ));
}

#[test]
fn printable_region_is_the_tight_bounding_rectangle_of_non_empty_text() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "1").unwrap();
    sheet.set_cell(pos("C3"), "2").unwrap();

    let size = sheet.get_printable_size();
    assert_eq!(size.rows, 3);
    assert_eq!(size.cols, 3);

    let mut out = Vec::new();
    sheet.print_values(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert_eq!(text, "1\t\t\n\t\t\n\t\t2\n");
}

#[test]
fn set_cell_with_identical_text_is_a_no_op_even_mid_formula() {
    let mut sheet = Sheet::new();
    sheet.set_cell(pos("A1"), "=1+1").unwrap();
    sheet.get_cell(pos("A1")).unwrap().unwrap().value(); // populate the cache
    sheet.set_cell(pos("A1"), "=1+1").unwrap();
    assert_eq!(
        sheet.get_cell(pos("A1")).unwrap().unwrap().value(),
        CellValue::Number(2.0)
    );
}
