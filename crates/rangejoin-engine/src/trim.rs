//! Trailing-blank trimming.
//!
//! Spreadsheet selections routinely include empty rows below and empty
//! columns to the right of the data. Only that trailing blankness is cut;
//! blank cells inside the data are kept.

use rangejoin_types::Range;

/// Remove trailing blank rows, then trailing blank columns.
///
/// Returns [`Range::empty_sentinel`] when every cell is blank. Rows shorter
/// than the trimmed width are left short so validation can report them.
#[must_use]
pub fn trim_range(range: Range) -> Range {
    let mut rows = range.into_rows();

    let Some(last_row) = rows
        .iter()
        .rposition(|row| row.iter().any(|cell| !cell.is_blank()))
    else {
        return Range::empty_sentinel();
    };
    rows.truncate(last_row + 1);

    let widest = rows.iter().map(Vec::len).max().unwrap_or(0);
    let Some(last_col) = (0..widest).rev().find(|&col| {
        rows.iter()
            .any(|row| row.get(col).is_some_and(|cell| !cell.is_blank()))
    }) else {
        return Range::empty_sentinel();
    };

    for row in &mut rows {
        row.truncate(last_col + 1);
    }
    Range::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rangejoin_types::CellValue;

    fn grid(rows: &[&[&str]]) -> Range {
        Range::from_grid(rows.iter().map(|row| row.iter().copied()))
    }

    #[test]
    fn strips_trailing_rows_and_columns() {
        let range = grid(&[
            &["id", "n", ""],
            &["1", "a", ""],
            &["", "", ""],
            &["", "", ""],
        ]);
        assert_eq!(trim_range(range), grid(&[&["id", "n"], &["1", "a"]]));
    }

    #[test]
    fn keeps_interior_blanks() {
        let range = grid(&[
            &["a", "", "c", ""],
            &["", "", "", ""],
            &["x", "", "z", ""],
        ]);
        assert_eq!(
            trim_range(range),
            grid(&[&["a", "", "c"], &["", "", ""], &["x", "", "z"]])
        );
    }

    #[test]
    fn all_blank_yields_sentinel() {
        let range = grid(&[&["", ""], &["", ""]]);
        assert_eq!(trim_range(range), Range::empty_sentinel());
        assert_eq!(trim_range(Range::default()), Range::empty_sentinel());
    }

    #[test]
    fn null_and_zero_are_not_blank() {
        let range = Range::new(vec![
            vec![CellValue::from("k"), CellValue::blank()],
            vec![CellValue::blank(), CellValue::Null],
            vec![CellValue::from(0), CellValue::blank()],
        ]);
        let trimmed = trim_range(range.clone());
        assert_eq!(trimmed, range);
    }

    #[test]
    fn trailing_column_kept_when_any_row_uses_it() {
        let range = grid(&[&["a", ""], &["b", "y"], &["", ""]]);
        assert_eq!(trim_range(range), grid(&[&["a", ""], &["b", "y"]]));
    }

    #[test]
    fn short_rows_stay_short() {
        let range = Range::new(vec![
            vec![CellValue::from("a"), CellValue::from("b")],
            vec![CellValue::from("c")],
        ]);
        let trimmed = trim_range(range.clone());
        assert_eq!(trimmed, range);
        assert_eq!(trimmed.first_irregular_row(), Some((1, 1)));
    }

    #[test]
    fn trimming_is_idempotent() {
        let range = grid(&[&["a", "", ""], &["", "b", ""], &["", "", ""]]);
        let once = trim_range(range);
        let twice = trim_range(once.clone());
        assert_eq!(once, twice);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn cell() -> impl Strategy<Value = CellValue> {
            prop_oneof![
                3 => Just(CellValue::blank()),
                1 => "[a-z]".prop_map(CellValue::from),
                1 => Just(CellValue::Null),
            ]
        }

        proptest! {
            #[test]
            fn trimmed_range_is_a_top_left_window(
                rows in prop::collection::vec(prop::collection::vec(cell(), 3), 0..6),
            ) {
                let input = Range::new(rows);
                let trimmed = trim_range(input.clone());
                if trimmed.is_empty() {
                    prop_assert_eq!(trimmed, Range::empty_sentinel());
                } else {
                    prop_assert!(trimmed.height() <= input.height());
                    for (idx, row) in trimmed.rows().iter().enumerate() {
                        prop_assert_eq!(row.as_slice(), &input.rows()[idx][..row.len()]);
                    }
                }
            }
        }
    }
}
