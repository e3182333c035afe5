//! Composite join keys.
//!
//! A key is the canonical string form of each join-column cell, joined with
//! [`KEY_SEPARATOR`]. Matching is therefore string equality: the number `1`
//! and the text `"1"` produce the same key.

use std::fmt::Write;

use rangejoin_types::CellValue;

/// Canonical lookup key for an ordered tuple of join-column values.
pub type CompositeKey = String;

/// ASCII unit separator; does not occur in ordinary cell content.
pub const KEY_SEPARATOR: char = '\u{1F}';

/// Build the key for `row` over `key_columns` (0-based).
///
/// Returns `None` if any key column lies past the end of the row.
#[must_use]
pub fn build_key(row: &[CellValue], key_columns: &[usize]) -> Option<CompositeKey> {
    let mut key = String::new();
    build_key_into(&mut key, row, key_columns).then_some(key)
}

/// Like [`build_key`], but writes into a reusable buffer.
///
/// The buffer is cleared first. Returns `false` if a key column is missing.
pub(crate) fn build_key_into(buf: &mut String, row: &[CellValue], key_columns: &[usize]) -> bool {
    buf.clear();
    for (pos, &col) in key_columns.iter().enumerate() {
        let Some(cell) = row.get(col) else {
            return false;
        };
        if pos > 0 {
            buf.push(KEY_SEPARATOR);
        }
        match cell {
            CellValue::Text(text) => buf.push_str(text),
            other => {
                // Writing into a String is infallible.
                let _ = write!(buf, "{other}");
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[CellValue]) -> Vec<CellValue> {
        cells.to_vec()
    }

    #[test]
    fn single_column_key_is_canonical_string() {
        let r = row(&[CellValue::from("a"), CellValue::from(2)]);
        assert_eq!(build_key(&r, &[0]).unwrap(), "a");
        assert_eq!(build_key(&r, &[1]).unwrap(), "2");
    }

    #[test]
    fn composite_key_uses_separator_in_column_order() {
        let r = row(&[CellValue::from("x"), CellValue::from(true), CellValue::from(1.5)]);
        assert_eq!(build_key(&r, &[2, 0]).unwrap(), "1.5\u{1F}x");
        assert_eq!(build_key(&r, &[0, 1, 2]).unwrap(), "x\u{1F}true\u{1F}1.5");
    }

    #[test]
    fn number_and_text_with_same_form_collide() {
        let numeric = row(&[CellValue::from(1)]);
        let textual = row(&[CellValue::from("1")]);
        assert_eq!(build_key(&numeric, &[0]), build_key(&textual, &[0]));
    }

    #[test]
    fn separator_keeps_column_boundaries() {
        let a = row(&[CellValue::from("ab"), CellValue::from("c")]);
        let b = row(&[CellValue::from("a"), CellValue::from("bc")]);
        assert_ne!(build_key(&a, &[0, 1]), build_key(&b, &[0, 1]));
    }

    #[test]
    fn missing_column_yields_none() {
        let r = row(&[CellValue::from("a")]);
        assert!(build_key(&r, &[0, 3]).is_none());
    }

    #[test]
    fn reused_buffer_is_cleared() {
        let mut buf = String::from("stale");
        assert!(build_key_into(&mut buf, &[CellValue::from(7)], &[0]));
        assert_eq!(buf, "7");
    }
}
