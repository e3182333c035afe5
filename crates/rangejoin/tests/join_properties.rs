//! Property tests for join cardinality, determinism and trimming.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use rangejoin::{CellValue, JoinSpec, JoinType, Range, trim_range};

/// A data row: key drawn from a small domain so keys repeat, payload
/// non-blank so trimming never changes the shape.
fn data_row() -> impl Strategy<Value = (u8, bool, String)> {
    (0_u8..4, any::<bool>(), "[a-z]{1,3}")
}

fn build(rows: &[(u8, bool, String)], header: &str) -> Range {
    let mut grid = vec![vec![CellValue::from("key"), CellValue::from(header)]];
    for (key, numeric, payload) in rows {
        // Mix numeric and text representations of the same key.
        let key = if *numeric {
            CellValue::from(i64::from(*key))
        } else {
            CellValue::from(key.to_string())
        };
        grid.push(vec![key, CellValue::from(payload.as_str())]);
    }
    Range::new(grid)
}

fn run(left: &Range, right: &Range, join_type: JoinType) -> Range {
    rangejoin::sql_join(
        Some(left.clone().into()),
        Some(right.clone().into()),
        Some(1.into()),
        Some(1.into()),
        Some(join_type.as_str()),
        Some(true),
    )
    .expect("valid join")
    .expect("non-blank call")
}

fn matches_per_left_row(left: &[(u8, bool, String)], right: &[(u8, bool, String)]) -> Vec<usize> {
    left.iter()
        .map(|(lk, _, _)| right.iter().filter(|(rk, _, _)| rk == lk).count())
        .collect()
}

fn blankish_cell() -> impl Strategy<Value = CellValue> {
    prop_oneof![
        3 => Just(CellValue::blank()),
        1 => "[a-c]".prop_map(CellValue::from),
        1 => (0_i64..3).prop_map(CellValue::from),
    ]
}

proptest! {
    #[test]
    fn inner_row_count_is_number_of_matching_pairs(
        left in prop::collection::vec(data_row(), 1..10),
        right in prop::collection::vec(data_row(), 1..10),
    ) {
        let out = run(&build(&left, "l"), &build(&right, "r"), JoinType::Inner);
        let pairs: usize = matches_per_left_row(&left, &right).iter().sum();
        prop_assert_eq!(out.height(), 1 + pairs);
        prop_assert!(out.rows().iter().all(|row| row.len() == 3));
    }

    #[test]
    fn left_row_count_counts_unmatched_rows_once(
        left in prop::collection::vec(data_row(), 1..10),
        right in prop::collection::vec(data_row(), 1..10),
    ) {
        let out = run(&build(&left, "l"), &build(&right, "r"), JoinType::Left);
        let expected: usize = matches_per_left_row(&left, &right)
            .iter()
            .map(|&m| m.max(1))
            .sum();
        prop_assert_eq!(out.height(), 1 + expected);

        let padded = out.rows()[1..].iter().filter(|row| row[2].is_null()).count();
        let unmatched = matches_per_left_row(&left, &right)
            .iter()
            .filter(|&&m| m == 0)
            .count();
        prop_assert_eq!(padded, unmatched);
    }

    #[test]
    fn output_preserves_left_order(
        left in prop::collection::vec(data_row(), 1..10),
        right in prop::collection::vec(data_row(), 1..10),
    ) {
        let out = run(&build(&left, "l"), &build(&right, "r"), JoinType::Left);
        let emitted: Vec<&CellValue> = out.rows()[1..].iter().map(|row| &row[1]).collect();
        let mut expected = Vec::new();
        for ((_, _, payload), m) in left.iter().zip(matches_per_left_row(&left, &right)) {
            for _ in 0..m.max(1) {
                expected.push(CellValue::from(payload.as_str()));
            }
        }
        prop_assert_eq!(emitted, expected.iter().collect::<Vec<_>>());
    }

    #[test]
    fn joins_are_deterministic(
        left in prop::collection::vec(data_row(), 1..10),
        right in prop::collection::vec(data_row(), 1..10),
    ) {
        let left = build(&left, "l");
        let right = build(&right, "r");
        for join_type in [JoinType::Inner, JoinType::Left] {
            let first = run(&left, &right, join_type);
            let second = run(&left, &right, join_type);
            let first_json = serde_json::to_string(&first)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            let second_json = serde_json::to_string(&second)
                .map_err(|e| TestCaseError::fail(e.to_string()))?;
            prop_assert_eq!(first_json, second_json);
        }
    }

    #[test]
    fn engine_agrees_with_facade(
        left in prop::collection::vec(data_row(), 1..10),
        right in prop::collection::vec(data_row(), 1..10),
    ) {
        let left = build(&left, "l");
        let right = build(&right, "r");
        let direct = rangejoin_engine::hash_join(
            &left,
            &right,
            &[0],
            &[0],
            JoinSpec { join_type: JoinType::Left, has_header: true },
        )
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(direct, run(&left, &right, JoinType::Left));
    }

    #[test]
    fn trimming_is_idempotent(
        rows in prop::collection::vec(prop::collection::vec(blankish_cell(), 4), 0..6),
    ) {
        let once = trim_range(Range::new(rows));
        let twice = trim_range(once.clone());
        prop_assert_eq!(&once, &twice);
        if !once.is_empty() {
            let last_row = &once.rows()[once.height() - 1];
            prop_assert!(last_row.iter().any(|cell| !cell.is_blank()));
            let last_col = once.width() - 1;
            prop_assert!(once.rows().iter().any(|row| !row[last_col].is_blank()));
        }
    }
}
