use pretty_assertions::assert_eq;

use tabula_engine::{distinct, distinct_grouped, n_distinct, EngineError, Expr, KeyExpr};
use tabula_model::{Column, ColumnType, Frame, GroupedFrame, Value};

fn frame(columns: Vec<Column>) -> Frame {
    Frame::new(columns).unwrap()
}

#[test]
fn distinct_is_idempotent() {
    let input = frame(vec![
        Column::numbers("x", [Some(1.0), Some(1.0), Some(2.0), Some(2.0)]),
        Column::texts("t", [Some("a"), Some("b"), Some("c"), Some("d")]),
    ]);
    let keys = [KeyExpr::column("x")];

    let once = distinct(&input, &keys, true).unwrap();
    let twice = distinct(&once, &keys, true).unwrap();
    assert_eq!(twice, once);
}

#[test]
fn first_row_wins_for_non_key_columns() {
    let input = frame(vec![
        Column::numbers("x", [Some(1.0), Some(1.0)]),
        Column::numbers("y", [Some(2.0), Some(2.0)]),
        Column::texts("z", [Some("a"), Some("b")]),
    ]);
    let keys = [KeyExpr::column("x"), KeyExpr::column("y")];

    let out = distinct(&input, &keys, true).unwrap();
    assert_eq!(out.row_count(), 1);
    assert_eq!(out.column("z").unwrap().values(), &[Value::from("a")]);
}

#[test]
fn row_count_never_grows_and_is_stable_when_already_distinct() {
    let input = frame(vec![
        Column::numbers("x", [Some(3.0), Some(1.0), Some(2.0)]),
        Column::texts("t", [Some("a"), Some("b"), Some("c")]),
    ]);
    let keys = [KeyExpr::column("x")];

    let out = distinct(&input, &keys, true).unwrap();
    assert!(out.row_count() <= input.row_count());
    // All key tuples were already pairwise distinct, so nothing is dropped
    // and the original row order survives.
    assert_eq!(out, input);
}

#[test]
fn no_keys_deduplicates_whole_rows() {
    let input = frame(vec![
        Column::numbers("x", [Some(1.0), Some(1.0), Some(2.0)]),
        Column::texts("t", [Some("a"), Some("a"), Some("b")]),
    ]);

    let out = distinct(&input, &[], false).unwrap();
    assert_eq!(out.row_count(), 2);
    assert_eq!(
        out.column("x").unwrap().values(),
        &[Value::Number(1.0), Value::Number(2.0)]
    );
    assert_eq!(
        out.column("t").unwrap().values(),
        &[Value::from("a"), Value::from("b")]
    );
}

#[test]
fn group_columns_always_join_the_identity() {
    let input = frame(vec![
        Column::numbers("g", [Some(1.0), Some(1.0), Some(2.0)]),
        Column::numbers("x", [Some(1.0), Some(1.0), Some(1.0)]),
    ]);
    let grouped = GroupedFrame::new(input, vec!["g".to_string()]).unwrap();
    let keys = [KeyExpr::column("x")];

    let out = distinct_grouped(&grouped, &keys, false).unwrap();
    // x alone has one distinct value, but each group keeps its own row.
    assert_eq!(out.frame().row_count(), 2);
    assert_eq!(out.group_vars(), ["g"]);
    assert_eq!(
        out.frame().column_names().collect::<Vec<_>>(),
        vec!["x", "g"]
    );
}

#[test]
fn grouped_distinct_with_no_keys_keeps_grouping() {
    let input = frame(vec![
        Column::numbers("g", [Some(1.0), Some(1.0)]),
        Column::numbers("x", [Some(1.0), Some(1.0)]),
    ]);
    let grouped = GroupedFrame::new(input, vec!["g".to_string()]).unwrap();

    let out = distinct_grouped(&grouped, &[], true).unwrap();
    assert_eq!(out.frame().row_count(), 1);
    assert_eq!(out.group_vars(), ["g"]);
}

#[test]
fn list_columns_are_rejected() {
    let input = frame(vec![
        Column::numbers("x", [Some(1.0), Some(1.0)]),
        Column::new(
            "nested",
            ColumnType::List,
            vec![
                Value::List(vec![Value::Number(1.0)]),
                Value::List(vec![Value::Number(2.0)]),
            ],
        )
        .unwrap(),
    ]);

    // keep_all pulls the list column into the kept set.
    let err = distinct(&input, &[KeyExpr::column("x")], true).unwrap_err();
    assert_eq!(
        err,
        EngineError::UnsupportedColumnType {
            columns: vec!["nested".to_string()],
        }
    );

    // Without keep_all the list column is not kept, so the call succeeds.
    let out = distinct(&input, &[KeyExpr::column("x")], false).unwrap();
    assert_eq!(out.row_count(), 1);
}

#[test]
fn computed_keys_deduplicate_on_derived_values() {
    let input = frame(vec![Column::numbers(
        "x",
        [Some(1.0), Some(-1.0), Some(2.0)],
    )]);
    // x * x collapses 1 and -1 into one combination.
    let keys = [KeyExpr::named(
        "sq",
        Expr::col("x").mul(Expr::col("x")),
    )];

    let out = distinct(&input, &keys, false).unwrap();
    assert_eq!(out.column_names().collect::<Vec<_>>(), vec!["sq"]);
    assert_eq!(
        out.column("sq").unwrap().values(),
        &[Value::Number(1.0), Value::Number(4.0)]
    );
}

#[test]
fn datetime_keys_deduplicate_by_instant() {
    let day = |d: u32| {
        chrono::NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    };
    let input = frame(vec![Column::new(
        "ts",
        ColumnType::DateTime,
        vec![
            Value::DateTime(day(1)),
            Value::DateTime(day(2)),
            Value::DateTime(day(1)),
            Value::Null,
        ],
    )
    .unwrap()]);

    let out = distinct(&input, &[KeyExpr::column("ts")], false).unwrap();
    assert_eq!(
        out.column("ts").unwrap().values(),
        &[
            Value::DateTime(day(1)),
            Value::DateTime(day(2)),
            Value::Null,
        ]
    );
}

#[test]
fn expression_failures_propagate_unmodified() {
    let input = frame(vec![Column::numbers("x", [Some(1.0)])]);
    let keys = [KeyExpr::column("ghost")];
    assert_eq!(
        distinct(&input, &keys, false).unwrap_err(),
        EngineError::UnknownColumn {
            name: "ghost".to_string()
        }
    );
}

#[test]
fn counter_matches_selector_cardinality() {
    let xs: Vec<Value> = [1.0, 2.0, 1.0, 3.0, 2.0]
        .iter()
        .map(|&v| Value::Number(v))
        .collect();
    let input = frame(vec![Column::new("x", ColumnType::Number, xs.clone()).unwrap()]);

    let selected = distinct(&input, &[KeyExpr::column("x")], false).unwrap();
    assert_eq!(n_distinct(&[&xs], false).unwrap(), selected.row_count());
}

#[test]
fn na_policies_diverge_between_counter_modes() {
    let xs: Vec<Value> = vec![
        Value::Number(1.0),
        Value::Null,
        Value::Null,
        Value::Number(2.0),
    ];
    // The missing value counts as one combination...
    assert_eq!(n_distinct(&[&xs], false).unwrap(), 3);
    // ...unless na_rm excludes those tuples entirely.
    assert_eq!(n_distinct(&[&xs], true).unwrap(), 2);

    // The selector always groups missing values as one concrete key.
    let input = frame(vec![Column::new("x", ColumnType::Number, xs).unwrap()]);
    let selected = distinct(&input, &[KeyExpr::column("x")], false).unwrap();
    assert_eq!(selected.row_count(), 3);
}
