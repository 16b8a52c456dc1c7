use proptest::prelude::*;

use tabula_engine::{distinct, n_distinct, KeyExpr};
use tabula_model::{Column, Frame, Value};

/// Small value domains keep collision rates high enough to exercise the
/// grouping paths rather than the all-distinct fast case.
fn arb_number_cells(len: usize) -> impl Strategy<Value = Vec<Option<f64>>> {
    prop::collection::vec(prop::option::of((0i32..5).prop_map(f64::from)), len)
}

fn arb_text_cells(len: usize) -> impl Strategy<Value = Vec<Option<String>>> {
    prop::collection::vec(prop::option::of("[ab]{1,2}"), len)
}

fn arb_frame() -> impl Strategy<Value = Frame> {
    (0usize..12).prop_flat_map(|len| {
        (arb_number_cells(len), arb_text_cells(len)).prop_map(|(xs, ts)| {
            Frame::new(vec![Column::numbers("x", xs), Column::texts("t", ts)]).unwrap()
        })
    })
}

proptest! {
    #[test]
    fn distinct_is_idempotent(frame in arb_frame(), keep_all in any::<bool>()) {
        let keys = [KeyExpr::column("x")];
        let once = distinct(&frame, &keys, keep_all).unwrap();
        let twice = distinct(&once, &keys, keep_all).unwrap();
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn distinct_never_grows_the_frame(frame in arb_frame()) {
        let keys = [KeyExpr::column("x"), KeyExpr::column("t")];
        let out = distinct(&frame, &keys, true).unwrap();
        prop_assert!(out.row_count() <= frame.row_count());
    }

    #[test]
    fn every_input_row_has_a_representative(frame in arb_frame()) {
        // Deduplicating on both columns: each input row must equal some
        // output row, and the first input row is always kept verbatim.
        let keys = [KeyExpr::column("x"), KeyExpr::column("t")];
        let out = distinct(&frame, &keys, true).unwrap();

        let row = |f: &Frame, i: usize| -> Vec<Value> {
            f.columns().iter().map(|c| c.values()[i].clone()).collect()
        };
        for i in 0..frame.row_count() {
            let input_row = row(&frame, i);
            let found = (0..out.row_count()).any(|j| row(&out, j) == input_row);
            prop_assert!(found, "input row {} lost: {:?}", i, input_row);
        }
        if frame.row_count() > 0 {
            prop_assert_eq!(row(&out, 0), row(&frame, 0));
        }
    }

    #[test]
    fn counter_agrees_with_selector(frame in arb_frame()) {
        let xs = frame.column("x").unwrap().values().to_vec();
        let ts = frame.column("t").unwrap().values().to_vec();
        let selected = distinct(
            &frame,
            &[KeyExpr::column("x"), KeyExpr::column("t")],
            false,
        )
        .unwrap();
        prop_assert_eq!(
            n_distinct(&[&xs, &ts], false).unwrap(),
            selected.row_count()
        );
    }

    #[test]
    fn na_rm_only_shrinks_the_count(frame in arb_frame()) {
        let xs = frame.column("x").unwrap().values().to_vec();
        let with_na = n_distinct(&[&xs], false).unwrap();
        let without_na = n_distinct(&[&xs], true).unwrap();
        prop_assert!(without_na <= with_na);
        // Dropping NA tuples removes at most the single NA group.
        prop_assert!(with_na - without_na <= 1);
    }
}
