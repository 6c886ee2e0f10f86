use labelpad::ir::io_yolo::{from_yolo_str, to_yolo_string, YOLO_HEADER};
use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn yolo_rows_have_five_tokens_with_six_decimals(set in proptest_helpers::arb_set(10, 8)) {
        prop_assume!(!set.is_empty());
        let text = to_yolo_string(&set);

        let mut lines = text.lines();
        prop_assert_eq!(lines.next(), Some(YOLO_HEADER));
        let rows: Vec<&str> = lines.collect();
        prop_assert_eq!(rows.len(), set.len());

        for row in rows {
            let tokens: Vec<&str> = row.split(' ').collect();
            prop_assert_eq!(tokens.len(), 5, "row {:?}", row);
            for token in &tokens[1..] {
                let decimals = token.split('.').nth(1).map(str::len);
                prop_assert_eq!(decimals, Some(6), "token {:?}", token);
            }
        }
    }

    #[test]
    fn yolo_center_recovers_top_left(set in proptest_helpers::arb_set(10, 8)) {
        let restored = from_yolo_str(&to_yolo_string(&set)).expect("parse own output");
        let res = proptest_helpers::assert_sets_equivalent(&set, &restored, proptest_helpers::EPS_YOLO);
        prop_assert!(res.is_ok(), "{}", res.unwrap_err());
    }

    #[test]
    fn yolo_is_stable_after_one_pass(set in proptest_helpers::arb_set(10, 8)) {
        let first = to_yolo_string(&from_yolo_str(&to_yolo_string(&set)).expect("first pass"));
        let second = to_yolo_string(&from_yolo_str(&first).expect("second pass"));
        prop_assert_eq!(first, second);
    }
}
