use labelpad::board::{BoxModel, MIN_BOX_SIDE_PX};
use labelpad::ir::{BBoxXYWH, ClassId, ClassList};
use labelpad::validation::{validate_set, ValidateOptions};
use proptest::prelude::*;

mod proptest_helpers;

proptest! {
    #![proptest_config(proptest_helpers::proptest_config())]

    #[test]
    fn stored_boxes_stay_inside_the_unit_square(
        (canvas, rects) in proptest_helpers::arb_canvas().prop_flat_map(|canvas| {
            (Just(canvas), proptest::collection::vec(proptest_helpers::arb_pixel_rect(canvas), 0..12))
        }),
        class in 0usize..10,
    ) {
        let classes = ClassList::default();
        let mut model = BoxModel::new(&classes);

        for rect in rects {
            let before = model.count();
            let added = model.add_box(rect, canvas, ClassId::new(class));
            if rect.w <= MIN_BOX_SIDE_PX || rect.h <= MIN_BOX_SIDE_PX {
                prop_assert!(added.is_none());
            }
            prop_assert_eq!(model.count(), before + usize::from(added.is_some()));
        }

        let report = validate_set(model.annotations(), &classes, &ValidateOptions::default());
        prop_assert!(report.is_ok(), "{}", report);
    }

    #[test]
    fn undo_removes_only_the_last_box(
        (canvas, rects) in proptest_helpers::arb_canvas().prop_flat_map(|canvas| {
            (Just(canvas), proptest::collection::vec(proptest_helpers::arb_pixel_rect(canvas), 1..8))
        }),
    ) {
        let classes = ClassList::default();
        let mut model = BoxModel::new(&classes);
        for rect in rects {
            model.add_box(rect, canvas, ClassId::new(0));
        }

        let snapshot = model.annotations().clone();
        let removed = model.undo();
        match removed {
            Some(last) => {
                prop_assert_eq!(Some(&last), snapshot.annotations.last());
                prop_assert_eq!(&model.annotations().annotations[..], &snapshot.annotations[..snapshot.len() - 1]);
            }
            None => prop_assert!(snapshot.is_empty()),
        }
    }

    #[test]
    fn undo_then_readd_restores_the_set(
        (canvas, rects) in proptest_helpers::arb_canvas().prop_flat_map(|canvas| {
            (Just(canvas), proptest::collection::vec(proptest_helpers::arb_rect_inside(canvas), 1..8))
        }),
        class in 0usize..10,
    ) {
        let classes = ClassList::default();
        let mut model = BoxModel::new(&classes);
        for rect in &rects {
            prop_assert!(model.add_box(*rect, canvas, ClassId::new(class)).is_some());
        }

        let before_undo = model.annotations().clone();
        prop_assert!(model.undo().is_some());
        let last = rects[rects.len() - 1];
        prop_assert!(model.add_box(last, canvas, ClassId::new(class)).is_some());
        prop_assert_eq!(model.annotations(), &before_undo);
    }

    #[test]
    fn in_canvas_rects_store_exact_fractions(
        (canvas, rect) in proptest_helpers::arb_canvas().prop_flat_map(|canvas| {
            (Just(canvas), proptest_helpers::arb_rect_inside(canvas))
        }),
        class in 0usize..10,
    ) {
        let classes = ClassList::default();
        let mut model = BoxModel::new(&classes);
        let added = model.add_box(rect, canvas, ClassId::new(class));
        prop_assert!(added.is_some());

        let expected = BBoxXYWH::from_xywh(
            rect.x / canvas.width,
            rect.y / canvas.height,
            rect.w / canvas.width,
            rect.h / canvas.height,
        );
        let stored = model.annotations().annotations[0];
        prop_assert_eq!(stored.bbox, expected);
        prop_assert_eq!(stored.class_id, ClassId::new(class));
    }
}
