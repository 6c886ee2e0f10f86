#![allow(dead_code)]

use labelpad::ir::{Annotation, AnnotationSet, BBoxXYWH, ClassId, FrameSize, Normalized, Pixel};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

/// YOLO keeps six decimals of the center and size.
pub const EPS_YOLO: f64 = 1e-6;

/// Whole-pixel rounding in the given frame.
pub fn eps_pixels(frame: FrameSize) -> f64 {
    1.0 / frame.width.min(frame.height)
}

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Compares two sets pairwise: same length, same classes, boxes within `eps`
/// per field.
pub fn assert_sets_equivalent(a: &AnnotationSet, b: &AnnotationSet, eps: f64) -> Result<(), String> {
    if a.len() != b.len() {
        return Err(format!("length mismatch: {} vs {}", a.len(), b.len()));
    }

    for (idx, (left, right)) in a.annotations.iter().zip(&b.annotations).enumerate() {
        if left.class_id != right.class_id {
            return Err(format!(
                "annotation {}: class {} vs {}",
                idx + 1,
                left.class_id,
                right.class_id
            ));
        }
        let l = [left.bbox.x, left.bbox.y, left.bbox.w, left.bbox.h];
        let r = [right.bbox.x, right.bbox.y, right.bbox.w, right.bbox.h];
        for (field, (lv, rv)) in ["x", "y", "w", "h"].iter().zip(l.iter().zip(r.iter())) {
            if (lv - rv).abs() > eps {
                return Err(format!(
                    "annotation {}: {field} {lv} vs {rv} (eps {eps})",
                    idx + 1
                ));
            }
        }
    }

    Ok(())
}

/// A normalized box inside the unit square with sides of at least `min_side`.
pub fn arb_unit_box(min_side: f64) -> BoxedStrategy<BBoxXYWH<Normalized>> {
    (min_side..=1.0, min_side..=1.0, 0.0..=1.0f64, 0.0..=1.0f64)
        .prop_map(|(w, h, fx, fy)| BBoxXYWH::from_xywh(fx * (1.0 - w), fy * (1.0 - h), w, h))
        .boxed()
}

pub fn arb_annotation(class_count: usize) -> BoxedStrategy<Annotation> {
    (0..class_count, arb_unit_box(0.02))
        .prop_map(|(class_id, bbox)| Annotation::new(ClassId::new(class_id), bbox))
        .boxed()
}

pub fn arb_set(class_count: usize, max_anns: usize) -> BoxedStrategy<AnnotationSet> {
    proptest::collection::vec(arb_annotation(class_count), 0..=max_anns)
        .prop_map(AnnotationSet::from)
        .boxed()
}

/// A canvas size as a browser might report it.
pub fn arb_canvas() -> BoxedStrategy<FrameSize> {
    (20u32..=4096, 20u32..=4096)
        .prop_map(|(w, h)| FrameSize::new(w as f64, h as f64))
        .boxed()
}

/// A pixel rectangle anywhere around the canvas, including past its edges.
pub fn arb_pixel_rect(canvas: FrameSize) -> BoxedStrategy<BBoxXYWH<Pixel>> {
    (
        -canvas.width..=canvas.width * 1.5,
        -canvas.height..=canvas.height * 1.5,
        0.0..=canvas.width * 1.5,
        0.0..=canvas.height * 1.5,
    )
        .prop_map(|(x, y, w, h)| BBoxXYWH::from_xywh(x, y, w, h))
        .boxed()
}

/// A whole-pixel rectangle fully inside the canvas with both sides over 10 px.
pub fn arb_rect_inside(canvas: FrameSize) -> BoxedStrategy<BBoxXYWH<Pixel>> {
    let (cw, ch) = (canvas.width as u32, canvas.height as u32);
    (11u32..=cw, 11u32..=ch)
        .prop_flat_map(move |(w, h)| (0u32..=cw - w, 0u32..=ch - h, Just(w), Just(h)))
        .prop_map(|(x, y, w, h)| BBoxXYWH::from_xywh(x as f64, y as f64, w as f64, h as f64))
        .boxed()
}
