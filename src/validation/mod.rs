//! Annotation set validation.
//!
//! Checks a (typically decoded) annotation set against the box model's
//! invariants:
//! - Geometric validity (finite, positive size, within the unit frame)
//! - Class references (every class id indexes the class list)
//! - Exact duplicates (warning only; duplicates are allowed)

mod report;

pub use report::{IssueCode, Severity, ValidationIssue, ValidationReport};

use std::collections::HashMap;

use crate::ir::{AnnotationSet, ClassList};

/// Options for validation behavior.
#[derive(Clone, Debug)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,

    /// Slack (in normalized units) allowed past the `[0, 1]` bounds, to
    /// absorb rounding from pixel-based formats.
    pub tolerance: f64,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            strict: false,
            tolerance: 1e-9,
        }
    }
}

/// Validates an annotation set and returns a report of all issues found.
pub fn validate_set(
    set: &AnnotationSet,
    classes: &ClassList,
    opts: &ValidateOptions,
) -> ValidationReport {
    let mut report = ValidationReport::new();
    let lo = -opts.tolerance;
    let hi = 1.0 + opts.tolerance;

    // Keyed on the exact bit patterns; only identical boxes count.
    let mut seen: HashMap<(usize, [u64; 4]), u64> = HashMap::new();

    for (id, ann) in set.iter_with_ids() {
        let id = id.as_u64();
        let bbox = &ann.bbox;

        if !classes.contains(ann.class_id) {
            report.add(ValidationIssue::error(
                IssueCode::UnknownClass,
                format!(
                    "class id {} is out of range for {} class(es)",
                    ann.class_id,
                    classes.len()
                ),
                id,
            ));
        }

        if !bbox.is_finite() {
            report.add(ValidationIssue::error(
                IssueCode::NonFiniteCoordinate,
                format!(
                    "non-finite box ({}, {}, {}, {})",
                    bbox.x, bbox.y, bbox.w, bbox.h
                ),
                id,
            ));
            continue; // Skip further bbox checks if coordinates are invalid
        }

        if !bbox.has_area() {
            report.add(ValidationIssue::error(
                IssueCode::DegenerateBox,
                format!("zero or negative size {:.6}x{:.6}", bbox.w, bbox.h),
                id,
            ));
        }

        let fields = [("x", bbox.x), ("y", bbox.y), ("w", bbox.w), ("h", bbox.h)];
        for (name, value) in fields {
            if value < lo || value > hi {
                report.add(ValidationIssue::error(
                    IssueCode::CoordinateOutOfRange,
                    format!("{name} = {value:.6} is outside [0, 1]"),
                    id,
                ));
            }
        }

        if bbox.xmax() > hi || bbox.ymax() > hi {
            report.add(ValidationIssue::error(
                IssueCode::BoxExceedsFrame,
                format!(
                    "far corner ({:.6}, {:.6}) lies past the frame",
                    bbox.xmax(),
                    bbox.ymax()
                ),
                id,
            ));
        }

        let key = (
            ann.class_id.index(),
            [bbox.x, bbox.y, bbox.w, bbox.h].map(f64::to_bits),
        );
        if let Some(first) = seen.get(&key) {
            report.add(ValidationIssue::warning(
                IssueCode::DuplicateBox,
                format!("identical to annotation {first}"),
                id,
            ));
        } else {
            seen.insert(key, id);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Annotation, BBoxXYWH};

    fn set_of(boxes: &[(usize, f64, f64, f64, f64)]) -> AnnotationSet {
        boxes
            .iter()
            .map(|&(c, x, y, w, h)| Annotation::new(c, BBoxXYWH::from_xywh(x, y, w, h)))
            .collect()
    }

    #[test]
    fn clean_set_has_no_issues() {
        let set = set_of(&[(0, 0.1, 0.2, 0.3, 0.4), (9, 0.0, 0.0, 1.0, 1.0)]);
        let report = validate_set(&set, &ClassList::default(), &ValidateOptions::default());
        assert!(report.is_ok_strict(), "{report}");
    }

    #[test]
    fn flags_unknown_class() {
        let set = set_of(&[(10, 0.1, 0.1, 0.1, 0.1)]);
        let report = validate_set(&set, &ClassList::default(), &ValidateOptions::default());
        assert!(report.has(IssueCode::UnknownClass));
        assert_eq!(report.error_count(), 1);
    }

    #[test]
    fn flags_out_of_range_and_exceeding_boxes() {
        let set = set_of(&[(0, -0.2, 0.1, 0.5, 0.5), (0, 0.7, 0.7, 0.5, 0.2)]);
        let report = validate_set(&set, &ClassList::default(), &ValidateOptions::default());
        assert!(report.has(IssueCode::CoordinateOutOfRange));
        assert!(report.has(IssueCode::BoxExceedsFrame));
        assert!(report.issues.iter().any(|i| i.annotation == 2));
    }

    #[test]
    fn tolerance_absorbs_pixel_rounding() {
        let set = set_of(&[(0, 0.5, 0.5, 0.5 + 1.0 / 1280.0, 0.5)]);
        let strict = validate_set(&set, &ClassList::default(), &ValidateOptions::default());
        assert!(strict.has(IssueCode::BoxExceedsFrame));

        let lenient = ValidateOptions {
            tolerance: 1.0 / 480.0,
            ..Default::default()
        };
        assert!(validate_set(&set, &ClassList::default(), &lenient).is_ok());
    }

    #[test]
    fn flags_degenerate_and_non_finite_boxes() {
        let set = set_of(&[(0, 0.1, 0.1, 0.0, 0.2), (0, f64::NAN, 0.1, 0.2, 0.2)]);
        let report = validate_set(&set, &ClassList::default(), &ValidateOptions::default());
        assert!(report.has(IssueCode::DegenerateBox));
        assert!(report.has(IssueCode::NonFiniteCoordinate));
    }

    #[test]
    fn duplicates_are_only_warnings() {
        let set = set_of(&[(1, 0.1, 0.1, 0.2, 0.2), (1, 0.1, 0.1, 0.2, 0.2)]);
        let report = validate_set(&set, &ClassList::default(), &ValidateOptions::default());
        assert!(report.is_ok());
        assert!(!report.is_ok_strict());
        assert_eq!(report.warning_count(), 1);
        assert!(report.to_string().contains("DuplicateBox"));
    }
}
