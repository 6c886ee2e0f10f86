//! YOLO label text writer and reader.
//!
//! One row per box: `class_id x_center y_center width height`, with all four
//! numbers normalized to the frame. Rows starting with `#` are comments.

use std::fmt::Write as _;

use super::model::{Annotation, AnnotationSet};
use super::{BBoxXYWH, ClassId, Normalized};
use crate::error::LabelpadError;

/// Header written above the rows of a non-empty export.
pub const YOLO_HEADER: &str = "# YOLO Format (normalized)";

/// Output for an empty set: an instructional comment, never an empty file.
pub const YOLO_PLACEHOLDER: &str =
    "# Draw boxes to see annotations here\n# Format: class_id x_center y_center width height";

/// Writes an annotation set as YOLO label text.
///
/// Every row is newline-terminated and every number has six decimals.
pub fn to_yolo_string(set: &AnnotationSet) -> String {
    if set.is_empty() {
        return YOLO_PLACEHOLDER.to_string();
    }

    let mut out = String::with_capacity(YOLO_HEADER.len() + 1 + set.len() * 40);
    out.push_str(YOLO_HEADER);
    out.push('\n');

    for ann in set {
        let (cx, cy, w, h) = ann.bbox.to_cxcywh();
        writeln!(
            out,
            "{} {} {} {} {}",
            ann.class_id,
            fixed6(cx),
            fixed6(cy),
            fixed6(w),
            fixed6(h)
        )
        .expect("write to string");
    }

    out
}

/// Six-decimal text with exact ties rounded away from zero.
///
/// `{:.6}` breaks exact ties toward the even digit, so `0.5078125` would
/// print as `0.507812`.
fn fixed6(value: f64) -> String {
    let scaled = value * 1e6;
    let exact = value.mul_add(1e6, -scaled) == 0.0;
    if exact && scaled.fract().abs() == 0.5 {
        format!("{:.6}", (scaled + 0.5_f64.copysign(scaled)) / 1e6)
    } else {
        format!("{value:.6}")
    }
}

/// Reads YOLO label text into an annotation set.
///
/// Blank rows and `#` comments are skipped, so the output of
/// [`to_yolo_string`] (including the empty placeholder) reads back cleanly.
/// Class ids are not checked against a class list here; see
/// [`validate_set`](crate::validation::validate_set).
pub fn from_yolo_str(text: &str) -> Result<AnnotationSet, LabelpadError> {
    let mut annotations = Vec::new();

    for (line_idx, line) in text.lines().enumerate() {
        let Some(row) = parse_label_line(line, line_idx + 1)? else {
            continue;
        };
        annotations.push(Annotation::new(
            row.class_id,
            BBoxXYWH::<Normalized>::from_cxcywh(row.cx, row.cy, row.w, row.h),
        ));
    }

    Ok(AnnotationSet::from(annotations))
}

#[derive(Debug, PartialEq)]
struct YoloLabelRow {
    class_id: ClassId,
    cx: f64,
    cy: f64,
    w: f64,
    h: f64,
}

fn parse_label_line(line: &str, line_num: usize) -> Result<Option<YoloLabelRow>, LabelpadError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    // Take at most 6 tokens so pathological inputs do not allocate unbounded memory.
    let tokens: Vec<&str> = trimmed.split_whitespace().take(6).collect();

    if tokens.len() != 5 {
        return Err(LabelpadError::YoloParse {
            line: line_num,
            message: format!(
                "expected 5 tokens, found {}",
                if tokens.len() > 5 {
                    "more than 5".to_string()
                } else {
                    tokens.len().to_string()
                }
            ),
        });
    }

    let class_id = tokens[0]
        .parse::<usize>()
        .map_err(|_| LabelpadError::YoloParse {
            line: line_num,
            message: format!(
                "invalid class_id '{}'; expected non-negative integer",
                tokens[0]
            ),
        })?;

    let cx = parse_f64_token(tokens[1], "x_center", line_num)?;
    let cy = parse_f64_token(tokens[2], "y_center", line_num)?;
    let w = parse_f64_token(tokens[3], "width", line_num)?;
    let h = parse_f64_token(tokens[4], "height", line_num)?;

    Ok(Some(YoloLabelRow {
        class_id: ClassId::new(class_id),
        cx,
        cy,
        w,
        h,
    }))
}

/// Fuzz-only entrypoint for YOLO single-line parsing.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_label_line(input: &str) -> Result<(), LabelpadError> {
    let _ = parse_label_line(input, 1)?;
    Ok(())
}

fn parse_f64_token(raw: &str, field_name: &str, line_num: usize) -> Result<f64, LabelpadError> {
    raw.parse::<f64>().map_err(|_| LabelpadError::YoloParse {
        line: line_num,
        message: format!("invalid {field_name} '{raw}'; expected floating-point number"),
    })
}
