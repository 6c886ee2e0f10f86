//! COCO-style JSON writer and reader.
//!
//! Only the `annotations` array is produced:
//!
//! ```json
//! {
//!   "annotations": [
//!     { "id": 1, "category_id": 0, "bbox": [64, 96, 192, 192] }
//!   ]
//! }
//! ```
//!
//! # Coordinates
//!
//! COCO bounding boxes use `[x, y, width, height]` where `(x, y)` is the
//! top-left corner in absolute pixels. Pixels are taken against a fixed
//! reference frame (640x480 by default), not the size the boxes were drawn
//! at, and rounded to whole pixels.
//!
//! # Deterministic Output
//!
//! `id` is the 1-based insertion position and entries are written in
//! insertion order, so unchanged input always yields byte-identical output.

use serde::{Deserialize, Serialize};

use super::model::{Annotation, AnnotationSet};
use super::{round_half_up, BBoxXYWH, ClassId, FrameSize, Pixel};
use crate::error::LabelpadError;

// ============================================================================
// COCO Schema Types (internal to this module)
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
struct CocoDocument {
    annotations: Vec<CocoAnnotation>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CocoAnnotation {
    id: u64,
    category_id: usize,

    /// Written as whole pixels; read leniently as floats.
    bbox: CocoBBox,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum CocoBBox {
    Pixels([i64; 4]),
    Fractional([f64; 4]),
}

impl CocoBBox {
    fn as_f64(&self) -> [f64; 4] {
        match *self {
            CocoBBox::Pixels(px) => px.map(|v| v as f64),
            CocoBBox::Fractional(px) => px,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Writes an annotation set as pretty-printed COCO JSON (2-space indent).
///
/// An empty set produces an empty `annotations` array.
pub fn to_coco_string(set: &AnnotationSet, frame: FrameSize) -> String {
    let document = set_to_coco(set, frame);
    serde_json::to_string_pretty(&document).expect("COCO document always serializes")
}

/// Reads COCO JSON produced by [`to_coco_string`] (or any document with a
/// compatible `annotations` array) back into an annotation set.
///
/// Entries are ordered by `id`; pixel boxes are divided by `frame`.
pub fn from_coco_str(json: &str, frame: FrameSize) -> Result<AnnotationSet, LabelpadError> {
    let document: CocoDocument =
        serde_json::from_str(json).map_err(|source| LabelpadError::CocoJsonParse { source })?;
    Ok(coco_to_set(document, frame))
}

/// Reads COCO JSON from a byte slice.
///
/// Useful for fuzzing and processing raw bytes without UTF-8 validation overhead.
pub fn from_coco_slice(bytes: &[u8], frame: FrameSize) -> Result<AnnotationSet, LabelpadError> {
    let document: CocoDocument =
        serde_json::from_slice(bytes).map_err(|source| LabelpadError::CocoJsonParse { source })?;
    Ok(coco_to_set(document, frame))
}

// ============================================================================
// Conversion
// ============================================================================

fn set_to_coco(set: &AnnotationSet, frame: FrameSize) -> CocoDocument {
    let annotations = set
        .iter_with_ids()
        .map(|(id, ann)| {
            let px = ann.bbox.to_pixel(frame);
            CocoAnnotation {
                id: id.as_u64(),
                category_id: ann.class_id.index(),
                bbox: CocoBBox::Pixels([
                    round_half_up(px.x),
                    round_half_up(px.y),
                    round_half_up(px.w),
                    round_half_up(px.h),
                ]),
            }
        })
        .collect();

    CocoDocument { annotations }
}

fn coco_to_set(mut document: CocoDocument, frame: FrameSize) -> AnnotationSet {
    // Stable sort keeps file order for duplicate ids.
    document.annotations.sort_by_key(|ann| ann.id);

    document
        .annotations
        .iter()
        .map(|ann| {
            let [x, y, w, h] = ann.bbox.as_f64();
            Annotation::new(
                ClassId::new(ann.category_id),
                BBoxXYWH::<Pixel>::from_xywh(x, y, w, h).to_normalized(frame),
            )
        })
        .collect()
}
