//! Annotation model for labelpad.
//!
//! This module defines the format-agnostic representation of a drawn
//! annotation set and the three text formats it is exported to.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: Marker types keep pixel rectangles (from a drawing
//!    surface or an export frame) apart from normalized ones.
//!
//! 2. **Canonical Form**: Annotations are stored as top-left + size in
//!    normalized `[0, 1]` coordinates, independent of the canvas size.
//!
//! 3. **Permissive Construction**: Decoded sets may hold invalid boxes so
//!    that validation can report them instead of the parser failing.
//!
//! # Example
//!
//! ```
//! use labelpad::ir::{Annotation, AnnotationSet, BBoxXYWH, Normalized};
//!
//! let set: AnnotationSet = vec![Annotation::new(
//!     0usize,
//!     BBoxXYWH::<Normalized>::from_xywh(0.1, 0.2, 0.3, 0.4),
//! )]
//! .into();
//! assert_eq!(set.len(), 1);
//! ```

mod bbox;
mod classes;
mod coord;
mod frame;
mod ids;
pub mod io_coco_json;
pub mod io_voc_xml;
pub mod io_yolo;
mod model;
mod space;

pub use bbox::BBoxXYWH;
pub use classes::{ClassEntry, ClassList, Rgb};
pub use coord::Coord;
pub use frame::FrameSize;
pub use ids::{AnnotationId, ClassId};
pub use model::{Annotation, AnnotationSet};
pub use space::{Normalized, Pixel};

/// Rounds half-way values up (towards positive infinity).
///
/// This is how pixel values are rounded in COCO and Pascal exports.
#[inline]
pub(crate) fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
