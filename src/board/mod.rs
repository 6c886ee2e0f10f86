//! The box model: sole owner of the drawn annotation set.
//!
//! All mutations go through [`BoxModel`], which keeps every stored
//! annotation inside the unit square and tagged with a known class.

mod drag;

pub use drag::DragTracker;

use crate::error::LabelpadError;
use crate::ir::{Annotation, AnnotationSet, BBoxXYWH, ClassId, ClassList, FrameSize, Pixel};
use crate::validation::{validate_set, ValidateOptions};

/// Rectangles must be strictly larger than this many source pixels on both
/// sides to be kept. Smaller ones are treated as accidental clicks.
pub const MIN_BOX_SIDE_PX: f64 = 10.0;

/// Ordered collection of normalized annotations with add / undo / clear.
#[derive(Clone, Debug)]
pub struct BoxModel {
    set: AnnotationSet,
    class_count: usize,
}

impl BoxModel {
    /// Creates an empty model for the given class list.
    pub fn new(classes: &ClassList) -> Self {
        Self {
            set: AnnotationSet::new(),
            class_count: classes.len(),
        }
    }

    /// Seeds a model from an existing set (e.g. a decoded export).
    ///
    /// Fails with [`LabelpadError::ValidationFailed`] if any annotation
    /// breaks the model's invariants.
    pub fn from_set(set: AnnotationSet, classes: &ClassList) -> Result<Self, LabelpadError> {
        let report = validate_set(&set, classes, &ValidateOptions::default());
        if !report.is_ok() {
            return Err(LabelpadError::ValidationFailed {
                error_count: report.error_count(),
                warning_count: report.warning_count(),
                report,
            });
        }
        Ok(Self {
            set,
            class_count: classes.len(),
        })
    }

    /// Normalizes a drawn pixel rectangle against the rendered canvas size
    /// and appends it.
    ///
    /// Returns `None` without touching the set when the rectangle is not
    /// larger than [`MIN_BOX_SIDE_PX`] on both sides, the canvas has no
    /// area, the class is unknown, or the rectangle lies outside the canvas.
    /// Rectangles reaching past the canvas edge are clipped to it, and the
    /// side check applies again to the clipped rectangle.
    pub fn add_box(
        &mut self,
        rect: BBoxXYWH<Pixel>,
        canvas: FrameSize,
        class_id: ClassId,
    ) -> Option<Annotation> {
        if !rect.is_finite() || rect.w <= MIN_BOX_SIDE_PX || rect.h <= MIN_BOX_SIDE_PX {
            log::debug!("ignoring {rect:?}: not larger than {MIN_BOX_SIDE_PX}px per side");
            return None;
        }
        if !canvas.is_usable() {
            log::debug!("ignoring {rect:?}: canvas {canvas} has no area");
            return None;
        }
        if class_id.index() >= self.class_count {
            log::warn!(
                "ignoring {rect:?}: class {class_id} not in list of {}",
                self.class_count
            );
            return None;
        }
        let Some(clipped) = rect.clip_to(canvas) else {
            log::debug!("ignoring {rect:?}: outside canvas {canvas}");
            return None;
        };
        if clipped.w <= MIN_BOX_SIDE_PX || clipped.h <= MIN_BOX_SIDE_PX {
            log::debug!("ignoring {rect:?}: only {clipped:?} inside canvas {canvas}");
            return None;
        }

        let annotation = Annotation::new(class_id, clipped.to_normalized(canvas));
        self.set.annotations.push(annotation);
        log::debug!("added box {}, total: {}", annotation.class_id, self.count());
        Some(annotation)
    }

    /// Removes and returns the most recently added annotation.
    pub fn undo(&mut self) -> Option<Annotation> {
        let removed = self.set.annotations.pop();
        if removed.is_some() {
            log::debug!("undo, total: {}", self.count());
        }
        removed
    }

    /// Removes every annotation.
    pub fn clear(&mut self) {
        log::debug!("clearing {} box(es)", self.count());
        self.set.annotations.clear();
    }

    /// Number of stored annotations.
    #[inline]
    pub fn count(&self) -> usize {
        self.set.len()
    }

    /// Read-only view of the current set.
    #[inline]
    pub fn annotations(&self) -> &AnnotationSet {
        &self.set
    }
}
