//! Core annotation model.
//!
//! Every encoder reads this representation and every decoder produces it.
//! Construction is permissive: an [`AnnotationSet`] decoded from a file may
//! hold out-of-range boxes, which validation reports. Only the
//! [`BoxModel`](crate::board::BoxModel) guarantees the in-range invariants.

use serde::{Deserialize, Serialize};

use super::bbox::BBoxXYWH;
use super::ids::{AnnotationId, ClassId};
use super::space::Normalized;

/// One labeled bounding box in normalized coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// Index into the class list.
    pub class_id: ClassId,

    /// Top-left corner and size, as fractions of the frame.
    pub bbox: BBoxXYWH<Normalized>,
}

impl Annotation {
    pub fn new(class_id: impl Into<ClassId>, bbox: BBoxXYWH<Normalized>) -> Self {
        Self {
            class_id: class_id.into(),
            bbox,
        }
    }
}

/// An ordered sequence of annotations.
///
/// Insertion order is significant: it is the display order, the COCO id
/// order and the undo order. Duplicates are allowed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationSet {
    pub annotations: Vec<Annotation>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Iterates annotations with their 1-based ids.
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (AnnotationId, &Annotation)> {
        self.annotations
            .iter()
            .enumerate()
            .map(|(i, ann)| (AnnotationId::from_index(i), ann))
    }
}

impl From<Vec<Annotation>> for AnnotationSet {
    fn from(annotations: Vec<Annotation>) -> Self {
        Self { annotations }
    }
}

impl FromIterator<Annotation> for AnnotationSet {
    fn from_iter<I: IntoIterator<Item = Annotation>>(iter: I) -> Self {
        Self {
            annotations: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a AnnotationSet {
    type Item = &'a Annotation;
    type IntoIter = std::slice::Iter<'a, Annotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.annotations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_insertion_order() {
        let set: AnnotationSet = vec![
            Annotation::new(3usize, BBoxXYWH::from_xywh(0.1, 0.1, 0.2, 0.2)),
            Annotation::new(1usize, BBoxXYWH::from_xywh(0.5, 0.5, 0.2, 0.2)),
        ]
        .into();

        let ids: Vec<(u64, usize)> = set
            .iter_with_ids()
            .map(|(id, ann)| (id.as_u64(), ann.class_id.index()))
            .collect();
        assert_eq!(ids, vec![(1, 3), (2, 1)]);
    }

    #[test]
    fn serializes_with_flat_bbox_fields() {
        let ann = Annotation::new(0usize, BBoxXYWH::from_xywh(0.5, 0.25, 0.125, 0.25));
        let json = serde_json::to_string(&ann).expect("serialize annotation");
        assert_eq!(
            json,
            r#"{"class_id":0,"bbox":{"x":0.5,"y":0.25,"w":0.125,"h":0.25}}"#
        );
    }
}
