//! Render descriptions for the box overlay.
//!
//! The overlay is a pure function of the annotation set; a host turns the
//! items into DOM nodes, canvas strokes or terminal cells as it sees fit.

use serde::Serialize;

use crate::ir::{AnnotationSet, BBoxXYWH, ClassId, ClassList, FrameSize, Normalized, Pixel, Rgb};

/// Fallback color for class ids outside the list.
const UNKNOWN_CLASS_COLOR: Rgb = Rgb::new(0x80, 0x80, 0x80);

/// Stroke style of an overlay rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayStyle {
    /// A committed annotation.
    Solid,
    /// The rectangle currently being dragged.
    Dashed,
}

/// One rectangle to draw, with its label.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverlayItem {
    /// 1-based position in the set; 0 for the drag preview.
    pub index: usize,
    pub rect: BBoxXYWH<Normalized>,
    pub color: Rgb,
    pub label: String,
    pub style: OverlayStyle,
}

impl OverlayItem {
    /// The rectangle in pixels on a surface rendered at `canvas`.
    pub fn to_pixel(&self, canvas: FrameSize) -> BBoxXYWH<Pixel> {
        self.rect.to_pixel(canvas)
    }

    /// Builds the dashed preview for an in-progress drag.
    pub fn preview(rect: BBoxXYWH<Normalized>, class_id: ClassId, classes: &ClassList) -> Self {
        let (color, label) = appearance(class_id, classes);
        Self {
            index: 0,
            rect,
            color,
            label,
            style: OverlayStyle::Dashed,
        }
    }
}

/// Describes the overlay for `set`: one solid item per annotation, in order.
pub fn render_overlay(set: &AnnotationSet, classes: &ClassList) -> Vec<OverlayItem> {
    set.iter_with_ids()
        .map(|(id, ann)| {
            let (color, label) = appearance(ann.class_id, classes);
            OverlayItem {
                index: id.as_u64() as usize,
                rect: ann.bbox,
                color,
                label,
                style: OverlayStyle::Solid,
            }
        })
        .collect()
}

fn appearance(class_id: ClassId, classes: &ClassList) -> (Rgb, String) {
    let color = classes
        .get(class_id)
        .map(|entry| entry.color)
        .unwrap_or(UNKNOWN_CLASS_COLOR);
    (color, classes.name_or_placeholder(class_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Annotation;

    #[test]
    fn one_item_per_annotation_with_class_appearance() {
        let set: AnnotationSet = vec![
            Annotation::new(1usize, BBoxXYWH::from_xywh(0.1, 0.1, 0.2, 0.2)),
            Annotation::new(0usize, BBoxXYWH::from_xywh(0.5, 0.5, 0.25, 0.25)),
        ]
        .into();
        let items = render_overlay(&set, &ClassList::default());

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].index, 1);
        assert_eq!(items[0].label, "car");
        assert_eq!(items[0].color.to_string(), "#4ECDC4");
        assert_eq!(items[1].label, "person");
        assert!(items.iter().all(|i| i.style == OverlayStyle::Solid));
        assert_eq!(
            items[1].to_pixel(FrameSize::new(400.0, 200.0)),
            BBoxXYWH::from_xywh(200.0, 100.0, 100.0, 50.0)
        );
    }

    #[test]
    fn empty_set_renders_nothing() {
        assert!(render_overlay(&AnnotationSet::new(), &ClassList::default()).is_empty());
    }

    #[test]
    fn preview_is_dashed() {
        let item = OverlayItem::preview(
            BBoxXYWH::from_xywh(0.0, 0.0, 0.5, 0.5),
            ClassId(2),
            &ClassList::default(),
        );
        assert_eq!(item.style, OverlayStyle::Dashed);
        assert_eq!(item.label, "dog");
        assert_eq!(item.index, 0);
    }
}
