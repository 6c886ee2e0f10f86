//! Annotation set statistics.
//!
//! Counts annotations per class, in class-list order, for display as a
//! histogram or JSON.

mod report;

pub use report::{ClassCount, StatsReport};

use crate::ir::{AnnotationSet, ClassList};

/// Options for statistics rendering.
#[derive(Clone, Debug)]
pub struct StatsOptions {
    /// Width of histogram bars (in characters).
    pub bar_width: usize,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self { bar_width: 20 }
    }
}

/// Computes the class distribution of `set`.
pub fn class_stats(set: &AnnotationSet, classes: &ClassList, opts: &StatsOptions) -> StatsReport {
    let mut counts = vec![0usize; classes.len()];
    let mut unknown = 0usize;
    let mut area_sum = 0.0;

    for ann in set {
        match counts.get_mut(ann.class_id.index()) {
            Some(count) => *count += 1,
            None => unknown += 1,
        }
        area_sum += ann.bbox.area();
    }

    let classes = classes
        .iter()
        .zip(counts)
        .map(|((id, entry), count)| ClassCount {
            class_id: id.index(),
            label: entry.name.clone(),
            count,
        })
        .collect();

    StatsReport {
        total: set.len(),
        classes,
        unknown,
        mean_area: if set.is_empty() {
            0.0
        } else {
            area_sum / set.len() as f64
        },
        bar_width: opts.bar_width,
    }
}
