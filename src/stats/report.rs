//! Stats report types and terminal formatting.

use serde::Serialize;
use std::fmt;

/// Class distribution of an annotation set.
#[derive(Clone, Debug, Serialize)]
pub struct StatsReport {
    /// Total number of annotations.
    pub total: usize,
    /// One entry per class in class-list order, including empty classes.
    pub classes: Vec<ClassCount>,
    /// Annotations whose class id is not in the class list.
    pub unknown: usize,
    /// Mean box area as a fraction of the frame (0 for an empty set).
    pub mean_area: f64,
    /// Display-only option for histogram rendering width.
    #[serde(skip)]
    pub(crate) bar_width: usize,
}

/// Annotation count for one class.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassCount {
    pub class_id: usize,
    pub label: String,
    pub count: usize,
}

impl StatsReport {
    /// Count for the class with this label, if it is in the list.
    pub fn count_of(&self, label: &str) -> Option<usize> {
        self.classes
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.count)
    }
}

impl fmt::Display for StatsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Annotations: {}", self.total)?;
        writeln!(f, "Mean area:   {:.1}% of frame", self.mean_area * 100.0)?;
        writeln!(f)?;
        writeln!(f, "Class distribution:")?;

        let max_count = self
            .classes
            .iter()
            .map(|e| e.count)
            .chain(std::iter::once(self.unknown))
            .max()
            .unwrap_or(0);

        for entry in &self.classes {
            writeln!(
                f,
                "  {:>2} {:<12} {:>5} {:>5.1}%  {}",
                entry.class_id,
                truncate_label(&entry.label, 12),
                entry.count,
                percent(entry.count, self.total),
                render_bar(entry.count, max_count, self.bar_width)
            )?;
        }

        if self.unknown > 0 {
            writeln!(
                f,
                "   {:<15} {:>5} {:>5.1}%  {}",
                "(unknown)",
                self.unknown,
                percent(self.unknown, self.total),
                render_bar(self.unknown, max_count, self.bar_width)
            )?;
        }

        Ok(())
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (count as f64 / total as f64) * 100.0
    }
}

/// Render a horizontal bar using Unicode block characters.
fn render_bar(count: usize, max_count: usize, width: usize) -> String {
    if max_count == 0 || width == 0 {
        return "░".repeat(width);
    }

    let filled = ((count * width) / max_count).min(width);
    "█".repeat(filled) + &"░".repeat(width - filled)
}

/// Truncate a label to fit in the display column.
fn truncate_label(label: &str, max_len: usize) -> String {
    if label.chars().count() <= max_len {
        label.to_string()
    } else {
        let head: String = label.chars().take(max_len - 1).collect();
        format!("{head}…")
    }
}
