//! Playground session: the explicit context object a UI shell drives.
//!
//! A [`Session`] owns the box model, the selected class, the active export
//! tab and the presentation preferences. Every successful mutation calls
//! back into the host's [`Surface`] synchronously: first the overlay is
//! re-rendered, then the export text is re-encoded. Nothing is batched.

use crate::board::{BoxModel, DragTracker};
use crate::config::PlaygroundConfig;
use crate::error::LabelpadError;
use crate::export::ExportFormat;
use crate::ir::{Annotation, BBoxXYWH, ClassId, Coord, FrameSize, Pixel};
use crate::overlay::{render_overlay, OverlayItem};

/// The host's display: an overlay layer and a text output panel.
pub trait Surface {
    /// Replaces the drawn rectangles with `items`.
    fn render_overlay(&mut self, items: &[OverlayItem]);

    /// Replaces the export panel's text.
    fn show_output(&mut self, text: &str);
}

/// Color scheme of the host page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Presentation flags. They never influence the box model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub sound_enabled: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            sound_enabled: true,
        }
    }
}

/// Single-owner playground state.
#[derive(Clone, Debug)]
pub struct Session {
    config: PlaygroundConfig,
    model: BoxModel,
    selected_class: ClassId,
    format: ExportFormat,
    preferences: Preferences,
    drag: DragTracker,
}

impl Session {
    /// Starts an empty session with class 0 selected and the YOLO tab active.
    pub fn new(config: PlaygroundConfig) -> Result<Self, LabelpadError> {
        config.check()?;
        let model = BoxModel::new(&config.classes);
        Ok(Self {
            config,
            model,
            selected_class: ClassId::new(0),
            format: ExportFormat::default(),
            preferences: Preferences::default(),
            drag: DragTracker::new(),
        })
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    pub fn model(&self) -> &BoxModel {
        &self.model
    }

    pub fn selected_class(&self) -> ClassId {
        self.selected_class
    }

    pub fn format(&self) -> ExportFormat {
        self.format
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    /// The export text for the current set and tab.
    pub fn output(&self) -> String {
        self.format.encode(self.model.annotations(), &self.config)
    }

    /// The overlay description for the current set.
    pub fn overlay(&self) -> Vec<OverlayItem> {
        render_overlay(self.model.annotations(), &self.config.classes)
    }

    /// Adds a finished pixel rectangle with the selected class.
    ///
    /// The surface is only refreshed when the box was kept.
    pub fn release(
        &mut self,
        rect: BBoxXYWH<Pixel>,
        canvas: FrameSize,
        surface: &mut dyn Surface,
    ) -> Option<Annotation> {
        let added = self.model.add_box(rect, canvas, self.selected_class)?;
        self.refresh(surface);
        Some(added)
    }

    pub fn pointer_down(&mut self, point: Coord<Pixel>) {
        self.drag.begin(point);
    }

    /// Returns the dashed preview for the in-progress drag, if any.
    pub fn pointer_move(&self, point: Coord<Pixel>, canvas: FrameSize) -> Option<OverlayItem> {
        if !canvas.is_usable() {
            return None;
        }
        let rect = self.drag.update(point)?;
        Some(OverlayItem::preview(
            rect.to_normalized(canvas),
            self.selected_class,
            &self.config.classes,
        ))
    }

    /// Ends the drag and adds the rectangle through [`Session::release`].
    pub fn pointer_up(
        &mut self,
        point: Coord<Pixel>,
        canvas: FrameSize,
        surface: &mut dyn Surface,
    ) -> Option<Annotation> {
        let rect = self.drag.finish(point)?;
        self.release(rect, canvas, surface)
    }

    /// Leaving the surface ends the drag exactly like releasing the pointer.
    pub fn pointer_leave(
        &mut self,
        point: Coord<Pixel>,
        canvas: FrameSize,
        surface: &mut dyn Surface,
    ) -> Option<Annotation> {
        self.pointer_up(point, canvas, surface)
    }

    /// Removes the last box. Nothing is refreshed when the set was empty.
    pub fn undo(&mut self, surface: &mut dyn Surface) -> Option<Annotation> {
        let removed = self.model.undo()?;
        self.refresh(surface);
        Some(removed)
    }

    /// Removes every box and refreshes the surface.
    pub fn clear(&mut self, surface: &mut dyn Surface) {
        self.model.clear();
        self.refresh(surface);
    }

    /// Selects the class for subsequently drawn boxes.
    pub fn select_class(&mut self, class_id: ClassId) -> Result<(), LabelpadError> {
        if !self.config.classes.contains(class_id) {
            return Err(LabelpadError::UnknownClass {
                class_id: class_id.index(),
                class_count: self.config.classes.len(),
            });
        }
        log::debug!("selected class {class_id}");
        self.selected_class = class_id;
        Ok(())
    }

    /// Switches the export tab and re-encodes. The overlay is untouched.
    pub fn select_format(&mut self, format: ExportFormat, surface: &mut dyn Surface) {
        log::debug!("switched output to {format}");
        self.format = format;
        surface.show_output(&self.output());
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.preferences.theme = self.preferences.theme.toggled();
        self.preferences.theme
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.preferences.sound_enabled = !self.preferences.sound_enabled;
        self.preferences.sound_enabled
    }

    fn refresh(&self, surface: &mut dyn Surface) {
        surface.render_overlay(&self.overlay());
        surface.show_output(&self.output());
    }
}
