//! Pointer drag tracking for the drawing surface.

use crate::ir::{BBoxXYWH, Coord, Pixel};

/// Turns pointer-down / move / up positions into a pixel rectangle.
///
/// Positions are relative to the drawing surface's top-left corner. The
/// rectangle spans the start and current positions in whichever direction
/// the pointer moved.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragTracker {
    start: Option<Coord<Pixel>>,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true between `begin` and `finish`.
    pub fn is_active(&self) -> bool {
        self.start.is_some()
    }

    /// Starts a drag at `point`, replacing any unfinished drag.
    pub fn begin(&mut self, point: Coord<Pixel>) {
        self.start = Some(point);
    }

    /// Returns the in-progress rectangle, or `None` when no drag is active.
    pub fn update(&self, point: Coord<Pixel>) -> Option<BBoxXYWH<Pixel>> {
        self.start.map(|start| BBoxXYWH::spanning(start, point))
    }

    /// Ends the drag and returns the final rectangle.
    ///
    /// Returns `None` when no drag was active (e.g. pointer-up or
    /// pointer-leave without a preceding pointer-down).
    pub fn finish(&mut self, point: Coord<Pixel>) -> Option<BBoxXYWH<Pixel>> {
        self.start
            .take()
            .map(|start| BBoxXYWH::spanning(start, point))
    }
}
