//! Coordinate space marker types.
//!
//! Zero-sized types used as type parameters so that pixel rectangles coming
//! from a drawing surface can never be stored as if they were normalized.

use std::fmt;

/// Marker type for pixel coordinates on a rendered canvas or export frame.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Marker type for normalized coordinates (0.0 to 1.0 of the frame).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Normalized {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
