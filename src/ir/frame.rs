//! Frame dimensions for canvases and export reference frames.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width and height of a pixel frame.
///
/// Used both for the rendered drawing surface (which may be any size) and
/// for the fixed reference frame COCO and Pascal exports are scaled to.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameSize {
    pub width: f64,
    pub height: f64,
}

impl FrameSize {
    /// The 640x480 frame that COCO and Pascal exports are expressed in.
    pub const REFERENCE: FrameSize = FrameSize {
        width: 640.0,
        height: 480.0,
    };

    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns true if both dimensions are finite and strictly positive.
    #[inline]
    pub fn is_usable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl Default for FrameSize {
    fn default() -> Self {
        Self::REFERENCE
    }
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Parses `WIDTHxHEIGHT`, e.g. `800x600`.
impl FromStr for FrameSize {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (w, h) = raw
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{raw}'"))?;
        let width = w
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid width '{w}'"))?;
        let height = h
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("invalid height '{h}'"))?;

        let frame = FrameSize::new(width, height);
        if !frame.is_usable() {
            return Err(format!("frame '{raw}' must have positive dimensions"));
        }
        Ok(frame)
    }
}
