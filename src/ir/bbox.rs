//! Bounding box types in top-left + size (XYWH) form.

use serde::{Deserialize, Serialize};
use std::marker::PhantomData;

use super::coord::Coord;
use super::frame::FrameSize;
use super::{Normalized, Pixel};

/// An axis-aligned bounding box stored as top-left corner plus size.
///
/// The `TSpace` parameter should be either [`Pixel`] or [`Normalized`].
///
/// The constructor does not enforce positive sizes or in-frame placement;
/// the box model and validation are responsible for rejecting such boxes.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYWH<TSpace> {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> BBoxXYWH<TSpace> {
    /// Creates a box from its top-left corner and size.
    #[inline]
    pub fn from_xywh(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x,
            y,
            w,
            h,
            _space: PhantomData,
        }
    }

    /// Creates a box from two opposite corners (xmin, ymin, xmax, ymax).
    #[inline]
    pub fn from_xyxy(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self::from_xywh(xmin, ymin, xmax - xmin, ymax - ymin)
    }

    /// Creates a box from its center point and size.
    ///
    /// This is the format used by YOLO label files.
    #[inline]
    pub fn from_cxcywh(cx: f64, cy: f64, w: f64, h: f64) -> Self {
        Self::from_xywh(cx - w / 2.0, cy - h / 2.0, w, h)
    }

    /// Creates the box spanned by two pointer positions, in either order.
    pub fn spanning(a: Coord<TSpace>, b: Coord<TSpace>) -> Self {
        Self::from_xywh(a.x.min(b.x), a.y.min(b.y), (b.x - a.x).abs(), (b.y - a.y).abs())
    }

    #[inline]
    pub fn xmax(&self) -> f64 {
        self.x + self.w
    }

    #[inline]
    pub fn ymax(&self) -> f64 {
        self.y + self.h
    }

    /// Returns `(xmin, ymin, xmax, ymax)`.
    #[inline]
    pub fn to_xyxy(&self) -> (f64, f64, f64, f64) {
        (self.x, self.y, self.xmax(), self.ymax())
    }

    /// Returns `(x_center, y_center, width, height)`.
    #[inline]
    pub fn to_cxcywh(&self) -> (f64, f64, f64, f64) {
        (self.x + self.w / 2.0, self.y + self.h / 2.0, self.w, self.h)
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Returns true if all fields are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.w.is_finite() && self.h.is_finite()
    }

    /// Returns true if both width and height are strictly positive.
    #[inline]
    pub fn has_area(&self) -> bool {
        self.w > 0.0 && self.h > 0.0
    }
}

impl BBoxXYWH<Pixel> {
    /// Converts pixel coordinates on `frame` to normalized coordinates.
    pub fn to_normalized(&self, frame: FrameSize) -> BBoxXYWH<Normalized> {
        BBoxXYWH::from_xywh(
            self.x / frame.width,
            self.y / frame.height,
            self.w / frame.width,
            self.h / frame.height,
        )
    }

    /// Intersects the box with `[0, width] x [0, height]`.
    ///
    /// Returns `None` when nothing of the box lies inside the frame.
    pub fn clip_to(&self, frame: FrameSize) -> Option<BBoxXYWH<Pixel>> {
        let xmin = self.x.max(0.0);
        let ymin = self.y.max(0.0);
        let xmax = self.xmax().min(frame.width);
        let ymax = self.ymax().min(frame.height);

        if xmax > xmin && ymax > ymin {
            Some(BBoxXYWH::from_xyxy(xmin, ymin, xmax, ymax))
        } else {
            None
        }
    }
}

impl BBoxXYWH<Normalized> {
    /// Converts normalized coordinates to pixel coordinates on `frame`.
    pub fn to_pixel(&self, frame: FrameSize) -> BBoxXYWH<Pixel> {
        BBoxXYWH::from_xywh(
            self.x * frame.width,
            self.y * frame.height,
            self.w * frame.width,
            self.h * frame.height,
        )
    }

    /// Returns true if every field lies in `[0, 1]`.
    pub fn is_unit(&self) -> bool {
        [self.x, self.y, self.w, self.h]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYWH<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYWH")
            .field("x", &self.x)
            .field("y", &self.y)
            .field("w", &self.w)
            .field("h", &self.h)
            .finish()
    }
}

impl<TSpace> Default for BBoxXYWH<TSpace> {
    fn default() -> Self {
        Self::from_xywh(0.0, 0.0, 0.0, 0.0)
    }
}

// Custom serde implementation to avoid TSpace: Serialize/Deserialize bounds
impl<TSpace> Serialize for BBoxXYWH<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("BBoxXYWH", 4)?;
        state.serialize_field("x", &self.x)?;
        state.serialize_field("y", &self.y)?;
        state.serialize_field("w", &self.w)?;
        state.serialize_field("h", &self.h)?;
        state.end()
    }
}

impl<'de, TSpace> Deserialize<'de> for BBoxXYWH<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct BBoxData {
            x: f64,
            y: f64,
            w: f64,
            h: f64,
        }
        let data = BBoxData::deserialize(deserializer)?;
        Ok(BBoxXYWH::from_xywh(data.x, data.y, data.w, data.h))
    }
}
