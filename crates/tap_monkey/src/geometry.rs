//! Screen-space geometry shared by sampling, exclusion, and dispatch.
//!
//! Coordinates are in pixels with the origin at the top-left corner of the
//! drawable area. Integer rectangles follow the half-open convention:
//! a [`Rect`] contains `(x, y)` when `left <= x < right` and `top <= y < bottom`.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use glam::{IVec2, UVec2, Vec2};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Axis-aligned integer bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    /// Creates a rectangle without validating edge order.
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        debug_assert!(left <= right, "left must be <= right");
        debug_assert!(top <= bottom, "top must be <= bottom");
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates a rectangle, rejecting inverted edges.
    pub fn try_new(left: i32, top: i32, right: i32, bottom: i32) -> Result<Self> {
        let rect = Self {
            left,
            top,
            right,
            bottom,
        };
        rect.validate()?;
        Ok(rect)
    }

    /// Creates a rectangle from its top-left corner and size.
    pub fn from_origin_size(origin: IVec2, size: UVec2) -> Self {
        Self {
            left: origin.x,
            top: origin.y,
            right: origin.x.saturating_add_unsigned(size.x),
            bottom: origin.y.saturating_add_unsigned(size.y),
        }
    }

    /// Validates edge order, returning an error if the rectangle is malformed.
    pub fn validate(&self) -> Result<()> {
        if self.left > self.right || self.top > self.bottom {
            return Err(Error::InvalidConfig(format!(
                "malformed rectangle ({}, {})-({}, {}): edges are inverted",
                self.left, self.top, self.right, self.bottom
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> i64 {
        i64::from(self.right) - i64::from(self.left)
    }

    pub fn height(&self) -> i64 {
        i64::from(self.bottom) - i64::from(self.top)
    }

    /// Returns true if the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Half-open containment test on integer pixel coordinates.
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        !self.is_empty() && x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Containment test for a sub-pixel position, truncated toward negative infinity.
    #[inline]
    pub fn contains_position(&self, position: Vec2) -> bool {
        self.contains(position.x.floor() as i32, position.y.floor() as i32)
    }
}

/// A live UI region that can be resolved to a [`Rect`] snapshot.
///
/// Returns `None` when the region is not currently visible; such regions are
/// not excluded.
pub trait VisibleRegion {
    fn visible_bounds(&self) -> Option<Rect>;
}

impl VisibleRegion for Rect {
    fn visible_bounds(&self) -> Option<Rect> {
        Some(*self)
    }
}

impl VisibleRegion for Option<Rect> {
    fn visible_bounds(&self) -> Option<Rect> {
        *self
    }
}

/// Provides the current drawable size of the active display.
///
/// Queried on every sample; implementations must not assume the value is cached.
pub trait ScreenBounds: Send + Sync {
    fn query(&self) -> UVec2;
}

impl<F> ScreenBounds for F
where
    F: Fn() -> UVec2 + Send + Sync,
{
    fn query(&self) -> UVec2 {
        self()
    }
}

/// Screen with a size that never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedScreen {
    size: UVec2,
}

impl FixedScreen {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: UVec2::new(width, height),
        }
    }
}

impl ScreenBounds for FixedScreen {
    fn query(&self) -> UVec2 {
        self.size
    }
}

/// Screen whose size can be updated at runtime, e.g. on rotation.
///
/// Clones share the same size, so the owner keeps one clone to resize while
/// the monkey queries another. Width and height are packed into one atomic
/// word so readers never observe a torn pair.
#[derive(Debug, Clone, Default)]
pub struct SharedScreen {
    packed: Arc<AtomicU64>,
}

impl SharedScreen {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            packed: Arc::new(AtomicU64::new(pack(width, height))),
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        self.packed.store(pack(width, height), Ordering::Release);
    }
}

impl ScreenBounds for SharedScreen {
    fn query(&self) -> UVec2 {
        let packed = self.packed.load(Ordering::Acquire);
        UVec2::new((packed >> 32) as u32, packed as u32)
    }
}

#[inline]
fn pack(width: u32, height: u32) -> u64 {
    (u64::from(width) << 32) | u64::from(height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0, 0, 500, 2000);
        assert!(r.contains(0, 0));
        assert!(r.contains(499, 1999));
        assert!(!r.contains(500, 0));
        assert!(!r.contains(0, 2000));
        assert!(!r.contains(-1, 10));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let r = Rect::new(10, 10, 10, 20);
        assert!(r.is_empty());
        assert!(!r.contains(10, 10));
        assert!(!r.contains(10, 15));
    }

    #[test]
    fn try_new_rejects_inverted_edges() {
        assert!(matches!(
            Rect::try_new(10, 0, 5, 5),
            Err(Error::InvalidConfig(_))
        ));
        assert!(Rect::try_new(0, 5, 10, 4).is_err());
        assert!(Rect::try_new(0, 0, 0, 0).is_ok());
    }

    #[test]
    fn contains_position_floors_fractional_coordinates() {
        let r = Rect::new(0, 0, 500, 100);
        assert!(r.contains_position(Vec2::new(499.9, 50.0)));
        assert!(!r.contains_position(Vec2::new(500.0, 50.0)));
        assert!(!r.contains_position(Vec2::new(-0.5, 50.0)));
    }

    #[test]
    fn from_origin_size_matches_edges() {
        let r = Rect::from_origin_size(IVec2::new(5, 10), UVec2::new(20, 30));
        assert_eq!(r, Rect::new(5, 10, 25, 40));
        assert_eq!(r.width(), 20);
        assert_eq!(r.height(), 30);
    }

    #[test]
    fn shared_screen_resize_is_visible_to_clones() {
        let screen = SharedScreen::new(1080, 1920);
        let reader = screen.clone();
        assert_eq!(reader.query(), UVec2::new(1080, 1920));
        screen.resize(1920, 1080);
        assert_eq!(reader.query(), UVec2::new(1920, 1080));
    }

    #[test]
    fn closures_act_as_screen_bounds() {
        let screen = || UVec2::new(320, 240);
        assert_eq!(ScreenBounds::query(&screen), UVec2::new(320, 240));
        assert_eq!(FixedScreen::new(8, 6).query(), UVec2::new(8, 6));
    }

    #[test]
    fn invisible_region_resolves_to_none() {
        let hidden: Option<Rect> = None;
        assert_eq!(hidden.visible_bounds(), None);
        let r = Rect::new(1, 2, 3, 4);
        assert_eq!(r.visible_bounds(), Some(r));
    }
}
