//! Excluded screen regions that generated taps must avoid.
//!
//! Rectangles are compared by value, so excluding the same bounds twice keeps
//! a single entry.
use std::collections::HashSet;

use glam::Vec2;

use crate::geometry::Rect;

/// Set of axis-aligned rectangles.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    regions: HashSet<Rect>,
}

impl ExclusionSet {
    /// Creates a new, empty set.
    pub fn new() -> Self {
        Self {
            regions: HashSet::new(),
        }
    }

    /// Inserts `rect`. Returns false if identical bounds were already excluded.
    pub fn add(&mut self, rect: Rect) -> bool {
        self.regions.insert(rect)
    }

    /// Removes the entry with the same bounds as `rect`, returning it if it existed.
    pub fn remove(&mut self, rect: &Rect) -> Option<Rect> {
        self.regions.take(rect)
    }

    /// Removes all regions.
    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Iterates over the excluded rectangles in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Rect> {
        self.regions.iter()
    }

    /// Returns true if any region contains the integer pixel `(x, y)`.
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.regions.iter().any(|r| r.contains(x, y))
    }

    /// Returns true if any region contains the pixel under `position`.
    #[inline]
    pub fn contains_position(&self, position: Vec2) -> bool {
        self.contains_point(position.x.floor() as i32, position.y.floor() as i32)
    }
}

impl Extend<Rect> for ExclusionSet {
    fn extend<I: IntoIterator<Item = Rect>>(&mut self, iter: I) {
        for rect in iter {
            self.add(rect);
        }
    }
}

impl FromIterator<Rect> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = Rect>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}
