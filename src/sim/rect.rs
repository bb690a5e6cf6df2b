//! Axis-aligned rectangle geometry shared by every entity
//!
//! The field uses screen coordinates: x grows right, y grows down, so
//! `top < bottom` numerically. All entities are AABBs defined by their
//! top-left corner and a strictly positive size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        debug_assert!(w > 0.0 && h > 0.0);
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Resize about the current center, keeping the midpoint fixed
    pub fn resize_centered(&mut self, new_size: Vec2) {
        debug_assert!(new_size.x > 0.0 && new_size.y > 0.0);
        let center = self.center();
        self.size = new_size;
        self.pos = center - new_size / 2.0;
    }
}

/// A rectangle paired with its previous-frame bounds.
///
/// The renderer erases an entity's old footprint before redrawing it, so
/// every entity remembers where it was the last time it was observed. Only
/// the scene snapshot marks bounds as observed; simulation code never does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tracked {
    cur: Rect,
    prev: Rect,
}

impl Tracked {
    pub fn new(rect: Rect) -> Self {
        Self {
            cur: rect,
            prev: rect,
        }
    }

    #[inline]
    pub fn rect(&self) -> &Rect {
        &self.cur
    }

    #[inline]
    pub fn rect_mut(&mut self) -> &mut Rect {
        &mut self.cur
    }

    /// Previous bounds as of the last `observe` call
    #[inline]
    pub fn prev(&self) -> &Rect {
        &self.prev
    }

    /// Have position or size changed since the renderer last observed them?
    #[inline]
    pub fn moved_since_observed(&self) -> bool {
        self.cur != self.prev
    }

    /// Return the stale bounds (if any) and mark the current ones observed
    pub fn observe(&mut self) -> Option<Rect> {
        if self.moved_since_observed() {
            let stale = self.prev;
            self.prev = self.cur;
            Some(stale)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges() {
        let r = Rect::new(10.0, 20.0, 50.0, 30.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.right(), 60.0);
        assert_eq!(r.bottom(), 50.0);
        assert_eq!(r.center(), Vec2::new(35.0, 35.0));
    }

    #[test]
    fn test_resize_centered_keeps_midpoint() {
        let mut r = Rect::new(100.0, 200.0, 100.0, 16.0);
        let center = r.center();
        r.resize_centered(Vec2::new(150.0, 16.0));
        assert_eq!(r.center(), center);
        assert_eq!(r.size.x, 150.0);
    }

    #[test]
    fn test_tracked_observe_cycle() {
        let mut t = Tracked::new(Rect::new(0.0, 0.0, 20.0, 20.0));
        assert!(!t.moved_since_observed());
        assert_eq!(t.observe(), None);

        t.rect_mut().pos.x = 5.0;
        assert!(t.moved_since_observed());
        let stale = t.observe().unwrap();
        assert_eq!(stale.pos.x, 0.0);

        // Observed once, now clean until the next move
        assert_eq!(t.observe(), None);
    }
}
