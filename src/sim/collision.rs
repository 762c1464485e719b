//! Collision detection for axis-aligned boxes
//!
//! Everything on the playfield is a rectangle, so one overlap test covers every
//! entity pairing. Touching edges do not count as a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Strict overlap on both axes
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }
}

/// Anything that occupies a box on the playfield
pub trait Bounds {
    fn bounds(&self) -> Aabb;
}

impl Bounds for Aabb {
    fn bounds(&self) -> Aabb {
        *self
    }
}

/// Check whether two entities overlap
#[inline]
pub fn collides<A: Bounds + ?Sized, B: Bounds + ?Sized>(a: &A, b: &B) -> bool {
    a.bounds().overlaps(&b.bounds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_boxes_collide() {
        let player = Aabb::from_xywh(0.0, 480.0, 30.0, 30.0);
        let enemy = Aabb::from_xywh(0.0, 470.0, 30.0, 30.0);
        assert!(collides(&player, &enemy));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Aabb::from_xywh(0.0, 0.0, 10.0, 10.0);
        let right = Aabb::from_xywh(10.0, 0.0, 10.0, 10.0);
        let below = Aabb::from_xywh(0.0, 10.0, 10.0, 10.0);
        assert!(!collides(&a, &right));
        assert!(!collides(&a, &below));
    }

    #[test]
    fn test_containment_collides() {
        let outer = Aabb::from_xywh(0.0, 0.0, 100.0, 100.0);
        let inner = Aabb::from_xywh(40.0, 40.0, 4.0, 10.0);
        assert!(collides(&outer, &inner));
        assert!(collides(&inner, &outer));
    }

    #[test]
    fn test_separated_on_one_axis() {
        let a = Aabb::from_xywh(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::from_xywh(5.0, 50.0, 10.0, 10.0);
        assert!(!collides(&a, &b));
    }

    fn arb_box() -> impl Strategy<Value = Aabb> {
        (
            -100.0f32..500.0,
            -100.0f32..600.0,
            0.5f32..60.0,
            0.5f32..60.0,
        )
            .prop_map(|(x, y, w, h)| Aabb::from_xywh(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_collision_is_symmetric(a in arb_box(), b in arb_box()) {
            prop_assert_eq!(collides(&a, &b), collides(&b, &a));
        }

        #[test]
        fn prop_box_collides_with_itself(a in arb_box()) {
            prop_assert!(collides(&a, &a));
        }
    }
}
