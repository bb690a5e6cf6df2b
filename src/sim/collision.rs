//! Collision detection and response for rectangle entities
//!
//! Standard AABB overlap tests plus a penetration-depth rebound rule: the
//! axis with the smaller absolute penetration is the axis that caused the
//! contact this frame, so only that axis's velocity is inverted. This is
//! what makes brick-edge hits bounce sideways and brick-face hits bounce
//! back, instead of every contact looking the same.

use glam::Vec2;

use super::rect::Rect;
use crate::consts::PADDLE_VARIANCE;

/// Result of a contact check between two rectangles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Whether the rectangles overlap
    pub overlaps: bool,
    /// Signed offset that moves the first rectangle just clear of the
    /// second, along the response axis only. Exactly one component is
    /// nonzero on an overlap; both are zero on a miss.
    pub penetration: Vec2,
}

impl Contact {
    pub fn miss() -> Self {
        Self {
            overlaps: false,
            penetration: Vec2::ZERO,
        }
    }
}

/// Check contact between a moving rectangle `a` (the ball) and a static
/// rectangle `b` (a brick, or the paddle).
///
/// Penetration signs come from comparing centers: an `a` left of `b`'s
/// center clears by moving further left (negative x), and so on. The axis
/// with the larger penetration is zeroed out - it was not the axis of
/// approach. Exact ties keep the x offset (`<=` below); any consistent
/// direction is fine, but it must never vary between frames.
pub fn aabb_contact(a: &Rect, b: &Rect) -> Contact {
    let overlaps =
        a.right() > b.left() && b.right() > a.left() && a.bottom() > b.top() && b.bottom() > a.top();
    if !overlaps {
        return Contact::miss();
    }

    let x = if a.center().x <= b.center().x {
        -(a.right() - b.left())
    } else {
        b.right() - a.left()
    };
    let y = if a.center().y <= b.center().y {
        -(a.bottom() - b.top())
    } else {
        b.bottom() - a.top()
    };

    let penetration = if x.abs() <= y.abs() {
        Vec2::new(x, 0.0)
    } else {
        Vec2::new(0.0, y)
    };

    Contact {
        overlaps: true,
        penetration,
    }
}

/// Reflect velocity off a contact: invert exactly the response axis
#[inline]
pub fn rebound(vel: Vec2, contact: &Contact) -> Vec2 {
    if contact.penetration.x != 0.0 {
        Vec2::new(-vel.x, vel.y)
    } else if contact.penetration.y != 0.0 {
        Vec2::new(vel.x, -vel.y)
    } else {
        vel
    }
}

/// Paddle rebound: player-aimable returns.
///
/// Replaces the plain inversion used for bricks and walls. The horizontal
/// component is recomputed from where across the paddle the ball struck,
/// scaled by the ball's current speed; the vertical component is forced
/// upward. Pre-collision horizontal sign is deliberately discarded.
pub fn paddle_rebound(vel: Vec2, ball: &Rect, paddle: &Rect) -> Vec2 {
    let half_width = paddle.size.x / 2.0;
    let offset = ((ball.center().x - paddle.center().x) / half_width).clamp(-1.0, 1.0);
    let speed = vel.length();
    Vec2::new(offset * PADDLE_VARIANCE * speed, -vel.y.abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_separated_rects_miss() {
        let a = Rect::new(0.0, 0.0, 20.0, 20.0);
        let b = Rect::new(100.0, 100.0, 50.0, 30.0);
        let contact = aabb_contact(&a, &b);
        assert!(!contact.overlaps);
        assert_eq!(contact.penetration, Vec2::ZERO);
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        // Strict inequalities: shared edges are not a contact
        let a = Rect::new(0.0, 0.0, 20.0, 20.0);
        let b = Rect::new(20.0, 0.0, 50.0, 30.0);
        assert!(!aabb_contact(&a, &b).overlaps);
    }

    #[test]
    fn test_shallow_side_hit_responds_on_x() {
        // Ball nicks the left edge of a brick: x penetration is shallow,
        // y penetration is deep, so x is the response axis.
        let ball = Rect::new(95.0, 100.0, 20.0, 20.0);
        let brick = Rect::new(110.0, 95.0, 50.0, 30.0);
        let contact = aabb_contact(&ball, &brick);
        assert!(contact.overlaps);
        assert_eq!(contact.penetration.y, 0.0);
        assert!(contact.penetration.x < 0.0); // clears by moving left

        let vel = rebound(Vec2::new(50.0, -50.0), &contact);
        assert_eq!(vel, Vec2::new(-50.0, -50.0));
    }

    #[test]
    fn test_shallow_face_hit_responds_on_y() {
        // Ball rises into the underside of a brick
        let ball = Rect::new(110.0, 118.0, 20.0, 20.0);
        let brick = Rect::new(100.0, 95.0, 50.0, 30.0);
        let contact = aabb_contact(&ball, &brick);
        assert!(contact.overlaps);
        assert_eq!(contact.penetration.x, 0.0);
        assert!(contact.penetration.y > 0.0); // clears by moving down

        let vel = rebound(Vec2::new(50.0, -50.0), &contact);
        assert_eq!(vel, Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_exact_tie_keeps_x_offset() {
        // Equal overlap on both axes: x wins the tie-break, y is zeroed
        let a = Rect::new(0.0, 0.0, 20.0, 20.0);
        let b = Rect::new(15.0, 15.0, 20.0, 20.0);
        let contact = aabb_contact(&a, &b);
        assert!(contact.overlaps);
        assert_eq!(contact.penetration.x, -5.0);
        assert_eq!(contact.penetration.y, 0.0);
    }

    #[test]
    fn test_paddle_rebound_center_goes_straight_up() {
        let paddle = Rect::new(500.0, 560.0, 100.0, 16.0);
        let ball = Rect::new(540.0, 540.0, 20.0, 20.0); // centered on paddle
        let vel = paddle_rebound(Vec2::new(50.0, 50.0), &ball, &paddle);
        assert!(vel.x.abs() < 0.001);
        assert!(vel.y < 0.0);
    }

    #[test]
    fn test_paddle_rebound_ignores_incoming_horizontal_sign() {
        let paddle = Rect::new(500.0, 560.0, 100.0, 16.0);
        let ball = Rect::new(510.0, 540.0, 20.0, 20.0); // left of center

        // Same strike point, opposite incoming horizontal directions
        let out_a = paddle_rebound(Vec2::new(50.0, 50.0), &ball, &paddle);
        let out_b = paddle_rebound(Vec2::new(-50.0, 50.0), &ball, &paddle);
        assert!((out_a.x - out_b.x).abs() < 0.001);
        assert!(out_a.x < 0.0); // left-side strike sends the ball left
    }

    #[test]
    fn test_paddle_rebound_monotonic_in_strike_position() {
        let paddle = Rect::new(500.0, 560.0, 100.0, 16.0);
        let vel = Vec2::new(50.0, 50.0);

        let mut last = f32::NEG_INFINITY;
        // Sweep the ball center across the paddle's width
        for i in 0..=20 {
            let x = 500.0 - 10.0 + i as f32 * 5.0;
            let ball = Rect::new(x, 540.0, 20.0, 20.0);
            let out = paddle_rebound(vel, &ball, &paddle);
            assert!(out.x >= last, "rebound not monotonic at x={x}");
            last = out.x;
        }
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (
            -500.0_f32..500.0,
            -500.0_f32..500.0,
            1.0_f32..200.0,
            1.0_f32..200.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_miss_has_zero_penetration(a in arb_rect(), b in arb_rect()) {
            let contact = aabb_contact(&a, &b);
            if !contact.overlaps {
                prop_assert_eq!(contact.penetration, Vec2::ZERO);
            }
        }

        #[test]
        fn prop_overlap_has_single_response_axis(a in arb_rect(), b in arb_rect()) {
            let contact = aabb_contact(&a, &b);
            if contact.overlaps {
                let x_zero = contact.penetration.x == 0.0;
                let y_zero = contact.penetration.y == 0.0;
                prop_assert!(x_zero != y_zero, "exactly one axis must respond");
            }
        }

        #[test]
        fn prop_rebound_flips_only_response_axis(
            a in arb_rect(),
            b in arb_rect(),
            vx in -200.0_f32..200.0,
            vy in -200.0_f32..200.0,
        ) {
            let contact = aabb_contact(&a, &b);
            if contact.overlaps {
                let vel = Vec2::new(vx, vy);
                let out = rebound(vel, &contact);
                if contact.penetration.x != 0.0 {
                    prop_assert_eq!(out, Vec2::new(-vx, vy));
                } else {
                    prop_assert_eq!(out, Vec2::new(vx, -vy));
                }
            }
        }

        #[test]
        fn prop_penetration_clears_overlap(a in arb_rect(), b in arb_rect()) {
            let contact = aabb_contact(&a, &b);
            if contact.overlaps {
                // Tiny epsilon absorbs float re-association after the move
                let mut moved = a;
                moved.pos += contact.penetration * 1.001;
                prop_assert!(!aabb_contact(&moved, &b).overlaps);
            }
        }
    }
}
