//! Overlap predicates.
//!
//! Every entity reports a positioned [`Shape`]; [`collides`] dispatches on the
//! pair of shape kinds. All checks are O(1) and symmetric in their arguments.

use crate::entities::{Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Point(Vec2),
    Circle { center: Vec2, radius: f32 },
    Rect(Rect),
}

/// Strict: circles that only touch do not collide.
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Strict on both axes: rectangles sharing an edge do not collide.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Half-open `[min, max)` on both axes.
pub fn point_in_rect(p: Vec2, r: &Rect) -> bool {
    p.x >= r.x && p.x < r.right() && p.y >= r.y && p.y < r.bottom()
}

pub fn collides(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        (
            Shape::Circle { center: ca, radius: ra },
            Shape::Circle { center: cb, radius: rb },
        ) => circles_overlap(*ca, *ra, *cb, *rb),
        (Shape::Rect(ra), Shape::Rect(rb)) => rects_overlap(ra, rb),
        (Shape::Point(p), Shape::Rect(r)) | (Shape::Rect(r), Shape::Point(p)) => {
            point_in_rect(*p, r)
        }
        (Shape::Point(p), Shape::Circle { center, radius })
        | (Shape::Circle { center, radius }, Shape::Point(p)) => p.distance(*center) < *radius,
        // A circle hitbox is graze-sized; against a body rect only its
        // center counts.
        (Shape::Circle { center, .. }, Shape::Rect(r))
        | (Shape::Rect(r), Shape::Circle { center, .. }) => point_in_rect(*center, r),
        (Shape::Point(p), Shape::Point(q)) => p == q,
    }
}
