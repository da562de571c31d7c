//! Core polygon types and ring queries.

use crate::bounds::Aabb2;
use crate::primitives::{floor_mod, Point2, Segment2};
use crate::tolerance::{orient2d, point_on_segment, Orientation};
use num_traits::Float;

/// A closed ring of coordinates.
///
/// After normalization the last coordinate equals the first; edge `e` is the
/// segment from coordinate `e` to coordinate `e + 1`. Rings handed to
/// [`Ring::new`] may still be open; the decomposition closes them before
/// doing anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring<F> {
    /// The ring coordinates, in traversal order.
    pub coords: Vec<Point2<F>>,
}

impl<F: Float> Ring<F> {
    /// Creates a ring from a coordinate sequence.
    #[inline]
    pub fn new(coords: Vec<Point2<F>>) -> Self {
        Self { coords }
    }

    /// Creates a ring from `[x, y]` coordinate pairs.
    pub fn from_pairs(pairs: &[[F; 2]]) -> Self {
        Self {
            coords: pairs.iter().map(|&p| p.into()).collect(),
        }
    }

    /// Returns true if the ring is explicitly closed (last equals first).
    pub fn is_closed(&self) -> bool {
        self.coords.len() >= 2 && self.coords.first() == self.coords.last()
    }

    /// Number of edges of a closed ring (equals its distinct vertex count).
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    /// Edge `e`: the segment from coordinate `e` to coordinate `e + 1`.
    #[inline]
    pub fn edge(&self, e: usize) -> Segment2<F> {
        Segment2::new(self.coords[e], self.coords[e + 1])
    }

    /// Returns the signed area of a closed ring (shoelace formula).
    ///
    /// Positive for counter-clockwise traversal, negative for clockwise.
    pub fn signed_area(&self) -> F {
        let mut sum = F::zero();
        for w in self.coords.windows(2) {
            sum = sum + w[0].x * w[1].y - w[1].x * w[0].y;
        }
        sum / F::from(2.0).unwrap()
    }

    /// Returns the non-negative area of a closed ring.
    #[inline]
    pub fn area(&self) -> F {
        self.signed_area().abs()
    }

    /// Returns the bounding box, or `None` for an empty ring.
    pub fn bounding_box(&self) -> Option<Aabb2<F>> {
        Aabb2::from_points(self.coords.iter().copied())
    }

    /// Tests if a point lies strictly inside a closed ring.
    ///
    /// The boundary is excluded: points within `eps` of any edge return
    /// `false`. Interior/exterior is decided by even-odd ray casting.
    pub fn contains_strict(&self, p: Point2<F>, eps: F) -> bool {
        if self.coords.len() < 4 {
            return false;
        }

        for w in self.coords.windows(2) {
            if point_on_segment(p, Segment2::new(w[0], w[1]), eps) {
                return false;
            }
        }

        let mut inside = false;
        for w in self.coords.windows(2) {
            let (a, b) = (w[0], w[1]);
            if (a.y > p.y) != (b.y > p.y)
                && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
        }
        inside
    }

    /// Winding of a closed ring: `+1` right-hand (counter-clockwise), `-1`
    /// left-hand.
    ///
    /// Decided by the convexity of the leftmost vertex (ties broken by the
    /// smallest y), the one corner of a simple ring whose turn direction
    /// always matches the traversal orientation. This is the only
    /// orientation test in the crate that takes a tolerance; a collinear
    /// verdict counts as right-hand.
    pub fn winding(&self, eps: F) -> i32 {
        let n = self.edge_count();
        let mut leftmost = 0;
        for i in 1..n {
            let (p, q) = (self.coords[i], self.coords[leftmost]);
            if p.x < q.x || (p.x == q.x && p.y < q.y) {
                leftmost = i;
            }
        }

        let prev = self.coords[floor_mod(leftmost as isize - 1, n)];
        let next = self.coords[(leftmost + 1) % n];
        match orient2d(prev, self.coords[leftmost], next, eps) {
            Orientation::Clockwise => -1,
            _ => 1,
        }
    }
}

/// A polygon as an ordered sequence of rings.
///
/// Ring 0 is conventionally the outer ring, but nothing requires it: rings
/// may self-intersect, cross each other, and sit anywhere relative to one
/// another. Orientations are arbitrary.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon<F> {
    /// The rings, outer conventionally first.
    pub rings: Vec<Ring<F>>,
}

impl<F: Float> Polygon<F> {
    /// Creates a polygon from rings.
    #[inline]
    pub fn new(rings: Vec<Ring<F>>) -> Self {
        Self { rings }
    }

    /// Creates a single-ring polygon.
    #[inline]
    pub fn from_ring(ring: Ring<F>) -> Self {
        Self { rings: vec![ring] }
    }
}

/// One simple, non-self-intersecting ring of a decomposition.
///
/// The rings of one output partition the traced interior of the input
/// polygon: pairwise their interiors are disjoint or strictly nested, never
/// crossing.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleRing<F> {
    /// The ring itself, closed (first coordinate equals last).
    pub ring: Ring<F>,
    /// `+1` for a right-hand (counter-clockwise) ring, `-1` for left-hand.
    pub winding: i32,
    /// Winding of this ring plus the windings of all its ancestors.
    pub net_winding: i32,
    /// Index of the smallest-area output ring strictly containing this one,
    /// or `None` if no output ring does.
    pub parent: Option<usize>,
}
