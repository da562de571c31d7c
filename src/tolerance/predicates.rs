//! Geometric predicates with explicit tolerance.

use crate::primitives::{Point2, Segment2};
use num_traits::Float;

/// Result of an orientation test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Points are counter-clockwise (positive area).
    CounterClockwise,
    /// Points are clockwise (negative area).
    Clockwise,
    /// Points are collinear (within tolerance).
    Collinear,
}

/// Computes the orientation of three points with tolerance.
///
/// Returns the orientation of the triangle formed by points `a`, `b`, `c`,
/// based on its signed area. If the absolute value of twice the signed area
/// is less than `eps`, the points are considered collinear.
///
/// The decomposition uses this at exactly one place where near-collinear
/// triples are expected: classifying the extremal vertex of a ring when
/// seeding windings. Everything downstream compares raw signs.
#[inline]
pub fn orient2d<F: Float>(a: Point2<F>, b: Point2<F>, c: Point2<F>, eps: F) -> Orientation {
    // Cross product of (b - a) and (c - a): twice the signed triangle area.
    let cross = (b - a).cross(c - a);

    if cross > eps {
        Orientation::CounterClockwise
    } else if cross < -eps {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Checks if a point lies on a line segment within tolerance.
///
/// Returns `true` if the point `p` is within distance `eps` of the segment.
#[inline]
pub fn point_on_segment<F: Float>(p: Point2<F>, segment: Segment2<F>, eps: F) -> bool {
    segment.distance_squared_to_point(p) <= eps * eps
}

/// A transversal crossing of two segment interiors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing<F> {
    /// The crossing point.
    pub point: Point2<F>,
    /// Parameter along the first segment, strictly inside (0, 1).
    pub t1: F,
    /// Parameter along the second segment, strictly inside (0, 1).
    pub t2: F,
}

/// Finds the strict-interior crossing of two segments, if any.
///
/// Only transversal crossings count: configurations that are parallel or
/// collinear, and meetings at or within `eps` of either endpoint, return
/// `None`. Ring vertices are unique by the time this runs, so every
/// admissible intersection passes through both segment interiors.
pub fn segment_crossing<F: Float>(
    s1: Segment2<F>,
    s2: Segment2<F>,
    eps: F,
) -> Option<Crossing<F>> {
    let d1 = s1.direction();
    let d2 = s2.direction();

    let denom = d1.cross(d2);
    if denom.abs() <= eps {
        return None;
    }

    // Cramer's rule on s1.start + t1*d1 = s2.start + t2*d2.
    let d = s2.start - s1.start;
    let t1 = d.cross(d2) / denom;
    let t2 = d.cross(d1) / denom;

    let lo = eps;
    let hi = F::one() - eps;
    if t1 <= lo || t1 >= hi || t2 <= lo || t2 >= hi {
        return None;
    }

    Some(Crossing {
        point: s1.point_at(t1),
        t1,
        t2,
    })
}
