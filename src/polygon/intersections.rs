//! Self- and cross-intersection discovery.
//!
//! Adapter around the segment-crossing predicate: every pair of non-adjacent
//! edges across all rings is tested, and each unique binary crossing is
//! reported twice, once per incoming-edge viewpoint, so the graph builder
//! can thread a pseudo-vertex onto both participating edges.

use super::core::Ring;
use super::graph::EdgeRef;
use crate::primitives::{Point2, Segment2};
use crate::tolerance::segment_crossing;
use num_traits::Float;

/// One viewpoint of a binary crossing: the crossing as seen from `edge_in`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct IntersectionRecord<F> {
    /// The crossing point.
    pub point: Point2<F>,
    /// The incoming edge this record describes.
    pub edge_in: EdgeRef,
    /// The edge crossed by `edge_in`.
    pub edge_out: EdgeRef,
    /// Fractional position of the crossing along `edge_in`.
    pub param: F,
    /// Set on exactly one of the two records of each crossing.
    pub unique: bool,
}

/// Finds all strict-interior crossings between edges of `rings`.
///
/// Returns two records per crossing, `unique` on the first. Edges of the
/// same ring that share an endpoint are skipped; endpoint coincidences
/// cannot occur elsewhere because ring vertices are globally unique.
pub(crate) fn find_intersections<F: Float>(rings: &[Ring<F>], eps: F) -> Vec<IntersectionRecord<F>> {
    let mut edges: Vec<(EdgeRef, Segment2<F>)> = Vec::new();
    for (r, ring) in rings.iter().enumerate() {
        for e in 0..ring.edge_count() {
            edges.push((EdgeRef { ring: r, edge: e }, ring.edge(e)));
        }
    }

    let mut records = Vec::new();
    for i in 0..edges.len() {
        for j in (i + 1)..edges.len() {
            let (a, sa) = edges[i];
            let (b, sb) = edges[j];
            if a.ring == b.ring && adjacent(a.edge, b.edge, rings[a.ring].edge_count()) {
                continue;
            }
            if let Some(hit) = segment_crossing(sa, sb, eps) {
                records.push(IntersectionRecord {
                    point: hit.point,
                    edge_in: a,
                    edge_out: b,
                    param: hit.t1,
                    unique: true,
                });
                records.push(IntersectionRecord {
                    point: hit.point,
                    edge_in: b,
                    edge_out: a,
                    param: hit.t2,
                    unique: false,
                });
            }
        }
    }
    records
}

/// True for edges of one `n`-edge ring that share an endpoint.
///
/// Assumes `e1 < e2`, which the ordered pair loop above guarantees.
fn adjacent(e1: usize, e2: usize, n: usize) -> bool {
    e2 == e1 + 1 || (e1 == 0 && e2 == n - 1)
}
