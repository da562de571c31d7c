//! The intersection graph: pseudo-vertices and intersections.
//!
//! Two parallel structures are built in one pass once the intersection
//! finder has run. The pseudo-vertex lists order, per directed ring edge,
//! every point a walk can pass over on that edge; the intersection list is
//! the arena the walker actually traverses, linked by integer indices. Only
//! the walkable flags are ever mutated after construction.

use super::intersections::IntersectionRecord;
use super::normalize::Normalized;
use crate::error::UnkinkError;
use crate::primitives::{floor_mod, Point2};
use crate::spatial::PointBvh;
use num_traits::Float;
use std::cmp::Ordering;

/// A directed ring edge: the segment from vertex `edge` to vertex
/// `edge + 1` of ring `ring`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EdgeRef {
    pub ring: usize,
    pub edge: usize,
}

/// A point on a specific incoming edge.
///
/// Ring pseudo-vertices sit at the vertex ending their incoming edge
/// (`param == 1`), one per ring vertex. Intersection pseudo-vertices sit at
/// a crossing, one for each incoming edge involved.
#[derive(Debug, Clone, Copy)]
struct PseudoVertex<F> {
    coord: Point2<F>,
    /// Fractional position along the incoming edge.
    param: F,
    edge_in: EdgeRef,
    /// For ring pseudo-vertices the next edge of the same ring; for
    /// intersection pseudo-vertices the crossing edge.
    edge_out: EdgeRef,
    /// Intersection reached next when continuing along `edge_in`.
    next_isect: Option<usize>,
}

/// A point where two edges meet: a ring vertex or a strict crossing.
///
/// Ring-vertex intersections carry the incoming ring edge as `edge1` and
/// the outgoing one as `edge2`; only the outgoing side starts out walkable.
/// Crossing intersections start out walkable on both sides.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Isect<F> {
    pub coord: Point2<F>,
    pub edge1: EdgeRef,
    pub edge2: EdgeRef,
    /// Next intersection when walking forward along `edge1`.
    pub next_along_edge1: Option<usize>,
    /// Next intersection when walking forward along `edge2`.
    pub next_along_edge2: Option<usize>,
    /// Whether a new walk may still depart along `edge1`.
    pub edge1_walkable: bool,
    /// Whether a new walk may still depart along `edge2`.
    pub edge2_walkable: bool,
}

/// The wired intersection graph of one decomposition call.
#[derive(Debug)]
pub(crate) struct IsectGraph<F> {
    /// Ring-vertex intersections first, one per input vertex and grouped by
    /// ring; crossings after.
    pub isects: Vec<Isect<F>>,
    /// Prefix offsets of each ring's block of ring-vertex intersections,
    /// with a final sentinel equal to the total vertex count.
    ring_offsets: Vec<usize>,
}

impl<F: Float> IsectGraph<F> {
    /// Number of input rings.
    pub fn ring_count(&self) -> usize {
        self.ring_offsets.len() - 1
    }

    /// Total number of ring-vertex intersections.
    pub fn vertex_count(&self) -> usize {
        self.ring_offsets[self.ring_offsets.len() - 1]
    }

    /// Ring-vertex intersections of ring `r` occupy this contiguous range.
    pub fn ring_vertex_range(&self, r: usize) -> std::ops::Range<usize> {
        self.ring_offsets[r]..self.ring_offsets[r + 1]
    }

    /// Next intersection along `edge1` (`first_edge`) or `edge2` of `at`.
    ///
    /// An unresolved link here means the finder or the wiring is broken;
    /// the walk cannot continue.
    pub fn next_along(&self, at: usize, first_edge: bool) -> Result<usize, UnkinkError> {
        let link = if first_edge {
            self.isects[at].next_along_edge1
        } else {
            self.isects[at].next_along_edge2
        };
        link.ok_or(UnkinkError::GraphInconsistency { index: at })
    }
}

/// Builds the intersection graph for a normalized `input` and the finder's
/// `records`.
///
/// Construction order: ring pseudo-vertices and ring-vertex intersections
/// first, then one pseudo-vertex per record and one intersection per unique
/// record, then a param sort per edge, and finally next-pointer resolution
/// through a spatial lookup of the intersection coordinates. Lookup misses
/// leave links unresolved; they surface as `GraphInconsistency` when
/// dereferenced.
pub(crate) fn build<F: Float>(
    input: &Normalized<F>,
    records: &[IntersectionRecord<F>],
) -> IsectGraph<F> {
    let rings = &input.rings;
    let mut pv_lists: Vec<Vec<Vec<PseudoVertex<F>>>> = Vec::with_capacity(rings.len());
    let mut isects: Vec<Isect<F>> = Vec::new();
    let mut ring_offsets = Vec::with_capacity(rings.len() + 1);

    // Ring pseudo-vertices and ring-vertex intersections. The pseudo-vertex
    // of edge j sits at the vertex closing that edge; the intersection of
    // vertex j joins its incoming edge j-1 to its outgoing edge j.
    for (r, ring) in rings.iter().enumerate() {
        let n = ring.edge_count();
        ring_offsets.push(isects.len());
        let mut per_edge = Vec::with_capacity(n);
        for j in 0..n {
            per_edge.push(vec![PseudoVertex {
                coord: ring.coords[(j + 1) % n],
                param: F::one(),
                edge_in: EdgeRef { ring: r, edge: j },
                edge_out: EdgeRef {
                    ring: r,
                    edge: (j + 1) % n,
                },
                next_isect: None,
            }]);
            isects.push(Isect {
                coord: ring.coords[j],
                edge1: EdgeRef {
                    ring: r,
                    edge: floor_mod(j as isize - 1, n),
                },
                edge2: EdgeRef { ring: r, edge: j },
                next_along_edge1: None,
                next_along_edge2: None,
                edge1_walkable: false,
                edge2_walkable: true,
            });
        }
        pv_lists.push(per_edge);
    }
    ring_offsets.push(isects.len());
    let vertex_count = input.vertex_count;
    debug_assert_eq!(isects.len(), vertex_count);

    // Intersection pseudo-vertices on each record's incoming edge; one
    // intersection per unique record, walkable on both sides.
    for rec in records {
        pv_lists[rec.edge_in.ring][rec.edge_in.edge].push(PseudoVertex {
            coord: rec.point,
            param: rec.param,
            edge_in: rec.edge_in,
            edge_out: rec.edge_out,
            next_isect: None,
        });
        if rec.unique {
            isects.push(Isect {
                coord: rec.point,
                edge1: rec.edge_in,
                edge2: rec.edge_out,
                next_along_edge1: None,
                next_along_edge2: None,
                edge1_walkable: true,
                edge2_walkable: true,
            });
        }
    }

    // Order each edge's pseudo-vertices by param; the ring pseudo-vertex
    // (param 1) lands last.
    for per_edge in &mut pv_lists {
        for list in per_edge.iter_mut() {
            list.sort_by(|a, b| a.param.partial_cmp(&b.param).unwrap_or(Ordering::Equal));
        }
    }

    // Spatial index over the intersection coordinates, keyed by degenerate
    // point boxes.
    let sites: Vec<Point2<F>> = isects.iter().map(|i| i.coord).collect();
    let index = PointBvh::build(&sites);

    // Resolve each pseudo-vertex's next intersection along its incoming
    // edge: the coordinate of its successor in the same list, or of the
    // first pseudo-vertex on the next ring edge when it is the last one.
    for per_edge in &mut pv_lists {
        for e in 0..per_edge.len() {
            for k in 0..per_edge[e].len() {
                let coord = if k + 1 < per_edge[e].len() {
                    per_edge[e][k + 1].coord
                } else {
                    // The last pseudo-vertex on an edge is the ring
                    // pseudo-vertex; its outgoing edge is the next ring edge.
                    let next_edge = per_edge[e][k].edge_out.edge;
                    per_edge[next_edge][0].coord
                };
                per_edge[e][k].next_isect = index.find(coord);
            }
        }
    }

    // Copy the resolved links onto the intersections. A ring-vertex
    // intersection's single pseudo-vertex continues the ring, so its link
    // always belongs to the outgoing side.
    for per_edge in &pv_lists {
        for list in per_edge {
            for pv in list {
                let at = match index.find(pv.coord) {
                    Some(i) => i,
                    None => continue,
                };
                if at < vertex_count {
                    isects[at].next_along_edge2 = pv.next_isect;
                } else if isects[at].edge1 == pv.edge_in {
                    isects[at].next_along_edge1 = pv.next_isect;
                } else {
                    isects[at].next_along_edge2 = pv.next_isect;
                }
            }
        }
    }

    IsectGraph {
        isects,
        ring_offsets,
    }
}
