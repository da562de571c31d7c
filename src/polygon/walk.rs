//! Winding seeds and the ring-extraction walk.
//!
//! One seed per input ring enters a LIFO stack; each pop walks the
//! intersection graph from intersection to intersection until the walk
//! closes, emitting one simple ring. Crossings met along the way predict
//! the winding and parent of the ring still passing through them and push
//! it onto the stack.

use super::core::{Ring, SimpleRing};
use super::graph::IsectGraph;
use crate::error::UnkinkError;
use crate::primitives::Point2;
use crate::tolerance::{orient2d, Orientation};
use num_traits::Float;
use std::cmp::Ordering;

/// A pending walk: start intersection, predicted parent and winding.
#[derive(Debug, Clone, Copy)]
struct WalkSeed {
    isect: usize,
    parent: Option<usize>,
    winding: i32,
}

/// Builds one seed per input ring from the convexity of its leftmost
/// ring-vertex intersection.
///
/// The returned vector is the walk stack: it is sorted descending by the
/// seed coordinate so that the seed with the smallest leftmost x (the
/// outermost ring) pops first. This order is load-bearing: the
/// winding/parent prediction during walking assumes enclosing rings are
/// walked before the rings nested inside them, and reversing it misassigns
/// parents.
fn seed_queue<F: Float>(graph: &IsectGraph<F>, eps: F) -> Result<Vec<WalkSeed>, UnkinkError> {
    let mut queue = Vec::with_capacity(graph.ring_count());

    for r in 0..graph.ring_count() {
        let range = graph.ring_vertex_range(r);
        let mut chosen = range.start;
        for i in range {
            let (p, q) = (graph.isects[i].coord, graph.isects[chosen].coord);
            if p.x < q.x || (p.x == q.x && p.y < q.y) {
                chosen = i;
            }
        }

        // The predecessor is whichever intersection links forward to the
        // chosen one; exactly one does.
        let mut pred = None;
        for (i, isect) in graph.isects.iter().enumerate() {
            if isect.next_along_edge1 == Some(chosen) || isect.next_along_edge2 == Some(chosen) {
                pred = Some(i);
                break;
            }
        }
        let pred = pred.ok_or(UnkinkError::GraphInconsistency { index: chosen })?;
        let succ = graph.next_along(chosen, false)?;

        let winding = match orient2d(
            graph.isects[pred].coord,
            graph.isects[chosen].coord,
            graph.isects[succ].coord,
            eps,
        ) {
            Orientation::Clockwise => -1,
            _ => 1,
        };

        queue.push(WalkSeed {
            isect: chosen,
            parent: None,
            winding,
        });
    }

    queue.sort_by(|a, b| {
        let (p, q) = (graph.isects[a.isect].coord, graph.isects[b.isect].coord);
        q.x.partial_cmp(&p.x)
            .unwrap_or(Ordering::Equal)
            .then(q.y.partial_cmp(&p.y).unwrap_or(Ordering::Equal))
    });
    Ok(queue)
}

/// Extracts every simple output ring by walking the intersection graph.
///
/// Pops a seed and walks forward until the walk returns to its start, at
/// each intersection arriving on one side, departing on the other, and
/// clearing the departure's walkable flag. Intersections whose
/// arrival side is still walkable carry a second, unfinished ring; its seed
/// is predicted and pushed. Queue entries reached by an ongoing walk are
/// removed, since that walk consumes them.
pub(crate) fn extract_rings<F: Float>(
    graph: &mut IsectGraph<F>,
    eps: F,
) -> Result<Vec<SimpleRing<F>>, UnkinkError> {
    let mut queue = seed_queue(graph, eps)?;
    let mut features: Vec<SimpleRing<F>> = Vec::new();

    while let Some(seed) = queue.pop() {
        let start = seed.isect;
        let current_ring = features.len();
        let mut coords = vec![graph.isects[start].coord];

        let (mut walking_edge, mut nxt) = if graph.isects[start].edge1_walkable {
            (graph.isects[start].edge1, graph.next_along(start, true)?)
        } else {
            (graph.isects[start].edge2, graph.next_along(start, false)?)
        };
        let mut current = start;

        // A sound graph routes each walk through at most two visits per
        // intersection; running longer means the wiring is broken.
        let mut hops = 2 * graph.isects.len() + 2;

        while nxt != start {
            if hops == 0 {
                return Err(UnkinkError::GraphInconsistency { index: nxt });
            }
            hops -= 1;

            coords.push(graph.isects[nxt].coord);
            if let Some(pos) = queue.iter().position(|s| s.isect == nxt) {
                queue.remove(pos);
            }

            if walking_edge == graph.isects[nxt].edge1 {
                // Arrived along edge1, departing along edge2.
                graph.isects[nxt].edge2_walkable = false;
                let onward = graph.next_along(nxt, false)?;
                if graph.isects[nxt].edge1_walkable {
                    queue.push(predict(
                        graph,
                        current,
                        nxt,
                        onward,
                        seed.winding,
                        seed.parent,
                        current_ring,
                    ));
                }
                walking_edge = graph.isects[nxt].edge2;
                current = nxt;
                nxt = onward;
            } else {
                // Arrived along edge2, departing along edge1.
                graph.isects[nxt].edge1_walkable = false;
                let onward = graph.next_along(nxt, true)?;
                if graph.isects[nxt].edge2_walkable {
                    queue.push(predict(
                        graph,
                        current,
                        nxt,
                        onward,
                        seed.winding,
                        seed.parent,
                        current_ring,
                    ));
                }
                walking_edge = graph.isects[nxt].edge1;
                current = nxt;
                nxt = onward;
            }
        }
        coords.push(graph.isects[nxt].coord);

        features.push(SimpleRing {
            ring: Ring::new(coords),
            winding: seed.winding,
            net_winding: 0,
            parent: seed.parent,
        });
    }

    Ok(features)
}

/// Predicts the seed of the second ring passing through `at`.
///
/// The current walk came from `prev` with `winding` and leaves towards
/// `onward`. A convex corner means the second ring hugs the outside of the
/// current one: opposite winding, same parent. A reflex corner means it is
/// nested inside: same winding, parented to the ring being walked.
fn predict<F: Float>(
    graph: &IsectGraph<F>,
    prev: usize,
    at: usize,
    onward: usize,
    winding: i32,
    parent: Option<usize>,
    current_ring: usize,
) -> WalkSeed {
    let a = graph.isects[prev].coord;
    let b = graph.isects[at].coord;
    let c = graph.isects[onward].coord;

    if right_hand_convex(a, b, c, winding == 1) {
        WalkSeed {
            isect: at,
            parent,
            winding: -winding,
        }
    } else {
        WalkSeed {
            isect: at,
            parent: Some(current_ring),
            winding,
        }
    }
}

/// Raw-sign convexity used during walking.
///
/// No tolerance here: degenerate triples cannot reach this point, and
/// identity along the walk is by intersection index, never by coordinate.
fn right_hand_convex<F: Float>(
    a: Point2<F>,
    b: Point2<F>,
    c: Point2<F>,
    right_handed: bool,
) -> bool {
    ((b - a).cross(c - a) >= F::zero()) == right_handed
}
