//! Decomposition of complex polygons into simple annotated rings.
//!
//! The pipeline: normalize the input, find every self- and cross-
//! intersection, build the intersection graph, seed one walk per ring, and
//! walk out the simple rings. A post-pass resolves containment parents for
//! rings the walker never connected and propagates net windings down the
//! parent forest.

use super::core::{Polygon, SimpleRing};
use super::graph;
use super::intersections::find_intersections;
use super::normalize::normalize;
use super::walk::extract_rings;
use crate::error::UnkinkError;
use num_traits::Float;

/// Decomposes a polygon into simple, non-self-intersecting rings.
///
/// Input rings may self-intersect, cross each other, sit anywhere relative
/// to one another, and carry arbitrary orientations; open rings are closed
/// first. The output rings partition the traced interior of the input.
/// Each output ring reports its winding (`+1` counter-clockwise, `-1`
/// clockwise), the smallest output ring strictly containing it (`parent`),
/// and the accumulated winding of itself and its ancestors (`net_winding`).
///
/// Uses a default tolerance of `1e-10`; see [`decompose_with_tolerance`] to
/// choose one.
///
/// # Errors
///
/// [`UnkinkError::InvalidInput`] for empty geometry, degenerate rings, or
/// repeated vertices; [`UnkinkError::GraphInconsistency`] if the
/// intersection graph cannot be walked (a bug, not an input condition).
///
/// # Example
///
/// ```
/// use unkink::{decompose, Polygon, Ring};
///
/// // A figure-eight that crosses itself at (1, 1).
/// let bowtie = Ring::from_pairs(&[[0.0, 0.0], [2.0, 0.0], [0.0, 2.0], [2.0, 2.0]]);
/// let simple = decompose(&Polygon::from_ring(bowtie)).unwrap();
///
/// assert_eq!(simple.len(), 2);
/// assert_eq!(simple[0].winding, 1);
/// assert_eq!(simple[1].winding, -1);
/// ```
pub fn decompose<F: Float>(polygon: &Polygon<F>) -> Result<Vec<SimpleRing<F>>, UnkinkError> {
    decompose_with_tolerance(polygon, F::from(1e-10).unwrap())
}

/// Decomposes a polygon with an explicit tolerance.
///
/// `eps` bounds the crossing-acceptance window of the intersection finder
/// and the collinearity threshold of the extremal-vertex orientation test.
/// It is not a vertex-snapping radius: coordinates pass through unchanged.
pub fn decompose_with_tolerance<F: Float>(
    polygon: &Polygon<F>,
    eps: F,
) -> Result<Vec<SimpleRing<F>>, UnkinkError> {
    let normalized = normalize(polygon)?;
    let records = find_intersections(&normalized.rings, eps);

    let mut features = if records.is_empty() {
        // Nothing crosses anything: every input ring is already simple and
        // becomes one output ring, winding read off its extremal vertex.
        normalized
            .rings
            .into_iter()
            .map(|ring| {
                let winding = ring.winding(eps);
                SimpleRing {
                    ring,
                    winding,
                    net_winding: 0,
                    parent: None,
                }
            })
            .collect()
    } else {
        let mut graph = graph::build(&normalized, &records);
        extract_rings(&mut graph, eps)?
    };

    assign_parents(&mut features, eps);
    propagate_net_winding(&mut features);
    Ok(features)
}

/// Assigns each parentless ring the smallest-area ring strictly containing
/// it.
///
/// Rings walked out of a shared intersection already know their parent;
/// the leftovers are rings of pure input rings that happened to lie inside
/// another output ring. One representative point, the ring's first
/// coordinate, decides containment with the boundary excluded, so rings
/// touching
/// at a pinch point do not contain each other.
fn assign_parents<F: Float>(features: &mut [SimpleRing<F>], eps: F) {
    let candidates: Vec<usize> = (0..features.len())
        .filter(|&i| features[i].parent.is_none())
        .collect();
    if candidates.len() < 2 {
        return;
    }

    for &c in &candidates {
        let probe = match features[c].ring.coords.first() {
            Some(&p) => p,
            None => continue,
        };

        let mut parent: Option<usize> = None;
        let mut parent_area = F::infinity();
        for (i, other) in features.iter().enumerate() {
            if i == c {
                continue;
            }
            if other.ring.contains_strict(probe, eps) {
                let area = other.ring.area();
                if area < parent_area {
                    parent = Some(i);
                    parent_area = area;
                }
            }
        }
        features[c].parent = parent;
    }
}

/// Propagates net windings top-down over the parent forest.
///
/// A root keeps its own winding; every descendant adds its winding to its
/// parent's net.
fn propagate_net_winding<F>(features: &mut [SimpleRing<F>]) {
    for i in 0..features.len() {
        if features[i].parent.is_none() {
            let w = features[i].winding;
            features[i].net_winding = w;
            propagate_children(features, i, w);
        }
    }
}

fn propagate_children<F>(features: &mut [SimpleRing<F>], parent: usize, parent_net: i32) {
    for i in 0..features.len() {
        if features[i].parent == Some(parent) {
            let net = parent_net + features[i].winding;
            features[i].net_winding = net;
            propagate_children(features, i, net);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polygon::core::Ring;
    use approx::assert_relative_eq;

    fn coords(feature: &SimpleRing<f64>) -> Vec<(f64, f64)> {
        feature.ring.coords.iter().map(|p| (p.x, p.y)).collect()
    }

    /// Total signed area is conserved: the sum over output rings equals the
    /// shoelace sum of the input rings.
    fn assert_area_conserved(input: &Polygon<f64>, output: &[SimpleRing<f64>]) {
        let input_area: f64 = normalize(input)
            .unwrap()
            .rings
            .iter()
            .map(|r| r.signed_area())
            .sum();
        let output_area: f64 = output.iter().map(|f| f.ring.signed_area()).sum();
        assert_relative_eq!(input_area, output_area, epsilon = 1e-9);
    }

    /// Structural checks every decomposition must pass.
    fn assert_well_formed(output: &[SimpleRing<f64>]) {
        for (i, f) in output.iter().enumerate() {
            assert!(f.ring.is_closed(), "ring {} is not closed", i);
            assert!(f.ring.area() > 0.0, "ring {} has no area", i);
            assert!(
                f.winding == 1 || f.winding == -1,
                "ring {} has winding {}",
                i,
                f.winding
            );
            // Winding annotates the actual orientation.
            assert_eq!(
                f.winding,
                if f.ring.signed_area() > 0.0 { 1 } else { -1 },
                "ring {} winding disagrees with its orientation",
                i
            );
            match f.parent {
                None => assert_eq!(f.net_winding, f.winding),
                Some(p) => {
                    assert!(p < output.len(), "ring {} has out-of-range parent", i);
                    assert_ne!(p, i, "ring {} is its own parent", i);
                    assert_eq!(f.net_winding, output[p].net_winding + f.winding);
                }
            }
        }

        // The parent relation is acyclic.
        for i in 0..output.len() {
            let mut seen = 0;
            let mut at = i;
            while let Some(p) = output[at].parent {
                at = p;
                seen += 1;
                assert!(seen <= output.len(), "parent cycle through ring {}", i);
            }
        }
    }

    #[test]
    fn test_simple_square() {
        let input = Polygon::from_ring(Ring::from_pairs(&[
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
            [0.0, 0.0],
        ]));
        let output = decompose(&input).unwrap();

        assert_eq!(output.len(), 1);
        assert_eq!(
            coords(&output[0]),
            vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]
        );
        assert_eq!(output[0].winding, 1);
        assert_eq!(output[0].net_winding, 1);
        assert_eq!(output[0].parent, None);
        assert_well_formed(&output);
        assert_area_conserved(&input, &output);
    }

    #[test]
    fn test_figure_eight() {
        let input = Polygon::from_ring(Ring::from_pairs(&[
            [0.0, 0.0],
            [2.0, 0.0],
            [0.0, 2.0],
            [2.0, 2.0],
            [0.0, 0.0],
        ]));
        let output = decompose(&input).unwrap();

        assert_eq!(output.len(), 2);
        assert_eq!(
            coords(&output[0]),
            vec![(0.0, 0.0), (2.0, 0.0), (1.0, 1.0), (0.0, 0.0)]
        );
        assert_eq!(output[0].winding, 1);
        assert_eq!(output[0].parent, None);
        assert_eq!(output[0].net_winding, 1);

        assert_eq!(
            coords(&output[1]),
            vec![(1.0, 1.0), (0.0, 2.0), (2.0, 2.0), (1.0, 1.0)]
        );
        assert_eq!(output[1].winding, -1);
        assert_eq!(output[1].parent, None);
        assert_eq!(output[1].net_winding, -1);

        assert_well_formed(&output);
        assert_area_conserved(&input, &output);
    }

    #[test]
    fn test_square_with_disjoint_hole() {
        let input = Polygon::new(vec![
            Ring::from_pairs(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]]),
            Ring::from_pairs(&[[1.0, 1.0], [1.0, 3.0], [3.0, 3.0], [3.0, 1.0], [1.0, 1.0]]),
        ]);
        let output = decompose(&input).unwrap();

        assert_eq!(output.len(), 2);
        // Already-simple rings come back unchanged.
        assert_eq!(
            coords(&output[0]),
            vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]
        );
        assert_eq!(
            coords(&output[1]),
            vec![(1.0, 1.0), (1.0, 3.0), (3.0, 3.0), (3.0, 1.0), (1.0, 1.0)]
        );

        assert_eq!(output[0].winding, 1);
        assert_eq!(output[0].parent, None);
        assert_eq!(output[0].net_winding, 1);

        assert_eq!(output[1].winding, -1);
        assert_eq!(output[1].parent, Some(0));
        assert_eq!(output[1].net_winding, 0);

        assert_well_formed(&output);
        assert_area_conserved(&input, &output);
    }

    #[test]
    fn test_pinched_hourglass() {
        // Two edges meet at (3, 1.5), a point that is a vertex of neither.
        let input = Polygon::from_ring(Ring::from_pairs(&[
            [0.0, 0.0],
            [6.0, 0.0],
            [0.0, 3.0],
            [6.0, 3.0],
            [0.0, 0.0],
        ]));
        let output = decompose(&input).unwrap();

        assert_eq!(output.len(), 2);
        assert_eq!(
            coords(&output[0]),
            vec![(0.0, 0.0), (6.0, 0.0), (3.0, 1.5), (0.0, 0.0)]
        );
        assert_eq!(
            coords(&output[1]),
            vec![(3.0, 1.5), (0.0, 3.0), (6.0, 3.0), (3.0, 1.5)]
        );

        // Opposite windings, and the pinch point parents neither triangle
        // to the other.
        assert_eq!(output[0].winding, 1);
        assert_eq!(output[1].winding, -1);
        assert_eq!(output[0].parent, None);
        assert_eq!(output[1].parent, None);

        assert_well_formed(&output);
        assert_area_conserved(&input, &output);
    }

    #[test]
    fn test_nested_figure_eight_inside_square() {
        let input = Polygon::new(vec![
            Ring::from_pairs(&[
                [0.0, 0.0],
                [10.0, 0.0],
                [10.0, 10.0],
                [0.0, 10.0],
                [0.0, 0.0],
            ]),
            Ring::from_pairs(&[[2.0, 2.0], [8.0, 2.0], [2.0, 8.0], [8.0, 8.0], [2.0, 2.0]]),
        ]);
        let output = decompose(&input).unwrap();

        assert_eq!(output.len(), 3);

        // The square walks first (smallest leftmost x pops first), then the
        // two lobes of the figure-eight.
        assert_eq!(
            coords(&output[0]),
            vec![
                (0.0, 0.0),
                (10.0, 0.0),
                (10.0, 10.0),
                (0.0, 10.0),
                (0.0, 0.0)
            ]
        );
        assert_eq!(
            coords(&output[1]),
            vec![(2.0, 2.0), (8.0, 2.0), (5.0, 5.0), (2.0, 2.0)]
        );
        assert_eq!(
            coords(&output[2]),
            vec![(5.0, 5.0), (2.0, 8.0), (8.0, 8.0), (5.0, 5.0)]
        );

        assert_eq!(output[0].parent, None);
        assert_eq!(output[1].parent, Some(0));
        assert_eq!(output[2].parent, Some(0));

        assert_eq!(output[0].net_winding, 1);
        assert_eq!(output[1].net_winding, 2); // square +1, lobe +1
        assert_eq!(output[2].net_winding, 0); // square +1, lobe -1

        assert_well_formed(&output);
        assert_area_conserved(&input, &output);
    }

    #[test]
    fn test_crossing_rings() {
        // Two counter-clockwise squares overlapping in a unit square.
        let input = Polygon::new(vec![
            Ring::from_pairs(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0], [0.0, 0.0]]),
            Ring::from_pairs(&[[1.0, 1.0], [3.0, 1.0], [3.0, 3.0], [1.0, 3.0], [1.0, 1.0]]),
        ]);
        let output = decompose(&input).unwrap();

        assert_eq!(output.len(), 2);

        // The union boundary, walked from the outermost seed.
        assert_eq!(
            coords(&output[0]),
            vec![
                (0.0, 0.0),
                (2.0, 0.0),
                (2.0, 1.0),
                (3.0, 1.0),
                (3.0, 3.0),
                (1.0, 3.0),
                (1.0, 2.0),
                (0.0, 2.0),
                (0.0, 0.0)
            ]
        );
        assert_eq!(output[0].winding, 1);
        assert_eq!(output[0].parent, None);
        assert_eq!(output[0].net_winding, 1);

        // The doubly-covered overlap, nested inside the union.
        assert_eq!(
            coords(&output[1]),
            vec![(1.0, 2.0), (1.0, 1.0), (2.0, 1.0), (2.0, 2.0), (1.0, 2.0)]
        );
        assert_eq!(output[1].winding, 1);
        assert_eq!(output[1].parent, Some(0));
        assert_eq!(output[1].net_winding, 2);

        assert_well_formed(&output);
        assert_area_conserved(&input, &output);
    }

    #[test]
    fn test_open_rings_are_closed() {
        let open = Polygon::from_ring(Ring::from_pairs(&[
            [0.0, 0.0],
            [2.0, 0.0],
            [0.0, 2.0],
            [2.0, 2.0],
        ]));
        let closed = Polygon::from_ring(Ring::from_pairs(&[
            [0.0, 0.0],
            [2.0, 0.0],
            [0.0, 2.0],
            [2.0, 2.0],
            [0.0, 0.0],
        ]));
        assert_eq!(decompose(&open).unwrap(), decompose(&closed).unwrap());
    }

    #[test]
    fn test_idempotent_on_simple_input() {
        let input = Polygon::new(vec![
            Ring::from_pairs(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]]),
            Ring::from_pairs(&[[1.0, 1.0], [1.0, 3.0], [3.0, 3.0], [3.0, 1.0], [1.0, 1.0]]),
        ]);
        let once = decompose(&input).unwrap();

        let again_input = Polygon::new(once.iter().map(|f| f.ring.clone()).collect());
        let twice = decompose(&again_input).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_invalid_input_is_rejected_early() {
        let empty: Polygon<f64> = Polygon::new(vec![]);
        assert!(matches!(
            decompose(&empty),
            Err(UnkinkError::InvalidInput { .. })
        ));

        let duplicated = Polygon::from_ring(Ring::from_pairs(&[
            [0.0, 0.0],
            [2.0, 0.0],
            [1.0, 1.0],
            [2.0, 2.0],
            [0.0, 2.0],
            [1.0, 1.0],
        ]));
        assert!(matches!(
            decompose(&duplicated),
            Err(UnkinkError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_f32_input() {
        let input: Polygon<f32> = Polygon::from_ring(Ring::from_pairs(&[
            [0.0, 0.0],
            [2.0, 0.0],
            [0.0, 2.0],
            [2.0, 2.0],
        ]));
        let output = decompose_with_tolerance(&input, 1e-6).unwrap();

        assert_eq!(output.len(), 2);
        assert_eq!(output[0].winding, 1);
        assert_eq!(output[1].winding, -1);
    }

    #[test]
    fn test_pentagram() {
        // A five-pointed star traced in one stroke: five crossings. The
        // walk turns at every crossing, so the decomposition is the
        // ten-vertex star outline plus the doubly-wound core pentagon.
        let n = 5;
        let pts: Vec<[f64; 2]> = (0..n)
            .map(|i| {
                let theta = std::f64::consts::TAU * (2 * i) as f64 / n as f64;
                [theta.cos(), theta.sin()]
            })
            .collect();
        let input = Polygon::from_ring(Ring::from_pairs(&pts));
        let output = decompose(&input).unwrap();

        assert_eq!(output.len(), 2);
        assert_eq!(output[0].ring.edge_count(), 10);
        assert_eq!(output[0].winding, 1);
        assert_eq!(output[0].parent, None);

        // The core pentagon sits inside the outline and is wound twice.
        assert_eq!(output[1].ring.edge_count(), 5);
        assert_eq!(output[1].winding, 1);
        assert_eq!(output[1].parent, Some(0));
        assert_eq!(output[1].net_winding, 2);

        assert_well_formed(&output);
        assert_area_conserved(&input, &output);
    }
}
