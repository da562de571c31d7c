//! Input normalization: ring closure and vertex uniqueness.

use super::core::{Polygon, Ring};
use crate::error::UnkinkError;
use crate::primitives::Point2;
use num_traits::Float;
use std::cmp::Ordering;

/// Normalized input: closed rings plus the total non-closing vertex count.
#[derive(Debug, Clone)]
pub(crate) struct Normalized<F> {
    pub rings: Vec<Ring<F>>,
    pub vertex_count: usize,
}

/// Closes open rings and validates the input.
///
/// Fails with [`UnkinkError::InvalidInput`] when the polygon has no rings,
/// a ring has fewer than three distinct vertices, or any non-closing vertex
/// coordinate occurs twice, within one ring or across rings.
pub(crate) fn normalize<F: Float>(polygon: &Polygon<F>) -> Result<Normalized<F>, UnkinkError> {
    if polygon.rings.is_empty() {
        return Err(UnkinkError::InvalidInput {
            reason: "polygon has no rings".to_string(),
        });
    }

    let mut rings = Vec::with_capacity(polygon.rings.len());
    let mut vertex_count = 0;
    for (r, ring) in polygon.rings.iter().enumerate() {
        let mut coords = ring.coords.clone();
        let first = match coords.first() {
            Some(&p) => p,
            None => {
                return Err(UnkinkError::InvalidInput {
                    reason: format!("ring {} is empty", r),
                })
            }
        };
        if coords.last() != Some(&first) {
            coords.push(first);
        }
        if coords.len() < 4 {
            return Err(UnkinkError::InvalidInput {
                reason: format!("ring {} has fewer than 3 distinct vertices", r),
            });
        }
        vertex_count += coords.len() - 1;
        rings.push(Ring::new(coords));
    }

    check_vertex_uniqueness(&rings, vertex_count)?;

    Ok(Normalized {
        rings,
        vertex_count,
    })
}

/// Rejects repeated non-closing vertices anywhere in the input.
///
/// Sorts all coordinates and scans adjacent entries: the ordered equivalent
/// of a set-membership check, which `F: Float` (no `Hash`, no `Eq`) rules
/// out.
fn check_vertex_uniqueness<F: Float>(
    rings: &[Ring<F>],
    vertex_count: usize,
) -> Result<(), UnkinkError> {
    let mut all: Vec<(Point2<F>, usize, usize)> = Vec::with_capacity(vertex_count);
    for (r, ring) in rings.iter().enumerate() {
        for (v, &coord) in ring.coords[..ring.coords.len() - 1].iter().enumerate() {
            all.push((coord, r, v));
        }
    }

    all.sort_by(|a, b| {
        a.0.x
            .partial_cmp(&b.0.x)
            .unwrap_or(Ordering::Equal)
            .then(a.0.y.partial_cmp(&b.0.y).unwrap_or(Ordering::Equal))
    });

    for w in all.windows(2) {
        if w[0].0 == w[1].0 {
            return Err(UnkinkError::InvalidInput {
                reason: format!(
                    "duplicate vertex: ring {} vertex {} repeats ring {} vertex {}",
                    w[1].1, w[1].2, w[0].1, w[0].2
                ),
            });
        }
    }
    Ok(())
}
