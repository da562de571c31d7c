//! Tolerance-aware numerical predicates.

mod predicates;

pub use predicates::{orient2d, point_on_segment, segment_crossing, Crossing, Orientation};
