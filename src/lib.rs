//! unkink - Simple-ring decomposition of complex polygons
//!
//! Planar polygons arrive broken more often than not: rings that cross
//! themselves, rings that cross each other, holes that aren't where holes
//! should be. This library decomposes any such polygon into simple,
//! non-self-intersecting rings that partition its traced interior, and
//! annotates each ring with its winding number, net winding number, and
//! containment parent.

pub mod bounds;
pub mod error;
pub mod polygon;
pub mod primitives;
pub mod spatial;
pub mod tolerance;

pub use bounds::Aabb2;
pub use error::UnkinkError;
pub use polygon::{decompose, decompose_with_tolerance, Polygon, Ring, SimpleRing};
pub use primitives::{Point2, Segment2, Vec2};
pub use spatial::PointBvh;
pub use tolerance::{orient2d, point_on_segment, segment_crossing, Crossing, Orientation};
