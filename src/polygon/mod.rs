//! Decomposition of complex polygons into simple rings.
//!
//! A polygon whose rings self-intersect or cross each other traces a
//! region no single simple ring can describe. This module splits such a
//! polygon into simple, non-self-intersecting rings that partition the
//! traced interior, each annotated with its winding number, its containment
//! parent, and the net winding accumulated from its ancestors.
//!
//! # Example
//!
//! ```
//! use unkink::{decompose, Polygon, Ring};
//!
//! // A square with a hole: two rings, no intersections.
//! let polygon = Polygon::new(vec![
//!     Ring::from_pairs(&[[0.0, 0.0], [4.0, 0.0], [4.0, 4.0], [0.0, 4.0], [0.0, 0.0]]),
//!     Ring::from_pairs(&[[1.0, 1.0], [1.0, 3.0], [3.0, 3.0], [3.0, 1.0], [1.0, 1.0]]),
//! ]);
//!
//! let simple = decompose(&polygon).unwrap();
//! assert_eq!(simple.len(), 2);
//! assert_eq!(simple[1].parent, Some(0)); // the hole nests in the square
//! assert_eq!(simple[1].net_winding, 0); // +1 outer, -1 hole
//! ```

mod core;
mod decompose;
mod graph;
mod intersections;
mod normalize;
mod walk;

pub use self::core::{Polygon, Ring, SimpleRing};
pub use self::decompose::{decompose, decompose_with_tolerance};
