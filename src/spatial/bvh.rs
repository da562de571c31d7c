//! Static bounding-volume hierarchy over point sites.
//!
//! The decomposition graph has to map a coordinate back to the index of the
//! intersection sitting there. Sites are loaded once after graph seeding and
//! looked up with point-sized boxes, so the structure is built in one batch
//! and never modified.

use crate::bounds::Aabb2;
use crate::primitives::Point2;
use num_traits::Float;

/// Maximum number of sites stored in a leaf.
const MAX_LEAF: usize = 4;

/// A node in the hierarchy.
#[derive(Debug, Clone)]
enum Node<F> {
    /// A run of `count` entries in the site ordering starting at `first`.
    Leaf {
        bounds: Aabb2<F>,
        first: usize,
        count: usize,
    },
    /// An inner node with two children.
    Internal {
        bounds: Aabb2<F>,
        left: usize,
        right: usize,
    },
}

impl<F: Float> Node<F> {
    fn bounds(&self) -> Aabb2<F> {
        match self {
            Node::Leaf { bounds, .. } => *bounds,
            Node::Internal { bounds, .. } => *bounds,
        }
    }
}

/// A static BVH over point sites.
///
/// Lookups return indices into the site list the tree was built from.
///
/// # Example
///
/// ```
/// use unkink::{Point2, PointBvh};
///
/// let sites: Vec<Point2<f64>> = vec![
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(5.0, 5.0),
/// ];
///
/// let bvh = PointBvh::build(&sites);
/// assert_eq!(bvh.find(Point2::new(1.0, 1.0)), Some(1));
/// assert_eq!(bvh.find(Point2::new(2.0, 2.0)), None);
/// ```
#[derive(Debug, Clone)]
pub struct PointBvh<F> {
    sites: Vec<Point2<F>>,
    /// Site indices reordered so each node owns a contiguous run.
    order: Vec<usize>,
    nodes: Vec<Node<F>>,
    root: usize,
}

impl<F: Float> PointBvh<F> {
    /// Builds a BVH over a slice of sites.
    ///
    /// The tree keeps its own copy of the coordinates; queries return
    /// indices into the original slice.
    pub fn build(sites: &[Point2<F>]) -> Self {
        let n = sites.len();
        if n == 0 {
            return Self {
                sites: Vec::new(),
                order: Vec::new(),
                nodes: Vec::new(),
                root: 0,
            };
        }

        let mut order: Vec<usize> = (0..n).collect();
        let mut nodes = Vec::with_capacity(2 * n / MAX_LEAF + 1);
        let root = build_recursive(sites, &mut order, 0, n, &mut nodes);

        Self {
            sites: sites.to_vec(),
            order,
            nodes,
            root,
        }
    }

    /// Returns true if the tree holds no sites.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of sites.
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Looks up the site exactly at `p`, treating it as a point-sized box
    /// against the node bounds.
    ///
    /// The first hit wins; the decomposition graph guarantees site
    /// coordinates are unique, so there is never a second.
    pub fn find(&self, p: Point2<F>) -> Option<usize> {
        if self.nodes.is_empty() {
            return None;
        }
        self.find_recursive(self.root, p)
    }

    fn find_recursive(&self, node_idx: usize, p: Point2<F>) -> Option<usize> {
        let node = &self.nodes[node_idx];
        if !node.bounds().contains_point(p) {
            return None;
        }

        match node {
            Node::Leaf { first, count, .. } => self.order[*first..*first + *count]
                .iter()
                .copied()
                .find(|&site| self.sites[site] == p),
            Node::Internal { left, right, .. } => self
                .find_recursive(*left, p)
                .or_else(|| self.find_recursive(*right, p)),
        }
    }
}

/// Recursively builds the tree over `order[start..end]`.
fn build_recursive<F: Float>(
    sites: &[Point2<F>],
    order: &mut [usize],
    start: usize,
    end: usize,
    nodes: &mut Vec<Node<F>>,
) -> usize {
    let count = end - start;

    let mut bounds = Aabb2::from_point(sites[order[start]]);
    for &i in &order[start + 1..end] {
        bounds = bounds.expand_to_include(sites[i]);
    }

    if count <= MAX_LEAF {
        nodes.push(Node::Leaf {
            bounds,
            first: start,
            count,
        });
        return nodes.len() - 1;
    }

    // Median split along the wider axis.
    let split_x = bounds.width() > bounds.height();
    order[start..end].sort_by(|&a, &b| {
        let (ka, kb) = if split_x {
            (sites[a].x, sites[b].x)
        } else {
            (sites[a].y, sites[b].y)
        };
        ka.partial_cmp(&kb).unwrap_or(std::cmp::Ordering::Equal)
    });
    let mid = start + count / 2;

    let node_idx = nodes.len();
    nodes.push(Node::Internal {
        bounds,
        left: 0, // Placeholder
        right: 0,
    });

    let left = build_recursive(sites, order, start, mid, nodes);
    let right = build_recursive(sites, order, mid, end, nodes);

    nodes[node_idx] = Node::Internal {
        bounds,
        left,
        right,
    };

    node_idx
}
