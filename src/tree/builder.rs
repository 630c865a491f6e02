//! Spanning-tree builder abstraction and its shared output type

use bitvec::prelude::*;

use crate::arena;
use crate::io::error::{Result, invariant_violation};
use crate::lattice::{Edge, VertexId};
use crate::tree::adjacency::TreeAdjacency;

/// How the adjacency store records tree edges
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    /// Every edge is recorded from both endpoints; any vertex can serve as root
    Undirected,
    /// Every edge is recorded only from parent to child
    Outward {
        /// The only vertex a traversal can start from
        root: VertexId,
    },
}

/// A spanning tree over `[0, N)` and how its edges are stored
#[derive(Clone, Debug)]
pub struct SpanningTree {
    adjacency: TreeAdjacency,
    orientation: Orientation,
}

impl SpanningTree {
    /// Wrap a finished adjacency store
    pub const fn new(adjacency: TreeAdjacency, orientation: Orientation) -> Self {
        Self {
            adjacency,
            orientation,
        }
    }

    /// Underlying neighbour lists
    pub const fn adjacency(&self) -> &TreeAdjacency {
        &self.adjacency
    }

    /// Edge storage convention
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of vertices spanned
    pub fn vertex_count(&self) -> usize {
        self.adjacency.vertex_count()
    }

    /// Number of distinct tree edges
    pub const fn edge_count(&self) -> usize {
        match self.orientation {
            Orientation::Undirected => self.adjacency.entry_count() / 2,
            Orientation::Outward { .. } => self.adjacency.entry_count(),
        }
    }

    /// Distinct tree edges, each with its smaller endpoint first, sorted
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges: Vec<Edge> = (0..self.vertex_count() as VertexId)
            .flat_map(|vertex| {
                self.adjacency
                    .neighbors(vertex)
                    .iter()
                    .map(move |&next| Edge(vertex, next))
            })
            .filter(|edge| match self.orientation {
                Orientation::Undirected => edge.0 < edge.1,
                Orientation::Outward { .. } => true,
            })
            .map(Edge::normalized)
            .collect();
        edges.sort_unstable();
        edges
    }
}

/// Grows a spanning tree over a lattice
///
/// Implementations keep their working state (union-find forest, walk path)
/// private and hand back only the finished [`SpanningTree`].
pub trait SpanningTreeBuilder {
    /// Run the construction to completion
    ///
    /// # Errors
    ///
    /// Returns an error if a buffer cannot be allocated or the input does
    /// not describe a connected lattice
    fn build(self) -> Result<SpanningTree>;
}

/// Check that a tree has `N - 1` edges and reaches every vertex exactly once
///
/// Traverses from `root` (any vertex for undirected trees, the recorded
/// root for outward trees) without using the tree's own orientation to
/// suppress revisits, so a cycle shows up as a revisit.
///
/// # Errors
///
/// Returns an error describing the first violated property
pub fn verify_spanning_tree(tree: &SpanningTree, root: VertexId) -> Result<()> {
    let vertex_count = tree.vertex_count();
    if vertex_count == 0 {
        return Err(invariant_violation("spanning tree check", &"tree is empty"));
    }
    if tree.edge_count() != vertex_count - 1 {
        return Err(invariant_violation(
            "spanning tree check",
            &format!(
                "expected {} edges, found {}",
                vertex_count - 1,
                tree.edge_count()
            ),
        ));
    }
    if let Orientation::Outward { root: recorded } = tree.orientation() {
        if recorded != root {
            return Err(invariant_violation(
                "spanning tree check",
                &format!("outward tree is rooted at {recorded}, not {root}"),
            ));
        }
    }

    let mut seen = bitvec![0; vertex_count];
    let mut stack: Vec<(VertexId, Option<VertexId>)> =
        arena::with_capacity("spanning tree check stack", vertex_count)?;
    stack.push((root, None));
    let mut reached = 0;

    while let Some((vertex, parent)) = stack.pop() {
        let state = seen.get(vertex as usize).map(|bit| *bit);
        match state {
            Some(false) => seen.set(vertex as usize, true),
            Some(true) => {
                return Err(invariant_violation(
                    "spanning tree check",
                    &format!("vertex {vertex} reached twice"),
                ));
            }
            None => {
                return Err(invariant_violation(
                    "spanning tree check",
                    &format!("vertex {vertex} is outside the tree"),
                ));
            }
        }
        reached += 1;

        for &next in tree.adjacency().neighbors(vertex) {
            if Some(next) != parent {
                stack.push((next, Some(vertex)));
            }
        }
    }

    if reached == vertex_count {
        Ok(())
    } else {
        Err(invariant_violation(
            "spanning tree check",
            &format!("reached {reached} of {vertex_count} vertices"),
        ))
    }
}
