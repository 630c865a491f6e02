//! Bounded-degree per-vertex neighbour lists

use ndarray::Array2;

use crate::arena;
use crate::io::error::{AlgorithmError, Result, invariant_violation};
use crate::lattice::VertexId;

/// Fixed-capacity tree neighbour lists for every vertex
///
/// One row per vertex: column 0 holds the number of recorded neighbours,
/// columns `1..=capacity` hold the neighbours in insertion order. The
/// capacity is the lattice's maximum degree, so the whole store is a single
/// `N x (degree + 1)` buffer with no per-vertex allocation.
#[derive(Clone, Debug)]
pub struct TreeAdjacency {
    rows: Array2<VertexId>,
    capacity: usize,
    entries: usize,
}

impl TreeAdjacency {
    /// Create an empty store for `vertex_count` vertices of degree at most `capacity`
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer cannot be allocated
    pub fn new(vertex_count: usize, capacity: usize) -> Result<Self> {
        let stride = capacity + 1;
        let len = vertex_count
            .checked_mul(stride)
            .ok_or(AlgorithmError::Allocation {
                buffer: "tree adjacency",
                len: usize::MAX,
            })?;
        let buffer = arena::filled("tree adjacency", len, 0)?;
        let rows = Array2::from_shape_vec((vertex_count, stride), buffer).map_err(|e| {
            invariant_violation("tree adjacency allocation", &e)
        })?;

        Ok(Self {
            rows,
            capacity,
            entries: 0,
        })
    }

    /// Number of vertices covered
    pub fn vertex_count(&self) -> usize {
        self.rows.nrows()
    }

    /// Maximum neighbours per vertex
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total neighbour entries across all vertices
    ///
    /// `2 * (N - 1)` for an undirected spanning tree, `N - 1` for a rooted one.
    pub const fn entry_count(&self) -> usize {
        self.entries
    }

    /// Number of neighbours recorded for `vertex`
    pub fn degree(&self, vertex: VertexId) -> usize {
        self.rows
            .get((vertex as usize, 0))
            .map_or(0, |&count| count as usize)
    }

    /// Recorded neighbours of `vertex` in insertion order
    pub fn neighbors(&self, vertex: VertexId) -> &[VertexId] {
        let start = vertex as usize * (self.capacity + 1) + 1;
        self.rows
            .as_slice()
            .and_then(|flat| flat.get(start..start + self.degree(vertex)))
            .unwrap_or(&[])
    }

    /// Record `to` as a neighbour of `from` only
    ///
    /// # Errors
    ///
    /// Returns an error if either vertex is out of range or `from` is already
    /// at capacity, both of which mean the input is not a bounded-degree tree
    pub fn push_directed(&mut self, from: VertexId, to: VertexId) -> Result<()> {
        if to as usize >= self.vertex_count() {
            return Err(AlgorithmError::VertexOutOfRange {
                vertex: u64::from(to),
                vertex_count: self.vertex_count(),
            });
        }

        let row = from as usize;
        let count = self
            .rows
            .get((row, 0))
            .copied()
            .ok_or(AlgorithmError::VertexOutOfRange {
                vertex: u64::from(from),
                vertex_count: self.vertex_count(),
            })? as usize;
        if count >= self.capacity {
            return Err(invariant_violation(
                "tree adjacency",
                &format!("vertex {from} already has {count} tree neighbours"),
            ));
        }

        if let Some(slot) = self.rows.get_mut((row, count + 1)) {
            *slot = to;
        }
        if let Some(slot) = self.rows.get_mut((row, 0)) {
            *slot += 1;
        }
        self.entries += 1;
        Ok(())
    }

    /// Record an undirected tree edge from both endpoints
    ///
    /// # Errors
    ///
    /// Returns an error if either endpoint is out of range or at capacity
    pub fn link(&mut self, a: VertexId, b: VertexId) -> Result<()> {
        self.push_directed(a, b)?;
        self.push_directed(b, a)
    }
}
