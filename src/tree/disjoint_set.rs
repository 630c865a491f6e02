//! Union-find forest with path compression and union by rank

use crate::arena;
use crate::io::error::{AlgorithmError, Result};
use crate::lattice::VertexId;

/// Connectivity classes over `[0, N)`
///
/// Invariant: following parent links from any vertex terminates at a root
/// whose parent is itself. Two vertices share a root iff they have been
/// joined by a chain of successful [`DisjointSet::union`] calls.
#[derive(Clone, Debug)]
pub struct DisjointSet {
    parents: Vec<VertexId>,
    ranks: Vec<u8>,
}

impl DisjointSet {
    /// Create `len` singleton sets
    ///
    /// # Errors
    ///
    /// Returns an error if the parent or rank buffers cannot be allocated
    pub fn new(len: usize) -> Result<Self> {
        let mut parents = arena::with_capacity("union-find parents", len)?;
        parents.extend(0..len as VertexId);
        let ranks = arena::filled("union-find ranks", len, 0)?;
        Ok(Self { parents, ranks })
    }

    /// Number of elements
    pub const fn len(&self) -> usize {
        self.parents.len()
    }

    /// Test if the forest has no elements
    pub const fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Representative of the set containing `vertex`
    ///
    /// Walks to the root, then relinks every vertex on the walk directly to
    /// it. Iterative so deep chains cannot exhaust the stack.
    ///
    /// # Errors
    ///
    /// Returns an error if `vertex` is out of range
    pub fn find(&mut self, vertex: VertexId) -> Result<VertexId> {
        let mut root = vertex;
        loop {
            let parent = self.parent(root)?;
            if parent == root {
                break;
            }
            root = parent;
        }

        let len = self.len();
        let mut current = vertex;
        while current != root {
            let slot = self
                .parents
                .get_mut(current as usize)
                .ok_or_else(|| out_of_range(current, len))?;
            current = std::mem::replace(slot, root);
        }

        Ok(root)
    }

    /// Merge the sets containing `a` and `b`
    ///
    /// Returns `false` if they were already in the same set. Otherwise the
    /// lower-rank root is attached under the higher-rank one; on a tie `b`'s
    /// root goes under `a`'s and `a`'s rank grows.
    ///
    /// # Errors
    ///
    /// Returns an error if either vertex is out of range
    pub fn union(&mut self, a: VertexId, b: VertexId) -> Result<bool> {
        let root_a = self.find(a)?;
        let root_b = self.find(b)?;
        if root_a == root_b {
            return Ok(false);
        }

        let rank_a = self.rank(root_a);
        let rank_b = self.rank(root_b);
        let (child, survivor) = if rank_a < rank_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };

        if let Some(parent) = self.parents.get_mut(child as usize) {
            *parent = survivor;
        }
        if rank_a == rank_b {
            if let Some(rank) = self.ranks.get_mut(survivor as usize) {
                *rank = rank.saturating_add(1);
            }
        }

        Ok(true)
    }

    /// Test whether two vertices are in the same set
    ///
    /// # Errors
    ///
    /// Returns an error if either vertex is out of range
    pub fn connected(&mut self, a: VertexId, b: VertexId) -> Result<bool> {
        Ok(self.find(a)? == self.find(b)?)
    }

    fn parent(&self, vertex: VertexId) -> Result<VertexId> {
        self.parents
            .get(vertex as usize)
            .copied()
            .ok_or_else(|| out_of_range(vertex, self.len()))
    }

    fn rank(&self, root: VertexId) -> u8 {
        self.ranks.get(root as usize).copied().unwrap_or_default()
    }
}

const fn out_of_range(vertex: VertexId, vertex_count: usize) -> AlgorithmError {
    AlgorithmError::VertexOutOfRange {
        vertex: vertex as u64,
        vertex_count,
    }
}
