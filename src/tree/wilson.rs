//! Wilson's algorithm: spanning trees from loop-erased random walks
//!
//! Starting from a tree holding only the root, each vertex not yet in the
//! tree (probed in increasing id order) launches a random walk that runs
//! until it hits the tree. Whenever the walk returns to a vertex already on
//! its path, the loop is erased by truncating the path back to that vertex.
//! The surviving path is then spliced into the tree. The result is a
//! uniformly random spanning tree regardless of probe order.

use bitvec::prelude::*;
use indicatif::ProgressBar;
use std::time::Instant;
use tracing::{debug, info};

use crate::arena;
use crate::io::configuration::PROGRESS_BATCH;
use crate::io::error::{AlgorithmError, Result, invariant_violation};
use crate::lattice::{Lattice, NeighborSampler, VertexId};
use crate::tree::adjacency::TreeAdjacency;
use crate::tree::builder::{Orientation, SpanningTree, SpanningTreeBuilder};

/// Per-vertex walk state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    /// Not on the current walk and not yet in the tree (or the root)
    Unset,
    /// On the current walk at this path position
    OnPath(u32),
    /// In the tree, pointing one step closer to the root
    Toward(VertexId),
}

/// Spanning-tree builder driven by a neighbour sampler
pub struct WilsonBuilder<S> {
    sampler: S,
    root: VertexId,
    max_degree: usize,
    in_tree: BitVec,
    marks: Vec<Mark>,
    path: Vec<VertexId>,
    tree_size: usize,
    progress: Option<ProgressBar>,
}

impl<S: NeighborSampler> WilsonBuilder<S> {
    /// Prepare a tree over `lattice` containing only `root`
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is outside the lattice or a buffer cannot
    /// be allocated
    pub fn new(lattice: &Lattice, root: VertexId, sampler: S) -> Result<Self> {
        let vertex_count = lattice.vertex_count();
        if !lattice.contains(root) {
            return Err(AlgorithmError::VertexOutOfRange {
                vertex: u64::from(root),
                vertex_count,
            });
        }

        let mut in_tree = bitvec![0; vertex_count];
        in_tree.set(root as usize, true);

        Ok(Self {
            sampler,
            root,
            max_degree: lattice.max_degree(),
            in_tree,
            marks: arena::filled("walk marks", vertex_count, Mark::Unset)?,
            path: Vec::new(),
            tree_size: 1,
            progress: None,
        })
    }

    /// Report tree growth to a progress bar
    #[must_use]
    pub fn with_progress(self, progress: ProgressBar) -> Self {
        progress.set_length(self.vertex_count() as u64);
        Self {
            progress: Some(progress),
            ..self
        }
    }

    /// Number of vertices in the lattice
    pub const fn vertex_count(&self) -> usize {
        self.marks.len()
    }

    /// Number of vertices absorbed into the tree so far
    pub const fn tree_size(&self) -> usize {
        self.tree_size
    }

    /// Test whether a vertex has been absorbed into the tree
    pub fn in_tree(&self, vertex: VertexId) -> bool {
        self.in_tree.get(vertex as usize).as_deref() == Some(&true)
    }

    /// Run one loop-erased walk from `probe` and splice it into the tree
    ///
    /// Returns the spliced path: `probe` first, the tree vertex it reached
    /// last, and no vertex twice. Returns an empty path if `probe` is
    /// already in the tree.
    ///
    /// # Errors
    ///
    /// Returns an error if `probe` or any sampled step is outside the lattice
    pub fn walk_from(&mut self, probe: VertexId) -> Result<&[VertexId]> {
        self.path.clear();
        self.check_vertex(probe)?;
        if self.in_tree(probe) {
            return Ok(self.path.as_slice());
        }

        self.path.push(probe);
        while let Some(&current) = self.path.last() {
            if self.in_tree(current) {
                break;
            }
            self.set_mark(current, Mark::OnPath(self.path.len() as u32 - 1));

            let next = self.sampler.sample(current);
            self.check_vertex(next)?;

            if let Some(Mark::OnPath(position)) = self.marks.get(next as usize).copied() {
                // Erase the loop, keeping `next` as the walk's head
                let keep = position as usize + 1;
                for &vertex in self.path.get(keep..).unwrap_or(&[]) {
                    if let Some(slot) = self.marks.get_mut(vertex as usize) {
                        *slot = Mark::Unset;
                    }
                }
                self.path.truncate(keep);
            } else {
                self.path.push(next);
            }
        }

        // Point every walked vertex one step along the path
        for index in 1..self.path.len() {
            if let (Some(&from), Some(&to)) = (self.path.get(index - 1), self.path.get(index)) {
                self.set_mark(from, Mark::Toward(to));
                self.in_tree.set(from as usize, true);
                self.tree_size += 1;
            }
        }

        Ok(self.path.as_slice())
    }

    fn check_vertex(&self, vertex: VertexId) -> Result<()> {
        if (vertex as usize) < self.vertex_count() {
            Ok(())
        } else {
            Err(AlgorithmError::VertexOutOfRange {
                vertex: u64::from(vertex),
                vertex_count: self.vertex_count(),
            })
        }
    }

    fn set_mark(&mut self, vertex: VertexId, mark: Mark) {
        if let Some(slot) = self.marks.get_mut(vertex as usize) {
            *slot = mark;
        }
    }

    fn into_tree(self) -> Result<SpanningTree> {
        let mut adjacency = TreeAdjacency::new(self.vertex_count(), self.max_degree)?;
        for (vertex, mark) in (0..).zip(&self.marks) {
            match *mark {
                Mark::Toward(parent) => adjacency.push_directed(parent, vertex)?,
                Mark::Unset if vertex == self.root => {}
                _ => {
                    return Err(invariant_violation(
                        "wilson construction",
                        &format!("vertex {vertex} was never attached to the tree"),
                    ));
                }
            }
        }
        Ok(SpanningTree::new(
            adjacency,
            Orientation::Outward { root: self.root },
        ))
    }
}

impl<S: NeighborSampler> SpanningTreeBuilder for WilsonBuilder<S> {
    fn build(mut self) -> Result<SpanningTree> {
        let start_time = Instant::now();
        debug!(
            vertices = self.vertex_count(),
            root = self.root,
            "growing loop-erased random walk tree"
        );

        let mut reported = 0;
        for probe in 0..self.vertex_count() as VertexId {
            if self.in_tree(probe) {
                continue;
            }
            self.walk_from(probe)?;

            if self.tree_size - reported >= PROGRESS_BATCH {
                reported = self.tree_size;
                if let Some(ref progress) = self.progress {
                    progress.set_position(reported as u64);
                }
            }
        }

        if self.tree_size != self.vertex_count() {
            return Err(invariant_violation(
                "wilson construction",
                &format!(
                    "tree holds {} of {} vertices",
                    self.tree_size,
                    self.vertex_count()
                ),
            ));
        }
        if let Some(ref progress) = self.progress {
            progress.finish();
        }

        info!(
            vertices = self.vertex_count(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "wilson spanning tree complete"
        );
        self.into_tree()
    }
}

/// Build a loop-erased random walk spanning tree rooted at `start`
///
/// # Errors
///
/// Returns an error if `start` or a sampled step lies outside `lattice`
pub fn build_tree_wilson<S: NeighborSampler>(
    lattice: &Lattice,
    start: VertexId,
    sampler: S,
) -> Result<SpanningTree> {
    WilsonBuilder::new(lattice, start, sampler)?.build()
}
