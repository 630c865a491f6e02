//! Lock-step breadth-first traversal of two spanning trees
//!
//! Each tree gets its own FIFO frontier seeded with its root. Every step
//! dequeues one vertex from each frontier and pairs them, so the k-th vertex
//! visited in one tree maps to the k-th vertex visited in the other. Both
//! trees span `N` vertices, so the frontiers drain together.

use bitvec::prelude::*;
use indicatif::ProgressBar;
use std::time::Instant;
use tracing::{debug, info};

use crate::arena;
use crate::bijection::map::Bijection;
use crate::io::configuration::PROGRESS_BATCH;
use crate::io::error::{AlgorithmError, Result, invalid_parameter, invariant_violation};
use crate::lattice::VertexId;
use crate::tree::{Orientation, SpanningTree};

/// Breadth-first frontier over one spanning tree
///
/// Undirected trees record each edge from both ends, so the frontier keeps a
/// visited set to avoid walking back to a parent. Outward trees record only
/// parent-to-child edges and need no visited set.
pub struct Frontier<'t> {
    tree: &'t SpanningTree,
    queue: Vec<VertexId>,
    head: usize,
    visited: Option<BitVec>,
}

impl<'t> Frontier<'t> {
    /// Seed a frontier with `root`
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is outside the tree, differs from an
    /// outward tree's recorded root, or the queue cannot be allocated
    pub fn new(tree: &'t SpanningTree, root: VertexId) -> Result<Self> {
        let vertex_count = tree.vertex_count();
        if root as usize >= vertex_count {
            return Err(AlgorithmError::VertexOutOfRange {
                vertex: u64::from(root),
                vertex_count,
            });
        }

        let visited = match tree.orientation() {
            Orientation::Undirected => Some(bitvec![0; vertex_count]),
            Orientation::Outward { root: recorded } if recorded == root => None,
            Orientation::Outward { root: recorded } => {
                return Err(invalid_parameter(
                    "root",
                    &root,
                    &format!("outward tree can only be traversed from {recorded}"),
                ));
            }
        };

        let mut queue = arena::with_capacity("frontier queue", vertex_count)?;
        queue.push(root);

        Ok(Self {
            tree,
            queue,
            head: 0,
            visited,
        })
    }

    /// Test whether every enqueued vertex has been dequeued
    pub fn is_empty(&self) -> bool {
        self.head >= self.queue.len()
    }

    /// Dequeue the next vertex and enqueue its unvisited tree neighbours
    ///
    /// # Errors
    ///
    /// Returns an error if the frontier would enqueue more than `N`
    /// vertices, which only happens when the tree contains a cycle
    pub fn advance(&mut self) -> Result<Option<VertexId>> {
        let Some(&vertex) = self.queue.get(self.head) else {
            return Ok(None);
        };
        self.head += 1;

        let tree = self.tree;
        for &next in tree.adjacency().neighbors(vertex) {
            let seen = self
                .visited
                .as_ref()
                .is_some_and(|visited| visited.get(next as usize).as_deref() == Some(&true));
            if seen {
                continue;
            }
            if self.queue.len() >= tree.vertex_count() {
                return Err(invariant_violation(
                    "breadth-first traversal",
                    &format!("vertex {next} enqueued after all vertices were queued"),
                ));
            }
            self.queue.push(next);
        }

        if let Some(visited) = self.visited.as_mut() {
            visited.set(vertex as usize, true);
        }
        Ok(Some(vertex))
    }
}

/// Pairs two spanning trees into a bijection
pub struct PairingEngine<'t> {
    source: Frontier<'t>,
    target: Frontier<'t>,
    vertex_count: usize,
    progress: Option<ProgressBar>,
}

impl<'t> PairingEngine<'t> {
    /// Prepare frontiers for both trees
    ///
    /// # Errors
    ///
    /// Returns an error if the trees span different vertex counts or either
    /// root is unusable
    pub fn new(
        source: &'t SpanningTree,
        source_root: VertexId,
        target: &'t SpanningTree,
        target_root: VertexId,
    ) -> Result<Self> {
        if source.vertex_count() != target.vertex_count() {
            return Err(invalid_parameter(
                "trees",
                &format!("{} vs {}", source.vertex_count(), target.vertex_count()),
                &"paired trees must span the same number of vertices",
            ));
        }

        Ok(Self {
            source: Frontier::new(source, source_root)?,
            target: Frontier::new(target, target_root)?,
            vertex_count: source.vertex_count(),
            progress: None,
        })
    }

    /// Report paired vertices to a progress bar
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        progress.set_length(self.vertex_count as u64);
        self.progress = Some(progress);
        self
    }

    /// Drain both frontiers in lock-step
    ///
    /// # Errors
    ///
    /// Returns an error if one frontier drains before the other, a vertex
    /// is visited twice, or the bijection cannot be allocated
    pub fn run(mut self) -> Result<Bijection> {
        let start_time = Instant::now();
        debug!(vertices = self.vertex_count, "pairing spanning trees");

        let mut map = arena::filled("bijection", self.vertex_count, 0)?;
        let mut sources_used = bitvec![0; self.vertex_count];
        let mut targets_used = bitvec![0; self.vertex_count];
        let mut paired = 0;

        loop {
            let (source, target) = match (self.source.advance()?, self.target.advance()?) {
                (Some(source), Some(target)) => (source, target),
                (None, None) => break,
                (source, _) => {
                    let drained = if source.is_none() { "first" } else { "second" };
                    return Err(invariant_violation(
                        "tree pairing",
                        &format!("{drained} tree drained after {paired} vertices"),
                    ));
                }
            };

            // A tree with a cycle can revisit a vertex without overflowing
            claim(&mut sources_used, source, "first")?;
            claim(&mut targets_used, target, "second")?;
            if let Some(slot) = map.get_mut(source as usize) {
                *slot = target;
            }

            paired += 1;
            if paired % PROGRESS_BATCH == 0 {
                if let Some(ref progress) = self.progress {
                    progress.set_position(paired as u64);
                }
            }
        }

        if paired != self.vertex_count {
            return Err(invariant_violation(
                "tree pairing",
                &format!("paired {paired} of {} vertices", self.vertex_count),
            ));
        }
        if let Some(ref progress) = self.progress {
            progress.finish();
        }

        info!(
            vertices = paired,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "tree pairing complete"
        );
        Ok(Bijection::from_permutation(map))
    }
}

fn claim(used: &mut BitVec, vertex: VertexId, tree: &str) -> Result<()> {
    if used.get(vertex as usize).as_deref() != Some(&false) {
        return Err(invariant_violation(
            "tree pairing",
            &format!("vertex {vertex} of the {tree} tree visited twice"),
        ));
    }
    used.set(vertex as usize, true);
    Ok(())
}

/// Pair the breadth-first orders of two spanning trees
///
/// The k-th vertex visited from `root_a` in `tree_a` maps to the k-th vertex
/// visited from `root_b` in `tree_b`.
///
/// # Errors
///
/// Returns an error if the trees differ in size, a root is unusable, or
/// either input is not a spanning tree
pub fn pair_trees(
    tree_a: &SpanningTree,
    root_a: VertexId,
    tree_b: &SpanningTree,
    root_b: VertexId,
) -> Result<Bijection> {
    PairingEngine::new(tree_a, root_a, tree_b, root_b)?.run()
}
