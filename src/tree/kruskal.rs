//! Randomized Kruskal construction
//!
//! Shuffles the lattice's edge list uniformly, then accepts each edge whose
//! endpoints are still in different components. On a connected lattice this
//! accepts exactly `N - 1` edges.

use indicatif::ProgressBar;
use rand::RngCore;
use std::time::Instant;
use tracing::{debug, info};

use crate::io::configuration::PROGRESS_BATCH;
use crate::io::error::{AlgorithmError, Result, invariant_violation};
use crate::lattice::{Edge, Lattice};
use crate::tree::adjacency::TreeAdjacency;
use crate::tree::builder::{Orientation, SpanningTree, SpanningTreeBuilder};
use crate::tree::disjoint_set::DisjointSet;

/// Uniform Fisher-Yates shuffle driven by raw random bits
///
/// For each `i` from the last index down to 1, draws `j` uniformly from
/// `[0, i]` by masking a 64-bit draw to the smallest all-ones mask covering
/// `i` and rejecting values above `i`, then swaps elements `i` and `j`.
pub fn shuffle<T, R: RngCore + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let bound = i as u64;
        let mask = u64::MAX >> bound.leading_zeros();
        let j = loop {
            let candidate = rng.next_u64() & mask;
            if candidate <= bound {
                break candidate as usize;
            }
        };
        items.swap(i, j);
    }
}

/// Spanning-tree builder over an explicit edge list
pub struct KruskalBuilder<'r, R: ?Sized> {
    edges: Vec<Edge>,
    vertex_count: usize,
    max_degree: usize,
    rng: &'r mut R,
    progress: Option<ProgressBar>,
}

impl<'r, R: RngCore + ?Sized> KruskalBuilder<'r, R> {
    /// Prepare to build over every edge of `lattice`
    ///
    /// # Errors
    ///
    /// Returns an error if the edge list cannot be allocated
    pub fn new(lattice: &Lattice, rng: &'r mut R) -> Result<Self> {
        Ok(Self::from_edges(lattice, lattice.edges()?, rng))
    }

    /// Prepare to build over a caller-supplied edge list
    pub fn from_edges(lattice: &Lattice, edges: Vec<Edge>, rng: &'r mut R) -> Self {
        Self {
            edges,
            vertex_count: lattice.vertex_count(),
            max_degree: lattice.max_degree(),
            rng,
            progress: None,
        }
    }

    /// Report accepted edges to a progress bar
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        progress.set_length(self.vertex_count.saturating_sub(1) as u64);
        self.progress = Some(progress);
        self
    }
}

impl<R: RngCore + ?Sized> SpanningTreeBuilder for KruskalBuilder<'_, R> {
    fn build(mut self) -> Result<SpanningTree> {
        let start_time = Instant::now();
        let target = self.vertex_count.saturating_sub(1);
        debug!(
            vertices = self.vertex_count,
            edges = self.edges.len(),
            "shuffling lattice edges"
        );

        shuffle(&mut self.edges, self.rng);

        let mut components = DisjointSet::new(self.vertex_count)?;
        let mut adjacency = TreeAdjacency::new(self.vertex_count, self.max_degree)?;
        let mut accepted = 0;

        for &Edge(a, b) in &self.edges {
            if !components.union(a, b)? {
                continue;
            }
            adjacency.link(a, b)?;
            accepted += 1;

            if accepted % PROGRESS_BATCH == 0 {
                if let Some(ref progress) = self.progress {
                    progress.set_position(accepted as u64);
                }
            }
            // Every later edge would close a cycle
            if accepted == target {
                break;
            }
        }

        if accepted != target {
            return Err(invariant_violation(
                "kruskal construction",
                &format!("accepted {accepted} edges, a spanning tree needs {target}"),
            ));
        }
        if let Some(progress) = self.progress {
            progress.finish();
        }

        info!(
            vertices = self.vertex_count,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "kruskal spanning tree complete"
        );
        Ok(SpanningTree::new(adjacency, Orientation::Undirected))
    }
}

/// Build a uniformly shuffled Kruskal spanning tree over `edges`
///
/// # Errors
///
/// Returns an error if an edge endpoint lies outside `lattice` or the edges
/// do not connect every vertex
pub fn build_tree_kruskal<R: RngCore + ?Sized>(
    lattice: &Lattice,
    edges: Vec<Edge>,
    rng: &mut R,
) -> Result<SpanningTree> {
    if let Some(&Edge(a, b)) = edges
        .iter()
        .find(|Edge(a, b)| !lattice.contains(*a) || !lattice.contains(*b))
    {
        return Err(AlgorithmError::VertexOutOfRange {
            vertex: u64::from(if lattice.contains(a) { b } else { a }),
            vertex_count: lattice.vertex_count(),
        });
    }
    KruskalBuilder::from_edges(lattice, edges, rng).build()
}
