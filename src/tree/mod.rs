//! Random spanning trees over lattice graphs
//!
//! Two interchangeable constructions share the [`SpanningTreeBuilder`]
//! trait and the bounded-degree [`TreeAdjacency`] output:
//! - Randomized Kruskal over a shuffled edge list and a union-find forest
//! - Wilson's loop-erased random walks driven by a neighbour sampler

/// Fixed-capacity tree neighbour storage
pub mod adjacency;
/// Builder trait, tree type and consistency check
pub mod builder;
/// Union-find forest
pub mod disjoint_set;
/// Randomized Kruskal construction
pub mod kruskal;
/// Loop-erased random walk construction
pub mod wilson;

pub use adjacency::TreeAdjacency;
pub use builder::{Orientation, SpanningTree, SpanningTreeBuilder, verify_spanning_tree};
pub use disjoint_set::DisjointSet;
pub use kruskal::{KruskalBuilder, build_tree_kruskal};
pub use wilson::{WilsonBuilder, build_tree_wilson};
