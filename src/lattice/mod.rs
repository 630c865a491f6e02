//! Regular grid graphs over bounded integer coordinate spaces
//!
//! A [`Lattice`] is either the 2-D pixel grid or the 3-D colour cube.
//! Vertices are packed coordinates in `[0, N)`; edges join axis-aligned
//! unit-distance neighbours.

/// Coordinate packing, neighbour lookup and edge enumeration
pub mod graph;
/// Uniform random neighbour sampling by direction rejection
pub mod sampler;

pub use graph::{Edge, Lattice, MAX_AXES, VertexId};
pub use sampler::{LatticeSampler, NeighborSampler};
