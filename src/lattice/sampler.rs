use rand::RngCore;

use crate::lattice::graph::{Lattice, VertexId};

/// Source of random walk steps for loop-erased random walks
///
/// Closures `FnMut(VertexId) -> VertexId` implement this, which lets tests
/// script a walk step by step.
pub trait NeighborSampler {
    /// Return a neighbour of `vertex`
    fn sample(&mut self, vertex: VertexId) -> VertexId;
}

impl<F> NeighborSampler for F
where
    F: FnMut(VertexId) -> VertexId,
{
    fn sample(&mut self, vertex: VertexId) -> VertexId {
        self(vertex)
    }
}

/// Uniform lattice neighbour sampler
///
/// Draws a fixed-width direction (2 bits for grids, 3 bits for cubes) and
/// redraws until the direction stays inside the lattice. Boundary vertices
/// reject more draws, but every in-bounds neighbour remains equally likely.
pub struct LatticeSampler<R> {
    lattice: Lattice,
    rng: R,
    direction_mask: u32,
    // Every vertex of a box lattice with more than one vertex has a neighbour
    movable: bool,
}

impl<R: RngCore> LatticeSampler<R> {
    /// Create a sampler over `lattice` drawing bits from `rng`
    pub fn new(lattice: Lattice, rng: R) -> Self {
        let direction_mask = (lattice.max_degree() as u32).next_power_of_two() - 1;
        Self {
            lattice,
            rng,
            direction_mask,
            movable: lattice.vertex_count() > 1,
        }
    }

    /// Recover the random source
    pub fn into_rng(self) -> R {
        self.rng
    }
}

impl<R: RngCore> NeighborSampler for LatticeSampler<R> {
    fn sample(&mut self, vertex: VertexId) -> VertexId {
        // Isolated or foreign vertices have no direction to accept
        if !self.movable || !self.lattice.contains(vertex) {
            return vertex;
        }
        loop {
            let direction = self.rng.next_u32() & self.direction_mask;
            if let Some(next) = self.lattice.neighbor(vertex, direction as usize) {
                return next;
            }
        }
    }
}
