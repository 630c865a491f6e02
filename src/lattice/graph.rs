//! Box lattices with mixed-radix coordinate packing
//!
//! Packing puts the first axis in the most significant position, so for
//! power-of-two extents a 4096x4096 grid packs `(x, y)` as `x << 12 | y`
//! and a 256-sided cube packs `(r, g, b)` as `r << 16 | g << 8 | b`.

use crate::arena;
use crate::io::configuration::MAX_VERTEX_COUNT;
use crate::io::error::{Result, invalid_parameter};

/// Packed vertex identifier in `[0, N)`
pub type VertexId = u32;

/// Maximum number of lattice axes
pub const MAX_AXES: usize = 3;

/// Undirected edge between two adjacent vertices
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge(pub VertexId, pub VertexId);

impl Edge {
    /// Same edge with the smaller endpoint first
    #[must_use]
    pub const fn normalized(self) -> Self {
        if self.0 <= self.1 {
            self
        } else {
            Self(self.1, self.0)
        }
    }
}

/// Regular 2-D grid or 3-D cube graph
///
/// Axes beyond the lattice's dimensionality have extent 1 and are never
/// visited by packing, neighbour lookup or edge enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lattice {
    extents: [u32; MAX_AXES],
    strides: [u32; MAX_AXES],
    axes: usize,
    vertex_count: usize,
}

impl Lattice {
    /// Create a lattice of the given dimensionality
    ///
    /// `sizes` holds one extent per axis, or a single extent shared by
    /// every axis.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `dimensionality` is neither 2 nor 3
    /// - `sizes` has the wrong number of entries
    /// - Any extent is zero
    /// - The vertex count exceeds [`MAX_VERTEX_COUNT`]
    pub fn new(dimensionality: usize, sizes: &[usize]) -> Result<Self> {
        if !(2..=MAX_AXES).contains(&dimensionality) {
            return Err(invalid_parameter(
                "dimensionality",
                &dimensionality,
                &"only 2-D grids and 3-D cubes are supported",
            ));
        }

        let shared = match sizes {
            [side] => Some(*side),
            _ if sizes.len() == dimensionality => None,
            _ => {
                return Err(invalid_parameter(
                    "sizes",
                    &format!("{sizes:?}"),
                    &format!("expected 1 or {dimensionality} extents"),
                ));
            }
        };

        let mut extents = [1; MAX_AXES];
        let mut vertex_count: usize = 1;
        for (axis, slot) in extents.iter_mut().take(dimensionality).enumerate() {
            let extent = shared
                .or_else(|| sizes.get(axis).copied())
                .unwrap_or_default();
            if extent == 0 {
                return Err(invalid_parameter(
                    "sizes",
                    &format!("{sizes:?}"),
                    &"every extent must be positive",
                ));
            }
            vertex_count = vertex_count
                .checked_mul(extent)
                .filter(|&count| count <= MAX_VERTEX_COUNT)
                .ok_or_else(|| {
                    invalid_parameter(
                        "sizes",
                        &format!("{sizes:?}"),
                        &format!("lattice exceeds {MAX_VERTEX_COUNT} vertices"),
                    )
                })?;
            *slot = extent as u32;
        }

        // Last axis varies fastest
        let mut strides = [1; MAX_AXES];
        let mut stride = 1;
        for (slot, &extent) in strides
            .iter_mut()
            .zip(&extents)
            .take(dimensionality)
            .rev()
        {
            *slot = stride;
            stride *= extent;
        }

        Ok(Self {
            extents,
            strides,
            axes: dimensionality,
            vertex_count,
        })
    }

    /// Create a `width` x `height` pixel grid
    ///
    /// # Errors
    ///
    /// Returns an error if either side is zero or the grid is too large
    pub fn grid(width: usize, height: usize) -> Result<Self> {
        Self::new(2, &[width, height])
    }

    /// Create a cube with `side` vertices along each axis
    ///
    /// # Errors
    ///
    /// Returns an error if the side is zero or the cube is too large
    pub fn cube(side: usize) -> Result<Self> {
        Self::new(3, &[side])
    }

    /// Number of axes (2 or 3)
    pub const fn dimensionality(&self) -> usize {
        self.axes
    }

    /// Extent of each axis, first axis first
    pub fn extents(&self) -> &[u32] {
        self.extents.get(..self.axes).unwrap_or(&[])
    }

    /// Total number of vertices
    pub const fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Largest possible vertex degree (4 for grids, 6 for cubes)
    pub const fn max_degree(&self) -> usize {
        2 * self.axes
    }

    /// Test whether a vertex id lies in `[0, N)`
    pub const fn contains(&self, vertex: VertexId) -> bool {
        (vertex as usize) < self.vertex_count
    }

    /// Pack coordinates into a vertex id
    ///
    /// Returns `None` if the coordinate count differs from the
    /// dimensionality or any coordinate is out of range.
    pub fn pack(&self, coordinates: &[u32]) -> Option<VertexId> {
        if coordinates.len() != self.axes {
            return None;
        }
        coordinates
            .iter()
            .zip(&self.extents)
            .zip(&self.strides)
            .try_fold(0, |packed, ((&coordinate, &extent), &stride)| {
                (coordinate < extent).then(|| packed + coordinate * stride)
            })
    }

    /// Unpack a vertex id into coordinates
    ///
    /// Axes beyond the dimensionality are reported as zero.
    pub fn unpack(&self, vertex: VertexId) -> Option<[u32; MAX_AXES]> {
        if !self.contains(vertex) {
            return None;
        }
        let mut coordinates = [0; MAX_AXES];
        for ((slot, &extent), &stride) in coordinates
            .iter_mut()
            .zip(&self.extents)
            .zip(&self.strides)
            .take(self.axes)
        {
            *slot = (vertex / stride) % extent;
        }
        Some(coordinates)
    }

    /// Vertex with every coordinate at `(extent - 1) / 2`
    ///
    /// `(2047, 2047)` for the reference grid, `(127, 127, 127)` for the
    /// reference cube.
    pub fn center(&self) -> VertexId {
        self.extents
            .iter()
            .zip(&self.strides)
            .take(self.axes)
            .map(|(&extent, &stride)| (extent - 1) / 2 * stride)
            .sum()
    }

    /// Neighbour one step along a direction, if inside the lattice
    ///
    /// Directions are numbered `2 * axis` for the negative step and
    /// `2 * axis + 1` for the positive step along `axis`.
    pub fn neighbor(&self, vertex: VertexId, direction: usize) -> Option<VertexId> {
        let axis = direction / 2;
        if axis >= self.axes || !self.contains(vertex) {
            return None;
        }
        let extent = *self.extents.get(axis)?;
        let stride = *self.strides.get(axis)?;
        let coordinate = (vertex / stride) % extent;

        if direction % 2 == 0 {
            (coordinate > 0).then(|| vertex - stride)
        } else {
            (coordinate + 1 < extent).then(|| vertex + stride)
        }
    }

    /// All neighbours of a vertex in direction order
    pub fn neighbors(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.max_degree()).filter_map(move |direction| self.neighbor(vertex, direction))
    }

    /// Number of edges in the lattice
    ///
    /// `2 * (W - 1) * H` for a square grid, `3 * (S - 1) * S^2` for a cube.
    pub fn edge_count(&self) -> usize {
        self.extents()
            .iter()
            .map(|&extent| (extent as usize - 1) * (self.vertex_count / extent as usize))
            .sum()
    }

    /// Enumerate every edge exactly once
    ///
    /// Each edge is emitted from its lower endpoint, in increasing vertex
    /// order and then axis order.
    ///
    /// # Errors
    ///
    /// Returns an error if the edge buffer cannot be allocated
    pub fn edges(&self) -> Result<Vec<Edge>> {
        let mut edges = arena::with_capacity("lattice edge list", self.edge_count())?;
        for vertex in 0..self.vertex_count as VertexId {
            for axis in 0..self.axes {
                if let Some(next) = self.neighbor(vertex, 2 * axis + 1) {
                    edges.push(Edge(vertex, next));
                }
            }
        }
        Ok(edges)
    }
}

/// Enumerate the edge list of a 2-D or 3-D lattice
///
/// # Errors
///
/// Returns an error if the lattice parameters are invalid or the edge
/// buffer cannot be allocated
pub fn build_lattice_edges(dimensionality: usize, sizes: &[usize]) -> Result<Vec<Edge>> {
    Lattice::new(dimensionality, sizes)?.edges()
}
