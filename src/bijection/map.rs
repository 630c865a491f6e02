use bitvec::prelude::*;

use crate::arena;
use crate::io::error::{AlgorithmError, Result, invariant_violation};
use crate::lattice::VertexId;

/// Permutation of `[0, N)` mapping one domain's vertex ids to another's
///
/// Invariant: every value in `[0, N)` appears exactly once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bijection {
    map: Vec<VertexId>,
}

impl Bijection {
    /// The identity map on `[0, len)`
    ///
    /// # Errors
    ///
    /// Returns an error if the map cannot be allocated
    pub fn identity(len: usize) -> Result<Self> {
        let mut map = arena::with_capacity("identity map", len)?;
        map.extend(0..len as VertexId);
        Ok(Self { map })
    }

    /// Validate and wrap a permutation
    ///
    /// # Errors
    ///
    /// Returns an error if some value is out of range or repeated
    pub fn try_from_vec(map: Vec<VertexId>) -> Result<Self> {
        match first_defect(&map) {
            None => Ok(Self { map }),
            Some(reason) => Err(invariant_violation("bijection validation", &reason)),
        }
    }

    /// Wrap a map the caller has built as a permutation
    pub(crate) const fn from_permutation(map: Vec<VertexId>) -> Self {
        Self { map }
    }

    /// Domain size
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Test if the domain is empty
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Image of `vertex`
    pub fn get(&self, vertex: VertexId) -> Option<VertexId> {
        self.map.get(vertex as usize).copied()
    }

    /// The map as a flat array indexed by source vertex
    pub fn as_slice(&self) -> &[VertexId] {
        &self.map
    }

    /// Release the flat array
    pub fn into_vec(self) -> Vec<VertexId> {
        self.map
    }

    /// Test that the map is injective with image exactly `[0, N)`
    pub fn is_permutation(&self) -> bool {
        first_defect(&self.map).is_none()
    }

    /// The inverse permutation
    ///
    /// # Errors
    ///
    /// Returns an error if the inverse cannot be allocated
    pub fn inverse(&self) -> Result<Self> {
        let mut inverse = arena::filled("inverse map", self.len(), 0)?;
        for (source, &target) in (0..).zip(&self.map) {
            let slot = inverse
                .get_mut(target as usize)
                .ok_or(AlgorithmError::VertexOutOfRange {
                    vertex: u64::from(target),
                    vertex_count: self.len(),
                })?;
            *slot = source;
        }
        Ok(Self { map: inverse })
    }
}

fn first_defect(map: &[VertexId]) -> Option<String> {
    let mut seen = bitvec![0; map.len()];
    for (source, &target) in map.iter().enumerate() {
        let state = seen.get(target as usize).map(|bit| *bit);
        match state {
            None => {
                return Some(format!(
                    "{source} maps to {target}, outside [0, {})",
                    map.len()
                ));
            }
            Some(true) => return Some(format!("{target} is the image of more than one vertex")),
            Some(false) => seen.set(target as usize, true),
        }
    }
    None
}
