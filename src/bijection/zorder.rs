//! Z-order ("universal tartan") bijection
//!
//! Reads each index `n` as interleaved coordinate bits twice: once split
//! across the two grid axes, once across the three cube axes. No randomness
//! and no trees; the result is a fixed reference bijection.

use crate::arena;
use crate::bijection::map::Bijection;
use crate::io::error::{Result, invalid_parameter};
use crate::lattice::{Lattice, MAX_AXES, VertexId};

/// Distribute the low `bits` bits of `index` round-robin over `axes` parts
///
/// Bit `i` of `index` becomes bit `i / axes` of part `i % axes`.
pub fn split_bits(index: u32, axes: usize, bits: u32) -> [u32; MAX_AXES] {
    let mut parts = [0; MAX_AXES];
    if axes == 0 {
        return parts;
    }
    for bit in 0..bits {
        let axis = bit as usize % axes;
        if let Some(part) = parts.get_mut(axis) {
            *part |= ((index >> bit) & 1) << (bit / axes as u32);
        }
    }
    parts
}

fn power_of_two_exponent(lattice: &Lattice, name: &'static str) -> Result<u32> {
    let extents = lattice.extents();
    let first = extents.first().copied().unwrap_or_default();
    if !first.is_power_of_two() || extents.iter().any(|&extent| extent != first) {
        return Err(invalid_parameter(
            name,
            &format!("{extents:?}"),
            &"z-order needs equal power-of-two extents on every axis",
        ));
    }
    Ok(first.trailing_zeros())
}

/// Build the z-order bijection from grid vertices to cube vertices
///
/// # Errors
///
/// Returns an error unless the grid is a square of side `2^a`, the cube has
/// side `2^b`, and `2a == 3b`
pub fn zorder_bijection(grid: &Lattice, cube: &Lattice) -> Result<Bijection> {
    let grid_bits = power_of_two_exponent(grid, "grid")? * grid.dimensionality() as u32;
    let cube_bits = power_of_two_exponent(cube, "cube")? * cube.dimensionality() as u32;
    if grid_bits != cube_bits {
        return Err(invalid_parameter(
            "cube",
            &format!("{:?}", cube.extents()),
            &format!("cube holds 2^{cube_bits} colours but the grid has 2^{grid_bits} pixels"),
        ));
    }

    let grid_axes = grid.dimensionality();
    let cube_axes = cube.dimensionality();
    let mut map = arena::filled("z-order map", grid.vertex_count(), 0)?;
    for index in 0..grid.vertex_count() as VertexId {
        let pixel = split_bits(index, grid_axes, grid_bits);
        let colour = split_bits(index, cube_axes, cube_bits);
        let source = pixel.get(..grid_axes).and_then(|axes| grid.pack(axes));
        let target = colour.get(..cube_axes).and_then(|axes| cube.pack(axes));
        if let (Some(source), Some(target)) = (source, target) {
            if let Some(slot) = map.get_mut(source as usize) {
                *slot = target;
            }
        }
    }

    Ok(Bijection::from_permutation(map))
}
