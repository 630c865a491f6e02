//! All-RGB images from paired random spanning trees
//!
//! A random spanning tree is grown over the pixel grid and another over the
//! colour cube. Walking both breadth-first from their centres and pairing
//! the k-th vertex of one with the k-th vertex of the other gives a
//! bijection in which neighbouring pixels tend to receive neighbouring
//! colours.

#![forbid(unsafe_code)]

/// Fallible allocation of domain-sized buffers
pub mod arena;
/// Bijections between the pixel grid and the colour cube
pub mod bijection;
/// Input/output operations and error handling
pub mod io;
/// Grid and cube graphs
pub mod lattice;
/// Random spanning tree construction
pub mod tree;

pub use io::error::{AlgorithmError, Result};
