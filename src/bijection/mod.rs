//! Grid-to-cube bijections
//!
//! A [`Bijection`] assigns every pixel a distinct colour. It is produced by
//! pairing the breadth-first orders of two spanning trees, by the
//! deterministic z-order interleaving, or by composing existing images.

/// Composition of image bijections through alternating domains
pub mod compose;
/// Tree construction and pairing pipeline
pub mod generator;
/// Permutation type
pub mod map;
/// Lock-step breadth-first pairing of two trees
pub mod pairing;
/// Bit-interleaving reference bijection
pub mod zorder;

pub use compose::{Domain, DomainMap, compose_chain};
pub use generator::{GeneratorConfig, Method, generate};
pub use map::Bijection;
pub use pairing::{Frontier, PairingEngine, pair_trees};
pub use zorder::{split_bits, zorder_bijection};
