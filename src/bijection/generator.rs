//! End-to-end bijection generation
//!
//! Builds a random spanning tree of the pixel grid and one of the colour
//! cube, each rooted at its lattice centre, then pairs their breadth-first
//! orders. The two trees are independent, so they are built on two threads
//! with separately seeded generators.

use indicatif::ProgressBar;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use std::thread;
use std::time::Instant;
use tracing::{debug, info};

use crate::bijection::map::Bijection;
use crate::bijection::pairing::PairingEngine;
use crate::bijection::zorder::zorder_bijection;
use crate::io::configuration::{
    KRUSKAL_OUTPUT, REFERENCE_CUBE_SIDE, REFERENCE_GRID_SIDE, WILSON_OUTPUT, ZORDER_OUTPUT,
};
use crate::io::error::{AlgorithmError, Result, invalid_parameter, invariant_violation};
use crate::io::progress::ProgressManager;
use crate::lattice::{Lattice, LatticeSampler};
use crate::tree::{
    KruskalBuilder, SpanningTree, SpanningTreeBuilder, WilsonBuilder, verify_spanning_tree,
};

/// Construction used to produce the bijection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Method {
    /// Randomized Kruskal trees on both lattices
    #[default]
    Kruskal,
    /// Wilson loop-erased random walk trees on both lattices
    Wilson,
    /// Deterministic bit-interleaving map, no trees
    Zorder,
}

impl Method {
    /// Output file name used when none is given
    pub const fn default_output(self) -> &'static str {
        match self {
            Self::Kruskal => KRUSKAL_OUTPUT,
            Self::Wilson => WILSON_OUTPUT,
            Self::Zorder => ZORDER_OUTPUT,
        }
    }
}

/// Parameters for one generation run
#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    /// Pixel grid
    pub grid: Lattice,
    /// Colour cube
    pub cube: Lattice,
    /// Tree construction
    pub method: Method,
    /// Seed for reproducible runs; operating system entropy when absent
    pub seed: Option<u64>,
    /// Check both trees and the resulting permutation before returning
    pub verify: bool,
}

impl GeneratorConfig {
    /// Configure a run over a `width` x `height` grid and a cube of side `cube_side`
    ///
    /// # Errors
    ///
    /// Returns an error if either lattice is invalid or the two lattices
    /// have different vertex counts
    pub fn new(width: usize, height: usize, cube_side: usize, method: Method) -> Result<Self> {
        let grid = Lattice::grid(width, height)?;
        let cube = Lattice::cube(cube_side)?;
        if grid.vertex_count() != cube.vertex_count() {
            return Err(invalid_parameter(
                "cube_side",
                &cube_side,
                &format!(
                    "cube has {} vertices but the {width}x{height} grid has {}",
                    cube.vertex_count(),
                    grid.vertex_count()
                ),
            ));
        }

        Ok(Self {
            grid,
            cube,
            method,
            seed: None,
            verify: false,
        })
    }

    /// Fix the random seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable tree and permutation checks
    #[must_use]
    pub const fn with_verification(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// The 4096x4096 grid against the 256-sided cube
    ///
    /// # Errors
    ///
    /// Returns an error if the reference buffers exceed the vertex limit
    pub fn reference(method: Method) -> Result<Self> {
        Self::new(
            REFERENCE_GRID_SIDE,
            REFERENCE_GRID_SIDE,
            REFERENCE_CUBE_SIDE,
            method,
        )
    }
}

fn build_tree(
    method: Method,
    lattice: &Lattice,
    mut rng: StdRng,
    progress: Option<ProgressBar>,
) -> Result<SpanningTree> {
    match method {
        Method::Kruskal => {
            let builder = KruskalBuilder::new(lattice, &mut rng)?;
            match progress {
                Some(bar) => builder.with_progress(bar).build(),
                None => builder.build(),
            }
        }
        Method::Wilson => {
            let sampler = LatticeSampler::new(*lattice, rng);
            let builder = WilsonBuilder::new(lattice, lattice.center(), sampler)?;
            match progress {
                Some(bar) => builder.with_progress(bar).build(),
                None => builder.build(),
            }
        }
        Method::Zorder => Err(invalid_parameter(
            "method",
            &"zorder",
            &"z-order builds no spanning tree",
        )),
    }
}

/// Generate a grid-to-cube bijection
///
/// # Errors
///
/// Returns an error if a buffer cannot be allocated, a tree thread fails,
/// or verification finds a defect
pub fn generate(config: &GeneratorConfig, progress: Option<&ProgressManager>) -> Result<Bijection> {
    let start_time = Instant::now();
    let grid = &config.grid;
    let cube = &config.cube;

    if config.method == Method::Zorder {
        let bijection = zorder_bijection(grid, cube)?;
        info!(
            vertices = bijection.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "z-order bijection complete"
        );
        return Ok(bijection);
    }

    let mut master = config
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let grid_rng = StdRng::seed_from_u64(master.next_u64());
    let cube_rng = StdRng::seed_from_u64(master.next_u64());

    let grid_root = grid.center();
    let cube_root = cube.center();
    debug!(
        method = ?config.method,
        vertices = grid.vertex_count(),
        grid_root,
        cube_root,
        "building spanning trees"
    );

    let grid_bar = progress.map(|manager| manager.phase("grid tree"));
    let cube_bar = progress.map(|manager| manager.phase("cube tree"));
    let (grid_tree, cube_tree) = thread::scope(|scope| {
        let grid_worker = scope.spawn(|| build_tree(config.method, grid, grid_rng, grid_bar));
        let cube_tree = build_tree(config.method, cube, cube_rng, cube_bar);
        let grid_tree = grid_worker.join().map_err(|_payload| {
            invariant_violation("tree construction", &"grid tree thread panicked")
        })?;
        Ok::<_, AlgorithmError>((grid_tree?, cube_tree?))
    })?;

    if config.verify {
        verify_spanning_tree(&grid_tree, grid_root)?;
        verify_spanning_tree(&cube_tree, cube_root)?;
        debug!("both spanning trees verified");
    }

    let engine = PairingEngine::new(&grid_tree, grid_root, &cube_tree, cube_root)?;
    let engine = match progress {
        Some(manager) => engine.with_progress(manager.phase("pairing")),
        None => engine,
    };
    let bijection = engine.run()?;

    if config.verify && !bijection.is_permutation() {
        return Err(invariant_violation(
            "bijection generation",
            &"paired map is not a permutation",
        ));
    }

    info!(
        method = ?config.method,
        vertices = bijection.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "bijection generation complete"
    );
    Ok(bijection)
}
