//! Command-line interface for generating and composing all-RGB images

use crate::bijection::{Bijection, GeneratorConfig, Method, compose_chain, generate};
use crate::io::configuration::{COMPOSE_OUTPUT, REFERENCE_CUBE_SIDE, REFERENCE_GRID_SIDE};
use crate::io::error::{Result, invalid_parameter};
use crate::io::image::{export_bijection_png, read_bijection_png};
use crate::io::progress::ProgressManager;
use crate::lattice::Lattice;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

#[derive(Parser)]
#[command(name = "rgbtree")]
#[command(
    author,
    version,
    about = "Generate images using every colour exactly once by pairing random spanning trees"
)]
/// Command-line arguments for the all-RGB image tool
pub struct Cli {
    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log phase timings to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Default log filter when `RUST_LOG` is unset
    pub const fn default_log_level(&self) -> &'static str {
        if self.verbose { "info" } else { "warn" }
    }
}

/// Subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Build a bijection from two spanning trees and save it as a PNG
    Generate(GenerateArgs),
    /// Compose an odd number of bijection images into one
    Compose(ComposeArgs),
}

/// Lattice sizes shared by both subcommands
#[derive(Args, Clone, Copy, Debug)]
pub struct LatticeArgs {
    /// Image width in pixels
    #[arg(short = 'W', long, default_value_t = REFERENCE_GRID_SIDE)]
    pub width: usize,

    /// Image height in pixels
    #[arg(short = 'H', long, default_value_t = REFERENCE_GRID_SIDE)]
    pub height: usize,

    /// Values per colour channel; the cube must have as many vertices as the image has pixels
    #[arg(short, long, default_value_t = REFERENCE_CUBE_SIDE)]
    pub cube_side: usize,
}

/// Arguments for `generate`
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Spanning tree construction
    #[arg(short, long, value_enum, default_value_t = Method::Kruskal)]
    pub method: Method,

    /// Random seed for reproducible generation
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Output PNG path (defaults to a name derived from the method)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Check both trees and the bijection before writing
    #[arg(long)]
    pub verify: bool,

    /// Lattice sizes
    #[command(flatten)]
    pub lattice: LatticeArgs,
}

impl GenerateArgs {
    /// Output path, falling back to the method's default file name
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(self.method.default_output()))
    }
}

/// Arguments for `compose`
#[derive(Args, Debug)]
pub struct ComposeArgs {
    /// Output PNG path
    #[arg(short, long, default_value = COMPOSE_OUTPUT)]
    pub output: PathBuf,

    /// Lattice sizes
    #[command(flatten)]
    pub lattice: LatticeArgs,

    /// Bijection images to compose, applied left to right
    #[arg(value_name = "IMAGES", required = true)]
    pub images: Vec<PathBuf>,
}

/// Dispatches a parsed command line
pub struct Runner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl Runner {
    /// Create a runner for the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run the selected subcommand
    ///
    /// # Errors
    ///
    /// Returns an error if lattice validation, generation, composition or
    /// image I/O fails
    pub fn run(&self) -> Result<()> {
        let result = match &self.cli.command {
            Command::Generate(args) => self.generate(args),
            Command::Compose(args) => self.compose(args),
        };

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        result
    }

    fn generate(&self, args: &GenerateArgs) -> Result<()> {
        let sizes = args.lattice;
        let mut config =
            GeneratorConfig::new(sizes.width, sizes.height, sizes.cube_side, args.method)?
                .with_verification(args.verify);
        if let Some(seed) = args.seed {
            config = config.with_seed(seed);
        }

        let bijection = generate(&config, self.progress_manager.as_ref())?;

        let output_path = args.output_path();
        export_bijection_png(&bijection, &config.grid, &config.cube, &output_path)?;
        info!(path = %output_path.display(), "bijection image written");
        Ok(())
    }

    fn compose(&self, args: &ComposeArgs) -> Result<()> {
        let start_time = Instant::now();
        let sizes = args.lattice;
        let grid = Lattice::grid(sizes.width, sizes.height)?;
        let cube = Lattice::cube(sizes.cube_side)?;
        if grid.vertex_count() != cube.vertex_count() {
            return Err(invalid_parameter(
                "cube_side",
                &sizes.cube_side,
                &"cube and grid must have the same number of vertices",
            ));
        }

        let bar = self.progress_manager.as_ref().map(|pm| {
            let bar = pm.phase("composition");
            bar.set_length(args.images.len() as u64);
            bar
        });

        let mut images: Vec<Bijection> = Vec::with_capacity(args.images.len());
        for path in &args.images {
            images.push(read_bijection_png(path, &grid, &cube)?);
            if let Some(ref bar) = bar {
                bar.inc(1);
            }
        }
        let composed = compose_chain(&images)?;
        if let Some(bar) = bar {
            bar.finish();
        }

        export_bijection_png(&composed, &grid, &cube, &args.output)?;
        info!(
            images = images.len(),
            path = %args.output.display(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "composed image written"
        );
        Ok(())
    }
}
