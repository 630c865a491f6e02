//! Lattice constants and runtime configuration defaults

// Reference use case: every 24-bit colour on a 4096x4096 canvas
/// Side length of the reference pixel grid
pub const REFERENCE_GRID_SIDE: usize = 4096;
/// Side length of the reference colour cube
pub const REFERENCE_CUBE_SIDE: usize = 256;

// Safety limit to prevent excessive memory allocation
/// Maximum number of vertices in a single lattice
pub const MAX_VERTEX_COUNT: usize = 1 << 28;

/// Largest cube side whose coordinates fit in an 8-bit channel
pub const MAX_CHANNEL_SIDE: usize = 256;

/// Number of vertices processed between progress bar updates
pub const PROGRESS_BATCH: usize = 1 << 16;

/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

// Output settings
/// Default output file for Kruskal-built bijections
pub const KRUSKAL_OUTPUT: &str = "kruskal.png";
/// Default output file for Wilson-built bijections
pub const WILSON_OUTPUT: &str = "wilson.png";
/// Default output file for the z-order bijection
pub const ZORDER_OUTPUT: &str = "z-order.png";
/// Default output file for composed bijections
pub const COMPOSE_OUTPUT: &str = "rgbcomp.png";
