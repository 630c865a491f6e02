//! Error types and context management for tree and bijection operations

use std::fmt;
use std::path::{Path, PathBuf};

/// Main error type for all lattice, tree and image operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// Failed to decode an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Image decoded but does not describe a usable bijection
    ///
    /// Covers wrong dimensions, bit depth, colour type, interlacing,
    /// and images in which some colour is missing or repeated.
    InvalidImage {
        /// Path to the offending image
        path: PathBuf,
        /// Description of what is wrong with the image
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Vertex id outside `[0, vertex_count)`
    VertexOutOfRange {
        /// The offending vertex id
        vertex: u64,
        /// Number of vertices in the domain
        vertex_count: usize,
    },

    /// A domain-sized buffer could not be allocated
    Allocation {
        /// Which buffer was being allocated
        buffer: &'static str,
        /// Requested element count
        len: usize,
    },

    /// An internal consistency check failed
    ///
    /// Indicates a defect or malformed input rather than a recoverable
    /// runtime condition: more than `N - 1` accepted edges, a disconnected
    /// tree, frontiers draining at different rates.
    InvariantViolation {
        /// Name of the operation that detected the violation
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },

    /// Failed to save generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::InvalidImage { path, reason } => {
                write!(f, "Invalid image '{}': {reason}", path.display())
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::VertexOutOfRange {
                vertex,
                vertex_count,
            } => {
                write!(
                    f,
                    "Vertex {vertex} is out of bounds (vertex count: {vertex_count})"
                )
            }
            Self::Allocation { buffer, len } => {
                write!(f, "Failed to allocate {buffer} with {len} entries")
            }
            Self::InvariantViolation { operation, reason } => {
                write!(f, "Invariant violated in {operation}: {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for algorithm results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

const UNKNOWN_PATH: &str = "<unknown>";

/// Attaches the path being processed to path-carrying errors
pub trait WithPath<T> {
    /// Replace an unknown path in the error with `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithPath<T> for std::result::Result<T, E>
where
    E: Into<AlgorithmError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error: AlgorithmError = e.into();
            // Only errors converted via `From` carry a placeholder path
            match &mut error {
                AlgorithmError::ImageLoad { path: slot, .. }
                | AlgorithmError::ImageExport { path: slot, .. }
                | AlgorithmError::InvalidImage { path: slot, .. }
                | AlgorithmError::FileSystem { path: slot, .. } => {
                    if slot.as_os_str() == UNKNOWN_PATH {
                        *slot = path.to_path_buf();
                    }
                }
                _ => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invariant violation error
pub fn invariant_violation(operation: &'static str, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvariantViolation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create an invalid image error
pub fn invalid_image(path: &Path, reason: &impl ToString) -> AlgorithmError {
    AlgorithmError::InvalidImage {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}
