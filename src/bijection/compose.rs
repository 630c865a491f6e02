//! Chaining bijection images through alternating domains
//!
//! An image stored as a pixel-to-colour map can be read either way round.
//! Composing a colour-domain map with an image reads the image forwards
//! (pixel to colour, then through the map); composing a pixel-domain map
//! reads it backwards. Starting from the colour identity, an odd number of
//! images leaves a pixel-to-colour map ready to render.

use crate::arena;
use crate::bijection::map::Bijection;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::lattice::VertexId;

/// The space a map reads its vertex ids from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Domain {
    /// Packed pixel coordinates
    Pixel,
    /// Packed colour coordinates
    Color,
}

impl Domain {
    const fn opposite(self) -> Self {
        match self {
            Self::Pixel => Self::Color,
            Self::Color => Self::Pixel,
        }
    }
}

/// A bijection tagged with the domain it maps from
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainMap {
    domain: Domain,
    map: Bijection,
}

impl DomainMap {
    /// Identity map on the colour domain
    ///
    /// # Errors
    ///
    /// Returns an error if the map cannot be allocated
    pub fn identity(len: usize) -> Result<Self> {
        Ok(Self {
            domain: Domain::Color,
            map: Bijection::identity(len)?,
        })
    }

    /// Domain the map reads from
    pub const fn domain(&self) -> Domain {
        self.domain
    }

    /// The underlying permutation
    pub const fn map(&self) -> &Bijection {
        &self.map
    }

    /// Compose with one pixel-to-colour image, flipping the domain
    ///
    /// # Errors
    ///
    /// Returns an error if the image and map sizes differ or the result
    /// cannot be allocated
    pub fn compose(&self, image: &Bijection) -> Result<Self> {
        let len = self.map.len();
        if image.len() != len {
            return Err(invalid_parameter(
                "image",
                &image.len(),
                &format!("composed images must all cover {len} pixels"),
            ));
        }

        let current = self.map.as_slice();
        let mut composed = arena::filled("composed map", len, 0)?;
        for (pixel, &colour) in image.as_slice().iter().enumerate() {
            let (slot, value) = match self.domain {
                // Colour read backwards to the pixel that wears it
                Domain::Pixel => (composed.get_mut(colour as usize), current.get(pixel)),
                Domain::Color => (composed.get_mut(pixel), current.get(colour as usize)),
            };
            match (slot, value) {
                (Some(slot), Some(&value)) => *slot = value,
                _ => {
                    return Err(AlgorithmError::VertexOutOfRange {
                        vertex: u64::from(colour.max(pixel as VertexId)),
                        vertex_count: len,
                    });
                }
            }
        }

        Ok(Self {
            domain: self.domain.opposite(),
            map: Bijection::from_permutation(composed),
        })
    }

    /// Release the map as a pixel-to-colour bijection
    ///
    /// # Errors
    ///
    /// Returns an error if the map still reads from the colour domain
    pub fn into_bijection(self) -> Result<Bijection> {
        match self.domain {
            Domain::Pixel => Ok(self.map),
            Domain::Color => Err(invalid_parameter(
                "images",
                &"even count",
                &"composition ends in colour space; supply an odd number of images",
            )),
        }
    }
}

/// Compose a chain of pixel-to-colour images into one pixel-to-colour map
///
/// # Errors
///
/// Returns an error if the chain is empty or of even length, or the images
/// differ in size
pub fn compose_chain(images: &[Bijection]) -> Result<Bijection> {
    let Some(first) = images.first() else {
        return Err(invalid_parameter(
            "images",
            &0,
            &"at least one image is required",
        ));
    };
    if images.len() % 2 == 0 {
        return Err(invalid_parameter(
            "images",
            &images.len(),
            &"an odd number of images is required",
        ));
    }

    let mut current = DomainMap::identity(first.len())?;
    for image in images {
        current = current.compose(image)?;
    }
    current.into_bijection()
}
