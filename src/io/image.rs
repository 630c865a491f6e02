//! PNG export and import of grid-to-cube bijections
//!
//! Pixel `(x, y)` of a bijection image holds the colour paired with grid
//! vertex `pack(x, y)`. Cube coordinates are stretched onto the full 8-bit
//! channel range, so a 256-sided cube is stored unscaled.

use crate::arena;
use crate::bijection::Bijection;
use crate::io::configuration::MAX_CHANNEL_SIDE;
use crate::io::error::{AlgorithmError, Result, WithPath, invalid_image, invalid_parameter};
use crate::lattice::{Lattice, VertexId};
use image::{ImageBuffer, ImageFormat, ImageReader, Rgb, RgbImage};
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

/// Mapping between cube coordinates and 8-bit channel values
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorScale {
    max_coordinate: u32,
}

impl ColorScale {
    /// Scale for a cube with `side` values per axis
    ///
    /// # Errors
    ///
    /// Returns an error if the side is zero or more than 256
    pub fn new(side: u32) -> Result<Self> {
        if side == 0 || side as usize > MAX_CHANNEL_SIDE {
            return Err(invalid_parameter(
                "cube_side",
                &side,
                &format!("rendered cubes need between 1 and {MAX_CHANNEL_SIDE} values per axis"),
            ));
        }
        Ok(Self {
            max_coordinate: side - 1,
        })
    }

    /// Scale for a 3-D lattice with equal extents
    ///
    /// # Errors
    ///
    /// Returns an error if the lattice is not a cube or its side is too large
    pub fn for_cube(cube: &Lattice) -> Result<Self> {
        let extents = cube.extents();
        match extents {
            [side, rest @ ..] if extents.len() == 3 && rest.iter().all(|other| other == side) => {
                Self::new(*side)
            }
            _ => Err(invalid_parameter(
                "cube",
                &format!("{extents:?}"),
                &"colours need a 3-D lattice with equal sides",
            )),
        }
    }

    /// Channel value for a cube coordinate
    pub const fn to_channel(self, coordinate: u32) -> u8 {
        if self.max_coordinate == 0 {
            return 0;
        }
        (coordinate * 255 / self.max_coordinate) as u8
    }

    /// Cube coordinate for a channel value, if the value is on the scale
    pub const fn from_channel(self, channel: u8) -> Option<u32> {
        let coordinate = channel as u32 * self.max_coordinate / 255;
        if self.to_channel(coordinate) == channel {
            Some(coordinate)
        } else {
            None
        }
    }
}

fn grid_extents(grid: &Lattice) -> Result<(u32, u32)> {
    match *grid.extents() {
        [width, height] => Ok((width, height)),
        _ => Err(invalid_parameter(
            "grid",
            &format!("{:?}", grid.extents()),
            &"images need a 2-D pixel grid",
        )),
    }
}

/// Render a bijection as an RGB image
///
/// # Errors
///
/// Returns an error if the lattices do not match the bijection or the cube
/// cannot be represented with 8-bit channels
pub fn render_bijection(bijection: &Bijection, grid: &Lattice, cube: &Lattice) -> Result<RgbImage> {
    let (width, height) = grid_extents(grid)?;
    let scale = ColorScale::for_cube(cube)?;
    if bijection.len() != grid.vertex_count() || bijection.len() != cube.vertex_count() {
        return Err(invalid_parameter(
            "bijection",
            &bijection.len(),
            &"bijection size differs from the lattices",
        ));
    }

    let mut img: RgbImage = ImageBuffer::new(width, height);
    for (pixel, &colour) in (0..).zip(bijection.as_slice()) {
        let (Some([x, y, _]), Some([r, g, b])) = (grid.unpack(pixel), cube.unpack(colour)) else {
            return Err(AlgorithmError::VertexOutOfRange {
                vertex: u64::from(colour),
                vertex_count: cube.vertex_count(),
            });
        };
        if let Some(slot) = img.get_pixel_mut_checked(x, y) {
            *slot = Rgb([
                scale.to_channel(r),
                scale.to_channel(g),
                scale.to_channel(b),
            ]);
        }
    }
    Ok(img)
}

/// Export a bijection as an RGB8 PNG
///
/// # Errors
///
/// Returns an error if:
/// - The bijection cannot be rendered for these lattices
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_bijection_png(
    bijection: &Bijection,
    grid: &Lattice,
    cube: &Lattice,
    output_path: &Path,
) -> Result<()> {
    let img = render_bijection(bijection, grid, cube)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save_with_format(output_path, ImageFormat::Png)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

/// Fields of a PNG image header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PngHeader {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Bits per sample
    pub bit_depth: png::BitDepth,
    /// Sample layout
    pub color_type: png::ColorType,
    /// Whether rows are stored in Adam7 order
    pub interlaced: bool,
}

impl From<&png::Info<'_>> for PngHeader {
    fn from(info: &png::Info<'_>) -> Self {
        Self {
            width: info.width,
            height: info.height,
            bit_depth: info.bit_depth,
            color_type: info.color_type,
            interlaced: info.interlaced,
        }
    }
}

fn open_image(path: &Path) -> Result<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "open image",
            source: e,
        })
}

/// Read the header of a PNG file without decoding its pixels
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a PNG image
pub fn read_png_header(path: &Path) -> Result<PngHeader> {
    let decoder = png::Decoder::new(open_image(path)?);
    match decoder.read_info() {
        Ok(reader) => Ok(PngHeader::from(reader.info())),
        Err(png::DecodingError::IoError(e)) if e.kind() == ErrorKind::UnexpectedEof => {
            Err(invalid_image(path, &"file too short to be a PNG image"))
        }
        Err(png::DecodingError::IoError(e)) => Err(AlgorithmError::FileSystem {
            path: path.to_path_buf(),
            operation: "read image header",
            source: e,
        }),
        Err(e) => Err(invalid_image(path, &format!("not a readable PNG file: {e}"))),
    }
}

/// Load a pixel-to-colour bijection from a PNG image
///
/// The image must match the grid exactly, use 8-bit RGB samples without
/// interlacing, and contain every colour of the cube exactly once.
///
/// # Errors
///
/// Returns an error naming the path and the first problem found
pub fn read_bijection_png(path: &Path, grid: &Lattice, cube: &Lattice) -> Result<Bijection> {
    let (width, height) = grid_extents(grid)?;
    let scale = ColorScale::for_cube(cube)?;

    let header = read_png_header(path)?;
    if (header.width, header.height) != (width, height) {
        return Err(invalid_image(
            path,
            &format!(
                "image is {}x{} pixels, expected {width}x{height}",
                header.width, header.height
            ),
        ));
    }
    if header.bit_depth != png::BitDepth::Eight {
        return Err(invalid_image(
            path,
            &format!("bit depth is {}, expected 8", header.bit_depth as u8),
        ));
    }
    if header.color_type != png::ColorType::Rgb {
        return Err(invalid_image(
            path,
            &format!("colour type is {:?}, expected RGB", header.color_type),
        ));
    }
    if header.interlaced {
        return Err(invalid_image(path, &"interlaced images are not supported"));
    }

    // The header check has settled the format, whatever the extension says
    let img = ImageReader::with_format(open_image(path)?, ImageFormat::Png)
        .decode()
        .with_path(path)?
        .into_rgb8();
    let mut map: Vec<VertexId> = arena::filled("image map", grid.vertex_count(), 0)?;
    for (x, y, pixel) in img.enumerate_pixels() {
        let Rgb(channels) = *pixel;
        let coordinates = channels.map(|channel| scale.from_channel(channel));
        let colour = match coordinates {
            [Some(r), Some(g), Some(b)] => cube.pack(&[r, g, b]),
            _ => None,
        }
        .ok_or_else(|| {
            invalid_image(
                path,
                &format!("pixel ({x}, {y}) has colour {channels:?}, which is not on the cube"),
            )
        })?;
        if let Some(slot) = grid.pack(&[x, y]).and_then(|vertex| map.get_mut(vertex as usize)) {
            *slot = colour;
        }
    }

    Bijection::try_from_vec(map).map_err(|e| invalid_image(path, &e))
}
