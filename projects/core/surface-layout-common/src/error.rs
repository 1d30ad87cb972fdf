//! Errors reported by the collaborator traits.

use crate::flags::Tiling;
use crate::format::SurfaceFormat;
use crate::texture::ResourceType;
use crate::tile::TileMode;
use thiserror::Error;

/// Errors reported by a [`TextureCalc`](crate::texture_calc::TextureCalc).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextureCalcError {
    /// The format has no usable bit depth.
    #[error("Format {0:?} cannot be laid out")]
    InvalidFormat(SurfaceFormat),

    /// The platform has no geometry for the tile mode.
    #[error("Tile mode {0:?} is not supported on this platform")]
    UnsupportedTileMode(TileMode),

    /// The requested tiling has no tile shape for the element size.
    #[error("{tiling:?} tiling has no tile shape for {bits_per_pixel} bits per element")]
    NoTileShape {
        /// Requested tiling.
        tiling: Tiling,
        /// Element size.
        bits_per_pixel: u32,
    },

    /// The resource type cannot be laid out by this calculator.
    #[error("Resource type {0:?} cannot be laid out")]
    UnsupportedResourceType(ResourceType),

    /// A mip level beyond the surface's max mip level was requested.
    #[error("Mip level {mip} exceeds the max mip level {max_lod}")]
    MipOutOfRange {
        /// Requested level.
        mip: u32,
        /// Max level of the surface.
        max_lod: u32,
    },

    /// A slice beyond the surface's slice count was requested.
    #[error("Slice {index} is out of range, the surface has {slices} slices")]
    SliceOutOfRange {
        /// Requested slice.
        index: u32,
        /// Slice count of the surface.
        slices: u32,
    },

    /// Standard layout offsets only exist for Yf/Ys tiling.
    #[error("Standard layout is not defined for tile mode {0:?}")]
    StdLayoutUnsupported(TileMode),

    /// The computed surface is larger than the platform allows.
    #[error("Surface size {size} exceeds the platform maximum of {max} bytes")]
    SurfaceTooLarge {
        /// Computed size.
        size: u64,
        /// Platform limit.
        max: u64,
    },

    /// Layout arithmetic overflowed.
    #[error("Arithmetic overflow while sizing the surface")]
    Overflow,
}

/// Errors reported by a [`SwizzleBlt`](crate::swizzle::SwizzleBlt) primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SwizzleError {
    /// The swizzled surface's pitch does not hold a whole number of tiles.
    #[error("Pitch {pitch} is not a multiple of the tile width {tile_width}")]
    PitchNotTileAligned {
        /// Surface pitch.
        pitch: u32,
        /// Tile width in bytes.
        tile_width: u32,
    },

    /// The copy reached past the end of a buffer.
    #[error("Copy needs {needed} bytes but the buffer only holds {actual}")]
    OutOfBounds {
        /// Bytes required.
        needed: usize,
        /// Buffer length.
        actual: usize,
    },

    /// Element pitch or size is zero.
    #[error("Element pitch and size must be non-zero")]
    ZeroElement,
}
