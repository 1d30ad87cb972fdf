//! Swizzle patterns and the interface of the swizzle-application primitive.
//!
//! A [`SwizzlePattern`] says, for every bit of the byte offset inside one tile, whether that bit
//! comes from the X (byte), Y (row) or Z (slice or sample) coordinate. Bits are taken from each
//! coordinate in increasing order.
//!
//! Pattern selection is table driven: legacy tilings map to a fixed pattern and Yf/Ys tilings are
//! looked up by dimensionality, sample count, tile footprint and element size in
//! [`SwizzlePattern::standard`].

use crate::error::SwizzleError;
use crate::tile::{bpe_index, TileMode};
use alloc::boxed::Box;
use core::fmt;

/// Identifies a swizzle pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternId {
    /// Legacy X tile.
    IntelTileX,
    /// Legacy Y tile.
    IntelTileY,
    /// Stencil W tile.
    IntelTileW,
    /// Standard swizzle.
    Standard {
        /// Volume pattern.
        three_d: bool,
        /// Sample count, 1 for single-sampled.
        samples: u32,
        /// 64KB (Ys) instead of 4KB (Yf) tile.
        tile_64kb: bool,
        /// Bits per element.
        bits_per_pixel: u32,
    },
}

impl fmt::Display for PatternId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PatternId::IntelTileX => f.write_str("INTEL_TILE_X"),
            PatternId::IntelTileY => f.write_str("INTEL_TILE_Y"),
            PatternId::IntelTileW => f.write_str("INTEL_TILE_W"),
            PatternId::Standard {
                three_d,
                samples,
                tile_64kb,
                bits_per_pixel,
            } => {
                write!(f, "ST_{}_", if three_d { "3D" } else { "2D" })?;
                if samples > 1 {
                    write!(f, "MSAA{samples}_")?;
                }
                write!(
                    f,
                    "{}_{bits_per_pixel}bpp",
                    if tile_64kb { "64KB" } else { "4KB" }
                )
            }
        }
    }
}

/// Bit assignment of a tile's byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SwizzlePattern {
    /// Which pattern this is.
    pub id: PatternId,
    /// Offset bits fed by the X (byte) coordinate.
    pub mask_x: u32,
    /// Offset bits fed by the Y (row) coordinate.
    pub mask_y: u32,
    /// Offset bits fed by the Z (slice or sample) coordinate.
    pub mask_z: u32,
}

/// Scatters the low bits of `value` into the set bits of `mask`, lowest first.
const fn deposit(mut value: u32, mut mask: u32) -> u32 {
    let mut out = 0;
    while mask != 0 {
        let bit = mask & mask.wrapping_neg();
        if value & 1 != 0 {
            out |= bit;
        }
        value >>= 1;
        mask &= mask - 1;
    }
    out
}

/// Builds a standard swizzle: element bytes first, then Z/Y/X interleaved starting with Z,
/// then sample bits on top.
const fn standard(
    id: PatternId,
    bpe_log2: u32,
    x_bits: u32,
    y_bits: u32,
    z_bits: u32,
    sample_bits: u32,
) -> SwizzlePattern {
    let (mut mask_x, mut mask_y, mut mask_z) = (0u32, 0u32, 0u32);
    let mut bit = 0;
    while bit < bpe_log2 {
        mask_x |= 1 << bit;
        bit += 1;
    }
    let (mut rx, mut ry, mut rz) = (x_bits - bpe_log2, y_bits, z_bits);
    let mut turn = 0;
    while rx + ry + rz > 0 {
        match turn % 3 {
            0 if rz > 0 => {
                mask_z |= 1 << bit;
                rz -= 1;
                bit += 1;
            }
            1 if ry > 0 => {
                mask_y |= 1 << bit;
                ry -= 1;
                bit += 1;
            }
            2 if rx > 0 => {
                mask_x |= 1 << bit;
                rx -= 1;
                bit += 1;
            }
            _ => {}
        }
        turn += 1;
    }
    let mut s = 0;
    while s < sample_bits {
        mask_z |= 1 << bit;
        bit += 1;
        s += 1;
    }
    SwizzlePattern {
        id,
        mask_x,
        mask_y,
        mask_z,
    }
}

/// Log2 of the tile width (bytes), height and depth per 8/16/32/64/128 bpe.
const YF_2D_BITS: [(u32, u32, u32); 5] = [(6, 6, 0), (7, 5, 0), (7, 5, 0), (8, 4, 0), (8, 4, 0)];
const YS_2D_BITS: [(u32, u32, u32); 5] = [(8, 8, 0), (9, 7, 0), (9, 7, 0), (10, 6, 0), (10, 6, 0)];
const YF_3D_BITS: [(u32, u32, u32); 5] = [(4, 4, 4), (4, 4, 4), (5, 4, 3), (6, 3, 3), (6, 3, 3)];
const YS_3D_BITS: [(u32, u32, u32); 5] = [(6, 5, 5), (6, 5, 5), (7, 5, 4), (8, 4, 4), (8, 4, 4)];

/// Pixel bits (x, y) given up to make room for the sample index, for 2/4/8/16 samples.
const MSAA_SHRINK: [(u32, u32); 4] = [(0, 1), (1, 1), (1, 2), (2, 2)];

const fn std_table(
    three_d: bool,
    samples: u32,
    tile_64kb: bool,
    bits: &[(u32, u32, u32); 5],
) -> [SwizzlePattern; 5] {
    let sample_bits = samples.trailing_zeros();
    let (shrink_x, shrink_y) = if sample_bits == 0 {
        (0, 0)
    } else {
        MSAA_SHRINK[sample_bits as usize - 1]
    };
    let mut out = [SwizzlePattern::INTEL_TILE_X; 5];
    let mut i = 0;
    while i < 5 {
        let (x, y, z) = bits[i];
        let id = PatternId::Standard {
            three_d,
            samples,
            tile_64kb,
            bits_per_pixel: 8 << i,
        };
        out[i] = standard(id, i as u32, x - shrink_x, y - shrink_y, z, sample_bits);
        i += 1;
    }
    out
}

static ST_2D_4KB: [SwizzlePattern; 5] = std_table(false, 1, false, &YF_2D_BITS);
static ST_2D_64KB: [SwizzlePattern; 5] = std_table(false, 1, true, &YS_2D_BITS);
static ST_3D_4KB: [SwizzlePattern; 5] = std_table(true, 1, false, &YF_3D_BITS);
static ST_3D_64KB: [SwizzlePattern; 5] = std_table(true, 1, true, &YS_3D_BITS);
static ST_2D_MSAA_4KB: [[SwizzlePattern; 5]; 4] = [
    std_table(false, 2, false, &YF_2D_BITS),
    std_table(false, 4, false, &YF_2D_BITS),
    std_table(false, 8, false, &YF_2D_BITS),
    std_table(false, 16, false, &YF_2D_BITS),
];
static ST_2D_MSAA_64KB: [[SwizzlePattern; 5]; 4] = [
    std_table(false, 2, true, &YS_2D_BITS),
    std_table(false, 4, true, &YS_2D_BITS),
    std_table(false, 8, true, &YS_2D_BITS),
    std_table(false, 16, true, &YS_2D_BITS),
];

impl SwizzlePattern {
    /// Legacy X tile: 512B x 8 rows.
    pub const INTEL_TILE_X: Self = Self {
        id: PatternId::IntelTileX,
        mask_x: 0x1FF,
        mask_y: 0xE00,
        mask_z: 0,
    };

    /// Legacy Y tile: 16B columns of 32 rows, 8 columns per tile.
    pub const INTEL_TILE_Y: Self = Self {
        id: PatternId::IntelTileY,
        mask_x: 0xE0F,
        mask_y: 0x1F0,
        mask_z: 0,
    };

    /// Stencil W tile: 64B x 64 rows with interleaved low bits.
    pub const INTEL_TILE_W: Self = Self {
        id: PatternId::IntelTileW,
        mask_x: 0x1D5,
        mask_y: 0xE2A,
        mask_z: 0,
    };

    /// Looks up a standard swizzle pattern.
    ///
    /// Sample counts of 0 and 1 share the single-sampled entries. 3D patterns only exist
    /// single-sampled.
    pub fn standard(
        three_d: bool,
        samples: u32,
        tile_64kb: bool,
        bits_per_pixel: u32,
    ) -> Option<&'static SwizzlePattern> {
        let bpe = bpe_index(bits_per_pixel)?;
        let table = match (three_d, samples.max(1), tile_64kb) {
            (false, 1, false) => &ST_2D_4KB,
            (false, 1, true) => &ST_2D_64KB,
            (true, 1, false) => &ST_3D_4KB,
            (true, 1, true) => &ST_3D_64KB,
            (false, n @ (2 | 4 | 8 | 16), false) => {
                &ST_2D_MSAA_4KB[n.trailing_zeros() as usize - 1]
            }
            (false, n @ (2 | 4 | 8 | 16), true) => {
                &ST_2D_MSAA_64KB[n.trailing_zeros() as usize - 1]
            }
            _ => return None,
        };
        Some(&table[bpe])
    }

    /// Pattern for a surface of the given tile mode; `None` for linear surfaces.
    pub fn for_tile_mode(
        mode: TileMode,
        three_d: bool,
        samples: u32,
        bits_per_pixel: u32,
    ) -> Option<&'static SwizzlePattern> {
        match mode {
            TileMode::Linear => None,
            TileMode::TileX => Some(&Self::INTEL_TILE_X),
            TileMode::TileY => Some(&Self::INTEL_TILE_Y),
            TileMode::TileW => Some(&Self::INTEL_TILE_W),
            _ => Self::standard(three_d, samples, mode.is_ys(), bits_per_pixel),
        }
    }

    /// Tile width in bytes.
    pub const fn tile_width(&self) -> u32 {
        1 << self.mask_x.count_ones()
    }

    /// Tile height in rows.
    pub const fn tile_height(&self) -> u32 {
        1 << self.mask_y.count_ones()
    }

    /// Tile depth in slices or samples.
    pub const fn tile_depth(&self) -> u32 {
        1 << self.mask_z.count_ones()
    }

    /// Tile footprint in bytes.
    pub const fn tile_size(&self) -> u32 {
        1 << (self.mask_x | self.mask_y | self.mask_z).count_ones()
    }

    /// Byte offset inside a tile of the coordinate `(x, y, z)`, each already reduced modulo the
    /// tile dimensions.
    pub const fn tile_offset(&self, x: u32, y: u32, z: u32) -> u32 {
        deposit(x, self.mask_x) | deposit(y, self.mask_y) | deposit(z, self.mask_z)
    }
}

/// Geometry of one side of a swizzle copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceGeometry {
    /// Bytes per row.
    pub pitch: u32,
    /// Rows per slice.
    pub height: u32,
    /// Starting X offset in bytes.
    pub offset_x: u32,
    /// Starting row.
    pub offset_y: u32,
    /// Starting slice.
    pub offset_z: u32,
    /// Bytes between consecutive elements.
    pub element_pitch: u32,
    /// Bytes copied per element.
    pub element_size: u32,
    /// Swizzle applied to this surface; `None` for linear memory.
    pub pattern: Option<&'static SwizzlePattern>,
}

/// Source side of a swizzle copy.
#[derive(Debug, Clone, Copy)]
pub struct SwizzleSurface<'a> {
    /// Surface memory, starting at the surface base.
    pub data: &'a [u8],
    /// Layout of `data`.
    pub geometry: SurfaceGeometry,
}

/// Destination side of a swizzle copy.
#[derive(Debug)]
pub struct SwizzleSurfaceMut<'a> {
    /// Surface memory, starting at the surface base.
    pub data: &'a mut [u8],
    /// Layout of `data`.
    pub geometry: SurfaceGeometry,
}

/// Copies a rectangle between two surfaces, applying or removing their swizzles.
pub trait SwizzleBlt {
    /// Copies `copy_height` rows of `copy_width_bytes` bytes from `src` into `dest`.
    ///
    /// When the two sides have different element pitches, `copy_width_bytes` is measured on the
    /// unswizzled side.
    fn blt(
        &self,
        dest: SwizzleSurfaceMut<'_>,
        src: SwizzleSurface<'_>,
        copy_width_bytes: u32,
        copy_height: u32,
    ) -> Result<(), SwizzleError>;
}

impl<T: SwizzleBlt + ?Sized> SwizzleBlt for Box<T> {
    fn blt(
        &self,
        dest: SwizzleSurfaceMut<'_>,
        src: SwizzleSurface<'_>,
        copy_width_bytes: u32,
        copy_height: u32,
    ) -> Result<(), SwizzleError> {
        (**self).blt(dest, src, copy_width_bytes, copy_height)
    }
}
