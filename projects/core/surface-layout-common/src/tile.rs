//! Tile modes and logical tile geometry.
//!
//! A [`TileMode`] names one concrete hardware tiling. Yf (4KB) and Ys (64KB) tiles change shape
//! with the element size and dimensionality, so each shape gets its own mode, the same way the
//! hardware documentation enumerates them. Geometry lives in a [`TileTable`] owned by the
//! platform, so a platform without tiled resources simply has invalid entries for them.

use crate::flags::Tiling;
use derive_enum_all_values::AllValues;

/// A concrete tiling of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AllValues)]
#[repr(u8)]
pub enum TileMode {
    /// Untiled.
    #[default]
    Linear,
    /// Legacy X tiling (512B x 8 rows).
    TileX,
    /// Legacy Y tiling (128B x 32 rows).
    TileY,
    /// Stencil W tiling, described with the double-pitch convention.
    TileW,
    /// 4KB tile, 2D, 8 bits per element.
    Yf2d8Bpe,
    /// 4KB tile, 2D, 16 bits per element.
    Yf2d16Bpe,
    /// 4KB tile, 2D, 32 bits per element.
    Yf2d32Bpe,
    /// 4KB tile, 2D, 64 bits per element.
    Yf2d64Bpe,
    /// 4KB tile, 2D, 128 bits per element.
    Yf2d128Bpe,
    /// 64KB tile, 2D, 8 bits per element.
    Ys2d8Bpe,
    /// 64KB tile, 2D, 16 bits per element.
    Ys2d16Bpe,
    /// 64KB tile, 2D, 32 bits per element.
    Ys2d32Bpe,
    /// 64KB tile, 2D, 64 bits per element.
    Ys2d64Bpe,
    /// 64KB tile, 2D, 128 bits per element.
    Ys2d128Bpe,
    /// 4KB tile, 3D, 8 bits per element.
    Yf3d8Bpe,
    /// 4KB tile, 3D, 16 bits per element.
    Yf3d16Bpe,
    /// 4KB tile, 3D, 32 bits per element.
    Yf3d32Bpe,
    /// 4KB tile, 3D, 64 bits per element.
    Yf3d64Bpe,
    /// 4KB tile, 3D, 128 bits per element.
    Yf3d128Bpe,
    /// 64KB tile, 3D, 8 bits per element.
    Ys3d8Bpe,
    /// 64KB tile, 3D, 16 bits per element.
    Ys3d16Bpe,
    /// 64KB tile, 3D, 32 bits per element.
    Ys3d32Bpe,
    /// 64KB tile, 3D, 64 bits per element.
    Ys3d64Bpe,
    /// 64KB tile, 3D, 128 bits per element.
    Ys3d128Bpe,
}

/// Number of [`TileMode`] variants.
pub const TILE_MODE_COUNT: usize = TileMode::all_values().len();

const YF_2D: [TileMode; 5] = [
    TileMode::Yf2d8Bpe,
    TileMode::Yf2d16Bpe,
    TileMode::Yf2d32Bpe,
    TileMode::Yf2d64Bpe,
    TileMode::Yf2d128Bpe,
];
const YS_2D: [TileMode; 5] = [
    TileMode::Ys2d8Bpe,
    TileMode::Ys2d16Bpe,
    TileMode::Ys2d32Bpe,
    TileMode::Ys2d64Bpe,
    TileMode::Ys2d128Bpe,
];
const YF_3D: [TileMode; 5] = [
    TileMode::Yf3d8Bpe,
    TileMode::Yf3d16Bpe,
    TileMode::Yf3d32Bpe,
    TileMode::Yf3d64Bpe,
    TileMode::Yf3d128Bpe,
];
const YS_3D: [TileMode; 5] = [
    TileMode::Ys3d8Bpe,
    TileMode::Ys3d16Bpe,
    TileMode::Ys3d32Bpe,
    TileMode::Ys3d64Bpe,
    TileMode::Ys3d128Bpe,
];

/// Index into the per-element-size tables for 8/16/32/64/128 bits per element.
pub const fn bpe_index(bits_per_pixel: u32) -> Option<usize> {
    match bits_per_pixel {
        8 => Some(0),
        16 => Some(1),
        32 => Some(2),
        64 => Some(3),
        128 => Some(4),
        _ => None,
    }
}

impl TileMode {
    /// Selects the tile mode for the tiling kind chosen by the creation flags.
    ///
    /// Returns `None` when Yf/Ys tiling is requested for an element size they do not support.
    pub const fn select(tiling: Tiling, three_d: bool, bits_per_pixel: u32) -> Option<Self> {
        let table = match tiling {
            Tiling::Linear => return Some(Self::Linear),
            Tiling::X => return Some(Self::TileX),
            Tiling::Y => return Some(Self::TileY),
            Tiling::W => return Some(Self::TileW),
            Tiling::Yf if three_d => &YF_3D,
            Tiling::Yf => &YF_2D,
            Tiling::Ys if three_d => &YS_3D,
            Tiling::Ys => &YS_2D,
        };
        match bpe_index(bits_per_pixel) {
            Some(index) => Some(table[index]),
            None => None,
        }
    }

    /// Position of this mode in a [`TileTable`].
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns true for untiled surfaces.
    pub const fn is_linear(self) -> bool {
        matches!(self, Self::Linear)
    }

    /// Returns true for 4KB tiled-resource tiles.
    pub const fn is_yf(self) -> bool {
        matches!(
            self,
            Self::Yf2d8Bpe
                | Self::Yf2d16Bpe
                | Self::Yf2d32Bpe
                | Self::Yf2d64Bpe
                | Self::Yf2d128Bpe
                | Self::Yf3d8Bpe
                | Self::Yf3d16Bpe
                | Self::Yf3d32Bpe
                | Self::Yf3d64Bpe
                | Self::Yf3d128Bpe
        )
    }

    /// Returns true for 64KB tiled-resource tiles.
    pub const fn is_ys(self) -> bool {
        matches!(
            self,
            Self::Ys2d8Bpe
                | Self::Ys2d16Bpe
                | Self::Ys2d32Bpe
                | Self::Ys2d64Bpe
                | Self::Ys2d128Bpe
                | Self::Ys3d8Bpe
                | Self::Ys3d16Bpe
                | Self::Ys3d32Bpe
                | Self::Ys3d64Bpe
                | Self::Ys3d128Bpe
        )
    }

    /// Returns true for Yf or Ys, the tilings with a standard (OS defined) layout.
    pub const fn is_tiled_resource(self) -> bool {
        self.is_yf() || self.is_ys()
    }
}

/// Logical geometry of one tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileInfo {
    /// Tile width in bytes.
    pub logical_tile_width: u32,
    /// Tile height in rows.
    pub logical_tile_height: u32,
    /// Tile depth in slices.
    pub logical_tile_depth: u32,
    /// Footprint of one tile in bytes.
    pub logical_size: u32,
}

impl TileInfo {
    /// An entry for a tile mode the platform does not support.
    pub const INVALID: Self = Self {
        logical_tile_width: 0,
        logical_tile_height: 0,
        logical_tile_depth: 0,
        logical_size: 0,
    };

    /// Creates a tile entry; the footprint is derived from the dimensions.
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            logical_tile_width: width,
            logical_tile_height: height,
            logical_tile_depth: depth,
            logical_size: width * height * depth,
        }
    }

    /// Returns true if the platform supports the tile mode this entry describes.
    pub const fn is_valid(&self) -> bool {
        self.logical_size != 0
    }
}

/// Per-platform tile geometry, indexed by [`TileMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileTable {
    entries: [TileInfo; TILE_MODE_COUNT],
}

impl TileTable {
    /// Legacy tilings only (Linear/X/Y/W).
    pub const fn legacy() -> Self {
        let mut entries = [TileInfo::INVALID; TILE_MODE_COUNT];
        entries[TileMode::Linear.index()] = TileInfo::new(1, 1, 1);
        entries[TileMode::TileX.index()] = TileInfo::new(512, 8, 1);
        entries[TileMode::TileY.index()] = TileInfo::new(128, 32, 1);
        entries[TileMode::TileW.index()] = TileInfo::new(128, 32, 1);
        Self { entries }
    }

    /// Legacy tilings plus the Yf/Ys tiled-resource shapes.
    pub const fn with_tiled_resources() -> Self {
        let mut table = Self::legacy();
        // Width in bytes, height in rows, depth in slices, per 8/16/32/64/128 bpe.
        const YF_2D_DIMS: [(u32, u32, u32); 5] =
            [(64, 64, 1), (128, 32, 1), (128, 32, 1), (256, 16, 1), (256, 16, 1)];
        const YS_2D_DIMS: [(u32, u32, u32); 5] =
            [(256, 256, 1), (512, 128, 1), (512, 128, 1), (1024, 64, 1), (1024, 64, 1)];
        const YF_3D_DIMS: [(u32, u32, u32); 5] =
            [(16, 16, 16), (16, 16, 16), (32, 16, 8), (64, 8, 8), (64, 8, 8)];
        const YS_3D_DIMS: [(u32, u32, u32); 5] =
            [(64, 32, 32), (64, 32, 32), (128, 32, 16), (256, 16, 16), (256, 16, 16)];

        let mut i = 0;
        while i < 5 {
            let (w, h, d) = YF_2D_DIMS[i];
            table.entries[YF_2D[i].index()] = TileInfo::new(w, h, d);
            let (w, h, d) = YS_2D_DIMS[i];
            table.entries[YS_2D[i].index()] = TileInfo::new(w, h, d);
            let (w, h, d) = YF_3D_DIMS[i];
            table.entries[YF_3D[i].index()] = TileInfo::new(w, h, d);
            let (w, h, d) = YS_3D_DIMS[i];
            table.entries[YS_3D[i].index()] = TileInfo::new(w, h, d);
            i += 1;
        }
        table
    }

    /// Geometry of `mode`.
    pub const fn get(&self, mode: TileMode) -> &TileInfo {
        &self.entries[mode.index()]
    }
}
