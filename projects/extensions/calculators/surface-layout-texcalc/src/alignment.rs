//! Tile mode selection, unit alignment and element geometry.

use surface_layout_common::{
    BlockDimensions, PlatformInfo, ResourceType, SurfaceFormat, TextureCalcError, TextureInfo,
    TileMode, PAGE_SIZE, SIZE_64KB,
};

/// Tile and element geometry of a surface.
///
/// W tiles are described here in their natural 64x64 shape; the double pitch convention only
/// applies to the final pitch and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Geometry {
    pub block: BlockDimensions,
    pub bytes_per_element: u32,
    /// Tile width in bytes.
    pub tile_width: u32,
    /// Tile height in rows.
    pub tile_height: u32,
    /// Tile depth in slices.
    pub tile_depth: u32,
    pub tile_size: u64,
}

impl Geometry {
    pub(crate) fn new(platform: &PlatformInfo, tex: &TextureInfo) -> Self {
        let block = tex.format.info().block;
        let tile = tex.tile_info(platform);
        let (tile_width, tile_height, tile_depth) = match tex.tile_mode {
            TileMode::TileW => (64, 64, 1),
            _ => (
                tile.logical_tile_width.max(1),
                tile.logical_tile_height.max(1),
                tile.logical_tile_depth.max(1),
            ),
        };
        Self {
            block,
            bytes_per_element: tex.pixel_pitch().max(1),
            tile_width,
            tile_height,
            tile_depth,
            tile_size: tile_width as u64 * tile_height as u64 * tile_depth as u64,
        }
    }

    /// Tile width in pixels.
    pub(crate) fn tile_width_px(&self) -> u32 {
        (self.tile_width / self.bytes_per_element).max(1) * self.block.width
    }

    /// Tile height in pixel rows.
    pub(crate) fn tile_height_px(&self) -> u32 {
        self.tile_height * self.block.height
    }

    /// Converts a pixel column into a byte offset within a row.
    pub(crate) fn x_bytes(&self, x: u32) -> u64 {
        (x / self.block.width) as u64 * self.bytes_per_element as u64
    }

    /// Converts a pixel row into a row of elements.
    pub(crate) fn y_rows(&self, y: u32) -> u64 {
        (y / self.block.height) as u64
    }
}

/// Horizontal, vertical and depth alignment of mip levels, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UnitAlignment {
    pub h_align: u32,
    pub v_align: u32,
    pub d_align: u32,
}

/// Picks the tile mode for the tiling the flags ask for.
pub(crate) fn select_tile_mode(
    platform: &PlatformInfo,
    tex: &TextureInfo,
) -> Result<TileMode, TextureCalcError> {
    let tiling = tex.flags.tiling();
    let three_d = tex.resource_type == ResourceType::Texture3D;
    let mode = TileMode::select(tiling, three_d, tex.bits_per_pixel).ok_or(
        TextureCalcError::NoTileShape {
            tiling,
            bits_per_pixel: tex.bits_per_pixel,
        },
    )?;
    if !platform.tile_info(mode).is_valid() {
        return Err(TextureCalcError::UnsupportedTileMode(mode));
    }
    Ok(mode)
}

/// Mip alignment of `tex`, whose tile mode is already selected.
pub(crate) fn unit_alignment(tex: &TextureInfo, geometry: &Geometry) -> UnitAlignment {
    let flags = &tex.flags;
    let (h_align, v_align) = if tex.tile_mode.is_tiled_resource() {
        // Every mip outside the tail starts on a tile.
        (geometry.tile_width_px(), geometry.tile_height_px())
    } else if flags.is_hiz() {
        (16, 8)
    } else if flags.is_separate_stencil() {
        (8, 8)
    } else if flags.is_depth() {
        match tex.format {
            SurfaceFormat::D16Unorm => (8, 4),
            _ => (4, 4),
        }
    } else if geometry.block.is_compressed() {
        (geometry.block.width, geometry.block.height)
    } else {
        (4, 4)
    };

    let d_align = match tex.resource_type {
        ResourceType::Texture3D if tex.tile_mode.is_tiled_resource() => geometry.tile_depth,
        _ => 1,
    };
    UnitAlignment {
        h_align,
        v_align,
        d_align,
    }
}

/// Required alignment of the allocation base.
pub(crate) fn base_alignment(tile_mode: TileMode) -> u32 {
    if tile_mode.is_ys() {
        SIZE_64KB as u32
    } else {
        PAGE_SIZE as u32
    }
}

/// First mip level small enough to be packed into the tail tile, for Yf/Ys surfaces with mips.
pub(crate) fn mip_tail_start(tex: &TextureInfo, geometry: &Geometry) -> Option<u32> {
    if !tex.tile_mode.is_tiled_resource() || tex.max_lod == 0 {
        return None;
    }
    let half_width = (geometry.tile_width_px() / 2) as u64;
    let half_height = geometry.tile_height_px() / 2;
    let half_depth = (geometry.tile_depth / 2).max(1);
    (0..=tex.max_lod).find(|&lod| {
        tex.mip_width(lod) <= half_width
            && tex.mip_height(lod) <= half_height
            && tex.mip_depth(lod) <= half_depth
    })
}
