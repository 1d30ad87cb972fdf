//! Byte addressing of linear and swizzled surfaces.

use surface_layout_common::{SurfaceGeometry, SwizzleError, SwizzlePattern};

/// Byte address of position `(x, y, z)` of a surface, with `x` in bytes.
///
/// Swizzled surfaces store whole tiles row-major at the surface pitch; volume tiles stack
/// `tile_depth` slices into one slab of tiles.
#[inline(always)]
pub(crate) fn address(geometry: &SurfaceGeometry, x: u32, y: u32, z: u32) -> u64 {
    match geometry.pattern {
        None => {
            let slice = geometry.height as u64 * geometry.pitch as u64;
            z as u64 * slice + y as u64 * geometry.pitch as u64 + x as u64
        }
        Some(pattern) => swizzled_address(pattern, geometry, x, y, z),
    }
}

#[inline(always)]
fn swizzled_address(
    pattern: &SwizzlePattern,
    geometry: &SurfaceGeometry,
    x: u32,
    y: u32,
    z: u32,
) -> u64 {
    let tile_width = pattern.tile_width();
    let tile_height = pattern.tile_height();
    let tile_depth = pattern.tile_depth();
    let tile_size = pattern.tile_size() as u64;
    let tiles_per_row = (geometry.pitch / tile_width) as u64;
    let tile_rows = geometry.height.div_ceil(tile_height) as u64;

    let slab = (z / tile_depth) as u64 * tile_rows * tiles_per_row;
    let tile = slab + (y / tile_height) as u64 * tiles_per_row + (x / tile_width) as u64;
    let within = pattern.tile_offset(x % tile_width, y % tile_height, z % tile_depth);
    tile * tile_size + within as u64
}

/// Bytes of `x` contiguous in memory starting at byte column `x`.
#[inline(always)]
pub(crate) fn contiguous_run(geometry: &SurfaceGeometry, x: u32) -> u32 {
    match geometry.pattern {
        None => u32::MAX,
        Some(pattern) => {
            let run = 1u32 << pattern.mask_x.trailing_ones();
            run - x % run
        }
    }
}

/// Extent of a copy on one side of a blt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CopyExtent {
    /// Elements per row.
    pub elements: u32,
    /// Rows.
    pub rows: u32,
}

/// Checks the geometry of one side and returns the number of bytes the copy touches, saturating
/// at `u64::MAX` when the extent does not fit the address space.
pub(crate) fn required_len(
    geometry: &SurfaceGeometry,
    extent: CopyExtent,
) -> Result<u64, SwizzleError> {
    if geometry.element_pitch == 0 || geometry.element_size == 0 {
        return Err(SwizzleError::ZeroElement);
    }
    if let Some(pattern) = geometry.pattern {
        let tile_width = pattern.tile_width();
        if geometry.pitch == 0 || geometry.pitch % tile_width != 0 {
            return Err(SwizzleError::PitchNotTileAligned {
                pitch: geometry.pitch,
                tile_width,
            });
        }
    }
    if extent.elements == 0 || extent.rows == 0 {
        return Ok(0);
    }

    let last_x = (extent.elements - 1)
        .checked_mul(geometry.element_pitch)
        .and_then(|x| x.checked_add(geometry.offset_x))
        .and_then(|x| x.checked_add(geometry.element_size - 1));
    let last_y = geometry.offset_y.checked_add(extent.rows - 1);
    let (Some(last_x), Some(last_y)) = (last_x, last_y) else {
        return Ok(u64::MAX);
    };

    let last = address(geometry, last_x, last_y, geometry.offset_z);
    Ok(match geometry.pattern {
        // Tile indices grow with both X and Y, so the tile holding the last byte bounds the copy.
        Some(pattern) => {
            let tile_size = pattern.tile_size() as u64;
            (last / tile_size + 1) * tile_size
        }
        None => last + 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn linear_addresses_are_row_major() {
        let geometry = linear(256, 16, 4);
        assert_eq!(address(&geometry, 12, 3, 0), 3 * 256 + 12);
        assert_eq!(address(&geometry, 0, 0, 2), 2 * 16 * 256);
    }

    #[test]
    fn tile_y_columns_are_sixteen_bytes_wide() {
        let geometry = tiled(&SwizzlePattern::INTEL_TILE_Y, 256, 64, 4);
        assert_eq!(address(&geometry, 4, 0, 0), 4);
        // The next 16B column starts after the 32 rows of the first one.
        assert_eq!(address(&geometry, 16, 0, 0), 512);
        assert_eq!(address(&geometry, 0, 1, 0), 16);
        // Second tile of the row, then the second tile row.
        assert_eq!(address(&geometry, 128, 0, 0), 4096);
        assert_eq!(address(&geometry, 0, 32, 0), 2 * 4096);
    }

    #[test]
    fn tile_x_rows_are_contiguous() {
        let geometry = tiled(&SwizzlePattern::INTEL_TILE_X, 1024, 16, 4);
        assert_eq!(address(&geometry, 100, 0, 0), 100);
        assert_eq!(address(&geometry, 0, 1, 0), 512);
        assert_eq!(address(&geometry, 512, 0, 0), 4096);
        assert_eq!(address(&geometry, 0, 8, 0), 2 * 4096);
    }

    #[rstest]
    #[case(&SwizzlePattern::INTEL_TILE_X, 0, 512)]
    #[case(&SwizzlePattern::INTEL_TILE_Y, 4, 12)]
    #[case(&SwizzlePattern::INTEL_TILE_W, 1, 1)]
    fn runs_end_at_the_swizzled_bit(
        #[case] pattern: &'static SwizzlePattern,
        #[case] x: u32,
        #[case] run: u32,
    ) {
        let geometry = tiled(pattern, 512, 64, 1);
        assert_eq!(contiguous_run(&geometry, x), run);
    }

    #[test]
    fn required_len_covers_the_last_tile() {
        let geometry = tiled(&SwizzlePattern::INTEL_TILE_Y, 256, 64, 4);
        let extent = CopyExtent {
            elements: 40,
            rows: 33,
        };
        // The last element sits in the second tile of the second tile row.
        assert_eq!(required_len(&geometry, extent), Ok(4 * 4096));

        let geometry = linear(256, 64, 4);
        assert_eq!(required_len(&geometry, extent), Ok(32 * 256 + 39 * 4 + 4));
    }

    #[test]
    fn bad_geometry_is_rejected() {
        let extent = CopyExtent {
            elements: 1,
            rows: 1,
        };
        let geometry = tiled(&SwizzlePattern::INTEL_TILE_Y, 200, 32, 4);
        assert_eq!(
            required_len(&geometry, extent),
            Err(SwizzleError::PitchNotTileAligned {
                pitch: 200,
                tile_width: 128
            })
        );
        let geometry = linear(256, 32, 0);
        assert_eq!(required_len(&geometry, extent), Err(SwizzleError::ZeroElement));
    }
}
