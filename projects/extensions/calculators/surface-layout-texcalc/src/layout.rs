//! Mip chain and plane placement, pitch and size.
//!
//! Each array slice holds the whole mip chain:
//!
//! ```text
//! +-----------+
//! |           |
//! |   mip 0   |
//! |           |
//! +-----+-----+
//! |mip 1|mip 2|
//! |     +--+--+
//! +-----+m3|
//!       +--+
//! ```
//!
//! Yf/Ys surfaces stop the chain at the mip tail: the tail start level takes a whole tile, and the
//! smaller levels are packed inside that tile. Slices are stacked vertically at QPitch, which is
//! tile aligned for Yf/Ys so that each slice starts on a tile row. 3D Yf/Ys surfaces group
//! `tile depth` depth slices into one slab of tiles.

use crate::alignment::{base_alignment, mip_tail_start, select_tile_mode, unit_alignment};
use crate::alignment::{Geometry, UnitAlignment};
use crate::Gen9TextureCalc;
use surface_layout_common::math::{align_up_np2, align_up_u32};
use surface_layout_common::texture::{MipOrigin, PlaneOffsetInfo};
use surface_layout_common::{
    Plane, PlatformInfo, ResourceType, SurfaceFormat, TextureCalc, TextureCalcError, TextureInfo,
    TileMode, MAX_MIP_LEVELS,
};
use tracing::trace;

/// Placement of one array slice, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct SliceLayout {
    pub origins: [MipOrigin; MAX_MIP_LEVELS],
    pub width: u32,
    pub height: u32,
    pub planes: PlaneOffsetInfo,
}

/// Computes tile mode, alignment, mip origins, pitch and size of `tex`.
pub(crate) fn layout_surface(
    platform: &PlatformInfo,
    tex: &mut TextureInfo,
) -> Result<(), TextureCalcError> {
    if tex.format == SurfaceFormat::Invalid || tex.bits_per_pixel == 0 {
        return Err(TextureCalcError::InvalidFormat(tex.format));
    }
    if tex.resource_type == ResourceType::Invalid {
        return Err(TextureCalcError::UnsupportedResourceType(tex.resource_type));
    }

    tex.tile_mode = select_tile_mode(platform, tex)?;
    let geometry = Geometry::new(platform, tex);
    let align = unit_alignment(tex, &geometry);
    let tail = mip_tail_start(tex, &geometry);

    let slice = if tex.format.is_planar() {
        place_planes(tex, &geometry, &align)
    } else {
        place_mip_chain(tex, &geometry, &align, tail)?
    };

    let mut qpitch = align_up_np2(slice.height as u64, align.v_align as u64);
    if tex.tile_mode.is_tiled_resource() {
        qpitch = align_up_np2(qpitch, geometry.tile_height_px() as u64);
    }
    let qpitch = u32::try_from(qpitch).map_err(|_| TextureCalcError::Overflow)?;
    let slice_rows = geometry.y_rows(align_up_u32(qpitch, geometry.block.height));

    let natural_pitch =
        slice.width.div_ceil(geometry.block.width) as u64 * geometry.bytes_per_element as u64;
    let total_rows = slice_rows
        .checked_mul(stacked_slices(tex, &geometry) as u64)
        .ok_or(TextureCalcError::Overflow)?;
    let (pitch, rows) = match tex.tile_mode {
        TileMode::Linear => (
            align_up_np2(natural_pitch, platform.linear_pitch_alignment() as u64),
            total_rows,
        ),
        // Stored at double pitch and half height.
        TileMode::TileW => (
            align_up_np2(natural_pitch, 64) * 2,
            align_up_np2(total_rows, 64) / 2,
        ),
        _ => (
            align_up_np2(natural_pitch, geometry.tile_width as u64),
            align_up_np2(total_rows, geometry.tile_height as u64),
        ),
    };

    let size = pitch.checked_mul(rows).ok_or(TextureCalcError::Overflow)?;
    let max = platform.surface_max_size();
    if size > max {
        return Err(TextureCalcError::SurfaceTooLarge { size, max });
    }

    let qpitch_bytes = slice_rows * natural_row_pitch(tex.tile_mode, pitch);
    tex.pitch = pitch;
    tex.size = size;
    tex.unpadded_size = size;
    tex.alignment.base_alignment = base_alignment(tex.tile_mode);
    tex.alignment.h_align = align.h_align;
    tex.alignment.v_align = align.v_align;
    tex.alignment.d_align = align.d_align;
    tex.alignment.qpitch = qpitch;
    tex.alignment.mip_tail_start_lod = tail;
    tex.offset_info.mip_origin = slice.origins;
    tex.offset_info.array_qpitch_lock = qpitch_bytes;
    tex.offset_info.array_qpitch_render = qpitch_bytes;
    tex.offset_info.plane = PlaneOffsetInfo {
        array_qpitch: if tex.format.is_planar() {
            qpitch_bytes
        } else {
            0
        },
        ..slice.planes
    };

    trace!(
        format = ?tex.format,
        tile_mode = ?tex.tile_mode,
        pitch,
        size,
        qpitch,
        mip_tail_start = ?tail,
        "surface laid out"
    );
    Ok(())
}

/// Bytes between consecutive rows in the natural (swizzle) shape of the tiling.
pub(crate) fn natural_row_pitch(tile_mode: TileMode, pitch: u64) -> u64 {
    match tile_mode {
        TileMode::TileW => pitch / 2,
        _ => pitch,
    }
}

/// Number of slices stacked at QPitch. Multisampled color surfaces store each sample as a
/// slice, and 3D Yf/Ys slabs count `tile depth` rows of tiles per tile row.
pub(crate) fn stacked_slices(tex: &TextureInfo, geometry: &Geometry) -> u32 {
    match tex.resource_type {
        ResourceType::Texture3D if tex.tile_mode.is_tiled_resource() => {
            tex.depth.max(1).div_ceil(geometry.tile_depth) * geometry.tile_depth
        }
        ResourceType::Texture3D => tex.depth.max(1),
        _ => tex.array_slices() * color_samples(tex),
    }
}

/// Samples stored as separate slices.
pub(crate) fn color_samples(tex: &TextureInfo) -> u32 {
    if tex.flags.is_depth() || tex.flags.is_separate_stencil() {
        1
    } else {
        tex.samples()
    }
}

fn mip_extent(
    tex: &TextureInfo,
    lod: u32,
    align: &UnitAlignment,
) -> Result<(u32, u32), TextureCalcError> {
    let width = u32::try_from(tex.mip_width(lod)).map_err(|_| TextureCalcError::Overflow)?;
    Ok((
        Gen9TextureCalc.expand_width(tex, width, align.h_align),
        Gen9TextureCalc.expand_height(tex, tex.mip_height(lod), align.v_align),
    ))
}

fn place_mip_chain(
    tex: &TextureInfo,
    geometry: &Geometry,
    align: &UnitAlignment,
    tail: Option<u32>,
) -> Result<SliceLayout, TextureCalcError> {
    let max_lod = (tex.max_lod as usize).min(MAX_MIP_LEVELS - 1) as u32;
    let last = tail.map_or(max_lod, |start| start.min(max_lod));

    let mut extents = [(0u32, 0u32); MAX_MIP_LEVELS];
    for lod in 0..=last {
        extents[lod as usize] = if Some(lod) == tail {
            (geometry.tile_width_px(), geometry.tile_height_px())
        } else {
            mip_extent(tex, lod, align)?
        };
    }

    let mut layout = SliceLayout::default();
    let (width0, height0) = extents[0];
    let (width1, height1) = extents[1];
    layout.width = width0;
    layout.height = height0;
    let mut lower_height = 0;
    for lod in 1..=last as usize {
        let origin = match lod {
            1 => MipOrigin { x: 0, y: height0 },
            2 => MipOrigin {
                x: width1,
                y: height0,
            },
            _ => {
                let previous = layout.origins[lod - 1];
                MipOrigin {
                    x: width1,
                    y: previous.y + extents[lod - 1].1,
                }
            }
        };
        layout.origins[lod] = origin;
        layout.width = layout.width.max(origin.x + extents[lod].0);
        if lod >= 2 {
            lower_height += extents[lod].1;
        }
    }
    if last >= 1 {
        layout.height = height0 + height1.max(lower_height);
    }

    // Levels past the tail start share its tile: the first takes the top left quarter and the
    // rest line up along the lower half.
    if let Some(start) = tail.filter(|&start| start < max_lod) {
        let tail_origin = layout.origins[start as usize];
        let half_height = geometry.tile_height_px() / 2;
        let mut x = 0;
        for lod in start + 1..=max_lod {
            let width =
                u32::try_from(tex.mip_width(lod)).map_err(|_| TextureCalcError::Overflow)?;
            let slot = if lod == start + 1 {
                MipOrigin { x: 0, y: 0 }
            } else {
                MipOrigin { x, y: half_height }
            };
            if lod > start + 1 {
                x += align_up_u32(width, geometry.block.width);
            }
            layout.origins[lod as usize] = MipOrigin {
                x: tail_origin.x + slot.x,
                y: tail_origin.y + slot.y,
            };
        }
    }
    Ok(layout)
}

/// Stacks the planes of a planar format below each other. Chroma planes start on a tile row.
fn place_planes(tex: &TextureInfo, geometry: &Geometry, align: &UnitAlignment) -> SliceLayout {
    let info = tex.format.info();
    let width = align_up_np2(tex.base_width, align.h_align as u64) as u32;
    let luma_rows = align_up_u32(tex.base_height, align.v_align);
    let tile_rows = geometry.tile_height_px();
    let chroma_rows = align_up_u32(info.subsampling.plane_height(tex.base_height), align.v_align);

    let mut planes = PlaneOffsetInfo::default();
    let u_start = align_up_u32(luma_rows, tile_rows);
    planes.y[Plane::U.index()] = u_start as u64;
    let height = if info.uv_packed {
        planes.y[Plane::V.index()] = u_start as u64;
        u_start + chroma_rows
    } else {
        let v_start = u_start + align_up_u32(chroma_rows, tile_rows);
        planes.y[Plane::V.index()] = v_start as u64;
        v_start + chroma_rows
    };

    SliceLayout {
        width,
        height,
        planes,
        ..SliceLayout::default()
    }
}

/// Whole tiles a mip level covers in the standard layout, per slice or slab.
pub(crate) fn mip_tiles(tex: &TextureInfo, geometry: &Geometry, lod: u32) -> u64 {
    let columns = tex.mip_width(lod).div_ceil(geometry.tile_width_px() as u64);
    let rows = tex.mip_height(lod).div_ceil(geometry.tile_height_px()) as u64;
    columns * rows
}
