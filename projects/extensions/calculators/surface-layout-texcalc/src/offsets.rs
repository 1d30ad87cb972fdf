//! Sub-resource offsets in the lock, render and standard layout views.

use crate::alignment::{mip_tail_start, unit_alignment, Geometry};
use crate::layout::{color_samples, mip_tiles, natural_row_pitch};
use surface_layout_common::math::{align_up_np2, align_up_u32};
use surface_layout_common::texture::MipOrigin;
use surface_layout_common::{
    CubeFace, OffsetKind, OffsetRequest, PlatformInfo, ResolvedOffset, ResourceType,
    TextureCalcError, TextureInfo, TileMode,
};

/// Position of a sub-resource in the natural (unswizzled) shape of the surface.
struct Position {
    /// Byte column.
    x: u64,
    /// Element row, relative to `base`.
    y: u64,
    /// Byte offset of the slab holding the sub-resource; only 3D Yf/Ys surfaces use it.
    base: u64,
}

pub(crate) fn mip_map_offset(
    platform: &PlatformInfo,
    tex: &TextureInfo,
    request: &OffsetRequest,
) -> Result<ResolvedOffset, TextureCalcError> {
    if request.mip_level > tex.max_lod {
        return Err(TextureCalcError::MipOutOfRange {
            mip: request.mip_level,
            max_lod: tex.max_lod,
        });
    }
    let geometry = Geometry::new(platform, tex);
    check_slice(tex, &geometry, request)?;

    match request.kind {
        OffsetKind::Lock => Ok(lock_offset(tex, &geometry, request)),
        OffsetKind::Render if tex.tile_mode.is_linear() => {
            Ok(lock_offset(tex, &geometry, request))
        }
        OffsetKind::Render => Ok(render_offset(tex, &geometry, request)),
        OffsetKind::StdLayout => std_layout_offset(tex, &geometry, request),
        OffsetKind::StdLayoutSize => Ok(ResolvedOffset {
            offset: std_layout_size(tex, &geometry)?,
            ..ResolvedOffset::default()
        }),
    }
}

/// Aligns a mip's dimensions like the standard layout does and converts them into elements.
pub(crate) fn align_tex_height_width(
    platform: &PlatformInfo,
    tex: &TextureInfo,
    height: &mut u32,
    width: &mut u32,
) {
    let geometry = Geometry::new(platform, tex);
    let align = unit_alignment(tex, &geometry);
    let mut w = align_up_np2(*width as u64, align.h_align as u64);
    let mut h = align_up_np2(*height as u64, align.v_align as u64);
    if tex.tile_mode.is_tiled_resource() {
        w = align_up_np2(w, geometry.tile_width_px() as u64);
        h = align_up_np2(h, geometry.tile_height_px() as u64);
    }
    *width = (w / geometry.block.width as u64) as u32;
    *height = (h / geometry.block.height as u64) as u32;
}

fn check_slice(
    tex: &TextureInfo,
    geometry: &Geometry,
    request: &OffsetRequest,
) -> Result<(), TextureCalcError> {
    let (index, slices) = match tex.resource_type {
        ResourceType::Texture3D if tex.tile_mode.is_tiled_resource() => (
            request.slice,
            tex.depth.max(1).div_ceil(geometry.tile_depth),
        ),
        ResourceType::Texture3D => (request.slice, tex.depth.max(1)),
        _ => (request.array_index, tex.array_size.max(1)),
    };
    if index >= slices {
        return Err(TextureCalcError::SliceOutOfRange { index, slices });
    }
    Ok(())
}

/// Index of the stacked slice the request addresses.
fn slice_index(tex: &TextureInfo, request: &OffsetRequest) -> u64 {
    match tex.resource_type {
        ResourceType::Cube => {
            request.array_index as u64 * CubeFace::COUNT as u64 + request.cube_face.index() as u64
        }
        ResourceType::Texture3D if tex.tile_mode.is_tiled_resource() => 0,
        ResourceType::Texture3D => request.slice as u64,
        _ => request.array_index as u64 * color_samples(tex) as u64,
    }
}

fn slice_rows(tex: &TextureInfo, geometry: &Geometry) -> u64 {
    geometry.y_rows(align_up_u32(tex.alignment.qpitch, geometry.block.height))
}

fn position(tex: &TextureInfo, geometry: &Geometry, request: &OffsetRequest) -> Position {
    let origin = tex.offset_info.mip_origin[request.mip_level as usize];
    let (plane_x, plane_y) = match request.plane {
        Some(plane) => {
            let planes = &tex.offset_info.plane;
            (planes.x[plane.index()], planes.y[plane.index()])
        }
        None => (0, 0),
    };
    let rows = slice_rows(tex, geometry);
    let pitch = natural_row_pitch(tex.tile_mode, tex.pitch);
    let base = match tex.resource_type {
        ResourceType::Texture3D if tex.tile_mode.is_tiled_resource() => {
            request.slice as u64 * rows * geometry.tile_depth as u64 * pitch
        }
        _ => 0,
    };
    Position {
        x: geometry.x_bytes(origin.x) + plane_x,
        y: geometry.y_rows(origin.y) + plane_y + slice_index(tex, request) * rows,
        base,
    }
}

fn lock_offset(tex: &TextureInfo, geometry: &Geometry, request: &OffsetRequest) -> ResolvedOffset {
    let pitch = natural_row_pitch(tex.tile_mode, tex.pitch);
    let at = position(tex, geometry, request);
    ResolvedOffset {
        offset: at.base + at.y * pitch + at.x,
        row_pitch: pitch,
        depth_pitch: tex.offset_info.array_qpitch_lock,
        ..ResolvedOffset::default()
    }
}

/// Tile aligned offset plus the position inside the tile.
///
/// W tiled surfaces are addressed in their natural 64x64 shape and report the in-tile position
/// at double pitch and half height, the way their memory is described.
fn render_offset(
    tex: &TextureInfo,
    geometry: &Geometry,
    request: &OffsetRequest,
) -> ResolvedOffset {
    let pitch = natural_row_pitch(tex.tile_mode, tex.pitch);
    let at = position(tex, geometry, request);
    let tile_width = geometry.tile_width as u64;
    let tile_height = geometry.tile_height as u64;
    let tiles_per_row = pitch / tile_width;

    let offset = at.base
        + (at.y / tile_height) * tiles_per_row * geometry.tile_size
        + (at.x / tile_width) * geometry.tile_size;
    let (x_offset, y_offset) = match tex.tile_mode {
        TileMode::TileW => ((at.x % tile_width) * 2, (at.y % tile_height) / 2),
        _ => (at.x % tile_width, at.y % tile_height),
    };
    ResolvedOffset {
        offset,
        x_offset: x_offset as u32,
        y_offset: y_offset as u32,
        z_offset: 0,
        row_pitch: tex.pitch,
        depth_pitch: tex.offset_info.array_qpitch_render,
    }
}

/// Last mip level with tiles of its own; deeper levels live in its tail tile.
fn last_tiled_lod(tex: &TextureInfo, geometry: &Geometry) -> u32 {
    mip_tail_start(tex, geometry).map_or(tex.max_lod, |start| start.min(tex.max_lod))
}

fn slab_count(tex: &TextureInfo, geometry: &Geometry, lod: u32) -> u64 {
    tex.mip_depth(lod).div_ceil(geometry.tile_depth) as u64
}

/// Bytes one array slice occupies in the standard layout.
fn std_slice_size(tex: &TextureInfo, geometry: &Geometry) -> u64 {
    (0..=last_tiled_lod(tex, geometry))
        .map(|lod| {
            mip_tiles(tex, geometry, lod) * slab_count(tex, geometry, lod) * geometry.tile_size
        })
        .sum()
}

fn std_layout_size(tex: &TextureInfo, geometry: &Geometry) -> Result<u64, TextureCalcError> {
    if !tex.tile_mode.is_tiled_resource() {
        return Err(TextureCalcError::StdLayoutUnsupported(tex.tile_mode));
    }
    let slices = match tex.resource_type {
        ResourceType::Texture3D => 1,
        _ => tex.array_slices() as u64 * color_samples(tex) as u64,
    };
    std_slice_size(tex, geometry)
        .checked_mul(slices)
        .ok_or(TextureCalcError::Overflow)
}

/// Offset in the standard layout, where every mip level occupies whole tiles in row-major
/// order, levels follow each other and array slices follow the whole chain.
fn std_layout_offset(
    tex: &TextureInfo,
    geometry: &Geometry,
    request: &OffsetRequest,
) -> Result<ResolvedOffset, TextureCalcError> {
    if !tex.tile_mode.is_tiled_resource() {
        return Err(TextureCalcError::StdLayoutUnsupported(tex.tile_mode));
    }
    let last = last_tiled_lod(tex, geometry);
    let lod = request.mip_level.min(last);
    let tile_size = geometry.tile_size;

    let mut offset: u64 = (0..lod)
        .map(|k| mip_tiles(tex, geometry, k) * slab_count(tex, geometry, k) * tile_size)
        .sum();
    let slice_size = std_slice_size(tex, geometry);
    if tex.resource_type == ResourceType::Texture3D {
        offset += request.slice as u64 * mip_tiles(tex, geometry, lod) * tile_size;
    } else {
        offset += slice_index(tex, request) * slice_size;
    }

    let (x_offset, y_offset) = if request.mip_level > lod {
        let origins = &tex.offset_info.mip_origin;
        let MipOrigin { x, y } = origins[request.mip_level as usize];
        let tail = origins[lod as usize];
        (geometry.x_bytes(x - tail.x), geometry.y_rows(y - tail.y))
    } else {
        (0, 0)
    };

    let columns = tex.mip_width(lod).div_ceil(geometry.tile_width_px() as u64);
    Ok(ResolvedOffset {
        offset,
        x_offset: x_offset as u32,
        y_offset: y_offset as u32,
        z_offset: 0,
        row_pitch: columns * tile_size,
        depth_pitch: slice_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout_surface;
    use crate::test_prelude::*;

    fn laid_out(mut tex: TextureInfo) -> TextureInfo {
        layout_surface(&PlatformInfo::gen9(), &mut tex).unwrap();
        tex
    }

    fn offset(tex: &TextureInfo, request: OffsetRequest) -> ResolvedOffset {
        mip_map_offset(&PlatformInfo::gen9(), tex, &request).unwrap()
    }

    fn rgba(width: u64, height: u32, tiling: InfoFlags, max_lod: u32) -> TextureInfo {
        let mut tex = texture(
            ResourceType::Texture2D,
            SurfaceFormat::R8G8B8A8Unorm,
            width,
            height,
            tiling,
        );
        tex.max_lod = max_lod;
        laid_out(tex)
    }

    #[test]
    fn lock_offsets_are_linear() {
        let tex = rgba(256, 256, InfoFlags::TILED_Y, 3);
        let mip2 = offset(&tex, OffsetRequest::new(OffsetKind::Lock).mip(2));
        assert_eq!(mip2.offset, 256 * 1024 + 128 * 4);
        assert_eq!(mip2.row_pitch, 1024);
        assert_eq!((mip2.x_offset, mip2.y_offset), (0, 0));
    }

    #[test]
    fn render_offsets_are_tile_aligned() {
        let tex = rgba(256, 256, InfoFlags::TILED_Y, 3);
        let mip3 = offset(&tex, OffsetRequest::new(OffsetKind::Render).mip(3));
        // Mip 3 sits at (128, 320): tile column 4 of tile row 10.
        assert_eq!(mip3.offset, 10 * 8 * 4096 + 4 * 4096);
        assert_eq!((mip3.x_offset, mip3.y_offset), (0, 0));

        let tex = rgba(100, 100, InfoFlags::TILED_X, 2);
        let mip2 = offset(&tex, OffsetRequest::new(OffsetKind::Render).mip(2));
        // Mip 2 sits at (52, 100): byte 208 of row 100, inside tile row 12.
        assert_eq!(mip2.offset, 12 * 4096);
        assert_eq!((mip2.x_offset, mip2.y_offset), (208, 4));
    }

    #[test]
    fn linear_render_matches_lock() {
        let tex = rgba(100, 60, InfoFlags::LINEAR, 2);
        let request = OffsetRequest::new(OffsetKind::Lock).mip(1);
        let lock = offset(&tex, request);
        let render = offset(
            &tex,
            OffsetRequest {
                kind: OffsetKind::Render,
                ..request
            },
        );
        assert_eq!(lock, render);
    }

    #[test]
    fn cube_faces_are_consecutive_slices() {
        let mut tex = texture(
            ResourceType::Cube,
            SurfaceFormat::R8G8B8A8Unorm,
            64,
            64,
            InfoFlags::TILED_Y,
        );
        tex.array_size = 2;
        let tex = laid_out(tex);
        let qpitch = tex.offset_info.array_qpitch_lock;
        let face = CubeFace::from_index(2).unwrap();
        let face = offset(&tex, OffsetRequest::new(OffsetKind::Lock).array(1).face(face));
        assert_eq!(face.offset, 8 * qpitch);
    }

    #[test]
    fn out_of_range_requests_are_rejected() {
        let tex = rgba(64, 64, InfoFlags::TILED_Y, 1);
        let platform = PlatformInfo::gen9();
        assert_eq!(
            mip_map_offset(&platform, &tex, &OffsetRequest::new(OffsetKind::Lock).mip(2)),
            Err(TextureCalcError::MipOutOfRange { mip: 2, max_lod: 1 })
        );
        assert_eq!(
            mip_map_offset(&platform, &tex, &OffsetRequest::new(OffsetKind::Lock).array(1)),
            Err(TextureCalcError::SliceOutOfRange { index: 1, slices: 1 })
        );
        assert_eq!(
            mip_map_offset(&platform, &tex, &OffsetRequest::new(OffsetKind::StdLayout)),
            Err(TextureCalcError::StdLayoutUnsupported(TileMode::TileY))
        );
    }

    #[test]
    fn std_layout_packs_whole_tiles() {
        let tex = rgba(256, 256, InfoFlags::TILED_YS, 4);
        let std = |mip| offset(&tex, OffsetRequest::new(OffsetKind::StdLayout).mip(mip));
        assert_eq!(std(0).offset, 0);
        assert_eq!(std(0).row_pitch, 2 * SIZE_64KB);
        assert_eq!(std(1).offset, 4 * SIZE_64KB);
        assert_eq!(std(2).offset, 5 * SIZE_64KB);
        // Tail levels share the tile of mip 2.
        assert_eq!(std(3).offset, 5 * SIZE_64KB);
        assert_eq!((std(3).x_offset, std(3).y_offset), (0, 0));
        assert_eq!((std(4).x_offset, std(4).y_offset), (0, 64));

        let size = offset(&tex, OffsetRequest::new(OffsetKind::StdLayoutSize));
        assert_eq!(size.offset, 6 * SIZE_64KB);
    }

    #[test]
    fn std_layout_size_matches_render_size_without_mips() {
        let tex = rgba(300, 256, InfoFlags::TILED_YS, 0);
        let size = offset(&tex, OffsetRequest::new(OffsetKind::StdLayoutSize));
        assert_eq!(size.offset, tex.size);
    }

    #[test]
    fn std_layout_array_slices_follow_the_chain() {
        let mut tex = texture(
            ResourceType::Texture2D,
            SurfaceFormat::R8G8B8A8Unorm,
            128,
            128,
            InfoFlags::TILED_YS,
        );
        tex.array_size = 3;
        let tex = laid_out(tex);
        let second = offset(&tex, OffsetRequest::new(OffsetKind::StdLayout).array(2));
        assert_eq!(second.offset, 2 * SIZE_64KB);
        assert_eq!(second.depth_pitch, SIZE_64KB);
    }

    #[test]
    fn three_d_slabs_advance_by_whole_tiles() {
        let mut tex = texture(
            ResourceType::Texture3D,
            SurfaceFormat::R8G8B8A8Unorm,
            64,
            32,
            InfoFlags::TILED_YS,
        );
        tex.depth = 32;
        let tex = laid_out(tex);
        // Two tiles per slab, two slabs.
        let std = offset(&tex, OffsetRequest::new(OffsetKind::StdLayout).slice(1));
        assert_eq!(std.offset, 2 * SIZE_64KB);
        let render = offset(&tex, OffsetRequest::new(OffsetKind::Render).slice(1));
        assert_eq!(render.offset, 2 * SIZE_64KB);
        assert_eq!(tex.size, 4 * SIZE_64KB);
    }

    #[test]
    fn stencil_offsets_use_the_double_pitch_convention() {
        let mut tex = texture(
            ResourceType::Texture2D,
            SurfaceFormat::S8Uint,
            128,
            128,
            InfoFlags::TILED_W,
        );
        tex.flags.gpu = GpuFlags::SEPARATE_STENCIL;
        tex.max_lod = 1;
        let tex = laid_out(tex);
        let mip1 = offset(&tex, OffsetRequest::new(OffsetKind::Render).mip(1));
        // Mip 1 starts on natural row 128: the third row of 64x64 tiles, two tiles per row.
        assert_eq!(mip1.offset, 2 * 2 * 4096);
        assert_eq!((mip1.x_offset, mip1.y_offset), (0, 0));
    }

    #[test]
    fn aligned_extent_is_counted_in_elements() {
        let platform = PlatformInfo::gen9();
        let mut tex = texture(
            ResourceType::Texture2D,
            SurfaceFormat::Bc1Unorm,
            100,
            60,
            InfoFlags::TILED_YS,
        );
        layout_surface(&platform, &mut tex).unwrap();
        let (mut height, mut width) = (60, 100);
        align_tex_height_width(&platform, &tex, &mut height, &mut width);
        // Bc1 Ys tiles are 512x256 pixels.
        assert_eq!((width, height), (128, 64));
    }
}
