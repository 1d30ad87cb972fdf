//! CPU copies between linear system memory and a resource's native layout.
//!
//! A copy is described by a [`CpuBltDesc`]: the GPU sub-resource and origin, the layout of the
//! system memory side, and the extent. The buffers themselves are passed separately as
//! [`BltBuffers`], which also decides the direction.
//!
//! Linear surfaces are copied row by row. Tiled surfaces go through the context's
//! [`SwizzleBlt`](surface_layout_common::SwizzleBlt) primitive with the swizzle pattern of the
//! surface's tile mode.

use crate::error::{BltError, BltResult};
use crate::resource::ResourceInfo;
use surface_layout_common::{
    CubeFace, OffsetKind, OffsetRequest, Plane, ResolvedOffset, ResourceType, SurfaceGeometry,
    SwizzlePattern, SwizzleSurface, SwizzleSurfaceMut, TextureInfo, TileMode,
};
use tracing::trace;

/// The GPU side of a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GpuSubresource {
    /// Mip level.
    pub mip_level: u32,
    /// First slice: array index for 1D/2D, `cube * 6 + face` for cube maps, depth slice for 3D.
    pub slice: u32,
    /// Horizontal origin in pixels; must be block aligned.
    pub offset_x: u32,
    /// Vertical origin in pixels; must be block aligned.
    pub offset_y: u32,
    /// Byte offset within the origin pixel, for partial-pixel copies.
    pub offset_subpixel: u32,
}

/// The system memory side of a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SysMemLayout {
    /// Bytes between rows.
    pub row_pitch: u32,
    /// Bytes between slices of a multi-slice copy.
    pub slice_pitch: u64,
    /// Bytes between pixels; 0 means the resource's pixel size.
    pub pixel_pitch: u32,
}

/// Extent of a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BltExtent {
    /// Width in pixels; 0 copies to the right edge of the mip.
    pub width: u32,
    /// Height in pixels; 0 copies to the bottom edge of the mip.
    pub height: u32,
    /// Number of slices; 0 and 1 both copy one slice.
    pub slices: u32,
    /// Bytes copied per pixel; 0 means the resource's pixel size.
    pub bytes_per_pixel: u32,
}

/// A copy between a resource and system memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CpuBltDesc {
    /// GPU sub-resource and origin.
    pub gpu: GpuSubresource,
    /// System memory layout.
    pub sys: SysMemLayout,
    /// Copy extent.
    pub extent: BltExtent,
}

/// The memory a copy reads and writes, and its direction.
///
/// The GPU buffer starts at the resource base. The system buffer starts at the first copied
/// pixel of the first slice.
#[derive(Debug)]
pub enum BltBuffers<'a> {
    /// Copy from system memory into the resource.
    Upload {
        /// Resource memory.
        gpu: &'a mut [u8],
        /// Linear source.
        sys: &'a [u8],
    },
    /// Copy from the resource into system memory.
    Download {
        /// Resource memory.
        gpu: &'a [u8],
        /// Linear destination.
        sys: &'a mut [u8],
    },
}

impl BltBuffers<'_> {
    /// Borrows the buffers again with the system buffer starting at `sys_offset`.
    fn advance(&mut self, sys_offset: usize) -> BltResult<BltBuffers<'_>> {
        let out_of_bounds = |actual| BltError::OutOfBounds {
            needed: sys_offset,
            actual,
        };
        Ok(match self {
            BltBuffers::Upload { gpu, sys } => BltBuffers::Upload {
                gpu: &mut **gpu,
                sys: sys.get(sys_offset..).ok_or_else(|| out_of_bounds(sys.len()))?,
            },
            BltBuffers::Download { gpu, sys } => {
                let actual = sys.len();
                BltBuffers::Download {
                    gpu: &**gpu,
                    sys: sys.get_mut(sys_offset..).ok_or_else(|| out_of_bounds(actual))?,
                }
            }
        })
    }

    fn sys_len(&self) -> usize {
        match self {
            BltBuffers::Upload { sys, .. } => sys.len(),
            BltBuffers::Download { sys, .. } => sys.len(),
        }
    }

    fn is_upload(&self) -> bool {
        matches!(self, BltBuffers::Upload { .. })
    }
}

/// Copy parameters of one slice, in bytes and block rows.
#[derive(Debug, Clone, Copy)]
struct SliceCopy {
    width_bytes: u32,
    height: u32,
    offset_x_bytes: u32,
    offset_y: u32,
    pixel_pitch: u32,
    sys_row_pitch: u64,
    full_pixel: bool,
}

impl ResourceInfo {
    /// Copies a region between system memory and the resource.
    ///
    /// Multi-slice copies run slice after slice, advancing the system buffer by the slice pitch.
    /// The first failing slice stops the copy; slices before it stay copied.
    ///
    /// # Errors
    ///
    /// Returns a [`BltError`] if the region is invalid for the resource, if the sub-resource
    /// offset cannot be resolved, or if either buffer is too small for the copy.
    pub fn cpu_blt(&self, desc: &CpuBltDesc, mut buffers: BltBuffers<'_>) -> BltResult<()> {
        if self.surf.samples() > 1 {
            return Err(BltError::Multisampled);
        }

        let (tex, plane) = self.blt_target(desc)?;

        for index in 0..desc.extent.slices.max(1) {
            let sys_offset = usize::try_from(index as u64 * desc.sys.slice_pitch)
                .map_err(|_| BltError::GeometryOverflow)?;
            let slice_buffers = buffers.advance(sys_offset)?;
            let slice = desc.gpu.slice + index;
            trace!(
                slice,
                mip = desc.gpu.mip_level,
                upload = slice_buffers.is_upload(),
                remaining = slice_buffers.sys_len(),
                "copying slice"
            );
            self.blt_slice(tex, plane, desc, slice, slice_buffers)?;
        }
        Ok(())
    }

    /// Picks the descriptor the copy runs against. UV-packed planes have different tilings, so a
    /// copy must stay within one of them.
    fn blt_target(&self, desc: &CpuBltDesc) -> BltResult<(&TextureInfo, Option<Plane>)> {
        if !(self.surf.flags.has_redescribed_planes() && self.surf.format.is_uv_packed()) {
            return Ok((&self.surf, None));
        }

        let boundary = self.surf.offset_info.plane.row(Plane::U);
        let offset_y = desc.gpu.offset_y;
        let end = offset_y as u64 + desc.extent.height as u64;
        if (offset_y as u64) < boundary && end > boundary {
            return Err(BltError::PlaneStraddle {
                offset_y,
                end,
                boundary,
            });
        }

        let plane = if (offset_y as u64) < boundary {
            Plane::Y
        } else {
            Plane::U
        };
        Ok((self.plane(plane), Some(plane)))
    }

    fn blt_slice(
        &self,
        tex: &TextureInfo,
        plane: Option<Plane>,
        desc: &CpuBltDesc,
        slice: u32,
        buffers: BltBuffers<'_>,
    ) -> BltResult<()> {
        let copy = slice_copy(self, tex, desc)?;
        let tile_depth = self.platform().tile_info(tex.tile_mode).logical_tile_depth.max(1);

        let kind = if tex.tile_mode.is_linear() {
            OffsetKind::Lock
        } else if tex.flags.uses_std_swizzle() {
            OffsetKind::StdLayout
        } else {
            OffsetKind::Render
        };
        let mut request = OffsetRequest::new(kind).mip(desc.gpu.mip_level);
        match tex.resource_type {
            ResourceType::Cube => {
                request.array_index = slice / CubeFace::COUNT;
                request.cube_face =
                    CubeFace::from_index(slice % CubeFace::COUNT).unwrap_or_default();
            }
            ResourceType::Texture3D if tex.tile_mode.is_tiled_resource() => {
                request.slice = slice / tile_depth;
            }
            ResourceType::Texture3D => request.slice = slice,
            _ => request.array_index = slice,
        }

        // Standard layouts of redescribed planes are addressed per plane.
        let mut offset_y = copy.offset_y;
        if kind == OffsetKind::StdLayout {
            if let Some(plane) = plane {
                request.plane = Some(plane);
                let plane_row = self.surf.offset_info.plane.row(plane) as u32;
                offset_y = offset_y.saturating_sub(plane_row / self.block_height(tex));
            }
        }
        let offset = self.get_offset(&request)?;

        if tex.tile_mode.is_linear() {
            return self.blt_linear(tex, &copy, &offset, buffers);
        }

        let z_offset = if tex.resource_type == ResourceType::Texture3D
            && tex.tile_mode.is_tiled_resource()
        {
            slice % tile_depth
        } else {
            0
        };
        let copy = SliceCopy { offset_y, ..copy };
        self.blt_swizzled(tex, desc, &copy, &offset, z_offset, buffers)
    }

    fn blt_linear(
        &self,
        tex: &TextureInfo,
        copy: &SliceCopy,
        offset: &ResolvedOffset,
        buffers: BltBuffers<'_>,
    ) -> BltResult<()> {
        if !copy.full_pixel {
            return Err(BltError::PartialPixelLinear);
        }

        let gpu_pitch = tex.pitch;
        let gpu_start =
            offset.offset + copy.offset_y as u64 * gpu_pitch + copy.offset_x_bytes as u64;
        let width = copy.width_bytes as usize;

        match buffers {
            BltBuffers::Upload { gpu, sys } => {
                for row in 0..copy.height as u64 {
                    let dest = to_usize(gpu_start + row * gpu_pitch)?;
                    let src = to_usize(row * copy.sys_row_pitch)?;
                    let src = checked_range(sys.len(), src, width)?;
                    let dest = checked_range(gpu.len(), dest, width)?;
                    gpu[dest].copy_from_slice(&sys[src]);
                }
            }
            BltBuffers::Download { gpu, sys } => {
                for row in 0..copy.height as u64 {
                    let src = to_usize(gpu_start + row * gpu_pitch)?;
                    let dest = to_usize(row * copy.sys_row_pitch)?;
                    let src = checked_range(gpu.len(), src, width)?;
                    let dest = checked_range(sys.len(), dest, width)?;
                    sys[dest].copy_from_slice(&gpu[src]);
                }
            }
        }
        Ok(())
    }

    fn blt_swizzled(
        &self,
        tex: &TextureInfo,
        desc: &CpuBltDesc,
        copy: &SliceCopy,
        offset: &ResolvedOffset,
        z_offset: u32,
        buffers: BltBuffers<'_>,
    ) -> BltResult<()> {
        let resource_pixel_pitch = tex.pixel_pitch();
        let mut swizzled = if tex.flags.uses_std_swizzle() {
            let calc = self.context.texture_calc();
            let mut height = tex.mip_height(desc.gpu.mip_level);
            let mut width = to_u32(tex.mip_width(desc.gpu.mip_level))?;
            calc.align_tex_height_width(self.platform(), tex, &mut height, &mut width);
            SurfaceGeometry {
                pitch: width
                    .checked_mul(resource_pixel_pitch)
                    .ok_or(BltError::GeometryOverflow)?,
                height,
                offset_x: offset.x_offset + copy.offset_x_bytes,
                offset_y: offset.y_offset + copy.offset_y,
                offset_z: z_offset,
                ..SurfaceGeometry::default()
            }
        } else {
            SurfaceGeometry {
                pitch: to_u32(tex.pitch)?,
                height: to_u32(tex.size / tex.pitch.max(1))?,
                offset_x: offset.x_offset + copy.offset_x_bytes,
                offset_y: offset.y_offset + copy.offset_y,
                offset_z: offset.z_offset + z_offset,
                ..SurfaceGeometry::default()
            }
        };

        if tex.tile_mode == TileMode::TileW {
            // W tiles are laid out at double pitch and half height; the swizzle uses the
            // natural 64x64 tile.
            swizzled.pitch /= 2;
            swizzled.height *= 2;
            swizzled.offset_x = offset.x_offset / 2 + copy.offset_x_bytes;
            swizzled.offset_y = offset.y_offset * 2 + copy.offset_y;
        }

        swizzled.pattern = Some(
            SwizzlePattern::for_tile_mode(
                tex.tile_mode,
                tex.resource_type == ResourceType::Texture3D,
                tex.samples(),
                tex.bits_per_pixel,
            )
            .ok_or(BltError::NoSwizzlePattern(tex.tile_mode))?,
        );

        let element_size = match desc.extent.bytes_per_pixel {
            0 => resource_pixel_pitch,
            bytes => bytes,
        };
        swizzled.element_pitch = resource_pixel_pitch;
        swizzled.element_size = element_size;

        let base = to_usize(offset.offset)?;
        let sys_len = buffers.sys_len();
        let linear = SurfaceGeometry {
            pitch: desc.sys.row_pitch,
            height: to_u32(match desc.sys.row_pitch {
                0 => 1,
                pitch => sys_len as u64 / pitch as u64,
            })?,
            element_pitch: copy.pixel_pitch,
            element_size,
            ..SurfaceGeometry::default()
        };

        let swizzle = self.context.swizzle();
        match buffers {
            BltBuffers::Upload { gpu, sys } => {
                let actual = gpu.len();
                let data = gpu.get_mut(base..).ok_or(BltError::OutOfBounds {
                    needed: base,
                    actual,
                })?;
                swizzle.blt(
                    SwizzleSurfaceMut {
                        data,
                        geometry: swizzled,
                    },
                    SwizzleSurface {
                        data: sys,
                        geometry: linear,
                    },
                    copy.width_bytes,
                    copy.height,
                )?;
            }
            BltBuffers::Download { gpu, sys } => {
                let data = gpu.get(base..).ok_or(BltError::OutOfBounds {
                    needed: base,
                    actual: gpu.len(),
                })?;
                swizzle.blt(
                    SwizzleSurfaceMut {
                        data: sys,
                        geometry: linear,
                    },
                    SwizzleSurface {
                        data,
                        geometry: swizzled,
                    },
                    copy.width_bytes,
                    copy.height,
                )?;
            }
        }
        Ok(())
    }

    fn block_height(&self, tex: &TextureInfo) -> u32 {
        self.context
            .texture_calc()
            .compression_block_dimensions(tex.format)
            .height
            .max(1)
    }
}

/// Converts the copy extent and origin of `desc` into bytes and block rows.
fn slice_copy(
    resource: &ResourceInfo,
    tex: &TextureInfo,
    desc: &CpuBltDesc,
) -> BltResult<SliceCopy> {
    let block = resource
        .context
        .texture_calc()
        .compression_block_dimensions(tex.format);
    let (block_width, block_height) = (block.width.max(1), block.height.max(1));
    let resource_pixel_pitch = tex.pixel_pitch();
    let gpu = &desc.gpu;
    let extent = &desc.extent;

    let width = match extent.width {
        0 => {
            if resource.surf.format.is_planar() {
                return Err(BltError::ImplicitExtentOnPlanar);
            }
            remaining(gpu.offset_x, tex.mip_width(gpu.mip_level))?
        }
        width => width,
    };
    let height = match extent.height {
        0 => {
            if resource.surf.format.is_planar() {
                return Err(BltError::ImplicitExtentOnPlanar);
            }
            remaining(gpu.offset_y, tex.mip_height(gpu.mip_level) as u64)?
        }
        height => height,
    };

    let matches_resource = |value: u32| value == 0 || value == resource_pixel_pitch;
    let full_pixel =
        matches_resource(desc.sys.pixel_pitch) && matches_resource(extent.bytes_per_pixel);
    let pixel_pitch = match desc.sys.pixel_pitch {
        0 => resource_pixel_pitch,
        pitch => pitch,
    };
    let width_bytes = if full_pixel {
        width.div_ceil(block_width) * resource_pixel_pitch
    } else {
        if block.is_compressed() {
            return Err(BltError::PartialPixelCompressed);
        }
        // Measured on the unswizzled side.
        width * pixel_pitch
    };

    if gpu.offset_x % block_width != 0 || gpu.offset_y % block_height != 0 {
        return Err(BltError::UnalignedOrigin {
            offset_x: gpu.offset_x,
            offset_y: gpu.offset_y,
            block_width,
            block_height,
        });
    }

    Ok(SliceCopy {
        width_bytes,
        height: height.div_ceil(block_height),
        offset_x_bytes: (gpu.offset_x / block_width) * resource_pixel_pitch + gpu.offset_subpixel,
        offset_y: gpu.offset_y / block_height,
        pixel_pitch,
        sys_row_pitch: desc.sys.row_pitch as u64,
        full_pixel,
    })
}

fn remaining(offset: u32, extent: u64) -> BltResult<u32> {
    match extent.checked_sub(offset as u64) {
        Some(left) if left > 0 => to_u32(left),
        _ => Err(BltError::OriginOutsideMip { offset, extent }),
    }
}

fn checked_range(len: usize, start: usize, width: usize) -> BltResult<core::ops::Range<usize>> {
    let end = start.checked_add(width).ok_or(BltError::GeometryOverflow)?;
    if end > len {
        return Err(BltError::OutOfBounds {
            needed: end,
            actual: len,
        });
    }
    Ok(start..end)
}

fn to_u32(value: u64) -> BltResult<u32> {
    u32::try_from(value).map_err(|_| BltError::GeometryOverflow)
}

fn to_usize(value: u64) -> BltResult<usize> {
    usize::try_from(value).map_err(|_| BltError::GeometryOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use surface_layout_common::GpuFlags;

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|index| (index * 7 + 3) as u8).collect()
    }

    fn texture(format: SurfaceFormat, width: u64, height: u32, tiling: InfoFlags) -> CreateParams {
        CreateParams::builder(ResourceType::Texture2D, format)
            .width(width)
            .height(height)
            .info_flags(tiling)
            .build()
    }

    fn whole_mip(resource: &ResourceInfo) -> CpuBltDesc {
        CpuBltDesc {
            sys: SysMemLayout {
                row_pitch: resource.base_width() as u32 * resource.surface().pixel_pitch(),
                ..SysMemLayout::default()
            },
            ..CpuBltDesc::default()
        }
    }

    fn round_trip(resource: &ResourceInfo, desc: &CpuBltDesc, sys_len: usize) -> Vec<u8> {
        let source = pattern(sys_len);
        let mut gpu = vec![0u8; resource.total_size() as usize];
        resource
            .cpu_blt(desc, BltBuffers::Upload { gpu: &mut gpu, sys: &source })
            .unwrap();

        let mut read_back = vec![0u8; sys_len];
        resource
            .cpu_blt(desc, BltBuffers::Download { gpu: &gpu, sys: &mut read_back })
            .unwrap();
        assert_eq!(read_back, source);
        gpu
    }

    #[test]
    fn linear_sub_rectangle_lands_at_its_origin() {
        let resource = create(&texture(SurfaceFormat::R8G8B8A8Unorm, 16, 8, InfoFlags::LINEAR));
        let desc = CpuBltDesc {
            gpu: GpuSubresource {
                offset_x: 4,
                offset_y: 2,
                ..GpuSubresource::default()
            },
            sys: SysMemLayout {
                row_pitch: 16,
                ..SysMemLayout::default()
            },
            extent: BltExtent {
                width: 4,
                height: 3,
                ..BltExtent::default()
            },
        };
        let gpu = round_trip(&resource, &desc, 16 * 3);
        let source = pattern(48);
        let pitch = resource.pitch() as usize;
        for row in 0..3 {
            let start = (2 + row) * pitch + 16;
            assert_eq!(gpu[start..start + 16], source[row * 16..row * 16 + 16]);
        }
        assert!(gpu[..2 * pitch].iter().all(|&byte| byte == 0));
    }

    #[test]
    fn tile_y_is_swizzled() {
        let resource = create(&texture(SurfaceFormat::R8G8B8A8Unorm, 64, 64, InfoFlags::TILED_Y));
        let desc = whole_mip(&resource);
        let gpu = round_trip(&resource, &desc, 64 * 64 * 4);
        let source = pattern(64 * 64 * 4);
        // Y tiles store 16-byte columns of 32 rows.
        assert_eq!(gpu[..16], source[..16]);
        assert_eq!(gpu[16..32], source[256..272]);
    }

    #[rstest]
    #[case(SurfaceFormat::R8G8B8A8Unorm, InfoFlags::TILED_X)]
    #[case(SurfaceFormat::R16Unorm, InfoFlags::TILED_Y)]
    #[case(SurfaceFormat::Bc1Unorm, InfoFlags::TILED_Y)]
    #[case(SurfaceFormat::R8G8B8A8Unorm, InfoFlags::TILED_Y.union(InfoFlags::TILED_YS))]
    fn tiled_round_trip(#[case] format: SurfaceFormat, #[case] tiling: InfoFlags) {
        let resource = create(&texture(format, 128, 64, tiling));
        let block = format.info().block;
        let row_pitch = (128 / block.width) * resource.surface().pixel_pitch();
        let desc = CpuBltDesc {
            sys: SysMemLayout {
                row_pitch,
                ..SysMemLayout::default()
            },
            ..CpuBltDesc::default()
        };
        round_trip(&resource, &desc, (row_pitch * (64 / block.height)) as usize);
    }

    #[test]
    fn std_swizzle_round_trip() {
        let resource = create(&texture(
            SurfaceFormat::R8G8B8A8Unorm,
            256,
            256,
            InfoFlags::TILED_Y | InfoFlags::TILED_YS | InfoFlags::STD_SWIZZLE,
        ));
        let desc = whole_mip(&resource);
        round_trip(&resource, &desc, 256 * 256 * 4);
    }

    #[test]
    fn separate_stencil_round_trip() {
        let params = CreateParams::builder(ResourceType::Texture2D, SurfaceFormat::S8Uint)
            .width(64)
            .height(64)
            .gpu_flags(GpuFlags::SEPARATE_STENCIL)
            .info_flags(InfoFlags::TILED_W)
            .build();
        let resource = create(&params);
        let desc = whole_mip(&resource);
        round_trip(&resource, &desc, 64 * 64);
    }

    #[test]
    fn slices_advance_by_the_slice_pitch() {
        let params = CreateParams::builder(ResourceType::Texture2D, SurfaceFormat::R8G8B8A8Unorm)
            .width(32)
            .height(32)
            .array_size(2)
            .info_flags(InfoFlags::TILED_Y)
            .build();
        let resource = create(&params);
        let slice_bytes = 32 * 32 * 4;
        let desc = CpuBltDesc {
            sys: SysMemLayout {
                row_pitch: 32 * 4,
                slice_pitch: slice_bytes as u64,
                ..SysMemLayout::default()
            },
            extent: BltExtent {
                slices: 2,
                ..BltExtent::default()
            },
            ..CpuBltDesc::default()
        };
        let gpu = round_trip(&resource, &desc, 2 * slice_bytes);

        let second_slice = CpuBltDesc {
            gpu: GpuSubresource {
                slice: 1,
                ..GpuSubresource::default()
            },
            extent: BltExtent::default(),
            ..desc
        };
        let mut read_back = vec![0u8; slice_bytes];
        resource
            .cpu_blt(&second_slice, BltBuffers::Download { gpu: &gpu, sys: &mut read_back })
            .unwrap();
        assert_eq!(read_back, pattern(2 * slice_bytes)[slice_bytes..]);
    }

    #[test]
    fn multisampled_surfaces_are_rejected() {
        let params = CreateParams::builder(ResourceType::Texture2D, SurfaceFormat::R8G8B8A8Unorm)
            .width(64)
            .height(64)
            .samples(4)
            .gpu_flags(GpuFlags::RENDER_TARGET)
            .info_flags(InfoFlags::TILED_Y)
            .build();
        let resource = create(&params);
        let mut gpu = vec![0u8; resource.total_size() as usize];
        let error = resource
            .cpu_blt(&whole_mip(&resource), BltBuffers::Upload { gpu: &mut gpu, sys: &[] })
            .unwrap_err();
        assert_eq!(error, BltError::Multisampled);
    }

    fn nv12(tiling: InfoFlags) -> ResourceInfo {
        create(
            &CreateParams::builder(ResourceType::Texture2D, SurfaceFormat::Nv12)
                .width(64)
                .height(64)
                .info_flags(tiling)
                .build(),
        )
    }

    #[test]
    fn planar_copies_need_an_extent() {
        let resource = nv12(InfoFlags::LINEAR);
        let mut gpu = vec![0u8; resource.total_size() as usize];
        let sys = vec![0u8; 64 * 64];
        let error = resource
            .cpu_blt(&whole_mip(&resource), BltBuffers::Upload { gpu: &mut gpu, sys: &sys })
            .unwrap_err();
        assert_eq!(error, BltError::ImplicitExtentOnPlanar);
    }

    #[test]
    fn copies_cannot_straddle_the_uv_plane() {
        let resource = nv12(InfoFlags::TILED_Y | InfoFlags::REDESCRIBED_PLANES);
        let boundary = resource.surface().offset_info.plane.row(Plane::U);
        let desc = CpuBltDesc {
            gpu: GpuSubresource {
                offset_y: boundary as u32 - 16,
                ..GpuSubresource::default()
            },
            sys: SysMemLayout {
                row_pitch: 64,
                ..SysMemLayout::default()
            },
            extent: BltExtent {
                width: 64,
                height: 32,
                ..BltExtent::default()
            },
        };
        let mut gpu = vec![0u8; resource.total_size() as usize];
        let sys = vec![0u8; 64 * 32];
        let error = resource
            .cpu_blt(&desc, BltBuffers::Upload { gpu: &mut gpu, sys: &sys })
            .unwrap_err();
        assert!(matches!(error, BltError::PlaneStraddle { .. }));
    }

    #[rstest]
    #[case(SurfaceFormat::R8G8B8A8Unorm, InfoFlags::LINEAR, 0, 3, BltError::PartialPixelLinear)]
    #[case(SurfaceFormat::Bc1Unorm, InfoFlags::TILED_Y, 0, 4, BltError::PartialPixelCompressed)]
    #[case(
        SurfaceFormat::Bc1Unorm,
        InfoFlags::TILED_Y,
        2,
        0,
        BltError::UnalignedOrigin { offset_x: 2, offset_y: 0, block_width: 4, block_height: 4 }
    )]
    #[case(
        SurfaceFormat::R8G8B8A8Unorm,
        InfoFlags::TILED_Y,
        64,
        0,
        BltError::OriginOutsideMip { offset: 64, extent: 64 }
    )]
    fn invalid_regions_are_rejected(
        #[case] format: SurfaceFormat,
        #[case] tiling: InfoFlags,
        #[case] offset_x: u32,
        #[case] bytes_per_pixel: u32,
        #[case] expected: BltError,
    ) {
        let resource = create(&texture(format, 64, 64, tiling));
        let desc = CpuBltDesc {
            gpu: GpuSubresource {
                offset_x,
                ..GpuSubresource::default()
            },
            sys: SysMemLayout {
                row_pitch: 256,
                ..SysMemLayout::default()
            },
            extent: BltExtent {
                width: if offset_x == 64 { 0 } else { 4 },
                height: 4,
                slices: 1,
                bytes_per_pixel,
            },
        };
        let mut gpu = vec![0u8; resource.total_size() as usize];
        let sys = vec![0u8; 256 * 4];
        let error = resource
            .cpu_blt(&desc, BltBuffers::Upload { gpu: &mut gpu, sys: &sys })
            .unwrap_err();
        assert_eq!(error, expected);
    }

    #[test]
    fn short_buffers_are_reported() {
        let resource = create(&texture(SurfaceFormat::R8G8B8A8Unorm, 16, 8, InfoFlags::LINEAR));
        let mut gpu = vec![0u8; resource.total_size() as usize];
        let sys = vec![0u8; 16];
        let error = resource
            .cpu_blt(&whole_mip(&resource), BltBuffers::Upload { gpu: &mut gpu, sys: &sys })
            .unwrap_err();
        assert!(matches!(error, BltError::OutOfBounds { .. }));
    }
}
