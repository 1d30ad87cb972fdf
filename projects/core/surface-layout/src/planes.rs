//! Per-plane descriptors of planar surfaces.
//!
//! UV-packed formats (NV12, P010, ...) interleave U and V in one plane with twice the element
//! size of Y, so the two planes end up with different tile shapes and are sized separately. Three
//! plane formats share a tiling and only need their chroma dimensions derived.

use crate::error::{SurfaceError, SurfaceKind, SurfaceResult};
use crate::resource::{size_surface, ResourceInfo};
use surface_layout_common::{GpuFlags, InfoFlags, Plane, SurfaceFormat, TextureInfo};
use tracing::warn;

const Y: usize = Plane::Y.index();
const U: usize = Plane::U.index();
const V: usize = Plane::V.index();

impl ResourceInfo {
    /// Derives and sizes the Y/U/V plane descriptors of the primary surface.
    pub(crate) fn redescribe_planes(&mut self) -> SurfaceResult<()> {
        let surf = &self.surf;
        let mut y_plane = TextureInfo {
            resource_type: surf.resource_type,
            base_width: surf.base_width,
            base_height: surf.base_height,
            depth: surf.depth,
            array_size: surf.array_size,
            num_samples: surf.num_samples,
            flags: surf.flags,
            bits_per_pixel: surf.bits_per_pixel,
            ..TextureInfo::default()
        };
        y_plane.flags.info.remove(InfoFlags::REDESCRIBED_PLANES);
        let mut u_plane = y_plane.clone();
        let mut v_plane = y_plane.clone();

        let planes = if surf.format.is_uv_packed() {
            // The UV plane holds two chroma samples per element.
            let (y_format, uv_format) = match surf.bits_per_pixel {
                8 => (SurfaceFormat::R8Unorm, SurfaceFormat::R16Unorm),
                16 => (SurfaceFormat::R16Unorm, SurfaceFormat::R32Uint),
                bpp => return Err(SurfaceError::UnsupportedPlaneBitsPerPixel(bpp)),
            };
            set_format(&mut y_plane, y_format);
            set_format(&mut u_plane, uv_format);
            u_plane.base_width = y_plane.base_width.div_ceil(2);
            u_plane.base_height = y_plane.base_height.div_ceil(2);
            2
        } else {
            let subsampling = surf.format.info().subsampling;
            for chroma in [&mut u_plane, &mut v_plane] {
                chroma.base_width = subsampling.plane_width(y_plane.base_width);
                chroma.base_height = subsampling.plane_height(y_plane.base_height);
            }
            let format = SurfaceFormat::plane_format(y_plane.bits_per_pixel)
                .ok_or(SurfaceError::UnsupportedPlaneBitsPerPixel(y_plane.bits_per_pixel))?;
            for plane in [&mut y_plane, &mut u_plane, &mut v_plane] {
                set_format(plane, format);
            }
            3
        };
        self.plane_surf = [y_plane, u_plane, v_plane];

        let context = self.context.clone();
        for &plane in Plane::first(planes) {
            let index = plane.index();
            if self.surf.flags.has_unified_aux() {
                let mut aux = self.plane_surf[index].clone();
                aux.flags.gpu.remove(
                    GpuFlags::UNIFIED_AUX_SURFACE
                        | GpuFlags::INDIRECT_CLEAR_COLOR
                        | GpuFlags::FLIP_CHAIN,
                );
                aux.flags.gpu.insert(GpuFlags::CCS);
                context
                    .texture_calc()
                    .pre_process_tex_special_cases(context.platform(), &mut aux)
                    .map_err(|source| SurfaceError::Sizing {
                        surface: SurfaceKind::PlaneAux(plane),
                        source,
                    })?;
                self.plane_aux_surf[index] = aux;
            }
            size_surface(&context, &mut self.plane_surf[index], SurfaceKind::Plane(plane))?;
        }

        self.readjust_plane_properties(false)
    }

    /// Reconciles the sized planes back into the primary surface, or into the aux surface when
    /// `is_aux` is set.
    pub(crate) fn readjust_plane_properties(&mut self, is_aux: bool) -> SurfaceResult<()> {
        let uv_packed = self.surf.format.is_uv_packed();
        let max = self.context.platform().surface_max_size();
        let (parent, planes) = if is_aux {
            (&mut self.aux_surf, &mut self.plane_aux_surf)
        } else {
            (&mut self.surf, &mut self.plane_surf)
        };

        if !uv_packed {
            let planes_size = planes[Y].size + planes[U].size + planes[V].size;
            if parent.size != planes_size {
                // Expected for formats whose chroma planes are narrower than the parent pitch.
                warn!(
                    format = ?parent.format,
                    parent_size = parent.size,
                    planes_size,
                    "plane sizes do not add up to the parent size"
                );
            }
            return Ok(());
        }

        planes[V] = planes[U].clone();

        parent.alignment = planes[U].alignment;
        parent.alignment.v_align = planes[Y].alignment.v_align;

        let uv_pitch = planes[U].pitch;
        if planes[Y].pitch != uv_pitch {
            let y_plane = &mut planes[Y];
            if y_plane.pitch != 0 {
                y_plane.size = (y_plane.size / y_plane.pitch) * uv_pitch;
            }
            if y_plane.array_size > 1 {
                let qpitch = y_plane.size / y_plane.array_size as u64;
                y_plane.offset_info.array_qpitch_render = qpitch;
                y_plane.offset_info.array_qpitch_lock = qpitch;
            }
            y_plane.pitch = uv_pitch;
            parent.pitch = uv_pitch;
        }

        parent.offset_info.plane.array_qpitch = planes[Y].offset_info.array_qpitch_render
            + planes[U].offset_info.array_qpitch_render;
        parent.size = planes[Y].size + planes[U].size;

        if parent.size > max {
            return Err(SurfaceError::SurfaceTooLarge {
                size: parent.size,
                max,
            });
        }
        Ok(())
    }
}

fn set_format(plane: &mut TextureInfo, format: SurfaceFormat) {
    plane.format = format;
    plane.bits_per_pixel = format.bits_per_pixel();
}
