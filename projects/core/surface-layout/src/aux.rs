//! Unified aux surface composition.
//!
//! A unified aux surface shares the allocation of its primary surface. Depth buffers with HiZ get
//! a HiZ aux (plus a CCS secondary aux when they are also compressed); everything else gets a
//! CCS, or an MCS when multisampled.

use crate::error::{SurfaceError, SurfaceKind, SurfaceResult};
use crate::resource::{size_surface, ResourceInfo};
use surface_layout_common::math::{align_up_np2, is_aligned};
use surface_layout_common::{
    GpuFlags, InfoFlags, Plane, SurfaceFlags, SurfaceFormat, TextureInfo, PAGE_SIZE,
};
use tracing::debug;

impl ResourceInfo {
    /// Prepares the aux descriptors from the freshly copied primary descriptor.
    pub(crate) fn prepare_aux(&mut self) {
        let surf = &self.surf;
        if !surf.flags.has_unified_aux() {
            return;
        }

        if surf.flags.is_depth() && surf.flags.is_hiz() {
            self.aux_surf = aux_descriptor(surf, GpuFlags::HIZ, SurfaceFormat::R16Unorm);
            if surf.flags.is_ccs() {
                self.aux_sec_surf = aux_descriptor(surf, GpuFlags::CCS, surf.format);
            }
        } else {
            let role = if surf.samples() > 1 {
                GpuFlags::MCS
            } else {
                GpuFlags::CCS
            };
            self.aux_surf = aux_descriptor(surf, role, surf.format);
        }
    }

    /// Sizes the aux surfaces and appends clear color and flip-chain padding.
    pub(crate) fn compose_aux(&mut self) -> SurfaceResult<()> {
        let context = self.context.clone();
        let platform = context.platform();
        let calc = context.texture_calc();

        let (ccs, kind) = if self.aux_sec_surf.is_valid() {
            (&mut self.aux_sec_surf, SurfaceKind::SecondaryAux)
        } else {
            (&mut self.aux_surf, SurfaceKind::Aux)
        };
        calc.fill_tex_ccs(platform, &self.surf, ccs)
            .map_err(|source| SurfaceError::Sizing {
                surface: kind,
                source,
            })?;

        if self.aux_surf.size == 0 {
            size_surface(&context, &mut self.aux_surf, SurfaceKind::Aux)?;
        }

        if self.aux_surf.flags.has_redescribed_planes() {
            let planes = if self.surf.format.is_uv_packed() { 2 } else { 3 };
            for &plane in Plane::first(planes) {
                size_surface(
                    &context,
                    &mut self.plane_aux_surf[plane.index()],
                    SurfaceKind::PlaneAux(plane),
                )?;
            }
            self.readjust_plane_properties(true)?;
        }

        self.aux_surf.unpadded_size = self.aux_surf.size;

        if self.surf.flags.has_indirect_clear_color() {
            self.aux_surf.cc_size = PAGE_SIZE;
            self.aux_surf.size += PAGE_SIZE;
        }

        // Multiple aux surfaces are never displayed, so the secondary aux is left out.
        let displayed = self.surf.size + self.aux_surf.size;
        let tile_row = self.surf.pitch * self.surf.tile_info(platform).logical_tile_height as u64;
        if self.surf.flags.is_flip_chain() && tile_row != 0 && displayed % tile_row != 0 {
            self.aux_surf.size += align_up_np2(displayed, tile_row) - displayed;
        }

        let total = self.total_size();
        let max = platform.surface_max_size();
        if total > max {
            return Err(SurfaceError::SurfaceTooLarge { size: total, max });
        }

        debug!(
            aux_flags = ?self.aux_surf.flags.gpu,
            aux_size = self.aux_surf.size,
            aux_unpadded_size = self.aux_surf.unpadded_size,
            clear_color_size = self.aux_surf.cc_size,
            secondary_aux_size = self.aux_sec_surf.size,
            page_aligned = is_aligned(total, PAGE_SIZE),
            "aux surface composed"
        );
        Ok(())
    }
}

fn aux_descriptor(surf: &TextureInfo, role: GpuFlags, format: SurfaceFormat) -> TextureInfo {
    TextureInfo {
        resource_type: surf.resource_type,
        format,
        bits_per_pixel: format.bits_per_pixel(),
        flags: SurfaceFlags::new(role, InfoFlags::TILED_Y),
        base_width: surf.base_width,
        base_height: surf.base_height,
        depth: surf.depth,
        array_size: surf.array_size,
        max_lod: surf.max_lod,
        num_samples: surf.num_samples,
        ..TextureInfo::default()
    }
}

#[cfg(test)]
mod tests {
    use crate::test_prelude::*;
    use surface_layout_common::math::is_aligned;

    fn compressed(gpu: GpuFlags) -> CreateParams {
        CreateParams::builder(ResourceType::Texture2D, SurfaceFormat::R8G8B8A8Unorm)
            .width(300)
            .height(200)
            .info_flags(InfoFlags::TILED_Y)
            .gpu_flags(GpuFlags::RENDER_TARGET | GpuFlags::UNIFIED_AUX_SURFACE | gpu)
            .build()
    }

    #[test]
    fn single_sampled_surfaces_get_a_ccs() {
        let resource = create(&compressed(GpuFlags::empty()));
        let aux = resource.aux_surface();
        assert!(aux.flags.is_ccs());
        assert!(aux.flags.is_non_msaa_tiled_y_ccs());
        assert!(aux.size > 0);
        assert_eq!(aux.unpadded_size, aux.size);
        assert_eq!(aux.cc_size, 0);
        assert!(!resource.secondary_aux_surface().is_valid());
    }

    #[test]
    fn multisampled_surfaces_get_an_mcs() {
        let params = CreateParams {
            num_samples: 4,
            ..compressed(GpuFlags::empty())
        };
        let resource = create(&params);
        let aux = resource.aux_surface();
        assert!(aux.flags.is_mcs());
        assert!(aux.flags.is_msaa_tiled_mcs());
        assert_eq!(aux.format, SurfaceFormat::R8Uint);
        assert!(aux.size > 0);
    }

    #[test]
    fn indirect_clear_color_appends_a_page() {
        let plain = create(&compressed(GpuFlags::empty()));
        let with_clear = create(&compressed(GpuFlags::INDIRECT_CLEAR_COLOR));
        let aux = with_clear.aux_surface();
        assert_eq!(aux.cc_size, PAGE_SIZE);
        assert_eq!(aux.size, plain.aux_surface().size + PAGE_SIZE);
        assert_eq!(aux.unpadded_size, plain.aux_surface().size);
    }

    #[test]
    fn flip_chain_aligns_to_a_tile_row() {
        let resource = create(&compressed(GpuFlags::FLIP_CHAIN | GpuFlags::INDIRECT_CLEAR_COLOR));
        let tile_row = resource.pitch() * 32;
        let displayed = resource.size_main_surface() + resource.size_aux_surface();
        assert_eq!(displayed % tile_row, 0);
        assert!(resource.size_aux_surface() >= resource.aux_surface().unpadded_size + PAGE_SIZE);
    }

    #[test]
    fn hiz_depth_with_ccs_uses_both_aux_surfaces() {
        let params = CreateParams::builder(ResourceType::Texture2D, SurfaceFormat::D32Float)
            .width(128)
            .height(64)
            .info_flags(InfoFlags::TILED_Y)
            .gpu_flags(
                GpuFlags::DEPTH | GpuFlags::HIZ | GpuFlags::CCS | GpuFlags::UNIFIED_AUX_SURFACE,
            )
            .build();
        let resource = create(&params);
        assert!(resource.aux_surface().flags.is_hiz());
        assert!(resource.aux_surface().size > 0);
        assert!(resource.secondary_aux_surface().flags.is_ccs());
        assert!(resource.secondary_aux_surface().size > 0);
        assert_eq!(
            resource.total_size(),
            resource.size_main_surface()
                + resource.aux_surface().size
                + resource.secondary_aux_surface().size
        );
        assert!(is_aligned(resource.aux_surface().size, 4096));
    }
}
