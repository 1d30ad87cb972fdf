//! Padding, QPitch and mip packing queries.

use crate::resource::ResourceInfo;
use surface_layout_common::math::{align_up, align_up_u32, is_aligned};
use surface_layout_common::{RenderCore, ResourceType, SkuFeatures, TileMode, SIZE_64KB};

/// Mip tail packing of a tiled resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MipPacking {
    /// Number of mip levels packed into the tail.
    pub num_packed_mips: u32,
    /// Number of tiles the packed mips occupy.
    pub num_tiles_for_packed_mips: u32,
}

impl ResourceInfo {
    /// Returns true if the resource may be placed in 64KB pages.
    ///
    /// The size considered is the natural size of the primary and every aux surface.
    pub fn is_64kb_page_suitable(&self) -> bool {
        let platform = self.platform();
        let flags = &self.surf.flags;
        let size = self.total_size();
        debug_assert!(size != 0);

        let exempt = flags.is_existing_sys_mem()
            || flags.is_cross_adapter()
            || flags.is_camera_capture()
            || flags.is_kernel_mode_mapped()
            || (flags.is_non_dx_s3d() && !platform.has_feature(SkuFeatures::DISPLAY_ENGINE_S3D));
        if exempt || !platform.has_feature(SkuFeatures::WDDM2_1_64KB_PAGES) {
            return false;
        }

        let base_alignment = self.surf.alignment.base_alignment as u64;
        let alignment_divides_64kb = is_aligned(base_alignment, SIZE_64KB)
            || matches!(base_alignment, 0x8000 | 0x4000 | 0x2000 | 0x1000);
        if !alignment_divides_64kb {
            return false;
        }

        if flags.allows_optimization_padding() {
            let percent = platform.allowed_padding_for_64kb_pages_percentage() as u64;
            size * (100 + percent) / 100 >= align_up(size, SIZE_64KB)
        } else {
            is_aligned(size, SIZE_64KB)
        }
    }

    /// Width of `mip_level` padded to the horizontal alignment.
    ///
    /// Only defined for depth, separate stencil, CCS and HiZ surfaces, and for surfaces with an
    /// MCS or CCS aux surface.
    pub fn padded_width(&self, mip_level: u32) -> u32 {
        self.debug_assert_padding_query(mip_level);
        let calc = self.context.texture_calc();
        let surf = &self.surf;
        let ccs_aux = self.has_tiled_y_ccs_aux();

        let h_align = if ccs_aux {
            self.aux_surf.alignment.h_align
        } else {
            surf.alignment.h_align
        };
        let mip_width = surf.mip_width(mip_level) as u32;
        let mut width = calc.expand_width(surf, mip_width, h_align);

        if surf.flags.is_separate_stencil() {
            if surf.tile_mode == TileMode::TileW {
                width *= 2;
            }
            // Produces the width that matches the physical width once MSAA expanded again.
            width /= match surf.samples() {
                2 | 4 => 2,
                8 | 16 => 4,
                _ => 1,
            };
        }

        if ccs_aux {
            width = calc.scale_texture_width(&self.aux_surf, width);
        }
        width
    }

    /// Height of `mip_level` padded to the vertical alignment.
    ///
    /// Defined for the same surfaces as [`padded_width`](Self::padded_width).
    pub fn padded_height(&self, mip_level: u32) -> u32 {
        self.debug_assert_padding_query(mip_level);
        let calc = self.context.texture_calc();
        let surf = &self.surf;
        let ccs_aux = self.has_tiled_y_ccs_aux();

        let v_align = if ccs_aux {
            self.aux_surf.alignment.v_align
        } else {
            surf.alignment.v_align
        };
        let mut height = calc.expand_height(surf, surf.mip_height(mip_level), v_align);

        if surf.flags.is_separate_stencil() {
            if surf.tile_mode == TileMode::TileW {
                height /= 2;
            }
            height /= match surf.samples() {
                4 | 8 => 2,
                16 => 4,
                _ => 1,
            };
        }

        if ccs_aux {
            height = calc.scale_texture_height(&self.aux_surf, height);
        }
        height
    }

    /// Pitch of `mip_level` in bytes, from the padded width. CCS aux surfaces are 8 bits per
    /// pixel.
    pub fn padded_pitch(&self, mip_level: u32) -> u32 {
        let bits_per_pixel = if self.has_tiled_y_ccs_aux() {
            8
        } else {
            self.surf.bits_per_pixel
        };
        self.padded_width(mip_level) * bits_per_pixel / 8
    }

    /// Distance in rows between array slices, or between depth slices of a 3D surface.
    ///
    /// Compressed formats count rows of blocks, and HiZ surfaces report twice the base QPitch.
    pub fn qpitch(&self) -> u32 {
        let platform = self.platform();
        let surf = &self.surf;
        debug_assert!(platform.render_core() >= RenderCore::Gen8);
        debug_assert!(
            surf.resource_type != ResourceType::Texture3D
                || platform.render_core() >= RenderCore::Gen9
        );

        if platform.render_core() >= RenderCore::Gen9 && surf.format.is_compressed() {
            let block_height = self
                .context
                .texture_calc()
                .compression_block_dimensions(surf.format)
                .height;
            let qpitch = surf.alignment.qpitch / block_height;
            if surf.resource_type == ResourceType::Texture3D && !surf.tile_mode.is_linear() {
                align_up_u32(qpitch, surf.tile_info(platform).logical_tile_height)
            } else {
                qpitch
            }
        } else if surf.flags.is_hiz() {
            surf.alignment.qpitch * 2
        } else {
            surf.alignment.qpitch
        }
    }

    /// Number of packed mips and the tiles they occupy.
    pub fn tiled_resource_mip_packing(&self) -> MipPacking {
        let surf = &self.surf;
        if surf.max_lod == 0 {
            return MipPacking::default();
        }
        if !surf.flags.is_tiled_resource_tiling() {
            debug_assert!(false, "mip packing queried on a non tiled resource");
            return MipPacking::default();
        }
        match surf.alignment.mip_tail_start_lod {
            Some(start) => MipPacking {
                num_packed_mips: surf.max_lod - start + 1,
                num_tiles_for_packed_mips: 1,
            },
            None => MipPacking::default(),
        }
    }

    /// First mip level of the packed mip tail.
    pub fn packed_mip_tail_start_lod(&self) -> u32 {
        if self.surf.max_lod == 0 {
            return self.platform().max_lod();
        }
        let packing = self.tiled_resource_mip_packing();
        self.surf.max_lod - packing.num_packed_mips + 1
    }

    fn has_tiled_y_ccs_aux(&self) -> bool {
        self.aux_surf.flags.is_ccs() && self.aux_surf.flags.is_non_msaa_tiled_y_ccs()
    }

    fn debug_assert_padding_query(&self, mip_level: u32) {
        debug_assert!(mip_level <= self.surf.max_lod);
        debug_assert!(
            self.surf.flags.is_depth_class()
                || self.aux_surf.flags.is_msaa_tiled_mcs()
                || self.aux_surf.flags.is_ccs()
                || self.aux_surf.flags.is_non_msaa_tiled_y_ccs()
        );
    }
}
