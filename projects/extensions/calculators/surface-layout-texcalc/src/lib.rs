#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
pub mod test_prelude;

mod alignment;
mod aux;
mod layout;
mod offsets;

use surface_layout_common::{
    OffsetRequest, PlatformInfo, ResolvedOffset, TextureCalc, TextureCalcError, TextureInfo,
};

/// Texture calculator for Gen9-class render cores.
///
/// Stateless; all platform differences come from the [`PlatformInfo`] passed to each call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gen9TextureCalc;

impl TextureCalc for Gen9TextureCalc {
    fn allocate_texture(
        &self,
        platform: &PlatformInfo,
        tex: &mut TextureInfo,
    ) -> Result<(), TextureCalcError> {
        if tex.flags.is_non_msaa_tiled_y_ccs() {
            aux::allocate_ccs(platform, tex)
        } else {
            layout::layout_surface(platform, tex)
        }
    }

    fn fill_tex_ccs(
        &self,
        platform: &PlatformInfo,
        surf: &TextureInfo,
        aux: &mut TextureInfo,
    ) -> Result<(), TextureCalcError> {
        aux::fill_tex_ccs(platform, surf, aux)
    }

    fn pre_process_tex_special_cases(
        &self,
        _platform: &PlatformInfo,
        tex: &mut TextureInfo,
    ) -> Result<(), TextureCalcError> {
        aux::pre_process_tex_special_cases(tex);
        Ok(())
    }

    fn align_tex_height_width(
        &self,
        platform: &PlatformInfo,
        tex: &TextureInfo,
        height: &mut u32,
        width: &mut u32,
    ) {
        offsets::align_tex_height_width(platform, tex, height, width)
    }

    fn mip_map_offset(
        &self,
        platform: &PlatformInfo,
        tex: &TextureInfo,
        request: &OffsetRequest,
    ) -> Result<ResolvedOffset, TextureCalcError> {
        offsets::mip_map_offset(platform, tex, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn plane_ccs_is_sized_from_its_shape() {
        let platform = PlatformInfo::gen9();
        let mut ccs = texture(
            ResourceType::Texture2D,
            SurfaceFormat::R8Unorm,
            512,
            256,
            InfoFlags::TILED_Y,
        );
        ccs.flags.gpu = GpuFlags::CCS;
        Gen9TextureCalc
            .pre_process_tex_special_cases(&platform, &mut ccs)
            .unwrap();
        Gen9TextureCalc.allocate_texture(&platform, &mut ccs).unwrap();

        // 512 bytes of main surface per row at 128 pixels per CCS byte.
        assert_eq!(ccs.ccs_scale.width, 128);
        assert_eq!(ccs.pitch, 128);
        assert_eq!(ccs.size, 128 * 32);
        assert_eq!(ccs.tile_mode, TileMode::TileY);
    }

    #[test]
    fn boxed_calculators_delegate() {
        let platform = PlatformInfo::gen9();
        let calc: Box<dyn TextureCalc> = Box::new(Gen9TextureCalc);
        let mut tex = texture(
            ResourceType::Texture2D,
            SurfaceFormat::R8Unorm,
            64,
            64,
            InfoFlags::TILED_Y,
        );
        calc.allocate_texture(&platform, &mut tex).unwrap();
        assert_eq!(tex.size, 8 * 1024);
    }

    #[test]
    fn invalid_descriptors_are_rejected() {
        let platform = PlatformInfo::gen9();
        let mut tex = texture(
            ResourceType::Texture2D,
            SurfaceFormat::Invalid,
            64,
            64,
            InfoFlags::TILED_Y,
        );
        assert_eq!(
            Gen9TextureCalc.allocate_texture(&platform, &mut tex),
            Err(TextureCalcError::InvalidFormat(SurfaceFormat::Invalid))
        );
        let mut tex = texture(
            ResourceType::Invalid,
            SurfaceFormat::R8Unorm,
            64,
            64,
            InfoFlags::TILED_Y,
        );
        assert!(matches!(
            Gen9TextureCalc.allocate_texture(&platform, &mut tex),
            Err(TextureCalcError::UnsupportedResourceType(_))
        ));
    }
}
