//! CCS and MCS aux surface descriptions.
//!
//! A CCS compresses a block of main surface pixels into one CCS element: horizontally
//! `1024 / bits per pixel` pixels, vertically 16 rows. The CCS is always Y tiled and covers the
//! padded main surface, so it is derived from the sized surface rather than from its shape.

use crate::alignment::Geometry;
use crate::layout::layout_surface;
use surface_layout_common::math::align_up;
use surface_layout_common::texture::CcsScale;
use surface_layout_common::{
    GpuFlags, InfoFlags, PlatformInfo, SurfaceFlags, SurfaceFormat, TextureCalcError,
    TextureInfo, TileMode, PAGE_SIZE,
};
use tracing::debug;

const CCS_PITCH_ALIGNMENT: u64 = 128;
const CCS_HEIGHT_ALIGNMENT: u64 = 32;
const CCS_BLOCK_HEIGHT: u32 = 16;

/// Describes the aux surface `aux` of the sized surface `surf`.
pub(crate) fn fill_tex_ccs(
    platform: &PlatformInfo,
    surf: &TextureInfo,
    aux: &mut TextureInfo,
) -> Result<(), TextureCalcError> {
    if aux.flags.is_hiz() {
        // Sized like a regular surface once the engine runs the calculator on it.
        return Ok(());
    }

    if aux.flags.is_mcs() {
        let format = mcs_format(surf.samples());
        aux.format = format;
        aux.bits_per_pixel = format.bits_per_pixel();
        aux.num_samples = 1;
        aux.flags.gpu.insert(GpuFlags::MSAA_TILED_MCS);
        aux.size = 0;
        debug!(samples = surf.samples(), format = ?format, "mcs described");
        return Ok(());
    }

    aux.flags.gpu.insert(GpuFlags::NON_MSAA_TILED_Y_CCS);
    if surf.flags.has_redescribed_planes() {
        aux.flags.info.insert(InfoFlags::REDESCRIBED_PLANES);
    }
    describe_ccs(platform, surf, aux);
    Ok(())
}

/// Marks single-sampled color CCS descriptors before they are sized.
pub(crate) fn pre_process_tex_special_cases(tex: &mut TextureInfo) {
    let flags = &tex.flags;
    if flags.is_ccs() && !flags.is_depth() && !flags.is_hiz() {
        tex.flags.gpu.insert(GpuFlags::NON_MSAA_TILED_Y_CCS);
    }
}

/// Sizes a CCS descriptor that was not filled from its main surface, by laying out the main
/// surface it shadows first.
pub(crate) fn allocate_ccs(
    platform: &PlatformInfo,
    tex: &mut TextureInfo,
) -> Result<(), TextureCalcError> {
    let mut main = tex.clone();
    main.flags.gpu.remove(GpuFlags::CCS | GpuFlags::NON_MSAA_TILED_Y_CCS);
    layout_surface(platform, &mut main)?;
    describe_ccs(platform, &main, tex);
    Ok(())
}

fn mcs_format(samples: u32) -> SurfaceFormat {
    match samples {
        8 => SurfaceFormat::R32Uint,
        16 => SurfaceFormat::R32G32Float,
        _ => SurfaceFormat::R8Uint,
    }
}

/// Writes the CCS layout covering the sized surface `main` into `ccs`.
fn describe_ccs(platform: &PlatformInfo, main: &TextureInfo, ccs: &mut TextureInfo) {
    let geometry = Geometry::new(platform, main);
    let scale = CcsScale {
        width: 1024 / main.bits_per_pixel.max(8),
        height: CCS_BLOCK_HEIGHT,
    };

    let width = main.pitch / geometry.bytes_per_element as u64 * geometry.block.width as u64;
    let height = main.size / main.pitch.max(1) * geometry.block.height as u64;
    let pitch = align_up(width.div_ceil(scale.width as u64), CCS_PITCH_ALIGNMENT);
    let rows = align_up(height.div_ceil(scale.height as u64), CCS_HEIGHT_ALIGNMENT);

    ccs.tile_mode = TileMode::TileY;
    ccs.flags = SurfaceFlags::new(ccs.flags.gpu, (ccs.flags.info - tilings()) | InfoFlags::TILED_Y);
    ccs.pitch = pitch;
    ccs.size = pitch * rows;
    ccs.unpadded_size = ccs.size;
    ccs.ccs_scale = scale;
    ccs.alignment.base_alignment = PAGE_SIZE as u32;
    ccs.alignment.h_align = main.alignment.h_align;
    ccs.alignment.v_align = main.alignment.v_align;
    ccs.alignment.d_align = 1;
    ccs.alignment.qpitch = main.alignment.qpitch;
    ccs.alignment.mip_tail_start_lod = None;

    debug!(
        main_pitch = main.pitch,
        main_size = main.size,
        ccs_pitch = pitch,
        ccs_size = ccs.size,
        "ccs described"
    );
}

fn tilings() -> InfoFlags {
    InfoFlags::LINEAR
        | InfoFlags::TILED_W
        | InfoFlags::TILED_X
        | InfoFlags::TILED_Y
        | InfoFlags::TILED_YF
        | InfoFlags::TILED_YS
        | InfoFlags::STD_SWIZZLE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    fn sized(format: SurfaceFormat, width: u64, height: u32) -> TextureInfo {
        let mut tex = texture(ResourceType::Texture2D, format, width, height, InfoFlags::TILED_Y);
        tex.flags.gpu = GpuFlags::RENDER_TARGET | GpuFlags::UNIFIED_AUX_SURFACE;
        layout_surface(&PlatformInfo::gen9(), &mut tex).unwrap();
        tex
    }

    fn aux_of(surf: &TextureInfo, role: GpuFlags) -> TextureInfo {
        let mut aux = surf.clone();
        aux.flags = SurfaceFlags::new(role, InfoFlags::TILED_Y);
        aux.size = 0;
        aux
    }

    #[test]
    fn ccs_covers_the_padded_surface() {
        let surf = sized(SurfaceFormat::R8G8B8A8Unorm, 1024, 256);
        let mut ccs = aux_of(&surf, GpuFlags::CCS);
        fill_tex_ccs(&PlatformInfo::gen9(), &surf, &mut ccs).unwrap();

        assert!(ccs.flags.is_non_msaa_tiled_y_ccs());
        assert_eq!(ccs.ccs_scale, CcsScale { width: 32, height: 16 });
        assert_eq!(ccs.tile_mode, TileMode::TileY);
        // 1024 / 32 = 32 bytes per row, padded to 128; 16 rows padded to 32.
        assert_eq!(ccs.pitch, 128);
        assert_eq!(ccs.size, 128 * 32);
    }

    #[rstest]
    #[case(2, SurfaceFormat::R8Uint)]
    #[case(4, SurfaceFormat::R8Uint)]
    #[case(8, SurfaceFormat::R32Uint)]
    #[case(16, SurfaceFormat::R32G32Float)]
    fn mcs_format_follows_the_sample_count(#[case] samples: u32, #[case] format: SurfaceFormat) {
        let mut surf = sized(SurfaceFormat::R8G8B8A8Unorm, 64, 64);
        surf.num_samples = samples;
        let mut mcs = aux_of(&surf, GpuFlags::MCS);
        fill_tex_ccs(&PlatformInfo::gen9(), &surf, &mut mcs).unwrap();

        assert_eq!(mcs.format, format);
        assert_eq!(mcs.bits_per_pixel, format.bits_per_pixel());
        assert_eq!(mcs.num_samples, 1);
        assert!(mcs.flags.is_msaa_tiled_mcs());
        assert_eq!(mcs.size, 0);
    }

    #[test]
    fn hiz_is_left_to_the_regular_sizing() {
        let surf = sized(SurfaceFormat::D32Float, 64, 64);
        let mut hiz = aux_of(&surf, GpuFlags::HIZ);
        let before = hiz.clone();
        fill_tex_ccs(&PlatformInfo::gen9(), &surf, &mut hiz).unwrap();
        assert_eq!(hiz, before);
    }

    #[test]
    fn planar_ccs_is_marked_redescribed() {
        let mut surf = sized(SurfaceFormat::Nv12, 256, 128);
        surf.flags.info.insert(InfoFlags::REDESCRIBED_PLANES);
        let mut ccs = aux_of(&surf, GpuFlags::CCS);
        fill_tex_ccs(&PlatformInfo::gen9(), &surf, &mut ccs).unwrap();
        assert!(ccs.flags.has_redescribed_planes());
    }

    #[rstest]
    #[case(GpuFlags::CCS, true)]
    #[case(GpuFlags::CCS | GpuFlags::DEPTH, false)]
    #[case(GpuFlags::CCS | GpuFlags::HIZ, false)]
    #[case(GpuFlags::RENDER_TARGET, false)]
    fn only_color_ccs_is_marked(#[case] gpu: GpuFlags, #[case] marked: bool) {
        let mut tex = texture(
            ResourceType::Texture2D,
            SurfaceFormat::R8Unorm,
            64,
            64,
            InfoFlags::TILED_Y,
        );
        tex.flags.gpu = gpu;
        pre_process_tex_special_cases(&mut tex);
        assert_eq!(tex.flags.is_non_msaa_tiled_y_ccs(), marked);
    }

    #[test]
    fn standalone_ccs_lays_out_its_main_surface() {
        let platform = PlatformInfo::gen9();
        let surf = sized(SurfaceFormat::R8Unorm, 512, 128);
        let mut filled = aux_of(&surf, GpuFlags::CCS);
        fill_tex_ccs(&platform, &surf, &mut filled).unwrap();

        let mut standalone = aux_of(&surf, GpuFlags::CCS);
        pre_process_tex_special_cases(&mut standalone);
        allocate_ccs(&platform, &mut standalone).unwrap();
        assert_eq!(standalone.size, filled.size);
        assert_eq!(standalone.ccs_scale, filled.ccs_scale);
    }
}
