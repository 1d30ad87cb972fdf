//! The interface of a per-platform texture sizing calculator.

use crate::error::TextureCalcError;
use crate::format::{BlockDimensions, SurfaceFormat};
use crate::math::align_up_np2;
use crate::offset::{OffsetRequest, ResolvedOffset};
use crate::platform::PlatformInfo;
use crate::texture::TextureInfo;
use alloc::boxed::Box;

/// Computes the hardware layout of a surface from its shape and tiling.
///
/// The engine owns orchestration (validation, planes, aux composition, system memory), while an
/// implementation of this trait owns the platform specific sizing rules.
pub trait TextureCalc {
    /// Computes tile mode, pitch, size, alignment and sub-resource origins of `tex`.
    fn allocate_texture(
        &self,
        platform: &PlatformInfo,
        tex: &mut TextureInfo,
    ) -> Result<(), TextureCalcError>;

    /// Describes the CCS, MCS or HiZ aux surface of `surf` into `aux`.
    ///
    /// Implementations may fully size `aux`, or leave `aux.size` at zero so that
    /// [`allocate_texture`](Self::allocate_texture) runs on it afterwards.
    fn fill_tex_ccs(
        &self,
        platform: &PlatformInfo,
        surf: &TextureInfo,
        aux: &mut TextureInfo,
    ) -> Result<(), TextureCalcError>;

    /// Adjusts a descriptor before sizing, e.g. turning a plane copy into its aux surface.
    fn pre_process_tex_special_cases(
        &self,
        platform: &PlatformInfo,
        tex: &mut TextureInfo,
    ) -> Result<(), TextureCalcError>;

    /// Aligns a mip's height and width and converts them to element units.
    fn align_tex_height_width(
        &self,
        platform: &PlatformInfo,
        tex: &TextureInfo,
        height: &mut u32,
        width: &mut u32,
    );

    /// Resolves the offset of a sub-resource of `tex` in the requested view.
    fn mip_map_offset(
        &self,
        platform: &PlatformInfo,
        tex: &TextureInfo,
        request: &OffsetRequest,
    ) -> Result<ResolvedOffset, TextureCalcError>;

    /// Compression block dimensions of `format`.
    fn compression_block_dimensions(&self, format: SurfaceFormat) -> BlockDimensions {
        format.info().block
    }

    /// Maps a main surface width onto the CCS aux surface `aux`.
    fn scale_texture_width(&self, aux: &TextureInfo, width: u32) -> u32 {
        match aux.ccs_scale.width {
            0 => width,
            divisor => width.div_ceil(divisor),
        }
    }

    /// Maps a main surface height onto the CCS aux surface `aux`.
    fn scale_texture_height(&self, aux: &TextureInfo, height: u32) -> u32 {
        match aux.ccs_scale.height {
            0 => height,
            divisor => height.div_ceil(divisor),
        }
    }

    /// Aligns `width` to `unit_alignment` and applies the interleaved MSAA expansion of depth
    /// and stencil surfaces.
    fn expand_width(&self, tex: &TextureInfo, width: u32, unit_alignment: u32) -> u32 {
        let aligned = align_up_np2(width as u64, unit_alignment.max(1) as u64) as u32;
        aligned * msaa_expansion(tex).0
    }

    /// Height counterpart of [`expand_width`](Self::expand_width).
    fn expand_height(&self, tex: &TextureInfo, height: u32, unit_alignment: u32) -> u32 {
        let aligned = align_up_np2(height as u64, unit_alignment.max(1) as u64) as u32;
        aligned * msaa_expansion(tex).1
    }
}

/// Width and height multipliers of interleaved (depth/stencil) MSAA.
///
/// Colour surfaces store samples as extra array slices instead and are never expanded.
pub fn msaa_expansion(tex: &TextureInfo) -> (u32, u32) {
    let interleaved = tex.flags.is_depth() || tex.flags.is_separate_stencil();
    if !interleaved {
        return (1, 1);
    }
    match tex.samples() {
        2 => (2, 1),
        4 => (2, 2),
        8 => (4, 2),
        16 => (4, 4),
        _ => (1, 1),
    }
}

impl<T: TextureCalc + ?Sized> TextureCalc for Box<T> {
    fn allocate_texture(
        &self,
        platform: &PlatformInfo,
        tex: &mut TextureInfo,
    ) -> Result<(), TextureCalcError> {
        (**self).allocate_texture(platform, tex)
    }

    fn fill_tex_ccs(
        &self,
        platform: &PlatformInfo,
        surf: &TextureInfo,
        aux: &mut TextureInfo,
    ) -> Result<(), TextureCalcError> {
        (**self).fill_tex_ccs(platform, surf, aux)
    }

    fn pre_process_tex_special_cases(
        &self,
        platform: &PlatformInfo,
        tex: &mut TextureInfo,
    ) -> Result<(), TextureCalcError> {
        (**self).pre_process_tex_special_cases(platform, tex)
    }

    fn align_tex_height_width(
        &self,
        platform: &PlatformInfo,
        tex: &TextureInfo,
        height: &mut u32,
        width: &mut u32,
    ) {
        (**self).align_tex_height_width(platform, tex, height, width)
    }

    fn mip_map_offset(
        &self,
        platform: &PlatformInfo,
        tex: &TextureInfo,
        request: &OffsetRequest,
    ) -> Result<ResolvedOffset, TextureCalcError> {
        (**self).mip_map_offset(platform, tex, request)
    }

    fn compression_block_dimensions(&self, format: SurfaceFormat) -> BlockDimensions {
        (**self).compression_block_dimensions(format)
    }

    fn scale_texture_width(&self, aux: &TextureInfo, width: u32) -> u32 {
        (**self).scale_texture_width(aux, width)
    }

    fn scale_texture_height(&self, aux: &TextureInfo, height: u32) -> u32 {
        (**self).scale_texture_height(aux, height)
    }

    fn expand_width(&self, tex: &TextureInfo, width: u32, unit_alignment: u32) -> u32 {
        (**self).expand_width(tex, width, unit_alignment)
    }

    fn expand_height(&self, tex: &TextureInfo, height: u32, unit_alignment: u32) -> u32 {
        (**self).expand_height(tex, height, unit_alignment)
    }
}
