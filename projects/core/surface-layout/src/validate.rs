//! Creation parameter rules.

use crate::error::ValidationError;
use surface_layout_common::math::log2;
use surface_layout_common::tile::bpe_index;
use surface_layout_common::{
    PlatformInfo, ResourceType, SkuFeatures, TextureInfo, Tiling, MAX_MIP_LEVELS,
};

/// Checks the shape and flags of a freshly copied primary descriptor against the platform.
pub(crate) fn validate(platform: &PlatformInfo, tex: &TextureInfo) -> Result<(), ValidationError> {
    if !tex.is_valid() {
        return Err(ValidationError::InvalidResourceType);
    }
    if tex.bits_per_pixel == 0 {
        return Err(ValidationError::InvalidFormat(tex.format));
    }

    validate_shape(tex)?;
    validate_mips(platform, tex)?;
    validate_samples(tex)?;
    validate_tiling(platform, tex)?;

    let flags = &tex.flags;
    if tex.format.is_planar() && tex.resource_type != ResourceType::Texture2D {
        return Err(ValidationError::PlanarNot2D(tex.resource_type));
    }
    if flags.has_redescribed_planes() && !tex.format.is_planar() {
        return Err(ValidationError::RedescribedPlanesRequirePlanar(tex.format));
    }
    if flags.has_unified_aux() && !flags.is_tiled() {
        return Err(ValidationError::UnifiedAuxRequiresTiling);
    }
    Ok(())
}

fn validate_shape(tex: &TextureInfo) -> Result<(), ValidationError> {
    if tex.base_width == 0 || tex.base_height == 0 || tex.depth == 0 || tex.array_size == 0 {
        return Err(ValidationError::ZeroDimension);
    }
    match tex.resource_type {
        ResourceType::Texture1D if tex.base_height != 1 => {
            Err(ValidationError::OneDimensionalHeight(tex.base_height))
        }
        ResourceType::Cube if tex.base_width != tex.base_height as u64 => {
            Err(ValidationError::CubeNotSquare {
                width: tex.base_width,
                height: tex.base_height,
            })
        }
        ResourceType::Texture3D if tex.array_size > 1 => {
            Err(ValidationError::VolumeArray(tex.array_size))
        }
        _ => Ok(()),
    }
}

fn validate_mips(platform: &PlatformInfo, tex: &TextureInfo) -> Result<(), ValidationError> {
    let largest = match tex.resource_type {
        ResourceType::Texture1D => tex.base_width,
        ResourceType::Texture3D => tex
            .base_width
            .max(tex.base_height as u64)
            .max(tex.depth as u64),
        _ => tex.base_width.max(tex.base_height as u64),
    };
    let limit = platform
        .max_lod()
        .min(MAX_MIP_LEVELS as u32 - 1)
        .min(log2(largest));
    if tex.max_lod > limit {
        return Err(ValidationError::MaxLodTooLarge {
            max_lod: tex.max_lod,
            limit,
        });
    }
    Ok(())
}

fn validate_samples(tex: &TextureInfo) -> Result<(), ValidationError> {
    match tex.num_samples {
        0 | 1 => Ok(()),
        2 | 4 | 8 | 16 => {
            let two_d = matches!(
                tex.resource_type,
                ResourceType::Texture2D | ResourceType::Primary
            );
            if two_d && tex.max_lod == 0 {
                Ok(())
            } else {
                Err(ValidationError::UnsupportedMultisampling)
            }
        }
        samples => Err(ValidationError::InvalidSampleCount(samples)),
    }
}

fn validate_tiling(platform: &PlatformInfo, tex: &TextureInfo) -> Result<(), ValidationError> {
    let flags = &tex.flags;
    if flags.requested_tilings() > 1 && !is_tiled_resource_over_y(tex) {
        return Err(ValidationError::MultipleTilings);
    }

    match flags.tiling() {
        Tiling::Yf | Tiling::Ys => {
            if !platform.has_feature(SkuFeatures::TILED_RESOURCES) {
                return Err(ValidationError::TiledResourcesUnsupported);
            }
            if bpe_index(tex.bits_per_pixel).is_none() {
                return Err(ValidationError::TiledResourceBitsPerPixel(tex.bits_per_pixel));
            }
        }
        Tiling::W => {
            if !flags.is_separate_stencil() {
                return Err(ValidationError::TiledWRequiresSeparateStencil);
            }
            if tex.resource_type == ResourceType::Texture3D {
                return Err(ValidationError::TiledWVolume);
            }
        }
        Tiling::Linear | Tiling::X | Tiling::Y => {}
    }

    if flags.uses_std_swizzle() && !flags.is_tiled_resource_tiling() {
        return Err(ValidationError::StdSwizzleRequiresTiledResource);
    }
    Ok(())
}

/// Yf and Ys are refinements of Y tiling, so `TILED_Y | TILED_YS` names a single tiling.
fn is_tiled_resource_over_y(tex: &TextureInfo) -> bool {
    use surface_layout_common::InfoFlags;
    let tilings = tex.flags.info
        & (InfoFlags::TILED_W
            | InfoFlags::TILED_X
            | InfoFlags::TILED_Y
            | InfoFlags::TILED_YF
            | InfoFlags::TILED_YS);
    tilings == InfoFlags::TILED_Y | InfoFlags::TILED_YF
        || tilings == InfoFlags::TILED_Y | InfoFlags::TILED_YS
}
