//! [`ResourceInfo`]: the computed layout of one resource.
//!
//! Creation is a factory. [`ResourceInfo::create`] either returns a fully composed resource or an
//! error, never a partially described one. Once created, a resource is immutable and every query
//! reads the same layout.
//!
//! ## Creation pipeline
//!
//! 1. Tiled surfaces backed by existing system memory are rejected.
//! 2. The parameters are copied into the primary descriptor, and the aux descriptors are prepared
//!    when a unified aux surface is requested.
//! 3. The parameters are validated against the platform.
//! 4. The primary surface is sized by the [`TextureCalc`](surface_layout_common::TextureCalc).
//! 5. Planes are redescribed for planar formats that ask for it.
//! 6. The unified aux surface is composed.
//! 7. Existing system memory is set up.

use crate::context::SurfaceContext;
use crate::error::{SurfaceError, SurfaceKind, SurfaceResult};
use crate::params::CreateParams;
use crate::sys_mem::ExistingSysMem;
use crate::validate::validate;
use alloc::boxed::Box;
use surface_layout_common::{
    Plane, PlatformInfo, ResourceType, SurfaceFlags, SurfaceFormat, TextureInfo, TileMode,
    PAGE_SIZE,
};
use tracing::{debug, warn};

/// A created resource: the primary layout plus its aux, plane and system memory descriptors.
#[derive(Debug)]
pub struct ResourceInfo {
    pub(crate) context: SurfaceContext,
    pub(crate) surf: TextureInfo,
    pub(crate) aux_surf: TextureInfo,
    pub(crate) aux_sec_surf: TextureInfo,
    pub(crate) plane_surf: [TextureInfo; 3],
    pub(crate) plane_aux_surf: [TextureInfo; 3],
    pub(crate) existing_sys_mem: Option<ExistingSysMem>,
}

impl ResourceInfo {
    /// Computes the layout of the resource described by `params`.
    ///
    /// # Errors
    ///
    /// Returns an error if the parameters are invalid, if any descriptor cannot be sized, if the
    /// composed resource exceeds the platform's maximum size, or if its system memory cannot be
    /// set up. [`SurfaceError::status`] tells which of these are the caller's fault.
    pub fn create(context: &SurfaceContext, params: &CreateParams) -> SurfaceResult<Self> {
        Self::compose(context, params).inspect_err(|error| {
            warn!(
                %error,
                status = ?error.status(),
                format = ?params.format,
                width = params.base_width,
                height = params.base_height,
                "resource creation failed"
            );
        })
    }

    fn compose(context: &SurfaceContext, params: &CreateParams) -> SurfaceResult<Self> {
        if params.flags.is_existing_sys_mem() && params.flags.is_tiled() {
            return Err(SurfaceError::TiledExistingSysMem);
        }

        let mut resource = Self {
            context: context.clone(),
            surf: params.to_texture_info(),
            aux_surf: TextureInfo::default(),
            aux_sec_surf: TextureInfo::default(),
            plane_surf: Default::default(),
            plane_aux_surf: Default::default(),
            existing_sys_mem: None,
        };
        resource.prepare_aux();

        validate(context.platform(), &resource.surf)?;
        size_surface(context, &mut resource.surf, SurfaceKind::Primary)?;

        if resource.surf.flags.has_redescribed_planes() {
            resource
                .redescribe_planes()
                .map_err(|error| SurfaceError::PlaneRedescription(Box::new(error)))?;
        }

        if resource.surf.flags.has_unified_aux() {
            resource.compose_aux()?;
        }

        if resource.surf.flags.is_existing_sys_mem() {
            let restriction_alignment = resource.restriction_alignment();
            let sys_mem = match params.existing_sys_mem.filter(|region| region.is_provided()) {
                Some(region) => {
                    ExistingSysMem::provided(region, resource.surf.size, restriction_alignment)?
                }
                None => ExistingSysMem::allocate(
                    context.allocator(),
                    resource.surf.size,
                    restriction_alignment,
                )?,
            };
            resource.existing_sys_mem = Some(sys_mem);
        }

        debug!(
            resource_type = ?resource.surf.resource_type,
            format = ?resource.surf.format,
            tile_mode = ?resource.surf.tile_mode,
            pitch = resource.surf.pitch,
            size = resource.surf.size,
            aux_size = resource.aux_surf.size,
            "resource created"
        );
        Ok(resource)
    }

    /// The context the resource was created with.
    pub fn context(&self) -> &SurfaceContext {
        &self.context
    }

    /// The platform the resource was created for.
    pub fn platform(&self) -> &PlatformInfo {
        self.context.platform()
    }

    /// The primary surface layout.
    pub fn surface(&self) -> &TextureInfo {
        &self.surf
    }

    /// The primary aux surface layout. Invalid when no unified aux surface was requested.
    pub fn aux_surface(&self) -> &TextureInfo {
        &self.aux_surf
    }

    /// The secondary aux surface layout (CCS of a HiZ depth buffer), if any.
    pub fn secondary_aux_surface(&self) -> &TextureInfo {
        &self.aux_sec_surf
    }

    /// Layout of one plane of a surface with redescribed planes.
    pub fn plane(&self, plane: Plane) -> &TextureInfo {
        &self.plane_surf[plane.index()]
    }

    /// Aux layout of one plane of a surface with redescribed planes and a unified aux surface.
    pub fn plane_aux(&self, plane: Plane) -> &TextureInfo {
        &self.plane_aux_surf[plane.index()]
    }

    /// System memory backing the resource, if it asked for any.
    pub fn existing_sys_mem(&self) -> Option<&ExistingSysMem> {
        self.existing_sys_mem.as_ref()
    }

    /// Dimensionality.
    pub fn resource_type(&self) -> ResourceType {
        self.surf.resource_type
    }

    /// Pixel format.
    pub fn format(&self) -> SurfaceFormat {
        self.surf.format
    }

    /// Flags of the primary surface.
    pub fn flags(&self) -> SurfaceFlags {
        self.surf.flags
    }

    /// Selected tiling of the primary surface.
    pub fn tile_mode(&self) -> TileMode {
        self.surf.tile_mode
    }

    /// Bytes per row of the primary surface.
    pub fn pitch(&self) -> u64 {
        self.surf.pitch
    }

    /// Width of mip 0.
    pub fn base_width(&self) -> u64 {
        self.surf.base_width
    }

    /// Height of mip 0.
    pub fn base_height(&self) -> u32 {
        self.surf.base_height
    }

    /// Largest mip level index.
    pub fn max_lod(&self) -> u32 {
        self.surf.max_lod
    }

    /// Size of the primary surface.
    pub fn size_main_surface(&self) -> u64 {
        self.surf.size
    }

    /// Size of the primary aux surface, including clear color and flip-chain padding.
    pub fn size_aux_surface(&self) -> u64 {
        self.aux_surf.size
    }

    /// Size of the primary surface and every aux surface.
    pub fn total_size(&self) -> u64 {
        self.surf.size + self.aux_surf.size + self.aux_sec_surf.size
    }

    /// Required alignment of the allocation base.
    pub fn base_alignment(&self) -> u32 {
        self.surf.alignment.base_alignment
    }

    /// The alignment an allocation for this resource must honor: the base alignment, but never
    /// less than a page.
    pub fn restriction_alignment(&self) -> u64 {
        (self.surf.alignment.base_alignment as u64).max(PAGE_SIZE)
    }
}

/// Sizes `tex` with the context's calculator, tagging failures with the descriptor kind.
pub(crate) fn size_surface(
    context: &SurfaceContext,
    tex: &mut TextureInfo,
    surface: SurfaceKind,
) -> SurfaceResult<()> {
    context
        .texture_calc()
        .allocate_texture(context.platform(), tex)
        .map_err(|source| SurfaceError::Sizing { surface, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(InfoFlags::TILED_Y)]
    #[case(InfoFlags::TILED_X)]
    #[case(InfoFlags::TILED_W)]
    #[case(InfoFlags::TILED_YS)]
    fn tiled_existing_sys_mem_is_rejected(#[case] tiling: InfoFlags) {
        let params = CreateParams::builder(ResourceType::Texture2D, SurfaceFormat::R8G8B8A8Unorm)
            .width(64)
            .height(64)
            .info_flags(tiling)
            .existing_sys_mem(0x10000, 0x100000)
            .build();
        let error = ResourceInfo::create(&gen9(), &params).unwrap_err();
        assert_eq!(error, SurfaceError::TiledExistingSysMem);
        assert_eq!(error.status(), Status::InvalidParam);
    }

    #[test]
    fn validation_failures_are_invalid_params() {
        let params = CreateParams::builder(ResourceType::Texture2D, SurfaceFormat::R8Unorm)
            .width(0)
            .build();
        let error = ResourceInfo::create(&gen9(), &params).unwrap_err();
        assert_eq!(error, SurfaceError::Validation(ValidationError::ZeroDimension));
        assert_eq!(error.status(), Status::InvalidParam);
    }

    #[test]
    fn tiled_y_surface() {
        let resource = create(
            &CreateParams::builder(ResourceType::Texture2D, SurfaceFormat::R8G8B8A8Unorm)
                .width(100)
                .height(50)
                .info_flags(InfoFlags::TILED_Y)
                .build(),
        );
        assert_eq!(resource.tile_mode(), TileMode::TileY);
        assert_eq!(resource.pitch(), 512);
        assert_eq!(resource.size_main_surface(), 512 * 64);
        assert_eq!(resource.total_size(), resource.size_main_surface());
        assert!(!resource.aux_surface().is_valid());
        assert_eq!(resource.restriction_alignment(), PAGE_SIZE);
    }

    #[test]
    fn size_limit_is_an_error() {
        let platform = surface_layout_common::PlatformInfoBuilder::new(
            surface_layout_common::RenderCore::Gen9,
        )
        .surface_max_size(4096)
        .build();
        let params = CreateParams::builder(ResourceType::Texture2D, SurfaceFormat::R8G8B8A8Unorm)
            .width(256)
            .height(256)
            .info_flags(InfoFlags::TILED_Y)
            .build();
        let error = ResourceInfo::create(&context(platform), &params).unwrap_err();
        assert!(matches!(
            error,
            SurfaceError::Sizing {
                surface: SurfaceKind::Primary,
                ..
            }
        ));
        assert_eq!(error.status(), Status::Error);
    }
}
