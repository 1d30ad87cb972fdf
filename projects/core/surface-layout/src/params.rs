//! Creation parameters.
//!
//! A [`CreateParams`] describes the resource a client wants: its shape, format and flags. It is
//! built through [`CreateParams::builder`], which starts from a single-sampled, single-slice 1x1
//! surface without mips.

use surface_layout_common::{
    GpuFlags, InfoFlags, ResourceType, SurfaceFlags, SurfaceFormat, TextureInfo,
};

/// Caller-provided system memory backing a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ExistingSysMemRegion {
    /// Start address of the memory.
    pub address: u64,
    /// Size of the memory in bytes.
    pub size: u64,
}

impl ExistingSysMemRegion {
    /// Returns true if both address and size are set. Otherwise the engine allocates the memory.
    pub fn is_provided(&self) -> bool {
        self.address != 0 && self.size != 0
    }
}

/// Description of a resource to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateParams {
    /// Dimensionality.
    pub resource_type: ResourceType,
    /// Pixel format.
    pub format: SurfaceFormat,
    /// Usage and information flags, including the requested tiling.
    pub flags: SurfaceFlags,
    /// Width of mip 0 in pixels.
    pub base_width: u64,
    /// Height of mip 0 in pixels.
    pub base_height: u32,
    /// Depth of mip 0 (3D only).
    pub depth: u32,
    /// Array size. Cube maps count cubes.
    pub array_size: u32,
    /// Largest mip level index.
    pub max_lod: u32,
    /// MSAA sample count.
    pub num_samples: u32,
    /// System memory backing; only read when [`InfoFlags::EXISTING_SYS_MEM`] is set.
    pub existing_sys_mem: Option<ExistingSysMemRegion>,
}

impl CreateParams {
    /// Starts building parameters for a resource of the given type and format.
    pub fn builder(resource_type: ResourceType, format: SurfaceFormat) -> CreateParamsBuilder {
        CreateParamsBuilder::new(resource_type, format)
    }

    /// Copies the shape into a fresh [`TextureInfo`], ready for sizing.
    pub(crate) fn to_texture_info(&self) -> TextureInfo {
        TextureInfo {
            resource_type: self.resource_type,
            format: self.format,
            bits_per_pixel: self.format.bits_per_pixel(),
            flags: self.flags,
            base_width: self.base_width,
            base_height: self.base_height,
            depth: self.depth,
            array_size: self.array_size,
            max_lod: self.max_lod,
            num_samples: self.num_samples,
            ..TextureInfo::default()
        }
    }
}

/// Builder for [`CreateParams`].
#[derive(Debug, Clone)]
pub struct CreateParamsBuilder {
    params: CreateParams,
}

impl CreateParamsBuilder {
    /// Starts from a 1x1 single-sampled surface.
    pub fn new(resource_type: ResourceType, format: SurfaceFormat) -> Self {
        Self {
            params: CreateParams {
                resource_type,
                format,
                flags: SurfaceFlags::default(),
                base_width: 1,
                base_height: 1,
                depth: 1,
                array_size: 1,
                max_lod: 0,
                num_samples: 1,
                existing_sys_mem: None,
            },
        }
    }

    /// Sets the width of mip 0.
    pub fn width(mut self, width: u64) -> Self {
        self.params.base_width = width;
        self
    }

    /// Sets the height of mip 0.
    pub fn height(mut self, height: u32) -> Self {
        self.params.base_height = height;
        self
    }

    /// Sets the depth of mip 0.
    pub fn depth(mut self, depth: u32) -> Self {
        self.params.depth = depth;
        self
    }

    /// Sets the array size.
    pub fn array_size(mut self, array_size: u32) -> Self {
        self.params.array_size = array_size;
        self
    }

    /// Sets the largest mip level index.
    pub fn max_lod(mut self, max_lod: u32) -> Self {
        self.params.max_lod = max_lod;
        self
    }

    /// Sets the MSAA sample count.
    pub fn samples(mut self, num_samples: u32) -> Self {
        self.params.num_samples = num_samples;
        self
    }

    /// Adds usage flags.
    pub fn gpu_flags(mut self, flags: GpuFlags) -> Self {
        self.params.flags.gpu |= flags;
        self
    }

    /// Adds information flags, including the tiling.
    pub fn info_flags(mut self, flags: InfoFlags) -> Self {
        self.params.flags.info |= flags;
        self
    }

    /// Backs the resource with caller-provided system memory.
    pub fn existing_sys_mem(mut self, address: u64, size: u64) -> Self {
        self.params.flags.info |= InfoFlags::EXISTING_SYS_MEM;
        self.params.existing_sys_mem = Some(ExistingSysMemRegion { address, size });
        self
    }

    /// Backs the resource with system memory the engine allocates itself.
    pub fn self_allocated_sys_mem(mut self) -> Self {
        self.params.flags.info |= InfoFlags::EXISTING_SYS_MEM;
        self.params.existing_sys_mem = None;
        self
    }

    /// Finishes the parameters.
    pub fn build(self) -> CreateParams {
        self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_and_overrides() {
        let params = CreateParams::builder(ResourceType::Texture2D, SurfaceFormat::R8G8B8A8Unorm)
            .width(64)
            .height(32)
            .info_flags(InfoFlags::TILED_Y)
            .build();
        assert_eq!(params.base_width, 64);
        assert_eq!(params.base_height, 32);
        assert_eq!(params.array_size, 1);
        assert_eq!(params.num_samples, 1);
        assert!(params.flags.is_tiled());
        assert!(params.existing_sys_mem.is_none());

        let tex = params.to_texture_info();
        assert_eq!(tex.bits_per_pixel, 32);
        assert_eq!(tex.size, 0);
    }

    #[test]
    fn sys_mem_builders_set_the_flag() {
        let provided = CreateParams::builder(ResourceType::Texture2D, SurfaceFormat::R8Unorm)
            .existing_sys_mem(0x1000, 0x2000)
            .build();
        assert!(provided.flags.is_existing_sys_mem());
        assert!(provided.existing_sys_mem.is_some_and(|region| region.is_provided()));

        let allocated = CreateParams::builder(ResourceType::Texture2D, SurfaceFormat::R8Unorm)
            .self_allocated_sys_mem()
            .build();
        assert!(allocated.flags.is_existing_sys_mem());
        assert!(allocated.existing_sys_mem.is_none());
    }
}
