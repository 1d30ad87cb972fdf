//! [`TextureInfo`]: the shape and computed layout of one surface.
//!
//! The same structure describes a primary surface, its aux surfaces and the per-plane
//! sub-surfaces of planar formats. Shape fields are filled from the creation parameters and
//! the layout fields by a [`TextureCalc`](crate::texture_calc::TextureCalc).

use crate::flags::SurfaceFlags;
use crate::format::SurfaceFormat;
use crate::offset::{CubeFace, Plane};
use crate::platform::PlatformInfo;
use crate::tile::{TileInfo, TileMode};

/// Number of mip levels a surface can have.
pub const MAX_MIP_LEVELS: usize = 15;

/// Dimensionality of a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResourceType {
    /// Not described yet.
    #[default]
    Invalid,
    /// One dimensional texture or array.
    Texture1D,
    /// Two dimensional texture or array.
    Texture2D,
    /// Volume texture.
    Texture3D,
    /// Cube map or cube array.
    Cube,
    /// Scanout surface.
    Primary,
}

/// Alignment record of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AlignmentInfo {
    /// Required alignment of the allocation base, in bytes.
    pub base_alignment: u32,
    /// Horizontal mip alignment in pixels.
    pub h_align: u32,
    /// Vertical mip alignment in pixels.
    pub v_align: u32,
    /// Depth alignment in slices.
    pub d_align: u32,
    /// Distance between array slices in pixel rows.
    pub qpitch: u32,
    /// First mip level packed into the mip tail, `None` if the surface has no mip tail.
    pub mip_tail_start_lod: Option<u32>,
}

/// Position of a mip level inside one array slice, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MipOrigin {
    /// Horizontal position.
    pub x: u32,
    /// Vertical position.
    pub y: u32,
}

/// Placement of the planes of a planar surface inside the parent surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlaneOffsetInfo {
    /// Horizontal start of each plane, in bytes.
    pub x: [u64; 3],
    /// Vertical start of each plane, in rows.
    pub y: [u64; 3],
    /// Bytes between array slices of the whole planar surface.
    pub array_qpitch: u64,
}

impl PlaneOffsetInfo {
    /// Starting row of `plane`.
    pub fn row(&self, plane: Plane) -> u64 {
        self.y[plane.index()]
    }
}

/// Offsets of the sub-resources inside a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct OffsetInfo {
    /// Origin of each mip level within an array slice.
    pub mip_origin: [MipOrigin; MAX_MIP_LEVELS],
    /// Bytes between array slices in the lock view.
    pub array_qpitch_lock: u64,
    /// Bytes between array slices in the render view.
    pub array_qpitch_render: u64,
    /// Plane placement of planar surfaces.
    pub plane: PlaneOffsetInfo,
}

/// Divisors that map main-surface dimensions onto a CCS aux surface. Zero means unscaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CcsScale {
    /// Horizontal divisor.
    pub width: u32,
    /// Vertical divisor.
    pub height: u32,
}

/// Shape and computed layout of one surface.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextureInfo {
    /// Dimensionality.
    pub resource_type: ResourceType,
    /// Pixel format.
    pub format: SurfaceFormat,
    /// Bits per element; per block for compressed formats.
    pub bits_per_pixel: u32,
    /// Usage and information flags.
    pub flags: SurfaceFlags,
    /// Width of mip 0 in pixels.
    pub base_width: u64,
    /// Height of mip 0 in pixels.
    pub base_height: u32,
    /// Depth of mip 0 (3D only).
    pub depth: u32,
    /// Number of array slices (cube maps count cubes, not faces).
    pub array_size: u32,
    /// Largest mip level index.
    pub max_lod: u32,
    /// MSAA sample count; 0 and 1 both mean single-sampled.
    pub num_samples: u32,
    /// Selected tiling.
    pub tile_mode: TileMode,
    /// Bytes per row.
    pub pitch: u64,
    /// Total size in bytes.
    pub size: u64,
    /// Size before clear color and flip-chain padding were appended.
    pub unpadded_size: u64,
    /// Size of the appended clear color block.
    pub cc_size: u64,
    /// Alignment record.
    pub alignment: AlignmentInfo,
    /// Sub-resource offsets.
    pub offset_info: OffsetInfo,
    /// CCS scale factors.
    pub ccs_scale: CcsScale,
}

impl TextureInfo {
    /// Returns true once the surface has been described.
    pub fn is_valid(&self) -> bool {
        self.resource_type != ResourceType::Invalid
    }

    /// Bytes per element.
    pub fn pixel_pitch(&self) -> u32 {
        self.bits_per_pixel / 8
    }

    /// MSAA sample count, treating 0 as 1.
    pub fn samples(&self) -> u32 {
        self.num_samples.max(1)
    }

    /// Width of `lod` in pixels.
    pub fn mip_width(&self, lod: u32) -> u64 {
        (self.base_width >> lod).max(1)
    }

    /// Height of `lod` in pixels.
    pub fn mip_height(&self, lod: u32) -> u32 {
        match self.resource_type {
            ResourceType::Texture1D => 1,
            _ => (self.base_height >> lod).max(1),
        }
    }

    /// Depth of `lod` in slices; 1 for anything but 3D.
    pub fn mip_depth(&self, lod: u32) -> u32 {
        match self.resource_type {
            ResourceType::Texture3D => (self.depth >> lod).max(1),
            _ => 1,
        }
    }

    /// Number of 2D slices the array holds; cube maps contribute six faces per cube.
    pub fn array_slices(&self) -> u32 {
        let arrays = self.array_size.max(1);
        match self.resource_type {
            ResourceType::Cube => arrays * CubeFace::COUNT,
            _ => arrays,
        }
    }

    /// Geometry of the selected tile mode.
    pub fn tile_info<'a>(&self, platform: &'a PlatformInfo) -> &'a TileInfo {
        platform.tile_info(self.tile_mode)
    }

    /// Number of planes of the format.
    pub fn plane_count(&self) -> usize {
        self.format.info().planes as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn texture(resource_type: ResourceType) -> TextureInfo {
        TextureInfo {
            resource_type,
            base_width: 100,
            base_height: 60,
            depth: 9,
            array_size: 2,
            ..Default::default()
        }
    }

    #[rstest]
    #[case(0, 100, 60)]
    #[case(1, 50, 30)]
    #[case(3, 12, 7)]
    #[case(7, 1, 1)]
    fn mip_dimensions(#[case] lod: u32, #[case] width: u64, #[case] height: u32) {
        let tex = texture(ResourceType::Texture2D);
        assert_eq!(tex.mip_width(lod), width);
        assert_eq!(tex.mip_height(lod), height);
        assert_eq!(tex.mip_depth(lod), 1);
    }

    #[test]
    fn volume_depth_and_cube_slices() {
        assert_eq!(texture(ResourceType::Texture3D).mip_depth(1), 4);
        assert_eq!(texture(ResourceType::Texture1D).mip_height(0), 1);
        assert_eq!(texture(ResourceType::Cube).array_slices(), 12);
        assert_eq!(texture(ResourceType::Texture2D).array_slices(), 2);
    }
}
