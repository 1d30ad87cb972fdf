//! Error types of the layout engine.
//!
//! Creation, offset and validation failures are reported as [`SurfaceError`]. Each error maps onto
//! the coarse [`Status`] taxonomy through [`SurfaceError::status`], which tells callers whether
//! retrying with different input can help. Copy failures are reported as [`BltError`].

use alloc::boxed::Box;
use surface_layout_common::allocate::AllocateError;
use surface_layout_common::{
    Plane, ResourceType, SurfaceFormat, SwizzleError, TextureCalcError, TileMode,
};
use thiserror::Error;

/// Result of layout operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Result of [`cpu_blt`](crate::resource::ResourceInfo::cpu_blt).
pub type BltResult<T> = Result<T, BltError>;

/// Coarse outcome of an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// The operation succeeded.
    Success,
    /// The caller's input violates a precondition; retry with corrected input.
    InvalidParam,
    /// An internal computation failed.
    Error,
}

/// Which descriptor of a resource an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// The main surface.
    Primary,
    /// The primary aux surface (CCS, MCS or HiZ).
    Aux,
    /// The secondary aux surface (CCS of a HiZ depth buffer).
    SecondaryAux,
    /// A plane of a planar surface.
    Plane(Plane),
    /// The aux surface of a plane.
    PlaneAux(Plane),
}

/// A creation parameter that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The resource type was never set.
    #[error("Resource type must be set")]
    InvalidResourceType,

    /// The format has no usable bit depth.
    #[error("Format {0:?} cannot be used for a surface")]
    InvalidFormat(SurfaceFormat),

    /// Width, height, depth or array size is zero.
    #[error("Surface dimensions must be non-zero")]
    ZeroDimension,

    /// A 1D surface with a height other than 1.
    #[error("1D surfaces must have a height of 1, got {0}")]
    OneDimensionalHeight(u32),

    /// A cube map whose faces are not square.
    #[error("Cube map faces must be square, got {width}x{height}")]
    CubeNotSquare {
        /// Requested width.
        width: u64,
        /// Requested height.
        height: u32,
    },

    /// A 3D surface with more than one array slice.
    #[error("3D surfaces cannot be arrays, got {0} slices")]
    VolumeArray(u32),

    /// Too many mip levels for the platform or the surface dimensions.
    #[error("Max mip level {max_lod} exceeds the limit of {limit}")]
    MaxLodTooLarge {
        /// Requested max mip level.
        max_lod: u32,
        /// Largest allowed max mip level.
        limit: u32,
    },

    /// A sample count other than 1, 2, 4, 8 or 16.
    #[error("Invalid MSAA sample count {0}")]
    InvalidSampleCount(u32),

    /// Multisampling on anything but a single-mip 2D surface.
    #[error("MSAA is only supported on 2D surfaces without mips")]
    UnsupportedMultisampling,

    /// More than one tiling flag.
    #[error("At most one tiling may be requested")]
    MultipleTilings,

    /// Yf/Ys tiling on a platform without tiled resources.
    #[error("The platform does not support Yf/Ys tiling")]
    TiledResourcesUnsupported,

    /// Yf/Ys tiling with an element size that has no tile shape.
    #[error("Yf/Ys tiling needs 8, 16, 32, 64 or 128 bits per element, got {0}")]
    TiledResourceBitsPerPixel(u32),

    /// W tiling on anything but a separate stencil buffer.
    #[error("W tiling is only supported for separate stencil")]
    TiledWRequiresSeparateStencil,

    /// W tiling on a 3D surface.
    #[error("W tiling is not supported for 3D surfaces")]
    TiledWVolume,

    /// Standard swizzle without Yf/Ys tiling.
    #[error("Standard swizzle requires Yf or Ys tiling")]
    StdSwizzleRequiresTiledResource,

    /// A planar format on a non-2D surface.
    #[error("Planar formats must be 2D, got {0:?}")]
    PlanarNot2D(ResourceType),

    /// Plane redescription on a non-planar format.
    #[error("Redescribed planes require a planar format, got {0:?}")]
    RedescribedPlanesRequirePlanar(SurfaceFormat),

    /// A unified aux surface on a linear surface.
    #[error("A unified aux surface requires a tiled surface")]
    UnifiedAuxRequiresTiling,
}

/// Errors reported while creating or querying a resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// Tiling requested together with existing system memory.
    #[error("Tiled surfaces cannot be backed by existing system memory")]
    TiledExistingSysMem,

    /// A creation parameter failed validation.
    #[error("Invalid creation parameter: {0}")]
    Validation(#[from] ValidationError),

    /// The texture calculator failed to size a descriptor.
    #[error("Sizing the {surface:?} surface failed: {source}")]
    Sizing {
        /// The descriptor being sized.
        surface: SurfaceKind,
        /// Calculator error.
        #[source]
        source: TextureCalcError,
    },

    /// UV-packed planes can only be derived from 8 or 16 bit formats.
    #[error("Planes cannot be derived for {0} bits per pixel")]
    UnsupportedPlaneBitsPerPixel(u32),

    /// Deriving the per-plane layouts failed.
    #[error("Redescribing planes failed: {0}")]
    PlaneRedescription(#[source] Box<SurfaceError>),

    /// The composed size exceeds the platform maximum.
    #[error("Surface size {size} exceeds the platform maximum of {max} bytes")]
    SurfaceTooLarge {
        /// Composed size.
        size: u64,
        /// Platform limit.
        max: u64,
    },

    /// Caller-provided system memory cannot hold the surface.
    #[error("System memory too small: surface ends at {needed:#x}, memory ends at {available:#x}")]
    SysMemTooSmall {
        /// End address of the surface.
        needed: u64,
        /// End address of the provided memory.
        available: u64,
    },

    /// Allocating system memory for the surface failed.
    #[error("Allocating system memory failed: {0}")]
    SysMemAllocation(#[from] AllocateError),

    /// A standard layout offset on a planar surface needs a plane.
    #[error("A plane must be selected for standard layout offsets of planar surfaces")]
    PlaneRequired,

    /// The requested mip level does not exist.
    #[error("Mip level {mip} exceeds the max mip level {max_lod}")]
    MipOutOfRange {
        /// Requested level.
        mip: u32,
        /// Max level of the surface.
        max_lod: u32,
    },

    /// The texture calculator failed to resolve an offset.
    #[error("Resolving the offset failed: {0}")]
    Offset(#[source] TextureCalcError),
}

impl SurfaceError {
    /// Maps the error onto the [`Status`] taxonomy.
    pub fn status(&self) -> Status {
        match self {
            SurfaceError::TiledExistingSysMem
            | SurfaceError::Validation(_)
            | SurfaceError::UnsupportedPlaneBitsPerPixel(_)
            | SurfaceError::PlaneRequired
            | SurfaceError::MipOutOfRange { .. } => Status::InvalidParam,
            SurfaceError::Sizing { .. }
            | SurfaceError::PlaneRedescription(_)
            | SurfaceError::SurfaceTooLarge { .. }
            | SurfaceError::SysMemTooSmall { .. }
            | SurfaceError::SysMemAllocation(_)
            | SurfaceError::Offset(_) => Status::Error,
        }
    }
}

/// Errors reported by [`cpu_blt`](crate::resource::ResourceInfo::cpu_blt).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BltError {
    /// The copy crosses the boundary between the Y and UV planes.
    #[error("Rows {offset_y}..{end} straddle the UV plane starting at row {boundary}")]
    PlaneStraddle {
        /// First row of the copy.
        offset_y: u32,
        /// End row of the copy.
        end: u64,
        /// First row of the UV plane.
        boundary: u64,
    },

    /// Multisampled surfaces cannot be copied.
    #[error("Multisampled surfaces cannot be copied by the CPU")]
    Multisampled,

    /// A zero width or height was given for a planar surface.
    #[error("Planar surfaces need an explicit copy width and height")]
    ImplicitExtentOnPlanar,

    /// The copy origin lies outside the mip.
    #[error("Copy origin {offset} lies outside the mip extent {extent}")]
    OriginOutsideMip {
        /// Origin coordinate.
        offset: u32,
        /// Mip extent along the same axis.
        extent: u64,
    },

    /// Partial-pixel copies of block-compressed formats.
    #[error("Partial-pixel copies are not supported for block-compressed formats")]
    PartialPixelCompressed,

    /// Partial-pixel copies to or from linear surfaces.
    #[error("Partial-pixel copies are not supported for linear surfaces")]
    PartialPixelLinear,

    /// The copy origin is not aligned to the compression block.
    #[error("Origin ({offset_x}, {offset_y}) is not {block_width}x{block_height} block aligned")]
    UnalignedOrigin {
        /// Horizontal origin in pixels.
        offset_x: u32,
        /// Vertical origin in pixels.
        offset_y: u32,
        /// Block width.
        block_width: u32,
        /// Block height.
        block_height: u32,
    },

    /// Resolving the sub-resource offset failed.
    #[error("Resolving the sub-resource failed: {0}")]
    Offset(#[from] SurfaceError),

    /// The tile mode has no swizzle pattern.
    #[error("No swizzle pattern for tile mode {0:?}")]
    NoSwizzlePattern(TileMode),

    /// A pitch, height or offset does not fit the swizzle descriptor.
    #[error("Copy geometry exceeds 32 bits")]
    GeometryOverflow,

    /// The copy reached past the end of a buffer.
    #[error("Copy needs {needed} bytes but the buffer only holds {actual}")]
    OutOfBounds {
        /// Bytes required.
        needed: usize,
        /// Buffer length.
        actual: usize,
    },

    /// The swizzle primitive failed.
    #[error(transparent)]
    Swizzle(#[from] SwizzleError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[rstest]
    #[case(SurfaceError::TiledExistingSysMem, Status::InvalidParam)]
    #[case(SurfaceError::Validation(ValidationError::ZeroDimension), Status::InvalidParam)]
    #[case(SurfaceError::PlaneRequired, Status::InvalidParam)]
    #[case(SurfaceError::SurfaceTooLarge { size: 2, max: 1 }, Status::Error)]
    #[case(SurfaceError::SysMemTooSmall { needed: 2, available: 1 }, Status::Error)]
    #[case(
        SurfaceError::Sizing { surface: SurfaceKind::Primary, source: TextureCalcError::Overflow },
        Status::Error
    )]
    fn errors_map_onto_status(#[case] error: SurfaceError, #[case] status: Status) {
        assert_eq!(error.status(), status);
    }

    #[test]
    fn wrapped_plane_errors_are_internal_failures() {
        let inner = SurfaceError::UnsupportedPlaneBitsPerPixel(32);
        assert_eq!(inner.status(), Status::InvalidParam);
        let wrapped = SurfaceError::PlaneRedescription(Box::new(inner));
        assert_eq!(wrapped.status(), Status::Error);
        assert!(format!("{wrapped}").contains("32 bits per pixel"));
    }
}
