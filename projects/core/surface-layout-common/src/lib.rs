#![doc = include_str!(concat!("../", core::env!("CARGO_PKG_README")))]
#![no_std]
#![warn(missing_docs)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(test)]
pub mod test_prelude;

pub mod allocate;
pub mod error;
pub mod flags;
pub mod format;
pub mod math;
pub mod offset;
pub mod platform;
pub mod swizzle;
pub mod texture;
pub mod texture_calc;
pub mod tile;

pub use error::{SwizzleError, TextureCalcError};
pub use flags::{GpuFlags, InfoFlags, SurfaceFlags, Tiling};
pub use format::{BlockDimensions, ChromaSubsampling, FormatInfo, SurfaceFormat};
pub use offset::{CubeFace, OffsetKind, OffsetRequest, Plane, ResolvedOffset};
pub use platform::{
    PlatformInfo, PlatformInfoBuilder, RenderCore, SkuFeatures, PAGE_SIZE, SIZE_64KB,
};
pub use swizzle::{SurfaceGeometry, SwizzleBlt, SwizzlePattern, SwizzleSurface, SwizzleSurfaceMut};
pub use texture::{ResourceType, TextureInfo, MAX_MIP_LEVELS};
pub use texture_calc::TextureCalc;
pub use tile::{TileInfo, TileMode, TileTable};
