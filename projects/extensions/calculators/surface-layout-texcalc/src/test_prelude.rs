//! Common test imports and utilities for the reference texture calculator
//!
//! This module provides a common prelude for test modules to avoid
//! duplicate imports across the codebase.
#![allow(unused_imports)]

// External crate declaration for no_std compatibility
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

// Re-export commonly used alloc types for tests
pub use alloc::{boxed::Box, format, string::String, vec, vec::Vec};

// Test framework
pub use rstest::rstest;

// Shared vocabulary
pub use surface_layout_common::{
    GpuFlags, InfoFlags, OffsetKind, OffsetRequest, Plane, PlatformInfo, PlatformInfoBuilder,
    RenderCore, ResourceType, SurfaceFlags, SurfaceFormat, TextureCalc, TextureCalcError,
    TextureInfo, TileMode, PAGE_SIZE, SIZE_64KB,
};

/// An unsized descriptor with the given shape and tiling flags.
pub fn texture(
    resource_type: ResourceType,
    format: SurfaceFormat,
    width: u64,
    height: u32,
    tiling: InfoFlags,
) -> TextureInfo {
    TextureInfo {
        resource_type,
        format,
        bits_per_pixel: format.bits_per_pixel(),
        flags: SurfaceFlags::new(GpuFlags::empty(), tiling),
        base_width: width,
        base_height: height,
        depth: 1,
        array_size: 1,
        num_samples: 1,
        ..TextureInfo::default()
    }
}
