//! Common test imports and utilities for the layout engine
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
    GpuFlags, InfoFlags, OffsetKind, OffsetRequest, Plane, PlatformInfo, ResourceType,
    SurfaceFlags, SurfaceFormat, TextureInfo, TileMode, PAGE_SIZE, SIZE_64KB,
};

// Reference collaborators
pub use surface_layout_swizzle::CpuSwizzleBlt;
pub use surface_layout_texcalc::Gen9TextureCalc;

// Crate items used across most test modules
pub use crate::context::SurfaceContext;
pub use crate::error::{Status, SurfaceError, ValidationError};
pub use crate::params::CreateParams;
pub use crate::resource::ResourceInfo;

/// A context with the reference calculator and swizzle primitive on the given platform.
pub fn context(platform: PlatformInfo) -> SurfaceContext {
    SurfaceContext::new(platform, Gen9TextureCalc, CpuSwizzleBlt)
}

/// A Gen9 context with the reference collaborators.
pub fn gen9() -> SurfaceContext {
    context(PlatformInfo::gen9())
}

/// Creates a resource on a Gen9 context, panicking on failure.
pub fn create(params: &CreateParams) -> ResourceInfo {
    ResourceInfo::create(&gen9(), params).unwrap()
}
