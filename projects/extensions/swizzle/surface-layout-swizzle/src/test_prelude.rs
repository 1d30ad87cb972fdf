//! Common test imports and utilities for the CPU swizzle primitive
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

pub use surface_layout_common::{
    SurfaceGeometry, SwizzleBlt, SwizzleError, SwizzlePattern, SwizzleSurface, SwizzleSurfaceMut,
};

/// Linear geometry with packed elements of `element` bytes.
pub fn linear(pitch: u32, height: u32, element: u32) -> SurfaceGeometry {
    SurfaceGeometry {
        pitch,
        height,
        element_pitch: element,
        element_size: element,
        ..SurfaceGeometry::default()
    }
}

/// Swizzled geometry with packed elements of `element` bytes.
pub fn tiled(
    pattern: &'static SwizzlePattern,
    pitch: u32,
    height: u32,
    element: u32,
) -> SurfaceGeometry {
    SurfaceGeometry {
        pattern: Some(pattern),
        ..linear(pitch, height, element)
    }
}

/// Deterministic test bytes.
pub fn pattern_bytes(len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| ((i ^ (i >> 8)) as u8).wrapping_mul(7).wrapping_add(3))
        .collect()
}
