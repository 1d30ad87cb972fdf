//! Common test imports and utilities for the shared surface layout types
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

// Crate items used across most test modules
pub use crate::flags::{GpuFlags, InfoFlags, SurfaceFlags, Tiling};
pub use crate::format::SurfaceFormat;
pub use crate::platform::PlatformInfo;
pub use crate::texture::{ResourceType, TextureInfo};
pub use crate::tile::TileMode;
