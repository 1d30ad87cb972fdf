//! System memory allocation for surfaces backed by existing system memory.
//!
//! The layout engine never allocates GPU memory. The only allocation it performs is the backing
//! store of a surface that asked for system memory without providing any, and that allocation
//! goes through a [`SysMemAllocator`] so callers can route it wherever they like.
//!
//! ## Useful APIs
//!
//! [`allocate_align_64`]: Allocates uninitialized memory aligned to 64-bytes.
//! [`DefaultSysMemAllocator`]: A [`SysMemAllocator`] on top of [`allocate_align_64`].
//!
//! Memory is automatically deallocated when the returned [`RawAlloc`] is dropped.

use alloc::boxed::Box;
use core::alloc::{Layout, LayoutError};
use safe_allocator_api::allocator_api::*;
use safe_allocator_api::RawAlloc;
use thiserror::Error;

/// Allocates data with an alignment of 64 bytes.
///
/// # Parameters
///
/// - `num_bytes`: The number of bytes to allocate
///
/// # Returns
///
/// A [`RawAlloc`] containing the allocated data
pub fn allocate_align_64(num_bytes: usize) -> Result<RawAlloc, AllocateError> {
    let layout = Layout::from_size_align(num_bytes, 64)?;
    Ok(RawAlloc::new(layout)?)
}

/// Source of system memory for self-allocated surfaces.
pub trait SysMemAllocator {
    /// Allocates `num_bytes` bytes. Alignment beyond what the allocation happens to have is
    /// handled by the caller, which over-allocates by the required alignment.
    fn allocate(&self, num_bytes: usize) -> Result<RawAlloc, AllocateError>;
}

impl<T: SysMemAllocator + ?Sized> SysMemAllocator for Box<T> {
    fn allocate(&self, num_bytes: usize) -> Result<RawAlloc, AllocateError> {
        (**self).allocate(num_bytes)
    }
}

/// Allocates from the global allocator with 64 byte alignment.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSysMemAllocator;

impl SysMemAllocator for DefaultSysMemAllocator {
    fn allocate(&self, num_bytes: usize) -> Result<RawAlloc, AllocateError> {
        allocate_align_64(num_bytes)
    }
}

/// An error that happened in memory allocation within the library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocateError {
    /// An error that occurred while creating a layout for allocation.
    #[error("Invalid layout provided. Likely due to `num_bytes` being larger than isize::MAX. {0}")]
    LayoutError(#[from] LayoutError),

    /// An error that occurred while allocating memory.
    #[error(transparent)]
    AllocationFailed(#[from] AllocError),
}
