//! System memory backing of resources created with [`InfoFlags::EXISTING_SYS_MEM`].
//!
//! The memory is either provided by the caller or allocated through the context's
//! [`SysMemAllocator`]. In both cases the usable address is aligned to the resource's restriction
//! alignment, so the allocation or region may start before the surface does.
//!
//! [`InfoFlags::EXISTING_SYS_MEM`]: surface_layout_common::InfoFlags::EXISTING_SYS_MEM

use crate::error::{SurfaceError, SurfaceResult};
use crate::params::ExistingSysMemRegion;
use core::fmt;
use safe_allocator_api::RawAlloc;
use surface_layout_common::allocate::SysMemAllocator;
use surface_layout_common::math::{align_up, is_aligned};
use surface_layout_common::PAGE_SIZE;
use tracing::debug;

/// Some callers sign-extend 32-bit addresses into 64 bits.
const SIGN_EXTENDED_UPPER_DWORD: u64 = 0xFFFF_FFFF;

/// System memory backing a resource.
pub struct ExistingSysMem {
    base: u64,
    size: u64,
    is_page_aligned: bool,
    virtual_address: u64,
    gfx_aligned_address: u64,
    allocation: Option<RawAlloc>,
}

impl ExistingSysMem {
    /// Sets up caller-provided memory for a surface of `surface_size` bytes.
    pub(crate) fn provided(
        region: ExistingSysMemRegion,
        surface_size: u64,
        restriction_alignment: u64,
    ) -> SurfaceResult<Self> {
        let mut base = region.address;
        if base >> 32 == SIGN_EXTENDED_UPPER_DWORD {
            base &= u32::MAX as u64;
        }
        let end = base.saturating_add(region.size);

        let is_page_aligned = is_aligned(base, PAGE_SIZE) && is_aligned(end, PAGE_SIZE);
        let virtual_address = if is_page_aligned {
            base
        } else {
            align_up(base, restriction_alignment)
        };

        let needed = virtual_address.saturating_add(surface_size);
        if needed > end {
            return Err(SurfaceError::SysMemTooSmall {
                needed,
                available: end,
            });
        }

        debug!(
            base,
            size = region.size,
            is_page_aligned,
            virtual_address,
            "using caller provided system memory"
        );
        Ok(Self {
            base,
            size: region.size,
            is_page_aligned,
            virtual_address,
            gfx_aligned_address: virtual_address,
            allocation: None,
        })
    }

    /// Allocates memory for a surface of `surface_size` bytes, over-allocating by the restriction
    /// alignment so an aligned start always fits.
    pub(crate) fn allocate(
        allocator: &dyn SysMemAllocator,
        surface_size: u64,
        restriction_alignment: u64,
    ) -> SurfaceResult<Self> {
        let size = restriction_alignment + surface_size;
        let allocation = allocator.allocate(size as usize)?;
        let base = allocation.as_ptr() as u64;
        let gfx_aligned_address = align_up(base, restriction_alignment);

        debug!(size, base, gfx_aligned_address, "allocated system memory");
        Ok(Self {
            base,
            size,
            is_page_aligned: is_aligned(base, PAGE_SIZE),
            virtual_address: base,
            gfx_aligned_address,
            allocation: Some(allocation),
        })
    }

    /// Start of the memory. Sign-extended 32-bit addresses are truncated.
    pub fn base(&self) -> u64 {
        self.base
    }

    /// Size of the memory.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Whether both ends of the memory are page aligned.
    pub fn is_page_aligned(&self) -> bool {
        self.is_page_aligned
    }

    /// Whether the engine allocated the memory. The allocation is released with the resource.
    pub fn is_self_allocated(&self) -> bool {
        self.allocation.is_some()
    }

    /// CPU address of the memory.
    pub fn virtual_address(&self) -> u64 {
        self.virtual_address
    }

    /// Address the surface starts at, aligned to the restriction alignment.
    pub fn gfx_aligned_address(&self) -> u64 {
        self.gfx_aligned_address
    }
}

impl fmt::Debug for ExistingSysMem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExistingSysMem")
            .field("base", &format_args!("{:#x}", self.base))
            .field("size", &self.size)
            .field("is_page_aligned", &self.is_page_aligned)
            .field("is_self_allocated", &self.is_self_allocated())
            .field("virtual_address", &format_args!("{:#x}", self.virtual_address))
            .field(
                "gfx_aligned_address",
                &format_args!("{:#x}", self.gfx_aligned_address),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;
    use surface_layout_common::allocate::AllocateError;
    use surface_layout_common::allocate::DefaultSysMemAllocator;

    fn region(address: u64, size: u64) -> ExistingSysMemRegion {
        ExistingSysMemRegion { address, size }
    }

    #[test]
    fn page_aligned_memory_is_used_as_is() {
        let sys_mem = ExistingSysMem::provided(region(0x10000, 0x4000), 0x4000, PAGE_SIZE).unwrap();
        assert!(sys_mem.is_page_aligned());
        assert!(!sys_mem.is_self_allocated());
        assert_eq!(sys_mem.virtual_address(), 0x10000);
        assert_eq!(sys_mem.gfx_aligned_address(), 0x10000);
    }

    #[test]
    fn unaligned_memory_is_aligned_up() {
        let sys_mem = ExistingSysMem::provided(region(0x10010, 0x3000), 0x1000, PAGE_SIZE).unwrap();
        assert!(!sys_mem.is_page_aligned());
        assert_eq!(sys_mem.virtual_address(), 0x11000);
        assert_eq!(sys_mem.gfx_aligned_address(), 0x11000);
    }

    #[rstest]
    #[case(region(0x10000, 0x1000), 0x2000)]
    // Aligning up eats into the region.
    #[case(region(0x10010, 0x2000), 0x2000)]
    fn too_small_memory_is_an_error(#[case] region: ExistingSysMemRegion, #[case] surface: u64) {
        let error = ExistingSysMem::provided(region, surface, PAGE_SIZE).unwrap_err();
        assert!(matches!(error, SurfaceError::SysMemTooSmall { .. }));
        assert_eq!(error.status(), Status::Error);
    }

    #[test]
    fn sign_extended_addresses_are_truncated() {
        let sys_mem =
            ExistingSysMem::provided(region(0xFFFF_FFFF_8000_0000, 0x2000), 0x2000, PAGE_SIZE)
                .unwrap();
        assert_eq!(sys_mem.base(), 0x8000_0000);
        assert_eq!(sys_mem.virtual_address(), 0x8000_0000);
    }

    #[test]
    fn self_allocated_memory_is_over_allocated_and_aligned() {
        let sys_mem = ExistingSysMem::allocate(&DefaultSysMemAllocator, 0x3000, 0x10000).unwrap();
        assert!(sys_mem.is_self_allocated());
        assert_eq!(sys_mem.size(), 0x13000);
        assert_eq!(sys_mem.gfx_aligned_address() % 0x10000, 0);
        assert!(sys_mem.gfx_aligned_address() + 0x3000 <= sys_mem.base() + sys_mem.size());
    }

    struct FailingAllocator;

    impl SysMemAllocator for FailingAllocator {
        fn allocate(&self, _num_bytes: usize) -> Result<RawAlloc, AllocateError> {
            surface_layout_common::allocate::allocate_align_64(usize::MAX)
        }
    }

    #[test]
    fn allocation_failure_is_an_error() {
        let error = ExistingSysMem::allocate(&FailingAllocator, 0x1000, PAGE_SIZE).unwrap_err();
        assert!(matches!(error, SurfaceError::SysMemAllocation(_)));
        assert_eq!(error.status(), Status::Error);
    }

    #[test]
    fn created_through_the_resource() {
        let params = CreateParams::builder(ResourceType::Texture2D, SurfaceFormat::R8G8B8A8Unorm)
            .width(64)
            .height(64)
            .self_allocated_sys_mem()
            .build();
        let resource = create(&params);
        let sys_mem = resource.existing_sys_mem().unwrap();
        assert!(sys_mem.is_self_allocated());
        assert_eq!(
            sys_mem.size(),
            resource.restriction_alignment() + resource.size_main_surface()
        );

        let too_small = CreateParams::builder(ResourceType::Texture2D, SurfaceFormat::R8G8B8A8Unorm)
            .width(64)
            .height(64)
            .existing_sys_mem(0x10000, 0x1000)
            .build();
        let error = ResourceInfo::create(&gen9(), &too_small).unwrap_err();
        assert_eq!(error.status(), Status::Error);
    }
}
