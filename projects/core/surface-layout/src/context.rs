//! The collaborator bundle every resource is created against.

use alloc::sync::Arc;
use core::fmt;
use surface_layout_common::allocate::{DefaultSysMemAllocator, SysMemAllocator};
use surface_layout_common::{PlatformInfo, SwizzleBlt, TextureCalc};

/// Platform description plus the collaborators the engine delegates to.
///
/// Cloning is cheap; every field is reference counted. A [`ResourceInfo`] keeps a clone of the
/// context it was created with, so later queries always see the same platform and calculator.
///
/// [`ResourceInfo`]: crate::resource::ResourceInfo
#[derive(Clone)]
pub struct SurfaceContext {
    platform: Arc<PlatformInfo>,
    texture_calc: Arc<dyn TextureCalc + Send + Sync>,
    swizzle: Arc<dyn SwizzleBlt + Send + Sync>,
    allocator: Arc<dyn SysMemAllocator + Send + Sync>,
}

impl SurfaceContext {
    /// Creates a context that allocates system memory from the global allocator.
    pub fn new<C, S>(platform: PlatformInfo, texture_calc: C, swizzle: S) -> Self
    where
        C: TextureCalc + Send + Sync + 'static,
        S: SwizzleBlt + Send + Sync + 'static,
    {
        Self {
            platform: Arc::new(platform),
            texture_calc: Arc::new(texture_calc),
            swizzle: Arc::new(swizzle),
            allocator: Arc::new(DefaultSysMemAllocator),
        }
    }

    /// Replaces the allocator used for self-allocated system memory.
    pub fn with_allocator<A>(mut self, allocator: A) -> Self
    where
        A: SysMemAllocator + Send + Sync + 'static,
    {
        self.allocator = Arc::new(allocator);
        self
    }

    /// The platform description.
    pub fn platform(&self) -> &PlatformInfo {
        &self.platform
    }

    /// The texture sizing calculator.
    pub fn texture_calc(&self) -> &(dyn TextureCalc + Send + Sync) {
        &*self.texture_calc
    }

    /// The swizzle primitive.
    pub fn swizzle(&self) -> &(dyn SwizzleBlt + Send + Sync) {
        &*self.swizzle
    }

    /// The system memory allocator.
    pub fn allocator(&self) -> &(dyn SysMemAllocator + Send + Sync) {
        &*self.allocator
    }
}

impl fmt::Debug for SurfaceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceContext")
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}
