//! Capability flag sets describing how a resource is used and backed.
//!
//! Code outside this module queries the named predicates on [`SurfaceFlags`] rather than testing
//! bits directly.

use bitflags::bitflags;

bitflags! {
    /// Usage and role of a resource on the GPU.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GpuFlags: u32 {
        /// Bound as a render target.
        const RENDER_TARGET = 1 << 0;
        /// Sampled as a texture.
        const TEXTURE = 1 << 1;
        /// Depth buffer.
        const DEPTH = 1 << 2;
        /// Stencil buffer stored separately from depth.
        const SEPARATE_STENCIL = 1 << 3;
        /// Hierarchical depth surface.
        const HIZ = 1 << 4;
        /// Color control surface (lossless compression metadata).
        const CCS = 1 << 5;
        /// Multisample control surface.
        const MCS = 1 << 6;
        /// Aux surface shares the allocation of the main surface.
        const UNIFIED_AUX_SURFACE = 1 << 7;
        /// Clear color is stored in memory after the aux surface.
        const INDIRECT_CLEAR_COLOR = 1 << 8;
        /// Part of a presentation flip chain.
        const FLIP_CHAIN = 1 << 9;
        /// Sparse (tiled) resource.
        const TILED_RESOURCE = 1 << 10;
        /// Written by a camera capture pipe.
        const CAMERA_CAPTURE = 1 << 11;
        /// Stereo 3D surface.
        const S3D = 1 << 12;
        /// Stereo 3D surface driven by the DX runtime.
        const S3D_DX = 1 << 13;
        /// Media memory compression.
        const MMC = 1 << 14;
        /// CCS for a single-sampled Y tiled surface.
        const NON_MSAA_TILED_Y_CCS = 1 << 15;
        /// MCS for a multisampled surface.
        const MSAA_TILED_MCS = 1 << 16;
    }
}

bitflags! {
    /// Layout and backing information about a resource.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InfoFlags: u32 {
        /// Untiled.
        const LINEAR = 1 << 0;
        /// W tiled.
        const TILED_W = 1 << 1;
        /// X tiled.
        const TILED_X = 1 << 2;
        /// Y tiled.
        const TILED_Y = 1 << 3;
        /// Yf (4KB tiled-resource) tiled.
        const TILED_YF = 1 << 4;
        /// Ys (64KB tiled-resource) tiled.
        const TILED_YS = 1 << 5;
        /// CPU access goes through the standard (OS defined) swizzle.
        const STD_SWIZZLE = 1 << 6;
        /// Backed by existing system memory.
        const EXISTING_SYS_MEM = 1 << 7;
        /// Shared across adapters.
        const X_ADAPTER = 1 << 8;
        /// Mapped into kernel mode.
        const KERNEL_MODE_MAPPED = 1 << 9;
        /// Planes are described as separate sub-surfaces.
        const REDESCRIBED_PLANES = 1 << 10;
        /// Size must not be padded for 64KB page optimization.
        const NO_OPTIMIZATION_PADDING = 1 << 11;
    }
}

const TILING_FLAGS: InfoFlags = InfoFlags::TILED_W
    .union(InfoFlags::TILED_X)
    .union(InfoFlags::TILED_Y)
    .union(InfoFlags::TILED_YF)
    .union(InfoFlags::TILED_YS);

/// The tiling kind requested through [`InfoFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tiling {
    /// No tiling.
    Linear,
    /// Legacy X tiling.
    X,
    /// Legacy Y tiling.
    Y,
    /// Stencil W tiling.
    W,
    /// 4KB tiled-resource tiling.
    Yf,
    /// 64KB tiled-resource tiling.
    Ys,
}

/// Combined usage and information flags of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SurfaceFlags {
    /// Usage and role.
    pub gpu: GpuFlags,
    /// Layout and backing.
    pub info: InfoFlags,
}

impl SurfaceFlags {
    /// Creates a flag set.
    pub const fn new(gpu: GpuFlags, info: InfoFlags) -> Self {
        Self { gpu, info }
    }

    /// The tiling kind. Yf/Ys take precedence, and no tiling flag at all means linear.
    pub fn tiling(&self) -> Tiling {
        let info = self.info;
        if info.contains(InfoFlags::TILED_YS) {
            Tiling::Ys
        } else if info.contains(InfoFlags::TILED_YF) {
            Tiling::Yf
        } else if info.contains(InfoFlags::TILED_W) {
            Tiling::W
        } else if info.contains(InfoFlags::TILED_X) {
            Tiling::X
        } else if info.contains(InfoFlags::TILED_Y) {
            Tiling::Y
        } else {
            Tiling::Linear
        }
    }

    /// Number of distinct tiling kinds requested.
    pub fn requested_tilings(&self) -> u32 {
        self.info.intersection(TILING_FLAGS).bits().count_ones()
    }

    /// Any W, X, Y, Yf or Ys tiling is requested.
    pub fn is_tiled(&self) -> bool {
        self.info.intersects(TILING_FLAGS)
    }

    /// No tiling is requested.
    pub fn is_linear(&self) -> bool {
        !self.is_tiled()
    }

    /// Yf or Ys tiling is requested.
    pub fn is_tiled_resource_tiling(&self) -> bool {
        self.info
            .intersects(InfoFlags::TILED_YF.union(InfoFlags::TILED_YS))
    }

    /// CPU access goes through the standard swizzle.
    pub fn uses_std_swizzle(&self) -> bool {
        self.info.contains(InfoFlags::STD_SWIZZLE)
    }

    /// Backed by existing system memory.
    pub fn is_existing_sys_mem(&self) -> bool {
        self.info.contains(InfoFlags::EXISTING_SYS_MEM)
    }

    /// Planes are described as separate sub-surfaces.
    pub fn has_redescribed_planes(&self) -> bool {
        self.info.contains(InfoFlags::REDESCRIBED_PLANES)
    }

    /// Shared across adapters.
    pub fn is_cross_adapter(&self) -> bool {
        self.info.contains(InfoFlags::X_ADAPTER)
    }

    /// Mapped into kernel mode.
    pub fn is_kernel_mode_mapped(&self) -> bool {
        self.info.contains(InfoFlags::KERNEL_MODE_MAPPED)
    }

    /// Size may be padded for 64KB page optimization.
    pub fn allows_optimization_padding(&self) -> bool {
        !self.info.contains(InfoFlags::NO_OPTIMIZATION_PADDING)
    }

    /// The aux surface shares the main allocation.
    pub fn has_unified_aux(&self) -> bool {
        self.gpu.contains(GpuFlags::UNIFIED_AUX_SURFACE)
    }

    /// Clear color lives in memory after the aux surface.
    pub fn has_indirect_clear_color(&self) -> bool {
        self.gpu.contains(GpuFlags::INDIRECT_CLEAR_COLOR)
    }

    /// Part of a flip chain.
    pub fn is_flip_chain(&self) -> bool {
        self.gpu.contains(GpuFlags::FLIP_CHAIN)
    }

    /// Depth buffer.
    pub fn is_depth(&self) -> bool {
        self.gpu.contains(GpuFlags::DEPTH)
    }

    /// Separate stencil buffer.
    pub fn is_separate_stencil(&self) -> bool {
        self.gpu.contains(GpuFlags::SEPARATE_STENCIL)
    }

    /// Hierarchical depth surface.
    pub fn is_hiz(&self) -> bool {
        self.gpu.contains(GpuFlags::HIZ)
    }

    /// Color control surface.
    pub fn is_ccs(&self) -> bool {
        self.gpu.contains(GpuFlags::CCS)
    }

    /// Multisample control surface.
    pub fn is_mcs(&self) -> bool {
        self.gpu.contains(GpuFlags::MCS)
    }

    /// CCS for a single-sampled Y tiled surface.
    pub fn is_non_msaa_tiled_y_ccs(&self) -> bool {
        self.gpu.contains(GpuFlags::NON_MSAA_TILED_Y_CCS)
    }

    /// MCS for a multisampled surface.
    pub fn is_msaa_tiled_mcs(&self) -> bool {
        self.gpu.contains(GpuFlags::MSAA_TILED_MCS)
    }

    /// Depth, stencil, CCS or HiZ: the surfaces whose padded dimensions can be queried.
    pub fn is_depth_class(&self) -> bool {
        self.gpu.intersects(
            GpuFlags::DEPTH
                .union(GpuFlags::SEPARATE_STENCIL)
                .union(GpuFlags::CCS)
                .union(GpuFlags::HIZ),
        )
    }

    /// Written by a camera capture pipe.
    pub fn is_camera_capture(&self) -> bool {
        self.gpu.contains(GpuFlags::CAMERA_CAPTURE)
    }

    /// Stereo 3D that the display engine must handle itself (not driven by DX).
    pub fn is_non_dx_s3d(&self) -> bool {
        self.gpu.contains(GpuFlags::S3D) && !self.gpu.contains(GpuFlags::S3D_DX)
    }

    /// Media memory compression.
    pub fn is_mmc(&self) -> bool {
        self.gpu.contains(GpuFlags::MMC)
    }
}
