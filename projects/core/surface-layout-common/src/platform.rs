//! The platform description injected into every layout computation.
//!
//! A [`PlatformInfo`] is built once and never mutated afterwards. Share it behind an `Arc` (see
//! `SurfaceContext` in the engine crate) rather than copying it around.

use crate::tile::{TileInfo, TileMode, TileTable};
use bitflags::bitflags;
use derive_enum_all_values::AllValues;

/// Size of a small page.
pub const PAGE_SIZE: u64 = 4096;

/// Size of a 64KB page, which is also the Ys tile footprint.
pub const SIZE_64KB: u64 = 64 * 1024;

/// Render core generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AllValues)]
pub enum RenderCore {
    /// Broadwell class.
    Gen8,
    /// Skylake class, first with Yf/Ys tiling.
    Gen9,
    /// Cannonlake class.
    Gen10,
    /// Icelake class.
    Gen11,
}

bitflags! {
    /// SKU features that change layout decisions.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SkuFeatures: u32 {
        /// The OS supports 64KB pages for graphics allocations.
        const WDDM2_1_64KB_PAGES = 1 << 0;
        /// The display engine can scan out stereo 3D on its own.
        const DISPLAY_ENGINE_S3D = 1 << 1;
        /// Yf/Ys tiled resources are supported.
        const TILED_RESOURCES = 1 << 2;
    }
}

/// Immutable description of the target hardware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformInfo {
    render_core: RenderCore,
    tile_table: TileTable,
    surface_max_size: u64,
    max_lod: u32,
    features: SkuFeatures,
    allowed_padding_for_64kb_pages_percentage: u32,
    linear_pitch_alignment: u32,
}

impl PlatformInfo {
    /// Broadwell-class defaults.
    pub fn gen8() -> Self {
        PlatformInfoBuilder::new(RenderCore::Gen8).build()
    }

    /// Skylake-class defaults.
    pub fn gen9() -> Self {
        PlatformInfoBuilder::new(RenderCore::Gen9).build()
    }

    /// Icelake-class defaults.
    pub fn gen11() -> Self {
        PlatformInfoBuilder::new(RenderCore::Gen11).build()
    }

    /// Render core generation.
    pub fn render_core(&self) -> RenderCore {
        self.render_core
    }

    /// Geometry of a tile mode. Invalid for modes the platform does not support.
    pub fn tile_info(&self, mode: TileMode) -> &TileInfo {
        self.tile_table.get(mode)
    }

    /// Largest total size (primary + aux) a resource may have.
    pub fn surface_max_size(&self) -> u64 {
        self.surface_max_size
    }

    /// Largest mip level index a resource may have.
    pub fn max_lod(&self) -> u32 {
        self.max_lod
    }

    /// SKU features.
    pub fn features(&self) -> SkuFeatures {
        self.features
    }

    /// Returns true if `feature` is present.
    pub fn has_feature(&self, feature: SkuFeatures) -> bool {
        self.features.contains(feature)
    }

    /// How much (in percent of the surface size) padding to 64KB is acceptable.
    pub fn allowed_padding_for_64kb_pages_percentage(&self) -> u32 {
        self.allowed_padding_for_64kb_pages_percentage
    }

    /// Pitch alignment of linear surfaces, in bytes.
    pub fn linear_pitch_alignment(&self) -> u32 {
        self.linear_pitch_alignment
    }
}

/// Builder for [`PlatformInfo`], starting from the defaults of a render core generation.
#[derive(Debug, Clone)]
pub struct PlatformInfoBuilder {
    info: PlatformInfo,
}

impl PlatformInfoBuilder {
    /// Starts from the defaults of `render_core`.
    pub fn new(render_core: RenderCore) -> Self {
        let (tile_table, features) = match render_core {
            RenderCore::Gen8 => (TileTable::legacy(), SkuFeatures::empty()),
            RenderCore::Gen9 | RenderCore::Gen10 => (
                TileTable::with_tiled_resources(),
                SkuFeatures::TILED_RESOURCES | SkuFeatures::WDDM2_1_64KB_PAGES,
            ),
            RenderCore::Gen11 => (
                TileTable::with_tiled_resources(),
                SkuFeatures::TILED_RESOURCES
                    | SkuFeatures::WDDM2_1_64KB_PAGES
                    | SkuFeatures::DISPLAY_ENGINE_S3D,
            ),
        };
        Self {
            info: PlatformInfo {
                render_core,
                tile_table,
                surface_max_size: 256 << 30,
                max_lod: 14,
                features,
                allowed_padding_for_64kb_pages_percentage: 10,
                linear_pitch_alignment: 64,
            },
        }
    }

    /// Overrides the maximum surface size.
    pub fn surface_max_size(mut self, size: u64) -> Self {
        self.info.surface_max_size = size;
        self
    }

    /// Overrides the maximum mip level.
    pub fn max_lod(mut self, max_lod: u32) -> Self {
        self.info.max_lod = max_lod;
        self
    }

    /// Replaces the SKU feature set.
    pub fn features(mut self, features: SkuFeatures) -> Self {
        self.info.features = features;
        self
    }

    /// Overrides the acceptable 64KB padding percentage.
    pub fn allowed_padding_for_64kb_pages_percentage(mut self, percent: u32) -> Self {
        self.info.allowed_padding_for_64kb_pages_percentage = percent;
        self
    }

    /// Overrides the linear pitch alignment; must be a power of two.
    pub fn linear_pitch_alignment(mut self, alignment: u32) -> Self {
        self.info.linear_pitch_alignment = alignment;
        self
    }

    /// Finishes the platform description.
    pub fn build(self) -> PlatformInfo {
        self.info
    }
}
