//! Surface formats and the per-format trait table.
//!
//! Every format-specific rule the engine needs (bit depth, compression block size, plane count,
//! chroma sub-sampling) is answered by [`SurfaceFormat::info`], so callers never branch on
//! individual formats.

use derive_enum_all_values::AllValues;

/// Compression block dimensions in pixels. Uncompressed formats use `1x1x1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockDimensions {
    /// Block width in pixels.
    pub width: u32,
    /// Block height in pixels.
    pub height: u32,
    /// Block depth in pixels.
    pub depth: u32,
}

impl BlockDimensions {
    /// The dimensions of an uncompressed element.
    pub const UNCOMPRESSED: Self = Self::new(1, 1, 1);

    /// Creates new block dimensions.
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Returns true if the block covers more than a single pixel.
    pub const fn is_compressed(&self) -> bool {
        self.width > 1 || self.height > 1 || self.depth > 1
    }
}

impl Default for BlockDimensions {
    fn default() -> Self {
        Self::UNCOMPRESSED
    }
}

/// Size of the U/V planes relative to the Y plane of a planar format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChromaSubsampling {
    /// Divisor applied (ceiling-rounded) to the Y plane width.
    pub width_divisor: u32,
    /// Divisor applied (ceiling-rounded) to the Y plane height.
    pub height_divisor: u32,
}

impl ChromaSubsampling {
    /// Chroma planes have the same size as the Y plane.
    pub const NONE: Self = Self::new(1, 1);
    /// Width and height halved (4:2:0).
    pub const HALF: Self = Self::new(2, 2);

    /// Creates a new sub-sampling rule.
    pub const fn new(width_divisor: u32, height_divisor: u32) -> Self {
        Self {
            width_divisor,
            height_divisor,
        }
    }

    /// Width of a chroma plane for a Y plane of `width` pixels.
    pub const fn plane_width(&self, width: u64) -> u64 {
        width.div_ceil(self.width_divisor as u64)
    }

    /// Height of a chroma plane for a Y plane of `height` rows.
    pub const fn plane_height(&self, height: u32) -> u32 {
        height.div_ceil(self.height_divisor)
    }
}

/// Static description of a [`SurfaceFormat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatInfo {
    /// Bits per element. For block compressed formats, bits per block.
    pub bits_per_pixel: u32,
    /// Compression block dimensions.
    pub block: BlockDimensions,
    /// Number of planes; `1` for non-planar formats.
    pub planes: u8,
    /// U and V are interleaved into a single plane.
    pub uv_packed: bool,
    /// Size of the chroma planes relative to Y.
    pub subsampling: ChromaSubsampling,
}

impl FormatInfo {
    const fn plain(bits_per_pixel: u32) -> Self {
        Self {
            bits_per_pixel,
            block: BlockDimensions::UNCOMPRESSED,
            planes: 1,
            uv_packed: false,
            subsampling: ChromaSubsampling::NONE,
        }
    }

    const fn block_compressed(bits_per_block: u32) -> Self {
        Self {
            bits_per_pixel: bits_per_block,
            block: BlockDimensions::new(4, 4, 1),
            planes: 1,
            uv_packed: false,
            subsampling: ChromaSubsampling::NONE,
        }
    }

    const fn uv_packed(bits_per_pixel: u32) -> Self {
        Self {
            bits_per_pixel,
            block: BlockDimensions::UNCOMPRESSED,
            planes: 2,
            uv_packed: true,
            subsampling: ChromaSubsampling::HALF,
        }
    }

    const fn three_plane(subsampling: ChromaSubsampling) -> Self {
        Self {
            bits_per_pixel: 8,
            block: BlockDimensions::UNCOMPRESSED,
            planes: 3,
            uv_packed: false,
            subsampling,
        }
    }
}

/// Pixel formats understood by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AllValues)]
pub enum SurfaceFormat {
    /// No format; rejected by validation.
    #[default]
    Invalid,
    /// 8-bit single channel.
    R8Unorm,
    /// 8-bit single channel integer.
    R8Uint,
    /// 16-bit single channel.
    R16Unorm,
    /// 16-bit single channel integer.
    R16Uint,
    /// 32-bit single channel integer.
    R32Uint,
    /// 32-bit single channel float.
    R32Float,
    /// Two 8-bit channels.
    R8G8Unorm,
    /// Two 16-bit channels.
    R16G16Unorm,
    /// Four 8-bit channels.
    R8G8B8A8Unorm,
    /// Four 8-bit channels, BGRA order.
    B8G8R8A8Unorm,
    /// Packed 10:10:10:2.
    R10G10B10A2Unorm,
    /// Four 16-bit float channels.
    R16G16B16A16Float,
    /// Two 32-bit float channels.
    R32G32Float,
    /// Four 32-bit float channels.
    R32G32B32A32Float,
    /// 16-bit depth.
    D16Unorm,
    /// 24-bit depth with 8-bit stencil.
    D24UnormS8Uint,
    /// 32-bit float depth.
    D32Float,
    /// 8-bit stencil.
    S8Uint,
    /// BC1 (DXT1).
    Bc1Unorm,
    /// BC2 (DXT3).
    Bc2Unorm,
    /// BC3 (DXT5).
    Bc3Unorm,
    /// BC4.
    Bc4Unorm,
    /// BC5.
    Bc5Unorm,
    /// BC6H unsigned half float.
    Bc6hUf16,
    /// BC7.
    Bc7Unorm,
    /// 8-bit 4:2:0, Y plane followed by interleaved UV.
    Nv12,
    /// 10-bit 4:2:0 in 16-bit containers, interleaved UV.
    P010,
    /// 16-bit 4:2:0, interleaved UV.
    P016,
    /// 4:2:0 with separate U and V planes.
    Imc1,
    /// 4:2:0 with separate U and V planes.
    Imc2,
    /// 4:2:0 with separate U and V planes.
    Imc3,
    /// 4:2:0 with separate U and V planes.
    Imc4,
    /// JPEG 4:2:0.
    JpegYuv420,
    /// JPEG 4:2:2 with vertically halved chroma.
    JpegYuv422V,
    /// JPEG 4:1:1 with chroma height quartered.
    JpegYuv411R,
    /// JPEG 4:1:1 with chroma width quartered.
    JpegYuv411,
    /// JPEG 4:2:2 with horizontally halved chroma.
    JpegYuv422H,
    /// JPEG 4:4:4.
    JpegYuv444,
    /// Planar RGB.
    Rgbp,
    /// Planar BGR.
    Bgrp,
}

impl SurfaceFormat {
    /// Returns the static description of this format.
    pub const fn info(self) -> FormatInfo {
        use SurfaceFormat::*;
        match self {
            Invalid => FormatInfo::plain(0),
            R8Unorm | R8Uint | S8Uint => FormatInfo::plain(8),
            R16Unorm | R16Uint | R8G8Unorm | D16Unorm => FormatInfo::plain(16),
            R32Uint | R32Float | R16G16Unorm | R8G8B8A8Unorm | B8G8R8A8Unorm
            | R10G10B10A2Unorm | D24UnormS8Uint | D32Float => FormatInfo::plain(32),
            R16G16B16A16Float | R32G32Float => FormatInfo::plain(64),
            R32G32B32A32Float => FormatInfo::plain(128),
            Bc1Unorm | Bc4Unorm => FormatInfo::block_compressed(64),
            Bc2Unorm | Bc3Unorm | Bc5Unorm | Bc6hUf16 | Bc7Unorm => {
                FormatInfo::block_compressed(128)
            }
            Nv12 => FormatInfo::uv_packed(8),
            P010 | P016 => FormatInfo::uv_packed(16),
            Imc1 | Imc2 | Imc3 | Imc4 | JpegYuv420 => {
                FormatInfo::three_plane(ChromaSubsampling::HALF)
            }
            JpegYuv422V => FormatInfo::three_plane(ChromaSubsampling::new(1, 2)),
            JpegYuv411R => FormatInfo::three_plane(ChromaSubsampling::new(1, 4)),
            JpegYuv411 => FormatInfo::three_plane(ChromaSubsampling::new(4, 1)),
            JpegYuv422H => FormatInfo::three_plane(ChromaSubsampling::new(2, 1)),
            JpegYuv444 | Rgbp | Bgrp => FormatInfo::three_plane(ChromaSubsampling::NONE),
        }
    }

    /// Bits per element (per block for compressed formats).
    pub const fn bits_per_pixel(self) -> u32 {
        self.info().bits_per_pixel
    }

    /// Returns true for formats with more than one plane.
    pub const fn is_planar(self) -> bool {
        self.info().planes > 1
    }

    /// Returns true for planar formats whose U and V share one interleaved plane.
    pub const fn is_uv_packed(self) -> bool {
        self.info().uv_packed
    }

    /// Returns true for block compressed formats.
    pub const fn is_compressed(self) -> bool {
        self.info().block.is_compressed()
    }

    /// The single-channel format used to describe one plane of a planar surface with the given
    /// bit depth.
    pub const fn plane_format(bits_per_pixel: u32) -> Option<Self> {
        match bits_per_pixel {
            8 => Some(Self::R8Unorm),
            16 => Some(Self::R16Unorm),
            32 => Some(Self::R32Uint),
            _ => None,
        }
    }
}
