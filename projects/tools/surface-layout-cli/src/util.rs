#![cfg(not(tarpaulin_include))]

use surface_layout::common::{
    CubeFace, GpuFlags, InfoFlags, OffsetKind, Plane, PlatformInfo, ResourceType, SurfaceFormat,
};
use surface_layout::{CreateParams, ResourceInfo, SurfaceContext, SurfaceResult};
use surface_layout_swizzle::CpuSwizzleBlt;
use surface_layout_texcalc::Gen9TextureCalc;

/// Surface description shared by every command.
#[derive(Debug, Clone)]
pub struct SurfaceOptions {
    pub platform: PlatformInfo,
    pub resource_type: ResourceType,
    pub format: SurfaceFormat,
    pub width: u64,
    pub height: u32,
    pub depth: u32,
    pub array_size: u32,
    pub max_lod: u32,
    pub samples: u32,
    pub gpu: GpuFlags,
    pub info: InfoFlags,
}

impl SurfaceOptions {
    pub fn create(&self) -> SurfaceResult<ResourceInfo> {
        let context = SurfaceContext::new(self.platform.clone(), Gen9TextureCalc, CpuSwizzleBlt);
        let params = CreateParams::builder(self.resource_type, self.format)
            .width(self.width)
            .height(self.height)
            .depth(self.depth)
            .array_size(self.array_size)
            .max_lod(self.max_lod)
            .samples(self.samples)
            .gpu_flags(self.gpu)
            .info_flags(self.info)
            .build();
        ResourceInfo::create(&context, &params)
    }
}

pub fn parse_platform(value: &str) -> Result<PlatformInfo, String> {
    match value.to_lowercase().as_str() {
        "gen8" => Ok(PlatformInfo::gen8()),
        "gen9" => Ok(PlatformInfo::gen9()),
        "gen11" => Ok(PlatformInfo::gen11()),
        _ => Err(format!(
            "Invalid platform: {value}. Valid platforms are: gen8, gen9, gen11"
        )),
    }
}

pub fn parse_resource_type(value: &str) -> Result<ResourceType, String> {
    match value.to_lowercase().as_str() {
        "1d" => Ok(ResourceType::Texture1D),
        "2d" => Ok(ResourceType::Texture2D),
        "3d" => Ok(ResourceType::Texture3D),
        "cube" => Ok(ResourceType::Cube),
        "primary" => Ok(ResourceType::Primary),
        _ => Err(format!(
            "Invalid resource type: {value}. Valid types are: 1d, 2d, 3d, cube, primary"
        )),
    }
}

/// Matches a format by its name, ignoring case, e.g. `r8g8b8a8unorm` or `Nv12`.
pub fn parse_format(value: &str) -> Result<SurfaceFormat, String> {
    SurfaceFormat::all_values()
        .iter()
        .copied()
        .filter(|format| *format != SurfaceFormat::Invalid)
        .find(|format| format!("{format:?}").eq_ignore_ascii_case(value))
        .ok_or_else(|| format!("Invalid format: {value}"))
}

/// Parses `|` separated flag names, e.g. `RENDER_TARGET | UNIFIED_AUX_SURFACE`.
pub fn parse_gpu_flags(value: &str) -> Result<GpuFlags, String> {
    bitflags::parser::from_str(&value.to_uppercase()).map_err(|e| format!("Invalid gpu flags: {e}"))
}

/// Parses `|` separated flag names, e.g. `TILED_Y | TILED_YS | STD_SWIZZLE`.
pub fn parse_info_flags(value: &str) -> Result<InfoFlags, String> {
    bitflags::parser::from_str(&value.to_uppercase())
        .map_err(|e| format!("Invalid info flags: {e}"))
}

pub fn parse_offset_kind(value: &str) -> Result<OffsetKind, String> {
    match value.to_lowercase().as_str() {
        "lock" => Ok(OffsetKind::Lock),
        "render" => Ok(OffsetKind::Render),
        "std" => Ok(OffsetKind::StdLayout),
        "std-size" => Ok(OffsetKind::StdLayoutSize),
        _ => Err(format!(
            "Invalid offset kind: {value}. Valid kinds are: lock, render, std, std-size"
        )),
    }
}

pub fn parse_plane(value: &str) -> Result<Plane, String> {
    match value.to_lowercase().as_str() {
        "y" => Ok(Plane::Y),
        "u" => Ok(Plane::U),
        "v" => Ok(Plane::V),
        _ => Err(format!("Invalid plane: {value}. Valid planes are: y, u, v")),
    }
}

/// Parses a cube face index, 0 to 5.
pub fn parse_cube_face(value: &str) -> Result<CubeFace, String> {
    value
        .parse::<u32>()
        .ok()
        .and_then(CubeFace::from_index)
        .ok_or_else(|| format!("Invalid cube face: {value}. Valid faces are 0 to 5"))
}
