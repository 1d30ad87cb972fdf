use crate::error::CliError;
use crate::util::*;
use argh::FromArgs;
use surface_layout::common::{
    CubeFace, GpuFlags, InfoFlags, OffsetKind, OffsetRequest, Plane, PlatformInfo, ResourceType,
    SurfaceFormat,
};

#[derive(FromArgs, Debug)]
/// Resolve the offset of a sub-resource
#[argh(subcommand, name = "offset")]
pub struct OffsetCmd {
    /// surface format name, e.g. r8g8b8a8unorm, bc1unorm, nv12
    #[argh(option, from_str_fn(parse_format))]
    pub format: SurfaceFormat,

    /// width in pixels
    #[argh(option)]
    pub width: u64,

    /// height in pixels [default: 1]
    #[argh(option, default = "1")]
    pub height: u32,

    /// depth of a 3D surface [default: 1]
    #[argh(option, default = "1")]
    pub depth: u32,

    /// number of array slices [default: 1]
    #[argh(option, default = "1")]
    pub array_size: u32,

    /// highest mip level [default: 0]
    #[argh(option, default = "0")]
    pub max_lod: u32,

    /// samples per pixel [default: 1]
    #[argh(option, default = "1")]
    pub samples: u32,

    /// resource type (1d, 2d, 3d, cube, primary) [default: 2d]
    #[argh(option, default = "ResourceType::Texture2D", from_str_fn(parse_resource_type))]
    pub resource_type: ResourceType,

    /// platform preset (gen8, gen9, gen11) [default: gen9]
    #[argh(option, default = "PlatformInfo::gen9()", from_str_fn(parse_platform))]
    pub platform: PlatformInfo,

    /// usage flags, e.g. "RENDER_TARGET | UNIFIED_AUX_SURFACE"
    #[argh(option, default = "GpuFlags::empty()", from_str_fn(parse_gpu_flags))]
    pub gpu: GpuFlags,

    /// layout flags, e.g. "TILED_Y | TILED_YS"
    #[argh(option, default = "InfoFlags::empty()", from_str_fn(parse_info_flags))]
    pub info: InfoFlags,

    /// address view (lock, render, std, std-size) [default: render]
    #[argh(option, default = "OffsetKind::Render", from_str_fn(parse_offset_kind))]
    pub kind: OffsetKind,

    /// mip level [default: 0]
    #[argh(option, default = "0")]
    pub mip: u32,

    /// array index [default: 0]
    #[argh(option, default = "0")]
    pub array_index: u32,

    /// depth slice of a 3D surface [default: 0]
    #[argh(option, default = "0")]
    pub slice: u32,

    /// cube face, 0 to 5 [default: 0]
    #[argh(option, default = "CubeFace::PositiveX", from_str_fn(parse_cube_face))]
    pub face: CubeFace,

    /// plane of a planar surface (y, u, v)
    #[argh(option, from_str_fn(parse_plane))]
    pub plane: Option<Plane>,
}

impl OffsetCmd {
    fn options(&self) -> SurfaceOptions {
        SurfaceOptions {
            platform: self.platform.clone(),
            resource_type: self.resource_type,
            format: self.format,
            width: self.width,
            height: self.height,
            depth: self.depth,
            array_size: self.array_size,
            max_lod: self.max_lod,
            samples: self.samples,
            gpu: self.gpu,
            info: self.info,
        }
    }
}

pub fn handle_offset_command(cmd: OffsetCmd) -> Result<(), CliError> {
    let resource = cmd.options().create()?;
    let request = OffsetRequest {
        kind: cmd.kind,
        mip_level: cmd.mip,
        array_index: cmd.array_index,
        slice: cmd.slice,
        cube_face: cmd.face,
        plane: cmd.plane,
    };
    let resolved = resource.get_offset(&request)?;

    match cmd.kind {
        OffsetKind::StdLayoutSize => println!("size: {}", resolved.offset),
        _ => {
            println!("offset: {:#x}", resolved.offset);
            println!("x offset: {}", resolved.x_offset);
            println!("y offset: {}", resolved.y_offset);
            println!("z offset: {}", resolved.z_offset);
            println!("row pitch: {}", resolved.row_pitch);
            println!("depth pitch: {}", resolved.depth_pitch);
        }
    }
    Ok(())
}
