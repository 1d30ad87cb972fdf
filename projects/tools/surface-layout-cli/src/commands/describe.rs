use crate::error::CliError;
use crate::util::*;
use argh::FromArgs;
use surface_layout::common::{
    GpuFlags, InfoFlags, Plane, PlatformInfo, ResourceType, SurfaceFormat, TextureInfo,
};

#[derive(FromArgs, Debug)]
/// Print the computed layout of a surface
#[argh(subcommand, name = "describe")]
pub struct DescribeCmd {
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
}

impl DescribeCmd {
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

pub fn handle_describe_command(cmd: DescribeCmd) -> Result<(), CliError> {
    let resource = cmd.options().create()?;

    print_texture("surface", resource.surface());
    for lod in 0..=resource.max_lod() {
        let origin = resource.surface().offset_info.mip_origin[lod as usize];
        println!("  mip {lod}: origin ({}, {})", origin.x, origin.y);
    }
    if resource.surface().flags.has_redescribed_planes() {
        let planes = resource.surface().plane_count();
        for &plane in &Plane::ALL[..planes] {
            print_texture(&format!("plane {plane:?}"), resource.plane(plane));
        }
    }
    if resource.aux_surface().size != 0 {
        print_texture("aux", resource.aux_surface());
    }
    if resource.secondary_aux_surface().size != 0 {
        print_texture("secondary aux", resource.secondary_aux_surface());
    }

    println!("main size: {}", resource.size_main_surface());
    println!("aux size: {}", resource.size_aux_surface());
    println!("total size: {}", resource.total_size());
    println!("base alignment: {:#x}", resource.base_alignment());
    println!("64KB page suitable: {}", resource.is_64kb_page_suitable());
    if resource.tile_mode().is_tiled_resource() {
        let packing = resource.tiled_resource_mip_packing();
        println!(
            "packed mips: {} in {} tiles, tail starts at lod {}",
            packing.num_packed_mips,
            packing.num_tiles_for_packed_mips,
            resource.packed_mip_tail_start_lod()
        );
    }
    Ok(())
}

fn print_texture(name: &str, tex: &TextureInfo) {
    println!("{name}:");
    println!("  format: {:?} ({} bpp)", tex.format, tex.bits_per_pixel);
    println!("  extent: {}x{}x{}", tex.base_width, tex.base_height, tex.depth);
    println!("  tile mode: {:?}", tex.tile_mode);
    println!("  pitch: {}", tex.pitch);
    println!("  size: {}", tex.size);
    println!(
        "  alignment: h {} v {} d {}, qpitch {}",
        tex.alignment.h_align, tex.alignment.v_align, tex.alignment.d_align, tex.alignment.qpitch
    );
}
