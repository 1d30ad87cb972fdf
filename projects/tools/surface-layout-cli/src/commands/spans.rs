use crate::error::CliError;
use crate::util::*;
use argh::FromArgs;
use surface_layout::common::{GpuFlags, InfoFlags, PlatformInfo, ResourceType, SurfaceFormat};
use surface_layout::MappingType;

#[derive(FromArgs, Debug)]
/// List the page mapping spans of a standard swizzle Ys surface
#[argh(subcommand, name = "spans")]
pub struct SpansCmd {
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

impl SpansCmd {
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

pub fn handle_spans_command(cmd: SpansCmd) -> Result<(), CliError> {
    let resource = cmd.options().create()?;
    let flags = resource.flags();
    let mappable = flags.uses_std_swizzle()
        && resource.tile_mode().is_ys()
        && resource.size_aux_surface() == 0
        && !flags.is_depth()
        && !flags.is_separate_stencil()
        && !flags.is_mmc()
        && matches!(
            resource.resource_type(),
            ResourceType::Texture2D | ResourceType::Texture3D | ResourceType::Cube
        );
    if !mappable {
        return Err(CliError::NotMappable);
    }

    println!("{:>18} {:>18} {:>12}", "physical", "virtual", "size");
    let mut count = 0;
    for span in resource.mapping_spans(MappingType::Gen9YsToStdSwizzle) {
        let span = span?;
        println!(
            "{:>#18x} {:>#18x} {:>12}",
            span.physical_offset, span.virtual_offset, span.size
        );
        count += 1;
    }
    println!("{count} spans covering {} bytes", resource.total_size());
    Ok(())
}
