#![no_main]

// Walks every mapping span of arbitrary standard swizzle Ys resources and checks the spans
// account for the whole resource exactly once.

use libfuzzer_sys::{arbitrary, fuzz_target};
use surface_layout::common::{InfoFlags, PlatformInfo, ResourceType, SurfaceFormat, SIZE_64KB};
use surface_layout::{CreateParams, MappingType, ResourceInfo, SurfaceContext};
use surface_layout_swizzle::CpuSwizzleBlt;
use surface_layout_texcalc::Gen9TextureCalc;

const FORMATS: [SurfaceFormat; 5] = [
    SurfaceFormat::R8Unorm,
    SurfaceFormat::R16Unorm,
    SurfaceFormat::R8G8B8A8Unorm,
    SurfaceFormat::R16G16B16A16Float,
    SurfaceFormat::R32G32B32A32Float,
];

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Surface {
    format: u8,
    three_d: bool,
    width: u16,
    height: u16,
    depth_or_array: u8,
}

fuzz_target!(|input: Surface| {
    let format = FORMATS[input.format as usize % FORMATS.len()];
    let layers = input.depth_or_array as u32 % 8 + 1;
    let builder = if input.three_d {
        CreateParams::builder(ResourceType::Texture3D, format).depth(layers)
    } else {
        CreateParams::builder(ResourceType::Texture2D, format).array_size(layers)
    };
    let params = builder
        .width(input.width as u64 % 2048 + 1)
        .height(input.height as u32 % 2048 + 1)
        .info_flags(InfoFlags::TILED_YS | InfoFlags::STD_SWIZZLE)
        .build();
    let context = SurfaceContext::new(PlatformInfo::gen9(), Gen9TextureCalc, CpuSwizzleBlt);
    let Ok(resource) = ResourceInfo::create(&context, &params) else {
        return;
    };

    let total = resource.total_size();
    let limit = total / SIZE_64KB + 1;
    let mut mapped = 0;
    let mut covered = vec![false; (total / SIZE_64KB) as usize];
    for (index, span) in resource
        .mapping_spans(MappingType::Gen9YsToStdSwizzle)
        .enumerate()
    {
        assert!((index as u64) < limit, "span walk does not terminate");
        let span = span.unwrap();
        assert_eq!(span.size % SIZE_64KB, 0);
        let first = (span.virtual_offset / SIZE_64KB) as usize;
        for tile in first..first + (span.size / SIZE_64KB) as usize {
            assert!(!covered[tile], "tile {tile} mapped twice");
            covered[tile] = true;
        }
        mapped += span.size;
    }
    assert_eq!(mapped, total);
});
