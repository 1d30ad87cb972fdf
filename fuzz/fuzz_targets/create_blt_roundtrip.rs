#![no_main]

// Creates resources from arbitrary descriptions, then uploads and reads back one mip of every
// resource that was accepted.

use libfuzzer_sys::{arbitrary, fuzz_target};
use surface_layout::common::{InfoFlags, PlatformInfo, ResourceType, SurfaceFormat};
use surface_layout::{
    BltBuffers, CpuBltDesc, CreateParams, GpuSubresource, ResourceInfo, SurfaceContext,
    SysMemLayout,
};
use surface_layout_swizzle::CpuSwizzleBlt;
use surface_layout_texcalc::Gen9TextureCalc;

const FORMATS: [SurfaceFormat; 5] = [
    SurfaceFormat::R8Unorm,
    SurfaceFormat::R16Unorm,
    SurfaceFormat::R8G8B8A8Unorm,
    SurfaceFormat::R16G16B16A16Float,
    SurfaceFormat::R32G32B32A32Float,
];

const TILINGS: [InfoFlags; 6] = [
    InfoFlags::LINEAR,
    InfoFlags::TILED_X,
    InfoFlags::TILED_Y,
    InfoFlags::TILED_YF,
    InfoFlags::TILED_YS,
    InfoFlags::TILED_W,
];

#[derive(Clone, Debug, arbitrary::Arbitrary)]
pub struct Surface {
    format: u8,
    tiling: u8,
    width: u16,
    height: u16,
    array_size: u8,
    max_lod: u8,
    mip: u8,
    seed: u8,
}

fuzz_target!(|input: Surface| {
    let format = FORMATS[input.format as usize % FORMATS.len()];
    let params = CreateParams::builder(ResourceType::Texture2D, format)
        .width(input.width as u64 % 1024 + 1)
        .height(input.height as u32 % 1024 + 1)
        .array_size(input.array_size as u32 % 4 + 1)
        .max_lod(input.max_lod as u32 % 8)
        .info_flags(TILINGS[input.tiling as usize % TILINGS.len()])
        .build();
    let context = SurfaceContext::new(PlatformInfo::gen9(), Gen9TextureCalc, CpuSwizzleBlt);
    let Ok(resource) = ResourceInfo::create(&context, &params) else {
        return;
    };
    assert!(resource.total_size() > 0);

    let mip = input.mip as u32 % (resource.max_lod() + 1);
    let bytes_per_pixel = format.bits_per_pixel() as usize / 8;
    let row_pitch = resource.surface().mip_width(mip) as usize * bytes_per_pixel;
    let rows = resource.surface().mip_height(mip) as usize;
    let source: Vec<u8> = (0..row_pitch * rows)
        .map(|i| (i as u8).wrapping_mul(29).wrapping_add(input.seed))
        .collect();

    let desc = CpuBltDesc {
        gpu: GpuSubresource {
            mip_level: mip,
            ..GpuSubresource::default()
        },
        sys: SysMemLayout {
            row_pitch: row_pitch as u32,
            ..SysMemLayout::default()
        },
        ..CpuBltDesc::default()
    };
    let mut gpu = vec![0u8; resource.total_size() as usize];
    if resource
        .cpu_blt(&desc, BltBuffers::Upload { gpu: &mut gpu, sys: &source })
        .is_err()
    {
        return;
    }
    let mut read_back = vec![0u8; source.len()];
    resource
        .cpu_blt(&desc, BltBuffers::Download { gpu: &gpu, sys: &mut read_back })
        .unwrap();
    assert_eq!(read_back, source, "round trip mismatch");
});
