//! Randomised layout properties over the reference calculator and swizzle.

use proptest::prelude::*;
use surface_layout::common::{
    InfoFlags, OffsetKind, OffsetRequest, PlatformInfo, ResourceType, SurfaceFormat, TileMode,
    SIZE_64KB,
};
use surface_layout::{
    BltBuffers, CpuBltDesc, CreateParams, GpuSubresource, MappingType, ResourceInfo,
    SurfaceContext, SysMemLayout,
};
use surface_layout_swizzle::CpuSwizzleBlt;
use surface_layout_texcalc::Gen9TextureCalc;

fn context() -> SurfaceContext {
    SurfaceContext::new(PlatformInfo::gen9(), Gen9TextureCalc, CpuSwizzleBlt)
}

fn format_strategy() -> impl Strategy<Value = SurfaceFormat> {
    prop_oneof![
        Just(SurfaceFormat::R8Unorm),
        Just(SurfaceFormat::R16Unorm),
        Just(SurfaceFormat::R8G8B8A8Unorm),
        Just(SurfaceFormat::R16G16B16A16Float),
        Just(SurfaceFormat::R32G32B32A32Float),
    ]
}

fn tiling_strategy() -> impl Strategy<Value = InfoFlags> {
    prop_oneof![
        Just(InfoFlags::LINEAR),
        Just(InfoFlags::TILED_X),
        Just(InfoFlags::TILED_Y),
        Just(InfoFlags::TILED_Y | InfoFlags::TILED_YF),
        Just(InfoFlags::TILED_Y | InfoFlags::TILED_YS),
    ]
}

fn params(
    format: SurfaceFormat,
    tiling: InfoFlags,
    width: u64,
    height: u32,
    array_size: u32,
    max_lod: u32,
) -> CreateParams {
    CreateParams::builder(ResourceType::Texture2D, format)
        .width(width)
        .height(height)
        .array_size(array_size)
        .max_lod(max_lod)
        .info_flags(tiling)
        .build()
}

fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8).wrapping_mul(13).wrapping_add(seed))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_size_is_whole_tiles(
        format in format_strategy(),
        tiling in tiling_strategy(),
        width in 1u64..700,
        height in 1u32..700,
        array_size in 1u32..4,
        max_lod in 0u32..6,
    ) {
        let context = context();
        let Ok(resource) = ResourceInfo::create(
            &context,
            &params(format, tiling, width, height, array_size, max_lod),
        ) else {
            return Ok(());
        };
        let surf = resource.surface();
        prop_assert!(surf.size > 0);
        if surf.tile_mode != TileMode::Linear {
            let tile_size = surf.tile_info(context.platform()).logical_size as u64;
            prop_assert_eq!(surf.size % tile_size, 0);
        }
        prop_assert_eq!(resource.total_size(), surf.size);
    }

    #[test]
    fn prop_first_subresource_is_inside_the_surface(
        format in format_strategy(),
        tiling in tiling_strategy(),
        width in 1u64..512,
        height in 1u32..512,
        max_lod in 0u32..4,
    ) {
        let Ok(resource) = ResourceInfo::create(
            &context(),
            &params(format, tiling, width, height, 1, max_lod),
        ) else {
            return Ok(());
        };
        for kind in [OffsetKind::Lock, OffsetKind::Render] {
            for mip in 0..=resource.max_lod() {
                let offset = resource.get_offset(&OffsetRequest::new(kind).mip(mip)).unwrap();
                prop_assert!(offset.offset < resource.total_size());
            }
        }
    }

    #[test]
    fn prop_whole_mip_round_trips(
        format in format_strategy(),
        tiling in tiling_strategy(),
        width in 1u64..300,
        height in 1u32..300,
        seed in any::<u8>(),
    ) {
        let Ok(resource) = ResourceInfo::create(
            &context(),
            &params(format, tiling, width, height, 1, 0),
        ) else {
            return Ok(());
        };
        let bytes_per_pixel = format.bits_per_pixel() as usize / 8;
        let row_pitch = width as usize * bytes_per_pixel;
        let source = pattern(row_pitch * height as usize, seed);
        let desc = CpuBltDesc {
            gpu: GpuSubresource::default(),
            sys: SysMemLayout {
                row_pitch: row_pitch as u32,
                ..SysMemLayout::default()
            },
            ..CpuBltDesc::default()
        };

        let mut gpu = vec![0u8; resource.total_size() as usize];
        resource.cpu_blt(&desc, BltBuffers::Upload { gpu: &mut gpu, sys: &source }).unwrap();
        let mut read_back = vec![0u8; source.len()];
        resource.cpu_blt(&desc, BltBuffers::Download { gpu: &gpu, sys: &mut read_back }).unwrap();
        prop_assert_eq!(read_back, source);
    }

    #[test]
    fn prop_spans_tile_the_resource(
        format in format_strategy(),
        width in 1u64..1024,
        height in 1u32..1024,
        array_size in 1u32..4,
    ) {
        let tiling = InfoFlags::TILED_Y | InfoFlags::TILED_YS | InfoFlags::STD_SWIZZLE;
        let Ok(resource) = ResourceInfo::create(
            &context(),
            &params(format, tiling, width, height, array_size, 0),
        ) else {
            return Ok(());
        };
        let mut spans = resource
            .mapping_spans(MappingType::Gen9YsToStdSwizzle)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        let mapped: u64 = spans.iter().map(|span| span.size).sum();
        prop_assert_eq!(mapped, resource.total_size());

        spans.sort_by_key(|span| span.virtual_offset);
        for pair in spans.windows(2) {
            prop_assert!(pair[0].virtual_offset + pair[0].size <= pair[1].virtual_offset);
        }
        for span in &spans {
            prop_assert_eq!(span.size % SIZE_64KB, 0);
        }
    }

    #[test]
    fn prop_mip_spans_never_overlap(
        format in format_strategy(),
        width in 1u64..2048,
        height in 1u32..2048,
        array_size in 1u32..4,
        max_lod in 1u32..11,
    ) {
        let tiling = InfoFlags::TILED_Y | InfoFlags::TILED_YS | InfoFlags::STD_SWIZZLE;
        let Ok(resource) = ResourceInfo::create(
            &context(),
            &params(format, tiling, width, height, array_size, max_lod),
        ) else {
            return Ok(());
        };
        let spans = resource
            .mapping_spans(MappingType::Gen9YsToStdSwizzle)
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        // Padding between mip levels is never mapped.
        let mapped: u64 = spans.iter().map(|span| span.size).sum();
        prop_assert!(mapped <= resource.total_size());
        for span in &spans {
            prop_assert!(span.size > 0);
            prop_assert_eq!(span.size % SIZE_64KB, 0);
        }

        let mut by_virtual = spans.clone();
        by_virtual.sort_by_key(|span| span.virtual_offset);
        for pair in by_virtual.windows(2) {
            prop_assert!(pair[0].virtual_offset + pair[0].size <= pair[1].virtual_offset);
        }
        let mut by_physical = spans;
        by_physical.sort_by_key(|span| span.physical_offset);
        for pair in by_physical.windows(2) {
            prop_assert!(pair[0].physical_offset + pair[0].size <= pair[1].physical_offset);
        }
    }
}
