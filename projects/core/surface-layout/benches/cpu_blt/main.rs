use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use surface_layout::common::{InfoFlags, PlatformInfo, ResourceType, SurfaceFormat};
use surface_layout::{
    BltBuffers, CpuBltDesc, CreateParams, ResourceInfo, SurfaceContext, SysMemLayout,
};
use surface_layout_swizzle::CpuSwizzleBlt;
use surface_layout_texcalc::Gen9TextureCalc;

const WIDTH: u32 = 1024;
const HEIGHT: u32 = 1024;

fn criterion_benchmark(c: &mut Criterion) {
    let context = SurfaceContext::new(PlatformInfo::gen9(), Gen9TextureCalc, CpuSwizzleBlt);
    let mut group = c.benchmark_group("Cpu Blt Upload");
    let size = (WIDTH * HEIGHT * 4) as usize;
    let source: Vec<u8> = (0..size).map(|i| (i * 7 + 3) as u8).collect();
    group.throughput(Throughput::Bytes(size as u64));

    let tilings = [
        ("linear", InfoFlags::LINEAR),
        ("tile x", InfoFlags::TILED_X),
        ("tile y", InfoFlags::TILED_Y),
        ("ys", InfoFlags::TILED_Y | InfoFlags::TILED_YS),
    ];

    for (name, tiling) in tilings {
        let params = CreateParams::builder(ResourceType::Texture2D, SurfaceFormat::R8G8B8A8Unorm)
            .width(WIDTH as u64)
            .height(HEIGHT)
            .info_flags(tiling)
            .build();
        let resource = ResourceInfo::create(&context, &params).unwrap();
        let mut gpu = vec![0u8; resource.total_size() as usize];
        let desc = CpuBltDesc {
            sys: SysMemLayout {
                row_pitch: WIDTH * 4,
                ..SysMemLayout::default()
            },
            ..CpuBltDesc::default()
        };

        group.bench_with_input(BenchmarkId::new(name, "rgba8"), &size, |b, &_size| {
            b.iter(|| {
                resource
                    .cpu_blt(
                        black_box(&desc),
                        BltBuffers::Upload {
                            gpu: black_box(&mut gpu),
                            sys: black_box(&source),
                        },
                    )
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
