use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use surface_layout_common::{
    SurfaceGeometry, SwizzleBlt, SwizzlePattern, SwizzleSurface, SwizzleSurfaceMut,
};
use surface_layout_swizzle::CpuSwizzleBlt;

// 1024x1024 RGBA
const PITCH: u32 = 4096;
const HEIGHT: u32 = 1024;

fn geometry(pattern: Option<&'static SwizzlePattern>, element_size: u32) -> SurfaceGeometry {
    SurfaceGeometry {
        pitch: PITCH,
        height: HEIGHT,
        element_pitch: 4,
        element_size,
        pattern,
        ..SurfaceGeometry::default()
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Swizzle Upload");
    let size = (PITCH * HEIGHT) as usize;
    let linear: Vec<u8> = (0..size).map(|i| (i * 7 + 3) as u8).collect();
    let mut tiled = vec![0u8; size];
    group.throughput(Throughput::Bytes(size as u64));

    let patterns = [
        ("tile x", &SwizzlePattern::INTEL_TILE_X),
        ("tile y", &SwizzlePattern::INTEL_TILE_Y),
        (
            "ys 32bpe",
            SwizzlePattern::standard(false, 1, true, 32).expect("ys pattern"),
        ),
    ];

    for (name, pattern) in patterns {
        for (layout, element_size) in [("packed", 4), ("rgb into rgbx", 3)] {
            group.bench_with_input(BenchmarkId::new(name, layout), &size, |b, &_size| {
                b.iter(|| {
                    CpuSwizzleBlt
                        .blt(
                            SwizzleSurfaceMut {
                                data: black_box(&mut tiled),
                                geometry: geometry(Some(pattern), element_size),
                            },
                            SwizzleSurface {
                                data: black_box(&linear),
                                geometry: geometry(None, element_size),
                            },
                            PITCH,
                            HEIGHT,
                        )
                        .unwrap()
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
