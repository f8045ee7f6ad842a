use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::hint::black_box;

use imgconv_image::Image;
use imgconv_io::bmp;

fn bench_bmp(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bmp");
    let mut rng = StdRng::seed_from_u64(42);

    for (width, height) in [(255, 224), (511, 448), (1023, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        let mut data = vec![0u8; width * height * 3];
        rng.fill(&mut data[..]);
        let image = Image::<u8, 3>::new([*width, *height].into(), data).unwrap();
        let encoded = bmp::encode_image_bmp(&image).unwrap();

        group.bench_with_input(
            BenchmarkId::new("encode", &parameter_string),
            &image,
            |b, i| b.iter(|| black_box(bmp::encode_image_bmp(black_box(i)))),
        );

        group.bench_with_input(
            BenchmarkId::new("decode", &parameter_string),
            &encoded,
            |b, i| b.iter(|| black_box(bmp::decode_image_bmp(black_box(i)))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_bmp);
criterion_main!(benches);
