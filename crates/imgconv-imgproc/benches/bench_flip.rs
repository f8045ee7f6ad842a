use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use imgconv_image::Image;
use imgconv_imgproc::{core, flip};

fn bench_flip(c: &mut Criterion) {
    let mut group = c.benchmark_group("Flip");

    for (width, height) in [(256, 224), (512, 448), (1024, 896)].iter() {
        group.throughput(criterion::Throughput::Elements((*width * *height) as u64));

        let parameter_string = format!("{}x{}", width, height);

        // input image
        let image_size = [*width, *height].into();
        let image = Image::<u8, 3>::new(image_size, vec![0u8; width * height * 3]).unwrap();

        group.bench_with_input(
            BenchmarkId::new("horizontal_flip", &parameter_string),
            &image,
            |b, i| {
                let mut dst = i.clone();
                b.iter(|| flip::horizontal_flip(black_box(&mut dst)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("vertical_flip", &parameter_string),
            &image,
            |b, i| {
                let mut dst = i.clone();
                b.iter(|| flip::vertical_flip(black_box(&mut dst)))
            },
        );

        group.bench_with_input(
            BenchmarkId::new("negate", &parameter_string),
            &image,
            |b, i| {
                let mut dst = i.clone();
                b.iter(|| core::negate(black_box(&mut dst)))
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_flip);
criterion_main!(benches);
