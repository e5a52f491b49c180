// SPDX-License-Identifier: MPL-2.0
use criterion::{criterion_group, criterion_main, Criterion};
use iced_compressor::media::dimensions::{target_size, DimensionBounds};
use iced_compressor::media::{
    CompressOptions, CompressionSettings, Compressor, DimensionToggles, ImageCompressor,
    SourceImage,
};
use image_rs::{ImageFormat, RgbImage};
use std::hint::black_box;
use std::io::Cursor;

fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbImage::from_fn(width, height, |x, y| {
        image_rs::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode bench fixture");
    bytes
}

fn compression_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression");
    group.sample_size(20);

    let source = SourceImage {
        bytes: gradient_png(1280, 960).into(),
        mime_type: "image/png".into(),
    };
    let compressor = ImageCompressor::default();

    let to_jpeg = CompressOptions::from_settings(
        &CompressionSettings {
            convert_size: Some(0),
            ..CompressionSettings::default()
        },
        DimensionToggles::default(),
    );
    group.bench_function("png_to_jpeg_1280x960", |b| {
        b.iter(|| black_box(compressor.compress(&source, &to_jpeg)))
    });

    let downscale = CompressOptions::from_settings(
        &CompressionSettings {
            max_width: Some(640),
            max_height: Some(480),
            convert_size: Some(0),
            ..CompressionSettings::default()
        },
        DimensionToggles::default(),
    );
    group.bench_function("downscale_to_640x480", |b| {
        b.iter(|| black_box(compressor.compress(&source, &downscale)))
    });

    group.finish();
}

fn target_size_benchmark(c: &mut Criterion) {
    let bounds = DimensionBounds {
        max_width: Some(1920),
        max_height: Some(1080),
        width: Some(800),
        height: Some(600),
    };
    c.bench_function("target_size", |b| {
        b.iter(|| target_size(black_box(4000), black_box(3000), &bounds))
    });
}

criterion_group!(benches, compression_benchmark, target_size_benchmark);
criterion_main!(benches);
