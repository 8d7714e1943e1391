use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgba, RgbaImage};
use stego_core::media::SecretData;
use stego_core::{AlgorithmVariant, EmbeddingSettings, StegoAlgorithm};

fn carrier() -> RgbaImage {
    ImageBuffer::from_fn(512, 512, |x, y| {
        Rgba([(x % 128 + 64) as u8, (y % 128 + 64) as u8, ((x + y) % 128 + 64) as u8, 255])
    })
}

pub fn image_embedding(c: &mut Criterion) {
    let img = carrier();
    let secret = SecretData::new(vec![0xa5; 1024]).expect("Cannot create secret");
    // one bit per 8x8 block, 4096 blocks in total
    let small_secret = SecretData::new(vec![0xa5; 256]).expect("Cannot create secret");
    let settings = EmbeddingSettings::default().with_key("bench");

    c.bench_function("Image Embedding LSB", |b| {
        b.iter(|| {
            let mut target = img.clone();
            AlgorithmVariant::Lsb
                .create()
                .embed(&mut target, black_box(&secret), Some(&settings))
                .expect("Failed to embed 1024 bytes");
        })
    });

    c.bench_function("Image Embedding Zhao-Koch", |b| {
        b.iter(|| {
            let mut target = img.clone();
            AlgorithmVariant::ZhaoKoch
                .create()
                .embed(&mut target, black_box(&small_secret), Some(&settings))
                .expect("Failed to embed 256 bytes");
        })
    });
}

criterion_group!(benches, image_embedding);
criterion_main!(benches);
