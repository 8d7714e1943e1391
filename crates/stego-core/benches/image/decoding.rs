use criterion::{criterion_group, criterion_main, Criterion};
use image::{ImageBuffer, Rgba, RgbaImage};
use stego_core::media::SecretData;
use stego_core::{AlgorithmVariant, StegoAlgorithm};

fn carrier_with_secret(algorithm: AlgorithmVariant) -> RgbaImage {
    let mut img: RgbaImage = ImageBuffer::from_fn(512, 512, |x, y| {
        Rgba([(x % 128 + 64) as u8, (y % 128 + 64) as u8, ((x + y) % 128 + 64) as u8, 255])
    });
    let secret = SecretData::new(b"Hello World!".to_vec()).expect("Cannot create secret");
    algorithm
        .create()
        .embed(&mut img, &secret, None)
        .expect("Failed to prepare the carrier");

    img
}

pub fn image_decoding(c: &mut Criterion) {
    for algorithm in [AlgorithmVariant::Lsb, AlgorithmVariant::ZhaoKoch] {
        let img = carrier_with_secret(algorithm);
        let engine = algorithm.create();

        c.bench_function(&format!("Image Decoding {algorithm}"), |b| {
            b.iter(|| {
                engine.decode(&img, None).expect("Failed to decode 12 bytes");
            })
        });
    }
}

criterion_group!(benches, image_decoding);
criterion_main!(benches);
