//! ECDSA, EdDSA and scalar multiplication benchmarks

use core::hint::black_box;
use criterion::{Criterion, criterion_group, criterion_main};
use elliptic::{BigInt, CurveName, Ec, EdDsa, SignOptions, preset, x25519};
use hex_literal::hex;

const D: [u8; 32] = hex!("bb488aef416a41d7680d1cf01d70f59b60d7f5f77e30e78b8bf9d2d882f156a6");
const Z: [u8; 32] = hex!("e33580eb6ed022aed6af20d92237635e7c20c5f1bcd6aee88182ed7180f6e267");

fn bench_ecdsa(c: &mut Criterion) {
    let mut group = c.benchmark_group("ecdsa");

    for name in [CurveName::Secp256k1, CurveName::P256] {
        let ec = Ec::new(name).unwrap();
        let key = ec.key_from_private(&D).unwrap();
        let opts = SignOptions::default();

        group.bench_function(format!("sign/{name}"), |b| {
            b.iter(|| key.sign(&black_box(Z), &opts).unwrap())
        });

        let sig = key.sign(&Z, &opts).unwrap();
        key.get_public().unwrap();
        group.bench_function(format!("verify/{name}"), |b| {
            b.iter(|| assert!(key.verify(&black_box(Z), black_box(&sig))))
        });
    }

    group.finish();
}

fn bench_eddsa(c: &mut Criterion) {
    let mut group = c.benchmark_group("eddsa");
    let ed = EdDsa::new(CurveName::Ed25519).unwrap();
    let key = ed.key_from_secret(&D).unwrap();

    group.bench_function("sign/ed25519", |b| {
        b.iter(|| key.sign(&black_box(Z)).unwrap())
    });

    let sig = key.sign(&Z).unwrap();
    group.bench_function("verify/ed25519", |b| {
        b.iter(|| assert!(key.verify(&black_box(Z), black_box(&sig))))
    });

    group.finish();
}

fn bench_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("mul");
    let k = BigInt::from_be_bytes(&D);

    for name in [CurveName::Secp256k1, CurveName::P256, CurveName::P521] {
        let preset = preset(name).unwrap();
        let g = preset.g();
        let p = g.mul(&BigInt::from(3u32));

        group.bench_function(format!("fixed_base/{name}"), |b| {
            b.iter(|| g.mul(black_box(&k)))
        });
        group.bench_function(format!("variable_base/{name}"), |b| {
            b.iter(|| p.mul(black_box(&k)))
        });
    }

    group.bench_function("x25519", |b| {
        b.iter(|| x25519(black_box(D), black_box(Z)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_ecdsa, bench_eddsa, bench_mul);
criterion_main!(benches);
