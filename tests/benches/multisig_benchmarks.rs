//! # Multisig Benchmarks
//!
//! Attestation verification throughput per scheme and batch size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::time::Duration;
use xl_01_multisig::{public_key_hex, sign_message, Multisig, MultisigApi, MultisigEngine, SignatureScheme};

fn signed_batch(scheme: SignatureScheme, size: usize, message: &[u8]) -> Multisig {
    let mut multisig = Multisig::new(message.to_vec());
    for i in 0..size {
        let private_key = format!("{:064x}", i + 1);
        let public_key = public_key_hex(scheme, &private_key).unwrap();
        let signature = sign_message(scheme, &private_key, message).unwrap();
        multisig.add_signature(public_key, signature);
    }
    multisig
}

fn bench_multisig_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("xl-01-multisig");
    group.measurement_time(Duration::from_secs(10));
    let message = br#"{"asset_id":"A1","dltID":"DLT-A"}"#;

    for scheme in [
        SignatureScheme::Secp256k1Sha256,
        SignatureScheme::Secp256k1Keccak256,
        SignatureScheme::Ed25519,
    ] {
        let engine = MultisigEngine::new(scheme);
        for size in [1usize, 10, 50] {
            let multisig = signed_batch(scheme, size, message);
            group.throughput(Throughput::Elements(size as u64));
            group.bench_with_input(
                BenchmarkId::new(scheme.as_str(), size),
                &multisig,
                |b, multisig| b.iter(|| black_box(engine.verify(multisig).unwrap())),
            );
        }
    }
    group.finish();
}

criterion_group!(benches, bench_multisig_verify);
criterion_main!(benches);
