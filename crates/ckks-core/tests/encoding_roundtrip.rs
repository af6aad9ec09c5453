//! Encoding round-trip and ring-homomorphism scenarios on a mid-size ring.

use ckks_core::negacyclic::{mul_simple, ZMultiplier};
use ckks_core::{Instance, Parameters, Plaintext};
use num_bigint::BigInt;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn medium_instance() -> Instance {
    Instance::new(Parameters {
        n: 1 << 10,
        depth: 3,
        bit_len_p: 30,
        bit_len_q: 155,
        hamming: 64,
        sigma: 3.4,
    })
    .expect("medium instance")
}

fn random_message<R: Rng>(rng: &mut R, slots: usize, bound: i64) -> Vec<Complex64> {
    (0..slots)
        .map(|_| {
            Complex64::new(
                rng.gen_range(0..bound) as f64,
                rng.gen_range(0..bound) as f64,
            )
        })
        .collect()
}

#[test]
fn encode_decode_roundtrip() {
    let instance = medium_instance();
    let mut rng = StdRng::seed_from_u64(42);
    let delta = BigInt::from(1u64 << 31);

    let z = random_message(&mut rng, instance.params.n / 2, 1 << 14);
    let plt = instance.encode(&z, &delta).expect("encode");
    let decoded = instance.decode(&plt, &delta);

    assert_eq!(decoded, z, "encode/decode did not round-trip");
}

#[test]
fn encode_is_a_ring_homomorphism() {
    let instance = medium_instance();
    let mut rng = StdRng::seed_from_u64(42);
    let delta = BigInt::from(1u64 << 20);

    let bound = 300;
    let z = random_message(&mut rng, instance.params.n / 2, bound);
    let w = random_message(&mut rng, instance.params.n / 2, bound);
    let want: Vec<Complex64> = z.iter().zip(&w).map(|(a, b)| a * b).collect();

    let plt_z = instance.encode(&z, &delta).expect("encode z");
    let plt_w = instance.encode(&w, &delta).expect("encode w");

    // Multiply the encodings in the ring, then decode at Δ².
    let multiplier = ZMultiplier::new(instance.params.n);
    let product = multiplier.mul(plt_z.polynomial(), plt_w.polynomial());
    let plt_product = Plaintext::from_polynomial(product);

    let delta_squared = &delta * &delta;
    let decoded = instance.decode(&plt_product, &delta_squared);
    assert_eq!(decoded, want, "slotwise product mismatch");
}

#[test]
fn fast_multiplier_agrees_with_schoolbook_on_encodings() {
    let instance = medium_instance();
    let mut rng = StdRng::seed_from_u64(7);
    let delta = BigInt::from(1u64 << 20);

    let z = random_message(&mut rng, instance.params.n / 2, 50);
    let w = random_message(&mut rng, instance.params.n / 2, 50);
    let plt_z = instance.encode(&z, &delta).expect("encode z");
    let plt_w = instance.encode(&w, &delta).expect("encode w");

    let multiplier = ZMultiplier::new(instance.params.n);
    assert_eq!(
        multiplier.mul(plt_z.polynomial(), plt_w.polynomial()),
        mul_simple(plt_z.polynomial(), plt_w.polynomial())
    );
}

#[test]
fn repeated_encoding_is_bit_stable() {
    let instance = medium_instance();
    let mut rng = StdRng::seed_from_u64(9);
    let delta = BigInt::from(1u64 << 31);
    let z = random_message(&mut rng, instance.params.n / 2, 1 << 10);

    let reference = instance.encode(&z, &delta).expect("encode");
    let reference_decoded = instance.decode(&reference, &delta);
    for _ in 0..5 {
        let again = instance.encode(&z, &delta).expect("encode");
        assert_eq!(again.polynomial(), reference.polynomial());
        assert_eq!(instance.decode(&again, &delta), reference_decoded);
    }
}
