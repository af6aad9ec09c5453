//! Multi-level circuits: repeated squaring with a rescale between the
//! multiplications, walking the modulus chain down to q0.

use ckks_core::{Instance, Parameters, Plaintext};
use num_bigint::BigInt;
use num_complex::Complex64;
use num_traits::Pow;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_message<R: Rng>(rng: &mut R, slots: usize, bound: i64) -> Vec<Complex64> {
    (0..slots)
        .map(|_| {
            Complex64::new(
                rng.gen_range(-bound..=bound) as f64,
                rng.gen_range(-bound..=bound) as f64,
            )
        })
        .collect()
}

/// Encrypt z, square it `depth` times with a rescale after every
/// multiplication, and check the decoded z^(2^depth).
///
/// After k multiply-rescale rounds the plaintext scale is Δ^(2^k) / p^(2^k - 1),
/// so decoding multiplies the coefficients by p^(2^k - 1) and divides by
/// Δ^(2^k).
fn assert_depth_chain(params: Parameters, seed: u64) {
    let depth = params.depth;
    let instance = Instance::new(params).expect("instance");
    let mut rng = StdRng::seed_from_u64(seed);
    let key = instance.generate_key(&mut rng);
    let delta = BigInt::from(1u64 << 30);

    let z = random_message(&mut rng, instance.params.n / 2, 1);
    let mut want: Vec<Complex64> = z.iter().map(|v| v * v).collect();
    for _ in 1..depth {
        for w in &mut want {
            *w = *w * *w;
        }
    }

    let plt = instance.encode(&z, &delta).expect("encode");
    let mut ciph = instance.encrypt(&key.public, &plt, &mut rng);

    for target in (0..depth).rev() {
        let mut alias = ciph.clone();
        ciph = instance
            .mul(&key.evaluation, &mut ciph, &mut alias)
            .expect("mul");
        instance.rs(&mut ciph, target);
        assert_eq!(ciph.level(), target);
    }
    assert_eq!(ciph.modulus(), instance.last_modulus());

    let decrypted = instance.decrypt(&key.secret, &ciph);
    let correction = Pow::pow(instance.p(), (1usize << depth) - 1);
    let corrected = Plaintext::from_polynomial(decrypted.polynomial().scale(&correction));

    let mut scale = delta;
    for _ in 0..depth {
        scale = &scale * &scale;
    }
    let decoded = instance.decode(&corrected, &scale);
    assert_eq!(decoded, want, "depth-{depth} squaring chain mismatch");
}

#[test]
fn depth_2_square_chain() {
    assert_depth_chain(
        Parameters {
            n: 1 << 10,
            depth: 2,
            bit_len_p: 30,
            bit_len_q: 155,
            hamming: 64,
            sigma: 3.4,
        },
        42,
    );
}

/// The depth-2 scenario at the article's secure ring size. Expensive; run
/// with --ignored.
#[test]
#[ignore = "large ring; several minutes in CI"]
fn depth_2_square_chain_article_ring() {
    assert_depth_chain(
        Parameters {
            n: 1 << 13,
            depth: 2,
            bit_len_p: 30,
            bit_len_q: 155,
            hamming: 64,
            sigma: 3.4,
        },
        43,
    );
}
