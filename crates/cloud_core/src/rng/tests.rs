//! Unit tests for the random source.
//!
//! Covers seed reproducibility, output ranges, clone behaviour and basic
//! moments of the normal generator.

use super::*;
use proptest::prelude::*;

#[test]
fn test_seed_is_recorded() {
    let rng = CloudRng::from_seed(42);
    assert_eq!(rng.seed(), 42);
}

#[test]
fn test_seed_reproducibility() {
    let mut rng1 = CloudRng::from_seed(12345);
    let mut rng2 = CloudRng::from_seed(12345);

    for _ in 0..100 {
        assert_eq!(rng1.gen_uniform(), rng2.gen_uniform());
        assert_eq!(rng1.gen_normal(), rng2.gen_normal());
    }
}

#[test]
fn test_uniform_range() {
    let mut rng = CloudRng::from_seed(42);

    for _ in 0..10_000 {
        let value = rng.gen_uniform();
        assert!(value >= 0.0, "Uniform value {} is below 0", value);
        assert!(value < 1.0, "Uniform value {} is >= 1", value);
    }
}

#[test]
fn test_symmetric_range() {
    let mut rng = CloudRng::from_seed(3);

    for _ in 0..10_000 {
        let value = rng.gen_symmetric(2.5);
        assert!((-2.5..2.5).contains(&value), "value {} out of range", value);
    }
}

#[test]
fn test_symmetric_consumes_one_uniform() {
    let mut a = CloudRng::from_seed(99);
    let mut b = CloudRng::from_seed(99);

    let _ = a.gen_symmetric(1.0);
    let _ = b.gen_uniform();

    assert_eq!(a.gen_uniform(), b.gen_uniform());
}

#[test]
fn test_fill_matches_single_draws() {
    let mut batch = CloudRng::from_seed(8);
    let mut single = CloudRng::from_seed(8);

    let mut buffer = vec![0.0; 64];
    batch.fill_normal(&mut buffer);

    for &value in &buffer {
        assert_eq!(value, single.gen_normal());
    }
}

#[test]
fn test_clone_continues_identically() {
    let mut rng = CloudRng::from_seed(5);
    let _ = rng.gen_uniform();

    let mut fork = rng.clone();
    assert_eq!(rng.gen_uniform(), fork.gen_uniform());
}

#[test]
fn test_empty_buffer() {
    let mut rng = CloudRng::from_seed(42);
    let mut empty: Vec<f64> = vec![];

    rng.fill_uniform(&mut empty);
    rng.fill_normal(&mut empty);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_uniform_in_range(seed in any::<u64>(), size in 1..5000usize) {
        let mut rng = CloudRng::from_seed(seed);
        let mut buffer = vec![0.0; size];
        rng.fill_uniform(&mut buffer);

        for (i, &v) in buffer.iter().enumerate() {
            prop_assert!(
                (0.0..1.0).contains(&v),
                "Uniform value at index {} is out of range: {} (seed={})",
                i, v, seed
            );
        }
    }

    #[test]
    fn prop_normal_moments(seed in any::<u64>()) {
        let mut rng = CloudRng::from_seed(seed);
        let sample_size = 100_000;
        let mut buffer = vec![0.0; sample_size];
        rng.fill_normal(&mut buffer);

        let mean: f64 = buffer.iter().sum::<f64>() / sample_size as f64;
        let variance: f64 = buffer.iter()
            .map(|&x| (x - mean).powi(2))
            .sum::<f64>() / sample_size as f64;

        prop_assert!(mean.abs() < 0.05, "mean {:.4} too far from 0 (seed={})", mean, seed);
        prop_assert!(
            (variance - 1.0).abs() < 0.1,
            "variance {:.4} too far from 1 (seed={})",
            variance,
            seed
        );
    }

    #[test]
    fn prop_different_seeds_different_sequences(seed1 in any::<u64>(), seed2 in any::<u64>()) {
        prop_assume!(seed1 != seed2);

        let mut rng1 = CloudRng::from_seed(seed1);
        let mut rng2 = CloudRng::from_seed(seed2);

        let values1: Vec<f64> = (0..10).map(|_| rng1.gen_uniform()).collect();
        let values2: Vec<f64> = (0..10).map(|_| rng2.gen_uniform()).collect();

        prop_assert_ne!(values1, values2);
    }
}
