//! Generate command implementation
//!
//! Samples the configured shape, optionally estimates normals, writes the
//! cloud and logs a summary of what was produced.

use std::time::Instant;

use cloud_core::normals::estimate_normals;
use cloud_core::normals::sdf::signed_distance;
use cloud_core::rng::CloudRng;
use cloud_core::sampling::{generate, RejectionSampler, SamplerState};
use cloud_core::shape::{CubeWithHole, ShapeParams};
use cloud_core::{Bounds, LengthStats, NormalBatch, PointBatch};
use cloud_io::{save_cloud, Precision, SavedPaths};
use tracing::info;

use crate::config::GeneratorConfig;
use crate::Result;

/// Run the generate command
pub fn run(config: &GeneratorConfig) -> Result<SavedPaths> {
    let params = config.shape_params()?;
    let mut rng = CloudRng::from_seed(config.seed);

    info!(
        "Generating {} points: {} (seed {})",
        config.n,
        params.label(),
        config.seed
    );

    let start = Instant::now();
    let points = match params {
        ShapeParams::CubeWithHole(shape) if config.progress => {
            sample_with_progress(config.n, shape, &mut rng)?
        }
        _ => generate(config.n, &params, &mut rng)?,
    };
    info!("Sampling complete in {:.2?}", start.elapsed());

    let normals = if config.normals {
        let start = Instant::now();
        let normals = estimate_normals(&points, &params)?;
        info!("Normals estimated in {:.2?}", start.elapsed());
        Some(normals)
    } else {
        None
    };

    let base = config.output_base(&params);
    let saved = save_cloud(&base, config.format, config.dtype, &points, normals.as_ref())?;

    log_summary(config, &params, &saved, &points, normals.as_ref());
    Ok(saved)
}

/// Drive the rejection sampler round by round, logging progress
fn sample_with_progress(n: usize, shape: CubeWithHole, rng: &mut CloudRng) -> Result<PointBatch> {
    let mut sampler = RejectionSampler::new(n, shape)?;
    info!(
        "Rejection sampling cube with hole (keep ratio {:.4})",
        sampler.keep_ratio()
    );

    while let SamplerState::Accumulating { .. } = sampler.step(rng) {
        log_progress(&sampler);
    }
    log_progress(&sampler);

    Ok(sampler.finish()?)
}

fn log_progress(sampler: &RejectionSampler) {
    let progress = sampler.progress();
    info!(
        "  round {:>3}: {:3.0}% ({}/{})",
        progress.rounds,
        progress.fraction() * 100.0,
        progress.accepted.min(progress.target),
        progress.target
    );
}

/// Coordinate range and normal lengths of the cloud as written.
#[derive(Debug, PartialEq)]
struct Summary {
    bounds: Option<Bounds>,
    normal_lengths: Option<LengthStats>,
    /// Largest signed distance to the surface; positive means outside.
    max_distance: Option<f64>,
}

impl Summary {
    /// Computes statistics after rounding to `dtype`, so they describe the
    /// stored values rather than the `f64` samples.
    fn of_written(
        dtype: Precision,
        params: &ShapeParams,
        points: &PointBatch,
        normals: Option<&NormalBatch>,
    ) -> Self {
        let written = PointBatch::from_vec(dtype.quantize(points.as_slice()));
        let max_distance = written
            .as_slice()
            .iter()
            .map(|p| signed_distance(p, params))
            .reduce(f64::max);
        let normal_lengths = normals.and_then(|n| {
            NormalBatch::from_vec(dtype.quantize(n.as_slice())).length_stats()
        });
        Self {
            bounds: written.bounds(),
            normal_lengths,
            max_distance,
        }
    }
}

fn log_summary(
    config: &GeneratorConfig,
    params: &ShapeParams,
    saved: &SavedPaths,
    points: &PointBatch,
    normals: Option<&NormalBatch>,
) {
    info!("Generated point cloud: shape={}, N={}", config.shape, points.len());
    info!("Main file: {}", saved.main.display());
    for aux in &saved.aux {
        info!("Auxiliary file: {}", aux.display());
    }

    let summary = Summary::of_written(config.dtype, params, points, normals);
    if let Some(bounds) = summary.bounds {
        info!("Coordinate range (min -> max, {}):", config.dtype.as_str());
        for (axis, name) in ["x", "y", "z"].iter().enumerate() {
            info!(
                "  {}: {:.3} ~ {:.3}",
                name, bounds.min[axis], bounds.max[axis]
            );
        }
    }

    if let Some(distance) = summary.max_distance {
        info!("Max signed distance to surface: {:.3e}", distance);
    }

    if let Some(stats) = summary.normal_lengths {
        info!(
            "Normal length: min={:.3}, max={:.3}, mean={:.3}",
            stats.min, stats.max, stats.mean
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloud_core::shape::{Ball, HoleAxis, ShapeKind};
    use cloud_io::OutputFormat;

    fn config_in(dir: &std::path::Path, shape: ShapeKind) -> GeneratorConfig {
        GeneratorConfig {
            shape,
            n: 2000,
            out: Some(dir.join("cloud")),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_generate_ply() {
        let dir = tempfile::tempdir().unwrap();
        let saved = run(&config_in(dir.path(), ShapeKind::Ball)).unwrap();

        assert_eq!(saved.main, dir.path().join("cloud.ply"));
        assert!(saved.main.exists());
    }

    #[test]
    fn test_generate_xyz_with_normals() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            normals: true,
            format: OutputFormat::Xyz,
            dtype: Precision::F64,
            ..config_in(dir.path(), ShapeKind::CubeHole)
        };

        let saved = run(&config).unwrap();
        assert_eq!(saved.main, dir.path().join("cloud.xyzn"));
        assert_eq!(saved.aux.len(), 2);

        let text = std::fs::read_to_string(&saved.main).unwrap();
        assert_eq!(text.lines().count(), 2000);
    }

    #[test]
    fn test_progress_does_not_change_output() {
        let shape = CubeWithHole::new(10.0, 1.0, HoleAxis::Z).unwrap();

        let stepped = sample_with_progress(5000, shape, &mut CloudRng::from_seed(42)).unwrap();
        let direct = generate(
            5000,
            &ShapeParams::CubeWithHole(shape),
            &mut CloudRng::from_seed(42),
        )
        .unwrap();

        assert_eq!(stepped, direct);
    }

    #[test]
    fn test_invalid_shape_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig {
            hole_radius: 6.0,
            ..config_in(dir.path(), ShapeKind::CubeHole)
        };

        assert!(matches!(run(&config), Err(crate::CliError::Shape(_))));
        assert!(!dir.path().join("cloud.ply").exists());
    }

    #[test]
    fn test_summary_reports_written_values() {
        let points = PointBatch::from_vec(vec![[0.1, -0.2, 0.3], [1.0 / 3.0, 0.0, -0.5]]);
        let normals = NormalBatch::from_vec(vec![[0.6, 0.8, 0.0], [0.0, 0.0, -1.0]]);
        let params = ShapeParams::Ball(Ball::new(1.0).unwrap());

        let exact = Summary::of_written(Precision::F64, &params, &points, Some(&normals));
        assert_eq!(exact.bounds, points.bounds());
        assert_eq!(exact.normal_lengths, normals.length_stats());
        let farthest = signed_distance(&[1.0 / 3.0, 0.0, -0.5], &params);
        assert_eq!(exact.max_distance, Some(farthest));
        assert!(farthest < 0.0);

        let single = Summary::of_written(Precision::F32, &params, &points, Some(&normals));
        let bounds = single.bounds.unwrap();
        assert_eq!(bounds.min[0], 0.1f32 as f64);
        assert_eq!(bounds.max[0], (1.0f32 / 3.0) as f64);
        assert_ne!(single.bounds, exact.bounds);

        let half = Summary::of_written(Precision::F16, &params, &points, None);
        let rounded = Precision::F16.quantize(&[[0.3, 0.3, 0.3]]);
        assert_eq!(half.bounds.unwrap().max[2], rounded[0][2]);
        assert_ne!(rounded[0][2], 0.3);
        assert_eq!(half.normal_lengths, None);
    }

    #[test]
    fn test_summary_of_sampled_cloud_stays_inside() {
        let params = ShapeParams::CubeWithHole(CubeWithHole::new(10.0, 1.0, HoleAxis::X).unwrap());
        let points = generate(3000, &params, &mut CloudRng::from_seed(3)).unwrap();

        let summary = Summary::of_written(Precision::F64, &params, &points, None);
        assert!(summary.max_distance.unwrap() <= 0.0);
        assert_eq!(summary.bounds, points.bounds());

        let empty = Summary::of_written(Precision::F32, &params, &PointBatch::default(), None);
        assert_eq!(empty.max_distance, None);
        assert_eq!(empty.bounds, None);
    }
}
