//! Check command implementation
//!
//! Validates the resolved parameters and reports what a `generate` run would
//! do, without drawing any samples.

use cloud_core::sampling::{coordinate_count, RejectionSampler};
use cloud_core::shape::ShapeParams;
use cloud_io::main_path;
use tracing::info;

use crate::config::GeneratorConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &GeneratorConfig) -> Result<()> {
    let params = config.shape_params()?;
    coordinate_count(config.n)?;

    info!("Shape: {} ({})", params.kind(), params.label());
    info!("Points: {}", config.n);
    info!("Seed: {}", config.seed);

    if let ShapeParams::CubeWithHole(shape) = params {
        let sampler = RejectionSampler::new(config.n, shape)?;
        info!("Expected keep ratio: {:.4}", sampler.keep_ratio());
        info!(
            "First round draws {} candidates",
            sampler.next_batch_size()
        );
    }

    let base = config.output_base(&params);
    info!(
        "Output: {} as {} ({}), normals: {}",
        main_path(&base, config.format, config.normals).display(),
        config.format,
        config.dtype.as_str(),
        if config.normals { "yes" } else { "no" }
    );

    info!("Configuration OK");
    Ok(())
}
