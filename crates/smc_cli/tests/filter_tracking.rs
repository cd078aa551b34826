//! End-to-end tests of the tracking filter.
//!
//! Every scheme and layout must track the synthetic target, and a
//! configuration file combined with CLI overrides must drive the run.

use std::io::Write;

use smc_cli::commands::filter::simulate;
use smc_cli::config::{build_config, CliArgs, FilterConfig};
use smc_core::MatrixLayout;
use smc_random::ResampleScheme;

#[test]
fn test_every_scheme_tracks_target() {
    for scheme in ResampleScheme::ALL {
        for layout in [MatrixLayout::RowMajor, MatrixLayout::ColMajor] {
            let config = FilterConfig {
                particles: 1000,
                steps: 40,
                layout,
                scheme,
                ..FilterConfig::default()
            };
            let report = simulate(&config).unwrap();
            assert_eq!(report.estimates.len(), 40);
            assert!(report.resamples > 0, "{scheme} {layout}");
            assert!(report.error < 1.0, "{scheme} {layout}: error {}", report.error);
        }
    }
}

#[test]
fn test_more_particles_do_not_hurt() {
    let error_for = |particles| {
        simulate(&FilterConfig {
            particles,
            steps: 40,
            ..FilterConfig::default()
        })
        .unwrap()
        .error
    };
    let coarse = error_for(20);
    let fine = error_for(4000);
    assert!(fine <= coarse * 1.5, "fine {fine} coarse {coarse}");
}

#[test]
fn test_config_file_with_cli_overrides() {
    let path = std::env::temp_dir().join(format!("smc_cli_test_{}.toml", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "particles = 200").unwrap();
        writeln!(file, "steps = 15").unwrap();
        writeln!(file, "layout = \"col_major\"").unwrap();
        writeln!(file, "scheme = \"residual\"").unwrap();
    }

    let cli = CliArgs {
        config_file: Some(path.clone()),
        steps: Some(12),
        ..CliArgs::default()
    };
    let config = build_config(&cli).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.particles, 200);
    assert_eq!(config.steps, 12);
    assert_eq!(config.layout, MatrixLayout::ColMajor);
    assert_eq!(config.scheme, ResampleScheme::Residual);

    let report = simulate(&config).unwrap();
    assert_eq!(report.estimates.len(), 12);
    assert_eq!(report.layout, MatrixLayout::ColMajor);
}
