//! Check command implementation
//!
//! Validates and prints the active configuration.

use tracing::info;

use crate::config::FilterConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &FilterConfig) -> Result<()> {
    info!("Checking configuration...");
    config.validate()?;
    let resample = config.resample_config()?;

    println!("{}", render(config));
    info!(
        scheme = %resample.scheme(),
        threshold = resample.threshold(),
        "Configuration is valid"
    );
    Ok(())
}

/// Formats the configuration as aligned `key = value` lines
pub fn render(config: &FilterConfig) -> String {
    [
        ("particles", config.particles.to_string()),
        ("steps", config.steps.to_string()),
        ("layout", config.layout.to_string()),
        ("scheme", config.scheme.to_string()),
        ("threshold", config.threshold.to_string()),
        ("seed", config.seed.to_string()),
        ("log_level", config.log_level.to_string()),
    ]
    .iter()
    .map(|(key, value)| format!("{:<10} = {}", key, value))
    .collect::<Vec<_>>()
    .join("\n")
}
