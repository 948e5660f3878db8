//! TOML configuration deserialisation for spectrum jobs.

use serde::Deserialize;

use excitra_core::{NumericalParams, ScreenedParams, SpectralComponent};

/// Top-level job configuration.
#[derive(Debug, Deserialize)]
pub struct JobConfig {
    pub grid: GridConfig,
    #[serde(default)]
    pub numerics: NumericalParams,
    /// Spectral components summed by the `run` command.
    #[serde(default)]
    pub component: Vec<SpectralComponent>,
    /// Density-derived model parameters for the `sweep` command.
    pub sweep: Option<ScreenedParams>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Independent-variable axes from TOML. Only `energy` is always required;
/// the remaining axes are needed by 4-axis sweeps.
#[derive(Debug, Deserialize)]
pub struct GridConfig {
    pub energy: AxisSpec,
    pub screening: Option<AxisSpec>,
    pub linewidth: Option<AxisSpec>,
    pub temperature: Option<AxisSpec>,
}

/// Axis specification: either a uniform range or an explicit list.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum AxisSpec {
    Range { range: [f64; 2], points: usize },
    List { values: Vec<f64> },
}

impl AxisSpec {
    /// Materialise the axis values.
    pub fn to_values(&self) -> Vec<f64> {
        match self {
            AxisSpec::Range { range, points } => {
                let [start, end] = *range;
                (0..*points)
                    .map(|i| start + (end - start) * i as f64 / (*points - 1).max(1) as f64)
                    .collect()
            }
            AxisSpec::List { values } => values.clone(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    /// Output directory (default: "./output").
    #[serde(default = "default_output_dir")]
    pub directory: String,
    /// Whether to save spectra as CSV (default: true).
    #[serde(default = "default_true")]
    pub save_spectra: bool,
    /// Whether to also save spectra as JSON (default: false).
    #[serde(default)]
    pub save_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_dir(),
            save_spectra: true,
            save_json: false,
        }
    }
}

fn default_output_dir() -> String {
    "./output".into()
}
fn default_true() -> bool {
    true
}

/// Load and parse a TOML job configuration file.
pub fn load_config(path: &std::path::Path) -> anyhow::Result<JobConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: JobConfig = toml::from_str(&content)?;
    Ok(config)
}
