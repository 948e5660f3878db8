//! Excitra command-line interface.
//!
//! Evaluate semiconductor dielectric spectra from TOML job files:
//! ```sh
//! excitra run job.toml
//! excitra sweep job.toml
//! excitra validate job.toml
//! excitra tanguy --eg 2.4 --rydberg 0.5 --gamma 0.05
//! excitra models
//! ```

mod config;
mod runner;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use excitra_models::TanguyModel;

#[derive(Parser)]
#[command(name = "excitra")]
#[command(about = "Excitra: Semiconductor Dielectric-Function Solver")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sum the configured spectral components over the energy axis.
    Run {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Evaluate the density-derived model over the full 4-axis grid.
    Sweep {
        /// Path to the job configuration file.
        config: PathBuf,
        /// Output directory (overrides config file setting).
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a configuration file without evaluating anything.
    Validate {
        /// Path to the job configuration file.
        config: PathBuf,
    },
    /// Evaluate a standalone Tanguy model spectrum.
    Tanguy {
        /// Band gap in eV.
        #[arg(long, default_value_t = 2.4)]
        eg: f64,
        /// Exciton Rydberg energy in eV.
        #[arg(long, default_value_t = 0.5)]
        rydberg: f64,
        /// Lorentzian broadening in eV.
        #[arg(long, default_value_t = 0.05)]
        gamma: f64,
        /// Amplitude of the dipole-allowed series.
        #[arg(long, default_value_t = 4.0)]
        allowed: f64,
        /// Amplitude of the dipole-forbidden series.
        #[arg(long, default_value_t = 0.0)]
        forbidden: f64,
        /// Use the 2-D (quantum-well) form instead of 3-D bulk.
        #[arg(long)]
        two_d: bool,
        /// Energy axis start in eV.
        #[arg(long, default_value_t = 1.0)]
        start: f64,
        /// Energy axis end in eV.
        #[arg(long, default_value_t = 4.0)]
        end: f64,
        /// Number of energy points.
        #[arg(long, default_value_t = 1001)]
        points: usize,
        /// Output CSV path.
        #[arg(short, long, default_value = "tanguy.csv")]
        output: PathBuf,
    },
    /// Display information about available dielectric models.
    Models,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, output } => {
            println!("Excitra Dielectric Solver");
            println!("=========================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let spectrum = runner::run_superposition(&job)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            if job.output.save_spectra {
                let csv_path = out_dir.join("spectrum.csv");
                runner::write_spectrum_csv(&spectrum, &csv_path, "component superposition")?;
            }
            if job.output.save_json {
                let json_path = out_dir.join("spectrum.json");
                runner::write_spectrum_json(&spectrum, &json_path)?;
            }

            println!("Run complete.");
            Ok(())
        }
        Commands::Sweep { config, output } => {
            println!("Excitra Dielectric Solver");
            println!("=========================");
            let job = config::load_config(&config)?;
            println!("Configuration: {}", config.display());

            let sweep = runner::run_sweep(&job)?;

            let out_dir = output.unwrap_or_else(|| PathBuf::from(&job.output.directory));
            let csv_path = out_dir.join("sweep.csv");
            runner::write_sweep_csv(&sweep, &csv_path)?;

            println!("Sweep complete.");
            Ok(())
        }
        Commands::Validate { config } => {
            let _job = config::load_config(&config)?;
            println!("Configuration is valid: {}", config.display());
            Ok(())
        }
        Commands::Tanguy {
            eg,
            rydberg,
            gamma,
            allowed,
            forbidden,
            two_d,
            start,
            end,
            points,
            output,
        } => {
            let model = TanguyModel::new(
                if two_d { "Tanguy 2D" } else { "Tanguy 3D" },
                eg,
                rydberg,
                gamma,
                allowed,
                forbidden,
                !two_d,
            )?;
            println!(
                "Tanguy model: Eg = {} eV, R = {} eV, Gamma = {} eV",
                eg, rydberg, gamma
            );
            let spectrum = runner::tanguy_spectrum(&model, start, end, points)?;
            runner::write_spectrum_csv(&spectrum, &output, "Tanguy analytic model")?;
            Ok(())
        }
        Commands::Models => {
            println!("Available dielectric models:");
            println!();
            println!("  Microscopic (Banyai-Koch) plasma model:");
            println!("    run/sweep  - bound-state ladder, Coulomb-enhanced continuum,");
            println!("                 band filling, plasma screening of the exciton");
            println!();
            println!("  Analytic models:");
            println!("    tanguy     - Wannier exciton dielectric function (Tanguy 1995),");
            println!("                 3-D bulk and 2-D quantum-well forms,");
            println!("                 allowed and forbidden transition series");
            println!();
            println!("  Auxiliary components:");
            println!("    line       - single complex Lorentzian oscillator");
            Ok(())
        }
    }
}
