//! Job runner: ties together configuration, the microscopic solver, and
//! the analytic models, and writes the resulting spectra.

use std::path::Path;

use anyhow::{Context, Result};
use ndarray::{Array1, Array4};
use num_complex::Complex64;
use serde::Serialize;

use excitra_core::{superpose, SpectralGrid};
use excitra_models::{complex_index, DielectricModel, TanguyModel};

use crate::config::JobConfig;

/// A dielectric spectrum over a single photon-energy axis.
pub struct SpectrumOutput {
    pub energy: Vec<f64>,
    pub epsilon: Vec<Complex64>,
}

/// A dielectric spectrum over the full 4-axis grid.
pub struct SweepOutput {
    pub energy: Vec<f64>,
    pub screening: Vec<f64>,
    pub linewidth: Vec<f64>,
    pub temperature: Vec<f64>,
    /// Shape (energy, screening, linewidth, temperature).
    pub cube: Array4<Complex64>,
}

/// Sum all configured spectral components over the energy axis.
pub fn run_superposition(job: &JobConfig) -> Result<SpectrumOutput> {
    let energy = job.grid.energy.to_values();
    if energy.is_empty() {
        anyhow::bail!("Energy axis is empty");
    }
    if job.component.is_empty() {
        anyhow::bail!("No spectral components configured; add [[component]] entries");
    }
    println!(
        "Superposing {} component(s) over {} energies",
        job.component.len(),
        energy.len()
    );

    let axis = Array1::from(energy.clone());
    let eps = superpose(axis.view(), &job.component, &job.numerics)
        .context("Dielectric superposition failed")?;
    log::info!(
        "superposition done: {} points, {} components",
        energy.len(),
        job.component.len()
    );

    Ok(SpectrumOutput {
        energy,
        epsilon: eps.to_vec(),
    })
}

/// Evaluate the density-derived model over the 4-axis grid.
pub fn run_sweep(job: &JobConfig) -> Result<SweepOutput> {
    let params = job
        .sweep
        .context("Sweep requires a [sweep] table with the screened model parameters")?;
    let energy = job.grid.energy.to_values();
    let screening = job
        .grid
        .screening
        .as_ref()
        .context("Sweep requires a [grid] screening axis")?
        .to_values();
    let linewidth = job
        .grid
        .linewidth
        .as_ref()
        .context("Sweep requires a [grid] linewidth axis")?
        .to_values();
    let temperature = job
        .grid
        .temperature
        .as_ref()
        .context("Sweep requires a [grid] temperature axis")?
        .to_values();

    let grid = SpectralGrid::new(
        Array1::from(energy.clone()),
        Array1::from(screening.clone()),
        Array1::from(linewidth.clone()),
        Array1::from(temperature.clone()),
    )?;
    let (ne, nk, ng, nt) = grid.shape();
    println!(
        "Sweeping {} x {} x {} x {} = {} grid points",
        ne,
        nk,
        ng,
        nt,
        ne * nk * ng * nt
    );

    let cube = grid.evaluate(&params, &job.numerics)?;
    Ok(SweepOutput {
        energy,
        screening,
        linewidth,
        temperature,
        cube,
    })
}

/// Evaluate a Tanguy model on a uniform energy axis.
pub fn tanguy_spectrum(model: &TanguyModel, start: f64, end: f64, points: usize) -> Result<SpectrumOutput> {
    let mut energy = Vec::with_capacity(points);
    let mut epsilon = Vec::with_capacity(points);
    for i in 0..points {
        let e = start + (end - start) * i as f64 / (points - 1).max(1) as f64;
        let eps = model
            .dielectric_function(e)
            .with_context(|| format!("Model '{}' at {:.4} eV", model.name(), e))?;
        energy.push(e);
        epsilon.push(eps);
    }
    Ok(SpectrumOutput { energy, epsilon })
}

#[derive(Serialize)]
struct SpectrumRow {
    energy_ev: f64,
    eps_re: f64,
    eps_im: f64,
    n: f64,
    k: f64,
}

fn spectrum_rows(spectrum: &SpectrumOutput) -> Vec<SpectrumRow> {
    spectrum
        .energy
        .iter()
        .zip(spectrum.epsilon.iter())
        .map(|(&e, &eps)| {
            let nk = complex_index(eps);
            SpectrumRow {
                energy_ev: e,
                eps_re: eps.re,
                eps_im: eps.im,
                n: nk.re,
                k: nk.im,
            }
        })
        .collect()
}

/// Write a single-axis spectrum to CSV with a metadata header.
pub fn write_spectrum_csv(spectrum: &SpectrumOutput, path: &Path, label: &str) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;

    writeln!(file, "# Excitra: {}", label)?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(file, "#")?;
    writeln!(file, "energy_ev,eps_re,eps_im,n,k")?;
    for row in spectrum_rows(spectrum) {
        writeln!(
            file,
            "{:.6},{:.6e},{:.6e},{:.6e},{:.6e}",
            row.energy_ev, row.eps_re, row.eps_im, row.n, row.k
        )?;
    }

    println!("Spectrum written to: {}", path.display());
    Ok(())
}

/// Write a single-axis spectrum to a JSON file.
pub fn write_spectrum_json(spectrum: &SpectrumOutput, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&spectrum_rows(spectrum))
        .map_err(|e| anyhow::anyhow!("JSON serialisation error: {}", e))?;
    std::fs::write(path, json)?;

    println!("Spectrum (JSON) written to: {}", path.display());
    Ok(())
}

/// Write a 4-axis sweep to long-format CSV, one row per grid point.
pub fn write_sweep_csv(sweep: &SweepOutput, path: &Path) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;

    writeln!(file, "# Excitra: 4-axis dielectric sweep")?;
    writeln!(file, "# Version: {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(
        file,
        "# Axes: energy({}) x screening({}) x linewidth({}) x temperature({})",
        sweep.energy.len(),
        sweep.screening.len(),
        sweep.linewidth.len(),
        sweep.temperature.len()
    )?;
    writeln!(file, "#")?;
    writeln!(file, "energy_ev,screening_invnm,linewidth_ev,temperature_k,eps_re,eps_im")?;

    for (ie, &e) in sweep.energy.iter().enumerate() {
        for (ik, &k) in sweep.screening.iter().enumerate() {
            for (ig, &g) in sweep.linewidth.iter().enumerate() {
                for (it, &t) in sweep.temperature.iter().enumerate() {
                    let eps = sweep.cube[[ie, ik, ig, it]];
                    writeln!(
                        file,
                        "{:.6},{:.6},{:.6},{:.2},{:.6e},{:.6e}",
                        e, k, g, t, eps.re, eps.im
                    )?;
                }
            }
        }
    }

    println!("Sweep written to: {}", path.display());
    Ok(())
}
