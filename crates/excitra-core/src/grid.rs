//! Four-axis spectral grids.
//!
//! The grid keeps the four independent variables (photon energy,
//! screening wavevector, linewidth, temperature) on their own array
//! axes in a fixed, documented order, replacing implicit reshape
//! conventions with an explicit cartesian evaluation over index tuples.
//! Axis alignment is therefore enforced by the type: the output of
//! [`SpectralGrid::evaluate`] always has shape
//! `(energy, screening, linewidth, temperature)`.

use ndarray::{s, Array1, Array3, Array4, ArrayD, Axis};
use num_complex::Complex64;
use rayon::prelude::*;

use crate::dielectric::{DielectricError, NumericalParams, ReducedModel, ScreenedParams};
use crate::units;

/// The independent-variable axes of a dielectric sweep, each strictly 1-D.
///
/// Peak memory is dominated by the `ne × nk × nG × nT` complex output plus,
/// per screening value, O(⌊√g⌋) ladder rungs and O(xnum) continuum weights;
/// per-point evaluation cost is O(⌊√g⌋ + xnum). Size the axis extents and
/// `xnum` with that product in mind.
#[derive(Debug, Clone)]
pub struct SpectralGrid {
    /// Photon energies (eV), output axis 0.
    pub energy: Array1<f64>,
    /// Screening wavevectors (nm⁻¹), output axis 1.
    pub screening: Array1<f64>,
    /// Linewidths (eV), output axis 2.
    pub linewidth: Array1<f64>,
    /// Temperatures (K), output axis 3.
    pub temperature: Array1<f64>,
}

impl SpectralGrid {
    /// Build a grid, rejecting empty axes up front.
    pub fn new(
        energy: Array1<f64>,
        screening: Array1<f64>,
        linewidth: Array1<f64>,
        temperature: Array1<f64>,
    ) -> Result<Self, DielectricError> {
        for (name, axis) in [
            ("energy", &energy),
            ("screening", &screening),
            ("linewidth", &linewidth),
            ("temperature", &temperature),
        ] {
            if axis.is_empty() {
                return Err(DielectricError::InvalidParameter(format!(
                    "{} axis is empty",
                    name
                )));
            }
        }
        Ok(Self {
            energy,
            screening,
            linewidth,
            temperature,
        })
    }

    /// Shape of the evaluated spectrum: `(ne, nk, nG, nT)`.
    pub fn shape(&self) -> (usize, usize, usize, usize) {
        (
            self.energy.len(),
            self.screening.len(),
            self.linewidth.len(),
            self.temperature.len(),
        )
    }

    /// Evaluate the density-derived dielectric model over the full grid.
    ///
    /// The g ≥ 1 precondition is checked against the minimum g across the
    /// whole screening axis before any spectral work starts; a violation
    /// fails the entire call (Mott transition, not a recoverable numeric
    /// case). Screening slabs are independent and evaluated in parallel.
    pub fn evaluate(
        &self,
        params: &ScreenedParams,
        numerics: &NumericalParams,
    ) -> Result<Array4<Complex64>, DielectricError> {
        for &t in &self.temperature {
            if !(t > 0.0) {
                return Err(DielectricError::InvalidParameter(format!(
                    "temperature must be positive, got {} K",
                    t
                )));
            }
        }
        // Fail-fast global precondition: one check for the whole grid.
        let mut g_min = f64::INFINITY;
        for &k in &self.screening {
            if !(k > 0.0) {
                return Err(DielectricError::InvalidParameter(format!(
                    "screening wavevector must be positive, got {}",
                    k
                )));
            }
            g_min = g_min.min(units::screening_parameter(params.a0, k));
        }
        if g_min < 1.0 {
            return Err(DielectricError::MottTransition { g_min });
        }

        let m_star = units::reduced_mass(params.me_star, params.mh_star);
        let (ne, nk, ng, nt) = self.shape();

        let slabs: Vec<Array3<Complex64>> = self
            .screening
            .iter()
            .copied()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|k| self.screening_slab(k, m_star, params, numerics))
            .collect::<Result<_, _>>()?;

        let mut out = Array4::<Complex64>::zeros((ne, nk, ng, nt));
        for (ik, slab) in slabs.into_iter().enumerate() {
            out.slice_mut(s![.., ik, .., ..]).assign(&slab);
        }
        Ok(out)
    }

    /// [`Self::evaluate`] with singleton axes collapsed, keeping at least
    /// one dimension.
    pub fn evaluate_squeezed(
        &self,
        params: &ScreenedParams,
        numerics: &NumericalParams,
    ) -> Result<ArrayD<Complex64>, DielectricError> {
        let mut out = self.evaluate(params, numerics)?.into_dyn();
        for ax in (0..out.ndim()).rev() {
            if out.shape()[ax] == 1 && out.ndim() > 1 {
                out = out.index_axis_move(Axis(ax), 0);
            }
        }
        Ok(out)
    }

    /// One `(energy, linewidth, temperature)` slab at a fixed screening
    /// value: the ladder and continuum kernels are prepared once per g.
    fn screening_slab(
        &self,
        k: f64,
        m_star: f64,
        params: &ScreenedParams,
        numerics: &NumericalParams,
    ) -> Result<Array3<Complex64>, DielectricError> {
        let model = ReducedModel::prepare(params.a0, k, params.eg0, params.rcv, m_star, numerics)?;
        let (ne, _, ng, nt) = self.shape();
        let mut slab = Array3::<Complex64>::zeros((ne, ng, nt));
        for (ig, &gamma) in self.linewidth.iter().enumerate() {
            let gbar = units::reduced_linewidth(gamma, model.er);
            for (it, &t) in self.temperature.iter().enumerate() {
                let tbar = units::reduced_temperature(t, model.er);
                let n = units::carrier_density_from_screening(params.a0, k, t, m_star);
                let mu_e = units::chemical_potential_from_density(n, params.me_star, t);
                let mu_h = units::chemical_potential_from_density(n, params.mh_star, t);
                let mubar_e = units::reduced_chemical_potential(mu_e, model.eg, t);
                let mubar_h = units::reduced_chemical_potential(mu_h, model.eg, t);
                for (ie, &e) in self.energy.iter().enumerate() {
                    slab[[ie, ig, it]] = model.eval(e, gbar, tbar, mubar_e, mubar_h);
                }
            }
        }
        Ok(slab)
    }
}
