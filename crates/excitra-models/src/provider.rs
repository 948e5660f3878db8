//! Dielectric-model trait.
//!
//! All analytic model implementations expose [`DielectricModel`], which
//! returns energy-dependent complex dielectric functions and, derived
//! from those, complex refractive indices.

use num_complex::Complex64;
use thiserror::Error;

/// Errors from dielectric models.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Energy {energy_ev} eV is outside the model range [{min}, {max}] eV")]
    OutOfRange {
        energy_ev: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid model parameter: {0}")]
    InvalidParameter(String),
}

/// Provides an energy-dependent complex dielectric function.
pub trait DielectricModel: Send + Sync {
    /// Human-readable name of this model.
    fn name(&self) -> &str;

    /// Photon-energy range over which the model is defined (eV).
    fn energy_range(&self) -> (f64, f64);

    /// Complex dielectric function $\epsilon(E)$ at a photon energy (eV).
    fn dielectric_function(&self, energy_ev: f64) -> Result<Complex64, ModelError>;

    /// Complex refractive index $\tilde n = n + ik$ at a photon energy (eV).
    ///
    /// Default implementation derives from $\epsilon$ via [`complex_index`].
    fn refractive_index(&self, energy_ev: f64) -> Result<Complex64, ModelError> {
        Ok(complex_index(self.dielectric_function(energy_ev)?))
    }
}

/// Complex refractive index from a dielectric function:
/// $n = \sqrt{(|\epsilon| + \mathrm{Re}\,\epsilon)/2}$,
/// $k = \sqrt{(|\epsilon| - \mathrm{Re}\,\epsilon)/2}$.
///
/// The branch is fixed so that both n and k are non-negative.
pub fn complex_index(eps: Complex64) -> Complex64 {
    let mag = eps.norm();
    Complex64::new(
        ((mag + eps.re) / 2.0).sqrt(),
        ((mag - eps.re) / 2.0).sqrt(),
    )
}
