//! # Excitra Core
//!
//! Microscopic dielectric-function solver for semiconductors under
//! excitonic and many-body screening effects (Banyai–Koch). The crate
//! computes the complex dielectric response as a function of photon
//! energy, free-carrier screening strength, linewidth, and temperature,
//! modelling how the Coulomb-bound exciton ladder and the ionization
//! continuum are progressively screened towards the Mott transition.
//!
//! ## Pipeline
//!
//! Physical parameters are reduced to a dimensionless system
//! ([`units`]), which feeds the bound-state ladder ([`bound`]), the
//! continuum integral ([`continuum`]), and the Pauli-blocking
//! band-filling factor; the orchestrator ([`dielectric`]) combines the
//! three under the oscillator prefactor. [`grid`] evaluates the result
//! over typed four-axis (energy × screening × linewidth × temperature)
//! grids.
//!
//! ## Modules
//!
//! - [`units`]: dimensioned ↔ reduced conversions and the
//!   screening/density/chemical-potential relations.
//! - [`lineshape`]: the complex area-normalized Lorentzian kernel.
//! - [`bound`]: exciton-ladder summation.
//! - [`continuum`]: Coulomb-enhanced continuum integral.
//! - [`dielectric`]: call conventions, error taxonomy, superposition.
//! - [`grid`]: four-axis cartesian evaluation.

pub mod bound;
pub mod continuum;
pub mod dielectric;
pub mod grid;
pub mod lineshape;
pub mod units;

pub use dielectric::{
    dielectric_microscopic, dielectric_screened, superpose, DielectricError, MicroscopicParams,
    NumericalParams, ScreenedParams, SpectralComponent,
};
pub use grid::SpectralGrid;
pub use lineshape::LorentzianLine;
