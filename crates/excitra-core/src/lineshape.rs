//! Complex Lorentzian line shape, the common broadening primitive of the
//! bound-ladder and continuum contributions.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Complex Lorentzian, area-normalized to its imaginary component:
///
/// $L(E; E_0, \Gamma, A, A_0) = \frac{A}{\pi} \frac{1}{E_0 - E - i\Gamma} + A_0$
///
/// For $\Gamma \to 0^+$ the imaginary part integrates to $A$ over all $E$.
pub fn lorentzian(e: f64, e0: f64, gamma: f64, area: f64, offset: f64) -> Complex64 {
    area / std::f64::consts::PI / Complex64::new(e0 - e, -gamma) + offset
}

/// A standalone Lorentzian line in the spectral superposition.
///
/// Models a spectral feature (e.g. a phonon or an uncoupled exciton species)
/// added on top of the microscopic dielectric contributions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LorentzianLine {
    /// Resonance centre (eV).
    pub center: f64,
    /// Half width $\Gamma$ (eV).
    pub width: f64,
    /// Area of the imaginary part.
    pub area: f64,
    /// Constant (real) offset added to the dielectric function.
    pub offset: f64,
}

impl LorentzianLine {
    /// Evaluate the line at a photon energy (eV).
    pub fn eval(&self, e: f64) -> Complex64 {
        lorentzian(e, self.center, self.width, self.area, self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peak_imaginary_part() {
        // At resonance Im L = A / (pi * Gamma).
        let gamma = 1e-3;
        let l = lorentzian(2.0, 2.0, gamma, 1.0, 0.0);
        assert!((l.im - 1.0 / (std::f64::consts::PI * gamma)).abs() < 1e-9);
        assert!(l.re.abs() < 1e-12);
    }

    #[test]
    fn test_far_from_resonance_imaginary_vanishes() {
        // Far detuned, Im -> 0 as Gamma -> 0+ while Re stays finite.
        let l_wide = lorentzian(3.0, 2.0, 1e-2, 1.0, 0.0);
        let l_narrow = lorentzian(3.0, 2.0, 1e-6, 1.0, 0.0);
        assert!(l_narrow.im.abs() < l_wide.im.abs());
        assert!(l_narrow.im.abs() < 1e-6);
        assert!((l_narrow.re - 1.0 / std::f64::consts::PI / (2.0 - 3.0)).abs() < 1e-9);
    }

    #[test]
    fn test_area_normalization() {
        // Numerically integrate Im L over a wide window; should approach A.
        let (e0, gamma, area) = (0.0, 1e-2, 2.5);
        let n = 400_001;
        let (lo, hi) = (-50.0, 50.0);
        let de = (hi - lo) / (n - 1) as f64;
        let mut sum = 0.0;
        for i in 0..n {
            let e = lo + i as f64 * de;
            let w = if i == 0 || i == n - 1 { 0.5 } else { 1.0 };
            sum += w * lorentzian(e, e0, gamma, area, 0.0).im * de;
        }
        assert!((sum - area).abs() / area < 1e-3, "integral = {}", sum);
    }

    #[test]
    fn test_offset_is_additive() {
        let a = lorentzian(1.0, 2.0, 0.1, 1.0, 0.0);
        let b = lorentzian(1.0, 2.0, 0.1, 1.0, 3.5);
        assert!((b.re - a.re - 3.5).abs() < 1e-12);
        assert!((b.im - a.im).abs() < 1e-12);
    }
}
