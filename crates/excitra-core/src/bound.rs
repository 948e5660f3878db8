//! Bound-state ladder contribution to the reduced dielectric function.
//!
//! The discrete exciton ladder is a sum of Coulomb-enhanced Lorentzian
//! resonances over the angular indices $\ell = 1 \dots \lfloor\sqrt{g}\rfloor$;
//! screening destroys every bound state beyond $\sqrt{g}$. The resonance
//! weights depend only on $(g, n_{max})$, so they are precomputed once and
//! the ladder is then evaluated cheaply at any $(\bar w, \bar\Gamma)$.

use num_complex::Complex64;

use crate::lineshape::lorentzian;

/// One surviving rung of the exciton ladder.
#[derive(Debug, Clone, Copy)]
struct Rung {
    /// Pole offset $(1/\ell - \ell/g)^2$ added to $\bar w$.
    pole: f64,
    /// Oscillator weight: strength times the Coulomb-enhancement product.
    weight: f64,
}

/// Precomputed exciton-ladder summation for a fixed screening parameter.
#[derive(Debug, Clone)]
pub struct BoundLadder {
    rungs: Vec<Rung>,
}

impl BoundLadder {
    /// Precompute the ladder for screening parameter `g` with the
    /// Coulomb-enhancement product truncated at principal number `nmax`.
    ///
    /// `nmax` is a convergence knob, not a physical cutoff.
    ///
    /// # Panics
    /// Panics if `g < 1` (Mott regime; callers validate this precondition
    /// before constructing kernels).
    pub fn new(g: f64, nmax: u32) -> Self {
        assert!(g >= 1.0, "bound ladder requires g >= 1, got {}", g);
        let ell_max = g.sqrt().floor() as u32;
        let mut rungs = Vec::with_capacity(ell_max as usize);
        for ell in 1..=ell_max {
            let l = f64::from(ell);
            let l2 = l * l;
            let pole = (1.0 / l - l / g).powi(2);
            let strength = 2.0 * (g - l2) * (2.0 * l2 - g) / (l2 * l * g * g);

            // Coulomb-enhancement product over principal numbers. Entries
            // with a vanishing denominator (always n = ell, and the
            // accidental g = n*ell pole) are a structural degeneracy of the
            // theory and are masked to the multiplicative identity.
            let mut product = 1.0;
            for n in 1..=nmax {
                let nf = f64::from(n);
                let n2 = nf * nf;
                let denom = (n2 - l2) * (n2 * l2 - g * g);
                if denom == 0.0 {
                    continue;
                }
                product *= n2 * (n2 * l2 - (g - l2).powi(2)) / denom;
            }

            rungs.push(Rung {
                pole,
                weight: strength * product,
            });
        }
        Self { rungs }
    }

    /// Evaluate the ladder at reduced detuning `wbar` and reduced
    /// linewidth `gbar`.
    pub fn eval(&self, wbar: f64, gbar: f64) -> Complex64 {
        let mut out = Complex64::new(0.0, 0.0);
        for rung in &self.rungs {
            out += std::f64::consts::PI
                * lorentzian(wbar + rung.pole, 0.0, gbar, 1.0, 0.0)
                * rung.weight;
        }
        out
    }
}
