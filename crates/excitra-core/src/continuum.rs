//! Ionized-continuum contribution to the reduced dielectric function.
//!
//! The continuum is a trapezoidal integral over reduced kinetic energy $x$
//! of the 3-D joint density of states $\sqrt{x}$, boosted near threshold by
//! the Sommerfeld-like Coulomb-enhancement product and convolved with the
//! Lorentzian kernel. The $\bar w$-independent weight $\sqrt{x} \cdot
//! C(x; g)$ is precomputed on the integration grid, so a single evaluation
//! costs one pass over the grid.

use num_complex::Complex64;

use crate::lineshape::lorentzian;

/// Precomputed continuum integrand weights for a fixed screening parameter.
#[derive(Debug, Clone)]
pub struct ContinuumKernel {
    /// Integration nodes x ∈ [0, xmax].
    xs: Vec<f64>,
    /// $\sqrt{x} \prod_n \left(1 + \frac{2gn^2 - g^2}{(n^2-g)^2 + n^2 g^2 x}\right)$ at each node.
    weights: Vec<f64>,
    dx: f64,
}

impl ContinuumKernel {
    /// Build the integration grid and Coulomb-enhanced weights.
    ///
    /// # Arguments
    /// * `g` - Screening parameter (g ≥ 1).
    /// * `xmax` - Upper integration bound in reduced energy units.
    /// * `xnum` - Number of trapezoidal nodes (≥ 2).
    /// * `nmax` - Truncation of the Coulomb-enhancement product.
    ///
    /// # Panics
    /// Panics if `xnum < 2`; callers validate parameters up front.
    pub fn new(g: f64, xmax: f64, xnum: usize, nmax: u32) -> Self {
        assert!(xnum >= 2, "continuum integration needs at least 2 nodes");
        let dx = xmax / (xnum - 1) as f64;
        let mut xs = Vec::with_capacity(xnum);
        let mut weights = Vec::with_capacity(xnum);
        for i in 0..xnum {
            let x = i as f64 * dx;
            let mut enhancement = 1.0;
            for n in 1..=nmax {
                let n2 = f64::from(n) * f64::from(n);
                // The denominator vanishes at the threshold node when g is
                // exactly n^2; that degenerate entry is masked to the
                // multiplicative identity, like the ladder's n = ell pole.
                let denom = (n2 - g).powi(2) + n2 * g * g * x;
                if denom == 0.0 {
                    continue;
                }
                enhancement *= 1.0 + (2.0 * g * n2 - g * g) / denom;
            }
            xs.push(x);
            weights.push(x.sqrt() * enhancement);
        }
        Self { xs, weights, dx }
    }

    /// Trapezoidal integral of the weighted Lorentzian at reduced detuning
    /// `wbar` and reduced linewidth `gbar`.
    pub fn eval(&self, wbar: f64, gbar: f64) -> Complex64 {
        let mut sum = Complex64::new(0.0, 0.0);
        let last = self.xs.len() - 1;
        for (i, (&x, &w)) in self.xs.iter().zip(self.weights.iter()).enumerate() {
            let trapz = if i == 0 || i == last { 0.5 } else { 1.0 };
            sum += trapz * w * lorentzian(wbar - x, 0.0, gbar, 1.0, 0.0);
        }
        sum * self.dx
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_is_finite() {
        let kernel = ContinuumKernel::new(24.32, 10.0, 500, 5);
        for &wbar in &[-3.0, -0.5, 0.0, 0.5, 3.0] {
            let v = kernel.eval(wbar, 0.0775);
            assert!(v.re.is_finite() && v.im.is_finite(), "wbar = {}", wbar);
        }
    }

    #[test]
    fn test_trapezoid_converges_in_xnum() {
        // Doubling the resolution past a moderate xnum must move the
        // result by less than a fixed discretization tolerance.
        let (g, xmax, nmax) = (24.32, 10.0, 5);
        let (wbar, gbar) = (0.5, 0.0775);
        let coarse = ContinuumKernel::new(g, xmax, 1000, nmax).eval(wbar, gbar);
        let fine = ContinuumKernel::new(g, xmax, 2000, nmax).eval(wbar, gbar);
        let scale = fine.norm().max(1.0);
        assert!(
            (fine - coarse).norm() / scale < 1e-3,
            "coarse {:?} fine {:?}",
            coarse,
            fine
        );
    }

    #[test]
    fn test_absorptive_part_positive_inside_band() {
        // For wbar inside [0, xmax] the Lorentzian peak sits on the
        // positive-weight integrand, so Im must come out positive.
        let kernel = ContinuumKernel::new(24.32, 10.0, 2000, 5);
        for &wbar in &[0.5, 1.0, 3.0, 6.0] {
            assert!(kernel.eval(wbar, 0.05).im > 0.0, "wbar = {}", wbar);
        }
    }

    #[test]
    fn test_perfect_square_g_stays_finite() {
        // g = n^2 with n <= nmax zeroes an enhancement denominator at the
        // x = 0 node; the masked entry must keep the whole kernel finite.
        for &g in &[4.0, 9.0, 25.0] {
            let kernel = ContinuumKernel::new(g, 10.0, 100, 5);
            assert!(
                kernel.weights.iter().all(|w| w.is_finite()),
                "non-finite weight at g = {}",
                g
            );
            assert_eq!(kernel.weights[0], 0.0);
            let v = kernel.eval(0.5, 0.05);
            assert!(v.re.is_finite() && v.im.is_finite(), "g = {}", g);
        }
    }

    #[test]
    fn test_threshold_node_carries_no_weight() {
        // sqrt(0) kills the first node regardless of the enhancement there.
        let kernel = ContinuumKernel::new(9.5, 10.0, 100, 5);
        assert_eq!(kernel.weights[0], 0.0);
    }
}
