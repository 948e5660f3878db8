//! Complex digamma function.
//!
//! The Tanguy line shape evaluates $\psi(\xi)$ at complex argument, so a
//! complex-plane digamma is implemented here: arguments left of
//! $\mathrm{Re}\,z = 1/2$ are reflected, small arguments are pushed up by
//! the recurrence $\psi(z+1) = \psi(z) + 1/z$, and the asymptotic
//! Bernoulli series finishes the job.

use num_complex::Complex64;

use std::f64::consts::PI;

// Asymptotic series coefficients B_{2n}/(2n) for n = 1..6.
const ASYMPTOTIC: [f64; 6] = [
    1.0 / 12.0,
    -1.0 / 120.0,
    1.0 / 252.0,
    -1.0 / 240.0,
    1.0 / 132.0,
    -691.0 / 32760.0,
];

/// Threshold real part beyond which the asymptotic series converges to
/// full double precision.
const RECURRENCE_LIMIT: f64 = 8.0;

/// Digamma function $\psi(z)$ for complex argument.
///
/// Poles of $\psi$ (the non-positive integers) return non-finite values,
/// matching the underlying arithmetic rather than panicking.
pub fn digamma(z: Complex64) -> Complex64 {
    if z.re < 0.5 {
        // Reflection: psi(z) = psi(1 - z) - pi cot(pi z).
        let pz = PI * z;
        return digamma(Complex64::new(1.0, 0.0) - z) - PI * pz.cos() / pz.sin();
    }

    let mut shift = Complex64::new(0.0, 0.0);
    let mut z = z;
    while z.re < RECURRENCE_LIMIT {
        shift -= z.inv();
        z += 1.0;
    }

    // psi(z) ~ ln z - 1/(2z) - sum_n B_{2n}/(2n z^{2n})
    let u = (z * z).inv();
    let mut series = Complex64::new(0.0, 0.0);
    for &c in ASYMPTOTIC.iter().rev() {
        series = (series + c) * u;
    }
    shift + z.ln() - 0.5 * z.inv() - series
}
