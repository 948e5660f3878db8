//! Conversions between the dimensioned physical system and the
//! dimensionless reduced system of the Banyai–Koch model.
//!
//! All energies are reduced by the exciton Rydberg $E_R$, temperatures by
//! $E_R/k_B$, and the screening strength enters through the dimensionless
//! parameter $g = 12/(\pi^2 a_0 k)$, physically the number of bound states
//! that survive screening. Every function here is a pure elementwise scalar
//! transform; grid orchestration lives in [`crate::grid`].

/// Boltzmann constant (eV/K).
pub const KB_EV: f64 = 8.6173e-5;
/// Boltzmann constant (J/K).
pub const KB_J: f64 = 1.381e-23;
/// Reduced Planck constant (J s).
pub const HBAR_JS: f64 = 1.055e-34;
/// Free-electron mass (kg).
pub const M_E_KG: f64 = 9.1094e-31;
/// Joules per electron-volt, inverted (eV/J).
pub const J_TO_EV: f64 = 6.242e18;
/// Photon energy-wavelength product hc (eV nm).
pub const HC_EV_NM: f64 = 1240.0;
/// Fine-structure constant.
pub const ALPHA_FS: f64 = 1.0 / 137.036;
/// Hydrogen Bohr radius (nm).
pub const BOHR_RADIUS_NM: f64 = 5.29e-2;

// Fermi–Dirac inverse fit coefficients, Haug & Koch p. 96. These are
// physical-model constants, not tunable.
const K1: f64 = 4.897;
const K2: f64 = 0.045;
const K3: f64 = 0.133;

/// Dimensionless screening parameter $g = 12/(\pi^2 a_0 k)$.
///
/// # Arguments
/// * `a0` - Exciton Bohr radius (nm).
/// * `k` - Screening wavevector (nm⁻¹).
pub fn screening_parameter(a0: f64, k: f64) -> f64 {
    12.0 / (std::f64::consts::PI.powi(2) * a0 * k)
}

/// Exciton Rydberg energy $E_R = \hbar^2 / (2 m a_0^2)$ in eV.
///
/// # Arguments
/// * `a0` - Exciton Bohr radius (nm).
/// * `m_star` - Reduced effective mass of the electron-hole pair, in units
///   of the free-electron mass.
pub fn exciton_rydberg(a0: f64, m_star: f64) -> f64 {
    let m = m_star * M_E_KG;
    let a0_m = a0 * 1e-9;
    let er_j = HBAR_JS * HBAR_JS / (2.0 * m * a0_m * a0_m);
    er_j * J_TO_EV
}

/// Exciton Bohr radius $a_0 = a_H \epsilon_r / m^*$ in nm.
pub fn exciton_bohr_radius(epsilon_r: f64, m_star: f64) -> f64 {
    BOHR_RADIUS_NM * epsilon_r / m_star
}

/// Screening-renormalized band gap.
///
/// Bound mode uses the bound-exciton branch
/// $E_g = E_{g0} + E_R(-1 + (1 - 1/g)^2)$; unbound mode applies the
/// first-order shift $E_g = E_{g0} - E_R/g$.
pub fn renormalized_gap(eg0: f64, er: f64, g: f64, bound: bool) -> f64 {
    if bound {
        eg0 + er * (-1.0 + (1.0 - 1.0 / g).powi(2))
    } else {
        eg0 - er / g
    }
}

/// Change in the band gap (eV) due to screening, directly from `(a0, k)`.
pub fn gap_shift(a0: f64, k: f64, m_star: f64, bound: bool) -> f64 {
    let g = screening_parameter(a0, k);
    let er = exciton_rydberg(a0, m_star);
    if bound {
        er * (-1.0 + (1.0 - 1.0 / g).powi(2))
    } else {
        -er / g
    }
}

/// Reduced energy detuning $\bar w = (E - E_g)/E_R$.
pub fn reduced_energy(e: f64, eg: f64, er: f64) -> f64 {
    (e - eg) / er
}

/// Reduced temperature $\bar T = k_B T / E_R$.
pub fn reduced_temperature(t: f64, er: f64) -> f64 {
    t * KB_EV / er
}

/// Reduced linewidth $\bar \Gamma = \Gamma / E_R$.
pub fn reduced_linewidth(gamma: f64, er: f64) -> f64 {
    gamma / er
}

/// Reduced chemical potential $\bar\mu = (\mu - E_g/2)/(k_B T)$.
pub fn reduced_chemical_potential(mu: f64, eg: f64, t: f64) -> f64 {
    (mu - eg / 2.0) / (KB_EV * t)
}

/// Dielectric prefactor $r_{cv}^2 / (2\pi a_0^3 E_R)$.
pub fn dielectric_prefactor(rcv: f64, a0: f64, er: f64) -> f64 {
    rcv * rcv / (2.0 * std::f64::consts::PI * a0.powi(3) * er)
}

/// Reduced mass of the electron-hole pair from the individual band masses.
pub fn reduced_mass(me_star: f64, mh_star: f64) -> f64 {
    me_star * mh_star / (me_star + mh_star)
}

/// Debye–Hückel screening wavevector (nm⁻¹) from a carrier density.
///
/// # Arguments
/// * `n` - Carrier density (nm⁻³).
/// * `epsilon_r` - Background dielectric constant.
/// * `t` - Temperature (K).
pub fn debye_huckel_wavevector(n: f64, epsilon_r: f64, t: f64) -> f64 {
    let beta = 1.0 / (KB_EV * t);
    (4.0 / 2.0 * n * beta * ALPHA_FS * HC_EV_NM / epsilon_r).sqrt()
}

/// Thomas–Fermi screening wavevector (nm⁻¹) for a degenerate carrier gas.
///
/// # Arguments
/// * `n` - Carrier density (nm⁻³).
/// * `epsilon_r` - Background dielectric constant.
/// * `ef` - Fermi energy (eV).
pub fn thomas_fermi_wavevector(n: f64, epsilon_r: f64, ef: f64) -> f64 {
    (6.0 / 2.0 * n * ALPHA_FS * HC_EV_NM / (ef * epsilon_r)).sqrt()
}

/// Free-carrier density (nm⁻³) equivalent to a screening wavevector,
/// inverting the Debye–Hückel relation at fixed `(a0, T, m_r)`:
/// $n = k^2 k_B T m_r a_0 / (4\pi\hbar^2)$.
///
/// Inputs are in nm units; the conversion to SI and back is explicit.
pub fn carrier_density_from_screening(a0: f64, k: f64, t: f64, mr_star: f64) -> f64 {
    let k_invm = k * 1e9;
    let a0_m = a0 / 1e9;
    let mr_kg = mr_star * M_E_KG;
    let n_invm3 =
        k_invm * k_invm * KB_J * t * mr_kg * a0_m / (4.0 * std::f64::consts::PI * HBAR_JS * HBAR_JS);
    n_invm3 * 1e-27
}

/// Degeneracy density scale $n_0 = \frac{1}{4}(2 m k_B T / (\pi \hbar^2))^{3/2}$
/// in nm⁻³, against which the Fermi-inverse fit is parametrized.
pub fn quantum_density_scale(t: f64, m_alpha_star: f64) -> f64 {
    let m = m_alpha_star * M_E_KG;
    let beta = 1.0 / (KB_J * t);
    let n_invm3 =
        0.25 * (2.0 * m / (HBAR_JS * HBAR_JS * std::f64::consts::PI * beta)).powf(1.5);
    n_invm3 / 1e27
}

/// Chemical potential (eV) of a carrier gas of density `n` (nm⁻³) via the
/// rational-function fit to the inverse Fermi–Dirac integral:
/// $\mu = k_B T (\ln\nu + K_1 \ln(K_2\nu + 1) + K_3\nu)$, $\nu = n/n_0$.
pub fn chemical_potential_from_density(n: f64, m_alpha_star: f64, t: f64) -> f64 {
    let n0 = quantum_density_scale(t, m_alpha_star);
    let nu = n / n0;
    KB_EV * t * (nu.ln() + K1 * (K2 * nu + 1.0).ln() + K3 * nu)
}

/// Convert a density from cm⁻³ to nm⁻³.
pub fn density_cm3_to_nm3(n_cm3: f64) -> f64 {
    n_cm3 / 1e21
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screening_parameter_reference_value() {
        // a0 = 5 nm, k = 0.1 nm^-1 is the reference scenario; g ~ 24.3
        let g = screening_parameter(5.0, 0.1);
        assert!((g - 24.317).abs() < 1e-2, "g = {}", g);
    }

    #[test]
    fn test_rydberg_scales_inverse_square_radius() {
        let er1 = exciton_rydberg(5.0, 0.0591);
        let er2 = exciton_rydberg(10.0, 0.0591);
        assert!((er1 / er2 - 4.0).abs() < 1e-12);
        // GaAs-like numbers land in the tens of meV
        assert!(er1 > 0.01 && er1 < 0.05, "ER = {} eV", er1);
    }

    #[test]
    fn test_renormalized_gap_limits() {
        // As g -> inf both branches recover the bare gap.
        let eg0 = 1.5;
        let er = 0.02;
        assert!((renormalized_gap(eg0, er, 1e12, true) - eg0).abs() < 1e-9);
        assert!((renormalized_gap(eg0, er, 1e12, false) - eg0).abs() < 1e-9);
        // At g = 1 the bound branch sits a full Rydberg below the bare gap.
        assert!((renormalized_gap(eg0, er, 1.0, true) - (eg0 - er)).abs() < 1e-12);
    }

    #[test]
    fn test_reductions_roundtrip() {
        let er = 0.025;
        let eg = 1.45;
        let wbar = reduced_energy(1.5, eg, er);
        assert!((wbar * er + eg - 1.5).abs() < 1e-12);
        assert!((reduced_temperature(300.0, er) - 300.0 * KB_EV / er).abs() < 1e-15);
        assert!((reduced_linewidth(0.002, er) - 0.08).abs() < 1e-12);
    }

    #[test]
    fn test_chemical_potential_monotonic_in_density() {
        let t = 300.0;
        let m = 0.067;
        let mut prev = f64::NEG_INFINITY;
        for &n in &[1e-7, 1e-6, 1e-5, 1e-4, 1e-3] {
            let mu = chemical_potential_from_density(n, m, t);
            assert!(mu > prev, "mu not monotonic at n = {}", n);
            prev = mu;
        }
        // Nondegenerate densities give mu well below the band edge.
        assert!(chemical_potential_from_density(1e-7, m, t) < -0.1);
    }

    #[test]
    fn test_density_screening_consistency() {
        // carrier_density_from_screening is the Debye-Hueckel relation
        // solved for n, so it must grow as k^2.
        let n1 = carrier_density_from_screening(5.0, 0.1, 300.0, 0.0591);
        let n2 = carrier_density_from_screening(5.0, 0.2, 300.0, 0.0591);
        assert!((n2 / n1 - 4.0).abs() < 1e-12);
        assert!(n1 > 0.0);
    }

    #[test]
    fn test_gap_shift_matches_renormalized_gap() {
        let (a0, k, m) = (5.0, 0.1, 0.0591);
        let g = screening_parameter(a0, k);
        let er = exciton_rydberg(a0, m);
        for bound in [true, false] {
            let direct = gap_shift(a0, k, m, bound);
            let via_gap = renormalized_gap(1.5, er, g, bound) - 1.5;
            assert!((direct - via_gap).abs() < 1e-12);
        }
    }

    #[test]
    fn test_exciton_bohr_radius_gaas_like() {
        // eps_r ~ 12.9, m* ~ 0.0591 lands near 11.5 nm.
        let a0 = exciton_bohr_radius(12.9, 0.0591);
        assert!(a0 > 10.0 && a0 < 13.0, "a0 = {} nm", a0);
    }

    #[test]
    fn test_screening_wavevectors_scale_as_sqrt_density() {
        let n = density_cm3_to_nm3(1e17);
        assert!((n - 1e-4).abs() < 1e-18);
        let dh1 = debye_huckel_wavevector(n, 12.9, 300.0);
        let dh4 = debye_huckel_wavevector(4.0 * n, 12.9, 300.0);
        assert!((dh4 / dh1 - 2.0).abs() < 1e-12);
        let tf1 = thomas_fermi_wavevector(n, 12.9, 0.05);
        let tf4 = thomas_fermi_wavevector(4.0 * n, 12.9, 0.05);
        assert!((tf4 / tf1 - 2.0).abs() < 1e-12);
        assert!(dh1 > 0.0 && tf1 > 0.0);
    }

    #[test]
    fn test_reduced_mass() {
        assert!((reduced_mass(0.067, 0.5) - 0.067 * 0.5 / 0.567).abs() < 1e-15);
        // Symmetric under exchange.
        assert_eq!(reduced_mass(0.2, 0.3), reduced_mass(0.3, 0.2));
    }
}
