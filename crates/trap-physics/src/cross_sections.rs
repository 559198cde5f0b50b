// ─────────────────────────────────────────────────────────────────────
// SCPN Trapping — Electron Scattering Cross Sections
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Electron scattering on molecular hydrogen isotopologues (H2, D2, T2).
//!
//! Energies in eV, cross sections in m^2, scattering angles in degrees.
//!
//! References:
//! - Liu, Phys. Rev. A 35, 591 (1987): Born elastic cross section
//! - Kim & Rudd, Phys. Rev. A 50, 3954 (1994): binary-encounter-Bethe ionization
//! - Aseev et al., Eur. Phys. J. D 10, 39 (2000): energy loss in T2

use crate::field::interp;
use rand::Rng;
use std::f64::consts::PI;
use trap_types::constants::{AMU_EV, BOHR_RADIUS, ELECTRON_MASS_EV, HARTREE_EV, RYDBERG_EV};

/// a0^2 [m^2].
const A0_SQ: f64 = BOHR_RADIUS * BOHR_RADIUS;
/// Born approximation is used for the elastic channel above this energy [eV].
const ELASTIC_BORN_MIN_EV: f64 = 400.0;
/// Low-energy elastic data, energies [eV].
const ELASTIC_TABLE_E: [f64; 14] = [
    0.0, 1.5, 5.0, 7.0, 10.0, 15.0, 20.0, 30.0, 60.0, 100.0, 150.0, 200.0, 300.0, 400.0,
];
/// Low-energy elastic data, cross sections [1e-20 m^2].
const ELASTIC_TABLE_SIGMA: [f64; 14] = [
    9.6, 13.0, 15.0, 12.0, 10.0, 7.0, 5.6, 3.3, 1.1, 0.9, 0.5, 0.36, 0.23, 0.15,
];
/// Effective electronic excitation energy, Aseev (2000) [eV].
const EXCITATION_EV: f64 = 12.6;
/// Effective dipole matrix element squared for the summed excitation channel.
const EXCITATION_M2: f64 = 0.75;
/// Upper bound of the inelastic small-angle distribution [rad].
const INELASTIC_THETA_MAX: f64 = 1.0;
/// H2 binding energy, Kim & Rudd (1994) [eV].
const BINDING_EV: f64 = 15.43;
/// H2 orbital kinetic energy, Kim & Rudd (1994) [eV].
const ORBITAL_KINETIC_EV: f64 = 15.98;
/// Electrons in the H2 orbital.
const ORBITAL_OCCUPATION: f64 = 2.0;

/// Scattering channel drawn by the scatter engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    Elastic,
    Excitation,
    Ionization,
}

/// One sampled collision outcome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterSample {
    /// Energy lost by the primary electron [eV], never negative.
    pub energy_loss: f64,
    /// Polar deflection of the primary electron [deg].
    pub angle_deg: f64,
}

/// Cross-section and energy-loss model of the source gas.
pub trait CrossSections {
    fn elastic(&self, e: f64) -> f64;
    fn excitation(&self, e: f64) -> f64;
    fn ionization(&self, e: f64) -> f64;

    fn total(&self, e: f64) -> f64 {
        self.elastic(e) + self.excitation(e) + self.ionization(e)
    }

    fn sample_elastic<R: Rng + ?Sized>(&self, e: f64, rng: &mut R) -> ScatterSample;
    fn sample_excitation<R: Rng + ?Sized>(&self, e: f64, rng: &mut R) -> ScatterSample;
    fn sample_ionization<R: Rng + ?Sized>(&self, e: f64, rng: &mut R) -> ScatterSample;

    fn sample<R: Rng + ?Sized>(&self, kind: InteractionKind, e: f64, rng: &mut R) -> ScatterSample {
        match kind {
            InteractionKind::Elastic => self.sample_elastic(e, rng),
            InteractionKind::Excitation => self.sample_excitation(e, rng),
            InteractionKind::Ionization => self.sample_ionization(e, rng),
        }
    }
}

/// Molecular hydrogen isotopologue target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydrogenCrossSections {
    /// Rest energy of the target molecule [eV]; only enters the elastic recoil.
    pub molecular_mass_ev: f64,
}

impl HydrogenCrossSections {
    pub fn hydrogen() -> Self {
        HydrogenCrossSections {
            molecular_mass_ev: 2.0 * 1.007_825 * AMU_EV,
        }
    }

    pub fn deuterium() -> Self {
        HydrogenCrossSections {
            molecular_mass_ev: 2.0 * 2.014_102 * AMU_EV,
        }
    }

    pub fn tritium() -> Self {
        HydrogenCrossSections {
            molecular_mass_ev: 2.0 * 3.016_049 * AMU_EV,
        }
    }
}

impl Default for HydrogenCrossSections {
    fn default() -> Self {
        Self::tritium()
    }
}

impl CrossSections for HydrogenCrossSections {
    fn elastic(&self, e: f64) -> f64 {
        if e >= ELASTIC_BORN_MIN_EV {
            // Born approximation, Liu (1987), T in Hartree
            let emass = ELECTRON_MASS_EV / HARTREE_EV;
            let t = e / HARTREE_EV;
            let gamma = (emass + t) / emass;
            gamma * gamma * PI / (2.0 * t) * (4.2106 - 2.0 / t) * A0_SQ
        } else {
            interp(e, &ELASTIC_TABLE_E, &ELASTIC_TABLE_SIGMA) * 1e-20
        }
    }

    fn excitation(&self, e: f64) -> f64 {
        if e <= EXCITATION_EV {
            return 0.0;
        }
        4.0 * PI * A0_SQ * (RYDBERG_EV / e) * EXCITATION_M2 * (e / EXCITATION_EV).ln()
    }

    fn ionization(&self, e: f64) -> f64 {
        let t = e / BINDING_EV;
        if t <= 1.0 {
            return 0.0;
        }
        // BEB with Q = 1
        let u = ORBITAL_KINETIC_EV / BINDING_EV;
        let s = 4.0 * PI * A0_SQ * ORBITAL_OCCUPATION * (RYDBERG_EV / BINDING_EV).powi(2);
        let ln_t = t.ln();
        let bracket = 0.5 * ln_t * (1.0 - 1.0 / (t * t)) + 1.0 - 1.0 / t - ln_t / (t + 1.0);
        (s / (t + u + 1.0) * bracket).max(0.0)
    }

    fn sample_elastic<R: Rng + ?Sized>(&self, e: f64, rng: &mut R) -> ScatterSample {
        // Screened Rutherford, screening parameter from the H atom size
        let eta = RYDBERG_EV / (4.0 * e);
        let xi: f64 = rng.gen();
        let cos_theta = (1.0 - 2.0 * eta * xi / (1.0 + eta - xi)).clamp(-1.0, 1.0);
        let recoil = 2.0 * ELECTRON_MASS_EV / self.molecular_mass_ev * e * (1.0 - cos_theta);
        ScatterSample {
            energy_loss: recoil.clamp(0.0, e),
            angle_deg: cos_theta.acos().to_degrees(),
        }
    }

    fn sample_excitation<R: Rng + ?Sized>(&self, e: f64, rng: &mut R) -> ScatterSample {
        let loss = EXCITATION_EV.min(e);
        ScatterSample {
            energy_loss: loss,
            angle_deg: sample_inelastic_angle(loss, e, rng).to_degrees(),
        }
    }

    fn sample_ionization<R: Rng + ?Sized>(&self, e: f64, rng: &mut R) -> ScatterSample {
        let w_max = 0.5 * (e - BINDING_EV);
        if w_max <= 0.0 {
            let loss = BINDING_EV.min(e);
            return ScatterSample {
                energy_loss: loss,
                angle_deg: sample_inelastic_angle(loss, e, rng).to_degrees(),
            };
        }
        // Secondary energy from dσ/dW ∝ 1/(W + B)^2 on [0, w_max]
        let xi: f64 = rng.gen();
        let inv_b = 1.0 / BINDING_EV;
        let inv_top = 1.0 / (w_max + BINDING_EV);
        let w = (1.0 / (inv_b - xi * (inv_b - inv_top)) - BINDING_EV).clamp(0.0, w_max);
        let loss = BINDING_EV + w;
        // Binary encounter with an electron at rest: cos^2 θ = E'/E
        let cos_theta = ((e - loss) / e).max(0.0).sqrt();
        ScatterSample {
            energy_loss: loss,
            angle_deg: cos_theta.acos().to_degrees(),
        }
    }
}

/// Small-angle inelastic deflection from P(θ) ∝ θ / (θ^2 + θ_E^2), θ_E = ΔE / 2E [rad].
fn sample_inelastic_angle<R: Rng + ?Sized>(loss: f64, e: f64, rng: &mut R) -> f64 {
    let theta_e = (loss / (2.0 * e)).max(1e-12);
    let span = 1.0 + (INELASTIC_THETA_MAX / theta_e).powi(2);
    let xi: f64 = rng.gen();
    (theta_e * (span.powf(xi) - 1.0).max(0.0).sqrt()).min(INELASTIC_THETA_MAX)
}
