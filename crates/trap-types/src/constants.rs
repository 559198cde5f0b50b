// ─────────────────────────────────────────────────────────────────────
// SCPN Trapping — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Length of the gaseous source along the field axis (m).
/// The source spans [-SOURCE_LENGTH / 2, SOURCE_LENGTH / 2].
pub const SOURCE_LENGTH: f64 = 3.0;

/// Half length of the source (m).
pub const HALF_SOURCE_LENGTH: f64 = SOURCE_LENGTH / 2.0;

/// Path-length step of the adiabatic integrator in a non-uniform field (m).
pub const INTEGRATION_STEP: f64 = 0.1;

/// Bohr radius (m).
pub const BOHR_RADIUS: f64 = 5.291_772_109e-11;

/// Rydberg energy (eV).
pub const RYDBERG_EV: f64 = 13.605_693_123;

/// Hartree energy (eV).
pub const HARTREE_EV: f64 = 2.0 * RYDBERG_EV;

/// Electron rest energy (eV).
pub const ELECTRON_MASS_EV: f64 = 510_998.950;

/// Atomic mass unit rest energy (eV).
pub const AMU_EV: f64 = 931_494_102.42;
