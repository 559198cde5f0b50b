// ─────────────────────────────────────────────────────────────────────
// SCPN Trapping — Trap Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Single-electron transport through a magnetic-mirror gas source.
//!
//! Free-path sampling, adiabatic propagation with wall reflection,
//! gas scattering and the per-trial termination state machine.

pub mod batch;
pub mod free_path;
pub mod particle;
pub mod propagate;
pub mod scatter;
pub mod simulator;
