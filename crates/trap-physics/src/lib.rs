// ─────────────────────────────────────────────────────────────────────
// SCPN Trapping — Trap Physics
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Collaborators of the trapping simulator.
//!
//! Electron scattering on molecular hydrogen isotopologues and the
//! longitudinal magnetic field of the source.

pub mod cross_sections;
pub mod field;
