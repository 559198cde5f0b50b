// ─────────────────────────────────────────────────────────────────────
// SCPN Trapping — Source Magnetic Field
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Longitudinal magnetic field of the source and the adiabatic angle map.
//!
//! Pitch angles are tracked as "virtual" angles normalized to the reference
//! field. The local ("real") angle follows from the adiabatic invariant
//! sin^2(theta) / B = const.

use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::sync::Arc;
use trap_types::config::FieldProfile;
use trap_types::constants::HALF_SOURCE_LENGTH;
use trap_types::error::{TrapError, TrapResult};

/// Field magnitude as a function of the longitudinal position [T].
pub type FieldFn = Arc<dyn Fn(f64) -> f64 + Send + Sync>;

#[derive(Clone)]
pub enum MagneticField {
    /// Spatially constant field equal to the reference.
    Uniform { reference: f64 },
    /// Position-dependent field, normalized against `reference`.
    Sampled { reference: f64, profile: FieldFn },
}

impl fmt::Debug for MagneticField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MagneticField::Uniform { reference } => f
                .debug_struct("Uniform")
                .field("reference", reference)
                .finish(),
            MagneticField::Sampled { reference, .. } => f
                .debug_struct("Sampled")
                .field("reference", reference)
                .finish_non_exhaustive(),
        }
    }
}

impl MagneticField {
    pub fn uniform(reference: f64) -> Self {
        MagneticField::Uniform { reference }
    }

    pub fn sampled<F>(reference: f64, profile: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        MagneticField::Sampled {
            reference,
            profile: Arc::new(profile),
        }
    }

    /// Build the field described by a validated configuration profile.
    pub fn from_profile(profile: &FieldProfile, reference: f64) -> TrapResult<Self> {
        if !reference.is_finite() || reference <= 0.0 {
            return Err(TrapError::ConfigError(format!(
                "reference field must be finite and > 0, got {reference}"
            )));
        }
        profile.validate()?;
        let field = match profile {
            FieldProfile::Uniform => MagneticField::uniform(reference),
            FieldProfile::Mirror { mirror_ratio } => {
                let excess = mirror_ratio - 1.0;
                MagneticField::sampled(reference, move |z| {
                    let s = z / HALF_SOURCE_LENGTH;
                    reference * (1.0 + excess * s * s)
                })
            }
            FieldProfile::Tabulated { z, b } => {
                let z = z.clone();
                let b = b.clone();
                MagneticField::sampled(reference, move |x| interp(x, &z, &b))
            }
        };
        Ok(field)
    }

    pub fn reference(&self) -> f64 {
        match self {
            MagneticField::Uniform { reference } | MagneticField::Sampled { reference, .. } => {
                *reference
            }
        }
    }

    pub fn is_uniform(&self) -> bool {
        matches!(self, MagneticField::Uniform { .. })
    }

    /// Field magnitude at position `z` [T].
    #[inline]
    pub fn at(&self, z: f64) -> f64 {
        match self {
            MagneticField::Uniform { reference } => *reference,
            MagneticField::Sampled { profile, .. } => profile(z),
        }
    }

    /// Local pitch angle at `z` for a virtual angle `theta`.
    pub fn real_theta(&self, theta: f64, z: f64) -> f64 {
        match self {
            MagneticField::Uniform { .. } => theta,
            MagneticField::Sampled { reference, profile } => {
                map_hemisphere(theta, (profile(z) / reference).sqrt())
            }
        }
    }

    /// Virtual pitch angle for a local angle `real` at `z`.
    pub fn virtual_theta(&self, real: f64, z: f64) -> f64 {
        match self {
            MagneticField::Uniform { .. } => real,
            MagneticField::Sampled { reference, profile } => {
                map_hemisphere(real, (reference / profile(z)).sqrt())
            }
        }
    }
}

/// asin(min(|sin theta| * scale, 1)), mirrored into the hemisphere of `theta`.
fn map_hemisphere(theta: f64, scale: f64) -> f64 {
    let mapped = (theta.sin().abs() * scale).min(1.0).asin();
    debug_assert!(!mapped.is_nan(), "adiabatic map produced NaN for theta={theta}");
    if theta > FRAC_PI_2 {
        PI - mapped
    } else {
        mapped
    }
}

/// Piecewise-linear lookup on increasing `xp`, clamped to the end values.
pub(crate) fn interp(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    if x <= xp[0] {
        return fp[0];
    }
    let last = xp.len() - 1;
    if x >= xp[last] {
        return fp[last];
    }
    let mut lo = 0;
    let mut hi = last;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xp[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    let t = (x - xp[lo]) / (xp[hi] - xp[lo]);
    fp[lo] + t * (fp[hi] - fp[lo])
}
