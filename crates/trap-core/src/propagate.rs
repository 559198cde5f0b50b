// ─────────────────────────────────────────────────────────────────────
// SCPN Trapping — Trajectory Propagator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// ─────────────────────────────────────────────────────────────────────
//! Guiding-centre motion between two collisions.
//!
//! In a uniform field the electron moves on a straight line with
//! dz = dl cos(theta). In a sampled field the longitudinal velocity follows
//! the adiabatic invariant, v_z / v = sqrt(1 - sin^2(theta) B(z) / B_ref),
//! integrated with a fixed path step; a negative radicand marks the
//! magnetic-mirror turning point and reverses the direction.

use crate::particle::{Apertures, ParticleState};
use trap_physics::field::MagneticField;
use trap_types::constants::INTEGRATION_STEP;

/// Remaining path below which the sampled integrator stops [m].
const MIN_STEP: f64 = 1e-9;

/// Advance `state` by the path length `dl` [m], or until it leaves the source.
///
/// The path length only accumulates the distance actually travelled.
pub fn propagate(state: &mut ParticleState, dl: f64, field: &MagneticField, apertures: &Apertures) {
    debug_assert!(dl >= 0.0, "negative path increment {dl}");
    debug_assert!(dl.is_finite(), "path increment must be finite");
    match field {
        MagneticField::Uniform { .. } => propagate_uniform(state, dl, apertures),
        MagneticField::Sampled { .. } => propagate_sampled(state, dl, field, apertures),
    }
}

fn propagate_uniform(state: &mut ParticleState, dl: f64, apertures: &Apertures) {
    // the sign of cos(theta) carries the direction
    let cos_theta = state.theta.cos();
    let overshoot = state.advance_z(dl * cos_theta, apertures);
    let untravelled = if overshoot > 0.0 {
        overshoot / cos_theta.abs().max(f64::MIN_POSITIVE)
    } else {
        0.0
    };
    state.l += (dl - untravelled).max(0.0);
}

fn propagate_sampled(
    state: &mut ParticleState,
    dl: f64,
    field: &MagneticField,
    apertures: &Apertures,
) {
    let reference = field.reference();
    // invariant under flips
    let sin2 = state.theta.sin().powi(2);
    let mut travelled = 0.0;

    while dl - travelled > MIN_STEP && !state.is_finished() {
        let step = (dl - travelled).min(INTEGRATION_STEP);
        let root = 1.0 - sin2 * field.at(state.z) / reference;
        if root < 0.0 {
            state.flip();
        }
        let speed = root.abs().sqrt();
        let overshoot = state.advance_z(state.direction() * step * speed, apertures);
        let untravelled = if overshoot > 0.0 && speed > 0.0 {
            (overshoot / speed).min(step)
        } else {
            0.0
        };
        state.l += step - untravelled;
        travelled += step;
    }
}
