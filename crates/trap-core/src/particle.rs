// ─────────────────────────────────────────────────────────────────────
// SCPN Trapping — Particle State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-trial electron state and the wall termination state machine.

use std::f64::consts::{FRAC_PI_2, PI};
use trap_types::constants::{HALF_SOURCE_LENGTH, SOURCE_LENGTH};
use trap_types::state::{EndState, SimulationResult};

/// Escape thresholds of the two source ends, as virtual pitch angles [rad].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Apertures {
    /// Rear transport magnet: escapes when theta >= pi - theta_transport.
    pub theta_transport: f64,
    /// Front pinch magnet: escapes when theta < theta_pinch.
    pub theta_pinch: f64,
}

impl Apertures {
    #[inline]
    fn passes_rear(&self, theta: f64) -> bool {
        theta >= PI - self.theta_transport
    }

    #[inline]
    fn passes_front(&self, theta: f64) -> bool {
        theta < self.theta_pinch
    }

    /// True when neither `theta` nor its mirror image can leave through either end.
    pub fn reflects_at_both_walls(&self, theta: f64) -> bool {
        let mirrored = PI - theta;
        !(self.passes_rear(theta)
            || self.passes_rear(mirrored)
            || self.passes_front(theta)
            || self.passes_front(mirrored))
    }
}

/// Mutable state of one electron. Owned by a single trial.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleState {
    /// Kinetic energy [eV].
    pub(crate) e: f64,
    /// Pitch angle normalized to the reference field [rad].
    pub(crate) theta: f64,
    /// Longitudinal position, 0 at the source centre [m].
    pub(crate) z: f64,
    /// Path length travelled [m].
    pub(crate) l: f64,
    pub(crate) collisions: u64,
    pub(crate) end_state: EndState,
}

impl ParticleState {
    pub fn new(e: f64, theta: f64, z: f64) -> Self {
        ParticleState {
            e,
            theta,
            z,
            l: 0.0,
            collisions: 0,
            end_state: EndState::None,
        }
    }

    pub fn energy(&self) -> f64 {
        self.e
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn path_length(&self) -> f64 {
        self.l
    }

    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    pub fn end_state(&self) -> EndState {
        self.end_state
    }

    #[inline]
    pub fn is_forward(&self) -> bool {
        self.theta <= FRAC_PI_2
    }

    /// +1 towards the pinch, -1 towards the transport magnet.
    #[inline]
    pub fn direction(&self) -> f64 {
        if self.is_forward() {
            1.0
        } else {
            -1.0
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.end_state.is_terminal()
    }

    /// Latch a terminal state. The first terminal state wins.
    pub fn finish(&mut self, state: EndState) {
        debug_assert!(state.is_terminal(), "cannot finish a trial with NONE");
        if !self.is_finished() {
            self.end_state = state;
        }
    }

    pub fn record_collision(&mut self) {
        self.collisions += 1;
    }

    pub fn subtract_energy(&mut self, de: f64) -> f64 {
        debug_assert!(de >= 0.0, "negative energy loss {de}");
        self.e -= de;
        self.e
    }

    /// Reverse the direction of motion: theta -> pi - theta.
    pub fn flip(&mut self) {
        assert!(
            (0.0..=PI).contains(&self.theta),
            "pitch angle {} outside [0, pi] at flip",
            self.theta
        );
        self.theta = PI - self.theta;
    }

    /// Move by `dz` and resolve every wall crossing on the way.
    ///
    /// Returns the longitudinal distance that was not travelled because the
    /// trial terminated at a wall (zero otherwise).
    pub fn advance_z(&mut self, dz: f64, apertures: &Apertures) -> f64 {
        self.z += dz;
        if self.z.abs() > HALF_SOURCE_LENGTH && apertures.reflects_at_both_walls(self.theta) {
            // A front and a rear reflection translate by 2L and leave theta unchanged
            self.z = fold_periodic(self.z);
        }
        while self.z.abs() > HALF_SOURCE_LENGTH && !self.is_finished() {
            if self.z < 0.0 {
                if apertures.passes_rear(self.theta) {
                    self.finish(EndState::Rejected);
                }
                if self.is_finished() {
                    let overshoot = -HALF_SOURCE_LENGTH - self.z;
                    self.z = -HALF_SOURCE_LENGTH;
                    return overshoot;
                }
                self.z = -SOURCE_LENGTH - self.z;
            } else {
                if apertures.passes_front(self.theta) {
                    if self.collisions == 0 {
                        self.finish(EndState::Pass);
                    } else {
                        self.finish(EndState::Accepted);
                    }
                }
                if self.is_finished() {
                    let overshoot = self.z - HALF_SOURCE_LENGTH;
                    self.z = HALF_SOURCE_LENGTH;
                    return overshoot;
                }
                self.z = SOURCE_LENGTH - self.z;
            }
            self.flip();
        }
        0.0
    }

    pub fn to_result(&self, init_theta: f64) -> SimulationResult {
        SimulationResult {
            state: self.end_state,
            energy: self.e,
            theta: self.theta,
            init_theta,
            collision_number: self.collisions,
            path_length: self.l,
        }
    }
}

/// Shift an out-of-range `z` by whole periods 2L towards the source.
/// At most two reflections remain afterwards.
fn fold_periodic(z: f64) -> f64 {
    let period = 2.0 * SOURCE_LENGTH;
    if z > HALF_SOURCE_LENGTH {
        z - ((z - HALF_SOURCE_LENGTH) / period).floor() * period
    } else if z < -HALF_SOURCE_LENGTH {
        z + ((-HALF_SOURCE_LENGTH - z) / period).floor() * period
    } else {
        z
    }
}
