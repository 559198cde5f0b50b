// ─────────────────────────────────────────────────────────────────────
// SCPN Trapping — Simulation Driver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! One electron from birth to its terminal fate.
//!
//! Loop: sample the free path, propagate, and if the electron is still in
//! the source scatter it and check the low-energy cut.

use crate::free_path::sample_free_path;
use crate::particle::{Apertures, ParticleState};
use crate::propagate::propagate;
use crate::scatter::scatter;
use log::{debug, trace, warn};
use rand::Rng;
use std::f64::consts::PI;
use trap_physics::cross_sections::CrossSections;
use trap_physics::field::MagneticField;
use trap_types::config::SimulatorConfig;
use trap_types::constants::HALF_SOURCE_LENGTH;
use trap_types::error::{TrapError, TrapResult};
use trap_types::state::{EndState, SimulationResult};

/// Trapping simulator with its own random stream.
///
/// `simulate` takes `&mut self`; run one simulator per worker thread.
#[derive(Debug)]
pub struct Simulator<X, R> {
    config: SimulatorConfig,
    apertures: Apertures,
    field: MagneticField,
    cross_sections: X,
    rng: R,
}

impl<X: CrossSections, R: Rng> Simulator<X, R> {
    /// Validate `config` and build the field from its profile.
    pub fn new(config: SimulatorConfig, cross_sections: X, rng: R) -> TrapResult<Self> {
        config.validate()?;
        let field = MagneticField::from_profile(&config.field, config.b_source)?;
        Self::with_field(config, field, cross_sections, rng)
    }

    /// Validate `config` and use `field` instead of the configured profile.
    pub fn with_field(
        config: SimulatorConfig,
        field: MagneticField,
        cross_sections: X,
        rng: R,
    ) -> TrapResult<Self> {
        config.validate()?;
        if (field.reference() - config.b_source).abs() > 1e-12 * config.b_source {
            return Err(TrapError::ConfigError(format!(
                "field reference {} differs from b_source {}",
                field.reference(),
                config.b_source
            )));
        }
        debug!(
            "simulator ready: e_low={} eV, apertures=({:.4}, {:.4}), n={:.3e} m^-3",
            config.e_low, config.theta_transport, config.theta_pinch, config.gas_density
        );
        debug!("source field: {field:?}");
        let apertures = Apertures {
            theta_transport: config.theta_transport,
            theta_pinch: config.theta_pinch,
        };
        Ok(Simulator {
            config,
            apertures,
            field,
            cross_sections,
            rng,
        })
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn field(&self) -> &MagneticField {
        &self.field
    }

    /// The simulator's random stream, for drawing initial conditions.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Simulate one electron born with `init_energy` [eV] at pitch angle
    /// `init_theta` [rad] and position `init_z` [m].
    ///
    /// # Panics
    /// When `init_energy <= 0`, `init_theta` is not in (0, pi) or
    /// `|init_z| > SOURCE_LENGTH / 2`.
    pub fn simulate(
        &mut self,
        init_energy: f64,
        init_theta: f64,
        init_z: f64,
    ) -> SimulationResult {
        assert!(init_energy > 0.0, "initial energy must be > 0, got {init_energy}");
        assert!(
            init_theta > 0.0 && init_theta < PI,
            "initial pitch angle must lie in (0, pi), got {init_theta}"
        );
        assert!(
            init_z.abs() <= HALF_SOURCE_LENGTH,
            "initial position {init_z} outside the source"
        );

        let limits = self.config.limits;
        let mut pos = ParticleState::new(init_energy, init_theta, init_z);

        while !pos.is_finished() {
            let remaining = limits.max_path_length - pos.l;
            if remaining <= 0.0 || pos.collisions >= limits.max_collisions {
                pos.finish(EndState::Unterminated);
                break;
            }

            let free_path = sample_free_path(
                &self.cross_sections,
                self.config.gas_density,
                pos.e,
                &mut self.rng,
            );
            let dl = free_path.min(remaining);
            propagate(&mut pos, dl, &self.field, &self.apertures);
            if pos.is_finished() {
                break;
            }
            if free_path > remaining {
                // stopped by the path-length limit, not by a collision
                pos.finish(EndState::Unterminated);
                break;
            }

            scatter(&mut pos, &self.cross_sections, &self.field, &mut self.rng);
            pos.record_collision();
            if pos.e < self.config.e_low {
                pos.finish(EndState::LowEnergy);
            }
        }

        if pos.end_state == EndState::Unterminated {
            warn!(
                "trial stopped by limits: {} collisions, {:.3e} m, e={:.1} eV, theta={:.4}",
                pos.collisions, pos.l, pos.e, pos.theta
            );
        }
        trace!(
            "trial finished: {:?}, e={:.1} eV, collisions={}, l={:.3e} m",
            pos.end_state,
            pos.e,
            pos.collisions,
            pos.l
        );
        pos.to_result(init_theta)
    }
}
