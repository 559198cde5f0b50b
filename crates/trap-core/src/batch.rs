// ─────────────────────────────────────────────────────────────────────
// SCPN Trapping — Batch Driver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Parallel Monte Carlo over independent trials.
//!
//! Trials are split into fixed-size chunks. Each chunk owns a simulator
//! seeded from `seed + chunk_index`, so results do not depend on the number
//! of worker threads.

use crate::simulator::Simulator;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::Serialize;
use std::f64::consts::PI;
use trap_physics::cross_sections::CrossSections;
use trap_physics::field::MagneticField;
use trap_types::config::{BatchConfig, RunConfig, SimulatorConfig};
use trap_types::constants::SOURCE_LENGTH;
use trap_types::error::TrapResult;
use trap_types::state::{EndState, SimulationResult};

/// End-state counts and derived ratios of one batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatchSummary {
    pub trials: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub low_energy: usize,
    pub pass: usize,
    pub unterminated: usize,
    pub mean_collisions: f64,
    /// accepted / trials
    pub acceptance_fraction: f64,
    /// pass / trials
    pub pass_fraction: f64,
    /// accepted / (trials - pass)
    pub trapping_fraction: f64,
}

impl BatchSummary {
    pub fn from_results(results: &[SimulationResult]) -> Self {
        let mut summary = BatchSummary {
            trials: results.len(),
            ..Default::default()
        };
        let mut collisions = 0u64;
        for r in results {
            collisions += r.collision_number;
            match r.state {
                EndState::Accepted => summary.accepted += 1,
                EndState::Rejected => summary.rejected += 1,
                EndState::LowEnergy => summary.low_energy += 1,
                EndState::Pass => summary.pass += 1,
                EndState::Unterminated => summary.unterminated += 1,
                EndState::None => {}
            }
        }
        if summary.trials == 0 {
            return summary;
        }
        let n = summary.trials as f64;
        summary.mean_collisions = collisions as f64 / n;
        summary.acceptance_fraction = summary.accepted as f64 / n;
        summary.pass_fraction = summary.pass as f64 / n;
        let scattered = summary.trials - summary.pass;
        if scattered > 0 {
            summary.trapping_fraction = summary.accepted as f64 / scattered as f64;
        }
        summary
    }

    pub fn count(&self, state: EndState) -> usize {
        match state {
            EndState::Accepted => self.accepted,
            EndState::Rejected => self.rejected,
            EndState::LowEnergy => self.low_energy,
            EndState::Pass => self.pass,
            EndState::Unterminated => self.unterminated,
            EndState::None => 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BatchOutcome {
    /// Per-trial results in trial order.
    pub results: Vec<SimulationResult>,
    pub summary: BatchSummary,
}

/// Isotropic birth direction and uniform birth position.
fn sample_birth<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    let theta = loop {
        let theta = (1.0 - 2.0 * rng.gen::<f64>()).acos();
        if theta > 0.0 && theta < PI {
            break theta;
        }
    };
    let z = (rng.gen::<f64>() - 0.5) * SOURCE_LENGTH;
    (theta, z)
}

/// Run `batch.trials` electrons born at `batch.energy`.
pub fn run_batch<X>(
    config: &SimulatorConfig,
    field: &MagneticField,
    cross_sections: &X,
    batch: &BatchConfig,
) -> TrapResult<BatchOutcome>
where
    X: CrossSections + Clone + Send + Sync,
{
    batch.validate()?;
    // fail before spawning workers
    Simulator::with_field(
        config.clone(),
        field.clone(),
        cross_sections.clone(),
        StdRng::seed_from_u64(batch.seed),
    )?;

    let n_chunks = batch.trials.div_ceil(batch.chunk_size);
    let chunks: Vec<TrapResult<Vec<SimulationResult>>> = (0..n_chunks)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * batch.chunk_size;
            let len = batch.chunk_size.min(batch.trials - start);
            let rng = StdRng::seed_from_u64(batch.seed.wrapping_add(chunk as u64));
            let mut sim = Simulator::with_field(
                config.clone(),
                field.clone(),
                cross_sections.clone(),
                rng,
            )?;
            let results: Vec<SimulationResult> = (0..len)
                .map(|_| {
                    let (theta, z) = sample_birth(sim.rng_mut());
                    sim.simulate(batch.energy, theta, z)
                })
                .collect();
            debug!("chunk {chunk}: {len} trials from index {start}");
            Ok(results)
        })
        .collect();

    let mut results = Vec::with_capacity(batch.trials);
    for chunk in chunks {
        results.extend(chunk?);
    }
    let summary = BatchSummary::from_results(&results);
    info!(
        "batch done: {} trials, accepted={}, rejected={}, low_energy={}, pass={}",
        summary.trials,
        summary.accepted,
        summary.rejected,
        summary.low_energy,
        summary.pass
    );
    info!(
        "unterminated={}, trapping fraction={:.4}",
        summary.unterminated, summary.trapping_fraction
    );
    Ok(BatchOutcome { results, summary })
}

/// Run the batch described by a run file, building the configured field profile.
pub fn run_config<X>(run: &RunConfig, cross_sections: &X) -> TrapResult<BatchOutcome>
where
    X: CrossSections + Clone + Send + Sync,
{
    let field = MagneticField::from_profile(&run.simulator.field, run.simulator.b_source)?;
    run_batch(&run.simulator, &field, cross_sections, &run.batch)
}
