// ─────────────────────────────────────────────────────────────────────
// SCPN Trapping — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{TrapError, TrapResult};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Source and aperture parameters of one simulator.
/// Angles are pitch angles normalized to `b_source`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Energy below which a trial ends as LOW_ENERGY [eV].
    pub e_low: f64,
    /// Rear rejection threshold [rad].
    pub theta_transport: f64,
    /// Front acceptance threshold [rad].
    pub theta_pinch: f64,
    /// Gas number density [m^-3].
    pub gas_density: f64,
    /// Reference field magnitude [T].
    pub b_source: f64,
    /// Longitudinal field shape. When absent the field is uniform at `b_source`.
    #[serde(default)]
    pub field: FieldProfile,
    #[serde(default)]
    pub limits: TrialLimits,
}

/// Longitudinal field shape along the source axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldProfile {
    #[default]
    Uniform,
    /// Parabolic mirror: b(z) = b_source * (1 + (mirror_ratio - 1) * (2z/L)^2).
    Mirror { mirror_ratio: f64 },
    /// Piecewise-linear samples b(z), clamped beyond the first and last point.
    Tabulated { z: Vec<f64>, b: Vec<f64> },
}

/// Upper bounds that end a trial as UNTERMINATED.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialLimits {
    #[serde(default = "default_max_collisions")]
    pub max_collisions: u64,
    /// [m]
    #[serde(default = "default_max_path_length")]
    pub max_path_length: f64,
}

fn default_max_collisions() -> u64 {
    1_000_000
}
fn default_max_path_length() -> f64 {
    1.0e7
}
fn default_chunk_size() -> usize {
    1024
}

impl Default for TrialLimits {
    fn default() -> Self {
        TrialLimits {
            max_collisions: default_max_collisions(),
            max_path_length: default_max_path_length(),
        }
    }
}

/// Monte Carlo batch of independent trials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    pub trials: usize,
    /// Birth energy of every electron [eV].
    pub energy: f64,
    pub seed: u64,
    /// Trials per worker stream.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

/// Complete run description as stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub simulator: SimulatorConfig,
    pub batch: BatchConfig,
}

/// Largest pitch angle (at `b_source`) that still passes a magnet of field `b_magnet`.
pub fn acceptance_angle(b_source: f64, b_magnet: f64) -> f64 {
    (b_source / b_magnet).sqrt().min(1.0).asin()
}

impl SimulatorConfig {
    /// Derive both aperture thresholds from the transport and pinch magnet fields.
    pub fn from_magnets(
        e_low: f64,
        gas_density: f64,
        b_source: f64,
        b_transport: f64,
        b_pinch: f64,
    ) -> TrapResult<Self> {
        for (label, b) in [("b_transport", b_transport), ("b_pinch", b_pinch)] {
            if !b.is_finite() || b <= 0.0 {
                return Err(TrapError::ConfigError(format!(
                    "{label} must be finite and > 0, got {b}"
                )));
            }
        }
        let config = SimulatorConfig {
            e_low,
            theta_transport: acceptance_angle(b_source, b_transport),
            theta_pinch: acceptance_angle(b_source, b_pinch),
            gas_density,
            b_source,
            field: FieldProfile::Uniform,
            limits: TrialLimits::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> TrapResult<()> {
        if !self.e_low.is_finite() || self.e_low < 0.0 {
            return Err(TrapError::ConfigError(format!(
                "e_low must be finite and >= 0, got {}",
                self.e_low
            )));
        }
        for (label, angle) in [
            ("theta_transport", self.theta_transport),
            ("theta_pinch", self.theta_pinch),
        ] {
            if !(0.0..=PI).contains(&angle) {
                return Err(TrapError::ConfigError(format!(
                    "{label} must lie in [0, pi], got {angle}"
                )));
            }
        }
        if !self.gas_density.is_finite() || self.gas_density < 0.0 {
            return Err(TrapError::ConfigError(format!(
                "gas_density must be finite and >= 0, got {}",
                self.gas_density
            )));
        }
        if !self.b_source.is_finite() || self.b_source <= 0.0 {
            return Err(TrapError::ConfigError(format!(
                "b_source must be finite and > 0, got {}",
                self.b_source
            )));
        }
        self.field.validate()?;
        self.limits.validate()
    }
}

impl FieldProfile {
    pub fn validate(&self) -> TrapResult<()> {
        match self {
            FieldProfile::Uniform => Ok(()),
            FieldProfile::Mirror { mirror_ratio } => {
                if !mirror_ratio.is_finite() || *mirror_ratio <= 0.0 {
                    return Err(TrapError::ConfigError(format!(
                        "mirror_ratio must be finite and > 0, got {mirror_ratio}"
                    )));
                }
                Ok(())
            }
            FieldProfile::Tabulated { z, b } => {
                if z.len() < 2 || z.len() != b.len() {
                    return Err(TrapError::ConfigError(format!(
                        "tabulated field needs >= 2 matching samples, got z={}, b={}",
                        z.len(),
                        b.len()
                    )));
                }
                if z.iter().any(|v| !v.is_finite()) || z.windows(2).any(|w| w[1] <= w[0]) {
                    return Err(TrapError::ConfigError(
                        "tabulated z must be finite and strictly increasing".to_string(),
                    ));
                }
                if b.iter().any(|v| !v.is_finite() || *v <= 0.0) {
                    return Err(TrapError::ConfigError(
                        "tabulated b must be finite and > 0".to_string(),
                    ));
                }
                Ok(())
            }
        }
    }
}

impl TrialLimits {
    pub fn validate(&self) -> TrapResult<()> {
        if self.max_collisions == 0 {
            return Err(TrapError::ConfigError(
                "max_collisions must be >= 1".to_string(),
            ));
        }
        if !self.max_path_length.is_finite() || self.max_path_length <= 0.0 {
            return Err(TrapError::ConfigError(format!(
                "max_path_length must be finite and > 0, got {}",
                self.max_path_length
            )));
        }
        Ok(())
    }
}

impl BatchConfig {
    pub fn validate(&self) -> TrapResult<()> {
        if self.trials == 0 {
            return Err(TrapError::ConfigError("trials must be >= 1".to_string()));
        }
        if self.chunk_size == 0 {
            return Err(TrapError::ConfigError(
                "chunk_size must be >= 1".to_string(),
            ));
        }
        if !self.energy.is_finite() || self.energy <= 0.0 {
            return Err(TrapError::ConfigError(format!(
                "energy must be finite and > 0, got {}",
                self.energy
            )));
        }
        Ok(())
    }
}

impl RunConfig {
    /// Load from a JSON run file and validate both sections.
    pub fn from_file(path: &str) -> TrapResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.simulator.validate()?;
        config.batch.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    /// CARGO_MANIFEST_DIR points to crates/trap-types/, the run files live two levels up.
    fn config_path(relative: &str) -> String {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join(relative)
            .to_string_lossy()
            .to_string()
    }

    fn base() -> SimulatorConfig {
        SimulatorConfig {
            e_low: 14_000.0,
            theta_transport: 0.8,
            theta_pinch: 0.6,
            gas_density: 5e17,
            b_source: 0.6,
            field: FieldProfile::Uniform,
            limits: TrialLimits::default(),
        }
    }

    #[test]
    fn test_load_default_run() {
        let cfg = RunConfig::from_file(&config_path("configs/default_run.json")).unwrap();
        assert!((cfg.simulator.b_source - 0.6).abs() < 1e-12);
        assert_eq!(cfg.simulator.field, FieldProfile::Uniform);
        assert_eq!(cfg.simulator.limits, TrialLimits::default());
        assert_eq!(cfg.batch.trials, 10_000);
        assert_eq!(cfg.batch.chunk_size, 1024);
    }

    #[test]
    fn test_load_mirror_run() {
        let cfg = RunConfig::from_file(&config_path("configs/mirror_run.json")).unwrap();
        match cfg.simulator.field {
            FieldProfile::Mirror { mirror_ratio } => assert!((mirror_ratio - 1.5).abs() < 1e-12),
            other => panic!("expected mirror profile, got {other:?}"),
        }
        assert_eq!(cfg.simulator.limits.max_collisions, 100_000);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = RunConfig::from_file(&config_path("configs/does_not_exist.json")).unwrap_err();
        assert!(matches!(err, TrapError::Io(_)));
    }

    #[test]
    fn test_roundtrip_serialization() {
        let mut cfg = base();
        cfg.field = FieldProfile::Tabulated {
            z: vec![-1.5, 0.0, 1.5],
            b: vec![0.9, 0.6, 0.9],
        };
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let cfg2: SimulatorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg.field, cfg2.field);
        assert_eq!(cfg.limits, cfg2.limits);
        assert!((cfg.gas_density - cfg2.gas_density).abs() < 1.0);
    }

    #[test]
    fn test_validate_accepts_base() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut cfg = base();
        cfg.b_source = 0.0;
        assert!(cfg.validate().is_err());

        let mut cfg = base();
        cfg.theta_pinch = 4.0;
        assert!(cfg.validate().is_err());

        let mut cfg = base();
        cfg.gas_density = -1.0;
        assert!(cfg.validate().is_err());

        let mut cfg = base();
        cfg.limits.max_collisions = 0;
        assert!(cfg.validate().is_err());

        let mut cfg = base();
        cfg.limits.max_path_length = f64::INFINITY;
        assert!(cfg.validate().is_err());

        let mut cfg = base();
        cfg.limits.max_path_length = f64::NAN;
        assert!(cfg.validate().is_err());

        let mut cfg = base();
        cfg.field = FieldProfile::Tabulated {
            z: vec![0.0, 0.0],
            b: vec![1.0, 1.0],
        };
        assert!(cfg.validate().is_err());

        let mut cfg = base();
        cfg.field = FieldProfile::Mirror { mirror_ratio: -2.0 };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_acceptance_angle() {
        assert!((acceptance_angle(1.0, 2.0) - PI / 4.0).abs() < 1e-12);
        assert!((acceptance_angle(1.0, 1.0) - PI / 2.0).abs() < 1e-12);
        // weaker magnet than the source accepts everything
        assert!((acceptance_angle(1.0, 0.5) - PI / 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_from_magnets() {
        let cfg = SimulatorConfig::from_magnets(14_000.0, 5e17, 0.6, 3.6, 6.0).unwrap();
        assert!((cfg.theta_transport - (0.6f64 / 3.6).sqrt().asin()).abs() < 1e-12);
        assert!((cfg.theta_pinch - 0.1f64.sqrt().asin()).abs() < 1e-12);
        assert!(SimulatorConfig::from_magnets(14_000.0, 5e17, 0.6, 0.0, 6.0).is_err());
    }

    #[test]
    fn test_batch_validation() {
        let batch = BatchConfig {
            trials: 10,
            energy: 18_600.0,
            seed: 1,
            chunk_size: 4,
        };
        assert!(batch.validate().is_ok());
        assert!(BatchConfig { trials: 0, ..batch.clone() }.validate().is_err());
        assert!(BatchConfig { chunk_size: 0, ..batch.clone() }.validate().is_err());
        assert!(BatchConfig { energy: -5.0, ..batch }.validate().is_err());
    }
}
