// ─────────────────────────────────────────────────────────────────────
// SCPN Trapping — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

/// Fate of a simulated electron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndState {
    /// Trapped electron escaped forward through the pinch aperture.
    Accepted,
    /// Electron escaped backward through the transport aperture.
    Rejected,
    /// Energy fell below the configured minimum.
    LowEnergy,
    /// Electron left through the pinch without scattering once (normalization count).
    Pass,
    /// Trial still in flight.
    None,
    /// Trial reached the collision or path-length limit without a physical fate.
    Unterminated,
}

impl EndState {
    pub fn is_terminal(self) -> bool {
        self != EndState::None
    }

    /// Every state a finished trial can carry, in reporting order.
    pub const TERMINAL: [EndState; 5] = [
        EndState::Accepted,
        EndState::Rejected,
        EndState::LowEnergy,
        EndState::Pass,
        EndState::Unterminated,
    ];
}

/// Snapshot of a finished trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub state: EndState,
    /// Final kinetic energy [eV].
    pub energy: f64,
    /// Final pitch angle, normalized to the reference field [rad].
    pub theta: f64,
    /// Pitch angle at birth [rad].
    pub init_theta: f64,
    pub collision_number: u64,
    /// Total path length travelled [m].
    pub path_length: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_is_not_terminal() {
        assert!(!EndState::None.is_terminal());
        for state in EndState::TERMINAL {
            assert!(state.is_terminal());
        }
    }

    #[test]
    fn test_end_state_serialized_names() {
        let json = serde_json::to_string(&EndState::LowEnergy).unwrap();
        assert_eq!(json, "\"LOW_ENERGY\"");
        let back: EndState = serde_json::from_str("\"PASS\"").unwrap();
        assert_eq!(back, EndState::Pass);
    }

    #[test]
    fn test_result_roundtrip() {
        let result = SimulationResult {
            state: EndState::Accepted,
            energy: 18_540.0,
            theta: 0.4,
            init_theta: 1.2,
            collision_number: 7,
            path_length: 12_345.5,
        };
        let json = serde_json::to_string(&result).unwrap();
        let back: SimulationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
