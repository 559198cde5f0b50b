// ─────────────────────────────────────────────────────────────────────
// SCPN Trapping — Scatter Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Collision with a gas molecule: channel choice, energy loss and the
//! azimuthally isotropic deflection of the pitch angle.

use crate::particle::ParticleState;
use rand::Rng;
use std::f64::consts::PI;
use trap_physics::cross_sections::{CrossSections, InteractionKind};
use trap_physics::field::MagneticField;

/// Allowed relative mismatch between the partial sum and the total cross section.
const NORMALIZATION_TOLERANCE: f64 = 1e-2;

/// Draw the interaction channel at energy `e` [eV] by partial cross section.
pub fn sample_interaction<X, R>(cross_sections: &X, e: f64, rng: &mut R) -> InteractionKind
where
    X: CrossSections,
    R: Rng + ?Sized,
{
    let mut sigma_el = cross_sections.elastic(e);
    let mut sigma_exc = cross_sections.excitation(e);
    let sigma_ion = cross_sections.ionization(e);
    let sum = sigma_el + sigma_exc + sigma_ion;
    debug_assert!(sum > 0.0, "no open scattering channel at e={e}");
    debug_assert!(
        (sum - cross_sections.total(e)).abs() <= NORMALIZATION_TOLERANCE * sum,
        "partial cross sections {sum} disagree with total {} at e={e}",
        cross_sections.total(e)
    );
    sigma_el /= sum;
    sigma_exc /= sum;

    let alpha: f64 = rng.gen();
    if alpha < sigma_el {
        InteractionKind::Elastic
    } else if alpha < sigma_el + sigma_exc {
        InteractionKind::Excitation
    } else {
        InteractionKind::Ionization
    }
}

/// Perform one collision: pick a channel, lose energy, deflect.
///
/// Collisions are counted by the caller.
pub fn scatter<X, R>(
    state: &mut ParticleState,
    cross_sections: &X,
    field: &MagneticField,
    rng: &mut R,
) -> InteractionKind
where
    X: CrossSections,
    R: Rng + ?Sized,
{
    let kind = sample_interaction(cross_sections, state.e, rng);
    let delta = cross_sections.sample(kind, state.e, rng);
    state.subtract_energy(delta.energy_loss);
    randomize_angle(state, delta.angle_deg.to_radians(), field, rng);
    kind
}

/// Deflect the pitch angle by `d_theta` [rad] at a uniformly random azimuth.
///
/// The deflection is applied to the local angle; the state keeps the angle
/// normalized to the reference field.
pub fn randomize_angle<R>(
    state: &mut ParticleState,
    d_theta: f64,
    field: &MagneticField,
    rng: &mut R,
) where
    R: Rng + ?Sized,
{
    let phi = rng.gen::<f64>() * 2.0 * PI;
    let real = field.real_theta(state.theta, state.z);
    let deflected = polar_unit(real + d_theta);
    let axis = polar_unit(real);
    let rotated = rotate_about(deflected, axis, phi);
    let new_real = rotated[2].clamp(-1.0, 1.0).acos();
    state.theta = field.virtual_theta(new_real, state.z);
    debug_assert!(!state.theta.is_nan(), "pitch angle became NaN");
}

/// Unit vector at polar angle `theta` in the x-z plane.
#[inline]
fn polar_unit(theta: f64) -> [f64; 3] {
    [theta.sin(), 0.0, theta.cos()]
}

fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Rodrigues rotation of `v` by `angle` about the unit vector `axis`.
fn rotate_about(v: [f64; 3], axis: [f64; 3], angle: f64) -> [f64; 3] {
    let (sin, cos) = angle.sin_cos();
    let k_cross_v = cross(axis, v);
    let k_dot_v = dot(axis, v);
    [
        v[0] * cos + k_cross_v[0] * sin + axis[0] * k_dot_v * (1.0 - cos),
        v[1] * cos + k_cross_v[1] * sin + axis[1] * k_dot_v * (1.0 - cos),
        v[2] * cos + k_cross_v[2] * sin + axis[2] * k_dot_v * (1.0 - cos),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use trap_physics::cross_sections::{HydrogenCrossSections, ScatterSample};

    /// Only elastic scattering with a fixed loss and deflection.
    struct ElasticOnly {
        loss: f64,
        angle_deg: f64,
    }

    impl CrossSections for ElasticOnly {
        fn elastic(&self, _e: f64) -> f64 {
            1e-21
        }
        fn excitation(&self, _e: f64) -> f64 {
            0.0
        }
        fn ionization(&self, _e: f64) -> f64 {
            0.0
        }
        fn sample_elastic<R: Rng + ?Sized>(&self, _e: f64, _rng: &mut R) -> ScatterSample {
            ScatterSample {
                energy_loss: self.loss,
                angle_deg: self.angle_deg,
            }
        }
        fn sample_excitation<R: Rng + ?Sized>(&self, _e: f64, _rng: &mut R) -> ScatterSample {
            unreachable!("excitation channel is closed")
        }
        fn sample_ionization<R: Rng + ?Sized>(&self, _e: f64, _rng: &mut R) -> ScatterSample {
            unreachable!("ionization channel is closed")
        }
    }

    #[test]
    fn test_rotation_preserves_length_and_axis() {
        let axis = polar_unit(0.8);
        let v = polar_unit(1.1);
        for &phi in &[0.0, 0.5, 2.0, 4.0] {
            let r = rotate_about(v, axis, phi);
            assert!((dot(r, r) - 1.0).abs() < 1e-12);
            // the angle to the axis is kept
            assert!((dot(r, axis) - dot(v, axis)).abs() < 1e-12);
        }
        let same = rotate_about(axis, axis, 1.3);
        assert!((same[2] - axis[2]).abs() < 1e-12);
    }

    #[test]
    fn test_zero_deflection_keeps_angle() {
        let field = MagneticField::uniform(0.6);
        let mut rng = StdRng::seed_from_u64(1);
        let mut p = ParticleState::new(1000.0, 1.1, 0.2);
        randomize_angle(&mut p, 0.0, &field, &mut rng);
        assert!((p.theta() - 1.1).abs() < 1e-7);
    }

    #[test]
    fn test_deflection_bounded_by_triangle_inequality() {
        let field = MagneticField::uniform(0.6);
        let mut rng = StdRng::seed_from_u64(2);
        let d_theta = 0.2;
        for _ in 0..1_000 {
            let mut p = ParticleState::new(1000.0, 1.0, 0.0);
            randomize_angle(&mut p, d_theta, &field, &mut rng);
            assert!(p.theta() >= 1.0 - d_theta - 1e-9 && p.theta() <= 1.0 + d_theta + 1e-9);
        }
    }

    #[test]
    fn test_deflection_in_sampled_field_stays_in_range() {
        let field = MagneticField::sampled(1.0, |z| 1.0 + 0.5 * z * z);
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = ParticleState::new(1000.0, 2.5, 1.2);
        for _ in 0..1_000 {
            randomize_angle(&mut p, 0.3, &field, &mut rng);
            assert!((0.0..=PI).contains(&p.theta()), "theta={}", p.theta());
        }
    }

    #[test]
    fn test_scatter_applies_loss_and_reports_channel() {
        let xs = ElasticOnly {
            loss: 2.5,
            angle_deg: 0.0,
        };
        let field = MagneticField::uniform(0.6);
        let mut rng = StdRng::seed_from_u64(4);
        let mut p = ParticleState::new(1000.0, 0.8, 0.0);
        let kind = scatter(&mut p, &xs, &field, &mut rng);
        assert_eq!(kind, InteractionKind::Elastic);
        assert_eq!(p.energy(), 997.5);
        assert_eq!(p.collisions(), 0);
        assert!((p.theta() - 0.8).abs() < 1e-7);
    }

    #[test]
    fn test_channel_frequencies_follow_cross_sections() {
        let xs = HydrogenCrossSections::tritium();
        let e = 18_600.0;
        let mut rng = StdRng::seed_from_u64(5);
        let n = 50_000;
        let elastic = (0..n)
            .filter(|_| sample_interaction(&xs, e, &mut rng) == InteractionKind::Elastic)
            .count();
        let expected = xs.elastic(e) / xs.total(e);
        let observed = elastic as f64 / n as f64;
        assert!((observed - expected).abs() < 0.01, "observed={observed}, expected={expected}");
    }

    #[test]
    fn test_energy_never_increases() {
        let xs = HydrogenCrossSections::tritium();
        let field = MagneticField::uniform(0.6);
        let mut rng = StdRng::seed_from_u64(6);
        let mut p = ParticleState::new(18_600.0, 1.0, 0.0);
        for _ in 0..200 {
            let before = p.energy();
            scatter(&mut p, &xs, &field, &mut rng);
            assert!(p.energy() <= before);
        }
    }
}
