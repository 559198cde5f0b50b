//! Distance to the next collision.

use rand::Rng;
use rand_distr::{Distribution, Exp};
use trap_physics::cross_sections::CrossSections;

/// Sample the free path [m] of an electron with energy `e` [eV] in gas of
/// number density `gas_density` [m^-3].
///
/// Returns `f64::INFINITY` when the interaction rate vanishes; callers cap it.
pub fn sample_free_path<X, R>(cross_sections: &X, gas_density: f64, e: f64, rng: &mut R) -> f64
where
    X: CrossSections,
    R: Rng + ?Sized,
{
    let rate = cross_sections.total(e) * gas_density;
    if !rate.is_finite() || rate <= 0.0 {
        return f64::INFINITY;
    }
    match Exp::new(rate) {
        Ok(exp) => exp.sample(rng),
        Err(_) => f64::INFINITY,
    }
}
