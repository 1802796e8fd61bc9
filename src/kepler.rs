//! Kepler's third law and ellipse geometry in catalog units.
//!
//! With the semi-major axis `a` in AU, the period `P` in days and the enclosed stellar mass
//! `M` in solar masses, the third law reads
//!
//! ```text
//! P = 2π / k · sqrt(a³ / M)        a = cbrt(M · k² · (P / 2π)²)
//! ```
//!
//! where `k` is the Gaussian gravitational constant. A body of negligible mass on a 1 AU
//! orbit around one solar mass therefore has a period of one sidereal year.
use super::constants::{AstronomicalUnit, Day, SolarMass, DPI, GAUSS_GRAV, GAUSS_GRAV_SQUARED};

/// Orbital period (days) of a body with semi-major axis `semi_major_axis` (AU) around
/// `total_mass` (M☉).
///
/// The caller is responsible for passing a strictly positive, finite mass.
pub fn orbital_period(semi_major_axis: AstronomicalUnit, total_mass: SolarMass) -> Day {
    DPI / GAUSS_GRAV * (semi_major_axis.powi(3) / total_mass).sqrt()
}

/// Semi-major axis (AU) of a body with period `period` (days) around `total_mass` (M☉).
///
/// Inverse of [`orbital_period`].
pub fn semi_major_axis(period: Day, total_mass: SolarMass) -> AstronomicalUnit {
    let mean_motion_ratio = period / DPI;
    (total_mass * GAUSS_GRAV_SQUARED * mean_motion_ratio.powi(2)).cbrt()
}

/// Semi-minor axis `b = a · sqrt(1 − e²)`.
///
/// Returns `None` for eccentricities outside the closed-orbit range `[0, 1]`.
pub fn semi_minor_axis(
    semi_major_axis: AstronomicalUnit,
    eccentricity: f64,
) -> Option<AstronomicalUnit> {
    if !(0.0..=1.0).contains(&eccentricity) {
        return None;
    }
    Some(semi_major_axis * (1.0 - eccentricity.powi(2)).sqrt())
}

/// `true` when `mass` can be used as a divisor in the relations above.
pub fn is_usable_mass(mass: SolarMass) -> bool {
    mass.is_finite() && mass > 0.0
}
