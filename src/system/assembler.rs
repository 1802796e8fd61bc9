//! # System assembly
//!
//! [`assemble`] partitions flat lists of stars and planets into a [`System`] tree:
//!
//! 1. each planet goes to the first star whose host name matches,
//!    - `orbit_binary == false` → the star's own planets,
//!    - `orbit_binary == true` → the top-level circumbinary planets;
//! 2. a star with at least one own planet becomes a single-star sub-system, any other star
//!    is a lone star of the top level;
//! 3. the top level holds the lone stars, the circumbinary planets and the sub-systems,
//!    unless it would only wrap one sub-system, in which case that sub-system is returned
//!    (see [`AssemblyOptions::collapse_single_sub_system`]).
//!
//! A planet whose host is not among the stars cannot be placed under it; it is kept at the
//! top level with a warning rather than dropped, so every input planet appears exactly once.
//!
//! ## Orbital fix-up
//!
//! Every node is built by [`System::from_parts`] from already-built children: the enclosed
//! stellar mass is summed first, then [`apply_orbital_fixup`] completes the period or
//! semi-major axis of the node's *direct* planets with Kepler's third law
//! (see [`crate::kepler`]). Descendants were fixed when they were built.
use std::collections::HashMap;

use log::{info, warn};
use rand::Rng;

use crate::{
    bodies::{Planet, Star},
    constants::SolarMass,
    imputation::{ImputationParams, MISSING_AXIS, MISSING_AXIS_AND_PERIOD, MISSING_PERIOD},
    kepler::{is_usable_mass, orbital_period, semi_major_axis, semi_minor_axis},
    orrery_errors::OrreryError,
};

use super::System;

/// Shape options of the assembled tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblyOptions {
    /// Return the only sub-system directly instead of wrapping it in an otherwise empty
    /// top level. Default `true`.
    pub collapse_single_sub_system: bool,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        AssemblyOptions {
            collapse_single_sub_system: true,
        }
    }
}

impl System {
    /// Build one node from its own bodies and already-built children.
    ///
    /// Arguments
    /// -----------------
    /// * `stars`, `planets`: bodies held directly by the node.
    /// * `sub_systems`: children, fully constructed.
    /// * `params`, `rng`: imputation policy and random source for the orbital fix-up.
    ///
    /// Return
    /// ----------
    /// * The node, with `total_star_mass` = own star masses + children's `total_star_mass`
    ///   and its direct planets passed through [`apply_orbital_fixup`].
    ///
    /// Errors
    /// ------
    /// * [`OrreryError::ZeroStellarMass`] if a direct planet needs the Kepler relation and the
    ///   enclosed mass is zero or not finite.
    pub fn from_parts(
        stars: Vec<Star>,
        planets: Vec<Planet>,
        sub_systems: Vec<System>,
        params: &ImputationParams,
        rng: &mut impl Rng,
    ) -> Result<Self, OrreryError> {
        for star in stars.iter().filter(|s| s.stellar_mass.is_none()) {
            warn!(
                "star {} has no mass; it does not contribute to the enclosed mass",
                star.host_name
            );
        }

        let total_star_mass = stars.iter().filter_map(|s| s.stellar_mass).sum::<f64>()
            + sub_systems.iter().map(|s| s.total_star_mass).sum::<f64>();

        let mut fixed = Vec::with_capacity(planets.len());
        for planet in planets {
            fixed.push(apply_orbital_fixup(planet, total_star_mass, params, rng)?);
        }

        Ok(System {
            stars,
            planets: fixed,
            sub_systems,
            total_star_mass,
        })
    }
}

/// Complete a planet's period or semi-major axis from the enclosed stellar mass.
///
/// A value that is absent, zero or negative counts as missing.
///
/// | period  | axis    | action                                            | note                                          |
/// |---------|---------|---------------------------------------------------|-----------------------------------------------|
/// | missing | missing | draw axis in `axis_range_au`, derive period        | `Missing semi-major axis and orbital period`  |
/// | missing | present | derive period                                     | `Missing orbital period`                      |
/// | present | missing | derive axis                                       | `Missing semi-major axis`                     |
/// | present | present | none                                              |                                               |
///
/// When an axis is filled in, the semi-minor axis is derived again from it and the
/// eccentricity (or cleared when the eccentricity is unknown).
/// If the random fallback is disabled, a planet missing both values is returned unchanged.
///
/// Errors
/// ------
/// * [`OrreryError::ZeroStellarMass`] when a derivation is needed and `total_star_mass` is not
///   strictly positive and finite.
pub fn apply_orbital_fixup(
    mut planet: Planet,
    total_star_mass: SolarMass,
    params: &ImputationParams,
    rng: &mut impl Rng,
) -> Result<Planet, OrreryError> {
    let period = planet.orbital_period.filter(|p| *p > 0.0);
    let axis = planet.semi_major_axis.filter(|a| *a > 0.0);

    if period.is_some() && axis.is_some() {
        return Ok(planet);
    }
    if period.is_none() && axis.is_none() && !params.random_fallback() {
        warn!(
            "planet {}: period and semi-major axis unknown, random fallback disabled",
            planet.name
        );
        return Ok(planet);
    }
    if !is_usable_mass(total_star_mass) {
        return Err(OrreryError::ZeroStellarMass(planet.name));
    }

    match (period, axis) {
        (None, None) => {
            if let Some(a) = params.draw_axis(rng) {
                set_axis(&mut planet, a);
                planet.orbital_period = Some(orbital_period(a, total_star_mass));
                planet.assumptions.push(MISSING_AXIS_AND_PERIOD.into());
            }
        }
        (None, Some(a)) => {
            planet.orbital_period = Some(orbital_period(a, total_star_mass));
            planet.assumptions.push(MISSING_PERIOD.into());
        }
        (Some(p), None) => {
            set_axis(&mut planet, semi_major_axis(p, total_star_mass));
            planet.assumptions.push(MISSING_AXIS.into());
        }
        (Some(_), Some(_)) => {}
    }

    Ok(planet)
}

/// Replace the semi-major axis; a semi-minor axis derived from the old value is dropped.
fn set_axis(planet: &mut Planet, axis: f64) {
    planet.semi_major_axis = Some(axis);
    planet.semi_minor_axis = planet
        .orbital_eccentricity
        .and_then(|e| semi_minor_axis(axis, e));
}

/// Build the system tree of one planetary system.
///
/// Arguments
/// -----------------
/// * `stars`: canonical stars, one per host name.
/// * `planets`: canonical planets.
/// * `params`, `rng`: imputation policy and random source for the orbital fix-up.
///
/// Return
/// ----------
/// * The top-level [`System`], or the single sub-system when the top level would hold
///   nothing else.
///
/// Errors
/// ------
/// * [`OrreryError::EmptySystem`] when both inputs are empty.
/// * [`OrreryError::ZeroStellarMass`] from the orbital fix-up of any node.
pub fn assemble(
    stars: Vec<Star>,
    planets: Vec<Planet>,
    params: &ImputationParams,
    rng: &mut impl Rng,
) -> Result<System, OrreryError> {
    assemble_with_options(stars, planets, &AssemblyOptions::default(), params, rng)
}

/// [`assemble`] with explicit [`AssemblyOptions`].
pub fn assemble_with_options(
    stars: Vec<Star>,
    planets: Vec<Planet>,
    options: &AssemblyOptions,
    params: &ImputationParams,
    rng: &mut impl Rng,
) -> Result<System, OrreryError> {
    if stars.is_empty() && planets.is_empty() {
        return Err(OrreryError::EmptySystem);
    }

    let mut host_index: HashMap<&str, usize> = HashMap::new();
    for (i, star) in stars.iter().enumerate() {
        host_index.entry(star.host_name.as_str()).or_insert(i);
    }

    let mut own_planets: Vec<Vec<Planet>> = vec![Vec::new(); stars.len()];
    let mut top_planets: Vec<Planet> = Vec::new();

    for planet in planets {
        match host_index.get(planet.host_name.as_str()) {
            Some(_) if planet.orbit_binary => top_planets.push(planet),
            Some(&i) => own_planets[i].push(planet),
            None => {
                warn!(
                    "planet {}: host {} not among the system stars, kept at top level",
                    planet.name, planet.host_name
                );
                top_planets.push(planet);
            }
        }
    }

    let mut lone_stars: Vec<Star> = Vec::new();
    let mut sub_systems: Vec<System> = Vec::new();

    for (star, planets) in stars.into_iter().zip(own_planets) {
        if planets.is_empty() {
            lone_stars.push(star);
        } else {
            sub_systems.push(System::from_parts(
                vec![star],
                planets,
                Vec::new(),
                params,
                rng,
            )?);
        }
    }

    info!(
        "assembled {} sub-system(s), {} lone star(s), {} top-level planet(s)",
        sub_systems.len(),
        lone_stars.len(),
        top_planets.len()
    );

    if options.collapse_single_sub_system
        && lone_stars.is_empty()
        && top_planets.is_empty()
        && sub_systems.len() == 1
    {
        if let Some(only) = sub_systems.pop() {
            return Ok(only);
        }
    }

    System::from_parts(lone_stars, top_planets, sub_systems, params, rng)
}
