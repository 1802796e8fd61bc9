#![allow(dead_code)]

use orrery::{
    bodies::{Planet, Star},
    catalog::{CatalogValue, RawRecord},
    system::System,
};
use rand::{rngs::StdRng, Rng};

pub const PS_CSV: &str = include_str!("../data/ps_extract.csv");

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn row(fields: &[(&str, Option<CatalogValue>)]) -> RawRecord {
    fields
        .iter()
        .map(|(column, value)| (column.to_string(), value.clone()))
        .collect()
}

pub fn num(value: f64) -> Option<CatalogValue> {
    Some(CatalogValue::Number(value))
}

pub fn text(value: &str) -> Option<CatalogValue> {
    Some(CatalogValue::Text(value.to_string()))
}

pub fn planet(name: &str, host: &str, orbit_binary: bool) -> Planet {
    Planet {
        name: name.to_string(),
        host_name: host.to_string(),
        orbital_period: None,
        semi_major_axis: None,
        semi_minor_axis: None,
        radius: None,
        mass: None,
        density: None,
        orbital_eccentricity: None,
        orbital_inclination: None,
        ra: None,
        dec: None,
        orbit_binary,
        num_moons: None,
        assumptions: Vec::new(),
    }
}

/// A planet with every value the imputation steps could fill in already observed.
pub fn observed_planet(name: &str, host: &str, period: f64, axis: f64) -> Planet {
    Planet {
        orbital_period: Some(period),
        semi_major_axis: Some(axis),
        radius: Some(1.0),
        mass: Some(1.0),
        ..planet(name, host, false)
    }
}

/// Random stars and planets; some planets are circumbinary, some have no known host.
pub fn random_bodies(rng: &mut StdRng, n_stars: usize, n_planets: usize) -> (Vec<Star>, Vec<Planet>) {
    let stars: Vec<Star> = (0..n_stars)
        .map(|i| Star::with_mass(&format!("S{i}"), rng.random_range(0.1..2.0)))
        .collect();

    let planets = (0..n_planets)
        .map(|i| {
            let host = if rng.random_bool(0.1) {
                "unknown".to_string()
            } else {
                format!("S{}", rng.random_range(0..n_stars.max(1)))
            };
            let mut p = planet(&format!("P{i}"), &host, rng.random_bool(0.2));
            if rng.random_bool(0.7) {
                p.orbital_period = Some(rng.random_range(1.0..400.0));
            }
            if rng.random_bool(0.5) {
                p.semi_major_axis = Some(rng.random_range(0.01..2.0));
            }
            if rng.random_bool(0.5) {
                p.mass = Some(rng.random_range(0.01..5.0));
            }
            p.radius = Some(rng.random_range(0.05..2.0));
            p
        })
        .collect();

    (stars, planets)
}

/// Check the stored enclosed mass of every node against its own stars and children.
pub fn assert_mass_conserved(system: &System) {
    let expected = system.direct_star_mass()
        + system
            .sub_systems()
            .iter()
            .map(System::total_star_mass)
            .sum::<f64>();
    assert_eq!(system.total_star_mass(), expected);
    for sub in system.sub_systems() {
        assert_mass_conserved(sub);
    }
}
