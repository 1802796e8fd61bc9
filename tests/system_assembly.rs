mod common;

use std::collections::HashMap;

use approx::assert_relative_eq;
use common::{assert_mass_conserved, observed_planet, planet, random_bodies};
use orrery::{
    bodies::Star,
    imputation::ImputationParams,
    kepler::orbital_period,
    system::{assemble, assemble_with_options, AssemblyOptions},
};
use rand::{rngs::StdRng, SeedableRng};

#[test]
fn test_single_host_wrapped_in_top_level() {
    common::init_logger();
    let mut rng = StdRng::seed_from_u64(1);
    let options = AssemblyOptions {
        collapse_single_sub_system: false,
    };

    let system = assemble_with_options(
        vec![Star::with_mass("X", 1.0)],
        vec![
            observed_planet("X b", "X", 3.0, 0.04),
            observed_planet("X c", "X", 12.0, 0.1),
        ],
        &options,
        &ImputationParams::default(),
        &mut rng,
    )
    .unwrap();

    assert!(system.stars().is_empty());
    assert!(system.planets().is_empty());
    assert_eq!(system.sub_systems().len(), 1);
    assert_eq!(system.total_star_mass(), 1.0);

    let sub = &system.sub_systems()[0];
    assert_eq!(sub.stars(), &[Star::with_mass("X", 1.0)]);
    assert_eq!(sub.planets().len(), 2);
    assert_eq!(sub.total_star_mass(), 1.0);
}

#[test]
fn test_single_host_collapsed_by_default() {
    let mut rng = StdRng::seed_from_u64(1);
    let system = assemble(
        vec![Star::with_mass("X", 1.0)],
        vec![
            observed_planet("X b", "X", 3.0, 0.04),
            observed_planet("X c", "X", 12.0, 0.1),
        ],
        &ImputationParams::default(),
        &mut rng,
    )
    .unwrap();

    assert_eq!(system.stars().len(), 1);
    assert_eq!(system.planets().len(), 2);
    assert!(system.sub_systems().is_empty());
    assert_eq!(system.total_star_mass(), 1.0);
}

#[test]
fn test_circumbinary_planet_at_top_level() {
    let mut rng = StdRng::seed_from_u64(2);
    let system = assemble(
        vec![Star::with_mass("A", 0.5), Star::with_mass("B", 0.5)],
        vec![planet("AB b", "A", true)],
        &ImputationParams::default(),
        &mut rng,
    )
    .unwrap();

    assert_eq!(system.stars().len(), 2);
    assert_eq!(system.planets().len(), 1);
    assert!(system.sub_systems().is_empty());
    assert_eq!(system.total_star_mass(), 1.0);

    // no observed orbit: the axis is drawn, the period follows from the total mass
    let p = &system.planets()[0];
    let a = p.semi_major_axis.unwrap();
    assert!((0.1..0.25).contains(&a));
    assert_relative_eq!(p.orbital_period.unwrap(), orbital_period(a, 1.0));
    assert_eq!(
        p.assumptions,
        vec!["Missing semi-major axis and orbital period".to_string()]
    );
}

#[test]
fn test_circumbinary_period_uses_both_stars() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut cb = observed_planet("AB b", "A", 0.0, 0.7);
    cb.orbital_period = None;
    cb.orbit_binary = true;

    let system = assemble(
        vec![Star::with_mass("A", 0.69), Star::with_mass("B", 0.2)],
        vec![cb, observed_planet("B b", "B", 10.0, 0.05)],
        &ImputationParams::default(),
        &mut rng,
    )
    .unwrap();

    assert_eq!(system.stars().len(), 1);
    assert_eq!(system.sub_systems().len(), 1);
    assert_relative_eq!(system.total_star_mass(), 0.89, epsilon = 1e-12);

    let cb = system.find_planet("AB b").unwrap();
    assert_relative_eq!(
        cb.orbital_period.unwrap(),
        orbital_period(0.7, 0.89),
        max_relative = 1e-12
    );
    assert_eq!(cb.assumptions, vec!["Missing orbital period".to_string()]);
}

#[test]
fn test_mass_conservation() {
    let mut rng = StdRng::seed_from_u64(4);
    for (n_stars, n_planets) in [(1, 0), (1, 5), (2, 3), (5, 20), (12, 60)] {
        let (stars, planets) = random_bodies(&mut rng, n_stars, n_planets);
        let expected: f64 = stars.iter().filter_map(|s| s.stellar_mass).sum();

        for collapse in [true, false] {
            let options = AssemblyOptions {
                collapse_single_sub_system: collapse,
            };
            let system = assemble_with_options(
                stars.clone(),
                planets.clone(),
                &options,
                &ImputationParams::default(),
                &mut rng,
            )
            .unwrap();

            assert_mass_conserved(&system);
            assert_eq!(system.total_star_mass(), system.recompute_star_mass());
            assert_relative_eq!(system.total_star_mass(), expected, epsilon = 1e-12);
        }
    }
}

#[test]
fn test_partition_completeness() {
    let mut rng = StdRng::seed_from_u64(5);
    for (n_stars, n_planets) in [(1, 1), (3, 10), (8, 40)] {
        let (stars, planets) = random_bodies(&mut rng, n_stars, n_planets);
        let system = assemble(
            stars.clone(),
            planets.clone(),
            &ImputationParams::default(),
            &mut rng,
        )
        .unwrap();

        let mut seen: HashMap<&str, usize> = HashMap::new();
        for p in system.planets_recursive() {
            *seen.entry(p.name.as_str()).or_default() += 1;
        }
        assert_eq!(seen.len(), planets.len());
        assert!(planets.iter().all(|p| seen.get(p.name.as_str()) == Some(&1)));

        assert_eq!(system.stars_recursive().len(), stars.len());

        // circumbinary planets never sit below a single star
        for sub in system.sub_systems() {
            assert!(sub.planets().iter().all(|p| !p.orbit_binary));
        }
    }
}

#[test]
fn test_imputed_orbits_follow_kepler() {
    let mut rng = StdRng::seed_from_u64(6);
    let (stars, planets) = random_bodies(&mut rng, 4, 30);
    let system = assemble(stars, planets, &ImputationParams::default(), &mut rng).unwrap();

    for placed in system.orbits() {
        assert!(placed.orbit.period.is_some());
        assert!(placed.orbit.semi_major_axis.is_some());
        if !placed.planet.has_assumptions() {
            continue;
        }
        let period = placed.orbit.period.unwrap();
        let axis = placed.orbit.semi_major_axis.unwrap();
        assert!(period > 0.0);
        assert!(axis > 0.0);
        assert_relative_eq!(
            orbital_period(axis, placed.total_star_mass),
            period,
            max_relative = 1e-9
        );
    }
}

#[test]
fn test_observed_orbit_left_untouched() {
    let mut rng = StdRng::seed_from_u64(7);
    let system = assemble(
        vec![Star::with_mass("X", 1.0)],
        vec![observed_planet("X b", "X", 3.0, 0.5)],
        &ImputationParams::default(),
        &mut rng,
    )
    .unwrap();

    let b = system.find_planet("X b").unwrap();
    assert_eq!(b.orbital_period, Some(3.0));
    assert_eq!(b.semi_major_axis, Some(0.5));
    assert!(!b.has_assumptions());
}

#[test]
fn test_system_json_export() {
    let mut rng = StdRng::seed_from_u64(8);
    let system = assemble(
        vec![Star::with_mass("X", 1.0)],
        vec![observed_planet("X b", "X", 3.0, 0.04)],
        &ImputationParams::default(),
        &mut rng,
    )
    .unwrap();

    let json: serde_json::Value = serde_json::from_str(&system.to_json().unwrap()).unwrap();
    assert_eq!(json["total_star_mass"], 1.0);
    assert_eq!(json["stars"][0]["host_name"], "X");
    assert_eq!(json["planets"][0]["name"], "X b");
    assert_eq!(json["sub_systems"].as_array().map(Vec::len), Some(0));
}
