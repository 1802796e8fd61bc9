//! # Constants and type definitions for Orrery
//!
//! This module centralizes the **physical constants**, **catalog column names**, and **unit type
//! aliases** used throughout the `orrery` library.
//!
//! ## Units
//!
//! | Quantity            | Unit                 |
//! |---------------------|----------------------|
//! | stellar mass        | solar masses (M☉)    |
//! | stellar radius      | solar radii (R☉)     |
//! | planetary mass      | Jupiter masses (M♃)  |
//! | planetary radius    | Jupiter radii (R♃)   |
//! | semi-major axis     | astronomical units   |
//! | orbital period      | days                 |
//! | angles (ra, dec, i) | degrees              |
//! | system distance     | parsecs              |
//!
//! The Kepler relation in [`crate::kepler`] is written with the Gaussian gravitational
//! constant so that AU, days and solar masses are consistent without any further conversion.

// -------------------------------------------------------------------------------------------------
// Physical constants
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Gaussian gravitational constant k, in AU^(3/2) · day⁻¹ · M☉^(-1/2)
pub const GAUSS_GRAV: f64 = 0.01720209895;

/// k², often used in Kepler’s third law
pub const GAUSS_GRAV_SQUARED: f64 = GAUSS_GRAV * GAUSS_GRAV;

/// Earth masses in one Jupiter mass
pub const EARTH_MASSES_PER_JUPITER: f64 = 308.0;

/// Mass (in Earth masses) above which planets enter the degenerate-matter regime
pub const MASS_RADIUS_TRANSITION_EARTH: f64 = 120.0;

/// Exponent of the mass–radius power law below the transition
pub const MASS_RADIUS_EXPONENT_LOW: f64 = 0.55;

/// Exponent of the mass–radius power law above the transition
pub const MASS_RADIUS_EXPONENT_HIGH: f64 = 0.03;

// -------------------------------------------------------------------------------------------------
// Catalog columns (NASA Exoplanet Archive, `ps` table)
// -------------------------------------------------------------------------------------------------

/// Planetary systems table queried for both stars and planets
pub const PS_TABLE: &str = "ps";

pub const COL_SYSTEM_NAME: &str = "sy_name";
pub const COL_HOSTNAME: &str = "hostname";
pub const COL_STELLAR_RADIUS: &str = "st_rad";
pub const COL_STELLAR_MASS: &str = "st_mass";
pub const COL_STELLAR_DENSITY: &str = "st_dens";
pub const COL_RA: &str = "ra";
pub const COL_DEC: &str = "dec";
pub const COL_SYSTEM_DISTANCE: &str = "sy_dist";

pub const COL_PLANET_NAME: &str = "pl_name";
pub const COL_ORBITAL_PERIOD: &str = "pl_orbper";
pub const COL_SEMI_MAJOR_AXIS: &str = "pl_orbsmax";
pub const COL_PLANET_RADIUS: &str = "pl_radj";
pub const COL_PLANET_MASS: &str = "pl_bmassj";
pub const COL_PLANET_DENSITY: &str = "pl_dens";
pub const COL_ECCENTRICITY: &str = "pl_orbeccen";
pub const COL_INCLINATION: &str = "pl_orbincl";
pub const COL_CIRCUMBINARY: &str = "cb_flag";
pub const COL_NUM_MOONS: &str = "sy_mnum";

/// Columns requested for star rows, in query order
pub const STAR_COLUMNS: [&str; 8] = [
    COL_SYSTEM_NAME,
    COL_HOSTNAME,
    COL_STELLAR_RADIUS,
    COL_STELLAR_MASS,
    COL_STELLAR_DENSITY,
    COL_RA,
    COL_DEC,
    COL_SYSTEM_DISTANCE,
];

/// Columns requested for planet rows, in query order
pub const PLANET_COLUMNS: [&str; 14] = [
    COL_PLANET_NAME,
    COL_HOSTNAME,
    COL_ORBITAL_PERIOD,
    COL_SEMI_MAJOR_AXIS,
    COL_PLANET_RADIUS,
    COL_PLANET_MASS,
    COL_PLANET_DENSITY,
    COL_ECCENTRICITY,
    COL_INCLINATION,
    COL_RA,
    COL_DEC,
    COL_CIRCUMBINARY,
    COL_NUM_MOONS,
    COL_SYSTEM_NAME,
];

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Distance in astronomical units
pub type AstronomicalUnit = f64;
/// Duration in days
pub type Day = f64;
/// Mass in solar masses
pub type SolarMass = f64;
/// Mass in Jupiter masses
pub type JupiterMass = f64;
/// Radius in Jupiter radii
pub type JupiterRadius = f64;
/// Distance in parsecs
pub type Parsec = f64;
