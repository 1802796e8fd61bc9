use log::warn;
use rand::Rng;
use serde::Serialize;

use crate::{
    catalog::{schema::PlanetRecord, RawRecord},
    constants::{AstronomicalUnit, Day, Degree, JupiterMass, JupiterRadius, COL_HOSTNAME, COL_PLANET_NAME},
    imputation::{ImputationParams, MISSING_MASS, MISSING_MASS_AND_RADIUS, MISSING_RADIUS},
    kepler::semi_minor_axis,
    orrery_errors::OrreryError,
};

/// Orbit shape and timing handed to geometry consumers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitParameters {
    pub semi_major_axis: Option<AstronomicalUnit>,
    pub semi_minor_axis: Option<AstronomicalUnit>,
    pub eccentricity: Option<f64>,
    pub period: Option<Day>,
}

/// Canonical planet.
///
/// Units: period in days, axes in AU, radius in R♃, mass in M♃, density in g/cm³,
/// inclination/`ra`/`dec` in degrees.
///
/// `assumptions` lists, in order, every value that was imputed rather than observed.
/// It only ever grows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Planet {
    pub name: String,
    pub host_name: String,
    pub orbital_period: Option<Day>,
    pub semi_major_axis: Option<AstronomicalUnit>,
    pub semi_minor_axis: Option<AstronomicalUnit>,
    pub radius: Option<JupiterRadius>,
    pub mass: Option<JupiterMass>,
    pub density: Option<f64>,
    pub orbital_eccentricity: Option<f64>,
    pub orbital_inclination: Option<Degree>,
    pub ra: Option<Degree>,
    pub dec: Option<Degree>,
    pub orbit_binary: bool,
    pub num_moons: Option<u32>,
    pub assumptions: Vec<String>,
}

impl Planet {
    /// Build a planet from one reduced catalog record, then fill in mass and radius.
    ///
    /// Arguments
    /// -----------------
    /// * `record`: reduced catalog record (one per planet).
    /// * `params`: imputation policy.
    /// * `rng`: random source for the mass fallback.
    ///
    /// Errors
    /// ------
    /// * [`OrreryError::MissingIdentifier`] if `pl_name` is absent.
    /// * [`OrreryError::MissingField`] if `hostname` is absent.
    /// * [`OrreryError::ImputationExhausted`] if mass and radius are both absent and the
    ///   random fallback is disabled.
    pub fn from_record(
        record: &RawRecord,
        params: &ImputationParams,
        rng: &mut impl Rng,
    ) -> Result<Self, OrreryError> {
        let planet = PlanetRecord::from(record);
        let Some(name) = planet.pl_name else {
            return Err(OrreryError::MissingIdentifier(COL_PLANET_NAME.into()));
        };
        let Some(host_name) = planet.hostname else {
            return Err(OrreryError::MissingField {
                body: name,
                field: COL_HOSTNAME.into(),
            });
        };

        let assumptions = planet
            .unreadable
            .iter()
            .map(|column| {
                warn!("planet {name}: unreadable column `{column}` ignored");
                format!("Unreadable {column}")
            })
            .collect();

        let semi_minor_axis = match (planet.pl_orbsmax, planet.pl_orbeccen) {
            (Some(a), Some(e)) if a > 0.0 => semi_minor_axis(a, e),
            _ => None,
        };

        Planet {
            name,
            host_name,
            orbital_period: planet.pl_orbper,
            semi_major_axis: planet.pl_orbsmax,
            semi_minor_axis,
            radius: planet.pl_radj,
            mass: planet.pl_bmassj,
            density: planet.pl_dens,
            orbital_eccentricity: planet.pl_orbeccen,
            orbital_inclination: planet.pl_orbincl,
            ra: planet.ra,
            dec: planet.dec,
            orbit_binary: planet.cb_flag.is_some_and(|flag| flag != 0.0),
            num_moons: planet
                .sy_mnum
                .filter(|n| *n >= 0.0)
                .map(|n| n.round() as u32),
            assumptions,
        }
        .impute_mass_radius(params, rng)
    }

    /// Fill a missing mass or radius from the mass–radius relation.
    ///
    /// Branches, in priority order:
    /// 1. both missing → draw a mass, derive the radius (`"Missing mass and radius"`),
    /// 2. radius missing → derive it from the mass (`"Missing radius"`),
    /// 3. mass missing → derive it from the radius (`"Missing mass"`),
    /// 4. both present → unchanged.
    ///
    /// A mass or radius that is zero or negative counts as missing and is replaced.
    /// Applying it to its own output is a no-op.
    pub fn impute_mass_radius(
        mut self,
        params: &ImputationParams,
        rng: &mut impl Rng,
    ) -> Result<Self, OrreryError> {
        let mass = self.mass.filter(|m| *m > 0.0);
        let radius = self.radius.filter(|r| *r > 0.0);
        if mass != self.mass || radius != self.radius {
            warn!("planet {}: non-positive mass or radius treated as missing", self.name);
        }

        match (mass, radius) {
            (None, None) => {
                let mass = params
                    .draw_mass(rng)
                    .ok_or_else(|| OrreryError::ImputationExhausted(self.name.clone()))?;
                self.mass = Some(mass);
                self.radius = Some(params.radius_from_mass(mass));
                self.assumptions.push(MISSING_MASS_AND_RADIUS.into());
            }
            (Some(mass), None) => {
                self.radius = Some(params.radius_from_mass(mass));
                self.assumptions.push(MISSING_RADIUS.into());
            }
            (None, Some(radius)) => {
                self.mass = Some(params.mass_from_radius(radius));
                self.assumptions.push(MISSING_MASS.into());
            }
            (Some(_), Some(_)) => {}
        }
        Ok(self)
    }

    /// Parameters needed to draw this planet's orbit.
    pub fn orbit(&self) -> OrbitParameters {
        OrbitParameters {
            semi_major_axis: self.semi_major_axis,
            semi_minor_axis: self.semi_minor_axis,
            eccentricity: self.orbital_eccentricity,
            period: self.orbital_period,
        }
    }

    /// `true` if any value of this planet was imputed.
    pub fn has_assumptions(&self) -> bool {
        !self.assumptions.is_empty()
    }
}
