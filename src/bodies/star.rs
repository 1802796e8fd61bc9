use log::warn;
use serde::Serialize;

use crate::{
    catalog::{schema::StarRecord, RawRecord},
    constants::{Degree, Parsec, SolarMass, COL_HOSTNAME},
    orrery_errors::OrreryError,
};

/// Canonical star, one per distinct host name.
///
/// Units: radius in R☉, mass in M☉, density in g/cm³, `ra`/`dec` in degrees,
/// `system_distance` in parsecs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Star {
    pub system_name: String,
    pub host_name: String,
    pub stellar_radius: Option<f64>,
    pub stellar_mass: Option<SolarMass>,
    pub stellar_density: Option<f64>,
    pub ra: Option<Degree>,
    pub dec: Option<Degree>,
    pub system_distance: Option<Parsec>,
}

impl Star {
    /// Build a star from one reduced catalog record.
    ///
    /// This is a plain projection: a missing mass stays `None` and is reported by the
    /// system assembler, not defaulted here.
    ///
    /// Errors
    /// ------
    /// * [`OrreryError::MissingIdentifier`] if the record has no `hostname`.
    pub fn from_record(record: &RawRecord) -> Result<Self, OrreryError> {
        let star = StarRecord::from(record);
        let Some(host_name) = star.hostname else {
            return Err(OrreryError::MissingIdentifier(COL_HOSTNAME.into()));
        };

        for column in &star.unreadable {
            warn!("star {host_name}: unreadable column `{column}` ignored");
        }

        Ok(Star {
            system_name: star.system_name.unwrap_or_else(|| host_name.clone()),
            host_name,
            stellar_radius: star.st_rad,
            stellar_mass: star.st_mass,
            stellar_density: star.st_dens,
            ra: star.ra,
            dec: star.dec,
            system_distance: star.sy_dist,
        })
    }

    /// Convenience constructor for a star known only by name and mass.
    pub fn with_mass(host_name: &str, stellar_mass: SolarMass) -> Self {
        Star {
            system_name: host_name.to_string(),
            host_name: host_name.to_string(),
            stellar_radius: None,
            stellar_mass: Some(stellar_mass),
            stellar_density: None,
            ra: None,
            dec: None,
            system_distance: None,
        }
    }
}
