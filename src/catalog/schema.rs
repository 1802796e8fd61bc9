//! Typed projections of reduced catalog records.
//!
//! A reduced [`RawRecord`] is still an open map. The records below pin down the exact set of
//! columns the body factory consumes, each one optional. A column carrying a value of the
//! wrong kind (e.g. text in a numeric column) is read as absent and listed in
//! `unreadable`, so the caller can decide how to report it.
use crate::constants::*;

use super::{CatalogValue, RawRecord};

/// Canonical star columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StarRecord {
    pub system_name: Option<String>,
    pub hostname: Option<String>,
    pub st_rad: Option<f64>,
    pub st_mass: Option<f64>,
    pub st_dens: Option<f64>,
    pub ra: Option<f64>,
    pub dec: Option<f64>,
    pub sy_dist: Option<f64>,
    pub unreadable: Vec<&'static str>,
}

/// Canonical planet columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlanetRecord {
    pub pl_name: Option<String>,
    pub hostname: Option<String>,
    pub pl_orbper: Option<f64>,
    pub pl_orbsmax: Option<f64>,
    pub pl_radj: Option<f64>,
    pub pl_bmassj: Option<f64>,
    pub pl_dens: Option<f64>,
    pub pl_orbeccen: Option<f64>,
    pub pl_orbincl: Option<f64>,
    pub ra: Option<f64>,
    pub dec: Option<f64>,
    pub cb_flag: Option<f64>,
    pub sy_mnum: Option<f64>,
    pub unreadable: Vec<&'static str>,
}

/// Column reader that remembers which columns had the wrong kind.
struct Projection<'a> {
    record: &'a RawRecord,
    unreadable: Vec<&'static str>,
}

impl<'a> Projection<'a> {
    fn new(record: &'a RawRecord) -> Self {
        Projection {
            record,
            unreadable: Vec::new(),
        }
    }

    fn number(&mut self, column: &'static str) -> Option<f64> {
        match self.record.get(column) {
            Some(CatalogValue::Number(n)) if n.is_finite() => Some(*n),
            Some(_) => {
                self.unreadable.push(column);
                None
            }
            None => None,
        }
    }

    /// Identifiers may come back numeric (e.g. a bare catalog number); keep their text form.
    fn text(&mut self, column: &'static str) -> Option<String> {
        match self.record.get(column) {
            Some(CatalogValue::Text(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Some(CatalogValue::Number(n)) => Some(n.to_string()),
            Some(_) => {
                self.unreadable.push(column);
                None
            }
            None => None,
        }
    }
}

impl From<&RawRecord> for StarRecord {
    fn from(record: &RawRecord) -> Self {
        let mut p = Projection::new(record);
        let hostname = p.text(COL_HOSTNAME);
        let system_name = p.text(COL_SYSTEM_NAME).or_else(|| hostname.clone());

        StarRecord {
            system_name,
            hostname,
            st_rad: p.number(COL_STELLAR_RADIUS),
            st_mass: p.number(COL_STELLAR_MASS),
            st_dens: p.number(COL_STELLAR_DENSITY),
            ra: p.number(COL_RA),
            dec: p.number(COL_DEC),
            sy_dist: p.number(COL_SYSTEM_DISTANCE),
            unreadable: p.unreadable,
        }
    }
}

impl From<&RawRecord> for PlanetRecord {
    fn from(record: &RawRecord) -> Self {
        let mut p = Projection::new(record);

        PlanetRecord {
            pl_name: p.text(COL_PLANET_NAME),
            hostname: p.text(COL_HOSTNAME),
            pl_orbper: p.number(COL_ORBITAL_PERIOD),
            pl_orbsmax: p.number(COL_SEMI_MAJOR_AXIS),
            pl_radj: p.number(COL_PLANET_RADIUS),
            pl_bmassj: p.number(COL_PLANET_MASS),
            pl_dens: p.number(COL_PLANET_DENSITY),
            pl_orbeccen: p.number(COL_ECCENTRICITY),
            pl_orbincl: p.number(COL_INCLINATION),
            ra: p.number(COL_RA),
            dec: p.number(COL_DEC),
            cb_flag: p.number(COL_CIRCUMBINARY),
            sy_mnum: p.number(COL_NUM_MOONS),
            unreadable: p.unreadable,
        }
    }
}
