//! # Body factory
//!
//! Turns reduced catalog records into canonical [`Star`] and [`Planet`] values.
//!
//! Failures are local to one body: [`make_stars`] and [`make_planets`] keep every body that
//! could be built and hand back the others as [`RejectedBody`] entries, so one malformed
//! record never prevents the rest of the system from being assembled.
use log::warn;
use rand::Rng;

use crate::{catalog::RawRecord, imputation::ImputationParams, orrery_errors::OrreryError};

pub mod planet;
pub mod star;

pub use planet::{OrbitParameters, Planet};
pub use star::Star;

/// Kind of body a rejected record was meant to become.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
}

/// A reduced record that could not be turned into a body.
#[derive(Debug, PartialEq)]
pub struct RejectedBody {
    pub kind: BodyKind,
    pub record: RawRecord,
    pub error: OrreryError,
}

/// Build a star from one reduced record.
pub fn make_star(record: &RawRecord) -> Result<Star, OrreryError> {
    Star::from_record(record)
}

/// Build a planet from one reduced record, imputing mass and radius when needed.
pub fn make_planet(
    record: &RawRecord,
    params: &ImputationParams,
    rng: &mut impl Rng,
) -> Result<Planet, OrreryError> {
    Planet::from_record(record, params, rng)
}

/// Build every star that can be built; the rest are returned as rejections.
pub fn make_stars(records: Vec<RawRecord>) -> (Vec<Star>, Vec<RejectedBody>) {
    let mut stars = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for record in records {
        match make_star(&record) {
            Ok(star) => stars.push(star),
            Err(error) => {
                warn!("star record rejected: {error}");
                rejected.push(RejectedBody {
                    kind: BodyKind::Star,
                    record,
                    error,
                });
            }
        }
    }
    (stars, rejected)
}

/// Build every planet that can be built; the rest are returned as rejections.
pub fn make_planets(
    records: Vec<RawRecord>,
    params: &ImputationParams,
    rng: &mut impl Rng,
) -> (Vec<Planet>, Vec<RejectedBody>) {
    let mut planets = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();

    for record in records {
        match make_planet(&record, params, rng) {
            Ok(planet) => planets.push(planet),
            Err(error) => {
                warn!("planet record rejected: {error}");
                rejected.push(RejectedBody {
                    kind: BodyKind::Planet,
                    record,
                    error,
                });
            }
        }
    }
    (planets, rejected)
}

#[cfg(test)]
mod bodies_test {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::catalog::CatalogValue;

    #[test]
    fn test_bad_record_does_not_abort_siblings() {
        let records: Vec<RawRecord> = vec![
            RawRecord::from_iter([
                ("pl_name", CatalogValue::from("X b")),
                ("hostname", "X".into()),
                ("pl_bmassj", 1.0.into()),
            ]),
            RawRecord::from_iter([("pl_orbper", CatalogValue::from(3.0))]),
            RawRecord::from_iter([
                ("pl_name", CatalogValue::from("X c")),
                ("hostname", "X".into()),
                ("pl_radj", 1.0.into()),
            ]),
        ];

        let mut rng = StdRng::seed_from_u64(5);
        let (planets, rejected) = make_planets(records, &ImputationParams::default(), &mut rng);

        assert_eq!(planets.len(), 2);
        assert_eq!(planets[0].name, "X b");
        assert_eq!(planets[1].name, "X c");
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].kind, BodyKind::Planet);
        assert_eq!(
            rejected[0].error,
            OrreryError::MissingIdentifier("pl_name".into())
        );
    }

    #[test]
    fn test_make_stars() {
        let records: Vec<RawRecord> = vec![
            RawRecord::from_iter([("hostname", CatalogValue::from("A")), ("st_mass", 1.0.into())]),
            RawRecord::from_iter([("st_mass", CatalogValue::from(0.3))]),
        ];
        let (stars, rejected) = make_stars(records);
        assert_eq!(stars, vec![Star::with_mass("A", 1.0)]);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].kind, BodyKind::Star);
    }
}
