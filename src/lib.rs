//! # Orrery
//!
//! Reconcile exoplanet catalog rows into canonical stars and planets, then assemble them into
//! a hierarchical planetary system with complete orbits.
//!
//! The pipeline runs in four stages:
//!
//! | Stage      | Module                         | Output                         |
//! |------------|--------------------------------|--------------------------------|
//! | Retrieval  | [`catalog::archive`]           | raw rows (`Vec<RawRecord>`)    |
//! | Reduction  | [`catalog::reducer`]           | one record per identifier      |
//! | Bodies     | [`bodies`], [`imputation`]     | [`bodies::Star`], [`bodies::Planet`] |
//! | Assembly   | [`system`], [`kepler`]         | [`system::System`] tree        |
//!
//! [`orrery::Orrery`] chains them for one host name.
//!
//! Units: AU, days, solar masses (stars), Jupiter masses and radii (planets).
pub mod bodies;
pub mod catalog;
pub mod constants;
pub mod imputation;
pub mod kepler;
pub mod orrery;
pub mod orrery_errors;
pub mod system;
