//! # Orrery: catalog rows in, system tree out
//!
//! This module defines the [`Orrery`](crate::orrery::Orrery) struct, the façade that chains
//! the pipeline stages:
//!
//! 1. **Retrieval** – rows are requested from a [`CatalogSource`] (one query for the planets
//!    of the host, then one query per host star, sequentially). Every row is collected before
//!    reduction starts, since medians and modes need the complete row set.
//! 2. **Reduction** – star rows are reduced on `hostname`, planet rows on `pl_name`
//!    ([`reduce`]).
//! 3. **Body factory** – reduced records become [`Star`]s and [`Planet`]s; records that cannot
//!    be built are reported as [`RejectedBody`] entries without stopping the others.
//! 4. **Assembly** – [`assemble_with_options`] builds the [`System`] tree and completes orbits.
//!
//! ## Typical usage
//!
//! ```rust, no_run
//! use orrery::catalog::archive::ArchiveClient;
//! use orrery::imputation::ImputationParams;
//! use orrery::orrery::Orrery;
//!
//! let params = ImputationParams::builder().seed(42).build().unwrap();
//! let mut orrery = Orrery::new(ArchiveClient::new(), params);
//!
//! let report = orrery.build_system("Kepler-16").unwrap();
//! println!("{}", report.system);
//! for rejected in &report.rejected {
//!     eprintln!("rejected: {}", rejected.error);
//! }
//! ```
//!
//! ## Errors
//!
//! - Catalog failures (transport, decoding) abort the call: they are never turned into an
//!   empty row set.
//! - Body-level failures are collected in [`SystemReport::rejected`].
//! - Assembly failures ([`OrreryError::EmptySystem`], [`OrreryError::ZeroStellarMass`]) abort
//!   the call.
use indexmap::IndexSet;
use log::info;
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    bodies::{make_planets, make_stars, Planet, RejectedBody, Star},
    catalog::{
        archive::{CatalogSource, TapQuery},
        reducer::reduce,
        RawRecord,
    },
    constants::{COL_HOSTNAME, COL_PLANET_NAME, PLANET_COLUMNS, PS_TABLE, STAR_COLUMNS},
    imputation::ImputationParams,
    orrery_errors::OrreryError,
    system::{assemble_with_options, AssemblyOptions, System},
};

/// Outcome of one pipeline run.
#[derive(Debug)]
pub struct SystemReport {
    pub system: System,
    pub rejected: Vec<RejectedBody>,
}

pub struct Orrery<S: CatalogSource> {
    source: S,
    params: ImputationParams,
    options: AssemblyOptions,
    rng: StdRng,
    table: String,
}

impl<S: CatalogSource> Orrery<S> {
    /// Construct a new pipeline over `source`.
    ///
    /// The random generator is seeded from `params.seed()` when set, from the operating system
    /// otherwise.
    pub fn new(source: S, params: ImputationParams) -> Self {
        let rng = match params.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Orrery {
            source,
            params,
            options: AssemblyOptions::default(),
            rng,
            table: PS_TABLE.to_string(),
        }
    }

    /// Query another table of the same layout (e.g. `pscomppars`).
    pub fn with_table(mut self, table: &str) -> Self {
        self.table = table.to_string();
        self
    }

    pub fn with_options(mut self, options: AssemblyOptions) -> Self {
        self.options = options;
        self
    }

    pub fn params(&self) -> &ImputationParams {
        &self.params
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Planet rows hosted by `hostname`.
    pub fn fetch_planet_rows(&self, hostname: &str) -> Result<Vec<RawRecord>, OrreryError> {
        let query = TapQuery::new(
            &PLANET_COLUMNS,
            &self.table,
            TapQuery::equals(COL_HOSTNAME, hostname),
        )?;
        self.source.fetch(&query)
    }

    /// Star rows of `hostname`.
    pub fn fetch_star_rows(&self, hostname: &str) -> Result<Vec<RawRecord>, OrreryError> {
        let query = TapQuery::new(
            &STAR_COLUMNS,
            &self.table,
            TapQuery::equals(COL_HOSTNAME, hostname),
        )?;
        self.source.fetch(&query)
    }

    /// Retrieve, reconcile and assemble the system around `hostname`.
    pub fn build_system(&mut self, hostname: &str) -> Result<SystemReport, OrreryError> {
        let planet_rows = self.fetch_planet_rows(hostname)?;

        let mut hosts: IndexSet<String> = IndexSet::new();
        hosts.insert(hostname.to_string());
        hosts.extend(
            planet_rows
                .iter()
                .filter_map(|row| row.text(COL_HOSTNAME))
                .map(str::to_string),
        );

        let mut star_rows = Vec::new();
        for host in &hosts {
            star_rows.extend(self.fetch_star_rows(host)?);
        }

        info!(
            "{hostname}: {} star row(s) for {} host(s), {} planet row(s)",
            star_rows.len(),
            hosts.len(),
            planet_rows.len()
        );

        self.assemble_rows(&star_rows, &planet_rows)
    }

    /// Run reduction, body construction and assembly on rows already in hand.
    pub fn assemble_rows(
        &mut self,
        star_rows: &[RawRecord],
        planet_rows: &[RawRecord],
    ) -> Result<SystemReport, OrreryError> {
        let (stars, mut rejected) = make_stars(reduce(star_rows, COL_HOSTNAME));
        let (planets, rejected_planets) = make_planets(
            reduce(planet_rows, COL_PLANET_NAME),
            &self.params,
            &mut self.rng,
        );
        rejected.extend(rejected_planets);

        let system = self.assemble(stars, planets)?;
        Ok(SystemReport { system, rejected })
    }

    /// Assemble already-built bodies with this pipeline's options and random source.
    pub fn assemble(&mut self, stars: Vec<Star>, planets: Vec<Planet>) -> Result<System, OrreryError> {
        assemble_with_options(stars, planets, &self.options, &self.params, &mut self.rng)
    }
}
