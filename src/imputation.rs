//! # Imputation of missing planetary parameters
//!
//! Catalog rows frequently lack a planet's mass, radius, period or semi-major axis. Rather
//! than leaving holes, the pipeline fills them from physical relations and records a
//! human-readable note in the planet's `assumptions`.
//!
//! Two of these repairs cannot be derived from the data at all and fall back to a
//! uniformly drawn value:
//!
//! * mass when both mass and radius are missing,
//! * semi-major axis when both axis and period are missing.
//!
//! Injecting random values into scientific data is a policy decision, so both draws can be
//! turned off with [`ImputationParams::random_fallback`].
//!
//! ## Mass–radius relation
//!
//! ```text
//! R = M^0.55   for M <  120 M⊕ (expressed in M♃: 120 / 308)
//! R = M^0.03   for M >= 120 M⊕ (degenerate-matter regime)
//! M = R^(1 / 0.55)
//! ```
//!
//! The inverse always uses the low-mass branch, since large radii are rarely reported without
//! a mass.
use std::cmp::Ordering::{Equal, Greater, Less};
use std::ops::Range;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        AstronomicalUnit, JupiterMass, JupiterRadius, EARTH_MASSES_PER_JUPITER,
        MASS_RADIUS_EXPONENT_HIGH, MASS_RADIUS_EXPONENT_LOW, MASS_RADIUS_TRANSITION_EARTH,
    },
    orrery_errors::OrreryError,
};

pub const MISSING_MASS_AND_RADIUS: &str = "Missing mass and radius";
pub const MISSING_RADIUS: &str = "Missing radius";
pub const MISSING_MASS: &str = "Missing mass";
pub const MISSING_AXIS_AND_PERIOD: &str = "Missing semi-major axis and orbital period";
pub const MISSING_PERIOD: &str = "Missing orbital period";
pub const MISSING_AXIS: &str = "Missing semi-major axis";

/// Tunable parameters of the imputation step.
///
/// Values only come out of [`ImputationParamsBuilder::build`] or
/// [`ImputationParams::from_json`], so the ranges handed to the random draws are never empty.
///
/// Fields
/// -----------------
/// * `random_fallback` – allow the two randomized repairs (mass, semi-major axis).
/// * `mass_range_mj` – uniform range `[low, high)` of drawn masses, in Jupiter masses.
/// * `axis_range_au` – uniform range `[low, high)` of drawn semi-major axes, in AU.
/// * `mass_radius_transition_mj` – mass (M♃) where the mass–radius power law switches branch.
/// * `seed` – seed of the random generator used by [`crate::orrery::Orrery`]; `None` seeds
///   from the operating system.
///
/// Defaults
/// -----------------
/// * `random_fallback`: `true`
/// * `mass_range_mj`: `0.005..3.005`
/// * `axis_range_au`: `0.1..0.25`
/// * `mass_radius_transition_mj`: `120 / 308`
/// * `seed`: `None`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImputationParams {
    random_fallback: bool,
    mass_range_mj: Range<JupiterMass>,
    axis_range_au: Range<AstronomicalUnit>,
    mass_radius_transition_mj: JupiterMass,
    seed: Option<u64>,
}

impl ImputationParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ImputationParamsBuilder {
        ImputationParamsBuilder::new()
    }

    pub fn random_fallback(&self) -> bool {
        self.random_fallback
    }

    pub fn mass_range_mj(&self) -> Range<JupiterMass> {
        self.mass_range_mj.clone()
    }

    pub fn axis_range_au(&self) -> Range<AstronomicalUnit> {
        self.axis_range_au.clone()
    }

    pub fn mass_radius_transition_mj(&self) -> JupiterMass {
        self.mass_radius_transition_mj
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Read parameters from a JSON document; absent keys keep their default value.
    ///
    /// The result goes through the same checks as [`ImputationParamsBuilder::build`].
    pub fn from_json(json: &str) -> Result<Self, OrreryError> {
        let params: ImputationParams = serde_json::from_str(json)?;
        ImputationParamsBuilder { params }.build()
    }

    /// Radius from mass, following the two-branch power law.
    pub fn radius_from_mass(&self, mass: JupiterMass) -> JupiterRadius {
        if mass < self.mass_radius_transition_mj {
            mass.powf(MASS_RADIUS_EXPONENT_LOW)
        } else {
            mass.powf(MASS_RADIUS_EXPONENT_HIGH)
        }
    }

    /// Mass from radius, low-mass branch only.
    pub fn mass_from_radius(&self, radius: JupiterRadius) -> JupiterMass {
        radius.powf(1.0 / MASS_RADIUS_EXPONENT_LOW)
    }

    /// Draw a planetary mass, or `None` when the random fallback is disabled.
    pub fn draw_mass(&self, rng: &mut impl Rng) -> Option<JupiterMass> {
        self.random_fallback
            .then(|| rng.random_range(self.mass_range_mj.clone()))
    }

    /// Draw a semi-major axis, or `None` when the random fallback is disabled.
    pub fn draw_axis(&self, rng: &mut impl Rng) -> Option<AstronomicalUnit> {
        self.random_fallback
            .then(|| rng.random_range(self.axis_range_au.clone()))
    }
}

impl Default for ImputationParams {
    fn default() -> Self {
        ImputationParams {
            random_fallback: true,
            mass_range_mj: 0.005..3.005,
            axis_range_au: 0.1..0.25,
            mass_radius_transition_mj: MASS_RADIUS_TRANSITION_EARTH / EARTH_MASSES_PER_JUPITER,
            seed: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImputationParamsBuilder {
    params: ImputationParams,
}

impl Default for ImputationParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ImputationParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: ImputationParams::default(),
        }
    }

    pub fn random_fallback(mut self, v: bool) -> Self {
        self.params.random_fallback = v;
        self
    }
    pub fn mass_range_mj(mut self, v: Range<JupiterMass>) -> Self {
        self.params.mass_range_mj = v;
        self
    }
    pub fn axis_range_au(mut self, v: Range<AstronomicalUnit>) -> Self {
        self.params.axis_range_au = v;
        self
    }
    pub fn mass_radius_transition_mj(mut self, v: JupiterMass) -> Self {
        self.params.mass_radius_transition_mj = v;
        self
    }
    pub fn seed(mut self, v: u64) -> Self {
        self.params.seed = Some(v);
        self
    }

    // ---- Numeric helpers for PartialOrd (handle NaN as invalid) ----

    #[inline]
    fn gt0(x: f64) -> bool {
        x.partial_cmp(&0.0) == Some(Greater)
    }

    #[inline]
    fn ge0(x: f64) -> bool {
        matches!(x.partial_cmp(&0.0), Some(Greater) | Some(Equal))
    }

    #[inline]
    fn lt(a: f64, b: f64) -> bool {
        a.partial_cmp(&b) == Some(Less)
    }

    fn check_range(name: &str, range: &Range<f64>, strictly_positive: bool) -> Result<(), OrreryError> {
        if !range.start.is_finite() || !range.end.is_finite() {
            return Err(OrreryError::InvalidImputationParameter(format!(
                "{name} bounds must be finite"
            )));
        }
        let low_ok = if strictly_positive {
            Self::gt0(range.start)
        } else {
            Self::ge0(range.start)
        };
        if !low_ok {
            return Err(OrreryError::InvalidImputationParameter(format!(
                "{name} lower bound must be {}",
                if strictly_positive { "> 0" } else { ">= 0" }
            )));
        }
        if !Self::lt(range.start, range.end) {
            return Err(OrreryError::InvalidImputationParameter(format!(
                "{name} must satisfy low < high"
            )));
        }
        Ok(())
    }

    /// Validate and return the parameters.
    ///
    /// ```rust
    /// use orrery::imputation::ImputationParams;
    ///
    /// let params = ImputationParams::builder()
    ///     .random_fallback(false)
    ///     .build()
    ///     .unwrap();
    /// assert!(!params.random_fallback());
    /// ```
    pub fn build(self) -> Result<ImputationParams, OrreryError> {
        let p = &self.params;

        Self::check_range("mass_range_mj", &p.mass_range_mj, false)?;
        Self::check_range("axis_range_au", &p.axis_range_au, true)?;

        if !Self::gt0(p.mass_radius_transition_mj) || !p.mass_radius_transition_mj.is_finite() {
            return Err(OrreryError::InvalidImputationParameter(
                "mass_radius_transition_mj must be finite and > 0".into(),
            ));
        }

        Ok(self.params)
    }
}
