//! # Hierarchical planetary systems
//!
//! A [`System`] is a tree node holding stars, planets and child sub-systems. The
//! [`assembler`] builds it from flat lists of canonical bodies:
//!
//! ```text
//! System (top level)
//! ├── stars       lone stars (no planet of their own)
//! ├── planets     circumbinary planets
//! └── sub_systems
//!     ├── System { stars: [A], planets: [A b, A c] }
//!     └── System { stars: [B], planets: [B b] }
//! ```
//!
//! Every node stores `total_star_mass`, the stellar mass it encloses (its own stars plus all
//! descendants), computed once when the node is built. Nodes are built bottom-up and never
//! modified afterwards, so the stored value cannot go stale; [`System::recompute_star_mass`]
//! recomputes it from scratch for verification.
use serde::Serialize;

use crate::{
    bodies::{OrbitParameters, Planet, Star},
    constants::SolarMass,
    orrery_errors::OrreryError,
};

pub mod assembler;
pub mod display;

pub use assembler::{apply_orbital_fixup, assemble, assemble_with_options, AssemblyOptions};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct System {
    pub(crate) stars: Vec<Star>,
    pub(crate) planets: Vec<Planet>,
    pub(crate) sub_systems: Vec<System>,
    pub(crate) total_star_mass: SolarMass,
}

/// One planet of the tree together with the mass of the node that directly holds it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedOrbit<'a> {
    pub planet: &'a Planet,
    pub orbit: OrbitParameters,
    pub total_star_mass: SolarMass,
}

impl System {
    /// Stars held directly by this node.
    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    /// Planets held directly by this node.
    pub fn planets(&self) -> &[Planet] {
        &self.planets
    }

    pub fn sub_systems(&self) -> &[System] {
        &self.sub_systems
    }

    /// Stellar mass enclosed by this node, fixed at construction.
    pub fn total_star_mass(&self) -> SolarMass {
        self.total_star_mass
    }

    /// Sum of the known masses of this node's own stars.
    pub fn direct_star_mass(&self) -> SolarMass {
        self.stars.iter().filter_map(|s| s.stellar_mass).sum()
    }

    /// Enclosed stellar mass recomputed from the whole subtree.
    pub fn recompute_star_mass(&self) -> SolarMass {
        self.direct_star_mass()
            + self
                .sub_systems
                .iter()
                .map(System::recompute_star_mass)
                .sum::<f64>()
    }

    /// Every star of the tree, depth-first, own stars before descendants.
    pub fn stars_recursive(&self) -> Vec<&Star> {
        let mut out: Vec<&Star> = self.stars.iter().collect();
        for sub in &self.sub_systems {
            out.extend(sub.stars_recursive());
        }
        out
    }

    /// Every planet of the tree, depth-first, own planets before descendants.
    pub fn planets_recursive(&self) -> Vec<&Planet> {
        let mut out: Vec<&Planet> = self.planets.iter().collect();
        for sub in &self.sub_systems {
            out.extend(sub.planets_recursive());
        }
        out
    }

    /// Find a planet anywhere in the tree.
    pub fn find_planet(&self, name: &str) -> Option<&Planet> {
        self.planets
            .iter()
            .find(|p| p.name == name)
            .or_else(|| self.sub_systems.iter().find_map(|s| s.find_planet(name)))
    }

    /// Orbit parameters of every planet, with the stellar mass it orbits.
    pub fn orbits(&self) -> Vec<PlacedOrbit<'_>> {
        let mut out: Vec<PlacedOrbit<'_>> = self
            .planets
            .iter()
            .map(|planet| PlacedOrbit {
                planet,
                orbit: planet.orbit(),
                total_star_mass: self.total_star_mass,
            })
            .collect();
        for sub in &self.sub_systems {
            out.extend(sub.orbits());
        }
        out
    }

    /// Number of levels in the tree (a leaf has depth 1).
    pub fn depth(&self) -> usize {
        1 + self
            .sub_systems
            .iter()
            .map(System::depth)
            .max()
            .unwrap_or(0)
    }

    /// Serialize the whole tree as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, OrreryError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Display name: system name of the first star found, depth-first.
    pub fn name(&self) -> Option<&str> {
        self.stars_recursive()
            .first()
            .map(|star| star.system_name.as_str())
    }
}
