//! # Tabular display for assembled systems
//!
//! `impl Display for System` renders the whole tree as one table (built with
//! [`comfy-table`](https://docs.rs/comfy-table/latest/comfy_table/)), one row per body:
//!
//! ```text
//! Node | Body | Kind | Mass | Radius | a [AU] | P [d] | e | Notes
//! ```
//!
//! The `Node` column is the path of the sub-system holding the body (`0`, `0.1`, …), so the
//! nesting remains readable in a flat table. Star masses are in M☉, radii in R☉; planet
//! masses in M♃, radii in R♃. Missing values are printed as `-`. The `Notes` column joins
//! the planet's assumptions.
use std::fmt;

use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Row, Table};

use crate::bodies::{Planet, Star};

use super::System;

fn opt(value: Option<f64>, precision: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.precision$}"))
}

fn right(text: String) -> Cell {
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn star_row(path: &str, star: &Star) -> Row {
    Row::from(vec![
        Cell::new(path),
        Cell::new(&star.host_name),
        Cell::new("star"),
        right(opt(star.stellar_mass, 4)),
        right(opt(star.stellar_radius, 4)),
        right("-".into()),
        right("-".into()),
        right("-".into()),
        Cell::new(""),
    ])
}

fn planet_row(path: &str, planet: &Planet) -> Row {
    let kind = if planet.orbit_binary {
        "planet (circumbinary)"
    } else {
        "planet"
    };
    Row::from(vec![
        Cell::new(path),
        Cell::new(&planet.name),
        Cell::new(kind),
        right(opt(planet.mass, 4)),
        right(opt(planet.radius, 4)),
        right(opt(planet.semi_major_axis, 5)),
        right(opt(planet.orbital_period, 3)),
        right(opt(planet.orbital_eccentricity, 3)),
        Cell::new(planet.assumptions.join("; ")),
    ])
}

impl System {
    fn add_rows(&self, path: &str, table: &mut Table) {
        for star in &self.stars {
            table.add_row(star_row(path, star));
        }
        for planet in &self.planets {
            table.add_row(planet_row(path, planet));
        }
        for (i, sub) in self.sub_systems.iter().enumerate() {
            sub.add_rows(&format!("{path}.{i}"), table);
        }
    }

    /// Render the tree as a table.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);

        table.set_header(vec![
            Cell::new("Node"),
            Cell::new("Body"),
            Cell::new("Kind"),
            Cell::new("Mass"),
            Cell::new("Radius"),
            Cell::new("a [AU]"),
            Cell::new("P [d]"),
            Cell::new("e"),
            Cell::new("Notes"),
        ]);

        self.add_rows("0", &mut table);
        table
    }
}

impl fmt::Display for System {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} (total stellar mass {:.4} M☉)",
            self.name().unwrap_or("<unnamed system>"),
            self.total_star_mass
        )?;
        write!(f, "{}", self.to_table())
    }
}
