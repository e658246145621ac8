//! Periodic table data behind the selection grid.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use crate::ui::core::style::Color;
use crate::ui::widgets::grid::{GridCell, GridPos, GridProvider, SparseGrid};

const ELEMENTS_JSON: &str = include_str!("../../assets/elements.json");

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Element {
    #[serde(skip)]
    pub name: String,
    pub number: u8,
    pub symbol: String,
    #[serde(default)]
    pub atomic_mass: f64,
    pub category: String,
    pub phase: String,
    /// 1-based column in the table layout.
    pub xpos: u16,
    /// 1-based row in the table layout.
    pub ypos: u16,
}

impl Element {
    pub fn grid_pos(&self) -> Option<GridPos> {
        Some(GridPos::new(
            self.xpos.checked_sub(1)?,
            self.ypos.checked_sub(1)?,
        ))
    }
}

/// Category fill color, or `None` for a category the table does not know.
pub fn category_color(category: &str) -> Option<Color> {
    let hex = match category {
        "diatomic nonmetal" => "#a1a3d8",
        "noble gas" | "unknown, predicted to be noble gas" => "#3366cc",
        "alkali metal" => "#f9ac93",
        "alkaline earth metal" => "#fed293",
        "metalloid" | "unknown,probably metalloid" => "#a5dce4",
        "polyatomic nonmetal" => "#c1ded0",
        "post-transition metal" | "unknown, probably post transition metal" => "#a8d699",
        "transition metal" | "unknown, probably transition metal" => "#f6f499",
        "lanthanide" => "#ee93c4",
        "actinide" => "#e3aec3",
        _ => return None,
    };
    Color::parse(hex)
}

pub fn phase_color(phase: &str) -> Option<Color> {
    let name = match phase {
        "Gas" => "red",
        "Liquid" => "purple",
        "Solid" => "blue",
        _ => return None,
    };
    Color::parse(name)
}

/// Elements laid out on their table grid.
#[derive(Clone, Debug)]
pub struct PeriodicTable {
    grid: SparseGrid<Element>,
}

impl PeriodicTable {
    /// The table shipped with the crate.
    pub fn embedded() -> serde_json::Result<Self> {
        Self::from_json(ELEMENTS_JSON)
    }

    /// Parses a JSON object keyed by element name. Entries without a grid
    /// position are skipped.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let raw: BTreeMap<String, Element> = serde_json::from_str(json)?;
        let columns = raw.values().map(|e| e.xpos).max().unwrap_or(0);
        let rows = raw.values().map(|e| e.ypos).max().unwrap_or(0);

        let mut grid = SparseGrid::new(columns, rows);
        let mut missing = HashSet::new();
        for (name, mut element) in raw {
            element.name = name;
            let Some(pos) = element.grid_pos() else {
                tracing::warn!(element = %element.name, "element without grid position");
                continue;
            };
            let category = resolve(&element.category, category_color, &mut missing);
            let phase = resolve(&element.phase, phase_color, &mut missing);
            grid.insert(
                pos,
                GridCell {
                    label: element.symbol.clone(),
                    value: element,
                    category,
                    phase,
                },
            );
        }
        Ok(Self { grid })
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn by_symbol(&self, symbol: &str) -> Option<Element> {
        (0..self.grid.rows())
            .flat_map(|row| (0..self.grid.columns()).map(move |col| GridPos::new(col, row)))
            .filter_map(|pos| self.grid.cell(pos))
            .map(|cell| cell.value)
            .find(|e| e.symbol == symbol)
    }
}

/// Looks `name` up in a color table; unknown names fall back to white and
/// are reported once.
fn resolve(name: &str, table: fn(&str) -> Option<Color>, missing: &mut HashSet<String>) -> Color {
    if let Some(color) = table(name) {
        return color;
    }
    if missing.insert(name.to_string()) {
        tracing::warn!(name, "no color for element class, using white");
    }
    Color::WHITE
}

impl GridProvider<Element> for PeriodicTable {
    fn columns(&self) -> u16 {
        self.grid.columns()
    }

    fn rows(&self) -> u16 {
        self.grid.rows()
    }

    fn cell(&self, pos: GridPos) -> Option<GridCell<Element>> {
        self.grid.cell(pos)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/element.rs"]
mod tests;
