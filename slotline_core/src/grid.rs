use std::fmt;

use serde::{Deserialize, Serialize};

use crate::symbols::Symbol;

/// Symbols shown after a spin, stored column by column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    columns: Vec<Vec<Symbol>>,
}

impl Grid {
    /// Build a grid from columns. Every column is expected to have the same length.
    pub fn from_columns(columns: Vec<Vec<Symbol>>) -> Self {
        debug_assert!(
            columns.windows(2).all(|w| w[0].len() == w[1].len()),
            "ragged grid"
        );
        Self { columns }
    }

    pub fn columns(&self) -> &[Vec<Symbol>] {
        &self.columns
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    pub fn rows(&self) -> usize {
        self.columns.first().map(Vec::len).unwrap_or(0)
    }

    pub fn symbol_at(&self, col: usize, row: usize) -> Option<Symbol> {
        self.columns.get(col).and_then(|c| c.get(row)).copied()
    }

    /// Symbols on one horizontal line, left to right.
    pub fn row(&self, row: usize) -> impl Iterator<Item = Symbol> + '_ {
        self.columns.iter().filter_map(move |c| c.get(row).copied())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows() {
            let cells: Vec<String> = self.row(r).map(|s| format!("  {s}")).collect();
            writeln!(f, "{}", cells.join(" | "))?;
        }
        Ok(())
    }
}
