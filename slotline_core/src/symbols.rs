use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    A,
    B,
    C,
    D,
}

impl Symbol {
    pub const ALL: [Symbol; 4] = [Symbol::A, Symbol::B, Symbol::C, Symbol::D];

    /// Copies of this symbol placed in every column's draw pool.
    pub fn pool_count(self) -> usize {
        match self {
            Symbol::A => 2,
            Symbol::B => 4,
            Symbol::C => 6,
            Symbol::D => 8,
        }
    }

    /// Multiplier paid per unit of line bet for a full line of this symbol.
    pub fn value(self) -> u64 {
        match self {
            Symbol::A => 5,
            Symbol::B => 4,
            Symbol::C => 3,
            Symbol::D => 2,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Symbol::A => 'A',
            Symbol::B => 'B',
            Symbol::C => 'C',
            Symbol::D => 'D',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PoolEntry {
    pub symbol: Symbol,
    pub count: usize,
}

/// Multiset of symbol copies a single column is drawn from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymbolPool(pub Vec<PoolEntry>);

impl SymbolPool {
    pub fn reference() -> Self {
        Self(
            Symbol::ALL
                .iter()
                .map(|&symbol| PoolEntry {
                    symbol,
                    count: symbol.pool_count(),
                })
                .collect(),
        )
    }

    pub fn total(&self) -> usize {
        self.0.iter().map(|e| e.count).sum()
    }

    pub fn count_of(&self, symbol: Symbol) -> usize {
        self.0
            .iter()
            .filter(|e| e.symbol == symbol)
            .map(|e| e.count)
            .sum()
    }

    /// Flatten into one entry per physical copy, ready for drawing.
    pub fn expand(&self) -> Vec<Symbol> {
        let mut out = Vec::with_capacity(self.total());
        for entry in &self.0 {
            out.extend(std::iter::repeat(entry.symbol).take(entry.count));
        }
        out
    }
}

impl Default for SymbolPool {
    fn default() -> Self {
        Self::reference()
    }
}
