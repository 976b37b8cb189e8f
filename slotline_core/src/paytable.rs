use crate::symbols::Symbol;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaytableEntry {
    pub symbol: Symbol,
    pub multiplier: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paytable(pub Vec<PaytableEntry>);

impl Paytable {
    /// Three-in-a-row values of the fixed symbol set.
    pub fn reference() -> Self {
        Self(
            Symbol::ALL
                .iter()
                .map(|&symbol| PaytableEntry {
                    symbol,
                    multiplier: symbol.value(),
                })
                .collect(),
        )
    }

    pub fn multiplier(&self, symbol: Symbol) -> Option<u64> {
        self.0
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.multiplier)
    }

    pub fn max_multiplier(&self) -> u64 {
        self.0.iter().map(|e| e.multiplier).max().unwrap_or(0)
    }
}

impl Default for Paytable {
    fn default() -> Self {
        Self::reference()
    }
}
