//! Machine dimensions and table limits.
//!
//! Values come from built-in defaults, an optional TOML file, and
//! `SLOTLINE_*` environment variables, in that order of precedence.

use std::path::Path;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bet::BetLimits;
use crate::error::{SlotError, SlotResult};
use crate::paytable::Paytable;
use crate::symbols::SymbolPool;
use crate::Credits;

/// Prefix for environment overrides, e.g. `SLOTLINE_MAX_BET=50`.
pub const ENV_PREFIX: &str = "SLOTLINE";

pub const ROWS: usize = 3;
pub const COLS: usize = 3;
pub const MAX_LINES: usize = 3;
pub const MIN_BET: Credits = 1;
pub const MAX_BET: Credits = 100;
pub const MAX_DEPOSIT: Credits = 1_000_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MachineConfig {
    pub rows: usize,
    pub cols: usize,
    pub max_lines: usize,
    pub min_bet: Credits,
    pub max_bet: Credits,
    pub max_deposit: Credits,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            rows: ROWS,
            cols: COLS,
            max_lines: MAX_LINES,
            min_bet: MIN_BET,
            max_bet: MAX_BET,
            max_deposit: MAX_DEPOSIT,
        }
    }
}

impl MachineConfig {
    /// Load defaults, then the file at `path` (if given), then the environment.
    pub fn load(path: Option<&Path>) -> SlotResult<Self> {
        Self::load_with(path, Environment::with_prefix(ENV_PREFIX))
    }

    pub(crate) fn load_with(path: Option<&Path>, env: Environment) -> SlotResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            debug!("reading machine config from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }
        let config = builder.add_source(env.try_parsing(true)).build()?;
        Ok(config.try_deserialize()?)
    }

    pub fn limits(&self) -> BetLimits {
        BetLimits {
            max_lines: self.max_lines,
            min_bet: self.min_bet,
            max_bet: self.max_bet,
            max_deposit: self.max_deposit,
        }
    }

    /// Reject configurations that could fail or misbehave during a spin.
    pub fn validate(&self, pool: &SymbolPool, paytable: &Paytable) -> SlotResult<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(SlotError::EmptyGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        if self.max_lines == 0 || self.max_lines > self.rows {
            return Err(SlotError::InvalidLines {
                max_lines: self.max_lines,
                rows: self.rows,
            });
        }
        if self.min_bet == 0 || self.min_bet > self.max_bet {
            return Err(SlotError::InvalidBetRange {
                min_bet: self.min_bet,
                max_bet: self.max_bet,
            });
        }
        if self.max_deposit == 0 {
            return Err(SlotError::InvalidDeposit);
        }
        for entry in &pool.0 {
            if entry.count == 0 {
                return Err(SlotError::ZeroCount(entry.symbol));
            }
            if paytable.multiplier(entry.symbol).is_none() {
                return Err(SlotError::MissingValue(entry.symbol));
            }
        }
        if pool.total() < self.rows {
            return Err(SlotError::PoolTooSmall {
                available: pool.total(),
                rows: self.rows,
            });
        }
        paytable
            .max_multiplier()
            .checked_mul(self.max_bet)
            .and_then(|v| v.checked_mul(self.max_lines as Credits))
            .and_then(|v| v.checked_add(self.max_deposit))
            .ok_or(SlotError::PayoutOverflow)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::{PoolEntry, Symbol};
    use std::collections::HashMap;
    use std::fs;
    use tempfile::tempdir;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    #[test]
    fn defaults_without_sources() -> SlotResult<()> {
        let config = MachineConfig::load_with(None, no_env())?;
        assert_eq!(config, MachineConfig::default());
        Ok(())
    }

    #[test]
    fn file_overrides_defaults() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("machine.toml");
        fs::write(&path, "max_bet = 50\nmin_bet = 5\n")?;
        let config = MachineConfig::load_with(Some(&path), no_env())?;
        assert_eq!(config.max_bet, 50);
        assert_eq!(config.min_bet, 5);
        assert_eq!(config.rows, ROWS);
        Ok(())
    }

    #[test]
    fn environment_overrides_file() -> TestResult {
        let dir = tempdir()?;
        let path = dir.path().join("machine.toml");
        fs::write(&path, "max_bet = 50\n")?;
        let mut vars = HashMap::new();
        vars.insert("SLOTLINE_MAX_BET".to_string(), "20".to_string());
        let env = Environment::with_prefix(ENV_PREFIX).source(Some(vars));
        let config = MachineConfig::load_with(Some(&path), env)?;
        assert_eq!(config.max_bet, 20);
        Ok(())
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("absent.toml");
        let err = MachineConfig::load_with(Some(&path), no_env()).unwrap_err();
        assert!(matches!(err, SlotError::Config(_)));
    }

    #[test]
    fn reference_configuration_is_valid() {
        let config = MachineConfig::default();
        assert!(config
            .validate(&SymbolPool::reference(), &Paytable::reference())
            .is_ok());
    }

    #[test]
    fn pool_smaller_than_rows_is_rejected() {
        let config = MachineConfig::default();
        let pool = SymbolPool(vec![PoolEntry {
            symbol: Symbol::A,
            count: 2,
        }]);
        let err = config.validate(&pool, &Paytable::reference()).unwrap_err();
        assert!(matches!(
            err,
            SlotError::PoolTooSmall {
                available: 2,
                rows: 3
            }
        ));
    }

    #[test]
    fn lines_beyond_rows_are_rejected() {
        let config = MachineConfig {
            max_lines: 4,
            ..MachineConfig::default()
        };
        let err = config
            .validate(&SymbolPool::reference(), &Paytable::reference())
            .unwrap_err();
        assert!(matches!(err, SlotError::InvalidLines { .. }));
    }

    #[test]
    fn bet_range_must_be_ordered() {
        let config = MachineConfig {
            min_bet: 10,
            max_bet: 5,
            ..MachineConfig::default()
        };
        let err = config
            .validate(&SymbolPool::reference(), &Paytable::reference())
            .unwrap_err();
        assert!(matches!(err, SlotError::InvalidBetRange { .. }));
    }

    #[test]
    fn every_pooled_symbol_needs_a_value() {
        let paytable = Paytable(Paytable::reference().0.into_iter().take(3).collect());
        let err = MachineConfig::default()
            .validate(&SymbolPool::reference(), &paytable)
            .unwrap_err();
        assert!(matches!(err, SlotError::MissingValue(Symbol::D)));
    }

    #[test]
    fn overflowing_payout_is_rejected() {
        let config = MachineConfig {
            max_bet: u64::MAX,
            ..MachineConfig::default()
        };
        let err = config
            .validate(&SymbolPool::reference(), &Paytable::reference())
            .unwrap_err();
        assert!(matches!(err, SlotError::PayoutOverflow));
    }

    #[test]
    fn deposit_cap_must_leave_room_for_a_payout() {
        let config = MachineConfig {
            max_deposit: u64::MAX,
            ..MachineConfig::default()
        };
        let err = config
            .validate(&SymbolPool::reference(), &Paytable::reference())
            .unwrap_err();
        assert!(matches!(err, SlotError::PayoutOverflow));

        let config = MachineConfig {
            max_deposit: 0,
            ..MachineConfig::default()
        };
        let err = config
            .validate(&SymbolPool::reference(), &Paytable::reference())
            .unwrap_err();
        assert!(matches!(err, SlotError::InvalidDeposit));
    }
}
