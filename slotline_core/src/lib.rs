pub mod bet;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod paytable;
pub mod rng;
pub mod sim;
pub mod symbols;

/// Unit for deposits, bets, winnings and balances.
pub type Credits = u64;

pub use crate::bet::{Bet, BetLimits};
pub use crate::config::MachineConfig;
pub use crate::engine::{
    evaluate, generate_grid, replay_grid, verify_grid, Machine, Payout, SpinOutcome,
};
pub use crate::error::{InputError, SlotError, SlotResult};
pub use crate::grid::Grid;
pub use crate::paytable::{Paytable, PaytableEntry};
pub use crate::rng::{derive_hash_hex, FairSeed, RngSource};
pub use crate::sim::{simulate, SimulationError, SimulationReport};
pub use crate::symbols::{PoolEntry, Symbol, SymbolPool};
