use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    bet::{Bet, BetLimits},
    config::MachineConfig,
    error::{SlotError, SlotResult},
    grid::Grid,
    paytable::Paytable,
    rng::FairSeed,
    symbols::{Symbol, SymbolPool},
    Credits,
};

/// Winnings of one evaluated grid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub winnings: Credits,
    /// 1-indexed, ascending.
    pub winning_lines: Vec<usize>,
}

impl Payout {
    pub fn is_win(&self) -> bool {
        !self.winning_lines.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpinOutcome {
    pub grid: Grid,
    pub payout: Payout,
}

/// Draw `rows` symbols per column without replacement. Every column starts
/// from its own full copy of `pool`.
pub fn generate_grid<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    pool: &SymbolPool,
    rng: &mut R,
) -> SlotResult<Grid> {
    let all_symbols = pool.expand();
    if all_symbols.len() < rows {
        return Err(SlotError::PoolTooSmall {
            available: all_symbols.len(),
            rows,
        });
    }

    let mut columns = Vec::with_capacity(cols);
    for _ in 0..cols {
        let mut remaining = all_symbols.clone();
        let mut column = Vec::with_capacity(rows);
        for _ in 0..rows {
            let idx = rng.gen_range(0..remaining.len());
            column.push(remaining.swap_remove(idx));
        }
        columns.push(column);
    }
    Ok(Grid::from_columns(columns))
}

/// Pay every one of the first `lines` rows whose symbol is the same in all columns.
pub fn evaluate(grid: &Grid, lines: usize, bet_per_line: Credits, paytable: &Paytable) -> Payout {
    let mut payout = Payout::default();
    for line in 0..lines.min(grid.rows()) {
        let Some(symbol) = grid.symbol_at(0, line) else {
            continue;
        };
        if !grid.row(line).all(|s| s == symbol) {
            continue;
        }
        match paytable.multiplier(symbol) {
            Some(multiplier) => {
                payout.winnings = payout
                    .winnings
                    .saturating_add(multiplier.saturating_mul(bet_per_line));
                payout.winning_lines.push(line + 1);
            }
            None => warn!("symbol {symbol} lined up on line {} but has no value", line + 1),
        }
    }
    payout
}

/// A validated machine: dimensions, limits, pool and paytable that are known
/// to work together.
#[derive(Debug, Clone)]
pub struct Machine {
    config: MachineConfig,
    pool: SymbolPool,
    paytable: Paytable,
}

impl Machine {
    /// Machine with the fixed symbol set.
    pub fn new(config: MachineConfig) -> SlotResult<Self> {
        Self::with_symbols(config, SymbolPool::reference(), Paytable::reference())
    }

    pub fn with_symbols(
        config: MachineConfig,
        pool: SymbolPool,
        paytable: Paytable,
    ) -> SlotResult<Self> {
        config.validate(&pool, &paytable)?;
        info!(
            rows = config.rows,
            cols = config.cols,
            max_lines = config.max_lines,
            pool_size = pool.total(),
            "slot machine ready"
        );
        Ok(Self {
            config,
            pool,
            paytable,
        })
    }

    pub fn limits(&self) -> BetLimits {
        self.config.limits()
    }

    pub fn paytable(&self) -> &Paytable {
        &self.paytable
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> SlotResult<Grid> {
        generate_grid(self.config.rows, self.config.cols, &self.pool, rng)
    }

    pub fn evaluate(&self, grid: &Grid, bet: &Bet) -> Payout {
        evaluate(grid, bet.lines, bet.per_line, &self.paytable)
    }

    pub fn spin<R: Rng + ?Sized>(&self, rng: &mut R, bet: &Bet) -> SlotResult<SpinOutcome> {
        let grid = self.generate(rng)?;
        let payout = self.evaluate(&grid, bet);
        debug!(
            lines = bet.lines,
            per_line = bet.per_line,
            winnings = payout.winnings,
            winning_lines = ?payout.winning_lines,
            "spin\n{grid}"
        );
        Ok(SpinOutcome { grid, payout })
    }
}

/// Regenerate the grid of provably-fair spin `nonce`.
pub fn replay_grid(machine: &Machine, seed: &FairSeed, nonce: u64) -> SlotResult<Grid> {
    let mut rng = seed.rng_for(nonce);
    machine.generate(&mut rng)
}

/// Check that `claimed` is what the seeds produce for spin `nonce`.
pub fn verify_grid(
    machine: &Machine,
    seed: &FairSeed,
    nonce: u64,
    claimed: &[Vec<Symbol>],
) -> SlotResult<bool> {
    let grid = replay_grid(machine, seed, nonce)?;
    Ok(grid.columns() == claimed)
}
