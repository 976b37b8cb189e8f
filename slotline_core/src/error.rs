use crate::symbols::Symbol;
use crate::Credits;

/// Machine setup failures. These are fatal and surface before the first spin.
#[derive(thiserror::Error, Debug)]
pub enum SlotError {
    #[error("grid must have at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },
    #[error("max_lines must be between 1 and the row count {rows} (got {max_lines})")]
    InvalidLines { max_lines: usize, rows: usize },
    #[error("invalid bet range: min_bet {min_bet} must be positive and not above max_bet {max_bet}")]
    InvalidBetRange { min_bet: Credits, max_bet: Credits },
    #[error("max_deposit must be positive")]
    InvalidDeposit,
    #[error("symbol pool holds {available} copies but a column needs {rows}")]
    PoolTooSmall { available: usize, rows: usize },
    #[error("symbol {0} has a pool count of zero")]
    ZeroCount(Symbol),
    #[error("symbol {0} has no paytable value")]
    MissingValue(Symbol),
    #[error("maximum payout for this configuration overflows")]
    PayoutOverflow,
    #[error("failed to load configuration: {0}")]
    Config(#[from] config::ConfigError),
}

/// Rejected player input. The display text is what the player is shown before
/// being asked again.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a number.")]
    NotANumber,
    #[error("Amount must be greater than 0.")]
    NonPositiveAmount,
    #[error("Amount must be at most ${max_deposit}.")]
    DepositTooLarge { max_deposit: Credits },
    #[error("Enter a valid number of lines.")]
    LinesOutOfRange { max_lines: usize },
    #[error("Amount must be between ${min_bet} and ${max_bet}.")]
    BetOutOfRange { min_bet: Credits, max_bet: Credits },
    #[error("You do not have enough to bet that amount. Your current balance is: ${balance}")]
    InsufficientBalance { stake: Credits, balance: Credits },
}

pub type SlotResult<T> = Result<T, SlotError>;
