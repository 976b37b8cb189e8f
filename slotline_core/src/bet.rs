use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::Credits;

/// Table limits for a single spin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BetLimits {
    pub max_lines: usize,
    pub min_bet: Credits,
    pub max_bet: Credits,
    pub max_deposit: Credits,
}

impl BetLimits {
    pub fn parse_deposit(&self, input: &str) -> Result<Credits, InputError> {
        match parse_amount(input)? {
            0 => Err(InputError::NonPositiveAmount),
            amount if amount > self.max_deposit => Err(InputError::DepositTooLarge {
                max_deposit: self.max_deposit,
            }),
            amount => Ok(amount),
        }
    }

    pub fn parse_lines(&self, input: &str) -> Result<usize, InputError> {
        let lines = parse_amount(input)?;
        match usize::try_from(lines) {
            Ok(lines) if (1..=self.max_lines).contains(&lines) => Ok(lines),
            _ => Err(InputError::LinesOutOfRange {
                max_lines: self.max_lines,
            }),
        }
    }

    pub fn parse_bet_per_line(&self, input: &str) -> Result<Credits, InputError> {
        let amount = parse_amount(input)?;
        if (self.min_bet..=self.max_bet).contains(&amount) {
            Ok(amount)
        } else {
            Err(InputError::BetOutOfRange {
                min_bet: self.min_bet,
                max_bet: self.max_bet,
            })
        }
    }

    pub fn check(&self, bet: &Bet) -> Result<(), InputError> {
        if !(1..=self.max_lines).contains(&bet.lines) {
            return Err(InputError::LinesOutOfRange {
                max_lines: self.max_lines,
            });
        }
        if !(self.min_bet..=self.max_bet).contains(&bet.per_line) {
            return Err(InputError::BetOutOfRange {
                min_bet: self.min_bet,
                max_bet: self.max_bet,
            });
        }
        Ok(())
    }

    /// Smallest stake that covers `lines` lines.
    pub fn min_stake(&self, lines: usize) -> Credits {
        (lines as Credits).saturating_mul(self.min_bet)
    }
}

/// Lines wagered and amount per line for one spin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bet {
    pub lines: usize,
    pub per_line: Credits,
}

impl Bet {
    pub fn new(lines: usize, per_line: Credits) -> Self {
        Self { lines, per_line }
    }

    pub fn stake(&self) -> Credits {
        (self.lines as Credits).saturating_mul(self.per_line)
    }

    /// Accept the bet only if the balance covers its stake.
    pub fn covered_by(self, balance: Credits) -> Result<Self, InputError> {
        let stake = self.stake();
        if stake > balance {
            return Err(InputError::InsufficientBalance { stake, balance });
        }
        Ok(self)
    }

    /// Balance after this bet pays `winnings`. Saturates rather than wrapping.
    pub fn settle(&self, balance: Credits, winnings: Credits) -> Credits {
        balance.saturating_sub(self.stake()).saturating_add(winnings)
    }
}

// Digits only: signs, decimals and values past u64 are all "not a number".
fn parse_amount(input: &str) -> Result<Credits, InputError> {
    let input = input.trim();
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::NotANumber);
    }
    input.parse().map_err(|_| InputError::NotANumber)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> BetLimits {
        BetLimits {
            max_lines: 3,
            min_bet: 1,
            max_bet: 100,
            max_deposit: 1_000_000,
        }
    }

    #[test]
    fn deposit_rejects_non_numeric_zero_and_negative() {
        let limits = limits();
        assert_eq!(limits.parse_deposit("abc"), Err(InputError::NotANumber));
        assert_eq!(limits.parse_deposit(""), Err(InputError::NotANumber));
        assert_eq!(limits.parse_deposit("-5"), Err(InputError::NotANumber));
        assert_eq!(limits.parse_deposit("+5"), Err(InputError::NotANumber));
        assert_eq!(limits.parse_deposit("1.5"), Err(InputError::NotANumber));
        assert_eq!(limits.parse_deposit("0"), Err(InputError::NonPositiveAmount));
        assert_eq!(limits.parse_deposit(" 250\n"), Ok(250));
    }

    #[test]
    fn huge_numbers_are_not_numbers() {
        assert_eq!(
            limits().parse_deposit("99999999999999999999999"),
            Err(InputError::NotANumber)
        );
    }

    #[test]
    fn deposit_above_cap_is_rejected() {
        let limits = limits();
        assert_eq!(limits.parse_deposit("1000000"), Ok(1_000_000));
        let err = limits.parse_deposit("18446744073709551615").unwrap_err();
        assert_eq!(
            err,
            InputError::DepositTooLarge {
                max_deposit: 1_000_000
            }
        );
        assert_eq!(err.to_string(), "Amount must be at most $1000000.");
    }

    #[test]
    fn settle_never_wraps() {
        let bet = Bet::new(1, 1);
        assert_eq!(bet.settle(100, 5), 104);
        assert_eq!(bet.settle(u64::MAX, 5), u64::MAX);
        assert_eq!(Bet::new(3, 10).settle(30, 0), 0);
    }

    #[test]
    fn lines_must_be_in_range() {
        let limits = limits();
        assert_eq!(limits.parse_lines("1"), Ok(1));
        assert_eq!(limits.parse_lines("3"), Ok(3));
        assert_eq!(
            limits.parse_lines("0"),
            Err(InputError::LinesOutOfRange { max_lines: 3 })
        );
        assert_eq!(
            limits.parse_lines("4"),
            Err(InputError::LinesOutOfRange { max_lines: 3 })
        );
        assert_eq!(limits.parse_lines("two"), Err(InputError::NotANumber));
    }

    #[test]
    fn bet_must_be_in_range() {
        let limits = limits();
        assert_eq!(limits.parse_bet_per_line("100"), Ok(100));
        let err = limits.parse_bet_per_line("101").unwrap_err();
        assert_eq!(err.to_string(), "Amount must be between $1 and $100.");
        assert_eq!(
            limits.parse_bet_per_line("0"),
            Err(InputError::BetOutOfRange {
                min_bet: 1,
                max_bet: 100
            })
        );
    }

    #[test]
    fn stake_must_be_covered() {
        let bet = Bet::new(3, 10);
        assert_eq!(bet.stake(), 30);
        assert_eq!(bet.covered_by(30), Ok(bet));
        let err = bet.covered_by(29).unwrap_err();
        assert_eq!(
            err.to_string(),
            "You do not have enough to bet that amount. Your current balance is: $29"
        );
    }

    #[test]
    fn check_rejects_out_of_range_bets() {
        let limits = limits();
        assert!(limits.check(&Bet::new(2, 50)).is_ok());
        assert!(limits.check(&Bet::new(0, 50)).is_err());
        assert!(limits.check(&Bet::new(2, 500)).is_err());
        assert_eq!(limits.min_stake(3), 3);
    }
}
