//! Interactive play loop: deposit, bet, spin, repeat.

use std::io::{BufRead, Write};

use anyhow::Result;
use slotline_core::{Bet, Credits, InputError, Machine, RngSource};
use tracing::debug;

/// One player's visit to the machine. Owns the balance for its lifetime.
pub struct Session<'m, R, W> {
    machine: &'m Machine,
    source: RngSource,
    input: R,
    output: W,
    balance: Credits,
}

impl<'m, R: BufRead, W: Write> Session<'m, R, W> {
    pub fn new(machine: &'m Machine, source: RngSource, input: R, output: W) -> Self {
        Self {
            machine,
            source,
            input,
            output,
            balance: 0,
        }
    }

    /// Play until the player quits, runs out of funds or closes input.
    /// Returns the balance the player leaves with.
    pub fn run(&mut self) -> Result<Credits> {
        writeln!(self.output, "Welcome to the Slot Machine Game!")?;
        let limits = self.machine.limits();
        if let Some(deposit) = self.ask("What would you like to deposit? $", |s| {
            limits.parse_deposit(s)
        })? {
            self.balance = deposit;
            self.play()?;
        }
        writeln!(self.output, "\nYou left with ${}", self.balance)?;
        writeln!(self.output, "Thank you for playing!")?;
        Ok(self.balance)
    }

    fn play(&mut self) -> Result<()> {
        let min_bet = self.machine.limits().min_bet;
        loop {
            writeln!(self.output, "\nCurrent balance is ${}", self.balance)?;
            if self.balance < min_bet {
                writeln!(self.output, "You are out of funds.")?;
                return Ok(());
            }
            match self.prompt("Press enter to play (q to quit): ")? {
                Some(answer) if answer.trim_end_matches(&['\r', '\n'][..]) != "q" => {}
                _ => return Ok(()),
            }
            if !self.spin()? {
                return Ok(());
            }
        }
    }

    /// Returns `false` when input ran out before the bet was placed.
    fn spin(&mut self) -> Result<bool> {
        let Some(bet) = self.place_bet()? else {
            return Ok(false);
        };
        let stake = bet.stake();
        writeln!(
            self.output,
            "You are betting ${} on {} lines. Total bet is equal to: ${}",
            bet.per_line, bet.lines, stake
        )?;

        let mut rng = self.source.next_rng();
        let outcome = self.machine.spin(&mut rng, &bet)?;
        writeln!(self.output, "Slot Machine:")?;
        write!(self.output, "{}", outcome.grid)?;

        let payout = outcome.payout;
        writeln!(self.output, "\nYou won ${}.", payout.winnings)?;
        if payout.is_win() {
            let lines: Vec<String> = payout.winning_lines.iter().map(|l| l.to_string()).collect();
            writeln!(self.output, "You won on lines: {}", lines.join(" "))?;
        } else {
            writeln!(self.output, "No winning lines.")?;
        }

        self.balance = bet.settle(self.balance, payout.winnings);
        debug!(
            nonce = ?self.source.nonce(),
            stake,
            winnings = payout.winnings,
            balance = self.balance,
            "spin settled"
        );
        Ok(true)
    }

    fn place_bet(&mut self) -> Result<Option<Bet>> {
        let limits = self.machine.limits();
        let lines_prompt = format!(
            "Enter the number of lines to bet on (1-{}): ",
            limits.max_lines
        );
        let lines = loop {
            let Some(lines) = self.ask(&lines_prompt, |s| limits.parse_lines(s))? else {
                return Ok(None);
            };
            let stake = limits.min_stake(lines);
            if stake <= self.balance {
                break lines;
            }
            let err = InputError::InsufficientBalance {
                stake,
                balance: self.balance,
            };
            writeln!(self.output, "{err}")?;
        };

        let bet_prompt = format!(
            "What would you like to bet on each line? ${} - ${}: ",
            limits.min_bet, limits.max_bet
        );
        loop {
            let Some(per_line) = self.ask(&bet_prompt, |s| limits.parse_bet_per_line(s))? else {
                return Ok(None);
            };
            match Bet::new(lines, per_line).covered_by(self.balance) {
                Ok(bet) => return Ok(Some(bet)),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    /// Prompt until `parse` accepts the answer. `None` once input is exhausted.
    fn ask<T>(
        &mut self,
        text: &str,
        parse: impl Fn(&str) -> Result<T, InputError>,
    ) -> Result<Option<T>> {
        loop {
            let Some(line) = self.prompt(text)? else {
                return Ok(None);
            };
            match parse(&line) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => writeln!(self.output, "{err}")?,
            }
        }
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
