use slotline_core::{Bet, FairSeed, Machine, MachineConfig, RngSource};

fn main() -> Result<(), slotline_core::SlotError> {
    // Example end-to-end spin
    let seed = FairSeed::new("example-server-seed", "example-client-seed");
    let mut source = RngSource::provably_fair(seed.clone());
    let machine = Machine::new(MachineConfig::default())?;
    let outcome = machine.spin(&mut source.next_rng(), &Bet::new(3, 10))?;
    println!(
        "server_seed_hash={} nonce={:?} winnings={} lines={:?}",
        seed.server_seed_hash_hex(),
        source.nonce(),
        outcome.payout.winnings,
        outcome.payout.winning_lines
    );
    print!("{}", outcome.grid);
    Ok(())
}
