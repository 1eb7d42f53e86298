//! Auto-played demo match
//!
//! Drives both seats with the scripted policy so a whole match can be
//! watched from the terminal. The seed fixes every draw and every shuffled
//! unit order, so the same seed replays the same match.

use anyhow::Result;
use arcanum_core::{
    ai,
    board::{Coord, CONTROL_POINTS, MAX_ROW, MIN_ROW, NUM_COLS},
    state::MatchState,
    units::{get_unit_kind, Player},
    Event, Scenario,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::Path;

pub fn run(seed: u64, max_rounds: u32, scenario: Option<&Path>) -> Result<()> {
    let scenario = match scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    tracing::info!(name = %scenario.name, seed, "starting demo match");

    let mut state = scenario.to_match_state();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    println!("Round 0:");
    print_board(&state);

    for round in 1..=max_rounds {
        if state.is_over() {
            break;
        }

        // The human seat is scripted too in a demo
        let mut events = ai::take_turn(&mut state, Player::One, &mut rng);
        if !state.is_over() {
            events.extend(
                state
                    .end_turn(&mut rng)
                    .map_err(|e| anyhow::anyhow!("turn sequencing failed: {e}"))?,
            );
        }
        for event in &events {
            log_event(event);
        }

        println!("Round {round}:");
        print_board(&state);
    }

    match state.winner() {
        Some(winner) => println!("Match over: {winner} wins"),
        None => println!("Match still undecided after {max_rounds} rounds"),
    }
    Ok(())
}

/// Rows from the top down, columns A-K. Player one's units print in
/// uppercase, player two's in lowercase, unclaimed control points as '*'.
fn print_board(state: &MatchState) {
    let header: String = (b'A'..b'A' + NUM_COLS).map(|c| format!(" {}", c as char)).collect();
    println!("   {header}");
    for row in (MIN_ROW..=MAX_ROW).rev() {
        print!("{row:>2} ");
        for col in 0..NUM_COLS {
            let cell = Coord::new(col, row);
            let glyph = match state.unit_at(cell) {
                Some(unit) => {
                    let initial = get_unit_kind(unit.kind)
                        .id
                        .chars()
                        .next()
                        .unwrap_or('?');
                    match unit.owner {
                        Player::One => initial.to_ascii_uppercase(),
                        Player::Two => initial.to_ascii_lowercase(),
                    }
                }
                None if CONTROL_POINTS.contains(&cell) => '*',
                None => '.',
            };
            print!(" {glyph}");
        }
        println!();
    }
    println!(
        "   mana: {} / {}   units: {} / {}",
        state.mana(Player::One),
        state.mana(Player::Two),
        state.units_for(Player::One).count(),
        state.units_for(Player::Two).count(),
    );
}

fn log_event(event: &Event) {
    match event {
        Event::Moved { unit, from, to, cost } => {
            tracing::info!(%unit, %from, %to, cost, "moved")
        }
        Event::Attacked { attacker, target, damage } => {
            tracing::info!(%attacker, %target, damage, "attacked")
        }
        Event::Destroyed { unit, at, .. } => tracing::info!(%unit, %at, "destroyed"),
        Event::TurnStarted { player, turn } => tracing::debug!(%player, turn, "turn started"),
        Event::TurnEnded { player, turn } => tracing::debug!(%player, turn, "turn ended"),
        Event::MatchEnded { winner, .. } => tracing::info!(%winner, "match ended"),
        other => tracing::debug!(?other, "event"),
    }
}
