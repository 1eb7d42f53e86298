//! Scripted opponent policy
//!
//! A greedy, one-decision-per-unit policy: attack when something is in
//! range, otherwise take a single step toward an unowned control point or,
//! failing that, toward the nearest enemy. No lookahead, no coordination
//! between units, no retreating. Rejected actions are simply skipped; a
//! unit that cannot act this turn does nothing.

use crate::actions::Event;
use crate::board::Coord;
use crate::state::MatchState;
use crate::units::{Player, UnitId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Play one full turn for `player`. Units act once each, in shuffled
/// order; the rng is the only source of non-determinism, so a seeded rng
/// reproduces the turn exactly.
pub fn take_turn<R: Rng>(state: &mut MatchState, player: Player, rng: &mut R) -> Vec<Event> {
    let mut events = Vec::new();

    let mut unit_ids: Vec<UnitId> = state
        .units_for(player)
        .filter(|u| !u.is_core())
        .map(|u| u.id)
        .collect();
    unit_ids.sort();
    unit_ids.shuffle(rng);

    for id in unit_ids {
        if state.is_over() {
            break;
        }
        act_with_unit(state, player, id, &mut events);
    }

    events
}

/// Apply the priority list for one unit: attack first, else one greedy step.
fn act_with_unit(state: &mut MatchState, player: Player, id: UnitId, events: &mut Vec<Event>) {
    let Some(unit) = state.unit(id).copied() else {
        return;
    };

    // Priority 1: attack the first target in range, then stop for the turn
    if unit.ap_remaining > 0 && unit.atk > 0 {
        let in_range = state.attackable_hexes(id);
        // Coordinate order keeps seeded turns reproducible; no scoring
        if let Some(&hex) = in_range.iter().min() {
            if let Some(target) = state.unit_at(hex).map(|u| u.id) {
                if let Ok(outcome) = state.attack(id, target) {
                    events.extend(outcome);
                    return;
                }
            }
        }
    }

    // Priority 2: one greedy step toward an objective
    if unit.mv_remaining == 0 {
        return;
    }
    let origin = unit.pos;

    // Prefer the nearest control point this side does not already own,
    // when it lies within remaining movement by straight-line distance
    let objective = nearest_unowned_control_point(state, player, origin);

    let step = match objective {
        Some((goal, dist)) if dist <= unit.mv_remaining => {
            step_minimizing_distance(state, origin, goal)
        }
        _ => match nearest_enemy(state, player, origin) {
            Some((goal, dist)) if dist > 0 => step_with_best_reduction(state, origin, goal, dist),
            _ => None,
        },
    };

    if let Some(to) = step {
        if let Ok(outcome) = state.move_unit(id, to) {
            events.extend(outcome);
        }
    }
}

fn nearest_unowned_control_point(
    state: &MatchState,
    player: Player,
    from: Coord,
) -> Option<(Coord, u32)> {
    let mut best: Option<(Coord, u32)> = None;
    for (point, owner) in state.control_points() {
        if owner == Some(player) {
            continue;
        }
        let Some(dist) = from.distance_to(point) else {
            continue;
        };
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((point, dist));
        }
    }
    best
}

fn nearest_enemy(state: &MatchState, player: Player, from: Coord) -> Option<(Coord, u32)> {
    let mut positions: Vec<Coord> = state
        .units_for(player.opponent())
        .map(|u| u.pos)
        .collect();
    positions.sort();

    let mut best: Option<(Coord, u32)> = None;
    for pos in positions {
        let Some(dist) = from.distance_to(pos) else {
            continue;
        };
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((pos, dist));
        }
    }
    best
}

/// The empty neighbor closest to `goal`
fn step_minimizing_distance(state: &MatchState, origin: Coord, goal: Coord) -> Option<Coord> {
    let mut best: Option<(Coord, u32)> = None;
    for neighbor in origin.neighbors() {
        if state.unit_at(neighbor).is_some() {
            continue;
        }
        let Some(dist) = neighbor.distance_to(goal) else {
            continue;
        };
        if best.map_or(true, |(_, d)| dist < d) {
            best = Some((neighbor, dist));
        }
    }
    best.map(|(coord, _)| coord)
}

/// The empty neighbor with the largest non-negative distance reduction
/// toward `goal`; a worsening step is never taken
fn step_with_best_reduction(
    state: &MatchState,
    origin: Coord,
    goal: Coord,
    current_dist: u32,
) -> Option<Coord> {
    let mut best_step = None;
    let mut best_reduction: i64 = -1;
    for neighbor in origin.neighbors() {
        if state.unit_at(neighbor).is_some() {
            continue;
        }
        let Some(dist) = neighbor.distance_to(goal) else {
            continue;
        };
        let reduction = current_dist as i64 - dist as i64;
        if reduction > best_reduction {
            best_reduction = reduction;
            best_step = Some(neighbor);
        }
    }
    best_step
}
