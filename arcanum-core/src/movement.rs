//! Movement and targeting queries
//!
//! All three queries are pure: they recompute from current occupancy and
//! per-unit resources on every call, so callers never hold stale sets.

use crate::board::Coord;
use crate::cards::SUMMON_RADIUS;
use crate::state::MatchState;
use crate::units::{Player, UnitId};
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

impl MatchState {
    /// Hexes the unit can move to: cost-bounded BFS from its position where
    /// every occupied cell (friend or foe) is impassable. The origin is
    /// excluded. Empty for an unknown id, an immobile core, or a unit out
    /// of movement.
    pub fn reachable_hexes(&self, id: UnitId) -> FxHashSet<Coord> {
        let mut reachable = FxHashSet::default();
        let unit = match self.unit(id) {
            Some(u) if !u.is_core() && u.mv_remaining > 0 => *u,
            _ => return reachable,
        };

        let budget = unit.mv_remaining;
        let mut best_cost: FxHashMap<Coord, u32> = FxHashMap::default();
        best_cost.insert(unit.pos, 0);
        let mut queue = VecDeque::new();
        queue.push_back((unit.pos, 0u32));

        while let Some((current, cost)) = queue.pop_front() {
            if cost == budget {
                continue;
            }
            for neighbor in current.neighbors() {
                if self.unit_at(neighbor).is_some() {
                    continue;
                }
                let next_cost = cost + 1;
                match best_cost.get(&neighbor) {
                    Some(&known) if known <= next_cost => continue,
                    _ => {}
                }
                best_cost.insert(neighbor, next_cost);
                reachable.insert(neighbor);
                queue.push_back((neighbor, next_cost));
            }
        }

        reachable
    }

    /// Cells occupied by enemy units within the unit's attack range. Empty
    /// for an unknown id, a core, a unit without action points, or a unit
    /// with no attack power.
    pub fn attackable_hexes(&self, id: UnitId) -> FxHashSet<Coord> {
        let mut targets = FxHashSet::default();
        let unit = match self.unit(id) {
            Some(u) if !u.is_core() && u.ap_remaining > 0 && u.atk > 0 => *u,
            _ => return targets,
        };

        for enemy in self.units_for(unit.owner.opponent()) {
            if let Some(dist) = unit.pos.distance_to(enemy.pos) {
                if dist <= unit.range {
                    targets.insert(enemy.pos);
                }
            }
        }

        targets
    }

    /// Empty cells where this player may summon: within SUMMON_RADIUS of
    /// their core. Empty if the core has been destroyed.
    pub fn valid_summon_hexes(&self, player: Player) -> FxHashSet<Coord> {
        let mut hexes = FxHashSet::default();
        let core_pos = match self.core_of(player) {
            Some(core) => core.pos,
            None => return hexes,
        };

        for cell in Coord::all() {
            if self.unit_at(cell).is_some() {
                continue;
            }
            if let Some(dist) = core_pos.distance_to(cell) {
                if dist <= SUMMON_RADIUS {
                    hexes.insert(cell);
                }
            }
        }

        hexes
    }
}
