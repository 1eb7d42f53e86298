//! Match state: the single mutable root owned by the engine

use crate::board::{Coord, CONTROL_POINTS};
use crate::cards::CardId;
use crate::units::{Player, Unit, UnitId, UnitKindId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// How a finished match was won
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VictoryReason {
    CoreDestroyed,
    ControlPoints,
}

/// Match result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    Ongoing,
    Won {
        winner: Player,
        reason: VictoryReason,
    },
}

/// An action that has been started but still needs a target before it
/// commits. Discarding it is the only cancellation concept in the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingAction {
    /// A summon card awaiting its destination hex
    SummonTarget { card: CardId },
}

/// Match state (clone to snapshot)
///
/// All mutation goes through the resolver operations in `actions` and the
/// turn machinery in `turn`; everything here is queries and bookkeeping.
#[derive(Clone, Debug)]
pub struct MatchState {
    /// Units by id (sparse board representation)
    pub(crate) units: FxHashMap<UnitId, Unit>,

    /// Next id to assign (monotone within the match)
    pub(crate) next_unit_id: u32,

    /// Mana pools, indexed by Player::index
    pub(crate) mana: [u32; 2],

    /// Hands (ordered), indexed by Player::index
    pub(crate) hands: [Vec<CardId>; 2],

    pub(crate) current_player: Player,
    pub(crate) turn: u32,

    /// Control-point owners, parallel to board::CONTROL_POINTS
    pub(crate) control: [Option<Player>; 3],

    pub(crate) result: MatchResult,

    /// Two-phase action awaiting its target, if any
    pub(crate) pending: Option<PendingAction>,
}

impl MatchState {
    // ========================================================================
    // CONSTRUCTION
    // ========================================================================

    /// Create a match from unit placements. Player one's starting hand and
    /// both sides' starting mana come from the scenario; player one acts
    /// first.
    pub fn new(
        player_one: &[(UnitKindId, Coord)],
        player_two: &[(UnitKindId, Coord)],
        starting_mana: u32,
        starting_hand: &[CardId],
    ) -> Self {
        let mut state = Self {
            units: FxHashMap::default(),
            next_unit_id: 0,
            mana: [starting_mana, starting_mana],
            hands: [starting_hand.to_vec(), Vec::new()],
            current_player: Player::One,
            turn: 1,
            control: [None; 3],
            result: MatchResult::Ongoing,
            pending: None,
        };

        for &(kind, pos) in player_one {
            state.place_unit(kind, Player::One, pos);
        }
        for &(kind, pos) in player_two {
            state.place_unit(kind, Player::Two, pos);
        }

        state.recompute_control();
        state
    }

    pub(crate) fn place_unit(&mut self, kind: UnitKindId, owner: Player, pos: Coord) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        self.units.insert(id, Unit::new(id, kind, owner, pos));
        id
    }

    pub(crate) fn place_summoned_unit(
        &mut self,
        kind: UnitKindId,
        owner: Player,
        pos: Coord,
    ) -> UnitId {
        let id = UnitId(self.next_unit_id);
        self.next_unit_id += 1;
        self.units.insert(id, Unit::summoned(id, kind, owner, pos));
        id
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn result(&self) -> MatchResult {
        self.result
    }

    pub fn is_over(&self) -> bool {
        self.result != MatchResult::Ongoing
    }

    pub fn winner(&self) -> Option<Player> {
        match self.result {
            MatchResult::Ongoing => None,
            MatchResult::Won { winner, .. } => Some(winner),
        }
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Get the unit standing on a cell, if any
    pub fn unit_at(&self, pos: Coord) -> Option<&Unit> {
        self.units.values().find(|u| u.pos == pos)
    }

    /// Iterate all units on the board
    pub fn units(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// Iterate one player's units
    pub fn units_for(&self, player: Player) -> impl Iterator<Item = &Unit> {
        self.units.values().filter(move |u| u.owner == player)
    }

    /// A player's core, if it still stands
    pub fn core_of(&self, player: Player) -> Option<&Unit> {
        self.units
            .values()
            .find(|u| u.owner == player && u.is_core())
    }

    pub fn mana(&self, player: Player) -> u32 {
        self.mana[player.index()]
    }

    pub fn hand(&self, player: Player) -> &[CardId] {
        &self.hands[player.index()]
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    /// Current control-point ownership, one entry per control point
    pub fn control_points(&self) -> [(Coord, Option<Player>); 3] {
        [
            (CONTROL_POINTS[0], self.control[0]),
            (CONTROL_POINTS[1], self.control[1]),
            (CONTROL_POINTS[2], self.control[2]),
        ]
    }

    /// Does this player own every control point?
    pub fn controls_all(&self, player: Player) -> bool {
        self.control.iter().all(|&c| c == Some(player))
    }

    // ========================================================================
    // INTERNAL MUTATION (used by the resolver and turn machinery)
    // ========================================================================

    pub(crate) fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(&id)
    }

    pub(crate) fn remove_unit(&mut self, id: UnitId) -> Option<Unit> {
        self.units.remove(&id)
    }

    /// Recompute control-point ownership from occupancy: the sole occupant
    /// of a point owns it, an empty or both-occupied point is owned by
    /// neither.
    pub(crate) fn recompute_control(&mut self) {
        for (i, &point) in CONTROL_POINTS.iter().enumerate() {
            let mut owners = self.units.values().filter(|u| u.pos == point).map(|u| u.owner);
            self.control[i] = match owners.next() {
                Some(first) if owners.all(|o| o == first) => Some(first),
                _ => None,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CONTROL_POINTS;
    use crate::units::{KIND_CORE, KIND_GUARDIAN, KIND_SCOUT};

    fn bare_state() -> MatchState {
        MatchState::new(
            &[(KIND_CORE, Coord::new(5, 13))],
            &[(KIND_CORE, Coord::new(5, 1))],
            3,
            &[],
        )
    }

    #[test]
    fn test_ids_are_monotone() {
        let state = MatchState::new(
            &[(KIND_CORE, Coord::new(5, 13)), (KIND_SCOUT, Coord::new(6, 12))],
            &[(KIND_CORE, Coord::new(5, 1))],
            3,
            &[],
        );
        let mut ids: Vec<u32> = state.units().map(|u| u.id.0).collect();
        ids.sort();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn test_unit_at() {
        let state = bare_state();
        assert!(state.unit_at(Coord::new(5, 13)).is_some());
        assert!(state.unit_at(Coord::new(5, 7)).is_none());
    }

    #[test]
    fn test_core_of() {
        let state = bare_state();
        assert_eq!(state.core_of(Player::One).unwrap().pos, Coord::new(5, 13));
        assert_eq!(state.core_of(Player::Two).unwrap().pos, Coord::new(5, 1));
    }

    #[test]
    fn test_control_sole_occupant_owns() {
        let mut state = MatchState::new(
            &[(KIND_CORE, Coord::new(5, 13)), (KIND_GUARDIAN, CONTROL_POINTS[0])],
            &[(KIND_CORE, Coord::new(5, 1))],
            3,
            &[],
        );
        state.recompute_control();
        assert_eq!(state.control_points()[0].1, Some(Player::One));
        assert_eq!(state.control_points()[1].1, None);
        assert_eq!(state.control_points()[2].1, None);
        assert!(!state.controls_all(Player::One));
    }

    #[test]
    fn test_controls_all() {
        let mut state = MatchState::new(
            &[(KIND_CORE, Coord::new(5, 13))],
            &[
                (KIND_CORE, Coord::new(5, 1)),
                (KIND_GUARDIAN, CONTROL_POINTS[0]),
                (KIND_GUARDIAN, CONTROL_POINTS[1]),
                (KIND_GUARDIAN, CONTROL_POINTS[2]),
            ],
            3,
            &[],
        );
        state.recompute_control();
        assert!(state.controls_all(Player::Two));
        assert!(!state.controls_all(Player::One));
    }
}
