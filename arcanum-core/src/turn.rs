//! Turn sequencing and victory evaluation
//!
//! The loop is AwaitingHumanAction -> TurnEnding -> OpponentActing ->
//! AwaitingHumanAction, with the match result absorbing from any point.
//! The scripted side's whole turn resolves inside one `end_turn` call, so
//! a caller only ever observes the state between human turns.

use crate::actions::{ActionError, Event};
use crate::ai;
use crate::cards::{CardId, CARDS, HAND_LIMIT};
use crate::state::{MatchResult, MatchState, VictoryReason};
use crate::units::Player;
use rand::Rng;

impl MatchState {
    /// End the acting player's turn. Runs turn-start processing for the
    /// next player; when that player is the scripted side, its entire turn
    /// (policy, then the hand-back to the human side) resolves here too.
    /// Returns the full event trace of everything that happened.
    pub fn end_turn<R: Rng>(&mut self, rng: &mut R) -> Result<Vec<Event>, ActionError> {
        if self.is_over() {
            return Err(ActionError::MatchOver);
        }

        let mut events = Vec::new();
        self.finish_turn(&mut events);
        self.start_turn(rng, &mut events);

        if self.current_player == Player::Two && !self.is_over() {
            events.extend(ai::take_turn(self, Player::Two, rng));
            self.finish_turn(&mut events);
            self.start_turn(rng, &mut events);
        }

        Ok(events)
    }

    /// Turn-end processing: settle control points, drop any pending
    /// two-phase action, hand the turn to the other player.
    fn finish_turn(&mut self, events: &mut Vec<Event>) {
        self.recompute_control();
        self.pending = None;
        events.push(Event::TurnEnded {
            player: self.current_player,
            turn: self.turn,
        });
        self.current_player = self.current_player.opponent();
        self.turn += 1;
    }

    /// Turn-start processing for the now-current player.
    ///
    /// The control-point victory is evaluated for the player who is NOT
    /// about to act: if they already hold all three points, the match ends
    /// in their favor before the acting player does anything. This
    /// one-turn-delay ordering is deliberate.
    fn start_turn<R: Rng>(&mut self, rng: &mut R, events: &mut Vec<Event>) {
        self.recompute_control();

        let acting = self.current_player;
        let other = acting.opponent();
        if self.controls_all(other) {
            self.result = MatchResult::Won {
                winner: other,
                reason: VictoryReason::ControlPoints,
            };
            events.push(Event::MatchEnded {
                winner: other,
                reason: VictoryReason::ControlPoints,
            });
            return;
        }

        self.mana[acting.index()] += 1;
        events.push(Event::TurnStarted {
            player: acting,
            turn: self.turn,
        });

        // Only the human side draws from the pool
        if acting == Player::One && self.hands[acting.index()].len() < HAND_LIMIT {
            let card = rng.gen_range(0..CARDS.len()) as CardId;
            self.hands[acting.index()].push(card);
            events.push(Event::CardsDrawn {
                player: acting,
                cards: vec![card],
            });
        }

        for unit in self.units.values_mut() {
            if unit.owner == acting {
                unit.mv_remaining = unit.max_mv;
                unit.ap_remaining = 1;
            }
        }
    }
}
