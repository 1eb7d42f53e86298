//! Action resolver: move, attack, summon, and spell operations
//!
//! Every operation is atomic: it either validates fully and applies, or
//! rejects with an [`ActionError`] and leaves the state untouched. Results
//! carry structured [`Event`]s so a caller can render what happened without
//! the core formatting any text.

use crate::board::Coord;
use crate::cards::{
    get_card, CardId, CardKind, SpellEffect, CARDS, DRAW_COUNT, HAND_LIMIT, PULSE_DAMAGE,
    PULSE_RANGE, SHIELD_HEAL, SUMMON_RADIUS,
};
use crate::state::{MatchResult, MatchState, PendingAction, VictoryReason};
use crate::units::{Player, UnitId, UnitKindId};
use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an operation was rejected. The state is unchanged after any of these.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("no such entity: {0}")]
    NoSuchEntity(String),

    #[error("not controlled by the acting player: {0}")]
    NotOwned(String),

    #[error("invalid target: {0}")]
    InvalidTarget(String),

    #[error("insufficient {resource}: need {needed}, have {available}")]
    InsufficientResource {
        resource: &'static str,
        needed: u32,
        available: u32,
    },

    #[error("{0}")]
    IllegalUnitRole(String),

    #[error("hand is full")]
    HandFull,

    #[error("the match is already over")]
    MatchOver,
}

/// A fact about what an operation did, for the caller to render
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Moved {
        unit: UnitId,
        from: Coord,
        to: Coord,
        cost: u32,
    },
    Attacked {
        attacker: UnitId,
        target: UnitId,
        damage: i32,
    },
    SpellDamage {
        caster: Player,
        target: UnitId,
        damage: i32,
    },
    Healed {
        unit: UnitId,
        amount: i32,
    },
    Destroyed {
        unit: UnitId,
        kind: UnitKindId,
        at: Coord,
    },
    CardPlayed {
        player: Player,
        card: CardId,
    },
    CardsDrawn {
        player: Player,
        cards: Vec<CardId>,
    },
    Summoned {
        unit: UnitId,
        kind: UnitKindId,
        at: Coord,
    },
    Relocated {
        unit: UnitId,
        from: Coord,
        to: Coord,
    },
    TurnStarted {
        player: Player,
        turn: u32,
    },
    TurnEnded {
        player: Player,
        turn: u32,
    },
    MatchEnded {
        winner: Player,
        reason: VictoryReason,
    },
}

impl MatchState {
    fn ensure_ongoing(&self) -> Result<(), ActionError> {
        if self.is_over() {
            Err(ActionError::MatchOver)
        } else {
            Ok(())
        }
    }

    // ========================================================================
    // MOVE
    // ========================================================================

    /// Move a unit of the acting player to an empty cell within its
    /// remaining movement. The cost charged is the straight BFS distance,
    /// not a path cost around other units.
    pub fn move_unit(&mut self, id: UnitId, target: Coord) -> Result<Vec<Event>, ActionError> {
        self.ensure_ongoing()?;

        let unit = *self
            .unit(id)
            .ok_or_else(|| ActionError::NoSuchEntity(format!("unit {id}")))?;
        if unit.owner != self.current_player {
            return Err(ActionError::NotOwned(format!(
                "unit {id} belongs to {}",
                unit.owner
            )));
        }
        if unit.is_core() {
            return Err(ActionError::IllegalUnitRole("the core is immobile".into()));
        }
        if unit.mv_remaining == 0 {
            return Err(ActionError::InsufficientResource {
                resource: "movement",
                needed: 1,
                available: 0,
            });
        }
        if !target.is_valid() {
            return Err(ActionError::InvalidTarget(format!(
                "{target} is off the board"
            )));
        }
        if let Some(occupant) = self.unit_at(target) {
            return Err(ActionError::InvalidTarget(format!(
                "{target} is occupied by unit {}",
                occupant.id
            )));
        }
        let cost = unit
            .pos
            .distance_to(target)
            .ok_or_else(|| ActionError::InvalidTarget(format!("{target} is unreachable")))?;
        if cost > unit.mv_remaining {
            return Err(ActionError::InsufficientResource {
                resource: "movement",
                needed: cost,
                available: unit.mv_remaining,
            });
        }

        let from = unit.pos;
        if let Some(u) = self.unit_mut(id) {
            u.pos = target;
            u.mv_remaining -= cost;
        }
        self.recompute_control();

        Ok(vec![Event::Moved {
            unit: id,
            from,
            to: target,
            cost,
        }])
    }

    // ========================================================================
    // ATTACK
    // ========================================================================

    /// Attack an enemy unit within range, spending one action point.
    /// Destroying the enemy core ends the match immediately.
    pub fn attack(&mut self, attacker_id: UnitId, target_id: UnitId) -> Result<Vec<Event>, ActionError> {
        self.ensure_ongoing()?;

        let attacker = *self
            .unit(attacker_id)
            .ok_or_else(|| ActionError::NoSuchEntity(format!("unit {attacker_id}")))?;
        let target = *self
            .unit(target_id)
            .ok_or_else(|| ActionError::NoSuchEntity(format!("unit {target_id}")))?;

        if attacker.owner != self.current_player {
            return Err(ActionError::NotOwned(format!(
                "unit {attacker_id} belongs to {}",
                attacker.owner
            )));
        }
        if attacker.is_core() {
            return Err(ActionError::IllegalUnitRole("the core cannot attack".into()));
        }
        if target_id == attacker_id || target.owner == attacker.owner {
            return Err(ActionError::InvalidTarget(format!(
                "unit {target_id} is not an enemy"
            )));
        }
        if attacker.ap_remaining == 0 {
            return Err(ActionError::InsufficientResource {
                resource: "action points",
                needed: 1,
                available: 0,
            });
        }
        match attacker.pos.distance_to(target.pos) {
            Some(dist) if dist <= attacker.range => {}
            _ => {
                return Err(ActionError::InvalidTarget(format!(
                    "unit {target_id} is out of range {}",
                    attacker.range
                )))
            }
        }

        let damage = attacker.atk;
        if let Some(a) = self.unit_mut(attacker_id) {
            a.ap_remaining -= 1;
        }
        let mut events = vec![Event::Attacked {
            attacker: attacker_id,
            target: target_id,
            damage,
        }];
        self.deal_damage(target_id, damage, &mut events);
        self.recompute_control();

        Ok(events)
    }

    /// Subtract hp and handle destruction, including the immediate
    /// destruction victory when a core falls.
    fn deal_damage(&mut self, target_id: UnitId, damage: i32, events: &mut Vec<Event>) {
        let destroyed = match self.unit_mut(target_id) {
            Some(target) => {
                target.hp -= damage;
                target.hp <= 0
            }
            None => false,
        };

        if destroyed {
            if let Some(dead) = self.remove_unit(target_id) {
                events.push(Event::Destroyed {
                    unit: dead.id,
                    kind: dead.kind,
                    at: dead.pos,
                });
                if dead.is_core() {
                    let winner = dead.owner.opponent();
                    self.result = MatchResult::Won {
                        winner,
                        reason: VictoryReason::CoreDestroyed,
                    };
                    events.push(Event::MatchEnded {
                        winner,
                        reason: VictoryReason::CoreDestroyed,
                    });
                }
            }
        }
    }

    // ========================================================================
    // TWO-PHASE SUMMON
    // ========================================================================

    /// First phase of a summon: check the card is playable and enter
    /// targeting mode. Returns the hexes the second phase will accept.
    pub fn begin_summon(&mut self, card: CardId) -> Result<FxHashSet<Coord>, ActionError> {
        self.ensure_ongoing()?;
        let player = self.current_player;

        self.require_in_hand(player, card)?;
        let template = get_card(card);
        if !matches!(template.kind, CardKind::Summon(_)) {
            return Err(ActionError::InvalidTarget(format!(
                "{} is not a summon card",
                template.name
            )));
        }
        self.require_mana(player, template.cost)?;

        self.pending = Some(PendingAction::SummonTarget { card });
        Ok(self.valid_summon_hexes(player))
    }

    /// Second phase: commit the pending summon onto `target`. The new unit
    /// arrives with summoning sickness (no movement or action points).
    pub fn complete_summon(&mut self, target: Coord) -> Result<Vec<Event>, ActionError> {
        self.ensure_ongoing()?;
        let player = self.current_player;

        let card = match self.pending {
            Some(PendingAction::SummonTarget { card }) => card,
            None => {
                return Err(ActionError::InvalidTarget(
                    "no summon is awaiting a target".into(),
                ))
            }
        };

        let hand_slot = self.require_in_hand(player, card)?;
        let template = get_card(card);
        let kind = match template.kind {
            CardKind::Summon(kind) => kind,
            CardKind::Spell(_) => {
                return Err(ActionError::InvalidTarget(format!(
                    "{} is not a summon card",
                    template.name
                )))
            }
        };
        self.require_mana(player, template.cost)?;

        if !target.is_valid() {
            return Err(ActionError::InvalidTarget(format!(
                "{target} is off the board"
            )));
        }
        if let Some(occupant) = self.unit_at(target) {
            return Err(ActionError::InvalidTarget(format!(
                "{target} is occupied by unit {}",
                occupant.id
            )));
        }
        let core_pos = self
            .core_of(player)
            .map(|core| core.pos)
            .ok_or_else(|| ActionError::NoSuchEntity("friendly core".into()))?;
        match core_pos.distance_to(target) {
            Some(dist) if dist <= SUMMON_RADIUS => {}
            _ => {
                return Err(ActionError::InvalidTarget(format!(
                    "{target} is more than {SUMMON_RADIUS} hexes from the core"
                )))
            }
        }

        let id = self.place_summoned_unit(kind, player, target);
        self.mana[player.index()] -= template.cost;
        self.hands[player.index()].remove(hand_slot);
        self.pending = None;
        self.recompute_control();

        Ok(vec![
            Event::CardPlayed { player, card },
            Event::Summoned {
                unit: id,
                kind,
                at: target,
            },
        ])
    }

    /// Discard whatever two-phase action is pending
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    // ========================================================================
    // SPELLS
    // ========================================================================

    /// Cast a spell card. Mana is deducted and the card leaves the hand
    /// only when the whole effect succeeds.
    pub fn cast_spell<R: Rng>(
        &mut self,
        card: CardId,
        target_coord: Option<Coord>,
        target_unit: Option<UnitId>,
        rng: &mut R,
    ) -> Result<Vec<Event>, ActionError> {
        self.ensure_ongoing()?;
        let player = self.current_player;

        let hand_slot = self.require_in_hand(player, card)?;
        let template = get_card(card);
        let effect = match template.kind {
            CardKind::Spell(effect) => effect,
            CardKind::Summon(_) => {
                return Err(ActionError::InvalidTarget(format!(
                    "{} is not a spell card",
                    template.name
                )))
            }
        };
        self.require_mana(player, template.cost)?;

        let mut events = match effect {
            SpellEffect::Pulse => self.cast_pulse(player, target_unit)?,
            SpellEffect::Shield => self.cast_shield(player, target_unit)?,
            SpellEffect::Draw => self.cast_draw(player, rng)?,
            SpellEffect::Translocate => self.cast_translocate(player, target_unit, target_coord)?,
        };

        self.mana[player.index()] -= template.cost;
        self.hands[player.index()].remove(hand_slot);
        self.recompute_control();
        events.insert(0, Event::CardPlayed { player, card });

        Ok(events)
    }

    fn cast_pulse(
        &mut self,
        player: Player,
        target_unit: Option<UnitId>,
    ) -> Result<Vec<Event>, ActionError> {
        let target_id = target_unit
            .ok_or_else(|| ActionError::InvalidTarget("the pulse requires a target unit".into()))?;
        let target = *self
            .unit(target_id)
            .ok_or_else(|| ActionError::NoSuchEntity(format!("unit {target_id}")))?;
        let core_pos = self
            .core_of(player)
            .map(|core| core.pos)
            .ok_or_else(|| ActionError::NoSuchEntity("friendly core".into()))?;

        match core_pos.distance_to(target.pos) {
            Some(dist) if dist <= PULSE_RANGE => {}
            _ => {
                return Err(ActionError::InvalidTarget(format!(
                    "unit {target_id} is more than {PULSE_RANGE} hexes from the core"
                )))
            }
        }
        if target.owner == player {
            return Err(ActionError::InvalidTarget(
                "the pulse cannot hit a friendly unit".into(),
            ));
        }

        let mut events = vec![Event::SpellDamage {
            caster: player,
            target: target_id,
            damage: PULSE_DAMAGE,
        }];
        self.deal_damage(target_id, PULSE_DAMAGE, &mut events);
        Ok(events)
    }

    fn cast_shield(
        &mut self,
        player: Player,
        target_unit: Option<UnitId>,
    ) -> Result<Vec<Event>, ActionError> {
        let target_id = target_unit
            .ok_or_else(|| ActionError::InvalidTarget("the shield requires a target unit".into()))?;
        let target = *self
            .unit(target_id)
            .ok_or_else(|| ActionError::NoSuchEntity(format!("unit {target_id}")))?;
        if target.owner != player {
            return Err(ActionError::NotOwned(format!(
                "unit {target_id} belongs to {}",
                target.owner
            )));
        }

        let healed_to = (target.hp + SHIELD_HEAL).min(target.max_hp);
        let amount = healed_to - target.hp;
        if let Some(u) = self.unit_mut(target_id) {
            u.hp = healed_to;
        }

        Ok(vec![Event::Healed {
            unit: target_id,
            amount,
        }])
    }

    fn cast_draw<R: Rng>(&mut self, player: Player, rng: &mut R) -> Result<Vec<Event>, ActionError> {
        if self.hands[player.index()].len() >= HAND_LIMIT {
            return Err(ActionError::HandFull);
        }

        let mut drawn = Vec::new();
        for _ in 0..DRAW_COUNT {
            if self.hands[player.index()].len() >= HAND_LIMIT {
                break;
            }
            let card = rng.gen_range(0..CARDS.len()) as CardId;
            self.hands[player.index()].push(card);
            drawn.push(card);
        }

        Ok(vec![Event::CardsDrawn {
            player,
            cards: drawn,
        }])
    }

    fn cast_translocate(
        &mut self,
        player: Player,
        target_unit: Option<UnitId>,
        target_coord: Option<Coord>,
    ) -> Result<Vec<Event>, ActionError> {
        let (target_id, destination) = match (target_unit, target_coord) {
            (Some(unit), Some(coord)) => (unit, coord),
            _ => {
                return Err(ActionError::InvalidTarget(
                    "translocation requires a friendly unit and a destination".into(),
                ))
            }
        };
        let unit = *self
            .unit(target_id)
            .ok_or_else(|| ActionError::NoSuchEntity(format!("unit {target_id}")))?;
        if unit.owner != player {
            return Err(ActionError::NotOwned(format!(
                "unit {target_id} belongs to {}",
                unit.owner
            )));
        }
        if !destination.is_valid() {
            return Err(ActionError::InvalidTarget(format!(
                "{destination} is off the board"
            )));
        }
        if let Some(occupant) = self.unit_at(destination) {
            return Err(ActionError::InvalidTarget(format!(
                "{destination} is occupied by unit {}",
                occupant.id
            )));
        }
        if unit.pos.distance_to(destination) != Some(1) {
            return Err(ActionError::InvalidTarget(format!(
                "{destination} is not exactly one hex away"
            )));
        }

        let from = unit.pos;
        if let Some(u) = self.unit_mut(target_id) {
            u.pos = destination;
        }

        Ok(vec![Event::Relocated {
            unit: target_id,
            from,
            to: destination,
        }])
    }

    // ========================================================================
    // SHARED CHECKS
    // ========================================================================

    /// Every card operation passes through here first, so the id is known
    /// to index CARDS before any table access.
    fn require_in_hand(&self, player: Player, card: CardId) -> Result<usize, ActionError> {
        if card as usize >= CARDS.len() {
            return Err(ActionError::NoSuchEntity(format!("card {card}")));
        }
        self.hands[player.index()]
            .iter()
            .position(|&c| c == card)
            .ok_or_else(|| {
                ActionError::NotOwned(format!("card {} is not in hand", get_card(card).name))
            })
    }

    fn require_mana(&self, player: Player, cost: u32) -> Result<(), ActionError> {
        let available = self.mana[player.index()];
        if available < cost {
            Err(ActionError::InsufficientResource {
                resource: "mana",
                needed: cost,
                available,
            })
        } else {
            Ok(())
        }
    }
}
