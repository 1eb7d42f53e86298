//! Card definitions: summons and spells

use crate::units::{UnitKindId, KIND_ADEPT, KIND_SCOUT, KIND_SENTINEL};
use serde::{Deserialize, Serialize};

/// Card identifier (index into CARDS)
pub type CardId = u8;

pub const CARD_SUMMON_ADEPT: CardId = 0;
pub const CARD_SUMMON_SCOUT: CardId = 1;
pub const CARD_SUMMON_SENTINEL: CardId = 2;
pub const CARD_AETHER_PULSE: CardId = 3;
pub const CARD_AETHER_SHIELD: CardId = 4;
pub const CARD_STRATEGIC_REFLEX: CardId = 5;
pub const CARD_TRANSLOCATION: CardId = 6;

/// Damage dealt by Aether Pulse
pub const PULSE_DAMAGE: i32 = 2;

/// Pulse range, measured from the caster's own core
pub const PULSE_RANGE: u32 = 4;

/// HP restored by Aether Shield, clamped to max hp
pub const SHIELD_HEAL: i32 = 3;

/// Cards drawn by Strategic Reflex
pub const DRAW_COUNT: usize = 2;

/// Maximum hand size
pub const HAND_LIMIT: usize = 7;

/// Summons must land within this distance of the owner's core
pub const SUMMON_RADIUS: u32 = 2;

/// Spell effect identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpellEffect {
    /// Fixed damage to an enemy unit, ranged from the caster's core
    Pulse,
    /// Heal a friendly unit, clamped to max hp
    Shield,
    /// Draw random cards from the pool, up to the hand limit
    Draw,
    /// Shift a friendly unit to an adjacent empty cell, free of the movement pool
    Translocate,
}

/// What a card does when played
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardKind {
    Summon(UnitKindId),
    Spell(SpellEffect),
}

/// Card definition (immutable template)
#[derive(Clone, Debug)]
pub struct Card {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: CardKind,
    pub cost: u32,
}

impl Card {
    const fn new(id: &'static str, name: &'static str, kind: CardKind, cost: u32) -> Self {
        Self { id, name, kind, cost }
    }
}

/// The full card pool. Draws pick uniformly from this table.
pub static CARDS: [Card; 7] = [
    Card::new("summon-adept", "Summon: Adept", CardKind::Summon(KIND_ADEPT), 2),
    Card::new("summon-scout", "Summon: Scout", CardKind::Summon(KIND_SCOUT), 2),
    Card::new(
        "summon-sentinel",
        "Summon: Arcane Sentinel",
        CardKind::Summon(KIND_SENTINEL),
        3,
    ),
    Card::new("aether-pulse", "Aether Pulse", CardKind::Spell(SpellEffect::Pulse), 2),
    Card::new("aether-shield", "Aether Shield", CardKind::Spell(SpellEffect::Shield), 2),
    Card::new(
        "strategic-reflex",
        "Strategic Reflex",
        CardKind::Spell(SpellEffect::Draw),
        4,
    ),
    Card::new(
        "swift-translocation",
        "Swift Translocation",
        CardKind::Spell(SpellEffect::Translocate),
        1,
    ),
];

/// Get card index from string ID
pub fn card_by_id(id: &str) -> Option<CardId> {
    CARDS.iter().position(|c| c.id == id).map(|i| i as u8)
}

/// Get card from index
pub fn get_card(idx: CardId) -> &'static Card {
    &CARDS[idx as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_lookup() {
        assert_eq!(card_by_id("aether-pulse"), Some(CARD_AETHER_PULSE));
        assert_eq!(card_by_id("swift-translocation"), Some(CARD_TRANSLOCATION));
        assert_eq!(card_by_id("fireball"), None);
    }

    #[test]
    fn test_summon_cards_reference_kinds() {
        for card in &CARDS {
            if let CardKind::Summon(kind) = card.kind {
                assert!(!crate::units::get_unit_kind(kind).is_core);
            }
        }
    }

    #[test]
    fn test_costs() {
        assert_eq!(get_card(CARD_STRATEGIC_REFLEX).cost, 4);
        assert_eq!(get_card(CARD_TRANSLOCATION).cost, 1);
        assert_eq!(get_card(CARD_SUMMON_SENTINEL).cost, 3);
    }
}
