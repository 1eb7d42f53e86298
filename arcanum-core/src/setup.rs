//! Scenario - initial deployment definition

use crate::board::Coord;
use crate::cards::{CardId, CARDS, CARD_AETHER_PULSE, CARD_SUMMON_ADEPT, CARD_SUMMON_SCOUT};
use crate::state::MatchState;
use crate::units::{
    unit_kind_by_id, UnitKindId, KIND_ADEPT, KIND_CORE, KIND_GUARDIAN, KIND_SCOUT, KIND_SENTINEL,
    KIND_SYLVARA, UNIT_KINDS,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One unit placed at match start
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Placement {
    pub kind: UnitKindId,
    pub at: Coord,
}

impl Placement {
    pub const fn new(kind: UnitKindId, at: Coord) -> Self {
        Self { kind, at }
    }
}

/// A named starting position: deployments for both sides, starting mana,
/// and the human side's opening hand. Resetting a match is building a
/// fresh state from its scenario.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub player_one: Vec<Placement>,
    pub player_two: Vec<Placement>,
    pub starting_mana: u32,
    pub starting_hand: Vec<CardId>,
}

impl Scenario {
    /// Build the initial MatchState
    pub fn to_match_state(&self) -> MatchState {
        let one: Vec<(UnitKindId, Coord)> =
            self.player_one.iter().map(|p| (p.kind, p.at)).collect();
        let two: Vec<(UnitKindId, Coord)> =
            self.player_two.iter().map(|p| (p.kind, p.at)).collect();
        MatchState::new(&one, &two, self.starting_mana, &self.starting_hand)
    }

    /// Load from a JSON file (accepts numeric or string unit-kind ids)
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;

        // Numeric kind ids first
        if let Ok(scenario) = serde_json::from_str::<Scenario>(&content) {
            scenario.validate()?;
            return Ok(scenario);
        }

        // Fall back to string kind ids ("guardian", "adept", ...)
        #[derive(Deserialize)]
        struct StringPlacement {
            kind: String,
            at: Coord,
        }

        #[derive(Deserialize)]
        struct StringScenario {
            name: String,
            player_one: Vec<StringPlacement>,
            player_two: Vec<StringPlacement>,
            starting_mana: u32,
            starting_hand: Vec<CardId>,
        }

        fn convert(placements: Vec<StringPlacement>) -> anyhow::Result<Vec<Placement>> {
            placements
                .into_iter()
                .map(|p| {
                    let kind = unit_kind_by_id(&p.kind)
                        .ok_or_else(|| anyhow::anyhow!("unknown unit kind: {}", p.kind))?;
                    Ok(Placement::new(kind, p.at))
                })
                .collect()
        }

        let raw: StringScenario = serde_json::from_str(&content)?;
        let scenario = Scenario {
            name: raw.name,
            player_one: convert(raw.player_one)?,
            player_two: convert(raw.player_two)?,
            starting_mana: raw.starting_mana,
            starting_hand: raw.starting_hand,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Reject ids that do not index the static tables, so a loaded
    /// scenario can never panic later in `to_match_state`.
    fn validate(&self) -> anyhow::Result<()> {
        for placement in self.player_one.iter().chain(self.player_two.iter()) {
            if placement.kind as usize >= UNIT_KINDS.len() {
                anyhow::bail!("unknown unit kind id: {}", placement.kind);
            }
        }
        for &card in &self.starting_hand {
            if card as usize >= CARDS.len() {
                anyhow::bail!("unknown card id: {card}");
            }
        }
        Ok(())
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

impl Default for Scenario {
    /// The standard deployment: cores at F13 and F1, escorts fanned out in
    /// front, three mana each, and a small opening hand for player one.
    fn default() -> Self {
        Self {
            name: "standard".to_string(),
            player_one: vec![
                Placement::new(KIND_CORE, Coord::new(5, 13)),
                Placement::new(KIND_SYLVARA, Coord::new(4, 12)),
                Placement::new(KIND_GUARDIAN, Coord::new(3, 13)),
                Placement::new(KIND_SCOUT, Coord::new(6, 12)),
                Placement::new(KIND_ADEPT, Coord::new(7, 13)),
            ],
            player_two: vec![
                Placement::new(KIND_CORE, Coord::new(5, 1)),
                Placement::new(KIND_GUARDIAN, Coord::new(4, 2)),
                Placement::new(KIND_ADEPT, Coord::new(3, 1)),
                Placement::new(KIND_SCOUT, Coord::new(6, 2)),
                Placement::new(KIND_SENTINEL, Coord::new(7, 1)),
            ],
            starting_mana: 3,
            starting_hand: vec![CARD_SUMMON_ADEPT, CARD_AETHER_PULSE, CARD_SUMMON_SCOUT],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Player;

    #[test]
    fn test_default_deployment() {
        let state = Scenario::default().to_match_state();
        assert_eq!(state.units_for(Player::One).count(), 5);
        assert_eq!(state.units_for(Player::Two).count(), 5);
        assert_eq!(state.core_of(Player::One).unwrap().pos, Coord::new(5, 13));
        assert_eq!(state.core_of(Player::Two).unwrap().pos, Coord::new(5, 1));
        assert_eq!(state.mana(Player::One), 3);
        assert_eq!(state.hand(Player::One).len(), 3);
        assert!(state.hand(Player::Two).is_empty());
        assert_eq!(state.current_player(), Player::One);
    }

    #[test]
    fn test_placements_do_not_collide() {
        let scenario = Scenario::default();
        let mut cells: Vec<Coord> = scenario
            .player_one
            .iter()
            .chain(scenario.player_two.iter())
            .map(|p| p.at)
            .collect();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), 10);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("standard.json");
        let scenario = Scenario::default();
        scenario.save(&path).unwrap();

        let loaded = Scenario::load(&path).unwrap();
        assert_eq!(loaded.name, scenario.name);
        assert_eq!(loaded.player_one.len(), scenario.player_one.len());
        assert_eq!(loaded.starting_hand, scenario.starting_hand);
    }

    #[test]
    fn test_load_string_kind_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("named.json");
        std::fs::write(
            &path,
            r#"{
                "name": "named",
                "player_one": [
                    { "kind": "core", "at": { "col": 5, "row": 13 } },
                    { "kind": "guardian", "at": { "col": 4, "row": 12 } }
                ],
                "player_two": [
                    { "kind": "core", "at": { "col": 5, "row": 1 } }
                ],
                "starting_mana": 3,
                "starting_hand": []
            }"#,
        )
        .unwrap();

        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.player_one[0].kind, KIND_CORE);
        assert_eq!(scenario.player_one[1].kind, KIND_GUARDIAN);
    }

    #[test]
    fn test_load_rejects_out_of_range_ids() {
        let dir = tempfile::tempdir().unwrap();

        // Numeric unit-kind id past the table
        let bad_kind = dir.path().join("bad_kind.json");
        std::fs::write(
            &bad_kind,
            r#"{
                "name": "bad",
                "player_one": [{ "kind": 99, "at": { "col": 5, "row": 13 } }],
                "player_two": [{ "kind": 0, "at": { "col": 5, "row": 1 } }],
                "starting_mana": 3,
                "starting_hand": []
            }"#,
        )
        .unwrap();
        assert!(Scenario::load(&bad_kind).is_err());

        // Card id past the pool in the starting hand
        let bad_card = dir.path().join("bad_card.json");
        std::fs::write(
            &bad_card,
            r#"{
                "name": "bad",
                "player_one": [{ "kind": 0, "at": { "col": 5, "row": 13 } }],
                "player_two": [{ "kind": 0, "at": { "col": 5, "row": 1 } }],
                "starting_mana": 3,
                "starting_hand": [200]
            }"#,
        )
        .unwrap();
        assert!(Scenario::load(&bad_card).is_err());
    }
}
