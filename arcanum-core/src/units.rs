//! Unit kind definitions and per-match unit instances

use crate::board::Coord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unit kind identifier (index into UNIT_KINDS)
pub type UnitKindId = u8;

pub const KIND_CORE: UnitKindId = 0;
pub const KIND_SYLVARA: UnitKindId = 1;
pub const KIND_GUARDIAN: UnitKindId = 2;
pub const KIND_SCOUT: UnitKindId = 3;
pub const KIND_ADEPT: UnitKindId = 4;
pub const KIND_BRUISER: UnitKindId = 5;
pub const KIND_SENTINEL: UnitKindId = 6;

/// A side in the match. `One` is the human seat, `Two` the scripted seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One = 0,
    Two = 1,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::One => write!(f, "player 1"),
            Player::Two => write!(f, "player 2"),
        }
    }
}

/// Unit kind definition (immutable template)
#[derive(Clone, Debug)]
pub struct UnitKind {
    pub id: &'static str,
    pub name: &'static str,
    pub hp: i32,
    pub atk: i32,
    pub mv: u32,
    pub range: u32,
    pub is_core: bool,
}

impl UnitKind {
    const fn new(
        id: &'static str,
        name: &'static str,
        hp: i32,
        atk: i32,
        mv: u32,
        range: u32,
        is_core: bool,
    ) -> Self {
        Self {
            id,
            name,
            hp,
            atk,
            mv,
            range,
            is_core,
        }
    }
}

/// All unit kinds
pub static UNIT_KINDS: [UnitKind; 7] = [
    UnitKind::new("core", "Arcane Core", 20, 0, 0, 0, true),
    UnitKind::new("sylvara", "Sylvara", 10, 2, 2, 1, false),
    UnitKind::new("guardian", "Guardian", 5, 2, 2, 1, false),
    UnitKind::new("scout", "Scout", 3, 2, 3, 1, false),
    UnitKind::new("adept", "Adept", 2, 3, 2, 3, false),
    UnitKind::new("bruiser", "Bruiser", 6, 3, 1, 1, false),
    UnitKind::new("sentinel", "Arcane Sentinel", 4, 1, 2, 2, false),
];

/// Get unit kind index from string ID
pub fn unit_kind_by_id(id: &str) -> Option<UnitKindId> {
    UNIT_KINDS.iter().position(|k| k.id == id).map(|i| i as u8)
}

/// Get unit kind from index
pub fn get_unit_kind(idx: UnitKindId) -> &'static UnitKind {
    &UNIT_KINDS[idx as usize]
}

/// Opaque unit identifier, unique within a match and monotonically assigned
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A unit on the board
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKindId,
    pub owner: Player,
    pub pos: Coord,
    pub hp: i32,
    pub max_hp: i32,
    pub mv_remaining: u32,
    pub ap_remaining: u32,
    pub max_mv: u32,
    pub atk: i32,
    pub range: u32,
}

impl Unit {
    /// A deployed unit, ready to act
    pub fn new(id: UnitId, kind: UnitKindId, owner: Player, pos: Coord) -> Self {
        let template = get_unit_kind(kind);
        Self {
            id,
            kind,
            owner,
            pos,
            hp: template.hp,
            max_hp: template.hp,
            mv_remaining: template.mv,
            ap_remaining: 1,
            max_mv: template.mv,
            atk: template.atk,
            range: template.range,
        }
    }

    /// A freshly summoned unit: full stats but no movement or action points
    /// until its owner's next turn ("summoning sickness")
    pub fn summoned(id: UnitId, kind: UnitKindId, owner: Player, pos: Coord) -> Self {
        let mut unit = Self::new(id, kind, owner, pos);
        unit.mv_remaining = 0;
        unit.ap_remaining = 0;
        unit
    }

    pub fn is_core(&self) -> bool {
        get_unit_kind(self.kind).is_core
    }

    pub fn kind_name(&self) -> &'static str {
        get_unit_kind(self.kind).name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_lookup() {
        assert_eq!(unit_kind_by_id("core"), Some(KIND_CORE));
        assert_eq!(unit_kind_by_id("sentinel"), Some(KIND_SENTINEL));
        assert_eq!(unit_kind_by_id("dragon"), None);
    }

    #[test]
    fn test_core_is_inert() {
        let core = get_unit_kind(KIND_CORE);
        assert!(core.is_core);
        assert_eq!(core.mv, 0);
        assert_eq!(core.atk, 0);
        assert_eq!(core.range, 0);
    }

    #[test]
    fn test_fresh_unit_stats() {
        let u = Unit::new(UnitId(3), KIND_SCOUT, Player::One, Coord::new(6, 12));
        assert_eq!(u.hp, 3);
        assert_eq!(u.max_hp, 3);
        assert_eq!(u.mv_remaining, 3);
        assert_eq!(u.ap_remaining, 1);
        assert!(!u.is_core());
    }

    #[test]
    fn test_summoning_sickness() {
        let u = Unit::summoned(UnitId(10), KIND_ADEPT, Player::One, Coord::new(5, 12));
        assert_eq!(u.mv_remaining, 0);
        assert_eq!(u.ap_remaining, 0);
        assert_eq!(u.max_mv, 2);
        assert_eq!(u.hp, 2);
    }
}
