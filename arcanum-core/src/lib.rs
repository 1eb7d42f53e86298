//! ARCANUM Core - Turn-based hex-grid tactics engine
//!
//! This crate provides the game engine core for ARCANUM:
//! - Board geometry (parity-based hex adjacency on a column/row grid)
//! - Unit and card templates with per-match instances
//! - Movement, targeting, and summon-placement queries
//! - An atomic action resolver with structured events and errors
//! - Turn sequencing with control-point and core-destruction victories
//! - The scripted opponent's greedy decision policy
//!
//! Rendering, input, and persistence live with the caller; the engine
//! only accepts structured action requests and answers with data.

pub mod actions;
pub mod ai;
pub mod board;
pub mod cards;
pub mod movement;
pub mod setup;
pub mod state;
pub mod turn;
pub mod units;

// Re-exports for convenient access
pub use actions::{ActionError, Event};
pub use board::{Coord, CONTROL_POINTS};
pub use cards::{card_by_id, get_card, Card, CardId, CardKind, SpellEffect, CARDS, HAND_LIMIT};
pub use setup::{Placement, Scenario};
pub use state::{MatchResult, MatchState, PendingAction, VictoryReason};
pub use units::{
    get_unit_kind, unit_kind_by_id, Player, Unit, UnitId, UnitKind, UnitKindId, UNIT_KINDS,
};
