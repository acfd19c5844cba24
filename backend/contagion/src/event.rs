//! Everything that can happen during a transition of the game.
//!
//! Transitions report what they did as an ordered list of [`Event`]s, so a
//! presentation layer can replay them without diffing states.

use crate::city::City;
use crate::game_phase::{GamePhase, LossReason};

use serde::Serialize;

/// A single thing that happened while resolving an action or a turn.
///
/// # JSON
/// Events are serialized as objects, tagged by their snake_case `type`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Event {
    PawnMoved { from: City, to: City },
    CubeTreated { city: City },
    DiseaseCured,
    PlayerCardDrawn { city: City },
    InfectionCardDrawn { city: City },
    CubeAdded { city: City },
    Outbreak { city: City },
    InfectionDeckReshuffled,
    PhaseChanged { phase: GamePhase },
    TurnStarted { turn: usize },
    GameWon,
    GameLost { reason: LossReason },
}
