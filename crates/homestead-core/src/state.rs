//! Game phase state machine and turn bookkeeping.

use serde::{Deserialize, Serialize};

/// The five stages a turn cycles through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    Setup,
    Production,
    Event,
    Management,
    End,
}

impl GamePhase {
    /// Stable index used by the save format.
    pub fn index(&self) -> u8 {
        match self {
            GamePhase::Setup => 0,
            GamePhase::Production => 1,
            GamePhase::Event => 2,
            GamePhase::Management => 3,
            GamePhase::End => 4,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(GamePhase::Setup),
            1 => Some(GamePhase::Production),
            2 => Some(GamePhase::Event),
            3 => Some(GamePhase::Management),
            4 => Some(GamePhase::End),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GamePhase::Setup => "Setup",
            GamePhase::Production => "Production",
            GamePhase::Event => "Event",
            GamePhase::Management => "Management",
            GamePhase::End => "Game Over",
        }
    }
}

/// Phase, turn counter and running flag - the scalars a save file carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    phase: GamePhase,
    turn: u32,
    colonist_count: u32,
    running: bool,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Setup,
            turn: 1,
            colonist_count: 0,
            running: true,
        }
    }

    /// Restore scalars from a save record.
    pub fn from_save(phase: GamePhase, turn: u32, colonist_count: u32, running: bool) -> Self {
        Self {
            phase,
            turn,
            colonist_count,
            running,
        }
    }

    /// Advance the cycle. The turn counter increments exactly once per full
    /// Management -> Production transition. `End` is not reachable from here;
    /// only [`GameState::end_game`] enters it. Calling this while already in
    /// `End` just clears the running flag again.
    pub fn next_phase(&mut self) {
        match self.phase {
            GamePhase::Setup => self.phase = GamePhase::Production,
            GamePhase::Production => self.phase = GamePhase::Event,
            GamePhase::Event => self.phase = GamePhase::Management,
            GamePhase::Management => {
                self.phase = GamePhase::Production;
                self.turn += 1;
            }
            GamePhase::End => self.running = false,
        }
    }

    /// Terminal transition, used by the condition evaluator.
    pub fn end_game(&mut self) {
        self.phase = GamePhase::End;
        self.running = false;
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn colonist_count(&self) -> u32 {
        self.colonist_count
    }

    pub fn set_colonist_count(&mut self, count: u32) {
        self.colonist_count = count;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
