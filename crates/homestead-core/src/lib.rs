//! Stellar Homestead - turn-based colony management simulation engine
//!
//! A fixed cast of buildings and colonists feeds a shared, typed resource
//! ledger that never goes negative. Each turn cycles SETUP -> PRODUCTION ->
//! EVENT -> MANAGEMENT and back, with win/lose conditions evaluated after
//! every transition.
//!
//! # Architecture
//!
//! Colonists and buildings are `hecs` entities carrying pure-data
//! components; phase logic lives in systems (free functions) and the
//! [`engine::GameEngine`] sequences them:
//! - **Components**: `ResourceLedger`, `Building`, `Colonist`, `Name`
//! - **Systems**: production, events, management
//! - **Engine**: phase machine, turn loop, termination conditions
//!
//! # Example
//!
//! ```rust,no_run
//! use homestead_core::prelude::*;
//! use homestead_core::config::GameConfig;
//!
//! let mut engine = GameEngine::with_seed(GameConfig::default(), 42);
//!
//! while engine.state.is_running() {
//!     engine.step(Some(ManagementAction::Continue));
//! }
//! ```

pub mod components;
pub mod config;
pub mod engine;
pub mod persistence;
pub mod state;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{GameEngine, GameOutcome, StepReport};
    pub use crate::state::{GamePhase, GameState};
    pub use crate::systems::*;
}
