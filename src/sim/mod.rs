//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entities;
pub mod input;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Rect, aabb_overlap};
pub use entities::{Coin, EntityList, EntityStore, Obstacle, Player, RoadLine};
pub use input::{Control, InputState};
pub use state::{GameEvent, GamePhase, GameState, Hud};
pub use tick::{TickInput, tick};
