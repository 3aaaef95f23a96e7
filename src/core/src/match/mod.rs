pub mod chain;
pub mod commentary;
pub mod discipline;
pub mod engine;
pub mod error;
pub mod events;
pub mod fatigue;
pub mod input;
pub mod lineup;
pub mod modifiers;
pub mod outcome;
pub mod player_stats;
pub mod possession;
pub mod result;
pub mod selector;
pub mod state;
pub mod stats;
pub mod tick;

pub use chain::*;
pub use commentary::*;
pub use discipline::*;
pub use engine::*;
pub use error::*;
pub use events::*;
pub use fatigue::*;
pub use input::*;
pub use lineup::*;
pub use modifiers::*;
pub use outcome::*;
pub use player_stats::*;
pub use possession::*;
pub use result::*;
pub use selector::*;
pub use state::*;
pub use stats::*;
pub use tick::*;
