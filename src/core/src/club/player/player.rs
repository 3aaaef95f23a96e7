use crate::club::player::positions::PlayerPosition;
use crate::club::player::skills::PlayerAttributes;
use serde::{Deserialize, Serialize};

/// Read-only player record consumed by the engine. The engine clones it
/// into match state at kickoff and never consults the source again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub shirt_number: u8,
    pub position: PlayerPosition,
    #[serde(default)]
    pub secondary_positions: Vec<PlayerPosition>,
    #[serde(default)]
    pub is_injured: bool,
    #[serde(default)]
    pub attributes: PlayerAttributes,
}

impl Player {
    pub fn is_goalkeeper(&self) -> bool {
        self.position.is_goalkeeper()
    }

    /// How well this player covers a formation slot, in fixed tiers:
    /// 1.0 exact primary match, 0.7 secondary or neighbouring role,
    /// 0.3 out-of-group outfield cover, 0.0 for any GK/outfield mismatch.
    pub fn position_compatibility(&self, slot: PlayerPosition) -> f32 {
        if slot.is_goalkeeper() || self.position.is_goalkeeper() {
            return if self.position == slot { 1.0 } else { 0.0 };
        }

        if self.position == slot {
            return 1.0;
        }

        if self.secondary_positions.contains(&slot)
            || self.position.neighbours().contains(&slot)
        {
            return 0.7;
        }

        0.3
    }

    pub fn current_ability(&self) -> u8 {
        self.attributes.current_ability
    }
}
