use crate::club::player::Player;
use serde::{Deserialize, Serialize};

/// Read-only team record: identity plus the full squad to draw a lineup from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub color: String,
    pub players: Vec<Player>,
}

impl Team {
    pub fn player(&self, player_id: u32) -> Option<&Player> {
        self.players.iter().find(|p| p.id == player_id)
    }

    pub fn eligible_players(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| !p.is_injured)
    }
}
