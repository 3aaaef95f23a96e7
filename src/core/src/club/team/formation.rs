use crate::club::player::PlayerPosition;
use crate::r#match::error::MatchError;
use serde::{Deserialize, Serialize};

/// A named arrangement of exactly 11 positional slots. Coordinates are on
/// the abstract 0..=100 pitch, y increasing from the own goal line toward
/// the opposition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Formation {
    pub name: String,
    pub slots: Vec<FormationSlot>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FormationSlot {
    pub position: PlayerPosition,
    pub x: f32,
    pub y: f32,
}

impl Formation {
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.slots.len() != 11 {
            return Err(MatchError::Precondition(format!(
                "formation {} has {} slots, expected 11",
                self.name,
                self.slots.len()
            )));
        }

        let keepers = self
            .slots
            .iter()
            .filter(|s| s.position.is_goalkeeper())
            .count();
        if keepers != 1 {
            return Err(MatchError::Precondition(format!(
                "formation {} has {} goalkeeper slots, expected 1",
                self.name, keepers
            )));
        }

        for slot in &self.slots {
            if slot.position == PlayerPosition::Substitute {
                return Err(MatchError::Precondition(format!(
                    "formation {} places SUB in a starting slot",
                    self.name
                )));
            }
            if !(0.0..=100.0).contains(&slot.x) || !(0.0..=100.0).contains(&slot.y) {
                return Err(MatchError::Precondition(format!(
                    "formation {} slot {} out of pitch bounds",
                    self.name, slot.position
                )));
            }
        }

        Ok(())
    }

    /// Builtin catalogue, looked up by conventional name ("4-4-2", "4-3-3", ...).
    pub fn by_name(name: &str) -> Option<Formation> {
        let slots: &[(PlayerPosition, f32, f32)] = match name {
            "4-4-2" => &[
                (PlayerPosition::Goalkeeper, 50.0, 4.0),
                (PlayerPosition::DefenderLeft, 15.0, 22.0),
                (PlayerPosition::DefenderCenter, 38.0, 18.0),
                (PlayerPosition::DefenderCenter, 62.0, 18.0),
                (PlayerPosition::DefenderRight, 85.0, 22.0),
                (PlayerPosition::MidfielderLeft, 15.0, 52.0),
                (PlayerPosition::MidfielderCenter, 38.0, 48.0),
                (PlayerPosition::MidfielderCenter, 62.0, 48.0),
                (PlayerPosition::MidfielderRight, 85.0, 52.0),
                (PlayerPosition::Striker, 40.0, 80.0),
                (PlayerPosition::Striker, 60.0, 80.0),
            ],
            "4-3-3" => &[
                (PlayerPosition::Goalkeeper, 50.0, 4.0),
                (PlayerPosition::DefenderLeft, 15.0, 22.0),
                (PlayerPosition::DefenderCenter, 38.0, 18.0),
                (PlayerPosition::DefenderCenter, 62.0, 18.0),
                (PlayerPosition::DefenderRight, 85.0, 22.0),
                (PlayerPosition::DefensiveMidfielder, 50.0, 40.0),
                (PlayerPosition::MidfielderCenter, 32.0, 52.0),
                (PlayerPosition::MidfielderCenter, 68.0, 52.0),
                (PlayerPosition::WingerLeft, 15.0, 78.0),
                (PlayerPosition::WingerRight, 85.0, 78.0),
                (PlayerPosition::Striker, 50.0, 85.0),
            ],
            "4-2-3-1" => &[
                (PlayerPosition::Goalkeeper, 50.0, 4.0),
                (PlayerPosition::DefenderLeft, 15.0, 22.0),
                (PlayerPosition::DefenderCenter, 38.0, 18.0),
                (PlayerPosition::DefenderCenter, 62.0, 18.0),
                (PlayerPosition::DefenderRight, 85.0, 22.0),
                (PlayerPosition::DefensiveMidfielder, 38.0, 38.0),
                (PlayerPosition::DefensiveMidfielder, 62.0, 38.0),
                (PlayerPosition::MidfielderLeft, 18.0, 62.0),
                (PlayerPosition::AttackingMidfielder, 50.0, 62.0),
                (PlayerPosition::MidfielderRight, 82.0, 62.0),
                (PlayerPosition::Striker, 50.0, 85.0),
            ],
            "3-5-2" => &[
                (PlayerPosition::Goalkeeper, 50.0, 4.0),
                (PlayerPosition::DefenderCenter, 28.0, 18.0),
                (PlayerPosition::DefenderCenter, 50.0, 15.0),
                (PlayerPosition::DefenderCenter, 72.0, 18.0),
                (PlayerPosition::Wingback, 10.0, 45.0),
                (PlayerPosition::DefensiveMidfielder, 50.0, 38.0),
                (PlayerPosition::MidfielderCenter, 35.0, 52.0),
                (PlayerPosition::MidfielderCenter, 65.0, 52.0),
                (PlayerPosition::Wingback, 90.0, 45.0),
                (PlayerPosition::Striker, 40.0, 82.0),
                (PlayerPosition::Striker, 60.0, 82.0),
            ],
            "5-3-2" => &[
                (PlayerPosition::Goalkeeper, 50.0, 4.0),
                (PlayerPosition::DefenderLeft, 12.0, 25.0),
                (PlayerPosition::DefenderCenter, 32.0, 16.0),
                (PlayerPosition::Sweeper, 50.0, 12.0),
                (PlayerPosition::DefenderCenter, 68.0, 16.0),
                (PlayerPosition::DefenderRight, 88.0, 25.0),
                (PlayerPosition::MidfielderCenter, 30.0, 48.0),
                (PlayerPosition::DefensiveMidfielder, 50.0, 42.0),
                (PlayerPosition::MidfielderCenter, 70.0, 48.0),
                (PlayerPosition::Striker, 40.0, 80.0),
                (PlayerPosition::ForwardCenter, 60.0, 78.0),
            ],
            _ => return None,
        };

        Some(Formation {
            name: name.to_string(),
            slots: slots
                .iter()
                .map(|&(position, x, y)| FormationSlot { position, x, y })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_formations_are_valid() {
        for name in ["4-4-2", "4-3-3", "4-2-3-1", "3-5-2", "5-3-2"] {
            let formation = Formation::by_name(name).unwrap();
            assert!(formation.validate().is_ok(), "{} failed validation", name);
        }
    }

    #[test]
    fn test_unknown_formation() {
        assert!(Formation::by_name("2-3-5").is_none());
    }

    #[test]
    fn test_validate_rejects_wrong_slot_count() {
        let mut formation = Formation::by_name("4-4-2").unwrap();
        formation.slots.pop();
        assert!(formation.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_two_keepers() {
        let mut formation = Formation::by_name("4-4-2").unwrap();
        formation.slots[1].position = PlayerPosition::Goalkeeper;
        assert!(formation.validate().is_err());
    }
}
