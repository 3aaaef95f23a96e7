use crate::club::player::RatingKind;
use crate::r#match::state::TeamState;

/// Hard cap on substitutions per side, never configurable above this.
pub const MAX_SUBSTITUTIONS: u8 = 5;

/// Card accumulation and squad-depletion rules.
pub struct DisciplineModel;

impl DisciplineModel {
    /// True when the player's latest yellow is their second, which must
    /// cascade into a red card within the same tick.
    pub fn is_second_yellow(team: &TeamState, player_id: u32) -> bool {
        team.yellow.get(&player_id).copied().unwrap_or(0) >= 2
    }

    pub fn can_substitute(team: &TeamState) -> bool {
        team.substitutions_used < MAX_SUBSTITUTIONS && !team.bench.is_empty()
    }

    /// Probability that a foul draws a booking, driven by the offender's
    /// aggression against their discipline rating.
    pub fn booking_probability(team: &TeamState, player_id: u32) -> f32 {
        let Some(fp) = team.field_player(player_id) else {
            return 0.0;
        };

        let aggression = fp.player.attributes.mental.aggression as f32;
        let discipline = fp.player.attributes.effective(RatingKind::Discipline);

        (0.18 + (aggression - discipline) * 0.02).clamp(0.05, 0.65)
    }

    /// Probability that a booking is a straight red rather than a yellow.
    pub fn straight_red_probability() -> f32 {
        0.06
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::events::TeamSide;
    use crate::r#match::state::tests::test_team_state;

    #[test]
    fn test_second_yellow_detection() {
        let mut team = test_team_state(TeamSide::Home, 100);
        assert!(!DisciplineModel::is_second_yellow(&team, 105));

        team.yellow.insert(105, 1);
        assert!(!DisciplineModel::is_second_yellow(&team, 105));

        team.yellow.insert(105, 2);
        assert!(DisciplineModel::is_second_yellow(&team, 105));
    }

    #[test]
    fn test_substitution_gate() {
        let mut team = test_team_state(TeamSide::Home, 100);
        assert!(DisciplineModel::can_substitute(&team));

        team.substitutions_used = MAX_SUBSTITUTIONS;
        assert!(!DisciplineModel::can_substitute(&team));

        team.substitutions_used = 0;
        team.bench.clear();
        assert!(!DisciplineModel::can_substitute(&team));
    }

    #[test]
    fn test_aggressive_players_get_booked_more() {
        let mut team = test_team_state(TeamSide::Home, 100);
        let calm = DisciplineModel::booking_probability(&team, 105);

        if let Some(fp) = team
            .on_pitch
            .iter_mut()
            .find(|fp| fp.player.id == 105)
        {
            fp.player.attributes.mental.aggression = 20;
        }
        let fiery = DisciplineModel::booking_probability(&team, 105);

        assert!(fiery > calm);
        assert!(fiery <= 0.65);
    }
}
