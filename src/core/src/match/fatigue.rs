use crate::r#match::state::TeamState;

const BASE_DECAY_PER_MINUTE: f32 = 0.0055;

/// Freshness threshold below which the manager heuristic starts looking
/// for a replacement.
pub const SUBSTITUTION_FATIGUE_THRESHOLD: f32 = 0.4;

/// Per-minute stamina decay and the outcome penalty tired players carry.
pub struct FatigueModel;

impl FatigueModel {
    /// Decays every on-pitch player's freshness by one minute. Work rate
    /// accelerates the decay, stamina and a quiet GK role slow it; the
    /// tempo multiplier comes from the side's own tactic.
    pub fn advance_minute(team: &mut TeamState, tempo_multiplier: f32) {
        for fp in &team.on_pitch {
            let work_rate = fp.player.attributes.mental.work_rate as f32;
            let stamina = fp.player.attributes.physical.stamina as f32;

            let mut decay = BASE_DECAY_PER_MINUTE * (1.0 + work_rate / 40.0)
                / (0.5 + stamina / 20.0)
                * tempo_multiplier;

            if fp.slot.is_goalkeeper() {
                decay *= 0.4;
            }

            let entry = team.fatigue.entry(fp.player.id).or_insert(1.0);
            *entry = (*entry - decay).clamp(0.0, 1.0);
        }
    }

    /// Outcome threshold penalty for a tired actor.
    pub fn penalty(fatigue: f32) -> f32 {
        ((1.0 - fatigue) * 0.15).max(0.0)
    }

    pub fn needs_substitution(fatigue: f32) -> bool {
        fatigue < SUBSTITUTION_FATIGUE_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::events::TeamSide;
    use crate::r#match::state::tests::test_team_state;

    #[test]
    fn test_decay_stays_in_bounds() {
        let mut team = test_team_state(TeamSide::Home, 100);
        for _ in 0..500 {
            FatigueModel::advance_minute(&mut team, 1.0);
        }

        for fp in &team.on_pitch {
            let f = team.fatigue_of(fp.player.id);
            assert!((0.0..=1.0).contains(&f));
        }
    }

    #[test]
    fn test_high_stamina_decays_slower() {
        let mut team = test_team_state(TeamSide::Home, 100);
        team.on_pitch[5].player.attributes.physical.stamina = 20;
        team.on_pitch[6].player.attributes.physical.stamina = 5;
        let runner = team.on_pitch[5].player.id;
        let plodder = team.on_pitch[6].player.id;

        for _ in 0..30 {
            FatigueModel::advance_minute(&mut team, 1.0);
        }

        assert!(team.fatigue_of(runner) > team.fatigue_of(plodder));
    }

    #[test]
    fn test_goalkeeper_outlasts_outfielders() {
        let mut team = test_team_state(TeamSide::Home, 100);
        for _ in 0..60 {
            FatigueModel::advance_minute(&mut team, 1.0);
        }

        let keeper = team.goalkeeper().unwrap().player.id;
        let keeper_fatigue = team.fatigue_of(keeper);
        for fp in team.on_pitch.iter().filter(|fp| !fp.slot.is_goalkeeper()) {
            assert!(keeper_fatigue > team.fatigue_of(fp.player.id));
        }
    }

    #[test]
    fn test_penalty_formula() {
        assert_eq!(FatigueModel::penalty(1.0), 0.0);
        assert!((FatigueModel::penalty(0.5) - 0.075).abs() < 1e-6);
        assert!(FatigueModel::penalty(0.0) <= 0.15 + 1e-6);
    }

    #[test]
    fn test_substitution_threshold() {
        assert!(!FatigueModel::needs_substitution(0.6));
        assert!(FatigueModel::needs_substitution(0.39));
    }
}
