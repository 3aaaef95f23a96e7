use crate::club::player::{PlayerPosition, PositionGroup, RatingKind};
use crate::r#match::state::{FieldPlayer, TeamState};
use rand::RngExt;
use rand::rngs::StdRng;
use std::cmp::Reverse;

/// What a player is being picked to do. Determines both the positional
/// preference table and which effective rating weighs the draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionRole {
    Shooter,
    Assister,
    Dribbler,
    Tackler,
    Interceptor,
    FoulCommitter,
    AerialThreat,
    Keeper,
}

/// Set-piece duties, fixed once per side for the whole match.
#[derive(Debug, Clone, Copy)]
pub struct SetPieceTakers {
    pub corner: u32,
    pub free_kick: u32,
    pub penalty: u32,
}

pub struct PlayerSelector;

impl PlayerSelector {
    /// Weighted draw over the eligible on-pitch players. `exclude` supports
    /// without-replacement picks (an assister must differ from the shooter).
    /// Falls back to the best-rated eligible outfielder when every weight
    /// collapses to zero.
    pub fn select<'t>(
        team: &'t TeamState,
        role: SelectionRole,
        exclude: &[u32],
        rng: &mut StdRng,
    ) -> Option<&'t FieldPlayer> {
        if role == SelectionRole::Keeper {
            return team.goalkeeper();
        }

        let candidates: Vec<(&FieldPlayer, f32)> = team
            .on_pitch
            .iter()
            .filter(|fp| !exclude.contains(&fp.player.id))
            .filter(|fp| !fp.slot.is_goalkeeper())
            .map(|fp| (fp, Self::weight(team, fp, role)))
            .collect();

        let total: f32 = candidates.iter().map(|(_, w)| w).sum();
        if total > 0.0 {
            let mut roll = rng.random_range(0.0..total);
            for &(fp, weight) in &candidates {
                if roll < weight {
                    return Some(fp);
                }
                roll -= weight;
            }
        }

        // Degenerate weights: take the strongest eligible outfielder
        candidates
            .into_iter()
            .map(|(fp, _)| fp)
            .max_by(|a, b| {
                let ra = Self::relevant_rating(a, role);
                let rb = Self::relevant_rating(b, role);
                ra.partial_cmp(&rb).unwrap_or(std::cmp::Ordering::Equal)
            })
    }

    fn weight(team: &TeamState, fp: &FieldPlayer, role: SelectionRole) -> f32 {
        let positional = Self::position_weight(role, fp.slot);
        if positional == 0.0 {
            return 0.0;
        }

        positional * Self::relevant_rating(fp, role) * team.fatigue_of(fp.player.id)
    }

    fn relevant_rating(fp: &FieldPlayer, role: SelectionRole) -> f32 {
        let attrs = &fp.player.attributes;
        match role {
            SelectionRole::Shooter => attrs.effective(RatingKind::Attacking),
            SelectionRole::Assister => {
                (attrs.technical.passing as f32 + attrs.mental.vision as f32) / 2.0
            }
            SelectionRole::Dribbler => {
                (attrs.technical.dribbling as f32 + attrs.effective(RatingKind::Pace)) / 2.0
            }
            SelectionRole::Tackler | SelectionRole::Interceptor => {
                attrs.effective(RatingKind::Defending)
            }
            SelectionRole::FoulCommitter => {
                // Aggressive, ill-disciplined players give fouls away
                let aggression = attrs.mental.aggression as f32;
                let discipline = attrs.effective(RatingKind::Discipline);
                (aggression * (21.0 - discipline) / 20.0).max(0.1)
            }
            SelectionRole::AerialThreat => attrs.effective(RatingKind::Aerial),
            SelectionRole::Keeper => attrs.effective(RatingKind::Goalkeeping),
        }
    }

    fn position_weight(role: SelectionRole, slot: PlayerPosition) -> f32 {
        use PositionGroup::*;
        let group = slot.position_group();

        match role {
            SelectionRole::Keeper => 0.0,
            SelectionRole::Shooter => match slot {
                PlayerPosition::Striker
                | PlayerPosition::ForwardCenter
                | PlayerPosition::FalseNine => 5.0,
                PlayerPosition::WingerLeft | PlayerPosition::WingerRight => 3.0,
                PlayerPosition::AttackingMidfielder => 2.5,
                PlayerPosition::MidfielderCenter
                | PlayerPosition::MidfielderLeft
                | PlayerPosition::MidfielderRight => 1.2,
                PlayerPosition::DefensiveMidfielder => 0.6,
                _ => 0.3,
            },
            SelectionRole::Assister => match slot {
                PlayerPosition::AttackingMidfielder => 4.0,
                PlayerPosition::WingerLeft | PlayerPosition::WingerRight => 3.5,
                PlayerPosition::MidfielderLeft | PlayerPosition::MidfielderRight => 3.0,
                PlayerPosition::MidfielderCenter => 2.5,
                PlayerPosition::ForwardCenter | PlayerPosition::FalseNine => 2.0,
                PlayerPosition::Striker => 1.5,
                PlayerPosition::Wingback => 1.5,
                _ => 1.0,
            },
            SelectionRole::Dribbler => match group {
                Forward => 3.0,
                Midfielder => 2.0,
                Defender => 0.8,
                Goalkeeper => 0.0,
            },
            SelectionRole::Tackler | SelectionRole::Interceptor => match slot {
                PlayerPosition::DefensiveMidfielder | PlayerPosition::DefenderCenter => 4.0,
                PlayerPosition::Sweeper => 3.5,
                PlayerPosition::DefenderLeft
                | PlayerPosition::DefenderRight
                | PlayerPosition::Wingback => 3.0,
                PlayerPosition::MidfielderCenter => 2.0,
                PlayerPosition::MidfielderLeft | PlayerPosition::MidfielderRight => 1.5,
                PlayerPosition::AttackingMidfielder => 0.8,
                _ => 0.5,
            },
            SelectionRole::FoulCommitter => match group {
                Defender => 3.0,
                Midfielder => 2.5,
                Forward => 1.0,
                Goalkeeper => 0.0,
            },
            SelectionRole::AerialThreat => match slot {
                PlayerPosition::Striker
                | PlayerPosition::ForwardCenter
                | PlayerPosition::DefenderCenter => 4.0,
                PlayerPosition::Sweeper | PlayerPosition::FalseNine => 2.0,
                _ => 1.0,
            },
        }
    }

    /// Fixes the set-piece duties from attributes, once, before kickoff.
    /// The keeper never takes them.
    pub fn set_piece_takers(team: &TeamState) -> SetPieceTakers {
        let outfield: Vec<&FieldPlayer> = team
            .on_pitch
            .iter()
            .filter(|fp| !fp.slot.is_goalkeeper())
            .collect();

        let pick = |key: fn(&FieldPlayer) -> u8| -> u32 {
            outfield
                .iter()
                .max_by_key(|fp| {
                    (
                        key(fp),
                        fp.player.attributes.current_ability,
                        Reverse(fp.player.shirt_number),
                        Reverse(fp.player.id),
                    )
                })
                .map(|fp| fp.player.id)
                .unwrap_or(0)
        };

        SetPieceTakers {
            corner: pick(|fp| fp.player.attributes.technical.corners),
            free_kick: pick(|fp| fp.player.attributes.technical.free_kick_taking),
            penalty: pick(|fp| fp.player.attributes.technical.penalty_taking),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::events::TeamSide;
    use crate::r#match::state::tests::test_team_state;
    use rand::SeedableRng;

    #[test]
    fn test_keeper_role_always_returns_the_goalkeeper() {
        let team = test_team_state(TeamSide::Home, 100);
        let mut rng = StdRng::seed_from_u64(1);

        let keeper = PlayerSelector::select(&team, SelectionRole::Keeper, &[], &mut rng).unwrap();
        assert!(keeper.slot.is_goalkeeper());
    }

    #[test]
    fn test_goalkeeper_never_picked_for_offensive_roles() {
        let team = test_team_state(TeamSide::Home, 100);
        let keeper_id = team.goalkeeper().unwrap().player.id;
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..200 {
            let shooter =
                PlayerSelector::select(&team, SelectionRole::Shooter, &[], &mut rng).unwrap();
            assert_ne!(shooter.player.id, keeper_id);
        }
    }

    #[test]
    fn test_exclusion_supports_without_replacement_draws() {
        let team = test_team_state(TeamSide::Home, 100);
        let mut rng = StdRng::seed_from_u64(3);

        let shooter =
            PlayerSelector::select(&team, SelectionRole::Shooter, &[], &mut rng).unwrap();
        let shooter_id = shooter.player.id;
        for _ in 0..100 {
            let assister =
                PlayerSelector::select(&team, SelectionRole::Assister, &[shooter_id], &mut rng)
                    .unwrap();
            assert_ne!(assister.player.id, shooter_id);
        }
    }

    #[test]
    fn test_strikers_shoot_more_than_fullbacks() {
        let team = test_team_state(TeamSide::Home, 100);
        let mut rng = StdRng::seed_from_u64(4);

        let striker_id = team
            .on_pitch
            .iter()
            .find(|fp| fp.slot == PlayerPosition::Striker)
            .unwrap()
            .player
            .id;
        let fullback_id = team
            .on_pitch
            .iter()
            .find(|fp| fp.slot == PlayerPosition::DefenderLeft)
            .unwrap()
            .player
            .id;

        let mut striker_picks = 0;
        let mut fullback_picks = 0;
        for _ in 0..500 {
            let pick =
                PlayerSelector::select(&team, SelectionRole::Shooter, &[], &mut rng).unwrap();
            if pick.player.id == striker_id {
                striker_picks += 1;
            } else if pick.player.id == fullback_id {
                fullback_picks += 1;
            }
        }

        assert!(striker_picks > fullback_picks);
    }

    #[test]
    fn test_set_piece_takers_follow_attributes() {
        let mut team = test_team_state(TeamSide::Home, 100);
        team.on_pitch[6].player.attributes.technical.corners = 19;
        team.on_pitch[10].player.attributes.technical.penalty_taking = 19;
        let corner_expert = team.on_pitch[6].player.id;
        let penalty_expert = team.on_pitch[10].player.id;

        let takers = PlayerSelector::set_piece_takers(&team);

        assert_eq!(takers.corner, corner_expert);
        assert_eq!(takers.penalty, penalty_expert);
    }

    #[test]
    fn test_set_piece_takers_exclude_the_keeper() {
        let mut team = test_team_state(TeamSide::Home, 100);
        if let Some(fp) = team.on_pitch.iter_mut().find(|fp| fp.slot.is_goalkeeper()) {
            fp.player.attributes.technical.free_kick_taking = 20;
        }
        let keeper_id = team.goalkeeper().unwrap().player.id;

        let takers = PlayerSelector::set_piece_takers(&team);
        assert_ne!(takers.free_kick, keeper_id);
    }
}
