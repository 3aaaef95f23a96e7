use crate::club::player::{PlayerPosition, PositionGroup};
use crate::r#match::events::{EventKind, TeamSide};
use crate::r#match::lineup::MatchLineup;
use crate::r#match::state::Score;
use crate::r#match::stats::PerSide;
use crate::r#match::tick::Tick;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashMap;

/// Per-player line in the frozen result, derived entirely from the event
/// stream after full time.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerMatchStats {
    pub goals: u16,
    pub assists: u16,
    pub shots: u16,
    pub shots_on_target: u16,
    pub passes_attempted: u16,
    pub passes_completed: u16,
    pub tackles: u16,
    pub rating: f32,
}

/// Walks the tick list and accumulates every player's contribution, then
/// grades each involved player on the classic 1.0..=10.0 scale.
pub fn collect_player_stats(
    minutes: &[Tick],
    lineups: &PerSide<MatchLineup>,
    final_score: Score,
) -> BTreeMap<u32, PlayerMatchStats> {
    let mut stats: BTreeMap<u32, PlayerMatchStats> = BTreeMap::new();
    let mut sides: HashMap<u32, TeamSide> = HashMap::new();
    let mut positions: HashMap<u32, PlayerPosition> = HashMap::new();

    for side in [TeamSide::Home, TeamSide::Away] {
        for slot in &lineups.get(side).starting {
            sides.insert(slot.player_id, side);
            positions.insert(slot.player_id, slot.position);
            stats.entry(slot.player_id).or_default();
        }
    }

    for tick in minutes {
        for event in &tick.events {
            let pid = event.primary_player_id;
            sides.entry(pid).or_insert(event.team);

            match event.kind {
                EventKind::Goal => {
                    let line = stats.entry(pid).or_default();
                    line.goals += 1;
                    line.shots += 1;
                    line.shots_on_target += 1;
                    if let Some(assister) = event.secondary_player_id {
                        sides.entry(assister).or_insert(event.team);
                        stats.entry(assister).or_default().assists += 1;
                    }
                }
                EventKind::ShotOnTarget => {
                    let line = stats.entry(pid).or_default();
                    line.shots += 1;
                    line.shots_on_target += 1;
                }
                EventKind::ShotOffTarget | EventKind::ShotBlocked => {
                    stats.entry(pid).or_default().shots += 1;
                }
                EventKind::PassCompleted => {
                    let line = stats.entry(pid).or_default();
                    line.passes_attempted += 1;
                    line.passes_completed += 1;
                }
                EventKind::PassAttempted => {
                    stats.entry(pid).or_default().passes_attempted += 1;
                }
                EventKind::Tackle => {
                    stats.entry(pid).or_default().tackles += 1;
                }
                EventKind::Substitution => {
                    // The incoming player inherits the vacated slot
                    if let Some(on) = event.secondary_player_id {
                        sides.insert(on, event.team);
                        if let Some(&slot) = positions.get(&pid) {
                            positions.insert(on, slot);
                        }
                        stats.entry(on).or_default();
                    }
                }
                _ => {
                    stats.entry(pid).or_default();
                }
            }
        }
    }

    for (pid, line) in stats.iter_mut() {
        let side = sides.get(pid).copied().unwrap_or(TeamSide::Home);
        let group = positions
            .get(pid)
            .map(|p| p.position_group())
            .unwrap_or(PositionGroup::Midfielder);

        let (own_goals, opponent_goals) = match side {
            TeamSide::Home => (final_score.home, final_score.away),
            TeamSide::Away => (final_score.away, final_score.home),
        };

        line.rating = match_rating(line, own_goals, opponent_goals, group);
    }

    stats
}

/// Classic match rating: base 6.0, nudged by direct contributions,
/// accuracy, defensive work and the team result.
fn match_rating(
    line: &PlayerMatchStats,
    team_goals: u8,
    opponent_goals: u8,
    group: PositionGroup,
) -> f32 {
    let mut rating: f32 = 6.0;

    rating += (line.goals as f32 * 1.0).min(3.0);
    rating += (line.assists as f32 * 0.5).min(1.5);

    if line.passes_attempted > 5 {
        let pass_pct = line.passes_completed as f32 / line.passes_attempted as f32;
        rating += ((pass_pct - 0.70) * 2.0).clamp(-0.4, 0.5);
    }

    if line.shots > 0 {
        let accuracy = line.shots_on_target as f32 / line.shots as f32;
        rating += ((accuracy - 0.4) * 0.6).clamp(-0.2, 0.3);
    }

    let tackle_weight = match group {
        PositionGroup::Defender => 0.12,
        PositionGroup::Midfielder => 0.08,
        _ => 0.05,
    };
    rating += (line.tackles as f32 * tackle_weight).min(0.5);

    if team_goals > opponent_goals {
        rating += 0.3;
    } else if team_goals < opponent_goals {
        rating -= 0.2;
    }

    if opponent_goals == 0 {
        match group {
            PositionGroup::Goalkeeper => rating += 0.8,
            PositionGroup::Defender => rating += 0.4,
            PositionGroup::Midfielder => rating += 0.1,
            _ => {}
        }
    }

    if opponent_goals >= 3 {
        match group {
            PositionGroup::Goalkeeper => rating -= 0.5,
            PositionGroup::Defender => rating -= 0.3,
            _ => {}
        }
    }

    rating.clamp(1.0, 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scorer_outrates_a_quiet_teammate() {
        let mut scorer = PlayerMatchStats::default();
        scorer.goals = 2;
        scorer.shots = 3;
        scorer.shots_on_target = 3;

        let quiet = PlayerMatchStats::default();

        let scorer_rating = match_rating(&scorer, 2, 0, PositionGroup::Forward);
        let quiet_rating = match_rating(&quiet, 2, 0, PositionGroup::Forward);

        assert!(scorer_rating > quiet_rating);
        assert!(scorer_rating <= 10.0);
    }

    #[test]
    fn test_clean_sheet_rewards_the_back_line() {
        let line = PlayerMatchStats::default();

        let defender = match_rating(&line, 1, 0, PositionGroup::Defender);
        let forward = match_rating(&line, 1, 0, PositionGroup::Forward);

        assert!(defender > forward);
    }

    #[test]
    fn test_rating_bounds() {
        let mut heavy = PlayerMatchStats::default();
        heavy.goals = 6;
        heavy.assists = 6;
        heavy.tackles = 20;
        heavy.shots = 6;
        heavy.shots_on_target = 6;

        let rating = match_rating(&heavy, 6, 0, PositionGroup::Forward);
        assert!(rating <= 10.0);

        let blank = PlayerMatchStats::default();
        let rating = match_rating(&blank, 0, 5, PositionGroup::Goalkeeper);
        assert!(rating >= 1.0);
    }
}
