use crate::club::player::{Player, PlayerPosition, RatingKind};
use crate::r#match::discipline::MAX_SUBSTITUTIONS;
use crate::r#match::error::MatchError;
use crate::r#match::events::{EventKind, MatchEvent, TeamSide};
use crate::r#match::stats::TeamStats;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    PreMatch,
    FirstHalf,
    HalfTime,
    SecondHalf,
    FullTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Possession {
    Home,
    Away,
    Contested,
}

impl Possession {
    pub fn side(&self) -> Option<TeamSide> {
        match self {
            Possession::Home => Some(TeamSide::Home),
            Possession::Away => Some(TeamSide::Away),
            Possession::Contested => None,
        }
    }
}

/// Coarse pitch region from the possessing team's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallZone {
    Defensive,
    Middle,
    Attacking,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u8,
    pub away: u8,
}

impl Score {
    pub fn get(&self, side: TeamSide) -> u8 {
        match side {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }

    pub fn total(&self) -> u16 {
        self.home as u16 + self.away as u16
    }

    fn add(&mut self, side: TeamSide) {
        match side {
            TeamSide::Home => self.home += 1,
            TeamSide::Away => self.away += 1,
        }
    }
}

/// A player currently on the pitch, bound to the formation slot they occupy.
#[derive(Debug, Clone)]
pub struct FieldPlayer {
    pub player: Player,
    pub slot: PlayerPosition,
    pub x: f32,
    pub y: f32,
}

/// Evolving per-side state. Mutated only through `MatchState::apply`.
#[derive(Debug, Clone)]
pub struct TeamState {
    pub side: TeamSide,
    pub team_id: u32,
    pub team_name: String,
    pub on_pitch: Vec<FieldPlayer>,
    pub bench: Vec<Player>,
    pub substitutions_used: u8,
    pub yellow: HashMap<u32, u8>,
    pub red_set: HashSet<u32>,
    pub substituted_off: HashSet<u32>,
    pub fatigue: HashMap<u32, f32>,
    pub stats: TeamStats,
}

impl TeamState {
    pub fn new(
        side: TeamSide,
        team_id: u32,
        team_name: String,
        on_pitch: Vec<FieldPlayer>,
        bench: Vec<Player>,
    ) -> Self {
        let fatigue = on_pitch.iter().map(|fp| (fp.player.id, 1.0)).collect();

        TeamState {
            side,
            team_id,
            team_name,
            on_pitch,
            bench,
            substitutions_used: 0,
            yellow: HashMap::new(),
            red_set: HashSet::new(),
            substituted_off: HashSet::new(),
            fatigue,
            stats: TeamStats::default(),
        }
    }

    pub fn field_player(&self, player_id: u32) -> Option<&FieldPlayer> {
        self.on_pitch.iter().find(|fp| fp.player.id == player_id)
    }

    pub fn goalkeeper(&self) -> Option<&FieldPlayer> {
        self.on_pitch.iter().find(|fp| fp.slot.is_goalkeeper())
    }

    pub fn fatigue_of(&self, player_id: u32) -> f32 {
        self.fatigue.get(&player_id).copied().unwrap_or(1.0)
    }

    /// Mean central-midfield rating weighted by freshness, used by the
    /// possession engine. Falls back to the outfield mean when a side has
    /// no recognised central midfielder left.
    pub fn midfield_rating(&self) -> f32 {
        let mids: Vec<f32> = self
            .on_pitch
            .iter()
            .filter(|fp| fp.slot.is_central_midfielder())
            .map(|fp| {
                fp.player.attributes.effective(RatingKind::Midfield) * self.fatigue_of(fp.player.id)
            })
            .collect();

        if !mids.is_empty() {
            return mids.iter().sum::<f32>() / mids.len() as f32;
        }

        let outfield: Vec<f32> = self
            .on_pitch
            .iter()
            .filter(|fp| !fp.slot.is_goalkeeper())
            .map(|fp| {
                fp.player.attributes.effective(RatingKind::Midfield) * self.fatigue_of(fp.player.id)
            })
            .collect();

        if outfield.is_empty() {
            8.0
        } else {
            outfield.iter().sum::<f32>() / outfield.len() as f32
        }
    }

    /// Re-assigns the goalkeeper slot to the on-pitch player with the best
    /// goalkeeping rating. Used when the keeper is sent off.
    pub fn demote_outfielder_to_goalkeeper(&mut self) {
        if self.goalkeeper().is_some() || self.on_pitch.is_empty() {
            return;
        }

        let best = self
            .on_pitch
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| {
                let ra = a.player.attributes.effective(RatingKind::Goalkeeping);
                let rb = b.player.attributes.effective(RatingKind::Goalkeeping);
                ra.partial_cmp(&rb).unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(i, _)| i);

        if let Some(index) = best {
            let fp = &mut self.on_pitch[index];
            fp.slot = PlayerPosition::Goalkeeper;
            fp.x = 50.0;
            fp.y = 4.0;
        }
    }

    /// Whether the goalkeeper slot is covered by a player whose natural
    /// position is not GK (after a keeper dismissal).
    pub fn has_makeshift_goalkeeper(&self) -> bool {
        self.goalkeeper()
            .map(|fp| !fp.player.position.is_goalkeeper())
            .unwrap_or(false)
    }
}

/// Complete evolving match state. `apply` is the only mutation path for
/// event effects; the engine additionally owns minute/phase/possession
/// bookkeeping between events.
#[derive(Debug, Clone)]
pub struct MatchState {
    pub minute: u8,
    pub phase: MatchPhase,
    pub score: Score,
    pub possession: Possession,
    pub ball_zone: BallZone,
    pub home: TeamState,
    pub away: TeamState,
}

impl MatchState {
    pub fn new(home: TeamState, away: TeamState) -> Self {
        MatchState {
            minute: 0,
            phase: MatchPhase::PreMatch,
            score: Score::default(),
            possession: Possession::Contested,
            ball_zone: BallZone::Middle,
            home,
            away,
        }
    }

    pub fn side(&self, side: TeamSide) -> &TeamState {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub fn side_mut(&mut self, side: TeamSide) -> &mut TeamState {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    /// Applies one resolved event's declarative effect. Events arrive in
    /// causal order within a tick; card cascades (second yellow) are the
    /// engine's responsibility and arrive here as separate red card events.
    pub fn apply(&mut self, event: &MatchEvent) -> Result<(), MatchError> {
        let side = event.team;
        match event.kind {
            EventKind::Goal => {
                self.score.add(side);
                let stats = &mut self.side_mut(side).stats;
                stats.shots += 1;
                stats.shots_on_target += 1;
            }
            EventKind::ShotOnTarget => {
                let stats = &mut self.side_mut(side).stats;
                stats.shots += 1;
                stats.shots_on_target += 1;
            }
            EventKind::ShotOffTarget | EventKind::ShotBlocked => {
                self.side_mut(side).stats.shots += 1;
            }
            // The shot_on_target preceding a save already carried the stat
            EventKind::Save => {}
            EventKind::Corner => {
                self.side_mut(side).stats.corners += 1;
            }
            EventKind::Foul => {
                self.side_mut(side).stats.fouls += 1;
            }
            EventKind::FreeKick | EventKind::Penalty | EventKind::Injury => {}
            EventKind::Offside => {
                self.side_mut(side).stats.offsides += 1;
            }
            EventKind::PassCompleted => {
                let stats = &mut self.side_mut(side).stats;
                stats.passes_attempted += 1;
                stats.passes_completed += 1;
            }
            EventKind::PassAttempted => {
                self.side_mut(side).stats.passes_attempted += 1;
            }
            EventKind::Tackle => {
                self.side_mut(side).stats.tackles += 1;
            }
            EventKind::Interception => {
                self.side_mut(side).stats.interceptions += 1;
            }
            EventKind::YellowCard => {
                let team = self.side_mut(side);
                if team.field_player(event.primary_player_id).is_none() {
                    return Err(MatchError::Invariant(format!(
                        "yellow card for player {} who is not on the pitch",
                        event.primary_player_id
                    )));
                }
                *team.yellow.entry(event.primary_player_id).or_insert(0) += 1;
                team.stats.yellow_cards += 1;
            }
            EventKind::RedCard => {
                let had_goalkeeper;
                {
                    let team = self.side_mut(side);
                    let index = team
                        .on_pitch
                        .iter()
                        .position(|fp| fp.player.id == event.primary_player_id)
                        .ok_or_else(|| {
                            MatchError::Invariant(format!(
                                "red card for player {} who is not on the pitch",
                                event.primary_player_id
                            ))
                        })?;

                    had_goalkeeper = team.on_pitch[index].slot.is_goalkeeper();
                    team.on_pitch.remove(index);
                    team.red_set.insert(event.primary_player_id);
                    team.stats.red_cards += 1;
                }
                if had_goalkeeper {
                    self.side_mut(side).demote_outfielder_to_goalkeeper();
                }
            }
            EventKind::Substitution => {
                let team = self.side_mut(side);
                if team.substitutions_used >= MAX_SUBSTITUTIONS {
                    return Err(MatchError::Invariant(format!(
                        "substitution limit exceeded for {:?}",
                        side
                    )));
                }

                let off_id = event.primary_player_id;
                let on_id = event.secondary_player_id.ok_or_else(|| {
                    MatchError::Invariant("substitution without incoming player".into())
                })?;

                let off_index = team
                    .on_pitch
                    .iter()
                    .position(|fp| fp.player.id == off_id)
                    .ok_or_else(|| {
                        MatchError::Invariant(format!(
                            "substitution of player {} who is not on the pitch",
                            off_id
                        ))
                    })?;

                let bench_index = team
                    .bench
                    .iter()
                    .position(|p| p.id == on_id)
                    .ok_or_else(|| {
                        MatchError::Invariant(format!(
                            "substitute {} is not on the bench",
                            on_id
                        ))
                    })?;

                let incoming = team.bench.remove(bench_index);
                let (slot, x, y) = {
                    let fp = &team.on_pitch[off_index];
                    (fp.slot, fp.x, fp.y)
                };
                let outgoing = std::mem::replace(
                    &mut team.on_pitch[off_index],
                    FieldPlayer {
                        slot,
                        x,
                        y,
                        player: incoming,
                    },
                );

                team.substituted_off.insert(outgoing.player.id);
                team.fatigue.insert(on_id, 1.0);
                team.substitutions_used += 1;
            }
        }

        Ok(())
    }

    /// Counts this tick toward the possessing side's possession share.
    pub fn record_possession_tick(&mut self) {
        if let Some(side) = self.possession.side() {
            self.side_mut(side).stats.possession_ticks += 1;
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::club::player::{PlayerAttributes, PlayerPosition};
    use crate::r#match::events::{Coordinate, EventOutcome};

    pub fn field_player(id: u32, slot: PlayerPosition) -> FieldPlayer {
        FieldPlayer {
            player: Player {
                id,
                name: format!("Player {}", id),
                shirt_number: id as u8,
                position: slot,
                secondary_positions: Vec::new(),
                is_injured: false,
                attributes: PlayerAttributes::default(),
            },
            slot,
            x: 50.0,
            y: 50.0,
        }
    }

    pub fn test_team_state(side: TeamSide, base_id: u32) -> TeamState {
        let slots = [
            PlayerPosition::Goalkeeper,
            PlayerPosition::DefenderLeft,
            PlayerPosition::DefenderCenter,
            PlayerPosition::DefenderCenter,
            PlayerPosition::DefenderRight,
            PlayerPosition::DefensiveMidfielder,
            PlayerPosition::MidfielderCenter,
            PlayerPosition::MidfielderCenter,
            PlayerPosition::WingerLeft,
            PlayerPosition::WingerRight,
            PlayerPosition::Striker,
        ];

        let on_pitch = slots
            .iter()
            .enumerate()
            .map(|(i, &slot)| field_player(base_id + i as u32, slot))
            .collect();

        let bench = (11..16)
            .map(|i| field_player(base_id + i, PlayerPosition::MidfielderCenter).player)
            .collect();

        TeamState::new(side, base_id, format!("Team {}", base_id), on_pitch, bench)
    }

    pub fn test_state() -> MatchState {
        MatchState::new(
            test_team_state(TeamSide::Home, 100),
            test_team_state(TeamSide::Away, 200),
        )
    }

    fn event(kind: EventKind, side: TeamSide, pid: u32) -> MatchEvent {
        MatchEvent::new(
            kind,
            side,
            pid,
            format!("Player {}", pid),
            EventOutcome::Success,
            Coordinate::new(50.0, 50.0),
            String::new(),
        )
    }

    #[test]
    fn test_goal_updates_score_and_stats() {
        let mut state = test_state();
        state
            .apply(&event(EventKind::Goal, TeamSide::Home, 110))
            .unwrap();

        assert_eq!(state.score.home, 1);
        assert_eq!(state.score.away, 0);
        assert_eq!(state.home.stats.shots, 1);
        assert_eq!(state.home.stats.shots_on_target, 1);
    }

    #[test]
    fn test_save_has_no_stat_effect() {
        let mut state = test_state();
        state
            .apply(&event(EventKind::Save, TeamSide::Away, 200))
            .unwrap();

        assert_eq!(state.away.stats, TeamStats::default());
        assert_eq!(state.score.total(), 0);
    }

    #[test]
    fn test_red_card_removes_player_permanently() {
        let mut state = test_state();
        state
            .apply(&event(EventKind::RedCard, TeamSide::Away, 210))
            .unwrap();

        assert_eq!(state.away.on_pitch.len(), 10);
        assert!(state.away.red_set.contains(&210));
        assert_eq!(state.away.stats.red_cards, 1);

        // A second red for the same player is an invariant violation
        assert!(state
            .apply(&event(EventKind::RedCard, TeamSide::Away, 210))
            .is_err());
    }

    #[test]
    fn test_red_carded_goalkeeper_is_replaced_by_demotion() {
        let mut state = test_state();
        state
            .apply(&event(EventKind::RedCard, TeamSide::Home, 100))
            .unwrap();

        assert_eq!(state.home.on_pitch.len(), 10);
        let keeper = state.home.goalkeeper().expect("one GK must remain");
        assert!(!keeper.player.position.is_goalkeeper());
        assert!(state.home.has_makeshift_goalkeeper());
    }

    #[test]
    fn test_substitution_swaps_players() {
        let mut state = test_state();
        let sub = event(EventKind::Substitution, TeamSide::Home, 106)
            .with_secondary(111, "Player 111".into());

        state.apply(&sub).unwrap();

        assert_eq!(state.home.substitutions_used, 1);
        assert!(state.home.substituted_off.contains(&106));
        assert!(state.home.field_player(111).is_some());
        assert!(state.home.field_player(106).is_none());
        assert_eq!(state.home.fatigue_of(111), 1.0);
        assert_eq!(state.home.on_pitch.len(), 11);
    }

    #[test]
    fn test_substitution_cap_is_enforced() {
        let mut state = test_state();
        for i in 0..5 {
            let sub = event(EventKind::Substitution, TeamSide::Home, 101 + i)
                .with_secondary(111 + i, format!("Player {}", 111 + i));
            state.apply(&sub).unwrap();
        }

        let sixth = event(EventKind::Substitution, TeamSide::Home, 110)
            .with_secondary(109, "Player 109".into());
        assert!(state.apply(&sixth).is_err());
    }

    #[test]
    fn test_second_yellow_counting() {
        let mut state = test_state();
        state
            .apply(&event(EventKind::YellowCard, TeamSide::Away, 205))
            .unwrap();
        state
            .apply(&event(EventKind::YellowCard, TeamSide::Away, 205))
            .unwrap();

        assert_eq!(state.away.yellow[&205], 2);
        assert_eq!(state.away.stats.yellow_cards, 2);
    }

    #[test]
    fn test_possession_tick_counting() {
        let mut state = test_state();
        state.possession = Possession::Away;
        state.record_possession_tick();
        state.possession = Possession::Contested;
        state.record_possession_tick();

        assert_eq!(state.away.stats.possession_ticks, 1);
        assert_eq!(state.home.stats.possession_ticks, 0);
    }
}
