use crate::club::player::{Player, PositionGroup};
use crate::r#match::chain::{CausalChainBuilder, PrimaryEvent};
use crate::r#match::commentary::CommentaryBuilder;
use crate::r#match::discipline::DisciplineModel;
use crate::r#match::error::MatchError;
use crate::r#match::events::{
    Coordinate, EventKind, EventOutcome, MatchEvent, TeamSide,
};
use crate::r#match::fatigue::FatigueModel;
use crate::r#match::input::{MatchInput, SideInput, SimulationOptions};
use crate::r#match::lineup::{LineupResolver, MatchLineup, SideLineupView};
use crate::r#match::modifiers::TacticalModifiers;
use crate::r#match::player_stats::collect_player_stats;
use crate::r#match::possession::PossessionEngine;
use crate::r#match::result::MatchResult;
use crate::r#match::selector::{PlayerSelector, SetPieceTakers};
use crate::r#match::state::{
    BallZone, FieldPlayer, MatchPhase, MatchState, TeamState,
};
use crate::r#match::stats::PerSide;
use crate::r#match::tick::Tick;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use std::time::{Duration, Instant};

/// Hard wall-clock budget for computing one tick.
const TICK_BUDGET: Duration = Duration::from_millis(50);

const FIRST_HALF_MINUTES: u8 = 45;
const REGULATION_MINUTES: u8 = 90;

/// The driver: owns the state machine for the full ninety minutes and
/// yields one tick per simulated minute. Given identical input and seed,
/// every tick is byte-identical.
#[derive(Debug)]
pub struct MatchEngine {
    match_id: String,
    state: MatchState,
    rng: StdRng,
    seed: u64,
    options: SimulationOptions,
    modifiers: PerSide<TacticalModifiers>,
    takers: PerSide<SetPieceTakers>,
    lineups: PerSide<MatchLineup>,
    lineup_views: PerSide<SideLineupView>,
    second_half_incidents: u16,
    stoppage: Option<u8>,
    finished: bool,
    failed: bool,
}

impl MatchEngine {
    /// Validates inputs and resolves lineups; any failure here surfaces
    /// before the first tick.
    pub fn new(input: MatchInput) -> Result<Self, MatchError> {
        let options = input.options.clamped();

        let seed = match options.seed {
            Some(seed) => seed,
            // An unseeded run still records the seed it drew, so any match
            // can be replayed afterwards
            None => rand::rng().random(),
        };

        let home_lineup = LineupResolver::resolve(
            &input.home.team,
            &input.home.formation,
            input.home.lineup.as_ref(),
            options.allow_auto_lineup,
        )?;
        let away_lineup = LineupResolver::resolve(
            &input.away.team,
            &input.away.formation,
            input.away.lineup.as_ref(),
            options.allow_auto_lineup,
        )?;

        let home_state = Self::build_team_state(TeamSide::Home, &input.home, &home_lineup)?;
        let away_state = Self::build_team_state(TeamSide::Away, &input.away, &away_lineup)?;

        let lineup_views = PerSide {
            home: SideLineupView::build(&input.home.team, &input.home.formation, &home_lineup),
            away: SideLineupView::build(&input.away.team, &input.away.formation, &away_lineup),
        };

        let modifiers = PerSide {
            home: TacticalModifiers::from(&input.home.tactic),
            away: TacticalModifiers::from(&input.away.tactic),
        };

        let takers = PerSide {
            home: PlayerSelector::set_piece_takers(&home_state),
            away: PlayerSelector::set_piece_takers(&away_state),
        };

        debug!(
            "match {} ready: {} vs {}, seed {:#018x}",
            input.match_id, input.home.team.name, input.away.team.name, seed
        );

        Ok(MatchEngine {
            match_id: input.match_id,
            state: MatchState::new(home_state, away_state),
            rng: StdRng::seed_from_u64(seed),
            seed,
            options,
            modifiers,
            takers,
            lineups: PerSide {
                home: home_lineup,
                away: away_lineup,
            },
            lineup_views,
            second_half_incidents: 0,
            stoppage: None,
            finished: false,
            failed: false,
        })
    }

    fn build_team_state(
        side: TeamSide,
        input: &SideInput,
        lineup: &MatchLineup,
    ) -> Result<TeamState, MatchError> {
        let mut on_pitch = Vec::with_capacity(11);
        for slot in &lineup.starting {
            let player = input.team.player(slot.player_id).ok_or_else(|| {
                MatchError::Precondition(format!(
                    "starter {} missing from {} roster",
                    slot.player_id, input.team.name
                ))
            })?;
            on_pitch.push(FieldPlayer {
                player: player.clone(),
                slot: slot.position,
                x: slot.x,
                y: slot.y,
            });
        }

        let bench: Vec<Player> = lineup
            .bench
            .iter()
            .filter_map(|id| input.team.player(*id).cloned())
            .collect();

        Ok(TeamState::new(
            side,
            input.team.id,
            input.team.name.clone(),
            on_pitch,
            bench,
        ))
    }

    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn lineup_views(&self) -> &PerSide<SideLineupView> {
        &self.lineup_views
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Drains the whole match and assembles the batch document.
    pub fn run_to_completion(mut self) -> Result<MatchResult, MatchError> {
        let mut minutes = Vec::with_capacity(REGULATION_MINUTES as usize + 5);
        while let Some(tick) = self.next() {
            minutes.push(tick?);
        }
        Ok(self.into_result(minutes))
    }

    /// Freezes the final state around an already-collected tick list.
    pub fn into_result(self, minutes: Vec<Tick>) -> MatchResult {
        let player_stats = collect_player_stats(&minutes, &self.lineups, self.state.score);

        MatchResult {
            match_id: self.match_id,
            seed: self.seed,
            lineups: self.lineup_views,
            minutes,
            final_score: self.state.score,
            full_time_stats: PerSide {
                home: self.state.home.stats,
                away: self.state.away.stats,
            },
            player_stats,
        }
    }

    // ========== TICK LOOP ==========

    fn final_minute(&self) -> Option<u8> {
        self.stoppage.map(|extra| REGULATION_MINUTES + extra)
    }

    /// Stoppage is settled when the clock reaches 90: the busier the second
    /// half, the more is added, bounded by the configured bias.
    fn settle_stoppage(&mut self) -> u8 {
        let extra = (1 + self.second_half_incidents / 2).min(self.options.stoppage_bias as u16);
        let extra = extra as u8;
        self.stoppage = Some(extra);
        debug!("match {}: {} minutes of stoppage", self.match_id, extra);
        extra
    }

    fn advance_tick(&mut self) -> Result<Tick, MatchError> {
        let tick_started = Instant::now();
        let minute = self.state.minute + 1;
        self.state.minute = minute;

        if minute == REGULATION_MINUTES && self.stoppage.is_none() {
            self.settle_stoppage();
        }

        self.state.phase = if minute == FIRST_HALF_MINUTES {
            MatchPhase::HalfTime
        } else if self.final_minute() == Some(minute) {
            MatchPhase::FullTime
        } else if minute < FIRST_HALF_MINUTES {
            MatchPhase::FirstHalf
        } else {
            MatchPhase::SecondHalf
        };

        if minute == 1 {
            PossessionEngine::kickoff(&mut self.state, TeamSide::Home);
        } else if minute == FIRST_HALF_MINUTES + 1 {
            PossessionEngine::kickoff(&mut self.state, TeamSide::Away);
        }

        // 1. Legs get heavier
        let home_fatigue = self.modifiers.home.fatigue_multiplier;
        let away_fatigue = self.modifiers.away.fatigue_multiplier;
        FatigueModel::advance_minute(&mut self.state.home, home_fatigue);
        FatigueModel::advance_minute(&mut self.state.away, away_fatigue);

        // 2. The ball moves
        PossessionEngine::advance(&mut self.state, &self.modifiers, &mut self.rng);
        self.state.record_possession_tick();

        // 3. Does anything happen this minute?
        let mut events: Vec<MatchEvent> = Vec::new();
        let ignition = PossessionEngine::ignition_probability(&self.state, &self.modifiers);
        let ignited = self.rng.random::<f32>() < ignition;

        if ignited {
            if let Some(side) = self.state.possession.side() {
                let primary = self.choose_primary(side);
                let chain = CausalChainBuilder::expand(
                    primary,
                    side,
                    &self.state,
                    &self.modifiers,
                    &self.takers,
                    &mut self.rng,
                );
                self.apply_chain(chain, minute, &mut events)?;
            }
        }

        // 4. The benches react
        self.run_substitutions(minute, &mut events)?;

        let commentary = if self.options.commentary {
            CommentaryBuilder::tick_line(minute, &events)
        } else {
            String::new()
        };

        if tick_started.elapsed() > TICK_BUDGET {
            return Err(MatchError::Invariant(format!(
                "tick {} exceeded its {}ms budget",
                minute,
                TICK_BUDGET.as_millis()
            )));
        }

        let tick = Tick {
            minute,
            phase: self.state.phase,
            possession: self.state.possession,
            ball_zone: self.state.ball_zone,
            score: self.state.score,
            stats: PerSide {
                home: self.state.home.stats,
                away: self.state.away.stats,
            },
            events,
            commentary,
        };

        if self.state.phase == MatchPhase::FullTime {
            self.finished = true;
        }

        Ok(tick)
    }

    fn apply_chain(
        &mut self,
        chain: Vec<MatchEvent>,
        minute: u8,
        events: &mut Vec<MatchEvent>,
    ) -> Result<(), MatchError> {
        for event in chain {
            self.state.apply(&event).map_err(|err| match err {
                MatchError::Invariant(msg) => MatchError::Invariant(msg),
                other => MatchError::Internal {
                    minute,
                    context: other.reason(),
                },
            })?;

            self.note_incident(minute, event.kind);

            // A knock saps the player; the manager heuristic reacts below
            if event.kind == EventKind::Injury {
                let team = self.state.side_mut(event.team);
                team.fatigue.insert(event.primary_player_id, 0.2);
            }

            let second_yellow = event.kind == EventKind::YellowCard
                && DisciplineModel::is_second_yellow(
                    self.state.side(event.team),
                    event.primary_player_id,
                );

            let cascade = second_yellow.then(|| {
                let mut red = MatchEvent::new(
                    EventKind::RedCard,
                    event.team,
                    event.primary_player_id,
                    event.primary_player_name.clone(),
                    EventOutcome::Failure,
                    event.coordinates,
                    format!("{} is dismissed, second booking", event.primary_player_name),
                );
                red.sequence = event.sequence.clone();
                red
            });

            events.push(event);

            if let Some(red) = cascade {
                self.state.apply(&red)?;
                self.note_incident(minute, red.kind);
                events.push(red);
            }
        }

        Ok(())
    }

    fn note_incident(&mut self, minute: u8, kind: EventKind) {
        if minute > FIRST_HALF_MINUTES
            && matches!(
                kind,
                EventKind::Goal
                    | EventKind::YellowCard
                    | EventKind::RedCard
                    | EventKind::Substitution
                    | EventKind::Injury
            )
        {
            self.second_half_incidents += 1;
        }
    }

    /// Weighted primary-event table, conditioned on zone and the defending
    /// side's line height.
    fn choose_primary(&mut self, side: TeamSide) -> PrimaryEvent {
        let defending = self.modifiers.get(side.opposite());

        let (attack, duel, foul, corner, offside) = match self.state.ball_zone {
            BallZone::Attacking => (0.55, 0.12, 0.12, 0.08, 0.06),
            BallZone::Middle => (0.35, 0.30, 0.15, 0.02, 0.04),
            BallZone::Defensive => (0.18, 0.35, 0.20, 0.02, 0.01),
        };
        let offside = (offside + defending.offside_bonus).max(0.0);
        let injury = 0.03;

        let table = [
            (PrimaryEvent::OpenPlayAttack, attack),
            (PrimaryEvent::MidfieldDuel, duel),
            (PrimaryEvent::Foul, foul),
            (PrimaryEvent::CornerSetPiece, corner),
            (PrimaryEvent::Offside, offside),
            (PrimaryEvent::Injury, injury),
        ];

        let total: f32 = table.iter().map(|(_, w)| w).sum();
        let mut roll = self.rng.random_range(0.0..total);
        for (primary, weight) in table {
            if roll < weight {
                return primary;
            }
            roll -= weight;
        }

        PrimaryEvent::OpenPlayAttack
    }

    // ========== MANAGER HEURISTIC ==========

    /// At most one substitution per side per minute. A makeshift keeper is
    /// fixed first; otherwise the most tired player below the threshold
    /// comes off for the best bench fit.
    fn run_substitutions(
        &mut self,
        minute: u8,
        events: &mut Vec<MatchEvent>,
    ) -> Result<(), MatchError> {
        for side in [TeamSide::Home, TeamSide::Away] {
            let Some(event) = self.plan_substitution(side, minute) else {
                continue;
            };

            self.state.apply(&event)?;
            self.note_incident(minute, event.kind);
            events.push(event);
        }

        Ok(())
    }

    fn plan_substitution(&self, side: TeamSide, minute: u8) -> Option<MatchEvent> {
        let losing_late = minute >= 70 && {
            let (own, other) = match side {
                TeamSide::Home => (self.state.score.home, self.state.score.away),
                TeamSide::Away => (self.state.score.away, self.state.score.home),
            };
            own < other
        };

        let team = self.state.side(side);

        let candidate = self.pick_player_to_replace(team)?;

        if team.substitutions_used >= self.options.max_substitutions
            || !DisciplineModel::can_substitute(team)
        {
            warn!(
                "match {}: substitution for {} dropped, no slots left",
                self.match_id, candidate.player.name
            );
            return None;
        }

        let incoming = Self::pick_substitute(team, &candidate, losing_late)?;

        debug!(
            "match {} minute {}: {} replaces {}",
            self.match_id, minute, incoming.1, candidate.player.name
        );

        let mut event = MatchEvent::new(
            EventKind::Substitution,
            side,
            candidate.player.id,
            candidate.player.name.clone(),
            EventOutcome::Neutral,
            Coordinate::new(50.0, 0.0),
            format!("{} makes way for {}", candidate.player.name, incoming.1),
        );
        event = event.with_secondary(incoming.0, incoming.1);
        Some(event)
    }

    /// The makeshift-keeper repair takes priority; after that the most
    /// drained outfield player below the fatigue threshold.
    fn pick_player_to_replace(&self, team: &TeamState) -> Option<FieldPlayer> {
        if team.has_makeshift_goalkeeper()
            && team.bench.iter().any(|p| p.is_goalkeeper())
        {
            return team.goalkeeper().cloned();
        }

        team.on_pitch
            .iter()
            .filter(|fp| !fp.slot.is_goalkeeper())
            .filter(|fp| FatigueModel::needs_substitution(team.fatigue_of(fp.player.id)))
            .min_by(|a, b| {
                let fa = team.fatigue_of(a.player.id);
                let fb = team.fatigue_of(b.player.id);
                fa.partial_cmp(&fb)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.player.id.cmp(&b.player.id))
            })
            .cloned()
    }

    fn pick_substitute(
        team: &TeamState,
        outgoing: &FieldPlayer,
        losing_late: bool,
    ) -> Option<(u32, String)> {
        // Repairing the keeper slot: a real GK comes on
        if outgoing.slot.is_goalkeeper() {
            return team
                .bench
                .iter()
                .filter(|p| p.is_goalkeeper())
                .max_by_key(|p| p.current_ability())
                .map(|p| (p.id, p.name.clone()));
        }

        let bench_outfield = |group_filter: Option<PositionGroup>| {
            team.bench
                .iter()
                .filter(|p| !p.is_goalkeeper())
                .filter(|p| {
                    group_filter
                        .map(|g| p.position.position_group() == g)
                        .unwrap_or(true)
                })
                .max_by_key(|p| p.current_ability())
        };

        // Chasing the game: throw on an attacker if one is available
        if losing_late {
            if let Some(p) = bench_outfield(Some(PositionGroup::Forward))
                .or_else(|| {
                    team.bench
                        .iter()
                        .filter(|p| {
                            p.position == crate::club::player::PlayerPosition::AttackingMidfielder
                        })
                        .max_by_key(|p| p.current_ability())
                })
            {
                return Some((p.id, p.name.clone()));
            }
        }

        // Like for like, then anyone fit
        bench_outfield(Some(outgoing.slot.position_group()))
            .or_else(|| bench_outfield(None))
            .map(|p| (p.id, p.name.clone()))
    }
}

impl Iterator for MatchEngine {
    type Item = Result<Tick, MatchError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.failed {
            return None;
        }

        match self.advance_tick() {
            Ok(tick) => Some(Ok(tick)),
            Err(err) => {
                self.failed = true;
                warn!("match {} aborted: {}", self.match_id, err);
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::player::{PlayerAttributes, PlayerPosition};
    use crate::club::team::{Formation, Tactic, Team};
    use crate::r#match::state::MatchPhase;

    fn player(id: u32, position: PlayerPosition, ability: u8) -> Player {
        let mut attributes = PlayerAttributes::default();
        attributes.current_ability = ability;
        Player {
            id,
            name: format!("Player {}", id),
            shirt_number: (id % 99) as u8,
            position,
            secondary_positions: Vec::new(),
            is_injured: false,
            attributes,
        }
    }

    fn squad(base_id: u32) -> Vec<Player> {
        use PlayerPosition::*;
        let mut players = vec![
            player(base_id + 1, Goalkeeper, 130),
            player(base_id + 2, DefenderLeft, 125),
            player(base_id + 3, DefenderCenter, 128),
            player(base_id + 4, DefenderCenter, 126),
            player(base_id + 5, DefenderRight, 124),
            player(base_id + 6, DefensiveMidfielder, 127),
            player(base_id + 7, MidfielderCenter, 132),
            player(base_id + 8, MidfielderCenter, 129),
            player(base_id + 9, WingerLeft, 134),
            player(base_id + 10, WingerRight, 133),
            player(base_id + 11, Striker, 138),
        ];
        players.push(player(base_id + 12, Goalkeeper, 110));
        players.push(player(base_id + 13, DefenderCenter, 112));
        players.push(player(base_id + 14, MidfielderCenter, 115));
        players.push(player(base_id + 15, Striker, 117));
        players.push(player(base_id + 16, AttackingMidfielder, 114));
        players
    }

    pub fn test_input(seed: u64) -> MatchInput {
        let mut options = SimulationOptions::default();
        options.seed = Some(seed);

        MatchInput {
            match_id: "alpha-beta".into(),
            home: SideInput {
                team: Team {
                    id: 1,
                    name: "Alpha".into(),
                    color: "red".into(),
                    players: squad(100),
                },
                formation: Formation::by_name("4-3-3").unwrap(),
                tactic: Tactic::default(),
                lineup: None,
            },
            away: SideInput {
                team: Team {
                    id: 2,
                    name: "Beta".into(),
                    color: "blue".into(),
                    players: squad(200),
                },
                formation: Formation::by_name("4-3-3").unwrap(),
                tactic: Tactic::default(),
                lineup: None,
            },
            options,
        }
    }

    fn run(seed: u64) -> MatchResult {
        MatchEngine::new(test_input(seed))
            .unwrap()
            .run_to_completion()
            .unwrap()
    }

    #[test]
    fn test_full_match_shape() {
        let result = run(1);

        assert!(result.minutes.len() >= 90);
        assert!(result.minutes.len() <= 95);

        // Minutes strictly increase from 1
        for (i, tick) in result.minutes.iter().enumerate() {
            assert_eq!(tick.minute as usize, i + 1);
        }

        let last = result.minutes.last().unwrap();
        assert_eq!(last.phase, MatchPhase::FullTime);

        let half_time_ticks: Vec<_> = result
            .minutes
            .iter()
            .filter(|t| t.phase == MatchPhase::HalfTime)
            .collect();
        assert_eq!(half_time_ticks.len(), 1);
        assert_eq!(half_time_ticks[0].minute, 45);
    }

    #[test]
    fn test_score_equals_goal_event_count_at_every_tick() {
        let result = run(2);

        let mut goals_seen = 0u16;
        for tick in &result.minutes {
            goals_seen += tick
                .events
                .iter()
                .filter(|e| e.kind == EventKind::Goal)
                .count() as u16;
            assert_eq!(tick.score.total(), goals_seen);
        }

        assert_eq!(result.final_score.total(), goals_seen);
    }

    #[test]
    fn test_stats_are_monotonic() {
        let result = run(3);

        let mut previous = result.minutes[0].stats;
        for tick in result.minutes.iter().skip(1) {
            assert!(tick.stats.home.includes(&previous.home));
            assert!(tick.stats.away.includes(&previous.away));
            previous = tick.stats;
        }
    }

    #[test]
    fn test_determinism_same_seed_same_frames() {
        let a = serde_json::to_string(&run(7)).unwrap();
        let b = serde_json::to_string(&run(7)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = serde_json::to_string(&run(11).minutes).unwrap();
        let b = serde_json::to_string(&run(12).minutes).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_replaying_events_reconstructs_score_and_stats() {
        let result = run(5);

        // Rebuild on a fresh state via apply() alone; field-mutating events
        // need the same starting XI, so reuse the engine's construction
        let engine = MatchEngine::new(test_input(5)).unwrap();
        let mut replay = engine.state.clone();

        for tick in &result.minutes {
            for event in &tick.events {
                replay.apply(event).unwrap();
            }
        }

        assert_eq!(replay.score, result.final_score);
        assert_eq!(replay.home.stats.shots, result.full_time_stats.home.shots);
        assert_eq!(
            replay.away.stats.passes_completed,
            result.full_time_stats.away.passes_completed
        );
        assert_eq!(
            replay.home.stats.yellow_cards,
            result.full_time_stats.home.yellow_cards
        );
    }

    #[test]
    fn test_second_yellow_cascades_to_red() {
        let mut engine = MatchEngine::new(test_input(1)).unwrap();
        let pid = engine.state.away.on_pitch[4].player.id;
        let name = engine.state.away.on_pitch[4].player.name.clone();

        let booking = || {
            MatchEvent::new(
                EventKind::YellowCard,
                TeamSide::Away,
                pid,
                name.clone(),
                EventOutcome::Failure,
                Coordinate::new(40.0, 50.0),
                String::new(),
            )
        };

        let mut events = Vec::new();
        engine.apply_chain(vec![booking()], 22, &mut events).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(engine.state.away.on_pitch.len(), 11);

        let mut events = Vec::new();
        engine.apply_chain(vec![booking()], 70, &mut events).unwrap();

        let kinds: Vec<EventKind> = events.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::YellowCard, EventKind::RedCard]);
        assert_eq!(engine.state.away.on_pitch.len(), 10);

        // The dismissed player can never be named in a substitution
        if let Some(event) = engine.plan_substitution(TeamSide::Away, 71) {
            assert_ne!(event.primary_player_id, pid);
        }
    }

    #[test]
    fn test_on_pitch_count_tracks_red_cards() {
        // Sweep seeds until a red card shows up, then verify the count
        for seed in 0..150 {
            let input = test_input(seed);
            let mut engine = MatchEngine::new(input).unwrap();
            let mut reds = PerSide { home: 0u8, away: 0u8 };

            while let Some(tick) = engine.next() {
                let tick = tick.unwrap();
                for event in &tick.events {
                    if event.kind == EventKind::RedCard {
                        *reds.get_mut(event.team) += 1;
                    }
                }
                assert_eq!(
                    engine.state.home.on_pitch.len(),
                    11 - reds.home as usize
                );
                assert_eq!(
                    engine.state.away.on_pitch.len(),
                    11 - reds.away as usize
                );
            }

            if reds.home + reds.away > 0 {
                return;
            }
        }
        panic!("no red card in 150 seeded matches");
    }

    #[test]
    fn test_substitutions_never_exceed_five() {
        for seed in 0..10 {
            let result = run(seed);
            let mut subs = PerSide { home: 0u8, away: 0u8 };
            let mut gone_off: Vec<u32> = Vec::new();

            for tick in &result.minutes {
                for event in &tick.events {
                    if event.kind == EventKind::Substitution {
                        *subs.get_mut(event.team) += 1;
                        gone_off.push(event.primary_player_id);
                    }
                    // A substituted-off player never acts again
                    if event.kind != EventKind::Substitution {
                        assert!(!gone_off.contains(&event.primary_player_id));
                    }
                }
            }

            assert!(subs.home <= 5);
            assert!(subs.away <= 5);
        }
    }

    #[test]
    fn test_one_goalkeeper_on_pitch_throughout() {
        for seed in 0..10 {
            let input = test_input(seed);
            let mut engine = MatchEngine::new(input).unwrap();

            while let Some(tick) = engine.next() {
                tick.unwrap();
                assert!(engine.state.home.goalkeeper().is_some());
                assert!(engine.state.away.goalkeeper().is_some());
            }
        }
    }

    #[test]
    fn test_fatigue_stays_bounded() {
        let input = test_input(21);
        let mut engine = MatchEngine::new(input).unwrap();

        while let Some(tick) = engine.next() {
            tick.unwrap();
            for team in [&engine.state.home, &engine.state.away] {
                for value in team.fatigue.values() {
                    assert!((0.0..=1.0).contains(value));
                }
            }
        }
    }

    #[test]
    fn test_unseeded_runs_record_their_seed() {
        let mut input = test_input(0);
        input.options.seed = None;

        let engine = MatchEngine::new(input).unwrap();
        // Whatever was drawn is exposed for replay
        let _ = engine.seed();
    }

    #[test]
    fn test_precondition_surfaces_before_any_tick() {
        let mut input = test_input(1);
        input.home.team.players.truncate(9);

        let err = MatchEngine::new(input).unwrap_err();
        assert!(matches!(err, MatchError::Precondition(_)));
    }

    #[test]
    fn test_goal_sequences_satisfy_causality() {
        let result = run(17);

        for tick in &result.minutes {
            for event in &tick.events {
                if event.kind == EventKind::Goal {
                    assert!(event.sequence.iter().any(|a| a.action.is_finish()));
                }
            }
        }
    }

    #[test]
    fn test_commentary_can_be_disabled() {
        let mut input = test_input(4);
        input.options.commentary = false;

        let result = MatchEngine::new(input).unwrap().run_to_completion().unwrap();
        assert!(result.minutes.iter().all(|t| t.commentary.is_empty()));
    }
}
