use crate::club::player::RatingKind;
use crate::r#match::discipline::DisciplineModel;
use crate::r#match::events::{
    ActionKind, Coordinate, EventKind, EventOutcome, MatchEvent, SubAction, TeamSide,
};
use crate::r#match::modifiers::TacticalModifiers;
use crate::r#match::outcome::{Attempt, OutcomeResolver};
use crate::r#match::selector::{PlayerSelector, SelectionRole, SetPieceTakers};
use crate::r#match::state::{BallZone, FieldPlayer, MatchState};
use crate::r#match::stats::PerSide;
use rand::RngExt;
use rand::rngs::StdRng;

/// Primary event classes a tick can ignite into. The engine picks one from
/// a zone/phase-conditioned table, the builder expands it into a causal
/// chain of sub-actions and resolved events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryEvent {
    OpenPlayAttack,
    MidfieldDuel,
    Foul,
    CornerSetPiece,
    Offside,
    Injury,
}

/// Expands one ignited primary event into an ordered list of resolved
/// events. Every emitted event carries the chain's complete sub-action
/// sequence; coordinates always read with the acting team attacking
/// x → 100.
pub struct CausalChainBuilder;

impl CausalChainBuilder {
    pub fn expand(
        primary: PrimaryEvent,
        side: TeamSide,
        state: &MatchState,
        modifiers: &PerSide<TacticalModifiers>,
        takers: &PerSide<SetPieceTakers>,
        rng: &mut StdRng,
    ) -> Vec<MatchEvent> {
        let mut chain = Chain::new(side, state, modifiers, takers);

        match primary {
            PrimaryEvent::OpenPlayAttack => chain.open_play_attack(rng),
            PrimaryEvent::MidfieldDuel => chain.midfield_duel(rng),
            PrimaryEvent::Foul => chain.foul_out_of_possession(rng),
            PrimaryEvent::CornerSetPiece => chain.corner(rng, 0),
            PrimaryEvent::Offside => chain.offside(rng),
            PrimaryEvent::Injury => chain.injury(rng),
        }

        chain.finish()
    }
}

struct PendingEvent {
    kind: EventKind,
    team: TeamSide,
    primary_id: u32,
    primary_name: String,
    secondary: Option<(u32, String)>,
    outcome: EventOutcome,
    coordinates: Coordinate,
    description: String,
}

struct Chain<'a> {
    side: TeamSide,
    state: &'a MatchState,
    modifiers: &'a PerSide<TacticalModifiers>,
    takers: &'a PerSide<SetPieceTakers>,
    sequence: Vec<SubAction>,
    events: Vec<PendingEvent>,
    ball: Coordinate,
}

impl<'a> Chain<'a> {
    fn new(
        side: TeamSide,
        state: &'a MatchState,
        modifiers: &'a PerSide<TacticalModifiers>,
        takers: &'a PerSide<SetPieceTakers>,
    ) -> Self {
        let start_x = match state.ball_zone {
            BallZone::Defensive => 25.0,
            BallZone::Middle => 50.0,
            BallZone::Attacking => 72.0,
        };

        Chain {
            side,
            state,
            modifiers,
            takers,
            sequence: Vec::new(),
            events: Vec::new(),
            ball: Coordinate::new(start_x, 50.0),
        }
    }

    fn finish(self) -> Vec<MatchEvent> {
        let sequence = self.sequence;
        self.events
            .into_iter()
            .map(|pending| {
                let mut event = MatchEvent::new(
                    pending.kind,
                    pending.team,
                    pending.primary_id,
                    pending.primary_name,
                    pending.outcome,
                    pending.coordinates,
                    pending.description,
                );
                if let Some((id, name)) = pending.secondary {
                    event = event.with_secondary(id, name);
                }
                event.sequence = sequence.clone();
                event
            })
            .collect()
    }

    // ========== PRIMITIVES ==========

    fn push_action(
        &mut self,
        action: ActionKind,
        actor_id: u32,
        target_id: Option<u32>,
        ball_end: Coordinate,
        duration_ms: u32,
    ) {
        self.sequence.push(SubAction {
            action,
            actor_id,
            target_id,
            ball_start: self.ball,
            ball_end,
            duration_ms,
        });
        self.ball = ball_end;
    }

    fn push_event(
        &mut self,
        kind: EventKind,
        team: TeamSide,
        actor: &FieldPlayer,
        outcome: EventOutcome,
        description: String,
    ) {
        self.events.push(PendingEvent {
            kind,
            team,
            primary_id: actor.player.id,
            primary_name: actor.player.name.clone(),
            secondary: None,
            outcome,
            coordinates: self.ball,
            description,
        });
    }

    fn push_event_with_secondary(
        &mut self,
        kind: EventKind,
        team: TeamSide,
        actor: &FieldPlayer,
        secondary: (u32, String),
        outcome: EventOutcome,
        description: String,
    ) {
        self.events.push(PendingEvent {
            kind,
            team,
            primary_id: actor.player.id,
            primary_name: actor.player.name.clone(),
            secondary: Some(secondary),
            outcome,
            coordinates: self.ball,
            description,
        });
    }

    fn keeper_rating(&self, side: TeamSide) -> f32 {
        self.state
            .side(side)
            .goalkeeper()
            .map(|fp| {
                (fp.player.attributes.goalkeeping.reflexes as f32
                    + fp.player.attributes.goalkeeping.handling as f32)
                    / 2.0
            })
            .unwrap_or(10.0)
    }

    fn fatigue(&self, side: TeamSide, player_id: u32) -> f32 {
        self.state.side(side).fatigue_of(player_id)
    }

    fn advanced(&self, dx: f32, rng: &mut StdRng) -> Coordinate {
        let jitter_y: f32 = rng.random_range(-12.0..12.0);
        Coordinate::new(self.ball.x + dx, (self.ball.y + jitter_y).clamp(10.0, 90.0))
    }

    // ========== TEMPLATES ==========

    /// pass → (dribble) → (cross) → shot, with turnover exits at every stage.
    fn open_play_attack(&mut self, rng: &mut StdRng) {
        let attack = self.side;
        let defence = attack.opposite();

        let Some(passer) = PlayerSelector::select(
            self.state.side(attack),
            SelectionRole::Assister,
            &[],
            rng,
        )
        .cloned() else {
            return;
        };

        let Some(shooter) = PlayerSelector::select(
            self.state.side(attack),
            SelectionRole::Shooter,
            &[passer.player.id],
            rng,
        )
        .cloned() else {
            return;
        };

        // Build-up pass into the final third
        let target = self.advanced(rng.random_range(10.0..20.0), rng);
        self.push_action(
            ActionKind::Pass,
            passer.player.id,
            Some(shooter.player.id),
            target,
            rng.random_range(900..1600),
        );

        let pass_rating = (passer.player.attributes.technical.passing as f32
            + passer.player.attributes.mental.vision as f32)
            / 2.0;
        let pressure = -self.modifiers.get(defence).pass_pressure_penalty;
        let completed = OutcomeResolver::resolve(
            Attempt::Pass,
            pass_rating,
            None,
            pressure,
            self.fatigue(attack, passer.player.id),
            rng,
        );

        if !completed {
            self.push_event(
                EventKind::PassAttempted,
                attack,
                &passer,
                EventOutcome::Failure,
                format!("{} overhits the pass", passer.player.name),
            );
            if let Some(interceptor) = PlayerSelector::select(
                self.state.side(defence),
                SelectionRole::Interceptor,
                &[],
                rng,
            )
            .cloned()
            {
                self.push_action(
                    ActionKind::Interception,
                    interceptor.player.id,
                    None,
                    self.ball,
                    rng.random_range(400..900),
                );
                self.push_event(
                    EventKind::Interception,
                    defence,
                    &interceptor,
                    EventOutcome::Success,
                    format!("{} cuts it out", interceptor.player.name),
                );
            }
            return;
        }

        self.push_event(
            EventKind::PassCompleted,
            attack,
            &passer,
            EventOutcome::Success,
            format!("{} finds {}", passer.player.name, shooter.player.name),
        );

        // Optional take-on before the finish
        if rng.random::<f32>() < 0.35 {
            if let Some(defender) = PlayerSelector::select(
                self.state.side(defence),
                SelectionRole::Tackler,
                &[],
                rng,
            )
            .cloned()
            {
                let dribble_rating = (shooter.player.attributes.technical.dribbling as f32
                    + shooter.player.attributes.effective(RatingKind::Pace))
                    / 2.0;
                let defend_rating = (defender.player.attributes.effective(RatingKind::Defending)
                    + defender.player.attributes.effective(RatingKind::Pace))
                    / 2.0;

                let past = OutcomeResolver::resolve(
                    Attempt::Dribble,
                    dribble_rating,
                    Some(defend_rating),
                    0.0,
                    self.fatigue(attack, shooter.player.id),
                    rng,
                );

                if past {
                    let target = self.advanced(rng.random_range(6.0..12.0), rng);
                    self.push_action(
                        ActionKind::Dribble,
                        shooter.player.id,
                        None,
                        target,
                        rng.random_range(1500..2600),
                    );
                } else {
                    self.push_action(
                        ActionKind::Tackle,
                        defender.player.id,
                        Some(shooter.player.id),
                        self.ball,
                        rng.random_range(500..1100),
                    );

                    let fouled = OutcomeResolver::resolve(
                        Attempt::FoulDrawn,
                        defender.player.attributes.mental.aggression as f32,
                        None,
                        0.0,
                        1.0,
                        rng,
                    );
                    if fouled {
                        self.foul_with_restart(&defender, &shooter, rng);
                    } else {
                        self.push_event(
                            EventKind::Tackle,
                            defence,
                            &defender,
                            EventOutcome::Success,
                            format!("{} wins it cleanly", defender.player.name),
                        );
                    }
                    return;
                }
            }
        }

        // Wide sides swing it in, others work the shot
        let cross_chance = 0.28 + self.modifiers.get(attack).cross_bonus;
        if rng.random::<f32>() < cross_chance {
            let target = Coordinate::new(90.0, rng.random_range(40.0..60.0));
            self.push_action(
                ActionKind::Cross,
                passer.player.id,
                Some(shooter.player.id),
                target,
                rng.random_range(1200..1900),
            );

            let delivered = OutcomeResolver::resolve(
                Attempt::Cross,
                passer.player.attributes.technical.crossing as f32,
                None,
                0.0,
                self.fatigue(attack, passer.player.id),
                rng,
            );

            if !delivered {
                if let Some(clearer) = PlayerSelector::select(
                    self.state.side(defence),
                    SelectionRole::AerialThreat,
                    &[],
                    rng,
                )
                .cloned()
                {
                    self.push_action(
                        ActionKind::Clearance,
                        clearer.player.id,
                        None,
                        Coordinate::new(65.0, rng.random_range(20.0..80.0)),
                        rng.random_range(500..1000),
                    );
                    if rng.random::<f32>() < 0.35 {
                        self.corner(rng, 0);
                    }
                }
                return;
            }

            self.attempt_finish(ActionKind::Header, &shooter, Some(&passer), 0, rng);
            return;
        }

        self.attempt_finish(ActionKind::Shoot, &shooter, Some(&passer), 0, rng);
    }

    /// A shot or header with the full branch tree:
    /// blocked → corner | off target | saved → (corner | catch) | goal.
    /// `corner_depth` stops set pieces from recursing forever.
    fn attempt_finish(
        &mut self,
        finish: ActionKind,
        shooter: &FieldPlayer,
        assister: Option<&FieldPlayer>,
        corner_depth: u8,
        rng: &mut StdRng,
    ) {
        let attack = self.side;
        let defence = attack.opposite();
        let shooter_fatigue = self.fatigue(attack, shooter.player.id);

        let goal_mouth = Coordinate::new(100.0, rng.random_range(44.0..56.0));

        // A defender can get in the way of anything but a penalty
        if finish != ActionKind::Penalty && rng.random::<f32>() < 0.16 {
            self.push_action(
                finish,
                shooter.player.id,
                None,
                goal_mouth,
                rng.random_range(600..1100),
            );
            if let Some(blocker) = PlayerSelector::select(
                self.state.side(defence),
                SelectionRole::Tackler,
                &[],
                rng,
            )
            .cloned()
            {
                self.push_action(
                    ActionKind::Block,
                    blocker.player.id,
                    None,
                    Coordinate::new(94.0, rng.random_range(30.0..70.0)),
                    rng.random_range(200..500),
                );
            }
            self.push_event(
                EventKind::ShotBlocked,
                attack,
                shooter,
                EventOutcome::Failure,
                format!("{}'s effort is blocked", shooter.player.name),
            );
            if corner_depth == 0 && rng.random::<f32>() < 0.5 {
                self.corner(rng, corner_depth + 1);
            }
            return;
        }

        let (accuracy_attempt, conversion_attempt, accuracy_rating, conversion_rating) =
            match finish {
                ActionKind::Header => (
                    Attempt::HeaderOnTarget,
                    Attempt::GoalFromHeader,
                    shooter.player.attributes.effective(RatingKind::Aerial),
                    shooter.player.attributes.effective(RatingKind::Aerial),
                ),
                ActionKind::Penalty => (
                    Attempt::PenaltyConversion,
                    Attempt::PenaltyConversion,
                    shooter.player.attributes.technical.penalty_taking as f32,
                    shooter.player.attributes.technical.penalty_taking as f32,
                ),
                _ => (
                    Attempt::ShotOnTarget,
                    Attempt::GoalFromShot,
                    (shooter.player.attributes.technical.finishing as f32
                        + shooter.player.attributes.technical.technique as f32)
                        / 2.0,
                    (shooter.player.attributes.mental.composure as f32
                        + shooter.player.attributes.technical.finishing as f32)
                        / 2.0,
                ),
            };

        self.push_action(
            finish,
            shooter.player.id,
            None,
            goal_mouth,
            rng.random_range(500..1000),
        );

        let shot_bonus = self.modifiers.get(attack).shot_bonus;

        // Penalties skip the separate accuracy gate
        let on_target = finish == ActionKind::Penalty
            || OutcomeResolver::resolve(
                accuracy_attempt,
                accuracy_rating,
                None,
                shot_bonus,
                shooter_fatigue,
                rng,
            );

        if !on_target {
            self.push_event(
                EventKind::ShotOffTarget,
                attack,
                shooter,
                EventOutcome::Failure,
                format!("{} drags it wide", shooter.player.name),
            );
            return;
        }

        let scored = OutcomeResolver::resolve(
            conversion_attempt,
            conversion_rating,
            Some(self.keeper_rating(defence)),
            shot_bonus,
            shooter_fatigue,
            rng,
        );

        if scored {
            let mut description = format!("{} scores", shooter.player.name);
            if let Some(assister) = assister {
                description = format!(
                    "{} scores, set up by {}",
                    shooter.player.name, assister.player.name
                );
            }
            if let Some(assister) = assister {
                self.push_event_with_secondary(
                    EventKind::Goal,
                    attack,
                    shooter,
                    (assister.player.id, assister.player.name.clone()),
                    EventOutcome::Success,
                    description,
                );
            } else {
                self.push_event(
                    EventKind::Goal,
                    attack,
                    shooter,
                    EventOutcome::Success,
                    description,
                );
            }
            return;
        }

        // Kept out: the on-target shot and the save are separate events
        self.push_event(
            EventKind::ShotOnTarget,
            attack,
            shooter,
            EventOutcome::Failure,
            format!("{} forces a save", shooter.player.name),
        );

        let keeper = self.state.side(defence).goalkeeper().cloned();
        if let Some(keeper) = keeper {
            self.push_action(
                ActionKind::Save,
                keeper.player.id,
                None,
                Coordinate::new(97.0, rng.random_range(40.0..60.0)),
                rng.random_range(300..700),
            );
            self.push_event(
                EventKind::Save,
                defence,
                &keeper,
                EventOutcome::Success,
                format!("{} keeps it out", keeper.player.name),
            );

            if corner_depth == 0 && rng.random::<f32>() < 0.40 {
                self.corner(rng, corner_depth + 1);
            } else {
                self.push_action(
                    ActionKind::Catch,
                    keeper.player.id,
                    None,
                    self.ball,
                    rng.random_range(200..500),
                );
            }
        }
    }

    /// corner_delivery → header → {goal | save | cleared}.
    fn corner(&mut self, rng: &mut StdRng, depth: u8) {
        let attack = self.side;
        let defence = attack.opposite();

        let taker_id = self.takers.get(attack).corner;
        let Some(taker) = self.state.side(attack).field_player(taker_id).cloned() else {
            return;
        };

        self.ball = Coordinate::new(100.0, if rng.random::<bool>() { 0.0 } else { 100.0 });
        self.push_event(
            EventKind::Corner,
            attack,
            &taker,
            EventOutcome::Neutral,
            format!("{} to take the corner", taker.player.name),
        );

        let target = Coordinate::new(92.0, rng.random_range(40.0..60.0));
        self.push_action(
            ActionKind::CornerDelivery,
            taker.player.id,
            None,
            target,
            rng.random_range(1300..1900),
        );

        let delivered = OutcomeResolver::resolve(
            Attempt::Cross,
            taker.player.attributes.technical.corners as f32,
            None,
            0.0,
            self.fatigue(attack, taker.player.id),
            rng,
        );

        if !delivered {
            if let Some(clearer) = PlayerSelector::select(
                self.state.side(defence),
                SelectionRole::AerialThreat,
                &[],
                rng,
            )
            .cloned()
            {
                self.push_action(
                    ActionKind::Clearance,
                    clearer.player.id,
                    None,
                    Coordinate::new(60.0, rng.random_range(20.0..80.0)),
                    rng.random_range(500..900),
                );
            }
            return;
        }

        let Some(header_taker) = PlayerSelector::select(
            self.state.side(attack),
            SelectionRole::AerialThreat,
            &[taker.player.id],
            rng,
        )
        .cloned() else {
            return;
        };

        self.attempt_finish(ActionKind::Header, &header_taker, Some(&taker), depth.max(1), rng);
    }

    /// A challenge on the ball carrier away from goal.
    fn midfield_duel(&mut self, rng: &mut StdRng) {
        let attack = self.side;
        let defence = attack.opposite();

        let Some(carrier) = PlayerSelector::select(
            self.state.side(attack),
            SelectionRole::Dribbler,
            &[],
            rng,
        )
        .cloned() else {
            return;
        };

        let intercept = rng.random::<f32>() < 0.45;
        if intercept {
            let Some(interceptor) = PlayerSelector::select(
                self.state.side(defence),
                SelectionRole::Interceptor,
                &[],
                rng,
            )
            .cloned() else {
                return;
            };

            self.push_action(
                ActionKind::Pass,
                carrier.player.id,
                None,
                self.advanced(10.0, rng),
                rng.random_range(800..1400),
            );
            self.push_action(
                ActionKind::Interception,
                interceptor.player.id,
                None,
                self.ball,
                rng.random_range(300..800),
            );
            self.push_event(
                EventKind::PassAttempted,
                attack,
                &carrier,
                EventOutcome::Failure,
                format!("{} is too ambitious", carrier.player.name),
            );
            self.push_event(
                EventKind::Interception,
                defence,
                &interceptor,
                EventOutcome::Success,
                format!("{} reads it", interceptor.player.name),
            );
            return;
        }

        let Some(tackler) = PlayerSelector::select(
            self.state.side(defence),
            SelectionRole::Tackler,
            &[],
            rng,
        )
        .cloned() else {
            return;
        };

        let tackle_rating = (tackler.player.attributes.technical.tackling as f32
            + tackler.player.attributes.mental.anticipation as f32)
            / 2.0;
        let carry_rating = (carrier.player.attributes.technical.dribbling as f32
            + carrier.player.attributes.physical.balance as f32)
            / 2.0;

        self.push_action(
            ActionKind::Tackle,
            tackler.player.id,
            Some(carrier.player.id),
            self.ball,
            rng.random_range(500..1100),
        );

        let won = OutcomeResolver::resolve(
            Attempt::Tackle,
            tackle_rating,
            Some(carry_rating),
            0.0,
            self.fatigue(defence, tackler.player.id),
            rng,
        );

        if won {
            self.push_event(
                EventKind::Tackle,
                defence,
                &tackler,
                EventOutcome::Success,
                format!("{} dispossesses {}", tackler.player.name, carrier.player.name),
            );
        } else {
            let fouled = OutcomeResolver::resolve(
                Attempt::FoulDrawn,
                tackler.player.attributes.mental.aggression as f32,
                None,
                0.0,
                1.0,
                rng,
            );
            if fouled {
                self.foul_with_restart(&tackler, &carrier, rng);
            } else {
                self.push_action(
                    ActionKind::Dribble,
                    carrier.player.id,
                    None,
                    self.advanced(8.0, rng),
                    rng.random_range(1200..2200),
                );
            }
        }
    }

    /// Ignited foul: the defending side stops the possessing side.
    fn foul_out_of_possession(&mut self, rng: &mut StdRng) {
        let attack = self.side;
        let defence = attack.opposite();

        let Some(committer) = PlayerSelector::select(
            self.state.side(defence),
            SelectionRole::FoulCommitter,
            &[],
            rng,
        )
        .cloned() else {
            return;
        };

        let Some(victim) = PlayerSelector::select(
            self.state.side(attack),
            SelectionRole::Dribbler,
            &[],
            rng,
        )
        .cloned() else {
            return;
        };

        self.foul_with_restart(&committer, &victim, rng);
    }

    /// foul → card escalation → {penalty | free kick {direct | cross} | nothing}.
    /// `committer` plays for the defending side, `victim` for `self.side`.
    fn foul_with_restart(
        &mut self,
        committer: &FieldPlayer,
        victim: &FieldPlayer,
        rng: &mut StdRng,
    ) {
        let attack = self.side;
        let defence = attack.opposite();

        self.push_event_with_secondary(
            EventKind::Foul,
            defence,
            committer,
            (victim.player.id, victim.player.name.clone()),
            EventOutcome::Failure,
            format!("{} brings down {}", committer.player.name, victim.player.name),
        );

        let booking =
            DisciplineModel::booking_probability(self.state.side(defence), committer.player.id);
        if rng.random::<f32>() < booking {
            if rng.random::<f32>() < DisciplineModel::straight_red_probability() {
                self.push_event(
                    EventKind::RedCard,
                    defence,
                    committer,
                    EventOutcome::Failure,
                    format!("{} is sent off", committer.player.name),
                );
                return;
            }
            self.push_event(
                EventKind::YellowCard,
                defence,
                committer,
                EventOutcome::Failure,
                format!("{} goes into the book", committer.player.name),
            );
        }

        // Penalty if the foul arrives inside the area
        if self.ball.x > 84.0 {
            let taker_id = self.takers.get(attack).penalty;
            if let Some(taker) = self.state.side(attack).field_player(taker_id).cloned() {
                self.push_event(
                    EventKind::Penalty,
                    attack,
                    &taker,
                    EventOutcome::Neutral,
                    format!("{} steps up from the spot", taker.player.name),
                );
                self.ball = Coordinate::new(89.0, 50.0);
                self.attempt_finish(ActionKind::Penalty, &taker, None, 1, rng);
            }
            return;
        }

        // Free kick in shooting range
        if self.ball.x > 62.0 {
            let taker_id = self.takers.get(attack).free_kick;
            let Some(taker) = self.state.side(attack).field_player(taker_id).cloned() else {
                return;
            };

            self.push_event(
                EventKind::FreeKick,
                attack,
                &taker,
                EventOutcome::Neutral,
                format!("{} stands over the free kick", taker.player.name),
            );

            if rng.random::<f32>() < 0.45 {
                // Direct effort
                self.push_action(
                    ActionKind::FreeKick,
                    taker.player.id,
                    None,
                    Coordinate::new(100.0, rng.random_range(44.0..56.0)),
                    rng.random_range(900..1400),
                );

                let on_target = OutcomeResolver::resolve(
                    Attempt::FreeKickOnTarget,
                    taker.player.attributes.technical.free_kick_taking as f32,
                    None,
                    0.0,
                    self.fatigue(attack, taker.player.id),
                    rng,
                );
                if !on_target {
                    self.push_event(
                        EventKind::ShotOffTarget,
                        attack,
                        &taker,
                        EventOutcome::Failure,
                        format!("{} whips it over the bar", taker.player.name),
                    );
                    return;
                }

                let scored = OutcomeResolver::resolve(
                    Attempt::GoalFromShot,
                    taker.player.attributes.technical.free_kick_taking as f32,
                    Some(self.keeper_rating(defence)),
                    0.0,
                    self.fatigue(attack, taker.player.id),
                    rng,
                );
                if scored {
                    self.push_event(
                        EventKind::Goal,
                        attack,
                        &taker,
                        EventOutcome::Success,
                        format!("{} curls the free kick in", taker.player.name),
                    );
                } else {
                    self.push_event(
                        EventKind::ShotOnTarget,
                        attack,
                        &taker,
                        EventOutcome::Failure,
                        format!("{} forces a save from the free kick", taker.player.name),
                    );
                    if let Some(keeper) = self.state.side(defence).goalkeeper().cloned() {
                        self.push_action(
                            ActionKind::Save,
                            keeper.player.id,
                            None,
                            Coordinate::new(97.0, 50.0),
                            rng.random_range(300..600),
                        );
                        self.push_event(
                            EventKind::Save,
                            defence,
                            &keeper,
                            EventOutcome::Success,
                            format!("{} tips it away", keeper.player.name),
                        );
                    }
                }
                return;
            }

            // Delivery toward an aerial target
            self.push_action(
                ActionKind::FreeKick,
                taker.player.id,
                None,
                Coordinate::new(90.0, rng.random_range(40.0..60.0)),
                rng.random_range(1100..1700),
            );
            if let Some(header_taker) = PlayerSelector::select(
                self.state.side(attack),
                SelectionRole::AerialThreat,
                &[taker.player.id],
                rng,
            )
            .cloned()
            {
                self.attempt_finish(ActionKind::Header, &header_taker, Some(&taker), 1, rng);
            }
        }
    }

    /// A through ball flagged down.
    fn offside(&mut self, rng: &mut StdRng) {
        let attack = self.side;

        let Some(passer) = PlayerSelector::select(
            self.state.side(attack),
            SelectionRole::Assister,
            &[],
            rng,
        )
        .cloned() else {
            return;
        };
        let Some(runner) = PlayerSelector::select(
            self.state.side(attack),
            SelectionRole::Shooter,
            &[passer.player.id],
            rng,
        )
        .cloned() else {
            return;
        };

        let target = self.advanced(rng.random_range(15.0..25.0), rng);
        self.push_action(
            ActionKind::Pass,
            passer.player.id,
            Some(runner.player.id),
            target,
            rng.random_range(900..1500),
        );
        self.push_event(
            EventKind::Offside,
            attack,
            &runner,
            EventOutcome::Failure,
            format!("{} strays offside", runner.player.name),
        );
    }

    /// A knock picked up in a challenge; the manager heuristic reacts.
    fn injury(&mut self, rng: &mut StdRng) {
        let side = if rng.random::<bool>() {
            self.side
        } else {
            self.side.opposite()
        };

        let Some(victim) = PlayerSelector::select(
            self.state.side(side),
            SelectionRole::Dribbler,
            &[],
            rng,
        )
        .cloned() else {
            return;
        };

        self.push_event(
            EventKind::Injury,
            side,
            &victim,
            EventOutcome::Failure,
            format!("{} is down and needs treatment", victim.player.name),
        );
    }
}
