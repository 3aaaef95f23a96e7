use rand::RngExt;
use rand::rngs::StdRng;

const ALPHA: f32 = 0.45;
const BETA: f32 = 0.45;
const PROBABILITY_FLOOR: f32 = 0.02;
const PROBABILITY_CEILING: f32 = 0.98;

/// Contested actions the chain builder can ask to resolve. Each carries a
/// fixed base probability; actor/opponent ratings and tactical modifiers
/// shift it, fatigue always degrades it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    ShotOnTarget,
    GoalFromShot,
    HeaderOnTarget,
    GoalFromHeader,
    Dribble,
    Pass,
    Cross,
    Tackle,
    FoulDrawn,
    PenaltyConversion,
    FreeKickOnTarget,
}

impl Attempt {
    fn base(&self) -> f32 {
        match self {
            Attempt::ShotOnTarget => 0.40,
            Attempt::GoalFromShot => 0.28,
            Attempt::HeaderOnTarget => 0.35,
            Attempt::GoalFromHeader => 0.24,
            Attempt::Dribble => 0.50,
            Attempt::Pass => 0.85,
            Attempt::Cross => 0.60,
            Attempt::Tackle => 0.50,
            Attempt::FoulDrawn => 0.08,
            Attempt::PenaltyConversion => 0.76,
            Attempt::FreeKickOnTarget => 0.25,
        }
    }

    /// Fouls scale with the offender's aggression alone, more gently than
    /// skill contests.
    fn alpha(&self) -> f32 {
        match self {
            Attempt::FoulDrawn => 0.35,
            _ => ALPHA,
        }
    }
}

/// Resolves an attempted action as one random draw against a threshold
/// assembled from the base probability, both ratings, tactics and fatigue.
pub struct OutcomeResolver;

impl OutcomeResolver {
    /// Normalised rating contribution: 10 is neutral, 20 is +0.5, 1 is −0.45.
    fn normalise(rating: f32) -> f32 {
        (rating - 10.0) / 20.0
    }

    pub fn success_probability(
        attempt: Attempt,
        actor_rating: f32,
        opponent_rating: Option<f32>,
        tactics_modifier: f32,
        actor_fatigue: f32,
    ) -> f32 {
        let mut p = attempt.base() + attempt.alpha() * Self::normalise(actor_rating);

        if let Some(opponent) = opponent_rating {
            p -= BETA * Self::normalise(opponent);
        }

        p += tactics_modifier;
        p -= crate::r#match::fatigue::FatigueModel::penalty(actor_fatigue);

        p.clamp(PROBABILITY_FLOOR, PROBABILITY_CEILING)
    }

    pub fn resolve(
        attempt: Attempt,
        actor_rating: f32,
        opponent_rating: Option<f32>,
        tactics_modifier: f32,
        actor_fatigue: f32,
        rng: &mut StdRng,
    ) -> bool {
        let p = Self::success_probability(
            attempt,
            actor_rating,
            opponent_rating,
            tactics_modifier,
            actor_fatigue,
        );
        rng.random::<f32>() < p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_ratings_leave_base_probability() {
        let p = OutcomeResolver::success_probability(Attempt::Pass, 10.0, Some(10.0), 0.0, 1.0);
        assert!((p - 0.85).abs() < 1e-6);
    }

    #[test]
    fn test_better_actor_raises_probability() {
        let weak = OutcomeResolver::success_probability(
            Attempt::GoalFromShot,
            8.0,
            Some(10.0),
            0.0,
            1.0,
        );
        let strong = OutcomeResolver::success_probability(
            Attempt::GoalFromShot,
            18.0,
            Some(10.0),
            0.0,
            1.0,
        );
        assert!(strong > weak);
    }

    #[test]
    fn test_better_opponent_lowers_probability() {
        let soft = OutcomeResolver::success_probability(
            Attempt::GoalFromShot,
            12.0,
            Some(6.0),
            0.0,
            1.0,
        );
        let elite = OutcomeResolver::success_probability(
            Attempt::GoalFromShot,
            12.0,
            Some(19.0),
            0.0,
            1.0,
        );
        assert!(elite < soft);
    }

    #[test]
    fn test_fatigue_penalises_the_actor() {
        let fresh =
            OutcomeResolver::success_probability(Attempt::Dribble, 14.0, Some(10.0), 0.0, 1.0);
        let tired =
            OutcomeResolver::success_probability(Attempt::Dribble, 14.0, Some(10.0), 0.0, 0.3);
        assert!(tired < fresh);
        assert!((fresh - tired - 0.105).abs() < 1e-5);
    }

    #[test]
    fn test_probability_is_clamped() {
        let floor = OutcomeResolver::success_probability(
            Attempt::FoulDrawn,
            1.0,
            Some(20.0),
            -0.5,
            0.0,
        );
        assert!((floor - 0.02).abs() < 1e-6);

        let ceiling =
            OutcomeResolver::success_probability(Attempt::Pass, 20.0, Some(1.0), 0.5, 1.0);
        assert!((ceiling - 0.98).abs() < 1e-6);
    }

    #[test]
    fn test_resolution_is_deterministic_under_a_seed() {
        use rand::SeedableRng;

        let draw = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..50)
                .map(|_| {
                    OutcomeResolver::resolve(
                        Attempt::Tackle,
                        12.0,
                        Some(11.0),
                        0.0,
                        0.9,
                        &mut rng,
                    )
                })
                .collect::<Vec<bool>>()
        };

        assert_eq!(draw(9), draw(9));
    }
}
