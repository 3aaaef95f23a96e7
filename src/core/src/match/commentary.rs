use crate::r#match::events::{EventKind, MatchEvent};

/// Deterministic templating from structured events to one short line per
/// tick. Purely a decoration over the event stream; disabled runs carry
/// empty strings.
pub struct CommentaryBuilder;

impl CommentaryBuilder {
    /// Picks the most newsworthy event of the tick and phrases it.
    /// Quiet ticks stay silent.
    pub fn tick_line(minute: u8, events: &[MatchEvent]) -> String {
        let Some(event) = events
            .iter()
            .min_by_key(|e| Self::salience(e.kind)) else {
            return String::new();
        };

        match event.kind {
            EventKind::Goal => match &event.secondary_player_name {
                Some(assister) => format!(
                    "{}' GOAL! {} finishes it off after fine work from {}.",
                    minute, event.primary_player_name, assister
                ),
                None => format!("{}' GOAL! {} scores.", minute, event.primary_player_name),
            },
            EventKind::Penalty => format!(
                "{}' Penalty! {} takes responsibility from the spot.",
                minute, event.primary_player_name
            ),
            EventKind::RedCard => format!(
                "{}' Red card! {} is off and their side plays on a man short.",
                minute, event.primary_player_name
            ),
            EventKind::YellowCard => format!(
                "{}' {} is booked.",
                minute, event.primary_player_name
            ),
            EventKind::Substitution => match &event.secondary_player_name {
                Some(incoming) => format!(
                    "{}' Change: {} makes way for {}.",
                    minute, event.primary_player_name, incoming
                ),
                None => format!("{}' Substitution for {}.", minute, event.primary_player_name),
            },
            EventKind::Save => format!(
                "{}' Brilliant stop by {}.",
                minute, event.primary_player_name
            ),
            EventKind::ShotOnTarget => format!(
                "{}' {} tests the keeper.",
                minute, event.primary_player_name
            ),
            EventKind::ShotOffTarget => format!(
                "{}' {} lets fly but misses the target.",
                minute, event.primary_player_name
            ),
            EventKind::ShotBlocked => format!(
                "{}' {}'s shot is charged down.",
                minute, event.primary_player_name
            ),
            EventKind::Corner => format!(
                "{}' Corner, swung in by {}.",
                minute, event.primary_player_name
            ),
            EventKind::FreeKick => format!(
                "{}' Free kick in a promising spot for {}.",
                minute, event.primary_player_name
            ),
            EventKind::Foul => format!(
                "{}' {} concedes the free kick.",
                minute, event.primary_player_name
            ),
            EventKind::Offside => format!(
                "{}' The flag is up against {}.",
                minute, event.primary_player_name
            ),
            EventKind::Injury => format!(
                "{}' Concern here, {} needs treatment.",
                minute, event.primary_player_name
            ),
            EventKind::Tackle => format!(
                "{}' Strong challenge from {}.",
                minute, event.primary_player_name
            ),
            EventKind::Interception => format!(
                "{}' {} steps in to intercept.",
                minute, event.primary_player_name
            ),
            EventKind::PassCompleted | EventKind::PassAttempted => String::new(),
        }
    }

    /// Lower is more newsworthy.
    fn salience(kind: EventKind) -> u8 {
        match kind {
            EventKind::Goal => 0,
            EventKind::RedCard => 1,
            EventKind::Penalty => 2,
            EventKind::YellowCard => 3,
            EventKind::Substitution => 4,
            EventKind::Save => 5,
            EventKind::ShotOnTarget => 6,
            EventKind::ShotBlocked => 7,
            EventKind::ShotOffTarget => 8,
            EventKind::Corner => 9,
            EventKind::FreeKick => 10,
            EventKind::Foul => 11,
            EventKind::Offside => 12,
            EventKind::Injury => 13,
            EventKind::Interception => 14,
            EventKind::Tackle => 15,
            EventKind::PassCompleted => 16,
            EventKind::PassAttempted => 17,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::events::{Coordinate, EventOutcome, TeamSide};

    fn event(kind: EventKind, name: &str) -> MatchEvent {
        MatchEvent::new(
            kind,
            TeamSide::Home,
            1,
            name.to_string(),
            EventOutcome::Success,
            Coordinate::new(50.0, 50.0),
            String::new(),
        )
    }

    #[test]
    fn test_quiet_tick_is_silent() {
        assert_eq!(CommentaryBuilder::tick_line(12, &[]), "");
    }

    #[test]
    fn test_goal_outranks_everything_else() {
        let events = vec![
            event(EventKind::PassCompleted, "Midfielder"),
            event(EventKind::Goal, "Striker"),
            event(EventKind::Corner, "Winger"),
        ];

        let line = CommentaryBuilder::tick_line(23, &events);
        assert!(line.contains("GOAL"));
        assert!(line.contains("Striker"));
        assert!(line.starts_with("23'"));
    }

    #[test]
    fn test_passes_alone_stay_silent() {
        let events = vec![event(EventKind::PassCompleted, "Midfielder")];
        assert_eq!(CommentaryBuilder::tick_line(40, &events), "");
    }
}
