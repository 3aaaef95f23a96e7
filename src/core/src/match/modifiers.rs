use crate::club::team::{DefensiveLine, Mentality, Pressing, Tactic, Tempo, Width};

/// Probability modifiers derived once per side from its tactic. A pure
/// translation table; the engine never inspects the raw `Tactic` again.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TacticalModifiers {
    /// Added to ignition probability while possession is in the attacking third.
    pub ignition_attacking_bonus: f32,
    /// Added to the opposition's offside probability (high line, trap).
    pub offside_bonus: f32,
    /// Added to the chance of winning the ball off the possessing side.
    pub turnover_bonus: f32,
    /// Subtracted from the opposition's pass-completion probability.
    pub pass_pressure_penalty: f32,
    /// Multiplies the side's own fatigue decay.
    pub fatigue_multiplier: f32,
    /// Added to shot-conversion probability.
    pub shot_bonus: f32,
    /// Added to the chance of pushing the ball a zone forward.
    pub zone_advance_bonus: f32,
    /// Added to the chance an attack goes through a cross.
    pub cross_bonus: f32,
    /// Added to counter-attack ignition right after a turnover.
    pub counter_bonus: f32,
}

impl From<&Tactic> for TacticalModifiers {
    fn from(tactic: &Tactic) -> Self {
        let (ignition_attacking_bonus, shot_bonus) = match tactic.mentality {
            Mentality::VeryDefensive => (-0.05, -0.02),
            Mentality::Defensive => (-0.02, -0.01),
            Mentality::Balanced => (0.0, 0.0),
            Mentality::Attacking => (0.02, 0.01),
            Mentality::VeryAttacking => (0.05, 0.02),
        };

        let (turnover_bonus, pass_pressure_penalty, pressing_fatigue) = match tactic.pressing {
            Pressing::Never => (-0.05, -0.02, -0.02),
            Pressing::Rarely => (-0.02, -0.01, -0.01),
            Pressing::Sometimes => (0.0, 0.0, 0.0),
            Pressing::Often => (0.05, 0.02, 0.02),
            Pressing::Always => (0.08, 0.04, 0.04),
        };

        let zone_advance_bonus = match tactic.tempo {
            Tempo::VerySlow => -0.08,
            Tempo::Slow => -0.04,
            Tempo::Standard => 0.0,
            Tempo::Fast => 0.04,
            Tempo::VeryFast => 0.08,
        };

        let cross_bonus = match tactic.width {
            Width::VeryNarrow => -0.10,
            Width::Narrow => -0.05,
            Width::Standard => 0.0,
            Width::Wide => 0.08,
            Width::VeryWide => 0.15,
        };

        let mut offside_bonus = match tactic.defensive_line {
            DefensiveLine::VeryDeep => -0.04,
            DefensiveLine::Deep => -0.02,
            DefensiveLine::Standard => 0.0,
            DefensiveLine::High => 0.05,
            DefensiveLine::VeryHigh => 0.08,
        };
        if tactic.offside_trap {
            offside_bonus += 0.04;
        }

        let counter_bonus = if tactic.counter_attack { 0.04 } else { 0.0 };

        TacticalModifiers {
            ignition_attacking_bonus,
            offside_bonus,
            turnover_bonus,
            pass_pressure_penalty,
            fatigue_multiplier: 1.0 + pressing_fatigue,
            shot_bonus,
            zone_advance_bonus,
            cross_bonus,
            counter_bonus,
        }
    }
}

impl Default for TacticalModifiers {
    fn default() -> Self {
        TacticalModifiers::from(&Tactic::default())
    }
}
