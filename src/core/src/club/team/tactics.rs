use serde::{Deserialize, Serialize};

/// Tactical instructions for one side. Every field has a balanced/standard
/// default so a bare `{}` is a legal tactic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tactic {
    #[serde(default)]
    pub mentality: Mentality,
    #[serde(default)]
    pub pressing: Pressing,
    #[serde(default)]
    pub tempo: Tempo,
    #[serde(default)]
    pub width: Width,
    #[serde(default)]
    pub defensive_line: DefensiveLine,

    #[serde(default)]
    pub offside_trap: bool,
    #[serde(default)]
    pub counter_attack: bool,
    #[serde(default)]
    pub play_out_of_defence: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mentality {
    VeryDefensive,
    Defensive,
    #[default]
    Balanced,
    Attacking,
    VeryAttacking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pressing {
    Never,
    Rarely,
    #[default]
    Sometimes,
    Often,
    Always,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tempo {
    VerySlow,
    Slow,
    #[default]
    Standard,
    Fast,
    VeryFast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Width {
    VeryNarrow,
    Narrow,
    #[default]
    Standard,
    Wide,
    VeryWide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefensiveLine {
    VeryDeep,
    Deep,
    #[default]
    Standard,
    High,
    VeryHigh,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tactic_is_balanced() {
        let tactic: Tactic = serde_json::from_str("{}").unwrap();

        assert_eq!(tactic.mentality, Mentality::Balanced);
        assert_eq!(tactic.pressing, Pressing::Sometimes);
        assert_eq!(tactic.tempo, Tempo::Standard);
        assert_eq!(tactic.width, Width::Standard);
        assert_eq!(tactic.defensive_line, DefensiveLine::Standard);
        assert!(!tactic.offside_trap);
    }

    #[test]
    fn test_snake_case_wire_form() {
        let tactic: Tactic = serde_json::from_str(
            r#"{"mentality": "very_attacking", "pressing": "often", "offside_trap": true}"#,
        )
        .unwrap();

        assert_eq!(tactic.mentality, Mentality::VeryAttacking);
        assert_eq!(tactic.pressing, Pressing::Often);
        assert!(tactic.offside_trap);
    }
}
