use serde::{Deserialize, Serialize};
use std::fmt;

/// Positional role a player can occupy, identified on the wire by its
/// conventional short code (`GK`, `CB`, `ST`, ...). `SUB` marks a bench
/// assignment and never appears in a starting slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerPosition {
    #[serde(rename = "GK")]
    Goalkeeper,
    #[serde(rename = "SW")]
    Sweeper,
    #[serde(rename = "CB")]
    DefenderCenter,
    #[serde(rename = "LB")]
    DefenderLeft,
    #[serde(rename = "RB")]
    DefenderRight,
    #[serde(rename = "WB")]
    Wingback,
    #[serde(rename = "DM")]
    DefensiveMidfielder,
    #[serde(rename = "CM")]
    MidfielderCenter,
    #[serde(rename = "AM")]
    AttackingMidfielder,
    #[serde(rename = "LM")]
    MidfielderLeft,
    #[serde(rename = "RM")]
    MidfielderRight,
    #[serde(rename = "LW")]
    WingerLeft,
    #[serde(rename = "RW")]
    WingerRight,
    #[serde(rename = "ST")]
    Striker,
    #[serde(rename = "CF")]
    ForwardCenter,
    #[serde(rename = "F9")]
    FalseNine,
    #[serde(rename = "SUB")]
    Substitute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PositionGroup {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl PlayerPosition {
    pub fn code(&self) -> &'static str {
        match self {
            PlayerPosition::Goalkeeper => "GK",
            PlayerPosition::Sweeper => "SW",
            PlayerPosition::DefenderCenter => "CB",
            PlayerPosition::DefenderLeft => "LB",
            PlayerPosition::DefenderRight => "RB",
            PlayerPosition::Wingback => "WB",
            PlayerPosition::DefensiveMidfielder => "DM",
            PlayerPosition::MidfielderCenter => "CM",
            PlayerPosition::AttackingMidfielder => "AM",
            PlayerPosition::MidfielderLeft => "LM",
            PlayerPosition::MidfielderRight => "RM",
            PlayerPosition::WingerLeft => "LW",
            PlayerPosition::WingerRight => "RW",
            PlayerPosition::Striker => "ST",
            PlayerPosition::ForwardCenter => "CF",
            PlayerPosition::FalseNine => "F9",
            PlayerPosition::Substitute => "SUB",
        }
    }

    pub fn position_group(&self) -> PositionGroup {
        match self {
            PlayerPosition::Goalkeeper => PositionGroup::Goalkeeper,
            PlayerPosition::Sweeper
            | PlayerPosition::DefenderCenter
            | PlayerPosition::DefenderLeft
            | PlayerPosition::DefenderRight
            | PlayerPosition::Wingback => PositionGroup::Defender,
            PlayerPosition::DefensiveMidfielder
            | PlayerPosition::MidfielderCenter
            | PlayerPosition::AttackingMidfielder
            | PlayerPosition::MidfielderLeft
            | PlayerPosition::MidfielderRight => PositionGroup::Midfielder,
            PlayerPosition::WingerLeft
            | PlayerPosition::WingerRight
            | PlayerPosition::Striker
            | PlayerPosition::ForwardCenter
            | PlayerPosition::FalseNine => PositionGroup::Forward,
            // A bench marker carries no pitch role; treat as midfield for grouping
            PlayerPosition::Substitute => PositionGroup::Midfielder,
        }
    }

    pub fn is_goalkeeper(&self) -> bool {
        *self == PlayerPosition::Goalkeeper
    }

    pub fn is_defender(&self) -> bool {
        self.position_group() == PositionGroup::Defender
    }

    pub fn is_midfielder(&self) -> bool {
        self.position_group() == PositionGroup::Midfielder
    }

    pub fn is_forward(&self) -> bool {
        self.position_group() == PositionGroup::Forward
    }

    /// Central-corridor midfield roles used for possession ratings.
    pub fn is_central_midfielder(&self) -> bool {
        matches!(
            self,
            PlayerPosition::DefensiveMidfielder
                | PlayerPosition::MidfielderCenter
                | PlayerPosition::AttackingMidfielder
        )
    }

    /// Fixed neighbour table: roles a player covers nearly as well as their
    /// primary one (CM covers DM and AM, ST covers CF and F9, and so on).
    pub fn neighbours(&self) -> &'static [PlayerPosition] {
        use PlayerPosition::*;
        match self {
            Goalkeeper => &[],
            Sweeper => &[DefenderCenter],
            DefenderCenter => &[Sweeper, DefenderLeft, DefenderRight],
            DefenderLeft => &[Wingback, DefenderCenter, MidfielderLeft],
            DefenderRight => &[Wingback, DefenderCenter, MidfielderRight],
            Wingback => &[DefenderLeft, DefenderRight, MidfielderLeft, MidfielderRight],
            DefensiveMidfielder => &[MidfielderCenter, DefenderCenter],
            MidfielderCenter => &[DefensiveMidfielder, AttackingMidfielder],
            AttackingMidfielder => &[MidfielderCenter, ForwardCenter, FalseNine],
            MidfielderLeft => &[WingerLeft, DefenderLeft, MidfielderCenter],
            MidfielderRight => &[WingerRight, DefenderRight, MidfielderCenter],
            WingerLeft => &[MidfielderLeft, Striker],
            WingerRight => &[MidfielderRight, Striker],
            Striker => &[ForwardCenter, FalseNine],
            ForwardCenter => &[Striker, FalseNine],
            FalseNine => &[Striker, ForwardCenter, AttackingMidfielder],
            Substitute => &[],
        }
    }
}

impl fmt::Display for PlayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
