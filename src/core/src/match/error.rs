use std::fmt;

/// Failure taxonomy for a simulation run. Precondition and lineup errors
/// surface before the first tick; invariant and internal errors terminate
/// an in-flight stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// Missing or structurally unusable input (team, formation, roster).
    Precondition(String),
    /// A submitted starting XI violates the lineup rules.
    InvalidLineup(String),
    /// A state mutation would break a match invariant.
    Invariant(String),
    /// Any other mid-tick failure, tagged with where it happened.
    Internal { minute: u8, context: String },
}

impl MatchError {
    /// Stable machine-readable code, used in error frames and HTTP bodies.
    pub fn code(&self) -> &'static str {
        match self {
            MatchError::Precondition(_) => "PreconditionFailure",
            MatchError::InvalidLineup(_) => "InvalidLineup",
            MatchError::Invariant(_) => "Invariant",
            MatchError::Internal { .. } => "InternalFailure",
        }
    }

    pub fn reason(&self) -> String {
        match self {
            MatchError::Precondition(msg)
            | MatchError::InvalidLineup(msg)
            | MatchError::Invariant(msg) => msg.clone(),
            MatchError::Internal { minute, context } => {
                format!("minute {}: {}", minute, context)
            }
        }
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code(), self.reason())
    }
}

impl std::error::Error for MatchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            MatchError::InvalidLineup("must contain exactly 1 GK".into()).code(),
            "InvalidLineup"
        );
        assert_eq!(
            MatchError::Internal {
                minute: 17,
                context: "chain expansion".into()
            }
            .reason(),
            "minute 17: chain expansion"
        );
    }
}
