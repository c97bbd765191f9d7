// ── Alert severity ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// RAG severity attached to every alert, ordered by urgency.
///
/// Renderers use it both for colour and for layout decisions (a `Pink`
/// alert asks the user for a decision and typically shows a button).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Severity {
    /// Normal, informational.
    Green,
    /// Caution.
    Amber,
    /// Error.
    Red,
    /// Action requested.
    Pink,
}

impl Severity {
    /// Whether an alert at this level expects the user to make a decision.
    pub fn requests_action(self) -> bool {
        matches!(self, Self::Pink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_by_urgency() {
        assert!(Severity::Green < Severity::Amber);
        assert!(Severity::Amber < Severity::Red);
        assert!(Severity::Red < Severity::Pink);
    }

    #[test]
    fn only_pink_requests_action() {
        assert!(Severity::Pink.requests_action());
        assert!(!Severity::Red.requests_action());
        assert!(!Severity::Green.requests_action());
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Severity::Amber.to_string(), "amber");
    }
}
