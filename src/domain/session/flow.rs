//! Slot-filling flow state machine.
//!
//! The move flow is linear: each step collects one slot and advances
//! forward. Steps never move backwards within a flow; an explicit reset
//! returns the session to `AwaitingIntent`.

use std::fmt;

/// Position in the move slot-filling flow.
///
/// Ordinals are persisted in the session record, so their values are part
/// of the stored contract: `AwaitingIntent` is 0 and `Estimating` is the
/// terminal 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FlowStep {
    AwaitingIntent,
    AwaitingOrigin,
    AwaitingDestination,
    AwaitingDate,
    AwaitingSize,
    AwaitingServices,
    Estimating,
}

impl FlowStep {
    /// Persisted ordinal of this step.
    pub fn ordinal(&self) -> u8 {
        match self {
            FlowStep::AwaitingIntent => 0,
            FlowStep::AwaitingOrigin => 1,
            FlowStep::AwaitingDestination => 2,
            FlowStep::AwaitingDate => 3,
            FlowStep::AwaitingSize => 4,
            FlowStep::AwaitingServices => 5,
            FlowStep::Estimating => 6,
        }
    }

    /// Reconstructs a step from its persisted ordinal.
    ///
    /// Out-of-range ordinals clamp to the terminal step rather than
    /// failing: a corrupt counter should not wedge the session.
    pub fn from_ordinal(ordinal: u8) -> Self {
        match ordinal {
            0 => FlowStep::AwaitingIntent,
            1 => FlowStep::AwaitingOrigin,
            2 => FlowStep::AwaitingDestination,
            3 => FlowStep::AwaitingDate,
            4 => FlowStep::AwaitingSize,
            5 => FlowStep::AwaitingServices,
            _ => FlowStep::Estimating,
        }
    }

    /// Whether this is the terminal step of the flow.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowStep::Estimating)
    }

    /// The question the assistant asks when entering this step.
    pub fn prompt(&self) -> &'static str {
        match self {
            FlowStep::AwaitingIntent => "Hey! How may I help you?",
            FlowStep::AwaitingOrigin => "Where are you moving from?",
            FlowStep::AwaitingDestination => "Where are you moving to?",
            FlowStep::AwaitingDate => "When do you want to move?",
            FlowStep::AwaitingSize => {
                "What is your move size? (studio, 1-bedroom, 2-bedroom, 3-bedroom, \
                 4-bedroom, office, or car)"
            }
            FlowStep::AwaitingServices => {
                "Do you want any additional services? (packing, storage, or none)"
            }
            FlowStep::Estimating => "Let me calculate the estimated cost of your move...",
        }
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({})", self, self.ordinal())
    }
}

/// Which handler family a session is engaged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryType {
    #[default]
    Unset,
    Move,
    Faq,
    General,
}

impl QueryType {
    /// Persisted string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryType::Unset => "unset",
            QueryType::Move => "move",
            QueryType::Faq => "faq",
            QueryType::General => "general",
        }
    }

    /// Reconstructs from the persisted form; anything unrecognized reads
    /// as `Unset`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "move" => QueryType::Move,
            "faq" => QueryType::Faq,
            "general" => QueryType::General,
            _ => QueryType::Unset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordinals_round_trip() {
        for ordinal in 0..=6 {
            assert_eq!(FlowStep::from_ordinal(ordinal).ordinal(), ordinal);
        }
    }

    #[test]
    fn out_of_range_ordinal_clamps_to_terminal() {
        assert_eq!(FlowStep::from_ordinal(42), FlowStep::Estimating);
        assert!(FlowStep::from_ordinal(42).is_terminal());
    }

    #[test]
    fn only_estimating_is_terminal() {
        assert!(FlowStep::Estimating.is_terminal());
        assert!(!FlowStep::AwaitingServices.is_terminal());
        assert!(!FlowStep::AwaitingIntent.is_terminal());
    }

    #[test]
    fn query_type_round_trips_and_defaults_to_unset() {
        assert_eq!(QueryType::parse("move"), QueryType::Move);
        assert_eq!(QueryType::parse("faq"), QueryType::Faq);
        assert_eq!(QueryType::parse("garbage"), QueryType::Unset);
        assert_eq!(QueryType::parse(QueryType::General.as_str()), QueryType::General);
    }
}
