//! Domain validation for delivery events.
//!
//! Validation runs after decoding and before anything is persisted. The
//! outcome is a three-way [`ValidationOutcome`] rather than a `(bool, error)`
//! pair so callers cannot conflate "the event broke a field rule" (carries a
//! diagnostic the caller may see) with "the event is semantically impossible"
//! (generic rejection, reason logged server-side only).

use thiserror::Error;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::delivery::{DeliveryEvent, Player, Team};

/// Event types a scoring client may submit.
pub const KNOWN_EVENT_TYPES: &[&str] = &[
    "delivery",
    "wide",
    "noBall",
    "bye",
    "legBye",
    "bowled",
    "caught",
    "lbw",
    "runOut",
    "stumped",
    "hitWicket",
    "retired",
];

/// A field-level rule violation, echoed back to the submitting client.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("match id must be a positive integer, got {0}")]
    MatchId(i64),

    #[error("unknown event type {0:?}")]
    UnknownEventType(String),

    #[error("timestamp {0:?} is not a valid RFC 3339 timestamp")]
    Timestamp(String),

    #[error("innings must be at least 1, got {0}")]
    Innings(u32),

    #[error("ball number within the over must be at least 1, got {0}")]
    BallNumber(u32),

    #[error("{role} must have a positive id and a non-empty name")]
    Player { role: &'static str },

    #[error("{role} team must have a positive id and a non-empty name")]
    Team { role: &'static str },
}

/// Result of validating one delivery event.
#[derive(Debug)]
pub enum ValidationOutcome {
    /// The event passed every check and may be persisted.
    Valid,
    /// The event is well-formed but semantically impossible. The reason is
    /// for server-side logging; clients get a generic rejection.
    Invalid(String),
    /// The event broke a field rule; the error is safe to echo to the client.
    Error(ValidationError),
}

impl DeliveryEvent {
    /// Check the domain rules for this event.
    ///
    /// Field checks run first (cheapest diagnostics), then the cross-field
    /// consistency checks.
    pub fn validate(&self) -> ValidationOutcome {
        use ValidationOutcome::{Error, Invalid, Valid};

        if self.match_id <= 0 {
            return Error(ValidationError::MatchId(self.match_id));
        }
        if !KNOWN_EVENT_TYPES.contains(&self.event_type.as_str()) {
            return Error(ValidationError::UnknownEventType(self.event_type.clone()));
        }
        if OffsetDateTime::parse(&self.timestamp, &Rfc3339).is_err() {
            return Error(ValidationError::Timestamp(self.timestamp.clone()));
        }
        if self.ball.innings < 1 {
            return Error(ValidationError::Innings(self.ball.innings));
        }
        if self.ball.ball < 1 {
            return Error(ValidationError::BallNumber(self.ball.ball));
        }
        if !team_named(&self.ball.batting_team) {
            return Error(ValidationError::Team { role: "batting" });
        }
        if !team_named(&self.ball.fielding_team) {
            return Error(ValidationError::Team { role: "fielding" });
        }
        if !player_named(&self.batsmen.striker) {
            return Error(ValidationError::Player { role: "striker" });
        }
        if !player_named(&self.batsmen.non_striker) {
            return Error(ValidationError::Player { role: "non-striker" });
        }
        if !player_named(&self.bowler) {
            return Error(ValidationError::Player { role: "bowler" });
        }

        if self.ball.batting_team == self.ball.fielding_team {
            return Invalid(format!(
                "batting and fielding team are both {:?}",
                self.ball.batting_team.name
            ));
        }
        if self.batsmen.striker == self.batsmen.non_striker {
            return Invalid(format!(
                "striker and non-striker are both {:?}",
                self.batsmen.striker.name
            ));
        }

        Valid
    }
}

fn player_named(player: &Player) -> bool {
    player.id > 0 && !player.name.is_empty()
}

fn team_named(team: &Team) -> bool {
    team.id > 0 && !team.name.is_empty()
}
