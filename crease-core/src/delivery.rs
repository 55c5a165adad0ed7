//! The delivery-event wire schema.
//!
//! One `DeliveryEvent` describes a single ball bowled in a match. The JSON
//! field names are fixed by the scoring clients that submit events, so every
//! struct here carries explicit `serde` renames where Rust naming differs.
//!
//! Decoding is deliberately lenient: every field has a default, so a
//! structurally valid JSON object with fields missing still decodes and is
//! then rejected by [`validate`](crate::validate) with a proper diagnostic,
//! rather than failing at the parse stage.

use serde::{Deserialize, Serialize};

/// A single ball-by-ball event as submitted by a scoring client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeliveryEvent {
    /// The match this delivery belongs to.
    #[serde(rename = "match", default)]
    pub match_id: i64,

    /// What happened on this ball (e.g. `delivery`, `wide`, `bowled`).
    #[serde(rename = "eventType", default)]
    pub event_type: String,

    /// When the ball was bowled, RFC 3339.
    #[serde(default)]
    pub timestamp: String,

    /// Position of this ball within the match.
    #[serde(default)]
    pub ball: BallInfo,

    /// Runs scored off this ball.
    #[serde(default)]
    pub runs: u32,

    /// The two batsmen at the crease.
    #[serde(default)]
    pub batsmen: Batsmen,

    /// The bowler of this delivery.
    #[serde(default)]
    pub bowler: Player,

    /// The fielder involved, if the event type has one (caught, run out).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fielder: Option<Player>,
}

/// Where in the match a delivery happened.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BallInfo {
    #[serde(rename = "battingTeam", default)]
    pub batting_team: Team,
    #[serde(rename = "fieldingTeam", default)]
    pub fielding_team: Team,
    #[serde(default)]
    pub innings: u32,
    /// Completed overs before this ball, zero-based.
    #[serde(default)]
    pub over: u32,
    /// Ball number within the over, one-based.
    #[serde(default)]
    pub ball: u32,
}

/// The striker and non-striker for a delivery.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Batsmen {
    #[serde(default)]
    pub striker: Player,
    #[serde(rename = "nonStriker", default)]
    pub non_striker: Player,
}

/// A named participant in the match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

/// A team, referenced from the ball context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}
