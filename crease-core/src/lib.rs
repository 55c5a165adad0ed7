#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

pub mod delivery;
pub mod validate;

pub use delivery::{BallInfo, Batsmen, DeliveryEvent, Player, Team};
pub use validate::{ValidationError, ValidationOutcome};
