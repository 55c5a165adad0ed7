#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![forbid(unsafe_code)]

//! HTTP clients for the gateway's two collaborators: the append-only event
//! store and the next-ball prediction service.
//!
//! Each collaborator is fronted by a trait ([`EventStore`], [`NextBall`]) so
//! the request pipeline takes injected handles and tests can substitute
//! in-memory doubles.

pub mod eventstore;
pub mod nextball;

pub use eventstore::{EventStore, EventStoreError, HttpEventStore};
pub use nextball::{HttpNextBallClient, NextBall, NextBallError};
