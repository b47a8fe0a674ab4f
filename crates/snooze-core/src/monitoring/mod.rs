//! Google Cloud Monitoring snooze API.
//!
//! [`SnoozeApi`] is the seam between the runner and the remote service;
//! [`MonitoringClient`] is the REST implementation and [`TokenSource`]
//! supplies its bearer token.

pub mod client;
pub mod emitter;
pub mod token;
pub mod traits;

pub use client::{MonitoringClient, DEFAULT_ENDPOINT};
pub use emitter::SnoozeEmitter;
pub use token::TokenSource;
pub use traits::{CreatedSnooze, SnoozeApi};
