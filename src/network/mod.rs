//! Network layer - HTTP calls to the status backend and the notification stream
//!
//! The Network actor receives commands and sends back responses.

pub mod actor;
pub mod client;
pub mod notifications;

pub use actor::NetworkActor;
