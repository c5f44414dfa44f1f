//! HTTP transport for the parlor chat service.
//!
//! One synchronous round trip per operation, no retries, no queuing.
//! The [`ChatTransport`] trait is the seam the poller and the
//! foreground loop are written against; [`HttpTransport`] is the real
//! implementation, [`fakes::FakeTransport`] the test one.

pub mod client;
mod envelope;
pub mod fakes;
pub mod types;

pub use client::{ChatTransport, HttpTransport, TransportError};
pub use types::{Credential, DecodeError, Message};
