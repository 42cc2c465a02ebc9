//! # pw-events
//!
//! Notification events and best-effort dispatch for the Pitchworks lifecycle
//! engine.
//!
//! Workflows emit a [`MarketEvent`] per recipient after their transaction
//! commits. The [`EventDispatcher`] fans each event out to every registered
//! [`NotificationSink`] — a failing sink is logged and reported in the
//! returned outcomes, but never stops delivery to the remaining sinks and
//! never fails the workflow that emitted the event.
//!
//! ## Key components
//!
//! - [`MarketEvent`] — the stable event types sinks can subscribe to
//! - [`NotificationSink`] — trait for receiving events (log, email, webhook)
//! - [`EventDispatcher`] — fan-out with per-sink failure isolation
//! - [`LogSink`] — JSONL file sink (always-on)
//! - [`PortalLinkIssuer`] — signed, time-limited client portal links

pub mod dispatch;
pub mod error;
pub mod event;
pub mod portal;

pub use dispatch::{DispatchOutcome, EventDispatcher, LogSink, NotificationSink};
pub use error::EventError;
pub use event::MarketEvent;
pub use portal::{PortalLink, PortalLinkIssuer};
