//! Broadcast channels for the reactive service layer.
//!
//! A [`Channel`] is a named, typed event stream with one of three retention
//! policies:
//!
//! - **latest** — keeps the most recent value; new subscribers receive it
//!   immediately (the `BehaviorSubject` of the original design).
//! - **replay** — keeps every emission; new subscribers receive the full
//!   history in order.
//! - **event** — keeps nothing; subscribers only see what is emitted after
//!   they attach.
//!
//! Emissions on a single channel reach every subscriber in emission order.
//! Nothing is guaranteed across channels — multi-stage pipelines discard
//! stale results by generation instead of assuming completion order, see
//! [`LatestGate`] and [`operators::map_to_latest_async`].
//!
//! Every derived channel and pump loop is scoped to a [`Teardown`]: when it
//! fires, the loop stops and the subscription is dropped.

mod channel;
mod gate;
pub mod operators;
mod teardown;

pub use channel::{Channel, Subscription};
pub use gate::{LatestGate, Ticket};
pub use teardown::Teardown;
