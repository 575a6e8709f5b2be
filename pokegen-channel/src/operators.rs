//! Declarative combinators over [`Channel`]s.
//!
//! Every operator subscribes to its sources synchronously (so nothing
//! emitted after wiring is missed), spawns a pump task, and stops the pump
//! when the supplied [`Teardown`] fires or a source closes. Operator outputs
//! use latest-value retention: the pipelines built from them are
//! latest-wins end to end, and a subscriber that attaches between wiring
//! and the first poll still observes the current state.

use crate::channel::Channel;
use crate::gate::LatestGate;
use crate::teardown::Teardown;
use std::future::Future;
use tracing::warn;

/// Re-emits `(a, b)` whenever either source emits, once both have emitted
/// at least one value.
#[must_use]
pub fn combine_latest<A, B>(a: &Channel<A>, b: &Channel<B>, until: &Teardown) -> Channel<(A, B)>
where
    A: Clone + Send + 'static,
    B: Clone + Send + 'static,
{
    let mut sub_a = a.subscribe();
    let mut sub_b = b.subscribe();
    let out = Channel::latest_empty();

    let pump_out = out.clone();
    let until = until.clone();
    tokio::spawn(async move {
        let mut latest_a: Option<A> = None;
        let mut latest_b: Option<B> = None;
        loop {
            tokio::select! {
                _ = until.fired() => break,
                value = sub_a.next() => {
                    let Some(value) = value else { break };
                    latest_a = Some(value);
                    if let (Some(a), Some(b)) = (&latest_a, &latest_b) {
                        pump_out.emit((a.clone(), b.clone()));
                    }
                }
                value = sub_b.next() => {
                    let Some(value) = value else { break };
                    latest_b = Some(value);
                    if let (Some(a), Some(b)) = (&latest_a, &latest_b) {
                        pump_out.emit((a.clone(), b.clone()));
                    }
                }
            }
        }
    });

    out
}

/// Three-source [`combine_latest`].
#[must_use]
pub fn combine_latest3<A, B, C>(
    a: &Channel<A>,
    b: &Channel<B>,
    c: &Channel<C>,
    until: &Teardown,
) -> Channel<(A, B, C)>
where
    A: Clone + Send + 'static,
    B: Clone + Send + 'static,
    C: Clone + Send + 'static,
{
    let mut sub_a = a.subscribe();
    let mut sub_b = b.subscribe();
    let mut sub_c = c.subscribe();
    let out = Channel::latest_empty();

    let pump_out = out.clone();
    let until = until.clone();
    tokio::spawn(async move {
        let mut latest_a: Option<A> = None;
        let mut latest_b: Option<B> = None;
        let mut latest_c: Option<C> = None;
        macro_rules! emit_if_complete {
            () => {
                if let (Some(a), Some(b), Some(c)) = (&latest_a, &latest_b, &latest_c) {
                    pump_out.emit((a.clone(), b.clone(), c.clone()));
                }
            };
        }
        loop {
            tokio::select! {
                _ = until.fired() => break,
                value = sub_a.next() => {
                    let Some(value) = value else { break };
                    latest_a = Some(value);
                    emit_if_complete!();
                }
                value = sub_b.next() => {
                    let Some(value) = value else { break };
                    latest_b = Some(value);
                    emit_if_complete!();
                }
                value = sub_c.next() => {
                    let Some(value) = value else { break };
                    latest_c = Some(value);
                    emit_if_complete!();
                }
            }
        }
    });

    out
}

/// Emits `(primary, latest secondary)` on every primary emission. Primary
/// emissions arriving while the secondary has no value yet are skipped.
#[must_use]
pub fn with_latest_from<A, B>(
    primary: &Channel<A>,
    secondary: &Channel<B>,
    until: &Teardown,
) -> Channel<(A, B)>
where
    A: Clone + Send + 'static,
    B: Clone + Send + 'static,
{
    let mut sub_primary = primary.subscribe();
    let mut sub_secondary = secondary.subscribe();
    let out = Channel::latest_empty();

    let pump_out = out.clone();
    let until = until.clone();
    tokio::spawn(async move {
        let mut latest_secondary: Option<B> = None;
        loop {
            tokio::select! {
                _ = until.fired() => break,
                // Drain the secondary eagerly so a primary emission pairs
                // with the newest value the secondary has produced.
                value = sub_secondary.next() => {
                    let Some(value) = value else { break };
                    latest_secondary = Some(value);
                }
                value = sub_primary.next() => {
                    let Some(value) = value else { break };
                    while let Some(newer) = sub_secondary.try_next() {
                        latest_secondary = Some(newer);
                    }
                    if let Some(secondary) = &latest_secondary {
                        pump_out.emit((value, secondary.clone()));
                    }
                }
            }
        }
    });

    out
}

/// Maps each emission through `f`.
#[must_use]
pub fn map<A, B, F>(source: &Channel<A>, until: &Teardown, mut f: F) -> Channel<B>
where
    A: Clone + Send + 'static,
    B: Clone + Send + 'static,
    F: FnMut(A) -> B + Send + 'static,
{
    let mut sub = source.subscribe();
    let out = Channel::latest_empty();

    let pump_out = out.clone();
    let until = until.clone();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = until.fired() => break,
                value = sub.next() => {
                    let Some(value) = value else { break };
                    pump_out.emit(f(value));
                }
            }
        }
    });

    out
}

/// Suppresses emissions equal to the previous one. `initial` seeds both the
/// output channel and the comparison state.
#[must_use]
pub fn distinct_until_changed<T>(
    source: &Channel<T>,
    until: &Teardown,
    initial: Option<T>,
) -> Channel<T>
where
    T: Clone + PartialEq + Send + 'static,
{
    let mut sub = source.subscribe();
    let out = match &initial {
        Some(value) => Channel::latest(value.clone()),
        None => Channel::latest_empty(),
    };

    let pump_out = out.clone();
    let until = until.clone();
    tokio::spawn(async move {
        let mut last = initial;
        loop {
            tokio::select! {
                _ = until.fired() => break,
                value = sub.next() => {
                    let Some(value) = value else { break };
                    if last.as_ref() != Some(&value) {
                        last = Some(value.clone());
                        pump_out.emit(value);
                    }
                }
            }
        }
    });

    out
}

/// Switch-to-latest async mapping.
///
/// Every accepted input is issued a generation ticket and mapped through
/// `op` on its own task. A result is forwarded only if its ticket is still
/// current when the operation settles — results superseded by a newer input
/// are discarded on arrival, and they leave the busy flag alone (it belongs
/// to the newer operation by then).
///
/// Failures are logged under `label` and swallowed: one failed item never
/// terminates the pump or stalls subsequent items. The busy flag, when
/// given, is raised as an input is accepted and lowered when the
/// current-generation operation settles, success or not.
#[must_use]
pub fn map_to_latest_async<T, U, F, Fut>(
    label: &'static str,
    source: &Channel<T>,
    busy: Option<&Channel<bool>>,
    until: &Teardown,
    op: F,
) -> Channel<U>
where
    T: Clone + Send + 'static,
    U: Clone + Send + 'static,
    F: Fn(T) -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<U>> + Send + 'static,
{
    let mut sub = source.subscribe();
    let out = Channel::latest_empty();
    let gate = LatestGate::new();

    let pump_out = out.clone();
    let busy = busy.cloned();
    let until = until.clone();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = until.fired() => break,
                input = sub.next() => {
                    let Some(input) = input else { break };
                    let ticket = gate.issue();
                    if let Some(flag) = &busy {
                        flag.emit(true);
                    }
                    let future = op(input);
                    let task_out = pump_out.clone();
                    let task_busy = busy.clone();
                    let task_until = until.clone();
                    tokio::spawn(async move {
                        let result = future.await;
                        if !ticket.is_current() || task_until.is_fired() {
                            return;
                        }
                        if let Some(flag) = &task_busy {
                            flag.emit(false);
                        }
                        match result {
                            Ok(value) => task_out.emit(value),
                            Err(err) => warn!("{label}: {err:#}"),
                        }
                    });
                }
            }
        }
    });

    out
}

/// Pumps every emission of `source` into `target`.
pub fn forward_into<T>(source: &Channel<T>, target: &Channel<T>, until: &Teardown)
where
    T: Clone + Send + 'static,
{
    let mut sub = source.subscribe();
    let target = target.clone();
    let until = until.clone();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = until.fired() => break,
                value = sub.next() => {
                    let Some(value) = value else { break };
                    target.emit(value);
                }
            }
        }
    });
}

/// Runs `f` for every emission, until the teardown fires.
pub fn for_each<T, F>(source: &Channel<T>, until: &Teardown, mut f: F)
where
    T: Clone + Send + 'static,
    F: FnMut(T) + Send + 'static,
{
    let mut sub = source.subscribe();
    let until = until.clone();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = until.fired() => break,
                value = sub.next() => {
                    let Some(value) = value else { break };
                    f(value);
                }
            }
        }
    });
}

/// Awaits a fallible future, logging and discarding the error.
///
/// The recovery policy of every pipeline stage: substitute "no emission"
/// for a failure so downstream subscribers simply see nothing.
pub async fn catch_and_recover<U, Fut>(label: &'static str, future: Fut) -> Option<U>
where
    Fut: Future<Output = anyhow::Result<U>>,
{
    match future.await {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("{label}: {err:#}");
            None
        }
    }
}
