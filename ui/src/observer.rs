//! Change detection for values owned by the host page.
//!
//! The host exposes its state as plain globals with no change events, so an
//! [`Observer`] re-reads an accessor on every tick and reports a value only
//! when it differs from the previous reading. The first reading is the
//! baseline and is never reported.

use crate::compat::interval::Interval;
use futures::stream::{self, Stream, StreamExt};
use std::pin::pin;
use std::time::Duration;

pub struct Observer<T, A> {
    accessor: A,
    last: T,
}

impl<T, A> Observer<T, A>
where
    T: PartialEq + Clone,
    A: FnMut() -> T,
{
    /// Reads the accessor once to establish the baseline.
    pub fn new(mut accessor: A) -> Self {
        let last = accessor();
        Self { accessor, last }
    }

    /// The most recently recorded value.
    pub fn baseline(&self) -> &T {
        &self.last
    }

    /// Re-evaluates the accessor. Returns the new value if it changed.
    pub fn poll(&mut self) -> Option<T> {
        let value = (self.accessor)();
        if value == self.last {
            return None;
        }
        self.last = value.clone();
        Some(value)
    }

    /// Polls every `period` and yields each distinct transition.
    ///
    /// The stream never ends; drop it to stop observing.
    pub fn changes(self, period: Duration) -> impl Stream<Item = T> {
        stream::unfold(
            (self, Interval::new(period)),
            |(mut observer, mut interval)| async move {
                loop {
                    interval.tick().await;
                    if let Some(value) = observer.poll() {
                        return Some((value, (observer, interval)));
                    }
                }
            },
        )
    }
}

/// Calls `on_change` once for every distinct value `accessor` returns,
/// checked every `period`. Runs until the returned future is dropped.
pub async fn observe<T, A, F>(accessor: A, period: Duration, mut on_change: F)
where
    T: PartialEq + Clone,
    A: FnMut() -> T,
    F: FnMut(T),
{
    let mut changes = pin!(Observer::new(accessor).changes(period));
    while let Some(value) = changes.next().await {
        on_change(value);
    }
}
