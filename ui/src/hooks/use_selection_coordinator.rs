use crate::coordinator::{CoordinatorState, SelectionCoordinator};
use crate::host::InventoryHost;
use api::providers::{float_fetcher, stall_fetcher};
use dioxus::prelude::*;
use std::rc::Rc;
use std::time::Duration;

/// Runs a selection coordinator for the lifetime of the calling component.
///
/// Every component instance gets its own coordinator. Only the fetch caches
/// behind `float_fetcher()` and `stall_fetcher()` are shared. The returned
/// signal mirrors the coordinator's state, so reading it subscribes the
/// component to re-renders.
pub fn use_selection_coordinator(
    host: Rc<dyn InventoryHost>,
    poll_interval: Duration,
) -> Signal<CoordinatorState> {
    let state = use_signal(CoordinatorState::default);

    use_future(move || {
        let host = host.clone();
        let mut state = state;
        async move {
            let coordinator = SelectionCoordinator::new(float_fetcher(), stall_fetcher());
            let mut updates = coordinator.subscribe();

            let mirror = async {
                loop {
                    let next = updates.borrow_and_update().clone();
                    state.set(next);
                    if updates.changed().await.is_err() {
                        break;
                    }
                }
            };

            futures::join!(coordinator.activate(&*host, poll_interval), mirror);
        }
    });

    state
}
