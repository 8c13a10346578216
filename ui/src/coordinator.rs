//! Keeps one component instance's float data in step with the host
//! page's selected item.
//!
//! Each selection change starts a new lookup and bumps a generation
//! counter. A lookup only publishes its result if its generation is still
//! the latest when it resolves, so an older, slower request can never
//! overwrite a newer one. In-flight requests are not cancelled; their
//! results are dropped.

use crate::host::InventoryHost;
use crate::observer::Observer;
use api::fetcher::Fetch;
use api::inventory::{InspectLink, InventoryAsset, SteamId};
use api::item_info::ItemInfo;
use api::stall::StallSnapshot;
use dioxus_logger::tracing::{debug, error};
use futures::stream::{FuturesUnordered, StreamExt};
use std::cell::Cell;
use std::pin::pin;
use std::time::Duration;
use tokio::sync::watch;

/// Everything the view is derived from.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CoordinatorState {
    pub loading: bool,
    pub item_info: Option<ItemInfo>,
    pub stall: Option<StallSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIs)]
pub enum Phase {
    Idle,
    Fetching,
    Populated,
}

impl CoordinatorState {
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Fetching
        } else if self.item_info.is_some() {
            Phase::Populated
        } else {
            Phase::Idle
        }
    }
}

pub struct SelectionCoordinator<F, S> {
    float: F,
    stall: S,
    state: watch::Sender<CoordinatorState>,
    generation: Cell<u64>,
}

/// Clears `loading` when a lookup finishes, however it finishes, unless a
/// newer lookup has taken over.
struct LoadingGuard<'a> {
    state: &'a watch::Sender<CoordinatorState>,
    latest: &'a Cell<u64>,
    generation: u64,
}

impl<'a> LoadingGuard<'a> {
    fn start(
        state: &'a watch::Sender<CoordinatorState>,
        latest: &'a Cell<u64>,
        generation: u64,
    ) -> Self {
        state.send_modify(|s| s.loading = true);
        Self {
            state,
            latest,
            generation,
        }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.latest.get() == self.generation {
            self.state.send_if_modified(|s| std::mem::replace(&mut s.loading, false));
        }
    }
}

impl<F, S> SelectionCoordinator<F, S>
where
    F: Fetch<InspectLink, ItemInfo>,
    S: Fetch<SteamId, StallSnapshot>,
{
    pub fn new(float: F, stall: S) -> Self {
        let (state, _) = watch::channel(CoordinatorState::default());
        Self {
            float,
            stall,
            state,
            generation: Cell::new(0),
        }
    }

    /// Receives every state change.
    pub fn subscribe(&self) -> watch::Receiver<CoordinatorState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> CoordinatorState {
        self.state.borrow().clone()
    }

    /// Starts a new generation and drops whatever the previous one showed.
    fn begin(&self) -> u64 {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);

        self.state.send_if_modified(|s| {
            let changed = s.loading || s.item_info.is_some();
            s.loading = false;
            s.item_info = None;
            changed
        });
        generation
    }

    fn is_latest(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }

    /// Runs the lookup for a newly selected item.
    ///
    /// Item info is cleared first, even when the next item is fetchable too.
    /// Items that are absent, not skins, or have no derivable inspect link
    /// leave the coordinator idle.
    pub async fn process_selection(&self, asset: Option<&InventoryAsset>, owner: Option<&SteamId>) {
        let generation = self.begin();

        let Some(asset) = asset else {
            return;
        };
        if !asset.is_skin() {
            return;
        }
        let Some(link) = asset.inspect_link(owner) else {
            return;
        };

        let _loading = LoadingGuard::start(&self.state, &self.generation, generation);

        match self.float.fetch(&link).await {
            Ok(info) if self.is_latest(generation) => {
                self.state.send_modify(|s| s.item_info = Some(info));
            }
            Ok(_) => {
                debug!(
                    "discarding float for {} from generation {}, latest is {}",
                    asset.assetid,
                    generation,
                    self.generation.get()
                );
            }
            Err(e) => {
                error!("Failed to fetch float for {}: {}", asset.assetid, e);
            }
        }
    }

    async fn process_owned(&self, asset: Option<InventoryAsset>, owner: Option<SteamId>) {
        self.process_selection(asset.as_ref(), owner.as_ref()).await
    }

    /// Loads the owner's listings. Failures are ignored.
    pub async fn load_stall(&self, owner: Option<&SteamId>) {
        let Some(owner) = owner else {
            return;
        };
        if self.state.borrow().stall.is_some() {
            return;
        }

        match self.stall.fetch(owner).await {
            Ok(snapshot) => self.state.send_modify(|s| s.stall = Some(snapshot)),
            Err(e) => debug!("no stall for {}: {}", owner, e),
        }
    }

    /// Mount sequence: process the current selection, watch it for changes,
    /// and load the owner's stall once.
    ///
    /// Lookups for successive selections overlap freely. Runs until dropped.
    pub async fn activate<H: InventoryHost + ?Sized>(&self, host: &H, poll_interval: Duration) {
        let observer = Observer::new(|| host.selected_item());
        let initial = observer.baseline().clone();

        let selections = async {
            let mut changes = pin!(observer.changes(poll_interval));
            let mut pending = FuturesUnordered::new();
            pending.push(self.process_owned(initial, host.owner_steam_id()));

            loop {
                tokio::select! {
                    Some(asset) = changes.next() => {
                        pending.push(self.process_owned(asset, host.owner_steam_id()));
                    }
                    Some(()) = pending.next(), if !pending.is_empty() => {}
                }
            }
        };

        let owner = host.owner_steam_id();
        futures::join!(self.load_stall(owner.as_ref()), selections);
    }
}
