//! Turns coordinator state into what the component renders.
//!
//! Everything here is recomputed on each render. The listing join in
//! particular must reflect the current selection, which can change faster
//! than the stall snapshot.

use crate::coordinator::CoordinatorState;
use crate::host::PageIdentity;
use api::inventory::InventoryAsset;
use api::item_info::{ItemInfo, Rank};
use api::stall::{Contract, StallSnapshot};

#[derive(Debug, Clone, PartialEq, strum::EnumIs)]
pub enum ViewState {
    Loading,
    Empty,
    Populated(PopulatedView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopulatedView {
    pub item: ItemInfo,
    pub rank: Option<Rank>,
    pub market_listing: Option<Contract>,
    /// Only the owner is asked to list an item that is not listed yet.
    pub show_list_call_to_action: bool,
}

impl PopulatedView {
    pub fn float_value(&self) -> String {
        self.item.formatted_float()
    }

    pub fn paint_seed(&self) -> String {
        self.item.formatted_seed()
    }
}

/// The listing in `stall` for the selected asset, if any.
pub fn matching_listing(
    stall: Option<&StallSnapshot>,
    selection: Option<&InventoryAsset>,
) -> Option<Contract> {
    let asset = selection?;
    stall?.find_listing(&asset.assetid).cloned()
}

pub fn show_list_call_to_action(listing: Option<&Contract>, identity: &PageIdentity) -> bool {
    listing.is_none() && identity.viewer_is_owner()
}

pub fn derive_view_state(
    state: &CoordinatorState,
    selection: Option<&InventoryAsset>,
    identity: &PageIdentity,
    rank_threshold: u32,
) -> ViewState {
    if state.loading {
        return ViewState::Loading;
    }
    let Some(item) = &state.item_info else {
        return ViewState::Empty;
    };

    let market_listing = matching_listing(state.stall.as_ref(), selection);
    let show_list_call_to_action = show_list_call_to_action(market_listing.as_ref(), identity);

    ViewState::Populated(PopulatedView {
        item: item.clone(),
        rank: item.lowest_rank(rank_threshold),
        market_listing,
        show_list_call_to_action,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::inventory::SteamId;
    use api::stall::ContractItem;

    fn asset(id: &str) -> InventoryAsset {
        InventoryAsset {
            assetid: id.into(),
            description: None,
        }
    }

    fn stall(asset_ids: &[&str]) -> StallSnapshot {
        StallSnapshot {
            listings: asset_ids
                .iter()
                .enumerate()
                .map(|(i, a)| Contract {
                    id: format!("listing-{i}"),
                    price: 100,
                    item: ContractItem {
                        asset_id: a.to_string(),
                    },
                })
                .collect(),
        }
    }

    fn populated(stall: Option<StallSnapshot>) -> CoordinatorState {
        CoordinatorState {
            loading: false,
            item_info: Some(ItemInfo {
                floatvalue: 0.5,
                low_rank: Some(7),
                ..Default::default()
            }),
            stall,
        }
    }

    fn identity(owner: &str, viewer: &str) -> PageIdentity {
        PageIdentity {
            owner: SteamId::new(owner),
            viewer: SteamId::new(viewer),
        }
    }

    #[test]
    fn loading_wins_over_item_info() {
        let mut state = populated(None);
        state.loading = true;
        assert!(derive_view_state(&state, None, &PageIdentity::default(), 1000).is_loading());
    }

    #[test]
    fn no_item_info_is_empty() {
        let state = CoordinatorState::default();
        assert!(derive_view_state(&state, Some(&asset("1")), &PageIdentity::default(), 1000)
            .is_empty());
    }

    #[test]
    fn listing_join_matches_asset_id() {
        let snapshot = stall(&["1", "2"]);
        assert_eq!(
            matching_listing(Some(&snapshot), Some(&asset("2"))).map(|c| c.id),
            Some("listing-1".to_string())
        );
        assert!(matching_listing(Some(&snapshot), Some(&asset("3"))).is_none());
        assert!(matching_listing(None, Some(&asset("1"))).is_none());
        assert!(matching_listing(Some(&snapshot), None).is_none());
    }

    #[test]
    fn call_to_action_only_for_owner_without_listing() {
        let state = populated(Some(stall(&["9"])));
        let selection = asset("1");

        let ViewState::Populated(own) =
            derive_view_state(&state, Some(&selection), &identity("7", "7"), 1000)
        else {
            panic!("expected populated view");
        };
        assert!(own.market_listing.is_none());
        assert!(own.show_list_call_to_action);
        assert_eq!(own.rank.map(|r| r.position), Some(7));

        let ViewState::Populated(visitor) =
            derive_view_state(&state, Some(&selection), &identity("7", "8"), 1000)
        else {
            panic!("expected populated view");
        };
        assert!(!visitor.show_list_call_to_action);
    }

    #[test]
    fn listed_item_hides_call_to_action() {
        let state = populated(Some(stall(&["1"])));
        let ViewState::Populated(view) =
            derive_view_state(&state, Some(&asset("1")), &identity("7", "7"), 1000)
        else {
            panic!("expected populated view");
        };
        assert_eq!(view.market_listing.map(|c| c.id), Some("listing-0".into()));
        assert!(!view.show_list_call_to_action);
    }
}
