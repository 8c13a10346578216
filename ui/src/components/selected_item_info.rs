// File: src/components/selected_item_info.rs
use crate::components::market_button::{ListOnMarket, ListedOnMarket};
use crate::hooks::use_selection_coordinator;
use crate::host::{page_host, PageIdentity};
use crate::view_state::{derive_view_state, ViewState};
use api::settings::Settings;
use dioxus::prelude::*;
use std::rc::Rc;

/// Float, paint seed and market status of the item selected in the
/// inventory.
#[component]
pub fn SelectedItemInfo() -> Element {
    let settings = use_hook(|| Rc::new(Settings::default()));
    let host = use_hook(page_host);
    let state = use_selection_coordinator(host.clone(), settings.poll_interval());

    // Selection and identity are re-read on every render.
    let selection = host.selected_item();
    let identity = PageIdentity::read(&*host);
    let view = derive_view_state(
        &state.read(),
        selection.as_ref(),
        &identity,
        settings.rank_threshold,
    );

    match view {
        ViewState::Loading => rsx! {
            div { "Loading..." }
        },
        ViewState::Empty => rsx! {},
        ViewState::Populated(view) => {
            let float_value = view.float_value();
            let paint_seed = view.paint_seed();
            let rank = view.rank.map(|rank| {
                (
                    settings.rank_url(view.item.defindex, view.item.paintindex, rank.position),
                    rank.position,
                )
            });
            let logo_url = format!("{}/assets/full_logo.png", settings.market_url);
            let listing = view.market_listing.map(|listing| {
                (settings.listing_url(&listing.id), listing.formatted_price())
            });

            rsx! {
                div {
                    style: "margin-bottom: 10px;",
                    div {
                        "Float: {float_value} "
                        if let Some((rank_url, position)) = rank {
                            a {
                                href: "{rank_url}",
                                target: "_blank",
                                "(Rank #{position})"
                            }
                        }
                    }
                    div { "Paint Seed: {paint_seed}" }
                    if view.show_list_call_to_action {
                        ListOnMarket {
                            market_url: settings.market_url.clone(),
                            logo_url: logo_url.clone(),
                        }
                    }
                    if let Some((listing_url, price)) = listing {
                        ListedOnMarket {
                            listing_url,
                            price,
                            logo_url,
                        }
                    }
                }
            }
        }
    }
}
