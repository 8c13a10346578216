// Client-side logic injected into the steam inventory page.

pub mod compat;
pub mod components;
pub mod coordinator;
pub mod hooks;
pub mod host;
pub mod injection;
pub mod observer;
pub mod view_state;

pub use components::selected_item_info::SelectedItemInfo;

/// Anchors the item info is mounted after.
///
/// Steam swaps between two item info containers (for a fade animation) on
/// each selection, so both are watched.
pub const ITEM_INFO_ANCHORS: [&str; 2] = [
    "div#iteminfo0_content .item_desc_description div.item_desc_game_info",
    "div#iteminfo1_content .item_desc_description div.item_desc_game_info",
];
