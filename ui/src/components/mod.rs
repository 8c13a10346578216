//! Components injected into the host inventory page.
pub mod market_button;
pub mod selected_item_info;
