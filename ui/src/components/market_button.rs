// File: src/components/market_button.rs
use dioxus::prelude::*;

const CONTAINER_STYLE: &str = "
    margin: 10px 0 10px 0;
    padding: 5px;
    width: fit-content;
    border: 1px #5a5a5a solid;
    background-color: #383838;
    border-radius: 3px;
";

const LINK_STYLE: &str = "
    font-size: 15px;
    display: flex;
    align-items: center;
    color: #ebebeb;
    text-decoration: none;
";

/// Shown when the selected item is listed on the market.
#[component]
pub fn ListedOnMarket(listing_url: String, price: String, logo_url: String) -> Element {
    rsx! {
        div {
            style: CONTAINER_STYLE,
            a {
                style: LINK_STYLE,
                href: "{listing_url}",
                target: "_blank",
                img {
                    src: "{logo_url}",
                    height: "21",
                    style: "margin-right: 5px;",
                }
                span {
                    "Listed for "
                    b { "{price}" }
                }
            }
        }
    }
}

/// Asks the owner to list an item that is not on the market yet.
#[component]
pub fn ListOnMarket(market_url: String, logo_url: String) -> Element {
    rsx! {
        div {
            style: CONTAINER_STYLE,
            a {
                style: LINK_STYLE,
                href: "{market_url}",
                target: "_blank",
                span { "List on " }
                img {
                    src: "{logo_url}",
                    height: "21",
                    style: "margin-left: 5px;",
                }
            }
        }
    }
}
