//! Access to the host page's inventory globals.

use api::inventory::{InventoryAsset, SteamId};
use std::cell::RefCell;
use std::rc::Rc;

/// Read-only view of the inventory page the component is injected into.
///
/// Every method re-reads the host state; nothing is cached.
pub trait InventoryHost {
    /// The item the user currently has selected, if any.
    fn selected_item(&self) -> Option<InventoryAsset>;
    /// Owner of the inventory being viewed.
    fn owner_steam_id(&self) -> Option<SteamId>;
    /// The signed-in user, if any.
    fn viewer_steam_id(&self) -> Option<SteamId>;
}

/// Owner and viewer of the page at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageIdentity {
    pub owner: Option<SteamId>,
    pub viewer: Option<SteamId>,
}

impl PageIdentity {
    pub fn read(host: &(impl InventoryHost + ?Sized)) -> Self {
        Self {
            owner: host.owner_steam_id(),
            viewer: host.viewer_steam_id(),
        }
    }

    /// True only when both are known and equal.
    pub fn viewer_is_owner(&self) -> bool {
        matches!((&self.owner, &self.viewer), (Some(o), Some(v)) if o == v)
    }
}

/// A host whose state is set programmatically.
///
/// Used where no browser page exists, and by tests.
#[derive(Debug, Default)]
pub struct StaticHost {
    selected: RefCell<Option<InventoryAsset>>,
    owner: RefCell<Option<SteamId>>,
    viewer: RefCell<Option<SteamId>>,
}

impl StaticHost {
    pub fn new(owner: Option<SteamId>, viewer: Option<SteamId>) -> Self {
        Self {
            selected: RefCell::new(None),
            owner: RefCell::new(owner),
            viewer: RefCell::new(viewer),
        }
    }

    pub fn select(&self, asset: Option<InventoryAsset>) {
        *self.selected.borrow_mut() = asset;
    }
}

impl InventoryHost for StaticHost {
    fn selected_item(&self) -> Option<InventoryAsset> {
        self.selected.borrow().clone()
    }

    fn owner_steam_id(&self) -> Option<SteamId> {
        self.owner.borrow().clone()
    }

    fn viewer_steam_id(&self) -> Option<SteamId> {
        self.viewer.borrow().clone()
    }
}

/// The host for the current platform.
pub fn page_host() -> Rc<dyn InventoryHost> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(steam::SteamInventory)
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Rc::new(StaticHost::default())
    }
}

/// Reads `g_ActiveInventory` and `g_steamID` from the page window.
#[cfg(target_arch = "wasm32")]
pub mod steam {
    use super::InventoryHost;
    use api::inventory::{AssetDescription, InventoryAsset, SteamId};
    use dioxus_logger::tracing::debug;
    use js_sys::{Reflect, JSON};
    use wasm_bindgen::JsValue;

    pub struct SteamInventory;

    fn get(target: &JsValue, key: &str) -> Option<JsValue> {
        let value = Reflect::get(target, &JsValue::from_str(key)).ok()?;
        if value.is_undefined() || value.is_null() {
            None
        } else {
            Some(value)
        }
    }

    fn global(key: &str) -> Option<JsValue> {
        let window = web_sys::window()?;
        get(window.as_ref(), key)
    }

    fn active_inventory() -> Option<JsValue> {
        global("g_ActiveInventory")
    }

    /// Ids come through as strings, or numbers on some older pages.
    fn as_id_string(value: &JsValue) -> Option<String> {
        value
            .as_string()
            .or_else(|| value.as_f64().map(|n| format!("{n:.0}")))
    }

    impl InventoryHost for SteamInventory {
        fn selected_item(&self) -> Option<InventoryAsset> {
            let item = get(&active_inventory()?, "selectedItem")?;
            let assetid = as_id_string(&get(&item, "assetid")?)?;

            // The item object itself has DOM back-references, so only the
            // description is serialized.
            let description = get(&item, "description").and_then(|d| {
                let json = JSON::stringify(&d).ok()?.as_string()?;
                match serde_json::from_str::<AssetDescription>(&json) {
                    Ok(desc) => Some(desc),
                    Err(e) => {
                        debug!("unreadable description for {}: {}", assetid, e);
                        None
                    }
                }
            });

            Some(InventoryAsset {
                assetid,
                description,
            })
        }

        fn owner_steam_id(&self) -> Option<SteamId> {
            let owner = get(&active_inventory()?, "m_owner")?;
            SteamId::new(as_id_string(&get(&owner, "strSteamId")?)?)
        }

        fn viewer_steam_id(&self) -> Option<SteamId> {
            // `g_steamID` is `false` when nobody is signed in.
            SteamId::new(global("g_steamID")?.as_string()?)
        }
    }
}
