//! Types mirroring the host inventory page's view of an item, plus the
//! helpers that decide whether an item can be inspected.

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use std::fmt;

/// Placeholders substituted into an inspect link template.
const OWNER_PLACEHOLDER: &str = "%owner_steamid%";
const ASSET_PLACEHOLDER: &str = "%assetid%";

/// Words that only appear in the market name of a skin. Used when the
/// description carries no tags.
const SKIN_KEYWORDS: [&str; 6] = [
    "★",
    "Factory New",
    "Minimal Wear",
    "Field-Tested",
    "Well-Worn",
    "Battle-Scarred",
];

/// A 64-bit steam account identifier, kept in its decimal string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SteamId(String);

impl SteamId {
    /// Returns `None` for an empty id, which the host page uses for "nobody".
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SteamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully substituted inspect link. This is the key for float lookups.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InspectLink(String);

impl InspectLink {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InspectLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AssetAction {
    pub link: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AssetTag {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub internal_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AssetDescription {
    #[serde(default)]
    pub actions: Option<Vec<AssetAction>>,
    #[serde(default)]
    pub tags: Option<Vec<AssetTag>>,
    #[serde(default)]
    pub market_hash_name: String,
    /// The host page sends `0`/`1` here.
    #[serde(default, deserialize_with = "bool_or_int")]
    pub commodity: bool,
}

/// The item the user currently has selected in the host inventory.
///
/// Equality is by value, which is what selection change detection compares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InventoryAsset {
    pub assetid: String,
    #[serde(default)]
    pub description: Option<AssetDescription>,
}

impl InventoryAsset {
    /// Returns whether this item has per-unit float data worth fetching.
    pub fn is_skin(&self) -> bool {
        self.description.as_ref().is_some_and(is_skin)
    }

    /// Derives the float lookup key for this item.
    ///
    /// Returns `None` when the item has no inspect action or the inventory
    /// owner is unknown. Commodities never have inspect actions.
    pub fn inspect_link(&self, owner: Option<&SteamId>) -> Option<InspectLink> {
        let action = self.description.as_ref()?.actions.as_ref()?.first()?;
        let owner = owner?;

        Some(InspectLink(
            action
                .link
                .replace(OWNER_PLACEHOLDER, owner.as_str())
                .replace(ASSET_PLACEHOLDER, &self.assetid),
        ))
    }
}

/// Classifies a description as a skin.
///
/// Tagged descriptions are skins when they carry a weapon tag or the gloves
/// type tag. Untagged ones fall back to keywords in the market name.
pub fn is_skin(description: &AssetDescription) -> bool {
    if description.commodity {
        return false;
    }

    match &description.tags {
        Some(tags) => tags.iter().any(|t| {
            t.category == "Weapon" || (t.category == "Type" && t.internal_name == "Type_Hands")
        }),
        None => SKIN_KEYWORDS
            .iter()
            .any(|k| description.market_hash_name.contains(k)),
    }
}

fn bool_or_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    Ok(match Option::<Flag>::deserialize(deserializer)? {
        Some(Flag::Bool(b)) => b,
        Some(Flag::Int(i)) => i != 0,
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINK: &str =
        "steam://rungame/730/76561202255233023/+csgo_econ_action_preview%20S%owner_steamid%A%assetid%D123";

    fn owner() -> SteamId {
        SteamId::new("76561198000000001").unwrap()
    }

    fn ak(assetid: &str) -> InventoryAsset {
        InventoryAsset {
            assetid: assetid.into(),
            description: Some(AssetDescription {
                actions: Some(vec![AssetAction {
                    link: LINK.into(),
                    name: "Inspect in Game...".into(),
                }]),
                tags: Some(vec![AssetTag {
                    category: "Weapon".into(),
                    internal_name: "weapon_ak47".into(),
                }]),
                market_hash_name: "AK-47 | Redline (Field-Tested)".into(),
                commodity: false,
            }),
        }
    }

    #[test]
    fn substitutes_owner_and_asset() {
        let link = ak("999").inspect_link(Some(&owner())).unwrap();
        assert_eq!(
            link.as_str(),
            "steam://rungame/730/76561202255233023/+csgo_econ_action_preview%20S76561198000000001A999D123"
        );
    }

    #[test]
    fn no_link_without_owner_or_action() {
        assert!(ak("1").inspect_link(None).is_none());

        let mut case = ak("1");
        case.description.as_mut().unwrap().actions = Some(vec![]);
        assert!(case.inspect_link(Some(&owner())).is_none());

        let bare = InventoryAsset {
            assetid: "1".into(),
            description: None,
        };
        assert!(bare.inspect_link(Some(&owner())).is_none());
    }

    #[test]
    fn classifies_skins() {
        assert!(ak("1").is_skin());

        let mut gloves = ak("2");
        gloves.description.as_mut().unwrap().tags = Some(vec![AssetTag {
            category: "Type".into(),
            internal_name: "Type_Hands".into(),
        }]);
        assert!(gloves.is_skin());

        let case = AssetDescription {
            tags: Some(vec![AssetTag {
                category: "Type".into(),
                internal_name: "CSGO_Type_WeaponCase".into(),
            }]),
            market_hash_name: "Chroma Case".into(),
            commodity: true,
            ..Default::default()
        };
        assert!(!is_skin(&case));

        let untagged = AssetDescription {
            market_hash_name: "★ Karambit | Fade (Factory New)".into(),
            ..Default::default()
        };
        assert!(is_skin(&untagged));
    }

    #[test]
    fn decodes_host_json() {
        let json = r#"{
            "assetid": "31337",
            "description": {
                "actions": [{"link": "x%assetid%", "name": "Inspect"}],
                "market_hash_name": "Sticker | Crown (Foil)",
                "commodity": 1
            }
        }"#;
        let asset: InventoryAsset = serde_json::from_str(json).unwrap();
        assert_eq!(asset.assetid, "31337");
        assert!(asset.description.as_ref().unwrap().commodity);
        assert!(!asset.is_skin());
    }

    #[test]
    fn empty_steam_id_is_none() {
        assert!(SteamId::new("").is_none());
    }
}
