//! Market listings ("stall") owned by one inventory owner.

use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ContractItem {
    pub asset_id: String,
}

/// One market offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Contract {
    pub id: String,
    /// Price in cents.
    pub price: u64,
    pub item: ContractItem,
}

impl Contract {
    /// Price as dollars, e.g. `$12.05`.
    pub fn formatted_price(&self) -> String {
        format!("${}.{:02}", self.price / 100, self.price % 100)
    }
}

/// All listings of one owner.
///
/// The service returns at most one listing per asset id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StallSnapshot {
    #[serde(default)]
    pub listings: Vec<Contract>,
}

impl StallSnapshot {
    pub fn find_listing(&self, asset_id: &str) -> Option<&Contract> {
        self.listings.iter().find(|c| c.item.asset_id == asset_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(id: &str, asset_id: &str, price: u64) -> Contract {
        Contract {
            id: id.into(),
            price,
            item: ContractItem {
                asset_id: asset_id.into(),
            },
        }
    }

    #[test]
    fn finds_by_asset_id() {
        let stall = StallSnapshot {
            listings: vec![listing("a", "100", 1), listing("b", "200", 2)],
        };
        assert_eq!(stall.find_listing("200").map(|c| c.id.as_str()), Some("b"));
        assert!(stall.find_listing("300").is_none());
    }

    #[test]
    fn formats_cents() {
        assert_eq!(listing("a", "1", 1205).formatted_price(), "$12.05");
        assert_eq!(listing("a", "1", 7).formatted_price(), "$0.07");
    }

    #[test]
    fn missing_listings_field_is_empty() {
        let stall: StallSnapshot = serde_json::from_str("{}").unwrap();
        assert!(stall.listings.is_empty());
    }
}
