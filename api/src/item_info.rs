//! Float data returned by the inspection service for a single item.

use serde::Deserialize;
use serde::Serialize;

/// Number of decimals a float value is displayed with.
pub const FLOAT_DISPLAY_DECIMALS: usize = 14;

/// The inspection result for one item.
///
/// Values are replaced wholesale when a newer lookup resolves; they are never
/// patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ItemInfo {
    pub floatvalue: f64,
    #[serde(default)]
    pub paintseed: u32,
    #[serde(default)]
    pub paintindex: u32,
    #[serde(default)]
    pub defindex: u32,
    #[serde(default)]
    pub low_rank: Option<u32>,
    #[serde(default)]
    pub high_rank: Option<u32>,
    #[serde(default)]
    pub full_item_name: Option<String>,
}

/// Which end of the float range a rank is counted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIs)]
pub enum RankOrder {
    Low,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rank {
    pub position: u32,
    pub order: RankOrder,
}

impl ItemInfo {
    /// Float value with fixed precision, e.g. `0.12345678901230`.
    pub fn formatted_float(&self) -> String {
        format!("{:.*}", FLOAT_DISPLAY_DECIMALS, self.floatvalue)
    }

    pub fn formatted_seed(&self) -> String {
        self.paintseed.to_string()
    }

    /// Returns the best rank of this item, if it is notable.
    ///
    /// A rank is notable when its position is at most `threshold`. When both
    /// ranks qualify the smaller position wins, low rank on ties.
    pub fn lowest_rank(&self, threshold: u32) -> Option<Rank> {
        let low = self.low_rank.map(|position| Rank {
            position,
            order: RankOrder::Low,
        });
        let high = self.high_rank.map(|position| Rank {
            position,
            order: RankOrder::High,
        });

        [low, high]
            .into_iter()
            .flatten()
            .filter(|r| r.position <= threshold)
            .min_by_key(|r| r.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_float_to_fourteen_places() {
        let info = ItemInfo {
            floatvalue: 0.1234567890123,
            ..Default::default()
        };
        assert_eq!(info.formatted_float(), "0.12345678901230");
    }

    #[test]
    fn picks_notable_rank() {
        let info = ItemInfo {
            low_rank: Some(40),
            high_rank: Some(12),
            ..Default::default()
        };
        assert_eq!(
            info.lowest_rank(1000),
            Some(Rank {
                position: 12,
                order: RankOrder::High
            })
        );

        let info = ItemInfo {
            low_rank: Some(5000),
            ..Default::default()
        };
        assert_eq!(info.lowest_rank(1000), None);
        assert_eq!(ItemInfo::default().lowest_rank(1000), None);
    }

    #[test]
    fn decodes_service_payload() {
        let json = r#"{"floatvalue":0.071,"paintseed":661,"paintindex":44,"defindex":7,"low_rank":3}"#;
        let info: ItemInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.paintseed, 661);
        assert_eq!(info.high_rank, None);
        assert!(info.lowest_rank(1000).unwrap().order.is_low());
    }
}
