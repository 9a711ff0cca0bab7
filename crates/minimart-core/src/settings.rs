//! # Store Settings
//!
//! The durable client-side configuration blob: store identity for receipt
//! headers and the tax toggle/rate used at checkout.
//!
//! ## Ownership
//! This blob lives with the client (browser localStorage under a fixed
//! key), not in the relational store, and is not synchronized across
//! devices. The server treats it as an external
//! collaborator: checkout accepts an already-computed tax amount instead of
//! reading settings itself. This type exists so both sides agree on the
//! schema and on how tax is derived from it.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Fixed key the settings blob is stored under on the client.
pub const SETTINGS_KEY: &str = "minimart_settings";

/// Store identity and tax configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    /// Store name (receipt header).
    pub store_name: String,

    /// Address lines (receipt header/footer).
    pub store_address: Vec<String>,

    /// Currency symbol, display only.
    pub currency_symbol: String,

    /// Whether tax is applied at checkout.
    pub tax_enabled: bool,

    /// Tax rate in basis points (825 = 8.25%). Basis points keep the rate
    /// integral; percentages only appear at the display edge.
    pub tax_rate_bps: u32,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            store_name: "Minimart".to_string(),
            store_address: Vec::new(),
            currency_symbol: "$".to_string(),
            tax_enabled: false,
            tax_rate_bps: 0,
        }
    }
}

impl StoreSettings {
    /// Tax on a subtotal, rounded half-up to the nearest cent. Zero when tax
    /// is disabled.
    ///
    /// Clients call this before checkout and submit the result as the
    /// optional `taxCents` field.
    pub fn tax_cents(&self, subtotal: Money) -> Money {
        if !self.tax_enabled || self.tax_rate_bps == 0 {
            return Money::zero();
        }
        let raw = subtotal.cents() as i128 * self.tax_rate_bps as i128;
        // Half-up over the 10_000 bps divisor.
        let rounded = (raw + 5_000) / 10_000;
        Money::from_cents(rounded as i64)
    }

    /// Rate as a display percentage.
    pub fn tax_rate_percent(&self) -> f64 {
        self.tax_rate_bps as f64 / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxed(bps: u32) -> StoreSettings {
        StoreSettings {
            tax_enabled: true,
            tax_rate_bps: bps,
            ..StoreSettings::default()
        }
    }

    #[test]
    fn disabled_tax_is_zero() {
        let settings = StoreSettings::default();
        assert_eq!(settings.tax_cents(Money::from_cents(1000)), Money::zero());
    }

    #[test]
    fn tax_rounds_half_up() {
        // 8.25% of $10.99 = 90.6675 cents → 91
        assert_eq!(taxed(825).tax_cents(Money::from_cents(1099)).cents(), 91);
        // 5% of $10.00 = 50 exactly
        assert_eq!(taxed(500).tax_cents(Money::from_cents(1000)).cents(), 50);
        // 7.5% of $0.10 = 0.75 cents → 1
        assert_eq!(taxed(750).tax_cents(Money::from_cents(10)).cents(), 1);
    }

    #[test]
    fn blob_round_trips_under_fixed_key() {
        let settings = taxed(825);
        let blob = serde_json::to_string(&settings).unwrap();
        assert!(blob.contains("taxRateBps"));
        let back: StoreSettings = serde_json::from_str(&blob).unwrap();
        assert_eq!(back, settings);
    }
}
