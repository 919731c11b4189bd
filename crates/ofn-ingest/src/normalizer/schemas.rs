//! Built-in provider schemas
//!
//! Example payloads:
//!
//! ```text
//! ProviderA: {"provider_name":"ProviderA","id":"abc123","cost":"123.45","currency":"USD",
//!             "depart":"2025-11-01T09:00:00Z","class":"economy"}
//! ProviderB: {"vendor":"ProviderB","sku":999,
//!             "pricing":{"amount":12345,"currency_code":"USD","units":"cents"},
//!             "times":{"leave":1698772345}}
//! generic:   {"price":42.0,"currency":"EUR"}
//! ```

use ofn_common::OfferDraft;

use super::payload::{
    as_reference, as_string, child, parse_epoch_seconds, parse_number, parse_timestamp, Payload,
};
use super::ProviderSchema;

pub const PROVIDER_A: &str = "ProviderA";
pub const PROVIDER_B: &str = "ProviderB";
pub const GENERIC: &str = "generic";

/// Currency assumed for ProviderB when `pricing.currency_code` is missing
pub const PROVIDER_B_DEFAULT_CURRENCY: &str = "USD";

/// Flat schema tagged with `"provider_name": "ProviderA"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderASchema;

impl ProviderSchema for ProviderASchema {
    fn provider_id(&self) -> &str {
        PROVIDER_A
    }

    fn matches(&self, payload: &Payload) -> bool {
        payload.get("provider_name").and_then(|v| v.as_str()) == Some(PROVIDER_A)
    }

    fn extract(&self, payload: &Payload) -> OfferDraft {
        OfferDraft {
            provider_id: PROVIDER_A.to_string(),
            provider_ref: as_string(payload.get("id")),
            price: parse_number(payload.get("cost")),
            currency: as_string(payload.get("currency")),
            fare_class: as_string(payload.get("class")),
            depart_at: parse_timestamp(payload.get("depart")),
            return_at: None,
        }
    }
}

/// Nested schema recognised by the presence of a `vendor` key.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProviderBSchema;

impl ProviderSchema for ProviderBSchema {
    fn provider_id(&self) -> &str {
        PROVIDER_B
    }

    fn matches(&self, payload: &Payload) -> bool {
        payload.contains_key("vendor")
    }

    fn extract(&self, payload: &Payload) -> OfferDraft {
        let mut price = 0.0;
        let mut currency = PROVIDER_B_DEFAULT_CURRENCY.to_string();

        if let Some(pricing) = child(payload, "pricing") {
            if let Some(amount) = pricing.get("amount") {
                price = parse_number(Some(amount));
                // amounts tagged as cents are stored in major units
                if pricing.get("units").and_then(|v| v.as_str()) == Some("cents") {
                    price /= 100.0;
                }
            }
            if let Some(code) = pricing.get("currency_code").and_then(|v| v.as_str()) {
                currency = code.to_string();
            }
        }

        let depart_at =
            child(payload, "times").and_then(|times| parse_epoch_seconds(times.get("leave")));

        OfferDraft {
            provider_id: PROVIDER_B.to_string(),
            provider_ref: as_reference(payload.get("sku")),
            price,
            currency,
            fare_class: String::new(),
            depart_at,
            return_at: None,
        }
    }
}

/// Fallback for any payload carrying a top-level `price`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericSchema;

impl ProviderSchema for GenericSchema {
    fn provider_id(&self) -> &str {
        GENERIC
    }

    fn matches(&self, payload: &Payload) -> bool {
        payload.contains_key("price")
    }

    fn extract(&self, payload: &Payload) -> OfferDraft {
        OfferDraft {
            provider_id: GENERIC.to_string(),
            price: parse_number(payload.get("price")),
            currency: as_string(payload.get("currency")),
            ..OfferDraft::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    fn object(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_provider_a_matches_only_its_marker() {
        assert!(ProviderASchema.matches(&object(json!({"provider_name": "ProviderA"}))));
        assert!(!ProviderASchema.matches(&object(json!({"provider_name": "ProviderZ"}))));
        assert!(!ProviderASchema.matches(&object(json!({"provider_name": 1}))));
        assert!(!ProviderASchema.matches(&object(json!({"id": "A-1"}))));
    }

    #[test]
    fn test_provider_a_extract() {
        let draft = ProviderASchema.extract(&object(json!({
            "provider_name": "ProviderA",
            "id": "A-123",
            "cost": "123.45",
            "currency": "USD",
            "depart": "2025-11-01T09:00:00Z",
            "class": "economy"
        })));

        assert_eq!(draft.provider_id, "ProviderA");
        assert_eq!(draft.provider_ref, "A-123");
        assert_eq!(draft.price, 123.45);
        assert_eq!(draft.currency, "USD");
        assert_eq!(draft.fare_class, "economy");
        assert_eq!(draft.depart_at, Utc.with_ymd_and_hms(2025, 11, 1, 9, 0, 0).single());
    }

    #[test]
    fn test_provider_a_numeric_cost_and_epoch_depart() {
        let draft = ProviderASchema.extract(&object(json!({
            "provider_name": "ProviderA",
            "cost": 99.5,
            "depart": 1698772345
        })));

        assert_eq!(draft.price, 99.5);
        assert_eq!(draft.provider_ref, "");
        assert_eq!(draft.depart_at, Utc.with_ymd_and_hms(2023, 10, 31, 17, 12, 25).single());
    }

    #[test]
    fn test_provider_a_tolerates_garbage() {
        let draft = ProviderASchema.extract(&object(json!({
            "provider_name": "ProviderA",
            "id": 77,
            "cost": {"value": 1},
            "depart": 12345,
            "class": false
        })));

        assert_eq!(draft.provider_ref, "");
        assert_eq!(draft.price, 0.0);
        assert_eq!(draft.depart_at, None);
        assert_eq!(draft.fare_class, "");
    }

    #[test]
    fn test_provider_b_matches_on_vendor_presence() {
        assert!(ProviderBSchema.matches(&object(json!({"vendor": "anything"}))));
        assert!(ProviderBSchema.matches(&object(json!({"vendor": null}))));
        assert!(!ProviderBSchema.matches(&object(json!({"sku": 1}))));
    }

    #[test]
    fn test_provider_b_cents_are_converted() {
        let draft = ProviderBSchema.extract(&object(json!({
            "vendor": "ProviderB",
            "sku": 999,
            "pricing": {"amount": 12345, "currency_code": "GBP", "units": "cents"},
            "times": {"leave": 1698772345}
        })));

        assert_eq!(draft.provider_ref, "999");
        assert_eq!(draft.price, 123.45);
        assert_eq!(draft.currency, "GBP");
        assert_eq!(draft.depart_at, Utc.with_ymd_and_hms(2023, 10, 31, 17, 12, 25).single());
    }

    #[test]
    fn test_provider_b_major_units_are_kept() {
        let draft = ProviderBSchema.extract(&object(json!({
            "vendor": "ProviderB",
            "pricing": {"amount": 12345}
        })));
        assert_eq!(draft.price, 12345.0);

        let draft = ProviderBSchema.extract(&object(json!({
            "vendor": "ProviderB",
            "pricing": {"amount": "12345", "units": "dollars"}
        })));
        assert_eq!(draft.price, 12345.0);
    }

    #[test]
    fn test_provider_b_defaults() {
        let draft = ProviderBSchema.extract(&object(json!({"vendor": "ProviderB"})));

        assert_eq!(draft.provider_ref, "");
        assert_eq!(draft.price, 0.0);
        assert_eq!(draft.currency, "USD");
        assert_eq!(draft.depart_at, None);
    }

    #[test]
    fn test_provider_b_leave_below_floor_is_unknown() {
        let draft = ProviderBSchema.extract(&object(json!({
            "vendor": "ProviderB",
            "times": {"leave": 86400}
        })));
        assert_eq!(draft.depart_at, None);

        let draft = ProviderBSchema.extract(&object(json!({
            "vendor": "ProviderB",
            "times": {"leave": "2025-11-01T09:00:00Z"}
        })));
        assert_eq!(draft.depart_at, None);
    }

    #[test]
    fn test_provider_b_string_sku() {
        let draft = ProviderBSchema.extract(&object(json!({"vendor": "B", "sku": "SKU-9"})));
        assert_eq!(draft.provider_ref, "SKU-9");
    }

    #[test]
    fn test_generic_reads_price_and_currency_only() {
        let draft = GenericSchema.extract(&object(json!({
            "price": "42.10",
            "currency": "EUR",
            "id": "ignored",
            "depart": "2025-11-01T09:00:00Z"
        })));

        assert_eq!(draft.provider_id, "generic");
        assert_eq!(draft.price, 42.10);
        assert_eq!(draft.currency, "EUR");
        assert_eq!(draft.provider_ref, "");
        assert_eq!(draft.depart_at, None);
    }
}
