//! Wizard-internal charge lines, the aggregator's input.
//!
//! Stored blobs are permissive: amounts and unit counts may arrive as
//! numbers, numeric strings, blanks, or be missing entirely. Anything
//! that does not parse is treated as zero so live recalculation in the
//! wizard never fails on half-entered rows.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeSection {
    #[default]
    Origin,
    Destination,
    Transit(u32),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChargeKind {
    Freight,
    #[default]
    Handling,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChargeLine {
    /// Charge name for handling lines, carrier UOM for freight lines.
    #[serde(alias = "chargeName", alias = "carrierUom")]
    pub name: String,
    pub unit_type: String,
    #[serde(alias = "numberOfUnit", deserialize_with = "lenient_decimal")]
    pub number_of_units: Decimal,
    #[serde(deserialize_with = "lenient_decimal")]
    pub amount: Decimal,
    pub currency: String,
    pub section: ChargeSection,
    pub kind: ChargeKind,
    // Freight-line extras; blank on handling lines.
    pub carrier: String,
    pub surcharge: String,
    #[serde(alias = "tt")]
    pub transit_time: String,
    #[serde(alias = "freq")]
    pub frequency: String,
    pub comments: String,
}

impl ChargeLine {
    /// Per-line total, recomputed from the current fields on every call
    /// rather than stored, so it can never go stale.
    pub fn line_total(&self) -> Decimal {
        self.number_of_units * self.amount
    }

    /// Uppercased currency code, defaulting to `USD` when unset.
    pub fn currency_code(&self) -> String {
        let trimmed = self.currency.trim();
        if trimmed.is_empty() {
            "USD".to_string()
        } else {
            trimmed.to_ascii_uppercase()
        }
    }
}

/// Accepts numbers, numeric strings, blanks, and nulls; everything
/// unparseable is zero.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(decimal_from_value(&raw))
}

pub(crate) fn decimal_from_value(value: &serde_json::Value) -> Decimal {
    match value {
        serde_json::Value::Number(number) => {
            number.to_string().parse::<Decimal>().unwrap_or(Decimal::ZERO)
        }
        serde_json::Value::String(text) => text.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{ChargeKind, ChargeLine, ChargeSection};

    #[test]
    fn line_total_is_units_times_amount() {
        let mut line = ChargeLine {
            name: "Handling Charge".to_string(),
            number_of_units: Decimal::new(3, 0),
            amount: Decimal::new(2_500, 2),
            ..ChargeLine::default()
        };
        assert_eq!(line.line_total(), Decimal::new(7_500, 2));

        line.amount = Decimal::new(1_000, 2);
        assert_eq!(line.line_total(), Decimal::new(3_000, 2));
    }

    #[test]
    fn missing_currency_defaults_to_usd() {
        let line = ChargeLine::default();
        assert_eq!(line.currency_code(), "USD");
    }

    #[test]
    fn decodes_numeric_strings_and_blanks() {
        let line: ChargeLine = serde_json::from_value(serde_json::json!({
            "chargeName": "DO CHARGES",
            "unitType": "Per BL",
            "numberOfUnit": "1",
            "amount": "18000.00",
            "currency": "lkr",
            "kind": "handling",
        }))
        .expect("permissive decode");

        assert_eq!(line.name, "DO CHARGES");
        assert_eq!(line.amount, Decimal::new(1_800_000, 2));
        assert_eq!(line.currency_code(), "LKR");
        assert_eq!(line.kind, ChargeKind::Handling);
    }

    #[test]
    fn non_numeric_amounts_decode_as_zero() {
        let line: ChargeLine = serde_json::from_value(serde_json::json!({
            "name": "Handling",
            "numberOfUnit": "n/a",
            "amount": null,
        }))
        .expect("permissive decode");

        assert_eq!(line.number_of_units, Decimal::ZERO);
        assert_eq!(line.amount, Decimal::ZERO);
        assert_eq!(line.line_total(), Decimal::ZERO);
    }

    #[test]
    fn transit_sections_round_trip() {
        let section: ChargeSection =
            serde_json::from_value(serde_json::json!({"transit": 2})).expect("decode");
        assert_eq!(section, ChargeSection::Transit(2));
    }
}
