//! Current price of an instrument, with an explicit "not available" sentinel.
//!
//! Upstream quote providers report either a number or a marker such as `"N/A"`.
//! `Price` folds every non-numeric (and every non-finite) value into
//! `Price::NotAvailable` so the renderer never has to inspect raw payloads.
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Text used for the sentinel both on screen and on the wire.
pub const NOT_AVAILABLE: &str = "N/A";

/// Latest known price of an instrument.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "RawPrice", into = "RawPrice")]
pub enum Price {
    /// A finite numeric price.
    Available(f64),
    /// No usable price was obtained.
    #[default]
    NotAvailable,
}

/// How the terminal adapter should tint a price line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTone {
    /// Numeric and non-negative.
    Up,
    /// Numeric and negative.
    Down,
    /// The sentinel.
    Unavailable,
}

impl Price {
    /// Wraps a number, mapping NaN and infinities to the sentinel.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Price::Available(value)
        } else {
            Price::NotAvailable
        }
    }

    /// Numeric value, if any.
    pub fn value(&self) -> Option<f64> {
        match self {
            Price::Available(v) => Some(*v),
            Price::NotAvailable => None,
        }
    }

    /// Tint derived from the sign and availability of the price.
    pub fn tone(&self) -> PriceTone {
        match self.value() {
            Some(v) if v >= 0.0 => PriceTone::Up,
            Some(_) => PriceTone::Down,
            None => PriceTone::Unavailable,
        }
    }
}

impl From<f64> for Price {
    fn from(value: f64) -> Self {
        Price::from_f64(value)
    }
}

impl From<Option<f64>> for Price {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Price::NotAvailable, Price::from_f64)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Available(v) => write!(f, "{:.2}", v),
            Price::NotAvailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

/// Wire shape of a price: a JSON number, or anything else meaning "not available".
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Number(f64),
    Other(Value),
}

impl From<RawPrice> for Price {
    fn from(raw: RawPrice) -> Self {
        match raw {
            RawPrice::Number(v) => Price::from_f64(v),
            RawPrice::Other(_) => Price::NotAvailable,
        }
    }
}

impl From<Price> for RawPrice {
    fn from(price: Price) -> Self {
        match price {
            Price::Available(v) => RawPrice::Number(v),
            Price::NotAvailable => RawPrice::Other(Value::String(NOT_AVAILABLE.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_values_become_sentinel() {
        assert_eq!(Price::from_f64(f64::NAN), Price::NotAvailable);
        assert_eq!(Price::from(f64::INFINITY), Price::NotAvailable);
        assert_eq!(Price::from(None), Price::NotAvailable);
        assert_eq!(Price::from(Some(12.5)), Price::Available(12.5));
        assert_eq!(Price::from(Some(12.5)).value(), Some(12.5));
        assert_eq!(Price::from_f64(f64::NEG_INFINITY).value(), None);
    }

    #[test]
    fn displays_two_decimals_or_sentinel() {
        assert_eq!(Price::Available(34000.0).to_string(), "34000.00");
        assert_eq!(Price::Available(1.005_1).to_string(), "1.01");
        assert_eq!(Price::NotAvailable.to_string(), "N/A");
    }

    #[test]
    fn tone_follows_sign_and_availability() {
        assert_eq!(Price::Available(0.0).tone(), PriceTone::Up);
        assert_eq!(Price::Available(-3.2).tone(), PriceTone::Down);
        assert_eq!(Price::NotAvailable.tone(), PriceTone::Unavailable);
    }

    #[test]
    fn any_non_number_deserializes_to_sentinel() {
        let parsed: Vec<Price> = serde_json::from_str(r#"[101.5, "N/A", null, "oops", 7]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                Price::Available(101.5),
                Price::NotAvailable,
                Price::NotAvailable,
                Price::NotAvailable,
                Price::Available(7.0),
            ]
        );
    }

    #[test]
    fn sentinel_serializes_as_marker() {
        assert_eq!(serde_json::to_string(&Price::NotAvailable).unwrap(), r#""N/A""#);
        assert_eq!(serde_json::to_string(&Price::Available(2.5)).unwrap(), "2.5");
    }
}
