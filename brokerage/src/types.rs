use std::fmt;

use serde::{Deserialize, Deserializer};

/// One option order as listed by the brokerage. Only the fields the report reads are kept.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderRecord {
    /// Underlying symbol, e.g. "AAPL".
    #[serde(default)]
    pub chain_symbol: Option<String>,
    /// ISO-8601 creation time, e.g. "2024-01-01T10:00:00.123456Z".
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub legs: Vec<Leg>,
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub quantity: Option<f64>,
    /// Per-share price.
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub price: Option<f64>,
    /// Total cash value of the order.
    #[serde(default, deserialize_with = "deserialize_decimal")]
    pub premium: Option<f64>,
    /// "filled", "cancelled", "queued", ...
    #[serde(default)]
    pub state: Option<String>,
}

impl OrderRecord {
    pub fn first_leg(&self) -> Option<&Leg> {
        self.legs.first()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Leg {
    pub side: Option<String>,
    pub option_type: Option<String>,
    pub strike_price: Option<String>,
    pub expiration_date: Option<String>,
}

/// One page of a paginated listing.
#[derive(Debug, Deserialize)]
pub struct OrdersPage {
    #[serde(default)]
    pub results: Vec<OrderRecord>,
    pub next: Option<String>,
}

#[derive(Clone)]
pub struct Session {
    pub access_token: String,
    pub token_type: String,
}

impl Session {
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token_type", &self.token_type)
            .finish_non_exhaustive()
    }
}

/// Decimals arrive as strings ("1.50000000"); plain numbers and null are accepted too.
fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Number(f64),
        Text(String),
    }

    match Option::<Decimal>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Decimal::Number(value)) => Ok(Some(value)),
        Some(Decimal::Text(text)) => serde_plain::from_str::<f64>(&text)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}
