//! Alpha Vantage API response types.
//!
//! The GLOBAL_QUOTE payload carries numbered, space-embedded field names
//! and all numerics as strings.

use serde::Deserialize;

/// Top-level GLOBAL_QUOTE response.
///
/// On errors (bad key, rate limiting) Alpha Vantage still answers 200
/// with the quote object absent, so everything is optional.
#[derive(Debug, Deserialize)]
pub struct GlobalQuoteResponse {
    /// The quote object, absent or empty on upstream errors.
    #[serde(rename = "Global Quote")]
    pub global_quote: Option<GlobalQuote>,
}

/// The quote fields this dashboard consumes.
#[derive(Debug, Deserialize)]
pub struct GlobalQuote {
    /// Current price, as a decimal string.
    #[serde(rename = "05. price")]
    pub price: Option<String>,
    /// Absolute change, as a decimal string.
    #[serde(rename = "09. change")]
    pub change: Option<String>,
}

impl GlobalQuote {
    /// Whether the payload carries a usable price.
    #[must_use]
    pub fn has_price(&self) -> bool {
        self.price.as_deref().is_some_and(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_quote_payload() {
        let json = r#"{
            "Global Quote": {
                "01. symbol": "AAPL",
                "05. price": "187.3100",
                "09. change": "-0.4200",
                "10. change percent": "-0.2238%"
            }
        }"#;

        let response: GlobalQuoteResponse = serde_json::from_str(json).unwrap();
        let quote = response.global_quote.unwrap();
        assert_eq!(quote.price.as_deref(), Some("187.3100"));
        assert_eq!(quote.change.as_deref(), Some("-0.4200"));
        assert!(quote.has_price());
    }

    #[test]
    fn tolerates_empty_quote_object() {
        let response: GlobalQuoteResponse =
            serde_json::from_str(r#"{"Global Quote": {}}"#).unwrap();
        let quote = response.global_quote.unwrap();
        assert!(!quote.has_price());
    }

    #[test]
    fn tolerates_missing_quote_object() {
        let response: GlobalQuoteResponse =
            serde_json::from_str(r#"{"Note": "rate limited"}"#).unwrap();
        assert!(response.global_quote.is_none());
    }
}
