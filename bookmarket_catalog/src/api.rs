use std::fmt;

use paperclip::actix::Apiv2Schema;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

pub type BookId = i32;

/// Currency amount of a book listing.
/// Serializes as a plain number; deserializes from either a number
/// or a currency-formatted string such as "$12.99".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Price(f64);

impl paperclip::v2::schema::TypedData for Price {
    fn data_type() -> paperclip::v2::models::DataType {
        paperclip::v2::models::DataType::Number
    }
}

impl Price {
    pub fn new(amount: f64) -> Self {
        Price(amount)
    }

    pub fn amount(&self) -> f64 {
        self.0
    }

    /// Strips everything that is not a digit, '.' or '-' and parses the rest.
    /// Unparsable input normalizes to 0, matching the storefront behaviour.
    pub fn parse_text(text: &str) -> Self {
        let cleaned: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        Price(cleaned.parse().unwrap_or(0.0))
    }
}

impl From<f64> for Price {
    fn from(amount: f64) -> Self {
        Price(amount)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PriceVisitor;

        impl<'de> Visitor<'de> for PriceVisitor {
            type Value = Price;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a number or a currency-formatted string")
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Price, E> {
                Ok(Price(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Price, E> {
                Ok(Price(value as f64))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Price, E> {
                Ok(Price(value as f64))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Price, E> {
                Ok(Price::parse_text(value))
            }
        }

        deserializer.deserialize_any(PriceVisitor)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct BookDetails {
    pub title: String,
    pub author: String,
    pub category: String,
    pub price: Price,
    pub description: String,
    /// Set for user-posted listings; catalog items use bundled artwork
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// True for listings posted by users, false for catalog items
    #[serde(default)]
    pub posted: bool,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct BookDetailsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct BookTitleAndId {
    pub book_id: BookId,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Apiv2Schema)]
pub struct GetAllBooksResponse {
    pub books: Vec<BookTitleAndId>,
}

#[cfg(test)]
mod price_tests {
    use super::*;

    #[test]
    /// Prices arrive either as plain numbers or as display strings
    /// with an embedded currency symbol; both must normalize to the
    /// same amount before any arithmetic happens.
    fn test_price_deserializes_from_number_and_string() {
        let from_number: Price = serde_json::from_str("12.99").unwrap();
        let from_string: Price = serde_json::from_str("\"$12.99\"").unwrap();
        assert_eq!(from_number, from_string);
        assert_eq!(from_number.amount(), 12.99);

        let from_integer: Price = serde_json::from_str("10").unwrap();
        assert_eq!(from_integer.amount(), 10.0);
    }

    #[test]
    fn test_unparsable_price_normalizes_to_zero() {
        let garbage: Price = serde_json::from_str("\"free!\"").unwrap();
        assert_eq!(garbage.amount(), 0.0);

        let empty: Price = serde_json::from_str("\"\"").unwrap();
        assert_eq!(empty.amount(), 0.0);
    }

    #[test]
    fn test_price_round_trips_as_number() {
        let price = Price::new(5.5);
        let serialized = serde_json::to_string(&price).unwrap();
        assert_eq!(serialized, "5.5");
        let back: Price = serde_json::from_str(&serialized).unwrap();
        assert_eq!(back, price);
    }
}
