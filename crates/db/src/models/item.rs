//! Menu item entity model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use micropos_core::pricing::{normalize_price, validate_price};
use micropos_core::types::{RecordId, Timestamp};

use super::{empty_as_none, normalized_price};

/// Field names of [`CreateItem`] in declaration order.
///
/// Used to report the first failing field deterministically.
pub const CREATE_ITEM_FIELDS: [&str; 8] = [
    "title",
    "title_full",
    "description",
    "categories",
    "price",
    "image_uri",
    "created_at",
    "is_available",
];

/// A row from the `item` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub title_full: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Option<Vec<RecordId>>,
    #[serde(deserialize_with = "normalized_price")]
    pub price: Decimal,
    #[serde(default)]
    pub image_uri: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    pub is_available: bool,
}

/// The identifying part of a stored item: enough to log an insert.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StoredItem {
    pub id: RecordId,
    #[serde(default)]
    pub title: Option<String>,
}

/// DTO for creating a menu item.
///
/// This is the creation-request schema: the HTTP API validates incoming
/// bodies against it and the seeder validates generated drafts against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CreateItem {
    #[validate(length(min = 1, max = 22))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_full: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<RecordId>>,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub is_available: bool,
}

impl CreateItem {
    /// Quantize the price to exactly two fractional digits.
    pub fn normalized(mut self) -> Self {
        self.price = normalize_price(self.price);
        self
    }
}

/// DTO for updating a menu item. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdateItem {
    #[validate(length(min = 1, max = 22))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_full: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<RecordId>>,
    #[validate(custom(function = "validate_price"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    /// Stamped by the server; any client value is overwritten.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

impl UpdateItem {
    /// Quantize the price, when present, to exactly two fractional digits.
    pub fn normalized(mut self) -> Self {
        self.price = self.price.map(normalize_price);
        self
    }
}
