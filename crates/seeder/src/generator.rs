//! Fake menu-item generator.
//!
//! Each call to [`ItemGenerator::generate`] builds a fresh [`MenuItemDraft`]
//! from random vocabulary, then validates it against [`CreateItem`], the
//! same schema the HTTP API applies to client requests.

use std::ops::RangeInclusive;

use chrono::Utc;
use rand::seq::IndexedRandom;
use rand::Rng;
use rust_decimal::Decimal;
use uuid::Uuid;
use validator::Validate;

use micropos_core::pricing::{price_from_f64, truncate_title};
use micropos_core::types::{RecordId, Timestamp};
use micropos_db::models::item::{CreateItem, CREATE_ITEM_FIELDS};

use crate::error::SeedError;

pub const ADJECTIVES: &[&str] = &[
    "Spicy",
    "Fresh",
    "Grilled",
    "Homemade",
    "Traditional",
    "Seasonal",
    "Organic",
    "Local",
    "House Special",
    "Chef's",
];

pub const FOOD_TYPES: &[&str] = &[
    "Curry",
    "Stir-fry",
    "Salad",
    "Soup",
    "Rice Bowl",
    "Noodles",
    "Sandwich",
    "Pizza",
    "Pasta",
    "Seafood",
];

/// Filler vocabulary for `title_full` and descriptions.
pub const WORDS: &[&str] = &[
    "garlic", "ginger", "basil", "lemongrass", "sesame", "chili", "tamarind", "coconut",
    "herbs", "peppers", "onions", "mushrooms", "tofu", "chicken", "shrimp", "beef",
    "greens", "lime", "cilantro", "scallions", "roasted", "smoked", "crispy", "tender",
    "savory", "tangy", "served", "daily", "with", "sauce",
];

/// Default sampling range for prices, in currency units.
pub const PRICE_RANGE: RangeInclusive<f64> = 5.0..=35.0;

/// Probability that a generated item is marked available.
const AVAILABILITY_RATE: f64 = 0.8;

const MAX_CATEGORIES: usize = 3;
const DESCRIPTION_WORDS: usize = 10;
const IMAGE_BASE_URL: &str = "https://example.com/images";

/// Configuration problems detected while generating.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("vocabulary list '{0}' is empty")]
    EmptyVocabulary(&'static str),

    #[error("price range {start}..={end} is empty")]
    EmptyPriceRange { start: f64, end: f64 },

    #[error("price range {start}..={end} is not finite")]
    UnboundedPriceRange { start: f64, end: f64 },
}

/// Candidate menu item, not yet persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemDraft {
    pub title: String,
    pub title_full: Option<String>,
    pub description: Option<String>,
    pub price: Decimal,
    pub is_available: bool,
    pub image_uri: Option<String>,
    pub created_at: Timestamp,
    pub categories: Vec<RecordId>,
}

impl MenuItemDraft {
    /// The creation request submitted to the backend.
    pub fn to_create(&self) -> CreateItem {
        CreateItem {
            title: self.title.clone(),
            title_full: self.title_full.clone(),
            description: self.description.clone(),
            categories: Some(self.categories.clone()),
            price: self.price,
            image_uri: self.image_uri.clone(),
            created_at: Some(self.created_at),
            is_available: self.is_available,
        }
    }

    /// Render the value of `field` for error reports.
    fn field_value(&self, field: &str) -> String {
        match field {
            "title" => self.title.clone(),
            "title_full" => self.title_full.clone().unwrap_or_default(),
            "description" => self.description.clone().unwrap_or_default(),
            "categories" => format!("{:?}", self.categories),
            "price" => self.price.to_string(),
            "image_uri" => self.image_uri.clone().unwrap_or_default(),
            "created_at" => self.created_at.to_rfc3339(),
            "is_available" => self.is_available.to_string(),
            _ => String::new(),
        }
    }

    /// Validate against the creation schema, naming the first failing field.
    pub fn validate(&self) -> Result<(), SeedError> {
        let Err(errors) = self.to_create().validate() else {
            return Ok(());
        };

        let field = {
            let field_errors = errors.field_errors();
            CREATE_ITEM_FIELDS
                .iter()
                .copied()
                .find(|field| field_errors.contains_key(*field))
                .unwrap_or("item")
        };
        let value = self.field_value(field);

        Err(SeedError::validation(field, value, errors))
    }
}

/// Produces random but schema-valid menu items.
#[derive(Debug, Clone)]
pub struct ItemGenerator {
    adjectives: Vec<String>,
    food_types: Vec<String>,
    words: Vec<String>,
    price_range: RangeInclusive<f64>,
}

impl Default for ItemGenerator {
    fn default() -> Self {
        Self::with_vocabulary(ADJECTIVES, FOOD_TYPES, WORDS)
    }
}

impl ItemGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vocabulary<S: AsRef<str>>(
        adjectives: &[S],
        food_types: &[S],
        words: &[S],
    ) -> Self {
        let owned = |list: &[S]| -> Vec<String> {
            list.iter().map(|s| s.as_ref().to_string()).collect()
        };
        Self {
            adjectives: owned(adjectives),
            food_types: owned(food_types),
            words: owned(words),
            price_range: PRICE_RANGE,
        }
    }

    pub fn with_price_range(mut self, range: RangeInclusive<f64>) -> Self {
        self.price_range = range;
        self
    }

    /// Build one validated draft with a randomly sampled price.
    pub fn generate(&self) -> Result<MenuItemDraft, SeedError> {
        let (start, end) = (*self.price_range.start(), *self.price_range.end());
        if self.price_range.is_empty() {
            return Err(SeedError::generation(GeneratorError::EmptyPriceRange { start, end }));
        }
        // The sampler needs finite bounds and a finite width.
        if !(end - start).is_finite() {
            return Err(SeedError::generation(GeneratorError::UnboundedPriceRange {
                start,
                end,
            }));
        }
        let mut rng = rand::rng();
        let raw_price = rng.random_range(self.price_range.clone());
        self.assemble(&mut rng, raw_price)
    }

    /// Build one validated draft using `raw_price` instead of sampling.
    pub fn generate_with_price(&self, raw_price: f64) -> Result<MenuItemDraft, SeedError> {
        self.assemble(&mut rand::rng(), raw_price)
    }

    fn assemble<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        raw_price: f64,
    ) -> Result<MenuItemDraft, SeedError> {
        let adjective = pick(rng, &self.adjectives, "adjectives")?;
        let food = pick(rng, &self.food_types, "food types")?;
        let first = pick(rng, &self.words, "words")?;
        let second = pick(rng, &self.words, "words")?;

        let title = truncate_title(&format!("{adjective} {food}"));
        let title_full = format!("{adjective} {food} with {first} {second}");
        let description = sentence(rng, &self.words)?;

        let price = price_from_f64(raw_price)
            .map_err(|e| SeedError::validation("price", raw_price.to_string(), e))?;

        let category_count = rng.random_range(1..=MAX_CATEGORIES);
        let categories = (0..category_count).map(|_| Uuid::new_v4()).collect();

        let draft = MenuItemDraft {
            title,
            title_full: Some(title_full),
            description: Some(description),
            price,
            is_available: rng.random_bool(AVAILABILITY_RATE),
            image_uri: Some(format!("{IMAGE_BASE_URL}/{}.jpg", Uuid::new_v4())),
            created_at: Utc::now(),
            categories,
        };
        draft.validate()?;
        Ok(draft)
    }
}

fn pick<'a, R: Rng + ?Sized>(
    rng: &mut R,
    list: &'a [String],
    name: &'static str,
) -> Result<&'a str, SeedError> {
    list.choose(rng)
        .map(String::as_str)
        .ok_or_else(|| SeedError::generation(GeneratorError::EmptyVocabulary(name)))
}

/// A capitalized sentence of [`DESCRIPTION_WORDS`] words ending in a period.
fn sentence<R: Rng + ?Sized>(rng: &mut R, words: &[String]) -> Result<String, SeedError> {
    let mut picked = Vec::with_capacity(DESCRIPTION_WORDS);
    for _ in 0..DESCRIPTION_WORDS {
        picked.push(pick(rng, words, "words")?);
    }
    let text = picked.join(" ");
    let mut chars = text.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => text,
    };
    Ok(format!("{capitalized}."))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use micropos_core::pricing::TITLE_MAX_CHARS;

    use super::*;

    #[test]
    fn generated_drafts_respect_field_rules() {
        let generator = ItemGenerator::new();
        for _ in 0..200 {
            let draft = generator.generate().unwrap();
            assert!(!draft.title.is_empty());
            assert!(draft.title.chars().count() <= TITLE_MAX_CHARS);
            assert!(!draft.price.is_sign_negative());
            assert_eq!(draft.price.scale(), 2);
            assert!(draft.price >= Decimal::new(500, 2) && draft.price <= Decimal::new(3500, 2));
            assert!((1..=3).contains(&draft.categories.len()));
            assert!(draft.description.as_deref().is_some_and(|d| d.ends_with('.')));
        }
    }

    #[test]
    fn long_combinations_are_truncated_not_rejected() {
        let generator = ItemGenerator::with_vocabulary(
            &["House Special"],
            &["Grilled Seafood Platter"],
            &["lime"],
        );
        let draft = generator.generate().unwrap();
        assert_eq!(draft.title, "House Special Grilled ");
        assert_eq!(draft.title.chars().count(), TITLE_MAX_CHARS);
        assert_eq!(
            draft.title_full.as_deref(),
            Some("House Special Grilled Seafood Platter with lime lime")
        );
    }

    #[test]
    fn malformed_price_is_a_price_validation_failure() {
        let err = ItemGenerator::new()
            .generate_with_price(f64::NAN)
            .unwrap_err();
        assert_matches!(err, SeedError::Validation { ref field, ref value, .. }
            if field == "price" && value == "NaN");
    }

    #[test]
    fn negative_price_fails_schema_validation_on_price() {
        let err = ItemGenerator::new().generate_with_price(-3.0).unwrap_err();
        assert_matches!(err, SeedError::Validation { ref field, ref value, .. }
            if field == "price" && value == "-3.00");
    }

    #[test]
    fn explicit_price_is_quantized() {
        let generator = ItemGenerator::new();
        assert_eq!(generator.generate_with_price(7.0).unwrap().price.to_string(), "7.00");
        assert_eq!(generator.generate_with_price(12.5).unwrap().price.to_string(), "12.50");
    }

    #[test]
    fn empty_vocabulary_is_a_generation_failure() {
        let generator = ItemGenerator::with_vocabulary::<&str>(&[], FOOD_TYPES, WORDS);
        assert_matches!(generator.generate(), Err(SeedError::Generation { .. }));
    }

    #[test]
    fn empty_price_range_is_a_generation_failure() {
        let generator = ItemGenerator::new().with_price_range(10.0..=5.0);
        let err = generator.generate().unwrap_err();
        assert_matches!(err, SeedError::Generation { .. });
        assert!(err.to_string().contains("price range 10..=5 is empty"));
    }

    #[test]
    fn unbounded_price_range_is_a_generation_failure() {
        for range in [5.0..=f64::INFINITY, f64::NEG_INFINITY..=5.0, f64::MIN..=f64::MAX] {
            let err = ItemGenerator::new()
                .with_price_range(range)
                .generate()
                .unwrap_err();
            assert_matches!(err, SeedError::Generation { .. });
            assert!(err.to_string().contains("is not finite"));
        }
    }

    #[test]
    fn first_failing_field_follows_schema_order() {
        let mut draft = ItemGenerator::new().generate().unwrap();
        draft.title.clear();
        draft.price = Decimal::new(-1, 0);
        let err = draft.validate().unwrap_err();
        assert_matches!(err, SeedError::Validation { ref field, .. } if field == "title");
    }
}
