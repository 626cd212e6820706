//! Category entity model and DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

use micropos_core::types::{RecordId, Timestamp};

use super::empty_as_none;

/// A row from the `category` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub image_uri: Option<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
    #[serde(default)]
    pub is_available: Option<bool>,
}

/// DTO for creating a category.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 1, max = 22))]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    /// Stamped by the server; any client value is overwritten.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub is_available: bool,
}

/// DTO for updating a category. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(min = 1, max = 22))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    /// Stamped by the server; any client value is overwritten.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use validator::Validate;

    use super::*;

    #[test]
    fn empty_title_reads_as_none() {
        let category: Category =
            serde_json::from_value(json!({ "id": null, "title": "", "is_available": true }))
                .unwrap();
        assert_eq!(category.title, None);
        assert_eq!(category.is_available, Some(true));
    }

    #[test]
    fn create_defaults_to_unavailable() {
        let input: CreateCategory = serde_json::from_value(json!({ "title": "Sides" })).unwrap();
        assert!(!input.is_available);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn create_rejects_long_title() {
        let input: CreateCategory =
            serde_json::from_value(json!({ "title": "A title well beyond the limit" })).unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
    }

    #[test]
    fn update_serializes_only_set_fields() {
        let update = UpdateCategory {
            title: Some("Desserts".into()),
            ..Default::default()
        };
        assert_eq!(serde_json::to_value(&update).unwrap(), json!({ "title": "Desserts" }));
    }
}
