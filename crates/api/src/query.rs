//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Optional `?available=true|false` filter for list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityParams {
    pub available: Option<bool>,
}
