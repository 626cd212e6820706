//! Seeding error taxonomy.
//!
//! Every error carries its own [`CorrelationId`] and renders it as an
//! `Error ID: {id}; ` prefix so log lines and CLI output line up.

use micropos_core::environment::Environment;
use micropos_core::types::CorrelationId;
use micropos_db::DbError;
use serde::Serialize;

use crate::driver::SeedingOutcome;

/// Boxed cause for failures that do not come from the backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a single record.
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    /// A generated field broke a domain rule.
    #[error("Error ID: {correlation_id}; Validation failed for field '{field}' with value '{value}': {cause}")]
    Validation {
        correlation_id: CorrelationId,
        field: String,
        value: String,
        #[source]
        cause: BoxError,
    },

    #[error("Error ID: {correlation_id}; Failed to generate item: {cause}")]
    Generation {
        correlation_id: CorrelationId,
        #[source]
        cause: BoxError,
    },

    /// The backend rejected or failed the insert for one record.
    #[error("Error ID: {correlation_id}; Failed to insert item {iteration}: {cause}")]
    Insertion {
        correlation_id: CorrelationId,
        iteration: usize,
        title: Option<String>,
        #[source]
        cause: DbError,
    },
}

impl SeedError {
    pub fn validation(
        field: impl Into<String>,
        value: impl Into<String>,
        cause: impl Into<BoxError>,
    ) -> Self {
        Self::Validation {
            correlation_id: CorrelationId::new(),
            field: field.into(),
            value: value.into(),
            cause: cause.into(),
        }
    }

    pub fn generation(cause: impl Into<BoxError>) -> Self {
        Self::Generation {
            correlation_id: CorrelationId::new(),
            cause: cause.into(),
        }
    }

    pub fn insertion(iteration: usize, title: Option<String>, cause: DbError) -> Self {
        Self::Insertion {
            correlation_id: CorrelationId::new(),
            iteration,
            title,
            cause,
        }
    }

    pub fn correlation_id(&self) -> CorrelationId {
        match self {
            Self::Validation { correlation_id, .. }
            | Self::Generation { correlation_id, .. }
            | Self::Insertion { correlation_id, .. } => *correlation_id,
        }
    }

    /// Short category name used in logs and failure records.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation",
            Self::Generation { .. } => "generation",
            Self::Insertion { .. } => "insertion",
        }
    }

    /// Structured snapshot of this error for the batch report.
    pub fn to_record(&self, iteration: usize) -> FailureRecord {
        let mut record = FailureRecord {
            error_id: self.correlation_id(),
            kind: self.kind(),
            iteration,
            message: self.to_string(),
            title: None,
            field: None,
            value: None,
            cause_type: None,
            cause: String::new(),
        };
        match self {
            Self::Validation {
                field,
                value,
                cause,
                ..
            } => {
                record.field = Some(field.clone());
                record.value = Some(value.clone());
                record.cause = cause.to_string();
            }
            Self::Generation { cause, .. } => record.cause = cause.to_string(),
            Self::Insertion { title, cause, .. } => {
                record.title = title.clone();
                record.cause_type = Some(cause.kind());
                record.cause = cause.to_string();
            }
        }
        record
    }
}

/// One entry in a batch's failure list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailureRecord {
    pub error_id: CorrelationId,
    pub kind: &'static str,
    /// 1-based position of the attempt within the batch.
    pub iteration: usize,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Backend error category for insertion failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause_type: Option<&'static str>,
    pub cause: String,
}

/// Terminal error of a batch in which at least one record failed.
///
/// Carries the full outcome so successes are still reported.
#[derive(Debug, thiserror::Error)]
#[error(
    "Error ID: {correlation_id}; Seeding completed with errors in {environment}. Seeded {} of {} items.",
    .outcome.seeded,
    .outcome.count
)]
pub struct BatchSeedingFailure {
    pub correlation_id: CorrelationId,
    pub environment: Environment,
    pub outcome: SeedingOutcome,
}

impl BatchSeedingFailure {
    pub fn new(environment: Environment, outcome: SeedingOutcome) -> Self {
        Self {
            correlation_id: CorrelationId::new(),
            environment,
            outcome,
        }
    }

    /// Individual failures in attempt order.
    pub fn errors(&self) -> &[FailureRecord] {
        &self.outcome.failures
    }

    /// JSON payload for logs and the CLI summary.
    pub fn details(&self) -> serde_json::Value {
        serde_json::json!({
            "error_id": self.correlation_id,
            "environment": self.environment,
            "requested": self.outcome.requested,
            "count": self.outcome.count,
            "attempted": self.outcome.attempted,
            "seeded": self.outcome.seeded,
            "cancelled": self.outcome.cancelled,
            "errors": self.errors(),
        })
    }
}
