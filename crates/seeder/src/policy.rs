//! Environment safeguards applied around a seeding batch.

use micropos_core::environment::Environment;
use micropos_core::pricing::truncate_title;

use crate::generator::MenuItemDraft;

/// Most records a single batch may insert in production.
pub const PRODUCTION_SEED_LIMIT: usize = 1;

/// Number of records a batch will actually attempt.
///
/// Production is capped at [`PRODUCTION_SEED_LIMIT`]; every other
/// environment passes `requested` through unchanged.
pub fn cap_count(environment: Environment, requested: usize) -> usize {
    if environment.is_production() {
        requested.min(PRODUCTION_SEED_LIMIT)
    } else {
        requested
    }
}

/// Optional step that marks seeded records with their origin.
///
/// Production rows get a `[TEST] ` title prefix so they stand out among
/// real menu items; other environments get `[{env}] ` on the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelDecorator {
    title_prefix: Option<String>,
    description_prefix: Option<String>,
}

impl LabelDecorator {
    pub fn for_environment(environment: Environment) -> Self {
        if environment.is_production() {
            Self {
                title_prefix: Some("[TEST] ".into()),
                description_prefix: None,
            }
        } else {
            Self {
                title_prefix: None,
                description_prefix: Some(format!("[{environment}] ")),
            }
        }
    }

    /// Prefix the draft. Titles are re-truncated afterwards.
    pub fn apply(&self, mut draft: MenuItemDraft) -> MenuItemDraft {
        if let Some(prefix) = &self.title_prefix {
            draft.title = truncate_title(&format!("{prefix}{}", draft.title));
        }
        if let Some(prefix) = &self.description_prefix {
            draft.description = Some(match draft.description.take() {
                Some(text) => format!("{prefix}{text}"),
                None => prefix.trim_end().to_string(),
            });
        }
        draft
    }
}
