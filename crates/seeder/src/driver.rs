//! Sequential insertion driver.
//!
//! [`DataSeeder::seed`] generates and inserts one item per iteration. A
//! failing record is recorded and the loop moves on; the batch only fails
//! at the end, as a single [`BatchSeedingFailure`] holding every record.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use micropos_core::environment::Environment;
use micropos_db::models::item::StoredItem;
use micropos_db::repositories::ItemRepo;
use micropos_db::TableClient;

use crate::error::{BatchSeedingFailure, FailureRecord, SeedError};
use crate::generator::ItemGenerator;
use crate::policy::{cap_count, LabelDecorator};

/// Result of one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedingOutcome {
    /// Count passed by the caller.
    pub requested: usize,
    /// Count after the environment cap.
    pub count: usize,
    /// Iterations that reached generation.
    pub attempted: usize,
    /// Rows the backend accepted.
    pub seeded: usize,
    /// Set when the cancellation token stopped the loop early.
    pub cancelled: bool,
    /// One record per failed iteration, in order.
    pub failures: Vec<FailureRecord>,
}

impl SeedingOutcome {
    pub fn new(requested: usize, count: usize) -> Self {
        Self {
            requested,
            count,
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Inserts generated menu items through a [`TableClient`].
pub struct DataSeeder {
    client: Arc<dyn TableClient>,
    environment: Environment,
    generator: ItemGenerator,
    decorator: Option<LabelDecorator>,
}

impl DataSeeder {
    pub fn new(client: Arc<dyn TableClient>, environment: Environment) -> Self {
        Self {
            client,
            environment,
            generator: ItemGenerator::default(),
            decorator: None,
        }
    }

    pub fn with_generator(mut self, generator: ItemGenerator) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_decorator(mut self, decorator: LabelDecorator) -> Self {
        self.decorator = Some(decorator);
        self
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Seed `count` items, running to completion.
    pub async fn seed(&self, count: usize) -> Result<SeedingOutcome, BatchSeedingFailure> {
        self.seed_with_cancel(count, &CancellationToken::new()).await
    }

    /// Seed `count` items, stopping before the next insert once `cancel`
    /// fires. Work completed so far is still reported.
    pub async fn seed_with_cancel(
        &self,
        count: usize,
        cancel: &CancellationToken,
    ) -> Result<SeedingOutcome, BatchSeedingFailure> {
        let effective = cap_count(self.environment, count);
        if effective < count {
            tracing::warn!(
                environment = %self.environment,
                requested = count,
                count = effective,
                "Seed count capped for environment"
            );
        }

        tracing::info!(
            environment = %self.environment,
            count = effective,
            "Seeding started"
        );

        let mut outcome = SeedingOutcome::new(count, effective);

        for iteration in 1..=effective {
            if cancel.is_cancelled() {
                tracing::warn!(
                    attempted = outcome.attempted,
                    seeded = outcome.seeded,
                    "Seeding cancelled"
                );
                outcome.cancelled = true;
                break;
            }

            outcome.attempted += 1;
            match self.seed_one(iteration).await {
                Ok(item) => {
                    outcome.seeded += 1;
                    tracing::info!(
                        iteration,
                        id = %item.id,
                        title = item.title.as_deref().unwrap_or_default(),
                        "Seeded item"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        error_id = %err.correlation_id(),
                        kind = err.kind(),
                        iteration,
                        error = %err,
                        "Failed to seed item"
                    );
                    outcome.failures.push(err.to_record(iteration));
                }
            }
        }

        if outcome.is_success() {
            tracing::info!(
                environment = %self.environment,
                seeded = outcome.seeded,
                count = outcome.count,
                "Seeding completed"
            );
            return Ok(outcome);
        }

        let failure = BatchSeedingFailure::new(self.environment, outcome);
        tracing::error!(
            error_id = %failure.correlation_id,
            failed = failure.errors().len(),
            "{failure}"
        );
        Err(failure)
    }

    async fn seed_one(&self, iteration: usize) -> Result<StoredItem, SeedError> {
        let mut draft = self.generator.generate()?;
        if let Some(decorator) = &self.decorator {
            draft = decorator.apply(draft);
            draft.validate()?;
        }

        ItemRepo::create_stored(self.client.as_ref(), &draft.to_create())
            .await
            .map_err(|e| SeedError::insertion(iteration, Some(draft.title.clone()), e))
    }
}
