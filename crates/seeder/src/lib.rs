//! Synthetic menu-item seeding.
//!
//! - [`generator`]: random, schema-valid item drafts.
//! - [`driver`]: the sequential insertion loop with failure aggregation.
//! - [`policy`]: environment count cap and optional labelling.
//! - [`error`]: per-record and batch error types.

pub mod driver;
pub mod error;
pub mod generator;
pub mod policy;

pub use driver::{DataSeeder, SeedingOutcome};
pub use error::{BatchSeedingFailure, FailureRecord, SeedError};
pub use generator::{ItemGenerator, MenuItemDraft};
pub use policy::{cap_count, LabelDecorator};
