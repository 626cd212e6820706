//! Shared building blocks for the microPOS middleware.
//!
//! Zero internal dependencies: the db client, the seeder and the HTTP
//! server all build on the types, rules and configuration loader here.

pub mod environment;
pub mod error;
pub mod logging;
pub mod pricing;
pub mod settings;
pub mod types;
