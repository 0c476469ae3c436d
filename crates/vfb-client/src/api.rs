//! The data-source abstraction shared by the REST client and offline store

use vfb_core::prelude::*;
use vfb_core::{Collection, Entity, FilterConfiguration, FragmentToken, Model, Test, ValidationResult};

/// Access to the validation framework's models, tests and results.
///
/// Every call is independent; callers handle supersession and cancellation
/// by dropping or aborting the returned future.
#[trait_variant::make(ValidationApi: Send)]
pub trait LocalValidationApi {
    /// Models matching every active filter key.
    async fn list_models(&self, filters: &FilterConfiguration) -> Result<Vec<Model>>;

    /// Tests matching every active filter key.
    async fn list_tests(&self, filters: &FilterConfiguration) -> Result<Vec<Test>>;

    /// Every record matching a fragment token. Callers decide what a count
    /// other than one means.
    async fn find(&self, token: &FragmentToken) -> Result<Vec<Entity>>;

    /// Results recorded against a model or test.
    async fn results_for(&self, owner: Collection, id: &str) -> Result<Vec<ValidationResult>>;
}
