//! Response envelopes of the REST API

use serde::Deserialize;
use vfb_core::{Model, Test, ValidationResult};

#[derive(Debug, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<Model>,
}

#[derive(Debug, Deserialize)]
pub struct TestsResponse {
    pub tests: Vec<Test>,
}

#[derive(Debug, Deserialize)]
pub struct ResultsResponse {
    pub results: Vec<ValidationResult>,
}
