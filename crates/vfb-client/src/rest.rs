//! HTTP implementation of [`ValidationApi`]

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use vfb_core::prelude::*;
use vfb_core::{Collection, Entity, EntityKind, FilterConfiguration, FragmentToken, Model, Test, ValidationResult};

use crate::api::ValidationApi;
use crate::endpoints;
use crate::types::{ModelsResponse, ResultsResponse, TestsResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the validation REST API with bearer authentication.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::http(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {t}"))
    }

    fn ensure_ok(&self, resp: Response, url: &str) -> Result<Response> {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::Unauthorized);
        }
        if !status.is_success() {
            return Err(Error::status(status.as_u16(), url));
        }
        Ok(resp)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T> {
        debug!("GET {}", url);
        let mut request = self.http.get(&url);
        if let Some(auth) = self.auth() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let resp = request
            .send()
            .await
            .map_err(|e| Error::http(format!("{url}: {e}")))?;
        let resp = self.ensure_ok(resp, &url)?;
        resp.json::<T>()
            .await
            .map_err(|e| Error::decode(url, e.to_string()))
    }
}

impl ValidationApi for RestClient {
    async fn list_models(&self, filters: &FilterConfiguration) -> Result<Vec<Model>> {
        let url = endpoints::collection_url(&self.base_url, Collection::Models, filters);
        let body: ModelsResponse = self.get_json(url).await?;
        Ok(body.models)
    }

    async fn list_tests(&self, filters: &FilterConfiguration) -> Result<Vec<Test>> {
        let url = endpoints::collection_url(&self.base_url, Collection::Tests, filters);
        let body: TestsResponse = self.get_json(url).await?;
        Ok(body.tests)
    }

    async fn find(&self, token: &FragmentToken) -> Result<Vec<Entity>> {
        let url = endpoints::lookup_url(&self.base_url, token);
        let entities = match token.entity_kind() {
            EntityKind::Model => {
                let body: ModelsResponse = self.get_json(url).await?;
                body.models.into_iter().map(Entity::Model).collect()
            }
            EntityKind::Test => {
                let body: TestsResponse = self.get_json(url).await?;
                body.tests.into_iter().map(Entity::Test).collect()
            }
            EntityKind::Result => {
                let body: ResultsResponse = self.get_json(url).await?;
                body.results.into_iter().map(Entity::Result).collect()
            }
        };
        Ok(entities)
    }

    async fn results_for(&self, owner: Collection, id: &str) -> Result<Vec<ValidationResult>> {
        let url = endpoints::results_url(&self.base_url, owner, id);
        let body: ResultsResponse = self.get_json(url).await?;
        Ok(body.results)
    }
}
