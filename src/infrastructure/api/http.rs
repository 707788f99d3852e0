//! HTTP client for the remote product store

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use super::retry::RetryPolicy;
use crate::application::errors::ApiError;
use crate::domain::entities::Product;
use crate::domain::traits::{NewProduct, ProductApi, ProductUpdate};

const LIST_PATH: &str = "get-product";
const ADD_PATH: &str = "add-product";
const DELETE_PATH: &str = "delete-product";
const EDIT_PATH: &str = "edit-product";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteRequest<'a> {
    product_id: &'a str,
}

/// reqwest-backed product store client
pub struct HttpProductApi {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl HttpProductApi {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, body })
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.client
            .get(self.url(LIST_PATH))
            .send()
            .await
            .map_err(transport_error)?;

        Self::check(response)
            .await?
            .json::<Vec<Product>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout(e.to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list(&self) -> Result<Vec<Product>, ApiError> {
        let mut attempt = 0;
        loop {
            match self.fetch_products().await {
                Ok(products) => return Ok(products),
                Err(e) if self.retry.should_retry(&e, attempt) => {
                    let delay = self.retry.backoff.delay_for_attempt(attempt);
                    tracing::warn!("Fetching products failed ({}), retrying in {:?}", e, delay);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    tracing::error!("Fetching products failed: {}", e);
                    return Err(e);
                }
            }
        }
    }

    async fn create(&self, product: &NewProduct) -> Result<(), ApiError> {
        tracing::debug!("POST {} {:?}", ADD_PATH, product);
        let response = self.client
            .post(self.url(ADD_PATH))
            .json(product)
            .send()
            .await
            .map_err(transport_error)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn update(&self, update: &ProductUpdate) -> Result<(), ApiError> {
        tracing::debug!("PUT {} {:?}", EDIT_PATH, update);
        let response = self.client
            .put(self.url(EDIT_PATH))
            .json(update)
            .send()
            .await
            .map_err(transport_error)?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, product_id: &str) -> Result<(), ApiError> {
        tracing::debug!("POST {} {}", DELETE_PATH, product_id);
        let response = self.client
            .post(self.url(DELETE_PATH))
            .json(&DeleteRequest { product_id })
            .send()
            .await
            .map_err(transport_error)?;
        Self::check(response).await?;
        Ok(())
    }
}
