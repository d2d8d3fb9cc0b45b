use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use shared::{
    domain::{Product, ProductFields, ProductId},
    protocol::{CatalogOperation, PRODUCTS_PATH},
};
use tracing::{debug, warn};
use url::Url;

pub mod columns;
pub mod config;
pub mod error;
pub mod listing;
pub mod modal;
pub mod table;
pub mod validation;

pub use crate::config::Settings;
pub use error::{CatalogError, SettingsError};
pub use listing::{ListState, ProductListController, RefreshTicket};

/// Remote product catalog. Each call is a single HTTP request; nothing is cached
/// and nothing is retried.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, CatalogError>;
    async fn create(&self, fields: &ProductFields) -> Result<(), CatalogError>;
    async fn update(&self, id: ProductId, fields: &ProductFields) -> Result<(), CatalogError>;
    async fn delete(&self, id: ProductId) -> Result<(), CatalogError>;
}

pub struct HttpCatalogClient {
    http: Client,
    products_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let products_url = products_url(base_url)?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| CatalogError::InvalidBaseUrl {
                url: base_url.to_string(),
                reason: format!("failed to build http client: {err}"),
            })?;
        Ok(Self { http, products_url })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, CatalogError> {
        Self::new(&settings.api_base_url, settings.request_timeout())
    }

    pub fn products_url(&self) -> &str {
        &self.products_url
    }

    fn product_url(&self, id: ProductId) -> String {
        format!("{}/{id}", self.products_url)
    }
}

fn products_url(base_url: &str) -> Result<String, CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidBaseUrl {
        url: base_url.to_string(),
        reason,
    };
    let mut base = Url::parse(base_url.trim()).map_err(|err| invalid(err.to_string()))?;
    if !matches!(base.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    let url = base
        .join(PRODUCTS_PATH)
        .map_err(|err| invalid(err.to_string()))?;
    Ok(url.to_string())
}

fn log_request(operation: CatalogOperation, id: Option<ProductId>) {
    debug!(
        method = operation.method(),
        path = %operation.path(id),
        product_id = id.map(|id| id.0),
        "catalog request"
    );
}

fn ensure_success(operation: CatalogOperation, response: Response) -> Result<Response, CatalogError> {
    let status = response.status();
    debug!(%operation, status = status.as_u16(), "catalog response");
    if status.is_success() {
        Ok(response)
    } else {
        warn!(%operation, status = status.as_u16(), "catalog request rejected");
        Err(CatalogError::Status {
            operation,
            status: status.as_u16(),
        })
    }
}

fn transport(operation: CatalogOperation) -> impl FnOnce(reqwest::Error) -> CatalogError {
    move |source| {
        warn!(%operation, "catalog request failed: {source}");
        CatalogError::Transport { operation, source }
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        let operation = CatalogOperation::List;
        log_request(operation, None);
        let res = self
            .http
            .get(&self.products_url)
            .send()
            .await
            .map_err(transport(operation))?;
        let res = ensure_success(operation, res)?;
        res.json::<Vec<Product>>()
            .await
            .map_err(|source| CatalogError::Decode { operation, source })
    }

    async fn create(&self, fields: &ProductFields) -> Result<(), CatalogError> {
        let operation = CatalogOperation::Create;
        log_request(operation, None);
        let res = self
            .http
            .post(&self.products_url)
            .json(fields)
            .send()
            .await
            .map_err(transport(operation))?;
        ensure_success(operation, res)?;
        Ok(())
    }

    async fn update(&self, id: ProductId, fields: &ProductFields) -> Result<(), CatalogError> {
        let operation = CatalogOperation::Update;
        log_request(operation, Some(id));
        let res = self
            .http
            .put(self.product_url(id))
            .json(fields)
            .send()
            .await
            .map_err(transport(operation))?;
        ensure_success(operation, res)?;
        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<(), CatalogError> {
        let operation = CatalogOperation::Delete;
        log_request(operation, Some(id));
        let res = self
            .http
            .delete(self.product_url(id))
            .send()
            .await
            .map_err(transport(operation))?;
        ensure_success(operation, res)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
