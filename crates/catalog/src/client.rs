use std::time::Duration;

use reqwest::{Client, Url};
use review_protocol::{
    page_from_response, product_from_response, ApiResponse, MalformedResponse, ProductListing,
    ProductPage, SortOrder,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ReviewConfig;
use crate::error::{CatalogError, Result};

/// Read-only client for the catalog API
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
}

impl CatalogClient {
    pub fn new(config: &ReviewConfig) -> Result<Self> {
        config.validate()?;
        let base_url = Url::parse(config.api_base_url.trim()).map_err(|err| {
            CatalogError::InvalidConfig(format!("api_base_url '{}': {err}", config.api_base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::InvalidConfig(format!(
                "api_base_url '{base_url}' cannot carry a path"
            )));
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { http, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET /products/minimal?page&pageSize&sortBy`
    pub async fn fetch_minimal_products(
        &self,
        page: u32,
        page_size: u32,
        sort_by: SortOrder,
    ) -> Result<ProductListing> {
        let query = [
            ("page", page.to_string()),
            ("pageSize", page_size.to_string()),
            ("sortBy", sort_by.to_string()),
        ];
        let body = self.get_json(&["products", "minimal"], &query).await?;
        parse_page(body, page_size)
    }

    /// `GET /products?page&pageSize`, full records including snapshots
    pub async fn fetch_full_products(&self, page: u32, page_size: u32) -> Result<ProductPage<Value>> {
        let query = [("page", page.to_string()), ("pageSize", page_size.to_string())];
        let body = self.get_json(&["products"], &query).await?;
        parse_page(body, page_size)
    }

    /// `GET /products/{id}`
    pub async fn fetch_product_by_id(&self, id: &str) -> Result<Value> {
        let body = self.get_json(&["products", id], &[]).await?;
        product_from_response(body).map_err(CatalogError::MalformedProduct)
    }

    /// `GET /products/slug/{slug}`
    pub async fn fetch_product_by_slug(&self, slug: &str) -> Result<Value> {
        let body = self.get_json(&["products", "slug", slug], &[]).await?;
        product_from_response(body).map_err(CatalogError::MalformedProduct)
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Value> {
        let url = self.endpoint(segments);
        log::debug!("GET {url}");

        let response = self.http.get(url.clone()).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("GET {url} failed with HTTP {status}");
            return Err(CatalogError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json().await?)
    }
}

fn parse_page<T: DeserializeOwned>(body: Value, page_size: u32) -> Result<ProductPage<T>> {
    let response: ApiResponse<Vec<T>> = serde_json::from_value(body).map_err(|err| {
        CatalogError::MalformedListing(MalformedResponse::UnexpectedShape(err.to_string()))
    })?;
    page_from_response(response, page_size).map_err(CatalogError::MalformedListing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> CatalogClient {
        CatalogClient::new(&ReviewConfig {
            api_base_url: base.to_string(),
            ..ReviewConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn endpoints_append_to_base_path() {
        let c = client("http://catalog.test/api/");
        assert_eq!(
            c.endpoint(&["products", "slug", "acme crm"]).as_str(),
            "http://catalog.test/api/products/slug/acme%20crm"
        );
        let c = client("http://catalog.test/api");
        assert_eq!(
            c.endpoint(&["products", "minimal"]).as_str(),
            "http://catalog.test/api/products/minimal"
        );
    }

    #[test]
    fn rejects_unparseable_base_url() {
        let result = CatalogClient::new(&ReviewConfig {
            api_base_url: "not a url".to_string(),
            ..ReviewConfig::default()
        });
        assert!(matches!(result, Err(CatalogError::InvalidConfig(_))));
    }
}
