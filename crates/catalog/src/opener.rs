use review_protocol::ProductSummary;
use serde_json::Value;

use crate::client::CatalogClient;
use crate::error::Result;
use crate::guard::LatestRequest;

/// How a product detail is addressed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductRef {
    Slug(String),
    Id(String),
}

impl ProductRef {
    /// Prefer the slug, fall back to the id; `None` when the entry has neither
    #[must_use]
    pub fn for_summary(summary: &ProductSummary) -> Option<Self> {
        if let Some(slug) = summary.slug() {
            return Some(Self::Slug(slug.to_string()));
        }
        let id = summary.id.trim();
        (!id.is_empty()).then(|| Self::Id(id.to_string()))
    }
}

impl std::fmt::Display for ProductRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slug(slug) => write!(f, "slug '{slug}'"),
            Self::Id(id) => write!(f, "id '{id}'"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OpenOutcome {
    /// Full product record ready for review
    Loaded(Value),
    /// Nothing to open; go back to the listing
    Redirect,
    /// A newer open request replaced this one
    Superseded,
}

/// Opens products for review, keeping only the latest request's result
#[derive(Debug)]
pub struct ProductOpener {
    client: CatalogClient,
    requests: LatestRequest,
}

impl ProductOpener {
    #[must_use]
    pub fn new(client: CatalogClient) -> Self {
        Self {
            client,
            requests: LatestRequest::new(),
        }
    }

    pub async fn open(&self, reference: Option<ProductRef>) -> Result<OpenOutcome> {
        let Some(reference) = reference else {
            log::debug!("No product selected, redirecting to listing");
            return Ok(OpenOutcome::Redirect);
        };

        let ticket = self.requests.issue();
        let outcome = match &reference {
            ProductRef::Slug(slug) => self.client.fetch_product_by_slug(slug).await,
            ProductRef::Id(id) => self.client.fetch_product_by_id(id).await,
        };

        match self.requests.accept(ticket, outcome) {
            Ok(product) => Ok(OpenOutcome::Loaded(product)),
            Err(err) if err.is_stale() => Ok(OpenOutcome::Superseded),
            Err(err) => {
                log::warn!("Failed to open product by {reference}: {err}");
                Err(err)
            }
        }
    }

    pub async fn open_summary(&self, summary: Option<&ProductSummary>) -> Result<OpenOutcome> {
        self.open(summary.and_then(ProductRef::for_summary)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_preferred_over_id() {
        let summary = ProductSummary {
            id: "p1".into(),
            product_slug: Some("acme".into()),
            ..ProductSummary::default()
        };
        assert_eq!(
            ProductRef::for_summary(&summary),
            Some(ProductRef::Slug("acme".into()))
        );

        let summary = ProductSummary {
            id: "p1".into(),
            product_slug: Some(" ".into()),
            ..ProductSummary::default()
        };
        assert_eq!(
            ProductRef::for_summary(&summary),
            Some(ProductRef::Id("p1".into()))
        );

        assert_eq!(ProductRef::for_summary(&ProductSummary::default()), None);
    }
}
