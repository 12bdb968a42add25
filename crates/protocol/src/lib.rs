use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Storage key of the persisted completion-quality filter
pub const FILTER_STORAGE_KEY: &str = "product-completion-filter";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MalformedResponse {
    #[error("response reported failure: {0}")]
    Unsuccessful(String),

    #[error("response has no data")]
    MissingData,

    #[error("response data has an unexpected shape: {0}")]
    UnexpectedShape(String),
}

pub type Result<T> = std::result::Result<T, MalformedResponse>;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Latest,
    Oldest,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Oldest => "oldest",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "latest" => Ok(Self::Latest),
            "oldest" => Ok(Self::Oldest),
            other => Err(format!("unknown sort order '{other}' (expected latest|oldest)")),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl Pagination {
    /// Pagination for a listing that fits on one page
    #[must_use]
    pub fn single_page(items: usize, page_size: u32) -> Self {
        Self {
            current_page: 1,
            page_size,
            total_items: items as u64,
            total_pages: u32::from(items > 0),
            has_next_page: false,
            has_previous_page: false,
        }
    }
}

/// Product counts per completion-quality bucket
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionStats {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub pagination: Option<Pagination>,
    pub completion_stats: Option<CompletionStats>,
    pub message: Option<String>,
}

/// Listing entry from `GET /products/minimal`
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct ProductSummary {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub product_name: String,
    #[serde(default)]
    pub product_slug: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub parent_category: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Null or absent reads as 0, which buckets as low completion
    #[serde(default, deserialize_with = "null_as_default")]
    pub completion_percentage: f64,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub generated_at: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl ProductSummary {
    /// Non-blank slug, if the entry has one
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        self.product_slug
            .as_deref()
            .map(str::trim)
            .filter(|slug| !slug.is_empty())
    }
}

/// One page of products
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage<T> {
    pub products: Vec<T>,
    pub pagination: Pagination,
    pub completion_stats: Option<CompletionStats>,
}

/// Page of `GET /products/minimal`
pub type ProductListing = ProductPage<ProductSummary>;

/// Unwrap a paginated response. A missing pagination block is treated as a
/// single page holding everything returned.
pub fn page_from_response<T>(response: ApiResponse<Vec<T>>, page_size: u32) -> Result<ProductPage<T>> {
    if !response.success {
        return Err(MalformedResponse::Unsuccessful(
            response.message.unwrap_or_default(),
        ));
    }
    let products = response.data.ok_or(MalformedResponse::MissingData)?;
    let pagination = response
        .pagination
        .unwrap_or_else(|| Pagination::single_page(products.len(), page_size));

    Ok(ProductPage {
        products,
        pagination,
        completion_stats: response.completion_stats,
    })
}

/// Unwrap a detail response into the product record.
///
/// Accepts `{success, data: [product, ..]}` (first element wins),
/// `{success, data: product}`, and a bare product object without the
/// envelope.
pub fn product_from_response(body: Value) -> Result<Value> {
    let mut envelope = match body {
        Value::Object(envelope) => envelope,
        other => return Err(MalformedResponse::UnexpectedShape(kind_of(&other).into())),
    };

    if !envelope.contains_key("success") {
        return Ok(Value::Object(envelope));
    }
    if envelope.get("success").and_then(Value::as_bool) != Some(true) {
        let message = envelope
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(MalformedResponse::Unsuccessful(message));
    }

    match envelope.remove("data") {
        Some(Value::Array(items)) => match items.into_iter().next() {
            Some(product @ Value::Object(_)) => Ok(product),
            Some(other) => Err(MalformedResponse::UnexpectedShape(kind_of(&other).into())),
            None => Err(MalformedResponse::MissingData),
        },
        Some(product @ Value::Object(_)) => Ok(product),
        None | Some(Value::Null) => Err(MalformedResponse::MissingData),
        Some(other) => Err(MalformedResponse::UnexpectedShape(kind_of(&other).into())),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
