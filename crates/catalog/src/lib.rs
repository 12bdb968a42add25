//! # Review Catalog
//!
//! Everything between the review engine and the outside world: the catalog
//! API client, the product listing state and the reviewer's persisted
//! listing filter.
//!
//! ```text
//! ReviewConfig (defaults → TOML → env)
//!     │
//!     └──> CatalogClient (reqwest)
//!            ├─ GET /products/minimal ──> ListingState (pages, sort, QualityFilter)
//!            ├─ GET /products/slug/{slug} ─┐
//!            └─ GET /products/{id} ────────┴──> ProductOpener ──> product record
//!
//! LatestRequest tickets make late responses lose to newer requests.
//! FilterStore keeps the QualityFilter in `<state_dir>/product-completion-filter.json`.
//! ```

mod client;
mod config;
mod error;
mod filter;
mod guard;
mod listing;
mod opener;

pub use client::CatalogClient;
pub use config::{ReviewConfig, DEFAULT_CONFIG_FILE, ENV_API_URL, ENV_PAGE_SIZE, ENV_STATE_DIR};
pub use error::{CatalogError, Result};
pub use filter::{FilterStore, QualityFilter};
pub use guard::{LatestRequest, RequestTicket};
pub use listing::ListingState;
pub use opener::{OpenOutcome, ProductOpener, ProductRef};
