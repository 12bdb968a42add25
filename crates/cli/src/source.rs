use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context as AnyhowContext, Result};
use clap::Args;
use review_catalog::{CatalogClient, OpenOutcome, ProductOpener, ProductRef, ReviewConfig};
use review_protocol::product_from_response;
use serde_json::Value;

/// Where a product record comes from
#[derive(Args, Debug, Clone)]
pub(crate) struct SourceArgs {
    /// Product record JSON file ("-" reads stdin)
    #[arg(
        value_name = "RECORD.json",
        required_unless_present_any = ["slug", "id"],
        conflicts_with_all = ["slug", "id"]
    )]
    pub record: Option<PathBuf>,

    /// Fetch the product from the catalog API by slug
    #[arg(long, conflicts_with = "id")]
    pub slug: Option<String>,

    /// Fetch the product from the catalog API by id
    #[arg(long)]
    pub id: Option<String>,
}

impl SourceArgs {
    pub(crate) fn reads_stdin(&self) -> bool {
        self.record.as_deref().is_some_and(|p| p.as_os_str() == "-")
    }

    fn product_ref(&self) -> Option<ProductRef> {
        self.slug
            .clone()
            .map(ProductRef::Slug)
            .or_else(|| self.id.clone().map(ProductRef::Id))
    }
}

/// Load the product record, unwrapping an API envelope if the file holds one
pub(crate) async fn load_product(source: &SourceArgs, config: &ReviewConfig) -> Result<Value> {
    if let Some(path) = &source.record {
        let raw = if source.reads_stdin() {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read record from stdin")?;
            raw
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?
        };
        let body: Value = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid JSON in {}", path.display()))?;
        let product = product_from_response(body)
            .with_context(|| format!("{} does not hold a product record", path.display()))?;
        return Ok(product);
    }

    let client = CatalogClient::new(config).context("Failed to set up catalog client")?;
    let opener = ProductOpener::new(client);
    match opener.open(source.product_ref()).await? {
        OpenOutcome::Loaded(product) => Ok(product),
        OpenOutcome::Redirect => bail!("No product selected; pass RECORD.json, --slug or --id"),
        OpenOutcome::Superseded => bail!("Product request was superseded"),
    }
}
