use review_protocol::{CompletionStats, Pagination, ProductListing, ProductSummary, SortOrder};

use crate::client::CatalogClient;
use crate::error::Result;
use crate::filter::QualityFilter;
use crate::guard::{LatestRequest, RequestTicket};

/// Paged, sorted and filtered view of the product listing
#[derive(Debug)]
pub struct ListingState {
    page_size: u32,
    sort_by: SortOrder,
    filter: QualityFilter,
    products: Vec<ProductSummary>,
    pagination: Pagination,
    completion_stats: Option<CompletionStats>,
    error: Option<String>,
    requests: LatestRequest,
}

impl ListingState {
    #[must_use]
    pub fn new(page_size: u32, sort_by: SortOrder, filter: QualityFilter) -> Self {
        Self {
            page_size,
            sort_by,
            filter,
            products: Vec::new(),
            pagination: Pagination {
                current_page: 1,
                page_size,
                total_items: 0,
                total_pages: 0,
                has_next_page: false,
                has_previous_page: false,
            },
            completion_stats: None,
            error: None,
            requests: LatestRequest::new(),
        }
    }

    #[must_use]
    pub fn page(&self) -> u32 {
        self.pagination.current_page
    }

    #[must_use]
    pub fn sort_by(&self) -> SortOrder {
        self.sort_by
    }

    #[must_use]
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    #[must_use]
    pub fn completion_stats(&self) -> Option<&CompletionStats> {
        self.completion_stats.as_ref()
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn filter(&self) -> &QualityFilter {
        &self.filter
    }

    pub fn filter_mut(&mut self) -> &mut QualityFilter {
        &mut self.filter
    }

    /// Every product on the loaded page
    #[must_use]
    pub fn products(&self) -> &[ProductSummary] {
        &self.products
    }

    /// Products on the loaded page that pass the quality filter
    #[must_use]
    pub fn visible_products(&self) -> Vec<&ProductSummary> {
        self.filter.apply(&self.products)
    }

    /// Fetch `page` and replace the loaded listing
    pub async fn load(&mut self, client: &CatalogClient, page: u32) -> Result<()> {
        let ticket = self.begin_load();
        let outcome = client
            .fetch_minimal_products(page, self.page_size, self.sort_by)
            .await;
        self.finish_load(ticket, outcome).map(|_| ())
    }

    /// Start a load; any load started earlier becomes stale
    pub fn begin_load(&self) -> RequestTicket {
        self.requests.issue()
    }

    /// Settle a load started with [`Self::begin_load`].
    ///
    /// Returns whether the listing was replaced. Stale outcomes are dropped
    /// whatever they hold. Failures keep the previous page and are recorded
    /// as the listing error.
    pub fn finish_load(&mut self, ticket: RequestTicket, outcome: Result<ProductListing>) -> Result<bool> {
        match self.requests.accept(ticket, outcome) {
            Ok(listing) => {
                self.apply(listing);
                Ok(true)
            }
            Err(err) if err.is_stale() => Ok(false),
            Err(err) => {
                log::warn!("Listing fetch failed: {err}");
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub fn apply(&mut self, listing: ProductListing) {
        log::debug!(
            "Loaded page {}/{} with {} products",
            listing.pagination.current_page,
            listing.pagination.total_pages,
            listing.products.len()
        );
        self.products = listing.products;
        self.pagination = listing.pagination;
        self.completion_stats = listing.completion_stats;
        self.error = None;
    }

    /// Page to request for "next", if there is one
    #[must_use]
    pub fn next_page(&self) -> Option<u32> {
        self.pagination
            .has_next_page
            .then(|| self.pagination.current_page + 1)
    }

    /// Page to request for "previous", if there is one
    #[must_use]
    pub fn previous_page(&self) -> Option<u32> {
        (self.pagination.has_previous_page && self.pagination.current_page > 1)
            .then(|| self.pagination.current_page - 1)
    }

    /// `page` if it lies within `1..=total_pages`
    #[must_use]
    pub fn go_to(&self, page: u32) -> Option<u32> {
        (1..=self.pagination.total_pages).contains(&page).then_some(page)
    }

    /// Change the sort order; returns the page to load (always the first)
    pub fn set_sort(&mut self, sort_by: SortOrder) -> u32 {
        self.sort_by = sort_by;
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use pretty_assertions::assert_eq;
    use review_protocol::MalformedResponse;

    fn listing(current_page: u32, total_pages: u32) -> ProductListing {
        ProductListing {
            products: Vec::new(),
            pagination: Pagination {
                current_page,
                page_size: 12,
                total_items: u64::from(total_pages) * 12,
                total_pages,
                has_next_page: current_page < total_pages,
                has_previous_page: current_page > 1,
            },
            completion_stats: None,
        }
    }

    #[test]
    fn navigation_follows_pagination_flags() {
        let mut state = ListingState::new(12, SortOrder::Latest, QualityFilter::default());
        assert_eq!(state.next_page(), None);
        assert_eq!(state.previous_page(), None);
        assert_eq!(state.go_to(1), None);

        state.apply(listing(2, 3));
        assert_eq!(state.next_page(), Some(3));
        assert_eq!(state.previous_page(), Some(1));
        assert_eq!(state.go_to(3), Some(3));
        assert_eq!(state.go_to(0), None);
        assert_eq!(state.go_to(4), None);

        state.apply(listing(3, 3));
        assert_eq!(state.next_page(), None);
    }

    #[test]
    fn late_response_does_not_overwrite_newer_page() {
        let mut state = ListingState::new(12, SortOrder::Latest, QualityFilter::default());
        let first = state.begin_load();
        let second = state.begin_load();

        assert!(state.finish_load(second, Ok(listing(2, 3))).unwrap());
        assert!(!state.finish_load(first, Ok(listing(1, 3))).unwrap());
        assert_eq!(state.page(), 2);
    }

    #[test]
    fn failure_keeps_previous_page_and_records_error() {
        let mut state = ListingState::new(12, SortOrder::Latest, QualityFilter::default());
        state.apply(listing(2, 3));

        let ticket = state.begin_load();
        let failed = state.finish_load(
            ticket,
            Err(CatalogError::MalformedListing(MalformedResponse::MissingData)),
        );
        assert!(failed.is_err());
        assert_eq!(state.page(), 2);
        assert_eq!(state.error(), Some("Failed to fetch products"));
    }

    #[test]
    fn changing_sort_restarts_at_first_page() {
        let mut state = ListingState::new(12, SortOrder::Latest, QualityFilter::default());
        state.apply(listing(2, 3));
        assert_eq!(state.set_sort(SortOrder::Oldest), 1);
        assert_eq!(state.sort_by(), SortOrder::Oldest);
    }
}
