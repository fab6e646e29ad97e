//! List trait for fetching collections of entities.

use async_trait::async_trait;

use crate::client::OutsetaClient;
use crate::error::Result;
use crate::pagination::{Page, MAX_PAGE_SIZE};

/// Default page size for list operations.
pub const DEFAULT_PAGE_SIZE: u32 = MAX_PAGE_SIZE;

/// Maximum pages to fetch (safety limit).
const MAX_PAGES: u32 = 1000;

/// List/filter entities with pagination support.
///
/// # Example
///
/// ```ignore
/// use outseta::{OutsetaClient, Account, List};
///
/// let client = OutsetaClient::from_env()?;
///
/// // Fetch the first page
/// let page = Account::list_page(&client, &Default::default(), 0, 25).await?;
///
/// // Fetch all pages
/// let all_accounts = Account::list_all(&client, &Default::default()).await?;
/// ```
#[async_trait]
pub trait List: Sized + Send {
    /// Query parameters for filtering.
    type Query: Send + Sync;

    /// List entities matching the query (single page).
    ///
    /// # Arguments
    ///
    /// * `client` - The Outseta API client
    /// * `query` - Query parameters for filtering
    /// * `page` - Page number (0-indexed)
    /// * `count` - Number of items per page (max 25)
    ///
    /// # Errors
    ///
    /// Returns [`OutsetaError::InvalidPage`](crate::OutsetaError::InvalidPage)
    /// for an out-of-range `count`, or an error if the request fails.
    async fn list_page(
        client: &OutsetaClient,
        query: &Self::Query,
        page: u32,
        count: u32,
    ) -> Result<Page<Self>>;

    /// List all entities matching the query (fetches all pages).
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &OutsetaClient, query: &Self::Query) -> Result<Vec<Self>> {
        let mut all_items = Vec::new();
        let mut page = 0;

        loop {
            let result = Self::list_page(client, query, page, DEFAULT_PAGE_SIZE).await?;
            let has_more = result.has_more && !result.is_empty();
            all_items.extend(result.items);

            if !has_more {
                break;
            }
            page += 1;

            if page >= MAX_PAGES {
                tracing::warn!("Reached pagination limit of {} pages, stopping", MAX_PAGES);
                break;
            }
        }

        Ok(all_items)
    }
}
