//! Pagination utilities for Outseta API responses.
//!
//! Outseta pages are addressed by a zero-based page index (`offset`) and a
//! page size (`limit`, at most [`MAX_PAGE_SIZE`]). Every list endpoint
//! answers with the same envelope:
//!
//! ```json
//! {"metadata": {"limit": 25, "offset": 0, "total": 112}, "items": [...]}
//! ```

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};

use crate::client::OutsetaClient;
use crate::constants::Sort;
use crate::error::{OutsetaError, Result};

/// Largest page size Outseta accepts.
pub const MAX_PAGE_SIZE: u32 = 25;

/// A page of results from the Outseta API.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of items across all pages (if known).
    pub total: Option<u64>,
    /// Current page number (0-indexed).
    pub page: u32,
    /// Number of items per page.
    pub count: u32,
    /// Whether there are more pages.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a new page from items and pagination info.
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, count: u32, total: Option<u64>) -> Self {
        let has_more = match total {
            Some(t) => (u64::from(page) + 1) * u64::from(count) < t,
            None => count > 0 && items.len() >= count as usize,
        };
        Self {
            items,
            total,
            page,
            count,
            has_more,
        }
    }

    /// Build a page from the raw list envelope.
    pub(crate) fn from_response(response: ItemPage<T>, request: PageRequest) -> Self {
        let total = response.metadata.map(|m| m.total);
        Self::new(response.items, request.page, request.count, total)
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            count: self.count,
            has_more: self.has_more,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Paging information returned alongside list results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Page size used by the server.
    #[serde(default)]
    pub limit: u32,
    /// Page index used by the server.
    #[serde(default)]
    pub offset: u32,
    /// Total number of matching items.
    #[serde(default)]
    pub total: u64,
}

/// Raw list envelope as sent by Outseta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemPage<T> {
    #[serde(default)]
    pub metadata: Option<Metadata>,
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Page coordinates of a list request, sent as `offset` and `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    /// Page index (0-indexed).
    #[serde(rename = "offset")]
    pub page: u32,
    /// Number of items per page.
    #[serde(rename = "limit")]
    pub count: u32,
}

impl PageRequest {
    /// Validate and create page coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`OutsetaError::InvalidPage`] when `count` is zero or larger
    /// than [`MAX_PAGE_SIZE`].
    pub fn new(page: u32, count: u32) -> Result<Self> {
        if count == 0 || count > MAX_PAGE_SIZE {
            return Err(OutsetaError::InvalidPage(format!(
                "Page size must be greater than 0 and less than or equal to {MAX_PAGE_SIZE}"
            )));
        }
        Ok(Self { page, count })
    }

    /// The page that follows this one, with the same size.
    ///
    /// The index saturates at `u32::MAX`.
    #[must_use]
    pub fn next(self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            count: self.count,
        }
    }
}

/// Sort key for list requests, sent as `orderBy=<field> <ASC|DESC>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    /// Outseta field name, e.g. `Created`.
    pub field: String,
    /// Sort direction.
    pub direction: Sort,
}

impl OrderBy {
    /// Ascending order on `field`.
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Sort::Asc,
        }
    }

    /// Descending order on `field`.
    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: Sort::Desc,
        }
    }
}

impl Serialize for OrderBy {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{} {}", self.field, self.direction.as_str()))
    }
}

/// Ordering and free-form filters shared by most list queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListOptions {
    /// Sort key. Omitted from the query when unset or when its field is blank.
    #[serde(rename = "orderBy", skip_serializing_if = "is_unordered")]
    pub order_by: Option<OrderBy>,

    /// Extra query parameters passed through unchanged (e.g. `Account.Uid`).
    #[serde(flatten)]
    pub custom_params: BTreeMap<String, String>,
}

impl ListOptions {
    /// Sort results by the given key.
    #[must_use]
    pub fn order_by(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }

    /// Add a pass-through query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.custom_params.insert(key.into(), value.into());
        self
    }
}

fn is_unordered(order_by: &Option<OrderBy>) -> bool {
    match order_by {
        Some(order) => order.field.trim().is_empty(),
        None => true,
    }
}

/// Page coordinates merged with an entity-specific query.
#[derive(Serialize)]
pub(crate) struct PagedQuery<'a, Q: Serialize + ?Sized> {
    #[serde(flatten)]
    pub page: PageRequest,
    #[serde(flatten)]
    pub query: &'a Q,
}

/// Fetch one page of `path` and unwrap the list envelope.
pub(crate) async fn fetch_page<T, Q>(
    client: &OutsetaClient,
    path: &str,
    query: &Q,
    page: u32,
    count: u32,
) -> Result<Page<T>>
where
    T: DeserializeOwned,
    Q: Serialize + ?Sized,
{
    let request = PageRequest::new(page, count)?;
    let params = PagedQuery {
        page: request,
        query,
    };

    let response = client.get_with_query(path, &params).await?;
    let raw: ItemPage<T> = OutsetaClient::read_json(response).await?;
    Ok(Page::from_response(raw, request))
}
