//! Paged list requests and replies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoreError;
use crate::schema;
use crate::sort::SortOrder;
use crate::types::EntityKind;

/// Page size used by list screens unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Properties every paged reply must carry.
const PAGED_REQUIRED: &[&str] = &["items", "total"];

/// How a list endpoint names its paging parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStyle {
    /// `filter`, `sort` (with `-` prefix), `page`, `limit`.
    Standard,
    /// `filter`, `sort`, `order` (`asc`/`desc`), `page`, `pageSize`.
    Shipment,
}

/// Parameters of a single list fetch. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerOptions {
    pub filter: Option<String>,
    pub sort: Option<SortOrder>,
    pub page: u32,
    pub limit: u32,
}

impl Default for PagerOptions {
    fn default() -> Self {
        Self {
            filter: None,
            sort: None,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PagerOptions {
    /// Render as query parameters. Unset filter and sort are omitted.
    pub fn to_query(&self, style: QueryStyle) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(5);
        if let Some(filter) = &self.filter {
            query.push(("filter".to_string(), filter.clone()));
        }
        match style {
            QueryStyle::Standard => {
                if let Some(sort) = &self.sort {
                    query.push(("sort".to_string(), sort.to_string()));
                }
                query.push(("page".to_string(), self.page.to_string()));
                query.push(("limit".to_string(), self.limit.to_string()));
            }
            QueryStyle::Shipment => {
                if let Some(sort) = &self.sort {
                    query.push(("sort".to_string(), sort.field.to_string()));
                    let order = if sort.descending { "desc" } else { "asc" };
                    query.push(("order".to_string(), order.to_string()));
                }
                query.push(("page".to_string(), self.page.to_string()));
                query.push(("pageSize".to_string(), self.limit.to_string()));
            }
        }
        query
    }
}

fn first_page() -> u32 {
    1
}

/// One page of a list endpoint reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub next: Option<u32>,
    #[serde(default)]
    pub prev: Option<u32>,
    #[serde(default)]
    pub max_pages: u32,
}

impl<T> PagedResult<T> {
    pub fn empty(page: u32, limit: u32) -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page,
            limit,
            offset: 0,
            next: None,
            prev: None,
            max_pages: 0,
        }
    }

    /// Convert every item, failing on the first error.
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<PagedResult<U>, E> {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(PagedResult {
            items,
            total: self.total,
            page: self.page,
            limit: self.limit,
            offset: self.offset,
            next: self.next,
            prev: self.prev,
            max_pages: self.max_pages,
        })
    }
}

impl PagedResult<Value> {
    /// Validate the page envelope of a server reply.
    ///
    /// Item validation is left to the caller.
    pub fn from_server(kind: EntityKind, value: Value) -> Result<Self, CoreError> {
        schema::decode(kind, PAGED_REQUIRED, value)
    }
}

/// Aggregate (unfiltered) entity counts, e.g.
/// `{"total": 7, "disabledCount": 2, "enabledCount": 5}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCounts {
    pub total: u64,
    #[serde(flatten)]
    pub by_state: BTreeMap<String, u64>,
}

impl EntityCounts {
    /// Count of entities in `state`, `0` when the server did not report it.
    pub fn in_state(&self, state: &str) -> u64 {
        self.by_state
            .get(&format!("{state}Count"))
            .copied()
            .unwrap_or(0)
    }
}

/// Which empty-state message (if any) a list view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState {
    /// No entity of this kind exists at all.
    NoEntities,
    /// Entities exist but the current filter matches none.
    NoResults,
    HaveResults,
}

impl DisplayState {
    /// Derive the display state from the unfiltered entity count and the
    /// filtered total of the current query.
    pub fn compute(entity_count: u64, filtered_total: u64) -> Self {
        if entity_count == 0 {
            Self::NoEntities
        } else if filtered_total == 0 {
            Self::NoResults
        } else {
            Self::HaveResults
        }
    }
}
