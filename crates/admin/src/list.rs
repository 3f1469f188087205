//! The generic paged-list engine.
//!
//! A screen composes a [`PagedListController`] from a [`ListSource`] (how to
//! fetch a page, how to count entities, which icon an item gets) and a
//! [`ListConfig`] (declared filters, sort columns, page size). Every filter,
//! sort or page change re-fetches; nothing is patched in place.
//!
//! Fetch failures never reach the caller. A 401 records
//! [`Navigation::Login`]; anything else leaves the list in its zero state.

use async_trait::async_trait;
use biobank_client::{ClientError, ClientResult};
use biobank_core::error::CoreError;
use biobank_core::filter::{FilterName, FilterSet};
use biobank_core::paging::{DisplayState, PagedResult, PagerOptions, DEFAULT_PAGE_SIZE};
use biobank_core::sort::{SortField, SortOrder};

use crate::error::ListError;

/// The entity-specific half of a list screen.
#[async_trait]
pub trait ListSource: Send + Sync {
    type Item: Send + Sync;

    /// Fetch one page matching `options`.
    async fn get_items(&self, options: &PagerOptions) -> ClientResult<PagedResult<Self::Item>>;

    /// Number of entities that exist, ignoring any filter.
    async fn entity_count(&self) -> ClientResult<u64>;

    /// Icon for an item, derived from its state.
    fn item_icon(&self, item: &Self::Item) -> Result<&'static str, CoreError>;

    /// Called after every filter has been reset, before the re-fetch.
    fn on_filters_cleared(&mut self) {}
}

/// Construction parameters of a list.
#[derive(Debug, Clone)]
pub struct ListConfig {
    pub initial_filters: FilterSet,
    /// Selectable sort columns; the first one is the default sort.
    pub sort_fields: Vec<SortField>,
    pub page_size: u32,
    pub initial_sort: Option<SortOrder>,
}

impl ListConfig {
    pub fn new(initial_filters: FilterSet, sort_fields: Vec<SortField>, page_size: u32) -> Self {
        Self {
            initial_filters,
            sort_fields,
            page_size: if page_size == 0 {
                DEFAULT_PAGE_SIZE
            } else {
                page_size
            },
            initial_sort: None,
        }
    }

    /// Preset a declared filter's value before the first fetch.
    pub fn with_filter_value(
        mut self,
        name: FilterName,
        value: impl Into<String>,
    ) -> Result<Self, ListError> {
        let filter = self
            .initial_filters
            .get_mut(name)
            .ok_or(ListError::FilterNotAssigned(name))?;
        filter.set_value(value);
        Ok(self)
    }

    /// Start sorted by `id` (lower-cased, `-` prefix for descending) instead
    /// of the first declared field.
    pub fn with_sort(mut self, id: &str) -> Result<Self, ListError> {
        let order = SortOrder::resolve(&self.sort_fields, id)
            .ok_or_else(|| ListError::UnknownSortField(id.to_string()))?;
        self.initial_sort = Some(order);
        Ok(self)
    }
}

/// A fetched item with the icon shown next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem<T> {
    pub item: T,
    pub icon: &'static str,
}

/// Where the view should go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Login,
}

/// An issued fetch: the options it was built with and its sequence number.
///
/// Only the reply to the most recently issued ticket is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    pub options: PagerOptions,
}

pub struct PagedListController<S: ListSource> {
    source: S,
    filters: FilterSet,
    sort_fields: Vec<SortField>,
    sort: Option<SortOrder>,
    page: u32,
    limit: u32,
    items: Vec<ListItem<S::Item>>,
    total_count: u64,
    entity_count: u64,
    issued: u64,
    navigation: Option<Navigation>,
}

impl<S: ListSource> PagedListController<S> {
    pub fn new(source: S, config: ListConfig) -> Self {
        let sort = config
            .initial_sort
            .or_else(|| config.sort_fields.first().map(|f| SortOrder::ascending(f.id)));
        Self {
            source,
            filters: config.initial_filters,
            sort_fields: config.sort_fields,
            sort,
            page: 1,
            limit: config.page_size,
            items: Vec::new(),
            total_count: 0,
            entity_count: 0,
            issued: 0,
            navigation: None,
        }
    }

    /// Count the entities that exist, then fetch the first page.
    pub async fn load(&mut self) {
        match self.source.entity_count().await {
            Ok(count) => self.entity_count = count,
            Err(err) => {
                self.entity_count = 0;
                self.record_failure(&err);
            }
        }
        self.refresh().await;
    }

    /// Start updating a declared filter. Fails for a filter the list's
    /// configuration never declared.
    pub fn update_search_filter(
        &mut self,
        name: FilterName,
    ) -> Result<SearchFilterUpdate<'_, S>, ListError> {
        if !self.filters.contains(name) {
            return Err(ListError::FilterNotAssigned(name));
        }
        Ok(SearchFilterUpdate {
            controller: self,
            name,
        })
    }

    /// Fetch `page`. Bounds are the server's concern.
    pub async fn page_changed(&mut self, page: u32) {
        self.page = page;
        self.refresh().await;
    }

    pub async fn sort_field_selected(&mut self, field_id: &str) -> Result<(), ListError> {
        let order = SortOrder::resolve(&self.sort_fields, field_id)
            .ok_or_else(|| ListError::UnknownSortField(field_id.to_string()))?;
        self.sort = Some(order);
        self.page = 1;
        self.refresh().await;
        Ok(())
    }

    /// Reset every filter to its empty value and go back to page 1.
    pub async fn filters_cleared(&mut self) {
        self.filters.clear_all();
        self.page = 1;
        self.source.on_filters_cleared();
        self.refresh().await;
    }

    /// Re-fetch with the current options.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_fetch();
        let reply = self.source.get_items(&ticket.options).await;
        self.apply_reply(ticket, reply);
    }

    /// Issue a new fetch ticket. Any ticket issued earlier becomes stale.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        FetchTicket {
            seq: self.issued,
            options: self.pager_options(),
        }
    }

    /// Apply the reply to `ticket`. Returns `false` if the ticket was stale
    /// and the reply was dropped.
    pub fn apply_reply(
        &mut self,
        ticket: FetchTicket,
        reply: ClientResult<PagedResult<S::Item>>,
    ) -> bool {
        if ticket.seq != self.issued {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.issued,
                "Discarding out-of-order list reply"
            );
            return false;
        }

        match reply.and_then(|page| self.annotate(page)) {
            Ok((items, total)) => {
                self.items = items;
                self.total_count = total;
            }
            Err(err) => self.record_failure(&err),
        }
        true
    }

    fn annotate(
        &self,
        page: PagedResult<S::Item>,
    ) -> ClientResult<(Vec<ListItem<S::Item>>, u64)> {
        let total = page.total;
        let items = page
            .items
            .into_iter()
            .map(|item| {
                let icon = self.source.item_icon(&item)?;
                Ok(ListItem { item, icon })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;
        Ok((items, total))
    }

    fn record_failure(&mut self, err: &ClientError) {
        self.items.clear();
        self.total_count = 0;
        if err.is_unauthorized() {
            self.navigation = Some(Navigation::Login);
        } else {
            tracing::warn!(error = %err, "List fetch failed, showing empty list");
        }
    }

    /// The options the next fetch would use.
    pub fn pager_options(&self) -> PagerOptions {
        PagerOptions {
            filter: self.filters.to_filter_string(),
            sort: self.sort,
            page: self.page,
            limit: self.limit,
        }
    }

    pub fn display_state(&self) -> DisplayState {
        DisplayState::compute(self.entity_count, self.total_count)
    }

    /// Take the pending navigation request, if any.
    pub fn take_navigation(&mut self) -> Option<Navigation> {
        self.navigation.take()
    }

    pub fn items(&self) -> &[ListItem<S::Item>] {
        &self.items
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn entity_count(&self) -> u64 {
        self.entity_count
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn sort(&self) -> Option<SortOrder> {
        self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

/// A pending update of one declared filter, see
/// [`PagedListController::update_search_filter`].
pub struct SearchFilterUpdate<'a, S: ListSource> {
    controller: &'a mut PagedListController<S>,
    name: FilterName,
}

impl<S: ListSource> SearchFilterUpdate<'_, S> {
    /// Set the filter's value, go back to page 1 and re-fetch.
    pub async fn set(self, value: impl Into<String>) {
        if let Some(filter) = self.controller.filters.get_mut(self.name) {
            filter.set_value(value);
        }
        self.controller.page = 1;
        self.controller.refresh().await;
    }
}
