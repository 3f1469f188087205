//! List filter grammar.
//!
//! A list endpoint receives a single `filter` query parameter built from
//! semicolon-joined clauses of the form `field:operator:value`, e.g.
//! `name:like:foo;state::enabled`. Filters with an empty value contribute no
//! clause at all.

use std::fmt;

/// Value of a state filter that matches every state.
pub const ALL_STATES: &str = "all";

/// Comparison operator of a single filter clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Like,
    Eq,
    Ne,
    /// Exact / enumerated match, rendered with an empty operator (`state::enabled`).
    Exact,
}

impl FilterOp {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Eq => "eq",
            Self::Ne => "ne",
            Self::Exact => "",
        }
    }
}

/// The filters a list screen may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterName {
    Name,
    State,
    Email,
}

impl FilterName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "nameFilter",
            Self::State => "stateFilter",
            Self::Email => "emailFilter",
        }
    }
}

impl fmt::Display for FilterName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single filter: the field it targets, its operator and its current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    field: &'static str,
    op: FilterOp,
    value: String,
    empty_value: String,
}

impl SearchFilter {
    pub fn new(field: &'static str, op: FilterOp) -> Self {
        Self {
            field,
            op,
            value: String::new(),
            empty_value: String::new(),
        }
    }

    /// Substring match on `name`.
    pub fn name() -> Self {
        Self::new("name", FilterOp::Like)
    }

    /// Substring match on `email`.
    pub fn email() -> Self {
        Self::new("email", FilterOp::Like)
    }

    /// Exact match on `state`; the value `all` means "no filter".
    pub fn state() -> Self {
        Self::new("state", FilterOp::Exact).with_empty_value(ALL_STATES)
    }

    /// Declare the value this filter resets to and treats as "unset".
    pub fn with_empty_value(mut self, empty: &str) -> Self {
        self.empty_value = empty.to_string();
        self.value = empty.to_string();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clone_from(&self.empty_value);
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty() || self.value == self.empty_value
    }

    /// The `field:op:value` clause, or `None` for an unset filter.
    pub fn clause(&self) -> Option<String> {
        if self.is_empty() {
            None
        } else {
            Some(format!("{}:{}:{}", self.field, self.op.as_str(), self.value))
        }
    }
}

/// Named filters in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    filters: Vec<(FilterName, SearchFilter)>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a filter. Newly added filters go last.
    pub fn with(mut self, name: FilterName, filter: SearchFilter) -> Self {
        match self.get_mut(name) {
            Some(existing) => *existing = filter,
            None => self.filters.push((name, filter)),
        }
        self
    }

    pub fn contains(&self, name: FilterName) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: FilterName) -> Option<&SearchFilter> {
        self.filters.iter().find(|(n, _)| *n == name).map(|(_, f)| f)
    }

    pub fn get_mut(&mut self, name: FilterName) -> Option<&mut SearchFilter> {
        self.filters
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, f)| f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterName, &SearchFilter)> {
        self.filters.iter().map(|(n, f)| (*n, f))
    }

    /// Reset every filter to its empty value.
    pub fn clear_all(&mut self) {
        for (_, filter) in &mut self.filters {
            filter.clear();
        }
    }

    /// Join the clauses of all non-empty filters with `;`.
    ///
    /// Returns `None` when every filter is empty, so no `filter` parameter is
    /// sent.
    pub fn to_filter_string(&self) -> Option<String> {
        let clauses: Vec<String> = self.filters.iter().filter_map(|(_, f)| f.clause()).collect();
        if clauses.is_empty() {
            None
        } else {
            Some(clauses.join(";"))
        }
    }
}
