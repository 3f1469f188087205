use biobank_core::filter::FilterName;

/// Misuse of a list controller by its caller.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    /// The filter was not declared in the list's configuration.
    #[error("filter never assigned: {0}")]
    FilterNotAssigned(FilterName),

    #[error("unknown sort field: {0}")]
    UnknownSortField(String),
}
