//! Configuration for the `Aggregator`.

/// Policy for a filter id that does not resolve to an existing entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterFallback {
    /// Surface the `NotFound` error to the caller
    #[default]
    Error,
    /// Drop the unresolvable filter and aggregate unfiltered
    IgnoreFilter,
}

/// Configuration for the `Aggregator`
#[derive(Debug, Clone)]
pub struct AggregateConfig {
    /// Maximum number of matching records an aggregation reads.
    /// `None` disables the cap for correctness-sensitive callers.
    pub record_cap: Option<usize>,
    /// Number of diseases kept by the prevalence aggregation.
    /// `None` keeps every disease (raw query mode).
    pub top_diseases: Option<usize>,
    /// What to do when a location or disease filter id does not resolve
    pub missing_entity: FilterFallback,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            record_cap: Some(1000),
            top_diseases: Some(10),
            missing_entity: FilterFallback::Error,
        }
    }
}
