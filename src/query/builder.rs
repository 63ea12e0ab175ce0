// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query accumulator.
//!
//! [`SearchQuery`] collects filter entries and model restrictions
//! imperatively over one request/response cycle, then projects them into
//! the engine grammar via [`build_query`](SearchQuery::build_query).

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CompilerConfig;
use crate::filter::Filter;

use super::translator::QueryTranslator;

/// How a filter entry combines with the entries before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Connector {
    #[default]
    And,
    Or,
}

impl Connector {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// A filter clause as added to a query, tagged with its connector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterEntry {
    pub filter: Filter,
    pub connector: Connector,
}

/// Accumulates filters and model restrictions for one search request.
///
/// Entries combine left-to-right with positional folding; there is no
/// precedence parsing. The built string is memoized until the next
/// mutation, so repeated [`build_query`](SearchQuery::build_query) calls
/// are cheap and always identical.
///
/// A `SearchQuery` is exclusively owned by its caller; it provides no
/// internal synchronization.
///
/// # Example
///
/// ```
/// use query_compiler::{Connector, Filter, SearchQuery};
///
/// let mut query = SearchQuery::new();
/// query.add_filter(Filter::parse("content", "why").unwrap(), Connector::And);
/// query.add_filter(Filter::parse("content", "hello").unwrap(), Connector::Or);
/// query.add_filter(Filter::parse("content", "world").unwrap().negate(), Connector::And);
///
/// assert_eq!(query.build_query(), "((why OR hello) AND NOT (world))");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    config: CompilerConfig,
    filters: Vec<FilterEntry>,
    models: Vec<String>,
    compiled: OnceLock<String>,
}

impl SearchQuery {
    /// Create an empty query with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CompilerConfig::default())
    }

    /// Create an empty query with explicit reserved field names.
    pub fn with_config(config: CompilerConfig) -> Self {
        Self {
            config,
            filters: Vec::new(),
            models: Vec::new(),
            compiled: OnceLock::new(),
        }
    }

    /// Append a filter entry.
    ///
    /// The connector says how this entry combines with the entries before
    /// it; the first entry's connector is ignored at render time.
    pub fn add_filter(&mut self, filter: Filter, connector: Connector) {
        self.filters.push(FilterEntry { filter, connector });
        self.compiled = OnceLock::new();
    }

    /// Append a model restriction by its `app_label.model_name` identifier.
    ///
    /// The identifier is lowercased. Append-only: duplicates are kept and
    /// render twice, in insertion order.
    pub fn add_model(&mut self, type_identifier: impl Into<String>) {
        self.models.push(type_identifier.into().to_lowercase());
        self.compiled = OnceLock::new();
    }

    /// Render the accumulated state into the engine grammar.
    ///
    /// Pure projection: repeated calls without mutation yield the same
    /// string. An empty query renders as the match-all token `*`.
    pub fn build_query(&self) -> String {
        self.compiled
            .get_or_init(|| {
                let compiled = QueryTranslator::translate(self);
                debug!(
                    query = %compiled,
                    filters = self.filters.len(),
                    models = self.models.len(),
                    "compiled search query"
                );
                compiled
            })
            .clone()
    }

    /// Accumulated filter entries, in insertion order.
    pub fn filters(&self) -> &[FilterEntry] {
        &self.filters
    }

    /// Accumulated model restrictions, in insertion order.
    pub fn models(&self) -> &[String] {
        &self.models
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }
}
