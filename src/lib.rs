//! # Query Compiler
//!
//! Compiles structured field filters into a search engine's boolean query
//! grammar.
//!
//! ## Architecture
//!
//! The compiler is a pure string-transformation pipeline; it never executes
//! a search itself:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Clause Model                          │
//! │  • Filter parsed from an ORM-style lookup key               │
//! │  • Validated at construction (lookup vs. value kind)        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!               add_filter(filter, connector) / add_model(id)
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  SearchQuery (accumulator)                  │
//! │  • Filter entries folded left-to-right, no precedence       │
//! │  • Model restrictions scoped via the document-type field    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                        build_query()
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      QueryTranslator                        │
//! │  • Per-lookup rendering (ranges, prefixes, membership)      │
//! │  • clean() escaping for free text                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//!            query string → the engine's query parser
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use query_compiler::{Connector, Filter, SearchQuery};
//!
//! let mut query = SearchQuery::new();
//!
//! // Unfielded text search plus a prefix match
//! query.add_filter(Filter::parse("content", "why").expect("valid filter"), Connector::And);
//! query.add_filter(
//!     Filter::parse("title__startswith", "haystack").expect("valid filter"),
//!     Connector::And,
//! );
//!
//! assert_eq!(query.build_query(), "(why AND title:haystack*)");
//!
//! // Restrict to declared document types
//! query.add_model("core.MockModel");
//! assert_eq!(
//!     query.build_query(),
//!     "((why AND title:haystack*)) AND (django_ct:core.mockmodel)"
//! );
//! ```
//!
//! ## Features
//!
//! - **Lookup keys**: `field__lookup` parsing with `exact` as the default
//! - **Boolean composition**: AND/OR connectors with positional left-folding
//! - **Negation**: render-time `NOT ( … )` wrapping, faithful to the engine
//!   grammar's strict-inequality quirks
//! - **Escaping**: total `clean()` for free text (reserved words and
//!   character sequences)
//! - **Model restrictions**: document-type disjunction over a reserved tag
//!   field
//! - **Memoized builds**: `build_query()` caches until the next mutation
//!
//! ## Modules
//!
//! - [`config`]: reserved field names used by the renderer
//! - [`filter`]: the clause model and its validation
//! - [`query`]: the accumulator and the grammar renderer

pub mod config;
pub mod filter;
pub mod query;

pub use config::CompilerConfig;
pub use filter::{Filter, FilterError, FilterValue, Lookup};
pub use query::{Connector, FilterEntry, QueryTranslator, SearchQuery};
