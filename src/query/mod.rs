// Copyright (c) 2025-2026 Adrian Robinson. Licensed under the AGPL-3.0.
// See LICENSE file in the project root for full license text.

//! Query Compilation
//!
//! Accumulates filter clauses and model restrictions, then renders them
//! into the engine's boolean query grammar.
//!
//! # Architecture
//!
//! ```text
//! add_filter / add_model
//!     ↓
//! SearchQuery (accumulator)
//!     ↓
//! QueryTranslator → boolean query string
//! ```
//!
//! # Query Language
//!
//! ```text
//! hello                     - Unfielded term (content sentinel)
//! "hello world"             - Phrase (quoted on whitespace)
//! title:haystack            - Field equals
//! title:hay*                - Prefix match
//! pub_date:..20090210015900 - Half-open range, open lower bound
//! title:B..*                - Half-open range, open upper bound
//! NOT author:..david        - Strictly-greater (NOT of the ..V range)
//! (id:1 OR id:2 OR id:3)    - Membership
//! id:[1, 2, 3]              - Sequence literal (sequence-valued exact)
//! a AND b, a OR b, NOT (a)  - Boolean composition
//! django_ct:core.mockmodel  - Document-type restriction
//! ```

mod builder;
mod translator;

pub use builder::{Connector, FilterEntry, SearchQuery};
pub use translator::QueryTranslator;
