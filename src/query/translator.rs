//! Query Translator
//!
//! Renders accumulated filter state into the engine's boolean query
//! grammar.
//!
//! # Grammar Produced
//!
//! ```text
//! field:value               - Exact match
//! field:value*              - Prefix match
//! field:..value             - Range, open lower bound
//! field:value..*            - Range, open upper bound
//! NOT field:..value         - Strictly greater (no strict range syntax)
//! NOT field:value..*        - Strictly less
//! (field:a OR field:b)      - Membership
//! field:[a, b, c]           - Sequence literal
//! "two words"               - Phrase
//! (a AND b), NOT (a)        - Boolean composition
//! ```

use crate::config::CompilerConfig;
use crate::filter::{Filter, FilterValue, Lookup};
use time::macros::format_description;
use time::PrimitiveDateTime;

use super::builder::{Connector, SearchQuery};

/// Rendered for a query with no filters and no model restrictions.
const MATCH_ALL: &str = "*";

/// Boolean keywords the engine parser reserves. Lowercased by [`clean`]
/// when they appear as standalone tokens in free text.
///
/// [`clean`]: QueryTranslator::clean
const RESERVED_WORDS: [&str; 3] = ["AND", "OR", "NOT"];

/// Character sequences the engine parser reserves, escaped by [`clean`].
/// The backslash must come first so inserted escapes are not themselves
/// re-escaped. Lone `&` and `|` are not reserved, only the doubled forms.
///
/// [`clean`]: QueryTranslator::clean
const RESERVED_SEQUENCES: [&str; 18] = [
    "\\", "+", "-", "&&", "||", "!", "(", ")", "{", "}", "[", "]", "^", "\"", "~", "*", "?", ":",
];

/// Stateless renderer from accumulated query state to the engine grammar.
pub struct QueryTranslator;

impl QueryTranslator {
    /// Render a [`SearchQuery`] into a single query string.
    ///
    /// Filter entries fold left to right into one growing parenthesized
    /// group: the first entry seeds the accumulator (its connector is
    /// ignored), entries sharing the previous connector extend the group
    /// flat (`a AND b AND c`), and a connector change closes the group
    /// and starts a new one around it (`(a OR b) AND c`). A single entry
    /// renders bare. Model restrictions render as a disjunction over the
    /// document-type field and combine with the filter group via `AND`.
    pub fn translate(query: &SearchQuery) -> String {
        let config = query.config();

        let folded = query.filters().split_first().map(|(first, rest)| {
            let mut acc = Self::render_entry(&first.filter, config);
            let mut group: Option<Connector> = None;
            for entry in rest {
                let term = Self::render_entry(&entry.filter, config);
                match group {
                    Some(current) if current != entry.connector => {
                        acc = format!("({acc}) {} {term}", entry.connector.as_str());
                    }
                    _ => {
                        acc = format!("{acc} {} {term}", entry.connector.as_str());
                    }
                }
                group = Some(entry.connector);
            }
            if rest.is_empty() {
                acc
            } else {
                format!("({acc})")
            }
        });

        let restriction = match query.models() {
            [] => None,
            models => Some(
                models
                    .iter()
                    .map(|model| format!("{}:{model}", config.document_type_field))
                    .collect::<Vec<_>>()
                    .join(" OR "),
            ),
        };

        match (folded, restriction) {
            (None, None) => MATCH_ALL.to_string(),
            (Some(filters), None) => filters,
            (None, Some(models)) => models,
            (Some(filters), Some(models)) => format!("({filters}) AND ({models})"),
        }
    }

    /// Sanitize free text for embedding in a query string.
    ///
    /// Standalone `AND`/`OR`/`NOT` tokens are lowercased (whole-token,
    /// case-sensitive: `NOTe` and `bAND` pass through) and reserved
    /// character sequences are backslash-escaped within each token.
    /// Total: any input, including control characters and the empty
    /// string, cleans without error. Whitespace runs collapse to single
    /// spaces.
    pub fn clean(fragment: &str) -> String {
        let mut words = Vec::new();
        for word in fragment.split_whitespace() {
            let mut word = if RESERVED_WORDS.contains(&word) {
                word.to_lowercase()
            } else {
                word.to_string()
            };
            for sequence in RESERVED_SEQUENCES {
                if word.contains(sequence) {
                    word = word.replace(sequence, &format!("\\{sequence}"));
                }
            }
            words.push(word);
        }
        words.join(" ")
    }

    fn render_entry(filter: &Filter, config: &CompilerConfig) -> String {
        let rendered = Self::render_filter(filter, config);
        if filter.negated {
            // Uniform wrap over whatever the lookup rendered, including
            // the leading NOT that gt/lt carry themselves: a negated gt
            // is NOT (NOT f:..v), never collapsed. The engine parser
            // expects the double wrap.
            format!("NOT ({rendered})")
        } else {
            rendered
        }
    }

    fn render_filter(filter: &Filter, config: &CompilerConfig) -> String {
        let field = filter.field.as_str();
        let unfielded = field == config.content_field;

        match (&filter.lookup, &filter.value) {
            (Lookup::Exact, FilterValue::List(members)) => {
                let list = Self::sequence_literal(members);
                if unfielded {
                    list
                } else {
                    format!("{field}:{list}")
                }
            }
            (Lookup::Exact, value) => {
                let token = Self::scalar_token(value);
                if unfielded {
                    let cleaned = Self::clean(&token);
                    if cleaned.contains(' ') {
                        // Phrase search
                        format!("\"{cleaned}\"")
                    } else {
                        cleaned
                    }
                } else {
                    format!("{field}:{token}")
                }
            }
            // The grammar has no strict range syntax: strict inequalities
            // render as NOT of the complementary closed range.
            (Lookup::Gt, value) => format!("NOT {field}:..{}", Self::scalar_token(value)),
            (Lookup::Lt, value) => format!("NOT {field}:{}..*", Self::scalar_token(value)),
            (Lookup::Gte, value) => format!("{field}:{}..*", Self::scalar_token(value)),
            (Lookup::Lte, value) => format!("{field}:..{}", Self::scalar_token(value)),
            (Lookup::Startswith, value) => format!("{field}:{}*", Self::scalar_token(value)),
            (Lookup::In, FilterValue::List(members)) => {
                if unfielded {
                    Self::sequence_literal(members)
                } else {
                    let alternatives: Vec<String> = members
                        .iter()
                        .map(|member| format!("{field}:{}", Self::scalar_token(member)))
                        .collect();
                    format!("({})", alternatives.join(" OR "))
                }
            }
            // Construction validation keeps `in` sequence-valued; render
            // a one-member set rather than panic if it ever isn't.
            (Lookup::In, value) => format!("({field}:{})", Self::scalar_token(value)),
        }
    }

    fn scalar_token(value: &FilterValue) -> String {
        match value {
            FilterValue::Text(text) => text.clone(),
            FilterValue::Int(n) => n.to_string(),
            FilterValue::DateTime(dt) => Self::datetime_token(dt),
            FilterValue::List(members) => Self::sequence_literal(members),
        }
    }

    fn sequence_literal(members: &[FilterValue]) -> String {
        let items: Vec<String> = members.iter().map(Self::scalar_token).collect();
        format!("[{}]", items.join(", "))
    }

    /// `YYYYMMDDHHMMSS`, zero-padded. Whole-second truncation falls out
    /// of the format: there is no subsecond component.
    fn datetime_token(dt: &PrimitiveDateTime) -> String {
        let format = format_description!("[year][month][day][hour][minute][second]");
        dt.format(format).unwrap_or_default()
    }
}
