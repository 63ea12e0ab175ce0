//! Property-based tests (fuzzing) for compiler robustness.
//!
//! Uses proptest to generate random/hostile inputs and verify the compiler
//! never panics, only returns clean errors or total-function output.
//!
//! Run with: `cargo test --test proptest_fuzz`

use proptest::prelude::*;
use time::PrimitiveDateTime;

use query_compiler::{Connector, Filter, FilterValue, Lookup, QueryTranslator, SearchQuery};

// =============================================================================
// Strategies for generating test data
// =============================================================================

/// Generate a scalar filter value (text or integer)
fn scalar_value_strategy() -> impl Strategy<Value = FilterValue> {
    prop_oneof![
        ".*".prop_map(FilterValue::from),
        any::<i64>().prop_map(FilterValue::from),
    ]
}

/// Generate an arbitrary filter value, including sequences and datetimes
fn arbitrary_value_strategy() -> impl Strategy<Value = FilterValue> {
    prop_oneof![
        scalar_value_strategy(),
        datetime_strategy().prop_map(FilterValue::from),
        prop::collection::vec(scalar_value_strategy(), 0..6).prop_map(FilterValue::List),
    ]
}

/// Generate a valid calendar datetime (day capped at 28 to stay valid in
/// every month)
fn datetime_strategy() -> impl Strategy<Value = PrimitiveDateTime> {
    (1i32..=9999, 1u8..=12, 1u8..=28, 0u8..24, 0u8..60, 0u8..60).prop_map(
        |(year, month, day, hour, minute, second)| {
            let month = time::Month::try_from(month).expect("month in range");
            let date = time::Date::from_calendar_date(year, month, day).expect("valid date");
            let clock = time::Time::from_hms(hour, minute, second).expect("valid time");
            PrimitiveDateTime::new(date, clock)
        },
    )
}

// =============================================================================
// Sanitization Fuzz Tests
// =============================================================================

proptest! {
    /// clean is total: arbitrary input, including control characters,
    /// never panics
    #[test]
    fn fuzz_clean_arbitrary_input(input in ".*") {
        let _ = QueryTranslator::clean(&input);
    }

    /// clean is the identity, and idempotent, on plain single-spaced words
    #[test]
    fn prop_clean_plain_text_identity(words in prop::collection::vec("[a-z0-9]{1,12}", 1..8)) {
        let text = words.join(" ");
        let cleaned = QueryTranslator::clean(&text);
        prop_assert_eq!(&cleaned, &text);
        prop_assert_eq!(QueryTranslator::clean(&cleaned), text);
    }

    /// Escaped output never contains a bare reserved keyword token
    #[test]
    fn prop_clean_lowercases_keywords(words in prop::collection::vec("(AND|OR|NOT|[a-z]{1,8})", 1..8)) {
        let cleaned = QueryTranslator::clean(&words.join(" "));
        for token in cleaned.split_whitespace() {
            prop_assert!(token != "AND" && token != "OR" && token != "NOT");
        }
    }
}

// =============================================================================
// Construction Fuzz Tests
// =============================================================================

proptest! {
    /// Filter::parse on arbitrary lookup keys returns Ok/Err, never panics
    #[test]
    fn fuzz_parse_arbitrary_key(key in ".*", value in scalar_value_strategy()) {
        let _ = Filter::parse(&key, value);
    }

    /// Filter::parse on arbitrary values returns Ok/Err, never panics
    #[test]
    fn fuzz_parse_arbitrary_value(
        key in "[a-z_]{1,12}(__(exact|gt|gte|lt|lte|in|startswith))?",
        value in arbitrary_value_strategy(),
    ) {
        let _ = Filter::parse(&key, value);
    }
}

// =============================================================================
// Compilation Determinism Tests
// =============================================================================

proptest! {
    /// build_query is repeatable: the memoized call and a rebuilt clone
    /// agree
    #[test]
    fn prop_build_query_repeatable(
        words in prop::collection::vec("[a-z]{1,10}", 1..6),
        use_or in any::<bool>(),
        negate in any::<bool>(),
    ) {
        let connector = if use_or { Connector::Or } else { Connector::And };
        let mut query = SearchQuery::new();
        for word in &words {
            let mut filter = Filter::parse("content", word.as_str()).expect("valid filter");
            if negate {
                filter = filter.negate();
            }
            query.add_filter(filter, connector);
        }
        let first = query.build_query();
        prop_assert_eq!(query.build_query(), first.clone());
        // A structural clone renders identically
        prop_assert_eq!(query.clone().build_query(), first);
    }

    /// Compilation is total over valid filters: arbitrary accumulated
    /// state renders without panicking
    #[test]
    fn fuzz_build_query_arbitrary_filters(
        entries in prop::collection::vec(
            (
                "[a-z_]{1,10}",
                arbitrary_value_strategy(),
                any::<bool>(),
                any::<bool>(),
            ),
            0..8,
        ),
        models in prop::collection::vec("[a-z]{1,8}\\.[a-z]{1,8}", 0..3),
    ) {
        let mut query = SearchQuery::new();
        for (field, value, use_or, negated) in entries {
            // Only valid filters reach a query; construction errors are
            // the caller's problem
            if let Ok(filter) = Filter::new(field, Lookup::Exact, value) {
                let filter = if negated { filter.negate() } else { filter };
                let connector = if use_or { Connector::Or } else { Connector::And };
                query.add_filter(filter, connector);
            }
        }
        for model in models {
            query.add_model(model);
        }
        let _ = query.build_query();
    }

    /// Datetime tokens are always exactly 14 ASCII digits
    #[test]
    fn prop_datetime_token_shape(dt in datetime_strategy()) {
        let mut query = SearchQuery::new();
        query.add_filter(
            Filter::parse("pub_date", dt).expect("valid filter"),
            Connector::And,
        );
        let built = query.build_query();
        let token = built.strip_prefix("pub_date:").expect("fielded rendering");
        prop_assert_eq!(token.len(), 14);
        prop_assert!(token.bytes().all(|b| b.is_ascii_digit()));
    }
}
