//! The Query Translator: untyped parameter bags in, [`FindQuery`] out.
//!
//! Tolerant by design — an unparsable `skip`/`take` falls back to its
//! default, unrecognized keys are ignored — except for malformed JSON in
//! `where`/`order`, which is a client error and never partially applied.

use crate::error::TranslateError;
use crate::find::{FindQuery, Filters, OrderBy, DEFAULT_TAKE};

impl FindQuery {
    /// Translate an HTTP query-string parameter bag.
    ///
    /// Recognized keys: `where`/`filters` (JSON object), `relations`
    /// (bracket-delimited comma-separated list), `order`/`orderBy` (JSON
    /// object), `skip`, `take`. Anything else is ignored.
    pub fn from_params<I, K, V>(params: I) -> Result<Self, TranslateError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = FindQuery::default();
        for (key, value) in params {
            let value = value.as_ref();
            match key.as_ref() {
                "where" | "filters" => {
                    query.filters = serde_json::from_str::<Filters>(value)
                        .map_err(TranslateError::MalformedFilter)?;
                }
                "relations" => {
                    query.relations = parse_relation_list(value);
                }
                "order" | "orderBy" => {
                    query.order_by = serde_json::from_str::<OrderBy>(value)
                        .map_err(TranslateError::MalformedOrder)?;
                }
                "skip" => {
                    query.skip = value.trim().parse().unwrap_or(0);
                }
                "take" => {
                    query.take = value.trim().parse().unwrap_or(DEFAULT_TAKE);
                }
                _ => {}
            }
        }
        Ok(query)
    }

    /// Translate a whole query document arriving as a JSON string (the single
    /// `query` parameter entry point).
    pub fn from_json_str(raw: &str) -> Result<Self, TranslateError> {
        serde_json::from_str(raw).map_err(TranslateError::MalformedQuery)
    }

    /// Translate a pre-parsed JSON document.
    pub fn from_value(value: serde_json::Value) -> Result<Self, TranslateError> {
        serde_json::from_value(value).map_err(TranslateError::MalformedQuery)
    }
}

/// Parse a `[a,b,c]`-shaped relation list.
///
/// Delimiter-aware: surrounding brackets are stripped only when present,
/// items are trimmed, and empty items dropped. (The system this replaces
/// sliced off the first and last character unconditionally, mangling
/// non-bracketed input.)
pub fn parse_relation_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);
    inner
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::find::{Predicate, SortDirection};
    use serde_json::json;

    fn params(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn translates_all_recognized_keys() {
        let query = FindQuery::from_params(params(&[
            ("where", r#"{"name":{"like":"an"},"city":"Quito"}"#),
            ("relations", "[orders,address]"),
            ("order", r#"{"name":"ASC"}"#),
            ("skip", "5"),
            ("take", "20"),
        ]))
        .unwrap();

        assert_eq!(query.filters.get("name"), Some(&Predicate::Like("an".into())));
        assert_eq!(query.filters.get("city"), Some(&Predicate::Eq(json!("Quito"))));
        assert_eq!(query.relations, vec!["orders", "address"]);
        let order: Vec<_> = query.order_by.iter().cloned().collect();
        assert_eq!(order, vec![("name".to_string(), SortDirection::Asc)]);
        assert_eq!(query.skip, 5);
        assert_eq!(query.take, 20);
    }

    #[test]
    fn empty_bag_yields_defaults() {
        let query = FindQuery::from_params(params(&[])).unwrap();
        assert_eq!(query, FindQuery::default());
        assert_eq!(query.take, DEFAULT_TAKE);
    }

    #[test]
    fn unrecognized_keys_are_ignored() {
        let query =
            FindQuery::from_params(params(&[("foo", "bar"), ("skip", "3")])).unwrap();
        assert_eq!(query.skip, 3);
        assert!(query.filters.is_empty());
    }

    #[test]
    fn unparsable_skip_take_fall_back() {
        let query = FindQuery::from_params(params(&[("skip", "abc"), ("take", "-1")])).unwrap();
        assert_eq!(query.skip, 0);
        assert_eq!(query.take, DEFAULT_TAKE);
    }

    #[test]
    fn malformed_where_is_a_client_error() {
        let err = FindQuery::from_params(params(&[("where", "{not json")])).unwrap_err();
        assert!(matches!(err, TranslateError::MalformedFilter(_)));
    }

    #[test]
    fn malformed_order_is_a_client_error() {
        let err =
            FindQuery::from_params(params(&[("order", r#"{"name":"SIDEWAYS"}"#)])).unwrap_err();
        assert!(matches!(err, TranslateError::MalformedOrder(_)));
    }

    #[test]
    fn relation_list_strips_brackets_and_splits() {
        assert_eq!(parse_relation_list("[orders,address]"), vec!["orders", "address"]);
    }

    #[test]
    fn relation_list_without_brackets_is_not_mangled() {
        assert_eq!(parse_relation_list("orders,address"), vec!["orders", "address"]);
    }

    #[test]
    fn relation_list_trims_and_drops_empties() {
        assert_eq!(parse_relation_list("[ orders , ,address ]"), vec!["orders", "address"]);
        assert!(parse_relation_list("[]").is_empty());
        assert!(parse_relation_list("").is_empty());
    }

    #[test]
    fn json_document_entry_point() {
        let query =
            FindQuery::from_json_str(r#"{"where":{"name":"Ana"},"skip":0,"take":10}"#).unwrap();
        assert_eq!(query.filters.get("name"), Some(&Predicate::Eq(json!("Ana"))));

        let err = FindQuery::from_json_str("{oops").unwrap_err();
        assert!(matches!(err, TranslateError::MalformedQuery(_)));
    }
}
