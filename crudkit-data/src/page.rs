use crate::find::FindQuery;
use serde::Serialize;

/// One window of matching entities plus the total match count and the
/// derived next-page descriptor.
#[derive(Debug, Clone, Serialize)]
pub struct FindResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    #[serde(rename = "nextQuery")]
    pub next_query: Option<FindQuery>,
}

impl<T> FindResponse<T> {
    /// Assemble the envelope, computing the next-page descriptor from the
    /// executed query and the total count.
    pub fn new(data: Vec<T>, query: &FindQuery, total: u64) -> Self {
        Self {
            data,
            total,
            next_query: next_query(query, total),
        }
    }
}

/// Compute the next-page descriptor.
///
/// `remaining = total - (skip + take)`; when nothing remains there is no next
/// page. An unbounded query (`skip == 0 && take == 0`) returned everything,
/// so it never has a next page. The window arithmetic saturates: a window
/// whose end lies past `u64::MAX` has consumed every possible row and never
/// has a next page either. Filters, relations, and ordering carry over
/// unchanged; serialization omits an empty `where`.
pub fn next_query(query: &FindQuery, total: u64) -> Option<FindQuery> {
    if query.is_unbounded() {
        return None;
    }
    let consumed = query.skip.saturating_add(query.take);
    if total <= consumed {
        return None;
    }
    let mut next = query.clone();
    next.skip = consumed;
    next.take = query.take.min(total - consumed);
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_of_three_pages() {
        // Scenario: 12 entities, take=5, skip=0.
        let query = FindQuery::new().take(5);
        let next = next_query(&query, 12).unwrap();
        assert_eq!(next.skip, 5);
        assert_eq!(next.take, 5);
    }

    #[test]
    fn short_final_page() {
        let query = FindQuery::new().skip(5).take(5);
        let next = next_query(&query, 12).unwrap();
        assert_eq!(next.skip, 10);
        assert_eq!(next.take, 2);
    }

    #[test]
    fn last_page_has_no_next() {
        let query = FindQuery::new().skip(10).take(5);
        assert!(next_query(&query, 12).is_none());
    }

    #[test]
    fn exact_boundary_has_no_next() {
        let query = FindQuery::new().skip(5).take(5);
        assert!(next_query(&query, 10).is_none());
    }

    #[test]
    fn window_past_u64_range_has_no_next() {
        let query = FindQuery::new().skip(u64::MAX - 3).take(5);
        assert!(next_query(&query, 12).is_none());
    }

    #[test]
    fn unbounded_query_has_no_next() {
        let query = FindQuery::new().take(0);
        assert!(next_query(&query, 12).is_none());
    }

    #[test]
    fn filters_carry_over_but_empty_where_is_omitted() {
        let filtered = FindQuery::new().filter_like("name", "an").take(5);
        let next = next_query(&filtered, 12).unwrap();
        assert_eq!(next.filters, filtered.filters);

        let unfiltered = FindQuery::new().take(5);
        let json = serde_json::to_value(next_query(&unfiltered, 12).unwrap()).unwrap();
        assert!(json.get("where").is_none());
        assert_eq!(json["skip"], 5);
        assert_eq!(json["take"], 5);
    }

    #[test]
    fn envelope_embeds_next_query() {
        let query = FindQuery::new().take(5);
        let response = FindResponse::new(vec![1, 2, 3, 4, 5], &query, 12);
        assert_eq!(response.total, 12);
        assert_eq!(response.data.len(), 5);
        let next = response.next_query.unwrap();
        assert_eq!((next.skip, next.take), (5, 5));
    }
}
