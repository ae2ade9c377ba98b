//! The Query Descriptor: the canonical, validated representation of a search
//! request.
//!
//! A [`FindQuery`] is built by the translator (see [`crate::translate`]) or
//! assembled with the fluent methods, handed to a search executor, and —
//! aside from the derived next-page copy — never mutated afterwards.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Page size applied when `take` is absent or unparsable.
///
/// The single consistent default across every translation entry point.
pub const DEFAULT_TAKE: u64 = 10;

/// A single field-level filter condition.
///
/// Wire shape: a value that is a single-key object `{"like": "<substring>"}`
/// is a partial match; any other shape is an exact match.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Exact match against the given value.
    Eq(Value),
    /// Partial match: the field contains the substring. Compiled by the
    /// executor into a wildcard-wrapped `LIKE` pattern.
    Like(String),
}

impl Predicate {
    pub fn eq(value: impl Into<Value>) -> Self {
        Predicate::Eq(value.into())
    }

    pub fn like(substring: impl Into<String>) -> Self {
        Predicate::Like(substring.into())
    }

    /// Interpret a JSON value as a predicate.
    pub fn from_value(value: Value) -> Self {
        if let Value::Object(map) = &value {
            if map.len() == 1 {
                if let Some(Value::String(substring)) = map.get("like") {
                    return Predicate::Like(substring.clone());
                }
            }
        }
        Predicate::Eq(value)
    }
}

impl Serialize for Predicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Predicate::Eq(value) => value.serialize(serializer),
            Predicate::Like(substring) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("like", substring)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Predicate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Predicate::from_value(Value::deserialize(deserializer)?))
    }
}

/// Sort direction, serialized TypeORM-style as `"ASC"`/`"DESC"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "ASC", alias = "asc")]
    Asc,
    #[serde(rename = "DESC", alias = "desc")]
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Ordered mapping from field path to [`Predicate`].
///
/// Serialized as a JSON object; entry order follows the source document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filters(Vec<(String, Predicate)>);

impl Filters {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn push(&mut self, field: impl Into<String>, predicate: Predicate) {
        self.0.push((field.into(), predicate));
    }

    pub fn get(&self, field: &str) -> Option<&Predicate> {
        self.0
            .iter()
            .find_map(|(f, p)| (f == field).then_some(p))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, Predicate)> {
        self.0.iter()
    }
}

impl FromIterator<(String, Predicate)> for Filters {
    fn from_iter<I: IntoIterator<Item = (String, Predicate)>>(iter: I) -> Self {
        Filters(iter.into_iter().collect())
    }
}

impl Serialize for Filters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, predicate) in &self.0 {
            map.serialize_entry(field, predicate)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Filters {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct FiltersVisitor;

        impl<'de> Visitor<'de> for FiltersVisitor {
            type Value = Filters;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map from field path to predicate")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Filters, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((field, predicate)) = access.next_entry::<String, Predicate>()? {
                    entries.push((field, predicate));
                }
                Ok(Filters(entries))
            }
        }

        deserializer.deserialize_map(FiltersVisitor)
    }
}

/// Ordered mapping from field path to [`SortDirection`].
///
/// The first entry is the primary sort; later entries break ties.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBy(Vec<(String, SortDirection)>);

impl OrderBy {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn push(&mut self, field: impl Into<String>, direction: SortDirection) {
        self.0.push((field.into(), direction));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, SortDirection)> {
        self.0.iter()
    }
}

impl FromIterator<(String, SortDirection)> for OrderBy {
    fn from_iter<I: IntoIterator<Item = (String, SortDirection)>>(iter: I) -> Self {
        OrderBy(iter.into_iter().collect())
    }
}

impl Serialize for OrderBy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (field, direction) in &self.0 {
            map.serialize_entry(field, direction)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OrderBy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderByVisitor;

        impl<'de> Visitor<'de> for OrderByVisitor {
            type Value = OrderBy;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a map from field path to \"ASC\" or \"DESC\"")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<OrderBy, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((field, direction)) = access.next_entry::<String, SortDirection>()? {
                    entries.push((field, direction));
                }
                Ok(OrderBy(entries))
            }
        }

        deserializer.deserialize_map(OrderByVisitor)
    }
}

/// The Query Descriptor: filters, relations to join, ordering, and the
/// pagination window.
///
/// `skip == 0 && take == 0` is the "fetch everything" escape hatch — the
/// executor applies no window at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FindQuery {
    #[serde(
        rename = "where",
        alias = "filters",
        default,
        skip_serializing_if = "Filters::is_empty"
    )]
    pub filters: Filters,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<String>,
    #[serde(
        rename = "order",
        alias = "orderBy",
        default,
        skip_serializing_if = "OrderBy::is_empty"
    )]
    pub order_by: OrderBy,
    #[serde(default, deserialize_with = "de_skip")]
    pub skip: u64,
    #[serde(default = "default_take", deserialize_with = "de_take")]
    pub take: u64,
}

impl Default for FindQuery {
    fn default() -> Self {
        Self {
            filters: Filters::default(),
            relations: Vec::new(),
            order_by: OrderBy::default(),
            skip: 0,
            take: DEFAULT_TAKE,
        }
    }
}

impl FindQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(field, Predicate::eq(value));
        self
    }

    pub fn filter_like(mut self, field: impl Into<String>, substring: impl Into<String>) -> Self {
        self.filters.push(field, Predicate::like(substring));
        self
    }

    pub fn relation(mut self, name: impl Into<String>) -> Self {
        self.relations.push(name.into());
        self
    }

    pub fn order(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.order_by.push(field, direction);
        self
    }

    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    pub fn take(mut self, take: u64) -> Self {
        self.take = take;
        self
    }

    /// True when no pagination window applies (`skip == 0 && take == 0`).
    pub fn is_unbounded(&self) -> bool {
        self.skip == 0 && self.take == 0
    }
}

fn default_take() -> u64 {
    DEFAULT_TAKE
}

/// Coerce a loosely-typed JSON value to `u64`.
///
/// Accepts numbers and numeric strings; anything else is `None`.
fn coerce_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn de_skip<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_u64(&value).unwrap_or(0))
}

fn de_take<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_u64(&value).unwrap_or(DEFAULT_TAKE))
}
