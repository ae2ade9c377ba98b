//! Compiles a [`FindQuery`] into parameterized SQL.
//!
//! The base entity is aliased `base`; a bare field path `name` compiles to
//! `base.name`, while a dotted path `orders.total` is taken as
//! relation-qualified. Every identifier is validated against a conservative
//! pattern before it reaches the SQL text; values never are interpolated —
//! they travel as bind parameters.

use crate::entity::{Entity, Relation};
use crate::error::QueryError;
use crate::find::{FindQuery, Predicate, SortDirection};
use serde_json::Value;

/// Alias of the base entity in generated SQL.
pub const BASE_ALIAS: &str = "base";

#[derive(Debug, Clone, Copy)]
pub enum Dialect {
    /// Generic SQL using `?` placeholders (default).
    Generic,
    /// SQLite-style `?` placeholders.
    Sqlite,
    /// MySQL-style `?` placeholders.
    MySql,
    /// Postgres-style `$1, $2, ...` placeholders.
    Postgres,
}

impl Dialect {
    fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${index}"),
            Dialect::Generic | Dialect::Sqlite | Dialect::MySql => "?".to_string(),
        }
    }
}

/// Builds the SELECT and COUNT statements for one search request.
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    table: String,
    id_column: String,
    dialect: Dialect,
    joins: Vec<Relation>,
    filters: Vec<(String, Predicate)>,
    order: Vec<(String, SortDirection)>,
    skip: u64,
    take: u64,
}

impl SelectBuilder {
    /// Compile-ready builder for an entity and a validated descriptor.
    ///
    /// Resolves every named relation against [`Entity::relations`] and
    /// injects primary-key-descending ordering when the descriptor has none
    /// (the descriptor invariant: `order_by` is never empty from here on).
    pub fn for_entity<E: Entity>(dialect: Dialect, query: &FindQuery) -> Result<Self, QueryError> {
        let mut joins = Vec::with_capacity(query.relations.len());
        for name in &query.relations {
            let relation =
                E::relation(name).ok_or_else(|| QueryError::UnknownRelation(name.clone()))?;
            joins.push(*relation);
        }
        let mut order: Vec<(String, SortDirection)> = query.order_by.iter().cloned().collect();
        if order.is_empty() {
            order.push((E::id_column().to_string(), SortDirection::Desc));
        }
        Ok(Self {
            table: E::table_name().to_string(),
            id_column: E::id_column().to_string(),
            dialect,
            joins,
            filters: query.filters.iter().cloned().collect(),
            order,
            skip: query.skip,
            take: query.take,
        })
    }

    /// Build the page SELECT, returning `(sql, bind_values)`.
    ///
    /// `columns` is the base entity's column list; each is selected qualified
    /// (`base.col`). When relations are joined the rows are grouped by the
    /// base columns so to-many joins do not duplicate base rows; grouping
    /// (rather than `SELECT DISTINCT`) keeps relation-qualified ordering
    /// legal on stores that require ORDER BY expressions to appear in a
    /// distinct select list.
    pub fn build_select(&self, columns: &[&str]) -> Result<(String, Vec<String>), QueryError> {
        let table = checked(&self.table, "table")?;
        let mut cols = Vec::with_capacity(columns.len());
        for col in columns {
            cols.push(format!("{BASE_ALIAS}.{}", checked(col, "column")?));
        }

        let mut sql = format!("SELECT {} FROM {table} {BASE_ALIAS}", cols.join(", "));
        self.append_joins(&mut sql)?;
        let mut params = Vec::new();
        let mut placeholder_idx = 1usize;
        self.append_where(&mut sql, &mut params, &mut placeholder_idx)?;
        if !self.joins.is_empty() {
            sql.push_str(&format!(" GROUP BY {}", cols.join(", ")));
        }
        self.append_order(&mut sql)?;
        self.append_window(&mut sql);
        Ok((sql, params))
    }

    /// Build the matching COUNT, returning `(sql, bind_values)`.
    ///
    /// Shares the WHERE and joins but never the pagination window, so the
    /// total reflects all matching rows. With joins the count is over
    /// `DISTINCT base.{id}`.
    pub fn build_count(&self) -> Result<(String, Vec<String>), QueryError> {
        let table = checked(&self.table, "table")?;
        let count_expr = if self.joins.is_empty() {
            "COUNT(*)".to_string()
        } else {
            format!("COUNT(DISTINCT {BASE_ALIAS}.{})", checked(&self.id_column, "column")?)
        };
        let mut sql = format!("SELECT {count_expr} FROM {table} {BASE_ALIAS}");
        self.append_joins(&mut sql)?;
        let mut params = Vec::new();
        let mut placeholder_idx = 1usize;
        self.append_where(&mut sql, &mut params, &mut placeholder_idx)?;
        Ok((sql, params))
    }

    fn append_joins(&self, sql: &mut String) -> Result<(), QueryError> {
        for join in &self.joins {
            let name = checked(join.name, "relation")?;
            let table = checked(join.table, "table")?;
            let fk = checked(join.foreign_key, "column")?;
            let id = checked(&self.id_column, "column")?;
            sql.push_str(&format!(
                " LEFT JOIN {table} {name} ON {name}.{fk} = {BASE_ALIAS}.{id}"
            ));
        }
        Ok(())
    }

    fn append_where(
        &self,
        sql: &mut String,
        params: &mut Vec<String>,
        placeholder_idx: &mut usize,
    ) -> Result<(), QueryError> {
        if self.filters.is_empty() {
            return Ok(());
        }
        sql.push_str(" WHERE ");
        let mut first = true;
        for (field, predicate) in &self.filters {
            if !first {
                sql.push_str(" AND ");
            }
            first = false;
            let col = qualify(field)?;
            let placeholder = self.dialect.placeholder(*placeholder_idx);
            *placeholder_idx += 1;
            match predicate {
                Predicate::Eq(value) => {
                    sql.push_str(&format!("{col} = {placeholder}"));
                    params.push(value_to_param(value));
                }
                Predicate::Like(substring) => {
                    sql.push_str(&format!("{col} LIKE {placeholder}"));
                    params.push(format!("%{substring}%"));
                }
            }
        }
        Ok(())
    }

    fn append_order(&self, sql: &mut String) -> Result<(), QueryError> {
        if self.order.is_empty() {
            return Ok(());
        }
        sql.push_str(" ORDER BY ");
        let base_prefix = format!("{BASE_ALIAS}.");
        let mut clauses = Vec::with_capacity(self.order.len());
        for (field, direction) in &self.order {
            let qualified = qualify(field)?;
            // Under the grouped (joined) projection a relation column is not
            // in the GROUP BY, so it orders through an aggregate: the
            // smallest related value for ASC, the largest for DESC.
            let expr = if !self.joins.is_empty() && !qualified.starts_with(&base_prefix) {
                match direction {
                    SortDirection::Asc => format!("MIN({qualified})"),
                    SortDirection::Desc => format!("MAX({qualified})"),
                }
            } else {
                qualified
            };
            clauses.push(format!("{expr} {}", direction.as_sql()));
        }
        sql.push_str(&clauses.join(", "));
        Ok(())
    }

    fn append_window(&self, sql: &mut String) {
        // skip == 0 && take == 0 is the fetch-everything escape hatch.
        if self.skip == 0 && self.take == 0 {
            return;
        }
        sql.push_str(&format!(" LIMIT {} OFFSET {}", self.take, self.skip));
    }
}

/// Qualify a field path: bare fields belong to the base entity, dotted paths
/// are relation-qualified and used as-is.
fn qualify(field: &str) -> Result<String, QueryError> {
    let checked = checked(field, "column")?;
    if checked.contains('.') {
        Ok(checked.to_string())
    } else {
        Ok(format!("{BASE_ALIAS}.{checked}"))
    }
}

fn checked<'a>(ident: &'a str, kind: &'static str) -> Result<&'a str, QueryError> {
    if is_valid_identifier(ident) {
        Ok(ident)
    } else {
        Err(QueryError::InvalidIdentifier {
            kind,
            ident: ident.to_string(),
        })
    }
}

fn is_valid_identifier(ident: &str) -> bool {
    if ident.is_empty() {
        return false;
    }
    ident.split('.').all(is_valid_segment)
}

fn is_valid_segment(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Render a JSON value as a bind parameter.
///
/// Strings bind as their contents; everything else binds as its JSON text
/// (`5` → `"5"`, `true` → `"true"`) and is left to the store's comparison
/// coercion. Affinity-typed stores like SQLite compare these cleanly; on
/// strictly typed stores an exact-match filter against an integer or boolean
/// column needs a cast on the store side, or the comparison is rejected and
/// the search surfaces the opaque query-generation failure.
fn value_to_param(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
