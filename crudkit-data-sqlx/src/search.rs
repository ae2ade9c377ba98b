//! The Paginated Search Executor.
//!
//! Takes a validated [`FindQuery`] and an explicit connection pool, compiles
//! the descriptor with [`SelectBuilder`], and returns the result page plus
//! the total count of all matching rows (computed without the pagination
//! window). Stateless and request-scoped; concurrency control is the store's
//! business.

use crate::error::SqlxErrorExt;
use crudkit_data::{DataError, Dialect, Entity, FindQuery, SelectBuilder};
use sqlx::{ColumnIndex, Database, Decode, Encode, Executor, FromRow, IntoArguments, Pool, Type};

/// Map an SQLx driver to the matching placeholder dialect.
pub fn dialect_for<DB: Database>() -> Dialect {
    match DB::NAME {
        "PostgreSQL" => Dialect::Postgres,
        "MySQL" => Dialect::MySql,
        "SQLite" => Dialect::Sqlite,
        _ => Dialect::Generic,
    }
}

/// Execute a search: `(entities, total)`.
///
/// The total is fetched first via the window-free COUNT, so it is invariant
/// under `skip`/`take`. When `skip == 0 && take == 0` the page query carries
/// no window and the full matching set comes back.
///
/// Any build or execution failure — an unknown relation, a field path the
/// store rejects, a driver fault — surfaces as the single opaque
/// [`DataError::QueryGeneration`]; there is no partial recovery and no retry
/// at this layer.
pub async fn search<E, DB>(pool: &Pool<DB>, query: &FindQuery) -> Result<(Vec<E>, u64), DataError>
where
    DB: Database,
    E: Entity + for<'r> FromRow<'r, DB::Row>,
    for<'q> String: Encode<'q, DB> + Type<DB>,
    i64: Type<DB> + for<'r> Decode<'r, DB>,
    usize: ColumnIndex<DB::Row>,
    for<'c> &'c Pool<DB>: Executor<'c, Database = DB>,
    for<'q> DB::Arguments<'q>: IntoArguments<'q, DB>,
{
    let builder = SelectBuilder::for_entity::<E>(dialect_for::<DB>(), query)?;

    let (count_sql, count_params) = builder.build_count()?;
    let mut count_query = sqlx::query_scalar::<DB, i64>(&count_sql);
    for param in &count_params {
        count_query = count_query.bind(param.clone());
    }
    let total = count_query
        .fetch_one(pool)
        .await
        .map_err(SqlxErrorExt::into_search_error)?;

    let (select_sql, select_params) = builder.build_select(E::columns())?;
    let mut select_query = sqlx::query_as::<DB, E>(&select_sql);
    for param in &select_params {
        select_query = select_query.bind(param.clone());
    }
    let entities = select_query
        .fetch_all(pool)
        .await
        .map_err(SqlxErrorExt::into_search_error)?;

    Ok((entities, total.max(0) as u64))
}
