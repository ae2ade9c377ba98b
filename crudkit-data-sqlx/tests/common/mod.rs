//! Shared fixture: a `persons` table with an optional `orders` relation,
//! seeded into a single-connection in-memory SQLite pool.
#![allow(dead_code)]

use crudkit_data::{DataError, Entity, Relation, Repository};
use crudkit_data_sqlx::SqlxErrorExt;
use sqlx::sqlite::{SqlitePoolOptions, SqliteRow};
use sqlx::{FromRow, Row, SqlitePool};
use std::future::Future;

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    pub id: i64,
    pub name: String,
    pub email: String,
}

impl Entity for Person {
    type Id = i64;

    fn table_name() -> &'static str {
        "persons"
    }

    fn id_column() -> &'static str {
        "id"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "email"]
    }

    fn id(&self) -> &i64 {
        &self.id
    }

    fn relations() -> &'static [Relation] {
        &[Relation {
            name: "orders",
            table: "orders",
            foreign_key: "person_id",
        }]
    }
}

impl<'r> FromRow<'r, SqliteRow> for Person {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
        })
    }
}

/// Single-connection in-memory pool: every test sees one database.
pub async fn setup_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    sqlx::query(
        "CREATE TABLE persons (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL, email TEXT NOT NULL)",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "CREATE TABLE orders (id INTEGER PRIMARY KEY AUTOINCREMENT, person_id INTEGER NOT NULL, status TEXT NOT NULL)",
    )
    .execute(&pool)
    .await
    .unwrap();
    pool
}

pub async fn insert_person(pool: &SqlitePool, name: &str, email: &str) -> i64 {
    sqlx::query("INSERT INTO persons (name, email) VALUES (?, ?)")
        .bind(name)
        .bind(email)
        .execute(pool)
        .await
        .unwrap()
        .last_insert_rowid()
}

pub async fn insert_order(pool: &SqlitePool, person_id: i64, status: &str) {
    sqlx::query("INSERT INTO orders (person_id, status) VALUES (?, ?)")
        .bind(person_id)
        .bind(status)
        .execute(pool)
        .await
        .unwrap();
}

/// Seed `count` people named `person-01`, `person-02`, ...
pub async fn seed_people(pool: &SqlitePool, count: u32) {
    for n in 1..=count {
        insert_person(pool, &format!("person-{n:02}"), &format!("p{n:02}@example.com")).await;
    }
}

pub async fn seed_named(pool: &SqlitePool, names: &[&str]) {
    for name in names {
        insert_person(pool, name, &format!("{}@example.com", name.to_lowercase())).await;
    }
}

/// Hand-written SQLite repository for `Person`.
pub struct PersonRepo {
    pool: SqlitePool,
}

impl PersonRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl Repository<Person, i64> for PersonRepo {
    fn find_by_id(&self, id: &i64) -> impl Future<Output = Result<Option<Person>, DataError>> + Send {
        async move {
            sqlx::query_as::<_, Person>("SELECT id, name, email FROM persons WHERE id = ?")
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| e.into_data_error())
        }
    }

    fn insert(&self, entity: Person) -> impl Future<Output = Result<Person, DataError>> + Send {
        async move {
            let result = sqlx::query("INSERT INTO persons (name, email) VALUES (?, ?)")
                .bind(&entity.name)
                .bind(&entity.email)
                .execute(&self.pool)
                .await
                .map_err(|e| e.into_data_error())?;
            Ok(Person {
                id: result.last_insert_rowid(),
                ..entity
            })
        }
    }

    fn update(&self, id: &i64, entity: Person) -> impl Future<Output = Result<Person, DataError>> + Send {
        async move {
            sqlx::query("UPDATE persons SET name = ?, email = ? WHERE id = ?")
                .bind(&entity.name)
                .bind(&entity.email)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| e.into_data_error())?;
            Ok(Person { id: *id, ..entity })
        }
    }

    fn delete(&self, id: &i64) -> impl Future<Output = Result<bool, DataError>> + Send {
        async move {
            let result = sqlx::query("DELETE FROM persons WHERE id = ?")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| e.into_data_error())?;
            Ok(result.rows_affected() > 0)
        }
    }

    fn count(&self) -> impl Future<Output = Result<u64, DataError>> + Send {
        async move {
            let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM persons")
                .fetch_one(&self.pool)
                .await
                .map_err(|e| e.into_data_error())?;
            Ok(count as u64)
        }
    }
}
