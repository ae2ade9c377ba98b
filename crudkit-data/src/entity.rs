/// Metadata for a named relation the search executor can LEFT JOIN.
///
/// `foreign_key` is the column on the related table that references the base
/// entity's id column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relation {
    pub name: &'static str,
    pub table: &'static str,
    pub foreign_key: &'static str,
}

/// Trait representing a database entity with a table name, id column, column
/// list, and joinable relations.
///
/// # Example
///
/// ```ignore
/// impl Entity for PersonEntity {
///     type Id = i64;
///     fn table_name() -> &'static str { "persons" }
///     fn id_column() -> &'static str { "id" }
///     fn columns() -> &'static [&'static str] { &["id", "name", "email"] }
///     fn relations() -> &'static [Relation] {
///         &[Relation { name: "orders", table: "orders", foreign_key: "person_id" }]
///     }
///     fn id(&self) -> &i64 { &self.id }
/// }
/// ```
pub trait Entity: Send + Sync + Unpin + 'static {
    type Id: Send + Sync + ToString + 'static;

    fn table_name() -> &'static str;
    fn id_column() -> &'static str;
    fn columns() -> &'static [&'static str];
    fn id(&self) -> &Self::Id;

    /// Relations available for eager-loading. Defaults to none.
    fn relations() -> &'static [Relation] {
        &[]
    }

    /// Look up a declared relation by name.
    fn relation(name: &str) -> Option<&'static Relation> {
        Self::relations().iter().find(|r| r.name == name)
    }
}
