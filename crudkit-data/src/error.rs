/// Errors raised by the query translator for malformed client input.
///
/// These are client-class errors: the parameter bag contained JSON that could
/// not be parsed, and the offending field is never partially applied.
#[derive(Debug)]
pub enum TranslateError {
    /// The `where`/`filters` parameter held unparsable JSON.
    MalformedFilter(serde_json::Error),
    /// The `order`/`orderBy` parameter held unparsable JSON or an unknown direction.
    MalformedOrder(serde_json::Error),
    /// A whole-document query (the single `query` parameter) failed to parse.
    MalformedQuery(serde_json::Error),
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateError::MalformedFilter(err) => write!(f, "Malformed filter parameter: {err}"),
            TranslateError::MalformedOrder(err) => write!(f, "Malformed order parameter: {err}"),
            TranslateError::MalformedQuery(err) => write!(f, "Malformed query document: {err}"),
        }
    }
}

impl std::error::Error for TranslateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranslateError::MalformedFilter(err)
            | TranslateError::MalformedOrder(err)
            | TranslateError::MalformedQuery(err) => Some(err),
        }
    }
}

/// Errors raised while compiling a descriptor into SQL.
#[derive(Debug, Clone)]
pub enum QueryError {
    InvalidIdentifier { kind: &'static str, ident: String },
    /// The descriptor named a relation the entity does not declare.
    UnknownRelation(String),
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryError::InvalidIdentifier { kind, ident } => {
                write!(f, "Invalid {kind} identifier: {ident}")
            }
            QueryError::UnknownRelation(name) => write!(f, "Unknown relation: {name}"),
        }
    }
}

impl std::error::Error for QueryError {}

/// Errors that can occur in the data layer.
#[derive(Debug)]
pub enum DataError {
    NotFound(String),
    /// Building or executing the dynamic query failed. Deliberately opaque:
    /// bad field paths and store-side rejections all collapse into this one
    /// variant, with no field-level reporting.
    QueryGeneration(String),
    Database(Box<dyn std::error::Error + Send + Sync>),
    Other(String),
}

impl DataError {
    /// Construct a `Database` variant from any error type.
    ///
    /// Used by backend crates (e.g. `crudkit-data-sqlx`) to wrap
    /// driver-specific errors.
    pub fn database(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        DataError::Database(Box::new(err))
    }

    /// The generic query-generation failure surfaced by the search executor.
    pub fn query_generation() -> Self {
        DataError::QueryGeneration("query generation failed".into())
    }
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::NotFound(msg) => write!(f, "Not found: {msg}"),
            DataError::QueryGeneration(msg) => write!(f, "Query generation error: {msg}"),
            DataError::Database(err) => write!(f, "Database error: {err}"),
            DataError::Other(msg) => write!(f, "Data error: {msg}"),
        }
    }
}

impl std::error::Error for DataError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DataError::Database(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<QueryError> for DataError {
    fn from(err: QueryError) -> Self {
        DataError::QueryGeneration(err.to_string())
    }
}

impl From<TranslateError> for crudkit_core::CrudError {
    fn from(err: TranslateError) -> Self {
        crudkit_core::CrudError::BadRequest(err.to_string())
    }
}

impl From<DataError> for crudkit_core::CrudError {
    fn from(err: DataError) -> Self {
        match err {
            DataError::NotFound(msg) => crudkit_core::CrudError::NotFound(msg),
            DataError::QueryGeneration(msg) => crudkit_core::CrudError::Internal(msg),
            DataError::Database(e) => crudkit_core::CrudError::Internal(e.to_string()),
            DataError::Other(msg) => crudkit_core::CrudError::Internal(msg),
        }
    }
}
