use crate::validation::FieldError;

/// Errors returned by the CRUD façade.
///
/// Variants are named after the status class a caller would translate them
/// to; the translation itself happens outside this workspace.
pub enum CrudError {
    /// Malformed client input (unparsable filter/order JSON, invalid id).
    BadRequest(String),
    /// DTO validation failed; carries the field-level breakdown.
    Validation(Vec<FieldError>),
    /// An authorization check denied the action.
    Forbidden(String),
    /// The referenced record does not exist.
    NotFound(String),
    /// Query generation/execution or any other server-side failure.
    Internal(String),
}

impl std::fmt::Display for CrudError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrudError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            CrudError::Validation(errors) => {
                write!(f, "Validation Error: {} errors", errors.len())
            }
            CrudError::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            CrudError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            CrudError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl std::fmt::Debug for CrudError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for CrudError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let err = CrudError::NotFound("record 7".into());
        assert_eq!(err.to_string(), "Not Found: record 7");
    }

    #[test]
    fn validation_display_counts_errors() {
        let err = CrudError::Validation(vec![FieldError {
            field: "name".into(),
            message: "too short".into(),
            code: "validation".into(),
        }]);
        assert_eq!(err.to_string(), "Validation Error: 1 errors");
    }
}
