use serde::Serialize;

/// A field-level validation error.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

/// Flatten a `garde::Report` into field-level errors.
///
/// An empty path (whole-value rules) is reported as `"value"`.
pub fn fields_from_report(report: &garde::Report) -> Vec<FieldError> {
    report
        .iter()
        .map(|(path, error)| {
            let field = {
                let s = path.to_string();
                if s.is_empty() { "value".to_string() } else { s }
            };
            FieldError {
                field,
                message: error.message().to_string(),
                code: "validation".to_string(),
            }
        })
        .collect()
}

/// Validate a value and convert any failure into a [`CrudError::Validation`].
///
/// [`CrudError::Validation`]: crate::CrudError::Validation
pub fn validate(value: &impl garde::Validate<Context = ()>) -> Result<(), crate::CrudError> {
    value
        .validate()
        .map_err(|report| crate::CrudError::Validation(fields_from_report(&report)))
}

// Re-export garde::Validate for convenience.
pub use garde::Validate;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(garde::Validate)]
    struct CreatePerson {
        #[garde(length(min = 1, max = 100))]
        name: String,
        #[garde(email)]
        email: String,
    }

    #[test]
    fn valid_value_passes() {
        let dto = CreatePerson {
            name: "Ana".into(),
            email: "ana@example.com".into(),
        };
        assert!(validate(&dto).is_ok());
    }

    #[test]
    fn invalid_value_reports_each_field() {
        let dto = CreatePerson {
            name: String::new(),
            email: "not-an-email".into(),
        };
        let err = validate(&dto).unwrap_err();
        match err {
            crate::CrudError::Validation(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert!(names.contains(&"name"));
                assert!(names.contains(&"email"));
            }
            other => panic!("expected Validation, got {other}"),
        }
    }
}
