use crudkit_data::DataError;

/// Bridges `sqlx::Error` into the data-layer [`DataError`] taxonomy.
///
/// Orphan rules rule out `impl From<sqlx::Error> for DataError` in this
/// crate, so the conversions live on an extension trait instead.
pub trait SqlxErrorExt {
    /// Repository-facing mapping: a missed row lookup becomes
    /// [`DataError::NotFound`], anything else wraps the driver error as the
    /// source of [`DataError::Database`].
    fn into_data_error(self) -> DataError;

    /// Search-facing mapping: the driver detail is logged, the caller sees
    /// only the opaque query-generation failure.
    fn into_search_error(self) -> DataError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_data_error(self) -> DataError {
        match self {
            sqlx::Error::RowNotFound => DataError::NotFound("row not found".into()),
            other => DataError::database(other),
        }
    }

    fn into_search_error(self) -> DataError {
        tracing::error!(error = %self, "query generation failed");
        DataError::query_generation()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missed_row_maps_to_not_found() {
        let err = sqlx::Error::RowNotFound.into_data_error();
        assert!(matches!(err, DataError::NotFound(_)));
    }

    #[test]
    fn driver_faults_keep_their_source() {
        let err = sqlx::Error::PoolClosed.into_data_error();
        match err {
            DataError::Database(source) => {
                assert!(source.to_string().contains("pool"));
            }
            other => panic!("expected Database, got {other:?}"),
        }
    }

    #[test]
    fn search_mapping_is_opaque() {
        let err = sqlx::Error::PoolClosed.into_search_error();
        assert!(matches!(err, DataError::QueryGeneration(msg) if msg == "query generation failed"));
    }
}
