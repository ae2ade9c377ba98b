use crate::error::DataError;
use std::future::Future;

/// Generic async repository trait for per-entity persistence.
///
/// Uses RPITIT (return-position `impl Trait` in traits) — no `async-trait`
/// needed. The CRUD façade drives writes and by-id reads through this seam;
/// listing goes through the search executor instead.
pub trait Repository<E, Id>: Send + Sync
where
    E: Send + Sync + 'static,
    Id: Send + Sync + 'static,
{
    fn find_by_id(&self, id: &Id) -> impl Future<Output = Result<Option<E>, DataError>> + Send;
    fn insert(&self, entity: E) -> impl Future<Output = Result<E, DataError>> + Send;
    fn update(&self, id: &Id, entity: E) -> impl Future<Output = Result<E, DataError>> + Send;
    fn delete(&self, id: &Id) -> impl Future<Output = Result<bool, DataError>> + Send;
    fn count(&self) -> impl Future<Output = Result<u64, DataError>> + Send;
}
