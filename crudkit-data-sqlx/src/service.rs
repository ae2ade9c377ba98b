//! The CRUD façade: authorization, DTO validation, query translation, and
//! the unfiltered-fallback retry, wired around the search executor and a
//! per-entity [`Repository`].

use crate::search::search;
use crudkit_core::validation;
use crudkit_core::{AllowAll, CrudAction, CrudAuthorizer, CrudError, Decision, FieldError};
use crudkit_data::{Entity, FindQuery, FindResponse, Repository};
use sqlx::{ColumnIndex, Database, Decode, Encode, Executor, FromRow, IntoArguments, Pool, Type};
use std::marker::PhantomData;

/// Generic CRUD service for one entity type.
///
/// The create/update DTO types (`C`, `U`) are bound at registration through
/// the type parameters; their `garde` schemas are resolved statically, never
/// looked up per request. The connection pool is an owned, explicit
/// dependency — there is no global registry.
///
/// # Example
///
/// ```ignore
/// type PersonService =
///     CrudService<Person, Sqlite, PersonRepo, CreatePerson, UpdatePerson>;
///
/// let service = PersonService::new(pool.clone(), PersonRepo::new(pool));
/// let page = service.find_all([("take", "5")]).await?;
/// ```
pub struct CrudService<E, DB, R, C, U, A = AllowAll>
where
    DB: Database,
{
    pool: Pool<DB>,
    repository: R,
    authorizer: A,
    _dto: PhantomData<fn() -> (E, C, U)>,
}

impl<E, DB, R, C, U> CrudService<E, DB, R, C, U>
where
    DB: Database,
{
    /// Build a service with the default allow-all authorizer.
    pub fn new(pool: Pool<DB>, repository: R) -> Self {
        Self {
            pool,
            repository,
            authorizer: AllowAll,
            _dto: PhantomData,
        }
    }
}

impl<E, DB, R, C, U, A> CrudService<E, DB, R, C, U, A>
where
    DB: Database,
{
    /// Swap in an authorizer; capability checks run before every operation.
    pub fn with_authorizer<A2>(self, authorizer: A2) -> CrudService<E, DB, R, C, U, A2> {
        CrudService {
            pool: self.pool,
            repository: self.repository,
            authorizer,
            _dto: PhantomData,
        }
    }

    pub fn pool(&self) -> &Pool<DB> {
        &self.pool
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn authorize(&self, decision: Decision, action: CrudAction) -> Result<(), CrudError> {
        if decision.is_allowed() {
            Ok(())
        } else {
            let reason = decision
                .reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("{action} not authorized"));
            Err(CrudError::Forbidden(reason))
        }
    }
}

impl<E, DB, R, C, U, A> CrudService<E, DB, R, C, U, A>
where
    E: Entity,
    DB: Database,
    R: Repository<E, E::Id>,
    C: validation::Validate<Context = ()> + Into<E> + Send + Sync,
    U: validation::Validate<Context = ()> + Into<E> + Send + Sync,
    A: CrudAuthorizer,
{
    pub async fn find_one_by_id(&self, id: &E::Id) -> Result<E, CrudError> {
        let decision = self.authorizer.can_read().await;
        self.authorize(decision, CrudAction::Read)?;
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CrudError::NotFound(format!("record {} not found", id.to_string())))
    }

    pub async fn create_one(&self, dto: C) -> Result<E, CrudError> {
        let decision = self.authorizer.can_create().await;
        self.authorize(decision, CrudAction::Create)?;
        validation::validate(&dto)?;
        Ok(self.repository.insert(dto.into()).await?)
    }

    /// Validate every element before inserting any: a single invalid DTO
    /// rejects the whole batch.
    pub async fn create_many(&self, dtos: Vec<C>) -> Result<Vec<E>, CrudError> {
        let decision = self.authorizer.can_create().await;
        self.authorize(decision, CrudAction::Create)?;

        let mut field_errors: Vec<FieldError> = Vec::new();
        for (index, dto) in dtos.iter().enumerate() {
            match validation::validate(dto) {
                Ok(()) => {}
                Err(CrudError::Validation(errors)) => {
                    field_errors.extend(errors.into_iter().map(|mut e| {
                        e.field = format!("[{index}].{}", e.field);
                        e
                    }));
                }
                Err(other) => return Err(other),
            }
        }
        if !field_errors.is_empty() {
            return Err(CrudError::Validation(field_errors));
        }

        let mut created = Vec::with_capacity(dtos.len());
        for dto in dtos {
            created.push(self.repository.insert(dto.into()).await?);
        }
        Ok(created)
    }

    pub async fn update_one(&self, id: &E::Id, dto: U) -> Result<E, CrudError> {
        let decision = self.authorizer.can_update().await;
        self.authorize(decision, CrudAction::Update)?;
        validation::validate(&dto)?;
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(CrudError::NotFound(format!(
                "record {} not found",
                id.to_string()
            )));
        }
        Ok(self.repository.update(id, dto.into()).await?)
    }

    pub async fn delete_one(&self, id: &E::Id) -> Result<(), CrudError> {
        let decision = self.authorizer.can_delete().await;
        self.authorize(decision, CrudAction::Delete)?;
        let deleted = self.repository.delete(id).await?;
        if deleted {
            Ok(())
        } else {
            Err(CrudError::NotFound(format!(
                "record {} not found",
                id.to_string()
            )))
        }
    }
}

impl<E, DB, R, C, U, A> CrudService<E, DB, R, C, U, A>
where
    E: Entity + for<'r> FromRow<'r, DB::Row>,
    DB: Database,
    A: CrudAuthorizer,
    for<'q> String: Encode<'q, DB> + Type<DB>,
    i64: Type<DB> + for<'r> Decode<'r, DB>,
    usize: ColumnIndex<DB::Row>,
    for<'c> &'c Pool<DB>: Executor<'c, Database = DB>,
    for<'q> DB::Arguments<'q>: IntoArguments<'q, DB>,
{
    /// List entities from an untrusted parameter bag.
    ///
    /// Malformed filter/order JSON is a client error and stops here, before
    /// any store query runs. A search that fails at the store falls back to
    /// the default descriptor instead of failing the request.
    pub async fn find_all<I, K, V>(&self, params: I) -> Result<FindResponse<E>, CrudError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let decision = self.authorizer.can_list().await;
        self.authorize(decision, CrudAction::List)?;
        let query = FindQuery::from_params(params)?;
        self.run_search(query).await
    }

    /// List entities from a whole query document arriving as a JSON string
    /// (the single `query` parameter entry point).
    pub async fn find_all_json(&self, raw: &str) -> Result<FindResponse<E>, CrudError> {
        let decision = self.authorizer.can_list().await;
        self.authorize(decision, CrudAction::List)?;
        let query = FindQuery::from_json_str(raw)?;
        self.run_search(query).await
    }

    /// List entities from an already-translated descriptor.
    pub async fn find_all_query(&self, query: FindQuery) -> Result<FindResponse<E>, CrudError> {
        let decision = self.authorizer.can_list().await;
        self.authorize(decision, CrudAction::List)?;
        self.run_search(query).await
    }

    async fn run_search(&self, query: FindQuery) -> Result<FindResponse<E>, CrudError> {
        match search::<E, DB>(&self.pool, &query).await {
            Ok((data, total)) => Ok(FindResponse::new(data, &query, total)),
            Err(err) => {
                tracing::warn!(error = %err, "search failed, retrying with the default query");
                let fallback = FindQuery::default();
                let (data, total) = search::<E, DB>(&self.pool, &fallback)
                    .await
                    .map_err(CrudError::from)?;
                Ok(FindResponse::new(data, &fallback, total))
            }
        }
    }
}
