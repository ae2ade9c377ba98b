pub mod entity;
pub mod error;
pub mod find;
pub mod page;
pub mod query;
pub mod repository;
pub mod translate;

pub use entity::{Entity, Relation};
pub use error::{DataError, QueryError, TranslateError};
pub use find::{FindQuery, Filters, OrderBy, Predicate, SortDirection, DEFAULT_TAKE};
pub use page::{next_query, FindResponse};
pub use query::{Dialect, SelectBuilder};
pub use repository::Repository;
pub use translate::parse_relation_list;

pub mod prelude {
    //! Re-exports of the most commonly used data types.
    pub use crate::{
        Entity, FindQuery, FindResponse, Predicate, Relation, Repository, SelectBuilder,
        SortDirection,
    };
}
