use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait, SqlErr,
};
use uuid::Uuid;

use cookbook_core::error::RepoError;
use cookbook_core::ports::BaseRepository;

/// Generic PostgreSQL repository implementation.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

/// Conversion from a stored row into a domain value. Rows the domain cannot
/// represent surface as `RepoError::Query`.
pub trait FromStoredModel<M>: Sized {
    fn from_model(model: M) -> Result<Self, RepoError>;
}

/// Classify a SeaORM error. Unique violations become `Constraint` so the
/// domain can report a conflict.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return RepoError::Constraint(detail);
    }

    match err {
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => RepoError::Query(other.to_string()),
    }
}

#[async_trait]
impl<E, T> BaseRepository<T, Uuid> for PostgresBaseRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + Send + Sync,
    E::ActiveModel:
        ActiveModelTrait<Entity = E> + ActiveModelBehavior + From<T> + Send + Sync + 'static,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = Uuid>,
    T: FromStoredModel<E::Model> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let result = E::find_by_id(id).one(&self.db).await.map_err(map_db_err)?;

        result.map(T::from_model).transpose()
    }

    async fn create(&self, entity: T) -> Result<T, RepoError> {
        let active_model = <E::ActiveModel as From<T>>::from(entity);
        let model = active_model.insert(&self.db).await.map_err(map_db_err)?;

        T::from_model(model)
    }

    async fn update(&self, entity: T) -> Result<Option<T>, RepoError> {
        let active_model = <E::ActiveModel as From<T>>::from(entity);

        match active_model.update(&self.db).await {
            Ok(model) => T::from_model(model).map(Some),
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(map_db_err(e)),
        }
    }

    async fn remove(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let Some(existing) = E::find_by_id(id).one(&self.db).await.map_err(map_db_err)? else {
            return Ok(None);
        };

        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        // Lost a race with another delete.
        if result.rows_affected == 0 {
            return Ok(None);
        }

        T::from_model(existing).map(Some)
    }
}
