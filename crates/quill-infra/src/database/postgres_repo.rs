//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DbConn, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};
use uuid::Uuid;

use quill_core::domain::{Post, PostState, User};
use quill_core::error::RepoError;
use quill_core::ports::{PostFilter, PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};

/// PostgreSQL user repository.
pub struct PostgresUserRepository {
    db: DbConn,
}

impl PostgresUserRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

/// PostgreSQL post repository.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn query_err(e: DbErr) -> RepoError {
    RepoError::Query(e.to_string())
}

/// Uniqueness violations surface as `Constraint`; services give them their
/// precise meaning (duplicate email, lost OAuth race).
fn write_err(e: DbErr) -> RepoError {
    let err_str = e.to_string();
    if err_str.contains("duplicate") || err_str.contains("unique") {
        RepoError::Constraint(err_str)
    } else {
        RepoError::Query(err_str)
    }
}

/// Escape LIKE metacharacters so a search term is matched literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Mask an email for logging to keep PII out of logs.
fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) if at_pos > 1 => format!("{}***{}", &email[..1], &email[at_pos..]),
        Some(at_pos) => format!("***{}", &email[at_pos..]),
        None => "***".to_string(),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.map(Into::into))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        // ILIKE with an escaped pattern is a whole-string case-insensitive
        // match, which is how ownership is recorded.
        let result = UserEntity::find()
            .filter(Expr::col(user::Column::Username).ilike(escape_like(username)))
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.map(Into::into))
    }

    async fn find_by_google_id(&self, google_id: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::GoogleId.eq(google_id))
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<User>, RepoError> {
        let result = UserEntity::find()
            .order_by_asc(user::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(user)
            .insert(&self.db)
            .await
            .map_err(write_err)?;
        Ok(model.into())
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let model = user::ActiveModel::from(user)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => RepoError::NotFound,
                other => write_err(other),
            })?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = UserEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}

fn apply_filter(select: Select<PostEntity>, filter: &PostFilter) -> Select<PostEntity> {
    let mut query = select;
    if let Some(state) = filter.state {
        query = query.filter(post::Column::State.eq(state.as_str()));
    }
    if let Some(author) = &filter.author {
        query = query.filter(post::Column::Author.eq(author.as_str()));
    }
    query
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.map(Into::into))
    }

    async fn find_page(
        &self,
        filter: &PostFilter,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Post>, RepoError> {
        let result = apply_filter(PostEntity::find(), filter)
            .order_by_desc(post::Column::CreatedAt)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &PostFilter) -> Result<u64, RepoError> {
        apply_filter(PostEntity::find(), filter)
            .count(&self.db)
            .await
            .map_err(query_err)
    }

    async fn search(&self, term: &str) -> Result<Vec<Post>, RepoError> {
        let pattern = format!("%{}%", escape_like(term));

        let result = PostEntity::find()
            .filter(post::Column::State.eq(PostState::Published.as_str()))
            .filter(
                Condition::any()
                    .add(Expr::col(post::Column::Author).ilike(pattern.clone()))
                    .add(Expr::col(post::Column::Title).ilike(pattern)),
            )
            .all(&self.db)
            .await
            .map_err(query_err)?;
        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, post: Post) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(post)
            .insert(&self.db)
            .await
            .map_err(write_err)?;
        Ok(model.into())
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let model = post::ActiveModel::from(post)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotUpdated => RepoError::NotFound,
                other => write_err(other),
            })?;
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(query_err)?;
        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(())
    }
}
