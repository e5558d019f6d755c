//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{PostRepository, PostRepositoryError};
use crate::domain::{NewPost, PostChanges, PostId, PostWithOwner};

use super::diesel_basic_error_mapping::{map_basic_pool_error, map_write_diesel_error};
use super::models::{NewPostRow, PostChangeset, PostRow, post_with_owner};
use super::pool::{DbPool, PoolError};
use super::schema::{posts, users};

/// Diesel-backed implementation of the [`PostRepository`] port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostRepositoryError {
    map_basic_pool_error(error, PostRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PostRepositoryError {
    map_write_diesel_error(
        error,
        PostRepositoryError::query,
        PostRepositoryError::connection,
        PostRepositoryError::conflict,
    )
}

/// Load one post with its owner's name.
async fn load_post(
    conn: &mut AsyncPgConnection,
    id: i64,
) -> Result<Option<PostWithOwner>, diesel::result::Error> {
    let row: Option<(PostRow, Option<String>)> = posts::table
        .left_join(users::table)
        .filter(posts::id.eq(id))
        .select((PostRow::as_select(), users::name.nullable()))
        .first(conn)
        .await
        .optional()?;
    Ok(row.map(|(post, owner_name)| post_with_owner(post, owner_name)))
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn list(&self) -> Result<Vec<PostWithOwner>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(PostRow, Option<String>)> = posts::table
            .left_join(users::table)
            .order(posts::id.asc())
            .select((PostRow::as_select(), users::name.nullable()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(post, owner_name)| post_with_owner(post, owner_name))
            .collect())
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<PostWithOwner>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_post(&mut conn, id.get())
            .await
            .map_err(map_diesel_error)
    }

    async fn create(&self, post: &NewPost) -> Result<PostWithOwner, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewPostRow {
            title: &post.title,
            description: &post.description,
            user_id: post.user_id.map(i64::from),
        };

        let created: PostRow = diesel::insert_into(posts::table)
            .values(&row)
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let owner_name: Option<String> = match created.user_id {
            Some(owner) => users::table
                .find(owner)
                .select(users::name)
                .first(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?,
            None => None,
        };

        Ok(post_with_owner(created, owner_name))
    }

    async fn update(
        &self,
        id: PostId,
        changes: &PostChanges,
    ) -> Result<Option<PostWithOwner>, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changeset = PostChangeset {
            title: changes.title.as_deref(),
            description: changes.description.as_deref(),
            user_id: changes.user_id.map(|owner| Some(owner.get())),
            updated_at: Utc::now(),
        };
        let post_id = id.get();

        conn.transaction(|conn| {
            async move {
                let touched = diesel::update(posts::table.find(post_id))
                    .set(&changeset)
                    .execute(conn)
                    .await?;
                if touched == 0 {
                    return Ok(None);
                }
                load_post(conn, post_id).await
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn delete(&self, id: PostId) -> Result<bool, PostRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(posts::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
