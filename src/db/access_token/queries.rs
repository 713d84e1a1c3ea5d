use super::{blocking_queries, schema::AccessToken};
use crate::Result;
use deadpool_sqlite::Pool;
use time::OffsetDateTime;

pub async fn insert(
    admin_id: i64,
    secret: String,
    expires_at: OffsetDateTime,
    pool: &Pool,
) -> Result<AccessToken> {
    pool.get()
        .await?
        .interact(move |conn| blocking_queries::insert(admin_id, &secret, expires_at, conn))
        .await?
}

pub async fn select_by_secret(secret: String, pool: &Pool) -> Result<Option<AccessToken>> {
    pool.get()
        .await?
        .interact(move |conn| blocking_queries::select_by_secret(&secret, conn))
        .await?
}

pub async fn delete_by_secret(secret: String, pool: &Pool) -> Result<usize> {
    pool.get()
        .await?
        .interact(move |conn| blocking_queries::delete_by_secret(&secret, conn))
        .await?
}

pub async fn delete_expired(now: OffsetDateTime, pool: &Pool) -> Result<usize> {
    pool.get()
        .await?
        .interact(move |conn| blocking_queries::delete_expired(now, conn))
        .await?
}
