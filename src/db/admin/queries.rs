use super::{blocking_queries, schema::Admin};
use crate::Result;
use deadpool_sqlite::Pool;

pub async fn select_by_id(id: i64, pool: &Pool) -> Result<Option<Admin>> {
    pool.get()
        .await?
        .interact(move |conn| blocking_queries::select_by_id(id, conn))
        .await?
}

pub async fn select_by_name(name: String, pool: &Pool) -> Result<Option<Admin>> {
    pool.get()
        .await?
        .interact(move |conn| blocking_queries::select_by_name(&name, conn))
        .await?
}

pub async fn count(pool: &Pool) -> Result<i64> {
    pool.get()
        .await?
        .interact(|conn| blocking_queries::count(conn))
        .await?
}

#[cfg(test)]
pub async fn insert(name: &str, password: &str, pool: &Pool) -> Result<Admin> {
    let name = name.to_string();
    let password = password.to_string();
    pool.get()
        .await?
        .interact(move |conn| blocking_queries::insert(&name, &password, conn))
        .await?
}
