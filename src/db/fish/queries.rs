use super::{blocking_queries, schema::Fish};
use crate::Result;
use deadpool_sqlite::Pool;

pub async fn insert(
    nama_ikan: String,
    jumlah: i64,
    foto: Option<String>,
    pool: &Pool,
) -> Result<Fish> {
    pool.get()
        .await?
        .interact(move |conn| blocking_queries::insert(&nama_ikan, jumlah, foto.as_deref(), conn))
        .await?
}

pub async fn select_all(pool: &Pool) -> Result<Vec<Fish>> {
    pool.get()
        .await?
        .interact(|conn| blocking_queries::select_all(conn))
        .await?
}

pub async fn select_by_id(id: i64, pool: &Pool) -> Result<Option<Fish>> {
    pool.get()
        .await?
        .interact(move |conn| blocking_queries::select_by_id(id, conn))
        .await?
}

pub async fn update(
    id: i64,
    nama_ikan: String,
    jumlah: i64,
    foto: Option<String>,
    pool: &Pool,
) -> Result<Option<Fish>> {
    pool.get()
        .await?
        .interact(move |conn| {
            blocking_queries::update(id, &nama_ikan, jumlah, foto.as_deref(), conn)
        })
        .await?
}

pub async fn delete(id: i64, pool: &Pool) -> Result<Option<Fish>> {
    pool.get()
        .await?
        .interact(move |conn| blocking_queries::delete(id, conn))
        .await?
}
