use super::schema::{self, Columns, Fish};
use crate::Result;
use rusqlite::{named_params, params, Connection, OptionalExtension};

pub fn insert(
    nama_ikan: &str,
    jumlah: i64,
    foto: Option<&str>,
    conn: &Connection,
) -> Result<Fish> {
    let sql = format!(
        r#"
            INSERT INTO {table} ({nama_ikan}, {jumlah}, {foto})
            VALUES (:nama_ikan, :jumlah, :foto)
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        nama_ikan = Columns::NamaIkan.as_str(),
        jumlah = Columns::Jumlah.as_str(),
        foto = Columns::Foto.as_str(),
        projection = Fish::projection(),
    );
    conn.query_row(
        &sql,
        named_params! {
            ":nama_ikan": nama_ikan,
            ":jumlah": jumlah,
            ":foto": foto,
        },
        Fish::mapper(),
    )
    .map_err(Into::into)
}

pub fn select_all(conn: &Connection) -> Result<Vec<Fish>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            ORDER BY {created_at} DESC, {id} DESC
        "#,
        projection = Fish::projection(),
        table = schema::TABLE_NAME,
        created_at = Columns::CreatedAt.as_str(),
        id = Columns::Id.as_str(),
    );
    conn.prepare(&sql)?
        .query_map([], Fish::mapper())?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn select_by_id(id: i64, conn: &Connection) -> Result<Option<Fish>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {id} = ?1
        "#,
        projection = Fish::projection(),
        table = schema::TABLE_NAME,
        id = Columns::Id.as_str(),
    );
    conn.query_row(&sql, params![id], Fish::mapper())
        .optional()
        .map_err(Into::into)
}

/// Replaces every editable field, `None` is returned when the row doesn't exist.
pub fn update(
    id: i64,
    nama_ikan: &str,
    jumlah: i64,
    foto: Option<&str>,
    conn: &Connection,
) -> Result<Option<Fish>> {
    let sql = format!(
        r#"
            UPDATE {table}
            SET
                {nama_ikan} = :nama_ikan,
                {jumlah} = :jumlah,
                {foto} = :foto,
                {updated_at} = strftime('%Y-%m-%dT%H:%M:%fZ')
            WHERE {id} = :id
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        nama_ikan = Columns::NamaIkan.as_str(),
        jumlah = Columns::Jumlah.as_str(),
        foto = Columns::Foto.as_str(),
        updated_at = Columns::UpdatedAt.as_str(),
        id = Columns::Id.as_str(),
        projection = Fish::projection(),
    );
    conn.query_row(
        &sql,
        named_params! {
            ":id": id,
            ":nama_ikan": nama_ikan,
            ":jumlah": jumlah,
            ":foto": foto,
        },
        Fish::mapper(),
    )
    .optional()
    .map_err(Into::into)
}

pub fn delete(id: i64, conn: &Connection) -> Result<Option<Fish>> {
    let sql = format!(
        r#"
            DELETE FROM {table}
            WHERE {id} = ?1
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        id = Columns::Id.as_str(),
        projection = Fish::projection(),
    );
    conn.query_row(&sql, params![id], Fish::mapper())
        .optional()
        .map_err(Into::into)
}
