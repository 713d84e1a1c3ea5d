use super::schema::{self, AccessToken, Columns, EXPIRES_AT_FORMAT};
use crate::Result;
use rusqlite::{params, Connection, OptionalExtension};
use time::OffsetDateTime;

pub fn insert(
    admin_id: i64,
    secret: &str,
    expires_at: OffsetDateTime,
    conn: &Connection,
) -> Result<AccessToken> {
    let sql = format!(
        r#"
            INSERT INTO {table} ({admin_id}, {secret}, {expires_at})
            VALUES (?1, ?2, ?3)
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        admin_id = Columns::AdminId.as_str(),
        secret = Columns::Secret.as_str(),
        expires_at = Columns::ExpiresAt.as_str(),
        projection = AccessToken::projection(),
    );
    conn.query_row(
        &sql,
        params![admin_id, secret, expires_at.format(EXPIRES_AT_FORMAT)?],
        AccessToken::mapper(),
    )
    .map_err(Into::into)
}

pub fn select_by_secret(secret: &str, conn: &Connection) -> Result<Option<AccessToken>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {secret} = ?1
        "#,
        projection = AccessToken::projection(),
        table = schema::TABLE_NAME,
        secret = Columns::Secret.as_str(),
    );
    conn.query_row(&sql, params![secret], AccessToken::mapper())
        .optional()
        .map_err(Into::into)
}

pub fn delete_by_secret(secret: &str, conn: &Connection) -> Result<usize> {
    let sql = format!(
        r#"
            DELETE FROM {table}
            WHERE {secret} = ?1
        "#,
        table = schema::TABLE_NAME,
        secret = Columns::Secret.as_str(),
    );
    conn.execute(&sql, params![secret]).map_err(Into::into)
}

pub fn delete_expired(now: OffsetDateTime, conn: &Connection) -> Result<usize> {
    let sql = format!(
        r#"
            DELETE FROM {table}
            WHERE {expires_at} <= ?1
        "#,
        table = schema::TABLE_NAME,
        expires_at = Columns::ExpiresAt.as_str(),
    );
    conn.execute(&sql, params![now.format(EXPIRES_AT_FORMAT)?])
        .map_err(Into::into)
}
