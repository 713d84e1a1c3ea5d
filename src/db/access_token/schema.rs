use rusqlite::Row;
use std::sync::OnceLock;
use time::{format_description::FormatItem, macros::format_description, OffsetDateTime};

pub const TABLE_NAME: &str = "access_token";

/// Whole seconds in UTC, so stored values compare correctly as text.
pub const EXPIRES_AT_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

pub enum Columns {
    Id,
    AdminId,
    Secret,
    ExpiresAt,
    CreatedAt,
}

impl Columns {
    pub fn as_str(&self) -> &'static str {
        match self {
            Columns::Id => "id",
            Columns::AdminId => "admin_id",
            Columns::Secret => "secret",
            Columns::ExpiresAt => "expires_at",
            Columns::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub id: i64,
    pub admin_id: i64,
    pub secret: String,
    pub expires_at: OffsetDateTime,
    pub created_at: OffsetDateTime,
}

impl AccessToken {
    pub fn projection() -> &'static str {
        static PROJECTION: OnceLock<String> = OnceLock::new();
        PROJECTION.get_or_init(|| {
            [
                Columns::Id,
                Columns::AdminId,
                Columns::Secret,
                Columns::ExpiresAt,
                Columns::CreatedAt,
            ]
            .iter()
            .map(Columns::as_str)
            .collect::<Vec<_>>()
            .join(", ")
        })
    }

    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<AccessToken> {
        |row| {
            Ok(AccessToken {
                id: row.get(Columns::Id.as_str())?,
                admin_id: row.get(Columns::AdminId.as_str())?,
                secret: row.get(Columns::Secret.as_str())?,
                expires_at: row.get(Columns::ExpiresAt.as_str())?,
                created_at: row.get(Columns::CreatedAt.as_str())?,
            })
        }
    }

    pub fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires_at <= now
    }
}
