use rusqlite::Row;
use std::sync::OnceLock;

pub const TABLE_NAME: &str = "conf";

pub enum Columns {
    SessionTtlSecs,
    MaxPhotoBytes,
}

impl Columns {
    pub fn as_str(&self) -> &'static str {
        match self {
            Columns::SessionTtlSecs => "session_ttl_secs",
            Columns::MaxPhotoBytes => "max_photo_bytes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conf {
    pub session_ttl_secs: i64,
    pub max_photo_bytes: i64,
}

impl Conf {
    pub fn projection() -> &'static str {
        static PROJECTION: OnceLock<String> = OnceLock::new();
        PROJECTION.get_or_init(|| {
            [Columns::SessionTtlSecs, Columns::MaxPhotoBytes]
                .iter()
                .map(Columns::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
    }

    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<Self> {
        |row| {
            Ok(Self {
                session_ttl_secs: row.get(Columns::SessionTtlSecs.as_str())?,
                max_photo_bytes: row.get(Columns::MaxPhotoBytes.as_str())?,
            })
        }
    }

    #[cfg(test)]
    pub fn mock() -> Conf {
        Conf {
            session_ttl_secs: 3600,
            max_photo_bytes: 1024,
        }
    }
}
