use rusqlite::Row;
use std::sync::OnceLock;
use time::OffsetDateTime;

pub const TABLE_NAME: &str = "ikan";

pub enum Columns {
    Id,
    NamaIkan,
    Jumlah,
    Foto,
    CreatedAt,
    UpdatedAt,
}

impl Columns {
    pub fn as_str(&self) -> &'static str {
        match self {
            Columns::Id => "id",
            Columns::NamaIkan => "nama_ikan",
            Columns::Jumlah => "jumlah",
            Columns::Foto => "foto",
            Columns::CreatedAt => "created_at",
            Columns::UpdatedAt => "updated_at",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fish {
    pub id: i64,
    pub nama_ikan: String,
    pub jumlah: i64,
    pub foto: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Fish {
    pub fn projection() -> &'static str {
        static PROJECTION: OnceLock<String> = OnceLock::new();
        PROJECTION.get_or_init(|| {
            [
                Columns::Id,
                Columns::NamaIkan,
                Columns::Jumlah,
                Columns::Foto,
                Columns::CreatedAt,
                Columns::UpdatedAt,
            ]
            .iter()
            .map(Columns::as_str)
            .collect::<Vec<_>>()
            .join(", ")
        })
    }

    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<Fish> {
        |row| {
            Ok(Fish {
                id: row.get(Columns::Id.as_str())?,
                nama_ikan: row.get(Columns::NamaIkan.as_str())?,
                jumlah: row.get(Columns::Jumlah.as_str())?,
                foto: row.get(Columns::Foto.as_str())?,
                created_at: row.get(Columns::CreatedAt.as_str())?,
                updated_at: row.get(Columns::UpdatedAt.as_str())?,
            })
        }
    }
}
