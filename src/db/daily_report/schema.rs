use rusqlite::Row;
use std::sync::OnceLock;
use time::{Date, OffsetDateTime};

pub const TABLE_NAME: &str = "laporan_harian";

pub enum Columns {
    Id,
    Tanggal,
    Stblkk,
    Pb,
    AsuransiBaru,
    AsuransiLama,
    BbmSubsidiSurat,
    BbmNonSurat,
    CreatedAt,
    UpdatedAt,
}

impl Columns {
    pub fn as_str(&self) -> &'static str {
        match self {
            Columns::Id => "id",
            Columns::Tanggal => "tanggal",
            Columns::Stblkk => "stblkk",
            Columns::Pb => "pb",
            Columns::AsuransiBaru => "asuransi_baru",
            Columns::AsuransiLama => "asuransi_lama",
            Columns::BbmSubsidiSurat => "bbm_subsidi_surat",
            Columns::BbmNonSurat => "bbm_non_surat",
            Columns::CreatedAt => "created_at",
            Columns::UpdatedAt => "updated_at",
        }
    }

    pub const COUNTERS: [Columns; 6] = [
        Columns::Stblkk,
        Columns::Pb,
        Columns::AsuransiBaru,
        Columns::AsuransiLama,
        Columns::BbmSubsidiSurat,
        Columns::BbmNonSurat,
    ];
}

/// The six daily counters: permits (STBLKK, PB), insurance (new and renewed)
/// and fuel recommendations (subsidized with letter, non-subsidized).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counters {
    pub stblkk: i64,
    pub pb: i64,
    pub asuransi_baru: i64,
    pub asuransi_lama: i64,
    pub bbm_subsidi_surat: i64,
    pub bbm_non_surat: i64,
}

impl Counters {
    /// Comma separated `SUM(col) AS col` list, column names are kept so the
    /// same row mapper works for plain rows and rollups.
    pub fn sum_projection() -> &'static str {
        static PROJECTION: OnceLock<String> = OnceLock::new();
        PROJECTION.get_or_init(|| {
            Columns::COUNTERS
                .iter()
                .map(|it| format!("SUM({col}) AS {col}", col = it.as_str()))
                .collect::<Vec<_>>()
                .join(", ")
        })
    }

    fn from_row(row: &Row) -> rusqlite::Result<Counters> {
        Ok(Counters {
            stblkk: row.get(Columns::Stblkk.as_str())?,
            pb: row.get(Columns::Pb.as_str())?,
            asuransi_baru: row.get(Columns::AsuransiBaru.as_str())?,
            asuransi_lama: row.get(Columns::AsuransiLama.as_str())?,
            bbm_subsidi_surat: row.get(Columns::BbmSubsidiSurat.as_str())?,
            bbm_non_surat: row.get(Columns::BbmNonSurat.as_str())?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyReport {
    pub id: i64,
    pub tanggal: Date,
    pub counters: Counters,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl DailyReport {
    pub fn projection() -> &'static str {
        static PROJECTION: OnceLock<String> = OnceLock::new();
        PROJECTION.get_or_init(|| {
            [
                Columns::Id,
                Columns::Tanggal,
                Columns::Stblkk,
                Columns::Pb,
                Columns::AsuransiBaru,
                Columns::AsuransiLama,
                Columns::BbmSubsidiSurat,
                Columns::BbmNonSurat,
                Columns::CreatedAt,
                Columns::UpdatedAt,
            ]
            .iter()
            .map(Columns::as_str)
            .collect::<Vec<_>>()
            .join(", ")
        })
    }

    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<DailyReport> {
        |row| {
            Ok(DailyReport {
                id: row.get(Columns::Id.as_str())?,
                tanggal: row.get(Columns::Tanggal.as_str())?,
                counters: Counters::from_row(row)?,
                created_at: row.get(Columns::CreatedAt.as_str())?,
                updated_at: row.get(Columns::UpdatedAt.as_str())?,
            })
        }
    }
}

pub const MONTH_ALIAS: &str = "bulan";
pub const YEAR_ALIAS: &str = "tahun";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyRollup {
    pub bulan: u8,
    pub counters: Counters,
}

impl MonthlyRollup {
    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<MonthlyRollup> {
        |row| {
            Ok(MonthlyRollup {
                bulan: row.get(MONTH_ALIAS)?,
                counters: Counters::from_row(row)?,
            })
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearlyRollup {
    pub tahun: i32,
    pub counters: Counters,
}

impl YearlyRollup {
    pub const fn mapper() -> fn(&Row) -> rusqlite::Result<YearlyRollup> {
        |row| {
            Ok(YearlyRollup {
                tahun: row.get(YEAR_ALIAS)?,
                counters: Counters::from_row(row)?,
            })
        }
    }
}
