use super::schema::{
    self, Columns, Counters, DailyReport, MonthlyRollup, YearlyRollup, MONTH_ALIAS, YEAR_ALIAS,
};
use crate::db::SortOrder;
use crate::Result;
use rusqlite::{named_params, params, Connection, OptionalExtension};
use time::Date;

// A single statement, so two writers racing on the same new date can't both insert
pub fn upsert(tanggal: Date, counters: &Counters, conn: &Connection) -> Result<DailyReport> {
    let sql = format!(
        r#"
            INSERT INTO {table} (
                {tanggal},
                {stblkk},
                {pb},
                {asuransi_baru},
                {asuransi_lama},
                {bbm_subsidi_surat},
                {bbm_non_surat}
            ) VALUES (
                :tanggal,
                :stblkk,
                :pb,
                :asuransi_baru,
                :asuransi_lama,
                :bbm_subsidi_surat,
                :bbm_non_surat
            )
            ON CONFLICT ({tanggal}) DO UPDATE SET
                {stblkk} = excluded.{stblkk},
                {pb} = excluded.{pb},
                {asuransi_baru} = excluded.{asuransi_baru},
                {asuransi_lama} = excluded.{asuransi_lama},
                {bbm_subsidi_surat} = excluded.{bbm_subsidi_surat},
                {bbm_non_surat} = excluded.{bbm_non_surat},
                {updated_at} = strftime('%Y-%m-%dT%H:%M:%fZ')
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        tanggal = Columns::Tanggal.as_str(),
        stblkk = Columns::Stblkk.as_str(),
        pb = Columns::Pb.as_str(),
        asuransi_baru = Columns::AsuransiBaru.as_str(),
        asuransi_lama = Columns::AsuransiLama.as_str(),
        bbm_subsidi_surat = Columns::BbmSubsidiSurat.as_str(),
        bbm_non_surat = Columns::BbmNonSurat.as_str(),
        updated_at = Columns::UpdatedAt.as_str(),
        projection = DailyReport::projection(),
    );
    conn.query_row(
        &sql,
        named_params! {
            ":tanggal": tanggal.to_string(),
            ":stblkk": counters.stblkk,
            ":pb": counters.pb,
            ":asuransi_baru": counters.asuransi_baru,
            ":asuransi_lama": counters.asuransi_lama,
            ":bbm_subsidi_surat": counters.bbm_subsidi_surat,
            ":bbm_non_surat": counters.bbm_non_surat,
        },
        DailyReport::mapper(),
    )
    .map_err(Into::into)
}

pub fn select_by_date(tanggal: Date, conn: &Connection) -> Result<Option<DailyReport>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE {tanggal} = ?1
        "#,
        projection = DailyReport::projection(),
        table = schema::TABLE_NAME,
        tanggal = Columns::Tanggal.as_str(),
    );
    conn.query_row(&sql, params![tanggal.to_string()], DailyReport::mapper())
        .optional()
        .map_err(Into::into)
}

/// Missing bounds are open ends, present bounds are inclusive.
pub fn select_by_date_range(
    start: Option<Date>,
    end: Option<Date>,
    sort_order: SortOrder,
    limit: Option<i64>,
    offset: Option<i64>,
    conn: &Connection,
) -> Result<Vec<DailyReport>> {
    let sql = format!(
        r#"
            SELECT {projection}
            FROM {table}
            WHERE (:start IS NULL OR {tanggal} >= :start)
                AND (:end IS NULL OR {tanggal} <= :end)
            ORDER BY {tanggal} {sort_order}
            LIMIT :limit
            OFFSET :offset
        "#,
        projection = DailyReport::projection(),
        table = schema::TABLE_NAME,
        tanggal = Columns::Tanggal.as_str(),
    );
    conn.prepare(&sql)?
        .query_map(
            named_params! {
                ":start": start.map(|it| it.to_string()),
                ":end": end.map(|it| it.to_string()),
                ":limit": limit.unwrap_or(i64::MAX),
                ":offset": offset.unwrap_or(0),
            },
            DailyReport::mapper(),
        )?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn delete_by_date(tanggal: Date, conn: &Connection) -> Result<usize> {
    let sql = format!(
        r#"
            DELETE FROM {table}
            WHERE {tanggal} = ?1
        "#,
        table = schema::TABLE_NAME,
        tanggal = Columns::Tanggal.as_str(),
    );
    conn.execute(&sql, params![tanggal.to_string()])
        .map_err(Into::into)
}

pub fn select_monthly_rollup(year: i32, conn: &Connection) -> Result<Vec<MonthlyRollup>> {
    let sql = format!(
        r#"
            SELECT
                CAST(strftime('%m', {tanggal}) AS INTEGER) AS {bulan},
                {sums}
            FROM {table}
            WHERE {tanggal} BETWEEN ?1 AND ?2
            GROUP BY {bulan}
            ORDER BY {bulan} ASC
        "#,
        tanggal = Columns::Tanggal.as_str(),
        bulan = MONTH_ALIAS,
        sums = Counters::sum_projection(),
        table = schema::TABLE_NAME,
    );
    conn.prepare(&sql)?
        .query_map(
            params![format!("{year:04}-01-01"), format!("{year:04}-12-31")],
            MonthlyRollup::mapper(),
        )?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

pub fn select_yearly_rollup(conn: &Connection) -> Result<Vec<YearlyRollup>> {
    let sql = format!(
        r#"
            SELECT
                CAST(strftime('%Y', {tanggal}) AS INTEGER) AS {tahun},
                {sums}
            FROM {table}
            GROUP BY {tahun}
            ORDER BY {tahun} DESC
        "#,
        tanggal = Columns::Tanggal.as_str(),
        tahun = YEAR_ALIAS,
        sums = Counters::sum_projection(),
        table = schema::TABLE_NAME,
    );
    conn.prepare(&sql)?
        .query_map([], YearlyRollup::mapper())?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Into::into)
}

#[cfg(test)]
pub fn insert(tanggal: Date, counters: &Counters, conn: &Connection) -> Result<DailyReport> {
    let sql = format!(
        r#"
            INSERT INTO {table} ({tanggal}, {stblkk}, {pb}, {asuransi_baru}, {asuransi_lama}, {bbm_subsidi_surat}, {bbm_non_surat})
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            RETURNING {projection}
        "#,
        table = schema::TABLE_NAME,
        tanggal = Columns::Tanggal.as_str(),
        stblkk = Columns::Stblkk.as_str(),
        pb = Columns::Pb.as_str(),
        asuransi_baru = Columns::AsuransiBaru.as_str(),
        asuransi_lama = Columns::AsuransiLama.as_str(),
        bbm_subsidi_surat = Columns::BbmSubsidiSurat.as_str(),
        bbm_non_surat = Columns::BbmNonSurat.as_str(),
        projection = DailyReport::projection(),
    );
    conn.query_row(
        &sql,
        params![
            tanggal.to_string(),
            counters.stblkk,
            counters.pb,
            counters.asuransi_baru,
            counters.asuransi_lama,
            counters.bbm_subsidi_surat,
            counters.bbm_non_surat,
        ],
        DailyReport::mapper(),
    )
    .map_err(Into::into)
}
