use super::{
    blocking_queries,
    schema::{Counters, DailyReport, MonthlyRollup, YearlyRollup},
};
use crate::db::SortOrder;
use crate::Result;
use deadpool_sqlite::Pool;
use time::Date;

pub async fn upsert(tanggal: Date, counters: Counters, pool: &Pool) -> Result<DailyReport> {
    pool.get()
        .await?
        .interact(move |conn| blocking_queries::upsert(tanggal, &counters, conn))
        .await?
}

pub async fn select_by_date(tanggal: Date, pool: &Pool) -> Result<Option<DailyReport>> {
    pool.get()
        .await?
        .interact(move |conn| blocking_queries::select_by_date(tanggal, conn))
        .await?
}

pub async fn select_by_date_range(
    start: Option<Date>,
    end: Option<Date>,
    sort_order: SortOrder,
    limit: Option<i64>,
    offset: Option<i64>,
    pool: &Pool,
) -> Result<Vec<DailyReport>> {
    pool.get()
        .await?
        .interact(move |conn| {
            blocking_queries::select_by_date_range(start, end, sort_order, limit, offset, conn)
        })
        .await?
}

pub async fn delete_by_date(tanggal: Date, pool: &Pool) -> Result<usize> {
    pool.get()
        .await?
        .interact(move |conn| blocking_queries::delete_by_date(tanggal, conn))
        .await?
}

pub async fn select_monthly_rollup(year: i32, pool: &Pool) -> Result<Vec<MonthlyRollup>> {
    pool.get()
        .await?
        .interact(move |conn| blocking_queries::select_monthly_rollup(year, conn))
        .await?
}

pub async fn select_yearly_rollup(pool: &Pool) -> Result<Vec<YearlyRollup>> {
    pool.get()
        .await?
        .interact(|conn| blocking_queries::select_yearly_rollup(conn))
        .await?
}
