use super::{Envelope, RestResult as Res};
use crate::db::daily_report::schema::{Counters, DailyReport, MonthlyRollup, YearlyRollup};
use crate::db::SortOrder;
use crate::service;
use actix_web::web::{Data, Json, Path, Query};
use actix_web::{delete, get, post, HttpRequest};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Serialize)]
pub struct CountersView {
    pub stblkk: i64,
    pub pb: i64,
    pub asuransi_baru: i64,
    pub asuransi_lama: i64,
    pub bbm_subsidi_surat: i64,
    pub bbm_non_surat: i64,
}

impl From<Counters> for CountersView {
    fn from(val: Counters) -> Self {
        CountersView {
            stblkk: val.stblkk,
            pb: val.pb,
            asuransi_baru: val.asuransi_baru,
            asuransi_lama: val.asuransi_lama,
            bbm_subsidi_surat: val.bbm_subsidi_surat,
            bbm_non_surat: val.bbm_non_surat,
        }
    }
}

#[derive(Serialize)]
pub struct DailyReportView {
    pub id: i64,
    pub tanggal: String,
    #[serde(flatten)]
    pub counters: CountersView,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<DailyReport> for DailyReportView {
    fn from(val: DailyReport) -> Self {
        DailyReportView {
            id: val.id,
            tanggal: val.tanggal.to_string(),
            counters: val.counters.into(),
            created_at: val.created_at,
            updated_at: val.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct MonthlyRollupView {
    pub bulan: u8,
    #[serde(flatten)]
    pub counters: CountersView,
}

impl From<MonthlyRollup> for MonthlyRollupView {
    fn from(val: MonthlyRollup) -> Self {
        MonthlyRollupView {
            bulan: val.bulan,
            counters: val.counters.into(),
        }
    }
}

#[derive(Serialize)]
pub struct YearlyRollupView {
    pub tahun: i32,
    #[serde(flatten)]
    pub counters: CountersView,
}

impl From<YearlyRollup> for YearlyRollupView {
    fn from(val: YearlyRollup) -> Self {
        YearlyRollupView {
            tahun: val.tahun,
            counters: val.counters.into(),
        }
    }
}

// Absent and null counters are stored as 0
#[derive(Deserialize)]
pub struct PostArgs {
    pub tanggal: Option<String>,
    pub stblkk: Option<i64>,
    pub pb: Option<i64>,
    pub asuransi_baru: Option<i64>,
    pub asuransi_lama: Option<i64>,
    pub bbm_subsidi_surat: Option<i64>,
    pub bbm_non_surat: Option<i64>,
}

impl PostArgs {
    fn counters(&self) -> Counters {
        Counters {
            stblkk: self.stblkk.unwrap_or(0),
            pb: self.pb.unwrap_or(0),
            asuransi_baru: self.asuransi_baru.unwrap_or(0),
            asuransi_lama: self.asuransi_lama.unwrap_or(0),
            bbm_subsidi_surat: self.bbm_subsidi_surat.unwrap_or(0),
            bbm_non_surat: self.bbm_non_surat.unwrap_or(0),
        }
    }
}

#[post("")]
pub async fn post(
    req: HttpRequest,
    args: Json<PostArgs>,
    pool: Data<Pool>,
) -> Res<DailyReportView> {
    service::admin::check(&req, &pool).await?;
    let report =
        service::daily_report::save(args.tanggal.as_deref(), args.counters(), &pool).await?;
    Ok(Envelope::data_with_message(report.into(), "Data berhasil disimpan"))
}

#[derive(Deserialize)]
pub struct GetArgs {
    start: Option<String>,
    end: Option<String>,
    order: Option<SortOrder>,
    limit: Option<i64>,
    offset: Option<i64>,
}

#[get("")]
pub async fn get(args: Query<GetArgs>, pool: Data<Pool>) -> Res<Vec<DailyReportView>> {
    let reports = service::daily_report::list(
        args.start.as_deref(),
        args.end.as_deref(),
        args.order.unwrap_or_default(),
        args.limit,
        args.offset,
        &pool,
    )
    .await?;
    Ok(Envelope::data(
        reports.into_iter().map(DailyReportView::from).collect(),
    ))
}

#[get("detail/{tanggal}")]
pub async fn get_by_date(
    req: HttpRequest,
    tanggal: Path<String>,
    pool: Data<Pool>,
) -> Res<DailyReportView> {
    service::admin::check(&req, &pool).await?;
    let report = service::daily_report::get(&tanggal, &pool).await?;
    Ok(Envelope::data(report.into()))
}

#[delete("{tanggal}")]
pub async fn delete(req: HttpRequest, tanggal: Path<String>, pool: Data<Pool>) -> Res<()> {
    service::admin::check(&req, &pool).await?;
    service::daily_report::delete(&tanggal, &pool).await?;
    Ok(Envelope::message("Data berhasil dihapus"))
}

#[get("rekap/bulanan/{tahun}")]
pub async fn get_monthly_rollup(
    tahun: Path<i32>,
    pool: Data<Pool>,
) -> Res<Vec<MonthlyRollupView>> {
    let rollup = service::daily_report::monthly_rollup(tahun.into_inner(), &pool).await?;
    Ok(Envelope::data(
        rollup.into_iter().map(MonthlyRollupView::from).collect(),
    ))
}

#[get("rekap/tahunan")]
pub async fn get_yearly_rollup(pool: Data<Pool>) -> Res<Vec<YearlyRollupView>> {
    let rollup = service::daily_report::yearly_rollup(&pool).await?;
    Ok(Envelope::data(
        rollup.into_iter().map(YearlyRollupView::from).collect(),
    ))
}
