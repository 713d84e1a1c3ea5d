use crate::db::daily_report::schema::{Counters, DailyReport, MonthlyRollup, YearlyRollup};
use crate::db::{self, SortOrder};
use crate::{Error, Result};
use deadpool_sqlite::Pool;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::Date;
use tracing::info;

pub const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub const NOT_FOUND_MESSAGE: &str = "Data tidak ditemukan";

pub fn parse_date(value: &str) -> Result<Date> {
    let invalid = || {
        Error::invalid_input(format!(
            "Tanggal tidak valid: {value}, gunakan format YYYY-MM-DD"
        ))
    };
    let trimmed = value.trim();
    // [year] takes an optional sign, dates here are unsigned
    if !trimmed.starts_with(|it: char| it.is_ascii_digit()) {
        Err(invalid())?
    }
    let date = Date::parse(trimmed, DATE_FORMAT).map_err(|_| invalid())?;
    validate_year(date.year()).map_err(|_| invalid())?;
    Ok(date)
}

fn parse_optional_date(value: Option<&str>) -> Result<Option<Date>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_date(value).map(Some),
    }
}

pub fn validate_counters(counters: Counters) -> Result<Counters> {
    let named = [
        ("stblkk", counters.stblkk),
        ("pb", counters.pb),
        ("asuransi_baru", counters.asuransi_baru),
        ("asuransi_lama", counters.asuransi_lama),
        ("bbm_subsidi_surat", counters.bbm_subsidi_surat),
        ("bbm_non_surat", counters.bbm_non_surat),
    ];
    for (name, value) in named {
        if value < 0 {
            Err(Error::invalid_input(format!(
                "Nilai {name} tidak boleh negatif"
            )))?
        }
    }
    Ok(counters)
}

pub fn validate_year(year: i32) -> Result<i32> {
    if !(0..=9999).contains(&year) {
        Err(Error::invalid_input(format!("Tahun tidak valid: {year}")))?
    }
    Ok(year)
}

/// Stores the counters for a date. An existing row for that date is fully
/// replaced, counters missing from the request are expected to be zero here.
pub async fn save(tanggal: Option<&str>, counters: Counters, pool: &Pool) -> Result<DailyReport> {
    let tanggal = match tanggal.map(str::trim) {
        None | Some("") => Err(Error::invalid_input("Tanggal harus diisi"))?,
        Some(tanggal) => parse_date(tanggal)?,
    };
    let counters = validate_counters(counters)?;
    let report = db::daily_report::queries::upsert(tanggal, counters, pool).await?;
    info!(
        tanggal = report.tanggal.to_string(),
        id = report.id,
        "Saved daily report",
    );
    Ok(report)
}

pub async fn list(
    start: Option<&str>,
    end: Option<&str>,
    sort_order: SortOrder,
    limit: Option<i64>,
    offset: Option<i64>,
    pool: &Pool,
) -> Result<Vec<DailyReport>> {
    let start = parse_optional_date(start)?;
    let end = parse_optional_date(end)?;
    if limit.is_some_and(|it| it < 0) || offset.is_some_and(|it| it < 0) {
        Err(Error::invalid_input("limit dan offset tidak boleh negatif"))?
    }
    db::daily_report::queries::select_by_date_range(start, end, sort_order, limit, offset, pool)
        .await
}

pub async fn get(tanggal: &str, pool: &Pool) -> Result<DailyReport> {
    let tanggal = parse_date(tanggal)?;
    db::daily_report::queries::select_by_date(tanggal, pool)
        .await?
        .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
}

pub async fn delete(tanggal: &str, pool: &Pool) -> Result<()> {
    let tanggal = parse_date(tanggal)?;
    if db::daily_report::queries::delete_by_date(tanggal, pool).await? == 0 {
        Err(Error::not_found(NOT_FOUND_MESSAGE))?
    }
    info!(tanggal = tanggal.to_string(), "Deleted daily report");
    Ok(())
}

pub async fn monthly_rollup(year: i32, pool: &Pool) -> Result<Vec<MonthlyRollup>> {
    db::daily_report::queries::select_monthly_rollup(validate_year(year)?, pool).await
}

pub async fn yearly_rollup(pool: &Pool) -> Result<Vec<YearlyRollup>> {
    db::daily_report::queries::select_yearly_rollup(pool).await
}

#[cfg(test)]
mod test {
    use crate::db::daily_report::schema::Counters;
    use crate::db::test::pool;
    use crate::db::SortOrder;
    use crate::{Error, Result};
    use time::macros::date;

    #[test]
    fn parse_date() -> Result<()> {
        assert_eq!(date!(2024 - 01 - 15), super::parse_date("2024-01-15")?);
        assert_eq!(date!(2024 - 02 - 29), super::parse_date(" 2024-02-29 ")?);
        for input in [
            "",
            "15-01-2024",
            "2023-02-29",
            "2024-01-15T00:00:00Z",
            "-0001-01-01",
            "+2024-01-15",
        ] {
            assert!(
                matches!(super::parse_date(input), Err(Error::InvalidInput(_))),
                "{input}"
            );
        }
        Ok(())
    }

    #[test]
    fn validate_counters() {
        assert!(super::validate_counters(Counters::default()).is_ok());
        let negative = Counters {
            bbm_non_surat: -1,
            ..Counters::default()
        };
        assert!(matches!(
            super::validate_counters(negative),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn validate_year() {
        assert!(super::validate_year(0).is_ok());
        assert!(super::validate_year(2024).is_ok());
        assert!(super::validate_year(9999).is_ok());
        assert!(super::validate_year(-1).is_err());
        assert!(super::validate_year(10000).is_err());
    }

    #[actix_web::test]
    async fn save_requires_date() -> Result<()> {
        let pool = pool();
        for tanggal in [None, Some(""), Some("  ")] {
            let res = super::save(tanggal, Counters::default(), &pool).await;
            assert!(matches!(
                res,
                Err(Error::InvalidInput(ref message)) if message == "Tanggal harus diisi"
            ));
        }
        assert!(matches!(
            super::save(Some("kemarin"), Counters::default(), &pool).await,
            Err(Error::InvalidInput(_))
        ));
        assert!(super::list(None, None, SortOrder::Desc, None, None, &pool)
            .await?
            .is_empty());
        Ok(())
    }

    #[actix_web::test]
    async fn save_rejects_signed_years() -> Result<()> {
        let pool = pool();
        for tanggal in ["-0001-01-01", "+2024-01-15"] {
            assert!(matches!(
                super::save(Some(tanggal), Counters::default(), &pool).await,
                Err(Error::InvalidInput(_))
            ));
        }
        assert!(super::yearly_rollup(&pool).await?.is_empty());
        Ok(())
    }

    #[actix_web::test]
    async fn save_replaces_existing_date() -> Result<()> {
        let pool = pool();
        let first = super::save(
            Some("2024-01-15"),
            Counters {
                stblkk: 5,
                ..Counters::default()
            },
            &pool,
        )
        .await?;
        let second = super::save(
            Some("2024-01-15"),
            Counters {
                pb: 9,
                ..Counters::default()
            },
            &pool,
        )
        .await?;
        assert_eq!(first.id, second.id);
        let stored = super::get("2024-01-15", &pool).await?;
        assert_eq!(0, stored.counters.stblkk);
        assert_eq!(9, stored.counters.pb);
        Ok(())
    }

    #[actix_web::test]
    async fn list_validates_arguments() -> Result<()> {
        let pool = pool();
        assert!(matches!(
            super::list(Some("2024-13-01"), None, SortOrder::Asc, None, None, &pool).await,
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            super::list(None, None, SortOrder::Asc, Some(-1), None, &pool).await,
            Err(Error::InvalidInput(_))
        ));
        assert!(super::list(Some(""), Some(""), SortOrder::Asc, None, None, &pool)
            .await?
            .is_empty());
        Ok(())
    }

    #[actix_web::test]
    async fn list_orders_by_caller_choice() -> Result<()> {
        let pool = pool();
        for tanggal in ["2024-01-10", "2024-01-12", "2024-01-11"] {
            super::save(Some(tanggal), Counters::default(), &pool).await?;
        }
        let asc = super::list(None, None, SortOrder::Asc, None, None, &pool).await?;
        let desc = super::list(None, None, SortOrder::Desc, None, None, &pool).await?;
        assert_eq!(
            vec![date!(2024 - 01 - 10), date!(2024 - 01 - 11), date!(2024 - 01 - 12)],
            asc.iter().map(|it| it.tanggal).collect::<Vec<_>>(),
        );
        assert_eq!(
            vec![date!(2024 - 01 - 12), date!(2024 - 01 - 11), date!(2024 - 01 - 10)],
            desc.iter().map(|it| it.tanggal).collect::<Vec<_>>(),
        );
        Ok(())
    }

    #[actix_web::test]
    async fn delete_twice() -> Result<()> {
        let pool = pool();
        super::save(Some("2024-01-15"), Counters::default(), &pool).await?;
        super::delete("2024-01-15", &pool).await?;
        assert!(matches!(
            super::get("2024-01-15", &pool).await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            super::delete("2024-01-15", &pool).await,
            Err(Error::NotFound(_))
        ));
        Ok(())
    }

    #[actix_web::test]
    async fn rollups() -> Result<()> {
        let pool = pool();
        let counters = Counters {
            asuransi_baru: 2,
            ..Counters::default()
        };
        for tanggal in ["2023-12-31", "2024-03-01", "2024-03-31", "2024-04-01"] {
            super::save(Some(tanggal), counters, &pool).await?;
        }
        let monthly = super::monthly_rollup(2024, &pool).await?;
        assert_eq!(
            vec![(3, 4), (4, 2)],
            monthly
                .iter()
                .map(|it| (it.bulan, it.counters.asuransi_baru))
                .collect::<Vec<_>>(),
        );
        let yearly = super::yearly_rollup(&pool).await?;
        assert_eq!(
            vec![(2024, 6), (2023, 2)],
            yearly
                .iter()
                .map(|it| (it.tahun, it.counters.asuransi_baru))
                .collect::<Vec<_>>(),
        );
        assert!(matches!(
            super::monthly_rollup(10000, &pool).await,
            Err(Error::InvalidInput(_))
        ));
        Ok(())
    }
}
