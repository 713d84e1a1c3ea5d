use crate::error::{json_error_handler, path_error_handler, query_error_handler};
use crate::service::photo::PhotoStore;
use crate::{db, rest, service, Result};
use actix_web::dev::Service;
use actix_web::web::{scope, to, JsonConfig, PathConfig, QueryConfig};
use actix_web::{
    middleware::{Compress, NormalizePath},
    web::Data,
    App, HttpServer,
};
use futures_util::future::FutureExt;
use std::env;
use time::OffsetDateTime;
use tracing::info;

const BIND_ENV: &str = "PERIKANAN_BIND";
const DEFAULT_BIND: &str = "127.0.0.1:3000";

// Base64 photos inflate request bodies
const JSON_LIMIT_BYTES: usize = 16 * 1024 * 1024;

pub async fn run() -> Result<()> {
    // All the worker threads are sharing a single connection pool
    let pool = db::pool()?;
    let conf = Data::new(db::conf::queries::select(&pool).await?);
    let photos = Data::new(PhotoStore::open()?);
    service::admin::warn_if_no_admins(&pool).await?;

    let bind = env::var(BIND_ENV).unwrap_or_else(|_| DEFAULT_BIND.into());
    info!(bind, "Starting server");

    HttpServer::new(move || {
        App::new()
            .wrap_fn(|req, srv| {
                let req_query_string = req.query_string().to_string();
                let req_method = req.method().as_str().to_string();
                let req_path = req.path().to_string();
                let req_time = OffsetDateTime::now_utc();
                let req_ip = req
                    .connection_info()
                    .realip_remote_addr()
                    .unwrap_or_default()
                    .to_string();
                srv.call(req).map(move |res| {
                    if let Ok(res) = res.as_ref() {
                        let res_status = res.status().as_u16();
                        let res_time_sec = (OffsetDateTime::now_utc() - req_time).as_seconds_f64();
                        info!(
                            req_query_string,
                            req_method,
                            req_path,
                            req_ip,
                            res_status,
                            res_time_sec,
                        );
                    }
                    res
                })
            })
            .wrap(NormalizePath::trim())
            .wrap(Compress::default())
            .app_data(Data::new(pool.clone()))
            .app_data(conf.clone())
            .app_data(photos.clone())
            .app_data(QueryConfig::default().error_handler(query_error_handler))
            .app_data(PathConfig::default().error_handler(path_error_handler))
            .app_data(
                JsonConfig::default()
                    .limit(JSON_LIMIT_BYTES)
                    .error_handler(json_error_handler),
            )
            .service(
                scope("api")
                    .service(
                        scope("laporan-harian")
                            .service(rest::daily_report::post)
                            .service(rest::daily_report::get)
                            .service(rest::daily_report::get_by_date)
                            .service(rest::daily_report::get_monthly_rollup)
                            .service(rest::daily_report::get_yearly_rollup)
                            .service(rest::daily_report::delete),
                    )
                    .service(
                        scope("ikan")
                            .service(rest::fish::get)
                            .service(rest::fish::get_by_id)
                            .service(rest::fish::post)
                            .service(rest::fish::put)
                            .service(rest::fish::delete),
                    )
                    .service(
                        scope("admin")
                            .service(rest::admin::login)
                            .service(rest::admin::verify)
                            .service(rest::admin::logout),
                    ),
            )
            .default_service(to(rest::not_found))
    })
    .bind(bind.as_str())?
    .run()
    .await?;

    Ok(())
}
