use crate::db::conf::schema::Conf;
use crate::{service, Result};
use actix_web::web::{Data, Json};
use actix_web::{get, post, HttpRequest};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Deserialize)]
pub struct LoginArgs {
    username: Option<String>,
    password: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct LoginRes {
    pub success: bool,
    pub token: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    pub message: String,
}

#[post("login")]
pub async fn login(
    args: Json<LoginArgs>,
    conf: Data<Conf>,
    pool: Data<Pool>,
) -> Result<Json<LoginRes>> {
    let token = service::admin::login(
        args.username.as_deref(),
        args.password.as_deref(),
        &conf,
        &pool,
    )
    .await?;
    Ok(Json(LoginRes {
        success: true,
        token: token.secret,
        expires_at: token.expires_at,
        message: "Login berhasil".into(),
    }))
}

#[derive(Serialize, Deserialize)]
pub struct VerifyRes {
    pub success: bool,
    pub username: String,
    pub message: String,
}

#[get("verify")]
pub async fn verify(req: HttpRequest, pool: Data<Pool>) -> Result<Json<VerifyRes>> {
    let session = service::admin::check(&req, &pool).await?;
    Ok(Json(VerifyRes {
        success: true,
        username: session.admin.name,
        message: "Token valid".into(),
    }))
}

#[post("logout")]
pub async fn logout(req: HttpRequest, pool: Data<Pool>) -> super::RestResult<()> {
    service::admin::logout(&req, &pool).await?;
    Ok(super::Envelope::message("Logout berhasil"))
}
