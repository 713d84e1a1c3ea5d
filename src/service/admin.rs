use crate::db::{self, access_token::schema::AccessToken, admin::schema::Admin, conf::schema::Conf};
use crate::{Error, Result};
use actix_web::web::Query;
use actix_web::HttpRequest;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use deadpool_sqlite::Pool;
use rusqlite::Connection;
use serde::Deserialize;
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};
use uuid::Uuid;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Username atau password salah";

pub struct Session {
    pub admin: Admin,
    pub token: AccessToken,
}

pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|it| it.to_string())
        .map_err(|e| Error::Generic(format!("Failed to hash password: {e}")))
}

fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            warn!(error = e.to_string(), "Stored password is not an argon2 hash");
            false
        }
    }
}

pub fn add(name: &str, password: &str, conn: &Connection) -> Result<Admin> {
    let name = name.trim();
    if name.is_empty() || password.is_empty() {
        Err(Error::invalid_input(
            "Username dan password tidak boleh kosong",
        ))?
    }
    if db::admin::blocking_queries::select_by_name(name, conn)?.is_some() {
        Err(Error::invalid_input(format!("Admin {name} already exists")))?
    }
    let admin = db::admin::blocking_queries::insert(name, &hash_password(password)?, conn)?;
    info!(admin_id = admin.id, admin_name = admin.name, "Added admin");
    Ok(admin)
}

/// Issues a new session token. Unknown names and wrong passwords share one
/// error so callers can't tell which names exist.
pub async fn login(
    username: Option<&str>,
    password: Option<&str>,
    conf: &Conf,
    pool: &Pool,
) -> Result<AccessToken> {
    let (username, password) = match (username.map(str::trim), password) {
        (Some(username), Some(password)) if !username.is_empty() && !password.is_empty() => {
            (username, password)
        }
        _ => Err(Error::invalid_input(
            "Username dan password tidak boleh kosong",
        ))?,
    };
    let now = OffsetDateTime::now_utc();
    let removed = db::access_token::queries::delete_expired(now, pool).await?;
    if removed > 0 {
        info!(removed, "Removed expired access tokens");
    }
    let admin = db::admin::queries::select_by_name(username.into(), pool).await?;
    let admin = match admin {
        Some(admin) if verify_password(password, &admin.password) => admin,
        _ => {
            warn!(username, "Failed login attempt");
            Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE))?
        }
    };
    let expires_at = now + Duration::seconds(conf.session_ttl_secs);
    let token = db::access_token::queries::insert(
        admin.id,
        Uuid::new_v4().to_string(),
        expires_at,
        pool,
    )
    .await?;
    info!(admin_id = admin.id, admin_name = admin.name, "Admin logged in");
    Ok(token)
}

#[derive(Deserialize)]
struct TokenArgs {
    token: Option<String>,
}

fn get_secret(req: &HttpRequest) -> Option<String> {
    let from_header = req
        .headers()
        .get("Authorization")
        .and_then(|it| it.to_str().ok())
        .and_then(|it| it.split_once(' '))
        .map(|(_, secret)| secret.trim().to_string());
    from_header.filter(|it| !it.is_empty()).or_else(|| {
        Query::<TokenArgs>::from_query(req.query_string())
            .ok()
            .and_then(|it| it.into_inner().token)
            .filter(|it| !it.is_empty())
    })
}

/// Resolves the admin behind the bearer token or the `token` query argument.
pub async fn check(req: &HttpRequest, pool: &Pool) -> Result<Session> {
    let secret = get_secret(req).ok_or_else(|| Error::unauthorized("Token tidak ditemukan"))?;
    let token = db::access_token::queries::select_by_secret(secret, pool)
        .await?
        .filter(|it| !it.is_expired(OffsetDateTime::now_utc()))
        .ok_or_else(|| Error::unauthorized("Token tidak valid atau expired"))?;
    let admin = db::admin::queries::select_by_id(token.admin_id, pool)
        .await?
        .ok_or_else(|| Error::unauthorized("Token tidak valid atau expired"))?;
    Ok(Session { admin, token })
}

pub async fn logout(req: &HttpRequest, pool: &Pool) -> Result<()> {
    let session = check(req, pool).await?;
    db::access_token::queries::delete_by_secret(session.token.secret, pool).await?;
    info!(
        admin_id = session.admin.id,
        admin_name = session.admin.name,
        "Admin logged out",
    );
    Ok(())
}

pub async fn warn_if_no_admins(pool: &Pool) -> Result<()> {
    if db::admin::queries::count(pool).await? == 0 {
        warn!("No admins found, use the add-admin command to create one");
    }
    Ok(())
}
