use crate::{Error, Result};
use actix_web::web::Json;
use actix_web::HttpResponse;
use serde::Serialize;

pub mod admin;
pub mod daily_report;
pub mod fish;

pub type RestResult<T> = Result<Json<Envelope<T>>>;

/// Every response body has this shape, errors are rendered the same way by
/// the `ResponseError` impl.
#[derive(Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn data(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            message: None,
        })
    }

    pub fn data_with_message(data: T, message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        })
    }
}

impl Envelope<()> {
    pub fn message(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            data: None,
            message: Some(message.into()),
        })
    }
}

pub async fn not_found() -> HttpResponse {
    actix_web::ResponseError::error_response(&Error::not_found("Route tidak ditemukan"))
}
