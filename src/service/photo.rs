use crate::service::filesystem;
use crate::{Error, Result};
use actix_web::web;
use base64::{engine::general_purpose::STANDARD, Engine};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{info, warn};
use uuid::Uuid;

pub const UPLOADS_DIR: &str = "uploads";

/// Fish photos on disk. Rows keep the path relative to `root`, such as
/// `uploads/<uuid>.png`, the same path the reverse proxy serves them from.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn open() -> Result<Self> {
        Ok(Self::new(filesystem::data_dir()?))
    }

    /// Decodes on the caller's thread, the file writes go to the blocking pool.
    pub async fn save_data_url(&self, data_url: &str, max_bytes: i64) -> Result<String> {
        let (extension, bytes) = decode_data_url(data_url, max_bytes)?;
        let dir = self.root.join(UPLOADS_DIR);
        let file_name = format!("{}.{extension}", Uuid::new_v4());
        let path = dir.join(&file_name);
        let len = bytes.len();
        web::block(move || -> Result<()> {
            fs::create_dir_all(&dir)?;
            fs::write(path, bytes)?;
            Ok(())
        })
        .await??;
        let stored_path = format!("{UPLOADS_DIR}/{file_name}");
        info!(stored_path, bytes = len, "Saved photo");
        Ok(stored_path)
    }

    /// Missing files are fine, the row is the source of truth.
    pub async fn remove(&self, stored_path: &str) -> Result<()> {
        let Some(file_name) = stored_file_name(stored_path) else {
            warn!(stored_path, "Refusing to remove a file outside of uploads");
            return Ok(());
        };
        let path = self.root.join(UPLOADS_DIR).join(file_name);
        match web::block(move || fs::remove_file(path)).await? {
            Ok(()) => {
                info!(stored_path, "Removed photo");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn stored_file_name(stored_path: &str) -> Option<&str> {
    let file_name = stored_path.strip_prefix(UPLOADS_DIR)?.strip_prefix('/')?;
    let valid = !file_name.is_empty()
        && !file_name.starts_with('.')
        && file_name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    valid.then_some(file_name)
}

/// Accepts `data:image/<type>;base64,<payload>` as produced by browser file readers.
pub fn decode_data_url(data_url: &str, max_bytes: i64) -> Result<(&'static str, Vec<u8>)> {
    let (header, payload) = data_url
        .strip_prefix("data:")
        .and_then(|it| it.split_once(','))
        .ok_or_else(|| Error::invalid_input("Foto harus berupa data URL"))?;
    let mime = header
        .strip_suffix(";base64")
        .ok_or_else(|| Error::invalid_input("Foto harus di-encode dengan base64"))?;
    let extension = match mime.to_ascii_lowercase().as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" => "jpg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => Err(Error::invalid_input(format!(
            "Format foto tidak didukung: {mime}"
        )))?,
    };
    let too_large = || Error::invalid_input(format!("Ukuran foto melebihi {max_bytes} byte"));
    // base64 is 4 chars per 3 bytes, reject before allocating
    if (payload.len() / 4 * 3) as i64 > max_bytes + 3 {
        Err(too_large())?
    }
    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| Error::invalid_input(format!("Foto tidak valid: {e}")))?;
    if bytes.is_empty() {
        Err(Error::invalid_input("Foto kosong"))?
    }
    if bytes.len() as i64 > max_bytes {
        Err(too_large())?
    }
    Ok((extension, bytes))
}

pub fn is_data_url(value: &str) -> bool {
    value.starts_with("data:")
}
