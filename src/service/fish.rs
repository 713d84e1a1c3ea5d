use crate::db::{self, conf::schema::Conf, fish::schema::Fish};
use crate::service::photo::{self, PhotoStore};
use crate::{Error, Result};
use deadpool_sqlite::Pool;
use tracing::{info, warn};

pub const NOT_FOUND_MESSAGE: &str = "Ikan tidak ditemukan";

pub struct FishInput {
    pub nama_ikan: Option<String>,
    pub jumlah: Option<i64>,
    pub foto: Option<String>,
}

fn validate(input: &FishInput) -> Result<(String, i64)> {
    let nama_ikan = input.nama_ikan.as_deref().map(str::trim).unwrap_or("");
    match input.jumlah {
        Some(jumlah) if !nama_ikan.is_empty() && jumlah > 0 => Ok((nama_ikan.into(), jumlah)),
        _ => Err(Error::invalid_input("Nama ikan dan jumlah harus diisi")),
    }
}

pub async fn list(pool: &Pool) -> Result<Vec<Fish>> {
    db::fish::queries::select_all(pool).await
}

pub async fn get(id: i64, pool: &Pool) -> Result<Fish> {
    db::fish::queries::select_by_id(id, pool)
        .await?
        .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))
}

pub async fn create(
    input: FishInput,
    conf: &Conf,
    photos: &PhotoStore,
    pool: &Pool,
) -> Result<Fish> {
    let (nama_ikan, jumlah) = validate(&input)?;
    let foto = match input.foto.as_deref().filter(|it| !it.is_empty()) {
        Some(data_url) if photo::is_data_url(data_url) => {
            Some(photos.save_data_url(data_url, conf.max_photo_bytes).await?)
        }
        Some(_) => Err(Error::invalid_input("Foto harus berupa data URL"))?,
        None => None,
    };
    match db::fish::queries::insert(nama_ikan, jumlah, foto.clone(), pool).await {
        Ok(fish) => {
            info!(id = fish.id, nama_ikan = fish.nama_ikan, "Created fish");
            Ok(fish)
        }
        Err(e) => {
            discard_photo(foto.as_deref(), photos).await;
            Err(e)
        }
    }
}

/// Full replace. `foto` is either a new data URL, the path that is already
/// stored (kept as is) or empty, which clears the photo.
pub async fn update(
    id: i64,
    input: FishInput,
    conf: &Conf,
    photos: &PhotoStore,
    pool: &Pool,
) -> Result<Fish> {
    let (nama_ikan, jumlah) = validate(&input)?;
    let existing = get(id, pool).await?;
    let foto = match input.foto.as_deref().filter(|it| !it.is_empty()) {
        Some(data_url) if photo::is_data_url(data_url) => {
            Some(photos.save_data_url(data_url, conf.max_photo_bytes).await?)
        }
        Some(path) if existing.foto.as_deref() == Some(path) => existing.foto.clone(),
        Some(_) => Err(Error::invalid_input("Foto harus berupa data URL"))?,
        None => None,
    };
    let fresh_photo = foto.as_deref().filter(|it| existing.foto.as_deref() != Some(*it));
    let updated = match db::fish::queries::update(id, nama_ikan, jumlah, foto.clone(), pool).await
    {
        Ok(Some(updated)) => updated,
        Ok(None) => {
            discard_photo(fresh_photo, photos).await;
            Err(Error::not_found(NOT_FOUND_MESSAGE))?
        }
        Err(e) => {
            discard_photo(fresh_photo, photos).await;
            Err(e)?
        }
    };
    if existing.foto != updated.foto {
        discard_photo(existing.foto.as_deref(), photos).await;
    }
    info!(id = updated.id, nama_ikan = updated.nama_ikan, "Updated fish");
    Ok(updated)
}

pub async fn delete(id: i64, photos: &PhotoStore, pool: &Pool) -> Result<Fish> {
    let deleted = db::fish::queries::delete(id, pool)
        .await?
        .ok_or_else(|| Error::not_found(NOT_FOUND_MESSAGE))?;
    discard_photo(deleted.foto.as_deref(), photos).await;
    info!(id = deleted.id, nama_ikan = deleted.nama_ikan, "Deleted fish");
    Ok(deleted)
}

// The row is already committed, a leftover file is only logged
async fn discard_photo(stored_path: Option<&str>, photos: &PhotoStore) {
    if let Some(stored_path) = stored_path {
        if let Err(e) = photos.remove(stored_path).await {
            warn!(stored_path, error = e.to_string(), "Failed to remove photo");
        }
    }
}

#[cfg(test)]
mod test {
    use super::FishInput;
    use crate::db::conf::schema::Conf;
    use crate::db::test::pool;
    use crate::service::photo::PhotoStore;
    use crate::{Error, Result};
    use base64::{engine::general_purpose::STANDARD, Engine};

    fn input(nama_ikan: &str, jumlah: i64, foto: Option<String>) -> FishInput {
        FishInput {
            nama_ikan: Some(nama_ikan.into()),
            jumlah: Some(jumlah),
            foto,
        }
    }

    fn data_url(bytes: &[u8]) -> String {
        format!("data:image/jpeg;base64,{}", STANDARD.encode(bytes))
    }

    #[test]
    fn validate() -> Result<()> {
        assert_eq!(
            ("Tongkol".to_string(), 3),
            super::validate(&input("  Tongkol ", 3, None))?
        );
        for invalid in [
            input("", 3, None),
            input("   ", 3, None),
            input("Tongkol", 0, None),
            input("Tongkol", -2, None),
            FishInput {
                nama_ikan: Some("Tongkol".into()),
                jumlah: None,
                foto: None,
            },
        ] {
            assert!(matches!(
                super::validate(&invalid),
                Err(Error::InvalidInput(_))
            ));
        }
        Ok(())
    }

    #[actix_web::test]
    async fn create_with_photo() -> Result<()> {
        let pool = pool();
        let dir = tempfile::tempdir()?;
        let photos = PhotoStore::new(dir.path());
        let fish = super::create(
            input("Tongkol", 3, Some(data_url(b"jpeg"))),
            &Conf::mock(),
            &photos,
            &pool,
        )
        .await?;
        let foto = fish.foto.clone().unwrap();
        assert!(foto.ends_with(".jpg"));
        assert_eq!(b"jpeg".to_vec(), std::fs::read(dir.path().join(&foto))?);
        assert_eq!(fish, super::get(fish.id, &pool).await?);
        Ok(())
    }

    #[actix_web::test]
    async fn create_rejects_large_photo() -> Result<()> {
        let pool = pool();
        let dir = tempfile::tempdir()?;
        let photos = PhotoStore::new(dir.path());
        let res = super::create(
            input("Tongkol", 3, Some(data_url(&[0; 2048]))),
            &Conf::mock(),
            &photos,
            &pool,
        )
        .await;
        assert!(matches!(res, Err(Error::InvalidInput(_))));
        assert!(super::list(&pool).await?.is_empty());
        Ok(())
    }

    #[actix_web::test]
    async fn update_replaces_photo() -> Result<()> {
        let pool = pool();
        let dir = tempfile::tempdir()?;
        let photos = PhotoStore::new(dir.path());
        let conf = Conf::mock();
        let fish = super::create(
            input("Tongkol", 3, Some(data_url(b"old"))),
            &conf,
            &photos,
            &pool,
        )
        .await?;
        let old_foto = fish.foto.clone().unwrap();

        let kept = super::update(
            fish.id,
            input("Tongkol", 4, Some(old_foto.clone())),
            &conf,
            &photos,
            &pool,
        )
        .await?;
        assert_eq!(Some(old_foto.clone()), kept.foto);
        assert!(dir.path().join(&old_foto).exists());

        let replaced = super::update(
            fish.id,
            input("Tongkol", 4, Some(data_url(b"new"))),
            &conf,
            &photos,
            &pool,
        )
        .await?;
        let new_foto = replaced.foto.clone().unwrap();
        assert_ne!(old_foto, new_foto);
        assert!(!dir.path().join(&old_foto).exists());
        assert_eq!(b"new".to_vec(), std::fs::read(dir.path().join(&new_foto))?);

        let cleared = super::update(fish.id, input("Tongkol", 4, None), &conf, &photos, &pool)
            .await?;
        assert_eq!(None, cleared.foto);
        assert!(!dir.path().join(&new_foto).exists());
        Ok(())
    }

    #[actix_web::test]
    async fn update_rejects_foreign_path() -> Result<()> {
        let pool = pool();
        let dir = tempfile::tempdir()?;
        let photos = PhotoStore::new(dir.path());
        let fish = super::create(input("Tongkol", 3, None), &Conf::mock(), &photos, &pool).await?;
        let res = super::update(
            fish.id,
            input("Tongkol", 3, Some("uploads/other.png".into())),
            &Conf::mock(),
            &photos,
            &pool,
        )
        .await;
        assert!(matches!(res, Err(Error::InvalidInput(_))));
        Ok(())
    }

    #[actix_web::test]
    async fn update_missing() -> Result<()> {
        let pool = pool();
        let dir = tempfile::tempdir()?;
        let photos = PhotoStore::new(dir.path());
        let res = super::update(1, input("Tongkol", 3, None), &Conf::mock(), &photos, &pool).await;
        assert!(matches!(res, Err(Error::NotFound(_))));
        Ok(())
    }

    #[actix_web::test]
    async fn delete_removes_photo() -> Result<()> {
        let pool = pool();
        let dir = tempfile::tempdir()?;
        let photos = PhotoStore::new(dir.path());
        let fish = super::create(
            input("Tongkol", 3, Some(data_url(b"jpeg"))),
            &Conf::mock(),
            &photos,
            &pool,
        )
        .await?;
        let foto = fish.foto.clone().unwrap();
        super::delete(fish.id, &photos, &pool).await?;
        assert!(!dir.path().join(foto).exists());
        assert!(matches!(
            super::delete(fish.id, &photos, &pool).await,
            Err(Error::NotFound(_))
        ));
        Ok(())
    }
}
