use super::{Envelope, RestResult as Res};
use crate::db::conf::schema::Conf;
use crate::db::fish::schema::Fish;
use crate::service::{self, fish::FishInput, photo::PhotoStore};
use actix_web::web::{Data, Json, Path};
use actix_web::{delete, get, post, put};
use deadpool_sqlite::Pool;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Serialize)]
pub struct FishView {
    pub id: i64,
    pub nama_ikan: String,
    pub jumlah: i64,
    pub foto: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<Fish> for FishView {
    fn from(val: Fish) -> Self {
        FishView {
            id: val.id,
            nama_ikan: val.nama_ikan,
            jumlah: val.jumlah,
            foto: val.foto,
            created_at: val.created_at,
            updated_at: val.updated_at,
        }
    }
}

#[derive(Deserialize)]
pub struct PostArgs {
    nama_ikan: Option<String>,
    jumlah: Option<i64>,
    foto: Option<String>,
}

impl From<PostArgs> for FishInput {
    fn from(val: PostArgs) -> Self {
        FishInput {
            nama_ikan: val.nama_ikan,
            jumlah: val.jumlah,
            foto: val.foto,
        }
    }
}

#[get("")]
pub async fn get(pool: Data<Pool>) -> Res<Vec<FishView>> {
    let fish = service::fish::list(&pool).await?;
    Ok(Envelope::data(fish.into_iter().map(FishView::from).collect()))
}

#[get("{id}")]
pub async fn get_by_id(id: Path<i64>, pool: Data<Pool>) -> Res<FishView> {
    let fish = service::fish::get(id.into_inner(), &pool).await?;
    Ok(Envelope::data(fish.into()))
}

#[post("")]
pub async fn post(
    args: Json<PostArgs>,
    conf: Data<Conf>,
    photos: Data<PhotoStore>,
    pool: Data<Pool>,
) -> Res<FishView> {
    let fish = service::fish::create(args.into_inner().into(), &conf, &photos, &pool).await?;
    Ok(Envelope::data_with_message(
        fish.into(),
        "Ikan berhasil ditambahkan",
    ))
}

#[put("{id}")]
pub async fn put(
    id: Path<i64>,
    args: Json<PostArgs>,
    conf: Data<Conf>,
    photos: Data<PhotoStore>,
    pool: Data<Pool>,
) -> Res<FishView> {
    let fish = service::fish::update(
        id.into_inner(),
        args.into_inner().into(),
        &conf,
        &photos,
        &pool,
    )
    .await?;
    Ok(Envelope::data_with_message(fish.into(), "Ikan berhasil diupdate"))
}

#[delete("{id}")]
pub async fn delete(id: Path<i64>, photos: Data<PhotoStore>, pool: Data<Pool>) -> Res<()> {
    service::fish::delete(id.into_inner(), &photos, &pool).await?;
    Ok(Envelope::message("Ikan berhasil dihapus"))
}

#[cfg(test)]
mod test {
    use crate::db::conf::schema::Conf;
    use crate::db::test::pool;
    use crate::service::photo::PhotoStore;
    use crate::{db, Result};
    use actix_web::test::{self, TestRequest};
    use actix_web::web::{scope, Data};
    use actix_web::App;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn get_empty_array() -> Result<()> {
        let app = test::init_service(
            App::new()
                .app_data(Data::new(pool()))
                .service(scope("/api/ikan").service(super::get)),
        )
        .await;
        let req = TestRequest::get().uri("/api/ikan").to_request();
        let res: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(json!({"success": true, "data": []}), res);
        Ok(())
    }

    #[actix_web::test]
    async fn get_by_id() -> Result<()> {
        let pool = pool();
        let fish = db::fish::queries::insert("Tongkol".into(), 7, None, &pool).await?;
        let app = test::init_service(
            App::new()
                .app_data(Data::new(pool))
                .service(scope("/api/ikan").service(super::get_by_id)),
        )
        .await;
        let req = TestRequest::get()
            .uri(&format!("/api/ikan/{}", fish.id))
            .to_request();
        let res: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(Some("Tongkol"), res["data"]["nama_ikan"].as_str());
        assert_eq!(Some(7), res["data"]["jumlah"].as_i64());
        assert!(res["data"]["foto"].is_null());

        let req = TestRequest::get().uri("/api/ikan/999").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(404, res.status().as_u16());
        let res: Value = test::read_body_json(res).await;
        assert_eq!(
            json!({"success": false, "message": "Ikan tidak ditemukan"}),
            res
        );
        Ok(())
    }

    #[actix_web::test]
    async fn post_put_delete() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let app = test::init_service(
            App::new()
                .app_data(Data::new(pool()))
                .app_data(Data::new(Conf::mock()))
                .app_data(Data::new(PhotoStore::new(dir.path())))
                .service(
                    scope("/api/ikan")
                        .service(super::post)
                        .service(super::put)
                        .service(super::delete),
                ),
        )
        .await;

        let req = TestRequest::post()
            .uri("/api/ikan")
            .set_json(json!({
                "nama_ikan": "Kerapu",
                "jumlah": 3,
                "foto": "data:image/png;base64,cG5n",
            }))
            .to_request();
        let res: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(Some("Ikan berhasil ditambahkan"), res["message"].as_str());
        let id = res["data"]["id"].as_i64().unwrap();
        let foto = res["data"]["foto"].as_str().unwrap().to_string();
        assert!(dir.path().join(&foto).exists());

        let req = TestRequest::put()
            .uri(&format!("/api/ikan/{id}"))
            .set_json(json!({"nama_ikan": "Kerapu Macan", "jumlah": 4, "foto": foto}))
            .to_request();
        let res: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(Some("Kerapu Macan"), res["data"]["nama_ikan"].as_str());
        assert_eq!(Some(foto.as_str()), res["data"]["foto"].as_str());

        let req = TestRequest::put()
            .uri(&format!("/api/ikan/{id}"))
            .set_json(json!({"nama_ikan": "", "jumlah": 4}))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(400, res.status().as_u16());
        let res: Value = test::read_body_json(res).await;
        assert_eq!(
            Some("Nama ikan dan jumlah harus diisi"),
            res["message"].as_str()
        );

        let req = TestRequest::delete()
            .uri(&format!("/api/ikan/{id}"))
            .to_request();
        let res: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            json!({"success": true, "message": "Ikan berhasil dihapus"}),
            res
        );
        assert!(!dir.path().join(&foto).exists());

        let req = TestRequest::delete()
            .uri(&format!("/api/ikan/{id}"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(404, res.status().as_u16());
        Ok(())
    }
}
