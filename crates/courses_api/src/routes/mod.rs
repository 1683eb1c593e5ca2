//! Route table and the per-request service runner.

mod courses;
mod enrollment;
mod teachers;

use crate::error::ApiError;
use crate::AppState;
use actix_web::error::JsonPayloadError;
use actix_web::web::{self, delete, get, post, put, scope};
use actix_web::{HttpRequest, HttpResponse};
use courses_core::{CoursesService, ServiceResult, SqliteUnitOfWork};
use serde::Serialize;

/// Base path of every course route.
pub const API_PATH: &str = "/api/courses";

/// Registers the course routes on an actix app.
///
/// Malformed JSON bodies are answered with 412 like any other invalid request.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        scope(API_PATH)
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .route("", get().to(courses::list))
            .route("", post().to(courses::create))
            .route("/{id}", get().to(courses::details))
            .route("/{id}", put().to(courses::update))
            .route("/{id}", delete().to(courses::remove))
            .route("/{id}/teachers", post().to(teachers::add))
            .route("/{id}/students", get().to(enrollment::students))
            .route("/{id}/students", post().to(enrollment::enroll))
            .route("/{id}/students/{ssn}", delete().to(enrollment::unenroll))
            .route("/{id}/waitinglist", get().to(enrollment::waiting_list))
            .route("/{id}/waitinglist", post().to(enrollment::join_waiting_list)),
    );
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Payload(err.to_string()).into()
}

/// Runs `op` against a fresh SQLite-backed service on the blocking pool.
async fn with_service<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&mut CoursesService<SqliteUnitOfWork>) -> ServiceResult<T> + Send + 'static,
{
    let db_path = state.db_path.clone();
    let config = state.service_config.clone();
    let result = web::block(move || -> ServiceResult<T> {
        let uow = SqliteUnitOfWork::open(&db_path)?;
        let mut service = CoursesService::with_config(uow, config);
        op(&mut service)
    })
    .await?;
    Ok(result?)
}

fn created<T: Serialize>(location: String, body: &T) -> HttpResponse {
    HttpResponse::Created()
        .insert_header(("Location", location))
        .json(body)
}
