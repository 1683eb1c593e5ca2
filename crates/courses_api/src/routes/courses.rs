//! `/api/courses` and `/api/courses/{id}` handlers.

use super::{created, with_service, API_PATH};
use crate::error::ApiError;
use crate::AppState;
use actix_web::{web, HttpResponse};
use courses_core::{CourseInstanceId, CreateCourseRequest, UpdateCourseRequest};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct SemesterQuery {
    semester: Option<String>,
}

/// `GET /api/courses?semester=`
pub(super) async fn list(
    state: web::Data<AppState>,
    query: web::Query<SemesterQuery>,
) -> Result<HttpResponse, ApiError> {
    let semester = query.into_inner().semester;
    let courses = with_service(&state, move |service| {
        service.list_course_instances(semester.as_deref())
    })
    .await?;
    Ok(HttpResponse::Ok().json(courses))
}

/// `GET /api/courses/{id}`
pub(super) async fn details(
    state: web::Data<AppState>,
    id: web::Path<CourseInstanceId>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let course = with_service(&state, move |service| service.get_course_by_id(id)).await?;
    Ok(HttpResponse::Ok().json(course))
}

/// `POST /api/courses`
pub(super) async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateCourseRequest>,
) -> Result<HttpResponse, ApiError> {
    let request = body.into_inner();
    request.validate()?;

    let (id, course) =
        with_service(&state, move |service| service.create_course(&request)).await?;
    Ok(created(format!("{API_PATH}/{id}"), &course))
}

/// `PUT /api/courses/{id}`
pub(super) async fn update(
    state: web::Data<AppState>,
    id: web::Path<CourseInstanceId>,
    body: web::Json<UpdateCourseRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let request = body.into_inner();
    request.validate()?;

    let course = with_service(&state, move |service| service.update_course(id, &request)).await?;
    Ok(HttpResponse::Ok().json(course))
}

/// `DELETE /api/courses/{id}`
pub(super) async fn remove(
    state: web::Data<AppState>,
    id: web::Path<CourseInstanceId>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    with_service(&state, move |service| service.delete_course(id)).await?;
    Ok(HttpResponse::NoContent().finish())
}
