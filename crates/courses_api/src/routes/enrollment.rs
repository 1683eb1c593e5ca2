//! Student and waiting-list handlers under `/api/courses/{id}`.

use super::{created, with_service, API_PATH};
use crate::error::ApiError;
use crate::AppState;
use actix_web::{web, HttpResponse};
use courses_core::{CourseInstanceId, StudentRequest};

/// `GET /api/courses/{id}/students`
pub(super) async fn students(
    state: web::Data<AppState>,
    id: web::Path<CourseInstanceId>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let students = with_service(&state, move |service| service.students_in_course(id)).await?;
    Ok(HttpResponse::Ok().json(students))
}

/// `POST /api/courses/{id}/students`
pub(super) async fn enroll(
    state: web::Data<AppState>,
    id: web::Path<CourseInstanceId>,
    body: web::Json<StudentRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let request = body.into_inner();
    request.validate()?;

    let student = with_service(&state, move |service| {
        service.add_student_to_course(id, &request)
    })
    .await?;
    Ok(created(
        format!("{API_PATH}/{id}/students/{}", student.ssn),
        &student,
    ))
}

/// `DELETE /api/courses/{id}/students/{ssn}`
pub(super) async fn unenroll(
    state: web::Data<AppState>,
    path: web::Path<(CourseInstanceId, String)>,
) -> Result<HttpResponse, ApiError> {
    let (id, ssn) = path.into_inner();
    with_service(&state, move |service| {
        service.remove_student_from_course(id, &ssn)
    })
    .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// `GET /api/courses/{id}/waitinglist`
pub(super) async fn waiting_list(
    state: web::Data<AppState>,
    id: web::Path<CourseInstanceId>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let waiting = with_service(&state, move |service| service.waiting_list(id)).await?;
    Ok(HttpResponse::Ok().json(waiting))
}

/// `POST /api/courses/{id}/waitinglist`
pub(super) async fn join_waiting_list(
    state: web::Data<AppState>,
    id: web::Path<CourseInstanceId>,
    body: web::Json<StudentRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let request = body.into_inner();
    request.validate()?;

    let entry = with_service(&state, move |service| {
        service.add_student_to_waiting_list(id, &request)
    })
    .await?;
    Ok(HttpResponse::Ok().json(entry))
}
