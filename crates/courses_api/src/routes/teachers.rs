use super::with_service;
use crate::error::ApiError;
use crate::AppState;
use actix_web::{web, HttpResponse};
use courses_core::{AddTeacherRequest, CourseInstanceId};

/// `POST /api/courses/{id}/teachers`
pub(super) async fn add(
    state: web::Data<AppState>,
    id: web::Path<CourseInstanceId>,
    body: web::Json<AddTeacherRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = id.into_inner();
    let request = body.into_inner();
    request.validate()?;

    let teacher = with_service(&state, move |service| {
        service.add_teacher_to_course(id, &request)
    })
    .await?;
    Ok(HttpResponse::Created().json(teacher))
}
