//! Service error taxonomy.

use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Stable machine-readable business-rule codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCode {
    CourseAlreadyHasAMainTeacher,
    PersonAlreadyRegisteredTeacherInCourse,
    CourseIsFull,
    StudentAlreadyInCourse,
    StudentAlreadyOnWaitingList,
}

impl ValidationCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CourseAlreadyHasAMainTeacher => "COURSE_ALREADY_HAS_A_MAIN_TEACHER",
            Self::PersonAlreadyRegisteredTeacherInCourse => {
                "PERSON_ALREADY_REGISTERED_TEACHER_IN_COURSE"
            }
            Self::CourseIsFull => "COURSE_IS_FULL",
            Self::StudentAlreadyInCourse => "STUDENT_ALREADY_IN_COURSE",
            Self::StudentAlreadyOnWaitingList => "STUDENT_ALREADY_ON_WAITING_LIST",
        }
    }
}

impl Display for ValidationCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from `CoursesService` operations.
#[derive(Debug)]
pub enum ServiceError {
    /// A referenced entity does not exist.
    NotFound { entity: &'static str, key: String },
    /// A business-rule precondition failed.
    Validation(ValidationCode),
    /// The request conflicts with current state in a way the caller should not repeat.
    BadRequest(ValidationCode),
    /// Storage failure.
    Repo(RepoError),
}

impl ServiceError {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        Self::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// Business-rule code, when this error carries one.
    pub fn code(&self) -> Option<ValidationCode> {
        match self {
            Self::Validation(code) | Self::BadRequest(code) => Some(*code),
            _ => None,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { entity, key } => write!(f, "{entity} not found: {key}"),
            Self::Validation(code) | Self::BadRequest(code) => write!(f, "{code}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, key } => Self::NotFound { entity, key },
            other => Self::Repo(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ServiceError, ValidationCode};
    use crate::repo::RepoError;

    #[test]
    fn validation_errors_display_their_code() {
        let err = ServiceError::Validation(ValidationCode::CourseAlreadyHasAMainTeacher);
        assert_eq!(err.to_string(), "COURSE_ALREADY_HAS_A_MAIN_TEACHER");
        assert_eq!(
            err.code(),
            Some(ValidationCode::CourseAlreadyHasAMainTeacher)
        );
    }

    #[test]
    fn repository_not_found_maps_to_service_not_found() {
        let err = ServiceError::from(RepoError::NotFound {
            entity: "course instance",
            key: "9999".to_string(),
        });
        assert!(matches!(err, ServiceError::NotFound { key, .. } if key == "9999"));
    }
}
